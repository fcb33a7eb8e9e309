//! # sonotree - Arbre des éléments de playlists
//!
//! Cette crate porte la structure mémoire dans laquelle SonoMirror reflète
//! un container du SDK : un arbre d'éléments (playlists feuilles, folders
//! internes) raciné sur le container, avec ordre de fratrie préservé.
//!
//! # Architecture
//!
//! - **[`Tree`]** : arène possédant tous les nœuds ; un enfant référence son
//!   parent par index, jamais par référence propriétaire.
//! - **[`NodeKind`]** : variant fermé {Container, Folder, Playlist},
//!   dispatché par pattern matching.
//! - **[`TreeBuilder`]** : curseur de reconstruction pour le scan linéaire
//!   du listing plat du SDK, avec détection des marqueurs de folders
//!   déséquilibrés.

mod builder;
mod error;
mod tree;

// Réexports publics
pub use builder::TreeBuilder;
pub use error::{Error, Result};
pub use tree::{Node, NodeId, NodeKind, Preorder, Tree};
