//! # sonomirror - Miroir de l'arborescence de playlists du SDK
//!
//! Cette crate est une façade objet au-dessus du SDK client propriétaire du
//! service de musique : elle reçoit ses callbacks asynchrones (container
//! chargé, playlist ajoutée/retirée/déplacée) et reflète les handles natifs
//! dans un arbre d'éléments en mémoire (playlists et folders), ordre de
//! fratrie préservé.
//!
//! # Architecture
//!
//! - **[`MirrorSession`]** : possède le registre handle → miroir et le bus
//!   d'évènements ; construit le bundle de callbacks et orchestre
//!   chargement et déchargement.
//! - **[`ContainerMirror`]** : un container du SDK reflété ; machine à
//!   états de chargement, scan de reconstruction, mutations incrémentales.
//! - La reconstruction et l'arbre lui-même vivent dans `sonotree` ; la
//!   frontière SDK (trait, handles, simulateur) vit dans `sonosdk`.
//!
//! Le SDK délivre toutes ses notifications séquentiellement sur son thread
//! de notification ; aucune opération du miroir ne bloque ni ne suspend.
//!
//! # Exemple
//!
//! ```
//! use sonomirror::{MirrorConfig, MirrorSession};
//! use sonosdk::sim::{SimService, SimSlot};
//!
//! let sdk = SimService::new();
//! let container = sdk.add_container();
//! let chill = sdk.add_playlist("Chill");
//! sdk.set_slots(
//!     container,
//!     vec![
//!         SimSlot::FolderStart("Soir".into()),
//!         SimSlot::Playlist(chill),
//!         SimSlot::FolderEnd,
//!     ],
//! );
//!
//! let session = MirrorSession::new(sdk.clone(), MirrorConfig::default());
//! let mirror = session.load_container(container).unwrap();
//! assert!(mirror.is_loading(false));
//!
//! // Le SDK signale la fin du chargement : l'arbre est reconstruit
//! sdk.notify_container_loaded(container);
//! assert_eq!(mirror.num_children(), 1);
//! assert_eq!(mirror.playlists(), vec![chill]);
//! ```

mod config;
mod container;
mod error;
mod event;
mod session;
mod state;

// Réexports publics
pub use config::MirrorConfig;
pub use container::ContainerMirror;
pub use error::{Error, Result};
pub use event::{MirrorEvent, MirrorEventKind};
pub use session::MirrorSession;
pub use state::LoadState;

// Réexports de l'arbre pour les consommateurs de snapshots
pub use sonotree::{NodeId, NodeKind, Tree};
