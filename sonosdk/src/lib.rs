//! # sonosdk - Frontière avec le SDK du service de musique
//!
//! Cette crate définit la frontière entre SonoMirror et le SDK client
//! propriétaire du service de musique : handles opaques, descripteurs de
//! slots, bundle de callbacks et le trait [`PlaylistService`].
//!
//! Le SDK réel est une bibliothèque native fermée ; une implémentation de
//! `PlaylistService` fait le pont vers son API C. Le SDK reste le seul
//! propriétaire des objets natifs : les handles exposés ici ne sont que des
//! identifiants de corrélation, jamais des références empruntées.
//!
//! ## Modèle de livraison des callbacks
//!
//! Le SDK délivre toutes ses notifications séquentiellement sur un unique
//! thread de notification, sans réentrance par container. Les
//! implémentations de `PlaylistService` doivent préserver ce contrat.
//!
//! Pour les tests et les exemples, [`sim::SimService`] fournit une
//! implémentation en mémoire scriptable qui rejoue ce contrat sur le
//! thread appelant.

mod handle;
mod service;
mod slot;

pub mod sim;

// Réexports publics
pub use handle::{ContainerHandle, PlaylistHandle};
pub use service::{ContainerCallbacks, PlaylistService, Result, ServiceError};
pub use slot::SlotType;
