//! Descripteurs de slots du listing plat d'un container

use serde::{Deserialize, Serialize};

/// Type d'un slot dans le listing plat, ordonné, d'un container.
///
/// Les folders sont délimités par une paire de marqueurs `FolderStart` /
/// `FolderEnd` ; les slots situés entre les deux appartiennent au folder.
/// L'énumération est non exhaustive : le SDK peut introduire de nouveaux
/// types de slots, qui doivent être ignorés et non plantés.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotType {
    /// Slot portant une playlist
    Playlist,
    /// Ouverture d'un folder
    FolderStart,
    /// Fermeture du folder courant
    FolderEnd,
    /// État transitoire côté SDK, sans contenu exploitable
    Placeholder,
}
