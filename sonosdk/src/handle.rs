//! Handles opaques du SDK

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle opaque d'un container de playlists côté SDK.
///
/// Identifiant non-propriétaire : il sert uniquement à corréler les
/// callbacks du SDK avec le container concerné.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContainerHandle(pub u64);

impl fmt::Display for ContainerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "container#{}", self.0)
    }
}

/// Handle opaque d'une playlist côté SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlaylistHandle(pub u64);

impl fmt::Display for PlaylistHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "playlist#{}", self.0)
    }
}
