//! Machine à états de chargement d'un container

use std::sync::atomic::{AtomicU8, Ordering};

/// État de chargement d'un container miroir
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LoadState {
    /// Aucun chargement n'a encore été demandé
    NotLoaded = 0,
    /// Callbacks en cours d'attachement auprès du SDK
    Registering = 1,
    /// Attachement acquitté ; notification « container loaded » attendue,
    /// puis scan de reconstruction en cours
    Loading = 2,
    /// Notification reçue et arbre reconstruit
    Loaded = 3,
    /// Déchargé ; un nouveau chargement est permis
    Unloaded = 4,
}

impl From<u8> for LoadState {
    fn from(value: u8) -> Self {
        match value {
            1 => LoadState::Registering,
            2 => LoadState::Loading,
            3 => LoadState::Loaded,
            4 => LoadState::Unloaded,
            _ => LoadState::NotLoaded,
        }
    }
}

impl LoadState {
    /// Le container est-il entre le début de l'enregistrement et la fin du
    /// scan ?
    pub fn is_loading(self) -> bool {
        matches!(self, LoadState::Registering | LoadState::Loading)
    }
}

/// Cellule atomique portant un [`LoadState`]
#[derive(Debug)]
pub(crate) struct StateCell(AtomicU8);

impl StateCell {
    pub(crate) fn new(state: LoadState) -> Self {
        Self(AtomicU8::new(state as u8))
    }

    pub(crate) fn get(&self) -> LoadState {
        LoadState::from(self.0.load(Ordering::SeqCst))
    }

    pub(crate) fn set(&self, state: LoadState) {
        self.0.store(state as u8, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_round_trips_through_u8() {
        for state in [
            LoadState::NotLoaded,
            LoadState::Registering,
            LoadState::Loading,
            LoadState::Loaded,
            LoadState::Unloaded,
        ] {
            assert_eq!(LoadState::from(state as u8), state);
        }
    }

    #[test]
    fn test_is_loading_covers_registration_and_scan() {
        assert!(LoadState::Registering.is_loading());
        assert!(LoadState::Loading.is_loading());
        assert!(!LoadState::NotLoaded.is_loading());
        assert!(!LoadState::Loaded.is_loading());
        assert!(!LoadState::Unloaded.is_loading());
    }
}
