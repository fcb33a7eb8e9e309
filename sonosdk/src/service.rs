//! Trait d'accès au SDK et bundle de callbacks

use crate::handle::{ContainerHandle, PlaylistHandle};
use crate::slot::SlotType;

/// Erreurs remontées par le SDK
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Unknown container handle: {0}")]
    UnknownContainer(ContainerHandle),

    #[error("Unknown playlist handle: {0}")]
    UnknownPlaylist(PlaylistHandle),

    #[error("Slot index {index} out of range ({count} slots)")]
    SlotOutOfRange { index: usize, count: usize },

    #[error("Slot {0} is not a playlist slot")]
    NotAPlaylistSlot(usize),

    #[error("Slot {0} is not a folder start slot")]
    NotAFolderSlot(usize),

    #[error("Vendor call failed: {0}")]
    Vendor(String),
}

/// Type Result spécialisé pour la frontière SDK
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Bundle de callbacks attaché à un container.
///
/// Équivalent du struct de callbacks C du SDK. `Default` fournit un bundle
/// entièrement no-op ; le propriétaire du container est retrouvé par handle
/// depuis chaque callback, pas via l'environnement de la closure.
pub struct ContainerCallbacks {
    /// Le SDK a fini de charger le container : le listing plat est complet.
    pub on_container_loaded: Box<dyn Fn(ContainerHandle) + Send + Sync>,

    /// Une playlist a été insérée à `position` parmi les enfants directs.
    pub on_playlist_added: Box<dyn Fn(ContainerHandle, PlaylistHandle, usize) + Send + Sync>,

    /// La playlist à `position` a été retirée.
    pub on_playlist_removed: Box<dyn Fn(ContainerHandle, PlaylistHandle, usize) + Send + Sync>,

    /// La playlist à `position` a été déplacée vers `new_position`,
    /// comptée sur la liste avant retrait.
    pub on_playlist_moved: Box<dyn Fn(ContainerHandle, PlaylistHandle, usize, usize) + Send + Sync>,
}

impl Default for ContainerCallbacks {
    fn default() -> Self {
        Self {
            on_container_loaded: Box::new(|_| {}),
            on_playlist_added: Box::new(|_, _, _| {}),
            on_playlist_removed: Box::new(|_, _, _| {}),
            on_playlist_moved: Box::new(|_, _, _, _| {}),
        }
    }
}

impl std::fmt::Debug for ContainerCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerCallbacks").finish_non_exhaustive()
    }
}

/// Accès au SDK playlists du service de musique.
///
/// Toutes les méthodes sont synchrones et ne bloquent pas : l'énumération
/// lit l'état déjà présent dans le processus, et les notifications sont
/// délivrées séquentiellement par le thread de notification du SDK.
pub trait PlaylistService: Send + Sync {
    /// Attache un bundle de callbacks au container.
    ///
    /// Un seul bundle par container : un attachement remplace le précédent.
    /// Un échec est une erreur de configuration fatale pour l'appelant.
    fn attach_container_callbacks(
        &self,
        container: ContainerHandle,
        callbacks: ContainerCallbacks,
    ) -> Result<()>;

    /// Détache les callbacks du container. Idempotent : détacher un
    /// container inconnu ou sans bundle réussit.
    fn detach_container_callbacks(&self, container: ContainerHandle) -> Result<()>;

    /// Nombre de slots du listing plat du container.
    fn slot_count(&self, container: ContainerHandle) -> Result<usize>;

    /// Type du slot à l'index donné.
    fn slot_type(&self, container: ContainerHandle, index: usize) -> Result<SlotType>;

    /// Handle de la playlist portée par le slot (slot `Playlist` uniquement).
    fn playlist_at(&self, container: ContainerHandle, index: usize) -> Result<PlaylistHandle>;

    /// Nom du folder ouvert par le slot (slot `FolderStart` uniquement).
    fn folder_name_at(&self, container: ContainerHandle, index: usize) -> Result<String>;

    /// Nom d'affichage d'une playlist.
    fn playlist_name(&self, playlist: PlaylistHandle) -> Result<String>;

    /// La playlist a-t-elle terminé son propre chargement asynchrone ?
    fn playlist_is_loaded(&self, playlist: PlaylistHandle) -> bool;
}
