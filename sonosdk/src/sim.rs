//! Simulateur en mémoire du SDK pour les tests et les exemples
//!
//! Le SDK réel est une bibliothèque fermée qui ne peut pas être liée en CI.
//! [`SimService`] rejoue son contrat : un listing plat scriptable par
//! container, et des notifications déclenchées à la demande, délivrées
//! séquentiellement sur le thread appelant (qui joue le rôle du thread de
//! notification du SDK).

use crate::handle::{ContainerHandle, PlaylistHandle};
use crate::service::{ContainerCallbacks, PlaylistService, Result, ServiceError};
use crate::slot::SlotType;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Un slot scripté du simulateur
#[derive(Debug, Clone)]
pub enum SimSlot {
    Playlist(PlaylistHandle),
    FolderStart(String),
    FolderEnd,
    Placeholder,
}

#[derive(Default)]
struct SimContainer {
    slots: Vec<SimSlot>,
    callbacks: Option<Arc<ContainerCallbacks>>,
}

struct SimPlaylist {
    name: String,
    loaded: bool,
}

#[derive(Default)]
struct SimInner {
    next_handle: u64,
    containers: HashMap<ContainerHandle, SimContainer>,
    playlists: HashMap<PlaylistHandle, SimPlaylist>,
}

/// Simulateur scriptable du SDK
#[derive(Default)]
pub struct SimService {
    inner: Mutex<SimInner>,
}

impl SimService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Déclare un nouveau container côté SDK
    pub fn add_container(&self) -> ContainerHandle {
        let mut inner = self.inner.lock().unwrap();
        inner.next_handle += 1;
        let handle = ContainerHandle(inner.next_handle);
        inner.containers.insert(handle, SimContainer::default());
        handle
    }

    /// Déclare une playlist, chargée par défaut
    pub fn add_playlist(&self, name: &str) -> PlaylistHandle {
        let mut inner = self.inner.lock().unwrap();
        inner.next_handle += 1;
        let handle = PlaylistHandle(inner.next_handle);
        inner.playlists.insert(
            handle,
            SimPlaylist {
                name: name.to_string(),
                loaded: true,
            },
        );
        handle
    }

    /// Remplace le listing plat d'un container
    pub fn set_slots(&self, container: ContainerHandle, slots: Vec<SimSlot>) {
        let mut inner = self.inner.lock().unwrap();
        match inner.containers.get_mut(&container) {
            Some(c) => c.slots = slots,
            None => warn!(%container, "set_slots on unknown container"),
        }
    }

    /// Change l'état de chargement d'une playlist
    pub fn set_playlist_loaded(&self, playlist: PlaylistHandle, loaded: bool) {
        let mut inner = self.inner.lock().unwrap();
        match inner.playlists.get_mut(&playlist) {
            Some(p) => p.loaded = loaded,
            None => warn!(%playlist, "set_playlist_loaded on unknown playlist"),
        }
    }

    /// Un bundle de callbacks est-il attaché au container ?
    pub fn callbacks_attached(&self, container: ContainerHandle) -> bool {
        let inner = self.inner.lock().unwrap();
        inner
            .containers
            .get(&container)
            .is_some_and(|c| c.callbacks.is_some())
    }

    // Le verrou interne est relâché avant l'invocation : un callback peut
    // réentrer dans le service (énumération pendant la reconstruction).
    fn callbacks_for(&self, container: ContainerHandle) -> Option<Arc<ContainerCallbacks>> {
        let inner = self.inner.lock().unwrap();
        inner.containers.get(&container)?.callbacks.clone()
    }

    /// Notifie « container loaded »
    pub fn notify_container_loaded(&self, container: ContainerHandle) {
        if let Some(cb) = self.callbacks_for(container) {
            (cb.on_container_loaded)(container);
        }
    }

    /// Notifie « playlist added »
    pub fn notify_playlist_added(
        &self,
        container: ContainerHandle,
        playlist: PlaylistHandle,
        position: usize,
    ) {
        if let Some(cb) = self.callbacks_for(container) {
            (cb.on_playlist_added)(container, playlist, position);
        }
    }

    /// Notifie « playlist removed »
    pub fn notify_playlist_removed(
        &self,
        container: ContainerHandle,
        playlist: PlaylistHandle,
        position: usize,
    ) {
        if let Some(cb) = self.callbacks_for(container) {
            (cb.on_playlist_removed)(container, playlist, position);
        }
    }

    /// Notifie « playlist moved » (`new_position` comptée avant retrait)
    pub fn notify_playlist_moved(
        &self,
        container: ContainerHandle,
        playlist: PlaylistHandle,
        position: usize,
        new_position: usize,
    ) {
        if let Some(cb) = self.callbacks_for(container) {
            (cb.on_playlist_moved)(container, playlist, position, new_position);
        }
    }

    fn with_slot<T>(
        &self,
        container: ContainerHandle,
        index: usize,
        f: impl FnOnce(&SimSlot) -> Result<T>,
    ) -> Result<T> {
        let inner = self.inner.lock().unwrap();
        let c = inner
            .containers
            .get(&container)
            .ok_or(ServiceError::UnknownContainer(container))?;
        let slot = c.slots.get(index).ok_or(ServiceError::SlotOutOfRange {
            index,
            count: c.slots.len(),
        })?;
        f(slot)
    }
}

impl PlaylistService for SimService {
    fn attach_container_callbacks(
        &self,
        container: ContainerHandle,
        callbacks: ContainerCallbacks,
    ) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let c = inner
            .containers
            .get_mut(&container)
            .ok_or(ServiceError::UnknownContainer(container))?;
        c.callbacks = Some(Arc::new(callbacks));
        Ok(())
    }

    fn detach_container_callbacks(&self, container: ContainerHandle) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(c) = inner.containers.get_mut(&container) {
            c.callbacks = None;
        }
        Ok(())
    }

    fn slot_count(&self, container: ContainerHandle) -> Result<usize> {
        let inner = self.inner.lock().unwrap();
        inner
            .containers
            .get(&container)
            .map(|c| c.slots.len())
            .ok_or(ServiceError::UnknownContainer(container))
    }

    fn slot_type(&self, container: ContainerHandle, index: usize) -> Result<SlotType> {
        self.with_slot(container, index, |slot| {
            Ok(match slot {
                SimSlot::Playlist(_) => SlotType::Playlist,
                SimSlot::FolderStart(_) => SlotType::FolderStart,
                SimSlot::FolderEnd => SlotType::FolderEnd,
                SimSlot::Placeholder => SlotType::Placeholder,
            })
        })
    }

    fn playlist_at(&self, container: ContainerHandle, index: usize) -> Result<PlaylistHandle> {
        self.with_slot(container, index, |slot| match slot {
            SimSlot::Playlist(handle) => Ok(*handle),
            _ => Err(ServiceError::NotAPlaylistSlot(index)),
        })
    }

    fn folder_name_at(&self, container: ContainerHandle, index: usize) -> Result<String> {
        self.with_slot(container, index, |slot| match slot {
            SimSlot::FolderStart(name) => Ok(name.clone()),
            _ => Err(ServiceError::NotAFolderSlot(index)),
        })
    }

    fn playlist_name(&self, playlist: PlaylistHandle) -> Result<String> {
        let inner = self.inner.lock().unwrap();
        inner
            .playlists
            .get(&playlist)
            .map(|p| p.name.clone())
            .ok_or(ServiceError::UnknownPlaylist(playlist))
    }

    fn playlist_is_loaded(&self, playlist: PlaylistHandle) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.playlists.get(&playlist).is_some_and(|p| p.loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_slot_enumeration() {
        let sdk = SimService::new();
        let container = sdk.add_container();
        let p = sdk.add_playlist("Focus");
        sdk.set_slots(
            container,
            vec![
                SimSlot::Playlist(p),
                SimSlot::FolderStart("Jazz".into()),
                SimSlot::FolderEnd,
                SimSlot::Placeholder,
            ],
        );

        assert_eq!(sdk.slot_count(container).unwrap(), 4);
        assert_eq!(sdk.slot_type(container, 0).unwrap(), SlotType::Playlist);
        assert_eq!(sdk.slot_type(container, 1).unwrap(), SlotType::FolderStart);
        assert_eq!(sdk.slot_type(container, 2).unwrap(), SlotType::FolderEnd);
        assert_eq!(sdk.slot_type(container, 3).unwrap(), SlotType::Placeholder);
        assert_eq!(sdk.playlist_at(container, 0).unwrap(), p);
        assert_eq!(sdk.folder_name_at(container, 1).unwrap(), "Jazz");
        assert_eq!(sdk.playlist_name(p).unwrap(), "Focus");
    }

    #[test]
    fn test_slot_errors() {
        let sdk = SimService::new();
        let container = sdk.add_container();
        let p = sdk.add_playlist("Focus");
        sdk.set_slots(container, vec![SimSlot::Playlist(p)]);

        assert!(matches!(
            sdk.slot_type(container, 5),
            Err(ServiceError::SlotOutOfRange { index: 5, count: 1 })
        ));
        assert!(matches!(
            sdk.folder_name_at(container, 0),
            Err(ServiceError::NotAFolderSlot(0))
        ));
        assert!(matches!(
            sdk.slot_count(ContainerHandle(999)),
            Err(ServiceError::UnknownContainer(_))
        ));
    }

    #[test]
    fn test_notify_fires_attached_bundle() {
        let sdk = SimService::new();
        let container = sdk.add_container();
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = fired.clone();
        sdk.attach_container_callbacks(
            container,
            ContainerCallbacks {
                on_container_loaded: Box::new(move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
                ..Default::default()
            },
        )
        .unwrap();

        sdk.notify_container_loaded(container);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_detach_is_idempotent() {
        let sdk = SimService::new();
        let container = sdk.add_container();
        sdk.attach_container_callbacks(container, ContainerCallbacks::default())
            .unwrap();
        assert!(sdk.callbacks_attached(container));

        sdk.detach_container_callbacks(container).unwrap();
        sdk.detach_container_callbacks(container).unwrap();
        assert!(!sdk.callbacks_attached(container));

        // Détacher un container inconnu réussit aussi
        sdk.detach_container_callbacks(ContainerHandle(999)).unwrap();
    }

    #[test]
    fn test_attach_replaces_previous_bundle() {
        let sdk = SimService::new();
        let container = sdk.add_container();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let counter = first.clone();
        sdk.attach_container_callbacks(
            container,
            ContainerCallbacks {
                on_container_loaded: Box::new(move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
                ..Default::default()
            },
        )
        .unwrap();

        let counter = second.clone();
        sdk.attach_container_callbacks(
            container,
            ContainerCallbacks {
                on_container_loaded: Box::new(move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
                ..Default::default()
            },
        )
        .unwrap();

        sdk.notify_container_loaded(container);
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_notify_without_bundle_is_a_noop() {
        let sdk = SimService::new();
        let container = sdk.add_container();
        // Aucun bundle attaché : rien ne doit paniquer
        sdk.notify_container_loaded(container);
        sdk.notify_playlist_added(container, PlaylistHandle(42), 0);
    }
}
