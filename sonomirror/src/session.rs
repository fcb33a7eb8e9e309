//! Session miroir : registre des containers et dispatch des callbacks

use crate::config::MirrorConfig;
use crate::container::ContainerMirror;
use crate::error::{Error, Result};
use crate::event::{MirrorEvent, MirrorEventBus, MirrorEventKind};
use crate::state::LoadState;
use crossbeam_channel::Receiver;
use sonosdk::{ContainerCallbacks, ContainerHandle, PlaylistService};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{error, info, warn};

/// Session miroir : point d'entrée de la crate.
///
/// La session possède le registre handle → miroir : chaque callback du SDK
/// retrouve le container propriétaire par une recherche dans ce registre,
/// jamais par un pointeur embarqué dans le callback.
#[derive(Clone)]
pub struct MirrorSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    service: Arc<dyn PlaylistService>,
    config: MirrorConfig,
    containers: RwLock<HashMap<ContainerHandle, Arc<ContainerMirror>>>,
    bus: MirrorEventBus,
}

impl MirrorSession {
    /// Crée une session sur un service SDK
    pub fn new(service: Arc<dyn PlaylistService>, config: MirrorConfig) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                service,
                config,
                containers: RwLock::new(HashMap::new()),
                bus: MirrorEventBus::new(),
            }),
        }
    }

    /// Souscrit au flux d'évènements de la session
    pub fn subscribe(&self) -> Receiver<MirrorEvent> {
        self.inner.bus.subscribe()
    }

    /// Miroir d'un container déjà enregistré
    pub fn container(&self, handle: ContainerHandle) -> Option<Arc<ContainerMirror>> {
        self.inner.containers.read().unwrap().get(&handle).cloned()
    }

    /// Handles des containers enregistrés
    pub fn containers(&self) -> Vec<ContainerHandle> {
        self.inner.containers.read().unwrap().keys().copied().collect()
    }

    /// Charge un container : attache le bundle de callbacks puis attend la
    /// notification « container loaded » du SDK.
    ///
    /// Recharger un container déjà en cours de chargement (ou chargé)
    /// échoue avec [`Error::AlreadyLoaded`] ; le décharger d'abord est le
    /// chemin supporté.
    pub fn load_container(&self, handle: ContainerHandle) -> Result<Arc<ContainerMirror>> {
        let mirror = {
            let mut containers = self.inner.containers.write().unwrap();
            containers
                .entry(handle)
                .or_insert_with(|| {
                    Arc::new(ContainerMirror::new(
                        handle,
                        self.inner.service.clone(),
                        self.inner.config.clone(),
                        self.inner.bus.clone(),
                    ))
                })
                .clone()
        };

        match mirror.state() {
            LoadState::NotLoaded | LoadState::Unloaded => {}
            _ => return Err(Error::AlreadyLoaded(handle)),
        }

        mirror.clear();
        mirror.set_state(LoadState::Registering);

        let callbacks = self.dispatch_callbacks();
        if let Err(e) = self.inner.service.attach_container_callbacks(handle, callbacks) {
            mirror.set_state(LoadState::NotLoaded);
            return Err(Error::Registration(e));
        }

        mirror.set_state(LoadState::Loading);
        info!(container = %handle, "container registered, awaiting load notification");
        Ok(mirror)
    }

    /// Décharge un container, depuis n'importe quel état.
    ///
    /// Les callbacks sont détachés AVANT de vider les enfants : aucune
    /// notification ne peut plus arriver quand l'arbre est libéré.
    pub fn unload_container(&self, handle: ContainerHandle) -> Result<()> {
        let mirror = self
            .container(handle)
            .ok_or(Error::UnknownContainer(handle))?;

        self.inner
            .service
            .detach_container_callbacks(handle)
            .map_err(Error::Registration)?;

        mirror.clear();
        mirror.set_state(LoadState::Unloaded);
        info!(container = %handle, "container unloaded");

        self.inner.bus.broadcast(MirrorEvent {
            container: handle,
            kind: MirrorEventKind::Unloaded,
        });
        Ok(())
    }

    /// Construit le bundle de callbacks du SDK.
    ///
    /// Chaque callback ne capture qu'une référence faible vers la session ;
    /// le miroir visé est retrouvé par handle dans le registre.
    fn dispatch_callbacks(&self) -> ContainerCallbacks {
        let on_loaded = Arc::downgrade(&self.inner);
        let on_added = Arc::downgrade(&self.inner);
        let on_removed = Arc::downgrade(&self.inner);
        let on_moved = Arc::downgrade(&self.inner);

        ContainerCallbacks {
            on_container_loaded: Box::new(move |container| {
                if let Some(inner) = on_loaded.upgrade() {
                    SessionInner::on_container_loaded(&inner, container);
                }
            }),
            on_playlist_added: Box::new(move |container, playlist, position| {
                if let Some(inner) = on_added.upgrade() {
                    inner.with_mirror(container, "playlist_added", |mirror| {
                        mirror.apply_added(playlist, position);
                    });
                }
            }),
            on_playlist_removed: Box::new(move |container, playlist, position| {
                if let Some(inner) = on_removed.upgrade() {
                    inner.with_mirror(container, "playlist_removed", |mirror| {
                        mirror.apply_removed(playlist, position);
                    });
                }
            }),
            on_playlist_moved: Box::new(move |container, playlist, position, new_position| {
                if let Some(inner) = on_moved.upgrade() {
                    inner.with_mirror(container, "playlist_moved", |mirror| {
                        mirror.apply_moved(playlist, position, new_position);
                    });
                }
            }),
        }
    }
}

impl SessionInner {
    fn lookup(&self, container: ContainerHandle) -> Option<Arc<ContainerMirror>> {
        self.containers.read().unwrap().get(&container).cloned()
    }

    fn with_mirror(
        &self,
        container: ContainerHandle,
        callback: &str,
        f: impl FnOnce(&ContainerMirror),
    ) {
        match self.lookup(container) {
            Some(mirror) => f(&mirror),
            None => warn!(%container, callback, "callback for unknown container, dropping"),
        }
    }

    fn on_container_loaded(inner: &Arc<SessionInner>, container: ContainerHandle) {
        inner.with_mirror(container, "container_loaded", |mirror| {
            match mirror.rebuild() {
                Ok(children) => {
                    info!(%container, children, "container loaded");
                    inner.bus.broadcast(MirrorEvent {
                        container,
                        kind: MirrorEventKind::Loaded { children },
                    });
                }
                Err(e) => {
                    error!(%container, error = %e, "container rebuild failed, mirror reset to empty");
                    inner.bus.broadcast(MirrorEvent {
                        container,
                        kind: MirrorEventKind::LoadFailed {
                            reason: e.to_string(),
                        },
                    });
                }
            }
        });
    }
}
