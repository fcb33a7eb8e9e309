//! Diffusion des évènements du miroir

use crossbeam_channel::{Receiver, Sender, unbounded};
use sonosdk::{ContainerHandle, PlaylistHandle};
use std::sync::{Arc, Mutex};

/// Évènement émis par une session miroir
#[derive(Debug, Clone)]
pub struct MirrorEvent {
    pub container: ContainerHandle,
    pub kind: MirrorEventKind,
}

/// Variantes d'évènements miroir
#[derive(Debug, Clone)]
pub enum MirrorEventKind {
    /// L'arbre a été reconstruit après la notification « container loaded »
    Loaded { children: usize },
    /// La reconstruction a échoué ; l'arbre a été remis à vide
    LoadFailed { reason: String },
    /// Le SDK a inséré une playlist parmi les enfants directs
    PlaylistAdded {
        playlist: PlaylistHandle,
        position: usize,
    },
    /// Le SDK a retiré une playlist des enfants directs
    PlaylistRemoved {
        playlist: PlaylistHandle,
        position: usize,
    },
    /// Le SDK a déplacé une playlist ; `new_position` est comptée sur la
    /// liste avant retrait
    PlaylistMoved {
        playlist: PlaylistHandle,
        position: usize,
        new_position: usize,
    },
    /// Le container a été déchargé et son arbre vidé
    Unloaded,
}

/// Bus d'évènements multi-abonnés
#[derive(Clone, Default)]
pub(crate) struct MirrorEventBus {
    subscribers: Arc<Mutex<Vec<Sender<MirrorEvent>>>>,
}

impl MirrorEventBus {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn subscribe(&self) -> Receiver<MirrorEvent> {
        let (tx, rx) = unbounded::<MirrorEvent>();
        {
            let mut subscribers = self.subscribers.lock().unwrap();
            subscribers.push(tx);
        }
        rx
    }

    pub(crate) fn broadcast(&self, event: MirrorEvent) {
        let mut subscribers = self.subscribers.lock().unwrap();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
