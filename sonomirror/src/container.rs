//! Miroir d'un container de playlists du SDK

use crate::Result;
use crate::config::MirrorConfig;
use crate::event::{MirrorEvent, MirrorEventBus, MirrorEventKind};
use crate::state::{LoadState, StateCell};
use sonosdk::{ContainerHandle, PlaylistHandle, PlaylistService, SlotType};
use sonotree::{NodeKind, Tree, TreeBuilder};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// Miroir en mémoire d'un container du SDK.
///
/// Le miroir possède son arbre d'éléments exclusivement ; le handle du SDK
/// n'est qu'un identifiant de corrélation, jamais une référence empruntée.
/// Toutes les mutations arrivent par le thread de notification du SDK, via
/// la session propriétaire.
pub struct ContainerMirror {
    handle: ContainerHandle,
    service: Arc<dyn PlaylistService>,
    config: MirrorConfig,
    state: StateCell,
    tree: RwLock<Tree>,
    bus: MirrorEventBus,
}

impl ContainerMirror {
    pub(crate) fn new(
        handle: ContainerHandle,
        service: Arc<dyn PlaylistService>,
        config: MirrorConfig,
        bus: MirrorEventBus,
    ) -> Self {
        Self {
            handle,
            service,
            config,
            state: StateCell::new(LoadState::NotLoaded),
            tree: RwLock::new(Tree::new()),
            bus,
        }
    }

    /// Handle SDK du container
    pub fn handle(&self) -> ContainerHandle {
        self.handle
    }

    /// État courant de la machine de chargement
    pub fn state(&self) -> LoadState {
        self.state.get()
    }

    pub(crate) fn set_state(&self, state: LoadState) {
        self.state.set(state);
    }

    /// Le container charge-t-il encore ?
    ///
    /// Vrai entre le début de l'enregistrement et la fin du scan. En
    /// récursif, chaque feuille est en plus interrogée auprès du SDK : les
    /// playlists mènent leur propre chargement asynchrone indépendant.
    pub fn is_loading(&self, recursive: bool) -> bool {
        if self.state.get().is_loading() {
            return true;
        }

        if recursive {
            let tree = self.tree.read().unwrap();
            for handle in tree.playlists() {
                if !self.service.playlist_is_loaded(handle) {
                    return true;
                }
            }
        }

        false
    }

    /// Nombre d'enfants directs du container
    pub fn num_children(&self) -> usize {
        let tree = self.tree.read().unwrap();
        tree.child_count(tree.root())
    }

    /// Le container a-t-il des enfants ?
    pub fn has_children(&self) -> bool {
        self.num_children() > 0
    }

    /// Copie de l'arbre courant
    pub fn snapshot(&self) -> Tree {
        self.tree.read().unwrap().clone()
    }

    /// Handles des playlists du miroir, en ordre pré-ordre
    pub fn playlists(&self) -> Vec<PlaylistHandle> {
        self.tree.read().unwrap().playlists()
    }

    /// Export markdown de la hiérarchie
    pub fn to_markdown(&self) -> String {
        self.tree.read().unwrap().to_markdown()
    }

    /// Vide l'arbre. Appelé seulement une fois les callbacks détachés.
    pub(crate) fn clear(&self) {
        *self.tree.write().unwrap() = Tree::new();
    }

    // ============= Reconstruction =============

    /// Reconstruit l'arbre par scan linéaire du listing plat.
    ///
    /// En cas d'échec l'arbre est remis à vide : l'état partiel défini est
    /// l'arbre vide, jamais un curseur pendant.
    pub(crate) fn rebuild(&self) -> Result<usize> {
        match self.scan() {
            Ok(tree) => {
                let children = tree.child_count(tree.root());
                *self.tree.write().unwrap() = tree;
                self.state.set(LoadState::Loaded);
                Ok(children)
            }
            Err(e) => {
                self.clear();
                self.state.set(LoadState::Loaded);
                Err(e)
            }
        }
    }

    fn scan(&self) -> Result<Tree> {
        let count = self.service.slot_count(self.handle)?;
        let mut builder = TreeBuilder::new();

        for index in 0..count {
            match self.service.slot_type(self.handle, index)? {
                SlotType::Playlist => {
                    let playlist = self.service.playlist_at(self.handle, index)?;
                    let name = self.fetch_playlist_name(playlist);
                    builder.push_playlist(playlist, name);
                }
                SlotType::FolderStart => {
                    let name = self.fetch_folder_name(index);
                    builder.open_folder(name);
                }
                SlotType::FolderEnd => builder.close_folder()?,
                SlotType::Placeholder => {
                    debug!(container = %self.handle, index, "placeholder slot, skipping");
                }
                other => {
                    warn!(
                        container = %self.handle,
                        index,
                        slot_type = ?other,
                        "unknown slot type, skipping"
                    );
                }
            }
        }

        Ok(builder.finish()?)
    }

    // Les noms sont cosmétiques : un échec de résolution dégrade en `None`,
    // seule l'énumération des slots est fatale au scan.
    fn fetch_playlist_name(&self, playlist: PlaylistHandle) -> Option<String> {
        if !self.config.fetch_names {
            return None;
        }
        match self.service.playlist_name(playlist) {
            Ok(name) => Some(name),
            Err(e) => {
                warn!(container = %self.handle, %playlist, error = %e, "playlist name lookup failed");
                None
            }
        }
    }

    fn fetch_folder_name(&self, index: usize) -> Option<String> {
        if !self.config.fetch_names {
            return None;
        }
        match self.service.folder_name_at(self.handle, index) {
            Ok(name) => Some(name),
            Err(e) => {
                warn!(container = %self.handle, index, error = %e, "folder name lookup failed");
                None
            }
        }
    }

    // ============= Mutations incrémentales =============

    /// Le SDK a inséré une playlist parmi les enfants directs.
    pub(crate) fn apply_added(&self, playlist: PlaylistHandle, position: usize) {
        let name = self.fetch_playlist_name(playlist);

        let mut tree = self.tree.write().unwrap();
        let root = tree.root();
        let count = tree.child_count(root);
        if position > count {
            warn!(
                container = %self.handle,
                %playlist,
                position,
                count,
                "add position out of range, appending"
            );
        }
        tree.insert_child(
            root,
            position.min(count),
            NodeKind::Playlist {
                handle: playlist,
                name,
            },
        );
        drop(tree);

        self.emit(MirrorEventKind::PlaylistAdded { playlist, position });
    }

    /// Le SDK a retiré la playlist à la position donnée.
    pub(crate) fn apply_removed(&self, playlist: PlaylistHandle, position: usize) {
        let mut tree = self.tree.write().unwrap();
        let root = tree.root();
        let Some(index) = self.resolve_position(&tree, playlist, position) else {
            warn!(
                container = %self.handle,
                %playlist,
                position,
                "removed playlist not found in mirror, ignoring"
            );
            return;
        };
        tree.remove_child(root, index);
        drop(tree);

        self.emit(MirrorEventKind::PlaylistRemoved { playlist, position });
    }

    /// Le SDK a déplacé une playlist ; `new_position` est comptée sur la
    /// liste avant retrait.
    pub(crate) fn apply_moved(&self, playlist: PlaylistHandle, position: usize, new_position: usize) {
        let mut tree = self.tree.write().unwrap();
        let root = tree.root();
        let Some(from) = self.resolve_position(&tree, playlist, position) else {
            warn!(
                container = %self.handle,
                %playlist,
                position,
                "moved playlist not found in mirror, ignoring"
            );
            return;
        };
        let to = if new_position > from {
            new_position - 1
        } else {
            new_position
        };
        tree.move_child(root, from, to);
        drop(tree);

        self.emit(MirrorEventKind::PlaylistMoved {
            playlist,
            position,
            new_position,
        });
    }

    /// Retrouve l'index réel d'une playlist parmi les enfants directs.
    ///
    /// La position annoncée fait foi quand le handle correspond ; sinon le
    /// handle est recherché dans la fratrie et la dérive est signalée.
    fn resolve_position(
        &self,
        tree: &Tree,
        playlist: PlaylistHandle,
        position: usize,
    ) -> Option<usize> {
        let root = tree.root();

        if let Some(child) = tree.child_at(root, position) {
            if matches!(
                tree.kind(child),
                Some(NodeKind::Playlist { handle, .. }) if *handle == playlist
            ) {
                return Some(position);
            }
        }

        let found = tree.children(root).iter().position(|&child| {
            matches!(
                tree.kind(child),
                Some(NodeKind::Playlist { handle, .. }) if *handle == playlist
            )
        });
        if let Some(index) = found {
            warn!(
                container = %self.handle,
                %playlist,
                position,
                index,
                "mirror drift: playlist found at another position"
            );
        }
        found
    }

    fn emit(&self, kind: MirrorEventKind) {
        self.bus.broadcast(MirrorEvent {
            container: self.handle,
            kind,
        });
    }
}
