//! Curseur de reconstruction de l'arbre depuis le listing plat du SDK

use crate::error::{Error, Result};
use crate::tree::{NodeId, NodeKind, Tree};
use sonosdk::PlaylistHandle;

/// Curseur de reconstruction : scan linéaire avec « parent d'insertion
/// courant », initialisé sur le container racine.
///
/// Chaque folder ouvert doit être refermé avant [`TreeBuilder::finish`] ;
/// le curseur doit être revenu sur la racine exactement quand le listing
/// est épuisé.
pub struct TreeBuilder {
    tree: Tree,
    cursor: NodeId,
    depth: usize,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        let tree = Tree::new();
        let cursor = tree.root();
        Self {
            tree,
            cursor,
            depth: 0,
        }
    }

    /// Ajoute une feuille playlist sous le curseur
    pub fn push_playlist(&mut self, handle: PlaylistHandle, name: Option<String>) -> NodeId {
        self.tree
            .push_child(self.cursor, NodeKind::Playlist { handle, name })
    }

    /// Ouvre un folder sous le curseur et descend dedans
    pub fn open_folder(&mut self, name: Option<String>) -> NodeId {
        let id = self.tree.push_child(self.cursor, NodeKind::Folder { name });
        self.cursor = id;
        self.depth += 1;
        id
    }

    /// Referme le folder courant et remonte d'un niveau.
    ///
    /// Échoue si le curseur est déjà sur la racine : marqueur de fermeture
    /// sans folder ouvert.
    pub fn close_folder(&mut self) -> Result<()> {
        match self.tree.parent(self.cursor) {
            Some(parent) => {
                self.cursor = parent;
                self.depth -= 1;
                Ok(())
            }
            None => Err(Error::UnbalancedFolderMarkers(
                "folder end marker with no open folder".into(),
            )),
        }
    }

    /// Profondeur de folders actuellement ouverte
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Termine le scan ; le curseur doit être revenu sur la racine
    pub fn finish(self) -> Result<Tree> {
        if self.depth != 0 {
            return Err(Error::UnbalancedFolderMarkers(format!(
                "{} folder(s) still open at end of scan",
                self.depth
            )));
        }
        Ok(self.tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(n: u64) -> PlaylistHandle {
        PlaylistHandle(n)
    }

    #[test]
    fn test_flat_sequence() {
        let mut builder = TreeBuilder::new();
        builder.push_playlist(handle(1), Some("A".into()));
        builder.push_playlist(handle(2), Some("B".into()));

        let tree = builder.finish().unwrap();
        assert_eq!(tree.child_count(tree.root()), 2);
        assert_eq!(tree.playlists(), vec![handle(1), handle(2)]);
    }

    #[test]
    fn test_folder_between_leaves() {
        // [Playlist(A), FolderStart, Playlist(B), FolderEnd, Playlist(C)]
        let mut builder = TreeBuilder::new();
        builder.push_playlist(handle(1), Some("A".into()));
        let folder = builder.open_folder(Some("F".into()));
        builder.push_playlist(handle(2), Some("B".into()));
        builder.close_folder().unwrap();
        builder.push_playlist(handle(3), Some("C".into()));

        let tree = builder.finish().unwrap();
        let root = tree.root();
        assert_eq!(tree.child_count(root), 3);

        assert!(matches!(
            tree.kind(tree.child_at(root, 0).unwrap()),
            Some(NodeKind::Playlist { handle: h, .. }) if *h == handle(1)
        ));
        assert_eq!(tree.child_at(root, 1), Some(folder));
        assert_eq!(tree.child_count(folder), 1);
        assert!(matches!(
            tree.kind(tree.child_at(folder, 0).unwrap()),
            Some(NodeKind::Playlist { handle: h, .. }) if *h == handle(2)
        ));
        assert!(matches!(
            tree.kind(tree.child_at(root, 2).unwrap()),
            Some(NodeKind::Playlist { handle: h, .. }) if *h == handle(3)
        ));
    }

    #[test]
    fn test_nested_folders() {
        // [FolderStart, FolderStart, Playlist(X), FolderEnd, FolderEnd]
        let mut builder = TreeBuilder::new();
        let f1 = builder.open_folder(Some("F1".into()));
        let f2 = builder.open_folder(Some("F2".into()));
        builder.push_playlist(handle(9), Some("X".into()));
        builder.close_folder().unwrap();
        builder.close_folder().unwrap();

        let tree = builder.finish().unwrap();
        let root = tree.root();
        assert_eq!(tree.children(root), &[f1]);
        assert_eq!(tree.children(f1), &[f2]);
        assert_eq!(tree.child_count(f2), 1);
        assert_eq!(tree.playlists(), vec![handle(9)]);
    }

    #[test]
    fn test_preorder_reproduces_input_order() {
        // Propriété : pour une séquence équilibrée, le pré-ordre de l'arbre
        // restitue exactement l'ordre des feuilles du listing.
        let mut builder = TreeBuilder::new();
        builder.push_playlist(handle(1), None);
        builder.open_folder(None);
        builder.push_playlist(handle(2), None);
        builder.open_folder(None);
        builder.push_playlist(handle(3), None);
        builder.close_folder().unwrap();
        builder.push_playlist(handle(4), None);
        builder.close_folder().unwrap();
        builder.push_playlist(handle(5), None);

        let tree = builder.finish().unwrap();
        assert_eq!(
            tree.playlists(),
            (1..=5).map(handle).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_unclosed_folder_is_rejected() {
        let mut builder = TreeBuilder::new();
        builder.open_folder(None);

        assert!(matches!(
            builder.finish(),
            Err(Error::UnbalancedFolderMarkers(_))
        ));
    }

    #[test]
    fn test_overclosed_folder_is_rejected() {
        let mut builder = TreeBuilder::new();

        assert!(matches!(
            builder.close_folder(),
            Err(Error::UnbalancedFolderMarkers(_))
        ));
    }

    #[test]
    fn test_depth_tracks_open_folders() {
        let mut builder = TreeBuilder::new();
        assert_eq!(builder.depth(), 0);
        builder.open_folder(None);
        builder.open_folder(None);
        assert_eq!(builder.depth(), 2);
        builder.close_folder().unwrap();
        assert_eq!(builder.depth(), 1);
    }
}
