//! Arène des éléments de playlists

use serde::{Deserialize, Serialize};
use sonosdk::PlaylistHandle;
use std::fmt::Write;

/// Identifiant d'un nœud dans l'arène
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(usize);

/// Nature d'un élément de l'arbre
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// La racine : le container lui-même
    Container,
    /// Folder délimité par une paire de marqueurs dans le listing du SDK
    Folder { name: Option<String> },
    /// Playlist feuille, corrélée au SDK par son handle
    Playlist {
        handle: PlaylistHandle,
        name: Option<String>,
    },
}

/// Nœud de l'arène
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    /// Parent par index ; `None` pour la racine et les nœuds détachés
    pub parent: Option<NodeId>,
    /// Enfants en ordre de fratrie
    pub children: Vec<NodeId>,
}

/// Arbre d'éléments, toujours raciné sur un nœud [`NodeKind::Container`].
///
/// Les nœuds vivent dans l'arène possédée par l'arbre ; aucun cycle de
/// références n'est possible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Crée un arbre réduit à sa racine Container
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Container,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Racine (toujours présente)
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Nature du nœud
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id.0).map(|n| &n.kind)
    }

    /// Parent du nœud ; `None` pour la racine
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    /// Enfants directs, en ordre de fratrie
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Nombre d'enfants directs
    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    /// Le nœud a-t-il des enfants ?
    pub fn has_children(&self, id: NodeId) -> bool {
        !self.children(id).is_empty()
    }

    /// Enfant à l'index donné
    pub fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).get(index).copied()
    }

    /// Ajoute un enfant en dernière position
    pub fn push_child(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let index = self.child_count(parent);
        self.insert_child(parent, index, kind)
    }

    /// Insère un enfant à l'index donné, borné à la fin de la fratrie
    pub fn insert_child(&mut self, parent: NodeId, index: usize, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        let children = &mut self.nodes[parent.0].children;
        let index = index.min(children.len());
        children.insert(index, id);
        id
    }

    /// Retire l'enfant à l'index donné.
    ///
    /// Le sous-arbre retiré devient orphelin dans l'arène : il n'est plus
    /// atteignable depuis la racine.
    // TODO: compacter l'arène quand les orphelins s'accumulent sur les
    // containers à forte rotation de playlists.
    pub fn remove_child(&mut self, parent: NodeId, index: usize) -> Option<NodeId> {
        let children = &mut self.nodes.get_mut(parent.0)?.children;
        if index >= children.len() {
            return None;
        }
        let id = children.remove(index);
        self.nodes[id.0].parent = None;
        Some(id)
    }

    /// Déplace un enfant de `from` vers `to` au sein de la même fratrie
    pub fn move_child(&mut self, parent: NodeId, from: usize, to: usize) -> bool {
        let Some(node) = self.nodes.get_mut(parent.0) else {
            return false;
        };
        let children = &mut node.children;
        if from >= children.len() {
            return false;
        }
        let id = children.remove(from);
        let to = to.min(children.len());
        children.insert(to, id);
        true
    }

    /// Parcours pré-ordre depuis la racine, fratries en ordre
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![self.root()],
        }
    }

    /// Handles des playlists de l'arbre, en ordre pré-ordre
    pub fn playlists(&self) -> Vec<PlaylistHandle> {
        self.preorder()
            .filter_map(|id| match &self.nodes[id.0].kind {
                NodeKind::Playlist { handle, .. } => Some(*handle),
                _ => None,
            })
            .collect()
    }

    /// Export markdown indenté de la hiérarchie
    pub fn to_markdown(&self) -> String {
        let mut buf = String::new();
        self.write_markdown(&mut buf, self.root(), 0);
        buf
    }

    fn write_markdown(&self, buf: &mut String, id: NodeId, depth: usize) {
        let indent = "  ".repeat(depth);
        match &self.nodes[id.0].kind {
            NodeKind::Container => {
                writeln!(buf, "{}- **Container**", indent).unwrap();
            }
            NodeKind::Folder { name } => {
                writeln!(
                    buf,
                    "{}- **Folder**: {}",
                    indent,
                    name.as_deref().unwrap_or("(unnamed)")
                )
                .unwrap();
            }
            NodeKind::Playlist { handle, name } => {
                writeln!(
                    buf,
                    "{}- **Playlist**: {} (`{}`)",
                    indent,
                    name.as_deref().unwrap_or("(unnamed)"),
                    handle
                )
                .unwrap();
            }
        }

        for child in &self.nodes[id.0].children {
            self.write_markdown(buf, *child, depth + 1);
        }
    }
}

/// Parcours pré-ordre à pile explicite
pub struct Preorder<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        // Empiler les enfants en ordre inverse pour restituer la fratrie
        // dans l'ordre
        self.stack
            .extend(self.tree.nodes[id.0].children.iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(n: u64) -> NodeKind {
        NodeKind::Playlist {
            handle: PlaylistHandle(n),
            name: None,
        }
    }

    fn leaf_handles(tree: &Tree) -> Vec<u64> {
        tree.playlists().into_iter().map(|h| h.0).collect()
    }

    #[test]
    fn test_new_tree_is_a_bare_container() {
        let tree = Tree::new();
        assert_eq!(tree.kind(tree.root()), Some(&NodeKind::Container));
        assert!(!tree.has_children(tree.root()));
        assert_eq!(tree.parent(tree.root()), None);
    }

    #[test]
    fn test_preorder_preserves_sibling_order() {
        let mut tree = Tree::new();
        let root = tree.root();
        tree.push_child(root, leaf(1));
        let folder = tree.push_child(root, NodeKind::Folder { name: None });
        tree.push_child(folder, leaf(2));
        tree.push_child(folder, leaf(3));
        tree.push_child(root, leaf(4));

        assert_eq!(leaf_handles(&tree), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_insert_child_at_position() {
        let mut tree = Tree::new();
        let root = tree.root();
        tree.push_child(root, leaf(1));
        tree.push_child(root, leaf(3));
        tree.insert_child(root, 1, leaf(2));

        assert_eq!(leaf_handles(&tree), vec![1, 2, 3]);

        // Index au-delà de la fratrie : borné à la fin
        tree.insert_child(root, 99, leaf(4));
        assert_eq!(leaf_handles(&tree), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_remove_child_detaches_subtree() {
        let mut tree = Tree::new();
        let root = tree.root();
        tree.push_child(root, leaf(1));
        let folder = tree.push_child(root, NodeKind::Folder { name: None });
        tree.push_child(folder, leaf(2));

        let removed = tree.remove_child(root, 1).unwrap();
        assert_eq!(removed, folder);
        assert_eq!(tree.parent(folder), None);
        assert_eq!(leaf_handles(&tree), vec![1]);

        // Index hors fratrie : aucun retrait
        assert_eq!(tree.remove_child(root, 5), None);
    }

    #[test]
    fn test_move_child_within_siblings() {
        let mut tree = Tree::new();
        let root = tree.root();
        for n in 1..=3 {
            tree.push_child(root, leaf(n));
        }

        assert!(tree.move_child(root, 0, 2));
        assert_eq!(leaf_handles(&tree), vec![2, 3, 1]);

        assert!(!tree.move_child(root, 9, 0));
    }

    #[test]
    fn test_markdown_dump() {
        let mut tree = Tree::new();
        let root = tree.root();
        let folder = tree.push_child(
            root,
            NodeKind::Folder {
                name: Some("Jazz".into()),
            },
        );
        tree.push_child(
            folder,
            NodeKind::Playlist {
                handle: PlaylistHandle(7),
                name: Some("Blue Train".into()),
            },
        );

        let dump = tree.to_markdown();
        assert!(dump.contains("- **Container**"));
        assert!(dump.contains("  - **Folder**: Jazz"));
        assert!(dump.contains("    - **Playlist**: Blue Train (`playlist#7`)"));
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut tree = Tree::new();
        let root = tree.root();
        tree.push_child(root, leaf(1));

        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["nodes"].as_array().unwrap().len(), 2);
    }
}
