//! Arena-backed prefix trees.
//!
//! Nodes live in a single `Vec` and refer to each other through [`NodeId`]
//! indices: children are owned edges, while the parent and suffix links are
//! plain back-references. A node's key is never stored; it is rebuilt by
//! walking parent links up to the root.

use std::fmt::Debug;
use std::hash::Hash;

use fnv::FnvHashMap;

use crate::{Error, Result};

mod keyword;
mod tagged;

pub use keyword::KeywordTrie;
pub use tagged::TaggedTrie;

/// Index of a node inside its trie's arena.
pub type NodeId = usize;

/// Opaque integer address of a node in a [`TaggedTrie`].
pub type Tag = usize;

/// The root always occupies the first arena slot.
pub const ROOT: NodeId = 0;

#[derive(Clone, Debug)]
pub struct Node<Label> {
    /// Symbol on the edge from the parent. `None` for the root.
    label: Option<Label>,
    parent: Option<NodeId>,
    children: FnvHashMap<Label, NodeId>,
    accept: bool,
    tag: Option<Tag>,
    suffix: Option<NodeId>,
    suffix_dist: usize,
    depth: usize,
}

impl<Label> Node<Label> {
    fn new(label: Option<Label>, parent: Option<NodeId>, depth: usize, accept: bool) -> Self {
        Self {
            label,
            parent,
            children: FnvHashMap::default(),
            accept,
            tag: None,
            suffix: None,
            suffix_dist: 0,
            depth,
        }
    }

    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn accept(&self) -> bool {
        self.accept
    }

    pub fn tag(&self) -> Option<Tag> {
        self.tag
    }

    /// Failure link, once [`compute_suffix_links`](crate::compute_suffix_links)
    /// has run over the trie.
    pub fn suffix(&self) -> Option<NodeId> {
        self.suffix
    }

    pub fn suffix_dist(&self) -> usize {
        self.suffix_dist
    }

    /// Number of edges between the root and this node.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn children(&self) -> &FnvHashMap<Label, NodeId> {
        &self.children
    }
}

#[derive(Clone, Debug)]
pub struct Trie<Label> {
    nodes: Vec<Node<Label>>,
}

impl<Label> Default for Trie<Label> {
    fn default() -> Self {
        Self {
            nodes: vec![Node::new(None, None, 0, false)],
        }
    }
}

impl<Label: Eq + Hash + Copy + Debug> Trie<Label> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A trie holding only its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// # Panics
    ///
    /// Panics if `id` does not belong to this trie.
    pub fn node(&self, id: NodeId) -> &Node<Label> {
        &self.nodes[id]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<Label> {
        &mut self.nodes[id]
    }

    /// All node ids in creation order. The root comes first.
    pub fn ids(&self) -> std::ops::Range<NodeId> {
        0..self.nodes.len()
    }

    pub fn child(&self, id: NodeId, label: &Label) -> Option<NodeId> {
        self.nodes[id].children.get(label).copied()
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (&Label, NodeId)> {
        self.nodes[id].children.iter().map(|(label, &child)| (label, child))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn depth(&self, id: NodeId) -> usize {
        self.nodes[id].depth
    }

    pub fn suffix(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].suffix
    }

    pub fn suffix_dist(&self, id: NodeId) -> usize {
        self.nodes[id].suffix_dist
    }

    pub(crate) fn set_suffix(&mut self, id: NodeId, suffix: NodeId, dist: usize) {
        let node = &mut self.nodes[id];
        node.suffix = Some(suffix);
        node.suffix_dist = dist;
    }

    /// Rebuild the key of a node by walking its parent links.
    pub fn key(&self, id: NodeId) -> Vec<Label> {
        let mut key = Vec::with_capacity(self.nodes[id].depth);
        let mut node = &self.nodes[id];

        while let (Some(label), Some(parent)) = (node.label, node.parent) {
            key.push(label);
            node = &self.nodes[parent];
        }

        key.reverse();
        key
    }

    /// Follow `key` from the root. Fails with [`Error::NotFound`] as soon as
    /// an edge is missing.
    pub fn get(&self, key: &[Label]) -> Result<NodeId> {
        key.iter()
            .try_fold(ROOT, |id, label| self.child(id, label))
            .ok_or_else(|| Error::not_found(key))
    }

    /// Attach a new node below `parent`. An existing edge with the same label
    /// is replaced; callers check for it first.
    pub(crate) fn add_child(&mut self, parent: NodeId, label: Label, accept: bool) -> NodeId {
        let id = self.nodes.len();
        let depth = self.nodes[parent].depth + 1;

        self.nodes
            .push(Node::new(Some(label), Some(parent), depth, accept));
        self.nodes[parent].children.insert(label, id);

        id
    }

    /// Insert a pattern, reusing the longest existing prefix path.
    ///
    /// Only the last node created by this insertion is marked accepting.
    /// When the whole pattern is already present nothing changes, so a
    /// shorter word inserted after a longer one sharing its prefix does not
    /// become accepting. Returns the node reached by the pattern.
    pub fn insert(&mut self, pattern: &[Label]) -> NodeId {
        let mut node = ROOT;
        let mut labels = pattern.iter().peekable();

        while let Some(child) = labels.peek().and_then(|label| self.child(node, label)) {
            node = child;
            labels.next();
        }

        while let Some(label) = labels.next() {
            node = self.add_child(node, *label, labels.peek().is_none());
        }

        node
    }
}
