use std::fmt::Debug;
use std::hash::Hash;

use fnv::FnvHashMap;

use super::{NodeId, Tag, Trie, ROOT};
use crate::failure::compute_suffix_links;
use crate::{Error, Result};

/// A trie whose nodes are also addressed by caller-supplied integer tags.
///
/// Tags give failure links a flat representation (`tag -> tag`) that does
/// not require following parent chains. The root is conventionally tag 0.
#[derive(Clone, Debug)]
pub struct TaggedTrie<Label> {
    trie: Trie<Label>,
    tags: FnvHashMap<Tag, NodeId>,
}

impl<Label> TaggedTrie<Label> {
    fn with_root_tag(root_tag: Tag) -> Self {
        let mut trie = Trie::default();
        trie.nodes[ROOT].tag = Some(root_tag);

        let mut tags = FnvHashMap::default();
        tags.insert(root_tag, ROOT);

        Self { trie, tags }
    }
}

impl<Label> Default for TaggedTrie<Label> {
    fn default() -> Self {
        Self::with_root_tag(0)
    }
}

impl<Label: Eq + Hash + Copy + Debug> TaggedTrie<Label> {
    /// Create a trie whose root carries `root_tag`.
    pub fn new(root_tag: Tag) -> Self {
        Self::with_root_tag(root_tag)
    }

    /// Build a tagged trie from patterns. Tags are handed out in creation
    /// order starting from 1, the root keeps tag 0, and the node ending each
    /// newly inserted pattern is accepting.
    pub fn from_patterns<I, P>(patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[Label]>,
    {
        let mut tagged = Self::default();

        for pattern in patterns {
            let len = tagged.trie.len();
            tagged.trie.insert(pattern.as_ref());

            for id in len..tagged.trie.len() {
                tagged.trie.node_mut(id).tag = Some(id);
                tagged.tags.insert(id, id);
            }
        }

        log::debug!("Built tagged trie with {} nodes", tagged.trie.len());

        tagged
    }

    /// Create the node for `key` and address it by `tag`. Every proper
    /// prefix of `key` must already exist.
    pub fn create_node(&mut self, key: &[Label], tag: Tag, accept: bool) -> Result<NodeId> {
        let (label, prefix) = match key.split_last() {
            Some(split) => split,
            None => return Err(Error::DuplicateKey { key: "[]".into() }),
        };

        if self.tags.contains_key(&tag) {
            return Err(Error::DuplicateTag(tag));
        }

        let parent = self.trie.get(prefix)?;
        if self.trie.child(parent, label).is_some() {
            return Err(Error::DuplicateKey {
                key: format!("{:?}", key),
            });
        }

        let id = self.trie.add_child(parent, *label, accept);
        self.trie.node_mut(id).tag = Some(tag);
        self.tags.insert(tag, id);

        Ok(id)
    }

    pub fn get(&self, key: &[Label]) -> Result<NodeId> {
        self.trie.get(key)
    }

    pub fn get_by_tag(&self, tag: Tag) -> Result<NodeId> {
        self.tags.get(&tag).copied().ok_or(Error::UnknownTag(tag))
    }

    /// Nodes only enter a tagged trie through [`TaggedTrie::create_node`] or
    /// [`TaggedTrie::from_patterns`], both of which tag them.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this trie.
    pub fn tag_of(&self, id: NodeId) -> Tag {
        self.trie
            .node(id)
            .tag()
            .expect("every node of a tagged trie carries a tag")
    }

    pub fn root_tag(&self) -> Tag {
        self.tag_of(ROOT)
    }

    pub fn len(&self) -> usize {
        self.trie.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    pub fn trie(&self) -> &Trie<Label> {
        &self.trie
    }

    /// Store suffix links on the nodes, see
    /// [`compute_suffix_links`](crate::compute_suffix_links).
    pub fn link_suffixes(&mut self) {
        compute_suffix_links(&mut self.trie);
    }
}
