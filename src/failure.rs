//! Aho-Corasick failure links.
//!
//! The failure link of a node points to the node spelling the longest proper
//! suffix of its key that is also a key in the trie. Two equivalent
//! computations are provided: [`compute_failure_function`] returns a flat
//! `tag -> tag` mapping over a [`TaggedTrie`], while [`compute_suffix_links`]
//! stores the links directly on the nodes of any [`Trie`].

use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

use fnv::FnvHashMap;

use crate::trie::{NodeId, Tag, TaggedTrie, Trie, ROOT};
use crate::Result;

/// Failure links of a tagged trie, keyed by tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FailureFunction {
    root: Tag,
    links: FnvHashMap<Tag, Tag>,
}

impl FailureFunction {
    pub fn get(&self, tag: Tag) -> Option<Tag> {
        self.links.get(&tag).copied()
    }

    pub fn root(&self) -> Tag {
        self.root
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tag, Tag)> + '_ {
        self.links.iter().map(|(&from, &to)| (from, to))
    }

    /// The fallback chain starting at `tag`'s failure target and ending at
    /// the root. Empty for the root itself or an unknown tag.
    pub fn chain(&self, tag: Tag) -> FailureChain<'_> {
        FailureChain {
            function: self,
            current: if tag == self.root { None } else { Some(tag) },
        }
    }
}

pub struct FailureChain<'a> {
    function: &'a FailureFunction,
    current: Option<Tag>,
}

impl Iterator for FailureChain<'_> {
    type Item = Tag;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.function.get(self.current?)?;
        self.current = if next == self.function.root {
            None
        } else {
            Some(next)
        };

        Some(next)
    }
}

/// Compute the failure function of a tagged trie as a `tag -> tag` mapping.
///
/// Breadth-first: children of the root fall back to the root, and every
/// deeper child on symbol `c` falls back to the `c`-child of the first node
/// on its parent's fallback chain that has one, or to the root.
pub fn compute_failure_function<Label>(tagged: &TaggedTrie<Label>) -> Result<FailureFunction>
where
    Label: Eq + Hash + Copy + Debug,
{
    let trie = tagged.trie();
    let root = tagged.root_tag();
    let mut links = FnvHashMap::default();
    let mut queue = VecDeque::new();

    links.insert(root, root);
    for (_, child) in trie.children(ROOT) {
        links.insert(tagged.tag_of(child), root);
        queue.push_back(child);
    }

    while let Some(node) = queue.pop_front() {
        let node_tag = tagged.tag_of(node);

        for (label, child) in trie.children(node) {
            let mut t = links[&node_tag];

            while t != root && trie.child(tagged.get_by_tag(t)?, label).is_none() {
                log::trace!("Tag {} falls back from {} to {}", node_tag, t, links[&t]);
                t = links[&t];
            }

            let target = match trie.child(tagged.get_by_tag(t)?, label) {
                Some(branch) => tagged.tag_of(branch),
                None => root,
            };

            links.insert(tagged.tag_of(child), target);
            queue.push_back(child);
        }
    }

    log::debug!("Computed failure function over {} tags", links.len());

    Ok(FailureFunction { root, links })
}

/// Compute failure links in place, storing a suffix reference and a suffix
/// distance on every node.
///
/// The suffix distance starts at 1 for children of the root and
/// accumulates the distances of the nodes crossed while climbing fallback
/// chains. It is bookkeeping only and plays no part in where links point.
pub fn compute_suffix_links<Label>(trie: &mut Trie<Label>)
where
    Label: Eq + Hash + Copy + Debug,
{
    let mut queue = VecDeque::new();

    trie.set_suffix(ROOT, ROOT, 0);
    let children = child_ids(trie, ROOT);
    for child in children {
        trie.set_suffix(child, ROOT, 1);
        queue.push_back(child);
    }

    while let Some(node) = queue.pop_front() {
        for child in child_ids(trie, node) {
            let label = match trie.node(child).label() {
                Some(label) => *label,
                None => continue,
            };

            let mut t = suffix_of(trie, node);
            let mut dist = trie.suffix_dist(node);

            while t != ROOT && trie.child(t, &label).is_none() {
                t = suffix_of(trie, t);
                dist += trie.suffix_dist(t);
            }

            let target = trie.child(t, &label).unwrap_or(ROOT);
            trie.set_suffix(child, target, dist);
            queue.push_back(child);
        }
    }

    log::debug!("Computed suffix links over {} nodes", trie.len());
}

fn child_ids<Label>(trie: &Trie<Label>, id: NodeId) -> Vec<NodeId>
where
    Label: Eq + Hash + Copy + Debug,
{
    trie.children(id).map(|(_, child)| child).collect()
}

// Nodes are processed breadth-first, so any node reached here already has
// its link.
fn suffix_of<Label>(trie: &Trie<Label>, id: NodeId) -> NodeId
where
    Label: Eq + Hash + Copy + Debug,
{
    trie.suffix(id).unwrap_or(ROOT)
}
