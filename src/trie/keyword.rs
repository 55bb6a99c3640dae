use std::fmt::Debug;
use std::hash::Hash;

use super::{NodeId, Trie, ROOT};
use crate::{Error, Result};

/// A trie of keywords with a cursor that a scanner moves one symbol at a
/// time.
#[derive(Clone, Debug)]
pub struct KeywordTrie<Label> {
    trie: Trie<Label>,
    current: NodeId,
}

impl<Label> Default for KeywordTrie<Label> {
    fn default() -> Self {
        Self {
            trie: Trie::default(),
            current: ROOT,
        }
    }
}

impl<Label: Eq + Hash + Copy + Debug> KeywordTrie<Label> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a trie from a list of words, inserted in order. See
    /// [`Trie::insert`] for how the order affects accepting nodes.
    pub fn from_words<I, W>(words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: IntoIterator<Item = Label>,
    {
        let mut trie = Self::new();
        for word in words {
            trie.add_word(word);
        }

        log::debug!("Built keyword trie with {} nodes", trie.trie.len());

        trie
    }

    pub fn add_word<W>(&mut self, word: W) -> NodeId
    where
        W: IntoIterator<Item = Label>,
    {
        let word = word.into_iter().collect::<Vec<_>>();
        self.trie.insert(&word)
    }

    pub fn get(&self, key: &[Label]) -> Result<NodeId> {
        self.trie.get(key)
    }

    /// Whether the cursor has an outgoing edge on `label`.
    pub fn matches(&self, label: &Label) -> bool {
        self.trie.child(self.current, label).is_some()
    }

    /// Move the cursor along the edge labelled `label`.
    pub fn advance(&mut self, label: &Label) -> Result<()> {
        match self.trie.child(self.current, label) {
            Some(child) => {
                self.current = child;
                Ok(())
            }
            None => {
                let mut key = self.trie.key(self.current);
                key.push(*label);
                Err(Error::not_found(&key))
            }
        }
    }

    /// Like [`KeywordTrie::advance`], for callers that checked
    /// [`KeywordTrie::matches`] first. Leaves the cursor in place otherwise.
    pub(crate) fn advance_unchecked(&mut self, label: &Label) {
        if let Some(child) = self.trie.child(self.current, label) {
            self.current = child;
        }
    }

    /// Whether the cursor sits on the end of a keyword.
    pub fn accepting(&self) -> bool {
        self.trie.node(self.current).accept()
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn current_key(&self) -> Vec<Label> {
        self.trie.key(self.current)
    }

    pub fn reset(&mut self) {
        self.current = ROOT;
    }

    pub fn trie(&self) -> &Trie<Label> {
        &self.trie
    }
}
