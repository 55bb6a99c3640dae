pub mod dfa;
pub mod error;
pub mod failure;
pub mod kmp;
pub mod nfa;
pub mod scanner;
pub mod trie;

pub use dfa::*;
pub use error::*;
pub use failure::*;
pub use kmp::*;
pub use nfa::*;
pub use scanner::*;
pub use trie::{KeywordTrie, Node, NodeId, Tag, TaggedTrie, Trie, ROOT};
