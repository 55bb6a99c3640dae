use std::fmt::{self, Debug};
use std::hash::Hash;

use derive_builder::Builder;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use thiserror::Error;

use crate::trie::KeywordTrie;

#[non_exhaustive]
#[derive(Builder, Clone, Debug)]
pub struct ScannerConfig {
    /// Number of symbols of unmatched input reported by
    /// [`ScanError::NoMatch`].
    #[builder(default = "10")]
    pub preview_len: usize,
}

impl ScannerConfig {
    pub fn builder() -> ScannerConfigBuilder {
        ScannerConfigBuilder::default()
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self { preview_len: 10 }
    }
}

/// A keyword found in the input, spanning `start..end`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match<Label> {
    pub start: usize,
    pub end: usize,
    pub keyword: Vec<Label>,
}

impl fmt::Display for Match<char> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.keyword.iter().try_for_each(|c| write!(f, "{}", c))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ScanError<Label> {
    /// All of the input has been consumed. Not a failure: it ends a scan
    /// loop.
    #[error("end of input")]
    EndOfInput,
    #[error("could not find a keyword in input at position {position}, starting with: {preview:?}...")]
    NoMatch { position: usize, preview: Vec<Label> },
}

impl<Label> ScanError<Label> {
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, ScanError::EndOfInput)
    }
}

/// Maximal-munch keyword scanner.
///
/// Each call to [`KeywordScanner::scan`] walks the keyword trie from its
/// root, starting at the committed position, and returns the longest keyword
/// found there.
///
/// After a [`ScanError::NoMatch`] the committed position is left unchanged,
/// so calling `scan` again returns the same error forever. Callers decide how
/// to recover, for instance by calling [`KeywordScanner::skip`] first.
#[derive(Clone, Debug)]
pub struct KeywordScanner<Label> {
    trie: KeywordTrie<Label>,
    input: Vec<Label>,
    pos: usize,
    config: ScannerConfig,
}

impl<Label: Eq + Hash + Copy + Debug> KeywordScanner<Label> {
    pub fn new<I, W, T>(dictionary: I, input: T) -> Self
    where
        I: IntoIterator<Item = W>,
        W: IntoIterator<Item = Label>,
        T: IntoIterator<Item = Label>,
    {
        Self::with_trie(KeywordTrie::from_words(dictionary), input)
    }

    pub fn with_trie<T>(trie: KeywordTrie<Label>, input: T) -> Self
    where
        T: IntoIterator<Item = Label>,
    {
        Self {
            trie,
            input: input.into_iter().collect(),
            pos: 0,
            config: ScannerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ScannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Scan the next keyword.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::EndOfInput`] when no keyword was found and the
    /// walk ran off the end of the input, and [`ScanError::NoMatch`] when it
    /// stopped on a symbol with no matching edge before reaching any keyword.
    pub fn scan(&mut self) -> Result<Match<Label>, ScanError<Label>> {
        self.trie.reset();

        let mut forward = self.pos;
        let mut longest = None;

        while let Some(label) = self.input.get(forward) {
            if !self.trie.matches(label) {
                break;
            }

            self.trie.advance_unchecked(label);
            forward += 1;

            if self.trie.accepting() {
                log::trace!("Keyword candidate at {}..{}", self.pos, forward);
                longest = Some(forward);
            }
        }

        match longest {
            Some(end) => {
                let start = self.pos;
                self.pos = end;

                Ok(Match {
                    start,
                    end,
                    keyword: self.input[start..end].to_vec(),
                })
            }
            None if forward == self.input.len() => Err(ScanError::EndOfInput),
            None => {
                let end = std::cmp::min(
                    self.pos.saturating_add(self.config.preview_len),
                    self.input.len(),
                );

                Err(ScanError::NoMatch {
                    position: self.pos,
                    preview: self.input[self.pos..end].to_vec(),
                })
            }
        }
    }

    /// Scan until the end of the input.
    ///
    /// # Errors
    ///
    /// Propagates the first [`ScanError::NoMatch`].
    pub fn scan_all(&mut self) -> Result<Vec<Match<Label>>, ScanError<Label>> {
        let mut matches = Vec::new();

        loop {
            match self.scan() {
                Ok(m) => matches.push(m),
                Err(ScanError::EndOfInput) => return Ok(matches),
                Err(err) => return Err(err),
            }
        }
    }

    /// Committed position: the index where the next scan starts.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move the committed position forward by `n` symbols, clamped to the
    /// end of the input.
    pub fn skip(&mut self, n: usize) {
        self.pos = std::cmp::min(self.pos.saturating_add(n), self.input.len());
    }

    pub fn is_finished(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub fn input(&self) -> &[Label] {
        &self.input
    }
}

impl KeywordScanner<char> {
    /// Scanner over the characters of `input`.
    pub fn from_text<I>(dictionary: I, input: &str) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let trie = KeywordTrie::from_words(
            dictionary
                .into_iter()
                .map(|word| word.as_ref().chars().collect::<Vec<_>>()),
        );

        Self::with_trie(trie, input.chars())
    }
}

/// Scan several independent texts with the same dictionary in parallel.
/// The trie is built once and each text gets its own copy of it.
pub fn scan_batch<I, S>(dictionary: &[&str], inputs: I) -> Vec<Result<Vec<String>, ScanError<char>>>
where
    I: IntoParallelIterator<Item = S>,
    S: AsRef<str>,
{
    let trie = KeywordTrie::from_words(dictionary.iter().map(|word| word.chars()));

    inputs
        .into_par_iter()
        .map(|input| {
            KeywordScanner::with_trie(trie.clone(), input.as_ref().chars())
                .scan_all()
                .map(|matches| matches.iter().map(|m| m.to_string()).collect())
        })
        .collect()
}
