//! Knuth-Morris-Pratt automata.
//!
//! A pattern `P` of length `n` yields states `0..=n`, state `k` meaning "the
//! longest suffix of the input read so far that is a prefix of `P` has
//! length `k`". State `n` accepts. The fallback edges come from the failure
//! function of the trie of `P`'s prefixes, tagged by prefix length.
//!
//! The resulting transition table is partial. From a state `s < n` it only
//! covers `P[s]` and the symbols `P[t]` for `t` on the failure chain of `s`,
//! and state `n` has no outgoing edges. [`Dfsm::validate`] reports such an
//! automaton as incomplete, and feeding an uncovered symbol fails with
//! [`Error::NoTransition`](crate::Error::NoTransition). A missing edge out of
//! a state below `n` always stands for a fall back to state 0.

use std::fmt::Debug;
use std::hash::Hash;

use crate::dfa::Dfsm;
use crate::failure::compute_failure_function;
use crate::trie::TaggedTrie;
use crate::Result;

pub struct KmpBuilder<A> {
    pattern: Vec<A>,
    alphabet: Vec<A>,
}

impl<A> KmpBuilder<A>
where
    A: Eq + Hash + Copy + Debug,
{
    pub fn new<P>(pattern: P) -> Self
    where
        P: IntoIterator<Item = A>,
    {
        Self {
            pattern: pattern.into_iter().collect(),
            alphabet: Vec::new(),
        }
    }

    /// Declare extra symbols on top of those appearing in the pattern. They
    /// get no transitions.
    pub fn alphabet<I>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = A>,
    {
        self.alphabet.extend(symbols);
        self
    }

    pub fn build(self) -> Result<Dfsm<usize, A>> {
        let pattern = self.pattern;
        let n = pattern.len();

        let mut trie = TaggedTrie::new(0);
        for s in 1..=n {
            trie.create_node(&pattern[..s], s, s == n)?;
        }
        let failure = compute_failure_function(&trie)?;

        let mut dfsm = Dfsm::with_states(
            0..=n,
            pattern.iter().copied().chain(self.alphabet),
            0,
            [n],
        );

        for s in 0..n {
            dfsm.add_transition(s, pattern[s], s + 1)?;

            for t in failure.chain(s) {
                if dfsm.transition(&s, &pattern[t]).is_none() {
                    dfsm.add_transition(s, pattern[t], t + 1)?;
                }
            }
        }

        log::debug!(
            "Built KMP automaton with {} states over {} symbols",
            dfsm.states().len(),
            dfsm.symbols().len()
        );

        Ok(dfsm)
    }
}

/// Build the automaton recognizing every input that ends with `pattern`.
pub fn make_kmp_dfsm<A>(pattern: &[A]) -> Result<Dfsm<usize, A>>
where
    A: Eq + Hash + Copy + Debug,
{
    KmpBuilder::new(pattern.iter().copied()).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    /// Length of the longest suffix of `text` that is a prefix of `pattern`.
    fn overlap(text: &[char], pattern: &[char]) -> usize {
        (0..=std::cmp::min(text.len(), pattern.len()))
            .rev()
            .find(|&k| text.ends_with(&pattern[..k]))
            .unwrap_or(0)
    }

    /// Every string over `alphabet` of length at most `max_len`.
    fn strings(alphabet: &[char], max_len: usize) -> Vec<Vec<char>> {
        let mut all = vec![vec![]];
        let mut frontier = vec![vec![]];

        for _ in 0..max_len {
            frontier = frontier
                .iter()
                .flat_map(|s: &Vec<char>| {
                    alphabet.iter().map(move |&c| {
                        let mut next = s.clone();
                        next.push(c);
                        next
                    })
                })
                .collect();
            all.extend(frontier.iter().cloned());
        }

        all
    }

    /// Feed `text` one symbol at a time and check the automaton against the
    /// reference overlap. A missing transition must correspond to a fall
    /// back to state 0, or happen from the accepting state.
    fn check_against_reference(pattern: &str, text: &[char]) {
        let pattern = chars(pattern);
        let mut dfsm = make_kmp_dfsm(&pattern).unwrap();

        for (i, &c) in text.iter().enumerate() {
            let before = *dfsm.state();

            match dfsm.feed([c]) {
                Ok(()) => {
                    let expected = overlap(&text[..=i], &pattern);
                    assert_eq!(*dfsm.state(), expected, "{:?} on {:?}", pattern, text);
                    assert_eq!(dfsm.is_accepting(), text[..=i].ends_with(&pattern));
                }
                Err(Error::NoTransition { .. }) => {
                    assert_eq!(*dfsm.state(), before);
                    assert!(
                        before == pattern.len() || overlap(&text[..=i], &pattern) == 0,
                        "{:?} on {:?}: missing edge from {} on {:?}",
                        pattern,
                        text,
                        before,
                        c
                    );
                    return;
                }
                Err(err) => panic!("unexpected error: {}", err),
            }
        }
    }

    #[test]
    fn test_full_match() {
        for pattern in ["ab", "aaab", "abab", "aabaa"] {
            let mut dfsm = make_kmp_dfsm(&chars(pattern)).unwrap();
            dfsm.feed(pattern.chars()).unwrap();
            assert!(dfsm.is_accepting(), "{}", pattern);
            assert_eq!(*dfsm.state(), pattern.len());
        }
    }

    #[test]
    fn test_overlapping_repeats() {
        // `None` marks inputs that run into a missing transition.
        let cases = [
            ("aaab", "aaaab", Some(true)),
            ("aaab", "aaaaaaab", Some(true)),
            ("aaab", "aaaa", Some(false)),
            ("abab", "abaabab", Some(true)),
            ("abab", "aba", Some(false)),
            ("abab", "abababab", None),
            ("aabaa", "aaabaa", Some(true)),
            ("aabaa", "aabab", None),
            ("aabaa", "aabaabaa", None),
        ];

        for (pattern, text, expected) in cases.iter() {
            let mut dfsm = make_kmp_dfsm(&chars(pattern)).unwrap();
            let fed = dfsm.feed(text.chars());

            match expected {
                Some(accepts) => {
                    assert!(fed.is_ok(), "{} on {}: {:?}", pattern, text, fed);
                    assert_eq!(dfsm.is_accepting(), *accepts, "{} on {}", pattern, text);
                }
                None => assert!(
                    matches!(fed, Err(Error::NoTransition { .. })),
                    "{} on {}",
                    pattern,
                    text
                ),
            }
        }
    }

    #[test]
    fn test_failure_chain_edges() {
        let dfsm = make_kmp_dfsm(&chars("aabaa")).unwrap();

        // Neither the success edge nor the chain 4 -> 1 -> 0 offers 'b'.
        assert_eq!(dfsm.transition(&4, &'a'), Some(&5));
        assert_eq!(dfsm.transition(&4, &'b'), None);
        // From "aa" + 'a': falls back to "aa".
        assert_eq!(dfsm.transition(&2, &'a'), Some(&2));
        // "aab": success on 'a', nothing on 'b'.
        assert_eq!(dfsm.transition(&3, &'a'), Some(&4));
        assert_eq!(dfsm.transition(&3, &'b'), None);
        // The accepting state has no outgoing edges.
        assert_eq!(dfsm.transition(&5, &'a'), None);
    }

    #[test]
    fn test_sound_on_all_short_strings() {
        for pattern in ["a", "ab", "aaab", "abab", "aabaa", "abcab"] {
            let mut alphabet = chars(pattern);
            alphabet.sort_unstable();
            alphabet.dedup();

            for text in strings(&alphabet, 7) {
                check_against_reference(pattern, &text);
            }
        }
    }

    #[test]
    fn test_pattern_absent_never_accepts() {
        let pattern = chars("abab");
        for text in strings(&['a', 'b'], 8) {
            let contains = text.windows(pattern.len()).any(|w| w == pattern.as_slice());
            if contains {
                continue;
            }

            let mut dfsm = make_kmp_dfsm(&pattern).unwrap();
            for c in text {
                if dfsm.feed([c]).is_err() {
                    dfsm.reset();
                }
                assert!(!dfsm.is_accepting());
            }
        }
    }

    #[test]
    fn test_partial_table_is_incomplete() {
        let dfsm = make_kmp_dfsm(&chars("abab")).unwrap();
        assert!(matches!(dfsm.validate(), Err(Error::Incomplete { .. })));

        let dfsm = KmpBuilder::new("ab".chars()).alphabet(['c']).build().unwrap();
        assert_eq!(dfsm.symbols(), &['a', 'b', 'c']);
        assert!(matches!(dfsm.validate(), Err(Error::Incomplete { .. })));

        let mut dfsm = dfsm;
        assert_eq!(
            dfsm.feed("ac".chars()),
            Err(Error::NoTransition {
                state: "1".into(),
                symbol: "'c'".into(),
            })
        );
        assert_eq!(*dfsm.state(), 1);
    }

    #[test]
    fn test_empty_pattern() {
        let dfsm = make_kmp_dfsm::<char>(&[]).unwrap();

        assert_eq!(dfsm.states(), &[0]);
        assert!(dfsm.is_accepting());
        assert!(dfsm.validate().is_ok());
    }
}
