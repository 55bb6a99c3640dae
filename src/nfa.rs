use std::hash::Hash;

use fnv::FnvHashSet;

/// Set of states a non-deterministic machine occupies at once.
pub type StateSet<S> = FnvHashSet<S>;

/// Capabilities a non-deterministic finite state machine must supply.
///
/// No construction is provided here. Implementors decide how closures and
/// moves are computed, whether from explicit tables or on the fly;
/// [`NfsmRunner`] drives any implementation over an input.
pub trait Nfsm {
    type State: Eq + Hash + Clone;
    type Symbol;

    fn start(&self) -> Self::State;

    fn is_accepting_state(&self, state: &Self::State) -> bool;

    /// States reachable from `states` by following empty-symbol edges only,
    /// `states` included.
    fn closure(&self, states: &StateSet<Self::State>) -> StateSet<Self::State>;

    /// States reachable from `states` by one edge labelled `symbol`.
    fn move_on(&self, states: &StateSet<Self::State>, symbol: &Self::Symbol)
        -> StateSet<Self::State>;
}

/// Runs an [`Nfsm`], tracking the current set of states.
pub struct NfsmRunner<M: Nfsm> {
    machine: M,
    current: StateSet<M::State>,
}

impl<M: Nfsm> NfsmRunner<M> {
    pub fn new(machine: M) -> Self {
        let current = initial(&machine);
        Self { machine, current }
    }

    pub fn feed<I>(&mut self, input: I)
    where
        I: IntoIterator<Item = M::Symbol>,
    {
        for symbol in input {
            let moved = self.machine.move_on(&self.current, &symbol);
            self.current = self.machine.closure(&moved);
        }
    }

    pub fn reset(&mut self) {
        self.current = initial(&self.machine);
    }

    pub fn is_accepting(&self) -> bool {
        self.current
            .iter()
            .any(|state| self.machine.is_accepting_state(state))
    }

    /// Current set of states. Empty once the input has left the machine.
    pub fn states(&self) -> &StateSet<M::State> {
        &self.current
    }

    pub fn machine(&self) -> &M {
        &self.machine
    }
}

fn initial<M: Nfsm>(machine: &M) -> StateSet<M::State> {
    let mut start = StateSet::default();
    start.insert(machine.start());
    machine.closure(&start)
}

#[cfg(test)]
mod tests {
    use fnv::FnvHashMap;

    use super::*;

    /// Table-driven machine for exercising the runner:
    ///
    /// ```text
    ///        a        b       c       epsilon
    /// (0)    {0,1}    {0}     {2}     {1}
    ///  1     {0}      {1}     {1,2}   {}
    /// [2]    {}       {}      {}      {}
    /// ```
    struct TableNfsm {
        edges: FnvHashMap<(u32, Option<char>), Vec<u32>>,
    }

    impl TableNfsm {
        fn new() -> Self {
            let edges = [
                ((0, Some('a')), vec![0, 1]),
                ((0, Some('b')), vec![0]),
                ((0, Some('c')), vec![2]),
                ((0, None), vec![1]),
                ((1, Some('a')), vec![0]),
                ((1, Some('b')), vec![1]),
                ((1, Some('c')), vec![1, 2]),
            ];

            Self {
                edges: edges.into_iter().collect(),
            }
        }

        fn step(&self, states: &StateSet<u32>, symbol: Option<char>) -> StateSet<u32> {
            states
                .iter()
                .flat_map(|&state| self.edges.get(&(state, symbol)).into_iter().flatten())
                .copied()
                .collect()
        }
    }

    impl Nfsm for TableNfsm {
        type State = u32;
        type Symbol = char;

        fn start(&self) -> u32 {
            0
        }

        fn is_accepting_state(&self, state: &u32) -> bool {
            *state == 2
        }

        fn closure(&self, states: &StateSet<u32>) -> StateSet<u32> {
            let mut closure = states.clone();
            let mut stack = states.iter().copied().collect::<Vec<_>>();

            while let Some(state) = stack.pop() {
                for next in self.step(&set(&[state]), None) {
                    if closure.insert(next) {
                        stack.push(next);
                    }
                }
            }

            closure
        }

        fn move_on(&self, states: &StateSet<u32>, symbol: &char) -> StateSet<u32> {
            self.step(states, Some(*symbol))
        }
    }

    fn set(states: &[u32]) -> StateSet<u32> {
        states.iter().copied().collect()
    }

    #[test]
    fn test_runner_starts_in_closure() {
        let runner = NfsmRunner::new(TableNfsm::new());

        assert_eq!(*runner.states(), set(&[0, 1]));
        assert!(!runner.is_accepting());
    }

    #[test]
    fn test_runner_feed_and_reset() {
        let mut runner = NfsmRunner::new(TableNfsm::new());

        runner.feed("abc".chars());
        assert!(runner.is_accepting());
        assert_eq!(*runner.states(), set(&[1, 2]));

        runner.feed("a".chars());
        assert_eq!(*runner.states(), set(&[0, 1]));
        assert!(!runner.is_accepting());

        runner.reset();
        assert_eq!(*runner.states(), set(&[0, 1]));
    }
}
