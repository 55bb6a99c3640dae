use std::fmt::Debug;
use std::hash::Hash;

use fnv::{FnvHashMap, FnvHashSet};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Deterministic finite state machine.
///
/// The transition table may be partial while the machine is being built.
/// [`Dfsm::validate`] checks that every declared state has a transition for
/// every declared symbol; an incomplete machine can still be fed, but will
/// stop with [`Error::NoTransition`] on a missing entry.
#[derive(Clone, Debug)]
pub struct Dfsm<S, A> {
    states: Vec<S>,
    symbols: Vec<A>,
    transitions: FnvHashMap<S, FnvHashMap<A, S>>,
    start: S,
    accepting: FnvHashSet<S>,
    state: S,
}

impl<S, A> Dfsm<S, A>
where
    S: Eq + Hash + Clone + Debug,
    A: Eq + Hash + Clone + Debug,
{
    fn empty(start: S) -> Self {
        Self {
            states: Vec::new(),
            symbols: Vec::new(),
            transitions: FnvHashMap::default(),
            start: start.clone(),
            accepting: FnvHashSet::default(),
            state: start,
        }
    }

    /// A machine with a single state, `start`, and an empty alphabet.
    pub fn new(start: S) -> Self {
        Self::with_states([], [], start, [])
    }

    /// States are declared in the order given. The start state is declared
    /// after them if it is not among them.
    pub fn with_states<I, J, K>(states: I, symbols: J, start: S, accepting: K) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = A>,
        K: IntoIterator<Item = S>,
    {
        let mut dfsm = Self::empty(start.clone());
        for state in states {
            dfsm.add_state(state);
        }
        dfsm.add_state(start);
        for symbol in symbols {
            dfsm.add_symbol(symbol);
        }
        for state in accepting {
            dfsm.add_accepting(state);
        }

        dfsm
    }

    /// Declare a state. Declaring a known state again has no effect.
    pub fn add_state(&mut self, state: S) {
        if !self.transitions.contains_key(&state) {
            self.transitions.insert(state.clone(), FnvHashMap::default());
            self.states.push(state);
        }
    }

    /// Declare a symbol. Declaring a known symbol again has no effect.
    pub fn add_symbol(&mut self, symbol: A) {
        if !self.symbols.contains(&symbol) {
            self.symbols.push(symbol);
        }
    }

    /// Mark a state as accepting, declaring it if needed.
    pub fn add_accepting(&mut self, state: S) {
        self.add_state(state.clone());
        self.accepting.insert(state);
    }

    /// Set the destination of `(origin, symbol)`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Both states and the symbol must have been declared.
    pub fn add_transition(&mut self, origin: S, symbol: A, destination: S) -> Result<()> {
        if !self.transitions.contains_key(&destination) {
            return Err(Error::UnknownState(format!("{:?}", destination)));
        }
        if !self.symbols.contains(&symbol) {
            return Err(Error::UnknownSymbol(format!("{:?}", symbol)));
        }

        log::trace!("Transition {:?} --{:?}--> {:?}", origin, symbol, destination);

        self.transitions
            .get_mut(&origin)
            .ok_or_else(|| Error::UnknownState(format!("{:?}", origin)))?
            .insert(symbol, destination);

        Ok(())
    }

    pub fn add_transitions<I>(&mut self, origin: S, transitions: I) -> Result<()>
    where
        I: IntoIterator<Item = (A, S)>,
    {
        transitions
            .into_iter()
            .try_for_each(|(symbol, destination)| {
                self.add_transition(origin.clone(), symbol, destination)
            })
    }

    pub fn transition(&self, origin: &S, symbol: &A) -> Option<&S> {
        self.transitions.get(origin)?.get(symbol)
    }

    /// Check that the transition function is total over the declared states
    /// and symbols.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Incomplete`] naming the first missing pair, in
    /// declaration order.
    pub fn validate(&self) -> Result<()> {
        for state in self.states.iter() {
            for symbol in self.symbols.iter() {
                if self.transition(state, symbol).is_none() {
                    return Err(Error::Incomplete {
                        state: format!("{:?}", state),
                        symbol: format!("{:?}", symbol),
                    });
                }
            }
        }

        Ok(())
    }

    /// Run the machine over `input`.
    ///
    /// Not transactional: on [`Error::NoTransition`] the machine stays in the
    /// last state it reached.
    pub fn feed<I>(&mut self, input: I) -> Result<()>
    where
        I: IntoIterator<Item = A>,
    {
        for symbol in input {
            let next = self
                .transition(&self.state, &symbol)
                .cloned()
                .ok_or_else(|| Error::no_transition(&self.state, &symbol))?;

            self.state = next;
        }

        Ok(())
    }

    pub fn reset(&mut self) {
        self.state = self.start.clone();
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting.contains(&self.state)
    }

    /// Current state.
    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn start(&self) -> &S {
        &self.start
    }

    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn symbols(&self) -> &[A] {
        &self.symbols
    }

    pub fn accepting(&self) -> &FnvHashSet<S> {
        &self.accepting
    }

    /// Describe the machine as a table. Transitions are listed by state and
    /// symbol declaration order.
    pub fn to_table(&self) -> DfsmTable<S, A> {
        let transitions = self
            .states
            .iter()
            .flat_map(|state| {
                self.symbols.iter().filter_map(move |symbol| {
                    self.transition(state, symbol)
                        .map(|dest| (state.clone(), symbol.clone(), dest.clone()))
                })
            })
            .collect();

        DfsmTable {
            states: self.states.clone(),
            symbols: self.symbols.clone(),
            start: self.start.clone(),
            accepting: self
                .states
                .iter()
                .filter(|state| self.accepting.contains(*state))
                .cloned()
                .collect(),
            transitions,
        }
    }
}

/// Explicit description of a deterministic machine, one
/// `(origin, symbol, destination)` triple per table cell.
///
/// This is what a reader of a textual transition table produces; converting
/// it with [`Dfsm::try_from`] declares everything and adds each transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfsmTable<S, A> {
    pub states: Vec<S>,
    pub symbols: Vec<A>,
    pub start: S,
    #[serde(default)]
    pub accepting: Vec<S>,
    #[serde(default)]
    pub transitions: Vec<(S, A, S)>,
}

impl<S, A> TryFrom<DfsmTable<S, A>> for Dfsm<S, A>
where
    S: Eq + Hash + Clone + Debug,
    A: Eq + Hash + Clone + Debug,
{
    type Error = Error;

    fn try_from(table: DfsmTable<S, A>) -> Result<Self> {
        let mut dfsm = Dfsm::with_states(table.states, table.symbols, table.start, table.accepting);

        for (origin, symbol, destination) in table.transitions {
            dfsm.add_transition(origin, symbol, destination)?;
        }

        Ok(dfsm)
    }
}
