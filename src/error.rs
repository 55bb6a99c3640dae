use thiserror::Error;

/// Errors raised while building tries and automata or running them.
///
/// States, symbols and keys are rendered with their `Debug` representation
/// so that the error stays independent of the alphabet in use.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("automaton is incomplete: state {state} has no transition on {symbol}")]
    Incomplete { state: String, symbol: String },
    #[error("there is no transition for symbol {symbol} from state {state}")]
    NoTransition { state: String, symbol: String },
    #[error("no node found for key {key}")]
    NotFound { key: String },
    #[error("unknown state {0}")]
    UnknownState(String),
    #[error("unknown symbol {0}")]
    UnknownSymbol(String),
    #[error("unknown tag {0}")]
    UnknownTag(usize),
    #[error("tag {0} is already assigned to another node")]
    DuplicateTag(usize),
    #[error("a node already exists for key {key}")]
    DuplicateKey { key: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn not_found<L: std::fmt::Debug>(key: &[L]) -> Self {
        Error::NotFound {
            key: format!("{:?}", key),
        }
    }

    pub(crate) fn no_transition<S, A>(state: &S, symbol: &A) -> Self
    where
        S: std::fmt::Debug,
        A: std::fmt::Debug,
    {
        Error::NoTransition {
            state: format!("{:?}", state),
            symbol: format!("{:?}", symbol),
        }
    }
}
