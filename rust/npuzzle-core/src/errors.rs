use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("invalid puzzle side {size}: expected 2..={max}")]
    InvalidSize { size: usize, max: usize },
    #[error("invalid puzzle state: {reason}")]
    InvalidState { reason: String },
    #[error("start side {start} does not match goal side {goal}")]
    SizeMismatch { start: usize, goal: usize },
    #[error("no solvable permutation after {attempts} attempts")]
    GenerationFailed { attempts: u32 },
    #[error("cannot parse {what} from {value:?}")]
    Parse { what: &'static str, value: String },
    #[error("bad search options: {0}")]
    Options(String),
}

impl PuzzleError {
    pub(crate) fn invalid_state(reason: impl Into<String>) -> Self {
        PuzzleError::InvalidState { reason: reason.into() }
    }
}
