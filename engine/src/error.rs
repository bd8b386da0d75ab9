use thiserror::Error;

use crate::dice::RollError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionError {
    #[error("player '{0}' is not on the score board")]
    UnknownPlayer(String),
    /// Only happens when a caller keeps asking after the board is full.
    #[error("player '{0}' has no open category left")]
    NoOpenCategory(String),
    #[error("trial must be 1, 2 or 3, got {0}")]
    InvalidTrial(i32),
    #[error("invalid roll: {0}")]
    Roll(#[from] RollError),
}

impl DecisionError {
    /// True for errors caused by the request rather than a broken game session.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, DecisionError::NoOpenCategory(_))
    }
}
