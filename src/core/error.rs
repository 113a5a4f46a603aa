//! Error types shared by the ledger and its persistence adapters.
use thiserror::Error;

/// Rejected user input. Nothing is mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter an account name.")]
    EmptyName,
    #[error("Please enter a valid balance amount (got {0:?}).")]
    InvalidBalance(String),
    #[error("Balance must be zero or positive for non-credit card accounts ({0}).")]
    NegativeBalance(String),
    #[error("Balance is too large (got {0}).")]
    BalanceTooLarge(String),
}

/// Failures reported by a [`Persistence`](crate::core::persistence::Persistence) adapter.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("No saved data at {0}")]
    NotFound(String),
    #[error("Failed to read saved data: {0}")]
    Read(String),
    #[error("Failed to write saved data: {0}")]
    Write(String),
    #[error("Saved data is malformed: {0}")]
    Serde(#[from] serde_json::Error),
}

impl PersistenceError {
    pub fn read(err: impl std::fmt::Display) -> Self {
        Self::Read(err.to_string())
    }

    pub fn write(err: impl std::fmt::Display) -> Self {
        Self::Write(err.to_string())
    }
}
