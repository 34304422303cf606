// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown queue mode: {0} (expected \"singles\" or \"doubles\")")]
    UnknownMode(String),

    #[error("Invalid player name: {0}")]
    InvalidPlayerName(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
