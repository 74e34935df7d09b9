use thiserror::Error;

/// Rejection of a user-supplied age before it reaches the recommendation engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AgeInputError {
    #[error("please enter an age")]
    Empty,
    #[error("please enter a valid age number (got '{0}')")]
    NotANumber(String),
    #[error("age cannot be negative")]
    Negative,
    #[error("unknown age unit '{0}' (expected hours, days, weeks, months or years)")]
    UnknownUnit(String),
}

pub type Result<T> = std::result::Result<T, AgeInputError>;
