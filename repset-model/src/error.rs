use thiserror::Error;

/// Errors produced by model constructors and validation routines.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid title: {0}")]
    InvalidTitle(String),

    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
