use thiserror::Error;

use repset_model::ModelError;

use crate::providers::ProviderError;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("image search failed: {0}")]
    Search(#[from] ProviderError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ModelError> for CatalogError {
    fn from(err: ModelError) -> Self {
        CatalogError::Validation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
