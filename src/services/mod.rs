use validator::ValidationErrors;

use crate::store::StoreError;

pub mod articles;

#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error("Article validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("Article {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Storage(StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(id) => ServiceError::NotFound(id),
            other => ServiceError::Storage(other),
        }
    }
}
