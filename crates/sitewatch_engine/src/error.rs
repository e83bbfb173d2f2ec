use sitewatch_core::{SiteId, ValidationError};
use thiserror::Error;

use crate::persist::PersistError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("site {0} not found")]
    NotFound(SiteId),
    #[error("site store lock poisoned")]
    Poisoned,
    #[error("site store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("site store persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("site store write task failed: {0}")]
    WriteTask(#[from] tokio::task::JoinError),
}

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("site {0} not found")]
    NotFound(SiteId),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for MonitorError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => MonitorError::NotFound(id),
            other => MonitorError::Store(other),
        }
    }
}
