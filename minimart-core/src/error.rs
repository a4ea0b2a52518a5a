//! Domain error types

use minimart_store::StoreError;
use thiserror::Error;

/// Errors surfaced by the domain managers and flows.
///
/// Business failures (`NotFound`, `Conflict`, `Unauthorized`,
/// `InvalidInput`) always leave stored state unchanged. `Storage`
/// wraps any underlying store failure without distinguishing cause.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("service not initialized, call init() first")]
    Uninitialized,

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    Conflict(String),

    #[error("credentials do not match")]
    Unauthorized,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Message suitable for direct display.
    ///
    /// Business failures keep their descriptive text; storage failures
    /// degrade to a generic retry message without exposing the cause.
    pub fn user_message(&self) -> String {
        match self {
            Self::Storage(_) | Self::Uninitialized => {
                "operation failed, please retry".to_string()
            }
            other => other.to_string(),
        }
    }
}
