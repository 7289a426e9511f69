//! Service error type

use thiserror::Error;

use core_kernel::{CoreError, PortError};
use domain_lending::LendingError;

/// Errors returned by the lending use cases
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Lending(#[from] LendingError),

    #[error("Storage error: {0}")]
    Port(#[from] PortError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ServiceError {
    /// Returns true for an unknown loan or installment
    pub fn is_not_found(&self) -> bool {
        match self {
            ServiceError::Port(err) => err.is_not_found(),
            ServiceError::Lending(LendingError::InstallmentNotFound { .. }) => true,
            _ => false,
        }
    }
}
