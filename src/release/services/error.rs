//! Service-level errors for the release QA workflow.

use crate::release::{domain::ReleaseDomainError, ports::AdapterError};
use thiserror::Error;

/// Errors returned by release workflow services.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// A domain rule rejected the input.
    #[error(transparent)]
    Domain(#[from] ReleaseDomainError),
    /// A remote service call failed.
    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

/// Result type for release workflow service operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;
