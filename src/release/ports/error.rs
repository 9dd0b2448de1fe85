//! Error type shared by all remote service ports.

use std::fmt;
use thiserror::Error;

/// Result type for remote service port operations.
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Remote service a port talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceName {
    /// Source-control release host.
    ReleaseSource,
    /// Issue tracker.
    IssueTracker,
    /// Test case manager.
    TestManagement,
    /// Documentation wiki.
    Documentation,
}

impl ServiceName {
    /// Returns the product name of the service.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReleaseSource => "GitHub",
            Self::IssueTracker => "Jira",
            Self::TestManagement => "TestRail",
            Self::Documentation => "Confluence",
        }
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by remote service adapters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdapterError {
    /// The remote call failed: transport, authentication or validation by
    /// the remote service.
    #[error("{service} request failed: {message}")]
    Upstream {
        /// Service that failed.
        service: ServiceName,
        /// Root-cause message.
        message: String,
    },

    /// An expected remote entity is absent.
    #[error("{0} not found")]
    NotFound(String),
}

impl AdapterError {
    /// Builds an upstream failure for `service`.
    pub fn upstream(service: ServiceName, message: impl Into<String>) -> Self {
        Self::Upstream {
            service,
            message: message.into(),
        }
    }

    /// Builds a not-found failure describing the missing entity.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}
