//! Error types for release domain rules.

use thiserror::Error;

/// Errors returned by pure release domain operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReleaseDomainError {
    /// The release tag is empty after trimming.
    #[error("release tag must not be empty")]
    EmptyTag,

    /// A plan entry must reference at least one test case.
    #[error("plan entry for plan {0} must contain at least one test case")]
    EmptyPlanEntry(u64),

    /// The report page template failed to render.
    #[error("failed to render report page for release {version}: {reason}")]
    TemplateRender {
        /// Release version being rendered.
        version: String,
        /// Renderer failure message.
        reason: String,
    },
}
