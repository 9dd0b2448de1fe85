//! Port for reading releases from the source-control host.

use super::AdapterResult;
use crate::release::domain::Release;
use async_trait::async_trait;

/// Read-only access to published releases.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Returns the most recent release.
    ///
    /// # Errors
    ///
    /// Returns [`super::AdapterError::Upstream`] on transport or
    /// authentication failure.
    async fn latest_release(&self) -> AdapterResult<Release>;

    /// Returns the release with exactly this tag.
    ///
    /// # Errors
    ///
    /// Returns [`super::AdapterError::NotFound`] when no release carries
    /// the tag.
    async fn release_by_tag(&self, tag: &str) -> AdapterResult<Release>;
}
