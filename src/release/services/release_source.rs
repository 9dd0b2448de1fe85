//! Release lookup and freshness policy.

use super::WorkflowResult;
use crate::release::{
    domain::{Release, ReleaseDomainError, is_new},
    ports::ReleaseSource,
};
use mockable::Clock;
use std::sync::Arc;

/// Release source adapter used by the orchestrator.
pub struct ReleaseSourceService<S, C>
where
    S: ReleaseSource,
    C: Clock + Send + Sync,
{
    source: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> ReleaseSourceService<S, C>
where
    S: ReleaseSource,
    C: Clock + Send + Sync,
{
    /// Creates a release source adapter.
    #[must_use]
    pub const fn new(source: Arc<S>, clock: Arc<C>) -> Self {
        Self { source, clock }
    }

    /// Returns the most recent release.
    ///
    /// # Errors
    ///
    /// Returns upstream errors from the release host.
    pub async fn latest(&self) -> WorkflowResult<Release> {
        Ok(self.source.latest_release().await?)
    }

    /// Returns the release with exactly this tag.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseDomainError::EmptyTag`] for a blank tag, a
    /// not-found error when the host has no such tag, or upstream errors.
    pub async fn by_tag(&self, tag: &str) -> WorkflowResult<Release> {
        if tag.trim().is_empty() {
            return Err(ReleaseDomainError::EmptyTag.into());
        }
        Ok(self.source.release_by_tag(tag).await?)
    }

    /// Reports whether the release was created within the last 24 hours.
    #[must_use]
    pub fn is_new(&self, release: &Release) -> bool {
        is_new(release, &*self.clock)
    }
}
