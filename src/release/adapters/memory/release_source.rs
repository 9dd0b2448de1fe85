//! In-memory release source.

use super::lock_error;
use crate::release::{
    domain::Release,
    ports::{AdapterError, AdapterResult, ReleaseSource, ServiceName},
};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Release source backed by a list of releases.
///
/// The latest release is the one with the most recent creation time.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReleaseSource {
    releases: Arc<RwLock<Vec<Release>>>,
}

impl InMemoryReleaseSource {
    /// Creates an empty release source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a release.
    ///
    /// # Errors
    ///
    /// Returns an upstream error when lock acquisition fails.
    pub fn publish(&self, release: Release) -> AdapterResult<()> {
        let mut releases = self
            .releases
            .write()
            .map_err(|err| lock_error(ServiceName::ReleaseSource, err))?;
        releases.push(release);
        Ok(())
    }
}

#[async_trait]
impl ReleaseSource for InMemoryReleaseSource {
    async fn latest_release(&self) -> AdapterResult<Release> {
        let releases = self
            .releases
            .read()
            .map_err(|err| lock_error(ServiceName::ReleaseSource, err))?;
        releases
            .iter()
            .max_by_key(|release| release.created_at())
            .cloned()
            .ok_or_else(|| AdapterError::not_found("latest release"))
    }

    async fn release_by_tag(&self, tag: &str) -> AdapterResult<Release> {
        let releases = self
            .releases
            .read()
            .map_err(|err| lock_error(ServiceName::ReleaseSource, err))?;
        releases
            .iter()
            .find(|release| release.tag() == tag)
            .cloned()
            .ok_or_else(|| AdapterError::not_found(format!("release tag {tag}")))
    }
}
