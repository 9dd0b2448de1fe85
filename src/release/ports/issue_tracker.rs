//! Port for the issue tracker.

use super::AdapterResult;
use crate::release::domain::{IssuePage, NewTrackerVersion, TrackerVersion};
use async_trait::async_trait;

/// Version and issue access for the configured tracker project.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Lists every version of the configured project.
    async fn list_versions(&self) -> AdapterResult<Vec<TrackerVersion>>;

    /// Creates a version in the configured project.
    async fn create_version(&self, version: &NewTrackerVersion) -> AdapterResult<TrackerVersion>;

    /// Searches issues of the configured project whose fix version equals
    /// `fix_version`, returning at most `max_results` issues.
    async fn search_issues(&self, fix_version: &str, max_results: usize)
    -> AdapterResult<IssuePage>;
}
