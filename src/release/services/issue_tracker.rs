//! Tracker version bookkeeping and issue retrieval.

use super::{FindOrCreate, WorkflowError, WorkflowResult, find_or_create};
use crate::release::{
    domain::{Issue, NewTrackerVersion, TrackerVersion},
    ports::IssueTracker,
};
use std::sync::Arc;
use tracing::warn;

/// Maximum number of issues fetched for one version.
pub const MAX_ISSUES_PER_VERSION: usize = 1000;

/// Issue tracker adapter used by the orchestrator.
pub struct IssueTrackerService<T>
where
    T: IssueTracker,
{
    tracker: Arc<T>,
}

impl<T> IssueTrackerService<T>
where
    T: IssueTracker,
{
    /// Creates an issue tracker adapter.
    #[must_use]
    pub const fn new(tracker: Arc<T>) -> Self {
        Self { tracker }
    }

    /// Returns the version named exactly `name`, creating it when absent.
    ///
    /// A created version uses `description`, or `Release {name}` when none
    /// is given.
    ///
    /// # Errors
    ///
    /// Returns upstream errors from listing or creating versions.
    pub async fn find_or_create_version(
        &self,
        name: &str,
        description: Option<String>,
    ) -> WorkflowResult<FindOrCreate<TrackerVersion>> {
        let lookup = async {
            let versions = self.tracker.list_versions().await?;
            Ok::<_, WorkflowError>(versions.into_iter().find(|version| version.name == name))
        };
        find_or_create(lookup, move || async move {
            let new_version = NewTrackerVersion::new(name, description);
            Ok::<_, WorkflowError>(self.tracker.create_version(&new_version).await?)
        })
        .await
    }

    /// Returns issues whose fix version is exactly `name`, in tracker order.
    ///
    /// At most [`MAX_ISSUES_PER_VERSION`] issues are returned; larger result
    /// sets are truncated with a warning.
    ///
    /// # Errors
    ///
    /// Returns upstream errors from the issue search.
    pub async fn issues_for_version(&self, name: &str) -> WorkflowResult<Vec<Issue>> {
        let page = self
            .tracker
            .search_issues(name, MAX_ISSUES_PER_VERSION)
            .await?;
        if page.total > page.issues.len() {
            warn!(
                version = name,
                total = page.total,
                returned = page.issues.len(),
                "issue search truncated"
            );
        }
        Ok(page.issues)
    }
}
