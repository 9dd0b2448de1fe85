//! In-memory issue tracker.

use super::lock_error;
use crate::release::{
    domain::{Issue, IssuePage, NewTrackerVersion, TrackerVersion, TrackerVersionId},
    ports::{AdapterResult, IssueTracker, ServiceName},
};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

const FIRST_VERSION_ID: u64 = 10_000;

/// Issue tracker holding versions and issues for a single project.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIssueTracker {
    state: Arc<RwLock<InMemoryTrackerState>>,
}

#[derive(Debug, Default)]
struct InMemoryTrackerState {
    versions: Vec<TrackerVersion>,
    issues: Vec<(String, Issue)>,
    created_versions: usize,
    issued_ids: u64,
}

impl InMemoryTrackerState {
    /// Allocates the next version id, skipping ids already taken by seeded
    /// versions.
    fn next_version_id(&mut self) -> TrackerVersionId {
        loop {
            let candidate = TrackerVersionId::new(
                FIRST_VERSION_ID.saturating_add(self.issued_ids).to_string(),
            );
            self.issued_ids = self.issued_ids.saturating_add(1);
            if !self.versions.iter().any(|version| version.id == candidate) {
                return candidate;
            }
        }
    }
}

impl InMemoryIssueTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Files an issue against a fix version.
    ///
    /// # Errors
    ///
    /// Returns an upstream error when lock acquisition fails.
    pub fn file_issue(&self, fix_version: impl Into<String>, issue: Issue) -> AdapterResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| lock_error(ServiceName::IssueTracker, err))?;
        state.issues.push((fix_version.into(), issue));
        Ok(())
    }

    /// Registers an existing version without counting it as created.
    ///
    /// # Errors
    ///
    /// Returns an upstream error when lock acquisition fails.
    pub fn seed_version(&self, version: TrackerVersion) -> AdapterResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| lock_error(ServiceName::IssueTracker, err))?;
        state.versions.push(version);
        Ok(())
    }

    /// Returns every version in creation order.
    ///
    /// # Errors
    ///
    /// Returns an upstream error when lock acquisition fails.
    pub fn versions(&self) -> AdapterResult<Vec<TrackerVersion>> {
        let state = self
            .state
            .read()
            .map_err(|err| lock_error(ServiceName::IssueTracker, err))?;
        Ok(state.versions.clone())
    }

    /// Returns how many versions were created through the port.
    ///
    /// # Errors
    ///
    /// Returns an upstream error when lock acquisition fails.
    pub fn created_version_count(&self) -> AdapterResult<usize> {
        let state = self
            .state
            .read()
            .map_err(|err| lock_error(ServiceName::IssueTracker, err))?;
        Ok(state.created_versions)
    }
}

#[async_trait]
impl IssueTracker for InMemoryIssueTracker {
    async fn list_versions(&self) -> AdapterResult<Vec<TrackerVersion>> {
        self.versions()
    }

    async fn create_version(&self, version: &NewTrackerVersion) -> AdapterResult<TrackerVersion> {
        let mut state = self
            .state
            .write()
            .map_err(|err| lock_error(ServiceName::IssueTracker, err))?;
        let created = TrackerVersion {
            id: state.next_version_id(),
            name: version.name.clone(),
            description: Some(version.description.clone()),
        };
        state.versions.push(created.clone());
        state.created_versions += 1;
        Ok(created)
    }

    async fn search_issues(
        &self,
        fix_version: &str,
        max_results: usize,
    ) -> AdapterResult<IssuePage> {
        let state = self
            .state
            .read()
            .map_err(|err| lock_error(ServiceName::IssueTracker, err))?;
        let matching: Vec<&Issue> = state
            .issues
            .iter()
            .filter(|(version, _)| version == fix_version)
            .map(|(_, issue)| issue)
            .collect();
        Ok(IssuePage {
            total: matching.len(),
            issues: matching.into_iter().take(max_results).cloned().collect(),
        })
    }
}
