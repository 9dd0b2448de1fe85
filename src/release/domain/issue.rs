//! Issue tracker entities and the issue-to-test-case mapping.

use super::{CaseFields, TrackerVersionId};
use serde::{Deserialize, Serialize};

const DEFAULT_PRIORITY_ID: u32 = 3;
const DEFAULT_CASE_TYPE_ID: u32 = 1;

/// Release-tracking label inside the issue tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerVersion {
    /// Tracker-assigned identifier.
    pub id: TrackerVersionId,
    /// Version name, equal to the derived release version.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
}

/// Payload for creating a tracker version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrackerVersion {
    /// Version name.
    pub name: String,
    /// Version description.
    pub description: String,
}

impl NewTrackerVersion {
    /// Creates a version payload, defaulting the description to
    /// `Release {name}`.
    #[must_use]
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        let version_name = name.into();
        let resolved_description =
            description.unwrap_or_else(|| format!("Release {version_name}"));
        Self {
            name: version_name,
            description: resolved_description,
        }
    }
}

/// Unit of tracked work filed against a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue key, for example `PROJ-123`.
    pub key: String,
    /// One-line summary.
    pub summary: String,
    /// Long-form description.
    pub description: Option<String>,
    /// Workflow status name.
    pub status: Option<String>,
    /// Issue type name, for example `Bug`.
    pub issue_type: Option<String>,
    /// Priority name, for example `High`.
    pub priority: Option<String>,
}

impl Issue {
    /// Creates an issue with a key and summary and no optional fields.
    #[must_use]
    pub fn new(key: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            summary: summary.into(),
            description: None,
            status: None,
            issue_type: None,
            priority: None,
        }
    }

    /// Sets the issue type name.
    #[must_use]
    pub fn with_issue_type(mut self, issue_type: impl Into<String>) -> Self {
        self.issue_type = Some(issue_type.into());
        self
    }

    /// Sets the priority name.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

/// One page of issue search results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IssuePage {
    /// Issues in tracker order.
    pub issues: Vec<Issue>,
    /// Total number of matches reported by the tracker.
    pub total: usize,
}

/// Test case title and fields derived from one issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCaseDraft {
    /// Case title, `{key} - {summary}`.
    pub title: String,
    /// Case fields.
    pub fields: CaseFields,
}

/// Maps a tracker priority name to a test case priority id.
///
/// Unknown or missing priorities map to Medium (3).
#[must_use]
pub fn priority_id(priority: Option<&str>) -> u32 {
    match priority {
        Some("Highest") => 1,
        Some("High") => 2,
        Some("Medium") => 3,
        Some("Low") => 4,
        Some("Lowest") => 5,
        _ => DEFAULT_PRIORITY_ID,
    }
}

/// Maps a tracker issue type name to a test case type id.
///
/// Unknown or missing types map to Functional (1).
#[must_use]
pub fn case_type_id(issue_type: Option<&str>) -> u32 {
    match issue_type {
        Some("Bug") => 1,
        Some("Task") => 2,
        Some("Story") => 3,
        Some("Improvement") => 6,
        Some("Epic") => 7,
        _ => DEFAULT_CASE_TYPE_ID,
    }
}

/// Maps an issue to the test case created for it.
#[must_use]
pub fn map_to_test_case(issue: &Issue) -> TestCaseDraft {
    TestCaseDraft {
        title: format!("{} - {}", issue.key, issue.summary),
        fields: CaseFields::new(
            case_type_id(issue.issue_type.as_deref()),
            priority_id(issue.priority.as_deref()),
        )
        .with_jira_ticket(issue.key.clone()),
    }
}
