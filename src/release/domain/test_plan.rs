//! Test management entities: plans, suites, sections and cases.

use super::{CaseId, PlanId, SectionId, SuiteId};
use serde::{Deserialize, Serialize};

/// Estimate applied to test cases that do not specify one.
pub const DEFAULT_ESTIMATE: &str = "15m";

/// Container of test execution for a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestPlan {
    /// Plan identifier.
    pub id: PlanId,
    /// Plan name.
    pub name: String,
    /// Plan description.
    pub description: Option<String>,
}

/// Payload for creating a test plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTestPlan {
    /// Plan name, `Release {version} Test Plan`.
    pub name: String,
    /// Plan description.
    pub description: String,
}

impl NewTestPlan {
    /// Builds the plan payload for a release version.
    ///
    /// The description defaults to `Test plan for release {version}`.
    #[must_use]
    pub fn for_version(version: &str, description: Option<String>) -> Self {
        Self {
            name: format!("Release {version} Test Plan"),
            description: description.unwrap_or_else(|| format!("Test plan for release {version}")),
        }
    }
}

/// Suite of test cases within a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSuite {
    /// Suite identifier.
    pub id: SuiteId,
    /// Suite name.
    pub name: String,
}

/// Named grouping of test cases within a suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section identifier.
    pub id: SectionId,
    /// Owning suite.
    pub suite_id: SuiteId,
    /// Section name.
    pub name: String,
}

/// Type, priority and reference fields of a test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseFields {
    /// Case type identifier.
    pub type_id: u32,
    /// Case priority identifier.
    pub priority_id: u32,
    /// Time estimate, `15m` when not set.
    pub estimate: Option<String>,
    /// Free-form references.
    pub refs: Option<String>,
    /// Linked issue key, stored as an external reference on the case.
    pub jira_ticket: Option<String>,
}

impl CaseFields {
    /// Creates case fields with the given type and priority.
    #[must_use]
    pub const fn new(type_id: u32, priority_id: u32) -> Self {
        Self {
            type_id,
            priority_id,
            estimate: None,
            refs: None,
            jira_ticket: None,
        }
    }

    /// Sets the time estimate.
    #[must_use]
    pub fn with_estimate(mut self, estimate: impl Into<String>) -> Self {
        self.estimate = Some(estimate.into());
        self
    }

    /// Sets the free-form references.
    #[must_use]
    pub fn with_refs(mut self, refs: impl Into<String>) -> Self {
        self.refs = Some(refs.into());
        self
    }

    /// Sets the linked issue key.
    #[must_use]
    pub fn with_jira_ticket(mut self, jira_ticket: impl Into<String>) -> Self {
        self.jira_ticket = Some(jira_ticket.into());
        self
    }
}

/// Payload for creating one test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTestCase {
    /// Case title.
    pub title: String,
    /// Case type identifier.
    pub type_id: u32,
    /// Case priority identifier.
    pub priority_id: u32,
    /// Time estimate.
    pub estimate: String,
    /// Free-form references.
    pub refs: Option<String>,
    /// Linked issue key.
    pub jira_ticket: Option<String>,
}

impl NewTestCase {
    /// Builds a case payload, applying the default estimate.
    #[must_use]
    pub fn new(title: impl Into<String>, fields: CaseFields) -> Self {
        Self {
            title: title.into(),
            type_id: fields.type_id,
            priority_id: fields.priority_id,
            estimate: fields
                .estimate
                .unwrap_or_else(|| DEFAULT_ESTIMATE.to_owned()),
            refs: fields.refs,
            jira_ticket: fields.jira_ticket,
        }
    }
}

/// Test case stored in the test management service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Case identifier.
    pub id: CaseId,
    /// Owning section.
    pub section_id: SectionId,
    /// Case title.
    pub title: String,
}

/// Explicit set of cases attached to a plan under one suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    /// Suite the cases belong to.
    pub suite_id: SuiteId,
    /// Ordered case identifiers.
    pub case_ids: Vec<CaseId>,
}

/// Returns the section name used for a release version.
#[must_use]
pub fn section_name(version: &str) -> String {
    format!("Release {version}")
}

/// Returns the browser URL of a test plan.
///
/// A trailing `/` on `host` is ignored.
#[must_use]
pub fn plan_url(host: &str, plan_id: PlanId) -> String {
    format!(
        "{}/index.php?/plans/view/{plan_id}",
        host.trim_end_matches('/')
    )
}
