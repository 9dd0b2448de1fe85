//! Domain model for the release QA workflow.
//!
//! Everything in this module is pure: naming rules, freshness checks, the
//! issue-to-test-case mapping, and report rendering. Remote calls live
//! behind the traits in [`crate::release::ports`].

mod error;
mod ids;
mod issue;
mod release;
mod report;
mod test_plan;

pub use error::ReleaseDomainError;
pub use ids::{CaseId, PageId, PlanId, SectionId, SuiteId, TrackerVersionId};
pub use issue::{
    Issue, IssuePage, NewTrackerVersion, TestCaseDraft, TrackerVersion, case_type_id,
    map_to_test_case, priority_id,
};
pub use release::{FRESHNESS_WINDOW_HOURS, Release, extract_version, is_new};
pub use report::{
    NewReportPage, PLACEHOLDER_LINK, ReportPage, linked_anchor, render_report_body, report_title,
};
pub use test_plan::{
    CaseFields, DEFAULT_ESTIMATE, NewTestCase, NewTestPlan, PlanEntry, Section, TestCase,
    TestPlan, TestSuite, plan_url, section_name,
};
