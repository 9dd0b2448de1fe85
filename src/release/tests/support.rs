//! Shared doubles for release workflow tests.

use crate::release::{
    domain::{
        Issue, IssuePage, NewReportPage, NewTestCase, NewTestPlan, NewTrackerVersion, PageId,
        PlanEntry, PlanId, Release, ReportPage, Section, SectionId, SuiteId, TestCase, TestPlan,
        TestSuite, TrackerVersion,
    },
    ports::{AdapterResult, DocumentationHost, IssueTracker, ReleaseSource, TestManagement},
};
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use mockall::mock;

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub const fn at(now: DateTime<Utc>) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Instant used as "now" throughout the tests.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Returns a release created `hours` before [`now`].
pub fn release_aged(tag: &str, hours: i64) -> Release {
    Release::new(tag, now() - TimeDelta::hours(hours))
}

mock! {
    pub Source {}

    #[async_trait]
    impl ReleaseSource for Source {
        async fn latest_release(&self) -> AdapterResult<Release>;
        async fn release_by_tag(&self, tag: &str) -> AdapterResult<Release>;
    }
}

mock! {
    pub Tracker {}

    #[async_trait]
    impl IssueTracker for Tracker {
        async fn list_versions(&self) -> AdapterResult<Vec<TrackerVersion>>;
        async fn create_version(&self, version: &NewTrackerVersion)
            -> AdapterResult<TrackerVersion>;
        async fn search_issues(&self, fix_version: &str, max_results: usize)
            -> AdapterResult<IssuePage>;
    }
}

mock! {
    pub Manager {}

    #[async_trait]
    impl TestManagement for Manager {
        async fn create_plan(&self, plan: &NewTestPlan) -> AdapterResult<TestPlan>;
        async fn list_suites(&self) -> AdapterResult<Vec<TestSuite>>;
        async fn list_sections(&self, suite_id: SuiteId) -> AdapterResult<Vec<Section>>;
        async fn create_section(&self, suite_id: SuiteId, name: &str) -> AdapterResult<Section>;
        async fn create_case(&self, section_id: SectionId, case: &NewTestCase)
            -> AdapterResult<TestCase>;
        async fn add_plan_entry(&self, plan_id: PlanId, entry: &PlanEntry) -> AdapterResult<()>;
    }
}

mock! {
    pub Wiki {}

    #[async_trait]
    impl DocumentationHost for Wiki {
        async fn search_pages(&self, title: &str) -> AdapterResult<Vec<ReportPage>>;
        async fn create_page(&self, page: &NewReportPage) -> AdapterResult<ReportPage>;
        async fn get_page(&self, id: &PageId) -> AdapterResult<ReportPage>;
        async fn update_page(&self, page: &ReportPage) -> AdapterResult<ReportPage>;
    }
}

/// The issue used by the happy-path scenarios.
pub fn bug_ticket() -> Issue {
    Issue::new("PROJ-123", "Test ticket")
        .with_issue_type("Bug")
        .with_priority("High")
}
