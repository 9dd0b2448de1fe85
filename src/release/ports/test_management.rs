//! Port for the test case manager.

use super::AdapterResult;
use crate::release::domain::{
    NewTestCase, NewTestPlan, PlanEntry, PlanId, Section, SectionId, SuiteId, TestCase, TestPlan,
    TestSuite,
};
use async_trait::async_trait;

/// Plan, suite, section and case access for the configured project.
#[async_trait]
pub trait TestManagement: Send + Sync {
    /// Creates a test plan.
    async fn create_plan(&self, plan: &NewTestPlan) -> AdapterResult<TestPlan>;

    /// Lists suites of the configured project in remote order.
    async fn list_suites(&self) -> AdapterResult<Vec<TestSuite>>;

    /// Lists sections of a suite.
    async fn list_sections(&self, suite_id: SuiteId) -> AdapterResult<Vec<Section>>;

    /// Creates a top-level section in a suite.
    async fn create_section(&self, suite_id: SuiteId, name: &str) -> AdapterResult<Section>;

    /// Creates a test case in a section.
    async fn create_case(&self, section_id: SectionId, case: &NewTestCase)
    -> AdapterResult<TestCase>;

    /// Adds an entry with an explicit case list to a plan.
    async fn add_plan_entry(&self, plan_id: PlanId, entry: &PlanEntry) -> AdapterResult<()>;
}
