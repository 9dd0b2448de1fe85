//! Test plan, section and case management.

use super::{FindOrCreate, WorkflowError, WorkflowResult, find_or_create};
use crate::release::{
    domain::{
        CaseFields, CaseId, NewTestCase, NewTestPlan, PlanEntry, PlanId, ReleaseDomainError,
        Section, SectionId, SuiteId, TestCase, TestPlan, TestSuite, section_name,
    },
    ports::TestManagement,
};
use std::sync::Arc;

/// Test case manager adapter used by the orchestrator.
pub struct TestManagementService<M>
where
    M: TestManagement,
{
    manager: Arc<M>,
}

impl<M> TestManagementService<M>
where
    M: TestManagement,
{
    /// Creates a test case manager adapter.
    #[must_use]
    pub const fn new(manager: Arc<M>) -> Self {
        Self { manager }
    }

    /// Creates the plan `Release {name} Test Plan`.
    ///
    /// Always creates a new plan; re-running for the same release yields a
    /// second plan.
    ///
    /// # Errors
    ///
    /// Returns upstream errors from the test case manager.
    pub async fn create_plan(
        &self,
        name: &str,
        description: Option<String>,
    ) -> WorkflowResult<TestPlan> {
        let plan = NewTestPlan::for_version(name, description);
        Ok(self.manager.create_plan(&plan).await?)
    }

    /// Lists suites of the configured project.
    ///
    /// # Errors
    ///
    /// Returns upstream errors from the test case manager.
    pub async fn list_suites(&self) -> WorkflowResult<Vec<TestSuite>> {
        Ok(self.manager.list_suites().await?)
    }

    /// Returns the section `Release {name}` of a suite, creating it when
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns upstream errors from listing or creating sections.
    pub async fn find_or_create_section(
        &self,
        suite_id: SuiteId,
        name: &str,
    ) -> WorkflowResult<FindOrCreate<Section>> {
        let wanted = section_name(name);
        let lookup = async {
            let sections = self.manager.list_sections(suite_id).await?;
            Ok::<_, WorkflowError>(sections.into_iter().find(|section| section.name == wanted))
        };
        find_or_create(lookup, || async {
            Ok::<_, WorkflowError>(self.manager.create_section(suite_id, &wanted).await?)
        })
        .await
    }

    /// Creates one test case. The estimate defaults to `15m`.
    ///
    /// # Errors
    ///
    /// Returns upstream errors from the test case manager.
    pub async fn create_case(
        &self,
        section_id: SectionId,
        title: &str,
        fields: CaseFields,
    ) -> WorkflowResult<TestCase> {
        let case = NewTestCase::new(title, fields);
        Ok(self.manager.create_case(section_id, &case).await?)
    }

    /// Attaches cases to a plan as a single entry with an explicit case list.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseDomainError::EmptyPlanEntry`] without calling the
    /// remote service when `case_ids` is empty, or upstream errors.
    pub async fn add_cases_to_plan(
        &self,
        plan_id: PlanId,
        suite_id: SuiteId,
        case_ids: Vec<CaseId>,
    ) -> WorkflowResult<()> {
        if case_ids.is_empty() {
            return Err(ReleaseDomainError::EmptyPlanEntry(plan_id.value()).into());
        }
        let entry = PlanEntry { suite_id, case_ids };
        Ok(self.manager.add_plan_entry(plan_id, &entry).await?)
    }
}
