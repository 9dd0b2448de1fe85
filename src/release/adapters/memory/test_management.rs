//! In-memory test case manager.

use super::lock_error;
use crate::release::{
    domain::{
        CaseId, NewTestCase, NewTestPlan, PlanEntry, PlanId, Section, SectionId, SuiteId,
        TestCase, TestPlan, TestSuite,
    },
    ports::{AdapterError, AdapterResult, ServiceName, TestManagement},
};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Test case manager for a single project.
///
/// Identifiers are allocated from one counter shared by all entity kinds.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTestManagement {
    state: Arc<RwLock<InMemoryTestState>>,
}

#[derive(Debug, Default)]
struct InMemoryTestState {
    last_id: u64,
    plans: Vec<TestPlan>,
    suites: Vec<TestSuite>,
    sections: Vec<Section>,
    cases: Vec<(TestCase, NewTestCase)>,
    plan_entries: Vec<(PlanId, PlanEntry)>,
}

impl InMemoryTestState {
    const fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }
}

impl InMemoryTestManagement {
    /// Creates a project with no suites.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a suite to the project and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns an upstream error when lock acquisition fails.
    pub fn add_suite(&self, name: impl Into<String>) -> AdapterResult<SuiteId> {
        let mut state = self.write()?;
        let id = SuiteId::new(state.next_id());
        state.suites.push(TestSuite {
            id,
            name: name.into(),
        });
        Ok(id)
    }

    /// Returns every plan created so far.
    ///
    /// # Errors
    ///
    /// Returns an upstream error when lock acquisition fails.
    pub fn plans(&self) -> AdapterResult<Vec<TestPlan>> {
        Ok(self.read()?.plans.clone())
    }

    /// Returns every section.
    ///
    /// # Errors
    ///
    /// Returns an upstream error when lock acquisition fails.
    pub fn sections(&self) -> AdapterResult<Vec<Section>> {
        Ok(self.read()?.sections.clone())
    }

    /// Returns every created case with the payload it was created from.
    ///
    /// # Errors
    ///
    /// Returns an upstream error when lock acquisition fails.
    pub fn cases(&self) -> AdapterResult<Vec<(TestCase, NewTestCase)>> {
        Ok(self.read()?.cases.clone())
    }

    /// Returns every plan entry in the order it was added.
    ///
    /// # Errors
    ///
    /// Returns an upstream error when lock acquisition fails.
    pub fn plan_entries(&self) -> AdapterResult<Vec<(PlanId, PlanEntry)>> {
        Ok(self.read()?.plan_entries.clone())
    }

    fn read(&self) -> AdapterResult<std::sync::RwLockReadGuard<'_, InMemoryTestState>> {
        self.state
            .read()
            .map_err(|err| lock_error(ServiceName::TestManagement, err))
    }

    fn write(&self) -> AdapterResult<std::sync::RwLockWriteGuard<'_, InMemoryTestState>> {
        self.state
            .write()
            .map_err(|err| lock_error(ServiceName::TestManagement, err))
    }
}

#[async_trait]
impl TestManagement for InMemoryTestManagement {
    async fn create_plan(&self, plan: &NewTestPlan) -> AdapterResult<TestPlan> {
        let mut state = self.write()?;
        let created = TestPlan {
            id: PlanId::new(state.next_id()),
            name: plan.name.clone(),
            description: Some(plan.description.clone()),
        };
        state.plans.push(created.clone());
        Ok(created)
    }

    async fn list_suites(&self) -> AdapterResult<Vec<TestSuite>> {
        Ok(self.read()?.suites.clone())
    }

    async fn list_sections(&self, suite_id: SuiteId) -> AdapterResult<Vec<Section>> {
        Ok(self
            .read()?
            .sections
            .iter()
            .filter(|section| section.suite_id == suite_id)
            .cloned()
            .collect())
    }

    async fn create_section(&self, suite_id: SuiteId, name: &str) -> AdapterResult<Section> {
        let mut state = self.write()?;
        if !state.suites.iter().any(|suite| suite.id == suite_id) {
            return Err(AdapterError::upstream(
                ServiceName::TestManagement,
                format!("field suite_id is not a valid test suite: {suite_id}"),
            ));
        }
        let created = Section {
            id: SectionId::new(state.next_id()),
            suite_id,
            name: name.to_owned(),
        };
        state.sections.push(created.clone());
        Ok(created)
    }

    async fn create_case(
        &self,
        section_id: SectionId,
        case: &NewTestCase,
    ) -> AdapterResult<TestCase> {
        let mut state = self.write()?;
        let created = TestCase {
            id: CaseId::new(state.next_id()),
            section_id,
            title: case.title.clone(),
        };
        state.cases.push((created.clone(), case.clone()));
        Ok(created)
    }

    async fn add_plan_entry(&self, plan_id: PlanId, entry: &PlanEntry) -> AdapterResult<()> {
        let mut state = self.write()?;
        if !state.plans.iter().any(|plan| plan.id == plan_id) {
            return Err(AdapterError::upstream(
                ServiceName::TestManagement,
                format!("field plan_id is not a valid test plan: {plan_id}"),
            ));
        }
        state.plan_entries.push((plan_id, entry.clone()));
        Ok(())
    }
}
