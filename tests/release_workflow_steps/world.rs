//! Shared world state for release workflow BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use qa_release::release::{
    adapters::memory::{
        InMemoryDocumentationHost, InMemoryIssueTracker, InMemoryReleaseSource,
        InMemoryTestManagement,
    },
    services::{
        DocumentationService, IssueTrackerService, ReleaseOrchestrator, ReleaseSourceService,
        TestManagementService, WorkflowOutcome, WorkflowResult,
    },
};
use rstest::fixture;

/// Base URL of the test management service used by the scenarios.
pub const TEST_RAIL_HOST: &str = "https://acme.testrail.io";

/// Orchestrator type used by the BDD world.
pub type TestOrchestrator = ReleaseOrchestrator<
    InMemoryReleaseSource,
    InMemoryIssueTracker,
    InMemoryTestManagement,
    InMemoryDocumentationHost,
    DefaultClock,
>;

/// Scenario world for release workflow behaviour tests.
pub struct ReleaseWorld {
    pub releases: InMemoryReleaseSource,
    pub tracker: InMemoryIssueTracker,
    pub test_management: InMemoryTestManagement,
    pub wiki: InMemoryDocumentationHost,
    pub orchestrator: TestOrchestrator,
    pub runs: Vec<WorkflowResult<WorkflowOutcome>>,
}

impl ReleaseWorld {
    /// Creates a world whose test project has a single suite.
    #[must_use]
    pub fn new() -> Self {
        let releases = InMemoryReleaseSource::new();
        let tracker = InMemoryIssueTracker::new();
        let test_management = InMemoryTestManagement::new();
        let wiki = InMemoryDocumentationHost::new();
        test_management
            .add_suite("Master")
            .expect("suite should be added to an empty project");
        let clock = Arc::new(DefaultClock);
        let orchestrator = ReleaseOrchestrator::new(
            ReleaseSourceService::new(Arc::new(releases.clone()), Arc::clone(&clock)),
            IssueTrackerService::new(Arc::new(tracker.clone())),
            TestManagementService::new(Arc::new(test_management.clone())),
            DocumentationService::new(Arc::new(wiki.clone()), clock),
            TEST_RAIL_HOST,
        );
        Self {
            releases,
            tracker,
            test_management,
            wiki,
            orchestrator,
            runs: Vec::new(),
        }
    }

    /// Returns the result of the first workflow run.
    pub fn first_run(&self) -> Result<&WorkflowResult<WorkflowOutcome>, eyre::Report> {
        self.runs
            .first()
            .ok_or_else(|| eyre::eyre!("no workflow run recorded in scenario world"))
    }
}

impl Default for ReleaseWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ReleaseWorld {
    ReleaseWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
