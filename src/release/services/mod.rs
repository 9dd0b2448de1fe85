//! Application services for the release QA workflow.
//!
//! One adapter per remote service layers the workflow's naming and
//! find-or-create rules over its port; [`ReleaseOrchestrator`] composes
//! them.

mod documentation;
mod error;
mod find_or_create;
mod issue_tracker;
mod orchestrator;
mod release_source;
mod test_management;

pub use documentation::DocumentationService;
pub use error::{WorkflowError, WorkflowResult};
pub use find_or_create::{FindOrCreate, find_or_create};
pub use issue_tracker::{IssueTrackerService, MAX_ISSUES_PER_VERSION};
pub use orchestrator::{NOT_NEW_MESSAGE, ReleaseOrchestrator, WorkflowOutcome, WorkflowReport};
pub use release_source::ReleaseSourceService;
pub use test_management::TestManagementService;
