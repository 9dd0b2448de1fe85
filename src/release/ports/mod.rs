//! Port contracts for the release QA workflow.
//!
//! Each remote service is reached through one capability trait. The
//! orchestrator depends only on these traits, so HTTP clients and test
//! doubles are interchangeable.

pub mod documentation;
pub mod error;
pub mod issue_tracker;
pub mod release_source;
pub mod test_management;

pub use documentation::DocumentationHost;
pub use error::{AdapterError, AdapterResult, ServiceName};
pub use issue_tracker::IssueTracker;
pub use release_source::ReleaseSource;
pub use test_management::TestManagement;
