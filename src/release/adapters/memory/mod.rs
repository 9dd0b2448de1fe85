//! In-memory adapters for release workflow tests and local dry runs.
//!
//! Each adapter keeps its state behind an `Arc<RwLock<_>>` and records the
//! writes it receives so tests can assert on side effects.

mod documentation;
mod issue_tracker;
mod release_source;
mod test_management;

pub use documentation::InMemoryDocumentationHost;
pub use issue_tracker::InMemoryIssueTracker;
pub use release_source::InMemoryReleaseSource;
pub use test_management::InMemoryTestManagement;

use crate::release::ports::{AdapterError, ServiceName};

fn lock_error(service: ServiceName, err: impl std::fmt::Display) -> AdapterError {
    AdapterError::upstream(service, format!("in-memory state lock poisoned: {err}"))
}
