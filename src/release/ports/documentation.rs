//! Port for the documentation wiki.

use super::AdapterResult;
use crate::release::domain::{NewReportPage, PageId, ReportPage};
use async_trait::async_trait;

/// Page access within the configured wiki space.
#[async_trait]
pub trait DocumentationHost: Send + Sync {
    /// Searches pages of the configured space with exactly this title.
    ///
    /// Returned pages carry their version counter but not their body.
    async fn search_pages(&self, title: &str) -> AdapterResult<Vec<ReportPage>>;

    /// Creates a page under the configured parent page.
    async fn create_page(&self, page: &NewReportPage) -> AdapterResult<ReportPage>;

    /// Fetches a page with its body and version counter.
    async fn get_page(&self, id: &PageId) -> AdapterResult<ReportPage>;

    /// Persists a page. `page.version` must be exactly one more than the
    /// stored version counter.
    async fn update_page(&self, page: &ReportPage) -> AdapterResult<ReportPage>;
}
