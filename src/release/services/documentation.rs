//! QA report page publication.

use super::{FindOrCreate, WorkflowError, WorkflowResult, find_or_create};
use crate::release::{
    domain::{
        NewReportPage, PLACEHOLDER_LINK, PageId, ReportPage, render_report_body, report_title,
    },
    ports::{AdapterError, DocumentationHost},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::warn;

/// Documentation adapter used by the orchestrator.
pub struct DocumentationService<D, C>
where
    D: DocumentationHost,
    C: Clock + Send + Sync,
{
    host: Arc<D>,
    clock: Arc<C>,
}

impl<D, C> DocumentationService<D, C>
where
    D: DocumentationHost,
    C: Clock + Send + Sync,
{
    /// Creates a documentation adapter.
    #[must_use]
    pub const fn new(host: Arc<D>, clock: Arc<C>) -> Self {
        Self { host, clock }
    }

    /// Returns the first page titled exactly `Release {version} - QA Report`.
    ///
    /// Search results whose title differs in any way, including case, are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns upstream errors from the page search.
    pub async fn find_report_page(&self, version: &str) -> WorkflowResult<Option<ReportPage>> {
        let title = report_title(version);
        let pages = self.host.search_pages(&title).await?;
        Ok(pages.into_iter().find(|page| page.title == title))
    }

    /// Renders and creates the report page for a release.
    ///
    /// `date` defaults to the current UTC date as `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns template rendering errors or upstream errors from page
    /// creation.
    pub async fn create_report_page(
        &self,
        version: &str,
        date: Option<&str>,
    ) -> WorkflowResult<ReportPage> {
        let report_date =
            date.map_or_else(|| self.clock.utc().format("%Y-%m-%d").to_string(), str::to_owned);
        let page = NewReportPage {
            title: report_title(version),
            body: render_report_body(version, &report_date)?,
        };
        Ok(self.host.create_page(&page).await?)
    }

    /// Returns the existing report page for a release, or creates one.
    ///
    /// An existing page is returned as found; its content is not refreshed.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::find_report_page`] and
    /// [`Self::create_report_page`].
    pub async fn find_or_create_report_page(
        &self,
        version: &str,
        date: Option<&str>,
    ) -> WorkflowResult<FindOrCreate<ReportPage>> {
        find_or_create(self.find_report_page(version), || {
            self.create_report_page(version, date)
        })
        .await
    }

    /// Replaces the plan placeholder on a page with a link to `url`.
    ///
    /// The page is rewritten with its version counter advanced by one even
    /// when the placeholder is missing.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::NotFound`] when the page has no placeholder
    /// (after rewriting it unchanged), or upstream errors.
    pub async fn patch_test_rail_link(
        &self,
        page_id: &PageId,
        url: &str,
    ) -> WorkflowResult<ReportPage> {
        let current = self.host.get_page(page_id).await?;
        let (patched, placeholder_found) = current.with_plan_link(url);
        let saved = self.host.update_page(&patched).await?;
        if !placeholder_found {
            warn!(page_id = %page_id, "report page has no plan placeholder");
            return Err(WorkflowError::from(AdapterError::not_found(format!(
                "placeholder {PLACEHOLDER_LINK} on page {page_id}"
            ))));
        }
        Ok(saved)
    }
}
