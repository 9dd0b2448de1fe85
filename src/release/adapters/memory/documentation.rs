//! In-memory documentation wiki.

use super::lock_error;
use crate::release::{
    domain::{NewReportPage, PageId, ReportPage},
    ports::{AdapterError, AdapterResult, DocumentationHost, ServiceName},
};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

const FIRST_PAGE_ID: u64 = 400;

/// Wiki space holding report pages.
///
/// Updates follow the wiki's optimistic versioning: a page is accepted only
/// when its version counter is exactly one more than the stored one.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentationHost {
    state: Arc<RwLock<InMemoryWikiState>>,
}

#[derive(Debug, Default)]
struct InMemoryWikiState {
    pages: Vec<ReportPage>,
    created_pages: usize,
    updates: usize,
    issued_ids: u64,
}

impl InMemoryWikiState {
    /// Allocates the next page id, skipping ids already taken by seeded
    /// pages.
    fn next_page_id(&mut self) -> PageId {
        loop {
            let candidate = PageId::new(FIRST_PAGE_ID.saturating_add(self.issued_ids).to_string());
            self.issued_ids = self.issued_ids.saturating_add(1);
            if !self.pages.iter().any(|page| page.id == candidate) {
                return candidate;
            }
        }
    }
}

impl InMemoryDocumentationHost {
    /// Creates an empty wiki space.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an existing page without counting it as created.
    ///
    /// # Errors
    ///
    /// Returns an upstream error when lock acquisition fails.
    pub fn seed_page(&self, page: ReportPage) -> AdapterResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| lock_error(ServiceName::Documentation, err))?;
        state.pages.push(page);
        Ok(())
    }

    /// Returns every page in the space.
    ///
    /// # Errors
    ///
    /// Returns an upstream error when lock acquisition fails.
    pub fn pages(&self) -> AdapterResult<Vec<ReportPage>> {
        let state = self
            .state
            .read()
            .map_err(|err| lock_error(ServiceName::Documentation, err))?;
        Ok(state.pages.clone())
    }

    /// Returns how many pages were created and updated through the port.
    ///
    /// # Errors
    ///
    /// Returns an upstream error when lock acquisition fails.
    pub fn write_counts(&self) -> AdapterResult<(usize, usize)> {
        let state = self
            .state
            .read()
            .map_err(|err| lock_error(ServiceName::Documentation, err))?;
        Ok((state.created_pages, state.updates))
    }
}

#[async_trait]
impl DocumentationHost for InMemoryDocumentationHost {
    async fn search_pages(&self, title: &str) -> AdapterResult<Vec<ReportPage>> {
        let state = self
            .state
            .read()
            .map_err(|err| lock_error(ServiceName::Documentation, err))?;
        Ok(state
            .pages
            .iter()
            .filter(|page| page.title == title)
            .map(|page| ReportPage {
                body: String::new(),
                ..page.clone()
            })
            .collect())
    }

    async fn create_page(&self, page: &NewReportPage) -> AdapterResult<ReportPage> {
        let mut state = self
            .state
            .write()
            .map_err(|err| lock_error(ServiceName::Documentation, err))?;
        let created = ReportPage {
            id: state.next_page_id(),
            title: page.title.clone(),
            body: page.body.clone(),
            version: 1,
        };
        state.pages.push(created.clone());
        state.created_pages += 1;
        Ok(created)
    }

    async fn get_page(&self, id: &PageId) -> AdapterResult<ReportPage> {
        let state = self
            .state
            .read()
            .map_err(|err| lock_error(ServiceName::Documentation, err))?;
        state
            .pages
            .iter()
            .find(|page| &page.id == id)
            .cloned()
            .ok_or_else(|| AdapterError::not_found(format!("page {id}")))
    }

    async fn update_page(&self, page: &ReportPage) -> AdapterResult<ReportPage> {
        let mut state = self
            .state
            .write()
            .map_err(|err| lock_error(ServiceName::Documentation, err))?;
        let stored = state
            .pages
            .iter_mut()
            .find(|candidate| candidate.id == page.id)
            .ok_or_else(|| AdapterError::not_found(format!("page {}", page.id)))?;
        if page.version != stored.version.saturating_add(1) {
            return Err(AdapterError::upstream(
                ServiceName::Documentation,
                format!(
                    "version conflict on page {}: stored {}, received {}",
                    page.id, stored.version, page.version
                ),
            ));
        }
        *stored = page.clone();
        state.updates += 1;
        Ok(page.clone())
    }
}
