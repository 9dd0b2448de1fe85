//! Confluence REST API client.

use super::HttpClient;
use crate::config::ConfluenceConfig;
use crate::release::{
    domain::{NewReportPage, PageId, ReportPage},
    ports::{AdapterResult, DocumentationHost, ServiceName},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const STORAGE_REPRESENTATION: &str = "storage";

/// Documentation host backed by one Confluence space.
#[derive(Debug, Clone)]
pub struct ConfluenceDocumentationHost {
    http: HttpClient,
    config: ConfluenceConfig,
}

impl ConfluenceDocumentationHost {
    /// Creates a client for the configured space.
    ///
    /// # Errors
    ///
    /// Returns an upstream error when the HTTP client cannot be built.
    pub fn new(config: ConfluenceConfig) -> AdapterResult<Self> {
        Ok(Self {
            http: HttpClient::new(ServiceName::Documentation)?,
            config,
        })
    }

    fn request(
        &self,
        method: reqwest::Method,
        segments: &[&str],
    ) -> AdapterResult<reqwest::RequestBuilder> {
        let mut path = vec!["rest", "api", "content"];
        path.extend_from_slice(segments);
        let url = self.http.endpoint(&self.config.host, &path)?;
        Ok(self
            .http
            .client()
            .request(method, url)
            .basic_auth(&self.config.username, Some(self.config.api_token.expose()))
            .header("Accept", "application/json"))
    }
}

#[async_trait]
impl DocumentationHost for ConfluenceDocumentationHost {
    async fn search_pages(&self, title: &str) -> AdapterResult<Vec<ReportPage>> {
        let request = self.request(reqwest::Method::GET, &[])?.query(&[
            ("spaceKey", self.config.space_key.as_str()),
            ("title", title),
            ("expand", "version"),
        ]);
        let payload: SearchPayload = self.http.send_json(request).await?;
        Ok(payload.results.into_iter().map(ReportPage::from).collect())
    }

    async fn create_page(&self, page: &NewReportPage) -> AdapterResult<ReportPage> {
        let body = CreatePageBody {
            kind: "page",
            title: &page.title,
            space: SpaceRef {
                key: &self.config.space_key,
            },
            ancestors: [AncestorRef {
                id: &self.config.parent_page_id,
            }],
            body: StorageBody::new(&page.body),
        };
        let request = self.request(reqwest::Method::POST, &[])?.json(&body);
        let payload: PagePayload = self.http.send_json(request).await?;
        Ok(payload.into())
    }

    async fn get_page(&self, id: &PageId) -> AdapterResult<ReportPage> {
        let request = self
            .request(reqwest::Method::GET, &[id.as_str()])?
            .query(&[("expand", "body.storage,version")]);
        let payload: PagePayload = self.http.send_json(request).await?;
        Ok(payload.into())
    }

    async fn update_page(&self, page: &ReportPage) -> AdapterResult<ReportPage> {
        let body = UpdatePageBody {
            id: page.id.as_str(),
            kind: "page",
            title: &page.title,
            version: VersionRef {
                number: page.version,
            },
            body: StorageBody::new(&page.body),
        };
        let request = self
            .request(reqwest::Method::PUT, &[page.id.as_str()])?
            .json(&body);
        let payload: PagePayload = self.http.send_json(request).await?;
        let mut saved = ReportPage::from(payload);
        if saved.body.is_empty() {
            saved.body.clone_from(&page.body);
        }
        Ok(saved)
    }
}

#[derive(Debug, Serialize)]
struct CreatePageBody<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    title: &'a str,
    space: SpaceRef<'a>,
    ancestors: [AncestorRef<'a>; 1],
    body: StorageBody<'a>,
}

#[derive(Debug, Serialize)]
struct UpdatePageBody<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    title: &'a str,
    version: VersionRef,
    body: StorageBody<'a>,
}

#[derive(Debug, Serialize)]
struct SpaceRef<'a> {
    key: &'a str,
}

#[derive(Debug, Serialize)]
struct AncestorRef<'a> {
    id: &'a str,
}

#[derive(Debug, Serialize, Deserialize)]
struct VersionRef {
    number: u32,
}

#[derive(Debug, Serialize)]
struct StorageBody<'a> {
    storage: StorageValue<'a>,
}

impl<'a> StorageBody<'a> {
    const fn new(value: &'a str) -> Self {
        Self {
            storage: StorageValue {
                value,
                representation: STORAGE_REPRESENTATION,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct StorageValue<'a> {
    value: &'a str,
    representation: &'a str,
}

#[derive(Debug, Deserialize)]
struct SearchPayload {
    #[serde(default)]
    results: Vec<PagePayload>,
}

#[derive(Debug, Deserialize)]
struct PagePayload {
    id: String,
    title: String,
    version: Option<VersionRef>,
    body: Option<PageBodyPayload>,
}

#[derive(Debug, Deserialize)]
struct PageBodyPayload {
    storage: Option<StoragePayload>,
}

#[derive(Debug, Deserialize)]
struct StoragePayload {
    value: String,
}

impl From<PagePayload> for ReportPage {
    fn from(payload: PagePayload) -> Self {
        Self {
            id: PageId::new(payload.id),
            title: payload.title,
            body: payload
                .body
                .and_then(|body| body.storage)
                .map(|storage| storage.value)
                .unwrap_or_default(),
            version: payload.version.map_or(1, |version| version.number),
        }
    }
}
