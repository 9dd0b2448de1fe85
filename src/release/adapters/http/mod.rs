//! HTTP adapters for the four remote services.
//!
//! All adapters share [`HttpClient`], which owns one connection pool per
//! adapter and turns transport failures and non-success statuses into
//! [`AdapterError`]s. Requests are never retried.

mod confluence;
mod github;
mod jira;
mod testrail;

pub use confluence::ConfluenceDocumentationHost;
pub use github::GitHubReleaseSource;
pub use jira::{JiraIssueTracker, fix_version_jql};
pub use testrail::TestRailTestManagement;

use crate::release::ports::{AdapterError, AdapterResult, ServiceName};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const ERROR_BODY_LIMIT: usize = 500;
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Shared request execution for one remote service.
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: Client,
    service: ServiceName,
}

impl HttpClient {
    /// Builds a client for `service`.
    pub(crate) fn new(service: ServiceName) -> AdapterResult<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .use_rustls_tls()
            .build()
            .map_err(|err| {
                AdapterError::upstream(service, format!("failed to build HTTP client: {err}"))
            })?;
        Ok(Self { client, service })
    }

    pub(crate) const fn client(&self) -> &Client {
        &self.client
    }

    /// Parses `base` and appends percent-encoded path segments.
    pub(crate) fn endpoint(&self, base: &str, segments: &[&str]) -> AdapterResult<Url> {
        let mut url = Url::parse(base).map_err(|err| {
            AdapterError::upstream(self.service, format!("invalid URL {base}: {err}"))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                AdapterError::upstream(self.service, format!("URL {base} cannot take a path"))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a request and returns the response when its status is 2xx.
    ///
    /// A 404 becomes [`AdapterError::NotFound`]; every other failure is
    /// [`AdapterError::Upstream`] carrying the status and response body.
    pub(crate) async fn send(&self, request: RequestBuilder) -> AdapterResult<Response> {
        let response = request.send().await.map_err(|err| self.transport(&err))?;
        let status = response.status();
        let url = response.url().clone();
        debug!(service = %self.service, %url, %status, "HTTP response");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let excerpt: String = body.chars().take(ERROR_BODY_LIMIT).collect();
        if status == StatusCode::NOT_FOUND {
            return Err(AdapterError::not_found(format!(
                "{} resource {}",
                self.service,
                url.path()
            )));
        }
        Err(AdapterError::upstream(
            self.service,
            format!("{status} from {url}: {excerpt}"),
        ))
    }

    /// Sends a request and decodes a 2xx JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> AdapterResult<T> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|err| {
                AdapterError::upstream(self.service, format!("invalid response body: {err}"))
            })
    }

    fn transport(&self, err: &reqwest::Error) -> AdapterError {
        AdapterError::upstream(self.service, err.to_string())
    }
}
