//! GitHub Releases API client.

use super::HttpClient;
use crate::config::GitHubConfig;
use crate::release::{
    domain::Release,
    ports::{AdapterError, AdapterResult, ReleaseSource, ServiceName},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";

/// Release source reading from one GitHub repository.
#[derive(Debug, Clone)]
pub struct GitHubReleaseSource {
    http: HttpClient,
    config: GitHubConfig,
}

impl GitHubReleaseSource {
    /// Creates a release source for the configured repository.
    ///
    /// # Errors
    ///
    /// Returns an upstream error when the HTTP client cannot be built.
    pub fn new(config: GitHubConfig) -> AdapterResult<Self> {
        Ok(Self {
            http: HttpClient::new(ServiceName::ReleaseSource)?,
            config,
        })
    }

    async fn fetch(&self, segments: &[&str]) -> AdapterResult<Release> {
        let mut path = vec!["repos", self.config.owner.as_str(), self.config.repo.as_str()];
        path.extend_from_slice(segments);
        let url = self.http.endpoint(&self.config.api_url, &path)?;
        let request = self
            .http
            .client()
            .get(url)
            .bearer_auth(self.config.token.expose())
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION);
        let payload: ReleasePayload = self.http.send_json(request).await?;
        Ok(payload.into())
    }
}

#[async_trait]
impl ReleaseSource for GitHubReleaseSource {
    async fn latest_release(&self) -> AdapterResult<Release> {
        self.fetch(&["releases", "latest"]).await
    }

    async fn release_by_tag(&self, tag: &str) -> AdapterResult<Release> {
        self.fetch(&["releases", "tags", tag])
            .await
            .map_err(|err| match err {
                AdapterError::NotFound(_) => AdapterError::not_found(format!("release tag {tag}")),
                other => other,
            })
    }
}

#[derive(Debug, Deserialize)]
struct ReleasePayload {
    tag_name: String,
    body: Option<String>,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<ReleasePayload> for Release {
    fn from(payload: ReleasePayload) -> Self {
        let release = Self::new(payload.tag_name, payload.created_at)
            .with_body(payload.body.unwrap_or_default());
        match payload.published_at {
            Some(published_at) => release.with_published_at(published_at),
            None => release,
        }
    }
}
