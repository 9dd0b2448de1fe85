//! Jira REST API v2 client.

use super::HttpClient;
use crate::config::JiraConfig;
use crate::release::{
    domain::{Issue, IssuePage, NewTrackerVersion, TrackerVersion, TrackerVersionId},
    ports::{AdapterResult, IssueTracker, ServiceName},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const ISSUE_FIELDS: [&str; 5] = ["summary", "description", "status", "issuetype", "priority"];

/// Issue tracker backed by one Jira project.
#[derive(Debug, Clone)]
pub struct JiraIssueTracker {
    http: HttpClient,
    config: JiraConfig,
}

impl JiraIssueTracker {
    /// Creates a tracker client for the configured project.
    ///
    /// # Errors
    ///
    /// Returns an upstream error when the HTTP client cannot be built.
    pub fn new(config: JiraConfig) -> AdapterResult<Self> {
        Ok(Self {
            http: HttpClient::new(ServiceName::IssueTracker)?,
            config,
        })
    }

    fn request(
        &self,
        method: reqwest::Method,
        segments: &[&str],
    ) -> AdapterResult<reqwest::RequestBuilder> {
        let mut path = vec!["rest", "api", "2"];
        path.extend_from_slice(segments);
        let url = self.http.endpoint(&self.config.host, &path)?;
        Ok(self
            .http
            .client()
            .request(method, url)
            .basic_auth(&self.config.email, Some(self.config.api_token.expose()))
            .header("Accept", "application/json"))
    }
}

/// Builds the JQL selecting issues of `project` fixed in `version`.
///
/// Double quotes and backslashes in either value are escaped.
#[must_use]
pub fn fix_version_jql(project: &str, version: &str) -> String {
    format!(
        r#"project = "{}" AND fixVersion = "{}""#,
        escape_jql(project),
        escape_jql(version)
    )
}

fn escape_jql(value: &str) -> String {
    value.replace('\\', r"\\").replace('"', r#"\""#)
}

#[async_trait]
impl IssueTracker for JiraIssueTracker {
    async fn list_versions(&self) -> AdapterResult<Vec<TrackerVersion>> {
        let request = self.request(
            reqwest::Method::GET,
            &["project", self.config.project_key.as_str(), "versions"],
        )?;
        let payload: Vec<VersionPayload> = self.http.send_json(request).await?;
        Ok(payload.into_iter().map(TrackerVersion::from).collect())
    }

    async fn create_version(&self, version: &NewTrackerVersion) -> AdapterResult<TrackerVersion> {
        let body = CreateVersionBody {
            name: &version.name,
            description: &version.description,
            project: &self.config.project_key,
        };
        let request = self.request(reqwest::Method::POST, &["version"])?.json(&body);
        let payload: VersionPayload = self.http.send_json(request).await?;
        Ok(payload.into())
    }

    async fn search_issues(
        &self,
        fix_version: &str,
        max_results: usize,
    ) -> AdapterResult<IssuePage> {
        let body = SearchBody {
            jql: fix_version_jql(&self.config.project_key, fix_version),
            max_results,
            fields: &ISSUE_FIELDS,
        };
        let request = self.request(reqwest::Method::POST, &["search"])?.json(&body);
        let payload: SearchPayload = self.http.send_json(request).await?;
        Ok(payload.into())
    }
}

#[derive(Debug, Serialize)]
struct CreateVersionBody<'a> {
    name: &'a str,
    description: &'a str,
    project: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchBody<'a> {
    jql: String,
    max_results: usize,
    fields: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
struct VersionPayload {
    id: String,
    name: String,
    description: Option<String>,
}

impl From<VersionPayload> for TrackerVersion {
    fn from(payload: VersionPayload) -> Self {
        Self {
            id: TrackerVersionId::new(payload.id),
            name: payload.name,
            description: payload.description,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchPayload {
    #[serde(default)]
    total: usize,
    #[serde(default)]
    issues: Vec<IssuePayload>,
}

impl From<SearchPayload> for IssuePage {
    fn from(payload: SearchPayload) -> Self {
        Self {
            total: payload.total,
            issues: payload.issues.into_iter().map(Issue::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct IssuePayload {
    key: String,
    fields: IssueFieldsPayload,
}

#[derive(Debug, Deserialize)]
struct IssueFieldsPayload {
    #[serde(default)]
    summary: String,
    description: Option<String>,
    status: Option<NamedPayload>,
    issuetype: Option<NamedPayload>,
    priority: Option<NamedPayload>,
}

#[derive(Debug, Deserialize)]
struct NamedPayload {
    name: String,
}

impl From<IssuePayload> for Issue {
    fn from(payload: IssuePayload) -> Self {
        let fields = payload.fields;
        Self {
            key: payload.key,
            summary: fields.summary,
            description: fields.description,
            status: fields.status.map(|named| named.name),
            issue_type: fields.issuetype.map(|named| named.name),
            priority: fields.priority.map(|named| named.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ISSUE_FIELDS, SearchBody, SearchPayload, VersionPayload, fix_version_jql};
    use crate::release::domain::{IssuePage, TrackerVersion};
    use serde_json::json;

    #[test]
    fn jql_filters_project_and_fix_version() {
        assert_eq!(
            fix_version_jql("PROJ", "1.0.0"),
            r#"project = "PROJ" AND fixVersion = "1.0.0""#
        );
    }

    #[test]
    fn jql_escapes_quotes() {
        assert_eq!(
            fix_version_jql("PROJ", r#"1.0 "final""#),
            r#"project = "PROJ" AND fixVersion = "1.0 \"final\"""#
        );
    }

    #[test]
    fn search_body_uses_camel_case_limit() {
        let body = SearchBody {
            jql: fix_version_jql("PROJ", "1.0.0"),
            max_results: 1000,
            fields: &ISSUE_FIELDS,
        };

        let value = serde_json::to_value(&body).expect("body should serialize");

        assert_eq!(value["maxResults"], json!(1000));
        assert_eq!(
            value["fields"],
            json!(["summary", "description", "status", "issuetype", "priority"])
        );
    }

    #[test]
    fn decodes_search_results_with_missing_fields() {
        let payload: SearchPayload = serde_json::from_value(json!({
            "startAt": 0,
            "maxResults": 1000,
            "total": 2,
            "issues": [
                {
                    "key": "PROJ-123",
                    "fields": {
                        "summary": "Test ticket",
                        "description": "Steps to reproduce",
                        "status": { "name": "Done" },
                        "issuetype": { "name": "Bug" },
                        "priority": { "name": "High" }
                    }
                },
                {
                    "key": "PROJ-124",
                    "fields": {
                        "summary": "No priority",
                        "description": null,
                        "priority": null
                    }
                }
            ]
        }))
        .expect("payload should decode");

        let page = IssuePage::from(payload);

        assert_eq!(page.total, 2);
        let first = &page.issues[0];
        assert_eq!(first.key, "PROJ-123");
        assert_eq!(first.issue_type.as_deref(), Some("Bug"));
        assert_eq!(first.priority.as_deref(), Some("High"));
        assert_eq!(first.status.as_deref(), Some("Done"));
        let second = &page.issues[1];
        assert!(second.priority.is_none());
        assert!(second.issue_type.is_none());
    }

    #[test]
    fn decodes_version_without_description() {
        let payload: VersionPayload = serde_json::from_value(json!({
            "self": "https://acme.atlassian.net/rest/api/2/version/10000",
            "id": "10000",
            "name": "1.0.0",
            "released": false
        }))
        .expect("payload should decode");

        let version = TrackerVersion::from(payload);

        assert_eq!(version.id.as_str(), "10000");
        assert_eq!(version.name, "1.0.0");
        assert!(version.description.is_none());
    }
}
