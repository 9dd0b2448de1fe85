//! TestRail API v2 client.

use super::HttpClient;
use crate::config::TestRailConfig;
use crate::release::{
    domain::{
        CaseId, NewTestCase, NewTestPlan, PlanEntry, PlanId, Section, SectionId, SuiteId,
        TestCase, TestPlan, TestSuite,
    },
    ports::{AdapterResult, ServiceName, TestManagement},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Test case manager backed by one TestRail project.
#[derive(Debug, Clone)]
pub struct TestRailTestManagement {
    http: HttpClient,
    config: TestRailConfig,
}

impl TestRailTestManagement {
    /// Creates a client for the configured project.
    ///
    /// # Errors
    ///
    /// Returns an upstream error when the HTTP client cannot be built.
    pub fn new(config: TestRailConfig) -> AdapterResult<Self> {
        Ok(Self {
            http: HttpClient::new(ServiceName::TestManagement)?,
            config,
        })
    }

    fn get(&self, endpoint: &str) -> reqwest::RequestBuilder {
        self.authorise(self.http.client().get(api_url(&self.config.host, endpoint)))
    }

    fn post(&self, endpoint: &str, body: &impl Serialize) -> reqwest::RequestBuilder {
        self.authorise(self.http.client().post(api_url(&self.config.host, endpoint)))
            .json(body)
    }

    fn authorise(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.basic_auth(&self.config.username, Some(self.config.api_key.expose()))
    }
}

/// Returns the URL of a TestRail API v2 endpoint.
///
/// TestRail routes through the query string, so the endpoint is appended
/// verbatim after `index.php?/api/v2/`.
fn api_url(host: &str, endpoint: &str) -> String {
    format!("{}/index.php?/api/v2/{endpoint}", host.trim_end_matches('/'))
}

#[async_trait]
impl TestManagement for TestRailTestManagement {
    async fn create_plan(&self, plan: &NewTestPlan) -> AdapterResult<TestPlan> {
        let body = PlanBody {
            name: &plan.name,
            description: &plan.description,
        };
        let request = self.post(&format!("add_plan/{}", self.config.project_id), &body);
        let payload: PlanPayload = self.http.send_json(request).await?;
        Ok(payload.into())
    }

    async fn list_suites(&self) -> AdapterResult<Vec<TestSuite>> {
        let request = self.get(&format!("get_suites/{}", self.config.project_id));
        let payload: Vec<SuitePayload> = self.http.send_json(request).await?;
        Ok(payload.into_iter().map(TestSuite::from).collect())
    }

    async fn list_sections(&self, suite_id: SuiteId) -> AdapterResult<Vec<Section>> {
        let request = self.get(&format!(
            "get_sections/{}&suite_id={suite_id}",
            self.config.project_id
        ));
        let payload: SectionsPayload = self.http.send_json(request).await?;
        Ok(payload
            .into_sections()
            .into_iter()
            .map(|section| section.into_section(suite_id))
            .collect())
    }

    async fn create_section(&self, suite_id: SuiteId, name: &str) -> AdapterResult<Section> {
        let body = SectionBody { suite_id, name };
        let request = self.post(&format!("add_section/{}", self.config.project_id), &body);
        let payload: SectionPayload = self.http.send_json(request).await?;
        Ok(payload.into_section(suite_id))
    }

    async fn create_case(
        &self,
        section_id: SectionId,
        case: &NewTestCase,
    ) -> AdapterResult<TestCase> {
        let body = CaseBody::from(case);
        let request = self.post(&format!("add_case/{section_id}"), &body);
        let payload: CasePayload = self.http.send_json(request).await?;
        Ok(TestCase {
            id: payload.id,
            section_id: payload.section_id.unwrap_or(section_id),
            title: payload.title,
        })
    }

    async fn add_plan_entry(&self, plan_id: PlanId, entry: &PlanEntry) -> AdapterResult<()> {
        let body = PlanEntryBody {
            suite_id: entry.suite_id,
            include_all: false,
            case_ids: &entry.case_ids,
        };
        let request = self.post(&format!("add_plan_entry/{plan_id}"), &body);
        self.http.send(request).await?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct PlanBody<'a> {
    name: &'a str,
    description: &'a str,
}

#[derive(Debug, Serialize)]
struct SectionBody<'a> {
    suite_id: SuiteId,
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct CaseBody<'a> {
    title: &'a str,
    type_id: u32,
    priority_id: u32,
    estimate: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    refs: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_jira_ticket: Option<&'a str>,
}

impl<'a> From<&'a NewTestCase> for CaseBody<'a> {
    fn from(case: &'a NewTestCase) -> Self {
        Self {
            title: &case.title,
            type_id: case.type_id,
            priority_id: case.priority_id,
            estimate: &case.estimate,
            refs: case.refs.as_deref(),
            custom_jira_ticket: case.jira_ticket.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PlanEntryBody<'a> {
    suite_id: SuiteId,
    include_all: bool,
    case_ids: &'a [CaseId],
}

#[derive(Debug, Deserialize)]
struct PlanPayload {
    id: PlanId,
    name: String,
    description: Option<String>,
}

impl From<PlanPayload> for TestPlan {
    fn from(payload: PlanPayload) -> Self {
        Self {
            id: payload.id,
            name: payload.name,
            description: payload.description,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SuitePayload {
    id: SuiteId,
    name: String,
}

impl From<SuitePayload> for TestSuite {
    fn from(payload: SuitePayload) -> Self {
        Self {
            id: payload.id,
            name: payload.name,
        }
    }
}

/// `get_sections` returns a bare array on older servers and a paginated
/// object on newer ones.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SectionsPayload {
    Bare(Vec<SectionPayload>),
    Paginated { sections: Vec<SectionPayload> },
}

impl SectionsPayload {
    fn into_sections(self) -> Vec<SectionPayload> {
        match self {
            Self::Bare(sections) | Self::Paginated { sections } => sections,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SectionPayload {
    id: SectionId,
    suite_id: Option<SuiteId>,
    name: String,
}

impl SectionPayload {
    fn into_section(self, requested_suite: SuiteId) -> Section {
        Section {
            id: self.id,
            suite_id: self.suite_id.unwrap_or(requested_suite),
            name: self.name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CasePayload {
    id: CaseId,
    section_id: Option<SectionId>,
    title: String,
}
