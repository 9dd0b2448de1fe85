//! Process configuration.
//!
//! [`Config`] is built once at start-up and handed to each adapter's
//! constructor. Nothing reads the environment after loading.

use std::fmt;
use thiserror::Error;

const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Required variables are unset or blank.
    #[error("missing required configuration: {}", .0.join(", "))]
    Missing(Vec<String>),

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {var}: {reason}")]
    Invalid {
        /// Variable name.
        var: String,
        /// Parse failure.
        reason: String,
    },
}

/// Credential that is never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wraps a credential.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the credential for use in an outgoing request.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret([REDACTED])")
    }
}

/// Source-control host settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubConfig {
    /// API base URL.
    pub api_url: String,
    /// Access token.
    pub token: Secret,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
}

/// Issue tracker settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraConfig {
    /// Tracker base URL.
    pub host: String,
    /// Account e-mail used for basic authentication.
    pub email: String,
    /// API token.
    pub api_token: Secret,
    /// Project key.
    pub project_key: String,
}

/// Test case manager settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRailConfig {
    /// Test case manager base URL, also used for plan links.
    pub host: String,
    /// User name.
    pub username: String,
    /// API key.
    pub api_key: Secret,
    /// Project identifier.
    pub project_id: u64,
}

/// Documentation wiki settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfluenceConfig {
    /// Wiki base URL.
    pub host: String,
    /// User name.
    pub username: String,
    /// API token.
    pub api_token: Secret,
    /// Space key report pages are created in.
    pub space_key: String,
    /// Parent page for new report pages.
    pub parent_page_id: String,
}

/// Complete process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Source-control host.
    pub github: GitHubConfig,
    /// Issue tracker.
    pub jira: JiraConfig,
    /// Test case manager.
    pub test_rail: TestRailConfig,
    /// Documentation wiki.
    pub confluence: ConfluenceConfig,
}

impl Config {
    /// Loads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] listing every unset variable, or
    /// [`ConfigError::Invalid`] for unparsable values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] listing every unset variable, or
    /// [`ConfigError::Invalid`] for unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut vars = Vars {
            lookup: &lookup,
            missing: Vec::new(),
        };

        let github_api_url = lookup("GITHUB_API_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_owned());
        let github_token = vars.required("GITHUB_TOKEN");
        let github_owner = vars.required("GITHUB_OWNER");
        let github_repo = vars.required("GITHUB_REPO");
        let jira_host = vars.required("JIRA_HOST");
        let jira_email = vars.required("JIRA_EMAIL");
        let jira_api_token = vars.required("JIRA_API_TOKEN");
        let jira_project_key = vars.required("JIRA_PROJECT_KEY");
        let test_rail_host = vars.required("TESTRAIL_HOST");
        let test_rail_username = vars.required("TESTRAIL_USERNAME");
        let test_rail_api_key = vars.required("TESTRAIL_API_KEY");
        let test_rail_project_id = vars.required("TESTRAIL_PROJECT_ID");
        let confluence_host = vars.required("CONFLUENCE_HOST");
        let confluence_username = vars.required("CONFLUENCE_USERNAME");
        let confluence_api_token = vars.required("CONFLUENCE_API_TOKEN");
        let confluence_space_key = vars.required("CONFLUENCE_SPACE_KEY");
        let confluence_parent_page_id = vars.required("CONFLUENCE_PARENT_PAGE_ID");

        if !vars.missing.is_empty() {
            return Err(ConfigError::Missing(vars.missing));
        }

        let project_id =
            test_rail_project_id
                .parse::<u64>()
                .map_err(|err| ConfigError::Invalid {
                    var: "TESTRAIL_PROJECT_ID".to_owned(),
                    reason: err.to_string(),
                })?;

        Ok(Self {
            github: GitHubConfig {
                api_url: trim_host(&github_api_url),
                token: Secret::new(github_token),
                owner: github_owner,
                repo: github_repo,
            },
            jira: JiraConfig {
                host: trim_host(&jira_host),
                email: jira_email,
                api_token: Secret::new(jira_api_token),
                project_key: jira_project_key,
            },
            test_rail: TestRailConfig {
                host: trim_host(&test_rail_host),
                username: test_rail_username,
                api_key: Secret::new(test_rail_api_key),
                project_id,
            },
            confluence: ConfluenceConfig {
                host: trim_host(&confluence_host),
                username: confluence_username,
                api_token: Secret::new(confluence_api_token),
                space_key: confluence_space_key,
                parent_page_id: confluence_parent_page_id,
            },
        })
    }
}

struct Vars<'a, F>
where
    F: Fn(&str) -> Option<String>,
{
    lookup: &'a F,
    missing: Vec<String>,
}

impl<F> Vars<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Returns the trimmed value, recording the name when unset or blank.
    fn required(&mut self, name: &str) -> String {
        match (self.lookup)(name) {
            Some(value) if !value.trim().is_empty() => value.trim().to_owned(),
            _ => {
                self.missing.push(name.to_owned());
                String::new()
            }
        }
    }
}

fn trim_host(host: &str) -> String {
    host.trim_end_matches('/').to_owned()
}
