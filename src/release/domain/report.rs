//! QA report pages published to the documentation wiki.

use super::{PageId, ReleaseDomainError};
use minijinja::{Environment, context};
use serde::{Deserialize, Serialize};

/// Placeholder anchor that is replaced with the test plan link.
pub const PLACEHOLDER_LINK: &str = r##"<a href="#">Link to TestRail Plan</a>"##;

const REPORT_TEMPLATE: &str = r##"<h1>Release {{ version }} - QA Report</h1>
<p><strong>Date:</strong> {{ date }}</p>
<h2>Pre-Release Regression</h2>
<p><strong>Status:</strong> Pending</p>
<h2>TestRail Plan</h2>
<p><a href="#">Link to TestRail Plan</a></p>
<p><strong>Status:</strong> Pending</p>
<h2>Post-Release Smoke Results</h2>
<p><strong>Status:</strong> Pending</p>
<h2>Issues Found</h2>
<p><strong>Status:</strong> Pending</p>
<h2>Sign-off</h2>
<p><strong>Status:</strong> Pending</p>
"##;

/// Wiki page summarising QA status for one release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPage {
    /// Page identifier.
    pub id: PageId,
    /// Page title.
    pub title: String,
    /// Page body in wiki storage format. Empty when not fetched.
    pub body: String,
    /// Page version counter.
    pub version: u32,
}

impl ReportPage {
    /// Returns a copy with the placeholder link replaced by a link to
    /// `url` and the version counter advanced by one.
    ///
    /// The second value reports whether the placeholder was present. The
    /// copy is returned either way so callers decide whether to persist it.
    #[must_use]
    pub fn with_plan_link(&self, url: &str) -> (Self, bool) {
        let found = self.body.contains(PLACEHOLDER_LINK);
        let patched = Self {
            id: self.id.clone(),
            title: self.title.clone(),
            body: self.body.replace(PLACEHOLDER_LINK, &linked_anchor(url)),
            version: self.version.saturating_add(1),
        };
        (patched, found)
    }
}

/// Payload for creating a report page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReportPage {
    /// Page title.
    pub title: String,
    /// Page body in wiki storage format.
    pub body: String,
}

/// Returns the report page title used for a release version.
#[must_use]
pub fn report_title(version: &str) -> String {
    format!("Release {version} - QA Report")
}

/// Returns the anchor tag linking to the test plan at `url`.
#[must_use]
pub fn linked_anchor(url: &str) -> String {
    format!(r#"<a href="{url}">Link to TestRail Plan</a>"#)
}

/// Renders the report page body for a release.
///
/// # Errors
///
/// Returns [`ReleaseDomainError::TemplateRender`] when the template engine
/// rejects the input.
pub fn render_report_body(version: &str, date: &str) -> Result<String, ReleaseDomainError> {
    let environment = Environment::new();
    environment
        .render_str(REPORT_TEMPLATE, context! { version => version, date => date })
        .map_err(|error| ReleaseDomainError::TemplateRender {
            version: version.to_owned(),
            reason: error.to_string(),
        })
}
