//! Source-control release snapshots and the "new release" policy.

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Age, in hours, up to which the latest release counts as new.
pub const FRESHNESS_WINDOW_HOURS: i64 = 24;

/// Immutable snapshot of a release published by the source-control host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    tag: String,
    body: String,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl Release {
    /// Creates a release snapshot.
    #[must_use]
    pub fn new(tag: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            tag: tag.into(),
            body: String::new(),
            published_at: None,
            created_at,
        }
    }

    /// Sets the release notes.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the publication timestamp.
    #[must_use]
    pub const fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    /// Returns the release tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the version string derived from the tag.
    #[must_use]
    pub fn version(&self) -> &str {
        extract_version(&self.tag)
    }

    /// Returns the release notes.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns when the release was published, if it has been.
    #[must_use]
    pub const fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }

    /// Returns when the release was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Derives a version string from a release tag.
///
/// Strips exactly one leading lowercase `v`; any other tag is returned
/// unchanged.
///
/// ```
/// use qa_release::release::domain::extract_version;
///
/// assert_eq!(extract_version("v1.2.3"), "1.2.3");
/// assert_eq!(extract_version("1.2.3"), "1.2.3");
/// ```
#[must_use]
pub fn extract_version(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

/// Reports whether a release was created within the freshness window.
///
/// The window is inclusive: a release exactly 24 hours old is still new.
/// Clock skew is not compensated, so a creation time in the future counts
/// as new.
#[must_use]
pub fn is_new(release: &Release, clock: &impl Clock) -> bool {
    clock.utc() - release.created_at() <= TimeDelta::hours(FRESHNESS_WINDOW_HOURS)
}
