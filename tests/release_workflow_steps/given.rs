//! Given steps for release workflow BDD scenarios.

use super::world::ReleaseWorld;
use chrono::{TimeDelta, Utc};
use eyre::WrapErr;
use qa_release::release::domain::{Issue, Release};
use rstest_bdd_macros::given;

#[given(r#"a release "{tag}" published {hours:i64} hours ago"#)]
fn release_published(
    world: &mut ReleaseWorld,
    tag: String,
    hours: i64,
) -> Result<(), eyre::Report> {
    let created_at = Utc::now() - TimeDelta::hours(hours);
    world
        .releases
        .publish(Release::new(tag, created_at).with_published_at(created_at))
        .wrap_err("publish release")
}

#[given(
    r#"issue "{key}" titled "{summary}" of type "{issue_type}" with priority "{priority}" is fixed in "{version}""#
)]
#[expect(
    clippy::too_many_arguments,
    reason = "Step definition captures multiple issue fields from a single step"
)]
fn issue_fixed_in(
    world: &mut ReleaseWorld,
    key: String,
    summary: String,
    issue_type: String,
    priority: String,
    version: String,
) -> Result<(), eyre::Report> {
    let issue = Issue::new(key, summary)
        .with_issue_type(issue_type)
        .with_priority(priority);
    world
        .tracker
        .file_issue(version, issue)
        .wrap_err("file issue against version")
}
