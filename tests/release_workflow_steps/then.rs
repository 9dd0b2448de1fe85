//! Then steps for release workflow BDD scenarios.

use super::world::{ReleaseWorld, TEST_RAIL_HOST};
use qa_release::release::{
    domain::{plan_url, report_title},
    services::WorkflowOutcome,
};
use rstest_bdd_macros::then;

#[then(r#"a test plan named "{name}" exists"#)]
#[expect(
    clippy::needless_pass_by_value,
    reason = "Step placeholders are captured as owned strings"
)]
fn plan_exists(world: &ReleaseWorld, name: String) -> Result<(), eyre::Report> {
    let plans = world
        .test_management
        .plans()
        .map_err(|err| eyre::eyre!("read plans: {err}"))?;
    if !plans.iter().any(|plan| plan.name == name) {
        return Err(eyre::eyre!("expected plan {name}, found {plans:?}"));
    }
    Ok(())
}

#[then("the test case count is {count:usize}")]
fn plan_holds_cases(world: &ReleaseWorld, count: usize) -> Result<(), eyre::Report> {
    let outcome = world
        .first_run()?
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected workflow failure: {err}"))?;
    let WorkflowOutcome::Completed(report) = outcome else {
        return Err(eyre::eyre!("expected a completed run, found {outcome:?}"));
    };
    if report.test_cases_count != count {
        return Err(eyre::eyre!(
            "expected {count} test cases, found {}",
            report.test_cases_count
        ));
    }
    let entries = world
        .test_management
        .plan_entries()
        .map_err(|err| eyre::eyre!("read plan entries: {err}"))?;
    let attached: usize = entries
        .iter()
        .filter(|(plan_id, _)| *plan_id == report.test_plan_id)
        .map(|(_, entry)| entry.case_ids.len())
        .sum();
    if attached != count {
        return Err(eyre::eyre!("expected {count} cases on the plan, found {attached}"));
    }
    Ok(())
}

#[then(r#"the report page "{title}" links to the test plan"#)]
#[expect(
    clippy::needless_pass_by_value,
    reason = "Step placeholders are captured as owned strings"
)]
fn report_links_plan(world: &ReleaseWorld, title: String) -> Result<(), eyre::Report> {
    let outcome = world
        .first_run()?
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected workflow failure: {err}"))?;
    let WorkflowOutcome::Completed(report) = outcome else {
        return Err(eyre::eyre!("expected a completed run, found {outcome:?}"));
    };
    if title != report_title(&report.version) {
        return Err(eyre::eyre!("unexpected report title {title}"));
    }
    let pages = world
        .wiki
        .pages()
        .map_err(|err| eyre::eyre!("read pages: {err}"))?;
    let page = pages
        .iter()
        .find(|page| page.title == title)
        .ok_or_else(|| eyre::eyre!("missing report page {title}"))?;
    let link = plan_url(TEST_RAIL_HOST, report.test_plan_id);
    if !page.body.contains(&format!(r#"<a href="{link}">"#)) {
        return Err(eyre::eyre!("report page does not link to {link}"));
    }
    Ok(())
}

#[then(r#"the run is skipped with message "{message}""#)]
#[expect(
    clippy::needless_pass_by_value,
    reason = "Step placeholders are captured as owned strings"
)]
fn run_skipped(world: &ReleaseWorld, message: String) -> Result<(), eyre::Report> {
    match world.first_run()? {
        Ok(WorkflowOutcome::Skipped {
            message: actual, ..
        }) if *actual == message => Ok(()),
        other => Err(eyre::eyre!("expected skip with {message}, found {other:?}")),
    }
}

#[then("no test plan was created")]
fn no_plan_created(world: &ReleaseWorld) -> Result<(), eyre::Report> {
    let plans = world
        .test_management
        .plans()
        .map_err(|err| eyre::eyre!("read plans: {err}"))?;
    if !plans.is_empty() {
        return Err(eyre::eyre!("expected no plans, found {}", plans.len()));
    }
    Ok(())
}

#[then("{count:usize} test plans exist")]
fn plan_count(world: &ReleaseWorld, count: usize) -> Result<(), eyre::Report> {
    let plans = world
        .test_management
        .plans()
        .map_err(|err| eyre::eyre!("read plans: {err}"))?;
    if plans.len() != count {
        return Err(eyre::eyre!("expected {count} plans, found {}", plans.len()));
    }
    Ok(())
}

#[then("{count:usize} test section exists")]
fn section_count(world: &ReleaseWorld, count: usize) -> Result<(), eyre::Report> {
    let sections = world
        .test_management
        .sections()
        .map_err(|err| eyre::eyre!("read sections: {err}"))?;
    if sections.len() != count {
        return Err(eyre::eyre!(
            "expected {count} sections, found {}",
            sections.len()
        ));
    }
    Ok(())
}

#[then("{count:usize} report page exists")]
fn page_count(world: &ReleaseWorld, count: usize) -> Result<(), eyre::Report> {
    let pages = world
        .wiki
        .pages()
        .map_err(|err| eyre::eyre!("read pages: {err}"))?;
    if pages.len() != count {
        return Err(eyre::eyre!("expected {count} pages, found {}", pages.len()));
    }
    Ok(())
}
