//! When steps for release workflow BDD scenarios.

use super::world::{ReleaseWorld, run_async};
use rstest_bdd_macros::when;

#[when("the latest release is checked")]
fn check_latest_release(world: &mut ReleaseWorld) {
    let result = run_async(world.orchestrator.run(None));
    world.runs.push(result);
}

#[when(r#"release "{tag}" is processed explicitly"#)]
#[expect(
    clippy::needless_pass_by_value,
    reason = "Step placeholders are captured as owned strings"
)]
fn process_explicit_tag(world: &mut ReleaseWorld, tag: String) {
    let result = run_async(world.orchestrator.run(Some(&tag)));
    world.runs.push(result);
}
