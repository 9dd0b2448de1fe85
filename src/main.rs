//! Command-line entry point for qa-release.
//!
//! Usage:
//!
//! ```text
//! qa-release [--tag <TAG>] [--interval-minutes <N>] [--verbose]
//! ```
//!
//! Without `--tag` the latest release is processed when it is less than a
//! day old. With `--interval-minutes 0` (the default) the workflow runs
//! once; a positive interval re-checks the latest release on every tick
//! until interrupted. Exit status is 0 on success or skip, 1 when the
//! workflow fails and 2 when configuration is incomplete.

use clap::Parser;
use mockable::DefaultClock;
use qa_release::config::Config;
use qa_release::logging::init_tracing;
use qa_release::release::{
    adapters::http::{
        ConfluenceDocumentationHost, GitHubReleaseSource, JiraIssueTracker,
        TestRailTestManagement,
    },
    ports::AdapterResult,
    services::{
        DocumentationService, IssueTrackerService, ReleaseOrchestrator, ReleaseSourceService,
        TestManagementService, WorkflowOutcome,
    },
};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

const EXIT_CONFIGURATION: u8 = 2;

type HttpOrchestrator = ReleaseOrchestrator<
    GitHubReleaseSource,
    JiraIssueTracker,
    TestRailTestManagement,
    ConfluenceDocumentationHost,
    DefaultClock,
>;

/// Automates the QA checklist for a release.
#[derive(Debug, Parser)]
#[command(name = "qa-release", version, about)]
struct Cli {
    /// Process this release tag instead of the latest release.
    #[arg(long, env = "RELEASE_TAG")]
    tag: Option<String>,

    /// Minutes between checks of the latest release; 0 runs once.
    #[arg(long, env = "CHECK_INTERVAL_MINUTES", default_value_t = 0)]
    interval_minutes: u64,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if init_tracing(cli.verbose).is_err() {
        return ExitCode::FAILURE;
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "configuration error");
            return ExitCode::from(EXIT_CONFIGURATION);
        }
    };
    let orchestrator = match build_orchestrator(&config) {
        Ok(orchestrator) => orchestrator,
        Err(err) => {
            error!(%err, "failed to initialise service clients");
            return ExitCode::FAILURE;
        }
    };

    match (cli.tag.as_deref(), cli.interval_minutes) {
        (Some(tag), interval) => {
            if interval > 0 {
                warn!(tag, "explicit tag given, ignoring the check interval");
            }
            exit_code(run_once(&orchestrator, Some(tag)).await)
        }
        (None, 0) => exit_code(run_once(&orchestrator, None).await),
        (None, minutes) => run_periodically(&orchestrator, minutes).await,
    }
}

fn build_orchestrator(config: &Config) -> AdapterResult<HttpOrchestrator> {
    let clock = Arc::new(DefaultClock);
    Ok(ReleaseOrchestrator::new(
        ReleaseSourceService::new(
            Arc::new(GitHubReleaseSource::new(config.github.clone())?),
            Arc::clone(&clock),
        ),
        IssueTrackerService::new(Arc::new(JiraIssueTracker::new(config.jira.clone())?)),
        TestManagementService::new(Arc::new(TestRailTestManagement::new(
            config.test_rail.clone(),
        )?)),
        DocumentationService::new(
            Arc::new(ConfluenceDocumentationHost::new(config.confluence.clone())?),
            clock,
        ),
        config.test_rail.host.clone(),
    ))
}

/// Runs the workflow once and logs the outcome. Returns `false` on failure.
async fn run_once(orchestrator: &HttpOrchestrator, tag: Option<&str>) -> bool {
    match orchestrator.run(tag).await {
        Ok(WorkflowOutcome::Completed(report)) => {
            info!(
                version = %report.version,
                test_plan_id = %report.test_plan_id,
                test_cases = report.test_cases_count,
                report_page_id = %report.report_page_id,
                "release processed"
            );
            true
        }
        Ok(WorkflowOutcome::Skipped { tag: skipped, message }) => {
            info!(tag = %skipped, %message, "release skipped");
            true
        }
        Err(err) => {
            error!(%err, "release workflow failed");
            false
        }
    }
}

async fn run_periodically(orchestrator: &HttpOrchestrator, minutes: u64) -> ExitCode {
    let mut ticker = tokio::time::interval(Duration::from_secs(minutes.saturating_mul(60)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(interval_minutes = minutes, "checking for new releases periodically");
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if !run_once(orchestrator, None).await {
                    warn!("waiting for the next scheduled check");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted, stopping periodic checks");
                return ExitCode::SUCCESS;
            }
        }
    }
}

const fn exit_code(succeeded: bool) -> ExitCode {
    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
