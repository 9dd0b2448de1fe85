//! End-to-end release QA workflow.
//!
//! The orchestrator runs a fixed linear pipeline:
//!
//! 1. resolve the release (explicit tag, or the latest release if it is new)
//! 2. create a test plan for the derived version
//! 3. find or create the tracker version and fetch its issues
//! 4. find or create the release section in the project's first suite
//! 5. create one test case per issue and attach them all to the plan
//! 6. find or create the report page and link it to the plan
//!
//! Every failure aborts the run and propagates unchanged. Completed steps
//! are not rolled back.

use super::{
    DocumentationService, IssueTrackerService, ReleaseSourceService, TestManagementService,
    WorkflowResult,
};
use crate::release::{
    domain::{CaseId, PageId, PlanId, Release, map_to_test_case, plan_url},
    ports::{AdapterError, DocumentationHost, IssueTracker, ReleaseSource, TestManagement},
};
use mockable::Clock;
use tracing::{info, warn};

/// Message reported when the latest release is too old to process.
pub const NOT_NEW_MESSAGE: &str = "Release is not new";

/// Summary of a completed workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowReport {
    /// Release version derived from the tag.
    pub version: String,
    /// Test plan created by this run.
    pub test_plan_id: PlanId,
    /// Number of test cases created by this run.
    pub test_cases_count: usize,
    /// Report page linked to the plan.
    pub report_page_id: PageId,
}

/// Result of one workflow run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// Every step completed.
    Completed(WorkflowReport),
    /// The latest release was not new; nothing was changed.
    Skipped {
        /// Tag of the release that was skipped.
        tag: String,
        /// Reason for skipping.
        message: String,
    },
}

impl WorkflowOutcome {
    /// Reports whether the workflow ran to completion.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Composes the four service adapters into the release QA workflow.
pub struct ReleaseOrchestrator<S, T, M, D, C>
where
    S: ReleaseSource,
    T: IssueTracker,
    M: TestManagement,
    D: DocumentationHost,
    C: Clock + Send + Sync,
{
    releases: ReleaseSourceService<S, C>,
    tracker: IssueTrackerService<T>,
    test_management: TestManagementService<M>,
    documentation: DocumentationService<D, C>,
    test_rail_host: String,
}

impl<S, T, M, D, C> ReleaseOrchestrator<S, T, M, D, C>
where
    S: ReleaseSource,
    T: IssueTracker,
    M: TestManagement,
    D: DocumentationHost,
    C: Clock + Send + Sync,
{
    /// Creates an orchestrator. `test_rail_host` is the base URL used to
    /// build the plan link placed on the report page.
    #[must_use]
    pub fn new(
        releases: ReleaseSourceService<S, C>,
        tracker: IssueTrackerService<T>,
        test_management: TestManagementService<M>,
        documentation: DocumentationService<D, C>,
        test_rail_host: impl Into<String>,
    ) -> Self {
        Self {
            releases,
            tracker,
            test_management,
            documentation,
            test_rail_host: test_rail_host.into(),
        }
    }

    /// Runs the workflow for `tag`, or for the latest release when no tag
    /// is given.
    ///
    /// An explicit tag is always processed. The latest release is processed
    /// only when it is new; otherwise [`WorkflowOutcome::Skipped`] is
    /// returned before any remote write.
    ///
    /// # Errors
    ///
    /// Returns the first [`super::WorkflowError`] raised by any step.
    pub async fn run(&self, tag: Option<&str>) -> WorkflowResult<WorkflowOutcome> {
        let release = match tag {
            Some(explicit) => self.releases.by_tag(explicit).await?,
            None => {
                let latest = self.releases.latest().await?;
                if !self.releases.is_new(&latest) {
                    warn!(tag = latest.tag(), "latest release is not new, skipping");
                    return Ok(WorkflowOutcome::Skipped {
                        tag: latest.tag().to_owned(),
                        message: NOT_NEW_MESSAGE.to_owned(),
                    });
                }
                latest
            }
        };

        let report = self.process(&release).await?;
        info!(
            version = %report.version,
            test_plan_id = %report.test_plan_id,
            test_cases = report.test_cases_count,
            report_page_id = %report.report_page_id,
            "release QA workflow completed"
        );
        Ok(WorkflowOutcome::Completed(report))
    }

    async fn process(&self, release: &Release) -> WorkflowResult<WorkflowReport> {
        let version = release.version();
        info!(tag = release.tag(), version, "processing release");

        let plan = self.test_management.create_plan(version, None).await?;
        info!(plan_id = %plan.id, "created test plan");

        let tracker_version = self.tracker.find_or_create_version(version, None).await?;
        info!(
            created = tracker_version.was_created(),
            "tracker version ready"
        );
        let issues = self.tracker.issues_for_version(version).await?;
        info!(count = issues.len(), "fetched issues for version");

        let suite = self
            .test_management
            .list_suites()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AdapterError::not_found("test suite"))?;
        let section_outcome = self
            .test_management
            .find_or_create_section(suite.id, version)
            .await?;
        info!(
            suite_id = %suite.id,
            created = section_outcome.was_created(),
            "test section ready"
        );
        let section = section_outcome.into_inner();

        let mut case_ids: Vec<CaseId> = Vec::with_capacity(issues.len());
        for issue in &issues {
            let draft = map_to_test_case(issue);
            let case = self
                .test_management
                .create_case(section.id, &draft.title, draft.fields)
                .await?;
            case_ids.push(case.id);
        }
        let test_cases_count = case_ids.len();
        info!(count = test_cases_count, "created test cases");

        if case_ids.is_empty() {
            warn!(plan_id = %plan.id, "no issues for release, plan left without cases");
        } else {
            self.test_management
                .add_cases_to_plan(plan.id, suite.id, case_ids)
                .await?;
        }

        let page = self
            .documentation
            .find_or_create_report_page(version, None)
            .await?
            .into_inner();
        self.documentation
            .patch_test_rail_link(&page.id, &plan_url(&self.test_rail_host, plan.id))
            .await?;
        info!(page_id = %page.id, "report page linked to test plan");

        Ok(WorkflowReport {
            version: version.to_owned(),
            test_plan_id: plan.id,
            test_cases_count,
            report_page_id: page.id,
        })
    }
}
