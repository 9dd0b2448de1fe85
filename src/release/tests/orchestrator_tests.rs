//! End-to-end orchestrator tests against mocked ports.

use super::support::{
    FixedClock, MockManager, MockSource, MockTracker, MockWiki, bug_ticket, now, release_aged,
};
use crate::release::{
    domain::{
        CaseId, IssuePage, PLACEHOLDER_LINK, PageId, PlanId, ReportPage, Section, SectionId,
        SuiteId, TestCase, TestPlan, TestSuite, TrackerVersion, TrackerVersionId,
    },
    ports::{AdapterError, ServiceName},
    services::{
        DocumentationService, IssueTrackerService, NOT_NEW_MESSAGE, ReleaseOrchestrator,
        ReleaseSourceService, TestManagementService, WorkflowError, WorkflowOutcome,
        WorkflowReport,
    },
};
use std::sync::Arc;

const TEST_RAIL_HOST: &str = "https://acme.testrail.io";
const PLAN_LINK: &str = "https://acme.testrail.io/index.php?/plans/view/123";

type MockOrchestrator =
    ReleaseOrchestrator<MockSource, MockTracker, MockManager, MockWiki, FixedClock>;

fn orchestrator(
    source: MockSource,
    tracker: MockTracker,
    manager: MockManager,
    wiki: MockWiki,
) -> MockOrchestrator {
    let clock = Arc::new(FixedClock::at(now()));
    ReleaseOrchestrator::new(
        ReleaseSourceService::new(Arc::new(source), Arc::clone(&clock)),
        IssueTrackerService::new(Arc::new(tracker)),
        TestManagementService::new(Arc::new(manager)),
        DocumentationService::new(Arc::new(wiki), clock),
        TEST_RAIL_HOST,
    )
}

fn tracker_with_one_bug() -> MockTracker {
    let mut tracker = MockTracker::new();
    tracker.expect_list_versions().returning(|| Ok(Vec::new()));
    tracker.expect_create_version().times(1).returning(|version| {
        Ok(TrackerVersion {
            id: TrackerVersionId::new("10000"),
            name: version.name.clone(),
            description: Some(version.description.clone()),
        })
    });
    tracker
        .expect_search_issues()
        .withf(|version, _| version == "1.0.0")
        .returning(|_, _| {
            Ok(IssuePage {
                issues: vec![bug_ticket()],
                total: 1,
            })
        });
    tracker
}

fn manager_with_plan_and_suite() -> MockManager {
    let mut manager = MockManager::new();
    manager
        .expect_create_plan()
        .withf(|plan| plan.name == "Release 1.0.0 Test Plan")
        .times(1)
        .returning(|plan| {
            Ok(TestPlan {
                id: PlanId::new(123),
                name: plan.name.clone(),
                description: Some(plan.description.clone()),
            })
        });
    manager.expect_list_suites().returning(|| {
        Ok(vec![TestSuite {
            id: SuiteId::new(456),
            name: "Master".to_owned(),
        }])
    });
    manager.expect_list_sections().returning(|_| Ok(Vec::new()));
    manager
        .expect_create_section()
        .withf(|suite, name| *suite == SuiteId::new(456) && name == "Release 1.0.0")
        .times(1)
        .returning(|suite, name| {
            Ok(Section {
                id: SectionId::new(789),
                suite_id: suite,
                name: name.to_owned(),
            })
        });
    manager
}

fn wiki_with_fresh_page() -> MockWiki {
    let mut wiki = MockWiki::new();
    wiki.expect_search_pages().returning(|_| Ok(Vec::new()));
    wiki.expect_create_page().times(1).returning(|page| {
        Ok(ReportPage {
            id: PageId::new("404"),
            title: page.title.clone(),
            body: page.body.clone(),
            version: 1,
        })
    });
    wiki.expect_get_page().returning(|id| {
        Ok(ReportPage {
            id: id.clone(),
            title: "Release 1.0.0 - QA Report".to_owned(),
            body: format!("<p>{PLACEHOLDER_LINK}</p>"),
            version: 1,
        })
    });
    wiki.expect_update_page()
        .withf(|page| {
            page.id.as_str() == "404"
                && page.version == 2
                && page.body.contains(&format!(r#"<a href="{PLAN_LINK}">"#))
        })
        .times(1)
        .returning(|page| Ok(page.clone()));
    wiki
}

fn manager_with_one_case() -> MockManager {
    let mut manager = manager_with_plan_and_suite();
    manager
        .expect_create_case()
        .withf(|section, case| {
            *section == SectionId::new(789)
                && case.title == "PROJ-123 - Test ticket"
                && case.type_id == 1
                && case.priority_id == 2
        })
        .times(1)
        .returning(|section, case| {
            Ok(TestCase {
                id: CaseId::new(101),
                section_id: section,
                title: case.title.clone(),
            })
        });
    manager
        .expect_add_plan_entry()
        .withf(|plan, entry| {
            *plan == PlanId::new(123)
                && entry.suite_id == SuiteId::new(456)
                && entry.case_ids == [CaseId::new(101)]
        })
        .times(1)
        .returning(|_, _| Ok(()));
    manager
}

fn completed_release_one() -> WorkflowOutcome {
    WorkflowOutcome::Completed(WorkflowReport {
        version: "1.0.0".to_owned(),
        test_plan_id: PlanId::new(123),
        test_cases_count: 1,
        report_page_id: PageId::new("404"),
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn new_release_runs_every_step() {
    let mut source = MockSource::new();
    source
        .expect_latest_release()
        .times(1)
        .returning(|| Ok(release_aged("v1.0.0", 1)));

    let outcome = orchestrator(
        source,
        tracker_with_one_bug(),
        manager_with_one_case(),
        wiki_with_fresh_page(),
    )
    .run(None)
    .await
    .expect("workflow should complete");

    assert_eq!(outcome, completed_release_one());
    assert!(outcome.is_success());
}

#[tokio::test(flavor = "multi_thread")]
async fn explicit_tag_yields_same_result_without_latest_lookup() {
    let mut source = MockSource::new();
    source.expect_latest_release().never();
    source
        .expect_release_by_tag()
        .withf(|tag| tag == "v1.0.0")
        .times(1)
        .returning(|_| Ok(release_aged("v1.0.0", 48)));

    let outcome = orchestrator(
        source,
        tracker_with_one_bug(),
        manager_with_one_case(),
        wiki_with_fresh_page(),
    )
    .run(Some("v1.0.0"))
    .await
    .expect("workflow should complete");

    assert_eq!(outcome, completed_release_one());
}

#[tokio::test(flavor = "multi_thread")]
async fn stale_latest_release_is_skipped_without_writes() {
    let mut source = MockSource::new();
    source
        .expect_latest_release()
        .returning(|| Ok(release_aged("v0.9.0", 25)));
    let mut tracker = MockTracker::new();
    tracker.expect_create_version().never();
    let mut manager = MockManager::new();
    manager.expect_create_plan().never();
    manager.expect_create_section().never();
    manager.expect_create_case().never();
    let mut wiki = MockWiki::new();
    wiki.expect_create_page().never();
    wiki.expect_update_page().never();

    let outcome = orchestrator(source, tracker, manager, wiki)
        .run(None)
        .await
        .expect("skip is not a failure");

    assert_eq!(
        outcome,
        WorkflowOutcome::Skipped {
            tag: "v0.9.0".to_owned(),
            message: NOT_NEW_MESSAGE.to_owned(),
        }
    );
    assert!(!outcome.is_success());
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_explicit_tag_fails_before_writes() {
    let mut source = MockSource::new();
    source.expect_latest_release().never();
    source
        .expect_release_by_tag()
        .withf(|tag| tag == "v9.9.9")
        .returning(|tag| Err(AdapterError::not_found(format!("release tag {tag}"))));
    let mut manager = MockManager::new();
    manager.expect_create_plan().never();

    let result = orchestrator(source, MockTracker::new(), manager, MockWiki::new())
        .run(Some("v9.9.9"))
        .await;

    assert_eq!(
        result,
        Err(WorkflowError::Adapter(AdapterError::not_found(
            "release tag v9.9.9"
        )))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn case_creation_failure_aborts_remaining_steps() {
    let mut source = MockSource::new();
    source
        .expect_latest_release()
        .returning(|| Ok(release_aged("v1.0.0", 2)));
    let mut manager = manager_with_plan_and_suite();
    manager.expect_create_case().times(1).returning(|_, _| {
        Err(AdapterError::upstream(
            ServiceName::TestManagement,
            "400 Bad Request: field type_id is invalid",
        ))
    });
    manager.expect_add_plan_entry().never();
    let mut wiki = MockWiki::new();
    wiki.expect_search_pages().never();
    wiki.expect_create_page().never();

    let result = orchestrator(source, tracker_with_one_bug(), manager, wiki)
        .run(None)
        .await;

    assert_eq!(
        result,
        Err(WorkflowError::Adapter(AdapterError::upstream(
            ServiceName::TestManagement,
            "400 Bad Request: field type_id is invalid",
        )))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn project_without_suites_fails_with_not_found() {
    let mut source = MockSource::new();
    source
        .expect_latest_release()
        .returning(|| Ok(release_aged("v1.0.0", 2)));
    let mut manager = MockManager::new();
    manager.expect_create_plan().times(1).returning(|plan| {
        Ok(TestPlan {
            id: PlanId::new(123),
            name: plan.name.clone(),
            description: None,
        })
    });
    manager.expect_list_suites().returning(|| Ok(Vec::new()));
    manager.expect_create_section().never();

    let result = orchestrator(source, tracker_with_one_bug(), manager, MockWiki::new())
        .run(None)
        .await;

    assert_eq!(
        result,
        Err(WorkflowError::Adapter(AdapterError::not_found("test suite")))
    );
}
