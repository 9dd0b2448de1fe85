//! Unit tests for the release QA workflow.

mod orchestrator_tests;
mod support;
