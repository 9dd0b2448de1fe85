//! Release QA workflow.
//!
//! This module automates the QA checklist that accompanies a new release:
//! detecting the release, creating a test plan, turning the issues filed
//! against the release into test cases, and publishing a report page that
//! links to the plan. It follows hexagonal architecture:
//!
//! - Domain types and pure mapping rules in [`domain`]
//! - Remote service contracts in [`ports`]
//! - HTTP and in-memory implementations in [`adapters`]
//! - Per-service adapters and the release orchestrator in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
