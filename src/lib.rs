//! qa-release: release QA checklist automation.
//!
//! This crate drives the QA checklist that accompanies every release: it
//! detects a new source-control release, creates a test plan, turns the
//! issues filed against the release into test cases, and publishes a wiki
//! report page linking the plan.
//!
//! # Architecture
//!
//! qa-release follows hexagonal architecture principles:
//!
//! - **Domain**: Naming rules, freshness policy and field mappings with no
//!   infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the four remote services
//! - **Adapters**: HTTP clients for the remote services and in-memory
//!   doubles for tests
//!
//! # Modules
//!
//! - [`config`]: Explicit process configuration
//! - [`logging`]: Tracing subscriber initialisation
//! - [`release`]: The release QA workflow

pub mod config;
pub mod logging;
pub mod release;
