//! Adapter implementations for release workflow ports.

pub mod http;
pub mod memory;
