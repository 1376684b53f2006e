//! Common test utilities for news-digest integration tests

#[allow(dead_code)]
pub mod fixtures;

pub use fixtures::*;
