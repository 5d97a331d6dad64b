//! Integration tests for abtest-analytics
//!
//! These tests verify the interaction between multiple components
//! and test real system behavior against an in-memory database.

pub mod analytics_tests;
pub mod database_tests;
pub mod http_tests;
