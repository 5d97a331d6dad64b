//! Common test utilities for abtest-analytics
//!
//! - In-memory SQLite database support
//! - Test fixtures and data factories
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::{TestDatabase, fixtures};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let db = TestDatabase::new().await;
//!     let tenant = fixtures::tenant(&db).await;
//!     // ...
//! }
//! ```

pub mod database;
pub mod fixtures;

// Re-export commonly used items
pub use database::TestDatabase;
pub use fixtures::{EventFactory, ExperimentFactory};
