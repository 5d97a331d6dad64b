//! Core functionality for the analytics service
//!
//! This module contains the domain models, the variant aggregation and the
//! dashboard shaping. It has no knowledge of HTTP or the database schema.

pub mod analytics;
pub mod dashboard;
pub mod models;
pub mod traits;
