//! Experiment analytics
//!
//! Aggregates tenant events into per-variant conversion metrics.

mod aggregator;
mod engine;
mod query;
mod types;


pub use aggregator::VariantAggregator;
pub use engine::AnalyticsEngine;
pub use query::{AnalyticsQuery, parse_experiment_id};
pub use types::{AnalyticsSummary, VariantMetrics};
