//! Analytics output types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-variant conversion metrics
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantMetrics {
    /// In-scope events carrying this variant label
    pub events: u64,
    /// Distinct users with at least one in-scope event for this variant
    pub users: u64,
    /// Conversion events for this variant, each counted independently
    pub conversions: u64,
    /// Conversions per user; not capped at 1
    pub conversion_rate: f64,
}

/// Aggregated view of an event set
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    /// Size of the whole input set
    pub total_events: u64,
    /// Distinct user ids across the whole input set
    pub unique_users: u64,
    /// Breakdown of in-scope events by variant label
    pub variants: BTreeMap<String, VariantMetrics>,
}

impl AnalyticsSummary {
    /// Metrics for a variant, if any in-scope event carried it
    pub fn variant(&self, name: &str) -> Option<&VariantMetrics> {
        self.variants.get(name)
    }
}
