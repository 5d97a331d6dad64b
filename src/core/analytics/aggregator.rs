//! Variant aggregation over a fetched event set

use super::types::{AnalyticsSummary, VariantMetrics};
use crate::core::models::Event;
use std::collections::{BTreeMap, HashSet};

/// Working record for one variant while events are folded in
#[derive(Debug, Default)]
struct VariantAccumulator<'a> {
    events: u64,
    users: HashSet<&'a str>,
    conversions: u64,
}

impl VariantAccumulator<'_> {
    fn finish(self) -> VariantMetrics {
        let users = self.users.len() as u64;
        let conversion_rate = if users > 0 {
            self.conversions as f64 / users as f64
        } else {
            0.0
        };

        VariantMetrics {
            events: self.events,
            users,
            conversions: self.conversions,
            conversion_rate,
        }
    }
}

/// Groups events by variant label and computes conversion metrics
///
/// Stateless; the same input always produces the same summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct VariantAggregator;

impl VariantAggregator {
    /// Create a new aggregator
    pub fn new() -> Self {
        Self
    }

    /// Summarize an event set
    ///
    /// `experiment_scoped` tells whether the events were already restricted to
    /// a single experiment upstream. When it is false, an event only counts
    /// toward the variant breakdown if it also carries an experiment id.
    /// Totals always cover the full input.
    pub fn summarize(&self, events: &[Event], experiment_scoped: bool) -> AnalyticsSummary {
        let mut all_users: HashSet<&str> = HashSet::with_capacity(events.len());
        let mut accumulators: BTreeMap<&str, VariantAccumulator<'_>> = BTreeMap::new();

        for event in events {
            all_users.insert(event.user_id.as_str());

            let Some(variant) = event.variant.as_deref() else {
                continue;
            };
            if !experiment_scoped && event.experiment_id.is_none() {
                continue;
            }

            let acc = accumulators.entry(variant).or_default();
            acc.events += 1;
            acc.users.insert(event.user_id.as_str());
            if event.is_conversion() {
                acc.conversions += 1;
            }
        }

        AnalyticsSummary {
            total_events: events.len() as u64,
            unique_users: all_users.len() as u64,
            variants: accumulators
                .into_iter()
                .map(|(variant, acc)| (variant.to_string(), acc.finish()))
                .collect(),
        }
    }
}
