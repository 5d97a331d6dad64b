//! Analytics engine for tenant event data

use super::aggregator::VariantAggregator;
use super::query::AnalyticsQuery;
use super::types::AnalyticsSummary;
use crate::core::dashboard::{self, DashboardFilter, DashboardView};
use crate::core::models::{EventFilter, Experiment};
use crate::core::traits::EventRepository;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Fetches tenant events and turns them into summaries and dashboard rows
#[derive(Clone)]
pub struct AnalyticsEngine {
    /// Event source
    repository: Arc<dyn EventRepository>,
    aggregator: VariantAggregator,
}

impl AnalyticsEngine {
    /// Create a new analytics engine
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        Self {
            repository,
            aggregator: VariantAggregator::new(),
        }
    }

    /// Summary for the raw query parameters of a tenant request
    pub async fn summary(
        &self,
        tenant_id: Uuid,
        query: &AnalyticsQuery,
    ) -> Result<AnalyticsSummary> {
        let filter = query.to_filter(tenant_id)?;
        self.summarize(&filter).await
    }

    /// Summary of all events matching a filter
    pub async fn summarize(&self, filter: &EventFilter) -> Result<AnalyticsSummary> {
        let events = self.repository.find_events(filter).await?;
        debug!(
            "Aggregating {} events for tenant {} (experiment: {:?})",
            events.len(),
            filter.tenant_id,
            filter.experiment_id
        );

        Ok(self
            .aggregator
            .summarize(&events, filter.is_experiment_scoped()))
    }

    /// Dashboard rows for the given experiments of a tenant
    ///
    /// An experiment whose events cannot be loaded still gets its rows, with
    /// zero metrics.
    pub async fn dashboard(
        &self,
        tenant_id: Uuid,
        experiments: &[Experiment],
        filter: &DashboardFilter,
        page: u32,
        limit: u32,
    ) -> Result<DashboardView> {
        let mut rows = Vec::new();
        for experiment in experiments {
            let scoped = EventFilter::for_tenant(tenant_id).with_experiment(experiment.id);
            let summary = match self.summarize(&scoped).await {
                Ok(summary) => summary,
                Err(e) => {
                    warn!(
                        "Failed to load events for experiment {}: {}",
                        experiment.id, e
                    );
                    AnalyticsSummary::default()
                }
            };
            rows.extend(dashboard::build_rows(experiment, &summary));
        }

        Ok(dashboard::assemble_view(rows, filter, page, limit))
    }
}

impl std::fmt::Debug for AnalyticsEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsEngine").finish_non_exhaustive()
    }
}
