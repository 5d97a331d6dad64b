//! Data access seams used by the analytics engine

use crate::core::models::{Event, EventFilter};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read access to the tenant event log
///
/// The analytics engine only depends on this trait, so aggregation can be
/// exercised without a live database.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Events matching the filter, oldest first
    async fn find_events(&self, filter: &EventFilter) -> Result<Vec<Event>>;
}
