//! Per-tenant ingest throttling

use crate::utils::error::{AnalyticsError, Result};
use governor::clock::DefaultClock;
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};
use uuid::Uuid;

type KeyedLimiter = RateLimiter<Uuid, DefaultKeyedStateStore<Uuid>, DefaultClock>;

/// How often idle tenant buckets are dropped by the server
pub const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

/// Keyed token bucket allowing N events per tenant per minute
#[derive(Clone)]
pub struct TenantRateLimiter {
    limiter: Option<Arc<KeyedLimiter>>,
    per_minute: u32,
}

impl std::fmt::Debug for TenantRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TenantRateLimiter")
            .field("per_minute", &self.per_minute)
            .finish()
    }
}

impl TenantRateLimiter {
    /// Create a limiter; a quota of 0 disables throttling
    pub fn new(per_minute: u32) -> Self {
        let limiter = NonZeroU32::new(per_minute)
            .map(|quota| Arc::new(RateLimiter::keyed(Quota::per_minute(quota))));

        Self {
            limiter,
            per_minute,
        }
    }

    /// Limiter that never throttles
    pub fn disabled() -> Self {
        Self::new(0)
    }

    /// Whether throttling is active
    pub fn is_enabled(&self) -> bool {
        self.limiter.is_some()
    }

    /// Consume one unit of the tenant's quota
    pub fn check(&self, tenant_id: Uuid) -> Result<()> {
        let Some(limiter) = &self.limiter else {
            return Ok(());
        };

        limiter.check_key(&tenant_id).map_err(|_| {
            warn!("Ingest rate limit hit for tenant {}", tenant_id);
            AnalyticsError::rate_limit(format!(
                "at most {} events per minute per tenant",
                self.per_minute
            ))
        })
    }

    /// Drop idle per-tenant state
    pub fn retain_recent(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.retain_recent();
        }
    }

    /// Number of tenants with live bucket state
    pub fn tracked_tenants(&self) -> usize {
        self.limiter.as_ref().map_or(0, |limiter| limiter.len())
    }

    /// Prune idle tenant state every `period` on the current runtime
    ///
    /// Returns `None` when throttling is disabled. The task runs until the
    /// handle is aborted.
    pub fn spawn_pruning(&self, period: Duration) -> Option<JoinHandle<()>> {
        let limiter = self.limiter.clone()?;

        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                limiter.retain_recent();
                limiter.shrink_to_fit();
                debug!("Rate limiter tracking {} tenants", limiter.len());
            }
        }))
    }
}
