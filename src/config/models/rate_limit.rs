//! Rate limiting configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Ingest rate limiting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Events accepted per tenant per minute; 0 disables throttling
    #[serde(default = "default_events_per_minute")]
    pub events_per_minute: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            events_per_minute: default_events_per_minute(),
        }
    }
}

impl RateLimitConfig {
    /// Merge rate limit configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.events_per_minute != default_events_per_minute() {
            self.events_per_minute = other.events_per_minute;
        }
        self
    }

    /// Whether ingest throttling is on
    pub fn enabled(&self) -> bool {
        self.events_per_minute > 0
    }
}
