//! Tracked event models
//!
//! Events are recorded per tenant and optionally tagged with an experiment and
//! a variant label.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Kind of tracked event (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// A page was displayed to the user
    PageView,
    /// The user clicked a tracked element
    Click,
    /// The user completed the desired outcome
    Conversion,
}

impl EventType {
    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::PageView => "PAGE_VIEW",
            EventType::Click => "CLICK",
            EventType::Conversion => "CONVERSION",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PAGE_VIEW" => Ok(EventType::PageView),
            "CLICK" => Ok(EventType::Click),
            "CONVERSION" => Ok(EventType::Conversion),
            other => Err(format!("Unknown event type: {}", other)),
        }
    }
}

/// A stored event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub tenant_id: Uuid,
    /// Opaque end-user identifier supplied by the tenant
    pub user_id: String,
    pub event_type: EventType,
    pub experiment_id: Option<Uuid>,
    pub variant: Option<String>,
    /// Free-form event properties as submitted
    pub properties: serde_json::Value,
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Whether this event is a conversion
    pub fn is_conversion(&self) -> bool {
        self.event_type == EventType::Conversion
    }
}

/// Event ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub tenant_id: Uuid,
    pub user_id: String,
    pub event_type: EventType,
    pub experiment_id: Option<Uuid>,
    pub variant: Option<String>,
    pub properties: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

/// Selection of events for analytics
///
/// `start` and `end` are both inclusive bounds on the event timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFilter {
    pub tenant_id: Uuid,
    pub experiment_id: Option<Uuid>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl EventFilter {
    /// All events of a tenant
    pub fn for_tenant(tenant_id: Uuid) -> Self {
        Self {
            tenant_id,
            experiment_id: None,
            start: None,
            end: None,
        }
    }

    /// Restrict to one experiment
    pub fn with_experiment(mut self, experiment_id: Uuid) -> Self {
        self.experiment_id = Some(experiment_id);
        self
    }

    /// Whether the filter is pinned to a single experiment
    pub fn is_experiment_scoped(&self) -> bool {
        self.experiment_id.is_some()
    }
}
