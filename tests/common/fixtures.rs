//! Test fixtures and data factories
//!
//! Provides factory methods for creating test data with sensible defaults.
//! All factories create real rows, not mocks.

use super::TestDatabase;
use abtest_analytics::core::models::{
    Event, EventType, Experiment, ExperimentStatus, NewEvent, NewExperiment, Tenant,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Create a tenant with a unique API key
pub async fn tenant(db: &TestDatabase) -> Tenant {
    let api_key = format!("test-api-key-{}", &Uuid::new_v4().to_string()[..8]);
    db.db()
        .create_tenant("Test Tenant", &api_key)
        .await
        .expect("Failed to create tenant")
}

/// Factory for creating experiments
pub struct ExperimentFactory;

impl ExperimentFactory {
    /// An active A/B experiment
    pub fn ab(tenant_id: Uuid, name: &str) -> NewExperiment {
        NewExperiment {
            tenant_id,
            name: name.to_string(),
            description: Some("Fixture experiment".to_string()),
            status: ExperimentStatus::Active,
            variants: vec!["A".to_string(), "B".to_string()],
            start_date: None,
            end_date: None,
        }
    }

    /// Insert an active A/B experiment
    pub async fn create(db: &TestDatabase, tenant_id: Uuid, name: &str) -> Experiment {
        db.db()
            .create_experiment(&Self::ab(tenant_id, name))
            .await
            .expect("Failed to create experiment")
    }
}

/// Factory for creating events
pub struct EventFactory;

impl EventFactory {
    /// An event attributed to an experiment variant
    pub fn variant(
        tenant_id: Uuid,
        experiment_id: Uuid,
        user_id: &str,
        event_type: EventType,
        variant: &str,
    ) -> NewEvent {
        NewEvent {
            tenant_id,
            user_id: user_id.to_string(),
            event_type,
            experiment_id: Some(experiment_id),
            variant: Some(variant.to_string()),
            properties: serde_json::json!({"experimentId": experiment_id, "variant": variant}),
            timestamp: Utc::now(),
        }
    }

    /// An event outside any experiment
    pub fn general(tenant_id: Uuid, user_id: &str, event_type: EventType) -> NewEvent {
        NewEvent {
            tenant_id,
            user_id: user_id.to_string(),
            event_type,
            experiment_id: None,
            variant: None,
            properties: serde_json::json!({}),
            timestamp: Utc::now(),
        }
    }

    /// Same event at a fixed instant
    pub fn at(mut event: NewEvent, timestamp: DateTime<Utc>) -> NewEvent {
        event.timestamp = timestamp;
        event
    }

    /// Insert an event
    pub async fn insert(db: &TestDatabase, event: NewEvent) -> Event {
        db.db()
            .create_event(&event)
            .await
            .expect("Failed to create event")
    }
}
