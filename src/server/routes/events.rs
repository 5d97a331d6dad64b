//! Event ingest endpoint

use crate::auth::AuthenticatedTenant;
use crate::core::analytics::parse_experiment_id;
use crate::core::models::{EventType, NewEvent};
use crate::server::state::AppState;
use crate::utils::error::{AnalyticsError, Result};
use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

/// Configure event routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/events", web::post().to(create_event));
}

/// Body of `POST /events`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub user_id: String,
    pub event_type: EventType,
    pub properties: Option<Value>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Attribution carried inside event properties
#[derive(Debug, Clone, PartialEq, Eq)]
struct Attribution {
    experiment_id: Option<Uuid>,
    variant: Option<String>,
}

fn non_empty_string<'a>(properties: &'a Value, key: &str) -> Option<&'a str> {
    properties
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

fn attribution(properties: &Value) -> Result<Attribution> {
    let experiment_id = non_empty_string(properties, "experimentId")
        .map(parse_experiment_id)
        .transpose()?;
    let variant = non_empty_string(properties, "variant").map(str::to_string);

    Ok(Attribution {
        experiment_id,
        variant,
    })
}

impl CreateEventRequest {
    fn into_new_event(self, tenant_id: Uuid) -> Result<NewEvent> {
        if self.user_id.trim().is_empty() {
            return Err(AnalyticsError::validation("userId must not be empty"));
        }

        let properties = match self.properties {
            None | Some(Value::Null) => Value::Object(Default::default()),
            Some(Value::Object(map)) => Value::Object(map),
            Some(_) => {
                return Err(AnalyticsError::validation("properties must be an object"));
            }
        };
        let Attribution {
            experiment_id,
            variant,
        } = attribution(&properties)?;

        Ok(NewEvent {
            tenant_id,
            user_id: self.user_id,
            event_type: self.event_type,
            experiment_id,
            variant,
            properties,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
        })
    }
}

async fn create_event(
    state: web::Data<AppState>,
    tenant: AuthenticatedTenant,
    body: web::Json<CreateEventRequest>,
) -> Result<HttpResponse> {
    state.rate_limiter.check(tenant.tenant_id)?;

    let new = body.into_inner().into_new_event(tenant.tenant_id)?;
    let db = state.storage.db();

    if let Some(experiment_id) = new.experiment_id {
        if db
            .get_experiment(tenant.tenant_id, experiment_id)
            .await?
            .is_none()
        {
            warn!(
                "Event for unknown experiment {} from tenant {}",
                experiment_id, tenant.tenant_id
            );
            return Err(AnalyticsError::validation(format!(
                "Unknown experimentId: {}",
                experiment_id
            )));
        }
    }

    let event = db.create_event(&new).await?;
    debug!(
        "Stored {} event {} for tenant {}",
        event.event_type, event.id, tenant.tenant_id
    );

    Ok(HttpResponse::Created().json(event))
}
