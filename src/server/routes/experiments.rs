//! Experiment configuration endpoints

use crate::auth::AuthenticatedTenant;
use crate::core::analytics::parse_experiment_id;
use crate::core::models::{ExperimentStatus, NewExperiment};
use crate::server::state::AppState;
use crate::utils::error::{AnalyticsError, Result};
use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

/// Configure experiment routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/experiments")
            .route("", web::post().to(create_experiment))
            .route("", web::get().to(list_experiments))
            .route("/{id}", web::get().to(get_experiment))
            .route("/{id}", web::patch().to(update_experiment)),
    );
}

/// Body of `POST /experiments`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExperimentRequest {
    pub name: String,
    pub description: Option<String>,
    pub variants: Vec<String>,
    pub status: Option<ExperimentStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl CreateExperimentRequest {
    fn into_new_experiment(self, tenant_id: Uuid) -> Result<NewExperiment> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AnalyticsError::validation("name must not be empty"));
        }
        if self.variants.is_empty() {
            return Err(AnalyticsError::validation("variants must not be empty"));
        }
        if self.variants.iter().any(|variant| variant.trim().is_empty()) {
            return Err(AnalyticsError::validation(
                "variants must be non-empty strings",
            ));
        }

        Ok(NewExperiment {
            tenant_id,
            name: name.to_string(),
            description: self.description,
            status: self.status.unwrap_or_default(),
            variants: self.variants,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

/// Body of `PATCH /experiments/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExperimentRequest {
    pub status: Option<ExperimentStatus>,
}

fn not_found(raw_id: &str) -> AnalyticsError {
    AnalyticsError::not_found(format!("Experiment with ID {} not found", raw_id))
}

/// Experiment ids that are not UUIDs can never match a row
fn path_experiment_id(raw_id: &str) -> Result<Uuid> {
    parse_experiment_id(raw_id).map_err(|_| not_found(raw_id))
}

async fn create_experiment(
    state: web::Data<AppState>,
    tenant: AuthenticatedTenant,
    body: web::Json<CreateExperimentRequest>,
) -> Result<HttpResponse> {
    let new = body.into_inner().into_new_experiment(tenant.tenant_id)?;
    let experiment = state.storage.db().create_experiment(&new).await?;

    info!(
        "Experiment {} created for tenant {}",
        experiment.id, tenant.tenant_id
    );
    Ok(HttpResponse::Created().json(experiment))
}

async fn list_experiments(
    state: web::Data<AppState>,
    tenant: AuthenticatedTenant,
) -> Result<HttpResponse> {
    let experiments = state.storage.db().list_experiments(tenant.tenant_id).await?;
    debug!(
        "Listing {} experiments for tenant {}",
        experiments.len(),
        tenant.tenant_id
    );
    Ok(HttpResponse::Ok().json(experiments))
}

async fn get_experiment(
    state: web::Data<AppState>,
    tenant: AuthenticatedTenant,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let raw_id = path.into_inner();
    let experiment_id = path_experiment_id(&raw_id)?;

    let detail = state
        .storage
        .db()
        .find_experiment(tenant.tenant_id, experiment_id)
        .await?
        .ok_or_else(|| not_found(&raw_id))?;

    Ok(HttpResponse::Ok().json(detail))
}

async fn update_experiment(
    state: web::Data<AppState>,
    tenant: AuthenticatedTenant,
    path: web::Path<String>,
    body: web::Json<UpdateExperimentRequest>,
) -> Result<HttpResponse> {
    let raw_id = path.into_inner();
    let experiment_id = path_experiment_id(&raw_id)?;
    let db = state.storage.db();

    let experiment = match body.status {
        Some(status) => {
            let experiment = db
                .update_experiment_status(tenant.tenant_id, experiment_id, status)
                .await?;
            info!("Experiment {} is now {}", experiment.id, status);
            experiment
        }
        None => db
            .get_experiment(tenant.tenant_id, experiment_id)
            .await?
            .ok_or_else(|| not_found(&raw_id))?,
    };

    Ok(HttpResponse::Ok().json(experiment))
}
