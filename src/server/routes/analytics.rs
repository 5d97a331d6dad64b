//! Analytics read endpoints

use super::{PaginationMeta, PaginationQuery};
use crate::auth::AuthenticatedTenant;
use crate::core::analytics::AnalyticsQuery;
use crate::core::dashboard::{
    DashboardCards, DashboardFilter, DashboardRow, SortColumn, SortOrder,
};
use crate::core::models::ExperimentStatus;
use crate::server::state::AppState;
use crate::utils::error::{AnalyticsError, Result};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configure analytics routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/analytics")
            .route("/summary", web::get().to(summary))
            .route("/dashboard", web::get().to(dashboard)),
    );
}

async fn summary(
    state: web::Data<AppState>,
    tenant: AuthenticatedTenant,
    query: web::Query<AnalyticsQuery>,
) -> Result<HttpResponse> {
    let summary = state.analytics.summary(tenant.tenant_id, &query).await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// Query of `GET /analytics/dashboard`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl DashboardQuery {
    fn to_filter(&self) -> Result<DashboardFilter> {
        let status = present(&self.status)
            .map(|raw| raw.to_ascii_uppercase().parse::<ExperimentStatus>())
            .transpose()
            .map_err(AnalyticsError::validation)?;
        let sort_by = present(&self.sort_by)
            .map(str::parse::<SortColumn>)
            .transpose()
            .map_err(AnalyticsError::validation)?;
        let sort_order = present(&self.sort_order)
            .map(str::parse::<SortOrder>)
            .transpose()
            .map_err(AnalyticsError::validation)?
            .unwrap_or_default();

        Ok(DashboardFilter {
            search: self.search.clone(),
            status,
            sort_by,
            sort_order,
        })
    }

    fn pagination(&self) -> Result<PaginationQuery> {
        let defaults = PaginationQuery::default();
        let pagination = PaginationQuery {
            page: self.page.unwrap_or(defaults.page),
            limit: self.limit.unwrap_or(defaults.limit),
        };
        pagination.validate().map_err(AnalyticsError::validation)?;
        Ok(pagination)
    }
}

/// Response of `GET /analytics/dashboard`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub rows: Vec<DashboardRow>,
    pub cards: DashboardCards,
    pub pagination: PaginationMeta,
}

async fn dashboard(
    state: web::Data<AppState>,
    tenant: AuthenticatedTenant,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse> {
    let filter = query.to_filter()?;
    let pagination = query.pagination()?;

    let experiments = state.storage.db().list_experiments(tenant.tenant_id).await?;
    debug!(
        "Building dashboard over {} experiments for tenant {}",
        experiments.len(),
        tenant.tenant_id
    );

    let view = state
        .analytics
        .dashboard(
            tenant.tenant_id,
            &experiments,
            &filter,
            pagination.page,
            pagination.limit,
        )
        .await?;

    Ok(HttpResponse::Ok().json(DashboardResponse {
        pagination: PaginationMeta::new(pagination.page, pagination.limit, view.total),
        rows: view.rows,
        cards: view.cards,
    }))
}
