use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    response::{ApiResponse, Meta},
    state::AppState,
    store::ProductFilter,
};

#[derive(Serialize, ToSchema)]
pub struct HealthData {
    /// `ok`, or `degraded` when the catalog cannot be queried.
    pub status: String,
    pub version: String,
    pub catalog_reachable: bool,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service liveness and catalog reachability", body = ApiResponse<HealthData>),
    ),
    tag = "Health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthData>> {
    let catalog_reachable = match state.catalog.products(ProductFilter::default().limit(1)).await {
        Ok(_) => true,
        Err(err) => {
            tracing::warn!(error = %err, "catalog unreachable during health check");
            false
        }
    };
    let data = HealthData {
        status: if catalog_reachable { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog_reachable,
    };

    Json(ApiResponse::success("Health check", data, Some(Meta::empty())))
}
