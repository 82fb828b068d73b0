use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::catalog::SectionPage,
    error::AppResult,
    response::{ApiResponse, Meta},
    services::section_service::{self, Section},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/footwear", get(footwear))
        .route("/jewellery", get(jewellery))
        .route("/clothes", get(clothes))
}

async fn render(state: &AppState, section: Section) -> AppResult<Json<ApiResponse<SectionPage>>> {
    let page = section_service::section_page(state, section).await?;
    let meta = Meta::total(page.products.len());
    Ok(Json(ApiResponse::success(
        page.category_name.clone(),
        page,
        Some(meta),
    )))
}

#[utoipa::path(
    get,
    path = "/footwear",
    responses(
        (status = 200, description = "Products anywhere under the Footwear category", body = ApiResponse<SectionPage>)
    ),
    tag = "Sections"
)]
pub async fn footwear(State(state): State<AppState>) -> AppResult<Json<ApiResponse<SectionPage>>> {
    render(&state, Section::Footwear).await
}

#[utoipa::path(
    get,
    path = "/jewellery",
    responses(
        (status = 200, description = "Products anywhere under the Jewellery category", body = ApiResponse<SectionPage>)
    ),
    tag = "Sections"
)]
pub async fn jewellery(State(state): State<AppState>) -> AppResult<Json<ApiResponse<SectionPage>>> {
    render(&state, Section::Jewellery).await
}

#[utoipa::path(
    get,
    path = "/clothes",
    responses(
        (status = 200, description = "Products anywhere under the Clothes category", body = ApiResponse<SectionPage>)
    ),
    tag = "Sections"
)]
pub async fn clothes(State(state): State<AppState>) -> AppResult<Json<ApiResponse<SectionPage>>> {
    render(&state, Section::Clothes).await
}
