use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::catalog::{CategoryPage, CategoryTreeList, HomePage, ProductList, SearchPage, SearchQuery},
    error::AppResult,
    models::CategoryId,
    response::{ApiResponse, Meta},
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/search", get(search))
        .route("/discounts", get(discounts))
        .route("/latest", get(latest))
        .route("/category/{id}", get(category))
        .route("/categories", get(categories))
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Up to six latest products", body = ApiResponse<HomePage>)
    ),
    tag = "Catalog"
)]
pub async fn home(State(state): State<AppState>) -> AppResult<Json<ApiResponse<HomePage>>> {
    let page = catalog_service::home(&state).await?;
    let meta = Meta::total(page.latest_products.len());
    Ok(Json(ApiResponse::success("Home", page, Some(meta))))
}

#[utoipa::path(
    get,
    path = "/search",
    params(
        ("q" = Option<String>, Query, description = "Case-insensitive name fragment; empty finds nothing")
    ),
    responses(
        (status = 200, description = "Products whose name contains `q`", body = ApiResponse<SearchPage>)
    ),
    tag = "Catalog"
)]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<SearchPage>>> {
    let page = catalog_service::search(&state, query.q).await?;
    let meta = Meta::total(page.results.len());
    Ok(Json(ApiResponse::success("Search results", page, Some(meta))))
}

#[utoipa::path(
    get,
    path = "/discounts",
    responses(
        (status = 200, description = "Discounted products", body = ApiResponse<ProductList>)
    ),
    tag = "Catalog"
)]
pub async fn discounts(State(state): State<AppState>) -> AppResult<Json<ApiResponse<ProductList>>> {
    let list = catalog_service::discounts(&state).await?;
    let meta = Meta::total(list.items.len());
    Ok(Json(ApiResponse::success("Discounted products", list, Some(meta))))
}

#[utoipa::path(
    get,
    path = "/latest",
    responses(
        (status = 200, description = "Latest products, newest first", body = ApiResponse<ProductList>)
    ),
    tag = "Catalog"
)]
pub async fn latest(State(state): State<AppState>) -> AppResult<Json<ApiResponse<ProductList>>> {
    let list = catalog_service::latest(&state).await?;
    let meta = Meta::total(list.items.len());
    Ok(Json(ApiResponse::success("Latest products", list, Some(meta))))
}

#[utoipa::path(
    get,
    path = "/category/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Products of one category; `error` is set when the category does not exist", body = ApiResponse<CategoryPage>)
    ),
    tag = "Catalog"
)]
pub async fn category(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> AppResult<Json<ApiResponse<CategoryPage>>> {
    let page = catalog_service::category_page(&state, id).await?;
    let meta = Meta::total(page.products.len());
    Ok(Json(ApiResponse::success("Category", page, Some(meta))))
}

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "Category hierarchy with full paths", body = ApiResponse<CategoryTreeList>)
    ),
    tag = "Catalog"
)]
pub async fn categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CategoryTreeList>>> {
    let tree = catalog_service::category_tree(&state).await?;
    Ok(Json(ApiResponse::success("Categories", tree, Some(Meta::empty()))))
}
