//! Cart routes.
//!
//! `/cart/...` serves browsers: mutations answer with a redirect back to the
//! cart page and leave a flash message behind. `/api/cart/...` serves scripts
//! with structured results. Both call the same service functions.

use axum::{
    Form, Json, Router,
    extract::{Path, State, rejection::FormRejection},
    http::Method,
    response::Redirect,
    routing::{any, get},
};

use crate::{
    dto::cart::{CartActionResult, CartPage, CartUpdateForm, CartUpdateResult},
    error::AppResult,
    models::ProductId,
    response::{ApiResponse, Meta},
    services::cart_service,
    session::SessionId,
    state::AppState,
};

pub const CART_PAGE: &str = "/cart";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cart", get(view_cart))
        .route("/cart/add/{product_id}", any(add_and_redirect))
        .route("/cart/remove/{product_id}", any(remove_and_redirect))
}

pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/add/{product_id}", any(add_to_cart))
        .route("/remove/{product_id}", any(remove_from_cart))
        .route("/update/{product_id}", any(update_cart))
}

#[utoipa::path(
    get,
    path = "/cart",
    responses(
        (status = 200, description = "Reconciled cart with totals and pending messages", body = ApiResponse<CartPage>)
    ),
    tag = "Cart"
)]
pub async fn view_cart(
    State(state): State<AppState>,
    session: SessionId,
) -> AppResult<Json<ApiResponse<CartPage>>> {
    let page = cart_service::view_cart(&state, session).await?;
    let meta = Meta::total(page.cart_items.len());
    Ok(Json(ApiResponse::success("Cart", page, Some(meta))))
}

#[utoipa::path(
    post,
    path = "/cart/add/{product_id}",
    params(
        ("product_id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 303, description = "Added; redirects to the cart page")
    ),
    tag = "Cart"
)]
pub async fn add_and_redirect(
    State(state): State<AppState>,
    session: SessionId,
    Path(product_id): Path<ProductId>,
) -> AppResult<Redirect> {
    let change = cart_service::add_to_cart(&state, session, product_id).await?;
    cart_service::notify(&state, session, &change.result.message).await?;
    Ok(Redirect::to(CART_PAGE))
}

#[utoipa::path(
    post,
    path = "/cart/remove/{product_id}",
    params(
        ("product_id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 303, description = "Removed if present; redirects to the cart page")
    ),
    tag = "Cart"
)]
pub async fn remove_and_redirect(
    State(state): State<AppState>,
    session: SessionId,
    Path(product_id): Path<ProductId>,
) -> AppResult<Redirect> {
    let change = cart_service::remove_from_cart(&state, session, product_id).await?;
    if change.changed {
        cart_service::notify(&state, session, &change.result.message).await?;
    }
    Ok(Redirect::to(CART_PAGE))
}

#[utoipa::path(
    post,
    path = "/api/cart/add/{product_id}",
    params(
        ("product_id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Added to cart", body = CartActionResult)
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    session: SessionId,
    Path(product_id): Path<ProductId>,
) -> AppResult<Json<CartActionResult>> {
    let change = cart_service::add_to_cart(&state, session, product_id).await?;
    Ok(Json(change.result))
}

#[utoipa::path(
    post,
    path = "/api/cart/remove/{product_id}",
    params(
        ("product_id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Removed from cart if present", body = CartActionResult)
    ),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    session: SessionId,
    Path(product_id): Path<ProductId>,
) -> AppResult<Json<CartActionResult>> {
    let change = cart_service::remove_from_cart(&state, session, product_id).await?;
    Ok(Json(change.result))
}

#[utoipa::path(
    post,
    path = "/api/cart/update/{product_id}",
    params(
        ("product_id" = i64, Path, description = "Product ID")
    ),
    request_body(content = CartUpdateForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "New quantity and totals, or `success: false` with a message", body = CartUpdateResult)
    ),
    tag = "Cart"
)]
pub async fn update_cart(
    State(state): State<AppState>,
    session: SessionId,
    method: Method,
    Path(product_id): Path<ProductId>,
    form: Result<Form<CartUpdateForm>, FormRejection>,
) -> AppResult<Json<CartUpdateResult>> {
    if method != Method::POST {
        return Ok(Json(CartUpdateResult::failed("Invalid request method")));
    }

    let action = form
        .ok()
        .and_then(|Form(form)| form.action)
        .unwrap_or_default();
    let result = cart_service::update_quantity(&state, session, product_id, &action).await?;
    Ok(Json(result))
}
