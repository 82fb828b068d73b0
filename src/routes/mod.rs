use axum::{Router, middleware};

use crate::{middleware::session::ensure_session, state::AppState};

pub mod cart;
pub mod catalog;
pub mod doc;
pub mod health;
pub mod sections;

// Build the storefront router without binding state; it will be provided at the top level.
// Every route below runs inside a client session.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(catalog::router())
        .merge(sections::router())
        .merge(cart::router())
        .nest("/api/cart", cart::api_router())
        .layer(middleware::from_fn(ensure_session))
}
