use axum::{
    extract::{FromRequestParts, Request},
    http::{HeaderValue, header, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::{
    error::AppError,
    session::{SESSION_TTL_SECS, SessionId},
};

pub const SESSION_COOKIE: &str = "storefront_session";

/// Resolves the session from the request cookie, issuing a fresh one when it
/// is missing or malformed. The [`SessionId`] is stored in the request
/// extensions for handlers to extract.
pub async fn ensure_session(mut request: Request, next: Next) -> Response {
    let jar = CookieJar::from_headers(request.headers());
    let existing = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| SessionId::parse(cookie.value()));

    let (session, issued) = match existing {
        Some(session) => (session, false),
        None => (SessionId::new(), true),
    };
    request.extensions_mut().insert(session);

    let mut response = next.run(request).await;

    if issued {
        let cookie = Cookie::build((SESSION_COOKIE, session.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(Duration::seconds(SESSION_TTL_SECS))
            .build();
        match HeaderValue::from_str(&cookie.to_string()) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(err) => tracing::warn!(error = %err, "could not encode session cookie"),
        }
    }

    response
}

impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionId>()
            .copied()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("session middleware is not installed")))
    }
}
