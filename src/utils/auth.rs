// src/utils/auth.rs

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::config::Config;

/// Header carrying the admin shared secret.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Axum Middleware: Admin gate.
///
/// Intercepts requests and compares the `x-admin-token` header against the
/// configured shared secret. A missing or mismatching token returns 401.
/// This is a shared-secret gate, not an authentication system: there are no
/// accounts, sessions or roles behind it.
pub async fn admin_middleware(
    State(config): State<Config>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = req
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());

    match token {
        Some(token) if token == config.admin_token => Ok(next.run(req).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}
