use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::{error::ApiError, main_lib::AppState};

/// Rejects dashboard calls until an administrator has verified an OTP.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.auth_service.is_authenticated() {
        return Err(ApiError::Unauthorized("Not authenticated".to_string()));
    }
    Ok(next.run(request).await)
}
