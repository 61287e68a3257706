use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use synckaro_core::auth::{AuthSession, AuthUser, OtpRequest, OtpVerification};

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Serialize)]
struct OtpSent {
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionStatus {
    is_authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<AuthUser>,
}

async fn send_otp(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<OtpRequest>,
) -> ApiResult<Json<OtpSent>> {
    let message = state.auth_service.send_otp(&payload.mobile).await?;
    Ok(Json(OtpSent { message }))
}

async fn resend_otp(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<OtpRequest>,
) -> ApiResult<Json<OtpSent>> {
    let message = state.auth_service.resend_otp(&payload.mobile).await?;
    Ok(Json(OtpSent { message }))
}

async fn verify_otp(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<OtpVerification>,
) -> ApiResult<Json<AuthSession>> {
    let session = state
        .auth_service
        .verify_otp(&payload.mobile, &payload.otp)
        .await?;
    tracing::info!("Admin session opened for {}", session.user.mobile);
    Ok(Json(session))
}

async fn logout(State(state): State<Arc<AppState>>) -> ApiResult<StatusCode> {
    state.auth_service.logout().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn session(State(state): State<Arc<AppState>>) -> Json<SessionStatus> {
    Json(SessionStatus {
        is_authenticated: state.auth_service.is_authenticated(),
        user: state.auth_service.current_user(),
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(send_otp))
        .route("/auth/resend", post(resend_otp))
        .route("/auth/verify", post(verify_otp))
        .route("/auth/logout", post(logout))
        .route("/auth/session", get(session))
}
