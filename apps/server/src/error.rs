use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use synckaro_core::errors::{Error as CoreError, FormErrors, ValidationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<FormErrors>,
}

fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::Validation(_) => StatusCode::BAD_REQUEST,
        CoreError::Auth(_) => StatusCode::UNAUTHORIZED,
        CoreError::NotFound(_) => StatusCode::NOT_FOUND,
        CoreError::Api(api) if api.is_unauthorized() => StatusCode::UNAUTHORIZED,
        CoreError::Api(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, fields) = match &self {
            ApiError::Core(e) => {
                let fields = match e {
                    CoreError::Validation(ValidationError::Form(fields)) => Some(fields.clone()),
                    _ => None,
                };
                (core_status(e), e.user_message(), fields)
            }
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone(), None),
            ApiError::Unauthorized(reason) => (StatusCode::UNAUTHORIZED, reason.clone(), None),
            ApiError::Internal(reason) => {
                (StatusCode::INTERNAL_SERVER_ERROR, reason.clone(), None)
            }
        };
        if status.is_server_error() {
            tracing::error!("{} {}", status, message);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message,
            fields,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use synckaro_core::errors::ApiError as RemoteError;

    #[test]
    fn remote_failures_map_to_gateway_or_auth() {
        let expired = CoreError::Api(RemoteError::new(Some(401), "Token expired"));
        assert_eq!(core_status(&expired), StatusCode::UNAUTHORIZED);

        let down = CoreError::api("Request failed");
        assert_eq!(core_status(&down), StatusCode::BAD_GATEWAY);

        let missing = CoreError::NotFound("Student 9 not found".into());
        assert_eq!(core_status(&missing), StatusCode::NOT_FOUND);
    }
}
