//! HTTP client for the SyncKaro admin REST API.
//!
//! One shared `reqwest::Client` per backend. The bearer token is swapped in
//! place after login and logout, so a single client lives for the whole
//! process.

use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use synckaro_core::api::{
    ActivityLogDto, AdminApiTrait, ApiLogEntry, BulkStudentsRequest, DataEnvelope, ListRequest,
    LoginRequest, MessageResponse, StatsDataDto, StudentDetailDto, StudentIdRequest,
    StudentListItem, StudentUpdateRequest, TableCountEntry, TeacherDetailDto, TeacherIdRequest,
    TeacherListItem, TeacherUpdateRequest, TeacherViewRequest, VerifyRequest, VerifyResponse,
};
use synckaro_core::errors::{ApiError, Error, Result};

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default base URL of the admin backend.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Longest slice of a non-JSON error body echoed back to the caller.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Whether a request carries the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Bearer,
    Skip,
}

// ─────────────────────────────────────────────────────────────────────────────
// Response parsing
// ─────────────────────────────────────────────────────────────────────────────

/// `detail` is a string, or a list of `{msg}` objects for validation errors.
fn detail_text(detail: &Value) -> Option<String> {
    match detail {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items
            .iter()
            .find_map(|item| item.get("msg").and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
}

/// Message of a failed reply: `message`, then `error`, then `detail`; raw
/// bodies are truncated.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        let from_fields = ["message", "error"]
            .iter()
            .find_map(|field| value.get(*field).and_then(Value::as_str))
            .map(str::to_string)
            .or_else(|| value.get("detail").and_then(detail_text))
            .filter(|m| !m.trim().is_empty());
        if let Some(message) = from_fields {
            return message;
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return format!("HTTP {}", status);
    }
    trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

fn parse_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    if !status.is_success() {
        return Err(Error::Api(ApiError::new(
            Some(status.as_u16()),
            error_message(status, body),
        )));
    }

    // Some mutations reply 2xx with no body at all.
    let body = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(body).map_err(|e| {
        Error::Api(ApiError::new(
            Some(status.as_u16()),
            format!("Failed to parse response: {}", e),
        ))
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Admin API Client
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP client for the admin backend.
///
/// # Example
///
/// ```ignore
/// let client = AdminApiClient::new("https://api.synckaro.in")?;
/// client.set_access_token(Some(token));
/// let teachers = client.list_teachers(&request).await?;
/// ```
#[derive(Debug)]
pub struct AdminApiClient {
    client: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl AdminApiClient {
    /// Create a client with the default 30 second timeout.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn access_token(&self) -> Option<String> {
        self.token.read().ok().and_then(|token| token.clone())
    }

    fn headers(&self, auth: Auth) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if auth == Auth::Bearer {
            if let Some(token) = self.access_token() {
                let value = HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| Error::Unexpected(format!("Invalid access token format: {}", e)))?;
                headers.insert(AUTHORIZATION, value);
            }
        }
        Ok(headers)
    }

    async fn request<B, T>(&self, method: Method, path: &str, body: &B, auth: Auth) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("[AdminApi] {} {}", method, url);

        let response = self
            .client
            .request(method, &url)
            .headers(self.headers(auth)?)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Api(ApiError::new(None, format!("Request failed: {}", e))))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            Error::Api(ApiError::new(
                Some(status.as_u16()),
                format!("Failed to read response: {}", e),
            ))
        })?;

        parse_body(status, &text)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, body, Auth::Bearer).await
    }
}

#[async_trait]
impl AdminApiTrait for AdminApiClient {
    fn set_access_token(&self, token: Option<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = token;
        }
    }

    async fn login(&self, request: &LoginRequest) -> Result<MessageResponse> {
        self.request(Method::POST, "/common/login", request, Auth::Skip)
            .await
    }

    async fn verify(&self, request: &VerifyRequest) -> Result<VerifyResponse> {
        self.request(Method::POST, "/common/verify", request, Auth::Skip)
            .await
    }

    async fn logout(&self) -> Result<MessageResponse> {
        self.post("/common/logout", &json!({})).await
    }

    async fn list_students(&self, request: &ListRequest) -> Result<Vec<StudentListItem>> {
        self.post("/admin/student/list", request).await
    }

    async fn view_student(&self, student_id: i64) -> Result<DataEnvelope<StudentDetailDto>> {
        self.post("/admin/student/view", &StudentIdRequest { student_id })
            .await
    }

    async fn update_student(
        &self,
        student_id: i64,
        request: &StudentUpdateRequest,
    ) -> Result<MessageResponse> {
        let path = format!("/admin/student/update/{}", student_id);
        self.request(Method::PUT, &path, request, Auth::Bearer)
            .await
    }

    async fn delete_student(&self, student_id: i64) -> Result<MessageResponse> {
        self.request(
            Method::DELETE,
            "/admin/student/delete",
            &StudentIdRequest { student_id },
            Auth::Bearer,
        )
        .await
    }

    async fn bulk_delete_students(&self, student_ids: &[i64]) -> Result<MessageResponse> {
        let body = BulkStudentsRequest {
            student_ids: student_ids.to_vec(),
        };
        self.post("/admin/student/bulk_delete", &body).await
    }

    async fn bulk_activate_students(&self, student_ids: &[i64]) -> Result<MessageResponse> {
        let body = BulkStudentsRequest {
            student_ids: student_ids.to_vec(),
        };
        self.post("/admin/student/bulk_activate", &body).await
    }

    async fn bulk_deactivate_students(&self, student_ids: &[i64]) -> Result<MessageResponse> {
        let body = BulkStudentsRequest {
            student_ids: student_ids.to_vec(),
        };
        self.post("/admin/student/bulk_deactivate", &body).await
    }

    async fn student_logs(&self, student_id: i64) -> Result<DataEnvelope<Vec<ActivityLogDto>>> {
        self.post("/admin/student/logs", &StudentIdRequest { student_id })
            .await
    }

    async fn student_stats(&self, student_id: i64) -> Result<DataEnvelope<StatsDataDto>> {
        self.post("/admin/student/stats", &StudentIdRequest { student_id })
            .await
    }

    async fn list_teachers(&self, request: &ListRequest) -> Result<Vec<TeacherListItem>> {
        self.post("/admin/teacher/list", request).await
    }

    async fn view_teacher(
        &self,
        teacher_id: i64,
        admin_id: Option<i64>,
    ) -> Result<DataEnvelope<TeacherDetailDto>> {
        let body = TeacherViewRequest {
            teacher_id,
            admin_id,
        };
        self.post("/admin/teacher/view", &body).await
    }

    async fn update_teacher(
        &self,
        teacher_id: i64,
        request: &TeacherUpdateRequest,
    ) -> Result<MessageResponse> {
        let path = format!("/admin/teacher/update/{}", teacher_id);
        self.request(Method::PUT, &path, request, Auth::Bearer)
            .await
    }

    async fn delete_teacher(&self, teacher_id: i64) -> Result<MessageResponse> {
        self.request(
            Method::DELETE,
            "/admin/teacher/delete",
            &TeacherIdRequest { teacher_id },
            Auth::Bearer,
        )
        .await
    }

    async fn teacher_logs(&self, teacher_id: i64) -> Result<DataEnvelope<Vec<ActivityLogDto>>> {
        self.post("/admin/teacher/logs", &TeacherIdRequest { teacher_id })
            .await
    }

    async fn teacher_stats(&self, teacher_id: i64) -> Result<DataEnvelope<StatsDataDto>> {
        self.post("/admin/teacher/stats", &TeacherIdRequest { teacher_id })
            .await
    }

    async fn api_logs(&self) -> Result<DataEnvelope<Vec<ApiLogEntry>>> {
        self.post("/admin/api-logs", &json!({})).await
    }

    async fn table_counts(&self) -> Result<DataEnvelope<Vec<TableCountEntry>>> {
        self.post("/admin/db/table-counts", &json!({})).await
    }
}
