use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use synckaro_core::{
    activity::ActivityLogView,
    listing::{MutationOutcome, PageRequest},
    students::{
        Student, StudentDetailView, StudentListView, StudentStatsView, StudentStatus,
        StudentUpdate,
    },
};

use super::{csv_download, BulkIds, LogQuery};
use crate::{error::ApiResult, main_lib::AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StudentListQuery {
    #[serde(default)]
    q: String,
    page: Option<usize>,
    page_size: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct BulkStatus {
    ids: Vec<String>,
    status: StudentStatus,
}

#[derive(Debug, Deserialize)]
struct StatusChange {
    status: StudentStatus,
}

async fn list_students(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StudentListQuery>,
) -> ApiResult<Json<StudentListView>> {
    let page = PageRequest::students(query.page, query.page_size)?;
    Ok(Json(state.student_service.list_students(&query.q, page).await?))
}

async fn get_student(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<StudentDetailView>> {
    Ok(Json(state.student_service.get_student(&id).await?))
}

async fn update_student(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<StudentUpdate>,
) -> ApiResult<Json<Student>> {
    Ok(Json(state.student_service.update_student(&id, payload).await?))
}

async fn delete_student(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MutationOutcome>> {
    Ok(Json(state.student_service.delete_student(&id).await?))
}

async fn bulk_delete(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BulkIds>,
) -> ApiResult<Json<MutationOutcome>> {
    Ok(Json(state.student_service.bulk_delete(&payload.ids).await?))
}

async fn bulk_status(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BulkStatus>,
) -> ApiResult<Json<MutationOutcome>> {
    let outcome = state
        .student_service
        .bulk_update_status(&payload.ids, payload.status)
        .await?;
    Ok(Json(outcome))
}

async fn set_status(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<StatusChange>,
) -> ApiResult<Json<Student>> {
    let student = state
        .student_service
        .set_student_status(&id, payload.status)
        .await?;
    Ok(Json(student))
}

async fn student_stats(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<StudentStatsView>> {
    Ok(Json(state.student_service.student_stats(&id).await?))
}

async fn student_logs(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(query): Query<LogQuery>,
) -> ApiResult<Json<ActivityLogView>> {
    let filter = query.action_filter()?;
    Ok(Json(state.student_service.student_logs(&id, filter).await?))
}

async fn export_logs(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(query): Query<LogQuery>,
) -> ApiResult<Response> {
    let filter = query.action_filter()?;
    let export = state
        .student_service
        .export_student_logs(&id, filter)
        .await?;
    csv_download(export)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/students", get(list_students))
        .route("/students/bulk-delete", post(bulk_delete))
        .route("/students/bulk-status", post(bulk_status))
        .route(
            "/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route("/students/{id}/status", post(set_status))
        .route("/students/{id}/stats", get(student_stats))
        .route("/students/{id}/logs", get(student_logs))
        .route("/students/{id}/logs/export", get(export_logs))
}
