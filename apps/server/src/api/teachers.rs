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
    students::Student,
    teachers::{
        Teacher, TeacherDetailView, TeacherListView, TeacherOption, TeacherStatsView,
        TeacherStatus, TeacherUpdate,
    },
};

use super::{csv_download, BulkIds, LogQuery};
use crate::{error::ApiResult, main_lib::AppState};

#[derive(Debug, Default, Deserialize)]
struct TeacherListQuery {
    #[serde(default)]
    q: String,
    page: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct BulkStatus {
    ids: Vec<String>,
    status: TeacherStatus,
}

async fn list_teachers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TeacherListQuery>,
) -> ApiResult<Json<TeacherListView>> {
    let view = state
        .teacher_service
        .list_teachers(&query.q, PageRequest::teachers(query.page))
        .await?;
    Ok(Json(view))
}

async fn teacher_options(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<TeacherOption>>> {
    Ok(Json(state.teacher_service.teacher_options().await?))
}

async fn get_teacher(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TeacherDetailView>> {
    Ok(Json(state.teacher_service.get_teacher(&id).await?))
}

async fn update_teacher(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TeacherUpdate>,
) -> ApiResult<Json<Teacher>> {
    Ok(Json(state.teacher_service.update_teacher(&id, payload).await?))
}

async fn delete_teacher(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MutationOutcome>> {
    Ok(Json(state.teacher_service.delete_teacher(&id).await?))
}

async fn bulk_delete(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BulkIds>,
) -> ApiResult<Json<MutationOutcome>> {
    Ok(Json(state.teacher_service.bulk_delete(&payload.ids).await?))
}

async fn bulk_status(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BulkStatus>,
) -> ApiResult<Json<MutationOutcome>> {
    let outcome = state
        .teacher_service
        .bulk_update_status(&payload.ids, payload.status)
        .await?;
    Ok(Json(outcome))
}

async fn toggle_student_status(
    Path((id, student_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Student>> {
    let student = state
        .teacher_service
        .toggle_student_status(&id, &student_id)
        .await?;
    Ok(Json(student))
}

async fn teacher_stats(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TeacherStatsView>> {
    Ok(Json(state.teacher_service.teacher_stats(&id).await?))
}

async fn teacher_logs(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(query): Query<LogQuery>,
) -> ApiResult<Json<ActivityLogView>> {
    let filter = query.action_filter()?;
    Ok(Json(state.teacher_service.teacher_logs(&id, filter).await?))
}

async fn export_logs(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(query): Query<LogQuery>,
) -> ApiResult<Response> {
    let filter = query.action_filter()?;
    let export = state
        .teacher_service
        .export_teacher_logs(&id, filter)
        .await?;
    csv_download(export)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/teachers", get(list_teachers))
        .route("/teachers/options", get(teacher_options))
        .route("/teachers/bulk-delete", post(bulk_delete))
        .route("/teachers/bulk-status", post(bulk_status))
        .route(
            "/teachers/{id}",
            get(get_teacher).put(update_teacher).delete(delete_teacher),
        )
        .route("/teachers/{id}/stats", get(teacher_stats))
        .route("/teachers/{id}/logs", get(teacher_logs))
        .route("/teachers/{id}/logs/export", get(export_logs))
        .route(
            "/teachers/{id}/students/{student_id}/toggle-status",
            post(toggle_student_status),
        )
}
