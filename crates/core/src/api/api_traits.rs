use async_trait::async_trait;

use super::api_model::*;
use crate::errors::Result;

/// The admin REST backend.
///
/// Every method is one HTTP call. Transport failures, non-2xx replies and
/// unparseable bodies come back as [`crate::errors::Error::Api`].
#[async_trait]
pub trait AdminApiTrait: Send + Sync {
    /// Sets or clears the bearer token sent with authenticated calls.
    fn set_access_token(&self, token: Option<String>);

    // Auth
    async fn login(&self, request: &LoginRequest) -> Result<MessageResponse>;
    async fn verify(&self, request: &VerifyRequest) -> Result<VerifyResponse>;
    async fn logout(&self) -> Result<MessageResponse>;

    // Students
    async fn list_students(&self, request: &ListRequest) -> Result<Vec<StudentListItem>>;
    async fn view_student(&self, student_id: i64) -> Result<DataEnvelope<StudentDetailDto>>;
    async fn update_student(
        &self,
        student_id: i64,
        request: &StudentUpdateRequest,
    ) -> Result<MessageResponse>;
    async fn delete_student(&self, student_id: i64) -> Result<MessageResponse>;
    async fn bulk_delete_students(&self, student_ids: &[i64]) -> Result<MessageResponse>;
    async fn bulk_activate_students(&self, student_ids: &[i64]) -> Result<MessageResponse>;
    async fn bulk_deactivate_students(&self, student_ids: &[i64]) -> Result<MessageResponse>;
    async fn student_logs(&self, student_id: i64) -> Result<DataEnvelope<Vec<ActivityLogDto>>>;
    async fn student_stats(&self, student_id: i64) -> Result<DataEnvelope<StatsDataDto>>;

    // Teachers
    async fn list_teachers(&self, request: &ListRequest) -> Result<Vec<TeacherListItem>>;
    async fn view_teacher(
        &self,
        teacher_id: i64,
        admin_id: Option<i64>,
    ) -> Result<DataEnvelope<TeacherDetailDto>>;
    async fn update_teacher(
        &self,
        teacher_id: i64,
        request: &TeacherUpdateRequest,
    ) -> Result<MessageResponse>;
    async fn delete_teacher(&self, teacher_id: i64) -> Result<MessageResponse>;
    async fn teacher_logs(&self, teacher_id: i64) -> Result<DataEnvelope<Vec<ActivityLogDto>>>;
    async fn teacher_stats(&self, teacher_id: i64) -> Result<DataEnvelope<StatsDataDto>>;

    // System
    async fn api_logs(&self) -> Result<DataEnvelope<Vec<ApiLogEntry>>>;
    async fn table_counts(&self) -> Result<DataEnvelope<Vec<TableCountEntry>>>;
}
