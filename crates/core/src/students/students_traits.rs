use async_trait::async_trait;

use super::students_model::{
    Student, StudentDetailView, StudentListView, StudentStatsView, StudentStatus, StudentUpdate,
};
use crate::activity::{ActionFilter, ActivityLogView, CsvExport};
use crate::errors::Result;
use crate::listing::{MutationOutcome, PageRequest};

/// Student pages of the dashboard.
#[async_trait]
pub trait StudentServiceTrait: Send + Sync {
    async fn list_students(&self, query: &str, page: PageRequest) -> Result<StudentListView>;
    async fn get_student(&self, student_id: &str) -> Result<StudentDetailView>;
    async fn update_student(&self, student_id: &str, form: StudentUpdate) -> Result<Student>;
    async fn delete_student(&self, student_id: &str) -> Result<MutationOutcome>;
    async fn bulk_delete(&self, student_ids: &[String]) -> Result<MutationOutcome>;
    async fn bulk_update_status(
        &self,
        student_ids: &[String],
        status: StudentStatus,
    ) -> Result<MutationOutcome>;
    /// Local status switch from the profile page.
    async fn set_student_status(&self, student_id: &str, status: StudentStatus)
        -> Result<Student>;
    async fn student_stats(&self, student_id: &str) -> Result<StudentStatsView>;
    async fn student_logs(&self, student_id: &str, filter: ActionFilter)
        -> Result<ActivityLogView>;
    async fn export_student_logs(
        &self,
        student_id: &str,
        filter: ActionFilter,
    ) -> Result<Option<CsvExport>>;
}
