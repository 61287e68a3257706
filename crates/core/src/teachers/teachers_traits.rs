use async_trait::async_trait;

use super::teachers_model::{
    Teacher, TeacherDetailView, TeacherListView, TeacherOption, TeacherStatsView, TeacherStatus,
    TeacherUpdate,
};
use crate::activity::{ActionFilter, ActivityLogView, CsvExport};
use crate::errors::Result;
use crate::listing::{MutationOutcome, PageRequest};
use crate::students::Student;

/// Teacher pages of the dashboard.
#[async_trait]
pub trait TeacherServiceTrait: Send + Sync {
    async fn list_teachers(&self, query: &str, page: PageRequest) -> Result<TeacherListView>;
    /// Every teacher, for the student edit form's picker.
    async fn teacher_options(&self) -> Result<Vec<TeacherOption>>;
    async fn get_teacher(&self, teacher_id: &str) -> Result<TeacherDetailView>;
    async fn update_teacher(&self, teacher_id: &str, form: TeacherUpdate) -> Result<Teacher>;
    async fn delete_teacher(&self, teacher_id: &str) -> Result<MutationOutcome>;
    async fn bulk_delete(&self, teacher_ids: &[String]) -> Result<MutationOutcome>;
    async fn bulk_update_status(
        &self,
        teacher_ids: &[String],
        status: TeacherStatus,
    ) -> Result<MutationOutcome>;
    /// Flips a student between active and inactive from the teacher page.
    async fn toggle_student_status(&self, teacher_id: &str, student_id: &str) -> Result<Student>;
    async fn teacher_stats(&self, teacher_id: &str) -> Result<TeacherStatsView>;
    async fn teacher_logs(&self, teacher_id: &str, filter: ActionFilter)
        -> Result<ActivityLogView>;
    /// `None` when the filtered list is empty.
    async fn export_teacher_logs(
        &self,
        teacher_id: &str,
        filter: ActionFilter,
    ) -> Result<Option<CsvExport>>;
}
