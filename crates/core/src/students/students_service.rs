use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};

use super::students_model::{
    Student, StudentDetailView, StudentListView, StudentRow, StudentStatsView, StudentStatus,
    StudentUpdate,
};
use super::students_traits::StudentServiceTrait;
use crate::activity::{
    build_export, build_log_view, filter_logs, sort_logs_newest_first, ActionFilter, ActivityLog,
    ActivityLogView, CsvExport,
};
use crate::api::{
    activity_log_from_dto, flag_is_truthy, merge_student_list_item, student_from_detail,
    trade_from_dto, AdminApiTrait, ListRequest, MessageResponse, StudentUpdateRequest,
};
use crate::cache::{CacheService, Cached};
use crate::errors::{Error, Result};
use crate::fallback::{resolve_rows, sample_student_logs, sample_student_trades, Sourced};
use crate::listing::{
    filter_by_query, from_server_page, numeric_id, numeric_ids, paginate, MutationOutcome,
    PageRequest,
};
use crate::stats::{capital_pnl, TradeStats};
use crate::teachers::Teacher;
use crate::trades::{for_student, sort_newest_first, Trade};
use crate::validation::validate_student_update;

/// Maps a `{status, message}` reply: a truthy status is success.
fn status_result(response: MessageResponse, default_error: &str) -> Result<String> {
    let message = response.message_text().map(str::to_string);
    if flag_is_truthy(&response.status) {
        Ok(message.unwrap_or_default())
    } else {
        Err(Error::api(
            message.unwrap_or_else(|| default_error.to_string()),
        ))
    }
}

pub struct StudentService {
    api: Arc<dyn AdminApiTrait>,
    cache: CacheService,
}

impl StudentService {
    pub fn new(api: Arc<dyn AdminApiTrait>, cache: CacheService) -> Self {
        Self { api, cache }
    }

    async fn cache_rows<T: Cached>(&self, rows: &[T]) {
        if let Err(e) = self.cache.upsert(rows).await {
            warn!("Failed to cache {} row(s) under '{}': {}", rows.len(), T::KEY, e);
        }
    }

    fn cached_student(&self, student_id: &str) -> Result<Student> {
        self.cache
            .find::<Student>(student_id)
            .ok_or_else(|| Error::NotFound(format!("Student {} not found", student_id)))
    }

    async fn fetch_page(&self, query: &str, page: PageRequest) -> Result<Vec<Student>> {
        let items = self
            .api
            .list_students(&ListRequest {
                page: page.page,
                limit: page.page_size,
                search: query.trim().to_string(),
            })
            .await?;

        let cached = self.cache.load::<Student>();
        let now = Utc::now();
        let students: Vec<Student> = items
            .into_iter()
            .map(|item| {
                let existing = cached.iter().find(|s| s.id == item.id);
                merge_student_list_item(item, existing, now)
            })
            .collect();
        self.cache_rows(&students).await;
        Ok(students)
    }

    async fn remote_logs(&self, student_id: &str) -> Result<Vec<ActivityLog>> {
        let id = numeric_id(student_id, "student")?;
        let dtos = self
            .api
            .student_logs(id)
            .await?
            .into_result("Failed to fetch activity logs")?;
        let logs: Vec<ActivityLog> = dtos
            .into_iter()
            .filter_map(activity_log_from_dto)
            .map(|mut log| {
                // The student endpoint does not always echo the owner back.
                log.student_id.get_or_insert_with(|| student_id.to_string());
                log
            })
            .collect();
        self.cache_rows(&logs).await;
        Ok(logs)
    }

    async fn load_logs(&self, student_id: &str) -> Result<(Student, Sourced<ActivityLog>)> {
        let student = self.cached_student(student_id)?;
        let now = Utc::now();
        let remote = self.remote_logs(student_id).await;
        let mut sourced = resolve_rows(
            remote,
            || {
                self.cache
                    .load::<ActivityLog>()
                    .into_iter()
                    .filter(|l| l.belongs_to_student(student_id))
                    .collect()
            },
            || sample_student_logs(&student, now),
        );
        sort_logs_newest_first(&mut sourced.rows);
        Ok((student, sourced))
    }

    /// Bulk delete when `status` is `None`, otherwise bulk (de)activation.
    async fn bulk_request(
        &self,
        student_ids: &[String],
        status: Option<StudentStatus>,
    ) -> Result<String> {
        let ids = numeric_ids(student_ids)?;
        let (response, default_error) = match status {
            None => (
                self.api.bulk_delete_students(&ids).await?,
                "Bulk delete failed",
            ),
            Some(StudentStatus::Active) => (
                self.api.bulk_activate_students(&ids).await?,
                "Bulk status update failed",
            ),
            Some(StudentStatus::Inactive) => (
                self.api.bulk_deactivate_students(&ids).await?,
                "Bulk status update failed",
            ),
        };
        status_result(response, default_error)
    }
}

#[async_trait]
impl StudentServiceTrait for StudentService {
    async fn list_students(&self, query: &str, page: PageRequest) -> Result<StudentListView> {
        let page = match self.fetch_page(query, page).await {
            Ok(students) => from_server_page(students, page),
            Err(e) => {
                warn!("Student list failed, using cache: {}", e);
                let matching = filter_by_query(&self.cache.load::<Student>(), query);
                return Ok(StudentListView {
                    page: paginate(matching, page).map(StudentRow::from),
                    query: query.to_string(),
                    error: Some(e.user_message()),
                });
            }
        };

        Ok(StudentListView {
            page: page.map(StudentRow::from),
            query: query.to_string(),
            error: None,
        })
    }

    async fn get_student(&self, student_id: &str) -> Result<StudentDetailView> {
        let remote = match numeric_id(student_id, "student") {
            Ok(id) => match self.api.view_student(id).await {
                Ok(envelope) => envelope.into_result("Failed to fetch student"),
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };

        let (student, last_updated, error) = match remote {
            Ok(dto) => {
                let last_updated = dto.last_updated.clone();
                let student = student_from_detail(dto, Utc::now());
                self.cache_rows(std::slice::from_ref(&student)).await;
                (student, last_updated, None)
            }
            Err(e) => {
                warn!("Student {} view failed, using cache: {}", student_id, e);
                (self.cached_student(student_id)?, None, Some(e.user_message()))
            }
        };

        let teacher = self.cache.find::<Teacher>(&student.teacher_id);
        let mut trades: Vec<Trade> = for_student(&self.cache.load::<Trade>(), &student.id)
            .cloned()
            .collect();
        sort_newest_first(&mut trades);

        Ok(StudentDetailView {
            student: StudentRow::from(student),
            teacher,
            trades,
            last_updated,
            error,
        })
    }

    async fn update_student(&self, student_id: &str, form: StudentUpdate) -> Result<Student> {
        validate_student_update(&form)?;
        let id = numeric_id(student_id, "student")?;
        let teacher_id = numeric_id(&form.teacher_id, "teacher")?;

        let request = StudentUpdateRequest {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            mobile: form.mobile.trim().to_string(),
            teacher_id,
            status: form.status.as_str().to_string(),
            initial_capital: form.initial_capital,
            current_capital: form.current_capital,
            risk_percent: form.risk_percentage,
            strategy: Some(form.strategy.trim().to_string()).filter(|s| !s.is_empty()),
        };
        let response = self.api.update_student(id, &request).await?;
        status_result(response, "Failed to update student")?;

        let teacher_name = self
            .cache
            .find::<Teacher>(&form.teacher_id)
            .map(|t| t.name);
        let joined_date = self
            .cache
            .find::<Student>(student_id)
            .map(|s| s.joined_date)
            .unwrap_or_else(|| Utc::now().to_rfc3339());
        let student = Student {
            id: student_id.to_string(),
            name: request.name,
            email: request.email,
            mobile: request.mobile,
            teacher_id: form.teacher_id.trim().to_string(),
            teacher_name,
            status: form.status,
            initial_capital: form.initial_capital,
            current_capital: form.current_capital,
            risk_percentage: form.risk_percentage,
            strategy: request.strategy.unwrap_or_default(),
            joined_date,
        };
        self.cache_rows(std::slice::from_ref(&student)).await;
        info!("Updated student {}", student_id);
        Ok(student)
    }

    async fn delete_student(&self, student_id: &str) -> Result<MutationOutcome> {
        let remote = match numeric_id(student_id, "student") {
            Ok(id) => match self.api.delete_student(id).await {
                Ok(response) => response
                    .message_text()
                    .map(str::to_string)
                    .ok_or_else(|| Error::api("Delete operation failed")),
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };
        if let Err(e) = &remote {
            warn!("Delete of student {} failed, removing locally: {}", student_id, e);
        }

        let ids = vec![student_id.to_string()];
        self.cache.remove_ids::<Student>(&ids).await?;
        Ok(MutationOutcome::remote(ids, remote))
    }

    async fn bulk_delete(&self, student_ids: &[String]) -> Result<MutationOutcome> {
        if student_ids.is_empty() {
            return Ok(MutationOutcome::local(Vec::new()));
        }
        let remote = self.bulk_request(student_ids, None).await;
        if let Err(e) = &remote {
            warn!("Bulk delete failed, removing locally: {}", e);
        }
        self.cache.remove_ids::<Student>(student_ids).await?;
        Ok(MutationOutcome::remote(student_ids.to_vec(), remote))
    }

    async fn bulk_update_status(
        &self,
        student_ids: &[String],
        status: StudentStatus,
    ) -> Result<MutationOutcome> {
        if student_ids.is_empty() {
            return Ok(MutationOutcome::local(Vec::new()));
        }
        let remote = self.bulk_request(student_ids, Some(status)).await;
        if let Err(e) = &remote {
            warn!("Bulk status update failed, applying locally: {}", e);
        }
        let changed = self
            .cache
            .map_ids::<Student, _>(student_ids, |s| s.status = status)
            .await?;
        debug!("Set {} student(s) to {}", changed, status.as_str());
        Ok(MutationOutcome::remote(student_ids.to_vec(), remote))
    }

    async fn set_student_status(
        &self,
        student_id: &str,
        status: StudentStatus,
    ) -> Result<Student> {
        let changed = self
            .cache
            .map_ids::<Student, _>(&[student_id.to_string()], |s| s.status = status)
            .await?;
        if changed == 0 {
            return Err(Error::NotFound(format!("Student {} not found", student_id)));
        }
        self.cached_student(student_id)
    }

    async fn student_stats(&self, student_id: &str) -> Result<StudentStatsView> {
        let student = self.cached_student(student_id)?;
        let now = Utc::now();

        let remote = match numeric_id(student_id, "student") {
            Ok(id) => match self.api.student_stats(id).await {
                Ok(envelope) => envelope.into_result("Failed to fetch statistics"),
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };
        let remote_trades = match remote {
            Ok(data) => {
                let trades: Vec<Trade> = data
                    .trades
                    .into_iter()
                    .map(|t| {
                        let mut trade = trade_from_dto(t, &student.teacher_id);
                        trade.student_id.get_or_insert_with(|| student.id.clone());
                        trade
                    })
                    .collect();
                self.cache_rows(&trades).await;
                Ok(trades)
            }
            Err(e) => {
                warn!("Stats for student {} failed, using cache: {}", student_id, e);
                Err(e)
            }
        };

        let trades = resolve_rows(
            remote_trades,
            || for_student(&self.cache.load::<Trade>(), student_id).cloned().collect(),
            || sample_student_trades(&student, now),
        );
        let (pnl, pnl_percent) = capital_pnl(&student);

        Ok(StudentStatsView {
            trades: TradeStats::from_trades(&trades.rows),
            capital_pnl: pnl,
            capital_pnl_percent: pnl_percent,
            from_fallback: trades.from_fallback(),
            error: trades.error,
            student: StudentRow::from(student),
        })
    }

    async fn student_logs(
        &self,
        student_id: &str,
        filter: ActionFilter,
    ) -> Result<ActivityLogView> {
        let (student, sourced) = self.load_logs(student_id).await?;
        let from_fallback = sourced.from_fallback();
        Ok(build_log_view(
            &student.name,
            &sourced.rows,
            filter,
            from_fallback,
            sourced.error,
            Utc::now(),
        ))
    }

    async fn export_student_logs(
        &self,
        student_id: &str,
        filter: ActionFilter,
    ) -> Result<Option<CsvExport>> {
        let (student, sourced) = self.load_logs(student_id).await?;
        build_export(&student.name, &filter_logs(&sourced.rows, filter))
    }
}
