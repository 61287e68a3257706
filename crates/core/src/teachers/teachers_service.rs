use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};

use super::teachers_model::{
    Teacher, TeacherDetailView, TeacherListView, TeacherOption, TeacherStatsView, TeacherStatus,
    TeacherUpdate,
};
use super::teachers_traits::TeacherServiceTrait;
use crate::activity::{
    build_export, build_log_view, filter_logs, sort_logs_newest_first, ActionFilter, ActivityLog,
    ActivityLogView, CsvExport,
};
use crate::api::{
    activity_log_from_dto, flag_is_truthy, student_from_ref, teacher_from_detail,
    teacher_from_list_item, trade_from_dto, AdminApiTrait, ListRequest, TeacherUpdateRequest,
};
use crate::cache::{CacheService, Cached};
use crate::constants::{RECENT_TRADES_LIMIT, TEACHER_LOOKUP_LIMIT, TOP_STUDENTS_LIMIT};
use crate::errors::{Error, Result};
use crate::fallback::{
    resolve_rows, sample_students, sample_teacher_logs, sample_teacher_trades, Sourced,
};
use crate::listing::{filter_by_query, numeric_id, paginate, MutationOutcome, PageRequest};
use crate::stats::{top_students, TradeStats};
use crate::students::{Student, StudentRow, StudentStatus};
use crate::trades::{for_teacher, recent_for_teacher, sort_newest_first, Trade};
use crate::validation::validate_teacher_update;

pub struct TeacherService {
    api: Arc<dyn AdminApiTrait>,
    cache: CacheService,
}

impl TeacherService {
    pub fn new(api: Arc<dyn AdminApiTrait>, cache: CacheService) -> Self {
        Self { api, cache }
    }

    async fn cache_rows<T: Cached>(&self, rows: &[T]) {
        if let Err(e) = self.cache.upsert(rows).await {
            warn!("Failed to cache {} row(s) under '{}': {}", rows.len(), T::KEY, e);
        }
    }

    /// Teachers from the backend merged over the cached copies.
    async fn fetch_teachers(&self) -> Result<Vec<Teacher>> {
        let items = self
            .api
            .list_teachers(&ListRequest {
                page: 1,
                limit: TEACHER_LOOKUP_LIMIT,
                search: String::new(),
            })
            .await?;

        let cached = self.cache.load::<Teacher>();
        let now = Utc::now();
        let teachers: Vec<Teacher> = items
            .into_iter()
            .map(|item| {
                let existing = cached.iter().find(|t| t.id == item.id);
                teacher_from_list_item(item, existing, now)
            })
            .collect();
        self.cache_rows(&teachers).await;
        Ok(teachers)
    }

    fn cached_teacher(&self, teacher_id: &str) -> Result<Teacher> {
        self.cache
            .find::<Teacher>(teacher_id)
            .ok_or_else(|| Error::NotFound(format!("Teacher {} not found", teacher_id)))
    }

    fn cached_students_of(&self, teacher_id: &str) -> Vec<Student> {
        self.cache
            .load::<Student>()
            .into_iter()
            .filter(|s| s.teacher_id == teacher_id)
            .collect()
    }

    async fn remote_logs(&self, teacher_id: &str) -> Result<Vec<ActivityLog>> {
        let id = numeric_id(teacher_id, "teacher")?;
        let dtos = self
            .api
            .teacher_logs(id)
            .await?
            .into_result("Failed to fetch activity logs")?;
        let logs: Vec<ActivityLog> = dtos.into_iter().filter_map(activity_log_from_dto).collect();
        self.cache_rows(&logs).await;
        Ok(logs)
    }

    async fn load_logs(&self, teacher_id: &str) -> Result<(Teacher, Sourced<ActivityLog>)> {
        let teacher = self.cached_teacher(teacher_id)?;
        let now = Utc::now();
        let remote = self.remote_logs(teacher_id).await;
        let mut sourced = resolve_rows(
            remote,
            || {
                self.cache
                    .load::<ActivityLog>()
                    .into_iter()
                    .filter(|l| l.belongs_to_teacher(teacher_id))
                    .collect()
            },
            || sample_teacher_logs(teacher_id, now),
        );
        sort_logs_newest_first(&mut sourced.rows);
        Ok((teacher, sourced))
    }
}

#[async_trait]
impl TeacherServiceTrait for TeacherService {
    async fn list_teachers(&self, query: &str, page: PageRequest) -> Result<TeacherListView> {
        let (teachers, error) = match self.fetch_teachers().await {
            Ok(teachers) => (teachers, None),
            Err(e) => {
                warn!("Teacher list failed, using cache: {}", e);
                (self.cache.load::<Teacher>(), Some(e.user_message()))
            }
        };

        let matching = filter_by_query(&teachers, query);
        Ok(TeacherListView {
            page: paginate(matching, page),
            query: query.to_string(),
            error,
        })
    }

    async fn teacher_options(&self) -> Result<Vec<TeacherOption>> {
        let teachers = match self.fetch_teachers().await {
            Ok(teachers) => teachers,
            Err(e) => {
                warn!("Teacher lookup failed, using cache: {}", e);
                self.cache.load::<Teacher>()
            }
        };
        Ok(teachers
            .into_iter()
            .map(|t| TeacherOption {
                id: t.id,
                name: t.name,
            })
            .collect())
    }

    async fn get_teacher(&self, teacher_id: &str) -> Result<TeacherDetailView> {
        let admin_id = self.cache.session().and_then(|s| s.user_id());
        let remote = match numeric_id(teacher_id, "teacher") {
            Ok(id) => match self.api.view_teacher(id, admin_id).await {
                Ok(envelope) => envelope.into_result("Failed to fetch teacher"),
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };

        let dto = match remote {
            Ok(dto) => dto,
            Err(e) => {
                warn!("Teacher {} view failed, using cache: {}", teacher_id, e);
                let teacher = self.cached_teacher(teacher_id)?;
                let students: Vec<StudentRow> = self
                    .cached_students_of(teacher_id)
                    .into_iter()
                    .map(StudentRow::from)
                    .collect();
                let active_students = students.iter().filter(|s| s.student.is_active()).count();
                let recent_trades = recent_for_teacher(
                    &self.cache.load::<Trade>(),
                    teacher_id,
                    RECENT_TRADES_LIMIT,
                );
                return Ok(TeacherDetailView {
                    teacher,
                    students,
                    active_students,
                    recent_trades,
                    last_updated: None,
                    error: Some(e.user_message()),
                });
            }
        };

        let now = Utc::now();
        let cached_teacher = self.cache.find::<Teacher>(&dto.teacher_id);
        let teacher = teacher_from_detail(&dto, cached_teacher.as_ref(), now);

        let cached_students = self.cache.load::<Student>();
        let students: Vec<Student> = dto
            .associated_students
            .into_iter()
            .map(|s| {
                let existing = cached_students.iter().find(|c| c.id == s.id);
                student_from_ref(s, Some(&teacher), existing, now)
            })
            .collect();

        let mut recent_trades: Vec<Trade> = dto
            .recent_trades
            .into_iter()
            .map(|t| trade_from_dto(t, &teacher.id))
            .collect();
        sort_newest_first(&mut recent_trades);
        recent_trades.truncate(RECENT_TRADES_LIMIT);

        self.cache_rows(std::slice::from_ref(&teacher)).await;
        self.cache_rows(&students).await;
        self.cache_rows(&recent_trades).await;

        let active_students = students.iter().filter(|s| s.is_active()).count();
        Ok(TeacherDetailView {
            teacher,
            students: students.into_iter().map(StudentRow::from).collect(),
            active_students,
            recent_trades,
            last_updated: dto.last_updated,
            error: None,
        })
    }

    async fn update_teacher(&self, teacher_id: &str, form: TeacherUpdate) -> Result<Teacher> {
        validate_teacher_update(&form)?;
        let id = numeric_id(teacher_id, "teacher")?;

        let phone = Some(form.phone.trim().to_string()).filter(|p| !p.is_empty());
        let specialization =
            Some(form.specialization.trim().to_string()).filter(|s| !s.is_empty());
        let request = TeacherUpdateRequest {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: phone.clone(),
            specialization: specialization.clone(),
            status: form.status.as_str().to_string(),
        };

        let response = self.api.update_teacher(id, &request).await?;
        let message = response.message_text().map(str::to_string);
        if !flag_is_truthy(&response.status) || message.is_none() {
            return Err(Error::api(
                message.unwrap_or_else(|| "Failed to update teacher".to_string()),
            ));
        }

        let mut teacher = self.cache.find::<Teacher>(teacher_id).unwrap_or_else(|| Teacher {
            id: teacher_id.to_string(),
            name: String::new(),
            email: String::new(),
            mobile: String::new(),
            phone: None,
            status: TeacherStatus::default(),
            total_students: 0,
            total_trades: 0,
            total_capital: None,
            win_rate: None,
            specialization: None,
            joined_date: Utc::now().to_rfc3339(),
        });
        teacher.name = request.name;
        teacher.email = request.email;
        if let Some(phone) = &phone {
            teacher.mobile = phone.chars().filter(char::is_ascii_digit).collect();
        }
        teacher.phone = phone;
        teacher.specialization = specialization;
        teacher.status = form.status;

        self.cache_rows(std::slice::from_ref(&teacher)).await;
        info!("Updated teacher {}", teacher_id);
        Ok(teacher)
    }

    async fn delete_teacher(&self, teacher_id: &str) -> Result<MutationOutcome> {
        let remote = match numeric_id(teacher_id, "teacher") {
            Ok(id) => match self.api.delete_teacher(id).await {
                Ok(response) => response
                    .message_text()
                    .map(str::to_string)
                    .ok_or_else(|| Error::api("Delete operation failed")),
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };
        if let Err(e) = &remote {
            warn!("Delete of teacher {} failed, removing locally: {}", teacher_id, e);
        }

        let ids = vec![teacher_id.to_string()];
        self.cache.remove_ids::<Teacher>(&ids).await?;
        Ok(MutationOutcome::remote(ids, remote))
    }

    async fn bulk_delete(&self, teacher_ids: &[String]) -> Result<MutationOutcome> {
        self.cache.remove_ids::<Teacher>(teacher_ids).await?;
        debug!("Removed {} teacher(s) from the cache", teacher_ids.len());
        Ok(MutationOutcome::local(teacher_ids.to_vec()))
    }

    async fn bulk_update_status(
        &self,
        teacher_ids: &[String],
        status: TeacherStatus,
    ) -> Result<MutationOutcome> {
        let changed = self
            .cache
            .map_ids::<Teacher, _>(teacher_ids, |t| t.status = status)
            .await?;
        debug!("Set {} teacher(s) to {}", changed, status.as_str());
        Ok(MutationOutcome::local(teacher_ids.to_vec()))
    }

    async fn toggle_student_status(&self, teacher_id: &str, student_id: &str) -> Result<Student> {
        let mut student = self
            .cache
            .find::<Student>(student_id)
            .filter(|s| s.teacher_id == teacher_id)
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "Student {} not found for teacher {}",
                    student_id, teacher_id
                ))
            })?;

        student.status = match student.status {
            StudentStatus::Active => StudentStatus::Inactive,
            StudentStatus::Inactive => StudentStatus::Active,
        };
        let status = student.status;
        self.cache
            .map_ids::<Student, _>(&[student_id.to_string()], |s| s.status = status)
            .await?;
        Ok(student)
    }

    async fn teacher_stats(&self, teacher_id: &str) -> Result<TeacherStatsView> {
        let teacher = self.cached_teacher(teacher_id)?;
        let now = Utc::now();

        let remote = match numeric_id(teacher_id, "teacher") {
            Ok(id) => match self.api.teacher_stats(id).await {
                Ok(envelope) => envelope.into_result("Failed to fetch statistics"),
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };
        let (remote_students, remote_trades) = match remote {
            Ok(data) => {
                let cached = self.cache.load::<Student>();
                let students: Vec<Student> = data
                    .students
                    .unwrap_or_default()
                    .into_iter()
                    .map(|s| {
                        let existing = cached.iter().find(|c| c.id == s.id);
                        student_from_ref(s, Some(&teacher), existing, now)
                    })
                    .collect();
                let trades: Vec<Trade> = data
                    .trades
                    .into_iter()
                    .map(|t| trade_from_dto(t, &teacher.id))
                    .collect();
                self.cache_rows(&students).await;
                self.cache_rows(&trades).await;
                (Ok(students), Ok(trades))
            }
            Err(e) => {
                warn!("Stats for teacher {} failed, using cache: {}", teacher_id, e);
                let message = e.user_message();
                (Err(Error::api(message.clone())), Err(Error::api(message)))
            }
        };

        let students = resolve_rows(
            remote_students,
            || self.cached_students_of(teacher_id),
            || sample_students(&teacher),
        );
        let trades = resolve_rows(
            remote_trades,
            || for_teacher(&self.cache.load::<Trade>(), teacher_id).cloned().collect(),
            || sample_teacher_trades(&teacher, &students.rows, now),
        );

        Ok(TeacherStatsView {
            trades: TradeStats::from_trades(&trades.rows),
            total_students: students.rows.len(),
            active_students: students.rows.iter().filter(|s| s.is_active()).count(),
            top_students: top_students(&students.rows, TOP_STUDENTS_LIMIT),
            from_fallback: students.from_fallback() || trades.from_fallback(),
            error: trades.error.or(students.error),
            teacher,
        })
    }

    async fn teacher_logs(
        &self,
        teacher_id: &str,
        filter: ActionFilter,
    ) -> Result<ActivityLogView> {
        let (teacher, sourced) = self.load_logs(teacher_id).await?;
        let from_fallback = sourced.from_fallback();
        Ok(build_log_view(
            &teacher.name,
            &sourced.rows,
            filter,
            from_fallback,
            sourced.error,
            Utc::now(),
        ))
    }

    async fn export_teacher_logs(
        &self,
        teacher_id: &str,
        filter: ActionFilter,
    ) -> Result<Option<CsvExport>> {
        let (teacher, sourced) = self.load_logs(teacher_id).await?;
        build_export(&teacher.name, &filter_logs(&sourced.rows, filter))
    }
}
