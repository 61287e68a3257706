//! In-memory doubles of the cache store and the admin API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::activity::{ActivityAction, ActivityLog};
use crate::api::*;
use crate::cache::{CacheService, CacheStoreTrait};
use crate::constants::CACHE_PREFIX;
use crate::errors::{ApiError, Error, Result};
use crate::students::{Student, StudentStatus};
use crate::teachers::{Teacher, TeacherStatus};
use crate::trades::{Exchange, Trade, TradeSide, TradeStatus};

// --- Record builders ---

pub fn teacher(id: &str, name: &str) -> Teacher {
    Teacher {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@synckaro.in", name.to_lowercase().replace(' ', ".")),
        mobile: "9811122233".to_string(),
        phone: None,
        status: TeacherStatus::Active,
        total_students: 0,
        total_trades: 0,
        total_capital: None,
        win_rate: None,
        specialization: None,
        joined_date: "2024-01-01T00:00:00.000Z".to_string(),
    }
}

pub fn student(id: &str, name: &str, teacher_id: &str) -> Student {
    Student {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@synckaro.com", name.to_lowercase().replace(' ', ".")),
        mobile: "9876543210".to_string(),
        teacher_id: teacher_id.to_string(),
        teacher_name: None,
        status: StudentStatus::Active,
        initial_capital: Decimal::from(100_000),
        current_capital: Decimal::from(110_000),
        risk_percentage: 2.0,
        strategy: "Moderate".to_string(),
        joined_date: "2024-01-01T00:00:00.000Z".to_string(),
    }
}

pub fn trade(id: &str, teacher_id: &str, student_id: &str, stock: &str, at: &str, pnl: i64) -> Trade {
    Trade {
        id: id.to_string(),
        teacher_id: teacher_id.to_string(),
        teacher_name: None,
        student_id: Some(student_id.to_string()),
        student_name: None,
        stock: stock.to_string(),
        quantity: 10,
        price: Some(Decimal::from(100)),
        trade_type: TradeSide::Buy,
        exchange: Exchange::Nse,
        status: TradeStatus::Executed,
        timestamp: Some(at.to_string()),
        created_at: None,
        pnl: Some(Decimal::from(pnl)),
    }
}

pub fn activity(
    id: &str,
    teacher_id: Option<&str>,
    student_id: Option<&str>,
    action: ActivityAction,
    at: &str,
) -> ActivityLog {
    ActivityLog {
        id: id.to_string(),
        teacher_id: teacher_id.map(str::to_string),
        student_id: student_id.map(str::to_string),
        action,
        timestamp: at.to_string(),
        details: format!("{} {}", action.label(), id),
    }
}

// --- Memory cache store ---

#[derive(Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCacheStore {
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn raw_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl CacheStoreTrait for MemoryCacheStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(&format!("{}{}", CACHE_PREFIX, key))
            .cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(format!("{}{}", CACHE_PREFIX, key), value);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .remove(&format!("{}{}", CACHE_PREFIX, key));
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .retain(|k, _| !k.starts_with(CACHE_PREFIX));
        Ok(())
    }
}

pub fn memory_cache() -> (Arc<MemoryCacheStore>, CacheService) {
    let store = Arc::new(MemoryCacheStore::default());
    let service = CacheService::new(store.clone());
    (store, service)
}

// --- Mock admin API ---

#[derive(Default)]
pub struct MockAdminApi {
    pub calls: Mutex<Vec<String>>,
    pub last_ids: Mutex<Vec<i64>>,
    pub token: Mutex<Option<String>>,
    /// When set, every call fails with this message.
    pub fail_with: Mutex<Option<String>>,
    pub login_response: Mutex<MessageResponse>,
    pub verify_response: Mutex<VerifyResponse>,
    pub mutation_response: Mutex<MessageResponse>,
    pub student_list: Mutex<Vec<StudentListItem>>,
    pub student_view: Mutex<Option<StudentDetailDto>>,
    pub last_student_update: Mutex<Option<StudentUpdateRequest>>,
    pub teacher_list: Mutex<Vec<TeacherListItem>>,
    pub teacher_view: Mutex<Option<TeacherDetailDto>>,
    pub last_teacher_update: Mutex<Option<TeacherUpdateRequest>>,
    pub logs: Mutex<Vec<ActivityLogDto>>,
    pub stats: Mutex<Option<StatsDataDto>>,
    pub api_logs: Mutex<Option<DataEnvelope<Vec<ApiLogEntry>>>>,
    pub table_counts: Mutex<Option<DataEnvelope<Vec<TableCountEntry>>>>,
}

impl MockAdminApi {
    pub fn failing(message: &str) -> Self {
        let api = Self::default();
        *api.fail_with.lock().unwrap() = Some(message.to_string());
        api
    }

    pub fn ok_message(message: &str) -> MessageResponse {
        MessageResponse {
            status: Some(StatusFlag::Bool(true)),
            message: Some(message.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) -> Result<()> {
        self.calls.lock().unwrap().push(call.to_string());
        match self.fail_with.lock().unwrap().as_ref() {
            Some(message) => Err(Error::Api(ApiError::new(Some(500), message.clone()))),
            None => Ok(()),
        }
    }

    fn envelope<T>(data: Option<T>) -> DataEnvelope<T> {
        DataEnvelope {
            status: Some(StatusFlag::Bool(data.is_some())),
            success: None,
            message: None,
            data,
        }
    }
}

#[async_trait]
impl AdminApiTrait for MockAdminApi {
    fn set_access_token(&self, token: Option<String>) {
        *self.token.lock().unwrap() = token;
    }

    async fn login(&self, _request: &LoginRequest) -> Result<MessageResponse> {
        self.record("login")?;
        Ok(self.login_response.lock().unwrap().clone())
    }

    async fn verify(&self, _request: &VerifyRequest) -> Result<VerifyResponse> {
        self.record("verify")?;
        Ok(self.verify_response.lock().unwrap().clone())
    }

    async fn logout(&self) -> Result<MessageResponse> {
        self.record("logout")?;
        Ok(Self::ok_message("Logged out"))
    }

    async fn list_students(&self, _request: &ListRequest) -> Result<Vec<StudentListItem>> {
        self.record("list_students")?;
        Ok(self.student_list.lock().unwrap().clone())
    }

    async fn view_student(&self, _student_id: i64) -> Result<DataEnvelope<StudentDetailDto>> {
        self.record("view_student")?;
        let data = self.student_view.lock().unwrap().clone();
        Ok(DataEnvelope {
            status: None,
            success: Some(StatusFlag::Bool(data.is_some())),
            message: None,
            data,
        })
    }

    async fn update_student(
        &self,
        _student_id: i64,
        request: &StudentUpdateRequest,
    ) -> Result<MessageResponse> {
        self.record("update_student")?;
        *self.last_student_update.lock().unwrap() = Some(request.clone());
        Ok(self.mutation_response.lock().unwrap().clone())
    }

    async fn delete_student(&self, student_id: i64) -> Result<MessageResponse> {
        self.record("delete_student")?;
        *self.last_ids.lock().unwrap() = vec![student_id];
        Ok(self.mutation_response.lock().unwrap().clone())
    }

    async fn bulk_delete_students(&self, student_ids: &[i64]) -> Result<MessageResponse> {
        self.record("bulk_delete_students")?;
        *self.last_ids.lock().unwrap() = student_ids.to_vec();
        Ok(self.mutation_response.lock().unwrap().clone())
    }

    async fn bulk_activate_students(&self, student_ids: &[i64]) -> Result<MessageResponse> {
        self.record("bulk_activate_students")?;
        *self.last_ids.lock().unwrap() = student_ids.to_vec();
        Ok(self.mutation_response.lock().unwrap().clone())
    }

    async fn bulk_deactivate_students(&self, student_ids: &[i64]) -> Result<MessageResponse> {
        self.record("bulk_deactivate_students")?;
        *self.last_ids.lock().unwrap() = student_ids.to_vec();
        Ok(self.mutation_response.lock().unwrap().clone())
    }

    async fn student_logs(&self, _student_id: i64) -> Result<DataEnvelope<Vec<ActivityLogDto>>> {
        self.record("student_logs")?;
        Ok(Self::envelope(Some(self.logs.lock().unwrap().clone())))
    }

    async fn student_stats(&self, _student_id: i64) -> Result<DataEnvelope<StatsDataDto>> {
        self.record("student_stats")?;
        Ok(Self::envelope(self.stats.lock().unwrap().clone()))
    }

    async fn list_teachers(&self, _request: &ListRequest) -> Result<Vec<TeacherListItem>> {
        self.record("list_teachers")?;
        Ok(self.teacher_list.lock().unwrap().clone())
    }

    async fn view_teacher(
        &self,
        _teacher_id: i64,
        _admin_id: Option<i64>,
    ) -> Result<DataEnvelope<TeacherDetailDto>> {
        self.record("view_teacher")?;
        let data = self.teacher_view.lock().unwrap().clone();
        Ok(DataEnvelope {
            status: None,
            success: Some(StatusFlag::Bool(data.is_some())),
            message: None,
            data,
        })
    }

    async fn update_teacher(
        &self,
        _teacher_id: i64,
        request: &TeacherUpdateRequest,
    ) -> Result<MessageResponse> {
        self.record("update_teacher")?;
        *self.last_teacher_update.lock().unwrap() = Some(request.clone());
        Ok(self.mutation_response.lock().unwrap().clone())
    }

    async fn delete_teacher(&self, teacher_id: i64) -> Result<MessageResponse> {
        self.record("delete_teacher")?;
        *self.last_ids.lock().unwrap() = vec![teacher_id];
        Ok(self.mutation_response.lock().unwrap().clone())
    }

    async fn teacher_logs(&self, _teacher_id: i64) -> Result<DataEnvelope<Vec<ActivityLogDto>>> {
        self.record("teacher_logs")?;
        Ok(Self::envelope(Some(self.logs.lock().unwrap().clone())))
    }

    async fn teacher_stats(&self, _teacher_id: i64) -> Result<DataEnvelope<StatsDataDto>> {
        self.record("teacher_stats")?;
        Ok(Self::envelope(self.stats.lock().unwrap().clone()))
    }

    async fn api_logs(&self) -> Result<DataEnvelope<Vec<ApiLogEntry>>> {
        self.record("api_logs")?;
        self.api_logs
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::api("Invalid response format"))
    }

    async fn table_counts(&self) -> Result<DataEnvelope<Vec<TableCountEntry>>> {
        self.record("table_counts")?;
        self.table_counts
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::api("Invalid response format"))
    }
}
