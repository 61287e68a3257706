//! Demo data for an empty cache.
//!
//! Ids are numeric strings so seeded rows can still be sent to the backend.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::activity::{sort_logs_newest_first, ActivityAction, ActivityLog};
use crate::cache::CacheService;
use crate::errors::Result;
use crate::students::{Student, StudentStatus};
use crate::teachers::{Teacher, TeacherStatus};
use crate::trades::{sort_newest_first, Exchange, Trade, TradeSide, TradeStatus};

/// Seed used when the server fills an empty cache.
pub const DEFAULT_SEED: u64 = 20_240_101;

const TEACHER_NAMES: [&str; 24] = [
    "Rajesh Kumar",
    "Priya Sharma",
    "Amit Patel",
    "Neha Singh",
    "Vikram Mehta",
    "Anjali Gupta",
    "Sanjay Reddy",
    "Kavita Joshi",
    "Arjun Nair",
    "Pooja Desai",
    "Rahul Verma",
    "Deepika Rao",
    "Karan Shah",
    "Sneha Iyer",
    "Rohan Kapoor",
    "Madhuri Kulkarni",
    "Aditya Malhotra",
    "Shruti Pandey",
    "Varun Bhatia",
    "Ritika Agarwal",
    "Nikhil Saxena",
    "Divya Menon",
    "Suresh Pillai",
    "Ankita Khanna",
];

const SPECIALIZATIONS: [&str; 8] = [
    "Intraday Trading",
    "Swing Trading",
    "Options Trading",
    "Futures Trading",
    "Technical Analysis",
    "Fundamental Analysis",
    "Scalping",
    "Position Trading",
];

const FIRST_NAMES: [&str; 40] = [
    "Aarav", "Vivaan", "Aditya", "Vihaan", "Arjun", "Sai", "Arnav", "Ayaan", "Krishna", "Ishaan",
    "Shaurya", "Atharv", "Advik", "Pratham", "Reyansh", "Kiaan", "Aadhya", "Ananya", "Pari",
    "Anika", "Navya", "Angel", "Diya", "Myra", "Sara", "Ira", "Anvi", "Riya", "Prisha", "Aarohi",
    "Shanaya", "Saanvi", "Kavya", "Aarya", "Pihu", "Avni", "Aahana", "Zara", "Mishka", "Nisha",
];

const LAST_NAMES: [&str; 20] = [
    "Kumar", "Sharma", "Patel", "Singh", "Gupta", "Reddy", "Joshi", "Nair", "Verma", "Rao", "Shah",
    "Iyer", "Mehta", "Desai", "Kulkarni", "Pandey", "Agarwal", "Saxena", "Menon", "Khanna",
];

const STOCKS: [&str; 20] = [
    "RELIANCE", "TCS", "HDFCBANK", "INFY", "ICICIBANK", "HINDUNILVR", "ITC", "SBIN", "BHARTIARTL",
    "KOTAKBANK", "LT", "AXISBANK", "ASIANPAINT", "MARUTI", "TITAN", "SUNPHARMA", "ULTRACEMCO",
    "NESTLEIND", "BAJFINANCE", "WIPRO",
];

const STRATEGIES: [&str; 3] = ["Conservative", "Moderate", "Aggressive"];

/// Trade rows logged per teacher.
const LOGGED_TRADES_PER_TEACHER: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct SeedData {
    pub teachers: Vec<Teacher>,
    pub students: Vec<Student>,
    pub trades: Vec<Trade>,
    pub activity_logs: Vec<ActivityLog>,
}

struct Generator {
    rng: StdRng,
    now: DateTime<Utc>,
}

fn iso(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl Generator {
    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.rng.gen_range(0..items.len())]
    }

    /// Uniform instant in `[start, end]`; `start` when the range is empty.
    fn instant_between(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> DateTime<Utc> {
        let span = (end - start).num_seconds();
        if span <= 0 {
            return start;
        }
        start + Duration::seconds(self.rng.gen_range(0..=span))
    }

    /// Amount with two decimals drawn from `[min_paise, max_paise]`.
    fn amount(&mut self, min_paise: i64, max_paise: i64) -> Decimal {
        Decimal::new(self.rng.gen_range(min_paise..=max_paise), 2)
    }

    fn phone(&mut self) -> String {
        format!(
            "{}{}",
            self.rng.gen_range(6..=9),
            self.rng.gen_range(100_000_000..=999_999_999)
        )
    }

    fn side(&mut self) -> TradeSide {
        if self.rng.gen_bool(0.5) {
            TradeSide::Buy
        } else {
            TradeSide::Sell
        }
    }

    fn exchange(&mut self) -> Exchange {
        if self.rng.gen_bool(0.5) {
            Exchange::Nse
        } else {
            Exchange::Bse
        }
    }

    fn teacher(&mut self, index: usize, name: &str) -> Teacher {
        let phone = self.phone();
        let joined = self.instant_between(
            self.now - Duration::days(730),
            self.now - Duration::days(30),
        );
        let active = self.rng.gen_bool(0.5);
        Teacher {
            id: (index + 1).to_string(),
            name: name.to_string(),
            email: format!("{}@synckaro.com", name.to_lowercase().replacen(' ', ".", 1)),
            mobile: phone.clone(),
            phone: Some(phone),
            status: if active {
                TeacherStatus::Active
            } else {
                TeacherStatus::Inactive
            },
            total_students: self.rng.gen_range(5..=30),
            total_trades: self.rng.gen_range(50..=500),
            total_capital: None,
            win_rate: Some(f64::from(self.rng.gen_range(4500..=7500_u32)) / 100.0),
            specialization: Some(self.pick(&SPECIALIZATIONS).to_string()),
            joined_date: iso(joined),
        }
    }

    fn student(&mut self, id: usize, teacher: &Teacher) -> Student {
        let first = self.pick(&FIRST_NAMES);
        let last = self.pick(&LAST_NAMES);
        let initial = self.rng.gen_range(10..=100) * 5_000_i64;
        // -30% .. +50% of the initial capital, in paise
        let drift = self.amount(-initial * 30, initial * 50);
        let teacher_joined = teacher
            .joined_date
            .parse::<DateTime<Utc>>()
            .unwrap_or(self.now);
        let joined = self.instant_between(teacher_joined, self.now);

        Student {
            id: id.to_string(),
            name: format!("{} {}", first, last),
            email: format!(
                "{}.{}{}@gmail.com",
                first.to_lowercase(),
                last.to_lowercase(),
                id
            ),
            mobile: self.phone(),
            teacher_id: teacher.id.clone(),
            teacher_name: Some(teacher.name.clone()),
            status: if self.rng.gen_bool(0.5) {
                StudentStatus::Active
            } else {
                StudentStatus::Inactive
            },
            initial_capital: Decimal::from(initial),
            current_capital: Decimal::from(initial) + drift,
            risk_percentage: f64::from(self.rng.gen_range(1..=5_u32)),
            strategy: self.pick(&STRATEGIES).to_string(),
            joined_date: iso(joined),
        }
    }

    fn trade(
        &mut self,
        id: usize,
        teacher: &Teacher,
        student: Option<&Student>,
        since: &str,
    ) -> Trade {
        let (lots, lot_size, pnl_range) = match student {
            None => (self.rng.gen_range(1..=20), 10, (-500_000, 1_500_000)),
            Some(_) => (self.rng.gen_range(1..=10), 5, (-200_000, 800_000)),
        };
        let since = since.parse::<DateTime<Utc>>().unwrap_or(self.now);
        let at = self.instant_between(since, self.now);

        Trade {
            id: id.to_string(),
            teacher_id: teacher.id.clone(),
            teacher_name: Some(teacher.name.clone()),
            student_id: student.map(|s| s.id.clone()),
            student_name: student.map(|s| s.name.clone()),
            stock: self.pick(&STOCKS).to_string(),
            quantity: lots * lot_size,
            price: Some(self.amount(10_000, 500_000)),
            trade_type: self.side(),
            exchange: self.exchange(),
            status: TradeStatus::Completed,
            timestamp: Some(iso(at)),
            created_at: None,
            pnl: Some(self.amount(pnl_range.0, pnl_range.1)),
        }
    }
}

fn exchange_code(exchange: Exchange) -> &'static str {
    match exchange {
        Exchange::Nse => "NSE",
        Exchange::Bse => "BSE",
    }
}

fn log_entry(
    id: &mut usize,
    teacher: &Teacher,
    action: ActivityAction,
    at: &str,
    details: String,
) -> ActivityLog {
    *id += 1;
    ActivityLog {
        id: id.to_string(),
        teacher_id: Some(teacher.id.clone()),
        student_id: None,
        action,
        timestamp: at.to_string(),
        details,
    }
}

/// Builds a full demo dataset. The same `seed` and `now` always produce the
/// same rows.
pub fn generate(seed: u64, now: DateTime<Utc>) -> SeedData {
    let mut generator = Generator {
        rng: StdRng::seed_from_u64(seed),
        now,
    };

    let mut teachers: Vec<Teacher> = TEACHER_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| generator.teacher(i, name))
        .collect();

    let mut students = Vec::new();
    for teacher in &mut teachers {
        let first_id = students.len() + 1;
        for offset in 0..teacher.total_students as usize {
            students.push(generator.student(first_id + offset, teacher));
        }
        let capital: Decimal = students[first_id - 1..]
            .iter()
            .map(|s| s.initial_capital)
            .sum();
        teacher.total_capital = Some(capital);
    }

    let mut trades = Vec::new();
    for teacher in &teachers {
        for _ in 0..teacher.total_trades / 2 {
            let id = trades.len() + 1;
            trades.push(generator.trade(id, teacher, None, &teacher.joined_date));
        }
        for student in students.iter().filter(|s| s.teacher_id == teacher.id) {
            for _ in 0..generator.rng.gen_range(5..=20) {
                let id = trades.len() + 1;
                trades.push(generator.trade(id, teacher, Some(student), &student.joined_date));
            }
        }
    }

    let mut log_id = 0;
    let mut activity_logs = Vec::new();
    for teacher in &teachers {
        activity_logs.push(log_entry(
            &mut log_id,
            teacher,
            ActivityAction::ProfileCreated,
            &teacher.joined_date,
            format!("{} joined the platform", teacher.name),
        ));
        for student in students.iter().filter(|s| s.teacher_id == teacher.id) {
            let mut entry = log_entry(
                &mut log_id,
                teacher,
                ActivityAction::StudentAdded,
                &student.joined_date,
                format!("Added student: {}", student.name),
            );
            entry.student_id = Some(student.id.clone());
            activity_logs.push(entry);
        }
        for trade in trades
            .iter()
            .filter(|t| t.teacher_id == teacher.id)
            .take(LOGGED_TRADES_PER_TEACHER)
        {
            activity_logs.push(log_entry(
                &mut log_id,
                teacher,
                ActivityAction::TradeExecuted,
                trade.timestamp.as_deref().unwrap_or_default(),
                format!(
                    "{} {} {} @ ₹{:.2} on {}",
                    trade.trade_type.as_str(),
                    trade.quantity,
                    trade.stock,
                    trade.price.unwrap_or_default(),
                    exchange_code(trade.exchange)
                ),
            ));
        }
        let joined = teacher
            .joined_date
            .parse::<DateTime<Utc>>()
            .unwrap_or(now);
        for _ in 0..generator.rng.gen_range(1..=3) {
            let at = iso(generator.instant_between(joined, now));
            activity_logs.push(log_entry(
                &mut log_id,
                teacher,
                ActivityAction::ProfileUpdated,
                &at,
                "Updated profile information".to_string(),
            ));
        }
    }

    sort_newest_first(&mut trades);
    sort_logs_newest_first(&mut activity_logs);

    SeedData {
        teachers,
        students,
        trades,
        activity_logs,
    }
}

/// Fills the cache with demo data unless it already holds teachers.
/// Returns whether anything was written.
pub async fn seed_cache(cache: &CacheService, seed: u64, now: DateTime<Utc>) -> Result<bool> {
    if !cache.load::<Teacher>().is_empty() {
        return Ok(false);
    }

    let data = generate(seed, now);
    cache.store(&data.teachers).await?;
    cache.store(&data.students).await?;
    cache.store(&data.trades).await?;
    cache.store(&data.activity_logs).await?;
    info!(
        "Seeded demo data: {} teachers, {} students, {} trades, {} logs",
        data.teachers.len(),
        data.students.len(),
        data.trades.len(),
        data.activity_logs.len()
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_cache;

    fn now() -> DateTime<Utc> {
        "2025-06-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn same_seed_same_rows() {
        assert_eq!(generate(7, now()), generate(7, now()));
        assert_ne!(generate(7, now()).students, generate(8, now()).students);
    }

    #[test]
    fn every_teacher_gets_their_students() {
        let data = generate(42, now());

        assert_eq!(data.teachers.len(), 24);
        for teacher in &data.teachers {
            let owned = data
                .students
                .iter()
                .filter(|s| s.teacher_id == teacher.id)
                .count();
            assert_eq!(owned, teacher.total_students as usize);
            assert!((5..=30).contains(&owned));
        }
        assert!(data
            .students
            .iter()
            .all(|s| s.id.parse::<i64>().is_ok() && s.teacher_name.is_some()));
    }

    #[test]
    fn capital_drift_stays_in_range() {
        let data = generate(3, now());
        for s in &data.students {
            let floor = s.initial_capital * Decimal::new(7, 1);
            let ceiling = s.initial_capital * Decimal::new(15, 1);
            assert!(s.current_capital >= floor && s.current_capital <= ceiling);
        }
    }

    #[test]
    fn rows_are_not_in_the_future() {
        let data = generate(11, now());
        assert!(data
            .trades
            .iter()
            .all(|t| t.effective_timestamp().is_some_and(|at| at <= now())));
        assert!(data
            .activity_logs
            .iter()
            .all(|l| l.parsed_timestamp().is_some_and(|at| at <= now())));
        let first = data.activity_logs[0].parsed_timestamp().unwrap();
        let last = data.activity_logs.last().unwrap().parsed_timestamp().unwrap();
        assert!(first >= last);
    }

    #[tokio::test]
    async fn seeding_skips_populated_cache() {
        let (_store, cache) = memory_cache();

        assert!(seed_cache(&cache, 1, now()).await.unwrap());
        let teachers = cache.load::<Teacher>();
        assert_eq!(teachers.len(), 24);
        assert!(!cache.load::<ActivityLog>().is_empty());

        assert!(!seed_cache(&cache, 2, now()).await.unwrap());
        assert_eq!(cache.load::<Teacher>(), teachers);
    }
}
