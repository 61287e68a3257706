//! Sample rows shown when neither the backend nor the cache has data.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rust_decimal::Decimal;

use crate::activity::{ActivityAction, ActivityLog};
use crate::students::{Student, StudentStatus};
use crate::teachers::Teacher;
use crate::trades::{Exchange, Trade, TradeSide, TradeStatus};

struct SampleStudent {
    name: &'static str,
    email: &'static str,
    mobile: &'static str,
    initial_capital: i64,
    current_capital: i64,
    risk_percentage: f64,
    strategy: &'static str,
    joined_date: &'static str,
}

const SAMPLE_STUDENTS: [SampleStudent; 3] = [
    SampleStudent {
        name: "Rahul Verma",
        email: "rahul.verma@synckaro.com",
        mobile: "9876543210",
        initial_capital: 120_000,
        current_capital: 145_000,
        risk_percentage: 3.0,
        strategy: "Moderate",
        joined_date: "2024-01-15T00:00:00.000Z",
    },
    SampleStudent {
        name: "Pooja Nair",
        email: "pooja.nair@synckaro.com",
        mobile: "9876543211",
        initial_capital: 90_000,
        current_capital: 105_000,
        risk_percentage: 2.0,
        strategy: "Conservative",
        joined_date: "2024-02-10T00:00:00.000Z",
    },
    SampleStudent {
        name: "Amit Patel",
        email: "amit.patel@synckaro.com",
        mobile: "9876543212",
        initial_capital: 150_000,
        current_capital: 138_000,
        risk_percentage: 4.0,
        strategy: "Aggressive",
        joined_date: "2024-01-20T00:00:00.000Z",
    },
];

struct SampleTrade {
    stock: &'static str,
    quantity: u32,
    /// Price in paise.
    price_paise: i64,
    side: TradeSide,
    exchange: Exchange,
    days_ago: i64,
    pnl: i64,
    /// Which sample student placed it on a teacher's page.
    student_slot: usize,
}

const SAMPLE_TRADES: [SampleTrade; 5] = [
    SampleTrade {
        stock: "INFY",
        quantity: 30,
        price_paise: 161_050,
        side: TradeSide::Buy,
        exchange: Exchange::Nse,
        days_ago: 2,
        pnl: 4_500,
        student_slot: 0,
    },
    SampleTrade {
        stock: "TCS",
        quantity: 20,
        price_paise: 368_000,
        side: TradeSide::Sell,
        exchange: Exchange::Bse,
        days_ago: 5,
        pnl: 3_200,
        student_slot: 1,
    },
    SampleTrade {
        stock: "RELIANCE",
        quantity: 15,
        price_paise: 245_000,
        side: TradeSide::Buy,
        exchange: Exchange::Nse,
        days_ago: 7,
        pnl: -1_800,
        student_slot: 2,
    },
    SampleTrade {
        stock: "HDFCBANK",
        quantity: 25,
        price_paise: 168_000,
        side: TradeSide::Sell,
        exchange: Exchange::Nse,
        days_ago: 10,
        pnl: 2_800,
        student_slot: 0,
    },
    SampleTrade {
        stock: "ICICIBANK",
        quantity: 35,
        price_paise: 112_000,
        side: TradeSide::Buy,
        exchange: Exchange::Bse,
        days_ago: 12,
        pnl: 2_100,
        student_slot: 1,
    },
];

/// (action, hours ago, details)
const TEACHER_LOGS: [(ActivityAction, i64, &str); 7] = [
    (
        ActivityAction::TradeExecuted,
        2,
        "Executed BUY order for INFY - 30 shares at ₹1,610.50",
    ),
    (
        ActivityAction::StudentAdded,
        5,
        "Added new student: Rahul Verma with initial capital of ₹1,20,000",
    ),
    (
        ActivityAction::TradeExecuted,
        24,
        "Executed SELL order for TCS - 20 shares at ₹3,680.00",
    ),
    (
        ActivityAction::ProfileUpdated,
        48,
        "Updated profile information: Changed specialization to Intraday Trading",
    ),
    (
        ActivityAction::TradeExecuted,
        72,
        "Executed BUY order for RELIANCE - 15 shares at ₹2,450.00",
    ),
    (
        ActivityAction::StudentAdded,
        96,
        "Added new student: Pooja Nair with initial capital of ₹90,000",
    ),
    (
        ActivityAction::ProfileCreated,
        720,
        "Teacher profile created and activated in the system",
    ),
];

const STUDENT_LOGS: [(ActivityAction, i64, &str); 7] = [
    (
        ActivityAction::TradeExecuted,
        2,
        "Executed BUY order for INFY - 30 shares at ₹1,610.50",
    ),
    (
        ActivityAction::ProfileUpdated,
        5,
        "Updated profile information: Changed risk percentage to 3%",
    ),
    (
        ActivityAction::TradeExecuted,
        24,
        "Executed SELL order for TCS - 20 shares at ₹3,680.00",
    ),
    (
        ActivityAction::ProfileUpdated,
        48,
        "Updated capital allocation: Increased initial capital to ₹1,20,000",
    ),
    (
        ActivityAction::TradeExecuted,
        72,
        "Executed BUY order for RELIANCE - 15 shares at ₹2,450.00",
    ),
    (
        ActivityAction::TradeExecuted,
        96,
        "Executed SELL order for HDFCBANK - 25 shares at ₹1,680.00",
    ),
    (
        ActivityAction::ProfileCreated,
        720,
        "Student profile created and activated in the system",
    ),
];

fn iso(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Three sample students enrolled under `teacher`.
pub fn sample_students(teacher: &Teacher) -> Vec<Student> {
    SAMPLE_STUDENTS
        .iter()
        .enumerate()
        .map(|(i, s)| Student {
            id: format!("student-{}", i + 1),
            name: s.name.to_string(),
            email: s.email.to_string(),
            mobile: s.mobile.to_string(),
            teacher_id: teacher.id.clone(),
            teacher_name: Some(teacher.name.clone()),
            status: StudentStatus::Active,
            initial_capital: Decimal::from(s.initial_capital),
            current_capital: Decimal::from(s.current_capital),
            risk_percentage: s.risk_percentage,
            strategy: s.strategy.to_string(),
            joined_date: s.joined_date.to_string(),
        })
        .collect()
}

fn sample_trade(
    index: usize,
    sample: &SampleTrade,
    teacher_id: &str,
    teacher_name: Option<&str>,
    student: Option<&Student>,
    now: DateTime<Utc>,
) -> Trade {
    let at = iso(now - Duration::days(sample.days_ago));
    Trade {
        id: format!("trade-{}", index + 1),
        teacher_id: teacher_id.to_string(),
        teacher_name: teacher_name.map(str::to_string),
        student_id: student.map(|s| s.id.clone()),
        student_name: student.map(|s| s.name.clone()),
        stock: sample.stock.to_string(),
        quantity: sample.quantity,
        price: Some(Decimal::new(sample.price_paise, 2)),
        trade_type: sample.side,
        exchange: sample.exchange,
        status: TradeStatus::Executed,
        timestamp: Some(at.clone()),
        created_at: Some(at),
        pnl: Some(Decimal::from(sample.pnl)),
    }
}

/// Five sample trades spread over `students` (rotating, as available).
pub fn sample_teacher_trades(
    teacher: &Teacher,
    students: &[Student],
    now: DateTime<Utc>,
) -> Vec<Trade> {
    SAMPLE_TRADES
        .iter()
        .enumerate()
        .map(|(i, t)| {
            sample_trade(
                i,
                t,
                &teacher.id,
                Some(&teacher.name),
                students.get(t.student_slot),
                now,
            )
        })
        .collect()
}

/// The same five trades, all placed by `student`.
pub fn sample_student_trades(student: &Student, now: DateTime<Utc>) -> Vec<Trade> {
    SAMPLE_TRADES
        .iter()
        .enumerate()
        .map(|(i, t)| {
            sample_trade(
                i,
                t,
                &student.teacher_id,
                student.teacher_name.as_deref(),
                Some(student),
                now,
            )
        })
        .collect()
}

fn sample_logs(
    rows: &[(ActivityAction, i64, &str)],
    teacher_id: &str,
    student_id: Option<&str>,
    now: DateTime<Utc>,
) -> Vec<ActivityLog> {
    rows.iter()
        .enumerate()
        .map(|(i, (action, hours_ago, details))| ActivityLog {
            id: format!("log-{}", i + 1),
            teacher_id: Some(teacher_id.to_string()),
            student_id: student_id.map(str::to_string),
            action: *action,
            timestamp: iso(now - Duration::hours(*hours_ago)),
            details: details.to_string(),
        })
        .collect()
}

pub fn sample_teacher_logs(teacher_id: &str, now: DateTime<Utc>) -> Vec<ActivityLog> {
    sample_logs(&TEACHER_LOGS, teacher_id, None, now)
}

pub fn sample_student_logs(student: &Student, now: DateTime<Utc>) -> Vec<ActivityLog> {
    sample_logs(&STUDENT_LOGS, &student.teacher_id, Some(&student.id), now)
}
