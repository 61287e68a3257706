use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;

/// Timezone used for every date shown to administrators.
/// The platform trades on NSE/BSE, so dates follow Indian Standard Time.
pub const DEFAULT_DISPLAY_TZ: Tz = chrono_tz::Asia::Kolkata;

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Parses an RFC 3339 timestamp, or a bare `YYYY-MM-DD` date taken as UTC midnight.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Converts a UTC instant to the calendar date administrators see.
pub fn display_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// `d/m/yyyy`, e.g. `5/3/2024`.
pub fn format_date_short(instant: DateTime<Utc>) -> String {
    let local = instant.with_timezone(&DEFAULT_DISPLAY_TZ);
    format!("{}/{}/{}", local.day(), local.month(), local.year())
}

/// `h:mm:ss am|pm`, e.g. `2:05:09 pm`.
pub fn format_time_short(instant: DateTime<Utc>) -> String {
    let local = instant.with_timezone(&DEFAULT_DISPLAY_TZ);
    let (is_pm, hour) = local.hour12();
    format!(
        "{}:{:02}:{:02} {}",
        hour,
        local.minute(),
        local.second(),
        if is_pm { "pm" } else { "am" }
    )
}

/// `d Mon yyyy`, e.g. `5 Mar 2024`.
pub fn format_date_medium(instant: DateTime<Utc>) -> String {
    let local = instant.with_timezone(&DEFAULT_DISPLAY_TZ);
    format!(
        "{} {} {}",
        local.day(),
        MONTHS_SHORT[local.month0() as usize],
        local.year()
    )
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{} {} ago", count, unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

/// Human friendly distance between `timestamp` and `now`.
///
/// Anything older than 30 days is shown as a medium date instead.
pub fn relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = (now - timestamp).num_milliseconds();
    let minutes = diff_ms.div_euclid(60_000);
    let hours = diff_ms.div_euclid(3_600_000);
    let days = diff_ms.div_euclid(86_400_000);

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else if days < 30 {
        plural(days, "day")
    } else {
        format_date_medium(timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn parses_rfc3339_and_plain_dates() {
        assert_eq!(
            parse_timestamp("2024-01-15T10:00:00Z"),
            Some(at(2024, 1, 15, 10, 0, 0))
        );
        assert_eq!(
            parse_timestamp("2024-01-15T10:00:00.000+05:30"),
            Some(at(2024, 1, 15, 4, 30, 0))
        );
        assert_eq!(parse_timestamp("2024-01-15"), Some(at(2024, 1, 15, 0, 0, 0)));
        assert_eq!(parse_timestamp("not a date"), None);
    }

    #[test]
    fn short_formats_use_ist() {
        // 20:45 UTC is 02:15 the next morning in IST
        let ts = at(2024, 3, 4, 20, 45, 9);
        assert_eq!(format_date_short(ts), "5/3/2024");
        assert_eq!(format_time_short(ts), "2:15:09 am");
        assert_eq!(format_date_medium(ts), "5 Mar 2024");
    }

    #[test]
    fn afternoon_times_are_pm() {
        let ts = at(2024, 3, 4, 8, 30, 0);
        assert_eq!(format_time_short(ts), "2:00:00 pm");
    }

    #[test]
    fn relative_time_buckets() {
        let now = at(2024, 6, 1, 12, 0, 0);
        assert_eq!(relative_time(now - Duration::seconds(30), now), "Just now");
        assert_eq!(relative_time(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(relative_time(now - Duration::minutes(59), now), "59 minutes ago");
        assert_eq!(relative_time(now - Duration::hours(2), now), "2 hours ago");
        assert_eq!(relative_time(now - Duration::days(1), now), "1 day ago");
        assert_eq!(relative_time(now - Duration::days(29), now), "29 days ago");
        assert_eq!(relative_time(now - Duration::days(45), now), "17 Apr 2024");
    }
}
