pub mod config;
pub mod habit;
pub mod month;
pub mod stats;
pub mod streak;

use chrono::{Local, NaiveDate};
use hitlist_core::MonthKey;

/// `--month` value, defaulting to the current month.
pub fn month_or_current(month: Option<String>) -> Result<MonthKey, Box<dyn std::error::Error>> {
    match month {
        Some(m) => Ok(m.parse()?),
        None => Ok(MonthKey::current()),
    }
}

/// `--today` value, defaulting to the local date.
pub fn today_or_now(today: Option<String>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match today {
        Some(d) => Ok(NaiveDate::parse_from_str(&d, "%Y-%m-%d")?),
        None => Ok(Local::now().date_naive()),
    }
}
