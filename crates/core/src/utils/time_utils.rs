use chrono::{Datelike, NaiveDate, NaiveDateTime, Utc};

/// Current UTC time without the offset, the form every timestamp column uses.
pub fn now_naive() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// First day of each of `count` consecutive months starting at `start`.
pub fn month_starts(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut months = Vec::with_capacity(count);
    let mut year = start.year();
    let mut month = start.month();
    for _ in 0..count {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, 1) {
            months.push(date);
        }
        if month == 12 {
            month = 1;
            year += 1;
        } else {
            month += 1;
        }
    }
    months
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y", "%m/%d/%Y", "%d/%m/%Y"];

/// Normalizes the date spellings found in exported order books to ISO-8601.
///
/// Slash dates are read month-first (`03/04/2024` is March 4). Day-first is
/// only tried when that fails, so `15/03/2024` still resolves to March 15.
///
/// Values that match none of the known formats are returned trimmed but
/// otherwise untouched so nothing is lost on import.
pub fn normalize_date_text(raw: &str) -> String {
    let trimmed = raw.trim();
    let date_part = trimmed.split([' ', 'T']).next().unwrap_or(trimmed);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| trimmed.to_string())
}
