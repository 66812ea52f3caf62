use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::America::Los_Angeles;
use chrono_tz::Tz;

/// Every report and schedule is evaluated on Pacific time.
pub const REFERENCE_TZ: Tz = Los_Angeles;

/// Year stamped onto month/day values whose source omits the year.
/// A leap year so that Feb 29 still parses.
pub const PLACEHOLDER_YEAR: i32 = 2000;

pub fn now() -> DateTime<Tz> {
    Utc::now().with_timezone(&REFERENCE_TZ)
}

pub fn today() -> NaiveDate {
    now().date_naive()
}

/// Parse a "Mon DD" string ("Oct 18", "Oct 8") into a date in the placeholder year.
pub fn parse_month_day(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(&format!("{} {}", s, PLACEHOLDER_YEAR), "%b %d %Y").ok()
}

/// Compares month and day only.
///
/// Known limitation: an entry dated Dec 31 is never "today" on Jan 1 and vice
/// versa; the source carries no year, so nothing here tries to infer one.
pub fn is_same_calendar_day_ignoring_year(a: NaiveDate, b: NaiveDate) -> bool {
    a.month() == b.month() && a.day() == b.day()
}

/// Header date, e.g. "October 18, 2026".
pub fn header_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}
