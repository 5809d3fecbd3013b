//! Time utilities

use chrono::{DateTime, Datelike, Utc};

/// French short month names as shown next to uploaded videos
const SHORT_MONTHS: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
    "déc.",
];

/// Get current UTC time
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Format an upload date, e.g. `19 oct. 2026`
pub fn format_upload_date(at: DateTime<Utc>) -> String {
    let month = SHORT_MONTHS[at.month0() as usize];
    format!("{} {} {}", at.day(), month, at.year())
}
