//! Time utilities: timestamp parsing, display-zone projections, durations.
//!
//! Every formatter here is total: input that cannot be read yields an empty
//! string instead of an error.

use crate::config::Config;
use crate::errors::AppResult;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use regex::Regex;
use std::fmt::Write;
use std::sync::LazyLock;

static HHMM_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}").expect("valid HH:MM prefix pattern"));
static HHMM_ANYWHERE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{2}:[0-9]{2}").expect("valid HH:MM pattern"));

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Marker projections use US-style clock values.
pub const MARKER_TIME_FORMAT: &str = "%H:%M:%S";
pub const MARKER_DATE_FORMAT: &str = "%-m/%-d/%Y";
/// Date stamped on the end-of-shift payload.
pub const SUMMARY_DATE_FORMAT: &str = "%d %b %Y";

/// Time zone and date pattern used for every projection shown to the user.
#[derive(Debug, Clone)]
pub struct DisplayZone {
    pub tz: Tz,
    pub date_format: String,
}

impl DisplayZone {
    pub fn new(tz: Tz, date_format: impl Into<String>) -> Self {
        Self {
            tz,
            date_format: date_format.into(),
        }
    }

    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        Ok(Self::new(cfg.tz()?, cfg.date_format.clone()))
    }

    pub fn parse(&self, raw: &str) -> Option<DateTime<Tz>> {
        parse_timestamp(raw, self.tz)
    }

    /// `HH:MM` projection of a raw time value, see [`format_time`].
    pub fn time(&self, raw: &str) -> String {
        format_time(raw, self.tz)
    }

    /// Medium date projection of a raw timestamp; `""` when unreadable.
    pub fn date(&self, raw: &str) -> String {
        self.parse(raw)
            .map(|dt| format_with(&dt, &self.date_format))
            .unwrap_or_default()
    }

    pub fn format(&self, instant: &DateTime<Utc>, pattern: &str) -> String {
        format_with(&instant.with_timezone(&self.tz), pattern)
    }
}

impl Default for DisplayZone {
    fn default() -> Self {
        Self::new(chrono_tz::America::New_York, "%d/%m/%Y")
    }
}

/// Parse a timestamp as sent by the gateway.
///
/// Accepts RFC 3339, naive date-times (read in `tz`) and bare dates
/// (midnight in `tz`). All-digit strings are sentinels, not timestamps.
pub fn parse_timestamp(raw: &str, tz: Tz) -> Option<DateTime<Tz>> {
    let s = raw.trim();
    if s.is_empty() || s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&tz));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return tz.from_local_datetime(&naive).earliest();
        }
    }

    let day = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    tz.from_local_datetime(&day.and_hms_opt(0, 0, 0)?).earliest()
}

/// Render a raw time value as `HH:MM`.
///
/// - `""` or `"0"`                 → `""`
/// - `HH:MM…` shorter than 10 chars → its leading `HH:MM`
/// - a parseable timestamp         → its clock time in `tz`
/// - otherwise the first embedded `HH:MM`, or `""`
pub fn format_time(raw: &str, tz: Tz) -> String {
    let s = raw.trim();
    if s.is_empty() || s == "0" {
        return String::new();
    }

    if s.chars().count() < 10
        && let Some(m) = HHMM_PREFIX.find(s)
    {
        return m.as_str().to_string();
    }

    if let Some(dt) = parse_timestamp(s, tz) {
        return format_with(&dt, "%H:%M");
    }

    HHMM_ANYWHERE
        .find(s)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// `HH:MM:00` text and whole seconds between two instants (floored, never negative).
pub fn shift_duration(start: &DateTime<Utc>, end: &DateTime<Utc>) -> (String, i64) {
    let total_seconds = (*end - *start).num_seconds().max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    (format!("{hours:02}:{minutes:02}:00"), total_seconds)
}

/// Whether `pattern` is a strftime pattern chrono can render.
pub fn is_valid_pattern(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

fn format_with<T: TimeZone>(dt: &DateTime<T>, pattern: &str) -> String
where
    T::Offset: std::fmt::Display,
{
    let mut out = String::new();
    if write!(out, "{}", dt.format(pattern)).is_err() {
        out.clear();
    }
    out
}
