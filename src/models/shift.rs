use crate::models::location::GeoPoint;
use crate::models::user::avatar_for;
use crate::normalize::alias::{pick_f64, pick_i64, pick_text, pick_text_or};
use crate::utils::time::DisplayZone;
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde::Serialize;
use serde_json::Value;

/// Status values meaning "this shift is over", compared case-insensitively.
pub const CLOSED_STATUSES: [&str; 3] = ["cerrado", "completed", "closed"];

/// Placeholder shown for dates that are missing or not applicable.
pub const NO_DATE: &str = "---";

/// End time shown for a closed shift whose end value is not a timestamp.
pub const CLOSED_LABEL: &str = "Closed";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shift {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_role: String,
    pub user_email: String,
    pub user_avatar: String,
    pub date: String,
    pub end_date: String,
    pub raw_date: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub raw_end_time: Option<String>,
    pub duration: String,
    pub seconds: i64,
    pub status: String,
    pub is_in_progress: bool,
    pub comment_start: String,
    pub comment_end: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub latitude_end: Option<f64>,
    pub longitude_end: Option<f64>,
}

impl Shift {
    pub fn start_point(&self) -> Option<GeoPoint> {
        GeoPoint::from_parts(self.latitude, self.longitude)
    }

    pub fn end_point(&self) -> Option<GeoPoint> {
        GeoPoint::from_parts(self.latitude_end, self.longitude_end)
    }

    /// Start instant in `tz`, when the raw start value is a timestamp.
    pub fn started_at(&self, tz: Tz) -> Option<DateTime<Tz>> {
        self.raw_date
            .as_deref()
            .and_then(|raw| crate::utils::time::parse_timestamp(raw, tz))
    }

    /// Calendar day the shift started on, in `tz`.
    pub fn start_day(&self, tz: Tz) -> Option<NaiveDate> {
        self.started_at(tz).map(|dt| dt.date_naive())
    }
}

/// Source-field aliases of a shift record, highest priority first.
pub struct ShiftAliases;

impl ShiftAliases {
    pub const ID: &'static [&'static str] = &["id"];
    pub const USER_ID: &'static [&'static str] = &["user_id"];
    pub const USER_NAME: &'static [&'static str] = &["user_name", "nombre", "name"];
    pub const USER_ROLE: &'static [&'static str] = &["user_role", "rol", "role"];
    pub const USER_EMAIL: &'static [&'static str] = &["user_email", "email"];
    pub const START: &'static [&'static str] = &["start_time", "timestamp_start", "fecha"];
    pub const END: &'static [&'static str] = &["end_time", "timestamp_end"];
    pub const DAY: &'static [&'static str] = &["fecha"];
    pub const STATUS: &'static [&'static str] = &["status"];
    pub const DURATION: &'static [&'static str] = &["duration"];
    pub const SECONDS: &'static [&'static str] = &["seconds"];
    pub const COMMENT_START: &'static [&'static str] = &["comentario_inicio", "comment_start"];
    pub const COMMENT_END: &'static [&'static str] =
        &["comentario_fin", "comentario_final", "comment_end"];
    pub const LATITUDE: &'static [&'static str] = &["latidude", "latitude"];
    pub const LONGITUDE: &'static [&'static str] = &["longitude"];
    pub const LATITUDE_END: &'static [&'static str] = &["latidude_final", "latitude_end"];
    pub const LONGITUDE_END: &'static [&'static str] = &["longitude_final", "longitude_end"];
}

pub fn is_closed_status(status: &str) -> bool {
    let s = status.trim();
    CLOSED_STATUSES.iter().any(|c| c.eq_ignore_ascii_case(s))
}

/// A shift is in progress until an end is recorded or its status says closed.
pub fn is_in_progress(end_raw: Option<&str>, status: &str) -> bool {
    end_raw.is_none() && !is_closed_status(status)
}

pub fn build_shift(record: &Value, zone: &DisplayZone) -> Shift {
    let start_raw = pick_text(record, ShiftAliases::START);
    let end_raw = pick_text(record, ShiftAliases::END).filter(|e| e.trim() != "0");
    let status = pick_text(record, ShiftAliases::STATUS).unwrap_or_default();
    let in_progress = is_in_progress(end_raw.as_deref(), &status);

    let start_time = start_raw.as_deref().map(|s| zone.time(s)).unwrap_or_default();

    let end_time = if in_progress {
        String::new()
    } else {
        match end_raw.as_deref() {
            Some(end) if end.trim().parse::<f64>().is_err() => zone.time(end),
            _ => CLOSED_LABEL.to_string(),
        }
    };

    let date = start_raw
        .as_deref()
        .map(|s| zone.date(s))
        .filter(|d| !d.is_empty())
        .or_else(|| pick_text(record, ShiftAliases::DAY))
        .unwrap_or_else(|| NO_DATE.to_string());

    let end_date = if in_progress {
        NO_DATE.to_string()
    } else {
        end_raw
            .as_deref()
            .map(|e| zone.date(e))
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| NO_DATE.to_string())
    };

    let user_name = pick_text_or(record, ShiftAliases::USER_NAME, "No name");

    Shift {
        id: pick_text(record, ShiftAliases::ID).unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        user_id: pick_text_or(record, ShiftAliases::USER_ID, ""),
        user_role: pick_text_or(record, ShiftAliases::USER_ROLE, "No role"),
        user_email: pick_text_or(record, ShiftAliases::USER_EMAIL, ""),
        user_avatar: avatar_for(&user_name),
        user_name,
        date,
        end_date,
        raw_date: start_raw,
        start_time,
        end_time,
        raw_end_time: end_raw,
        duration: pick_text_or(record, ShiftAliases::DURATION, "00:00:00"),
        seconds: pick_i64(record, ShiftAliases::SECONDS).unwrap_or(0),
        status,
        is_in_progress: in_progress,
        comment_start: pick_text_or(record, ShiftAliases::COMMENT_START, ""),
        comment_end: pick_text_or(record, ShiftAliases::COMMENT_END, ""),
        latitude: coordinate(record, ShiftAliases::LATITUDE),
        longitude: coordinate(record, ShiftAliases::LONGITUDE),
        latitude_end: coordinate(record, ShiftAliases::LATITUDE_END),
        longitude_end: coordinate(record, ShiftAliases::LONGITUDE_END),
    }
}

/// Zero means "no fix" on the gateway side.
fn coordinate(record: &Value, aliases: &[&str]) -> Option<f64> {
    pick_f64(record, aliases).filter(|v| *v != 0.0)
}
