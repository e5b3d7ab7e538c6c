// src/export/model.rs

use crate::models::Shift;
use serde::Serialize;

/// Flat row written for every exported shift.
#[derive(Serialize, Clone, Debug)]
pub struct ShiftExport {
    pub employee: String,
    pub role: String,
    pub email: String,
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    pub duration: String,
    pub seconds: i64,
    pub status: String,
    pub start_comment: String,
    pub end_comment: String,
}

impl From<&Shift> for ShiftExport {
    fn from(s: &Shift) -> Self {
        Self {
            employee: s.user_name.clone(),
            role: s.user_role.clone(),
            email: s.user_email.clone(),
            start_date: s.date.clone(),
            start_time: s.start_time.clone(),
            end_date: s.end_date.clone(),
            end_time: s.end_time.clone(),
            duration: s.duration.clone(),
            seconds: s.seconds,
            status: s.status.clone(),
            start_comment: s.comment_start.clone(),
            end_comment: s.comment_end.clone(),
        }
    }
}

/// Fixed CSV header row.
pub fn get_headers() -> [&'static str; 12] {
    [
        "Employee",
        "Role",
        "Email",
        "Start Date",
        "Start Time",
        "End Date",
        "End Time",
        "Duration",
        "Seconds",
        "Status",
        "Start Comment",
        "End Comment",
    ]
}

pub(crate) fn export_to_row(e: &ShiftExport) -> [String; 12] {
    [
        e.employee.clone(),
        e.role.clone(),
        e.email.clone(),
        e.start_date.clone(),
        e.start_time.clone(),
        e.end_date.clone(),
        e.end_time.clone(),
        e.duration.clone(),
        e.seconds.to_string(),
        e.status.clone(),
        e.start_comment.clone(),
        e.end_comment.clone(),
    ]
}
