use crate::utils::time::{DisplayZone, MARKER_DATE_FORMAT, MARKER_TIME_FORMAT};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Locally cached start of the current user's open shift.
///
/// Only used to rebuild the "shift in progress" state between invocations;
/// the gateway remains the source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSession {
    pub iso: DateTime<Utc>,
    pub display_time: String,
    pub display_date: String,
}

impl ActiveSession {
    pub fn begin(now: DateTime<Utc>, zone: &DisplayZone) -> Self {
        Self {
            iso: now,
            display_time: zone.format(&now, MARKER_TIME_FORMAT),
            display_date: zone.format(&now, MARKER_DATE_FORMAT),
        }
    }

    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> i64 {
        (now - self.iso).num_minutes().max(0)
    }
}
