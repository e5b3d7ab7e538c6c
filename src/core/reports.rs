use crate::api::{Endpoint, Payload, WebhookClient};
use crate::errors::AppResult;
use crate::models::{Shift, build_shift};
use crate::normalize::normalize_logged;
use crate::utils::time::DisplayZone;
use chrono_tz::Tz;
use serde_json::json;
use std::cmp::Ordering;

pub struct ReportLogic;

impl ReportLogic {
    /// Every shift known to the gateway, newest first.
    pub fn fetch_all(client: &WebhookClient, zone: &DisplayZone) -> AppResult<Vec<Shift>> {
        let mut body = Payload::new();
        body.insert("request".into(), json!("get_all"));

        let raw = client.post(Endpoint::FetchShifts, body)?;
        let mut shifts: Vec<Shift> = normalize_logged(&raw, "fetch-shifts")
            .iter()
            .map(|record| build_shift(record, zone))
            .collect();

        sort_newest_first(&mut shifts, zone.tz);
        Ok(shifts)
    }
}

/// Order by start instant, newest first; shifts without a readable start last.
pub fn sort_newest_first(shifts: &mut [Shift], tz: Tz) {
    shifts.sort_by(|a, b| match (a.started_at(tz), b.started_at(tz)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
