//! Start / end of the session user's shift.

use crate::api::{Endpoint, Payload, WebhookClient};
use crate::core::auth::AuthLogic;
use crate::core::location::{LocationProvider, acquire_location};
use crate::errors::{AppError, AppResult};
use crate::models::{ActiveSession, GeoPoint};
use crate::session::{Session, SessionRepository};
use crate::utils::time::{DisplayZone, MARKER_TIME_FORMAT, SUMMARY_DATE_FORMAT, shift_duration};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use std::time::Duration;

/// Input collected for either end of a shift.
pub struct ShiftInput {
    pub comment: Option<String>,
    pub locator: Box<dyn LocationProvider>,
    pub locate_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct StartOutcome {
    pub marker: ActiveSession,
    pub location: Option<GeoPoint>,
}

/// What the employee sees once a shift is closed.
#[derive(Debug, Clone)]
pub struct ShiftSummary {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub duration: String,
    pub seconds: i64,
    pub location: Option<GeoPoint>,
}

pub struct ShiftLogic;

impl ShiftLogic {
    pub fn start<R: SessionRepository>(
        client: &WebhookClient,
        session: &mut Session<R>,
        zone: &DisplayZone,
        input: ShiftInput,
    ) -> AppResult<StartOutcome> {
        let user = AuthLogic::current_user(session)?;
        if let Some(active) = session.active_shift()? {
            return Err(AppError::ShiftAlreadyActive(format!(
                "{} {}",
                active.display_date, active.display_time
            )));
        }

        let location = acquire_location(input.locator, input.locate_timeout);
        let now = Utc::now();

        let mut body = Payload::new();
        body.insert("user_id".into(), json!(user.id));
        body.insert("email".into(), json!(user.email));
        body.insert("timestamp_start".into(), json!(iso(&now)));
        body.insert("latitude".into(), coordinate(location.map(|p| p.latitude)));
        body.insert("longitude".into(), coordinate(location.map(|p| p.longitude)));
        body.insert(
            "comentario_inicio".into(),
            json!(input.comment.unwrap_or_default()),
        );

        client.post(Endpoint::StartShift, body)?;

        let marker = ActiveSession::begin(now, zone);
        session.set_active_shift(&marker)?;
        session.audit(
            "start",
            &user.email,
            &format!("Shift started at {} {}", marker.display_date, marker.display_time),
        );

        Ok(StartOutcome { marker, location })
    }

    pub fn end<R: SessionRepository>(
        client: &WebhookClient,
        session: &mut Session<R>,
        zone: &DisplayZone,
        input: ShiftInput,
    ) -> AppResult<ShiftSummary> {
        let user = AuthLogic::current_user(session)?;
        let marker = session.active_shift()?.ok_or(AppError::NoActiveShift)?;

        let location = acquire_location(input.locator, input.locate_timeout);
        let end = Utc::now();
        let (duration, seconds) = shift_duration(&marker.iso, &end);

        let summary = ShiftSummary {
            date: zone.format(&end, SUMMARY_DATE_FORMAT),
            start_time: marker.display_time.clone(),
            end_time: zone.format(&end, MARKER_TIME_FORMAT),
            duration,
            seconds,
            location,
        };

        let mut body = Payload::new();
        body.insert("userId".into(), json!(user.id));
        body.insert("userName".into(), json!(user.name));
        body.insert("userRole".into(), json!(user.role));
        body.insert("userEmail".into(), json!(user.email));
        body.insert("date".into(), json!(summary.date));
        body.insert("startTime".into(), json!(summary.start_time));
        body.insert("endTime".into(), json!(summary.end_time));
        body.insert("duration".into(), json!(summary.duration));
        body.insert("seconds".into(), json!(summary.seconds));
        body.insert("status".into(), json!("completed"));
        body.insert("timestamp_start".into(), json!(iso(&marker.iso)));
        body.insert("timestamp_end".into(), json!(iso(&end)));
        body.insert("timezone".into(), json!(zone.tz.name()));
        body.insert("latitude_end".into(), coordinate(location.map(|p| p.latitude)));
        body.insert("longitude_end".into(), coordinate(location.map(|p| p.longitude)));
        body.insert(
            "comentario_final".into(),
            json!(input.comment.unwrap_or_default()),
        );

        client.post(Endpoint::EndShift, body)?;

        session.clear_active_shift()?;
        session.audit(
            "end",
            &user.email,
            &format!("Shift ended after {}", summary.duration),
        );

        Ok(summary)
    }

    /// The active marker of the session user, if any.
    pub fn active<R: SessionRepository>(session: &Session<R>) -> AppResult<Option<ActiveSession>> {
        AuthLogic::current_user(session)?;
        session.active_shift()
    }
}

fn iso(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn coordinate(v: Option<f64>) -> Value {
    v.map_or(Value::Null, |n| json!(n))
}
