// src/export/range.rs

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

/// Parse a `--range` expression into inclusive day bounds.
///
/// Accepted: `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, or two of the same kind
/// joined by `:` (e.g. `2025-06:2025-08`).
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();
    let (start, end) = match r.split_once(':') {
        Some((s, e)) => (s.trim(), e.trim()),
        None => (r, r),
    };

    if start.len() != end.len() {
        return Err(AppError::InvalidDate(format!(
            "{r}: start and end must have the same format"
        )));
    }

    let (first, _) = period_bounds(start)?;
    let (_, last) = period_bounds(end)?;
    if first > last {
        return Err(AppError::InvalidDate(format!("{r}: start is after end")));
    }
    Ok((first, last))
}

/// Parse a single `YYYY-MM-DD` day.
pub fn parse_day(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.into()))
}

/// First and last day of a year, month or single day.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidDate(p.to_string());

    match p.len() {
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid())?;
            let first = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let last = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((first, last))
        }
        7 => {
            let first = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| invalid())?;
            Ok((first, last_day_of_month(first).ok_or_else(invalid)?))
        }
        10 => {
            let d = parse_day(p)?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}

fn last_day_of_month(d: NaiveDate) -> Option<NaiveDate> {
    let (y, m) = if d.month() == 12 {
        (d.year() + 1, 1)
    } else {
        (d.year(), d.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)?.pred_opt()
}
