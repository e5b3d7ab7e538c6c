use crate::errors::AppResult;
use crate::export::model::ShiftExport;

/// Rows as pretty-printed JSON.
pub fn render_json(rows: &[ShiftExport]) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}
