use crate::errors::{AppError, AppResult};
use crate::export::model::{ShiftExport, export_to_row, get_headers};
use csv::{QuoteStyle, WriterBuilder};

/// Render rows as CSV text: text fields quoted (embedded quotes doubled),
/// numeric fields bare.
pub fn render_csv(rows: &[ShiftExport]) -> AppResult<String> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(Vec::new());

    wtr.write_record(get_headers())?;
    for row in rows {
        wtr.write_record(export_to_row(row))?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::Export(format!("CSV encoding error: {e}")))
}
