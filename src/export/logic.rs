// src/export/logic.rs

use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::csv::render_csv;
use crate::export::fs_utils::ensure_writable;
use crate::export::json::render_json;
use crate::export::model::ShiftExport;
use crate::export::notify_export_success;
use crate::models::Shift;
use crate::ui::messages::info;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

/// High-level export of a filtered report.
pub struct ExportLogic;

impl ExportLogic {
    /// Write `shifts` to `file` (or the dated default name in the current
    /// directory). Refuses an empty selection without touching the disk.
    pub fn export(
        shifts: &[&Shift],
        format: ExportFormat,
        file: Option<&str>,
        today: NaiveDate,
        force: bool,
    ) -> AppResult<PathBuf> {
        if shifts.is_empty() {
            return Err(AppError::NothingToExport);
        }

        let path = match file {
            Some(f) => PathBuf::from(f),
            None => PathBuf::from(default_file_name(format, today)),
        };

        ensure_writable(&path, force)?;

        let rows: Vec<ShiftExport> = shifts.iter().map(|s| ShiftExport::from(*s)).collect();

        info(format!("Exporting to {}: {}", format.as_str().to_uppercase(), path.display()));
        let content = match format {
            ExportFormat::Csv => render_csv(&rows)?,
            ExportFormat::Json => render_json(&rows)?,
        };
        write_file(&path, &content)?;

        notify_export_success(&format.as_str().to_uppercase(), &path, rows.len());
        Ok(path)
    }
}

/// `ShiftTrack_Report_YYYY-MM-DD.<ext>`
pub fn default_file_name(format: ExportFormat, today: NaiveDate) -> String {
    format!(
        "ShiftTrack_Report_{}.{}",
        today.format("%Y-%m-%d"),
        format.as_str()
    )
}

fn write_file(path: &Path, content: &str) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}
