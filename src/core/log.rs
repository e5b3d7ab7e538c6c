use crate::db::log::{LogEntry, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::formatting::truncate;
use crate::utils::table::strip_ansi;
use ansi_term::Colour;

const OP_WIDTH_MAX: usize = 60;

/// Colour of an operation name in the log listing.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "login" | "register" => Colour::Green,
        "logout" => Colour::Cyan,
        "start" => Colour::Blue,
        "end" => Colour::Yellow,
        "user_delete" => Colour::Red,
        "user_edit" => Colour::Yellow,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    /// Rendered lines of the internal log, oldest first.
    pub fn render(entries: &[LogEntry]) -> Vec<String> {
        let labels: Vec<String> = entries
            .iter()
            .map(|e| {
                let label = if e.target.is_empty() {
                    e.operation.clone()
                } else {
                    format!("{} ({})", e.operation, e.target)
                };
                truncate(&label, OP_WIDTH_MAX)
            })
            .collect();

        let op_w = labels.iter().map(|l| l.chars().count()).max().unwrap_or(10);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);

        let dates: Vec<String> = entries
            .iter()
            .map(|e| {
                chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or_else(|_| e.date.clone())
            })
            .collect();
        let date_w = dates.iter().map(String::len).max().unwrap_or(0);

        entries
            .iter()
            .zip(labels.iter().zip(dates.iter()))
            .map(|(entry, (label, date))| {
                let color = color_for_operation(&entry.operation);
                // only the operation word is coloured
                let colored = match label.split_once(' ') {
                    Some((op, rest)) => format!("{} {rest}", color.paint(op)),
                    None => color.paint(label.as_str()).to_string(),
                };
                let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

                format!(
                    "{:>id_w$}: {:<date_w$} | {colored}{padding} => {}",
                    entry.id, date, entry.message
                )
            })
            .collect()
    }

    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;

        println!("📜 Internal log:\n");
        for line in Self::render(&entries) {
            println!("{line}");
        }
        Ok(())
    }
}
