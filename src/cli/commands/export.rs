use crate::cli::commands::{client, open_session, report_filter, require_admin};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reports::ReportLogic;
use crate::errors::{AppError, AppResult};
use crate::export::ExportLogic;
use crate::ui::messages::warning;
use crate::utils::time::DisplayZone;
use chrono::Utc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        filter,
        format,
        file,
        force,
    } = cmd
    {
        let filter = report_filter(filter)?;
        let zone = DisplayZone::from_config(cfg)?;

        let session = open_session(cfg)?;
        require_admin(&session, cfg)?;

        let shifts = ReportLogic::fetch_all(&client(cfg)?, &zone)?;
        let selected = filter.apply(&shifts, zone.tz);
        let today = Utc::now().with_timezone(&zone.tz).date_naive();

        match ExportLogic::export(&selected, *format, file.as_deref(), today, *force) {
            Ok(_) => {}
            // a notice, not a failure
            Err(AppError::NothingToExport) => warning(AppError::NothingToExport),
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
