use crate::cli::commands::{client, open_session, report_filter, require_admin};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reports::ReportLogic;
use crate::errors::AppResult;
use crate::models::Shift;
use crate::ui::messages::{header, info};
use crate::utils::formatting::{status_label, truncate};
use crate::utils::table::Table;
use crate::utils::time::DisplayZone;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Reports { filter, details } = cmd {
        let filter = report_filter(filter)?;
        let zone = DisplayZone::from_config(cfg)?;

        let session = open_session(cfg)?;
        require_admin(&session, cfg)?;

        let shifts = ReportLogic::fetch_all(&client(cfg)?, &zone)?;
        let selected = filter.apply(&shifts, zone.tz);

        header("Shift reports");
        if selected.is_empty() {
            info("No shifts match the current filters.");
            return Ok(());
        }

        let mut table = Table::new([
            "Employee", "Role", "Date", "Start", "End date", "End", "Duration", "Status",
        ]);
        for s in &selected {
            table.add_row(vec![
                truncate(&s.user_name, 24),
                s.user_role.clone(),
                s.date.clone(),
                s.start_time.clone(),
                s.end_date.clone(),
                s.end_time.clone(),
                s.duration.clone(),
                status_label(&s.status, s.is_in_progress),
            ]);
        }
        print!("{}", table.render());

        let active = selected.iter().filter(|s| s.is_in_progress).count();
        println!(
            "\n{} shift(s) shown, {active} in progress ({} loaded)",
            selected.len(),
            shifts.len()
        );

        if *details {
            for s in &selected {
                print_details(s);
            }
        }
    }
    Ok(())
}

fn print_details(s: &Shift) {
    println!("\n• {} <{}> {} {}", s.user_name, s.user_email, s.date, s.start_time);
    if !s.comment_start.is_empty() {
        println!("   Start comment : {}", s.comment_start);
    }
    if !s.comment_end.is_empty() {
        println!("   End comment   : {}", s.comment_end);
    }
    if let Some(p) = s.start_point() {
        println!("   Start map     : {}", p.map_link());
    }
    if let Some(p) = s.end_point() {
        println!("   End map       : {}", p.map_link());
    }
}
