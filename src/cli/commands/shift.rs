use crate::cli::commands::{client, location_provider, open_session};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::shift::{ShiftInput, ShiftLogic};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::mins2readable;
use crate::utils::time::DisplayZone;
use chrono::Utc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let zone = DisplayZone::from_config(cfg)?;

    match cmd {
        Commands::Start { comment, at } => {
            let input = ShiftInput {
                comment: comment.clone(),
                locator: location_provider(at.as_deref(), cfg)?,
                locate_timeout: cfg.location_timeout(),
            };
            let mut session = open_session(cfg)?;
            let outcome = ShiftLogic::start(&client(cfg)?, &mut session, &zone, input)?;

            success(format!(
                "Shift started at {} on {}",
                outcome.marker.display_time, outcome.marker.display_date
            ));
            match outcome.location {
                Some(point) => info(format!("Location: {point}")),
                None => info("Location: not available"),
            }
        }

        Commands::End { comment, at } => {
            let input = ShiftInput {
                comment: comment.clone(),
                locator: location_provider(at.as_deref(), cfg)?,
                locate_timeout: cfg.location_timeout(),
            };
            let mut session = open_session(cfg)?;
            let summary = ShiftLogic::end(&client(cfg)?, &mut session, &zone, input)?;

            success("Shift ended");
            println!("   Date     : {}", summary.date);
            println!("   Start    : {}", summary.start_time);
            println!("   End      : {}", summary.end_time);
            println!("   Duration : {}", summary.duration);
            if let Some(point) = summary.location {
                println!("   Location : {point}");
            }
        }

        Commands::Status => {
            let session = open_session(cfg)?;
            match ShiftLogic::active(&session)? {
                Some(marker) => {
                    let elapsed = marker.elapsed_minutes(Utc::now());
                    success(format!(
                        "Shift in progress since {} {} ({})",
                        marker.display_date,
                        marker.display_time,
                        mins2readable(elapsed, false, false)
                    ));
                }
                None => info("No shift in progress."),
            }
        }

        _ => {}
    }
    Ok(())
}
