//! Subcommand handlers plus the plumbing they share (session store,
//! webhook client, prompts).

pub mod auth;
pub mod config;
pub mod endpoints;
pub mod export;
pub mod init;
pub mod log;
pub mod profile;
pub mod reports;
pub mod shift;
pub mod users;

use crate::api::WebhookClient;
use crate::config::Config;
use crate::core::auth::AuthLogic;
use crate::core::filter::ReportFilter;
use crate::core::location::{CommandLocation, FixedLocation, LocationProvider, NoLocation};
use crate::errors::{AppError, AppResult};
use crate::export::range::{parse_day, parse_range};
use crate::models::{GeoPoint, User};
use crate::session::{Session, SqliteSessionStore};
use crate::utils::path::prepare_db_path;
use crate::cli::parser::FilterArgs;
use std::io::{self, IsTerminal, Write};

/// Environment variable read when `--password` is omitted.
pub const PASSWORD_ENV: &str = "SHIFTTRACK_PASSWORD";

pub(crate) fn open_session(cfg: &Config) -> AppResult<Session<SqliteSessionStore>> {
    let store = SqliteSessionStore::open(&prepare_db_path(&cfg.database)?)?;
    Ok(Session::new(store))
}

pub(crate) fn client(cfg: &Config) -> AppResult<WebhookClient> {
    WebhookClient::from_config(cfg)
}

/// Session user holding the configured admin role.
pub(crate) fn require_admin(session: &Session<SqliteSessionStore>, cfg: &Config) -> AppResult<User> {
    AuthLogic::require_role(session, &cfg.admin_role)
}

/// `--at` wins, then the configured location command, else no position.
pub(crate) fn location_provider(
    at: Option<&str>,
    cfg: &Config,
) -> AppResult<Box<dyn LocationProvider>> {
    if let Some(at) = at {
        return Ok(Box::new(FixedLocation(GeoPoint::parse(at)?)));
    }
    let provider: Box<dyn LocationProvider> =
        match cfg.location_command.as_deref().filter(|c| !c.trim().is_empty()) {
            Some(command) => Box::new(CommandLocation::new(command)),
            None => Box::new(NoLocation),
        };
    Ok(provider)
}

pub(crate) fn report_filter(args: &FilterArgs) -> AppResult<ReportFilter> {
    let (start_date, end_date) = match args.range.as_deref() {
        Some(r) => {
            let (first, last) = parse_range(r)?;
            (Some(first), Some(last))
        }
        None => (
            args.from.as_deref().map(parse_day).transpose()?,
            args.to.as_deref().map(parse_day).transpose()?,
        ),
    };

    Ok(ReportFilter {
        search: args.search.clone().unwrap_or_default(),
        status: args.status,
        start_date,
        end_date,
    })
}

/// `--password`, then `SHIFTTRACK_PASSWORD`, then a prompt on a terminal.
pub(crate) fn read_password(given: Option<&str>) -> AppResult<String> {
    if let Some(p) = given {
        return Ok(p.to_string());
    }
    if let Ok(p) = std::env::var(PASSWORD_ENV)
        && !p.is_empty()
    {
        return Ok(p);
    }
    if !io::stdin().is_terminal() {
        return Err(AppError::MissingField("password"));
    }

    print!("Password: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Yes/no question on the terminal; a non-interactive stdin answers no.
pub(crate) fn confirm(question: &str) -> AppResult<bool> {
    if !io::stdin().is_terminal() {
        return Ok(false);
    }
    print!("{question} [y/N]: ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
