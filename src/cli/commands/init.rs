use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// Creates the config directory and file (unless `--test`) and the session
/// database with all pending migrations applied.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let db_path = match &cli.db {
        Some(custom) => Config::init_all(Some(custom.clone()), cli.test)?,
        None => Config::init_all(Some(cfg.database.clone()), cli.test)?,
    };
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing ShiftTrack…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {db_path}");

    let pool = DbPool::open_initialized(&db_path)?;
    success(format!("Database initialized at {db_path}"));

    if let Err(e) = ttlog(
        &pool.conn,
        "init",
        "",
        &format!("Database initialized at {db_path}"),
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    println!("🎉 ShiftTrack initialization completed!");
    Ok(())
}
