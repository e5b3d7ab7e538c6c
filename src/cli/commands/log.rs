use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::path::prepare_db_path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let pool = DbPool::open_initialized(&prepare_db_path(&cfg.database)?)?;
        LogLogic::print_log(&pool)?;
    }

    Ok(())
}
