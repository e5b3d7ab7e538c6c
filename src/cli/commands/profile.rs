use crate::cli::commands::auth::print_user;
use crate::cli::commands::{client, open_session};
use crate::config::Config;
use crate::core::auth::AuthLogic;
use crate::core::users::UserLogic;
use crate::errors::AppResult;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let session = open_session(cfg)?;
    let user = AuthLogic::current_user(&session)?;
    let profile = UserLogic::profile(&client(cfg)?, &user)?;
    print_user(&profile);
    Ok(())
}
