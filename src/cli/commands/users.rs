use crate::cli::commands::{client, confirm, open_session, require_admin};
use crate::cli::parser::UserCommands;
use crate::config::Config;
use crate::core::users::{UserLogic, UserUpdate};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info, success};
use crate::utils::table::Table;

pub fn handle(action: &UserCommands, cfg: &Config) -> AppResult<()> {
    let mut session = open_session(cfg)?;
    let admin = require_admin(&session, cfg)?;
    let client = client(cfg)?;

    match action {
        UserCommands::List => {
            let users = UserLogic::list(&client)?;
            header("Users");
            if users.is_empty() {
                info("No users found.");
                return Ok(());
            }
            let mut table = Table::new(["Id", "Name", "Email", "Role"]);
            for u in &users {
                table.add_row(vec![u.id.clone(), u.name.clone(), u.email.clone(), u.role.clone()]);
            }
            print!("{}", table.render());
        }

        UserCommands::Delete { user, yes } => {
            let users = UserLogic::list(&client)?;
            let target = UserLogic::find(&users, user)?;

            if !*yes && !confirm(&format!("Delete {} <{}>?", target.name, target.email))? {
                info("Deletion cancelled.");
                return Ok(());
            }

            UserLogic::delete(&client, target).map_err(AppError::alert)?;
            session.audit(
                "user_delete",
                &target.email,
                &format!("Deleted by {}", admin.email),
            );
            success(format!("User {} deleted", target.email));
        }

        UserCommands::Edit {
            user,
            name,
            email,
            role,
            password,
        } => {
            let users = UserLogic::list(&client)?;
            let target = UserLogic::find(&users, user)?;
            let changes = UserUpdate {
                name: name.clone(),
                email: email.clone(),
                role: role.clone(),
                password: password.clone(),
            };

            let updated = UserLogic::update(&client, target, &changes).map_err(AppError::alert)?;
            session.audit(
                "user_edit",
                &updated.email,
                &format!("Edited by {}", admin.email),
            );
            success(format!(
                "User {} updated: {} <{}> ({})",
                updated.id, updated.name, updated.email, updated.role
            ));
        }
    }
    Ok(())
}
