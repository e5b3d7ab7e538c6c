use crate::cli::commands::{client, open_session, read_password};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::auth::{AuthLogic, Credentials, Registration};
use crate::errors::AppResult;
use crate::models::User;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Register {
            name,
            email,
            password,
            role,
            phone,
        } => {
            let registration = Registration {
                name: name.clone(),
                email: email.clone(),
                password: read_password(password.as_deref())?,
                role: role.clone(),
                phone: phone.clone(),
            };
            let mut session = open_session(cfg)?;
            let user = AuthLogic::register(&client(cfg)?, &mut session, &registration)?;
            success(format!("Account created for {} <{}>", user.name, user.email));
        }

        Commands::Login { email, password } => {
            let creds = Credentials {
                email: email.clone(),
                password: read_password(password.as_deref())?,
            };
            let mut session = open_session(cfg)?;
            let user = AuthLogic::login(&client(cfg)?, &mut session, &creds)?;
            success(format!("Welcome, {} ({})", user.name, user.role));
        }

        Commands::Logout => {
            let mut session = open_session(cfg)?;
            match AuthLogic::logout(&mut session)? {
                Some(user) => success(format!("Logged out {}", user.email)),
                None => info("No user was logged in."),
            }
        }

        Commands::Whoami => {
            let session = open_session(cfg)?;
            let user = AuthLogic::current_user(&session)?;
            print_user(&user);
        }

        _ => {}
    }
    Ok(())
}

pub(crate) fn print_user(user: &User) {
    println!("👤 {}", user.name);
    println!("   Id     : {}", user.id);
    println!("   Email  : {}", user.email);
    println!("   Role   : {}", user.role);
    if let Some(phone) = &user.phone {
        println!("   Phone  : {phone}");
    }
    println!("   Avatar : {}", user.avatar_url());
}
