use crate::api::{Endpoint, Payload, WebhookClient};
use crate::core::auth::require;
use crate::errors::{AppError, AppResult};
use crate::models::User;
use crate::models::user::{AvatarSource, UserFallback, build_listed_user, build_user};
use crate::normalize::{first_record, normalize_logged};
use serde_json::{Value, json};

/// New values for an account; the password is only sent when non-blank.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub password: Option<String>,
}

pub struct UserLogic;

impl UserLogic {
    pub fn list(client: &WebhookClient) -> AppResult<Vec<User>> {
        let mut body = Payload::new();
        body.insert("request".into(), json!("get_all_users"));

        let raw = client.post(Endpoint::FetchUsers, body)?;
        Ok(normalize_logged(&raw, "fetch-users")
            .iter()
            .enumerate()
            .map(|(i, record)| build_listed_user(record, i))
            .collect())
    }

    /// Look a user up by id or (case-insensitive) email.
    pub fn find<'a>(users: &'a [User], key: &str) -> AppResult<&'a User> {
        let key = key.trim();
        users
            .iter()
            .find(|u| u.id == key || u.email.eq_ignore_ascii_case(key))
            .ok_or_else(|| AppError::UserNotFound(key.to_string()))
    }

    pub fn delete(client: &WebhookClient, user: &User) -> AppResult<()> {
        let mut body = Payload::new();
        body.insert("id".into(), json!(user.id));
        body.insert("name".into(), json!(user.name));
        body.insert("email".into(), json!(user.email));
        body.insert("role".into(), json!(user.role));
        body.insert("action".into(), json!("delete"));

        if client.post_accepted(Endpoint::DeleteUser, body)? {
            Ok(())
        } else {
            Err(AppError::Remote(
                "Could not delete the user. Try again.".to_string(),
            ))
        }
    }

    /// Send the update and return the user as it now reads locally.
    pub fn update(client: &WebhookClient, user: &User, changes: &UserUpdate) -> AppResult<User> {
        let mut updated = user.clone();
        if let Some(name) = non_blank(&changes.name) {
            updated.name = name;
        }
        if let Some(email) = non_blank(&changes.email) {
            updated.email = email;
        }
        if let Some(role) = non_blank(&changes.role) {
            updated.role = role;
        }
        require("name", &updated.name)?;
        require("email", &updated.email)?;

        let mut body = Payload::new();
        body.insert("id".into(), json!(user.id));
        body.insert("user_id".into(), json!(user.id));
        body.insert("name".into(), json!(updated.name));
        body.insert("email".into(), json!(updated.email));
        body.insert("role".into(), json!(updated.role));
        if let Some(password) = non_blank(&changes.password) {
            body.insert("password".into(), json!(password));
        }

        if client.post_accepted(Endpoint::EditUser, body)? {
            Ok(updated)
        } else {
            Err(AppError::Remote(
                "The server could not process the update. Check the webhook configuration."
                    .to_string(),
            ))
        }
    }

    /// Full profile of `user`; fields the gateway leaves out keep their
    /// session values, and a stored avatar wins over the generated one.
    pub fn profile(client: &WebhookClient, user: &User) -> AppResult<User> {
        let mut body = Payload::new();
        body.insert("email".into(), json!(user.email));

        let raw = client.post(Endpoint::Profile, body)?;
        let record = match first_record(&raw) {
            Value::Object(map) => Value::Object(map),
            _ => Value::Null,
        };

        let fallback = UserFallback {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        };
        let mut profile = build_user(&record, &fallback, AvatarSource::PreferRemote);
        if profile.phone.is_none() {
            profile.phone = user.phone.clone();
        }
        Ok(profile)
    }
}

fn non_blank(v: &Option<String>) -> Option<String> {
    v.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
