use crate::api::{Endpoint, Payload, WebhookClient};
use crate::errors::{AppError, AppResult};
use crate::models::User;
use crate::models::user::{AvatarSource, UserFallback, build_user};
use crate::normalize::first_record;
use crate::session::{Session, SessionRepository};
use chrono::Utc;
use serde_json::{Value, json};

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
    pub phone: Option<String>,
}

/// Login, registration and session ownership.
pub struct AuthLogic;

impl AuthLogic {
    /// Authenticate against the gateway and remember the user locally.
    pub fn login<R: SessionRepository>(
        client: &WebhookClient,
        session: &mut Session<R>,
        creds: &Credentials,
    ) -> AppResult<User> {
        require("email", &creds.email)?;
        require("password", &creds.password)?;

        let mut body = Payload::new();
        body.insert("email".into(), json!(creds.email.trim()));
        body.insert("password".into(), json!(creds.password));

        let raw = client.post(Endpoint::Login, body)?;
        let record = first_record(&raw);
        if !record.is_object() {
            return Err(AppError::IncompleteResponse);
        }

        let email = creds.email.trim();
        let fallback = UserFallback {
            id: Utc::now().timestamp_millis().to_string(),
            name: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            role: "User".to_string(),
        };
        let user = build_user(&record, &fallback, AvatarSource::Generated);

        session.set_current_user(&user)?;
        session.audit("login", &user.email, &format!("Logged in as {}", user.name));
        Ok(user)
    }

    /// Create an account. The new user becomes the session user only when
    /// nobody is logged in yet (an admin creating accounts stays logged in).
    pub fn register<R: SessionRepository>(
        client: &WebhookClient,
        session: &mut Session<R>,
        reg: &Registration,
    ) -> AppResult<User> {
        require("name", &reg.name)?;
        require("email", &reg.email)?;
        require("password", &reg.password)?;

        let role = reg
            .role
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or("User");

        let mut body = Payload::new();
        body.insert("name".into(), json!(reg.name.trim()));
        body.insert("email".into(), json!(reg.email.trim()));
        body.insert("password".into(), json!(reg.password));
        body.insert("role".into(), json!(role));
        if let Some(phone) = reg.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            body.insert("phone".into(), json!(phone.trim()));
        }

        let raw = client.post(Endpoint::Register, body)?;
        let record = match first_record(&raw) {
            Value::Object(map) => Value::Object(map),
            _ => Value::Null,
        };

        let fallback = UserFallback {
            id: Utc::now().timestamp_millis().to_string(),
            name: reg.name.trim().to_string(),
            email: reg.email.trim().to_string(),
            role: role.to_string(),
        };
        let mut user = build_user(&record, &fallback, AvatarSource::Generated);
        if user.phone.is_none() {
            user.phone = reg.phone.clone().filter(|p| !p.trim().is_empty());
        }

        if session.current_user()?.is_none() {
            session.set_current_user(&user)?;
        }
        session.audit("register", &user.email, &format!("Registered {}", user.name));
        Ok(user)
    }

    /// Forget the session user and any active shift marker.
    pub fn logout<R: SessionRepository>(session: &mut Session<R>) -> AppResult<Option<User>> {
        let user = session.current_user()?;
        session.logout()?;
        if let Some(u) = &user {
            session.audit("logout", &u.email, "Logged out");
        }
        Ok(user)
    }

    pub fn current_user<R: SessionRepository>(session: &Session<R>) -> AppResult<User> {
        session.current_user()?.ok_or(AppError::NotLoggedIn)
    }

    /// The session user, provided it holds `role`.
    pub fn require_role<R: SessionRepository>(session: &Session<R>, role: &str) -> AppResult<User> {
        let user = Self::current_user(session)?;
        if user.has_role(role) {
            Ok(user)
        } else {
            Err(AppError::Forbidden(role.to_string()))
        }
    }
}

pub(crate) fn require(field: &'static str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::MissingField(field));
    }
    Ok(())
}
