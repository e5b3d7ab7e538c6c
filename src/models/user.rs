use crate::normalize::alias::{pick_text, pick_text_or};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const AVATAR_SERVICE: &str = "https://ui-avatars.com/api/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl User {
    pub fn has_role(&self, role: &str) -> bool {
        self.role.eq_ignore_ascii_case(role)
    }

    /// Stored avatar, or the generated one for the display name.
    pub fn avatar_url(&self) -> String {
        self.avatar
            .clone()
            .unwrap_or_else(|| avatar_for(&self.name))
    }
}

/// Source-field aliases of a user record, highest priority first.
pub struct UserAliases;

impl UserAliases {
    pub const ID: &'static [&'static str] = &["id", "user_id"];
    pub const NAME: &'static [&'static str] = &["nombre", "name", "user_name"];
    pub const EMAIL: &'static [&'static str] = &["email", "user_email"];
    pub const ROLE: &'static [&'static str] = &["rol", "role"];
    pub const PHONE: &'static [&'static str] = &["phone", "telefono"];
    pub const AVATAR: &'static [&'static str] = &["avatar"];
}

/// Values used when a record lacks a field; they differ per call site
/// (login knows the typed email, a list knows the row index, ...).
#[derive(Debug, Clone)]
pub struct UserFallback {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// How the avatar of a built user is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarSource {
    /// Always generated from the display name.
    Generated,
    /// A remote `avatar` field wins over the generated one.
    PreferRemote,
}

pub fn build_user(record: &Value, fallback: &UserFallback, avatar: AvatarSource) -> User {
    let name = pick_text_or(record, UserAliases::NAME, &fallback.name);
    let remote_avatar = match avatar {
        AvatarSource::PreferRemote => pick_text(record, UserAliases::AVATAR),
        AvatarSource::Generated => None,
    };

    User {
        id: pick_text_or(record, UserAliases::ID, &fallback.id),
        email: pick_text_or(record, UserAliases::EMAIL, &fallback.email),
        role: pick_text_or(record, UserAliases::ROLE, &fallback.role),
        avatar: Some(remote_avatar.unwrap_or_else(|| avatar_for(&name))),
        phone: pick_text(record, UserAliases::PHONE),
        name,
    }
}

/// Build row `index` of a user listing.
pub fn build_listed_user(record: &Value, index: usize) -> User {
    let fallback = UserFallback {
        id: format!("u-{index}"),
        name: pick_text(record, UserAliases::EMAIL).unwrap_or_else(|| format!("User {}", index + 1)),
        email: String::new(),
        role: "Analyst".to_string(),
    };
    build_user(record, &fallback, AvatarSource::Generated)
}

/// Generated avatar URL for a display name.
pub fn avatar_for(name: &str) -> String {
    let name = if name.trim().is_empty() { "User" } else { name };
    format!(
        "{AVATAR_SERVICE}?name={}&background=random",
        urlencoding::encode(name)
    )
}
