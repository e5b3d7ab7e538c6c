//! The nine webhook endpoints of the gateway.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Register,
    Login,
    Profile,
    StartShift,
    EndShift,
    FetchShifts,
    FetchUsers,
    DeleteUser,
    EditUser,
}

impl Endpoint {
    pub const ALL: [Endpoint; 9] = [
        Endpoint::Register,
        Endpoint::Login,
        Endpoint::Profile,
        Endpoint::StartShift,
        Endpoint::EndShift,
        Endpoint::FetchShifts,
        Endpoint::FetchUsers,
        Endpoint::DeleteUser,
        Endpoint::EditUser,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Register => "register",
            Endpoint::Login => "login",
            Endpoint::Profile => "profile",
            Endpoint::StartShift => "start-shift",
            Endpoint::EndShift => "end-shift",
            Endpoint::FetchShifts => "fetch-shifts",
            Endpoint::FetchUsers => "fetch-users",
            Endpoint::DeleteUser => "delete-user",
            Endpoint::EditUser => "edit-user",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path of each endpoint below `webhook_base`, overridable from the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointPaths {
    pub register: String,
    pub login: String,
    pub profile: String,
    pub start_shift: String,
    pub end_shift: String,
    pub fetch_shifts: String,
    pub fetch_users: String,
    pub delete_user: String,
    pub edit_user: String,
}

impl Default for EndpointPaths {
    fn default() -> Self {
        Self {
            register: "ShiftTrack-registro".into(),
            login: "ShiftTrack-login".into(),
            profile: "ShiftTrack-cargadeinformacion".into(),
            start_shift: "ShiftTrack-horadeinicio".into(),
            end_shift: "ShiftTrack-horafinal".into(),
            fetch_shifts: "ShiftTrack-cargadedatos".into(),
            fetch_users: "ShiftTrack-cargarusuario".into(),
            delete_user: "ShiftTrack-eliminarusuario".into(),
            edit_user: "ShiftTrack-editarusuario".into(),
        }
    }
}

impl EndpointPaths {
    pub fn path(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Register => &self.register,
            Endpoint::Login => &self.login,
            Endpoint::Profile => &self.profile,
            Endpoint::StartShift => &self.start_shift,
            Endpoint::EndShift => &self.end_shift,
            Endpoint::FetchShifts => &self.fetch_shifts,
            Endpoint::FetchUsers => &self.fetch_users,
            Endpoint::DeleteUser => &self.delete_user,
            Endpoint::EditUser => &self.edit_user,
        }
    }

    /// Full URL of `endpoint` below `base`, tolerating stray slashes.
    pub fn url(&self, base: &str, endpoint: Endpoint) -> String {
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            self.path(endpoint).trim_start_matches('/')
        )
    }
}
