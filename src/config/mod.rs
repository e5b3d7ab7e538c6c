use crate::api::endpoints::EndpointPaths;
use crate::errors::{AppError, AppResult};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable pointing at an alternative configuration file.
pub const CONFIG_ENV: &str = "SHIFTTRACK_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_webhook_base")]
    pub webhook_base: String,
    #[serde(default)]
    pub endpoints: EndpointPaths,
    #[serde(default = "default_account_field")]
    pub account_field: String,
    #[serde(default)]
    pub account_id: String,
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_location_timeout")]
    pub location_timeout_secs: u64,
    #[serde(default = "default_admin_role")]
    pub admin_role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_command: Option<String>,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_webhook_base() -> String {
    "http://localhost:5678/webhook".to_string()
}
fn default_account_field() -> String {
    "id_subcuenta".to_string()
}
fn default_time_zone() -> String {
    "America/New_York".to_string()
}
fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}
fn default_request_timeout() -> u64 {
    30
}
fn default_location_timeout() -> u64 {
    5
}
fn default_admin_role() -> String {
    "Admin".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            webhook_base: default_webhook_base(),
            endpoints: EndpointPaths::default(),
            account_field: default_account_field(),
            account_id: String::new(),
            time_zone: default_time_zone(),
            date_format: default_date_format(),
            request_timeout_secs: default_request_timeout(),
            location_timeout_secs: default_location_timeout(),
            admin_role: default_admin_role(),
            location_command: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("shifttrack")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".shifttrack")
        }
    }

    /// Return the full path of the config file (`SHIFTTRACK_CONFIG` wins)
    pub fn config_file() -> PathBuf {
        match env::var(CONFIG_ENV) {
            Ok(p) if !p.trim().is_empty() => PathBuf::from(p),
            _ => Self::config_dir().join("shifttrack.conf"),
        }
    }

    /// Return the full path of the local SQLite session store
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("shifttrack.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Write the configuration as YAML, creating the parent directory.
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    pub fn validate(&self) -> AppResult<()> {
        self.tz()?;
        if !crate::utils::time::is_valid_pattern(&self.date_format) {
            return Err(AppError::Config(format!(
                "invalid date_format '{}'",
                self.date_format
            )));
        }
        if self.webhook_base.trim().is_empty() {
            return Err(AppError::Config("webhook_base must not be empty".into()));
        }
        if self.account_field.trim().is_empty() {
            return Err(AppError::Config("account_field must not be empty".into()));
        }
        Ok(())
    }

    /// Display time zone used for every time/date projection.
    pub fn tz(&self) -> AppResult<Tz> {
        self.time_zone
            .parse::<Tz>()
            .map_err(|_| AppError::InvalidTimeZone(self.time_zone.clone()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn location_timeout(&self) -> Duration {
        Duration::from_secs(self.location_timeout_secs)
    }

    /// Initialize configuration and database files.
    /// Returns the path of the configured database.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    Self::config_dir().join(p)
                }
            }
            None => Self::database_file(),
        };

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // keep the user's endpoint settings when re-running init
        let mut config = Self::load().unwrap_or_default();
        config.database = db_path.to_string_lossy().to_string();

        if !is_test {
            config.save_to(&Self::config_file())?;
        }

        Ok(db_path)
    }
}
