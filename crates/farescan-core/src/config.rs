//! Run configuration.
//!
//! Defaults reproduce the stock scan (ORD to five European airports over
//! 2025-09-15..=2025-10-15). A TOML file may override any of it. Credentials
//! normally come from the environment and are applied by the CLI layer.

use chrono::Days;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::model::SearchParams;

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "farescan.toml";

/// Default Amadeus environment.
pub const DEFAULT_API_URL: &str = "https://test.api.amadeus.com";

/// Largest `max` the flight-offers endpoint accepts.
pub const MAX_RESULTS_LIMIT: u32 = 250;

/// Longest trip accepted, in days.
pub const MAX_TRIP_DURATION_DAYS: u32 = 365;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub search: SearchParams,
    pub api: ApiConfig,
    pub smtp: SmtpConfig,
}

/// Flight-pricing API endpoint and client credentials.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Mail relay and the single sender/recipient address.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub address: String,
    pub password: String,
    pub timeout_secs: u64,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 465,
            address: String::new(),
            password: String::new(),
            timeout_secs: 30,
        }
    }
}

impl SmtpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("client_id", &redact(&self.client_id))
            .field("client_secret", &redact(&self.client_secret))
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("address", &self.address)
            .field("password", &redact(&self.password))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        "<unset>"
    } else {
        "***"
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `farescan.toml` in the
    /// working directory is used if present, otherwise built-in defaults.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Read and parse a TOML config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded config file");
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Check the configuration before any network call.
    ///
    /// SMTP credentials are only required when an email will actually be sent.
    pub fn validate(&self, require_smtp: bool) -> ConfigResult<()> {
        if self.api.client_id.trim().is_empty() {
            return Err(ConfigError::Missing("API client id (API_KEY)"));
        }
        if self.api.client_secret.trim().is_empty() {
            return Err(ConfigError::Missing("API client secret (API_SECRET)"));
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(ConfigError::invalid("api.base_url", "must be an http(s) URL"));
        }
        if self.api.connect_timeout_secs == 0 || self.api.request_timeout_secs == 0 {
            return Err(ConfigError::invalid("api timeouts", "must be greater than zero"));
        }

        let search = &self.search;
        if search.destinations.is_empty() {
            return Err(ConfigError::invalid("search.destinations", "at least one destination is required"));
        }
        if search.end_date < search.start_date {
            return Err(ConfigError::invalid(
                "search.end_date",
                format!("{} is before start_date {}", search.end_date, search.start_date),
            ));
        }
        if search.trip_duration_days == 0 || search.trip_duration_days > MAX_TRIP_DURATION_DAYS {
            return Err(ConfigError::invalid(
                "search.trip_duration_days",
                format!("must be between 1 and {}", MAX_TRIP_DURATION_DAYS),
            ));
        }
        if search
            .end_date
            .checked_add_days(Days::new(u64::from(search.trip_duration_days)))
            .is_none()
        {
            return Err(ConfigError::invalid(
                "search.end_date",
                "last return date is out of the supported calendar range",
            ));
        }
        if search.currency.len() != 3 || !search.currency.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(ConfigError::invalid("search.currency", "must be a three-letter ISO code"));
        }
        if search.max_results == 0 || search.max_results > MAX_RESULTS_LIMIT {
            return Err(ConfigError::invalid(
                "search.max_results",
                format!("must be between 1 and {}", MAX_RESULTS_LIMIT),
            ));
        }

        if require_smtp {
            if self.smtp.address.trim().is_empty() {
                return Err(ConfigError::Missing("email address (EMAIL_ADDRESS)"));
            }
            if self.smtp.password.is_empty() {
                return Err(ConfigError::Missing("email password (EMAIL_PASSWORD)"));
            }
            if self.smtp.host.trim().is_empty() {
                return Err(ConfigError::invalid("smtp.host", "must not be empty"));
            }
            if self.smtp.timeout_secs == 0 {
                return Err(ConfigError::invalid("smtp.timeout_secs", "must be greater than zero"));
            }
        }

        Ok(())
    }
}
