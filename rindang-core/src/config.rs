use std::path::PathBuf;
use thiserror::Error;

/// Local storage file inside the work directory
pub const STORAGE_FILE: &str = "local.redb";

/// Default reservation fee in rupiah
pub const DEFAULT_RESERVATION_FEE: i64 = 20_000;

/// Natural size of the floor-plan reference image
pub const DEFAULT_FLOOR_PLAN_WIDTH: f64 = 920.0;
pub const DEFAULT_FLOOR_PLAN_HEIGHT: f64 = 650.0;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("RESERVATION_FEE must not be negative (got {0})")]
    NegativeFee(i64),

    #[error("floor plan size must be positive (got {width}x{height})")]
    InvalidFloorPlan { width: f64, height: f64 },

    #[error("API_BASE must start with http:// or https:// (got {0})")]
    InvalidApiBase(String),
}

/// Front-end configuration
///
/// # Environment
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | API_BASE | http://localhost:8080 | Backend base URL |
/// | WORK_DIR | ./work_dir | Local storage and logs |
/// | LOG_LEVEL | info | Log filter |
/// | LOG_JSON | false | JSON log lines |
/// | RESERVATION_FEE | 20000 | Flat reservation fee (rupiah) |
/// | REQUEST_TIMEOUT_SECS | 30 | Backend request timeout |
/// | FLOOR_PLAN_WIDTH | 920 | Reference image width |
/// | FLOOR_PLAN_HEIGHT | 650 | Reference image height |
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base: String,
    pub work_dir: String,
    pub log_level: String,
    pub log_json: bool,
    pub reservation_fee: i64,
    pub request_timeout_secs: u64,
    pub floor_plan_width: f64,
    pub floor_plan_height: f64,
}

impl Config {
    /// Load from the process environment (after `.env`, if any)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; unset or unparsable values use defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
            default: T,
        ) -> T {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        }

        Self {
            api_base: lookup("API_BASE").unwrap_or_else(|| "http://localhost:8080".into()),
            work_dir: lookup("WORK_DIR").unwrap_or_else(|| "./work_dir".into()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: parsed(&lookup, "LOG_JSON", false),
            reservation_fee: parsed(&lookup, "RESERVATION_FEE", DEFAULT_RESERVATION_FEE),
            request_timeout_secs: parsed(&lookup, "REQUEST_TIMEOUT_SECS", 30),
            floor_plan_width: parsed(&lookup, "FLOOR_PLAN_WIDTH", DEFAULT_FLOOR_PLAN_WIDTH),
            floor_plan_height: parsed(&lookup, "FLOOR_PLAN_HEIGHT", DEFAULT_FLOOR_PLAN_HEIGHT),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reservation_fee < 0 {
            return Err(ConfigError::NegativeFee(self.reservation_fee));
        }
        let size_ok = |v: f64| v.is_finite() && v > 0.0;
        if !size_ok(self.floor_plan_width) || !size_ok(self.floor_plan_height) {
            return Err(ConfigError::InvalidFloorPlan {
                width: self.floor_plan_width,
                height: self.floor_plan_height,
            });
        }
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(ConfigError::InvalidApiBase(self.api_base.clone()));
        }
        Ok(())
    }

    pub fn storage_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(STORAGE_FILE)
    }

    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Backend client configuration, optionally authorized
    pub fn client_config(&self, token: Option<String>) -> rindang_client::ClientConfig {
        rindang_client::ClientConfig::new(self.api_base.clone())
            .with_timeout(self.request_timeout_secs)
            .with_optional_token(token)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
