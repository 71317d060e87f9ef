use std::env;
use std::str::FromStr;
use std::time::Duration;
use url::Url;
use validator::Validate;

use crate::error::AppError;

const DEFAULT_ANALYSIS_URL: &str = "http://localhost:8000/analyze";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Where appended communications are analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    Local,
    Remote,
}

impl FromStr for AnalysisMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(AnalysisMode::Local),
            "remote" => Ok(AnalysisMode::Remote),
            other => Err(AppError::Config(format!(
                "Unknown analysis mode '{}' (expected 'local' or 'remote')",
                other
            ))),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
    Bunyan,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "bunyan" => Ok(LogFormat::Bunyan),
            other => Err(AppError::Config(format!(
                "Unknown log format '{}' (expected 'pretty', 'json' or 'bunyan')",
                other
            ))),
        }
    }
}

/// Runtime configuration, read from `FINTENT_*` environment variables.
#[derive(Debug, Clone, Validate)]
pub struct AppConfig {
    pub analysis_mode: AnalysisMode,
    pub analysis_endpoint: Url,
    /// Per-request timeout for the analysis endpoint, in seconds.
    #[validate(range(min = 1, max = 300))]
    pub request_timeout_secs: u64,
    /// Preload the demo dataset into the store.
    pub seed_data: bool,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        // NOTE: expect() is acceptable here: the default URL is a constant known to parse.
        Self {
            analysis_mode: AnalysisMode::Local,
            analysis_endpoint: Url::parse(DEFAULT_ANALYSIS_URL)
                .expect("Invalid default analysis URL"),
            request_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            seed_data: false,
            log_format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Builds the configuration from the process environment.
    ///
    /// Unset variables fall back to defaults; set but malformed ones are errors.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let analysis_mode = match env::var("FINTENT_ANALYSIS_MODE") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.analysis_mode,
        };

        let analysis_endpoint = match env::var("FINTENT_ANALYSIS_URL") {
            Ok(raw) => Url::parse(raw.trim())?,
            Err(_) => defaults.analysis_endpoint,
        };

        let request_timeout_secs = match env::var("FINTENT_HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| {
                AppError::Config(format!("FINTENT_HTTP_TIMEOUT_SECS must be an integer: {}", e))
            })?,
            Err(_) => defaults.request_timeout_secs,
        };

        let seed_data = match env::var("FINTENT_SEED_DATA") {
            Ok(raw) => parse_bool(&raw)?,
            Err(_) => defaults.seed_data,
        };

        let log_format = match env::var("FINTENT_LOG_FORMAT") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.log_format,
        };

        let config = Self {
            analysis_mode,
            analysis_endpoint,
            request_timeout_secs,
            seed_data,
            log_format,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_bool(raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(AppError::Config(format!("Invalid boolean value '{}'", other))),
    }
}
