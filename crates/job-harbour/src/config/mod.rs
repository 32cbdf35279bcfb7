use std::env;
use std::fmt;

use crate::workflows::validation::{AttachmentPolicy, DEFAULT_MAX_RESUME_BYTES};

/// Distinguishes runtime behavior for different stages of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub uploads: UploadConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let max_resume_bytes = match env::var("APP_MAX_RESUME_BYTES") {
            Ok(value) => parse_resume_limit(&value)?,
            Err(_) => DEFAULT_MAX_RESUME_BYTES,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            uploads: UploadConfig { max_resume_bytes },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn parse_resume_limit(value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(bytes) if bytes > 0 => Ok(bytes),
        _ => Err(ConfigError::InvalidResumeLimit {
            value: value.to_string(),
        }),
    }
}

/// Limits applied to files picked as resumes.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_resume_bytes: u64,
}

impl UploadConfig {
    pub fn attachment_policy(&self) -> AttachmentPolicy {
        AttachmentPolicy::new(self.max_resume_bytes)
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidResumeLimit { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidResumeLimit { value } => write!(
                f,
                "APP_MAX_RESUME_BYTES must be a positive byte count, got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
