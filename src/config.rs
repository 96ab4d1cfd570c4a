//! Configuration management for the Kashidashi client

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::messages::Locale;
use crate::models::barcode::{BarcodeFormat, FacingMode};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    /// Origin the forms post to, e.g. `http://127.0.0.1:5000`
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Element identifiers the interaction layer binds to.
///
/// Every element is optional on the page; a missing one silently disables the
/// feature that needs it.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PageBindings {
    pub timestamp_input: String,
    pub book_form_action: String,
    pub book_select: String,
    pub user_form_action: String,
    pub user_select: String,
    pub scan_start_button: String,
    pub scan_stop_button: String,
    pub paste_button: String,
    pub video: String,
    pub result_display: String,
    /// Inputs receiving a scanned code, first match wins
    pub scan_targets: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScannerConfig {
    pub poll_interval_ms: u64,
    pub formats: Vec<BarcodeFormat>,
    pub facing_mode: FacingMode,
    pub stop_after_first: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ClientConfig {
    pub server: ServerConfig,
    pub page: PageBindings,
    pub scanner: ScannerConfig,
    pub logging: LoggingConfig,
    pub locale: Locale,
}

impl ClientConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Environment variables, e.g. KASHIDASHI_SCANNER__POLL_INTERVAL_MS=200
            .add_source(
                Environment::with_prefix("KASHIDASHI")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.base_url", env::var("KASHIDASHI_SERVER_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl ServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ScannerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for PageBindings {
    fn default() -> Self {
        Self {
            timestamp_input: "logged_at".to_string(),
            book_form_action: "/add_book".to_string(),
            book_select: "isbn".to_string(),
            user_form_action: "/add_user".to_string(),
            user_select: "user_id".to_string(),
            scan_start_button: "scan-start".to_string(),
            scan_stop_button: "scan-stop".to_string(),
            paste_button: "paste-isbn".to_string(),
            video: "scanner-video".to_string(),
            result_display: "scanned_result".to_string(),
            scan_targets: vec!["isbn_new".to_string(), "isbn".to_string()],
        }
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 300,
            formats: vec![BarcodeFormat::Ean13],
            facing_mode: FacingMode::Environment,
            stop_after_first: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
