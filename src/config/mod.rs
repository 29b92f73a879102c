//! Configuration for the dashboard
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/stockpit/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

mod serialization;

#[cfg(test)]
mod tests;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default catalog API base URL
pub const DEFAULT_API_URL: &str = "https://api.escuelajs.co/api/v1";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote catalog API
    pub api_url: String,

    /// Directory CSV exports are written to
    pub export_dir: PathBuf,

    /// Initial rows-per-page for the table
    pub page_size: usize,

    /// Theme name: "dark", "light", "terminal"
    pub theme: String,

    /// Demo mode: load a bundled sample catalog instead of fetching
    pub demo_mode: bool,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Audit trail configuration
    pub audit: AuditConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            export_dir: PathBuf::from("."),
            page_size: 10,
            theme: "dark".to_string(),
            demo_mode: false,
            logging: LoggingConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Enable file logging (in addition to the TUI buffer)
    pub file_enabled: bool,
    /// Directory for log files
    pub file_dir: PathBuf,
    /// Log file rotation strategy
    pub file_rotation: LogRotation,
    /// Prefix for log file names (e.g., "stockpit" -> "stockpit.2026-08-30.log")
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false, // Opt-in feature
            file_dir: PathBuf::from("./logs/trace"),
            file_rotation: LogRotation::Daily,
            file_prefix: "stockpit".to_string(),
        }
    }
}

/// Log file rotation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    Daily,
    Never,
}

impl LogRotation {
    fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "hourly" => LogRotation::Hourly,
            "never" => LogRotation::Never,
            _ => LogRotation::Daily,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogRotation::Hourly => "hourly",
            LogRotation::Daily => "daily",
            LogRotation::Never => "never",
        }
    }
}

/// Audit trail settings (JSONL session log of loads, edits, exports)
#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub enabled: bool,
    pub dir: PathBuf,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: PathBuf::from("./logs"),
        }
    }
}

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub api_url: Option<String>,
    pub export_dir: Option<String>,
    pub page_size: Option<usize>,
    pub theme: Option<String>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,

    /// Optional [audit] section
    pub audit: Option<FileAudit>,
}

/// Logging settings as loaded from the config file
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_rotation: Option<String>,
    pub file_prefix: Option<String>,
}

/// Audit settings as loaded from the config file
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileAudit {
    pub enabled: Option<bool>,
    pub dir: Option<String>,
}

impl LoggingConfig {
    fn from_file(file: Option<FileLogging>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            level: file.level.unwrap_or(defaults.level),
            file_enabled: file.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file.file_dir.map(PathBuf::from).unwrap_or(defaults.file_dir),
            file_rotation: file
                .file_rotation
                .map(|s| LogRotation::parse(&s))
                .unwrap_or(defaults.file_rotation),
            file_prefix: file.file_prefix.unwrap_or(defaults.file_prefix),
        }
    }
}

impl AuditConfig {
    fn from_file(file: Option<FileAudit>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            enabled: file.enabled.unwrap_or(defaults.enabled),
            dir: file.dir.map(PathBuf::from).unwrap_or(defaults.dir),
        }
    }
}

impl Config {
    /// Get the config file path: ~/.config/stockpit/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("stockpit").join("config.toml"))
    }

    /// Create the config file with defaults if it doesn't exist.
    /// Called during startup to help users discover configuration options.
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        // Config::default().to_toml() is the single source of truth
        let template = Self::default().to_toml();
        let _ = std::fs::write(&path, template);
    }

    /// Load the file config if it exists.
    ///
    /// A config file that exists but cannot be parsed fails fast with a
    /// clear message instead of silently falling back to defaults while the
    /// user debugs the wrong thing.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\nCONFIG ERROR - Failed to parse {}\n", path.display());
                    eprintln!("  {}\n", e);
                    eprintln!("  To reset, delete the file and restart stockpit.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\nCONFIG ERROR - Cannot read {}\n", path.display());
                eprintln!("  {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();

        // API base URL: env > file > default
        let api_url = std::env::var("STOCKPIT_API_URL")
            .ok()
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        // Export directory: env > file > default
        let export_dir = std::env::var("STOCKPIT_EXPORT_DIR")
            .ok()
            .or(file.export_dir)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        // Page size: env > file > default; zero would break pagination math
        let page_size = std::env::var("STOCKPIT_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(file.page_size)
            .filter(|&s| s > 0)
            .unwrap_or(10);

        // Theme: env > file > default
        let theme = std::env::var("STOCKPIT_THEME")
            .ok()
            .or(file.theme)
            .unwrap_or_else(|| "dark".to_string());

        // Demo mode: env only (runtime flag)
        let demo_mode = std::env::var("STOCKPIT_DEMO")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        let logging = LoggingConfig::from_file(file.logging);
        let audit = AuditConfig::from_file(file.audit);

        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            export_dir,
            page_size,
            theme,
            demo_mode,
            logging,
            audit,
        }
    }
}
