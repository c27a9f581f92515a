//! Runtime configuration.
//!
//! Everything is read from environment variables (a `.env` file is honoured
//! when present). Unset variables fall back to the defaults below.

use crate::error::AppError;
use std::env;
use std::str::FromStr;
use std::time::Duration;

// --- Constants ---
const DEFAULT_DATA_SOURCE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/crops_data.json");
const DEFAULT_RESPONSE_DELAY_MS: u64 = 1000;
const DEFAULT_RESPONSE_JITTER_MS: u64 = 1000;
const DEFAULT_TYPING_SPEED_MS: u64 = 10;
const DEFAULT_LOG_FILTER: &str = "info";
/// Upper bound for every configured pause (ten minutes).
const MAX_PAUSE_MS: u64 = 600_000;

/// Log output flavour for the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!(
                "FARMMATE_LOG_FORMAT must be 'pretty' or 'json', got '{}'",
                other
            ))),
        }
    }
}

/// Settings for the knowledge source, the session pacing and logging.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Local path or http(s) URL of the crops JSON document. Defaults to the
    /// copy bundled with this crate, independent of the working directory.
    pub data_source: String,
    /// Fixed part of the artificial "thinking" pause before a reply.
    pub response_delay: Duration,
    /// Upper bound of the random extra pause added to `response_delay`.
    pub response_jitter: Duration,
    /// Delay between characters when typing a reply.
    pub typing_speed: Duration,
    pub start_muted: bool,
    /// Pins the fallback selector to a reproducible sequence.
    pub fallback_seed: Option<u64>,
    pub log_filter: String,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            response_delay: Duration::from_millis(DEFAULT_RESPONSE_DELAY_MS),
            response_jitter: Duration::from_millis(DEFAULT_RESPONSE_JITTER_MS),
            typing_speed: Duration::from_millis(DEFAULT_TYPING_SPEED_MS),
            start_muted: false,
            fallback_seed: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Loads `.env` (if any) and then reads the process environment.
    pub fn load() -> Result<Self, AppError> {
        // A missing .env file is the normal case.
        let _ = dotenv::dotenv();
        Self::from_env()
    }

    /// Reads the configuration from the current process environment only.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        Ok(Self {
            data_source: env::var("FARMMATE_DATA_SOURCE").unwrap_or(defaults.data_source),
            response_delay: read_millis("FARMMATE_RESPONSE_DELAY_MS")?
                .unwrap_or(defaults.response_delay),
            response_jitter: read_millis("FARMMATE_RESPONSE_JITTER_MS")?
                .unwrap_or(defaults.response_jitter),
            typing_speed: read_millis("FARMMATE_TYPING_SPEED_MS")?
                .unwrap_or(defaults.typing_speed),
            start_muted: read_parsed::<bool>("FARMMATE_MUTED")?.unwrap_or(defaults.start_muted),
            fallback_seed: read_parsed::<u64>("FARMMATE_FALLBACK_SEED")?,
            log_filter: env::var("FARMMATE_LOG").unwrap_or(defaults.log_filter),
            log_format: read_parsed::<LogFormat>("FARMMATE_LOG_FORMAT")?
                .unwrap_or(defaults.log_format),
        })
    }
}

fn read_millis(key: &str) -> Result<Option<Duration>, AppError> {
    match read_parsed::<u64>(key)? {
        Some(ms) if ms > MAX_PAUSE_MS => Err(AppError::Config(format!(
            "{} must be at most {} ms, got {}",
            key, MAX_PAUSE_MS, ms
        ))),
        value => Ok(value.map(Duration::from_millis)),
    }
}

fn read_parsed<T>(key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| AppError::Config(format!("{} has invalid value '{}': {}", key, raw, e))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KEYS: [&str; 8] = [
        "FARMMATE_DATA_SOURCE",
        "FARMMATE_RESPONSE_DELAY_MS",
        "FARMMATE_RESPONSE_JITTER_MS",
        "FARMMATE_TYPING_SPEED_MS",
        "FARMMATE_MUTED",
        "FARMMATE_FALLBACK_SEED",
        "FARMMATE_LOG",
        "FARMMATE_LOG_FORMAT",
    ];

    #[test]
    fn test_defaults_when_unset() {
        let unset: Vec<(&str, Option<&str>)> = ALL_KEYS.iter().map(|k| (*k, None)).collect();
        temp_env::with_vars(unset, || {
            let config = AppConfig::from_env().expect("defaults should load");
            assert_eq!(config.data_source, DEFAULT_DATA_SOURCE);
            assert!(std::path::Path::new(&config.data_source).is_file());
            assert_eq!(config.response_delay, Duration::from_millis(1000));
            assert_eq!(config.response_jitter, Duration::from_millis(1000));
            assert_eq!(config.typing_speed, Duration::from_millis(10));
            assert!(!config.start_muted);
            assert_eq!(config.fallback_seed, None);
            assert_eq!(config.log_format, LogFormat::Pretty);
        });
    }

    #[test]
    fn test_overrides_from_env() {
        temp_env::with_vars(
            [
                ("FARMMATE_DATA_SOURCE", Some("https://example.org/crops.json")),
                ("FARMMATE_RESPONSE_DELAY_MS", Some("0")),
                ("FARMMATE_MUTED", Some("true")),
                ("FARMMATE_FALLBACK_SEED", Some("42")),
                ("FARMMATE_LOG_FORMAT", Some("json")),
            ],
            || {
                let config = AppConfig::from_env().expect("overrides should load");
                assert_eq!(config.data_source, "https://example.org/crops.json");
                assert_eq!(config.response_delay, Duration::ZERO);
                assert!(config.start_muted);
                assert_eq!(config.fallback_seed, Some(42));
                assert_eq!(config.log_format, LogFormat::Json);
            },
        );
    }

    #[test]
    fn test_invalid_number_is_config_error() {
        temp_env::with_var("FARMMATE_TYPING_SPEED_MS", Some("fast"), || {
            let err = AppConfig::from_env().unwrap_err();
            assert!(matches!(err, AppError::Config(_)));
            assert!(err.to_string().contains("FARMMATE_TYPING_SPEED_MS"));
        });
    }

    #[test]
    fn test_oversized_pause_is_config_error() {
        temp_env::with_var("FARMMATE_RESPONSE_JITTER_MS", Some("18446744073709551615"), || {
            let err = AppConfig::from_env().unwrap_err();
            assert!(matches!(err, AppError::Config(_)));
            assert!(err.to_string().contains("FARMMATE_RESPONSE_JITTER_MS"));
        });

        temp_env::with_var("FARMMATE_RESPONSE_DELAY_MS", Some("600000"), || {
            let config = AppConfig::from_env().expect("the cap itself is allowed");
            assert_eq!(config.response_delay, Duration::from_millis(600_000));
        });
    }
}
