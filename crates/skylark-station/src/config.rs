//! Station configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use skylark_core::{DEFAULT_ENDPOINT, LoopConfig, TrendThresholds};

/// Station configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sampling settings.
    pub station: StationConfig,
    /// Trend classifier thresholds.
    pub classifier: ClassifierConfig,
    /// Remote weather settings.
    pub weather: WeatherConfig,
    /// Output sink selection.
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from the default path.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = default_config_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Read {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.as_ref().to_path_buf(),
            source: e,
        })
    }

    /// Save configuration to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Write {
            path: path.as_ref().to_path_buf(),
            source: e,
        })
    }

    /// Validate the configuration and return any errors.
    ///
    /// This is the only fatal error path in the station: anything caught
    /// here aborts startup, while every error after startup is contained
    /// by the loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        errors.extend(self.station.validate());
        errors.extend(self.classifier.validate());
        errors.extend(self.weather.validate());
        errors.extend(self.output.validate());

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load and validate configuration from a file.
    pub fn load_validated<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Translate into the core loop's construction parameters.
    #[must_use]
    pub fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            city: self.station.city.clone(),
            tick_interval: Duration::from_millis(self.station.tick_interval_ms),
            sensor_backoff: Duration::from_millis(self.station.sensor_backoff_ms),
            history_capacity: self.station.history_size,
            stats: self.station.stats,
            moving_average_window: self.station.moving_average_window,
            thresholds: TrendThresholds {
                day: self.classifier.day_threshold,
                night: self.classifier.night_threshold,
                epsilon: self.classifier.trend_epsilon,
            },
        }
    }
}

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 100;
/// Maximum tick interval in milliseconds (1 minute).
pub const MAX_TICK_INTERVAL_MS: u64 = 60_000;

/// Sampling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    /// City reported in payloads and used for weather lookups.
    pub city: String,
    /// Milliseconds between ticks.
    pub tick_interval_ms: u64,
    /// Milliseconds to back off after a failed climate read.
    pub sensor_backoff_ms: u64,
    /// Light history window size.
    pub history_size: usize,
    /// Whether payloads carry the stats block.
    pub stats: bool,
    /// Trailing window for the stats moving average.
    pub moving_average_window: usize,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            city: "Nairobi".to_string(),
            tick_interval_ms: 1200,
            sensor_backoff_ms: 1000,
            history_size: 60,
            stats: true,
            moving_average_window: 10,
        }
    }
}

impl StationConfig {
    /// Validate sampling settings.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.city.is_empty() {
            errors.push(ValidationError {
                field: "station.city".to_string(),
                message: "city cannot be empty".to_string(),
            });
        }

        if self.tick_interval_ms < MIN_TICK_INTERVAL_MS {
            errors.push(ValidationError {
                field: "station.tick_interval_ms".to_string(),
                message: format!(
                    "tick interval {} is too short (minimum {} ms)",
                    self.tick_interval_ms, MIN_TICK_INTERVAL_MS
                ),
            });
        } else if self.tick_interval_ms > MAX_TICK_INTERVAL_MS {
            errors.push(ValidationError {
                field: "station.tick_interval_ms".to_string(),
                message: format!(
                    "tick interval {} is too long (maximum {} ms / 1 minute)",
                    self.tick_interval_ms, MAX_TICK_INTERVAL_MS
                ),
            });
        }

        if self.sensor_backoff_ms == 0 {
            errors.push(ValidationError {
                field: "station.sensor_backoff_ms".to_string(),
                message: "sensor backoff cannot be zero".to_string(),
            });
        }

        if self.history_size == 0 {
            errors.push(ValidationError {
                field: "station.history_size".to_string(),
                message: "history size must be at least 1".to_string(),
            });
        }

        if self.moving_average_window == 0 {
            errors.push(ValidationError {
                field: "station.moving_average_window".to_string(),
                message: "moving average window must be at least 1".to_string(),
            });
        }

        errors
    }
}

/// Trend classifier thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Newer-half average above this is bright enough for daytime.
    pub day_threshold: f32,
    /// Newer-half average below this is dark enough for nighttime.
    pub night_threshold: f32,
    /// Deltas within `±epsilon` count as no trend.
    pub trend_epsilon: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        let defaults = TrendThresholds::default();
        Self {
            day_threshold: defaults.day,
            night_threshold: defaults.night,
            trend_epsilon: defaults.epsilon,
        }
    }
}

impl ClassifierConfig {
    /// Validate classifier thresholds.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.night_threshold >= self.day_threshold {
            errors.push(ValidationError {
                field: "classifier.night_threshold".to_string(),
                message: format!(
                    "night threshold {} must be below day threshold {}",
                    self.night_threshold, self.day_threshold
                ),
            });
        }

        if self.trend_epsilon <= 0.0 {
            errors.push(ValidationError {
                field: "classifier.trend_epsilon".to_string(),
                message: "trend epsilon must be positive".to_string(),
            });
        }

        errors
    }
}

/// Remote weather settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Whether the station fetches remote weather at all.
    pub enabled: bool,
    /// Weather service API key.
    pub api_key: String,
    /// Current-weather endpoint.
    pub endpoint: String,
    /// Seconds between refresh attempts.
    pub refresh_interval_secs: u64,
    /// Hard bound on a single fetch, in seconds.
    pub fetch_timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            refresh_interval_secs: 60,
            fetch_timeout_secs: 10,
        }
    }
}

impl WeatherConfig {
    /// Validate weather settings.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !self.enabled {
            return errors;
        }

        if self.api_key.is_empty() {
            errors.push(ValidationError {
                field: "weather.api_key".to_string(),
                message: "api key is required when weather is enabled".to_string(),
            });
        }

        if self.endpoint.is_empty() {
            errors.push(ValidationError {
                field: "weather.endpoint".to_string(),
                message: "endpoint cannot be empty".to_string(),
            });
        }

        if self.refresh_interval_secs == 0 {
            errors.push(ValidationError {
                field: "weather.refresh_interval_secs".to_string(),
                message: "refresh interval cannot be zero".to_string(),
            });
        }

        if self.fetch_timeout_secs == 0 {
            errors.push(ValidationError {
                field: "weather.fetch_timeout_secs".to_string(),
                message: "fetch timeout cannot be zero".to_string(),
            });
        }

        errors
    }
}

/// Output sink selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Emit one JSON object per line on stdout.
    pub stdout: bool,
    /// Directory for dated JSONL log files, if set.
    pub jsonl_dir: Option<PathBuf>,
    /// URL to POST each payload to, if set.
    pub push_url: Option<String>,
    /// Per-request timeout for the push sink, in seconds.
    pub push_timeout_secs: u64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            stdout: true,
            jsonl_dir: None,
            push_url: None,
            push_timeout_secs: 5,
        }
    }
}

impl OutputConfig {
    /// Validate output settings.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !self.stdout && self.jsonl_dir.is_none() && self.push_url.is_none() {
            errors.push(ValidationError {
                field: "output".to_string(),
                message: "at least one output sink must be configured".to_string(),
            });
        }

        if let Some(dir) = &self.jsonl_dir
            && dir.as_os_str().is_empty()
        {
            errors.push(ValidationError {
                field: "output.jsonl_dir".to_string(),
                message: "jsonl directory cannot be empty (use null/omit instead)".to_string(),
            });
        }

        if let Some(url) = &self.push_url
            && !url.starts_with("http://")
            && !url.starts_with("https://")
        {
            errors.push(ValidationError {
                field: "output.push_url".to_string(),
                message: format!("push url '{}' must start with http:// or https://", url),
            });
        }

        if self.push_timeout_secs == 0 {
            errors.push(ValidationError {
                field: "output.push_timeout_secs".to_string(),
                message: "push timeout cannot be zero".to_string(),
            });
        }

        errors
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),
    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),
}

/// A single validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field path (e.g., `weather.api_key`).
    pub field: String,
    /// Description of the validation failure.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Default configuration file path.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("skylark")
        .join("station.toml")
}
