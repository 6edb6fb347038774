//! Configuration module for loading environment variables and settings.

use crate::error::ConfigError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the ffmpeg binary
    pub ffmpeg_path: String,
    /// Path to the ffprobe binary
    pub ffprobe_path: String,
    /// HTTP server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables and .env file.
    ///
    /// `FFMPEG_PATH` and `FFPROBE_PATH` default to the bare binary names
    /// resolved through `PATH`; `PORT` defaults to 8080.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` if PORT is set but not a valid
    /// port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let ffmpeg_path = std::env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string());
        let ffprobe_path = std::env::var("FFPROBE_PATH").unwrap_or_else(|_| "ffprobe".to_string());

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| {
                ConfigError::invalid_value("PORT", format!("'{}' is not a valid port number", raw))
            })?,
            Err(_) => 8080,
        };

        Ok(Self {
            ffmpeg_path,
            ffprobe_path,
            port,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            port: 8080,
        }
    }
}
