//! Configuration loader for the `agrismart-dashboard` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). Every variable is optional.
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{anyhow, Result};

/// Longest rolling window accepted, one year of hourly samples.
pub const MAX_SENSOR_WINDOW_HOURS: u32 = 24 * 365;

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_u32 {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<u32>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Read an optional string environment variable with a default value.
macro_rules! env_or {
    ($var_name:expr, $default:expr) => {
        env::var($var_name).unwrap_or_else(|_| $default.to_string())
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Interface the HTTP server binds to.
    pub host: String,

    /// Port the HTTP server listens on.
    pub port: u16,

    /// Milliseconds between synthetic sensor samples.
    pub tick_interval_ms: u32,

    /// Hours covered by the rolling sensor window (window holds hours + 1 samples).
    pub sensor_window_hours: u32,

    /// Rows per page of the history table.
    pub history_page_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            tick_interval_ms: 5000,
            sensor_window_hours: 24,
            history_page_size: 10,
        }
    }
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `DASHBOARD_HOST` – bind interface (default: 0.0.0.0)
/// - `DASHBOARD_PORT` – listen port (default: 8080)
/// - `TICK_INTERVAL_MS` – sensor tick period (default: 5000)
/// - `SENSOR_WINDOW_HOURS` – rolling window span (default: 24)
/// - `HISTORY_PAGE_SIZE` – history rows per page (default: 10)
///
/// Returns an error if any variable is present but invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let defaults = Config::default();

    let host = env_or!("DASHBOARD_HOST", defaults.host);
    let port = parse_env_u32!("DASHBOARD_PORT", u32::from(defaults.port));
    let port = u16::try_from(port).map_err(|_| anyhow!("Invalid DASHBOARD_PORT: {} is out of range", port))?;
    let tick_interval_ms = parse_env_u32!("TICK_INTERVAL_MS", defaults.tick_interval_ms);
    let sensor_window_hours = parse_env_u32!("SENSOR_WINDOW_HOURS", defaults.sensor_window_hours);
    let history_page_size = parse_env_u32!("HISTORY_PAGE_SIZE", defaults.history_page_size);

    let cfg = Config {
        host,
        port,
        tick_interval_ms,
        sensor_window_hours,
        history_page_size,
    };
    cfg.validate()?;
    Ok(cfg)
}

impl Config {
    /// Reject values that parse but cannot drive the service.
    pub fn validate(&self) -> Result<()> {
        // ---
        if self.tick_interval_ms == 0 {
            return Err(anyhow!("Invalid TICK_INTERVAL_MS: must be greater than zero"));
        }
        if self.history_page_size == 0 {
            return Err(anyhow!("Invalid HISTORY_PAGE_SIZE: must be greater than zero"));
        }
        if self.sensor_window_hours > MAX_SENSOR_WINDOW_HOURS {
            return Err(anyhow!(
                "Invalid SENSOR_WINDOW_HOURS: {} exceeds {}",
                self.sensor_window_hours,
                MAX_SENSOR_WINDOW_HOURS
            ));
        }
        Ok(())
    }

    /// Socket address built from `host` and `port`.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        // ---
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow!("Invalid DASHBOARD_HOST '{}': {}", self.host, e))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.tick_interval_ms))
    }

    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  DASHBOARD_HOST      : {}", self.host);
        tracing::info!("  DASHBOARD_PORT      : {}", self.port);
        tracing::info!("  TICK_INTERVAL_MS    : {}", self.tick_interval_ms);
        tracing::info!("  SENSOR_WINDOW_HOURS : {}", self.sensor_window_hours);
        tracing::info!("  HISTORY_PAGE_SIZE   : {}", self.history_page_size);
    }
}
