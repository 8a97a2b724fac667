use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// Fixed UTC offset used to decide what "today" is, for every user.
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
    #[serde(default = "default_geofence_radius")]
    pub geofence_radius: f64,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_utc_offset() -> String {
    "+09:00".to_string()
}
fn default_geofence_radius() -> f64 {
    crate::core::geofence::DEFAULT_RADIUS
}
fn default_busy_timeout_ms() -> u64 {
    crate::db::pool::DEFAULT_BUSY_TIMEOUT_MS
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            utc_offset: default_utc_offset(),
            geofence_radius: default_geofence_radius(),
            busy_timeout_ms: default_busy_timeout_ms(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.geoattend`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".geoattend")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("geoattend.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("geoattend.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Validate the values that are parsed lazily elsewhere.
    pub fn check(&self) -> AppResult<()> {
        crate::core::clock::parse_utc_offset(&self.utc_offset)?;

        if !self.geofence_radius.is_finite() || self.geofence_radius <= 0.0 {
            return Err(AppError::Config(format!(
                "geofence_radius must be a positive number, got {}",
                self.geofence_radius
            )));
        }
        if self.database.trim().is_empty() {
            return Err(AppError::Config("database path is empty".into()));
        }
        if tracing_subscriber::EnvFilter::try_new(&self.log_level).is_err() {
            return Err(AppError::Config(format!(
                "log_level '{}' is not a valid filter",
                self.log_level
            )));
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Create the config directory and write this configuration as the
    /// config file. Returns the path written.
    pub fn save(&self) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let path = Self::config_file();
        let mut file = fs::File::create(&path)?;
        file.write_all(self.to_yaml()?.as_bytes())?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: Config = serde_yaml::from_str("database: /tmp/x.sqlite\n").unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.utc_offset, "+09:00");
        assert_eq!(cfg.geofence_radius, 50.0);
        assert!(cfg.check().is_ok());
    }

    #[test]
    fn check_rejects_bad_offset_and_radius() {
        let mut cfg = Config {
            utc_offset: "nine".into(),
            ..Config::default()
        };
        assert!(cfg.check().is_err());

        cfg.utc_offset = "-05:00".into();
        cfg.geofence_radius = 0.0;
        assert!(matches!(cfg.check(), Err(AppError::Config(_))));
    }
}
