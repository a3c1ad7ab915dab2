//! TOML-based configuration persistence.
//!
//! Reads and writes [`AppConfig`] at the platform-appropriate location:
//! - Windows:  `%APPDATA%\PendantBridge\config.toml`
//! - Linux:    `~/.config/pendantbridge/config.toml`
//! - macOS:    `~/Library/Application Support/PendantBridge/config.toml`
//!
//! Every field has a serde default, so a missing or partial file works:
//! the first run uses the reference setup (COM6 at 57600 baud) without
//! any configuration step.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level application configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub serial: SerialConfig,
}

/// General bridge behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BridgeConfig {
    /// `tracing` log level used when `RUST_LOG` is not set:
    /// `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Serial port settings for the pendant link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerialConfig {
    /// Port name, e.g. `COM6` or `/dev/ttyUSB0`.
    #[serde(default = "default_port")]
    pub port: String,
    /// Baud rate; the reference pendant firmware talks at 57600.
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    /// Seconds to wait before reopening the port after a failure.
    #[serde(default = "default_reconnect_interval_secs")]
    pub reconnect_interval_secs: u64,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_port() -> String {
    #[cfg(target_os = "windows")]
    return "COM6".to_string();
    #[cfg(not(target_os = "windows"))]
    return "/dev/ttyUSB0".to_string();
}
fn default_baud_rate() -> u32 {
    57600
}
fn default_reconnect_interval_secs() -> u64 {
    5
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            baud_rate: default_baud_rate(),
            reconnect_interval_secs: default_reconnect_interval_secs(),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config
/// base directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory
/// cannot be determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads [`AppConfig`] from disk. On the first run, when no file exists
/// yet, the defaults are written out via [`save_config`] before being
/// returned, so the user always has a file to edit.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not
/// found", and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_or_init_config() -> Result<AppConfig, ConfigError> {
    let path = config_file_path()?;

    match std::fs::read_to_string(&path) {
        Ok(content) => {
            let cfg: AppConfig = toml::from_str(&content)?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let cfg = AppConfig::default();
            save_config(&cfg)?;
            Ok(cfg)
        }
        Err(e) => Err(ConfigError::Io { path, source: e }),
    }
}

/// Persists `config` to disk, creating the directory if needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    let path = config_file_path()?;

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(&path, content).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(())
}

/// Resolves the platform config base directory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("PendantBridge"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("pendantbridge"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("PendantBridge")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_reference_setup() {
        // Arrange / Act
        let cfg = AppConfig::default();

        // Assert
        assert_eq!(cfg.serial.baud_rate, 57600);
        assert_eq!(cfg.serial.reconnect_interval_secs, 5);
        assert_eq!(cfg.bridge.log_level, "info");
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        // Arrange
        let mut cfg = AppConfig::default();
        cfg.serial.port = "COM3".to_string();
        cfg.serial.baud_rate = 115200;
        cfg.bridge.log_level = "debug".to_string();

        // Act
        let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
        let restored: AppConfig = toml::from_str(&toml_str).expect("deserialize");

        // Assert
        assert_eq!(cfg, restored);
    }

    #[test]
    fn test_empty_toml_deserializes_to_defaults() {
        let cfg: AppConfig = toml::from_str("").expect("deserialize empty");
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_unspecified_defaults() {
        // Arrange
        let toml_str = r#"
[serial]
baud_rate = 115200
"#;

        // Act
        let cfg: AppConfig = toml::from_str(toml_str).expect("deserialize partial");

        // Assert – the override applies, everything else keeps its default
        assert_eq!(cfg.serial.baud_rate, 115200);
        assert_eq!(cfg.serial.reconnect_interval_secs, 5);
        assert_eq!(cfg.bridge.log_level, "info");
    }

    #[test]
    fn test_invalid_toml_returns_parse_error() {
        let result: Result<AppConfig, toml::de::Error> = toml::from_str("[[[ not valid");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_file_path_ends_with_config_toml() {
        if let Ok(path) = config_file_path() {
            assert!(path.ends_with("config.toml"));
        }
        // NoPlatformConfigDir in a stripped CI environment is acceptable.
    }

    #[cfg(any(target_os = "windows", target_os = "linux", target_os = "macos"))]
    mod on_disk {
        use super::*;
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Mutex;

        #[cfg(target_os = "windows")]
        const CONFIG_ENV: &str = "APPDATA";
        #[cfg(target_os = "linux")]
        const CONFIG_ENV: &str = "XDG_CONFIG_HOME";
        #[cfg(target_os = "macos")]
        const CONFIG_ENV: &str = "HOME";

        static ENV_LOCK: Mutex<()> = Mutex::new(());
        static DIR_SEQ: AtomicUsize = AtomicUsize::new(0);

        /// Points the platform config env var at a fresh temp directory
        /// for the duration of `test`. Serialized on a lock: the env var
        /// is process-global state shared by parallel tests.
        fn with_temp_config_dir(test: impl FnOnce()) {
            let _guard = ENV_LOCK.lock().unwrap();
            let dir = std::env::temp_dir().join(format!(
                "pendant-bridge-config-{}-{}",
                std::process::id(),
                DIR_SEQ.fetch_add(1, Ordering::Relaxed),
            ));
            std::fs::create_dir_all(&dir).expect("create temp config dir");
            let previous = std::env::var_os(CONFIG_ENV);
            std::env::set_var(CONFIG_ENV, &dir);

            test();

            match previous {
                Some(value) => std::env::set_var(CONFIG_ENV, value),
                None => std::env::remove_var(CONFIG_ENV),
            }
            let _ = std::fs::remove_dir_all(&dir);
        }

        #[test]
        fn test_first_load_writes_the_default_file() {
            with_temp_config_dir(|| {
                // Act
                let cfg = load_or_init_config().expect("first load");

                // Assert – defaults returned, and now on disk for the
                // user to edit.
                assert_eq!(cfg, AppConfig::default());
                let on_disk = std::fs::read_to_string(config_file_path().unwrap())
                    .expect("config file written on first load");
                assert!(on_disk.contains("baud_rate"));
            });
        }

        #[test]
        fn test_save_then_load_round_trips_on_disk() {
            with_temp_config_dir(|| {
                // Arrange
                let mut cfg = AppConfig::default();
                cfg.serial.port = "COM9".to_string();
                cfg.serial.baud_rate = 115200;
                cfg.bridge.log_level = "debug".to_string();

                // Act
                save_config(&cfg).expect("save");
                let restored = load_or_init_config().expect("load");

                // Assert
                assert_eq!(restored, cfg);
            });
        }
    }
}
