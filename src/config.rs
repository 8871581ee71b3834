use config::{Config as ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for the reference scan.
///
/// The configuration can be loaded from multiple locations in order of
/// precedence:
/// 1. Custom config file passed to `load_from`
/// 2. Local `.refscout.yaml` in the current directory
/// 3. Global `$HOME/.config/refscout/config.yaml`
///
/// Every field has a default, so embedding applications that never ship a
/// config file can simply use `ScanOptions::default()`.
///
/// # Configuration Format
///
/// ```yaml
/// # Worker threads for the group fan-out (default: CPU cores)
/// thread_count: 4
///
/// # Pause before each file read, in milliseconds (0 disables)
/// read_throttle_ms: 1
///
/// # Log level suggested to the embedding application (trace..error)
/// log_level: "warn"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOptions {
    /// Number of threads used to scan base-name groups in parallel
    /// Defaults to number of CPU cores if not specified
    #[serde(default = "default_thread_count")]
    pub thread_count: NonZeroUsize,

    /// Milliseconds slept before each file read, throttling disk I/O while
    /// a large tree is scanned in the background. Zero disables the pause.
    #[serde(default = "default_read_throttle_ms")]
    pub read_throttle_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

fn default_read_throttle_ms() -> u64 {
    1
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            thread_count: default_thread_count(),
            read_throttle_ms: default_read_throttle_ms(),
            log_level: default_log_level(),
        }
    }
}

impl ScanOptions {
    /// Loads configuration from the default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration from a specific file, falling back to the
    /// default locations for anything it does not override
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        let config_files = [
            // Global config
            dirs::config_dir().map(|p| p.join("refscout/config.yaml")),
            // Local config
            Some(PathBuf::from(".refscout.yaml")),
            // Custom config
            config_path.map(PathBuf::from),
        ];

        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        builder.build()?.try_deserialize()
    }

    /// The pre-read pause as a `Duration`
    pub fn read_throttle(&self) -> Duration {
        Duration::from_millis(self.read_throttle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_values() {
        let options = ScanOptions::default();
        assert_eq!(options.thread_count.get(), num_cpus::get());
        assert_eq!(options.read_throttle_ms, 1);
        assert_eq!(options.log_level, "warn");
        assert_eq!(options.read_throttle(), Duration::from_millis(1));
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let config_content = r#"
            thread_count: 2
            read_throttle_ms: 0
            log_level: "debug"
        "#;

        let mut file = File::create(&config_path).unwrap();
        file.write_all(config_content.as_bytes()).unwrap();

        let options = ScanOptions::load_from(Some(&config_path)).unwrap();
        assert_eq!(options.thread_count, NonZeroUsize::new(2).unwrap());
        assert_eq!(options.read_throttle_ms, 0);
        assert_eq!(options.log_level, "debug");
        assert!(options.read_throttle().is_zero());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let mut file = File::create(&config_path).unwrap();
        file.write_all(b"read_throttle_ms: 25\n").unwrap();

        let options = ScanOptions::load_from(Some(&config_path)).unwrap();
        assert_eq!(options.read_throttle_ms, 25);
        assert_eq!(options.thread_count.get(), num_cpus::get());
        assert_eq!(options.log_level, "warn");
    }

    #[test]
    fn test_invalid_config() {
        let config_content = r#"
            thread_count: "invalid"  # Should be number
            read_throttle_ms: []     # Should be number
        "#;

        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let mut file = File::create(&config_path).unwrap();
        file.write_all(config_content.as_bytes()).unwrap();

        let result = ScanOptions::load_from(Some(&config_path));
        assert!(result.is_err(), "Expected error loading invalid config");
    }

    #[test]
    fn test_zero_thread_count_rejected() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let mut file = File::create(&config_path).unwrap();
        file.write_all(b"thread_count: 0\n").unwrap();

        let result = ScanOptions::load_from(Some(&config_path));
        assert!(result.is_err(), "Zero threads must not deserialize");
    }
}
