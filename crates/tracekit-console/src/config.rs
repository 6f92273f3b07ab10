//! Centralized configuration for tracekit output.
//!
//! `TraceConfig` is consumed by the bootstrap layer: it is built from
//! defaults, a TOML file and environment variables, then handed to
//! [`init_logger`](crate::init_logger). The logger itself never reads the
//! environment; after startup the only switch is
//! [`TraceLogger::set_debug`](crate::TraceLogger::set_debug).

use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracekit_core::logging::targets;
use tracekit_core::{Color, TraceError, TraceResult};

use crate::detection::ColorChoice;

/// Comprehensive configuration for tracekit output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceConfig {
    /// Initial state of the debug flag
    pub debug: bool,
    /// Whether color escapes are kept
    pub color: ColorChoice,
    /// Prefix every line with `[HH:MM:SS]`
    pub timestamps: bool,
    /// Default color of interceptor lines
    pub accent: Color,
    /// Most verbose level accepted by the log bridge and tracing layer
    pub level: log::LevelFilter,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            debug: false,
            color: ColorChoice::Auto,
            timestamps: false,
            accent: Color::Green,
            level: log::LevelFilter::Debug,
        }
    }
}

/// On-disk shape of the configuration; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    debug: Option<bool>,
    color: Option<ColorChoice>,
    timestamps: Option<bool>,
    accent: Option<String>,
    level: Option<String>,
}

impl TraceConfig {
    /// Create config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create config from environment variables
    ///
    /// # Environment Variables
    ///
    /// | Variable | Values | Description |
    /// |----------|--------|-------------|
    /// | `TRACEKIT_DEBUG` | 0/1 | Initial debug flag |
    /// | `TRACEKIT_FORCE_COLOR` | (set) | Keep color escapes |
    /// | `TRACEKIT_PLAIN` | (set) | Strip color escapes |
    /// | `NO_COLOR` | (set) | Strip color escapes (standard) |
    /// | `TRACEKIT_TIMESTAMPS` | 0/1 | Timestamp prefix |
    /// | `TRACEKIT_ACCENT` | color name | Interceptor color |
    /// | `TRACEKIT_LOG` | off/error/warn/info/debug/trace | Bridge level |
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().merge_env_with(|key| env::var(key).ok())
    }

    /// Overlay environment variables on this config
    #[must_use]
    pub fn merge_env(self) -> Self {
        self.merge_env_with(|key| env::var(key).ok())
    }

    /// Overlay variables read through `var` on this config
    ///
    /// Unparseable values are ignored with a warning on the
    /// `tracekit::config` target.
    #[must_use]
    pub fn merge_env_with(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = var("TRACEKIT_DEBUG") {
            match parse_flag(&value) {
                Some(flag) => self.debug = flag,
                None => log::warn!(target: targets::CONFIG, "ignoring TRACEKIT_DEBUG={value}"),
            }
        }

        // Display mode
        if var("TRACEKIT_PLAIN").is_some() || var("NO_COLOR").is_some() {
            self.color = ColorChoice::Never;
        }
        if var("TRACEKIT_FORCE_COLOR").is_some() {
            self.color = ColorChoice::Always;
        }

        if let Some(value) = var("TRACEKIT_TIMESTAMPS") {
            if let Some(flag) = parse_flag(&value) {
                self.timestamps = flag;
            }
        }

        if let Some(value) = var("TRACEKIT_ACCENT") {
            match Color::from_name(&value) {
                Some(color) => self.accent = color,
                None => log::warn!(target: targets::CONFIG, "ignoring TRACEKIT_ACCENT={value}"),
            }
        }

        if let Some(value) = var("TRACEKIT_LOG") {
            match value.parse::<log::LevelFilter>() {
                Ok(level) => self.level = level,
                Err(_) => log::warn!(target: targets::CONFIG, "ignoring TRACEKIT_LOG={value}"),
            }
        }

        self
    }

    /// Parse a TOML document, starting from defaults
    ///
    /// ```toml
    /// debug = true
    /// color = "never"
    /// timestamps = true
    /// accent = "cyan"
    /// level = "info"
    /// ```
    ///
    /// Unlike environment variables, invalid values here are errors.
    pub fn from_toml_str(text: &str) -> TraceResult<Self> {
        let file: FileConfig =
            toml::from_str(text).map_err(|e| TraceError::Config(e.to_string()))?;

        let mut config = Self::default();
        if let Some(debug) = file.debug {
            config.debug = debug;
        }
        if let Some(color) = file.color {
            config.color = color;
        }
        if let Some(timestamps) = file.timestamps {
            config.timestamps = timestamps;
        }
        if let Some(accent) = file.accent {
            config.accent = accent.parse::<Color>()?;
        }
        if let Some(level) = file.level {
            config.level = level
                .parse::<log::LevelFilter>()
                .map_err(|_| TraceError::Config(format!("invalid level: {level}")))?;
        }
        Ok(config)
    }

    /// Load a TOML file
    pub fn load(path: &Path) -> TraceResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::debug!(target: targets::CONFIG, "loaded {}", path.display());
        Ok(config)
    }

    /// Load the file at [`default_path`](Self::default_path) if it exists,
    /// defaults otherwise
    pub fn load_default() -> TraceResult<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// `<config dir>/tracekit/config.toml`
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tracekit").join("config.toml"))
    }

    // ─────────────────────────────────────────────────
    // Builder Methods
    // ─────────────────────────────────────────────────

    /// Set the initial debug flag
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the color choice
    #[must_use]
    pub fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Strip every escape
    #[must_use]
    pub fn plain_mode(mut self) -> Self {
        self.color = ColorChoice::Never;
        self
    }

    /// Toggle the timestamp prefix
    #[must_use]
    pub fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }

    /// Set the interceptor color
    #[must_use]
    pub fn with_accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }

    /// Set the bridge level
    #[must_use]
    pub fn with_level(mut self, level: log::LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Whether escapes are kept, resolved against the environment
    #[must_use]
    pub fn use_color(&self) -> bool {
        self.color.resolve()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = TraceConfig::new();
        assert!(!config.debug);
        assert_eq!(config.color, ColorChoice::Auto);
        assert!(!config.timestamps);
        assert_eq!(config.accent, Color::Green);
        assert_eq!(config.level, log::LevelFilter::Debug);
    }

    #[test]
    fn test_builder_pattern() {
        let config = TraceConfig::new()
            .with_debug(true)
            .with_timestamps(true)
            .with_accent(Color::Magenta)
            .with_level(log::LevelFilter::Warn)
            .plain_mode();

        assert!(config.debug);
        assert!(config.timestamps);
        assert_eq!(config.accent, Color::Magenta);
        assert_eq!(config.level, log::LevelFilter::Warn);
        assert!(!config.use_color());
    }

    #[test]
    fn test_env_overlay() {
        let config = TraceConfig::new().merge_env_with(env(&[
            ("TRACEKIT_DEBUG", "1"),
            ("NO_COLOR", ""),
            ("TRACEKIT_TIMESTAMPS", "true"),
            ("TRACEKIT_ACCENT", "cyan"),
            ("TRACEKIT_LOG", "info"),
        ]));
        assert!(config.debug);
        assert_eq!(config.color, ColorChoice::Never);
        assert!(config.timestamps);
        assert_eq!(config.accent, Color::Cyan);
        assert_eq!(config.level, log::LevelFilter::Info);
    }

    #[test]
    fn test_env_force_color_beats_plain() {
        let config = TraceConfig::new()
            .merge_env_with(env(&[("NO_COLOR", "1"), ("TRACEKIT_FORCE_COLOR", "1")]));
        assert_eq!(config.color, ColorChoice::Always);
    }

    #[test]
    fn test_env_invalid_values_ignored() {
        let config = TraceConfig::new().merge_env_with(env(&[
            ("TRACEKIT_DEBUG", "maybe"),
            ("TRACEKIT_ACCENT", "teal"),
            ("TRACEKIT_LOG", "loud"),
        ]));
        assert_eq!(config, TraceConfig::default());
    }

    #[test]
    fn test_from_toml() {
        let config = TraceConfig::from_toml_str(
            r#"
            debug = true
            color = "always"
            accent = "yellow"
            level = "trace"
            "#,
        )
        .unwrap();
        assert!(config.debug);
        assert_eq!(config.color, ColorChoice::Always);
        assert_eq!(config.accent, Color::Yellow);
        assert_eq!(config.level, log::LevelFilter::Trace);
        assert!(!config.timestamps);
    }

    #[test]
    fn test_from_toml_rejects_bad_values() {
        assert!(matches!(
            TraceConfig::from_toml_str("accent = \"teal\""),
            Err(TraceError::UnknownColor(_))
        ));
        assert!(matches!(
            TraceConfig::from_toml_str("level = \"loud\""),
            Err(TraceError::Config(_))
        ));
        assert!(matches!(
            TraceConfig::from_toml_str("port = 3000"),
            Err(TraceError::Config(_))
        ));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "debug = true\ntimestamps = true").unwrap();
        let config = TraceConfig::load(file.path()).unwrap();
        assert!(config.debug);
        assert!(config.timestamps);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TraceConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, TraceError::Io(_)));
    }

    #[test]
    fn test_default_path_layout() {
        if let Some(path) = TraceConfig::default_path() {
            assert!(path.ends_with("tracekit/config.toml"));
        }
    }
}
