//! The log request model.
//!
//! A call to the logger carries two things: a [`LogRequest`] saying *where*
//! the line goes and how it is decorated, and a [`Payload`] saying what is
//! printed. Requests come in three shapes, mirroring how callers build them:
//!
//! | shape | constructor | method | preset | color |
//! |-------|-------------|--------|--------|-------|
//! | console method | `LogRequest::from(ConsoleMethod::Warn)` | given | - | - |
//! | preset | `LogRequest::from(Preset::Invoked)` | `log` | given | - |
//! | spec | `LogRequest::try_from(LogSpec { .. })` | given or `log` | optional | optional |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TraceError, TraceResult};
use crate::presets::{Color, Preset};

/// Console operation a line is written with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleMethod {
    /// Plain output on stdout.
    #[default]
    Log,
    /// Informational output on stdout.
    Info,
    /// Warning on stderr.
    Warn,
    /// Error on stderr.
    Error,
    /// Debug output on stdout.
    Debug,
}

impl ConsoleMethod {
    /// Every method, in declaration order.
    pub const ALL: [ConsoleMethod; 5] = [
        ConsoleMethod::Log,
        ConsoleMethod::Info,
        ConsoleMethod::Warn,
        ConsoleMethod::Error,
        ConsoleMethod::Debug,
    ];

    /// Lowercase method name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ConsoleMethod::Log => "log",
            ConsoleMethod::Info => "info",
            ConsoleMethod::Warn => "warn",
            ConsoleMethod::Error => "error",
            ConsoleMethod::Debug => "debug",
        }
    }

    /// Whether lines for this method belong on stderr.
    #[must_use]
    pub fn is_stderr(self) -> bool {
        matches!(self, ConsoleMethod::Warn | ConsoleMethod::Error)
    }
}

impl fmt::Display for ConsoleMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConsoleMethod {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|method| method.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| TraceError::UnsupportedSink(s.to_string()))
    }
}

/// Where a line goes and how it is decorated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogRequest {
    /// Console method the composed line is written with.
    pub method: ConsoleMethod,
    /// Template inserted in front of the printed arguments.
    pub preset: Option<Preset>,
    /// Color escape wrapped around the printed arguments.
    pub color: Option<Color>,
}

impl LogRequest {
    /// A plain `log` request with no preset and no color.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a request from a console method name.
    pub fn parse_method(name: &str) -> TraceResult<Self> {
        Ok(Self::from(name.parse::<ConsoleMethod>()?))
    }

    /// Builds a request from a preset index.
    pub fn preset_index(index: usize) -> TraceResult<Self> {
        Ok(Self::from(Preset::try_from(index)?))
    }

    /// Sets the console method.
    #[must_use]
    pub fn with_method(mut self, method: ConsoleMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the preset.
    #[must_use]
    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.preset = Some(preset);
        self
    }

    /// Sets the color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

impl From<ConsoleMethod> for LogRequest {
    fn from(method: ConsoleMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }
}

impl From<Preset> for LogRequest {
    fn from(preset: Preset) -> Self {
        Self {
            preset: Some(preset),
            ..Self::default()
        }
    }
}

/// Loosely-typed request, as written in configuration or on a command line.
///
/// Every field is optional; omitted fields take the [`LogRequest`] defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSpec {
    /// Console method name (`log`, `info`, `warn`, `error`, `debug`).
    pub method: Option<String>,
    /// Preset table index.
    pub preset: Option<usize>,
    /// Color name.
    pub color: Option<String>,
}

impl TryFrom<LogSpec> for LogRequest {
    type Error = TraceError;

    /// Validates every field eagerly: an unknown method, preset index or
    /// color name is rejected rather than printed as a garbled line.
    fn try_from(spec: LogSpec) -> Result<Self, Self::Error> {
        let method = match spec.method.as_deref() {
            Some(name) => name.parse::<ConsoleMethod>()?,
            None => ConsoleMethod::Log,
        };
        let preset = spec.preset.map(Preset::try_from).transpose()?;
        let color = spec.color.as_deref().map(str::parse::<Color>).transpose()?;
        Ok(Self {
            method,
            preset,
            color,
        })
    }
}

/// What a log call prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Arguments printed as given; a preset slot is filled with `""`.
    Args(Vec<String>),
    /// Arguments plus the value substituted into the preset slot.
    Slot {
        /// Slot substitution value.
        value: String,
        /// Arguments printed after the preset.
        args: Vec<String>,
    },
}

impl Payload {
    /// Plain arguments, each rendered with `Display`.
    pub fn args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: fmt::Display,
    {
        Payload::Args(args.into_iter().map(|a| a.to_string()).collect())
    }

    /// Arguments plus a slot value.
    pub fn slot<I, T>(value: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: fmt::Display,
    {
        Payload::Slot {
            value: value.into(),
            args: args.into_iter().map(|a| a.to_string()).collect(),
        }
    }

    /// An empty payload.
    #[must_use]
    pub fn empty() -> Self {
        Payload::Args(Vec::new())
    }

    /// Splits into (printed arguments, slot value).
    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, String) {
        match self {
            Payload::Args(args) => (args, String::new()),
            Payload::Slot { value, args } => (args, value),
        }
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&str> for Payload {
    fn from(arg: &str) -> Self {
        Payload::Args(vec![arg.to_string()])
    }
}

impl From<String> for Payload {
    fn from(arg: String) -> Self {
        Payload::Args(vec![arg])
    }
}

impl From<Vec<String>> for Payload {
    fn from(args: Vec<String>) -> Self {
        Payload::Args(args)
    }
}

impl From<&[&str]> for Payload {
    fn from(args: &[&str]) -> Self {
        Payload::args(args)
    }
}

impl<const N: usize> From<[&str; N]> for Payload {
    fn from(args: [&str; N]) -> Self {
        Payload::args(args)
    }
}

impl From<()> for Payload {
    fn from((): ()) -> Self {
        Payload::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse() {
        assert_eq!("warn".parse::<ConsoleMethod>().unwrap(), ConsoleMethod::Warn);
        assert_eq!(" Error ".parse::<ConsoleMethod>().unwrap(), ConsoleMethod::Error);
        assert!(matches!(
            "table".parse::<ConsoleMethod>(),
            Err(TraceError::UnsupportedSink(name)) if name == "table"
        ));
    }

    #[test]
    fn test_method_streams() {
        assert!(!ConsoleMethod::Log.is_stderr());
        assert!(!ConsoleMethod::Info.is_stderr());
        assert!(!ConsoleMethod::Debug.is_stderr());
        assert!(ConsoleMethod::Warn.is_stderr());
        assert!(ConsoleMethod::Error.is_stderr());
    }

    #[test]
    fn test_string_shape() {
        let request = LogRequest::parse_method("error").unwrap();
        assert_eq!(request.method, ConsoleMethod::Error);
        assert_eq!(request.preset, None);
        assert_eq!(request.color, None);
    }

    #[test]
    fn test_number_shape_defaults_to_log() {
        let request = LogRequest::preset_index(1).unwrap();
        assert_eq!(request.method, ConsoleMethod::Log);
        assert_eq!(request.preset, Some(Preset::Invoked));
        assert!(LogRequest::preset_index(99).is_err());
    }

    #[test]
    fn test_spec_shape_defaults() {
        let request = LogRequest::try_from(LogSpec::default()).unwrap();
        assert_eq!(request, LogRequest::new());

        let request = LogRequest::try_from(LogSpec {
            color: Some("green".into()),
            ..LogSpec::default()
        })
        .unwrap();
        assert_eq!(request.method, ConsoleMethod::Log);
        assert_eq!(request.color, Some(Color::Green));
    }

    #[test]
    fn test_spec_shape_rejects_unknown_values() {
        let unknown_color = LogSpec {
            color: Some("teal".into()),
            ..LogSpec::default()
        };
        assert!(matches!(
            LogRequest::try_from(unknown_color),
            Err(TraceError::UnknownColor(_))
        ));

        let unknown_preset = LogSpec {
            preset: Some(7),
            ..LogSpec::default()
        };
        assert!(matches!(
            LogRequest::try_from(unknown_preset),
            Err(TraceError::UnknownPreset(7))
        ));

        let unknown_method = LogSpec {
            method: Some("dir".into()),
            ..LogSpec::default()
        };
        assert!(matches!(
            LogRequest::try_from(unknown_method),
            Err(TraceError::UnsupportedSink(_))
        ));
    }

    #[test]
    fn test_spec_deserializes_partial() {
        let spec: LogSpec = serde_json::from_str(r#"{"preset": 5}"#).unwrap();
        assert_eq!(spec.preset, Some(5));
        assert_eq!(spec.method, None);
    }

    #[test]
    fn test_payload_parts() {
        let (args, value) = Payload::slot("count", ["42"]).into_parts();
        assert_eq!(args, vec!["42".to_string()]);
        assert_eq!(value, "count");

        let (args, value) = Payload::args([1, 2]).into_parts();
        assert_eq!(args, vec!["1".to_string(), "2".to_string()]);
        assert_eq!(value, "");
    }

    #[test]
    fn test_payload_conversions() {
        assert_eq!(Payload::from("disk full"), Payload::Args(vec!["disk full".into()]));
        assert_eq!(Payload::from(()), Payload::empty());
        assert_eq!(Payload::from(["a", "b"]), Payload::args(["a", "b"]));
    }
}
