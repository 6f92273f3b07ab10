//! Preset and color tables.
//!
//! A preset is a short message prefix selected by index. A template holds
//! at most one slot, [`SLOT_MARKER`], filled at format time with a value
//! supplied by the caller.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TraceError;

/// Substitution slot inside a preset template.
pub const SLOT_MARKER: &str = "%e";

/// Templates in index order.
const TEMPLATES: [&str; 7] = [
    "-------------",
    "INVOKED",
    "ADDED",
    "REMOVED",
    "CHANGED",
    "VARIABLE%e: ",
    "SET VAR%e: ",
];

/// Message-prefix template, indexed by its position in the preset table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// `-------------`
    Separator = 0,
    /// `INVOKED`
    Invoked = 1,
    /// `ADDED`
    Added = 2,
    /// `REMOVED`
    Removed = 3,
    /// `CHANGED`
    Changed = 4,
    /// `VARIABLE<slot>: `
    Variable = 5,
    /// `SET VAR<slot>: `
    SetVar = 6,
}

impl Preset {
    /// Every preset in table order.
    pub const ALL: [Preset; 7] = [
        Preset::Separator,
        Preset::Invoked,
        Preset::Added,
        Preset::Removed,
        Preset::Changed,
        Preset::Variable,
        Preset::SetVar,
    ];

    /// Looks up a preset by table index.
    ///
    /// An index outside the table is "no preset", not an error.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position of this preset in the table.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Raw template, slot marker included.
    #[must_use]
    pub fn template(self) -> &'static str {
        TEMPLATES[self.index()]
    }

    /// Whether the template carries a substitution slot.
    #[must_use]
    pub fn has_slot(self) -> bool {
        self.template().contains(SLOT_MARKER)
    }

    /// Renders the template with its slot filled.
    ///
    /// A non-empty value is inserted after a single space, an empty one
    /// removes the marker: `VARIABLE%e: ` becomes `VARIABLE count: ` or
    /// `VARIABLE: `.
    #[must_use]
    pub fn render(self, value: &str) -> String {
        let filler = if value.is_empty() {
            String::new()
        } else {
            format!(" {value}")
        };
        self.template().replacen(SLOT_MARKER, &filler, 1)
    }

    /// Snake-case name, as used in configuration files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Preset::Separator => "separator",
            Preset::Invoked => "invoked",
            Preset::Added => "added",
            Preset::Removed => "removed",
            Preset::Changed => "changed",
            Preset::Variable => "variable",
            Preset::SetVar => "set_var",
        }
    }
}

impl TryFrom<usize> for Preset {
    type Error = TraceError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::from_index(index).ok_or(TraceError::UnknownPreset(index))
    }
}

/// Looks up a raw template by table index.
#[must_use]
pub fn preset_template(index: usize) -> Option<&'static str> {
    TEMPLATES.get(index).copied()
}

/// Terminal colors, a fixed closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Reset,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    /// Every color in table order.
    pub const ALL: [Color; 9] = [
        Color::Reset,
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
    ];

    /// ANSI escape sequence for this color.
    #[must_use]
    pub fn escape(self) -> &'static str {
        match self {
            Color::Reset => "\x1b[0m",
            Color::Black => "\x1b[30m",
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Yellow => "\x1b[33m",
            Color::Blue => "\x1b[34m",
            Color::Magenta => "\x1b[35m",
            Color::Cyan => "\x1b[36m",
            Color::White => "\x1b[37m",
        }
    }

    /// Lowercase name of the color.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Color::Reset => "reset",
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
            Color::White => "white",
        }
    }

    /// Looks up a color by name, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Wraps `text` in this color and a trailing reset.
    #[must_use]
    pub fn paint(self, text: &str) -> String {
        format!("{}{}{}", self.escape(), text, Color::Reset.escape())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| TraceError::UnknownColor(s.to_string()))
    }
}
