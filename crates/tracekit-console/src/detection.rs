//! Color support detection
//!
//! Decides whether escape sequences reach the terminal or are stripped.

use serde::{Deserialize, Serialize};

/// Whether trace lines keep their color escapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Decide from the environment and the terminal
    #[default]
    Auto,
    /// Always keep escapes
    Always,
    /// Always strip escapes
    Never,
}

impl ColorChoice {
    /// Resolve to a yes/no answer
    #[must_use]
    pub fn resolve(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => should_enable_color(),
        }
    }
}

/// Determine if color escapes should be kept
#[must_use]
pub fn should_enable_color() -> bool {
    color_with(
        |key| std::env::var(key).ok(),
        || console::Term::stdout().is_term(),
    )
}

fn plain_context_with(var: impl Fn(&str) -> Option<String>) -> bool {
    var("NO_COLOR").is_some() || var("TRACEKIT_PLAIN").is_some() || var("CI").is_some()
}

fn color_with(var: impl Fn(&str) -> Option<String>, is_term: impl Fn() -> bool) -> bool {
    // Explicit enable always wins
    if var("TRACEKIT_FORCE_COLOR").is_some() {
        return true;
    }

    if plain_context_with(&var) {
        return false;
    }

    is_term()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_force_color_wins() {
        assert!(color_with(env(&[("TRACEKIT_FORCE_COLOR", "1"), ("NO_COLOR", "1")]), || false));
    }

    #[test]
    fn test_no_color_disables() {
        assert!(!color_with(env(&[("NO_COLOR", "")]), || true));
        assert!(!color_with(env(&[("TRACEKIT_PLAIN", "1")]), || true));
        assert!(!color_with(env(&[("CI", "true")]), || true));
    }

    #[test]
    fn test_terminal_decides_otherwise() {
        assert!(color_with(env(&[]), || true));
        assert!(!color_with(env(&[]), || false));
    }

    #[test]
    fn test_choice_resolve() {
        assert!(ColorChoice::Always.resolve());
        assert!(!ColorChoice::Never.resolve());
    }

    #[test]
    fn test_choice_default_is_auto() {
        assert_eq!(ColorChoice::default(), ColorChoice::Auto);
    }
}
