//! Value rendering for trace lines.

use std::fmt::Debug;

use serde::Serialize;

/// Placeholder printed in place of a redacted value.
pub const REDACTED: &str = "<redacted>";

/// Renders a value as JSON, the way property values are shown.
#[must_use]
pub fn json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("<unserializable: {e}>"))
}

/// Renders an argument list as `[a, b, c]` using `Debug`.
///
/// `redacted(i)` decides, per position, whether the value is hidden.
pub fn arg_list(args: &[&dyn Debug], redacted: impl Fn(usize) -> bool) -> String {
    let rendered: Vec<String> = args
        .iter()
        .enumerate()
        .map(|(i, arg)| {
            if redacted(i) {
                REDACTED.to_string()
            } else {
                format!("{arg:?}")
            }
        })
        .collect();
    format!("[{}]", rendered.join(", "))
}

/// Strips the module path from a type name, keeping generic arguments.
///
/// `bank::model::Account<alloc::string::String>` becomes `Account<String>`.
#[must_use]
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    for ch in full.chars() {
        match ch {
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | '&' | ';' => {
                out.push_str(last_path_segment(&segment));
                segment.clear();
                out.push(ch);
            }
            _ => segment.push(ch),
        }
    }
    out.push_str(last_path_segment(&segment));
    out
}

fn last_path_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn test_json_rendering() {
        assert_eq!(json(&42), "42");
        assert_eq!(json("hi"), "\"hi\"");
        assert_eq!(json(&Point { x: 1, y: 2 }), r#"{"x":1,"y":2}"#);
        assert_eq!(json(&Option::<u8>::None), "null");
    }

    #[test]
    fn test_arg_list() {
        let a = 5;
        let b = "x";
        assert_eq!(arg_list(&[&a, &b], |_| false), r#"[5, "x"]"#);
        assert_eq!(arg_list(&[&a, &b], |i| i == 1), "[5, <redacted>]");
        assert_eq!(arg_list(&[], |_| false), "[]");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("bank::Account"), "Account");
        assert_eq!(short_type_name("u32"), "u32");
        assert_eq!(
            short_type_name("core::option::Option<alloc::string::String>"),
            "Option<String>"
        );
        assert_eq!(
            short_type_name("std::collections::HashMap<u8, alloc::vec::Vec<i32>>"),
            "HashMap<u8, Vec<i32>>"
        );
        assert_eq!(short_type_name("&str"), "&str");
        assert_eq!(short_type_name("(i32, bank::Id)"), "(i32, Id)");
    }
}
