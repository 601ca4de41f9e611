//! Reusable constraint primitives applied by the section rules.
//!
//! Each check is a pure function over a borrowed [`toml::Value`] returning
//! zero or one [`Issue`]. No check performs I/O or mutates the document.

use regex::Regex;
use toml::Value;

use crate::issue::Issue;

/// Size strings: a number, optional decimal part, optional unit.
/// Syntax only; no unit-to-bytes conversion happens anywhere in the engine.
const SIZE_PATTERN: &str = r"(?i)^\d+(\.\d+)?\s*(B|KB?|MB?|GB?)?$";

/// Shell fragments that make an allowed command worth flagging. Matched as
/// plain substrings, not shell tokens, so a filename containing one of these
/// also triggers the warning.
pub const DANGEROUS_FRAGMENTS: &[&str] = &[
    "rm", "dd", "mkfs", "fdisk", "shred", "chmod", "chown", ">", ">>", "|",
];

/// Integer within inclusive bounds.
pub fn check_integer_range(path: &str, value: &Value, min: i64, max: i64) -> Option<Issue> {
    match value.as_integer() {
        None => Some(Issue::error(path, "Must be an integer")),
        Some(n) if n < min || n > max => Some(Issue::error(
            path,
            format!("Must be between {} and {}", min, max),
        )),
        Some(_) => None,
    }
}

/// Numeric (integer or float) within inclusive bounds.
pub fn check_float_range(path: &str, value: &Value, min: f64, max: f64) -> Option<Issue> {
    let n = match value {
        Value::Float(f) => *f,
        Value::Integer(i) => *i as f64,
        _ => return Some(Issue::error(path, "Must be a number")),
    };

    if n < min || n > max {
        Some(Issue::error(
            path,
            format!("Must be between {} and {}", min, max),
        ))
    } else {
        None
    }
}

/// Strictly boolean. Values that merely look boolean (0/1, "true") are
/// rejected; no coercion.
pub fn check_boolean(path: &str, value: &Value) -> Option<Issue> {
    if value.as_bool().is_some() {
        None
    } else {
        Some(Issue::error(path, "Must be true or false"))
    }
}

/// String membership in a fixed allowed set.
pub fn check_enum(path: &str, value: &Value, label: &str, allowed: &[&str]) -> Option<Issue> {
    let s = value.as_str().unwrap_or_default();
    if allowed.contains(&s) {
        None
    } else {
        Some(Issue::error(
            path,
            format!(
                "Invalid {}: {}. Valid: {}",
                label,
                render(value),
                allowed.join(", ")
            ),
        ))
    }
}

/// URL shape check: accepts anything starting with `http://` or `https://`.
/// Intentionally permissive; this is not a URI grammar.
pub fn is_valid_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Size string shape check (`10MB`, `1.5 GB`, `512`, ...).
pub fn is_valid_size(size: &str) -> bool {
    let re = Regex::new(SIZE_PATTERN).unwrap();
    re.is_match(size)
}

/// Dangerous fragments appearing as substrings of `command`, in the fixed
/// scan order. Empty when the command looks safe.
pub fn dangerous_fragments(command: &str) -> Vec<&'static str> {
    DANGEROUS_FRAGMENTS
        .iter()
        .copied()
        .filter(|fragment| command.contains(fragment))
        .collect()
}

/// Render a scalar for inclusion in a message without quoting strings.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> Value {
        Value::Integer(n)
    }

    #[test]
    fn test_integer_range_inclusive_bounds() {
        assert!(check_integer_range("t", &int(1), 1, 300).is_none());
        assert!(check_integer_range("t", &int(300), 1, 300).is_none());

        let low = check_integer_range("t", &int(0), 1, 300).unwrap();
        assert_eq!(low.message, "Must be between 1 and 300");
        let high = check_integer_range("t", &int(301), 1, 300).unwrap();
        assert_eq!(high.message, "Must be between 1 and 300");
    }

    #[test]
    fn test_integer_range_rejects_non_integers() {
        let issue = check_integer_range("t", &Value::String("30".into()), 1, 300).unwrap();
        assert_eq!(issue.message, "Must be an integer");

        // Floats are not integers, even whole ones
        let issue = check_integer_range("t", &Value::Float(30.0), 1, 300).unwrap();
        assert_eq!(issue.message, "Must be an integer");
    }

    #[test]
    fn test_float_range_accepts_integers() {
        assert!(check_float_range("t", &int(1), 0.0, 2.0).is_none());
        assert!(check_float_range("t", &Value::Float(0.7), 0.0, 2.0).is_none());
        assert!(check_float_range("t", &Value::Float(2.1), 0.0, 2.0).is_some());
        assert_eq!(
            check_float_range("t", &Value::Boolean(true), 0.0, 2.0)
                .unwrap()
                .message,
            "Must be a number"
        );
    }

    #[test]
    fn test_boolean_rejects_lookalikes() {
        assert!(check_boolean("t", &Value::Boolean(false)).is_none());
        assert_eq!(
            check_boolean("t", &int(1)).unwrap().message,
            "Must be true or false"
        );
        assert!(check_boolean("t", &Value::String("true".into())).is_some());
    }

    #[test]
    fn test_enum_membership() {
        let allowed = ["json", "pretty", "compact"];
        assert!(check_enum("t", &Value::String("json".into()), "log format", &allowed).is_none());

        let issue =
            check_enum("t", &Value::String("xml".into()), "log format", &allowed).unwrap();
        assert_eq!(
            issue.message,
            "Invalid log format: xml. Valid: json, pretty, compact"
        );
    }

    #[test]
    fn test_url_prefix_only() {
        assert!(is_valid_url("https://generativelanguage.googleapis.com"));
        assert!(is_valid_url("http://localhost:8080"));
        assert!(!is_valid_url("ftp://example.com"));
        assert!(!is_valid_url("example.com"));
        // Permissive by contract: anything after the prefix passes
        assert!(is_valid_url("http://"));
    }

    #[test]
    fn test_size_shapes() {
        for ok in ["10MB", "1GB", "512", "1.5 GB", "100kb", "2 M", "0.5B"] {
            assert!(is_valid_size(ok), "expected {ok} to be valid");
        }
        for bad in ["MB", "ten megabytes", "10TB", "-5MB", "1..5GB", ""] {
            assert!(!is_valid_size(bad), "expected {bad} to be invalid");
        }
    }

    #[test]
    fn test_dangerous_substring_scan() {
        assert_eq!(dangerous_fragments("rm -rf /tmp/x"), vec!["rm"]);
        assert!(dangerous_fragments("cat file.txt").is_empty());
        // Substring semantics: hits inside unrelated words still count
        assert_eq!(dangerous_fragments("echo chownership"), vec!["chown"]);
        assert_eq!(dangerous_fragments("ls | head"), vec!["|"]);
    }
}
