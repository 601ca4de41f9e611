//! Validation engine: structural scan, section dispatch, cross-validation.
//!
//! The engine owns no state beyond a borrowed [`Registry`] and performs no
//! I/O during document validation, so it can be shared freely across
//! threads. Findings are collected wide: no per-field issue ever stops a
//! sibling check from running. Only an unreadable or unparsable source
//! short-circuits, as a single document-level error.

use std::path::Path;

use toml::Value;

use crate::issue::{Issue, ValidationReport};
use crate::rules::Registry;

pub struct Validator<'a> {
    registry: &'a Registry,
}

impl<'a> Validator<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Validate a configuration file on disk. A missing or unreadable file
    /// yields a single document-level error; no partial validation runs.
    pub fn validate_file(&self, path: &Path) -> ValidationReport {
        if !path.exists() {
            return Self::fatal(format!(
                "Configuration file not found: {}",
                path.display()
            ));
        }

        match std::fs::read_to_string(path) {
            Ok(content) => self.validate_str(&content),
            Err(e) => Self::fatal(format!("Error reading file: {}", e)),
        }
    }

    /// Validate configuration text. A TOML syntax error yields a single
    /// document-level error.
    pub fn validate_str(&self, content: &str) -> ValidationReport {
        match content.parse::<Value>() {
            Ok(document) => self.validate_document(&document),
            Err(e) => Self::fatal(format!("Invalid TOML syntax: {}", e)),
        }
    }

    /// Validate an already-parsed document. The document is never mutated.
    pub fn validate_document(&self, document: &Value) -> ValidationReport {
        let mut report = ValidationReport::new();

        let Some(root) = document.as_table() else {
            report
                .issues
                .push(Issue::error("", "Configuration root must be a table"));
            return report;
        };

        // Structural scan: unknown top-level tables warn, nothing more
        for key in root.keys() {
            if !self.registry.contains(key) {
                report.issues.push(Issue::warning(
                    key.clone(),
                    format!("Unknown top-level table: {}", key),
                ));
            }
        }

        // Dispatch recognized sections in registry order, not input order
        for (name, rule) in self.registry.sections() {
            if let Some(section) = root.get(name) {
                match section.as_table() {
                    Some(table) => rule(table, &mut report.issues),
                    None => report.issues.push(Issue::error(name, "Must be a table")),
                }
            }
        }

        cross_validate(root, &mut report.issues);

        report
    }

    fn fatal(message: String) -> ValidationReport {
        let mut report = ValidationReport::new();
        report.issues.push(Issue::error("", message));
        report
    }
}

/// Consistency checks spanning more than one field. These are soft rules:
/// violations warn but never invalidate the configuration.
fn cross_validate(root: &toml::Table, issues: &mut Vec<Issue>) {
    if flag_is_set(root, "logging", "log_requests") && !field_present(root, "logging", "file") {
        issues.push(Issue::warning(
            "logging",
            "log_requests is true but no log file specified",
        ));
    }

    if flag_is_set(root, "session", "auto_save") && !field_present(root, "session", "default_dir") {
        issues.push(Issue::warning(
            "session",
            "auto_save is true but no default_dir specified",
        ));
    }
}

fn flag_is_set(root: &toml::Table, section: &str, field: &str) -> bool {
    root.get(section)
        .and_then(Value::as_table)
        .and_then(|t| t.get(field))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

fn field_present(root: &toml::Table, section: &str, field: &str) -> bool {
    root.get(section)
        .and_then(Value::as_table)
        .is_some_and(|t| t.contains_key(field))
}
