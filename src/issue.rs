//! Issue model shared by the validation engine and the CLI reporter.
//!
//! Issues are immutable findings collected during a single validation pass.
//! They are never raised as errors; callers inspect the full list on the
//! [`ValidationReport`] and derive the verdict from it.

use colored::Colorize;

/// Severity of a validation finding, ordered by decreasing importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Must be fixed before the configuration is usable
    Error,
    /// Should be addressed but does not invalidate the configuration
    Warning,
    /// Informational only
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "ERROR"),
            Self::Warning => write!(f, "WARNING"),
            Self::Info => write!(f, "INFO"),
        }
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Severity of the issue
    pub severity: Severity,
    /// Dotted locator of the offending field (e.g. `api.timeout`);
    /// empty for document-level issues
    pub path: String,
    /// Human-readable description of the problem
    pub message: String,
}

impl Issue {
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn info(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            path: path.into(),
            message: message.into(),
        }
    }

    /// Print the issue as one colored line: `icon SEVERITY: path: message`.
    pub fn display(&self) {
        let (icon, label) = match self.severity {
            Severity::Error => ("❌".to_string(), "ERROR".red().bold()),
            Severity::Warning => ("⚠️ ".to_string(), "WARNING".yellow().bold()),
            Severity::Info => ("ℹ️ ".to_string(), "INFO".blue().bold()),
        };

        if self.path.is_empty() {
            println!("{} {}: {}", icon, label, self.message);
        } else {
            println!("{} {}: {}: {}", icon, label, self.path.cyan(), self.message);
        }
    }
}

/// Result of validating one configuration document.
///
/// Issue order follows the engine's fixed section-processing order; within a
/// section, the order in which the rules ran.
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// All issues found, in evaluation order
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verdict: true iff no issue has Error severity. Warnings and info
    /// entries never fail a configuration.
    pub fn is_valid(&self) -> bool {
        !self
            .issues
            .iter()
            .any(|i| i.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn info_count(&self) -> usize {
        self.count(Severity::Info)
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    /// Issues of one severity, in evaluation order.
    pub fn by_severity(&self, severity: Severity) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }

    /// Print all issues grouped by severity (errors, then warnings, then
    /// info), followed by a count summary.
    pub fn display(&self) {
        for severity in [Severity::Error, Severity::Warning, Severity::Info] {
            for issue in self.by_severity(severity) {
                issue.display();
            }
        }

        println!();
        println!(
            "Summary: {} errors, {} warnings, {} info messages",
            self.error_count(),
            self.warning_count(),
            self.info_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_constructors() {
        let issue = Issue::error("api.timeout", "Must be an integer");
        assert_eq!(issue.severity, Severity::Error);
        assert_eq!(issue.path, "api.timeout");
        assert_eq!(issue.message, "Must be an integer");

        let issue = Issue::warning("", "Unknown top-level table: extra");
        assert_eq!(issue.severity, Severity::Warning);
        assert!(issue.path.is_empty());
    }

    #[test]
    fn test_empty_report_is_valid() {
        let report = ValidationReport::new();
        assert!(report.is_valid());
        assert!(report.is_empty());
    }

    #[test]
    fn test_verdict_tracks_errors_only() {
        let mut report = ValidationReport::new();
        report.issues.push(Issue::warning("ui.theme", "Unknown theme"));
        report.issues.push(Issue::info("", "note"));
        assert!(report.is_valid());

        report
            .issues
            .push(Issue::error("api.model", "Invalid model"));
        assert!(!report.is_valid());
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.info_count(), 1);
    }

    #[test]
    fn test_by_severity_preserves_order() {
        let mut report = ValidationReport::new();
        report.issues.push(Issue::error("a", "first"));
        report.issues.push(Issue::warning("b", "mid"));
        report.issues.push(Issue::error("c", "second"));

        let errors: Vec<_> = report.by_severity(Severity::Error).collect();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].path, "a");
        assert_eq!(errors[1].path, "c");
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Error.to_string(), "ERROR");
        assert_eq!(Severity::Warning.to_string(), "WARNING");
        assert_eq!(Severity::Info.to_string(), "INFO");
    }
}
