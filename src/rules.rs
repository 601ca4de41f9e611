//! Per-section validation rules and the registry that dispatches them.
//!
//! One routine per recognized top-level table of a Gemini REPL config file.
//! Every field is optional; a routine only judges what is present. Unknown
//! fields inside a recognized section are ignored (only unknown top-level
//! tables warn, see the engine's structural scan).

use toml::{Table, Value};

use crate::checks::{
    check_boolean, check_enum, check_float_range, check_integer_range, dangerous_fragments,
    is_valid_size, is_valid_url,
};
use crate::issue::Issue;

// =========================================================================
// ENUMERATIONS AND BOUNDS
//
// Shared between the rules below and the schema dump so the two can never
// drift apart.
// =========================================================================

pub const VALID_MODELS: &[&str] = &[
    "gemini-1.5-flash",
    "gemini-1.5-pro",
    "gemini-2.0-flash-exp",
    "gemini-pro",
    "gemini-pro-vision",
];

pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];
pub const VALID_LOG_FORMATS: &[&str] = &["json", "pretty", "compact"];
pub const VALID_THEMES: &[&str] = &["default", "minimal", "solarized", "dracula"];
pub const VALID_SPINNER_STYLES: &[&str] = &["dots", "line", "simple"];
pub const VALID_PRUNE_STRATEGIES: &[&str] = &["oldest", "summarize", "smart"];
pub const VALID_RESPONSE_FORMATS: &[&str] = &["auto", "plain", "markdown", "json"];

pub const API_TIMEOUT_RANGE: (i64, i64) = (1, 300);
pub const API_MAX_RETRIES_RANGE: (i64, i64) = (0, 10);
pub const API_RETRY_DELAY_RANGE: (f64, f64) = (0.1, 60.0);
pub const REPL_HISTORY_SIZE_RANGE: (i64, i64) = (0, 100_000);
pub const REPL_AUTO_SAVE_INTERVAL_RANGE: (i64, i64) = (0, 3600);
pub const LOGGING_MAX_FILES_RANGE: (i64, i64) = (1, 100);
pub const COMMAND_TIMEOUT_RANGE: (i64, i64) = (1, 300);
pub const SESSION_MAX_CONTEXT_RANGE: (i64, i64) = (1000, 1_000_000);
pub const UI_MAX_WIDTH_RANGE: (i64, i64) = (40, 200);
pub const TEMPERATURE_RANGE: (f64, f64) = (0.0, 2.0);
pub const MAX_TOKENS_RANGE: (i64, i64) = (1, 100_000);
pub const NETWORK_TIMEOUT_CONNECT_RANGE: (i64, i64) = (1, 60);
pub const NETWORK_TIMEOUT_READ_RANGE: (i64, i64) = (1, 300);
pub const DEBUG_MOCK_DELAY_RANGE: (i64, i64) = (0, 5000);

// =========================================================================
// REGISTRY
// =========================================================================

/// A section rule: judges one top-level table and appends its findings.
pub type SectionRule = fn(&Table, &mut Vec<Issue>);

/// Immutable mapping from section name to its rule, in the fixed order
/// sections are processed (definition order, not alphabetical, not input
/// order). Built once at startup and shared by reference.
pub struct Registry {
    sections: Vec<(&'static str, SectionRule)>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            sections: vec![
                ("api", validate_api as SectionRule),
                ("repl", validate_repl),
                ("logging", validate_logging),
                ("tools", validate_tools),
                ("session", validate_session),
                ("ui", validate_ui),
                ("response", validate_response),
                ("network", validate_network),
                ("security", validate_security),
                ("debug", validate_debug),
                ("aliases", validate_aliases),
                ("models", validate_models),
                ("prompts", validate_prompts),
                ("features", validate_features),
            ],
        }
    }

    /// Whether `name` is a recognized top-level section.
    pub fn contains(&self, name: &str) -> bool {
        self.sections.iter().any(|(n, _)| *n == name)
    }

    /// Sections in processing order.
    pub fn sections(&self) -> impl Iterator<Item = (&'static str, SectionRule)> + '_ {
        self.sections.iter().copied()
    }

    /// Recognized section names in processing order.
    pub fn section_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sections.iter().map(|(n, _)| *n)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// SECTION RULES
// =========================================================================

fn validate_api(api: &Table, issues: &mut Vec<Issue>) {
    // Inline credentials never fail validation, they only warn
    if api.contains_key("api_key") {
        issues.push(Issue::warning(
            "api.api_key",
            "API key should not be stored in config file. \
             Use GEMINI_API_KEY environment variable.",
        ));
    }

    if let Some(model) = api.get("model") {
        issues.extend(check_enum("api.model", model, "model", VALID_MODELS));
    }

    if let Some(url) = api.get("base_url") {
        if !url.as_str().is_some_and(is_valid_url) {
            issues.push(Issue::error("api.base_url", "Invalid URL format"));
        }
    }

    let (min, max) = API_TIMEOUT_RANGE;
    if let Some(v) = api.get("timeout") {
        issues.extend(check_integer_range("api.timeout", v, min, max));
    }

    let (min, max) = API_MAX_RETRIES_RANGE;
    if let Some(v) = api.get("max_retries") {
        issues.extend(check_integer_range("api.max_retries", v, min, max));
    }

    let (min, max) = API_RETRY_DELAY_RANGE;
    if let Some(v) = api.get("retry_delay") {
        issues.extend(check_float_range("api.retry_delay", v, min, max));
    }
}

fn validate_repl(repl: &Table, issues: &mut Vec<Issue>) {
    let (min, max) = REPL_HISTORY_SIZE_RANGE;
    if let Some(v) = repl.get("history_size") {
        issues.extend(check_integer_range("repl.history_size", v, min, max));
    }

    let (min, max) = REPL_AUTO_SAVE_INTERVAL_RANGE;
    if let Some(v) = repl.get("auto_save_interval") {
        issues.extend(check_integer_range("repl.auto_save_interval", v, min, max));
    }

    check_boolean_fields(
        repl,
        "repl",
        &["colored_prompt", "welcome_banner", "vi_mode", "multiline_mode"],
        issues,
    );
}

fn validate_logging(logging: &Table, issues: &mut Vec<Issue>) {
    if let Some(level) = logging.get("level") {
        issues.extend(check_enum(
            "logging.level",
            level,
            "log level",
            VALID_LOG_LEVELS,
        ));
    }

    if let Some(format) = logging.get("format") {
        issues.extend(check_enum(
            "logging.format",
            format,
            "log format",
            VALID_LOG_FORMATS,
        ));
    }

    if let Some(size) = logging.get("max_file_size") {
        if !size.as_str().is_some_and(is_valid_size) {
            issues.push(Issue::error(
                "logging.max_file_size",
                "Invalid size format. Use: 10MB, 1GB, etc.",
            ));
        }
    }

    let (min, max) = LOGGING_MAX_FILES_RANGE;
    if let Some(v) = logging.get("max_files") {
        issues.extend(check_integer_range("logging.max_files", v, min, max));
    }
}

fn validate_tools(tools: &Table, issues: &mut Vec<Issue>) {
    if let Some(size) = tools.get("max_file_size") {
        if !size.as_str().is_some_and(is_valid_size) {
            issues.push(Issue::error("tools.max_file_size", "Invalid size format"));
        }
    }

    if let Some(extensions) = tools.get("allowed_extensions") {
        match extensions.as_array() {
            None => issues.push(Issue::error(
                "tools.allowed_extensions",
                "Must be an array of strings",
            )),
            Some(items) => {
                // Each offending element is flagged individually
                for item in items {
                    match item.as_str() {
                        Some(ext) if ext.starts_with('.') => {}
                        _ => issues.push(Issue::error(
                            "tools.allowed_extensions",
                            format!(
                                "Invalid extension format: {}. Must start with '.'",
                                scalar_text(item)
                            ),
                        )),
                    }
                }
            }
        }
    }

    if let Some(commands) = tools.get("commands") {
        match commands.as_table() {
            None => issues.push(Issue::error("tools.commands", "Must be a table")),
            Some(table) => validate_tools_commands(table, issues),
        }
    }
}

fn validate_tools_commands(commands: &Table, issues: &mut Vec<Issue>) {
    let (min, max) = COMMAND_TIMEOUT_RANGE;
    if let Some(v) = commands.get("timeout") {
        issues.extend(check_integer_range("tools.commands.timeout", v, min, max));
    }

    if let Some(allowed) = commands.get("allowed_commands") {
        match allowed.as_array() {
            None => issues.push(Issue::error(
                "tools.commands.allowed_commands",
                "Must be an array of strings",
            )),
            Some(items) => {
                for item in items {
                    let cmd = scalar_text(item);
                    for _fragment in dangerous_fragments(&cmd) {
                        issues.push(Issue::warning(
                            "tools.commands.allowed_commands",
                            format!("Potentially dangerous command: {}", cmd),
                        ));
                    }
                }
            }
        }
    }
}

fn validate_session(session: &Table, issues: &mut Vec<Issue>) {
    let (min, max) = SESSION_MAX_CONTEXT_RANGE;
    if let Some(v) = session.get("max_context_size") {
        issues.extend(check_integer_range("session.max_context_size", v, min, max));
    }

    if let Some(strategy) = session.get("prune_strategy") {
        issues.extend(check_enum(
            "session.prune_strategy",
            strategy,
            "strategy",
            VALID_PRUNE_STRATEGIES,
        ));
    }
}

fn validate_ui(ui: &Table, issues: &mut Vec<Issue>) {
    // Unknown themes degrade gracefully at runtime, so this one is a
    // warning while spinner_style stays an error
    if let Some(theme) = ui.get("theme") {
        let name = theme.as_str().unwrap_or_default();
        if !VALID_THEMES.contains(&name) {
            issues.push(Issue::warning(
                "ui.theme",
                format!(
                    "Unknown theme: {}. Valid themes: {}",
                    scalar_text(theme),
                    VALID_THEMES.join(", ")
                ),
            ));
        }
    }

    if let Some(style) = ui.get("spinner_style") {
        issues.extend(check_enum(
            "ui.spinner_style",
            style,
            "spinner style",
            VALID_SPINNER_STYLES,
        ));
    }

    let (min, max) = UI_MAX_WIDTH_RANGE;
    if let Some(v) = ui.get("max_width") {
        issues.extend(check_integer_range("ui.max_width", v, min, max));
    }
}

fn validate_response(response: &Table, issues: &mut Vec<Issue>) {
    let (min, max) = TEMPERATURE_RANGE;
    if let Some(v) = response.get("temperature") {
        issues.extend(check_float_range("response.temperature", v, min, max));
    }

    let (min, max) = MAX_TOKENS_RANGE;
    if let Some(v) = response.get("max_tokens") {
        issues.extend(check_integer_range("response.max_tokens", v, min, max));
    }

    if let Some(format) = response.get("format") {
        issues.extend(check_enum(
            "response.format",
            format,
            "format",
            VALID_RESPONSE_FORMATS,
        ));
    }
}

fn validate_network(network: &Table, issues: &mut Vec<Issue>) {
    if let Some(url) = network.get("proxy_url") {
        if !url.as_str().is_some_and(is_valid_url) {
            issues.push(Issue::error("network.proxy_url", "Invalid proxy URL"));
        }
    }

    let (min, max) = NETWORK_TIMEOUT_CONNECT_RANGE;
    if let Some(v) = network.get("timeout_connect") {
        issues.extend(check_integer_range("network.timeout_connect", v, min, max));
    }

    let (min, max) = NETWORK_TIMEOUT_READ_RANGE;
    if let Some(v) = network.get("timeout_read") {
        issues.extend(check_integer_range("network.timeout_read", v, min, max));
    }
}

fn validate_security(security: &Table, issues: &mut Vec<Issue>) {
    check_boolean_fields(
        security,
        "security",
        &["mask_api_key", "audit_tools", "validate_ssl", "sanitize_logs"],
        issues,
    );
}

fn validate_debug(debug: &Table, issues: &mut Vec<Issue>) {
    check_boolean_fields(
        debug,
        "debug",
        &["show_raw_api_calls", "save_recordings", "verbose_errors"],
        issues,
    );

    let (min, max) = DEBUG_MOCK_DELAY_RANGE;
    if let Some(v) = debug.get("mock_delay_ms") {
        issues.extend(check_integer_range("debug.mock_delay_ms", v, min, max));
    }
}

/// `[aliases]` maps user-chosen names to command strings.
fn validate_aliases(aliases: &Table, issues: &mut Vec<Issue>) {
    for (alias, command) in aliases {
        if command.as_str().is_none() {
            issues.push(Issue::error(
                format!("aliases.{}", alias),
                "Alias target must be a string",
            ));
        }
    }
}

/// `[models.<name>]` tables carry per-model overrides under user-chosen
/// names. Scalar entries under `[models]` are ignored.
fn validate_models(models: &Table, issues: &mut Vec<Issue>) {
    for (name, model) in models {
        let Some(table) = model.as_table() else {
            continue;
        };

        let (min, max) = TEMPERATURE_RANGE;
        if let Some(v) = table.get("temperature") {
            issues.extend(check_float_range(
                &format!("models.{}.temperature", name),
                v,
                min,
                max,
            ));
        }

        let (min, max) = MAX_TOKENS_RANGE;
        if let Some(v) = table.get("max_tokens") {
            issues.extend(check_integer_range(
                &format!("models.{}.max_tokens", name),
                v,
                min,
                max,
            ));
        }
    }
}

/// `[prompts]` maps user-chosen names to prompt text.
fn validate_prompts(prompts: &Table, issues: &mut Vec<Issue>) {
    for (name, prompt) in prompts {
        if prompt.as_str().is_none() {
            issues.push(Issue::error(
                format!("prompts.{}", name),
                "Prompt must be a string",
            ));
        }
    }
}

/// `[features]` maps user-chosen flag names to booleans.
fn validate_features(features: &Table, issues: &mut Vec<Issue>) {
    for (feature, enabled) in features {
        issues.extend(check_boolean(&format!("features.{}", feature), enabled));
    }
}

// =========================================================================
// HELPERS
// =========================================================================

fn check_boolean_fields(table: &Table, section: &str, fields: &[&str], issues: &mut Vec<Issue>) {
    for field in fields {
        if let Some(v) = table.get(*field) {
            issues.extend(check_boolean(&format!("{}.{}", section, field), v));
        }
    }
}

/// Scalar rendered for a message without quoting strings.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(toml: &str) -> Table {
        toml.parse().unwrap()
    }

    fn run(rule: SectionRule, toml: &str) -> Vec<Issue> {
        let mut issues = Vec::new();
        rule(&table(toml), &mut issues);
        issues
    }

    #[test]
    fn test_registry_order_is_fixed() {
        let registry = Registry::new();
        let names: Vec<_> = registry.section_names().collect();
        assert_eq!(
            names,
            vec![
                "api", "repl", "logging", "tools", "session", "ui", "response", "network",
                "security", "debug", "aliases", "models", "prompts", "features",
            ]
        );
        assert!(registry.contains("api"));
        assert!(!registry.contains("plugins"));
    }

    #[test]
    fn test_api_valid_fields_pass() {
        let issues = run(
            validate_api,
            r#"
                model = "gemini-1.5-flash"
                base_url = "https://generativelanguage.googleapis.com"
                timeout = 30
                max_retries = 3
                retry_delay = 1.5
            "#,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_api_key_warns_not_errors() {
        let issues = run(validate_api, r#"api_key = "AIzaSy-secret""#);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, crate::issue::Severity::Warning);
        assert_eq!(issues[0].path, "api.api_key");
        assert!(issues[0].message.contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_api_invalid_model_and_timeout() {
        let issues = run(
            validate_api,
            r#"
                model = "bogus-model"
                timeout = 500
            "#,
        );
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].path, "api.model");
        assert!(issues[0].message.contains("bogus-model"));
        assert_eq!(issues[1].path, "api.timeout");
        assert_eq!(issues[1].message, "Must be between 1 and 300");
    }

    #[test]
    fn test_repl_boolean_fields_strict() {
        let issues = run(validate_repl, "vi_mode = 1");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "repl.vi_mode");
        assert_eq!(issues[0].message, "Must be true or false");
    }

    #[test]
    fn test_logging_size_and_enum() {
        let issues = run(
            validate_logging,
            r#"
                level = "verbose"
                max_file_size = "huge"
            "#,
        );
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].path, "logging.level");
        assert_eq!(issues[1].path, "logging.max_file_size");
        assert!(issues[1].message.contains("10MB"));
    }

    #[test]
    fn test_tools_extension_flagged_per_element() {
        let issues = run(
            validate_tools,
            r#"allowed_extensions = [".rs", "txt", ".md", "py"]"#,
        );
        assert_eq!(issues.len(), 2);
        assert!(issues[0].message.contains("txt"));
        assert!(issues[1].message.contains("py"));
    }

    #[test]
    fn test_tools_extensions_must_be_array() {
        let issues = run(validate_tools, r#"allowed_extensions = ".rs""#);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "Must be an array of strings");
    }

    #[test]
    fn test_dangerous_command_warns() {
        let issues = run(
            validate_tools,
            r#"
                [commands]
                allowed_commands = ["ls", "rm -rf /tmp/x"]
            "#,
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, crate::issue::Severity::Warning);
        assert_eq!(issues[0].path, "tools.commands.allowed_commands");
        assert!(issues[0].message.contains("rm -rf /tmp/x"));
    }

    #[test]
    fn test_ui_theme_warns_spinner_errors() {
        let issues = run(
            validate_ui,
            r#"
                theme = "cyberpunk"
                spinner_style = "bounce"
            "#,
        );
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].severity, crate::issue::Severity::Warning);
        assert_eq!(issues[0].path, "ui.theme");
        assert_eq!(issues[1].severity, crate::issue::Severity::Error);
        assert_eq!(issues[1].path, "ui.spinner_style");
    }

    #[test]
    fn test_aliases_dynamic_keys() {
        let issues = run(
            validate_aliases,
            r#"
                ll = "ls -la"
                bad = 42
            "#,
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "aliases.bad");
        assert_eq!(issues[0].message, "Alias target must be a string");
    }

    #[test]
    fn test_models_dynamic_tables() {
        let issues = run(
            validate_models,
            r#"
                [fast]
                temperature = 0.7
                max_tokens = 2048

                [hot]
                temperature = 3.5
            "#,
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "models.hot.temperature");
        assert_eq!(issues[0].message, "Must be between 0 and 2");
    }

    #[test]
    fn test_models_scalar_entry_ignored() {
        let issues = run(validate_models, r#"shortcut = "gemini-pro""#);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_features_boolean_checked() {
        let issues = run(
            validate_features,
            r#"
                streaming = true
                telemetry = "yes"
            "#,
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "features.telemetry");
    }

    #[test]
    fn test_unknown_fields_in_section_ignored() {
        let issues = run(validate_session, "totally_unknown = 12");
        assert!(issues.is_empty());
    }
}
