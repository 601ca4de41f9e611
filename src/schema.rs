//! Static schema description of the recognized configuration surface.
//!
//! Derived from the same enumeration and bound constants the rules apply,
//! so the dumped schema cannot drift from validation behavior. Pure: the
//! output depends on nothing but the registry definition.

use serde_json::{json, Value};

use crate::rules::{
    API_MAX_RETRIES_RANGE, API_RETRY_DELAY_RANGE, API_TIMEOUT_RANGE, COMMAND_TIMEOUT_RANGE,
    DEBUG_MOCK_DELAY_RANGE, LOGGING_MAX_FILES_RANGE, MAX_TOKENS_RANGE,
    NETWORK_TIMEOUT_CONNECT_RANGE, NETWORK_TIMEOUT_READ_RANGE, REPL_AUTO_SAVE_INTERVAL_RANGE,
    REPL_HISTORY_SIZE_RANGE, SESSION_MAX_CONTEXT_RANGE, TEMPERATURE_RANGE, UI_MAX_WIDTH_RANGE,
    VALID_LOG_FORMATS, VALID_LOG_LEVELS, VALID_MODELS, VALID_PRUNE_STRATEGIES,
    VALID_RESPONSE_FORMATS, VALID_SPINNER_STYLES, VALID_THEMES,
};

fn integer(range: (i64, i64)) -> Value {
    json!({ "type": "integer", "minimum": range.0, "maximum": range.1 })
}

fn number(range: (f64, f64)) -> Value {
    json!({ "type": "number", "minimum": range.0, "maximum": range.1 })
}

fn string_enum(allowed: &[&str]) -> Value {
    json!({ "type": "string", "enum": allowed })
}

fn boolean() -> Value {
    json!({ "type": "boolean" })
}

fn size_string() -> Value {
    json!({ "type": "string", "pattern": "^\\d+(\\.\\d+)?\\s*(B|KB?|MB?|GB?)?$" })
}

fn url_string() -> Value {
    json!({ "type": "string", "format": "uri" })
}

/// Produce a draft-07-style schema object describing every recognized
/// section, its fields, enumerations and bounds.
pub fn dump_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Gemini REPL configuration",
        "type": "object",
        "properties": {
            "api": {
                "type": "object",
                "properties": {
                    "api_key": { "type": "string" },
                    "model": string_enum(VALID_MODELS),
                    "base_url": url_string(),
                    "timeout": integer(API_TIMEOUT_RANGE),
                    "max_retries": integer(API_MAX_RETRIES_RANGE),
                    "retry_delay": number(API_RETRY_DELAY_RANGE),
                }
            },
            "repl": {
                "type": "object",
                "properties": {
                    "history_size": integer(REPL_HISTORY_SIZE_RANGE),
                    "auto_save_interval": integer(REPL_AUTO_SAVE_INTERVAL_RANGE),
                    "colored_prompt": boolean(),
                    "welcome_banner": boolean(),
                    "vi_mode": boolean(),
                    "multiline_mode": boolean(),
                }
            },
            "logging": {
                "type": "object",
                "properties": {
                    "level": string_enum(VALID_LOG_LEVELS),
                    "format": string_enum(VALID_LOG_FORMATS),
                    "file": { "type": "string" },
                    "log_requests": boolean(),
                    "max_file_size": size_string(),
                    "max_files": integer(LOGGING_MAX_FILES_RANGE),
                }
            },
            "tools": {
                "type": "object",
                "properties": {
                    "max_file_size": size_string(),
                    "allowed_extensions": {
                        "type": "array",
                        "items": { "type": "string", "pattern": "^\\." }
                    },
                    "commands": {
                        "type": "object",
                        "properties": {
                            "timeout": integer(COMMAND_TIMEOUT_RANGE),
                            "allowed_commands": {
                                "type": "array",
                                "items": { "type": "string" }
                            },
                        }
                    },
                }
            },
            "session": {
                "type": "object",
                "properties": {
                    "auto_save": boolean(),
                    "default_dir": { "type": "string" },
                    "max_context_size": integer(SESSION_MAX_CONTEXT_RANGE),
                    "prune_strategy": string_enum(VALID_PRUNE_STRATEGIES),
                }
            },
            "ui": {
                "type": "object",
                "properties": {
                    "theme": string_enum(VALID_THEMES),
                    "spinner_style": string_enum(VALID_SPINNER_STYLES),
                    "max_width": integer(UI_MAX_WIDTH_RANGE),
                }
            },
            "response": {
                "type": "object",
                "properties": {
                    "temperature": number(TEMPERATURE_RANGE),
                    "max_tokens": integer(MAX_TOKENS_RANGE),
                    "format": string_enum(VALID_RESPONSE_FORMATS),
                }
            },
            "network": {
                "type": "object",
                "properties": {
                    "proxy_url": url_string(),
                    "timeout_connect": integer(NETWORK_TIMEOUT_CONNECT_RANGE),
                    "timeout_read": integer(NETWORK_TIMEOUT_READ_RANGE),
                }
            },
            "security": {
                "type": "object",
                "properties": {
                    "mask_api_key": boolean(),
                    "audit_tools": boolean(),
                    "validate_ssl": boolean(),
                    "sanitize_logs": boolean(),
                }
            },
            "debug": {
                "type": "object",
                "properties": {
                    "show_raw_api_calls": boolean(),
                    "save_recordings": boolean(),
                    "verbose_errors": boolean(),
                    "mock_delay_ms": integer(DEBUG_MOCK_DELAY_RANGE),
                }
            },
            "aliases": {
                "type": "object",
                "additionalProperties": { "type": "string" }
            },
            "models": {
                "type": "object",
                "additionalProperties": {
                    "type": "object",
                    "properties": {
                        "temperature": number(TEMPERATURE_RANGE),
                        "max_tokens": integer(MAX_TOKENS_RANGE),
                    }
                }
            },
            "prompts": {
                "type": "object",
                "additionalProperties": { "type": "string" }
            },
            "features": {
                "type": "object",
                "additionalProperties": { "type": "boolean" }
            },
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Registry;

    #[test]
    fn test_schema_is_pure() {
        assert_eq!(dump_schema(), dump_schema());
    }

    #[test]
    fn test_schema_covers_every_registered_section() {
        let schema = dump_schema();
        let properties = schema["properties"].as_object().unwrap();
        for name in Registry::new().section_names() {
            assert!(properties.contains_key(name), "missing section {name}");
        }
        assert_eq!(properties.len(), Registry::new().section_names().count());
    }

    #[test]
    fn test_schema_bounds_match_rules() {
        let schema = dump_schema();
        let timeout = &schema["properties"]["api"]["properties"]["timeout"];
        assert_eq!(timeout["minimum"], 1);
        assert_eq!(timeout["maximum"], 300);

        let model = &schema["properties"]["api"]["properties"]["model"];
        assert_eq!(model["enum"].as_array().unwrap().len(), VALID_MODELS.len());
    }
}
