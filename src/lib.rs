//! # gemcheck - Gemini REPL configuration validator
//!
//! gemcheck checks a Gemini REPL `config.toml` against the REPL's
//! configuration contract and reports a classified list of findings.
//!
//! ## Overview
//!
//! A configuration document is a TOML tree of named sections (`[api]`,
//! `[logging]`, ...). The validator never mutates the document: it walks
//! each recognized section with a fixed registry of rules, collects every
//! finding as an [`issue::Issue`] with a severity and a dotted field path,
//! and derives the verdict from the presence of errors. Warnings flag
//! best-practice concerns (inline API keys, dangerous allowed commands,
//! inconsistent soft settings) without ever failing the configuration.
//!
//! ## Modules
//!
//! - [`issue`] - Severity, issue and report types
//! - [`checks`] - Reusable field constraint primitives
//! - [`rules`] - Per-section rules and the dispatch registry
//! - [`engine`] - Validation orchestration and file/text entry points
//! - [`schema`] - Static schema dump of the recognized surface
//!
//! ## Example
//!
//! ```
//! use gemcheck::engine::Validator;
//! use gemcheck::rules::Registry;
//!
//! let registry = Registry::new();
//! let validator = Validator::new(&registry);
//!
//! let report = validator.validate_str(r#"
//!     [api]
//!     model = "gemini-1.5-flash"
//!     timeout = 30
//! "#);
//! assert!(report.is_valid());
//! ```

pub mod checks;
pub mod engine;
pub mod issue;
pub mod rules;
pub mod schema;

pub use engine::Validator;
pub use issue::{Issue, Severity, ValidationReport};
pub use rules::Registry;
