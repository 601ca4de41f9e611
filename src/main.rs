//! CLI entry point for gemcheck.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use gemcheck::engine::Validator;
use gemcheck::rules::Registry;
use gemcheck::schema::dump_schema;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_SHA"),
    ", built ",
    env!("BUILD_DATE"),
    ")"
);

#[derive(Parser)]
#[command(name = "gemcheck")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Validate Gemini REPL configuration files", long_about = None)]
struct Cli {
    /// Configuration file to validate (defaults to ~/.gemini-repl/config.toml)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Print the configuration schema as JSON and exit
    #[arg(long)]
    generate_schema: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !atty::is(atty::Stream::Stdout) || std::env::var("NO_COLOR").is_ok() {
        colored::control::set_override(false);
    }

    if cli.generate_schema {
        let schema = dump_schema();
        println!(
            "{}",
            serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?
        );
        return Ok(());
    }

    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path().context("Could not determine home directory")?,
    };

    let registry = Registry::new();
    let validator = Validator::new(&registry);
    let report = validator.validate_file(&config_path);

    if report.is_valid() && report.is_empty() {
        println!(
            "✅ {}: {}",
            "Configuration file is valid".green(),
            config_path.display()
        );
        return Ok(());
    }

    report.display();

    if !report.is_valid() {
        std::process::exit(1);
    }

    Ok(())
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".gemini-repl").join("config.toml"))
}
