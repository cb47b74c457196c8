mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rulecheck")]
#[command(version, about = "Rule validation engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a record against a rule set
    Validate {
        /// Path to the rules file (JSON, YAML or TOML)
        rules: String,

        /// Path to the record file (JSON, YAML or TOML)
        record: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// List passing results too
        #[arg(long)]
        show_passed: bool,
    },

    /// Check a rule set without validating data
    Check {
        /// Path to the rules file (JSON, YAML or TOML)
        rules: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    // Execute command
    match cli.command {
        Commands::Validate {
            rules,
            record,
            format,
            show_passed,
        } => commands::validate::execute(&rules, &record, &format, show_passed),

        Commands::Check { rules, format } => commands::check::execute(&rules, &format),
    }
}
