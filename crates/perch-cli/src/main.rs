//! Perch CLI - replay scripted placement sessions

mod commands;
mod script;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{replay, templates};

#[derive(Parser)]
#[command(name = "perch")]
#[command(about = "Anchor-driven AR object placement, replayed from scripts", long_about = None)]
#[command(version)]
struct Cli {
    /// Log placement decisions (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a session script against a simulated tracker
    Replay {
        /// Path to the script file
        script: String,

        /// Placement config file (defaults to layered ~/.perch and .perch configs)
        #[arg(long)]
        config: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// List the templates in a catalog
    Templates {
        /// Path to a catalog file (defaults to the built-in catalog)
        catalog: Option<String>,
    },
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Replay {
            script,
            config,
            format,
        } => replay::run(replay::ReplayArgs {
            script,
            config,
            format,
        }),
        Commands::Templates { catalog } => templates::run(catalog.as_deref()),
    }
}
