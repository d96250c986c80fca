use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::filter::EnvFilter;

mod commands;
mod config;

use commands::{info::InfoCommand, json::JsonCommand, list::ListCommand};

#[derive(Parser)]
#[command(name = "lunar", version, about = "Inspect precompiled Lua 5.4 chunks")]
struct Cli {
    /// Config file (defaults to lunar.toml in this or a parent directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Maximum function nesting depth
    #[arg(long, global = true, value_name = "N")]
    max_depth: Option<u32>,

    /// Maximum element count of any array in the chunk
    #[arg(long, global = true, value_name = "N")]
    max_array_len: Option<u32>,

    /// Log decoding progress to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a chunk
    Info(InfoCommand),
    /// Print a luac-style listing
    List(ListCommand),
    /// Dump the decoded function tree as JSON
    Json(JsonCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = config::load_config(cli.config.as_deref())?
        .with_overrides(cli.max_depth, cli.max_array_len);
    tracing::debug!(limits = ?config.limits, "effective limits");

    match cli.command {
        Commands::Info(cmd) => cmd.run(&config),
        Commands::List(cmd) => cmd.run(&config),
        Commands::Json(cmd) => cmd.run(&config),
    }
}
