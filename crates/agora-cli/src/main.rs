//! Agora CLI - LLM debates and rap battles with a scoring judge
//!
//! # Usage
//!
//! ```bash
//! # Structured political debate, 8 turns, judged
//! agora debate "Universal basic income"
//!
//! # Rap battle, 3 rounds per rapper
//! agora battle eminem kendrick --topic "Who has the better flow?"
//!
//! # Content strategy for a YouTube niche, 7 specialist phases
//! agora youtube "home espresso" --goal "viral shorts"
//!
//! # Model credentials and tools
//! agora models
//! agora tools list
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use agora_llm::AgoraConfig;

mod commands;
mod render;

use commands::{battle, debate, info, models, tools, youtube};

/// Agora - turn-based LLM contests
#[derive(Parser)]
#[command(
    name = "agora",
    version,
    about = "Agora - LLM debates and rap battles with a scoring judge",
    long_about = "Agora runs two model-backed personas against each other in strictly\n\
                  alternating turns, optionally with tools, and scores every turn\n\
                  with a judge model before declaring a winner."
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a political debate
    #[command(name = "debate")]
    Debate(debate::DebateArgs),

    /// Run a rap battle
    #[command(name = "battle")]
    Battle(battle::BattleArgs),

    /// Plan a YouTube channel's content strategy
    #[command(name = "youtube")]
    Youtube(youtube::YoutubeArgs),

    /// Show configured models and their credential status
    #[command(name = "models")]
    Models(models::ModelsArgs),

    /// Tool listing and execution
    #[command(name = "tools")]
    Tools(tools::ToolsArgs),

    /// Show system information
    #[command(name = "info")]
    Info(info::InfoArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A malformed environment is reported by the command that loads it
    let debug = AgoraConfig::from_env().map(|c| c.debug).unwrap_or_default();
    setup_logging(log_level(cli.verbose, debug));

    match cli.command {
        Commands::Debate(args) => debate::run(args).await,
        Commands::Battle(args) => battle::run(args).await,
        Commands::Youtube(args) => youtube::run(args).await,
        Commands::Models(args) => models::run(args),
        Commands::Tools(args) => tools::run(args).await,
        Commands::Info(args) => info::run(args),
    }
}

/// Log level for a `-v` count; AGORA_DEBUG raises it to at least `debug`
fn log_level(verbosity: u8, debug: bool) -> &'static str {
    let verbosity = if debug { verbosity.max(2) } else { verbosity };
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Setup logging at the given level
fn setup_logging(filter: &str) {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), msg);
}

/// Print an info message
pub fn print_info(msg: &str) {
    println!("{} {}", "ℹ".blue().bold(), msg);
}
