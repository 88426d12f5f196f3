//! Info command - Show system information
//!
//! Usage:
//! ```bash
//! agora info
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use agora_llm::{tools::builtin_registry, ModelCatalog};
use agora_runtime::{Specialist, ROSTER};

/// Arguments for the info command
#[derive(Args)]
pub struct InfoArgs;

const ENV_VARS: &[(&str, &str)] = &[
    ("AGORA_SIDE_A_MODEL", "Model for side A and the youtube crew (default: mock)"),
    ("AGORA_SIDE_B_MODEL", "Model for side B (default: mock)"),
    ("AGORA_JUDGE_MODEL", "Model for the judge (default: mock)"),
    ("AGORA_MAX_TURNS", "Turn budget when --turns/--rounds is not given"),
    ("AGORA_TOOLS", "Offer tools to both sides (true/false)"),
    ("AGORA_JUDGE", "Score turns (true/false)"),
    ("AGORA_DEBUG", "Log at debug level or above (true/false)"),
    ("RUST_LOG", "Log filter, overrides -v"),
];

/// Run the info command
pub fn run(_args: InfoArgs) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");

    println!("{}", "Agora - LLM debates and rap battles".bold().cyan());
    println!("{}", "═".repeat(50).cyan());
    println!();

    println!("{}", "Version Information:".bold());
    println!("  {} {}", "CLI Version:".dimmed(), version.green());
    println!();

    println!("{}", "Contests:".bold());
    println!("  {} Political debate, discussion and policy analysis", "✓".green());
    println!("  {} Rap battles between {} rappers", "✓".green(), ROSTER.len());
    println!("  {} Per-turn judge scoring with a final verdict", "✓".green());
    println!("  {} Tool calls with research follow-up", "✓".green());
    println!("  {} YouTube content strategy with {} specialists", "✓".green(), Specialist::ALL.len());
    println!();

    println!("{}", "Built-in Tools:".bold());
    for name in builtin_registry().names() {
        println!("  {} {}", "•".cyan(), name.green());
    }
    println!();

    let catalog = ModelCatalog::new();
    let available = catalog.availability().iter().filter(|m| m.available).count();
    println!("{}", "Models:".bold());
    println!(
        "  {} {} of {} configured models have credentials ({})",
        "ℹ".blue(),
        available,
        catalog.names().len(),
        "agora models".green()
    );
    println!();

    println!("{}", "Configuration:".bold());
    for (name, description) in ENV_VARS {
        println!("  {} {}", format!("{:<20}", name).yellow(), description);
    }
    println!();

    Ok(())
}
