//! Battle command - Two rappers trade verses over a topic
//!
//! Usage:
//! ```bash
//! agora battle --list
//! agora battle eminem kendrick
//! agora battle tupac biggie --topic "East vs West" --rounds 2
//! ```

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};

use agora_judge::Rubric;
use agora_runtime::{
    battle_seed, battle_turns, find_rapper, rapper_ids, RapperProfile, BATTLE_CONTINUATION,
    BATTLE_TOPICS, DEFAULT_BATTLE_ROUNDS, ROSTER,
};

use super::contest::{self, Contest, ContestOptions};

/// Arguments for the battle command
#[derive(Args)]
pub struct BattleArgs {
    /// First rapper (speaks first)
    #[arg(required_unless_present = "list")]
    rapper_a: Option<String>,

    /// Second rapper
    #[arg(required_unless_present = "list")]
    rapper_b: Option<String>,

    /// Battle topic (default: the first suggested topic)
    #[arg(long)]
    topic: Option<String>,

    /// Verses per rapper (default: AGORA_MAX_TURNS as a turn budget, else 3)
    #[arg(short, long)]
    rounds: Option<u32>,

    /// List the roster and suggested topics
    #[arg(long)]
    list: bool,

    #[command(flatten)]
    options: ContestOptions,
}

/// Run the battle command
pub async fn run(args: BattleArgs) -> Result<()> {
    if args.list {
        list_roster();
        return Ok(());
    }

    let a = lookup(args.rapper_a.as_deref().unwrap_or_default())?;
    let b = lookup(args.rapper_b.as_deref().unwrap_or_default())?;
    if a.id == b.id {
        bail!("A rapper cannot battle themselves, pick two different ids");
    }

    let topic = args
        .topic
        .unwrap_or_else(|| BATTLE_TOPICS.first().copied().unwrap_or("Who is the greatest?").to_string());

    let contest = Contest {
        mode: "battle".to_string(),
        seed: battle_seed(&topic, a.name, b.name),
        topic,
        turns: args.rounds.map(battle_turns),
        default_turns: battle_turns(DEFAULT_BATTLE_ROUNDS),
        side_a: a.participant(""),
        side_b: b.participant(""),
        rubric: Rubric::rap_battle(),
        continuation: BATTLE_CONTINUATION.to_string(),
    };

    contest::execute(contest, &args.options).await
}

fn lookup(id: &str) -> Result<&'static RapperProfile> {
    match find_rapper(id) {
        Some(profile) => Ok(profile),
        None => bail!("Unknown rapper '{}'. Available: {}", id, rapper_ids().join(", ")),
    }
}

fn list_roster() {
    println!("{}", "🎤 Rap Battle Roster".bold().cyan());
    println!();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Id").fg(Color::Cyan),
            Cell::new("Name").fg(Color::Cyan),
            Cell::new("Style").fg(Color::Cyan),
        ]);

    for profile in ROSTER.iter() {
        table.add_row(vec![
            Cell::new(profile.id).fg(Color::Green),
            Cell::new(format!("{} {}", profile.icon, profile.name)),
            Cell::new(profile.description),
        ]);
    }
    println!("{table}");
    println!();

    println!("{}", "Suggested topics:".bold());
    for topic in BATTLE_TOPICS {
        println!("  {} {}", "•".cyan(), topic);
    }
    println!();
    println!("Start a battle: {}", "agora battle <rapper_a> <rapper_b>".green());
}
