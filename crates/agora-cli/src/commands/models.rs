//! Models command - Show the model catalog and credential status
//!
//! Usage:
//! ```bash
//! agora models
//! agora models --json
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};

use agora_llm::ModelCatalog;

/// Arguments for the models command
#[derive(Args)]
pub struct ModelsArgs {
    /// Output JSON instead of a table
    #[arg(long)]
    json: bool,
}

/// Run the models command
pub fn run(args: ModelsArgs) -> Result<()> {
    let catalog = ModelCatalog::new();
    let availability = catalog.availability();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&availability)?);
        return Ok(());
    }

    println!("{}", "🤖 Configured Models".bold().cyan());
    println!();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Name").fg(Color::Cyan),
            Cell::new("Model").fg(Color::Cyan),
            Cell::new("Provider").fg(Color::Cyan),
            Cell::new("Status").fg(Color::Cyan),
        ]);

    for model in &availability {
        let status = if model.available {
            Cell::new(&model.status).fg(Color::Green)
        } else {
            Cell::new(&model.status).fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(&model.name).fg(Color::Green),
            Cell::new(&model.display_name),
            Cell::new(&model.provider),
            status,
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "Pick models with {} or {}",
        "--model-a/--model-b/--judge-model".green(),
        "AGORA_SIDE_A_MODEL / AGORA_SIDE_B_MODEL / AGORA_JUDGE_MODEL".green()
    );

    Ok(())
}
