//! Tools command - List and run the tools contestants can call
//!
//! Usage:
//! ```bash
//! agora tools list
//! agora tools run datetime '{"format": "%Y"}'
//! agora tools schema datetime
//! ```

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};

use agora_llm::{tools::builtin_registry, RawToolCall, ToolDispatcher};

/// Arguments for the tools command
#[derive(Args)]
pub struct ToolsArgs {
    #[command(subcommand)]
    command: ToolsCommand,
}

#[derive(Subcommand)]
pub enum ToolsCommand {
    /// List all available tools
    #[command(name = "list")]
    List,

    /// Run a tool the same way a contestant's call is dispatched
    #[command(name = "run")]
    Run {
        /// Name of the tool to run
        name: String,

        /// Arguments: a JSON object, JSON-encoded string or bare value
        #[arg(default_value = "{}")]
        args: String,
    },

    /// Show the JSON schema for a tool
    #[command(name = "schema")]
    Schema {
        /// Name of the tool
        name: String,
    },
}

/// Run the tools command
pub async fn run(args: ToolsArgs) -> Result<()> {
    match args.command {
        ToolsCommand::List => list_tools(),
        ToolsCommand::Run { name, args } => run_tool(&name, &args).await,
        ToolsCommand::Schema { name } => show_schema(&name),
    }
}

fn list_tools() -> Result<()> {
    let registry = builtin_registry();

    println!("{}", "🧰 Built-in Tools".bold().cyan());
    println!();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Name").fg(Color::Cyan),
            Cell::new("Description").fg(Color::Cyan),
            Cell::new("Arguments").fg(Color::Cyan),
        ]);

    for def in registry.definitions() {
        let params = def.parameter_names().unwrap_or_default().join(", ");
        table.add_row(vec![
            Cell::new(def.name).fg(Color::Green),
            Cell::new(def.description),
            Cell::new(params).fg(Color::Yellow),
        ]);
    }

    println!("{table}");
    println!();
    println!("Run a tool: {}", "agora tools run <name> '<json_args>'".green());
    println!("Show schema: {}", "agora tools schema <name>".green());

    Ok(())
}

async fn run_tool(name: &str, args_str: &str) -> Result<()> {
    // Non-JSON input is passed through as a plain string argument
    let args = serde_json::from_str(args_str)
        .unwrap_or_else(|_| serde_json::Value::String(args_str.to_string()));

    let call = RawToolCall::new("cli", name, args)
        .normalize()
        .with_context(|| format!("Invalid tool call for '{}'", name))?;

    println!("{} Running tool '{}'...", "⚙".blue(), name.green());
    println!();

    let dispatcher = ToolDispatcher::new(builtin_registry());
    let result = dispatcher.execute(&call).await;

    if result.starts_with("Error") {
        println!("{}", result.red());
    } else {
        println!("{}", "Result:".bold());
        println!("{}", result);
    }
    Ok(())
}

fn show_schema(name: &str) -> Result<()> {
    let registry = builtin_registry();

    let tool = registry.get(name).ok_or_else(|| {
        anyhow::anyhow!(
            "Tool '{}' not found. Run 'agora tools list' to see available tools.",
            name
        )
    })?;
    let def = tool.definition();

    println!("{} Schema for '{}'", "📋".cyan(), name.green().bold());
    println!();
    println!("{}", "Description:".bold());
    println!("  {}", def.description);
    println!();
    println!("{}", "Parameters (JSON Schema):".bold());
    println!("{}", serde_json::to_string_pretty(&def.schema())?);
    println!();
    println!("{}", "OpenAI Format:".bold());
    println!("{}", serde_json::to_string_pretty(&def.to_openai_format())?);

    Ok(())
}
