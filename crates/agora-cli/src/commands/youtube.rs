//! YouTube command - Plan a channel's content strategy with a crew of specialists
//!
//! Usage:
//! ```bash
//! agora youtube "home espresso"
//! agora youtube "chess openings" --channel https://youtube.com/@example --goal "viral shorts"
//! agora youtube "retro gaming" --audience "30-somethings" --max-steps 3 --json
//! ```

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};
use tracing::debug;

use agora_llm::{tools::builtin_registry, AgoraConfig, ModelCatalog, ToolDispatcher};
use agora_runtime::{
    ChannelBrief, EventSink, Specialist, StrategyConfig, StrategyReport, StrategyWorkflow,
    WorkflowStatus, DEFAULT_MAX_STEPS,
};

use crate::render;
use crate::{print_info, print_warning};

/// Arguments for the youtube command
#[derive(Args)]
pub struct YoutubeArgs {
    /// Content niche, e.g. "home espresso"
    niche: String,

    /// Channel URL to plan for
    #[arg(long)]
    channel: Option<String>,

    /// Target audience description
    #[arg(long)]
    audience: Option<String>,

    /// Content goal (repeatable)
    #[arg(long = "goal")]
    goals: Vec<String>,

    /// Model for every specialist (overrides AGORA_SIDE_A_MODEL)
    #[arg(short, long)]
    model: Option<String>,

    /// Maximum number of phases to run
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: u32,

    /// Offer the built-in tools to the specialists
    #[arg(long)]
    tools: bool,

    /// Print the full report as JSON instead of live output
    #[arg(long)]
    json: bool,
}

/// Run the youtube command
pub async fn run(args: YoutubeArgs) -> Result<()> {
    let catalog = ModelCatalog::new();
    let config = AgoraConfig::from_env().context("Invalid AGORA_* environment")?;
    let model = args.model.clone().unwrap_or(config.side_a_model);
    if catalog.get(&model).is_none() {
        bail!("Unknown model '{}'. Run 'agora models' to see the configured models", model);
    }

    let mut brief = ChannelBrief::new(args.niche);
    brief.channel_url = args.channel;
    brief.target_audience = args.audience;
    brief.goals = args.goals;

    let strategy_config = StrategyConfig {
        max_steps: args.max_steps,
        tools_enabled: args.tools || config.tools_enabled,
        ..StrategyConfig::default()
    };
    let mut workflow = StrategyWorkflow::from_provider(
        &catalog,
        &model,
        ToolDispatcher::new(builtin_registry()),
        strategy_config,
    );
    if let Err(reason) = workflow.member(Specialist::ContentResearcher).model() {
        print_warning(&format!("{}: {} (every phase will record the error)", model, reason));
    }

    let renderer = if args.json {
        None
    } else {
        let (sink, rx) = EventSink::channel();
        workflow = workflow.with_events(sink);
        Some(tokio::spawn(render::render_strategy(
            rx,
            workflow.planned_phases().to_vec(),
        )))
    };

    debug!(niche = %brief.niche, model = %model, max_steps = args.max_steps, "Strategy workflow configured");
    let outcome = tokio::select! {
        result = workflow.run(&brief) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };

    drop(workflow);
    if let Some(handle) = renderer {
        let _ = handle.await;
    }

    let report = match outcome {
        Some(result) => result.context("Strategy workflow could not start")?,
        None => {
            print_warning("Interrupted, the phase in progress was discarded");
            return Ok(());
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &StrategyReport) {
    println!();
    println!("{}", "📋 Workflow Summary".bold().cyan());
    println!();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Phase").fg(Color::Cyan),
            Cell::new("Specialist").fg(Color::Cyan),
            Cell::new("Tools").fg(Color::Cyan),
            Cell::new("Status").fg(Color::Cyan),
        ]);

    for outcome in &report.phases {
        let status = if outcome.failed {
            Cell::new("error").fg(Color::Red)
        } else {
            Cell::new("ok").fg(Color::Green)
        };
        table.add_row(vec![
            Cell::new(outcome.phase.label()),
            Cell::new(outcome.specialist.name()),
            Cell::new(outcome.tool_calls),
            status,
        ]);
    }
    println!("{table}");

    match report.status {
        WorkflowStatus::Completed => print_info("All phases completed"),
        WorkflowStatus::CompletedWithErrors => print_warning(&format!(
            "All phases ran, {} ended with an error",
            report.failed_phases()
        )),
        WorkflowStatus::StepLimitReached => print_info(&format!(
            "Stopped after {} phases (raise --max-steps to run them all)",
            report.phases.len()
        )),
    }
}
