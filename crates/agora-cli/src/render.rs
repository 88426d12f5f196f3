//! Terminal rendering of contest and workflow events

use std::io::Write;

use colored::{ColoredString, Colorize};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};
use tokio::sync::mpsc::UnboundedReceiver;

use agora_core::{FinalVerdict, Outcome, Side, ToolCallRequest};
use agora_runtime::{Phase, TurnEvent};

const TOOL_RESULT_PREVIEW_CHARS: usize = 200;

/// Print events as they arrive until the sender side is dropped
pub async fn render_events(
    mut rx: UnboundedReceiver<TurnEvent>,
    names: [String; 2],
    icons: [String; 2],
    max_turns: u32,
) {
    let name = |side: Side| match side {
        Side::A => &names[0],
        Side::B => &names[1],
    };
    let icon = |side: Side| match side {
        Side::A => &icons[0],
        Side::B => &icons[1],
    };

    while let Some(event) = rx.recv().await {
        match event {
            TurnEvent::RunStarted { max_turns, first_speaker } => {
                println!(
                    "{} {} vs {} - {} turns, {} opens",
                    "🎙".cyan(),
                    names[0].bold(),
                    names[1].bold(),
                    max_turns,
                    name(first_speaker)
                );
                println!("{}", "═".repeat(60).cyan());
            }
            TurnEvent::TurnStarted { turn, side, speaker } => {
                println!();
                println!(
                    "{} {} {}",
                    icon(side),
                    paint(side, &speaker).bold(),
                    format!("(turn {}/{})", turn, max_turns).dimmed()
                );
            }
            TurnEvent::TextFragment { text, .. } => {
                print!("{}", text);
                let _ = std::io::stdout().flush();
            }
            TurnEvent::ToolCallRequested { call, .. } => print_tool_call(call),
            TurnEvent::ToolResult { tool, result, .. } => print_tool_result(&tool, &result),
            TurnEvent::FollowUpStarted { side, .. } => {
                println!();
                println!("{} {}", paint(side, name(side)).bold(), "(incorporating research):".dimmed());
            }
            TurnEvent::TurnFinalized { .. } => {
                println!();
                println!("{}", "─".repeat(60).dimmed());
            }
            TurnEvent::TurnScored { score } => {
                let marker = if score.fallback { " (default score)" } else { "" };
                println!(
                    "  {} {} scored {:.1}{}",
                    "⚖".magenta(),
                    score.speaker_name,
                    score.total(),
                    marker.yellow()
                );
                if !score.comment.is_empty() {
                    println!("    {}", score.comment.dimmed());
                }
            }
            TurnEvent::RunFinished { turns, verdict } => {
                println!();
                println!("{} {} turns completed", "✓".green(), turns);
                if let Some(verdict) = verdict {
                    print_verdict(&verdict, &names);
                }
            }
        }
    }
}

/// Print workflow events; `phases` is the planned phase order
pub async fn render_strategy(mut rx: UnboundedReceiver<TurnEvent>, phases: Vec<Phase>) {
    let total = phases.len();

    while let Some(event) = rx.recv().await {
        match event {
            TurnEvent::RunStarted { .. } => {
                println!("{} Content strategy - {} phases", "🎬".cyan(), total);
                println!("{}", "═".repeat(60).cyan());
            }
            TurnEvent::TurnStarted { turn, speaker, .. } => {
                let label = phase_label(&phases, turn);
                println!();
                println!(
                    "{} {} {}",
                    label.bold().cyan(),
                    format!("({}/{})", turn, total).dimmed(),
                    speaker.bold()
                );
            }
            TurnEvent::TextFragment { text, .. } => {
                print!("{}", text);
                let _ = std::io::stdout().flush();
            }
            TurnEvent::ToolCallRequested { call, .. } => print_tool_call(call),
            TurnEvent::ToolResult { tool, result, .. } => print_tool_result(&tool, &result),
            TurnEvent::FollowUpStarted { .. } => {
                println!();
                println!("{}", "(incorporating research)".dimmed());
            }
            TurnEvent::TurnFinalized { .. } => {
                println!();
                println!("{}", "─".repeat(60).dimmed());
            }
            TurnEvent::TurnScored { .. } => {}
            TurnEvent::RunFinished { turns, .. } => {
                println!();
                println!("{} {} phases completed", "✓".green(), turns);
            }
        }
    }
}

/// Label of the 1-based `turn` in the planned phase order
fn phase_label(phases: &[Phase], turn: u32) -> &'static str {
    (turn as usize)
        .checked_sub(1)
        .and_then(|i| phases.get(i))
        .map(|p| p.label())
        .unwrap_or("Phase")
}

fn print_tool_call(call: ToolCallRequest) {
    println!();
    println!(
        "  {} Using tool {} {}",
        "🔍".yellow(),
        call.name.green(),
        serde_json::Value::Object(call.args).to_string().dimmed()
    );
}

fn print_tool_result(tool: &str, result: &str) {
    let preview = preview(result);
    if result.starts_with("Error") {
        println!("  {} {}: {}", "✗".red(), tool, preview.red());
    } else {
        println!("  {} {}: {}", "📊".blue(), tool, preview);
    }
}

/// Verdict tables and insights
pub fn print_verdict(verdict: &FinalVerdict, names: &[String; 2]) {
    let label = |outcome: Outcome| match outcome {
        Outcome::SideA => names[0].as_str(),
        Outcome::SideB => names[1].as_str(),
        Outcome::Tie => "Tie",
    };

    println!();
    println!("{}", "🏆 Final Verdict".bold().cyan());
    println!();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("").fg(Color::Cyan),
            Cell::new(&names[0]).fg(Color::Cyan),
            Cell::new(&names[1]).fg(Color::Cyan),
        ]);
    table.add_row(vec![
        Cell::new("Total"),
        Cell::new(format!("{:.1}", verdict.total_a)),
        Cell::new(format!("{:.1}", verdict.total_b)),
    ]);
    println!("{table}");

    let mut categories = Table::new();
    categories
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Category").fg(Color::Cyan),
            Cell::new("Winner").fg(Color::Cyan),
        ]);
    for category in &verdict.categories {
        let winner = Cell::new(label(category.outcome));
        let winner = if category.outcome == Outcome::Tie {
            winner.fg(Color::Yellow)
        } else {
            winner.fg(Color::Green)
        };
        categories.add_row(vec![Cell::new(&category.label), winner]);
    }
    println!("{categories}");
    println!();

    let winner = if verdict.is_tie() {
        format!("Tie (margin {:.1})", verdict.margin).yellow()
    } else {
        format!("{} by {:.1}", label(verdict.winner), verdict.margin).green()
    };
    println!("{} {}", "Winner:".bold(), winner.bold());
    println!("{} {}", "Quality:".bold(), verdict.quality);
    for insight in &verdict.insights {
        println!("  {} {}", "•".cyan(), insight);
    }
    println!();
    println!("{}", verdict.summary);
}

fn paint(side: Side, text: &str) -> ColoredString {
    match side {
        Side::A => text.red(),
        Side::B => text.blue(),
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() <= TOOL_RESULT_PREVIEW_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(TOOL_RESULT_PREVIEW_CHARS).collect();
    format!("{}...", cut)
}
