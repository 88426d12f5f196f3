//! Debate command - Two political commentators argue a topic
//!
//! Usage:
//! ```bash
//! agora debate "Universal basic income"
//! agora debate "Carbon tax" --mode policy --turns 6 --tools
//! agora debate "Remote work" --model-a mock --model-b mock --json
//! ```

use anyhow::Result;
use clap::Args;

use agora_judge::Rubric;
use agora_runtime::{DebateMode, Participant, DEBATE_CONTINUATION};

use super::contest::{self, Contest, ContestOptions};

/// Arguments for the debate command
#[derive(Args)]
pub struct DebateArgs {
    /// Debate topic
    topic: String,

    /// Conversation style: debate, discussion or policy
    #[arg(short, long, default_value = "debate")]
    mode: DebateMode,

    /// Turn budget across both sides (default: AGORA_MAX_TURNS, else the mode's default)
    #[arg(short, long)]
    turns: Option<u32>,

    #[command(flatten)]
    options: ContestOptions,
}

/// Run the debate command
pub async fn run(args: DebateArgs) -> Result<()> {
    let contest = Contest {
        mode: args.mode.label().to_string(),
        seed: args.mode.seed(&args.topic),
        topic: args.topic,
        turns: args.turns,
        default_turns: args.mode.default_turns(),
        // Models are filled in from the resolved configuration
        side_a: Participant::progressive(""),
        side_b: Participant::conservative(""),
        rubric: Rubric::debate(),
        continuation: DEBATE_CONTINUATION.to_string(),
    };

    contest::execute(contest, &args.options).await
}
