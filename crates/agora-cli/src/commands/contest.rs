//! Shared setup and execution for the debate and battle commands

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::debug;

use agora_judge::{Judge, Rubric};
use agora_llm::{tools::builtin_registry, AgoraConfig, ModelCatalog, ToolDispatcher};
use agora_runtime::{
    Contestant, EventSink, ExecutorConfig, Orchestrator, OrchestratorConfig, Participant,
    RunReport, Session, SessionInfo, SessionTracker,
};

use crate::render;
use crate::{print_info, print_warning};

/// Options shared by every contest command
#[derive(Args, Debug, Clone)]
pub struct ContestOptions {
    /// Model for side A (overrides AGORA_SIDE_A_MODEL)
    #[arg(long = "model-a")]
    pub model_a: Option<String>,

    /// Model for side B (overrides AGORA_SIDE_B_MODEL)
    #[arg(long = "model-b")]
    pub model_b: Option<String>,

    /// Model used by the judge (overrides AGORA_JUDGE_MODEL)
    #[arg(long)]
    pub judge_model: Option<String>,

    /// Offer the built-in tools to both sides
    #[arg(long)]
    pub tools: bool,

    /// Do not score turns
    #[arg(long)]
    pub no_judge: bool,

    /// Minimum point difference for a non-tie verdict
    #[arg(long)]
    pub tie_threshold: Option<f64>,

    /// Print the full run report as JSON instead of live output
    #[arg(long)]
    pub json: bool,
}

impl ContestOptions {
    /// Environment configuration with command-line overrides applied
    pub fn config(&self, catalog: &ModelCatalog) -> Result<AgoraConfig> {
        let mut config = AgoraConfig::from_env().context("Invalid AGORA_* environment")?;
        if let Some(model) = &self.model_a {
            config.side_a_model = model.clone();
        }
        if let Some(model) = &self.model_b {
            config.side_b_model = model.clone();
        }
        if let Some(model) = &self.judge_model {
            config.judge_model = model.clone();
        }
        config.tools_enabled |= self.tools;
        if self.no_judge {
            config.judge_enabled = false;
        }
        config
            .validate(catalog)
            .context("Run 'agora models' to see the configured models")?;
        Ok(config)
    }
}

/// A fully described contest, ready to run
pub struct Contest {
    /// `debate`, `discussion`, `policy_analysis` or `battle`
    pub mode: String,
    pub topic: String,
    pub seed: String,
    /// Turn budget given on the command line
    pub turns: Option<u32>,
    /// Budget used when neither the command line nor AGORA_MAX_TURNS sets one
    pub default_turns: u32,
    pub side_a: Participant,
    pub side_b: Participant,
    pub rubric: Rubric,
    pub continuation: String,
}

/// Run a contest and print it live, or as JSON at the end
pub async fn execute(contest: Contest, options: &ContestOptions) -> Result<()> {
    let catalog = ModelCatalog::new();
    let config = options.config(&catalog)?;
    let max_turns = config.turns_or(contest.turns, contest.default_turns);

    let rubric = match options.tie_threshold {
        Some(threshold) => contest.rubric.with_tie_threshold(threshold),
        None => contest.rubric,
    };

    let side_a = Contestant::from_provider(contest.side_a.with_model(&config.side_a_model), &catalog);
    let side_b = Contestant::from_provider(contest.side_b.with_model(&config.side_b_model), &catalog);
    for contestant in [&side_a, &side_b] {
        if let Err(reason) = contestant.model() {
            print_warning(&format!(
                "{}: {} (its turns will record the error)",
                contestant.name(),
                reason
            ));
        }
    }
    let names = [side_a.name().to_string(), side_b.name().to_string()];
    let icons = [side_a.participant.icon.clone(), side_b.participant.icon.clone()];

    let orchestrator_config = OrchestratorConfig {
        executor: ExecutorConfig {
            continuation: contest.continuation,
            ..ExecutorConfig::default()
        },
        ..OrchestratorConfig::default()
    };
    let mut orchestrator = Orchestrator::new(
        side_a,
        side_b,
        ToolDispatcher::new(builtin_registry()),
        orchestrator_config,
    );

    if config.judge_enabled {
        let judge = Judge::from_provider(rubric, &catalog, &config.judge_model);
        if let Some(reason) = judge.unavailable_reason() {
            print_warning(&format!("Judge unavailable, default scores will be used: {}", reason));
        }
        orchestrator = orchestrator.with_judge(judge);
    }

    let renderer = if options.json {
        None
    } else {
        let (sink, rx) = EventSink::channel();
        orchestrator = orchestrator.with_events(sink);
        Some(tokio::spawn(render::render_events(rx, names, icons, max_turns)))
    };

    debug!(
        mode = %contest.mode,
        max_turns,
        side_a = %config.side_a_model,
        side_b = %config.side_b_model,
        judge = config.judge_enabled,
        "Contest configured"
    );
    let mut tracker = SessionTracker::new();
    tracker.start(SessionInfo {
        topic: contest.topic.clone(),
        mode: contest.mode.clone(),
        model_a: config.side_a_model.clone(),
        model_b: config.side_b_model.clone(),
        tools_enabled: config.tools_enabled,
        max_turns,
    });

    let outcome = tokio::select! {
        result = orchestrator.run(&contest.seed, max_turns, config.tools_enabled) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };

    // Dropping the orchestrator closes the event channel so the renderer can finish
    drop(orchestrator);
    if let Some(handle) = renderer {
        let _ = handle.await;
    }

    let report = match outcome {
        Some(result) => result.context("Contest could not start")?,
        None => {
            print_warning("Interrupted, the turn in progress was discarded");
            return Ok(());
        }
    };

    let session = tracker.end(report.state.turn_count).cloned();
    if options.json {
        println!("{}", json_report(&report, session.as_ref())?);
    } else if let Some(session) = session {
        print_info(&format!(
            "Session {} finished: {}/{} turns in {:.1}s",
            session.id,
            session.turns_completed,
            session.info.max_turns,
            session.duration_secs().unwrap_or_default()
        ));
    }
    Ok(())
}

/// `--json` output: the run report with the closed session alongside
#[derive(Serialize)]
struct JsonReport<'a> {
    session: Option<&'a Session>,
    #[serde(flatten)]
    report: &'a RunReport,
}

fn json_report(report: &RunReport, session: Option<&Session>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonReport { session, report })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::{ConversationState, Message, Side};

    #[test]
    fn test_json_report_carries_closed_session() {
        let mut state = ConversationState::new("Debate: remote work", Side::A, 2).unwrap();
        state.push(Message::assistant(Side::A, "Opening."));
        state.complete_turn();
        let report = RunReport {
            state,
            turns: Vec::new(),
            scores: Vec::new(),
            verdict: None,
        };

        let mut tracker = SessionTracker::new();
        tracker.start(SessionInfo {
            topic: "remote work".into(),
            mode: "debate".into(),
            model_a: "mock".into(),
            model_b: "mock".into(),
            tools_enabled: false,
            max_turns: 2,
        });
        let session = tracker.end(report.state.turn_count).cloned();
        assert!(tracker.current().is_none());

        let json: serde_json::Value =
            serde_json::from_str(&json_report(&report, session.as_ref()).unwrap()).unwrap();
        assert_eq!(json["session"]["turns_completed"], 1);
        assert!(!json["session"]["ended_at"].is_null());
        assert_eq!(json["state"]["turn_count"], 1);
        assert!(json["verdict"].is_null());
    }
}
