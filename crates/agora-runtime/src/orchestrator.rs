//! Orchestrator - the bounded, strictly alternating turn loop

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use agora_core::{ConversationState, FinalVerdict, Side, StateError, TurnScore};
use agora_judge::{context_line, Judge};
use agora_llm::ToolDispatcher;

use crate::event::{EventSink, TurnEvent};
use crate::executor::{ExecutorConfig, TurnExecutor, TurnRecord};
use crate::participant::Contestant;

/// Setup problems detected before the first turn
#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid run parameters: {0}")]
    InvalidParameters(#[from] StateError),
    #[error("tools were enabled but the tool registry is empty")]
    NoTools,
}

/// Configuration for the orchestrator
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Side that speaks first
    pub first_speaker: Side,
    /// Executor configuration
    pub executor: ExecutorConfig,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            first_speaker: Side::A,
            executor: ExecutorConfig::default(),
        }
    }
}

/// Everything a finished run produced
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub state: ConversationState,
    pub turns: Vec<TurnRecord>,
    pub scores: Vec<TurnScore>,
    pub verdict: Option<FinalVerdict>,
}

impl RunReport {
    /// Terminal assistant messages in order
    pub fn turn_texts(&self) -> Vec<&str> {
        self.state.turn_messages().map(|m| m.content.as_str()).collect()
    }
}

/// Runs contests between two fixed contestants
#[derive(Debug)]
pub struct Orchestrator {
    pub config: OrchestratorConfig,
    side_a: Contestant,
    side_b: Contestant,
    executor: TurnExecutor,
    judge: Option<Judge>,
    events: EventSink,
}

impl Orchestrator {
    pub fn new(
        side_a: Contestant,
        side_b: Contestant,
        dispatcher: ToolDispatcher,
        config: OrchestratorConfig,
    ) -> Self {
        let executor = TurnExecutor::new(dispatcher, config.executor.clone());
        Self {
            config,
            side_a,
            side_b,
            executor,
            judge: None,
            events: EventSink::disabled(),
        }
    }

    /// Score every turn with this judge; the side names are taken from the contestants
    pub fn with_judge(mut self, judge: Judge) -> Self {
        self.judge = Some(judge.with_side_names(self.side_a.name(), self.side_b.name()));
        self
    }

    /// Send presentation events to this sink
    pub fn with_events(mut self, events: EventSink) -> Self {
        self.executor = self.executor.with_events(events.clone());
        self.events = events;
        self
    }

    pub fn contestant(&self, side: Side) -> &Contestant {
        match side {
            Side::A => &self.side_a,
            Side::B => &self.side_b,
        }
    }

    pub fn judge(&self) -> Option<&Judge> {
        self.judge.as_ref()
    }

    /// Run a full contest.
    ///
    /// Fails only on invalid setup. Once the loop starts every turn runs,
    /// model and judge failures included, until `max_turns` is reached.
    /// Each call starts from a clean judge, so the verdict covers this run only.
    pub async fn run(
        &mut self,
        seed_prompt: &str,
        max_turns: u32,
        tools_enabled: bool,
    ) -> Result<RunReport, RunError> {
        let mut state = ConversationState::new(seed_prompt, self.config.first_speaker, max_turns)?;
        if tools_enabled && self.executor.dispatcher().registry().is_empty() {
            return Err(RunError::NoTools);
        }
        if let Some(judge) = self.judge.as_mut() {
            judge.reset();
        }

        info!(
            max_turns,
            tools_enabled,
            side_a = %self.side_a.name(),
            side_b = %self.side_b.name(),
            judged = self.judge.is_some(),
            "Run started"
        );
        self.events.emit(TurnEvent::RunStarted {
            max_turns,
            first_speaker: state.current_speaker,
        });

        let mut turns = Vec::with_capacity(max_turns as usize);
        let mut scores = Vec::new();
        let mut context: Vec<String> = Vec::new();

        while !state.is_finished() {
            let contestant = match state.current_speaker {
                Side::A => &self.side_a,
                Side::B => &self.side_b,
            };
            let record = self.executor.run_turn(&mut state, contestant, tools_enabled).await;

            if let Some(judge) = self.judge.as_mut() {
                let score = judge
                    .evaluate_turn(
                        &record.content,
                        record.turn_number,
                        record.side,
                        &record.speaker_name,
                        &context,
                    )
                    .await;
                self.events.emit(TurnEvent::TurnScored { score: score.clone() });
                scores.push(score);
            }

            context.push(context_line(&record.speaker_name, &record.content));
            turns.push(record);
        }

        let verdict = self.judge.as_mut().map(Judge::finalize);
        if verdict.as_ref().is_some_and(|v| v.turns_scored != turns.len()) {
            warn!(turns = turns.len(), "Judge scored a different number of turns than were run");
        }

        info!(turns = state.turn_count, "Run finished");
        self.events.emit(TurnEvent::RunFinished {
            turns: state.turn_count,
            verdict: verdict.clone(),
        });

        Ok(RunReport {
            state,
            turns,
            scores,
            verdict,
        })
    }
}
