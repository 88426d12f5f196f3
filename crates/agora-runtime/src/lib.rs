//! # Agora Runtime
//!
//! Turn execution and the orchestration loop for debates and rap battles.
//!
//! - [`TurnExecutor`] runs one side's turn: streaming, tool round-trip, error capture
//! - [`Orchestrator`] alternates sides until the turn budget is spent, judging as it goes
//! - [`EventSink`] carries [`TurnEvent`]s to whatever renders them
//! - [`SessionTracker`] keeps a record of runs
//! - [`StrategyWorkflow`] runs the channel content-strategy phases through the same executor

pub mod event;
pub mod executor;
pub mod orchestrator;
pub mod participant;
pub mod prompts;
pub mod roster;
pub mod session;
pub mod strategy;

pub use event::{EventSink, TurnEvent};
pub use executor::{ExecutorConfig, TurnExecutor, TurnRecord};
pub use orchestrator::{Orchestrator, OrchestratorConfig, RunError, RunReport};
pub use participant::{Contestant, Participant};
pub use prompts::{
    battle_seed, battle_turns, DebateMode, BATTLE_CONTINUATION, BATTLE_TOPICS,
    DEBATE_CONTINUATION, DEFAULT_BATTLE_ROUNDS,
};
pub use roster::{find_rapper, rapper_ids, RapperProfile, ROSTER};
pub use session::{Session, SessionId, SessionInfo, SessionSummary, SessionTracker};
pub use strategy::{
    ChannelBrief, Phase, PhaseOutcome, Specialist, StrategyConfig, StrategyError, StrategyReport,
    StrategyWorkflow, WorkflowStatus, DEFAULT_MAX_STEPS, STRATEGY_CONTINUATION,
};
