//! # Agora Core
//!
//! Core types for Agora turn-based contests:
//! - [`Message`] - One transcript entry (seed, assistant turn, tool result)
//! - [`ToolCallRequest`] - Canonical model-requested tool invocation
//! - [`ConversationState`] - Transcript plus the alternation state machine
//! - [`TurnScore`] / [`FinalVerdict`] - Judge output for turns and whole runs
//!
//! ## Quick Start
//!
//! ```rust
//! use agora_core::{ConversationState, Message, Side};
//!
//! let mut state = ConversationState::new("Debate: remote work", Side::A, 2).unwrap();
//! state.push(Message::assistant(Side::A, "Opening statement"));
//! state.complete_turn();
//!
//! assert_eq!(state.turn_count, 1);
//! assert_eq!(state.current_speaker, Side::B);
//! ```

pub mod message;
pub mod score;
pub mod state;

pub use message::{Message, Role, ToolCallRequest};
pub use score::{
    CategoryWinner, FinalVerdict, Outcome, TurnScore, CRITERIA_COUNT, MAX_CRITERION_SCORE,
    MAX_TURN_TOTAL,
};
pub use state::{ConversationState, Side, StateError};
