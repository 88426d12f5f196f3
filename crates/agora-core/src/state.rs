//! Conversation state and the two-sided alternation state machine

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::message::{Message, Role};

/// Errors raised when a run is set up with invalid parameters
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("max_turns must be at least 1")]
    ZeroTurns,
    #[error("seed prompt must not be empty")]
    EmptySeed,
}

/// One of the two contestants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "side_a")]
    A,
    #[serde(rename = "side_b")]
    B,
}

impl Side {
    /// The opposing side
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Stable tag used in logs and exports
    pub fn tag(self) -> &'static str {
        match self {
            Self::A => "side_a",
            Self::B => "side_b",
        }
    }

    /// Array index (A = 0, B = 1)
    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The single mutable artifact threaded through a run.
///
/// `turn_count` only moves forward through [`ConversationState::complete_turn`],
/// which also flips `current_speaker`, so sides strictly alternate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationState {
    /// Append-only transcript, starting with the seed prompt
    pub transcript: Vec<Message>,
    /// Whose turn is next
    pub current_speaker: Side,
    /// Completed turns so far
    pub turn_count: u32,
    /// Turn budget fixed at run start
    pub max_turns: u32,
}

impl ConversationState {
    /// Start a run from a seed prompt.
    ///
    /// Fails fast on parameters that could never produce a valid run.
    pub fn new(seed_prompt: &str, first_speaker: Side, max_turns: u32) -> Result<Self, StateError> {
        if max_turns == 0 {
            return Err(StateError::ZeroTurns);
        }
        if seed_prompt.trim().is_empty() {
            return Err(StateError::EmptySeed);
        }

        Ok(Self {
            transcript: vec![Message::human(seed_prompt)],
            current_speaker: first_speaker,
            turn_count: 0,
            max_turns,
        })
    }

    /// Append a message to the transcript
    pub fn push(&mut self, message: Message) {
        self.transcript.push(message);
    }

    /// Record one finished turn: bump the counter and hand over to the other side
    pub fn complete_turn(&mut self) {
        debug_assert!(self.turn_count < self.max_turns, "turn budget exceeded");
        self.turn_count += 1;
        self.current_speaker = self.current_speaker.other();
    }

    /// True once the turn budget is spent
    pub fn is_finished(&self) -> bool {
        self.turn_count >= self.max_turns
    }

    /// Turns left in the budget
    pub fn remaining_turns(&self) -> u32 {
        self.max_turns.saturating_sub(self.turn_count)
    }

    /// True while only the seed prompt exists
    pub fn is_opening(&self) -> bool {
        self.transcript.len() == 1 && self.transcript[0].role == Role::Human
    }

    /// Assistant messages in transcript order (tool-call carriers excluded)
    pub fn turn_messages(&self) -> impl Iterator<Item = &Message> {
        self.transcript
            .iter()
            .filter(|m| m.role == Role::Assistant && m.tool_calls.is_empty())
    }

    /// The most recent finalized assistant message
    pub fn last_turn_message(&self) -> Option<&Message> {
        self.transcript
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant && m.tool_calls.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_parameters() {
        assert_eq!(
            ConversationState::new("topic", Side::A, 0).unwrap_err(),
            StateError::ZeroTurns
        );
        assert_eq!(
            ConversationState::new("   ", Side::A, 4).unwrap_err(),
            StateError::EmptySeed
        );
    }

    #[test]
    fn test_turns_alternate() {
        let mut state = ConversationState::new("topic", Side::A, 3).unwrap();
        assert!(state.is_opening());

        let mut speakers = Vec::new();
        while !state.is_finished() {
            speakers.push(state.current_speaker);
            state.push(Message::assistant(state.current_speaker, "turn"));
            state.complete_turn();
        }

        assert_eq!(speakers, vec![Side::A, Side::B, Side::A]);
        assert_eq!(state.turn_count, 3);
        assert_eq!(state.remaining_turns(), 0);
        assert!(!state.is_opening());
    }

    #[test]
    fn test_last_turn_message_skips_tool_carriers() {
        use crate::message::ToolCallRequest;

        let mut state = ConversationState::new("topic", Side::B, 2).unwrap();
        state.push(Message::assistant(Side::B, "final"));
        let call = ToolCallRequest::new("call_1", "datetime", Default::default());
        state.push(Message::assistant_with_tools(Side::A, "checking", vec![call]));
        state.push(Message::tool_result("call_1", "2025-01-01"));

        assert_eq!(state.last_turn_message().map(|m| m.content.as_str()), Some("final"));
        assert_eq!(state.turn_messages().count(), 1);
    }

    #[test]
    fn test_side_helpers() {
        assert_eq!(Side::A.other(), Side::B);
        assert_eq!(Side::B.index(), 1);
        assert_eq!(Side::A.to_string(), "side_a");
        assert_eq!(serde_json::to_value(Side::B).unwrap(), "side_b");
    }
}
