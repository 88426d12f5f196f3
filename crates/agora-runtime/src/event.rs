//! Presentation events
//!
//! The executor and the loop describe what happens as [`TurnEvent`]s sent
//! through an [`EventSink`]. Rendering lives entirely on the receiving side;
//! a disabled sink or a dropped receiver changes nothing in the run.

use serde::Serialize;
use tokio::sync::mpsc;

use agora_core::{FinalVerdict, Side, ToolCallRequest, TurnScore};

/// Something a presentation layer may want to show
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TurnEvent {
    RunStarted {
        max_turns: u32,
        first_speaker: Side,
    },
    TurnStarted {
        turn: u32,
        side: Side,
        speaker: String,
    },
    /// A streamed piece of the current turn's text
    TextFragment {
        turn: u32,
        side: Side,
        text: String,
    },
    ToolCallRequested {
        turn: u32,
        side: Side,
        call: ToolCallRequest,
    },
    ToolResult {
        turn: u32,
        call_id: String,
        tool: String,
        result: String,
    },
    /// The model is answering again with tool results in view
    FollowUpStarted {
        turn: u32,
        side: Side,
    },
    TurnFinalized {
        turn: u32,
        side: Side,
        speaker: String,
        content: String,
    },
    TurnScored {
        score: TurnScore,
    },
    RunFinished {
        turns: u32,
        verdict: Option<FinalVerdict>,
    },
}

/// Fire-and-forget sender for [`TurnEvent`]s
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    tx: Option<mpsc::UnboundedSender<TurnEvent>>,
}

impl EventSink {
    /// A sink that drops everything
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    /// A connected sink and the receiver to render from
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TurnEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    pub fn is_enabled(&self) -> bool {
        self.tx.as_ref().is_some_and(|tx| !tx.is_closed())
    }

    /// Send an event; a missing or closed receiver is ignored
    pub fn emit(&self, event: TurnEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }
}
