//! Turn executor - runs one side's full response, including any tool round-trip

use futures::StreamExt;
use serde::Serialize;
use tracing::{debug, info, warn};

use agora_core::{ConversationState, Message, Side, ToolCallRequest};
use agora_llm::{
    CompletionModel, CompletionRequest, LlmError, ModelChunk, RawToolCall, ToolDefinition,
    ToolDispatcher,
};

use crate::event::{EventSink, TurnEvent};
use crate::participant::Contestant;
use crate::prompts::DEBATE_CONTINUATION;

/// Configuration for turn execution
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Sampling temperature for contestant calls
    pub temperature: f32,
    /// Instruction added after the persona on non-opening turns
    pub continuation: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            continuation: DEBATE_CONTINUATION.to_string(),
        }
    }
}

/// What one executed turn produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnRecord {
    /// 1-based turn number
    pub turn_number: u32,
    pub side: Side,
    pub speaker_name: String,
    /// Content of the turn's terminal assistant message
    pub content: String,
    /// Tool calls dispatched during the turn
    pub tool_calls: usize,
    /// True when the turn ended in an error message
    pub failed: bool,
}

/// Text and tool calls collected from one streamed response
#[derive(Debug, Default)]
struct Streamed {
    text: String,
    calls: Vec<RawToolCall>,
    interrupted: bool,
}

/// Runs contestant turns against a shared tool dispatcher
#[derive(Debug, Clone)]
pub struct TurnExecutor {
    pub config: ExecutorConfig,
    dispatcher: ToolDispatcher,
    events: EventSink,
}

impl TurnExecutor {
    pub fn new(dispatcher: ToolDispatcher, config: ExecutorConfig) -> Self {
        Self {
            config,
            dispatcher,
            events: EventSink::disabled(),
        }
    }

    /// Send presentation events to this sink
    pub fn with_events(mut self, events: EventSink) -> Self {
        self.events = events;
        self
    }

    pub fn dispatcher(&self) -> &ToolDispatcher {
        &self.dispatcher
    }

    /// Run exactly one turn for the side whose turn it is.
    ///
    /// Always appends a terminal assistant message and completes the turn,
    /// whether the model answered, failed to start, or broke off mid-stream.
    pub async fn run_turn(
        &self,
        state: &mut ConversationState,
        contestant: &Contestant,
        tools_enabled: bool,
    ) -> TurnRecord {
        let turn = state.turn_count + 1;
        let side = state.current_speaker;
        let speaker = contestant.name().to_string();

        self.events.emit(TurnEvent::TurnStarted {
            turn,
            side,
            speaker: speaker.clone(),
        });

        let (content, tool_calls, failed) = match contestant.model() {
            Ok(model) => {
                self.respond(state, contestant, model.as_ref(), tools_enabled, turn, side)
                    .await
            }
            Err(reason) => {
                warn!(turn, side = %side, reason, "Contestant has no model");
                (format!("Error: {}", reason), 0, true)
            }
        };

        state.push(Message::assistant(side, content.clone()));
        state.complete_turn();

        info!(turn, side = %side, speaker = %speaker, chars = content.len(), tool_calls, failed, "Turn completed");
        self.events.emit(TurnEvent::TurnFinalized {
            turn,
            side,
            speaker: speaker.clone(),
            content: content.clone(),
        });

        TurnRecord {
            turn_number: turn,
            side,
            speaker_name: speaker,
            content,
            tool_calls,
            failed,
        }
    }

    /// Produce the terminal text of a turn, running tools in between if asked to
    async fn respond(
        &self,
        state: &mut ConversationState,
        contestant: &Contestant,
        model: &dyn CompletionModel,
        tools_enabled: bool,
        turn: u32,
        side: Side,
    ) -> (String, usize, bool) {
        let tools = if tools_enabled {
            self.dispatcher.registry().definitions()
        } else {
            Vec::new()
        };
        let persona = contestant.participant.persona_text(&tools);

        let request = self.request(state, &persona, tools);
        let first = match self.stream(model, request, turn, side).await {
            Ok(streamed) => streamed,
            Err(e) => {
                warn!(turn, side = %side, error = %e, "Model call failed");
                return (format!("Error occurred during response generation: {}", e), 0, true);
            }
        };

        let interrupted = first.interrupted;
        let calls = normalize_calls(first.calls, turn);
        if calls.is_empty() {
            return (first.text, 0, interrupted);
        }
        if !tools_enabled {
            debug!(turn, count = calls.len(), "Ignoring tool calls, tools are disabled");
            return (first.text, 0, interrupted);
        }

        state.push(Message::assistant_with_tools(side, first.text, calls.clone()));
        for call in &calls {
            self.events.emit(TurnEvent::ToolCallRequested {
                turn,
                side,
                call: call.clone(),
            });
            let result = self.dispatcher.execute(call).await;
            self.events.emit(TurnEvent::ToolResult {
                turn,
                call_id: call.id.clone(),
                tool: call.name.clone(),
                result: result.clone(),
            });
            state.push(Message::tool_result(call.id.clone(), result));
        }

        self.events.emit(TurnEvent::FollowUpStarted { turn, side });
        let request = self.request(state, &persona, Vec::new());
        match self.stream(model, request, turn, side).await {
            Ok(follow_up) => {
                if !follow_up.calls.is_empty() {
                    warn!(turn, count = follow_up.calls.len(), "Ignoring tool calls in follow-up response");
                }
                (follow_up.text, calls.len(), interrupted || follow_up.interrupted)
            }
            Err(e) => {
                warn!(turn, side = %side, error = %e, "Follow-up call failed");
                (format!("Error occurred during final response: {}", e), calls.len(), true)
            }
        }
    }

    /// Transcript with the persona in front.
    ///
    /// On the opening turn the persona is merged into the seed prompt;
    /// afterwards it becomes a leading context message.
    fn request(&self, state: &ConversationState, persona: &str, tools: Vec<ToolDefinition>) -> CompletionRequest {
        let mut messages = state.transcript.clone();
        if state.is_opening() {
            if let Some(seed) = messages.first_mut() {
                *seed = Message::human(format!("{}\n\n{}", persona, seed.content));
            }
        } else {
            messages.insert(
                0,
                Message::human(format!("{}\n\n{}", persona, self.config.continuation)),
            );
        }

        CompletionRequest::new(messages)
            .with_tools(tools)
            .with_temperature(self.config.temperature)
    }

    /// Consume a response stream to the end.
    ///
    /// A mid-stream error keeps the text so far and appends an error note.
    async fn stream(
        &self,
        model: &dyn CompletionModel,
        request: CompletionRequest,
        turn: u32,
        side: Side,
    ) -> Result<Streamed, LlmError> {
        let mut stream = model.stream(request).await?;
        let mut streamed = Streamed::default();

        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(ModelChunk::Text(text)) => {
                    if text.is_empty() {
                        continue;
                    }
                    streamed.text.push_str(&text);
                    self.events.emit(TurnEvent::TextFragment { turn, side, text });
                }
                Ok(ModelChunk::ToolCall(call)) => streamed.calls.push(call),
                Err(e) => {
                    warn!(turn, side = %side, error = %e, "Stream interrupted");
                    let note = format!("\n\n[Error during streaming: {}]", e);
                    streamed.text.push_str(&note);
                    self.events.emit(TurnEvent::TextFragment { turn, side, text: note });
                    streamed.interrupted = true;
                    break;
                }
            }
        }

        Ok(streamed)
    }
}

/// Canonical tool calls in arrival order; malformed ones are dropped
fn normalize_calls(raw: Vec<RawToolCall>, turn: u32) -> Vec<ToolCallRequest> {
    raw.into_iter()
        .filter_map(|call| match call.normalize() {
            Ok(request) => Some(request),
            Err(e) => {
                warn!(turn, error = %e, "Skipping malformed tool call");
                None
            }
        })
        .collect()
}
