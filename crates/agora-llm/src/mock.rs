//! Mock completion model for testing and offline runs

use async_stream::stream;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use agora_core::Role;

use crate::chunk::{ModelChunk, ModelStream, RawToolCall};
use crate::provider::{CompletionModel, CompletionRequest, LlmError};

/// One scripted response
#[derive(Debug, Clone, PartialEq)]
pub enum MockStep {
    /// Stream the text word by word
    Text(String),
    /// Stream the text, then emit the tool calls
    ToolCalls { text: String, calls: Vec<RawToolCall> },
    /// Stream the text, then fail mid-stream
    Interrupt { text: String, reason: String },
    /// Stream the text and the tool calls, then fail before the stream ends
    ToolCallsThenInterrupt {
        text: String,
        calls: Vec<RawToolCall>,
        reason: String,
    },
    /// Refuse to start the stream
    Fail(MockFailure),
}

/// Failure flavour for [`MockStep::Fail`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockFailure {
    MissingCredentials,
    Connection,
}

impl MockStep {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// A mock model that plays back scripted responses.
///
/// Responses cycle, so a two-entry script alternates for the whole run.
/// Every request is recorded for inspection.
#[derive(Debug)]
pub struct MockModel {
    /// Name of this mock
    pub name: String,
    /// Scripted responses (cycles through them); empty means prompt-driven
    steps: Vec<MockStep>,
    /// Current response index
    index: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockModel {
    /// Create a mock that cycles through the given texts
    pub fn new(responses: Vec<String>) -> Self {
        Self::scripted(responses.into_iter().map(MockStep::Text).collect())
    }

    /// Create a mock that cycles through arbitrary steps
    pub fn scripted(steps: Vec<MockStep>) -> Self {
        Self {
            name: "mock".to_string(),
            steps,
            index: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that always returns the same response
    pub fn constant(response: &str) -> Self {
        Self::new(vec![response.to_string()])
    }

    /// Create a mock that responds based on prompt content.
    ///
    /// When the last message carries a JSON template, the mock fills it in
    /// (numbers get a score between 5 and 9, strings and lists get
    /// placeholders). When tools are offered it calls the first one once
    /// per turn. Otherwise it answers in prose.
    pub fn smart() -> Self {
        Self {
            name: "smart-mock".to_string(),
            ..Self::scripted(Vec::new())
        }
    }

    /// Rename the mock
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Every request received so far
    pub fn recorded_requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }

    fn next_step(&self, request: &CompletionRequest) -> MockStep {
        let idx = self.index.fetch_add(1, Ordering::SeqCst);
        if self.steps.is_empty() {
            self.generate_smart_step(request, idx)
        } else {
            self.steps[idx % self.steps.len()].clone()
        }
    }

    fn generate_smart_step(&self, request: &CompletionRequest, idx: usize) -> MockStep {
        let last = request
            .messages
            .last()
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        if let Some(template) = json_template(last) {
            let filled = fill_template(template, request.prompt_text().len() + idx);
            return MockStep::Text(filled.to_string());
        }

        let answered_tool = request.messages.iter().any(|m| m.role == Role::Tool);
        if let Some(tool) = request.tools.first() {
            if !answered_tool {
                return MockStep::ToolCalls {
                    text: "Let me check something first. ".to_string(),
                    calls: vec![RawToolCall::new(
                        format!("mock_call_{}", idx),
                        tool.name,
                        Value::Object(Map::new()),
                    )],
                };
            }
        }

        let topic: String = last.split_whitespace().take(12).collect::<Vec<_>>().join(" ");
        let text = match idx % 3 {
            0 => format!(
                "Let me lay out my position. On the question of \"{}\", the evidence points one way \
                 and I will defend it point by point.",
                topic
            ),
            1 => "My opponent's argument rests on an assumption that does not hold. \
                  Look at the outcomes, not the slogans, and the case falls apart."
                .to_string(),
            _ => "To close this round: the strongest version of my case is still standing, \
                  and nothing said so far has answered it."
                .to_string(),
        };
        MockStep::Text(text)
    }
}

/// The first `{`..last `}` slice of a prompt, when it parses as a JSON object
fn json_template(prompt: &str) -> Option<Value> {
    if !prompt.contains("JSON") {
        return None;
    }
    let start = prompt.find('{')?;
    let end = prompt.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str::<Value>(&prompt[start..=end]) {
        Ok(value @ Value::Object(_)) => Some(value),
        _ => None,
    }
}

fn fill_template(template: Value, seed: usize) -> Value {
    match template {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .enumerate()
                .map(|(i, (key, value))| {
                    let filled = match value {
                        Value::Number(_) => {
                            let tenths = ((seed + i * 7) % 40) as f64;
                            serde_json::json!(5.0 + tenths / 10.0)
                        }
                        Value::Array(_) => serde_json::json!([format!("Solid {}", key.replace('_', " "))]),
                        Value::String(_) => Value::String(format!("Mock {}.", key.replace('_', " "))),
                        other => other,
                    };
                    (key, filled)
                })
                .collect(),
        ),
        other => other,
    }
}

fn word_chunks(text: &str) -> Vec<String> {
    text.split_inclusive(' ').map(str::to_string).collect()
}

#[async_trait]
impl CompletionModel for MockModel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn stream(&self, request: CompletionRequest) -> Result<ModelStream, LlmError> {
        let step = self.next_step(&request);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        let (text, calls, interruption) = match step {
            MockStep::Text(text) => (text, Vec::new(), None),
            MockStep::ToolCalls { text, calls } => (text, calls, None),
            MockStep::Interrupt { text, reason } => (text, Vec::new(), Some(reason)),
            MockStep::ToolCallsThenInterrupt { text, calls, reason } => (text, calls, Some(reason)),
            MockStep::Fail(MockFailure::MissingCredentials) => {
                return Err(LlmError::MissingCredentials {
                    model: self.name.clone(),
                    env_var: "MOCK_API_KEY".to_string(),
                })
            }
            MockStep::Fail(MockFailure::Connection) => {
                return Err(LlmError::ConnectionFailed("mock connection refused".to_string()))
            }
        };

        let chunks = word_chunks(&text);
        Ok(Box::pin(stream! {
            for chunk in chunks {
                yield Ok(ModelChunk::Text(chunk));
            }
            for call in calls {
                yield Ok(ModelChunk::ToolCall(call));
            }
            if let Some(reason) = interruption {
                yield Err(LlmError::StreamInterrupted(reason));
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::Message;
    use futures::StreamExt;

    use crate::tool::ToolDefinition;

    fn request(text: &str) -> CompletionRequest {
        CompletionRequest::new(vec![Message::human(text)])
    }

    #[tokio::test]
    async fn test_scripted_responses_cycle() {
        let mock = MockModel::new(vec!["A1".into(), "B1".into()]);
        assert_eq!(mock.invoke(request("go")).await.unwrap().content, "A1");
        assert_eq!(mock.invoke(request("go")).await.unwrap().content, "B1");
        assert_eq!(mock.invoke(request("go")).await.unwrap().content, "A1");
        assert_eq!(mock.call_count(), 3);
        assert_eq!(mock.recorded_requests().len(), 3);
    }

    #[tokio::test]
    async fn test_text_streams_in_word_chunks() {
        let mock = MockModel::constant("three word answer");
        let chunks: Vec<_> = mock.stream(request("go")).await.unwrap().collect().await;
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].as_ref().unwrap(), &ModelChunk::text("three "));
    }

    #[tokio::test]
    async fn test_interrupt_and_failures() {
        let mock = MockModel::scripted(vec![
            MockStep::Interrupt {
                text: "partial".into(),
                reason: "reset".into(),
            },
            MockStep::Fail(MockFailure::MissingCredentials),
        ]);

        let chunks: Vec<_> = mock.stream(request("go")).await.unwrap().collect().await;
        assert!(matches!(chunks.last(), Some(Err(LlmError::StreamInterrupted(_)))));

        let err = mock.stream(request("go")).await.err().expect("expected stream to fail");
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn test_smart_fills_json_template() {
        let mock = MockModel::smart();
        let prompt = "Respond with JSON only:\n{\"logic\": 0, \"strengths\": [], \"comment\": \"\"}";
        let response = mock.invoke(request(prompt)).await.unwrap();
        let value: Value = serde_json::from_str(&response.content).unwrap();
        let logic = value["logic"].as_f64().unwrap();
        assert!((5.0..=9.0).contains(&logic));
        assert!(value["strengths"].is_array());
        assert!(value["comment"].is_string());
    }

    #[tokio::test]
    async fn test_smart_calls_offered_tool_once() {
        let mock = MockModel::smart();
        let tool = ToolDefinition::new("datetime", "Clock", r#"{"type": "object"}"#);
        let req = request("debate").with_tools(vec![tool]);

        let chunks: Vec<_> = mock.stream(req).await.unwrap().collect().await;
        assert!(chunks
            .iter()
            .any(|c| matches!(c, Ok(ModelChunk::ToolCall(call)) if call.name.as_deref() == Some("datetime"))));

        let follow_up = CompletionRequest::new(vec![
            Message::human("debate"),
            Message::tool_result("mock_call_0", "2025-01-01"),
        ]);
        let response = mock.invoke(follow_up).await.unwrap();
        assert!(!response.content.is_empty());
    }
}
