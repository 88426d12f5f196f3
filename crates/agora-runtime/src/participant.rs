//! Contest participants
//!
//! A [`Participant`] is immutable configuration: who speaks, in what voice,
//! on which model. A [`Contestant`] pairs it with the resolved model.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use agora_llm::{CompletionModel, ModelProvider, ToolDefinition};

const PROGRESSIVE_PERSONA: &str = "You are a progressive political commentator in a structured debate. \
Your perspective puts weight on social justice and equal rights, climate action, reducing inequality \
through progressive taxation and a strong safety net, workers' rights, universal access to healthcare \
and education, international cooperation, and evidence-based policy.

Debate instructions:
- Engage directly with the specific points your opponent just made
- Answer conservative arguments with concrete counter-arguments
- Back your claims with examples, statistics and evidence
- Build on earlier points so your case stays coherent
- Be passionate but respectful, and move the debate forward every turn";

const CONSERVATIVE_PERSONA: &str = "You are a conservative political commentator in a structured debate. \
Your perspective puts weight on individual liberty and limited government, free markets, fiscal \
responsibility, the rule of law and constitutional principles, strong national defense, local \
governance, property rights, and equal opportunity rather than equal outcomes.

Debate instructions:
- Engage directly with the specific points your opponent just made
- Answer progressive arguments with concrete counter-arguments
- Back your claims with examples, statistics and evidence
- Build on earlier points so your case stays coherent
- Be principled but respectful, and move the debate forward every turn";

/// One side of a contest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Display name, also used in judge context lines
    pub name: String,
    /// Short marker shown next to the name
    pub icon: String,
    /// Fixed instructional text defining the voice and stance
    pub persona: String,
    /// Catalog name of the model that speaks for this side
    pub model: String,
}

impl Participant {
    pub fn new(
        name: impl Into<String>,
        icon: impl Into<String>,
        persona: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            persona: persona.into(),
            model: model.into(),
        }
    }

    /// The progressive debater
    pub fn progressive(model: impl Into<String>) -> Self {
        Self::new("Progressive", "(L)", PROGRESSIVE_PERSONA, model)
    }

    /// The conservative debater
    pub fn conservative(model: impl Into<String>) -> Self {
        Self::new("Conservative", "(R)", CONSERVATIVE_PERSONA, model)
    }

    /// Replace the persona text
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }

    /// Speak through a different catalog model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Persona text for one turn, with a tool briefing when tools are offered
    pub fn persona_text(&self, tools: &[ToolDefinition]) -> String {
        if tools.is_empty() {
            return self.persona.clone();
        }

        let listing = tools
            .iter()
            .map(|t| format!("- {}: {}", t.name, t.description))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "{}\n\nYou have access to the following tools to support your arguments with factual \
             information:\n{}\n\nUse these tools when you need current information, statistics or \
             evidence. Always cite your sources when using tool results.",
            self.persona, listing
        )
    }
}

/// A participant together with its model, or the reason it has none
#[derive(Clone)]
pub struct Contestant {
    pub participant: Participant,
    model: Result<Arc<dyn CompletionModel>, String>,
}

impl Contestant {
    /// Pair a participant with an already-built model
    pub fn new(participant: Participant, model: Arc<dyn CompletionModel>) -> Self {
        Self {
            participant,
            model: Ok(model),
        }
    }

    /// A participant whose model could not be built
    pub fn unavailable(participant: Participant, reason: impl Into<String>) -> Self {
        Self {
            participant,
            model: Err(reason.into()),
        }
    }

    /// Resolve the participant's model through a provider.
    ///
    /// A failure is not fatal: it is kept and every turn of this side
    /// becomes an error message.
    pub fn from_provider(participant: Participant, provider: &dyn ModelProvider) -> Self {
        let model = provider.create(&participant.model).map_err(|e| {
            warn!(participant = %participant.name, model = %participant.model, error = %e, "Model unavailable");
            e.to_string()
        });
        Self { participant, model }
    }

    pub fn name(&self) -> &str {
        &self.participant.name
    }

    /// The model, or why there is none
    pub fn model(&self) -> Result<&Arc<dyn CompletionModel>, &str> {
        self.model.as_ref().map_err(String::as_str)
    }
}

impl std::fmt::Debug for Contestant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Contestant")
            .field("name", &self.participant.name)
            .field("model", &self.model.as_ref().map(|m| m.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_llm::{DateTimeTool, ModelCatalog, Tool};

    #[test]
    fn test_persona_without_tools_is_unchanged() {
        let p = Participant::progressive("mock");
        assert_eq!(p.persona_text(&[]), p.persona);
    }

    #[test]
    fn test_persona_lists_tools() {
        let p = Participant::conservative("mock");
        let text = p.persona_text(&[DateTimeTool::new().definition().clone()]);
        assert!(text.starts_with(&p.persona));
        assert!(text.contains("- datetime:"));
        assert!(text.contains("cite your sources"));
    }

    #[test]
    fn test_with_model_keeps_voice() {
        let p = Participant::progressive("mock").with_model("gemini-pro");
        assert_eq!(p.model, "gemini-pro");
        assert_eq!(p.name, "Progressive");
    }

    #[test]
    fn test_contestant_keeps_creation_failure() {
        let catalog = ModelCatalog::new();
        let err = catalog.create_with("openai-gpt4o", |_: &str| None).unwrap_err();
        let contestant = Contestant::unavailable(Participant::progressive("openai-gpt4o"), err.to_string());
        assert!(contestant.model().unwrap_err().contains("OPENAI_API_KEY"));

        let ok = Contestant::from_provider(Participant::conservative("mock"), &catalog);
        assert_eq!(ok.model().unwrap().name(), "mock");
    }
}
