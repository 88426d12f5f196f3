//! Per-turn evaluator and score owner

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use agora_core::{FinalVerdict, Side, TurnScore, CRITERIA_COUNT};
use agora_llm::{CompletionModel, CompletionRequest, ModelProvider};

use crate::evaluation::{build_prompt, parse_evaluation};
use crate::rubric::{Rubric, FALLBACK_CRITERION_SCORE};
use crate::verdict::{aggregate, SideNames};

/// Temperature used for judge calls; lower than debaters for steadier scoring
pub const JUDGE_TEMPERATURE: f32 = 0.3;

/// All recorded scores plus the verdict, for export
#[derive(Debug, Clone, Serialize)]
pub struct Scoreboard {
    pub scores: Vec<TurnScore>,
    pub verdict: Option<FinalVerdict>,
}

/// Scores every turn against a [`Rubric`] and aggregates the verdict.
///
/// Every call to [`Judge::evaluate_turn`] records exactly one
/// [`TurnScore`]. When the model is missing, fails, or answers with
/// something that does not parse, the score is the rubric's fallback.
pub struct Judge {
    rubric: Rubric,
    model: Option<Arc<dyn CompletionModel>>,
    unavailable: Option<String>,
    names: SideNames,
    scores: Vec<TurnScore>,
    verdict: Option<FinalVerdict>,
}

impl Judge {
    /// Judge backed by a model
    pub fn new(rubric: Rubric, model: Arc<dyn CompletionModel>) -> Self {
        Self {
            rubric,
            model: Some(model),
            unavailable: None,
            names: SideNames::default(),
            scores: Vec::new(),
            verdict: None,
        }
    }

    /// Judge whose model is created from a provider.
    ///
    /// A creation failure is kept and every turn gets the fallback score.
    pub fn from_provider(rubric: Rubric, provider: &dyn ModelProvider, model_name: &str) -> Self {
        match provider.create(model_name) {
            Ok(model) => Self::new(rubric, model),
            Err(e) => {
                warn!(model = model_name, error = %e, "Judge model unavailable, fallback scoring will be used");
                Self {
                    rubric,
                    model: None,
                    unavailable: Some(e.to_string()),
                    names: SideNames::default(),
                    scores: Vec::new(),
                    verdict: None,
                }
            }
        }
    }

    /// Display names used in the verdict text
    pub fn with_side_names(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.names = SideNames::new(a, b);
        self
    }

    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    /// Name of the backing model, if any
    pub fn model_name(&self) -> Option<&str> {
        self.model.as_deref().map(|m| m.name())
    }

    /// Why the judge has no model, if it has none
    pub fn unavailable_reason(&self) -> Option<&str> {
        self.unavailable.as_deref()
    }

    /// Scores recorded so far, in evaluation order
    pub fn scores(&self) -> &[TurnScore] {
        &self.scores
    }

    /// Verdict from the last [`Judge::finalize`] call
    pub fn verdict(&self) -> Option<&FinalVerdict> {
        self.verdict.as_ref()
    }

    /// Score one finished turn and record the result
    pub async fn evaluate_turn(
        &mut self,
        text: &str,
        turn_number: u32,
        speaker: Side,
        speaker_name: &str,
        recent_context: &[String],
    ) -> TurnScore {
        let score = match self.score_with_model(text, turn_number, speaker, speaker_name, recent_context).await {
            Ok(score) => score,
            Err(reason) => {
                warn!(turn = turn_number, side = %speaker, reason = %reason, "Judge fallback applied");
                self.fallback_score(turn_number, speaker, speaker_name)
            }
        };

        info!(
            turn = turn_number,
            side = %speaker,
            total = score.total(),
            fallback = score.fallback,
            "Turn scored"
        );
        self.scores.push(score.clone());
        score
    }

    async fn score_with_model(
        &self,
        text: &str,
        turn_number: u32,
        speaker: Side,
        speaker_name: &str,
        recent_context: &[String],
    ) -> Result<TurnScore, String> {
        let model = match &self.model {
            Some(model) => model,
            None => {
                return Err(self
                    .unavailable
                    .clone()
                    .unwrap_or_else(|| "no judge model configured".to_string()))
            }
        };

        let messages = build_prompt(&self.rubric, text, turn_number, speaker_name, recent_context);
        let request = CompletionRequest::new(messages).with_temperature(JUDGE_TEMPERATURE);
        let response = model.invoke(request).await.map_err(|e| e.to_string())?;
        debug!(
            turn = turn_number,
            latency_ms = response.latency_ms,
            chars = response.content.len(),
            "Judge responded"
        );

        let evaluation = parse_evaluation(&self.rubric, &response.content).map_err(|e| e.to_string())?;
        Ok(TurnScore::new(turn_number, speaker, speaker_name, evaluation.criteria).with_feedback(
            evaluation.strengths,
            evaluation.weaknesses,
            evaluation.comment,
        ))
    }

    /// The fixed score given when a turn cannot be evaluated
    pub fn fallback_score(&self, turn_number: u32, speaker: Side, speaker_name: &str) -> TurnScore {
        let fallback = &self.rubric.fallback;
        TurnScore::new(
            turn_number,
            speaker,
            speaker_name,
            [FALLBACK_CRITERION_SCORE; CRITERIA_COUNT],
        )
        .with_feedback(
            fallback.strengths.iter().map(|s| s.to_string()).collect(),
            fallback.weaknesses.iter().map(|s| s.to_string()).collect(),
            fallback.comment,
        )
        .as_fallback()
    }

    /// Forget recorded scores and the last verdict, ready for a new run
    pub fn reset(&mut self) {
        self.scores.clear();
        self.verdict = None;
    }

    /// Aggregate every recorded score into the final verdict
    pub fn finalize(&mut self) -> FinalVerdict {
        let verdict = aggregate(&self.rubric, &self.scores, &self.names);
        info!(
            winner = ?verdict.winner,
            margin = verdict.margin,
            total_a = verdict.total_a,
            total_b = verdict.total_b,
            "Verdict reached"
        );
        self.verdict = Some(verdict.clone());
        verdict
    }

    /// Scores and verdict as one serializable value
    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard {
            scores: self.scores.clone(),
            verdict: self.verdict.clone(),
        }
    }
}

impl std::fmt::Debug for Judge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Judge")
            .field("kind", &self.rubric.kind)
            .field("model", &self.model_name())
            .field("scores", &self.scores.len())
            .finish()
    }
}
