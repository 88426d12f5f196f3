//! Judge score records
//!
//! A [`TurnScore`] is created once per finished turn and never changes
//! afterwards. Criteria are clamped into `[0, 10]` on construction and the
//! total is always recomputed from them, including after deserialization.

use serde::{Deserialize, Serialize};

use crate::state::Side;

/// Number of rubric criteria scored per turn
pub const CRITERIA_COUNT: usize = 8;

/// Upper bound for a single criterion
pub const MAX_CRITERION_SCORE: f64 = 10.0;

/// Upper bound for a turn total
pub const MAX_TURN_TOTAL: f64 = MAX_CRITERION_SCORE * CRITERIA_COUNT as f64;

/// Score for one completed turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "TurnScoreRecord", from = "TurnScoreRecord")]
pub struct TurnScore {
    /// 1-based turn number
    pub turn_number: u32,
    /// Side that produced the turn
    pub speaker: Side,
    /// Display name of the speaker
    pub speaker_name: String,
    criteria: [f64; CRITERIA_COUNT],
    /// Strengths (debates) or best bars (battles)
    pub strengths: Vec<String>,
    /// Weaknesses / areas to improve
    pub weaknesses: Vec<String>,
    /// Narrative comment from the judge
    pub comment: String,
    /// True when the judge could not produce a real evaluation
    pub fallback: bool,
}

impl TurnScore {
    /// Create a score; criteria are clamped into `[0, 10]`, NaN becomes 0
    pub fn new(
        turn_number: u32,
        speaker: Side,
        speaker_name: impl Into<String>,
        criteria: [f64; CRITERIA_COUNT],
    ) -> Self {
        Self {
            turn_number,
            speaker,
            speaker_name: speaker_name.into(),
            criteria: criteria.map(clamp_criterion),
            strengths: Vec::new(),
            weaknesses: Vec::new(),
            comment: String::new(),
            fallback: false,
        }
    }

    /// Attach qualitative feedback
    pub fn with_feedback(
        mut self,
        strengths: Vec<String>,
        weaknesses: Vec<String>,
        comment: impl Into<String>,
    ) -> Self {
        self.strengths = strengths;
        self.weaknesses = weaknesses;
        self.comment = comment.into();
        self
    }

    /// Mark this score as a fallback
    pub fn as_fallback(mut self) -> Self {
        self.fallback = true;
        self
    }

    /// All criteria in rubric order
    pub fn criteria(&self) -> &[f64; CRITERIA_COUNT] {
        &self.criteria
    }

    /// A single criterion by rubric index
    pub fn criterion(&self, index: usize) -> Option<f64> {
        self.criteria.get(index).copied()
    }

    /// Sum of all criteria, in `[0, 80]`
    pub fn total(&self) -> f64 {
        self.criteria.iter().sum()
    }
}

fn clamp_criterion(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, MAX_CRITERION_SCORE)
    }
}

/// Wire form of [`TurnScore`]; `total` is emitted for readers and ignored on input
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TurnScoreRecord {
    turn_number: u32,
    speaker: Side,
    speaker_name: String,
    criteria: [f64; CRITERIA_COUNT],
    #[serde(default)]
    total: f64,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    weaknesses: Vec<String>,
    #[serde(default)]
    comment: String,
    #[serde(default)]
    fallback: bool,
}

impl From<TurnScore> for TurnScoreRecord {
    fn from(score: TurnScore) -> Self {
        Self {
            total: score.total(),
            turn_number: score.turn_number,
            speaker: score.speaker,
            speaker_name: score.speaker_name,
            criteria: score.criteria,
            strengths: score.strengths,
            weaknesses: score.weaknesses,
            comment: score.comment,
            fallback: score.fallback,
        }
    }
}

impl From<TurnScoreRecord> for TurnScore {
    fn from(record: TurnScoreRecord) -> Self {
        let mut score = TurnScore::new(
            record.turn_number,
            record.speaker,
            record.speaker_name,
            record.criteria,
        )
        .with_feedback(record.strengths, record.weaknesses, record.comment);
        score.fallback = record.fallback;
        score
    }
}

/// Result of a comparison between the two sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "side_a")]
    SideA,
    #[serde(rename = "side_b")]
    SideB,
    #[serde(rename = "tie")]
    Tie,
}

impl Outcome {
    /// Outcome won by the given side
    pub fn won_by(side: Side) -> Self {
        match side {
            Side::A => Self::SideA,
            Side::B => Self::SideB,
        }
    }

    /// Winning side, if any
    pub fn side(self) -> Option<Side> {
        match self {
            Self::SideA => Some(Side::A),
            Self::SideB => Some(Side::B),
            Self::Tie => None,
        }
    }

    /// True for a tie
    pub fn is_tie(self) -> bool {
        self == Self::Tie
    }
}

/// Winner of one rubric category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWinner {
    /// Criterion key (e.g. `logic_reasoning`)
    pub criterion: String,
    /// Verdict label (e.g. `best_logic`)
    pub label: String,
    /// Who won the category
    pub outcome: Outcome,
}

/// Aggregated verdict produced once after the last turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalVerdict {
    /// Sum of side A's turn totals
    pub total_a: f64,
    /// Sum of side B's turn totals
    pub total_b: f64,
    /// Overall winner
    pub winner: Outcome,
    /// Absolute difference between the totals
    pub margin: f64,
    /// Independently computed category winners
    pub categories: Vec<CategoryWinner>,
    /// Qualitative tier label
    pub quality: String,
    /// Short derived observations
    pub insights: Vec<String>,
    /// One-paragraph summary
    pub summary: String,
    /// Number of scores aggregated
    pub turns_scored: usize,
}

impl FinalVerdict {
    /// Total for one side
    pub fn total_for(&self, side: Side) -> f64 {
        match side {
            Side::A => self.total_a,
            Side::B => self.total_b,
        }
    }

    /// True when the run ended in a tie
    pub fn is_tie(&self) -> bool {
        self.winner.is_tie()
    }

    /// Category outcome by label
    pub fn category(&self, label: &str) -> Option<Outcome> {
        self.categories
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.outcome)
    }
}
