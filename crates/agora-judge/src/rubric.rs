//! Scoring rubrics
//!
//! A [`Rubric`] is everything that differs between judging a debate and
//! judging a rap battle: the eight criteria, which four of them get a
//! category winner, the tie thresholds, the quality tiers and the wording
//! of the judge prompt. The judge and the aggregation code are shared.

use serde::Serialize;

use agora_core::CRITERIA_COUNT;

/// Totals closer than this end a debate in a tie
pub const DEBATE_TIE_THRESHOLD: f64 = 5.0;

/// Totals closer than this end a rap battle in a tie
pub const BATTLE_TIE_THRESHOLD: f64 = 3.0;

/// Category means closer than this tie the category
pub const CATEGORY_TIE_THRESHOLD: f64 = 0.5;

/// Score given to every criterion when the judge cannot evaluate a turn
pub const FALLBACK_CRITERION_SCORE: f64 = 6.0;

/// Which kind of contest a rubric judges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContestKind {
    Debate,
    RapBattle,
}

/// A criterion and the one-line description shown to the judge model
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Criterion {
    pub key: &'static str,
    pub description: &'static str,
}

/// A criterion whose per-side mean decides a category winner
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryPick {
    /// Index into the rubric's criteria
    pub criterion: usize,
    /// Verdict label, e.g. `best_logic`
    pub label: &'static str,
}

/// Lower bound (inclusive) of a quality tier on the average turn total
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityTier {
    pub min_average: f64,
    pub label: &'static str,
}

/// Field names the judge model must fill in besides the criteria
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeedbackKeys {
    pub strengths: &'static str,
    pub weaknesses: &'static str,
    pub comment: &'static str,
}

/// Canned feedback attached to fallback scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FallbackFeedback {
    pub strengths: &'static [&'static str],
    pub weaknesses: &'static [&'static str],
    pub comment: &'static str,
}

/// Complete judging configuration for one contest kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rubric {
    pub kind: ContestKind,
    /// Noun used in generated text ("debate", "battle")
    pub noun: &'static str,
    /// Label of one scored unit in generated text ("turn", "round")
    pub unit: &'static str,
    pub criteria: [Criterion; CRITERIA_COUNT],
    pub categories: [CategoryPick; 4],
    pub tie_threshold: f64,
    pub category_tie_threshold: f64,
    /// Ordered from best to worst; the last tier is the floor
    pub quality_tiers: Vec<QualityTier>,
    pub feedback_keys: FeedbackKeys,
    pub fallback: FallbackFeedback,
    /// Number of earlier context lines shown with each evaluated turn
    pub context_window: usize,
    pub persona: &'static str,
}

impl Rubric {
    /// Rubric for structured political debates
    pub fn debate() -> Self {
        Self {
            kind: ContestKind::Debate,
            noun: "debate",
            unit: "turn",
            criteria: [
                Criterion {
                    key: "logic_reasoning",
                    description: "Soundness of arguments, logical consistency, absence of fallacies",
                },
                Criterion {
                    key: "evidence_quality",
                    description: "Relevance, reliability and strength of supporting evidence",
                },
                Criterion {
                    key: "source_credibility",
                    description: "Trustworthiness of cited sources and data",
                },
                Criterion {
                    key: "argument_structure",
                    description: "Organization, flow and coherent presentation",
                },
                Criterion {
                    key: "rebuttal_effectiveness",
                    description: "Direct engagement with the opponent's points",
                },
                Criterion {
                    key: "clarity_communication",
                    description: "Clear, accessible and persuasive delivery",
                },
                Criterion {
                    key: "factual_accuracy",
                    description: "Correct claims and faithful reading of data",
                },
                Criterion {
                    key: "originality",
                    description: "Novel insights and fresh perspectives",
                },
            ],
            categories: [
                CategoryPick { criterion: 0, label: "best_logic" },
                CategoryPick { criterion: 1, label: "best_evidence" },
                CategoryPick { criterion: 5, label: "best_communication" },
                CategoryPick { criterion: 4, label: "best_rebuttals" },
            ],
            tie_threshold: DEBATE_TIE_THRESHOLD,
            category_tie_threshold: CATEGORY_TIE_THRESHOLD,
            quality_tiers: vec![
                QualityTier { min_average: 65.0, label: "excellent" },
                QualityTier { min_average: 55.0, label: "good" },
                QualityTier { min_average: 45.0, label: "fair" },
                QualityTier { min_average: f64::NEG_INFINITY, label: "poor" },
            ],
            feedback_keys: FeedbackKeys {
                strengths: "strengths",
                weaknesses: "weaknesses",
                comment: "specific_feedback",
            },
            fallback: FallbackFeedback {
                strengths: &["Participated in debate", "Presented viewpoint"],
                weaknesses: &["Evaluation system error"],
                comment: "Judge evaluation system encountered an error. Default scoring applied.",
            },
            context_window: 3,
            persona: "You are an experienced competitive-debate judge. You score political \
                      debates strictly on the quality of argumentation, never on whether you \
                      agree with a position. Stay neutral, cite specifics from the turn you are \
                      scoring, and give feedback a debater could act on.",
        }
    }

    /// Rubric for rap battles
    pub fn rap_battle() -> Self {
        Self {
            kind: ContestKind::RapBattle,
            noun: "battle",
            unit: "round",
            criteria: [
                Criterion {
                    key: "flow_delivery",
                    description: "Rhythm, cadence, breath control and timing",
                },
                Criterion {
                    key: "lyrical_complexity",
                    description: "Vocabulary, internal rhymes and layered structure",
                },
                Criterion {
                    key: "wordplay_creativity",
                    description: "Puns, double entendres and metaphors",
                },
                Criterion {
                    key: "punchlines_impact",
                    description: "Hard-hitting, quotable bars",
                },
                Criterion {
                    key: "crowd_appeal",
                    description: "Charisma, energy and audience connection",
                },
                Criterion {
                    key: "battle_tactics",
                    description: "Rebuttals and how well the opponent is addressed",
                },
                Criterion {
                    key: "rhyme_scheme",
                    description: "Rhyme patterns and multi-syllabic rhymes",
                },
                Criterion {
                    key: "originality",
                    description: "Fresh angles and avoidance of cliché setups",
                },
            ],
            categories: [
                CategoryPick { criterion: 0, label: "best_flow" },
                CategoryPick { criterion: 2, label: "best_wordplay" },
                CategoryPick { criterion: 3, label: "best_punchlines" },
                CategoryPick { criterion: 4, label: "best_crowd_appeal" },
            ],
            tie_threshold: BATTLE_TIE_THRESHOLD,
            category_tie_threshold: CATEGORY_TIE_THRESHOLD,
            quality_tiers: vec![
                QualityTier { min_average: 70.0, label: "legendary" },
                QualityTier { min_average: 60.0, label: "fire" },
                QualityTier { min_average: 50.0, label: "solid" },
                QualityTier { min_average: f64::NEG_INFINITY, label: "weak" },
            ],
            feedback_keys: FeedbackKeys {
                strengths: "best_bars",
                weaknesses: "weaknesses",
                comment: "judge_comments",
            },
            fallback: FallbackFeedback {
                strengths: &["Participated in battle", "Delivered verse"],
                weaknesses: &["Judge system error"],
                comment: "Judge evaluation system encountered an error. Default scoring applied.",
            },
            context_window: 2,
            persona: "You are a veteran battle-rap judge. You respect every style, weigh \
                      technique and entertainment together, and judge only what is said in \
                      the verse in front of you. Keep the feedback sharp and specific.",
        }
    }

    /// Override the overall tie threshold
    pub fn with_tie_threshold(mut self, threshold: f64) -> Self {
        self.tie_threshold = threshold.max(0.0);
        self
    }

    /// Criterion keys in rubric order
    pub fn criterion_keys(&self) -> [&'static str; CRITERIA_COUNT] {
        self.criteria.map(|c| c.key)
    }

    /// Quality label for an average turn total
    pub fn quality_for(&self, average_total: f64) -> &'static str {
        self.quality_tiers
            .iter()
            .find(|tier| average_total >= tier.min_average)
            .map(|tier| tier.label)
            .unwrap_or_else(|| self.lowest_quality())
    }

    /// The floor tier
    pub fn lowest_quality(&self) -> &'static str {
        self.quality_tiers.last().map(|tier| tier.label).unwrap_or("poor")
    }
}

/// `logic_reasoning` -> `Logic Reasoning`
pub fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debate_rubric_shape() {
        let rubric = Rubric::debate();
        assert_eq!(rubric.criterion_keys()[4], "rebuttal_effectiveness");
        assert_eq!(rubric.tie_threshold, DEBATE_TIE_THRESHOLD);
        assert_eq!(rubric.context_window, 3);
        let labels: Vec<_> = rubric.categories.iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!["best_logic", "best_evidence", "best_communication", "best_rebuttals"]);
        assert_eq!(rubric.criteria[rubric.categories[2].criterion].key, "clarity_communication");
    }

    #[test]
    fn test_quality_tiers() {
        let debate = Rubric::debate();
        assert_eq!(debate.quality_for(65.0), "excellent");
        assert_eq!(debate.quality_for(64.9), "good");
        assert_eq!(debate.quality_for(45.0), "fair");
        assert_eq!(debate.quality_for(0.0), "poor");
        assert_eq!(debate.lowest_quality(), "poor");

        let battle = Rubric::rap_battle();
        assert_eq!(battle.quality_for(70.0), "legendary");
        assert_eq!(battle.quality_for(60.0), "fire");
        assert_eq!(battle.quality_for(50.0), "solid");
        assert_eq!(battle.quality_for(49.9), "weak");
    }

    #[test]
    fn test_tie_threshold_override() {
        let rubric = Rubric::rap_battle().with_tie_threshold(1.5);
        assert_eq!(rubric.tie_threshold, 1.5);
        assert_eq!(Rubric::debate().with_tie_threshold(-2.0).tie_threshold, 0.0);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("logic_reasoning"), "Logic Reasoning");
        assert_eq!(title_case("originality"), "Originality");
    }
}
