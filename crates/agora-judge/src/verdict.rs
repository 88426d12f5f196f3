//! Final verdict aggregation
//!
//! [`aggregate`] is a pure function of the rubric and the recorded scores;
//! the [`Judge`](crate::Judge) calls it from `finalize`.

use agora_core::{CategoryWinner, FinalVerdict, Outcome, Side, TurnScore, CRITERIA_COUNT};

use crate::rubric::{title_case, ContestKind, Rubric};

/// Display names for the two sides, used in generated text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideNames {
    pub a: String,
    pub b: String,
}

impl SideNames {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    pub fn of(&self, side: Side) -> &str {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }
}

impl Default for SideNames {
    fn default() -> Self {
        Self::new("Side A", "Side B")
    }
}

/// Compare two values, returning a tie when they differ by less than
/// `threshold`. Equal values are always a tie, even at a zero threshold.
pub fn decide(value_a: f64, value_b: f64, threshold: f64) -> (Outcome, f64) {
    let margin = (value_a - value_b).abs();
    let outcome = if margin < threshold || margin == 0.0 {
        Outcome::Tie
    } else if value_a > value_b {
        Outcome::SideA
    } else {
        Outcome::SideB
    };
    (outcome, margin)
}

/// Aggregate all recorded scores into the final verdict
pub fn aggregate(rubric: &Rubric, scores: &[TurnScore], names: &SideNames) -> FinalVerdict {
    if scores.is_empty() {
        return empty_verdict(rubric);
    }

    let side_total = |side: Side| -> f64 {
        scores
            .iter()
            .filter(|s| s.speaker == side)
            .map(TurnScore::total)
            .sum()
    };
    let total_a = side_total(Side::A);
    let total_b = side_total(Side::B);
    let (winner, margin) = decide(total_a, total_b, rubric.tie_threshold);

    let categories = rubric
        .categories
        .iter()
        .map(|pick| {
            let mean_a = side_mean(scores, Side::A, pick.criterion);
            let mean_b = side_mean(scores, Side::B, pick.criterion);
            let (outcome, _) = decide(mean_a, mean_b, rubric.category_tie_threshold);
            CategoryWinner {
                criterion: rubric.criteria[pick.criterion].key.to_string(),
                label: pick.label.to_string(),
                outcome,
            }
        })
        .collect();

    let average_total = (total_a + total_b) / scores.len() as f64;
    let quality = rubric.quality_for(average_total);

    FinalVerdict {
        total_a,
        total_b,
        winner,
        margin,
        categories,
        quality: quality.to_string(),
        insights: insights(rubric, scores),
        summary: summary(rubric, names, winner, margin, quality),
        turns_scored: scores.len(),
    }
}

fn empty_verdict(rubric: &Rubric) -> FinalVerdict {
    let (insight, summary) = match rubric.kind {
        ContestKind::Debate => (
            "Debate evaluation incomplete",
            "Unable to complete full evaluation due to technical issues.",
        ),
        ContestKind::RapBattle => (
            "Battle evaluation incomplete",
            "Unable to complete full battle evaluation due to technical issues.",
        ),
    };

    FinalVerdict {
        total_a: 0.0,
        total_b: 0.0,
        winner: Outcome::Tie,
        margin: 0.0,
        categories: rubric
            .categories
            .iter()
            .map(|pick| CategoryWinner {
                criterion: rubric.criteria[pick.criterion].key.to_string(),
                label: pick.label.to_string(),
                outcome: Outcome::Tie,
            })
            .collect(),
        quality: rubric.lowest_quality().to_string(),
        insights: vec![insight.to_string()],
        summary: summary.to_string(),
        turns_scored: 0,
    }
}

/// Mean of one criterion over a side's turns; 0 when the side has none
fn side_mean(scores: &[TurnScore], side: Side, criterion: usize) -> f64 {
    let values: Vec<f64> = scores
        .iter()
        .filter(|s| s.speaker == side)
        .filter_map(|s| s.criterion(criterion))
        .collect();
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Per-criterion averages across every score regardless of side
fn criterion_averages(scores: &[TurnScore]) -> [f64; CRITERIA_COUNT] {
    let mut sums = [0.0; CRITERIA_COUNT];
    for score in scores {
        for (sum, value) in sums.iter_mut().zip(score.criteria()) {
            *sum += value;
        }
    }
    sums.map(|sum| sum / scores.len() as f64)
}

fn insights(rubric: &Rubric, scores: &[TurnScore]) -> Vec<String> {
    let averages = criterion_averages(scores);

    // First extreme wins on equal averages
    let mut best = 0;
    let mut worst = 0;
    for (i, avg) in averages.iter().enumerate() {
        if *avg > averages[best] {
            best = i;
        }
        if *avg < averages[worst] {
            worst = i;
        }
    }
    let best_name = title_case(rubric.criteria[best].key);
    let worst_name = title_case(rubric.criteria[worst].key);

    match rubric.kind {
        ContestKind::Debate => {
            let overall = averages.iter().sum::<f64>() / CRITERIA_COUNT as f64;
            let closing = if overall >= 7.5 {
                "High-quality debate with strong arguments from both sides"
            } else if overall >= 6.0 {
                "Solid debate performance with room for enhancement"
            } else {
                "Debate would benefit from stronger evidence and clearer reasoning"
            };
            vec![
                format!("Strongest debate aspect: {}", best_name),
                format!("Area for improvement: {}", worst_name),
                closing.to_string(),
            ]
        }
        ContestKind::RapBattle => {
            let mut moments = vec![
                format!("Strongest battle skill: {}", best_name),
                format!("Area for improvement: {}", worst_name),
            ];
            if let Some(top) = scores
                .iter()
                .fold(None::<&TurnScore>, |top, s| match top {
                    Some(t) if t.total() >= s.total() => Some(t),
                    _ => Some(s),
                })
            {
                moments.push(format!(
                    "Round {}: {}'s dominant performance ({:.1}/80)",
                    top.turn_number,
                    top.speaker_name,
                    top.total()
                ));
            }
            if let Some((score, bar)) = scores
                .iter()
                .find_map(|s| s.strengths.first().map(|bar| (s, bar)))
            {
                moments.push(format!("{}'s best bar: \"{}\"", score.speaker_name, bar));
            }
            moments
        }
    }
}

fn summary(
    rubric: &Rubric,
    names: &SideNames,
    winner: Outcome,
    margin: f64,
    quality: &str,
) -> String {
    match rubric.kind {
        ContestKind::Debate => {
            let result = match winner.side() {
                None => format!(
                    "This debate ended in a tie, with both sides performing comparably (margin: {:.1} points).",
                    margin
                ),
                Some(side) => format!(
                    "The {} side won this debate by {:.1} points.",
                    names.of(side),
                    margin
                ),
            };
            format!(
                "{} Overall debate quality was {}. Both participants demonstrated engagement with \
                 the topic and made efforts to support their positions.",
                result, quality
            )
        }
        ContestKind::RapBattle => {
            let result = match winner.side() {
                None => format!(
                    "This battle was too close to call - both {} and {} brought their A-game (margin: {:.1} points).",
                    names.a, names.b, margin
                ),
                Some(side) => format!(
                    "{} takes this battle with a {:.1} point margin.",
                    names.of(side),
                    margin
                ),
            };
            format!(
                "{} Overall battle quality was {}. Both rappers showed skills and brought \
                 entertainment value to the cypher.",
                result, quality
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A score whose eight criteria sum to `total`
    fn score(turn: u32, side: Side, total: f64) -> TurnScore {
        let name = match side {
            Side::A => "Progressive",
            Side::B => "Conservative",
        };
        TurnScore::new(turn, side, name, [total / 8.0; CRITERIA_COUNT])
    }

    #[test]
    fn test_close_totals_are_a_tie() {
        let rubric = Rubric::debate();
        let scores = vec![score(1, Side::A, 40.0), score(2, Side::B, 43.0)];
        let verdict = aggregate(&rubric, &scores, &SideNames::default());

        assert_eq!(verdict.winner, Outcome::Tie);
        assert_eq!(verdict.margin, 3.0);
        assert_eq!(verdict.total_a, 40.0);
        assert_eq!(verdict.total_b, 43.0);
        assert!(verdict.summary.starts_with("This debate ended in a tie"));
    }

    #[test]
    fn test_equal_totals_tie_at_zero_threshold() {
        let mut rubric = Rubric::debate().with_tie_threshold(0.0);
        rubric.category_tie_threshold = 0.0;
        let scores = vec![score(1, Side::A, 48.0), score(2, Side::B, 48.0)];
        let verdict = aggregate(&rubric, &scores, &SideNames::default());

        assert_eq!(verdict.winner, Outcome::Tie);
        assert_eq!(verdict.margin, 0.0);
        assert!(verdict.categories.iter().all(|c| c.outcome == Outcome::Tie));

        assert_eq!(decide(7.0, 7.0, 0.0), (Outcome::Tie, 0.0));
        assert_eq!(decide(7.5, 7.0, 0.0), (Outcome::SideA, 0.5));
    }

    #[test]
    fn test_clear_margin_names_winner() {
        let rubric = Rubric::debate();
        let scores = vec![score(1, Side::A, 40.0), score(2, Side::B, 50.0)];
        let names = SideNames::new("Progressive", "Conservative");
        let verdict = aggregate(&rubric, &scores, &names);

        assert_eq!(verdict.winner, Outcome::SideB);
        assert_eq!(verdict.margin, 10.0);
        assert!(verdict
            .summary
            .starts_with("The Conservative side won this debate by 10.0 points."));
        assert_eq!(verdict.quality, "fair");
    }

    #[test]
    fn test_battle_threshold_is_tighter() {
        let scores = vec![score(1, Side::A, 40.0), score(2, Side::B, 43.0)];
        let verdict = aggregate(&Rubric::rap_battle(), &scores, &SideNames::new("Eminem", "Drake"));
        assert_eq!(verdict.winner, Outcome::SideB);
        assert!(verdict.summary.starts_with("Drake takes this battle with a 3.0 point margin."));

        let relaxed = Rubric::rap_battle().with_tie_threshold(3.5);
        assert!(aggregate(&relaxed, &scores, &SideNames::default()).is_tie());
    }

    #[test]
    fn test_empty_scores_give_default_verdict() {
        let verdict = aggregate(&Rubric::debate(), &[], &SideNames::default());
        assert_eq!(verdict.total_a, 0.0);
        assert_eq!(verdict.total_b, 0.0);
        assert!(verdict.is_tie());
        assert_eq!(verdict.margin, 0.0);
        assert_eq!(verdict.quality, "poor");
        assert_eq!(verdict.turns_scored, 0);
        assert_eq!(verdict.categories.len(), 4);
        assert!(verdict.categories.iter().all(|c| c.outcome.is_tie()));

        let battle = aggregate(&Rubric::rap_battle(), &[], &SideNames::default());
        assert_eq!(battle.quality, "weak");
        assert_eq!(battle.insights, vec!["Battle evaluation incomplete"]);
    }

    #[test]
    fn test_categories_are_independent_of_overall_winner() {
        let rubric = Rubric::debate();
        // A wins overall but B has the better rebuttals
        let a = TurnScore::new(1, Side::A, "A", [9.0, 9.0, 9.0, 9.0, 5.0, 9.0, 9.0, 9.0]);
        let b = TurnScore::new(2, Side::B, "B", [6.0, 6.0, 6.0, 6.0, 8.0, 6.0, 6.0, 6.0]);
        let verdict = aggregate(&rubric, &[a, b], &SideNames::default());

        assert_eq!(verdict.winner, Outcome::SideA);
        assert_eq!(verdict.category("best_logic"), Some(Outcome::SideA));
        assert_eq!(verdict.category("best_rebuttals"), Some(Outcome::SideB));
    }

    #[test]
    fn test_category_with_one_silent_side() {
        let rubric = Rubric::debate();
        let verdict = aggregate(&rubric, &[score(1, Side::A, 8.0)], &SideNames::default());
        // B has no turns so its means are 0; A's 1.0 clears the 0.5 threshold
        assert_eq!(verdict.category("best_logic"), Some(Outcome::SideA));

        let tiny = aggregate(&rubric, &[score(1, Side::A, 3.2)], &SideNames::default());
        assert_eq!(tiny.category("best_logic"), Some(Outcome::Tie));
    }

    #[test]
    fn test_debate_insights() {
        let rubric = Rubric::debate();
        let a = TurnScore::new(1, Side::A, "A", [8.0, 3.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0]);
        let verdict = aggregate(&rubric, &[a], &SideNames::default());
        assert_eq!(
            verdict.insights,
            vec![
                "Strongest debate aspect: Logic Reasoning",
                "Area for improvement: Evidence Quality",
                "Solid debate performance with room for enhancement",
            ]
        );
    }

    #[test]
    fn test_battle_key_moments() {
        let rubric = Rubric::rap_battle();
        let first = score(1, Side::A, 48.0);
        let second = score(2, Side::B, 64.0).with_feedback(
            vec!["I'm the reason your label's stock went down".into()],
            vec![],
            "",
        );
        let verdict = aggregate(&rubric, &[first, second], &SideNames::new("A", "B"));

        assert!(verdict
            .insights
            .contains(&"Round 2: Conservative's dominant performance (64.0/80)".to_string()));
        assert!(verdict
            .insights
            .contains(&"Conservative's best bar: \"I'm the reason your label's stock went down\"".to_string()));
        assert_eq!(verdict.quality, "solid");
    }
}
