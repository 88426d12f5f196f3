//! Judge prompt construction and response parsing

use serde_json::{Map, Value};
use thiserror::Error;

use agora_core::{Message, CRITERIA_COUNT};

use crate::rubric::Rubric;

/// Number of characters of a turn quoted in a context line
pub const CONTEXT_EXCERPT_CHARS: usize = 150;

/// Why a judge response could not be turned into a score
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("no JSON object found in judge response ({0} chars)")]
    NoJson(usize),
    #[error("judge response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("judge response is missing field '{0}'")]
    MissingField(String),
    #[error("judge field '{0}' is not a number")]
    NotNumeric(String),
}

/// A successfully parsed judge response
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub criteria: [f64; CRITERIA_COUNT],
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub comment: String,
}

/// One line of recent context: `"<speaker>: <first 150 chars>..."`
pub fn context_line(speaker: &str, content: &str) -> String {
    let excerpt: String = content.chars().take(CONTEXT_EXCERPT_CHARS).collect();
    format!("{}: {}...", speaker, excerpt)
}

/// Messages sent to the judge model for one turn.
///
/// The response template goes in its own final message so nothing quoted
/// from the turn can be mistaken for it.
pub fn build_prompt(
    rubric: &Rubric,
    text: &str,
    turn_number: u32,
    speaker_name: &str,
    recent_context: &[String],
) -> Vec<Message> {
    let criteria = rubric
        .criteria
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {}: {}", i + 1, c.key, c.description))
        .collect::<Vec<_>>()
        .join("\n");

    let window_start = recent_context.len().saturating_sub(rubric.context_window);
    let context = if recent_context.is_empty() {
        format!("This is the opening {}.", rubric.unit)
    } else {
        recent_context[window_start..].join("\n")
    };

    let evaluation = format!(
        "{noun} {unit} evaluation\n\n\
         {Unit} number: {turn}\n\
         Speaker: {speaker}\n\n\
         Scoring criteria (0-10 each):\n{criteria}\n\n\
         Previous context:\n{context}\n\n\
         Statement to evaluate:\n{text}",
        noun = rubric.noun.to_uppercase(),
        unit = rubric.unit.to_uppercase(),
        Unit = capitalize(rubric.unit),
        turn = turn_number,
        speaker = speaker_name,
    );

    vec![
        Message::human(rubric.persona),
        Message::human(evaluation),
        Message::human(format!(
            "Respond with a single valid JSON object of exactly this shape. Replace every 0 \
             with a score from 0 to 10 and fill in the text fields:\n{}",
            response_template(rubric)
        )),
    ]
}

/// JSON object with every field the judge must return
pub fn response_template(rubric: &Rubric) -> Value {
    let mut template = Map::new();
    for criterion in &rubric.criteria {
        template.insert(criterion.key.to_string(), Value::from(0));
    }
    template.insert(rubric.feedback_keys.strengths.to_string(), Value::Array(Vec::new()));
    template.insert(rubric.feedback_keys.weaknesses.to_string(), Value::Array(Vec::new()));
    template.insert(rubric.feedback_keys.comment.to_string(), Value::String(String::new()));
    Value::Object(template)
}

/// Parse a raw judge response.
///
/// The slice from the first `{` to the last `}` is parsed, so commentary
/// around the object is tolerated. Every criterion and feedback field must
/// be present; a model-supplied total is ignored.
pub fn parse_evaluation(rubric: &Rubric, raw: &str) -> Result<Evaluation, EvaluationError> {
    let (start, end) = match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if end > start => (start, end),
        _ => return Err(EvaluationError::NoJson(raw.len())),
    };

    let parsed: Value = serde_json::from_str(&raw[start..=end])?;
    let object = parsed
        .as_object()
        .ok_or_else(|| EvaluationError::NoJson(raw.len()))?;

    let mut criteria = [0.0; CRITERIA_COUNT];
    for (slot, criterion) in criteria.iter_mut().zip(rubric.criteria.iter()) {
        let value = object
            .get(criterion.key)
            .ok_or_else(|| EvaluationError::MissingField(criterion.key.to_string()))?;
        *slot = as_score(value).ok_or_else(|| EvaluationError::NotNumeric(criterion.key.to_string()))?;
    }

    let keys = &rubric.feedback_keys;
    let strengths = string_list(object, keys.strengths)?;
    let weaknesses = string_list(object, keys.weaknesses)?;
    let comment = match object.get(keys.comment) {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => return Err(EvaluationError::MissingField(keys.comment.to_string())),
    };

    Ok(Evaluation {
        criteria,
        strengths,
        weaknesses,
        comment,
    })
}

/// Numbers, and numeric strings such as `"7.5"`
fn as_score(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

fn string_list(object: &Map<String, Value>, key: &str) -> Result<Vec<String>, EvaluationError> {
    match object.get(key) {
        Some(Value::Array(items)) => Ok(items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect()),
        Some(Value::String(s)) => Ok(vec![s.clone()]),
        Some(Value::Null) | None => Err(EvaluationError::MissingField(key.to_string())),
        Some(other) => Ok(vec![other.to_string()]),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_response(rubric: &Rubric, score: f64) -> Value {
        let mut value = response_template(rubric);
        let object = value.as_object_mut().unwrap();
        for key in rubric.criterion_keys() {
            object.insert(key.to_string(), json!(score));
        }
        object.insert(rubric.feedback_keys.strengths.to_string(), json!(["clear thesis"]));
        object.insert(rubric.feedback_keys.weaknesses.to_string(), json!(["thin sourcing"]));
        object.insert(rubric.feedback_keys.comment.to_string(), json!("Good turn."));
        value
    }

    #[test]
    fn test_parses_json_surrounded_by_commentary() {
        let rubric = Rubric::debate();
        let raw = format!("Here is my evaluation:\n{}\nThanks!", full_response(&rubric, 7.0));
        let evaluation = parse_evaluation(&rubric, &raw).unwrap();
        assert_eq!(evaluation.criteria, [7.0; CRITERIA_COUNT]);
        assert_eq!(evaluation.strengths, vec!["clear thesis"]);
        assert_eq!(evaluation.comment, "Good turn.");
    }

    #[test]
    fn test_rejects_non_json_and_missing_fields() {
        let rubric = Rubric::rap_battle();
        assert!(matches!(parse_evaluation(&rubric, "not json"), Err(EvaluationError::NoJson(8))));
        assert!(matches!(
            parse_evaluation(&rubric, "{ broken"),
            Err(EvaluationError::NoJson(_))
        ));
        assert!(matches!(
            parse_evaluation(&rubric, "{\"flow_delivery\": }"),
            Err(EvaluationError::InvalidJson(_))
        ));

        let mut response = full_response(&rubric, 8.0);
        response.as_object_mut().unwrap().remove("judge_comments");
        assert!(matches!(
            parse_evaluation(&rubric, &response.to_string()),
            Err(EvaluationError::MissingField(field)) if field == "judge_comments"
        ));

        // Debate feedback keys do not satisfy the battle rubric
        let debate_shaped = full_response(&Rubric::debate(), 8.0);
        assert!(parse_evaluation(&rubric, &debate_shaped.to_string()).is_err());
    }

    #[test]
    fn test_non_numeric_criterion_is_an_error() {
        let rubric = Rubric::debate();
        let mut response = full_response(&rubric, 5.0);
        response["originality"] = json!("high");
        assert!(matches!(
            parse_evaluation(&rubric, &response.to_string()),
            Err(EvaluationError::NotNumeric(field)) if field == "originality"
        ));

        response["originality"] = json!("6.5");
        assert_eq!(parse_evaluation(&rubric, &response.to_string()).unwrap().criteria[7], 6.5);
    }

    #[test]
    fn test_prompt_uses_context_window() {
        let rubric = Rubric::rap_battle();
        let context: Vec<String> = (1..=4).map(|i| format!("line {}", i)).collect();
        let messages = build_prompt(&rubric, "my verse", 5, "Eminem", &context);

        assert_eq!(messages.len(), 3);
        assert!(!messages[1].content.contains("line 2"));
        assert!(messages[1].content.contains("line 3"));
        assert!(messages[1].content.contains("line 4"));
        assert!(messages[1].content.contains("Round number: 5"));

        let opening = build_prompt(&rubric, "my verse", 1, "Eminem", &[]);
        assert!(opening[1].content.contains("This is the opening round."));
        assert!(opening[2].content.contains("\"best_bars\":[]"));
    }

    #[test]
    fn test_context_line_truncates() {
        let long = "x".repeat(400);
        let line = context_line("Progressive", &long);
        assert_eq!(line.len(), "Progressive: ".len() + CONTEXT_EXCERPT_CHARS + 3);
        assert!(line.ends_with("..."));
    }
}
