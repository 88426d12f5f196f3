//! Cleanup of model-generated tool arguments
//!
//! Models routinely add bookkeeping keys (`index`, `step`, `call_id`, ...)
//! that no tool declares. [`ArgumentFilter`] strips those before dispatch and
//! builds the reduced argument set used for the single repair retry.

use serde_json::{Map, Value};

/// Keys models add that tools never expect
pub const PROBLEMATIC_PARAMS: &[&str] = &[
    "index", "step", "order", "position", "id", "number", "sequence", "count", "rank",
    "priority", "level", "stage", "phase", "iteration", "turn", "round", "cycle", "attempt",
    "try", "run", "execution", "call_id", "request_id", "session_id", "timestamp", "time",
    "task_id", "process_id", "batch_id", "job_id", "thread_id",
];

/// Parameter names accepted when a tool declares no schema
pub const COMMON_PARAMS: &[&str] = &[
    "query", "input", "text", "question", "search_query", "q", "competitor_urls", "niche",
    "target_audience", "content_goals", "extract_social_media", "extract_content_themes",
    "max_results", "limit", "url", "urls", "data",
];

/// Keys tried, in order, for the parameter-repair retry
pub const ESSENTIAL_PARAMS: &[&str] = &[
    "query", "search_query", "q", "input", "text", "question", "competitor_urls", "niche",
    "target_audience", "content_goals", "max_videos", "max_results", "limit", "url", "urls",
];

/// Conventional key for a lone string argument
const DEFAULT_KEY: &str = "query";

const JUNK_NAMES: &[&str] = &["temp", "tmp", "debug", "test"];

/// Filters tool arguments against a tool's declared parameter names.
///
/// `expected` is `None` when the tool declares no schema; the common
/// parameter list stands in for it then.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArgumentFilter;

impl ArgumentFilter {
    pub fn new() -> Self {
        Self
    }

    /// Drop keys the tool does not expect.
    ///
    /// Keys the tool declares are always kept, so filtering an already clean
    /// mapping returns it unchanged.
    pub fn filter(&self, args: &Map<String, Value>, expected: Option<&[String]>) -> Map<String, Value> {
        let expected = expected.filter(|names| !names.is_empty());

        let candidates: Map<String, Value> = args
            .iter()
            .filter(|(key, _)| is_expected(key, expected) || !is_problematic(key))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let clean: Map<String, Value> = candidates
            .iter()
            .filter(|(key, _)| match expected {
                Some(names) => is_expected(key, Some(names)),
                None => COMMON_PARAMS.contains(&key.as_str()),
            })
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        if !clean.is_empty() || args.is_empty() {
            return clean;
        }

        if let Some(rescued) = rescue_string_argument(args, expected) {
            return rescued;
        }

        match expected {
            Some(_) => Map::new(),
            None => candidates
                .into_iter()
                .filter(|(key, _)| is_reasonable_parameter(key))
                .collect(),
        }
    }

    /// Minimal argument set for the repair retry: the first essential key
    /// present in the original arguments, otherwise the first key that is
    /// not a known bookkeeping key.
    pub fn essentials(&self, args: &Map<String, Value>, expected: Option<&[String]>) -> Map<String, Value> {
        let expected = expected.filter(|names| !names.is_empty());

        let essential = ESSENTIAL_PARAMS
            .iter()
            .find_map(|key| args.get(*key).map(|value| (key.to_string(), value)))
            .or_else(|| {
                args.iter()
                    .find(|(key, _)| !is_problematic(key))
                    .map(|(key, value)| (key.clone(), value))
            });

        let mut reduced = Map::new();
        if let Some((key, value)) = essential {
            let key = match expected {
                Some(names) if !names.contains(&key) => preferred_key(names),
                _ => key,
            };
            reduced.insert(key, value.clone());
        }
        reduced
    }

    /// Keys in `args` that are on the bookkeeping deny-list
    pub fn problematic_keys<'a>(&self, args: &'a Map<String, Value>) -> Vec<&'a str> {
        args.keys()
            .map(String::as_str)
            .filter(|key| is_problematic(key))
            .collect()
    }
}

fn is_expected(key: &str, expected: Option<&[String]>) -> bool {
    expected.is_some_and(|names| names.iter().any(|n| n == key))
}

fn is_problematic(key: &str) -> bool {
    PROBLEMATIC_PARAMS.contains(&key) || key.to_lowercase().ends_with("_id")
}

/// Everything was filtered away: keep the first string argument under the
/// most plausible key.
fn rescue_string_argument(
    args: &Map<String, Value>,
    expected: Option<&[String]>,
) -> Option<Map<String, Value>> {
    let value = args
        .iter()
        .filter(|(key, _)| !is_problematic(key))
        .chain(args.iter())
        .find_map(|(_, v)| v.as_str().filter(|s| !s.trim().is_empty()))?;

    let key = match expected {
        Some(names) => preferred_key(names),
        None => DEFAULT_KEY.to_string(),
    };

    let mut rescued = Map::new();
    rescued.insert(key, Value::String(value.to_string()));
    Some(rescued)
}

/// Declared key a stray value is moved under: `query` when declared,
/// otherwise the first declared parameter
fn preferred_key(names: &[String]) -> String {
    names
        .iter()
        .find(|n| n.as_str() == DEFAULT_KEY)
        .or_else(|| names.first())
        .cloned()
        .unwrap_or_else(|| DEFAULT_KEY.to_string())
}

/// Heuristic for names that look like real parameters rather than ids or
/// scratch keys
fn is_reasonable_parameter(name: &str) -> bool {
    let lower = name.to_lowercase();
    name.len() >= 2
        && !lower.ends_with("_id")
        && name.chars().any(|c| c != '_')
        && name.chars().all(|c| c == '_' || c.is_alphabetic())
        && !JUNK_NAMES.contains(&lower.as_str())
}
