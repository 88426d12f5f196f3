//! End-to-end runs with scripted models

use std::sync::Arc;

use agora_core::{Outcome, Role, Side};
use agora_judge::{Judge, Rubric};
use agora_llm::{tools::builtin_registry, MockModel, ToolDispatcher};
use agora_runtime::{
    battle_seed, battle_turns, find_rapper, Contestant, DebateMode, EventSink, ExecutorConfig,
    Orchestrator, OrchestratorConfig, Participant, TurnEvent, BATTLE_CONTINUATION,
};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn judge_reply(rubric: &Rubric, value: f64) -> String {
    let mut reply = Map::new();
    for key in rubric.criterion_keys() {
        reply.insert(key.to_string(), json!(value));
    }
    reply.insert(rubric.feedback_keys.strengths.to_string(), json!(["Clear"]));
    reply.insert(rubric.feedback_keys.weaknesses.to_string(), json!(["Short"]));
    reply.insert(rubric.feedback_keys.comment.to_string(), json!("Fine."));
    Value::Object(reply).to_string()
}

fn debaters(model: Arc<MockModel>) -> (Contestant, Contestant) {
    (
        Contestant::new(Participant::progressive("mock"), model.clone()),
        Contestant::new(Participant::conservative("mock"), model),
    )
}

#[tokio::test]
async fn four_turn_scripted_run_is_a_tie() {
    let script = MockModel::new(vec!["A1".into(), "B1".into(), "A2".into(), "B2".into()]);
    let (a, b) = debaters(Arc::new(script));

    let rubric = Rubric::debate();
    let judge_model = Arc::new(MockModel::constant(&judge_reply(&rubric, 6.25)));
    let mut orch = Orchestrator::new(a, b, ToolDispatcher::new(builtin_registry()), OrchestratorConfig::default())
        .with_judge(Judge::new(rubric, judge_model));

    let report = orch.run(&DebateMode::Debate.seed("Remote work"), 4, false).await.unwrap();

    assert_eq!(report.turn_texts(), vec!["A1", "B1", "A2", "B2"]);
    assert_eq!(report.state.turn_count, 4);
    assert_eq!(
        report.state.transcript.iter().filter(|m| m.role == Role::Assistant).count(),
        4
    );

    let verdict = report.verdict.unwrap();
    assert_eq!(verdict.total_a, 100.0);
    assert_eq!(verdict.total_b, 100.0);
    assert_eq!(verdict.winner, Outcome::Tie);
    assert_eq!(verdict.margin, 0.0);
    assert!(report.scores.iter().all(|s| s.total() == 50.0 && !s.fallback));
}

#[tokio::test]
async fn tool_enabled_run_with_smart_mock() {
    let model = Arc::new(MockModel::smart());
    let (a, b) = debaters(model.clone());
    let judge = Judge::new(Rubric::debate(), model.clone());
    let (sink, mut rx) = EventSink::channel();

    let mut orch = Orchestrator::new(a, b, ToolDispatcher::new(builtin_registry()), OrchestratorConfig::default())
        .with_judge(judge)
        .with_events(sink);
    let report = orch.run("Debate: nuclear energy", 2, true).await.unwrap();

    assert_eq!(report.state.turn_count, 2);
    assert_eq!(report.turns[0].tool_calls, 1);
    assert!(report.state.transcript.iter().any(|m| m.role == Role::Tool));
    assert_eq!(report.turn_texts().len(), 2);
    assert!(report.scores.iter().all(|s| !s.fallback));

    let mut tool_results = 0;
    let mut finished = false;
    while let Ok(event) = rx.try_recv() {
        match event {
            TurnEvent::ToolResult { result, .. } => {
                assert!(!result.starts_with("Error"));
                tool_results += 1;
            }
            TurnEvent::RunFinished { turns, verdict } => {
                assert_eq!(turns, 2);
                assert!(verdict.is_some());
                finished = true;
            }
            _ => {}
        }
    }
    assert_eq!(tool_results, 1);
    assert!(finished);
}

#[tokio::test]
async fn rap_battle_runs_two_verses_per_round() {
    let eminem = find_rapper("eminem").unwrap().participant("mock");
    let kendrick = find_rapper("kendrick").unwrap().participant("mock");
    let seed = battle_seed("Who has the better flow?", &eminem.name, &kendrick.name);

    let model = Arc::new(MockModel::smart());
    let config = OrchestratorConfig {
        first_speaker: Side::A,
        executor: ExecutorConfig {
            continuation: BATTLE_CONTINUATION.to_string(),
            ..ExecutorConfig::default()
        },
    };
    let mut orch = Orchestrator::new(
        Contestant::new(eminem, model.clone()),
        Contestant::new(kendrick, model.clone()),
        ToolDispatcher::new(builtin_registry()),
        config,
    )
    .with_judge(Judge::new(Rubric::rap_battle(), model));

    let report = orch.run(&seed, battle_turns(2), false).await.unwrap();
    assert_eq!(report.turns.len(), 4);
    let names: Vec<&str> = report.turns.iter().map(|t| t.speaker_name.as_str()).collect();
    assert_eq!(names, vec!["Eminem", "Kendrick Lamar", "Eminem", "Kendrick Lamar"]);

    let verdict = report.verdict.unwrap();
    assert_eq!(verdict.turns_scored, 4);
    assert!(verdict.category("best_flow").is_some());
    assert!(["legendary", "fire", "solid", "weak"].contains(&verdict.quality.as_str()));
}

#[tokio::test]
async fn failing_side_still_uses_its_turns() {
    let a = Contestant::new(Participant::progressive("mock"), Arc::new(MockModel::constant("point")));
    let b = Contestant::unavailable(Participant::conservative("gemini-pro"), "Missing credentials");
    let mut orch = Orchestrator::new(a, b, ToolDispatcher::new(builtin_registry()), OrchestratorConfig::default())
        .with_judge(Judge::new(Rubric::debate(), Arc::new(MockModel::constant("garbage"))));

    let report = orch.run("topic", 4, false).await.unwrap();
    assert_eq!(report.state.turn_count, 4);
    assert_eq!(report.turn_texts(), vec!["point", "Error: Missing credentials", "point", "Error: Missing credentials"]);
    assert_eq!(report.scores.len(), 4);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn speakers_strictly_alternate(max_turns in 1u32..16, b_first in any::<bool>()) {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        let report = runtime.block_on(async {
            let (a, b) = debaters(Arc::new(MockModel::constant("turn")));
            let config = OrchestratorConfig {
                first_speaker: if b_first { Side::B } else { Side::A },
                ..OrchestratorConfig::default()
            };
            let mut orch = Orchestrator::new(a, b, ToolDispatcher::new(builtin_registry()), config);
            orch.run("topic", max_turns, false).await.unwrap()
        });

        prop_assert_eq!(report.state.turn_count, max_turns);
        prop_assert_eq!(report.turns.len() as u32, max_turns);
        let first = if b_first { Side::B } else { Side::A };
        for (i, turn) in report.turns.iter().enumerate() {
            prop_assert_eq!(turn.turn_number, i as u32 + 1);
            let expected = if i % 2 == 0 { first } else { first.other() };
            prop_assert_eq!(turn.side, expected);
        }
    }
}
