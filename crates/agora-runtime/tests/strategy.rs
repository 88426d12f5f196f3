//! Content-strategy workflow runs with scripted models

use std::sync::Arc;

use agora_core::Role;
use agora_llm::{tools::builtin_registry, MockModel, MockStep, RawToolCall, ToolDispatcher};
use agora_runtime::{
    ChannelBrief, EventSink, Phase, Specialist, StrategyConfig, StrategyWorkflow, TurnEvent,
    WorkflowStatus,
};
use serde_json::json;

#[tokio::test]
async fn research_phase_uses_tools_and_later_phases_see_the_result() {
    // Research asks for the date, answers, then every later phase answers in prose
    let mut steps = vec![
        MockStep::ToolCalls {
            text: "Checking what is current. ".into(),
            calls: vec![RawToolCall::new("call_1", "datetime", json!({}))],
        },
        MockStep::text("Trends as of today: pour-over is rising."),
    ];
    steps.extend((2..=7).map(|i| MockStep::text(format!("phase {} done", i))));
    let model = Arc::new(MockModel::scripted(steps));

    let (sink, mut rx) = EventSink::channel();
    let config = StrategyConfig {
        tools_enabled: true,
        ..StrategyConfig::default()
    };
    let workflow = StrategyWorkflow::from_provider(
        &model,
        "mock",
        ToolDispatcher::new(builtin_registry()),
        config,
    )
    .with_events(sink);

    let brief = ChannelBrief::new("home espresso").with_goal("increase subscribers");
    let report = workflow.run(&brief).await.unwrap();

    assert_eq!(report.status, WorkflowStatus::Completed);
    assert_eq!(report.phases[0].tool_calls, 1);
    assert_eq!(
        report.output(Phase::Research),
        Some("Trends as of today: pour-over is rising.")
    );
    assert_eq!(report.output(Phase::Recommendations), Some("phase 7 done"));
    assert_eq!(report.phases[1].specialist, Specialist::CompetitorAnalyst);

    // The analysis request carries the tool exchange and the research answer
    let requests = model.recorded_requests();
    assert_eq!(requests.len(), 8);
    let analysis = &requests[2];
    assert!(analysis.messages.iter().any(|m| m.role == Role::Tool));
    assert!(analysis
        .messages
        .iter()
        .any(|m| m.content == "Trends as of today: pour-over is rising."));
    assert!(analysis.messages[0].content.starts_with("You are a competitive intelligence expert"));

    let mut started = Vec::new();
    let mut finished = false;
    while let Ok(event) = rx.try_recv() {
        match event {
            TurnEvent::TurnStarted { speaker, .. } => started.push(speaker),
            TurnEvent::RunFinished { turns, verdict } => {
                assert_eq!(turns, 7);
                assert!(verdict.is_none());
                finished = true;
            }
            _ => {}
        }
    }
    assert!(finished);
    assert_eq!(
        started,
        vec![
            "Content Researcher",
            "Competitor Analyst",
            "Script Writer",
            "Thumbnail Creator",
            "Content Researcher",
            "Analytics Processor",
            "Content Researcher",
        ]
    );
}

#[tokio::test]
async fn report_json_lists_phases_in_order() {
    let model = Arc::new(MockModel::constant("Plan."));
    let workflow = StrategyWorkflow::from_provider(
        &model,
        "mock",
        ToolDispatcher::new(builtin_registry()),
        StrategyConfig::default(),
    );
    let report = workflow
        .run(&ChannelBrief::new("retro gaming").with_audience("30-somethings"))
        .await
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["status"], "completed");
    assert_eq!(json["brief"]["target_audience"], "30-somethings");
    let phases: Vec<_> = json["phases"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["phase"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        phases,
        vec!["research", "analysis", "content", "thumbnail", "optimization", "calendar", "recommendations"]
    );
}
