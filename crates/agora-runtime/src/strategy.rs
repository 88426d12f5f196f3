//! Channel content-strategy workflow
//!
//! Unlike a contest there is no opponent and no judge: a fixed sequence of
//! [`Phase`]s, each answered by one [`Specialist`], runs through the same
//! [`TurnExecutor`] over one shared transcript. Every phase sees the prompts
//! and answers of the phases before it.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use agora_core::{ConversationState, Message, Side, StateError};
use agora_llm::{ModelProvider, ToolDispatcher};

use crate::event::{EventSink, TurnEvent};
use crate::executor::{ExecutorConfig, TurnExecutor, TurnRecord};
use crate::participant::{Contestant, Participant};

/// Leading instruction for every phase after the first
pub const STRATEGY_CONTINUATION: &str =
    "Please respond based on your specialized YouTube content strategy expertise.";

/// Default cap on the number of phases run
pub const DEFAULT_MAX_STEPS: u32 = 8;

const CONTENT_RESEARCHER_PERSONA: &str = "You are a YouTube content research expert. You study \
trends, viral content patterns and successful channels to find content opportunities.

Your focus:
- Trending topics and emerging opportunities in the niche
- Competitor channels and the strategies that work for them
- Content gaps with real viral potential
- Audience demographics, preferences and engagement patterns
- Keywords, tags and search optimization

Give actionable insights with specific examples. Favor ideas that are both promising and \
feasible to produce, and weigh seasonality, audience interest and competition.";

const COMPETITOR_ANALYST_PERSONA: &str = "You are a competitive intelligence expert for YouTube \
creators. You map the market around a channel and turn it into strategic positioning.

Your focus:
- Direct and indirect competitors in the niche
- Benchmarks: subscribers, views, engagement rates
- Formats, topics and styles that perform for competitors
- Upload schedules and publishing patterns
- Underserved segments and gaps to exploit

Prefer specific, quantifiable observations over generic ones. Concentrate on three to five key \
competitors and say how each finding should change the content strategy.";

const SCRIPT_WRITER_PERSONA: &str = "You are a YouTube script writer who creates engaging, \
high-retention videos.

Script structure:
- Hook (0-15s): grab attention with intrigue, a question or a bold statement
- Introduction (15-30s): preview what viewers will get
- Main content: clear sections with smooth transitions and engagement prompts
- Mid-video calls to action placed where they do not hurt retention
- Conclusion: strong recap and one clear next step

Write conversationally for the target audience, use pattern interrupts, and add pacing notes \
and timestamps. Balance entertainment with educational value.";

const THUMBNAIL_CREATOR_PERSONA: &str = "You are a YouTube thumbnail design expert focused on \
click-through rate.

Design principles:
- High contrast that stands out against the YouTube interface
- Large, bold text that stays readable at small sizes
- Expressive faces where relevant, with one clear focal point
- Curiosity without clickbait
- Consistent brand colors and styling across videos

Describe each concept in enough detail for a designer or an image generator: layout, colors, \
text placement and visual elements. Suggest an A/B variant for each.";

const ANALYTICS_PROCESSOR_PERSONA: &str = "You are a YouTube analytics expert who turns \
performance data into concrete decisions.

Metrics you reason about:
- Views, impressions, click-through rate and average view duration
- Likes, comments, shares and subscriber conversion
- Traffic sources, search terms and suggested-video performance
- Retention curves and returning versus new viewers

Recommend specific actions on titles and metadata, posting schedule, video length and format, \
thumbnail testing and community engagement. Base every recommendation on the data, not on \
generic advice.";

/// Who answers a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specialist {
    ContentResearcher,
    CompetitorAnalyst,
    ScriptWriter,
    ThumbnailCreator,
    AnalyticsProcessor,
}

impl Specialist {
    pub const ALL: [Specialist; 5] = [
        Specialist::ContentResearcher,
        Specialist::CompetitorAnalyst,
        Specialist::ScriptWriter,
        Specialist::ThumbnailCreator,
        Specialist::AnalyticsProcessor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Specialist::ContentResearcher => "Content Researcher",
            Specialist::CompetitorAnalyst => "Competitor Analyst",
            Specialist::ScriptWriter => "Script Writer",
            Specialist::ThumbnailCreator => "Thumbnail Creator",
            Specialist::AnalyticsProcessor => "Analytics Processor",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Specialist::ContentResearcher => "[CR]",
            Specialist::CompetitorAnalyst => "[CA]",
            Specialist::ScriptWriter => "[SW]",
            Specialist::ThumbnailCreator => "[TC]",
            Specialist::AnalyticsProcessor => "[AP]",
        }
    }

    pub fn persona(self) -> &'static str {
        match self {
            Specialist::ContentResearcher => CONTENT_RESEARCHER_PERSONA,
            Specialist::CompetitorAnalyst => COMPETITOR_ANALYST_PERSONA,
            Specialist::ScriptWriter => SCRIPT_WRITER_PERSONA,
            Specialist::ThumbnailCreator => THUMBNAIL_CREATOR_PERSONA,
            Specialist::AnalyticsProcessor => ANALYTICS_PROCESSOR_PERSONA,
        }
    }

    /// This specialist speaking through the given model
    pub fn participant(self, model: impl Into<String>) -> Participant {
        Participant::new(self.name(), self.icon(), self.persona(), model)
    }

    fn index(self) -> usize {
        match self {
            Specialist::ContentResearcher => 0,
            Specialist::CompetitorAnalyst => 1,
            Specialist::ScriptWriter => 2,
            Specialist::ThumbnailCreator => 3,
            Specialist::AnalyticsProcessor => 4,
        }
    }
}

/// One step of the workflow, in running order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Research,
    Analysis,
    Content,
    Thumbnail,
    Optimization,
    Calendar,
    Recommendations,
}

impl Phase {
    pub const ALL: [Phase; 7] = [
        Phase::Research,
        Phase::Analysis,
        Phase::Content,
        Phase::Thumbnail,
        Phase::Optimization,
        Phase::Calendar,
        Phase::Recommendations,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Phase::Research => "Research",
            Phase::Analysis => "Opportunity analysis",
            Phase::Content => "Content ideas and scripts",
            Phase::Thumbnail => "Thumbnail concepts",
            Phase::Optimization => "SEO and optimization",
            Phase::Calendar => "Content calendar",
            Phase::Recommendations => "Final recommendations",
        }
    }

    pub fn specialist(self) -> Specialist {
        match self {
            Phase::Research | Phase::Optimization | Phase::Recommendations => {
                Specialist::ContentResearcher
            }
            Phase::Analysis => Specialist::CompetitorAnalyst,
            Phase::Content => Specialist::ScriptWriter,
            Phase::Thumbnail => Specialist::ThumbnailCreator,
            Phase::Calendar => Specialist::AnalyticsProcessor,
        }
    }

    /// The human prompt that opens this phase
    pub fn prompt(self, brief: &ChannelBrief) -> String {
        let niche = &brief.niche;
        let audience = brief.audience();
        let goals = brief.goals_line();

        match self {
            Phase::Research => format!(
                "Conduct comprehensive research for YouTube content creation in the {niche} niche.\n\n\
                 Channel to analyze: {channel}\n\
                 Target audience: {audience}\n\
                 Content goals: {goals}\n\n\
                 Research tasks:\n\
                 1. Analyze competitor channels in the {niche} space\n\
                 2. Identify trending topics and viral content patterns\n\
                 3. Find content gaps and opportunities\n\
                 4. Research audience preferences and engagement patterns\n\
                 5. Identify keywords and SEO opportunities\n\n\
                 Give detailed insights with specific examples and actionable recommendations.",
                channel = brief.channel(),
            ),
            Phase::Analysis => "Based on the research so far, identify the best content opportunities.\n\n\
                 Analysis focus:\n\
                 1. Rank opportunities by viral potential against competition level\n\
                 2. Identify the most promising formats and styles\n\
                 3. Recommend video lengths and posting strategies\n\
                 4. Evaluate seasonal trends and timing\n\
                 5. Weigh production effort against expected return\n\n\
                 Target click-through rate, watch time, subscriber conversion and engagement. \
                 Give prioritized recommendations with a rationale for each."
                .to_string(),
            Phase::Content => format!(
                "Create content ideas and video scripts from the analysis.\n\n\
                 Niche: {niche}\nAudience: {audience}\nGoals: {goals}\n\n\
                 Deliverables:\n\
                 1. Five high-priority content ideas, each with an SEO title, a description, \
                 target keywords, expected performance and a unique hook\n\
                 2. Three complete scripts for the top ideas, each with a 15-second hook, \
                 structured flow, engagement elements, call-to-action placement and an \
                 estimated runtime\n\n\
                 Balance viral potential against how feasible each video is to produce."
            ),
            Phase::Thumbnail => format!(
                "Create thumbnail concepts for the main content ideas.\n\n\
                 Niche: {niche}\nAudience: {audience}\nFormat: YouTube, 1280x720 pixels\n\n\
                 For each idea give:\n\
                 1. A primary design: composition, colors and contrast, text overlay and its \
                 position, facial expression if any, background, brand elements\n\
                 2. An A/B test variant with a different approach\n\
                 3. A prompt ready for an AI image generator\n\n\
                 Aim for a high click-through rate without losing authenticity."
            ),
            Phase::Optimization => "Give SEO and optimization strategies for this content.\n\n\
                 1. YouTube SEO: title formulas, description templates, tags, end screens\n\
                 2. Algorithm: upload timing, early engagement, community posts, cross-platform promotion\n\
                 3. Tracking: metrics to watch, A/B tests, iteration plan\n\
                 4. Growth: collaborations, community building, subscriber conversion\n\n\
                 Make every recommendation specific and give an implementation timeline."
                .to_string(),
            Phase::Calendar => format!(
                "Create a content calendar and posting schedule for the next 30 to 60 days.\n\n\
                 Goals: {goals}\nAudience: {audience}\n\n\
                 Deliverables:\n\
                 1. A 30-day calendar: video topics and titles, posting dates and times, \
                 a mix of content types, trend alignment, cross-promotion\n\
                 2. A production schedule: timelines, resources, buffer time, batching\n\
                 3. Milestones: weekly and monthly targets with the KPIs that measure them\n\n\
                 Account for audience activity, competition and seasonal trends."
            ),
            Phase::Recommendations => format!(
                "Synthesize everything above into a final action plan.\n\n\
                 1. Immediate actions (next 7 days)\n\
                 2. Short-term strategy (next 30 days)\n\
                 3. Long-term growth plan (3 to 6 months)\n\
                 4. Success metrics and KPIs\n\
                 5. Risks, backup strategies and algorithm changes to prepare for\n\n\
                 End with a clear roadmap for growing a channel in the {niche} niche."
            ),
        }
    }
}

/// What the workflow is asked to plan for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelBrief {
    pub niche: String,
    pub channel_url: Option<String>,
    pub target_audience: Option<String>,
    pub goals: Vec<String>,
}

impl ChannelBrief {
    pub fn new(niche: impl Into<String>) -> Self {
        Self {
            niche: niche.into(),
            channel_url: None,
            target_audience: None,
            goals: Vec::new(),
        }
    }

    pub fn with_channel(mut self, url: impl Into<String>) -> Self {
        self.channel_url = Some(url.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.target_audience = Some(audience.into());
        self
    }

    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goals.push(goal.into());
        self
    }

    fn channel(&self) -> &str {
        self.channel_url.as_deref().unwrap_or("none given, plan a new channel")
    }

    fn audience(&self) -> &str {
        self.target_audience.as_deref().unwrap_or("general YouTube viewers")
    }

    fn goals_line(&self) -> String {
        if self.goals.is_empty() {
            "grow subscribers and views".to_string()
        } else {
            self.goals.join(", ")
        }
    }
}

/// Setup problems that stop a workflow before its first phase
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("the channel brief needs a niche")]
    EmptyNiche,
    #[error("max_steps must be at least 1")]
    ZeroSteps,
    #[error("tools were enabled but the tool registry is empty")]
    NoTools,
    #[error("invalid workflow state: {0}")]
    State(#[from] StateError),
}

/// Configuration for a workflow run
#[derive(Debug, Clone)]
pub struct StrategyConfig {
    /// Upper bound on phases run
    pub max_steps: u32,
    pub tools_enabled: bool,
    /// Sampling temperature for every phase
    pub temperature: f32,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            tools_enabled: false,
            temperature: ExecutorConfig::default().temperature,
        }
    }
}

/// What one phase produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseOutcome {
    pub phase: Phase,
    pub specialist: Specialist,
    pub content: String,
    pub tool_calls: usize,
    pub failed: bool,
}

impl PhaseOutcome {
    fn new(phase: Phase, record: TurnRecord) -> Self {
        Self {
            phase,
            specialist: phase.specialist(),
            content: record.content,
            tool_calls: record.tool_calls,
            failed: record.failed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    Completed,
    CompletedWithErrors,
    /// `max_steps` stopped the run before the last phase
    StepLimitReached,
}

/// Everything a finished workflow produced
#[derive(Debug, Clone, Serialize)]
pub struct StrategyReport {
    pub brief: ChannelBrief,
    pub phases: Vec<PhaseOutcome>,
    pub status: WorkflowStatus,
    pub state: ConversationState,
}

impl StrategyReport {
    /// Content of a phase, if it ran
    pub fn output(&self, phase: Phase) -> Option<&str> {
        self.phases
            .iter()
            .find(|p| p.phase == phase)
            .map(|p| p.content.as_str())
    }

    pub fn failed_phases(&self) -> usize {
        self.phases.iter().filter(|p| p.failed).count()
    }
}

/// Runs the phases in order with one contestant per specialist
#[derive(Debug)]
pub struct StrategyWorkflow {
    pub config: StrategyConfig,
    crew: Vec<Contestant>,
    executor: TurnExecutor,
    events: EventSink,
}

impl StrategyWorkflow {
    /// Build the crew with `member`, called once per specialist
    pub fn new(
        mut member: impl FnMut(Specialist) -> Contestant,
        dispatcher: ToolDispatcher,
        config: StrategyConfig,
    ) -> Self {
        let crew = Specialist::ALL.iter().map(|s| member(*s)).collect();
        let executor = TurnExecutor::new(
            dispatcher,
            ExecutorConfig {
                temperature: config.temperature,
                continuation: STRATEGY_CONTINUATION.to_string(),
            },
        );
        Self {
            config,
            crew,
            executor,
            events: EventSink::disabled(),
        }
    }

    /// Every specialist on the same catalog model
    pub fn from_provider(
        provider: &dyn ModelProvider,
        model: &str,
        dispatcher: ToolDispatcher,
        config: StrategyConfig,
    ) -> Self {
        Self::new(
            |s| Contestant::from_provider(s.participant(model), provider),
            dispatcher,
            config,
        )
    }

    /// Send presentation events to this sink
    pub fn with_events(mut self, events: EventSink) -> Self {
        self.executor = self.executor.with_events(events.clone());
        self.events = events;
        self
    }

    pub fn member(&self, specialist: Specialist) -> &Contestant {
        &self.crew[specialist.index()]
    }

    /// Phases that a run with the current config will execute
    pub fn planned_phases(&self) -> &'static [Phase] {
        let all: &'static [Phase] = &Phase::ALL;
        &all[..(self.config.max_steps as usize).min(all.len())]
    }

    /// Run the workflow for one brief.
    ///
    /// Fails only on invalid setup. A phase whose model fails records the
    /// error as its content and the next phase still runs.
    pub async fn run(&self, brief: &ChannelBrief) -> Result<StrategyReport, StrategyError> {
        if brief.niche.trim().is_empty() {
            return Err(StrategyError::EmptyNiche);
        }
        if self.config.max_steps == 0 {
            return Err(StrategyError::ZeroSteps);
        }
        let tools_enabled = self.config.tools_enabled;
        if tools_enabled && self.executor.dispatcher().registry().is_empty() {
            return Err(StrategyError::NoTools);
        }

        let phases = self.planned_phases();
        let mut state = ConversationState::new(
            &Phase::Research.prompt(brief),
            Side::A,
            phases.len() as u32,
        )?;

        info!(niche = %brief.niche, phases = phases.len(), tools_enabled, "Strategy workflow started");
        self.events.emit(TurnEvent::RunStarted {
            max_turns: state.max_turns,
            first_speaker: state.current_speaker,
        });

        let mut outcomes = Vec::with_capacity(phases.len());
        for (step, phase) in phases.iter().enumerate() {
            if step > 0 {
                state.push(Message::human(phase.prompt(brief)));
            }
            let contestant = self.member(phase.specialist());
            let record = self.executor.run_turn(&mut state, contestant, tools_enabled).await;
            if record.failed {
                warn!(phase = ?phase, specialist = contestant.name(), "Phase ended with an error");
            }
            outcomes.push(PhaseOutcome::new(*phase, record));
        }

        let status = if phases.len() < Phase::ALL.len() {
            WorkflowStatus::StepLimitReached
        } else if outcomes.iter().any(|o| o.failed) {
            WorkflowStatus::CompletedWithErrors
        } else {
            WorkflowStatus::Completed
        };

        info!(phases = outcomes.len(), status = ?status, "Strategy workflow finished");
        self.events.emit(TurnEvent::RunFinished {
            turns: state.turn_count,
            verdict: None,
        });

        Ok(StrategyReport {
            brief: brief.clone(),
            phases: outcomes,
            status,
            state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use agora_core::Role;
    use agora_llm::{tools::builtin_registry, MockModel, ToolRegistry};

    fn workflow(model: Arc<MockModel>, max_steps: u32) -> StrategyWorkflow {
        let config = StrategyConfig {
            max_steps,
            ..StrategyConfig::default()
        };
        StrategyWorkflow::from_provider(&model, "mock", ToolDispatcher::new(builtin_registry()), config)
    }

    fn brief() -> ChannelBrief {
        ChannelBrief::new("home espresso")
            .with_audience("beginner baristas")
            .with_goal("increase subscribers")
            .with_goal("viral shorts")
    }

    #[test]
    fn test_phase_order_and_specialists() {
        let specialists: Vec<_> = Phase::ALL.iter().map(|p| p.specialist()).collect();
        assert_eq!(
            specialists,
            vec![
                Specialist::ContentResearcher,
                Specialist::CompetitorAnalyst,
                Specialist::ScriptWriter,
                Specialist::ThumbnailCreator,
                Specialist::ContentResearcher,
                Specialist::AnalyticsProcessor,
                Specialist::ContentResearcher,
            ]
        );
        for (i, s) in Specialist::ALL.iter().enumerate() {
            assert_eq!(s.index(), i);
        }
    }

    #[test]
    fn test_prompts_carry_the_brief() {
        let brief = brief();
        let research = Phase::Research.prompt(&brief);
        assert!(research.contains("home espresso niche"));
        assert!(research.contains("beginner baristas"));
        assert!(research.contains("increase subscribers, viral shorts"));
        assert!(research.contains("plan a new channel"));

        let defaults = ChannelBrief::new("chess").with_channel("https://youtube.com/@chess");
        let research = Phase::Research.prompt(&defaults);
        assert!(research.contains("https://youtube.com/@chess"));
        assert!(research.contains("grow subscribers and views"));
        assert!(Phase::Recommendations.prompt(&defaults).contains("chess niche"));
    }

    #[tokio::test]
    async fn test_phases_share_one_transcript() {
        let model = Arc::new(MockModel::new(
            (1..=7).map(|i| format!("answer {}", i)).collect(),
        ));
        let report = workflow(model.clone(), DEFAULT_MAX_STEPS).run(&brief()).await.unwrap();

        assert_eq!(report.status, WorkflowStatus::Completed);
        assert_eq!(report.phases.len(), 7);
        assert_eq!(report.output(Phase::Calendar), Some("answer 6"));
        assert_eq!(report.state.turn_count, 7);
        // Seven phase prompts and seven answers
        assert_eq!(report.state.transcript.len(), 14);

        let requests = model.recorded_requests();
        assert_eq!(requests.len(), 7);
        // First phase: persona merged into the research prompt
        assert_eq!(requests[0].messages.len(), 1);
        assert!(requests[0].messages[0].content.starts_with("You are a YouTube content research expert"));

        // Thumbnail phase: persona line, then three earlier prompt/answer pairs and its own prompt
        let thumbnail = &requests[3];
        assert_eq!(thumbnail.messages.len(), 8);
        assert!(thumbnail.messages[0].content.starts_with("You are a YouTube thumbnail design expert"));
        assert!(thumbnail.messages[0].content.ends_with(STRATEGY_CONTINUATION));
        assert_eq!(thumbnail.messages[2].content, "answer 1");
        assert_eq!(thumbnail.messages[7].role, Role::Human);
        assert!(thumbnail.messages[7].content.starts_with("Create thumbnail concepts"));
    }

    #[tokio::test]
    async fn test_step_limit_stops_early() {
        let model = Arc::new(MockModel::constant("ok"));
        let report = workflow(model.clone(), 3).run(&brief()).await.unwrap();

        assert_eq!(report.status, WorkflowStatus::StepLimitReached);
        let phases: Vec<_> = report.phases.iter().map(|p| p.phase).collect();
        assert_eq!(phases, vec![Phase::Research, Phase::Analysis, Phase::Content]);
        assert_eq!(model.call_count(), 3);
    }

    #[tokio::test]
    async fn test_unavailable_specialist_does_not_stop_the_run() {
        let model = Arc::new(MockModel::constant("fine"));
        let flow = StrategyWorkflow::new(
            |s| match s {
                Specialist::ThumbnailCreator => {
                    Contestant::unavailable(s.participant("gemini-pro"), "GOOGLE_API_KEY is not set")
                }
                _ => Contestant::new(s.participant("mock"), model.clone()),
            },
            ToolDispatcher::new(builtin_registry()),
            StrategyConfig::default(),
        );
        let report = flow.run(&brief()).await.unwrap();

        assert_eq!(report.status, WorkflowStatus::CompletedWithErrors);
        assert_eq!(report.failed_phases(), 1);
        assert_eq!(report.output(Phase::Thumbnail), Some("Error: GOOGLE_API_KEY is not set"));
        assert_eq!(report.output(Phase::Recommendations), Some("fine"));
        assert_eq!(model.call_count(), 6);
    }

    #[tokio::test]
    async fn test_invalid_setup_fails_fast() {
        let model = Arc::new(MockModel::constant("unused"));
        let err = workflow(model.clone(), 8).run(&ChannelBrief::new("  ")).await.unwrap_err();
        assert!(matches!(err, StrategyError::EmptyNiche));

        let err = workflow(model.clone(), 0).run(&brief()).await.unwrap_err();
        assert!(matches!(err, StrategyError::ZeroSteps));

        let config = StrategyConfig {
            tools_enabled: true,
            ..StrategyConfig::default()
        };
        let flow = StrategyWorkflow::from_provider(&model, "mock", ToolDispatcher::new(ToolRegistry::new()), config);
        assert!(matches!(flow.run(&brief()).await.unwrap_err(), StrategyError::NoTools));
        assert_eq!(model.call_count(), 0);
    }

    #[test]
    fn test_report_serializes_snake_case() {
        let outcome = PhaseOutcome {
            phase: Phase::Thumbnail,
            specialist: Specialist::ThumbnailCreator,
            content: "Bold red text".into(),
            tool_calls: 0,
            failed: false,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["phase"], "thumbnail");
        assert_eq!(json["specialist"], "thumbnail_creator");
        assert_eq!(serde_json::to_value(WorkflowStatus::StepLimitReached).unwrap(), "step_limit_reached");
    }
}
