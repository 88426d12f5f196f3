//! Session tracking across runs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Unique identifier for a tracked session
pub type SessionId = Uuid;

/// What was started
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub topic: String,
    /// `debate`, `discussion`, `policy_analysis`, `battle`, ...
    pub mode: String,
    pub model_a: String,
    pub model_b: String,
    pub tools_enabled: bool,
    pub max_turns: u32,
}

/// One tracked run
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: SessionId,
    #[serde(flatten)]
    pub info: SessionInfo,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub turns_completed: u32,
}

impl Session {
    /// Seconds between start and end, once ended
    pub fn duration_secs(&self) -> Option<f64> {
        self.ended_at
            .map(|end| (end - self.started_at).num_milliseconds() as f64 / 1000.0)
    }

    /// True when the full turn budget was used
    pub fn is_completed(&self) -> bool {
        self.turns_completed >= self.info.max_turns
    }
}

/// Aggregate figures over all sessions
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub total_sessions: usize,
    pub completed_sessions: usize,
    pub completion_rate: f64,
    pub total_turns: u32,
    pub average_turns: f64,
    pub sessions: Vec<Session>,
}

/// Records every run started in this process
#[derive(Debug, Default)]
pub struct SessionTracker {
    sessions: Vec<Session>,
    current: Option<SessionId>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a run; it becomes the current session
    pub fn start(&mut self, info: SessionInfo) -> SessionId {
        let id = Uuid::new_v4();
        self.sessions.push(Session {
            id,
            info,
            started_at: Utc::now(),
            ended_at: None,
            turns_completed: 0,
        });
        self.current = Some(id);
        id
    }

    /// Close the current session. Returns `None` when nothing is running.
    pub fn end(&mut self, turns_completed: u32) -> Option<&Session> {
        let id = self.current.take()?;
        let session = self.sessions.iter_mut().find(|s| s.id == id)?;
        session.ended_at = Some(Utc::now());
        session.turns_completed = turns_completed;
        Some(session)
    }

    pub fn current(&self) -> Option<&Session> {
        let id = self.current?;
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn summary(&self) -> SessionSummary {
        let total_sessions = self.sessions.len();
        let completed_sessions = self.sessions.iter().filter(|s| s.is_completed()).count();
        let total_turns: u32 = self.sessions.iter().map(|s| s.turns_completed).sum();
        let (completion_rate, average_turns) = if total_sessions == 0 {
            (0.0, 0.0)
        } else {
            (
                completed_sessions as f64 / total_sessions as f64,
                total_turns as f64 / total_sessions as f64,
            )
        };

        SessionSummary {
            total_sessions,
            completed_sessions,
            completion_rate,
            total_turns,
            average_turns,
            sessions: self.sessions.clone(),
        }
    }
}
