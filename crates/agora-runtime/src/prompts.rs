//! Seed prompts and per-kind prompt text

use serde::{Deserialize, Serialize};

/// Added after the persona on every turn except the opening one
pub const DEBATE_CONTINUATION: &str =
    "Please respond to the ongoing debate by addressing the previous points made and continuing the discussion.";

/// Battle counterpart of [`DEBATE_CONTINUATION`]
pub const BATTLE_CONTINUATION: &str =
    "Please respond to your opponent's last verse and keep the battle going.";

/// Default number of battle rounds per rapper
pub const DEFAULT_BATTLE_ROUNDS: u32 = 3;

/// Suggested battle topics
pub const BATTLE_TOPICS: &[&str] = &[
    "Who's the real king of hip-hop?",
    "East Coast vs West Coast supremacy",
    "Old school vs new school rap",
    "Who has the better flow?",
    "Street credibility vs commercial success",
    "Lyrical complexity vs crowd appeal",
    "Who influenced hip-hop culture more?",
    "Best rapper alive debate",
    "Who has the better discography?",
    "Freestyle vs written bars supremacy",
];

/// Shape of a political run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebateMode {
    /// Structured point-by-point debate
    #[default]
    Debate,
    /// Open discussion of a topic
    Discussion,
    /// Policy implications from both perspectives
    PolicyAnalysis,
}

impl DebateMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Debate => "debate",
            Self::Discussion => "discussion",
            Self::PolicyAnalysis => "policy_analysis",
        }
    }

    /// Turn budget when none is given
    pub fn default_turns(self) -> u32 {
        match self {
            Self::Debate => 8,
            Self::Discussion => 6,
            Self::PolicyAnalysis => 10,
        }
    }

    /// Seed prompt for a topic
    pub fn seed(self, topic: &str) -> String {
        let topic = topic.trim();
        match self {
            Self::Debate => format!(
                "We're having a structured political debate on the topic: \"{topic}\"\n\n\
                 This will be a respectful debate between progressive and conservative perspectives.\n\n\
                 Each response should:\n\
                 1. Address the previous point made\n\
                 2. Present your political perspective clearly\n\
                 3. Use examples, evidence and policy proposals\n\
                 4. Be passionate but respectful and constructive\n\
                 5. Stay true to your political alignment\n\n\
                 Let's begin the debate!"
            ),
            Self::Discussion => format!(
                "Let's have a political discussion about: {topic}. Please share your perspectives \
                 from your political viewpoints and engage constructively."
            ),
            Self::PolicyAnalysis => format!(
                "Let's analyze the policy implications of: {topic}\n\n\
                 Please provide a thorough analysis from your political perspective, including:\n\
                 - Policy recommendations\n\
                 - Potential benefits and drawbacks\n\
                 - Implementation considerations\n\
                 - Long-term implications\n\
                 - How this aligns with your political philosophy\n\n\
                 Let's have a substantive policy discussion."
            ),
        }
    }
}

impl std::str::FromStr for DebateMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "debate" => Ok(Self::Debate),
            "discussion" => Ok(Self::Discussion),
            "policy" | "policy_analysis" => Ok(Self::PolicyAnalysis),
            other => Err(format!("unknown debate mode '{}'", other)),
        }
    }
}

/// Seed prompt for a rap battle
pub fn battle_seed(topic: &str, rapper_a: &str, rapper_b: &str) -> String {
    format!(
        "RAP BATTLE TOPIC: \"{}\"\n\n\
         This is an intense rap battle between two legendary rappers. Each rapper drops verses in \
         alternating rounds, trying to outdo the opponent with superior bars, wordplay and crowd appeal.\n\n\
         Round format:\n\
         - Round 1: opening verses\n\
         - Round 2: response and escalation\n\
         - Round 3: final round and closer\n\n\
         {} vs {}\n\n\
         LET THE BATTLE BEGIN!",
        topic.trim(),
        rapper_a,
        rapper_b
    )
}

/// Turn budget for a battle: every rapper gets one verse per round
pub fn battle_turns(rounds: u32) -> u32 {
    rounds.saturating_mul(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeds_embed_topic() {
        for mode in [DebateMode::Debate, DebateMode::Discussion, DebateMode::PolicyAnalysis] {
            assert!(mode.seed("  carbon tax ").contains("carbon tax"));
        }
        let seed = battle_seed("Old school vs new school rap", "Nas", "Drake");
        assert!(seed.contains("Nas vs Drake"));
        assert!(seed.contains("\"Old school vs new school rap\""));
    }

    #[test]
    fn test_mode_parsing_and_defaults() {
        assert_eq!("policy-analysis".parse::<DebateMode>(), Ok(DebateMode::PolicyAnalysis));
        assert_eq!("Discussion".parse::<DebateMode>(), Ok(DebateMode::Discussion));
        assert!("shouting".parse::<DebateMode>().is_err());
        assert_eq!(DebateMode::default().default_turns(), 8);
    }

    #[test]
    fn test_battle_turns() {
        assert_eq!(battle_turns(DEFAULT_BATTLE_ROUNDS), 6);
        assert_eq!(battle_turns(0), 0);
    }
}
