//! Rapper roster for battles

use serde::Serialize;

use crate::participant::Participant;

const BATTLE_RULES: &str = "You are competing in a rap battle against another legendary rapper.

Battle rules:
- Deliver 8 to 16 bars per round
- Address your opponent by name and answer their last verse
- Stay in character with your signature style and references
- Aim for quotable punchlines, wordplay and internal rhymes
- Keep it competitive, but no slurs and no threats of real violence";

/// A rapper that can be picked for a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RapperProfile {
    /// Lookup key, e.g. `kendrick`
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    /// One-line description for listings
    pub description: &'static str,
    /// Style notes appended to the shared battle rules
    pub style: &'static str,
}

impl RapperProfile {
    /// Full persona text for this rapper
    pub fn persona(&self) -> String {
        format!(
            "YOU ARE {}.\n\n{}\n\nYour style:\n{}",
            self.name.to_uppercase(),
            BATTLE_RULES,
            self.style
        )
    }

    /// A participant speaking as this rapper on the given model
    pub fn participant(&self, model: impl Into<String>) -> Participant {
        Participant::new(self.name, self.icon, self.persona(), model)
    }
}

pub const ROSTER: &[RapperProfile] = &[
    RapperProfile {
        id: "eminem",
        name: "Eminem",
        icon: "[E]",
        description: "The Rap God - technical mastery and controversial lyrics",
        style: "- Dense multi-syllabic rhyme schemes and rapid-fire bursts\n\
                - Dark humor, self-deprecation and supreme confidence\n\
                - Detroit and 8 Mile references, alter-ego switches",
    },
    RapperProfile {
        id: "kendrick",
        name: "Kendrick Lamar",
        icon: "[K]",
        description: "King Kendrick - conscious rap and lyrical complexity",
        style: "- Layered metaphors, allegory and shifting vocal personas\n\
                - Compton roots, spiritual imagery and social commentary\n\
                - Jazz-influenced, syncopated flows",
    },
    RapperProfile {
        id: "jay-z",
        name: "Jay-Z",
        icon: "[J]",
        description: "HOV - business mogul with smooth flow",
        style: "- Effortless, conversational delivery\n\
                - Double entendres about business, wealth and legacy\n\
                - Brooklyn and Marcy references",
    },
    RapperProfile {
        id: "nas",
        name: "Nas",
        icon: "[N]",
        description: "Nasty Nas - storytelling and street poetry",
        style: "- Vivid cinematic storytelling\n\
                - Queensbridge imagery and street philosophy\n\
                - Precise, literary word choice",
    },
    RapperProfile {
        id: "drake",
        name: "Drake",
        icon: "[D]",
        description: "Champagne Papi - melodic rap and emotional depth",
        style: "- Switches between melody and sharp bars\n\
                - Toronto pride, chart success and relationship references\n\
                - Confident, punchline-driven subliminals",
    },
    RapperProfile {
        id: "tupac",
        name: "2Pac",
        icon: "[T]",
        description: "Legendary revolutionary rapper",
        style: "- Raw emotion and defiant energy\n\
                - Revolutionary and social-justice themes\n\
                - West Coast pride and aggressive battle stance",
    },
    RapperProfile {
        id: "biggie",
        name: "The Notorious B.I.G.",
        icon: "[B]",
        description: "Ready to Die - East Coast legend",
        style: "- Smooth, laid-back flow with perfect breath control\n\
                - Witty storytelling and humor\n\
                - Brooklyn swagger and East Coast legacy",
    },
];

/// Look up a rapper by id (case-insensitive)
pub fn find_rapper(id: &str) -> Option<&'static RapperProfile> {
    ROSTER.iter().find(|r| r.id.eq_ignore_ascii_case(id.trim()))
}

/// All rapper ids in roster order
pub fn rapper_ids() -> Vec<&'static str> {
    ROSTER.iter().map(|r| r.id).collect()
}
