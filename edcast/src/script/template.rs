//! Two-speaker dialogue generation.
//!
//! A topic selects either a hand-written dialogue (exact match) or the
//! generic template with the topic filled in. Both paths are deterministic
//! and need no network.

use super::{Script, Topic};

/// The two fixed voices of every dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Speaker {
    /// Host; asks the questions.
    Mike,
    /// Expert; explains.
    Sara,
}

impl Speaker {
    /// Both speakers, host first.
    pub const ALL: [Self; 2] = [Self::Mike, Self::Sara];

    /// Label written before the colon.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mike => "Mike",
            Self::Sara => "Sara",
        }
    }
}

type Turn = (Speaker, &'static str);

/// A hand-written dialogue for one exact topic.
#[derive(Debug, PartialEq, Eq)]
pub struct AuthoredDialogue {
    /// Topic that selects this dialogue.
    pub topic: &'static str,
    turns: &'static [Turn],
}

impl AuthoredDialogue {
    /// Render the dialogue as a script.
    #[must_use]
    pub fn script(&self) -> Script {
        render(self.turns.iter().map(|&(speaker, text)| (speaker, text.to_owned())))
    }
}

const TOPIC_SLOT: &str = "{topic}";

static AUTHORED: [AuthoredDialogue; 3] = [
    AuthoredDialogue {
        topic: "How plants make oxygen",
        turns: &[
            (Speaker::Mike, "Hey Sara, how do plants actually make oxygen?"),
            (
                Speaker::Sara,
                "It's photosynthesis, Mike! Plants use sunlight, water, and CO2 to make food. Oxygen is the amazing byproduct!",
            ),
            (Speaker::Mike, "So they're like solar-powered food factories?"),
            (
                Speaker::Sara,
                "Exactly! Chlorophyll in leaves captures sunlight, roots pull up water, and tiny pores grab CO2 from air.",
            ),
            (Speaker::Mike, "Then what happens?"),
            (
                Speaker::Sara,
                "The magic occurs in chloroplasts! They combine everything using sun's energy to make glucose, and release oxygen we breathe!",
            ),
            (Speaker::Mike, "So every breath depends on plants?"),
            (
                Speaker::Sara,
                "Pretty much! One large tree makes enough oxygen for two people daily. Without photosynthesis, no oxygen, no us!",
            ),
            (
                Speaker::Mike,
                "Amazing! Plants keep us alive while feeding themselves.",
            ),
            (
                Speaker::Sara,
                "That's why protecting forests matters - they're our life support!",
            ),
        ],
    },
    AuthoredDialogue {
        topic: "Why the Sky is Blue",
        turns: &[
            (
                Speaker::Mike,
                "Hey Sara, why is the sky blue and not, say, green?",
            ),
            (
                Speaker::Sara,
                "It comes down to scattering, Mike! Sunlight looks white, but it carries every color of the rainbow.",
            ),
            (Speaker::Mike, "So what happens when it hits the air?"),
            (
                Speaker::Sara,
                "Tiny gas molecules bounce short wavelengths around much more than long ones. Blue light gets scattered all over the sky.",
            ),
            (Speaker::Mike, "Then why not violet? It's even shorter."),
            (
                Speaker::Sara,
                "Great catch! The sun sends less violet, some gets absorbed high up, and our eyes are more sensitive to blue.",
            ),
            (Speaker::Mike, "And sunsets turn orange because...?"),
            (
                Speaker::Sara,
                "At sunset the light crosses much more air, so the blue is scattered away before it reaches us. Reds and oranges make it through!",
            ),
            (
                Speaker::Mike,
                "So the same physics paints both the day and the dusk.",
            ),
            (
                Speaker::Sara,
                "Exactly! One simple effect, two beautiful skies.",
            ),
        ],
    },
    AuthoredDialogue {
        topic: "Why Ice Floats on Water",
        turns: &[
            (
                Speaker::Mike,
                "Hey Sara, why does ice float instead of sinking?",
            ),
            (
                Speaker::Sara,
                "Because ice is less dense than liquid water, Mike! That's unusual, since most solids are denser than their liquids.",
            ),
            (Speaker::Mike, "What makes water so special?"),
            (
                Speaker::Sara,
                "Hydrogen bonds! When water freezes, its molecules lock into an open hexagonal lattice with lots of empty space.",
            ),
            (Speaker::Mike, "So frozen water actually takes up more room?"),
            (
                Speaker::Sara,
                "Right, about nine percent more. Same mass, bigger volume, lower density, so it floats.",
            ),
            (Speaker::Mike, "Does that matter outside my drink?"),
            (
                Speaker::Sara,
                "Hugely! Lakes freeze from the top down, and that ice layer insulates the water below so fish survive winter.",
            ),
            (
                Speaker::Mike,
                "Wow, a tiny molecular quirk keeps whole ecosystems alive.",
            ),
            (
                Speaker::Sara,
                "That's chemistry for you - small details, big consequences!",
            ),
        ],
    },
];

// `{topic}` appears in the opening hook and the closing thanks.
static FALLBACK: [Turn; 8] = [
    (Speaker::Mike, "Hey Sara, what's the coolest thing about {topic}?"),
    (
        Speaker::Sara,
        "Great question, Mike! The fascinating part is how the basic principles actually work in everyday life.",
    ),
    (Speaker::Mike, "Can you give a quick example?"),
    (
        Speaker::Sara,
        "Absolutely! Think about it this way - the fundamental process involves key interactions that most people don't notice.",
    ),
    (Speaker::Mike, "That's amazing! What should people remember?"),
    (
        Speaker::Sara,
        "The main takeaway is understanding these core concepts helps us appreciate the world around us better!",
    ),
    (
        Speaker::Mike,
        "Perfect! Thanks for explaining {topic} so clearly, Sara.",
    ),
    (
        Speaker::Sara,
        "Anytime, Mike! Science is everywhere once you know what to look for.",
    ),
];

/// All hand-written dialogues.
#[must_use]
pub fn authored_dialogues() -> &'static [AuthoredDialogue] {
    &AUTHORED
}

/// Where a script comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueSource<'a> {
    /// The topic exactly matches a hand-written dialogue.
    Authored(&'static AuthoredDialogue),
    /// Generic template with the topic interpolated.
    Templated(&'a Topic),
}

impl<'a> DialogueSource<'a> {
    /// Pick the source for `topic`. Matching is exact and case-sensitive.
    #[must_use]
    pub fn select(topic: &'a Topic) -> Self {
        AUTHORED
            .iter()
            .find(|dialogue| dialogue.topic == topic.as_str())
            .map_or(Self::Templated(topic), Self::Authored)
    }

    /// Render the script.
    #[must_use]
    pub fn render(&self) -> Script {
        match self {
            Self::Authored(dialogue) => dialogue.script(),
            Self::Templated(topic) => render(
                FALLBACK
                    .iter()
                    .map(|&(speaker, text)| (speaker, text.replace(TOPIC_SLOT, topic.as_str()))),
            ),
        }
    }

    /// Whether a hand-written dialogue was selected.
    #[must_use]
    pub const fn is_authored(&self) -> bool {
        matches!(self, Self::Authored(_))
    }
}

/// Generate the dialogue script for `topic`.
#[must_use]
pub fn generate(topic: &Topic) -> Script {
    DialogueSource::select(topic).render()
}

fn render(turns: impl Iterator<Item = (Speaker, String)>) -> Script {
    let lines: Vec<String> = turns
        .map(|(speaker, text)| format!("{}: {text}", speaker.label()))
        .collect();
    Script::new(lines.join("\n\n"))
}
