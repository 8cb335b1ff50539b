//! Tone directives
//!
//! The style a correction should be written in. The label is what the
//! model sees in the prompt.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Neutral,
    Formal,
    Casual,
    Professional,
    Friendly,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Neutral,
        Tone::Formal,
        Tone::Casual,
        Tone::Professional,
        Tone::Friendly,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Neutral => "neutral",
            Tone::Formal => "formal",
            Tone::Casual => "casual",
            Tone::Professional => "professional",
            Tone::Friendly => "friendly",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Tone::ALL
            .into_iter()
            .find(|tone| tone.label() == wanted)
            .ok_or_else(|| format!("Unknown tone: {}", s))
    }
}
