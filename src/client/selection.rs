use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Spoken language offered by the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "en")]
    English,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Hindi, Language::English];

    /// Code sent to the token endpoint
    pub fn code(self) -> &'static str {
        match self {
            Language::Hindi => "hi",
            Language::English => "en",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::Hindi => "Hindi (Nova-2)",
            Language::English => "English (Nova-2)",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|l| l.code() == s)
            .ok_or_else(|| format!("unknown language '{}' (expected hi or en)", s))
    }
}

/// Voice model offered by the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    #[default]
    Sarvam,
    Gemini,
}

impl Voice {
    pub const ALL: [Voice; 2] = [Voice::Sarvam, Voice::Gemini];

    /// Identifier sent to the token endpoint
    pub fn code(self) -> &'static str {
        match self {
            Voice::Sarvam => "sarvam",
            Voice::Gemini => "gemini",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Voice::Sarvam => "Sarvam",
            Voice::Gemini => "Gemini (Google)",
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Voice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Voice::ALL
            .into_iter()
            .find(|v| v.code() == s)
            .ok_or_else(|| format!("unknown voice '{}' (expected sarvam or gemini)", s))
    }
}

/// Language and voice chosen before connecting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    pub language: Language,
    pub voice: Voice,
}

impl Selection {
    pub fn new(language: Language, voice: Voice) -> Self {
        Self { language, voice }
    }
}
