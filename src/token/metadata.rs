use serde::{Deserialize, Serialize};

pub const DEFAULT_LANGUAGE: &str = "hi";
pub const DEFAULT_VOICE: &str = "sarvam";

/// Selection attached to the participant identity at mint time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantMetadata {
    pub language: String,
    pub voice: String,
}

impl Default for ParticipantMetadata {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            voice: DEFAULT_VOICE.to_string(),
        }
    }
}

impl ParticipantMetadata {
    pub fn new(language: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            voice: voice.into(),
        }
    }

    /// Encode as the JSON string carried in the token's `metadata` claim.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decode a `metadata` claim, as an agent does after joining.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
