use super::metadata::{ParticipantMetadata, DEFAULT_LANGUAGE, DEFAULT_VOICE};
use serde::{Deserialize, Serialize};

/// Query parameters accepted by the token endpoint
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConnectionRequest {
    pub language: Option<String>,
    pub voice: Option<String>,
}

impl ConnectionRequest {
    /// Build from raw query pairs; the first occurrence of a repeated key wins.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut req = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "language" => &mut req.language,
                "voice" => &mut req.voice,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        req
    }

    /// Resolve the selection, falling back to defaults for absent or empty values.
    pub fn metadata(&self) -> ParticipantMetadata {
        ParticipantMetadata {
            language: non_empty(self.language.as_deref()).unwrap_or(DEFAULT_LANGUAGE).to_string(),
            voice: non_empty(self.voice.as_deref()).unwrap_or(DEFAULT_VOICE).to_string(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Connection parameters returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDetails {
    pub server_url: String,
    pub room_name: String,
    pub participant_token: String,
    pub participant_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_params_use_defaults() {
        let metadata = ConnectionRequest::default().metadata();
        assert_eq!(metadata.language, "hi");
        assert_eq!(metadata.voice, "sarvam");
    }

    #[test]
    fn test_empty_params_use_defaults() {
        let req = ConnectionRequest {
            language: Some(String::new()),
            voice: Some(String::new()),
        };
        assert_eq!(req.metadata(), ParticipantMetadata::default());
    }

    #[test]
    fn test_unknown_values_are_accepted() {
        let req = ConnectionRequest {
            language: Some("fr".to_string()),
            voice: Some("whatever".to_string()),
        };
        assert_eq!(req.metadata(), ParticipantMetadata::new("fr", "whatever"));
    }

    #[test]
    fn test_first_repeated_param_wins() {
        let pairs = [
            ("language", "en"),
            ("voice", "gemini"),
            ("language", "hi"),
            ("other", "x"),
        ]
        .map(|(k, v)| (k.to_string(), v.to_string()));

        let req = ConnectionRequest::from_pairs(pairs);
        assert_eq!(req.metadata(), ParticipantMetadata::new("en", "gemini"));
    }

    #[test]
    fn test_details_use_camel_case() {
        let details = ConnectionDetails {
            server_url: "wss://lk.example.com".to_string(),
            room_name: "room_1".to_string(),
            participant_token: "jwt".to_string(),
            participant_name: "user_2".to_string(),
        };

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["serverUrl"], "wss://lk.example.com");
        assert_eq!(json["roomName"], "room_1");
        assert_eq!(json["participantToken"], "jwt");
        assert_eq!(json["participantName"], "user_2");
    }
}
