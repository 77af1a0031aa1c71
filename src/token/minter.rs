use super::details::ConnectionDetails;
use super::metadata::ParticipantMetadata;
use crate::config::LiveKitConfig;
use crate::error::TokenError;
use livekit_api::access_token::{AccessToken, VideoGrants};
use rand::Rng;
use std::fmt;
use std::time::Duration;
use tracing::info;

/// Upper bound (exclusive) of the numeric suffix in generated room and
/// participant names.
pub const IDENTIFIER_RANGE: u32 = 10_000;

/// Signs participant tokens with a LiveKit API key/secret pair
#[derive(Clone)]
pub struct TokenMinter {
    server_url: String,
    api_key: String,
    api_secret: String,
    ttl: Duration,
}

impl fmt::Debug for TokenMinter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenMinter")
            .field("server_url", &self.server_url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenMinter {
    /// Build a minter, failing if the URL, key or secret is missing or empty.
    pub fn from_config(config: &LiveKitConfig) -> Result<Self, TokenError> {
        let present = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());

        match (
            present(&config.url),
            present(&config.api_key),
            present(&config.api_secret),
        ) {
            (Some(server_url), Some(api_key), Some(api_secret)) => Ok(Self {
                server_url,
                api_key,
                api_secret,
                ttl: Duration::from_secs(config.token_ttl_secs),
            }),
            _ => Err(TokenError::MissingConfiguration),
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Generate a room and identity and mint a token joining one to the other.
    pub fn mint(&self, metadata: &ParticipantMetadata) -> Result<ConnectionDetails, TokenError> {
        let participant_name = generate_identifier("user");
        let room_name = generate_identifier("room");

        let participant_token = self.participant_token(&room_name, &participant_name, metadata)?;

        info!(
            "Minted token for {} in {} (language={}, voice={})",
            participant_name, room_name, metadata.language, metadata.voice
        );

        Ok(ConnectionDetails {
            server_url: self.server_url.clone(),
            room_name,
            participant_token,
            participant_name,
        })
    }

    /// Sign a token for `identity` in `room_name` with publish and subscribe rights.
    pub fn participant_token(
        &self,
        room_name: &str,
        identity: &str,
        metadata: &ParticipantMetadata,
    ) -> Result<String, TokenError> {
        let token = AccessToken::with_api_key(&self.api_key, &self.api_secret)
            .with_identity(identity)
            .with_metadata(&metadata.to_json()?)
            .with_grants(VideoGrants {
                room: room_name.to_string(),
                room_join: true,
                can_publish: true,
                can_publish_data: true,
                can_subscribe: true,
                ..Default::default()
            })
            .with_ttl(self.ttl);

        Ok(token.to_jwt()?)
    }
}

fn generate_identifier(prefix: &str) -> String {
    let n = rand::thread_rng().gen_range(0..IDENTIFIER_RANGE);
    format!("{}_{}", prefix, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suffix(name: &str, prefix: &str) -> u32 {
        name.strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('_'))
            .and_then(|n| n.parse().ok())
            .unwrap_or_else(|| panic!("unexpected identifier {name}"))
    }

    #[test]
    fn test_identifier_shape() {
        for _ in 0..500 {
            let id = generate_identifier("room");
            assert!(suffix(&id, "room") < IDENTIFIER_RANGE);
        }
    }

    #[test]
    fn test_missing_values_are_rejected() {
        let full = LiveKitConfig::new("wss://lk.example.com", "key", "secret");

        let mut no_url = full.clone();
        no_url.url = None;
        let mut no_key = full.clone();
        no_key.api_key = Some(String::new());
        let mut no_secret = full.clone();
        no_secret.api_secret = None;

        for config in [no_url, no_key, no_secret] {
            assert!(matches!(
                TokenMinter::from_config(&config),
                Err(TokenError::MissingConfiguration)
            ));
        }
        assert!(TokenMinter::from_config(&full).is_ok());
    }

    #[test]
    fn test_debug_hides_secret() {
        let minter =
            TokenMinter::from_config(&LiveKitConfig::new("wss://x", "key", "hunter2")).unwrap();
        let debug = format!("{:?}", minter);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }
}
