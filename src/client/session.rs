use super::transcript::TranscriptSegment;
use crate::error::SessionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Agent-facing state reported by the realtime session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Disconnected,
    Connecting,
    Initializing,
    Listening,
    Thinking,
    Speaking,
}

impl SessionState {
    /// True once the room is joined, whatever the agent is doing.
    pub fn is_connected(self) -> bool {
        !matches!(self, SessionState::Disconnected | SessionState::Connecting)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::Disconnected => "disconnected",
            SessionState::Connecting => "connecting",
            SessionState::Initializing => "initializing",
            SessionState::Listening => "listening",
            SessionState::Thinking => "thinking",
            SessionState::Speaking => "speaking",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a published media track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRef {
    pub participant_identity: String,
    pub track_sid: String,
}

/// Events delivered by the session to registered handlers
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    StateChanged(SessionState),
    /// Camera or microphone could not be acquired
    MediaDevicesError(String),
    Transcription(TranscriptSegment),
    /// The agent's published tracks changed
    AgentTracksChanged {
        audio: Option<TrackRef>,
        video: Option<TrackRef>,
    },
    Disconnected {
        reason: Option<String>,
    },
}

pub type EventHandler = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

/// Registration handle returned by [`RealtimeSession::on`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(pub u64);

/// Client handle to a realtime media room
///
/// Implementations wrap the external media SDK. Device acquisition failures
/// must be reported through [`SessionEvent::MediaDevicesError`]; the error
/// returned from `set_microphone_enabled` mirrors that event.
#[async_trait::async_trait]
pub trait RealtimeSession: Send + Sync {
    /// Join the room at `url` authenticated by `token`
    async fn connect(&self, url: &str, token: &str) -> Result<(), SessionError>;

    /// Publish or mute the local microphone
    async fn set_microphone_enabled(&self, enabled: bool) -> Result<(), SessionError>;

    /// Leave the room
    async fn disconnect(&self) -> Result<(), SessionError>;

    /// Current state
    fn state(&self) -> SessionState;

    /// Register an event handler
    fn on(&self, handler: EventHandler) -> HandlerId;

    /// Remove a previously registered handler
    fn off(&self, id: HandlerId);
}

/// Event handler registration that is removed when dropped
pub struct Subscription {
    session: Arc<dyn RealtimeSession>,
    id: HandlerId,
}

impl Subscription {
    pub fn new(session: Arc<dyn RealtimeSession>, handler: EventHandler) -> Self {
        let id = session.on(handler);
        Self { session, id }
    }

    pub fn id(&self) -> HandlerId {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.session.off(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connected_states() {
        assert!(!SessionState::Disconnected.is_connected());
        assert!(!SessionState::Connecting.is_connected());
        for state in [
            SessionState::Initializing,
            SessionState::Listening,
            SessionState::Thinking,
            SessionState::Speaking,
        ] {
            assert!(state.is_connected(), "{} should count as connected", state);
        }
    }

    #[test]
    fn test_state_serializes_lowercase() {
        let json = serde_json::to_string(&SessionState::Speaking).unwrap();
        assert_eq!(json, "\"speaking\"");
    }
}
