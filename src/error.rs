use thiserror::Error;

/// Failures while minting a participant token.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Missing LiveKit environment variables")]
    MissingConfiguration,

    #[error("Failed to encode participant metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("Failed to sign access token: {0}")]
    Signing(#[from] livekit_api::access_token::AccessTokenError),
}

/// Failures reported by a realtime session implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("media device unavailable: {0}")]
    Device(String),

    #[error("session closed")]
    Closed,
}

/// Failures of the client connect sequence.
#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("Invalid token endpoint: {0}")]
    Endpoint(String),

    #[error("Failed to request connection details: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Connection details request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to join the room: {0}")]
    Session(SessionError),

    #[error("Failed to enable the microphone: {0}")]
    Device(SessionError),
}
