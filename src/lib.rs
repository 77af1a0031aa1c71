pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod token;

pub use client::{
    ConnectionDetailsSource, HttpConnectionDetails, Language, RealtimeSession, Selection,
    SessionController, SessionEvent, SessionState, UserNotifier, View, Voice,
};
pub use config::Config;
pub use error::{ConnectError, SessionError, TokenError};
pub use http::{create_router, AppState};
pub use token::{ConnectionDetails, ConnectionRequest, ParticipantMetadata, TokenMinter};
