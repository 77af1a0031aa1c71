//! Participant token minting
//!
//! Each call produces a fresh LiveKit access token scoped to one generated
//! room and one generated participant identity. The caller's language and
//! voice selection travel inside the token as participant metadata so the
//! agent joining the room can pick its recognizer and synthesizer.

mod details;
mod metadata;
mod minter;

pub use details::{ConnectionDetails, ConnectionRequest};
pub use metadata::{ParticipantMetadata, DEFAULT_LANGUAGE, DEFAULT_VOICE};
pub use minter::{TokenMinter, IDENTIFIER_RANGE};
