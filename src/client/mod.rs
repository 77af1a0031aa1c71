//! Voice assistant client session
//!
//! This module provides the `SessionController` that manages:
//! - Language and voice selection before connecting
//! - Fetching connection details from the token endpoint
//! - Joining the room and enabling the microphone through a `RealtimeSession`
//! - Transcript collection and the render model for the page

mod controller;
mod details;
mod selection;
mod session;
mod transcript;
mod view;

pub use controller::{SessionController, UserNotifier, DEVICE_FAILURE_MESSAGE};
pub use details::{ConnectionDetailsSource, HttpConnectionDetails};
pub use selection::{Language, Selection, Voice};
pub use session::{
    EventHandler, HandlerId, RealtimeSession, SessionEvent, SessionState, Subscription, TrackRef,
};
pub use transcript::{Transcript, TranscriptSegment};
pub use view::{Choice, ConnectedView, ControlBar, SelectionForm, View, Visualizer};
