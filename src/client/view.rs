use super::selection::{Language, Selection, Voice};
use super::session::{SessionState, TrackRef};
use super::transcript::TranscriptSegment;
use serde::Serialize;

pub const START_LABEL: &str = "Start a conversation";
pub const VISUALIZER_BAR_COUNT: usize = 5;
pub const VISUALIZER_MIN_HEIGHT: u32 = 24;

/// What the page shows for the current controller state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum View {
    Disconnected(SelectionForm),
    Connecting,
    Connected(ConnectedView),
}

impl View {
    pub fn is_connected(&self) -> bool {
        matches!(self, View::Connected(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Language and voice pickers with the start button
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionForm {
    pub languages: Vec<Choice>,
    pub voices: Vec<Choice>,
    pub start_label: &'static str,
    /// Message from the last failed connect attempt
    pub error: Option<String>,
}

impl SelectionForm {
    pub fn new(selection: &Selection, error: Option<String>) -> Self {
        Self {
            languages: Language::ALL
                .iter()
                .map(|l| Choice {
                    value: l.code(),
                    label: l.label(),
                    selected: *l == selection.language,
                })
                .collect(),
            voices: Voice::ALL
                .iter()
                .map(|v| Choice {
                    value: v.code(),
                    label: v.label(),
                    selected: *v == selection.voice,
                })
                .collect(),
            start_label: START_LABEL,
            error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectedView {
    pub state: SessionState,
    pub visualizer: Visualizer,
    pub transcript: Vec<TranscriptSegment>,
    /// The agent has not joined or published audio yet
    pub no_agent: bool,
    pub controls: Option<ControlBar>,
    /// Remote participants' audio is played
    pub room_audio: bool,
}

impl ConnectedView {
    pub fn new(
        state: SessionState,
        audio: Option<&TrackRef>,
        video: Option<&TrackRef>,
        transcript: Vec<TranscriptSegment>,
        microphone_enabled: bool,
    ) -> Self {
        Self {
            state,
            visualizer: Visualizer::for_agent(state, audio, video),
            transcript,
            no_agent: state == SessionState::Initializing || audio.is_none(),
            controls: ControlBar::for_state(state, microphone_enabled),
            room_audio: state.is_connected(),
        }
    }
}

/// Microphone toggle and disconnect button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlBar {
    pub microphone_enabled: bool,
    pub show_disconnect: bool,
}

impl ControlBar {
    /// Controls are only offered once the room is joined.
    pub fn for_state(state: SessionState, microphone_enabled: bool) -> Option<Self> {
        state.is_connected().then_some(Self {
            microphone_enabled,
            show_disconnect: true,
        })
    }
}

/// Agent visualizer: its video when published, audio level bars otherwise
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Visualizer {
    Video {
        track: TrackRef,
    },
    Bars {
        state: SessionState,
        bar_count: usize,
        min_height: u32,
        track: Option<TrackRef>,
    },
}

impl Visualizer {
    pub fn for_agent(
        state: SessionState,
        audio: Option<&TrackRef>,
        video: Option<&TrackRef>,
    ) -> Self {
        match video {
            Some(track) => Visualizer::Video {
                track: track.clone(),
            },
            None => Visualizer::Bars {
                state,
                bar_count: VISUALIZER_BAR_COUNT,
                min_height: VISUALIZER_MIN_HEIGHT,
                track: audio.cloned(),
            },
        }
    }
}
