use crate::config::LiveKitConfig;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// LiveKit credentials, checked on every request
    pub livekit: Arc<LiveKitConfig>,
}

impl AppState {
    pub fn new(livekit: LiveKitConfig) -> Self {
        Self {
            livekit: Arc::new(livekit),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(LiveKitConfig::default())
    }
}
