use super::details::ConnectionDetailsSource;
use super::selection::{Language, Selection, Voice};
use super::session::{
    EventHandler, RealtimeSession, SessionEvent, SessionState, Subscription, TrackRef,
};
use super::transcript::Transcript;
use super::view::{ConnectedView, SelectionForm, View};
use crate::error::{ConnectError, SessionError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

/// Shown when the camera or microphone cannot be acquired
pub const DEVICE_FAILURE_MESSAGE: &str = "Error acquiring camera or microphone permissions. Please make sure you grant the necessary permissions in your browser and reload the tab";

/// Blocking, user-visible alert
pub trait UserNotifier: Send + Sync {
    fn alert(&self, message: &str);
}

#[derive(Debug, Default)]
struct AgentTracks {
    audio: Option<TrackRef>,
    video: Option<TrackRef>,
}

/// Claim on the in-flight connect flag, released when the attempt ends or is dropped
struct ConnectingGuard(Arc<AtomicBool>);

impl ConnectingGuard {
    fn claim(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for ConnectingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Drives one realtime session from language/voice selection to a joined room
///
/// The controller owns its session for its whole lifetime. Its event handler
/// is registered at [`mount`](Self::mount) and removed when the controller is
/// unmounted or dropped.
pub struct SessionController {
    /// Realtime session, owned for the controller's lifetime
    session: Arc<dyn RealtimeSession>,

    /// Where connection details come from
    details: Arc<dyn ConnectionDetailsSource>,

    /// Current language and voice
    selection: Selection,

    /// Whether a connect attempt is in flight
    connecting: Arc<AtomicBool>,

    /// Whether the local microphone is published
    microphone_enabled: Arc<AtomicBool>,

    /// Set once the device alert was shown for the current attempt
    device_alerted: Arc<AtomicBool>,

    notifier: Arc<dyn UserNotifier>,

    /// Message of the last failed connect attempt
    last_error: Arc<Mutex<Option<String>>>,

    /// Transcript of the current session
    transcript: Arc<Mutex<Transcript>>,

    /// Tracks published by the agent
    agent_tracks: Arc<Mutex<AgentTracks>>,

    /// Registration of the session event handler
    subscription: Subscription,
}

impl SessionController {
    /// Take ownership of `session` and subscribe to its events
    pub fn mount(
        session: Arc<dyn RealtimeSession>,
        details: Arc<dyn ConnectionDetailsSource>,
        notifier: Arc<dyn UserNotifier>,
    ) -> Self {
        let transcript = Arc::new(Mutex::new(Transcript::default()));
        let agent_tracks = Arc::new(Mutex::new(AgentTracks::default()));
        let microphone_enabled = Arc::new(AtomicBool::new(false));
        let device_alerted = Arc::new(AtomicBool::new(false));

        let handler = event_handler(EventTargets {
            transcript: Arc::clone(&transcript),
            agent_tracks: Arc::clone(&agent_tracks),
            microphone_enabled: Arc::clone(&microphone_enabled),
            device_alerted: Arc::clone(&device_alerted),
            notifier: Arc::clone(&notifier),
        });
        let subscription = Subscription::new(Arc::clone(&session), handler);
        debug!("Subscribed to session events ({:?})", subscription.id());

        Self {
            session,
            details,
            selection: Selection::default(),
            connecting: Arc::new(AtomicBool::new(false)),
            microphone_enabled,
            device_alerted,
            notifier,
            last_error: Arc::new(Mutex::new(None)),
            transcript,
            agent_tracks,
            subscription,
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Change the language; ignored while a session is active.
    pub fn set_language(&mut self, language: Language) {
        if self.is_idle() {
            self.selection.language = language;
        } else {
            warn!("Ignoring language change to {} during a session", language);
        }
    }

    /// Change the voice; ignored while a session is active.
    pub fn set_voice(&mut self, voice: Voice) {
        if self.is_idle() {
            self.selection.voice = voice;
        } else {
            warn!("Ignoring voice change to {} during a session", voice);
        }
    }

    /// Fetch a token for the current selection, join the room and enable the microphone.
    ///
    /// Failures to fetch or join reset the controller to disconnected with the
    /// error shown on the selection form. A device failure on the microphone is
    /// alerted once and leaves the session as it is. Dropping the returned
    /// future abandons the attempt and leaves the controller idle again.
    pub async fn connect(&self) -> Result<(), ConnectError> {
        if self.session.state() != SessionState::Disconnected {
            warn!("Connect requested while a session is active");
            return Ok(());
        }
        let Some(guard) = ConnectingGuard::claim(&self.connecting) else {
            warn!("Connect requested while another attempt is in flight");
            return Ok(());
        };

        info!(
            "Connecting (language={}, voice={})",
            self.selection.language, self.selection.voice
        );

        *lock(&self.last_error) = None;
        lock(&self.transcript).clear();
        self.microphone_enabled.store(false, Ordering::SeqCst);
        self.device_alerted.store(false, Ordering::SeqCst);

        let result = self.establish().await;
        drop(guard);

        if let Err(e) = &result {
            self.recover(e).await;
        }

        result
    }

    async fn establish(&self) -> Result<(), ConnectError> {
        let details = self.details.fetch(&self.selection).await?;

        self.session
            .connect(&details.server_url, &details.participant_token)
            .await
            .map_err(ConnectError::Session)?;

        match self.session.set_microphone_enabled(true).await {
            Ok(()) => self.microphone_enabled.store(true, Ordering::SeqCst),
            Err(e @ SessionError::Device(_)) => return Err(ConnectError::Device(e)),
            Err(e) => return Err(ConnectError::Session(e)),
        }

        info!(
            "Joined {} as {}",
            details.room_name, details.participant_name
        );

        Ok(())
    }

    async fn recover(&self, err: &ConnectError) {
        if let ConnectError::Device(_) = err {
            warn!("Microphone unavailable: {}", err);
            if !self.device_alerted.swap(true, Ordering::SeqCst) {
                self.notifier.alert(DEVICE_FAILURE_MESSAGE);
            }
            return;
        }

        error!("Connect failed: {}", err);
        *lock(&self.last_error) = Some(err.to_string());

        if self.session.state() != SessionState::Disconnected {
            if let Err(e) = self.session.disconnect().await {
                warn!("Failed to reset session after connect failure: {}", e);
            }
        }
    }

    /// Leave the room
    pub async fn disconnect(&self) -> Result<(), SessionError> {
        if self.session.state() == SessionState::Disconnected {
            warn!("Disconnect requested with no active session");
            return Ok(());
        }

        info!("Disconnecting");
        self.session.disconnect().await
    }

    /// Mute or unmute the local microphone while joined
    pub async fn set_microphone_enabled(&self, enabled: bool) -> Result<(), SessionError> {
        if !self.session.state().is_connected() {
            warn!("Microphone toggle requested with no active session");
            return Ok(());
        }

        self.session.set_microphone_enabled(enabled).await?;
        self.microphone_enabled.store(enabled, Ordering::SeqCst);
        debug!("Microphone {}", if enabled { "enabled" } else { "muted" });
        Ok(())
    }

    /// Render the current state
    pub fn view(&self) -> View {
        let state = self.session.state();

        if state.is_connected() {
            let tracks = lock(&self.agent_tracks);
            View::Connected(ConnectedView::new(
                state,
                tracks.audio.as_ref(),
                tracks.video.as_ref(),
                lock(&self.transcript).segments().to_vec(),
                self.microphone_enabled.load(Ordering::SeqCst),
            ))
        } else if state == SessionState::Connecting || self.connecting.load(Ordering::SeqCst) {
            View::Connecting
        } else {
            View::Disconnected(SelectionForm::new(
                &self.selection,
                lock(&self.last_error).clone(),
            ))
        }
    }

    /// Leave any joined room, then remove the event handler and release the session
    pub async fn unmount(self) {
        if self.session.state() != SessionState::Disconnected {
            info!("Disconnecting on unmount");
            if let Err(e) = self.session.disconnect().await {
                warn!("Failed to disconnect on unmount: {}", e);
            }
        }
        debug!("Unsubscribing from session events ({:?})", self.subscription.id());
    }

    fn is_idle(&self) -> bool {
        !self.connecting.load(Ordering::SeqCst)
            && self.session.state() == SessionState::Disconnected
    }
}

/// Controller state written by session events
struct EventTargets {
    transcript: Arc<Mutex<Transcript>>,
    agent_tracks: Arc<Mutex<AgentTracks>>,
    microphone_enabled: Arc<AtomicBool>,
    device_alerted: Arc<AtomicBool>,
    notifier: Arc<dyn UserNotifier>,
}

fn event_handler(targets: EventTargets) -> EventHandler {
    let EventTargets {
        transcript,
        agent_tracks,
        microphone_enabled,
        device_alerted,
        notifier,
    } = targets;

    Arc::new(move |event: &SessionEvent| match event {
        SessionEvent::MediaDevicesError(message) => {
            error!("Media device error: {}", message);
            device_alerted.store(true, Ordering::SeqCst);
            notifier.alert(DEVICE_FAILURE_MESSAGE);
        }
        SessionEvent::StateChanged(state) => debug!("Session state: {}", state),
        SessionEvent::Transcription(segment) => lock(&transcript).upsert(segment.clone()),
        SessionEvent::AgentTracksChanged { audio, video } => {
            let mut tracks = lock(&agent_tracks);
            tracks.audio = audio.clone();
            tracks.video = video.clone();
        }
        SessionEvent::Disconnected { reason } => {
            info!(
                "Session disconnected ({})",
                reason.as_deref().unwrap_or("no reason given")
            );
            *lock(&agent_tracks) = AgentTracks::default();
            microphone_enabled.store(false, Ordering::SeqCst);
        }
    })
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
