//! The assistant state hub
//!
//! Owns the listening flag, the current transcript, and the two speech
//! adapters, and dispatches classified intents to the router and the
//! synthesizer. State is mutated only through the synchronous handlers;
//! [`Assistant::run`] multiplexes requests, capability events, and the
//! retry/clear/announce timers onto one task.

use tokio::sync::{broadcast, mpsc};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::content::{ContentRegistry, NO_READABLE_CONTENT};
use crate::events::AssistantEvent;
use crate::intent::{classify, Intent, Subject};
use crate::router::Router;
use crate::speech::{
    Recognizer, RecognizerEvent, SpeechInput, SpeechOutput, StartOutcome, SynthEvent, Synthesizer,
};

/// Control requests sent to the hub from other tasks
#[derive(Debug)]
pub enum AssistantRequest {
    /// Flip the listening flag
    ToggleListening,
    /// Set the listening flag explicitly
    SetListening(bool),
    /// Speak the given text, pre-empting any active utterance
    Speak(String),
    /// Cancel the active utterance
    StopSpeaking,
    /// Interpret a finalized command
    ProcessCommand(String),
    /// Schedule the delayed page welcome announcement
    Announce(String),
    /// Stop the hub and release the recognition session
    Shutdown,
}

/// Cheap cloneable handle for controlling a running hub
#[derive(Clone)]
pub struct AssistantHandle {
    tx: mpsc::Sender<AssistantRequest>,
}

impl AssistantHandle {
    /// Create a handle and the request receiver to pass to [`Assistant::run`]
    pub fn channel() -> (Self, mpsc::Receiver<AssistantRequest>) {
        let (tx, rx) = mpsc::channel(32);
        (Self { tx }, rx)
    }

    pub async fn toggle_listening(&self) {
        self.send(AssistantRequest::ToggleListening).await;
    }

    pub async fn set_listening(&self, listening: bool) {
        self.send(AssistantRequest::SetListening(listening)).await;
    }

    pub async fn speak(&self, text: impl Into<String>) {
        self.send(AssistantRequest::Speak(text.into())).await;
    }

    pub async fn stop_speaking(&self) {
        self.send(AssistantRequest::StopSpeaking).await;
    }

    pub async fn process_command(&self, command: impl Into<String>) {
        self.send(AssistantRequest::ProcessCommand(command.into()))
            .await;
    }

    pub async fn announce(&self, title: impl Into<String>) {
        self.send(AssistantRequest::Announce(title.into())).await;
    }

    pub async fn shutdown(&self) {
        self.send(AssistantRequest::Shutdown).await;
    }

    /// A closed hub degrades to a no-op, like every other failure here
    async fn send(&self, request: AssistantRequest) {
        if self.tx.send(request).await.is_err() {
            debug!("assistant hub is gone, dropping request");
        }
    }
}

/// The shared state hub for one page tree
pub struct Assistant {
    config: Config,
    listening: bool,
    transcript: String,
    input: SpeechInput,
    output: SpeechOutput,
    router: Box<dyn Router>,
    content: ContentRegistry,
    event_tx: broadcast::Sender<AssistantEvent>,

    /// Pending single retry after a recognition error
    retry_at: Option<Instant>,
    /// Pending transcript clear after a processed command
    transcript_clear_at: Option<Instant>,
    /// Pending page welcome announcement
    announce_at: Option<Instant>,
    pending_announcement: Option<String>,
}

impl Assistant {
    pub fn new(
        config: Config,
        recognizer: Box<dyn Recognizer>,
        synthesizer: Box<dyn Synthesizer>,
        router: Box<dyn Router>,
        content: ContentRegistry,
        event_tx: broadcast::Sender<AssistantEvent>,
    ) -> Self {
        Self {
            config,
            listening: false,
            transcript: String::new(),
            input: SpeechInput::new(recognizer),
            output: SpeechOutput::new(synthesizer),
            router,
            content,
            event_tx,
            retry_at: None,
            transcript_clear_at: None,
            announce_at: None,
            pending_announcement: None,
        }
    }

    /// Whether continuous recognition should be active
    pub fn listening(&self) -> bool {
        self.listening
    }

    /// Current best-effort transcript
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Whether an utterance is currently active
    pub fn is_speaking(&self) -> bool {
        self.output.is_speaking()
    }

    /// Flip the listening flag
    pub fn toggle_listening(&mut self) {
        self.set_listening(!self.listening);
    }

    /// Set the listening flag, starting or stopping recognition
    ///
    /// Any pending error retry is cancelled on either transition so a
    /// stale timer cannot race a fresh session.
    pub fn set_listening(&mut self, listening: bool) {
        if listening == self.listening {
            return;
        }

        self.listening = listening;
        info!(listening, "listening toggled");
        self.emit(AssistantEvent::ListeningChanged { listening });

        self.retry_at = None;
        if listening {
            self.try_start_recognition();
        } else {
            self.input.stop();
        }
    }

    /// Speak `text`, pre-empting any active utterance
    pub fn speak(&mut self, text: &str) {
        if self.output.speak(text) {
            self.emit_speaking();
        }
    }

    /// Cancel the active utterance; safe to call when nothing is speaking
    pub fn stop_speaking(&mut self) {
        if self.output.stop() {
            self.emit_speaking();
        }
    }

    /// Interpret a finalized transcript and dispatch its intents
    pub fn process_command(&mut self, command: &str) {
        let command = command.to_lowercase();
        info!(command = %command, "processing voice command");

        self.set_transcript(command.clone());
        self.emit(AssistantEvent::CommandProcessed {
            command: command.clone(),
        });

        for intent in classify(&command) {
            self.dispatch(intent);
        }

        self.transcript_clear_at = Some(Instant::now() + self.config.transcript_clear_delay);
    }

    /// Schedule the delayed "Welcome to {title}" announcement
    ///
    /// A newer announcement replaces a pending one.
    pub fn announce(&mut self, title: &str) {
        self.pending_announcement = Some(format!("Welcome to {title}"));
        self.announce_at = Some(Instant::now() + self.config.announce_delay);
    }

    /// Apply an event from the host recognizer
    pub fn handle_recognizer_event(&mut self, event: RecognizerEvent) {
        match event {
            RecognizerEvent::Result {
                transcript,
                is_final,
            } => {
                if is_final {
                    self.process_command(&transcript);
                } else {
                    self.set_transcript(transcript);
                }
            }
            RecognizerEvent::Ended => {
                self.input.mark_ended();
                if self.listening {
                    debug!("recognition stream closed while listening, restarting");
                    self.try_start_recognition();
                }
            }
            RecognizerEvent::Error { code } => {
                warn!(%code, "speech recognition error");
                self.input.mark_ended();
                if self.listening {
                    self.schedule_retry();
                }
            }
        }
    }

    /// Apply an event from the host synthesizer
    pub fn handle_synth_event(&mut self, event: SynthEvent) {
        if self.output.handle_event(event) {
            self.emit_speaking();
        }
    }

    /// Drive the hub until shutdown
    ///
    /// Consumes the hub; multiplexes control requests, capability events,
    /// and the three timers. Exits on [`AssistantRequest::Shutdown`] or
    /// when every request sender is dropped, then stops recognition and
    /// cancels speech.
    pub async fn run(
        mut self,
        mut request_rx: mpsc::Receiver<AssistantRequest>,
        mut recognizer_rx: mpsc::Receiver<RecognizerEvent>,
        mut synth_rx: mpsc::Receiver<SynthEvent>,
    ) {
        info!("assistant hub started");
        let mut recognizer_open = true;
        let mut synth_open = true;

        loop {
            tokio::select! {
                request = request_rx.recv() => {
                    match request {
                        Some(AssistantRequest::Shutdown) | None => break,
                        Some(request) => self.handle_request(request),
                    }
                }

                event = recognizer_rx.recv(), if recognizer_open => {
                    match event {
                        Some(event) => self.handle_recognizer_event(event),
                        None => recognizer_open = false,
                    }
                }

                event = synth_rx.recv(), if synth_open => {
                    match event {
                        Some(event) => self.handle_synth_event(event),
                        None => synth_open = false,
                    }
                }

                _ = sleep_until_opt(self.retry_at) => self.on_retry_due(),
                _ = sleep_until_opt(self.transcript_clear_at) => self.on_transcript_clear_due(),
                _ = sleep_until_opt(self.announce_at) => self.on_announce_due(),
            }
        }

        self.shutdown();
    }

    fn handle_request(&mut self, request: AssistantRequest) {
        match request {
            AssistantRequest::ToggleListening => self.toggle_listening(),
            AssistantRequest::SetListening(listening) => self.set_listening(listening),
            AssistantRequest::Speak(text) => self.speak(&text),
            AssistantRequest::StopSpeaking => self.stop_speaking(),
            AssistantRequest::ProcessCommand(command) => self.process_command(&command),
            AssistantRequest::Announce(title) => self.announce(&title),
            // Matched by the run loop before dispatching here
            AssistantRequest::Shutdown => {}
        }
    }

    fn dispatch(&mut self, intent: Intent) {
        match intent {
            Intent::Navigate(target) => self.navigate_to(&target.route()),
            Intent::OpenFirstChapter => {
                let current = self.router.current_path();
                let subject = Subject::from_path(&current).unwrap_or(Subject::Physics);
                self.navigate_to(&subject.chapter_one_route());
            }
            Intent::ReadPage => self.read_page(),
            Intent::StopSpeaking => self.stop_speaking(),
        }
    }

    fn navigate_to(&mut self, path: &str) {
        info!(path, "navigating");
        self.router.navigate(path);
        self.emit(AssistantEvent::Navigated {
            path: path.to_string(),
        });
    }

    fn read_page(&mut self) {
        match self.content.collect() {
            Some(text) => self.speak(&text),
            None => self.speak(NO_READABLE_CONTENT),
        }
    }

    fn try_start_recognition(&mut self) {
        if self.input.start() == StartOutcome::Failed {
            self.schedule_retry();
        }
    }

    /// Arm the single delayed retry after a recognition failure
    fn schedule_retry(&mut self) {
        debug!(delay = ?self.config.retry_delay, "scheduling recognition retry");
        self.retry_at = Some(Instant::now() + self.config.retry_delay);
    }

    fn on_retry_due(&mut self) {
        self.retry_at = None;

        if !self.listening {
            debug!("retry fired after listening stopped, ignoring");
            return;
        }
        if self.input.is_active() {
            debug!("retry fired but a session is already running, ignoring");
            return;
        }

        // One retry only; a second failure is logged by the adapter and
        // the next toggle or host event starts recognition again.
        self.input.start();
    }

    fn on_transcript_clear_due(&mut self) {
        self.transcript_clear_at = None;
        self.set_transcript(String::new());
    }

    fn on_announce_due(&mut self) {
        self.announce_at = None;
        if let Some(text) = self.pending_announcement.take() {
            self.speak(&text);
        }
    }

    fn set_transcript(&mut self, transcript: String) {
        if transcript != self.transcript {
            self.transcript = transcript.clone();
            self.emit(AssistantEvent::TranscriptChanged { transcript });
        }
    }

    fn emit_speaking(&self) {
        self.emit(AssistantEvent::SpeakingChanged {
            speaking: self.output.is_speaking(),
        });
    }

    fn emit(&self, event: AssistantEvent) {
        let _ = self.event_tx.send(event);
    }

    fn shutdown(&mut self) {
        self.input.stop();
        if self.output.stop() {
            self.emit_speaking();
        }
        info!("assistant hub stopped");
    }
}

impl Drop for Assistant {
    fn drop(&mut self) {
        // Covers hubs that were never run; both stops are idempotent
        self.input.stop();
        self.output.stop();
    }
}

/// Sleep until an optional deadline, or forever when there is none
async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}
