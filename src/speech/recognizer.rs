//! Speech input: the recognizer capability seam and its adapter
//!
//! Host implementations wrap the platform's continuous speech-to-text
//! engine and deliver [`RecognizerEvent`]s on the mpsc channel they were
//! constructed with. [`SpeechInput`] tracks whether a session is active
//! and guards against double-starts, which hosts report as an error.

use tracing::{debug, warn};

/// Events delivered by a host recognizer
#[derive(Debug, Clone)]
pub enum RecognizerEvent {
    /// A recognition hypothesis for the most recent result segment
    Result {
        /// Best transcript hypothesis
        transcript: String,
        /// Whether the host marked this segment final
        is_final: bool,
    },
    /// The host closed the recognition stream
    Ended,
    /// A runtime recognition error
    Error {
        /// Host-provided error code
        code: String,
    },
}

/// Errors a host recognizer can return from `start`
#[derive(Debug, thiserror::Error)]
pub enum RecognizerError {
    #[error("a recognition session is already active")]
    AlreadyActive,

    #[error("speech recognition is not available on this host")]
    Unavailable,

    #[error("recognizer failed to start: {0}")]
    Start(String),
}

/// A continuous speech-to-text capability with interim results enabled
pub trait Recognizer: Send {
    /// Begin a recognition session
    fn start(&mut self) -> Result<(), RecognizerError>;

    /// End the active recognition session, if any
    fn stop(&mut self);
}

/// Outcome of a start attempt, as seen by the hub
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new session began
    Started,
    /// A session was already running; the attempt was ignored
    AlreadyActive,
    /// Recognition is unavailable on this host
    Unavailable,
    /// The host refused to start; a retry may help
    Failed,
}

/// Adapter that owns the host recognizer and tracks session state
pub struct SpeechInput {
    recognizer: Box<dyn Recognizer>,
    active: bool,
}

impl SpeechInput {
    pub fn new(recognizer: Box<dyn Recognizer>) -> Self {
        Self {
            recognizer,
            active: false,
        }
    }

    /// Whether a recognition session is currently active
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start a recognition session unless one is already running
    ///
    /// A host `AlreadyActive` error means a session exists that this
    /// adapter lost track of; it is logged and adopted, not propagated.
    pub fn start(&mut self) -> StartOutcome {
        if self.active {
            debug!("recognition session already active, ignoring start");
            return StartOutcome::AlreadyActive;
        }

        match self.recognizer.start() {
            Ok(()) => {
                self.active = true;
                debug!("recognition session started");
                StartOutcome::Started
            }
            Err(RecognizerError::AlreadyActive) => {
                debug!("host reports recognition already running, adopting session");
                self.active = true;
                StartOutcome::AlreadyActive
            }
            Err(RecognizerError::Unavailable) => {
                debug!("speech recognition unavailable, continuing without it");
                StartOutcome::Unavailable
            }
            Err(e) => {
                warn!(error = %e, "failed to start recognition");
                StartOutcome::Failed
            }
        }
    }

    /// Stop the active session; a no-op when nothing is running
    pub fn stop(&mut self) {
        if self.active {
            self.recognizer.stop();
            self.active = false;
            debug!("recognition session stopped");
        }
    }

    /// Record that the host closed the stream on its own
    pub fn mark_ended(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::fakes::FakeRecognizer;

    #[test]
    fn test_start_and_stop() {
        let fake = FakeRecognizer::new();
        let calls = fake.calls();
        let mut input = SpeechInput::new(Box::new(fake));

        assert_eq!(input.start(), StartOutcome::Started);
        assert!(input.is_active());

        input.stop();
        assert!(!input.is_active());
        assert_eq!(*calls.lock().unwrap(), vec!["start", "stop"]);
    }

    #[test]
    fn test_double_start_is_ignored() {
        let fake = FakeRecognizer::new();
        let calls = fake.calls();
        let mut input = SpeechInput::new(Box::new(fake));

        assert_eq!(input.start(), StartOutcome::Started);
        assert_eq!(input.start(), StartOutcome::AlreadyActive);
        // The host saw exactly one start
        assert_eq!(*calls.lock().unwrap(), vec!["start"]);
    }

    #[test]
    fn test_host_already_active_is_adopted() {
        let fake = FakeRecognizer::new();
        fake.fail_next_with(RecognizerError::AlreadyActive);
        let mut input = SpeechInput::new(Box::new(fake));

        assert_eq!(input.start(), StartOutcome::AlreadyActive);
        assert!(input.is_active());
    }

    #[test]
    fn test_stop_without_session_is_noop() {
        let fake = FakeRecognizer::new();
        let calls = fake.calls();
        let mut input = SpeechInput::new(Box::new(fake));

        input.stop();
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_restart_after_host_end() {
        let fake = FakeRecognizer::new();
        let calls = fake.calls();
        let mut input = SpeechInput::new(Box::new(fake));

        assert_eq!(input.start(), StartOutcome::Started);
        input.mark_ended();
        assert!(!input.is_active());
        assert_eq!(input.start(), StartOutcome::Started);
        assert_eq!(*calls.lock().unwrap(), vec!["start", "start"]);
    }

    #[test]
    fn test_unavailable_degrades_silently() {
        let fake = FakeRecognizer::new();
        fake.fail_next_with(RecognizerError::Unavailable);
        let mut input = SpeechInput::new(Box::new(fake));

        assert_eq!(input.start(), StartOutcome::Unavailable);
        assert!(!input.is_active());
    }
}
