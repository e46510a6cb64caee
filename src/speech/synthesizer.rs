//! Speech output: the synthesizer capability seam and its adapter
//!
//! Host implementations wrap the platform's text-to-speech engine and
//! deliver [`SynthEvent`]s on the mpsc channel they were constructed with.
//! [`SpeechOutput`] enforces the last-call-wins policy: a new utterance
//! always cancels the previous one, and completion events for superseded
//! utterances are ignored.

use tracing::{debug, warn};

/// Identifier of one speakable job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtteranceId(u64);

/// One unit of synthesized speech output
#[derive(Debug, Clone)]
pub struct Utterance {
    pub id: UtteranceId,
    pub text: String,
}

/// Events delivered by a host synthesizer
#[derive(Debug, Clone)]
pub enum SynthEvent {
    /// The utterance played to completion
    Ended(UtteranceId),
    /// The utterance failed mid-flight
    Error {
        id: UtteranceId,
        message: String,
    },
}

/// Errors a host synthesizer can return from `speak`
#[derive(Debug, thiserror::Error)]
pub enum SynthesizerError {
    #[error("speech synthesis is not available on this host")]
    Unavailable,

    #[error("synthesizer rejected the utterance: {0}")]
    Rejected(String),
}

/// A text-to-speech capability
pub trait Synthesizer: Send {
    /// Begin speaking an utterance
    fn speak(&mut self, utterance: Utterance) -> Result<(), SynthesizerError>;

    /// Cancel whatever is currently being spoken
    fn cancel(&mut self);
}

/// Adapter that owns the host synthesizer and the single-utterance state
pub struct SpeechOutput {
    synthesizer: Box<dyn Synthesizer>,
    current: Option<UtteranceId>,
    next_id: u64,
}

impl SpeechOutput {
    pub fn new(synthesizer: Box<dyn Synthesizer>) -> Self {
        Self {
            synthesizer,
            current: None,
            next_id: 0,
        }
    }

    /// Whether an utterance is currently active
    pub fn is_speaking(&self) -> bool {
        self.current.is_some()
    }

    /// Speak `text`, pre-empting any active utterance
    ///
    /// Returns true if speaking state changed. An unavailable host is a
    /// silent no-op; other rejections are logged and the utterance dropped.
    pub fn speak(&mut self, text: &str) -> bool {
        let was_speaking = self.is_speaking();
        if self.current.take().is_some() {
            self.synthesizer.cancel();
        }

        self.next_id += 1;
        let id = UtteranceId(self.next_id);
        let utterance = Utterance {
            id,
            text: text.to_string(),
        };

        match self.synthesizer.speak(utterance) {
            Ok(()) => {
                debug!(utterance = ?id, "utterance started");
                self.current = Some(id);
                !was_speaking
            }
            Err(SynthesizerError::Unavailable) => {
                debug!("speech synthesis unavailable, dropping utterance");
                was_speaking
            }
            Err(e) => {
                warn!(error = %e, "failed to start utterance");
                was_speaking
            }
        }
    }

    /// Cancel the active utterance; a no-op when nothing is speaking
    ///
    /// Returns true if speaking state changed.
    pub fn stop(&mut self) -> bool {
        if self.current.take().is_some() {
            self.synthesizer.cancel();
            debug!("utterance cancelled");
            true
        } else {
            false
        }
    }

    /// Apply a completion or error event from the host
    ///
    /// Events for superseded utterances are stale and ignored. Returns
    /// true if speaking state changed.
    pub fn handle_event(&mut self, event: SynthEvent) -> bool {
        match event {
            SynthEvent::Ended(id) if self.current == Some(id) => {
                debug!(utterance = ?id, "utterance finished");
                self.current = None;
                true
            }
            SynthEvent::Error { id, message } if self.current == Some(id) => {
                warn!(utterance = ?id, %message, "utterance failed");
                self.current = None;
                true
            }
            other => {
                debug!(event = ?other, "ignoring stale synthesizer event");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::fakes::FakeSynthesizer;

    #[test]
    fn test_speak_marks_speaking() {
        let fake = FakeSynthesizer::new();
        let spoken = fake.spoken();
        let mut output = SpeechOutput::new(Box::new(fake));

        assert!(output.speak("hello"));
        assert!(output.is_speaking());
        assert_eq!(spoken.lock().unwrap()[0].text, "hello");
    }

    #[test]
    fn test_new_utterance_preempts_previous() {
        let fake = FakeSynthesizer::new();
        let spoken = fake.spoken();
        let cancels = fake.cancels();
        let mut output = SpeechOutput::new(Box::new(fake));

        output.speak("X");
        let first_id = spoken.lock().unwrap()[0].id;
        output.speak("Y");

        // Exactly one cancel, exactly one active utterance, and it is "Y"
        assert_eq!(*cancels.lock().unwrap(), 1);
        assert!(output.is_speaking());
        let second_id = spoken.lock().unwrap()[1].id;
        assert_eq!(spoken.lock().unwrap()[1].text, "Y");

        // A late end event for "X" is stale and must not clear "Y"
        assert!(!output.handle_event(SynthEvent::Ended(first_id)));
        assert!(output.is_speaking());

        assert!(output.handle_event(SynthEvent::Ended(second_id)));
        assert!(!output.is_speaking());
    }

    #[test]
    fn test_stop_without_utterance_is_noop() {
        let fake = FakeSynthesizer::new();
        let cancels = fake.cancels();
        let mut output = SpeechOutput::new(Box::new(fake));

        assert!(!output.stop());
        assert!(!output.is_speaking());
        assert_eq!(*cancels.lock().unwrap(), 0);
    }

    #[test]
    fn test_stop_cancels_active_utterance() {
        let fake = FakeSynthesizer::new();
        let cancels = fake.cancels();
        let mut output = SpeechOutput::new(Box::new(fake));

        output.speak("hello");
        assert!(output.stop());
        assert!(!output.is_speaking());
        assert_eq!(*cancels.lock().unwrap(), 1);
    }

    #[test]
    fn test_error_clears_speaking() {
        let fake = FakeSynthesizer::new();
        let spoken = fake.spoken();
        let mut output = SpeechOutput::new(Box::new(fake));

        output.speak("hello");
        let id = spoken.lock().unwrap()[0].id;
        assert!(output.handle_event(SynthEvent::Error {
            id,
            message: "interrupted".to_string(),
        }));
        assert!(!output.is_speaking());
    }

    #[test]
    fn test_unavailable_host_is_silent_noop() {
        let fake = FakeSynthesizer::new();
        fake.set_unavailable();
        let mut output = SpeechOutput::new(Box::new(fake));

        assert!(!output.speak("hello"));
        assert!(!output.is_speaking());
    }
}
