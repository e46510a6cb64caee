//! Speech capability seams and their adapters
//!
//! The host's speech engines are reached through two injected interfaces:
//! a [`Recognizer`] (continuous speech-to-text) and a [`Synthesizer`]
//! (text-to-speech). Both deliver events over mpsc channels, so the hub
//! can be tested with fake implementations.

mod recognizer;
mod synthesizer;

pub use recognizer::{Recognizer, RecognizerError, RecognizerEvent, SpeechInput, StartOutcome};
pub use synthesizer::{
    SpeechOutput, SynthEvent, Synthesizer, SynthesizerError, Utterance, UtteranceId,
};
