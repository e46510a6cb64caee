//! learning-assistant: voice command layer for a subject-learning site
//!
//! This crate provides:
//! - Capability seams for the host's speech engines (recognizer, synthesizer)
//! - A keyword interpreter mapping transcripts to navigation and speech intents
//! - A state hub coordinating listening, transcripts, and speech lifecycle
//! - A registration contract for the readable content of the current page
//!
//! The page shell owns rendering and real routing; it wires its router and
//! host speech bridges into an [`Assistant`], drives [`Assistant::run`] on a
//! task, and observes [`events::AssistantEvent`]s to render listening state
//! and the live transcript.

pub mod assistant;
pub mod config;
pub mod content;
pub mod events;
pub mod intent;
pub mod router;
pub mod speech;

pub use assistant::{Assistant, AssistantHandle, AssistantRequest};
pub use config::Config;
pub use content::{ContentRegistry, RegionId, NO_READABLE_CONTENT};
pub use events::AssistantEvent;
pub use intent::{classify, Intent, NavTarget, Subject};
pub use router::{MemoryRouter, Router};
pub use speech::{
    Recognizer, RecognizerError, RecognizerEvent, SynthEvent, Synthesizer, SynthesizerError,
    Utterance, UtteranceId,
};
