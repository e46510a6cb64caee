//! Events broadcast by the assistant hub
//!
//! Provides structured event types for listening, transcript, speaking,
//! and navigation changes so the page shell can render state without
//! polling the hub.

use serde::{Deserialize, Serialize};

/// Events emitted by the assistant hub as its state changes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssistantEvent {
    /// Listening was toggled on or off
    ListeningChanged {
        /// Whether continuous recognition should now be active
        listening: bool,
    },

    /// The displayed transcript changed (interim result, final command,
    /// or the delayed clear)
    TranscriptChanged {
        /// Current best-effort transcript, empty after a clear
        transcript: String,
    },

    /// Speech synthesis started or finished
    SpeakingChanged {
        /// Whether an utterance is currently active
        speaking: bool,
    },

    /// A finalized voice command was interpreted
    CommandProcessed {
        /// The lower-cased command text
        command: String,
    },

    /// The router was asked to change pages
    Navigated {
        /// Route path passed to the router
        path: String,
    },
}

impl std::fmt::Display for AssistantEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssistantEvent::ListeningChanged { listening } => {
                write!(f, "LISTENING_CHANGED ({listening})")
            }
            AssistantEvent::TranscriptChanged { transcript } => {
                write!(f, "TRANSCRIPT_CHANGED ({transcript:?})")
            }
            AssistantEvent::SpeakingChanged { speaking } => {
                write!(f, "SPEAKING_CHANGED ({speaking})")
            }
            AssistantEvent::CommandProcessed { command } => {
                write!(f, "COMMAND_PROCESSED ({command:?})")
            }
            AssistantEvent::Navigated { path } => write!(f, "NAVIGATED ({path})"),
        }
    }
}
