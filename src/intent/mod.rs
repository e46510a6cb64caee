//! Command interpretation
//!
//! Maps noisy free-text transcripts to navigation and speech intents
//! using ordered keyword containment checks.

mod classify;
mod subject;

pub use classify::{classify, Intent};
pub use subject::{NavTarget, Subject, HOME_KEYWORDS};
