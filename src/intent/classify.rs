//! Keyword classification of finalized transcripts
//!
//! A command is checked against four independent condition groups, so one
//! command can carry several intents ("read chapter 1" both navigates and
//! reads). Within the navigation group, the first matching subject wins
//! and at most one navigation is produced per command.

use super::subject::{NavTarget, Subject, HOME_KEYWORDS};

/// Phrases that open the first chapter of the current subject
const CHAPTER_ONE_PHRASES: &[&str] = &["chapter 1", "chapter one", "first chapter"];

/// Keywords that trigger reading the current page aloud
const READ_KEYWORDS: &[&str] = &["read", "speak"];

/// Keywords that cancel the active utterance
const STOP_KEYWORDS: &[&str] = &["stop", "pause", "quiet"];

/// The classified meaning of a voice transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Navigate to a subject page or the site root
    Navigate(NavTarget),
    /// Navigate to chapter one of the current subject
    OpenFirstChapter,
    /// Read the current page's readable content aloud
    ReadPage,
    /// Cancel the active utterance
    StopSpeaking,
}

/// Classify a command into its intents, in dispatch order
///
/// The input is lower-cased before matching; an empty result means the
/// command carried no recognized intent.
pub fn classify(command: &str) -> Vec<Intent> {
    let command = command.to_lowercase();
    let mut intents = Vec::new();

    if let Some(target) = navigation_target(&command) {
        intents.push(Intent::Navigate(target));
    }

    if contains_any(&command, CHAPTER_ONE_PHRASES) {
        intents.push(Intent::OpenFirstChapter);
    }

    if contains_any(&command, READ_KEYWORDS) {
        intents.push(Intent::ReadPage);
    }

    if contains_any(&command, STOP_KEYWORDS) {
        intents.push(Intent::StopSpeaking);
    }

    intents
}

/// Resolve the navigation group: subjects in fixed priority order, then home
fn navigation_target(command: &str) -> Option<NavTarget> {
    for subject in Subject::ALL {
        if contains_any(command, subject.keywords()) {
            return Some(NavTarget::Subject(subject));
        }
    }

    if contains_any(command, HOME_KEYWORDS) {
        return Some(NavTarget::Home);
    }

    None
}

fn contains_any(command: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| command.contains(keyword))
}
