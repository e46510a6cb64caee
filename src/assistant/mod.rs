//! Assistant state hub
//!
//! One [`Assistant`] per mounted page tree; it owns the listening flag,
//! the transcript, and the speech adapters, and is torn down with the
//! tree so no recognition session leaks across mounts.

mod hub;

pub use hub::{Assistant, AssistantHandle, AssistantRequest};
