//! Status transition events.

use serde::{Deserialize, Serialize};

use crate::content::{ContentHandle, ContentStatus};

/// A single status change of a content item.
///
/// Produced once per host-side change and consumed synchronously.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTransitionEvent {
    /// Status before the change.
    pub previous_status: ContentStatus,
    /// Status after the change.
    pub new_status: ContentStatus,
    /// The item that changed.
    pub content: ContentHandle,
}

impl ContentTransitionEvent {
    /// Create a new transition event.
    pub fn new(
        previous_status: ContentStatus,
        new_status: ContentStatus,
        content: ContentHandle,
    ) -> Self {
        Self {
            previous_status,
            new_status,
            content,
        }
    }

    /// Check if the item ends this transition published.
    pub fn lands_on_publish(&self) -> bool {
        self.new_status.is_published()
    }
}
