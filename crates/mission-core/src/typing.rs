//! Typing indicator state for an (agent, task) pair.
//!
//! The three timestamps are written by independent events (read receipt,
//! delivery start, delivery end). Whether the agent is "typing" is always
//! derived from the current values; nothing is cached.

use serde::{Deserialize, Serialize};

/// Returns true when a message was read and no delivery has started or
/// finished since.
pub fn is_typing(
    read_at: Option<i64>,
    delivered_at: Option<i64>,
    delivery_ended_at: Option<i64>,
) -> bool {
    read_at.is_some() && delivered_at.is_none() && delivery_ended_at.is_none()
}

/// Read/delivery lifecycle timestamps, in unix milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_ended_at: Option<i64>,
}

impl TypingState {
    pub fn is_typing(&self) -> bool {
        is_typing(self.read_at, self.delivered_at, self.delivery_ended_at)
    }

    /// Record a read receipt. Opens a new typing window, so the previous
    /// delivery cycle is cleared.
    pub fn mark_read(&mut self, at_ms: i64) {
        self.read_at = Some(at_ms);
        self.delivered_at = None;
        self.delivery_ended_at = None;
    }

    /// Record that delivery of a reply started.
    pub fn mark_delivered(&mut self, at_ms: i64) {
        self.delivered_at = Some(at_ms);
    }

    /// Record that delivery of a reply finished.
    pub fn mark_delivery_ended(&mut self, at_ms: i64) {
        self.delivery_ended_at = Some(at_ms);
    }
}
