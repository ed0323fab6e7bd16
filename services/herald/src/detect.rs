//! Change detection for polled updates

use serde_json::Value;

/// Single-slot cache of the last update that produced a notification.
///
/// Whole-value equality is the identity key; the slot never grows beyond
/// one entry.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    last_seen: Option<Value>,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the update differs from the last remembered one
    pub fn is_new(&self, update: &Value) -> bool {
        self.last_seen.as_ref() != Some(update)
    }

    /// Overwrite the slot with the update that was just formatted
    pub fn remember(&mut self, update: Value) {
        self.last_seen = Some(update);
    }
}
