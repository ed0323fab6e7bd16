//! Messenger trait and delivery deduplication

use std::sync::Arc;

use async_trait::async_trait;

/// Trait for delivering a text message to the chat channel
#[async_trait]
pub trait Messenger: Send + Sync + std::fmt::Debug {
    /// Deliver `text` to the configured chat
    async fn send(&self, text: &str) -> crate::Result<()>;
}

/// Suppresses redelivery of the message most recently sent on one stream.
///
/// Each notification stream (status changes, failure reports) owns its own
/// instance, so the streams deduplicate independently.
#[derive(Debug)]
pub struct DedupNotifier {
    transport: Arc<dyn Messenger>,
    stream: &'static str,
    last_delivered: Option<String>,
}

impl DedupNotifier {
    pub fn new(transport: Arc<dyn Messenger>, stream: &'static str) -> Self {
        Self {
            transport,
            stream,
            last_delivered: None,
        }
    }

    /// Deliver `text` unless it repeats the last delivered message.
    ///
    /// Returns true when the message went out. The slot is only updated on a
    /// successful send, so a failed delivery is attempted again on the next
    /// cycle instead of being silently dropped.
    pub async fn notify(&mut self, text: &str) -> crate::Result<bool> {
        if self.last_delivered.as_deref() == Some(text) {
            tracing::debug!("Suppressing duplicate on '{}' stream: {}", self.stream, text);
            return Ok(false);
        }

        match self.transport.send(text).await {
            Ok(()) => {
                tracing::debug!("Delivered on '{}' stream: {}", self.stream, text);
                self.last_delivered = Some(text.to_string());
                Ok(true)
            }
            Err(crate::HeraldError::Delivery(reason)) => {
                Err(crate::HeraldError::Delivery(reason))
            }
            Err(other) => Err(crate::HeraldError::Delivery(other.to_string())),
        }
    }
}
