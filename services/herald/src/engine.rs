//! Engine: the poll, detect, notify cycle

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio_util::sync::CancellationToken;

use crate::api_client::ReviewApiClient;
use crate::detect::ChangeDetector;
use crate::error::HeraldError;
use crate::notifier::{DedupNotifier, Messenger};
use crate::{format, validate};

/// Orchestrates polling the status API and relaying notifications.
///
/// Owns the poll cursor, the change detector, and both dedup streams;
/// nothing outside the engine mutates them.
pub struct Engine {
    api: ReviewApiClient,
    detector: ChangeDetector,
    updates: DedupNotifier,
    failures: DedupNotifier,
    cursor: u64,
    interval: Duration,
    cancel: CancellationToken,
}

impl Engine {
    pub fn new(
        api: ReviewApiClient,
        transport: Arc<dyn Messenger>,
        interval: Duration,
        initial_cursor: u64,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            api,
            detector: ChangeDetector::new(),
            updates: DedupNotifier::new(Arc::clone(&transport), "status"),
            failures: DedupNotifier::new(transport, "failure"),
            cursor: initial_cursor,
            interval,
            cancel,
        }
    }

    /// Current poll cursor (seconds since the epoch)
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Run poll cycles until the cancellation token fires
    pub async fn run(&mut self) {
        loop {
            self.run_once().await;

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Polling loop cancelled");
                    break;
                }
            }
        }
    }

    /// One poll cycle. Every cycle error is handled here; none escape the loop.
    pub async fn run_once(&mut self) {
        match self.poll_cycle().await {
            Ok(()) => {}
            Err(HeraldError::NoUpdates) => {
                tracing::debug!("No review status updates this cycle");
            }
            Err(error) => self.report_failure(error).await,
        }
    }

    async fn poll_cycle(&mut self) -> crate::Result<()> {
        let response = self.api.fetch(self.cursor).await?;

        // Advance the watermark even when the cycle ends in NoUpdates, so a
        // quiet window is not re-fetched forever. Never regresses.
        if let Some(current_date) = validate::current_date(&response) {
            self.cursor = self.cursor.max(current_date);
        }

        let update = validate::first_update(&response)?;

        if !self.detector.is_new(&update) {
            tracing::debug!("Review status unchanged since last notification");
            return Ok(());
        }

        let message = format::parse_status(&update)?;
        self.detector.remember(update);

        self.updates.notify(&message).await?;
        Ok(())
    }

    async fn report_failure(&mut self, error: HeraldError) {
        let message = format!("Program malfunction: {}", error);
        tracing::error!("{}", message);

        if let Err(delivery_error) = self.failures.notify(&message).await {
            // The report itself could not go out; the loop stays alive and
            // the next distinct failure will be attempted again.
            tracing::error!("Failed to report malfunction: {}", delivery_error);
        }
    }
}

/// Seconds since the epoch, used as the initial cursor of a live service
pub fn current_epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
