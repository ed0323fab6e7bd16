//! Herald - review status polling and notification service
//!
//! Polls a review status API, detects status changes, and relays them to a
//! Telegram chat.

pub mod api_client;
pub mod config;
pub mod detect;
pub mod engine;
pub mod error;
pub mod format;
pub mod io;
pub mod notifier;
pub mod telegram;
pub mod validate;

pub use config::{load_config, Config};
pub use error::{HeraldError, Result};

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::api_client::ReviewApiClient;
use crate::engine::Engine;
use crate::io::ReqwestHttpClient;
use crate::notifier::Messenger;
use crate::telegram::TelegramMessenger;

/// Run the herald service with the given configuration
pub async fn run(config: Config) -> Result<()> {
    let http: Arc<dyn io::HttpClient> = Arc::new(ReqwestHttpClient::default());
    let cancel = CancellationToken::new();

    let api = ReviewApiClient::new(&config.api, Arc::clone(&http));
    let telegram = TelegramMessenger::new(&config.telegram, Arc::clone(&http));

    // Fail fast on unusable credentials before the first poll cycle
    telegram.verify().await?;
    api.verify().await?;

    let transport: Arc<dyn Messenger> = Arc::new(telegram);

    let initial_cursor = if config.api.backfill {
        0
    } else {
        engine::current_epoch_secs()
    };
    let interval = Duration::from_secs(config.api.poll_interval_seconds);
    let mut engine = Engine::new(api, transport, interval, initial_cursor, cancel.clone());

    // Setup shutdown handler
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for ctrl-c");
        tracing::info!("Shutdown signal received");
        cancel_for_signal.cancel();
    });

    tracing::info!("Herald engine started");

    // Run the engine (blocks until cancelled)
    engine.run().await;

    tracing::info!("Herald engine stopped");

    Ok(())
}
