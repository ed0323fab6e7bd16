//! Telegram Bot API messenger

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::TelegramConfig;
use crate::io::HttpClient;
use crate::notifier::Messenger;

/// Sends messages to a fixed chat through the Telegram Bot API
pub struct TelegramMessenger {
    bot_token: String,
    chat_id: String,
    api_base: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramMessenger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramMessenger")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramMessenger {
    pub fn new(config: &TelegramConfig, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created TelegramMessenger for chat {}", config.chat_id);

        Self {
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
            api_base: config.api_base.clone(),
            http,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.bot_token, method)
    }

    /// Confirm the bot token and chat id are accepted by the Bot API.
    /// Part of the startup precondition check.
    pub async fn verify(&self) -> crate::Result<()> {
        let response = self.http.get(&self.method_url("getMe"), &[]).await?;
        if response.status != 200 {
            return Err(crate::HeraldError::Config(format!(
                "Telegram rejected the bot token: status {}: {}",
                response.status, response.body
            )));
        }

        let url = format!("{}?chat_id={}", self.method_url("getChat"), self.chat_id);
        let response = self.http.get(&url, &[]).await?;
        if response.status != 200 {
            return Err(crate::HeraldError::Config(format!(
                "Telegram rejected chat id '{}': status {}: {}",
                self.chat_id, response.status, response.body
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send(&self, text: &str) -> crate::Result<()> {
        let params = [("chat_id", self.chat_id.as_str()), ("text", text)];

        let response = self
            .http
            .post_form(&self.method_url("sendMessage"), &params)
            .await?;

        if response.status != 200 {
            return Err(crate::HeraldError::Delivery(format!(
                "Telegram API returned status {}: {}",
                response.status, response.body
            )));
        }

        tracing::debug!("Telegram message sent: {}", text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{HttpResponse, MockHttpClient};

    fn test_config() -> TelegramConfig {
        TelegramConfig {
            bot_token: "123:abc".to_string(),
            chat_id: "424242".to_string(),
            api_base: "https://api.telegram.org".to_string(),
        }
    }

    fn ok_response() -> HttpResponse {
        HttpResponse {
            status: 200,
            body: r#"{"ok":true,"result":{}}"#.to_string(),
        }
    }

    #[tokio::test]
    async fn send_posts_to_send_message_with_chat_and_text() {
        let mut mock = MockHttpClient::new();
        mock.expect_post_form()
            .withf(|url, params| {
                url == "https://api.telegram.org/bot123:abc/sendMessage"
                    && params.contains(&("chat_id", "424242"))
                    && params.contains(&("text", "status changed"))
            })
            .returning(|_, _| Box::pin(async { Ok(ok_response()) }));

        let messenger = TelegramMessenger::new(&test_config(), Arc::new(mock));
        messenger.send("status changed").await.unwrap();
    }

    #[tokio::test]
    async fn send_returns_delivery_error_on_non_200() {
        let mut mock = MockHttpClient::new();
        mock.expect_post_form().returning(|_, _| {
            Box::pin(async {
                Ok(HttpResponse {
                    status: 400,
                    body: r#"{"ok":false,"description":"Bad Request: chat not found"}"#.to_string(),
                })
            })
        });

        let messenger = TelegramMessenger::new(&test_config(), Arc::new(mock));
        let err = messenger.send("status changed").await.unwrap_err();

        match &err {
            crate::HeraldError::Delivery(msg) => assert!(msg.contains("400"), "{msg}"),
            other => panic!("expected HeraldError::Delivery, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn send_propagates_transport_error() {
        let mut mock = MockHttpClient::new();
        mock.expect_post_form().returning(|_, _| {
            Box::pin(async { Err(crate::HeraldError::Http("timeout".to_string())) })
        });

        let messenger = TelegramMessenger::new(&test_config(), Arc::new(mock));
        let err = messenger.send("status changed").await.unwrap_err();
        assert!(matches!(err, crate::HeraldError::Http(_)));
    }

    #[tokio::test]
    async fn verify_checks_bot_and_chat() {
        let mut mock = MockHttpClient::new();
        mock.expect_get()
            .withf(|url, _| url == "https://api.telegram.org/bot123:abc/getMe")
            .returning(|_, _| Box::pin(async { Ok(ok_response()) }));
        mock.expect_get()
            .withf(|url, _| {
                url == "https://api.telegram.org/bot123:abc/getChat?chat_id=424242"
            })
            .returning(|_, _| Box::pin(async { Ok(ok_response()) }));

        let messenger = TelegramMessenger::new(&test_config(), Arc::new(mock));
        messenger.verify().await.unwrap();
    }

    #[tokio::test]
    async fn verify_rejects_bad_bot_token() {
        let mut mock = MockHttpClient::new();
        mock.expect_get().returning(|_, _| {
            Box::pin(async {
                Ok(HttpResponse {
                    status: 401,
                    body: r#"{"ok":false,"description":"Unauthorized"}"#.to_string(),
                })
            })
        });

        let messenger = TelegramMessenger::new(&test_config(), Arc::new(mock));
        let err = messenger.verify().await.unwrap_err();

        match &err {
            crate::HeraldError::Config(msg) => assert!(msg.contains("bot token"), "{msg}"),
            other => panic!("expected HeraldError::Config, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn verify_rejects_unknown_chat() {
        let mut mock = MockHttpClient::new();
        mock.expect_get()
            .withf(|url, _| url.ends_with("/getMe"))
            .returning(|_, _| Box::pin(async { Ok(ok_response()) }));
        mock.expect_get()
            .withf(|url, _| url.contains("/getChat"))
            .returning(|_, _| {
                Box::pin(async {
                    Ok(HttpResponse {
                        status: 400,
                        body: r#"{"ok":false,"description":"Bad Request: chat not found"}"#
                            .to_string(),
                    })
                })
            });

        let messenger = TelegramMessenger::new(&test_config(), Arc::new(mock));
        let err = messenger.verify().await.unwrap_err();

        match &err {
            crate::HeraldError::Config(msg) => assert!(msg.contains("chat id"), "{msg}"),
            other => panic!("expected HeraldError::Config, got {other:?}"),
        }
    }
}
