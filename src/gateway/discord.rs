//! Discord implementation of the chat gateway
//!
//! Thin wrapper over `serenity::http::Http`. All Discord-specific error
//! shapes are flattened into [`GatewayError`] here so the core never sees
//! serenity types.

use async_trait::async_trait;
use log::debug;
use serenity::http::{Http, HttpError};
use serenity::model::id::ChannelId;
use std::sync::Arc;

use super::{ChatGateway, GatewayError};

/// Production gateway backed by the Discord HTTP API.
pub struct DiscordGateway {
    http: Arc<Http>,
}

impl DiscordGateway {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// Flatten a serenity error, mapping HTTP 404 to `NotFound`.
    fn map_err(err: serenity::Error, message_id: u64) -> GatewayError {
        if let serenity::Error::Http(http_err) = &err {
            if let HttpError::UnsuccessfulRequest(resp) = http_err.as_ref() {
                if resp.status_code == serenity::http::StatusCode::NOT_FOUND {
                    return GatewayError::NotFound(message_id);
                }
            }
        }
        GatewayError::Unavailable(err.to_string())
    }
}

#[async_trait]
impl ChatGateway for DiscordGateway {
    async fn send(&self, channel_id: u64, text: &str) -> Result<u64, GatewayError> {
        let message = ChannelId(channel_id)
            .say(&self.http, text)
            .await
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;
        Ok(message.id.0)
    }

    async fn fetch_and_delete(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<(), GatewayError> {
        self.http
            .delete_message(channel_id, message_id)
            .await
            .map_err(|e| Self::map_err(e, message_id))
    }

    async fn message_link(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<Option<String>, GatewayError> {
        match self.http.get_message(channel_id, message_id).await {
            Ok(message) => Ok(Some(message.link())),
            Err(e) => match Self::map_err(e, message_id) {
                GatewayError::NotFound(_) => {
                    debug!("origin message {message_id} is gone; skipping link");
                    Ok(None)
                }
                other => Err(other),
            },
        }
    }
}
