//! # Chat Gateway
//!
//! Boundary between the reminder core and the chat service. The core only
//! talks to [`ChatGateway`]; the production implementation wraps the
//! Discord HTTP client.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod discord;

#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

pub use discord::DiscordGateway;

/// Errors from the chat service boundary.
///
/// `NotFound` on a delete means the message is already gone, which callers
/// treat as the job being done rather than a failure.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("message {0} no longer exists")]
    NotFound(u64),
    #[error("chat service unavailable: {0}")]
    Unavailable(String),
}

/// Message send/fetch/delete operations the reminder core depends on.
///
/// Implementations must not hold locks across these calls; the core invokes
/// them only after releasing its own state locks.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Send a message to a channel, returning the new message id.
    async fn send(&self, channel_id: u64, text: &str) -> Result<u64, GatewayError>;

    /// Delete a message if it still exists.
    ///
    /// Returns `NotFound` when the message is already gone.
    async fn fetch_and_delete(&self, channel_id: u64, message_id: u64)
        -> Result<(), GatewayError>;

    /// Jump link for a message, if it still exists.
    ///
    /// A missing origin message is a display concern only, so failures here
    /// collapse to `None` at call sites.
    async fn message_link(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<Option<String>, GatewayError>;
}
