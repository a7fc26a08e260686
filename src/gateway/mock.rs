//! In-memory gateway used by unit tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use super::{ChatGateway, GatewayError};

/// Records every send/delete so tests can assert on the traffic.
#[derive(Default)]
pub struct MockChatGateway {
    next_id: AtomicU64,
    pub fail_sends: AtomicBool,
    /// One entry per failed delete remaining before deletes start succeeding.
    pub delete_failures: AtomicU64,
    pub sent: Mutex<Vec<(u64, String)>>,
    pub deleted: Mutex<Vec<u64>>,
}

impl MockChatGateway {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1000),
            ..Default::default()
        }
    }

    pub fn sent_messages(&self) -> Vec<(u64, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn deleted_messages(&self) -> Vec<u64> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatGateway for MockChatGateway {
    async fn send(&self, channel_id: u64, text: &str) -> Result<u64, GatewayError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable("mock send failure".to_string()));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.sent
            .lock()
            .unwrap()
            .push((channel_id, text.to_string()));
        Ok(id)
    }

    async fn fetch_and_delete(
        &self,
        _channel_id: u64,
        message_id: u64,
    ) -> Result<(), GatewayError> {
        let remaining = self.delete_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.delete_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(GatewayError::Unavailable("mock delete failure".to_string()));
        }
        self.deleted.lock().unwrap().push(message_id);
        Ok(())
    }

    async fn message_link(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<Option<String>, GatewayError> {
        Ok(Some(format!(
            "https://discord.com/channels/@me/{channel_id}/{message_id}"
        )))
    }
}
