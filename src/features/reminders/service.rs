//! Reminder lifecycle orchestration
//!
//! Glues the store, scheduler, extractor and chat gateway together. The
//! rule throughout: store membership and scheduler activity change together
//! before any chat I/O happens, and no remote failure is ever allowed to
//! leave the two disagreeing about whether a reminder is alive.

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::path::Path;
use std::sync::Arc;

use super::entity::ReminderEntity;
use super::error::ReminderError;
use super::persistence;
use super::scheduler::ReminderScheduler;
use super::splitter;
use super::store::ReminderStore;
use crate::features::time_extract::TimeExtractor;
use crate::gateway::{ChatGateway, GatewayError};

/// Human-readable instant, matching what confirmation and fire messages show.
pub fn fmt_instant(instant: DateTime<Utc>) -> String {
    instant.format("%H:%M:%S on %b %-d, %Y").to_string()
}

pub struct ReminderService {
    store: Arc<ReminderStore>,
    scheduler: Arc<ReminderScheduler>,
    gateway: Arc<dyn ChatGateway>,
    extractor: Arc<dyn TimeExtractor>,
}

impl ReminderService {
    pub fn new(
        store: Arc<ReminderStore>,
        scheduler: Arc<ReminderScheduler>,
        gateway: Arc<dyn ChatGateway>,
        extractor: Arc<dyn TimeExtractor>,
    ) -> Self {
        Self {
            store,
            scheduler,
            gateway,
            extractor,
        }
    }

    /// Create every reminder contained in one message.
    ///
    /// Extraction and splitting run first; a single past instant rejects
    /// the whole message before any side effect. Each accepted reminder
    /// gets a confirmation message, a store entry, and a scheduled wait.
    pub async fn create_from_message(
        &self,
        owner_id: u64,
        channel_id: u64,
        message_id: u64,
        text: &str,
    ) -> Result<Vec<ReminderEntity>, ReminderError> {
        let now = Utc::now();
        let matches = self.extractor.extract(text, now);
        let drafts = splitter::split_text_and_times(text, &matches, now)?;

        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let mut entity = ReminderEntity::new(
                owner_id,
                message_id,
                channel_id,
                now,
                draft.fire_at,
                draft.text,
            );

            let confirmation = format!(
                "<@{owner_id}> A reminder has been created for \"{}\" and is set to go off at {}.",
                entity.text,
                fmt_instant(entity.fire_at)
            );
            // Confirmation is best-effort: the reminder exists whether or
            // not Discord took the message.
            match self.gateway.send(channel_id, &confirmation).await {
                Ok(confirmation_id) => entity.confirmation_message_id = Some(confirmation_id),
                Err(e) => warn!("failed to send confirmation for reminder {}: {e}", entity.id),
            }

            self.store.add(entity.clone());
            self.schedule_fire(entity.clone());
            created.push(entity);
        }
        Ok(created)
    }

    /// Register the wait that delivers the reminder when its instant
    /// arrives. The store entry is dropped before the notification goes
    /// out, so a failed send never resurrects a reminder.
    fn schedule_fire(&self, entity: ReminderEntity) {
        let store = self.store.clone();
        let gateway = self.gateway.clone();
        let id = entity.id;

        self.scheduler.schedule(id, entity.fire_at, move || async move {
            store.remove(id);

            let mut notification = format!(
                "<@{}> Reminder for \"{}\" from {}.",
                entity.owner_id,
                entity.text,
                fmt_instant(entity.created_at)
            );
            match gateway
                .message_link(entity.origin_channel_id, entity.origin_message_id)
                .await
            {
                Ok(Some(link)) => {
                    notification.push_str(&format!(" Here is a link to the original message: {link}"));
                }
                // Deleted origin messages only lose the link, never the
                // reminder itself.
                Ok(None) => {}
                Err(e) => debug!("could not build origin link for reminder {id}: {e}"),
            }

            if let Err(e) = gateway.send(entity.origin_channel_id, &notification).await {
                warn!("failed to deliver reminder {id}: {e}");
            }
        });
    }

    /// Cancel and remove the reminder a token resolves to, then clean up
    /// its origin and confirmation messages best-effort.
    pub async fn delete(
        &self,
        owner_id: u64,
        token: &str,
    ) -> Result<ReminderEntity, ReminderError> {
        let entity = self
            .store
            .resolve(owner_id, token)
            .ok_or_else(|| ReminderError::NotFound(token.trim().to_string()))?;

        self.retire(&entity).await;
        Ok(entity)
    }

    /// Cancel and remove every reminder the owner has. Returns the removed
    /// entities (the count is what callers usually report).
    pub async fn delete_all(&self, owner_id: u64) -> Vec<ReminderEntity> {
        let entities = self.store.take_all(owner_id);
        for entity in &entities {
            if let Err(ReminderError::AlreadyTerminal) = self.scheduler.cancel(entity.id) {
                debug!("reminder {} fired while being bulk-deleted", entity.id);
            }
            self.cleanup_messages(entity).await;
        }
        entities
    }

    /// Take one reminder out of play: cancel its wait, drop it from the
    /// store, delete its chat messages.
    async fn retire(&self, entity: &ReminderEntity) {
        // Cancel first so the fire callback cannot send after the user
        // asked for deletion. Losing the race is fine: the fire path did
        // the removal instead, and remove() below is a no-op.
        if let Err(ReminderError::AlreadyTerminal) = self.scheduler.cancel(entity.id) {
            debug!("reminder {} already terminal at delete time", entity.id);
        }
        self.store.remove(entity.id);
        self.cleanup_messages(entity).await;
    }

    /// Best-effort deletion of the origin and confirmation messages.
    /// `NotFound` means someone beat us to it, which is just as good.
    async fn cleanup_messages(&self, entity: &ReminderEntity) {
        let mut targets = vec![entity.origin_message_id];
        targets.extend(entity.confirmation_message_id);

        for message_id in targets {
            match self.delete_with_retry(entity.origin_channel_id, message_id).await {
                Ok(()) | Err(GatewayError::NotFound(_)) => {}
                Err(e) => warn!("could not clean up message {message_id}: {e}"),
            }
        }
    }

    /// One retry on `Unavailable`; anything more is the next cleanup's
    /// problem.
    async fn delete_with_retry(&self, channel_id: u64, message_id: u64) -> Result<(), GatewayError> {
        match self.gateway.fetch_and_delete(channel_id, message_id).await {
            Err(GatewayError::Unavailable(_)) => {
                self.gateway.fetch_and_delete(channel_id, message_id).await
            }
            other => other,
        }
    }

    /// Ordered snapshot of one owner's pending reminders.
    pub fn list(&self, owner_id: u64) -> Vec<ReminderEntity> {
        self.store.list(owner_id)
    }

    /// Number of scheduled waits; store and scheduler agree on this.
    pub fn pending(&self) -> usize {
        self.scheduler.pending()
    }

    /// Persist every pending reminder. Called at orderly shutdown.
    pub fn save(&self, path: &Path) -> Result<()> {
        persistence::save_all(path, &self.store.snapshot_all())
    }

    /// Reload persisted reminders and put each one back in play with its
    /// original fire instant. Past-due reminders fire immediately rather
    /// than being dropped.
    pub fn restore(&self, path: &Path) -> Result<usize> {
        let entities = persistence::load_all(path)?;
        let count = entities.len();
        for entity in entities {
            self.store.add(entity.clone());
            self.schedule_fire(entity);
        }
        Ok(count)
    }
}
