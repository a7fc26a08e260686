//! Command dispatch
//!
//! Takes a parsed [`BotCommand`] plus the ids of the message that carried
//! it, runs the matching reminder operation, and replies through the chat
//! gateway. Everything here is per-user and non-fatal: a failure is
//! reported to the requester and the bot moves on.

use anyhow::Result;
use log::info;
use std::sync::Arc;

use super::{parse, BotCommand};
use crate::features::reminders::service::fmt_instant;
use crate::features::reminders::{ReminderError, ReminderService};
use crate::gateway::ChatGateway;

pub struct CommandHandler {
    service: Arc<ReminderService>,
    gateway: Arc<dyn ChatGateway>,
    prefixes: Vec<String>,
}

impl CommandHandler {
    pub fn new(
        service: Arc<ReminderService>,
        gateway: Arc<dyn ChatGateway>,
        prefixes: Vec<String>,
    ) -> Self {
        Self {
            service,
            gateway,
            prefixes,
        }
    }

    /// Handle one incoming chat message. Returns `true` when the message
    /// was addressed to the bot.
    pub async fn handle_message(
        &self,
        owner_id: u64,
        channel_id: u64,
        message_id: u64,
        content: &str,
    ) -> Result<bool> {
        let Some(command) = parse(content, &self.prefixes) else {
            return Ok(false);
        };

        match command {
            BotCommand::Help => {
                self.gateway
                    .send(channel_id, &self.help_message(owner_id))
                    .await?;
            }
            BotCommand::ListReminders => {
                let listing = self.build_listing(owner_id);
                self.gateway.send(channel_id, &listing).await?;
            }
            BotCommand::Delete(token) => match self.service.delete(owner_id, &token).await {
                Ok(deleted) => {
                    info!("user {owner_id} deleted reminder {}", deleted.id);
                    let notice = format!(
                        "<@{owner_id}> The reminder for \"{}\" set to go off at {} has been deleted.",
                        deleted.text,
                        fmt_instant(deleted.fire_at)
                    );
                    self.gateway.send(channel_id, &notice).await?;
                }
                // NotFound and the race-loser case both just read back to
                // the user as "that reminder is gone".
                Err(e) => {
                    self.gateway
                        .send(channel_id, &format!("<@{owner_id}> {e}."))
                        .await?;
                }
            },
            BotCommand::DeleteAll => {
                let removed = self.service.delete_all(owner_id).await;
                info!("user {owner_id} deleted all {} reminder(s)", removed.len());
                let notice = if removed.is_empty() {
                    format!("<@{owner_id}> You have no active reminders!")
                } else {
                    format!(
                        "<@{owner_id}> Deleted {} reminder(s).",
                        removed.len()
                    )
                };
                self.gateway.send(channel_id, &notice).await?;
            }
            BotCommand::Create(text) => {
                match self
                    .service
                    .create_from_message(owner_id, channel_id, message_id, &text)
                    .await
                {
                    Ok(created) => {
                        info!("user {owner_id} created {} reminder(s)", created.len());
                    }
                    Err(e @ ReminderError::PastTimestamp { .. }) => {
                        let notice = format!(
                            "<@{owner_id}> You cannot create a reminder set to go off in the past: {e}."
                        );
                        self.gateway.send(channel_id, &notice).await?;
                    }
                    Err(e) => {
                        self.gateway
                            .send(channel_id, &format!("<@{owner_id}> {e}."))
                            .await?;
                    }
                }
            }
        }
        Ok(true)
    }

    fn help_message(&self, owner_id: u64) -> String {
        let prefixes = self
            .prefixes
            .iter()
            .map(|p| format!("\"{p}\""))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "<@{owner_id}> Create a reminder with any message prefix followed by a reminder \
             message and a time (defaults to one day from now when no time is given).\n\
             Example: \"{0} call mom in 10 minutes\".\n\
             Prefixes: {prefixes}. As long as the first word of your message starts with a \
             prefix, the bot will respond.\n\
             Commands:\n\
             - \"{0} reminders\": list your active reminders\n\
             - \"{0} delete <number or text>\": delete one reminder\n\
             - \"{0} delete all\": delete all of your reminders\n\
             - \"{0} help\": this message",
            self.prefixes[0]
        )
    }

    fn build_listing(&self, owner_id: u64) -> String {
        let reminders = self.service.list(owner_id);
        if reminders.is_empty() {
            return format!("<@{owner_id}> You have no active reminders!");
        }

        let mut listing = format!("<@{owner_id}> Here is a list of your active reminders:");
        for (index, reminder) in reminders.iter().enumerate() {
            listing.push_str(&format!(
                "\n{} - \"{}\" for {}",
                index + 1,
                reminder.text,
                fmt_instant(reminder.fire_at)
            ));
        }
        listing
    }
}
