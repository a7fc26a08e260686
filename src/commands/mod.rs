//! # Commands
//!
//! Prefix-command parsing and dispatch. A message is addressed to the bot
//! when its first word starts with one of the configured prefixes; what
//! follows is either a command verb or free text for reminder creation.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod handler;

pub use handler::CommandHandler;

/// A parsed bot command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Help,
    /// List the requesting user's pending reminders.
    ListReminders,
    /// Delete the reminder the token resolves to (1-based index or text).
    Delete(String),
    /// Delete every reminder the requesting user has.
    DeleteAll,
    /// Anything else: the message body is a reminder request.
    Create(String),
}

/// Parse message content against the configured prefixes.
///
/// Returns `None` when the message is not addressed to the bot. The first
/// word only has to start with a prefix ("remindme ..." matches "remind"),
/// mirroring how people actually type at the bot. Reminder text keeps the
/// user's casing; only verbs are matched case-insensitively.
pub fn parse(content: &str, prefixes: &[String]) -> Option<BotCommand> {
    let first = content.split_whitespace().next()?;
    let lowered = first.to_lowercase();
    if !prefixes.iter().any(|p| lowered.starts_with(p.as_str())) {
        return None;
    }

    let rest = content
        .trim_start()
        .strip_prefix(first)
        .unwrap_or("")
        .trim();

    let mut parts = rest.splitn(2, char::is_whitespace);
    let verb = parts.next().unwrap_or("");
    let remainder = parts.next().unwrap_or("").trim();

    let command = match verb.to_lowercase().as_str() {
        "help" if remainder.is_empty() => BotCommand::Help,
        "reminders" if remainder.is_empty() => BotCommand::ListReminders,
        "delete" if !remainder.is_empty() => {
            if remainder.eq_ignore_ascii_case("all") {
                BotCommand::DeleteAll
            } else {
                BotCommand::Delete(remainder.to_string())
            }
        }
        _ => BotCommand::Create(rest.to_string()),
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefixes() -> Vec<String> {
        vec!["rm".to_string(), "remind".to_string()]
    }

    #[test]
    fn test_non_prefixed_message_is_ignored() {
        assert_eq!(parse("hello there", &prefixes()), None);
        assert_eq!(parse("", &prefixes()), None);
    }

    #[test]
    fn test_prefix_match_is_loose_and_case_insensitive() {
        assert_eq!(
            parse("remindme do a thing", &prefixes()),
            Some(BotCommand::Create("do a thing".to_string()))
        );
        assert_eq!(
            parse("RM do a thing", &prefixes()),
            Some(BotCommand::Create("do a thing".to_string()))
        );
    }

    #[test]
    fn test_verbs() {
        assert_eq!(parse("rm help", &prefixes()), Some(BotCommand::Help));
        assert_eq!(parse("rm Reminders", &prefixes()), Some(BotCommand::ListReminders));
        assert_eq!(parse("rm delete all", &prefixes()), Some(BotCommand::DeleteAll));
        assert_eq!(
            parse("rm delete 2", &prefixes()),
            Some(BotCommand::Delete("2".to_string()))
        );
        assert_eq!(
            parse("rm delete buy milk", &prefixes()),
            Some(BotCommand::Delete("buy milk".to_string()))
        );
    }

    #[test]
    fn test_delete_token_keeps_casing() {
        assert_eq!(
            parse("rm delete Buy Milk", &prefixes()),
            Some(BotCommand::Delete("Buy Milk".to_string()))
        );
    }

    #[test]
    fn test_verb_with_trailing_text_is_a_reminder() {
        // "help me move in 2 days" is a reminder, not the help command.
        assert_eq!(
            parse("rm help me move in 2 days", &prefixes()),
            Some(BotCommand::Create("help me move in 2 days".to_string()))
        );
        // Bare "delete" has no token, so it reads as a reminder too.
        assert_eq!(
            parse("rm delete", &prefixes()),
            Some(BotCommand::Create("delete".to_string()))
        );
    }

    #[test]
    fn test_bare_prefix_creates_empty_reminder() {
        assert_eq!(parse("remind", &prefixes()), Some(BotCommand::Create(String::new())));
    }
}
