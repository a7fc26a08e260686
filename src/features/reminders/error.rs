//! Domain errors for the reminder lifecycle

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors surfaced by reminder operations.
///
/// None of these are fatal to the process; handlers report them to the
/// requesting user and carry on.
#[derive(Debug, Error)]
pub enum ReminderError {
    /// Creation rejected: the resolved instant is already in the past.
    /// Aborts every reminder from the same message, with no side effects.
    #[error("the reminder \"{text}\" was set to go off at {fire_at}, which is in the past")]
    PastTimestamp {
        text: String,
        fire_at: DateTime<Utc>,
    },

    /// Resolve/delete found no matching reminder.
    #[error("no reminder matches \"{0}\"")]
    NotFound(String),

    /// The loser of a cancel/fire race. Absorbed by callers, never shown
    /// to users.
    #[error("reminder already fired or was cancelled")]
    AlreadyTerminal,
}
