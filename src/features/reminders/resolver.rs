//! Deletion target resolution
//!
//! A delete token is either a 1-based position on the user's reminder list
//! (the same numbering the list command shows) or the literal text of a
//! reminder. Numeric tokens are always tried as an index first, even when
//! some reminder's text happens to be that same numeral.

use super::entity::ReminderEntity;

/// Resolve a token against an ordered reminder list.
///
/// Order of attempts:
/// 1. `token` as an integer in `[1, len]` -> that list position.
/// 2. First reminder whose text equals the trimmed token exactly
///    (case-sensitive; reminder text preserves the user's casing).
/// 3. No match -> `None`.
pub fn resolve<'a>(list: &'a [ReminderEntity], token: &str) -> Option<&'a ReminderEntity> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    if let Ok(index) = token.parse::<usize>() {
        if (1..=list.len()).contains(&index) {
            return Some(&list[index - 1]);
        }
        // An out-of-range numeral can still name a reminder literally.
    }

    list.iter().find(|r| r.text == token)
}
