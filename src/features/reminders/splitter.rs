//! Text/time pairing for reminder creation
//!
//! The time extractor hands back the substrings it matched, in order of
//! first occurrence. Those substrings are used as literal delimiters (a
//! position search, never a pattern) to cut the input into candidate text
//! fragments, which are then paired with the extracted instants
//! positionally. One message can legitimately produce several reminders.

use chrono::{DateTime, Duration, Utc};

use super::error::ReminderError;
use crate::features::time_extract::TimeMatch;

/// Fire horizon used when the user gave no time at all, or gave more text
/// fragments than times.
pub const DEFAULT_HORIZON_DAYS: i64 = 1;

/// Text and fire instant for one reminder-to-be.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderDraft {
    pub text: String,
    pub fire_at: DateTime<Utc>,
}

/// Split `text` on the matched substrings and pair fragments with instants.
///
/// - more fragments than instants: extras get `now + 1 day`
/// - more instants than fragments: extras get empty text
/// - zero matches: the whole input is one reminder at the default horizon
///
/// Any instant strictly before `now` fails the entire call with
/// `PastTimestamp`; the caller must not have produced side effects yet.
pub fn split_text_and_times(
    text: &str,
    matches: &[TimeMatch],
    now: DateTime<Utc>,
) -> Result<Vec<ReminderDraft>, ReminderError> {
    let fragments = split_on_literals(text, matches);

    let count = fragments.len().max(matches.len()).max(1);
    let default_fire = now + Duration::days(DEFAULT_HORIZON_DAYS);

    let mut drafts = Vec::with_capacity(count);
    for i in 0..count {
        let text = fragments.get(i).cloned().unwrap_or_default();
        let fire_at = matches.get(i).map(|m| m.instant).unwrap_or(default_fire);
        if fire_at < now {
            return Err(ReminderError::PastTimestamp { text, fire_at });
        }
        drafts.push(ReminderDraft { text, fire_at });
    }
    Ok(drafts)
}

/// Cut `text` on each matched substring in order, left to right. Fragments
/// are trimmed and empty ones dropped.
fn split_on_literals(text: &str, matches: &[TimeMatch]) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut rest = text;

    for m in matches {
        match rest.find(m.substring.as_str()) {
            Some(pos) => {
                push_trimmed(&mut fragments, &rest[..pos]);
                rest = &rest[pos + m.substring.len()..];
            }
            // Extractor reported a substring that is not in the text;
            // nothing to cut on.
            None => continue,
        }
    }
    push_trimmed(&mut fragments, rest);
    fragments
}

fn push_trimmed(fragments: &mut Vec<String>, piece: &str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        fragments.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(substring: &str, instant: DateTime<Utc>) -> TimeMatch {
        TimeMatch {
            substring: substring.to_string(),
            instant,
        }
    }

    #[test]
    fn test_single_fragment_single_time() {
        let now = Utc::now();
        let fire = now + Duration::minutes(10);
        let drafts =
            split_text_and_times("call mom in 10 minutes", &[m("in 10 minutes", fire)], now)
                .unwrap();
        assert_eq!(drafts, vec![ReminderDraft { text: "call mom".to_string(), fire_at: fire }]);
    }

    #[test]
    fn test_two_fragments_two_times() {
        let now = Utc::now();
        let tomorrow = now + Duration::days(1);
        let two_hours = now + Duration::hours(2);
        let drafts = split_text_and_times(
            "buy milk tomorrow and call dentist in 2 hours",
            &[m("tomorrow", tomorrow), m("in 2 hours", two_hours)],
            now,
        )
        .unwrap();

        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].text, "buy milk");
        assert_eq!(drafts[0].fire_at, tomorrow);
        assert_eq!(drafts[1].text, "and call dentist");
        assert_eq!(drafts[1].fire_at, two_hours);
    }

    #[test]
    fn test_zero_matches_defaults_to_one_day() {
        let now = Utc::now();
        let drafts = split_text_and_times("water the plants", &[], now).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].text, "water the plants");
        assert_eq!(drafts[0].fire_at, now + Duration::days(1));
    }

    #[test]
    fn test_more_times_than_fragments_get_empty_text() {
        let now = Utc::now();
        let a = now + Duration::hours(1);
        let b = now + Duration::hours(2);
        // Input is nothing but two time phrases.
        let drafts = split_text_and_times(
            "in 1 hour in 2 hours",
            &[m("in 1 hour", a), m("in 2 hours", b)],
            now,
        )
        .unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].text, "");
        assert_eq!(drafts[0].fire_at, a);
        assert_eq!(drafts[1].text, "");
        assert_eq!(drafts[1].fire_at, b);
    }

    #[test]
    fn test_more_fragments_than_times_get_default_horizon() {
        let now = Utc::now();
        let fire = now + Duration::hours(2);
        let drafts = split_text_and_times(
            "pay rent in 2 hours also feed the cat",
            &[m("in 2 hours", fire)],
            now,
        )
        .unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].text, "pay rent");
        assert_eq!(drafts[0].fire_at, fire);
        assert_eq!(drafts[1].text, "also feed the cat");
        assert_eq!(drafts[1].fire_at, now + Duration::days(1));
    }

    #[test]
    fn test_past_instant_aborts_everything() {
        let now = Utc::now();
        let future = now + Duration::hours(1);
        let past = now - Duration::minutes(5);
        let err = split_text_and_times(
            "ok in 1 hour but bad 5 minutes ago",
            &[m("in 1 hour", future), m("5 minutes ago", past)],
            now,
        )
        .unwrap_err();
        assert!(matches!(err, ReminderError::PastTimestamp { .. }));
    }

    #[test]
    fn test_unmatched_substring_is_skipped() {
        let now = Utc::now();
        let fire = now + Duration::hours(1);
        let drafts =
            split_text_and_times("do the thing", &[m("not present", fire)], now).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].text, "do the thing");
        assert_eq!(drafts[0].fire_at, fire);
    }

    #[test]
    fn test_fire_exactly_at_now_is_accepted() {
        let now = Utc::now();
        let drafts = split_text_and_times("go", &[m("go", now)], now).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].fire_at, now);
    }
}
