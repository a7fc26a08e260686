//! Relative time phrase extractor
//!
//! Recognizes `in N seconds/minutes/hours/days/weeks` (singular or plural)
//! and `tomorrow`, case-insensitively. This intentionally covers only the
//! phrases people actually type at the bot; anything fancier belongs in an
//! external date engine behind the same trait.

use chrono::{DateTime, Duration, Utc};
use regex::Regex;

use super::{TimeExtractor, TimeMatch};

pub struct RelativeTimeExtractor {
    relative: Regex,
    tomorrow: Regex,
}

impl RelativeTimeExtractor {
    pub fn new() -> Self {
        Self {
            // Both patterns are static, so compilation cannot fail.
            relative: Regex::new(r"(?i)\bin\s+(\d+)\s+(second|minute|hour|day|week)s?\b")
                .expect("static regex"),
            tomorrow: Regex::new(r"(?i)\btomorrow\b").expect("static regex"),
        }
    }

    fn unit_seconds(unit: &str) -> i64 {
        match unit.to_lowercase().as_str() {
            "second" => 1,
            "minute" => 60,
            "hour" => 60 * 60,
            "day" => 60 * 60 * 24,
            "week" => 60 * 60 * 24 * 7,
            _ => unreachable!("unit restricted by the pattern"),
        }
    }
}

impl Default for RelativeTimeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeExtractor for RelativeTimeExtractor {
    fn extract(&self, text: &str, reference: DateTime<Utc>) -> Vec<TimeMatch> {
        // (start position, match) so the combined list can be ordered by
        // first occurrence.
        let mut found: Vec<(usize, TimeMatch)> = Vec::new();

        for caps in self.relative.captures_iter(text) {
            let whole = caps.get(0).expect("group 0 always present");
            let amount: i64 = match caps[1].parse() {
                Ok(n) => n,
                // Longer than i64: not a usable duration, skip the match.
                Err(_) => continue,
            };
            let seconds = amount.saturating_mul(Self::unit_seconds(&caps[2]));
            found.push((
                whole.start(),
                TimeMatch {
                    substring: whole.as_str().to_string(),
                    instant: reference + Duration::seconds(seconds),
                },
            ));
        }

        for m in self.tomorrow.find_iter(text) {
            found.push((
                m.start(),
                TimeMatch {
                    substring: m.as_str().to_string(),
                    instant: reference + Duration::days(1),
                },
            ));
        }

        found.sort_by_key(|(pos, _)| *pos);
        found.into_iter().map(|(_, m)| m).collect()
    }
}
