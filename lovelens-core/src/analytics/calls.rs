//! Call mention detection
//!
//! Exports carry no call records, so calls are inferred from message text:
//! any message mentioning a call counts as one call, and the first
//! `<number> <unit>` token in it is taken as the call's duration.

use crate::types::Message;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

static CALL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"call|called|calling|missed call|video call|voice call|rang|ringing").unwrap()
});

static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)\s*(minutes|minute|min|hours|hour|hrs|hr|seconds|second|secs|sec)").unwrap()
});

/// Call statistics inferred from message text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CallStats {
    pub total_calls: usize,
    /// Sum of detected durations in minutes
    pub total_duration: f64,
    /// `total_duration / total_calls`, 0 without calls
    pub average_duration: f64,
    pub calls_by_participant: BTreeMap<String, usize>,
    pub missed_calls: usize,
}

/// Running call tally, fed one message at a time.
#[derive(Debug, Default)]
pub(crate) struct CallTally {
    stats: CallStats,
}

impl CallTally {
    pub fn new(participants: &[String]) -> Self {
        let mut stats = CallStats::default();
        for participant in participants {
            stats.calls_by_participant.insert(participant.clone(), 0);
        }
        Self { stats }
    }

    /// `lowered` is the message content in lowercase.
    pub fn observe(&mut self, message: &Message, lowered: &str) {
        if !CALL_RE.is_match(lowered) {
            return;
        }

        self.stats.total_calls += 1;
        *self
            .stats
            .calls_by_participant
            .entry(message.sender.clone())
            .or_insert(0) += 1;

        if lowered.contains("missed") {
            self.stats.missed_calls += 1;
        }

        if let Some(minutes) = duration_minutes(lowered) {
            self.stats.total_duration += minutes;
        }
    }

    pub fn finish(mut self) -> CallStats {
        if self.stats.total_calls > 0 {
            self.stats.average_duration = self.stats.total_duration / self.stats.total_calls as f64;
        }
        self.stats
    }
}

/// Minutes described by the first duration token in `text`.
///
/// Only the first token counts: "1 hour 30 minutes" is 60.
pub fn duration_minutes(text: &str) -> Option<f64> {
    let caps = DURATION_RE.captures(text)?;
    let value: f64 = caps[1].parse().ok()?;
    let unit = &caps[2];

    let minutes = if unit.starts_with('h') {
        value * 60.0
    } else if unit.starts_with('s') {
        value / 60.0
    } else {
        value
    };
    Some(minutes)
}

/// Scan messages for call mentions.
pub fn detect_calls(messages: &[Message], participants: &[String]) -> CallStats {
    let mut tally = CallTally::new(participants);
    for message in messages {
        tally.observe(message, &message.content.to_lowercase());
    }
    tally.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn msg(sender: &str, content: &str) -> Message {
        Message {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            sender: sender.to_string(),
            content: content.to_string(),
            is_media: false,
        }
    }

    fn people() -> Vec<String> {
        vec!["Alice".to_string(), "Bob".to_string()]
    }

    #[test]
    fn test_missed_call() {
        let stats = detect_calls(&[msg("Bob", "sorry, missed call from you")], &people());
        assert_eq!(stats.total_calls, 1);
        assert_eq!(stats.missed_calls, 1);
        assert_eq!(stats.calls_by_participant["Bob"], 1);
        assert_eq!(stats.calls_by_participant["Alice"], 0);
        assert_eq!(stats.total_duration, 0.0);
        assert_eq!(stats.average_duration, 0.0);
    }

    #[test]
    fn test_only_first_duration_counts() {
        let stats = detect_calls(
            &[msg("Alice", "talked for 1 hour 30 minutes on call")],
            &people(),
        );
        assert_eq!(stats.total_calls, 1);
        assert_eq!(stats.total_duration, 60.0);
    }

    #[test]
    fn test_duration_units() {
        assert_eq!(duration_minutes("45 min"), Some(45.0));
        assert_eq!(duration_minutes("2hrs"), Some(120.0));
        assert_eq!(duration_minutes("90 seconds"), Some(1.5));
        assert_eq!(duration_minutes("3 minutes"), Some(3.0));
        assert_eq!(duration_minutes("no numbers here"), None);
    }

    #[test]
    fn test_average_duration() {
        let stats = detect_calls(
            &[
                msg("Alice", "video call was 20 minutes"),
                msg("Bob", "call me"),
                msg("Bob", "hello there"),
            ],
            &people(),
        );
        assert_eq!(stats.total_calls, 2);
        assert_eq!(stats.total_duration, 20.0);
        assert_eq!(stats.average_duration, 10.0);
    }

    #[test]
    fn test_case_insensitive() {
        let stats = detect_calls(&[msg("Alice", "CALL ME NOW")], &people());
        assert_eq!(stats.total_calls, 1);
    }

    #[test]
    fn test_no_calls() {
        let stats = detect_calls(&[msg("Alice", "good morning")], &people());
        assert_eq!(stats.total_calls, 0);
        assert_eq!(stats.average_duration, 0.0);
    }
}
