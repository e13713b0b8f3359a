//! Core domain types for lovelens
//!
//! These types are the canonical model that every export format is
//! normalized into before any statistics are derived.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Transcript** | The complete ordered set of parsed messages plus derived metadata for one chat export |
//! | **Participant** | A sender name as it appears in the export |
//! | **Continuation line** | A raw line with no timestamp, appended to the previous message |
//! | **Active day** | A calendar day with at least one message |
//!
//! Timestamps are local and timezone-naive: exports carry wall-clock time
//! without an offset, so every calendar computation works on
//! [`NaiveDateTime`] / [`NaiveDate`].

use crate::error::{Error, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

// ============================================
// Message
// ============================================

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Local wall-clock time the message was sent (minute resolution)
    pub timestamp: NaiveDateTime,
    /// Sender name, trimmed
    pub sender: String,
    /// Message body; continuation lines are joined with `\n`
    pub content: String,
    /// True for media placeholders and empty bodies
    pub is_media: bool,
}

impl Message {
    /// Calendar day the message belongs to.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Length of the content in characters.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

// ============================================
// Transcript
// ============================================

/// First and last message timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// An ordered, typed two-party chat.
///
/// Built once from raw text and read-only afterwards. The message list is
/// always sorted ascending by timestamp; messages sharing a timestamp keep
/// their original relative order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTranscript {
    messages: Vec<Message>,
    participants: Vec<String>,
    date_range: DateRange,
    total_messages: usize,
    total_days: i64,
}

impl ChatTranscript {
    /// Assemble a transcript from messages in encounter order.
    ///
    /// Participants are collected in first-seen order *before* sorting, then
    /// the messages are stable-sorted by timestamp. Fails with
    /// [`Error::NoMessagesFound`] (and an empty sample) when `messages` is
    /// empty.
    pub fn from_messages(mut messages: Vec<Message>) -> Result<Self> {
        let mut participants: Vec<String> = Vec::new();
        for msg in &messages {
            if !participants.iter().any(|p| p == &msg.sender) {
                participants.push(msg.sender.clone());
            }
        }

        messages.sort_by_key(|m| m.timestamp);

        let (start, end) = match (messages.first(), messages.last()) {
            (Some(first), Some(last)) => (first.timestamp, last.timestamp),
            _ => return Err(Error::NoMessagesFound { sample: Vec::new() }),
        };

        let span_secs = end.signed_duration_since(start).num_seconds();
        let total_days = (span_secs + 86_399) / 86_400;

        Ok(Self {
            total_messages: messages.len(),
            messages,
            participants,
            date_range: DateRange { start, end },
            total_days,
        })
    }

    /// Messages sorted ascending by timestamp.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Sender names in first-seen order.
    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    pub fn total_messages(&self) -> usize {
        self.total_messages
    }

    /// Whole days spanned by the chat, rounded up.
    pub fn total_days(&self) -> i64 {
        self.total_days
    }

    /// The earliest message in the chat.
    pub fn first_message(&self) -> Option<&Message> {
        self.messages.first()
    }

    /// Enforce the two-party precondition.
    ///
    /// The parser accepts any number of senders; callers that compute
    /// relationship analytics reject everything but exactly two.
    pub fn ensure_two_participants(&self) -> Result<()> {
        if self.participants.len() == 2 {
            Ok(())
        } else {
            Err(Error::ParticipantCount {
                found: self.participants.clone(),
            })
        }
    }
}

// ============================================
// Calendar keys
// ============================================

/// A calendar month, ordered chronologically and displayed as `yyyy-mm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Weekday names indexed from Sunday, the order weekly buckets use.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Index of a date's weekday in [`WEEKDAY_NAMES`].
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(day: u32, hour: u32, minute: u32, sender: &str) -> Message {
        Message {
            timestamp: NaiveDate::from_ymd_opt(2024, 3, day)
                .unwrap()
                .and_hms_opt(hour, minute, 0)
                .unwrap(),
            sender: sender.to_string(),
            content: "hi".to_string(),
            is_media: false,
        }
    }

    #[test]
    fn test_from_messages_sorts_and_keeps_encounter_order_for_participants() {
        let transcript =
            ChatTranscript::from_messages(vec![msg(2, 9, 0, "Bob"), msg(1, 9, 0, "Alice")])
                .unwrap();

        assert_eq!(transcript.participants(), ["Bob", "Alice"]);
        assert_eq!(transcript.messages()[0].sender, "Alice");
        assert_eq!(transcript.total_messages(), 2);
        assert_eq!(transcript.total_days(), 1);
    }

    #[test]
    fn test_total_days_rounds_up_partial_days() {
        let transcript =
            ChatTranscript::from_messages(vec![msg(1, 9, 0, "A"), msg(3, 10, 0, "B")]).unwrap();
        assert_eq!(transcript.total_days(), 3);

        let same_minute =
            ChatTranscript::from_messages(vec![msg(1, 9, 0, "A"), msg(1, 9, 0, "B")]).unwrap();
        assert_eq!(same_minute.total_days(), 0);
    }

    #[test]
    fn test_sort_is_stable_for_equal_timestamps() {
        let mut first = msg(1, 9, 0, "A");
        first.content = "first".to_string();
        let mut second = msg(1, 9, 0, "B");
        second.content = "second".to_string();

        let transcript = ChatTranscript::from_messages(vec![first, second]).unwrap();
        assert_eq!(transcript.messages()[0].content, "first");
        assert_eq!(transcript.messages()[1].content, "second");
    }

    #[test]
    fn test_empty_messages_rejected() {
        let err = ChatTranscript::from_messages(Vec::new()).unwrap_err();
        assert!(matches!(err, Error::NoMessagesFound { .. }));
    }

    #[test]
    fn test_ensure_two_participants() {
        let two = ChatTranscript::from_messages(vec![msg(1, 9, 0, "A"), msg(1, 9, 1, "B")])
            .unwrap();
        assert!(two.ensure_two_participants().is_ok());

        let one = ChatTranscript::from_messages(vec![msg(1, 9, 0, "A")]).unwrap();
        assert!(matches!(
            one.ensure_two_participants(),
            Err(Error::ParticipantCount { .. })
        ));
    }

    #[test]
    fn test_year_month_display_and_order() {
        let jan = YearMonth::of(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        let dec = YearMonth::of(NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
        assert_eq!(jan.to_string(), "2024-01");
        assert!(dec < jan);
    }

    #[test]
    fn test_weekday_index_starts_on_sunday() {
        // 2024-01-07 was a Sunday
        let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        assert_eq!(WEEKDAY_NAMES[weekday_index(sunday)], "Sunday");
        assert_eq!(WEEKDAY_NAMES[weekday_index(sunday.succ_opt().unwrap())], "Monday");
    }
}
