//! Relationship insights
//!
//! A second heuristic scan looking for habits rather than volume: greetings,
//! compliments, support, shared laughter, special occasions and "memory
//! moments". All phrase matching is plain substring search on lowercased
//! content, except happy emojis which are searched in the raw text.

use super::aggregate::{busiest, DayCount, MessageStats};
use crate::lexicon::{contains_any, Lexicon, LoveWordMatcher, MemoryKind};
use crate::types::{weekday_index, Message, WEEKDAY_NAMES};
use chrono::Timelike;
use serde::Serialize;
use std::collections::BTreeMap;

/// Characters kept from a memory-moment example.
const EXAMPLE_CHARS: usize = 100;

/// Hour of day with the most love-word mentions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweetestHour {
    pub hour: u32,
    pub love_words: usize,
}

/// Weekday with the most messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FavoriteDay {
    pub day: &'static str,
    pub messages: usize,
}

/// Messages sent on Saturdays and Sundays versus the rest of the week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WeekSplit {
    pub weekend: usize,
    pub weekday: usize,
}

/// Messages matching one memory-moment kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryMoment {
    pub kind: MemoryKind,
    pub label: &'static str,
    /// 1 once an example has been captured, 0 otherwise
    pub count: usize,
    /// Every message matching the kind
    pub messages: usize,
    /// First matching message, truncated
    pub example: Option<String>,
}

/// The insights bundle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    /// `{0, 0}` when no love word was used
    pub sweetest_hour: SweetestHour,
    pub longest_chat_session: Option<DayCount>,
    pub favorite_day: Option<FavoriteDay>,
    pub good_morning_count: usize,
    pub good_night_count: usize,
    pub laughing_together: usize,
    /// Messages containing each compliment word
    pub compliments_given: BTreeMap<String, usize>,
    pub supportive_messages: usize,
    pub encouragement_count: usize,
    pub anniversary_messages: usize,
    pub birthday_wishes: usize,
    pub weekend_vs_weekday: WeekSplit,
    pub thoughtfulness_score: i64,
    pub happy_emojis: usize,
    /// Every kind, in [`MemoryKind::ALL`] order
    pub memory_moments: Vec<MemoryMoment>,
}

impl Insights {
    pub fn total_compliments(&self) -> usize {
        self.compliments_given.values().sum()
    }

    /// Memory moments that matched at least one message.
    pub fn active_memory_moments(&self) -> impl Iterator<Item = &MemoryMoment> {
        self.memory_moments.iter().filter(|m| m.count > 0)
    }
}

/// Single-pass accumulator behind [`Insights`].
pub(crate) struct InsightsTally<'a> {
    lexicon: &'a Lexicon,
    total_messages: usize,
    good_morning: usize,
    good_night: usize,
    laughing: usize,
    compliments: BTreeMap<String, usize>,
    supportive: usize,
    encouragement: usize,
    anniversary: usize,
    birthday: usize,
    happy_emojis: usize,
    week_split: WeekSplit,
    love_words_by_hour: [usize; 24],
    memory: Vec<MemoryMoment>,
}

impl<'a> InsightsTally<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self {
            lexicon,
            total_messages: 0,
            good_morning: 0,
            good_night: 0,
            laughing: 0,
            compliments: lexicon
                .compliments
                .iter()
                .map(|word| (word.clone(), 0))
                .collect(),
            supportive: 0,
            encouragement: 0,
            anniversary: 0,
            birthday: 0,
            happy_emojis: 0,
            week_split: WeekSplit::default(),
            love_words_by_hour: [0; 24],
            memory: MemoryKind::ALL
                .iter()
                .map(|kind| MemoryMoment {
                    kind: *kind,
                    label: kind.label(),
                    count: 0,
                    messages: 0,
                    example: None,
                })
                .collect(),
        }
    }

    /// Fold one message in. `lowered` is the content in lowercase and
    /// `love_word_mentions` the number of love words it contains as
    /// substrings.
    pub fn observe(&mut self, message: &Message, lowered: &str, love_word_mentions: usize) {
        let lexicon = self.lexicon;
        self.total_messages += 1;

        // Sunday is 0, Saturday 6
        match weekday_index(message.date()) {
            0 | 6 => self.week_split.weekend += 1,
            _ => self.week_split.weekday += 1,
        }

        if contains_any(lowered, &lexicon.morning_greetings) {
            self.good_morning += 1;
        }
        if contains_any(lowered, &lexicon.night_greetings) {
            self.good_night += 1;
        }

        for (word, count) in self.compliments.iter_mut() {
            if lowered.contains(word.as_str()) {
                *count += 1;
            }
        }

        if contains_any(lowered, &lexicon.support_phrases) {
            self.supportive += 1;
        }
        if contains_any(lowered, &lexicon.encouragement_phrases) {
            self.encouragement += 1;
        }

        self.happy_emojis += lexicon
            .happy_emojis
            .iter()
            .filter(|emoji| message.content.contains(emoji.as_str()))
            .count();

        if contains_any(lowered, &lexicon.laugh_markers) {
            self.laughing += 1;
        }
        if contains_any(lowered, &lexicon.anniversary_words) {
            self.anniversary += 1;
        }
        if contains_any(lowered, &lexicon.birthday_words) {
            self.birthday += 1;
        }

        for moment in self.memory.iter_mut() {
            if contains_any(lowered, lexicon.memory_moments.kind(moment.kind)) {
                moment.messages += 1;
                if moment.example.is_none() {
                    moment.count += 1;
                    moment.example = Some(message.content.chars().take(EXAMPLE_CHARS).collect());
                }
            }
        }

        self.love_words_by_hour[message.timestamp.hour() as usize] += love_word_mentions;
    }

    /// Finish with the base statistics of the same messages.
    pub fn finish(self, stats: &MessageStats) -> Insights {
        let sweetest_hour = busiest(self.love_words_by_hour.iter().copied().enumerate())
            .map(|(hour, love_words)| SweetestHour {
                hour: hour as u32,
                love_words,
            })
            .unwrap_or_default();

        let favorite_day = busiest(stats.messages_by_weekday.iter().copied().enumerate())
            .map(|(index, messages)| FavoriteDay {
                day: WEEKDAY_NAMES[index],
                messages,
            });

        let total_compliments: usize = self.compliments.values().sum();
        let thoughtfulness_score = if self.total_messages == 0 {
            0
        } else {
            let points = (self.good_morning + self.good_night) * 2
                + self.supportive * 3
                + total_compliments * 2
                + self.encouragement * 3;
            (points as f64 / self.total_messages as f64 * 100.0).round() as i64
        };

        Insights {
            sweetest_hour,
            longest_chat_session: stats.longest_conversation,
            favorite_day,
            good_morning_count: self.good_morning,
            good_night_count: self.good_night,
            laughing_together: self.laughing,
            compliments_given: self.compliments,
            supportive_messages: self.supportive,
            encouragement_count: self.encouragement,
            anniversary_messages: self.anniversary,
            birthday_wishes: self.birthday,
            weekend_vs_weekday: self.week_split,
            thoughtfulness_score,
            happy_emojis: self.happy_emojis,
            memory_moments: self.memory,
        }
    }
}

/// Compute insights for `messages`, given their base statistics.
pub fn compute_insights(
    messages: &[Message],
    stats: &MessageStats,
    lexicon: &Lexicon,
    matcher: &LoveWordMatcher,
) -> Insights {
    let mut tally = InsightsTally::new(lexicon);
    for message in messages {
        let lowered = message.content.to_lowercase();
        let mentions = matcher.substring_count(&lowered);
        tally.observe(message, &lowered, mentions);
    }
    tally.finish(stats)
}
