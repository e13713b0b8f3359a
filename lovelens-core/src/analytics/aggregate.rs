//! Base message statistics
//!
//! [`StatsTally`] is a reducer fed each message once, in chronological
//! order. Every dimension it tracks is independent of the others, so the
//! engine can fuse it with the call and insight reducers into one pass.

use crate::config::AnalyticsConfig;
use crate::lexicon::{LoveWordCategory, LoveWordMatcher, LoveWords};
use crate::types::{weekday_index, ChatTranscript, Message, YearMonth};
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

// The explicit list comes first so variation-selector forms such as "❤️"
// are captured whole instead of as their base symbol.
static EMOJI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        "❤️|💕|💖|💗|💘|💙|💚|💛|💜|🧡|🖤|🤍|🤎|💔|❣️|💟|♥️|",
        "💯|💢|💥|💫|💦|💨|🕳️|💬|👁️‍🗨️|🗨️|🗯️|💭|💤|",
        r"[\x{1F600}-\x{1F64F}]|[\x{1F300}-\x{1F5FF}]|[\x{1F680}-\x{1F6FF}]|",
        r"[\x{1F700}-\x{1F77F}]|[\x{1F780}-\x{1F7FF}]|[\x{1F800}-\x{1F8FF}]|",
        r"[\x{2600}-\x{26FF}]|[\x{2700}-\x{27BF}]",
    ))
    .unwrap()
});

// ============================================
// Output types
// ============================================

/// Part of the day a message hour falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    /// 06:00 to 11:59
    Morning,
    /// 12:00 to 17:59
    Afternoon,
    /// 18:00 to 21:59
    Evening,
    /// 22:00 to 05:59
    Night,
}

impl TimeOfDay {
    pub fn of(hour: u32) -> Self {
        match hour {
            6..=11 => TimeOfDay::Morning,
            12..=17 => TimeOfDay::Afternoon,
            18..=21 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }
}

/// Message counts per part of the day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimeOfDayCounts {
    pub morning: usize,
    pub afternoon: usize,
    pub evening: usize,
    pub night: usize,
}

impl TimeOfDayCounts {
    fn record(&mut self, hour: u32) {
        match TimeOfDay::of(hour) {
            TimeOfDay::Morning => self.morning += 1,
            TimeOfDay::Afternoon => self.afternoon += 1,
            TimeOfDay::Evening => self.evening += 1,
            TimeOfDay::Night => self.night += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.morning + self.afternoon + self.evening + self.night
    }
}

/// A message kept for the longest/shortest listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageHighlight {
    pub sender: String,
    pub content: String,
    /// Length in characters
    pub length: usize,
    pub timestamp: NaiveDateTime,
}

impl MessageHighlight {
    fn of(message: &Message, length: usize) -> Self {
        Self {
            sender: message.sender.clone(),
            content: message.content.clone(),
            length,
            timestamp: message.timestamp,
        }
    }
}

/// A calendar day and its message count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub date: NaiveDate,
    pub messages: usize,
}

/// Love-word tallies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoveWordStats {
    /// Messages hit, per keyword
    pub counts: BTreeMap<String, usize>,
    /// Keywords hit at least once
    pub found: BTreeSet<String>,
}

impl LoveWordStats {
    pub fn total_hits(&self) -> usize {
        self.counts.values().sum()
    }

    /// Found keywords with their counts, grouped by category.
    ///
    /// Within a category, keywords are ordered by count descending.
    pub fn by_category(
        &self,
        table: &LoveWords,
    ) -> BTreeMap<LoveWordCategory, Vec<(String, usize)>> {
        let mut grouped: BTreeMap<LoveWordCategory, Vec<(String, usize)>> = BTreeMap::new();
        for word in &self.found {
            if let Some(category) = table.category_of(word) {
                let count = self.counts.get(word).copied().unwrap_or(0);
                grouped
                    .entry(category)
                    .or_default()
                    .push((word.clone(), count));
            }
        }
        for words in grouped.values_mut() {
            words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        }
        grouped
    }
}

/// Per-dimension tallies derived from one pass over the messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MessageStats {
    pub messages_by_participant: BTreeMap<String, usize>,
    pub messages_by_day: BTreeMap<NaiveDate, usize>,
    pub messages_by_month: BTreeMap<YearMonth, usize>,
    /// Indexed from Sunday, see [`crate::types::WEEKDAY_NAMES`]
    pub messages_by_weekday: [usize; 7],
    pub messages_by_hour: [usize; 24],
    pub time_of_day: TimeOfDayCounts,
    pub emoji_stats: BTreeMap<String, usize>,
    pub word_stats: BTreeMap<String, usize>,
    pub love_words: LoveWordStats,
    pub longest_messages: Vec<MessageHighlight>,
    pub shortest_messages: Vec<MessageHighlight>,
    pub longest_message_by_participant: BTreeMap<String, MessageHighlight>,
    pub question_stats: BTreeMap<String, usize>,
    pub exclamation_stats: BTreeMap<String, usize>,
    /// Mean minutes between a participant's consecutive messages; only
    /// participants with more than one message have an entry
    pub average_response_time: BTreeMap<String, f64>,
    /// Days each participant sent the first message
    pub initiator_count: BTreeMap<String, usize>,
    pub first_message_by_day: BTreeMap<NaiveDate, String>,
    pub longest_conversation: Option<DayCount>,
}

impl MessageStats {
    pub fn total_emojis(&self) -> usize {
        self.emoji_stats.values().sum()
    }

    /// Occurrences of the given heart glyphs.
    pub fn heart_emoji_count(&self, hearts: &[String]) -> usize {
        hearts
            .iter()
            .filter_map(|heart| self.emoji_stats.get(heart))
            .sum()
    }

    pub fn total_questions(&self) -> usize {
        self.question_stats.values().sum()
    }

    pub fn total_exclamations(&self) -> usize {
        self.exclamation_stats.values().sum()
    }

    /// Most used emojis, count descending.
    pub fn top_emojis(&self, n: usize) -> Vec<(&str, usize)> {
        top_n(self.emoji_stats.iter(), n)
    }

    /// Most frequent love words, count descending.
    pub fn top_love_words(&self, n: usize) -> Vec<(&str, usize)> {
        top_n(self.love_words.counts.iter().filter(|(_, c)| **c > 0), n)
    }

    /// Most frequent words longer than three letters, excluding `stop_words`.
    pub fn top_words(&self, n: usize, stop_words: &[String]) -> Vec<(&str, usize)> {
        top_n(
            self.word_stats
                .iter()
                .filter(|(w, _)| w.len() > 3 && !stop_words.iter().any(|s| s == *w)),
            n,
        )
    }

    /// Weekday with the most messages, earliest in the week on ties.
    pub fn busiest_weekday(&self) -> Option<(usize, usize)> {
        busiest(self.messages_by_weekday.iter().copied().enumerate())
    }

    /// Hour with the most messages, earliest on ties.
    pub fn busiest_hour(&self) -> Option<(usize, usize)> {
        busiest(self.messages_by_hour.iter().copied().enumerate())
    }
}

fn top_n<'a>(
    entries: impl Iterator<Item = (&'a String, &'a usize)>,
    n: usize,
) -> Vec<(&'a str, usize)> {
    let mut ranked: Vec<(&str, usize)> = entries.map(|(k, v)| (k.as_str(), *v)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(n);
    ranked
}

/// First strictly-greatest non-zero entry.
pub(crate) fn busiest<K>(entries: impl Iterator<Item = (K, usize)>) -> Option<(K, usize)> {
    let mut best: Option<(K, usize)> = None;
    for (key, count) in entries {
        let current = best.as_ref().map_or(0, |(_, c)| *c);
        if count > current {
            best = Some((key, count));
        }
    }
    best
}

// ============================================
// Reducer
// ============================================

/// Single-pass accumulator behind [`MessageStats`].
pub(crate) struct StatsTally<'a> {
    settings: &'a AnalyticsConfig,
    matcher: &'a LoveWordMatcher,
    stats: MessageStats,
    long_pool: Vec<MessageHighlight>,
    short_pool: Vec<MessageHighlight>,
    previous_by_sender: HashMap<String, NaiveDateTime>,
    response_deltas: BTreeMap<String, Vec<i64>>,
    current_day: Option<NaiveDate>,
}

impl<'a> StatsTally<'a> {
    pub fn new(
        participants: &[String],
        settings: &'a AnalyticsConfig,
        matcher: &'a LoveWordMatcher,
    ) -> Self {
        let mut stats = MessageStats::default();
        for participant in participants {
            stats.messages_by_participant.insert(participant.clone(), 0);
            stats.question_stats.insert(participant.clone(), 0);
            stats.exclamation_stats.insert(participant.clone(), 0);
            stats.initiator_count.insert(participant.clone(), 0);
        }
        Self {
            settings,
            matcher,
            stats,
            long_pool: Vec::new(),
            short_pool: Vec::new(),
            previous_by_sender: HashMap::new(),
            response_deltas: BTreeMap::new(),
            current_day: None,
        }
    }

    /// Fold one message in. Messages must arrive in timestamp order;
    /// `lowered` is the content in lowercase.
    pub fn observe(&mut self, message: &Message, lowered: &str) {
        let stats = &mut self.stats;
        let sender = &message.sender;
        let date = message.date();
        let hour = message.timestamp.hour();

        *stats.messages_by_participant.entry(sender.clone()).or_insert(0) += 1;
        *stats.messages_by_day.entry(date).or_insert(0) += 1;
        *stats.messages_by_month.entry(YearMonth::of(date)).or_insert(0) += 1;
        stats.messages_by_weekday[weekday_index(date)] += 1;
        stats.messages_by_hour[hour as usize] += 1;
        stats.time_of_day.record(hour);

        self.observe_length(message);

        if message.content.contains('?') {
            *self.stats.question_stats.entry(sender.clone()).or_insert(0) += 1;
        }
        if message.content.contains('!') {
            *self.stats.exclamation_stats.entry(sender.clone()).or_insert(0) += 1;
        }

        for emoji in EMOJI_RE.find_iter(&message.content) {
            *self
                .stats
                .emoji_stats
                .entry(emoji.as_str().to_string())
                .or_insert(0) += 1;
        }

        for token in lowered.split_whitespace() {
            let word: String = token
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect();
            if word.len() > 2 {
                *self.stats.word_stats.entry(word).or_insert(0) += 1;
            }
        }

        for keyword in self.matcher.hits(lowered) {
            let love = &mut self.stats.love_words;
            *love.counts.entry(keyword.to_string()).or_insert(0) += 1;
            love.found.insert(keyword.to_string());
        }

        self.observe_response(message);

        if self.current_day != Some(date) {
            self.current_day = Some(date);
            *self.stats.initiator_count.entry(sender.clone()).or_insert(0) += 1;
            self.stats.first_message_by_day.insert(date, sender.clone());
        }
    }

    fn observe_length(&mut self, message: &Message) {
        if message.is_media {
            return;
        }
        let length = message.char_len();
        if length <= self.settings.min_highlight_length {
            return;
        }

        let highlight = MessageHighlight::of(message, length);
        let longer = self
            .stats
            .longest_message_by_participant
            .get(&message.sender)
            .map_or(true, |best| length > best.length);
        if longer {
            self.stats
                .longest_message_by_participant
                .insert(message.sender.clone(), highlight.clone());
        }
        if length < self.settings.short_message_limit {
            self.short_pool.push(highlight.clone());
        }
        self.long_pool.push(highlight);
    }

    fn observe_response(&mut self, message: &Message) {
        let previous = self
            .previous_by_sender
            .insert(message.sender.clone(), message.timestamp);
        let Some(previous) = previous else {
            return;
        };

        let deltas = self
            .response_deltas
            .entry(message.sender.clone())
            .or_default();
        let minutes = (message.timestamp - previous).num_minutes();
        if minutes > 0 && minutes < self.settings.max_response_gap_minutes {
            deltas.push(minutes);
        }
    }

    pub fn finish(self) -> MessageStats {
        let mut stats = self.stats;
        let top = self.settings.top_messages;

        let mut long_pool = self.long_pool;
        long_pool.sort_by(|a, b| b.length.cmp(&a.length));
        long_pool.truncate(top);
        stats.longest_messages = long_pool;

        let mut short_pool = self.short_pool;
        short_pool.sort_by_key(|m| m.length);
        short_pool.truncate(top);
        stats.shortest_messages = short_pool;

        // An entry exists once a sender has a second message
        for (sender, deltas) in self.response_deltas {
            let average = if deltas.is_empty() {
                0.0
            } else {
                deltas.iter().sum::<i64>() as f64 / deltas.len() as f64
            };
            stats.average_response_time.insert(sender, average);
        }

        stats.longest_conversation = busiest(stats.messages_by_day.iter().map(|(d, c)| (*d, *c)))
            .map(|(date, messages)| DayCount { date, messages });

        stats
    }
}

/// Compute base statistics for a transcript.
pub fn aggregate(
    transcript: &ChatTranscript,
    settings: &AnalyticsConfig,
    matcher: &LoveWordMatcher,
) -> MessageStats {
    let mut tally = StatsTally::new(transcript.participants(), settings, matcher);
    for message in transcript.messages() {
        tally.observe(message, &message.content.to_lowercase());
    }
    tally.finish()
}

/// Emoji glyphs in `text`, in order of appearance.
pub fn extract_emojis(text: &str) -> impl Iterator<Item = &str> {
    EMOJI_RE.find_iter(text).map(|m| m.as_str())
}
