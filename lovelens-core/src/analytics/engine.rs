//! Analytics engine
//!
//! Runs every reducer over a transcript in one pass and assembles the
//! [`AnalyticsSnapshot`].
//!
//! Each message is fed once to the stats, call and insight reducers.
//! Streaks and the love score are derived from their results afterwards.

use super::aggregate::{MessageStats, StatsTally};
use super::calls::{CallStats, CallTally};
use super::clock::{Clock, SystemClock};
use super::insights::{Insights, InsightsTally};
use super::score::{LoveScore, ScoreInputs};
use super::streak::{compute_streak, StreakStats};
use crate::config::{AnalyticsConfig, Config};
use crate::error::Result;
use crate::lexicon::{Lexicon, LoveWordMatcher};
use crate::types::{ChatTranscript, DateRange, Message};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::Serialize;

/// Every metric derived from one transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSnapshot {
    pub participants: Vec<String>,
    pub total_messages: usize,
    pub total_days: i64,
    pub date_range: DateRange,
    /// Date the current streak was evaluated against
    pub evaluated_on: NaiveDate,
    /// `round(total_messages / total_days)`, `None` for chats shorter than a day
    pub messages_per_day: Option<i64>,
    pub first_message: Option<Message>,
    #[serde(flatten)]
    pub stats: MessageStats,
    pub streak: StreakStats,
    pub call_stats: CallStats,
    pub love_score: LoveScore,
    pub insights: Insights,
}

impl AnalyticsSnapshot {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Computes snapshots with a fixed lexicon, settings and clock.
pub struct AnalyticsEngine {
    settings: AnalyticsConfig,
    lexicon: Lexicon,
    matcher: LoveWordMatcher,
    clock: Box<dyn Clock>,
}

impl AnalyticsEngine {
    /// Validate `settings` and compile `lexicon`. Uses the system clock.
    pub fn new(settings: AnalyticsConfig, lexicon: Lexicon) -> Result<Self> {
        settings.validate()?;
        let lexicon = lexicon.normalized();
        let matcher = lexicon.love_word_matcher()?;
        tracing::debug!(love_words = matcher.len(), "Compiled lexicon");

        Ok(Self {
            settings,
            lexicon,
            matcher,
            clock: Box::new(SystemClock),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.analytics.clone(), config.lexicon.clone())
    }

    /// Replace the clock used for the current-streak rule.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn settings(&self) -> &AnalyticsConfig {
        &self.settings
    }

    /// Derive every metric from `transcript`.
    pub fn compute(&self, transcript: &ChatTranscript) -> AnalyticsSnapshot {
        let participants = transcript.participants();
        if participants.len() != 2 {
            tracing::warn!(
                participants = participants.len(),
                "Computing analytics for a chat that is not two-party"
            );
        }

        let mut stats = StatsTally::new(participants, &self.settings, &self.matcher);
        let mut calls = CallTally::new(participants);
        let mut insights = InsightsTally::new(&self.lexicon);

        for message in transcript.messages() {
            let lowered = message.content.to_lowercase();
            stats.observe(message, &lowered);
            calls.observe(message, &lowered);
            insights.observe(message, &lowered, self.matcher.substring_count(&lowered));
        }

        let stats = stats.finish();
        let evaluated_on = self.clock.today();
        let streak = compute_streak(&stats.messages_by_day, evaluated_on);
        let call_stats = calls.finish();
        let insights = insights.finish(&stats);

        let total_messages = transcript.total_messages();
        let total_days = transcript.total_days();
        let messages_per_day =
            (total_days > 0).then(|| (total_messages as f64 / total_days as f64).round() as i64);

        let love_score = LoveScore::compute(&ScoreInputs {
            total_messages,
            love_word_hits: stats.love_words.total_hits(),
            total_emojis: stats.total_emojis(),
            heart_emojis: stats.heart_emoji_count(&self.lexicon.heart_emojis),
            messages_per_day: messages_per_day.map(|n| n as f64),
            response_minutes: stats.average_response_time.values().copied().collect(),
            longest_streak: streak.longest,
            questions: stats.total_questions(),
            exclamations: stats.total_exclamations(),
        });

        tracing::info!(
            messages = total_messages,
            days = total_days,
            score = love_score.total_score,
            grade = love_score.grade.label(),
            "Computed analytics"
        );

        AnalyticsSnapshot {
            participants: participants.to_vec(),
            total_messages,
            total_days,
            date_range: transcript.date_range(),
            evaluated_on,
            messages_per_day,
            first_message: transcript.first_message().cloned(),
            stats,
            streak,
            call_stats,
            love_score,
            insights,
        }
    }
}

static DEFAULT_ENGINE: Lazy<AnalyticsEngine> = Lazy::new(|| {
    AnalyticsEngine::new(AnalyticsConfig::default(), Lexicon::default())
        .expect("built-in lexicon compiles")
});

/// Compute analytics with the built-in lexicon, default settings and the
/// system clock.
pub fn compute_analytics(transcript: &ChatTranscript) -> AnalyticsSnapshot {
    DEFAULT_ENGINE.compute(transcript)
}
