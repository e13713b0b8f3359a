//! Composite "love score"
//!
//! Six capped sub-scores summing to at most 100, graded A+ to D.

use serde::Serialize;

/// Letter grade for a love score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    D,
}

impl Grade {
    /// Grade for a raw (unrounded) score.
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            Grade::APlus
        } else if score >= 75.0 {
            Grade::A
        } else if score >= 65.0 {
            Grade::BPlus
        } else if score >= 55.0 {
            Grade::B
        } else if score >= 45.0 {
            Grade::CPlus
        } else if score >= 35.0 {
            Grade::C
        } else {
            Grade::D
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::D => "D",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Grade::APlus => "Epic Love Story! 💖✨",
            Grade::A => "True Love 💕",
            Grade::BPlus => "Sweet Romance 💗",
            Grade::B => "Growing Love 🌱💕",
            Grade::CPlus => "Good Connection 😊",
            Grade::C => "Building Romance 💫",
            Grade::D => "Early Stages 🌸",
        }
    }
}

/// The six sub-scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreFactors {
    /// Love words per message, capped at 25
    pub love_words: f64,
    /// Emoji and heart density, capped at 20
    pub emoji: f64,
    /// Messages per day, capped at 20
    pub frequency: f64,
    /// Mean response time step, 2 to 15
    pub response: f64,
    /// Longest streak, capped at 10
    pub consistency: f64,
    /// Questions and exclamations, capped at 10
    pub engagement: f64,
}

impl ScoreFactors {
    pub fn sum(&self) -> f64 {
        self.love_words
            + self.emoji
            + self.frequency
            + self.response
            + self.consistency
            + self.engagement
    }

    /// Factors as `(name, value, cap)` rows for display.
    pub fn rows(&self) -> [(&'static str, f64, f64); 6] {
        [
            ("Love words", self.love_words, 25.0),
            ("Emojis", self.emoji, 20.0),
            ("Frequency", self.frequency, 20.0),
            ("Response time", self.response, 15.0),
            ("Consistency", self.consistency, 10.0),
            ("Engagement", self.engagement, 10.0),
        ]
    }
}

/// Aggregates the score is computed from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreInputs {
    pub total_messages: usize,
    pub love_word_hits: usize,
    pub total_emojis: usize,
    pub heart_emojis: usize,
    /// `None` when the chat spans less than a day
    pub messages_per_day: Option<f64>,
    /// Per-participant mean response minutes
    pub response_minutes: Vec<f64>,
    pub longest_streak: i64,
    pub questions: usize,
    pub exclamations: usize,
}

/// The graded composite score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoveScore {
    /// `round(factors.sum())`
    pub total_score: i64,
    pub factors: ScoreFactors,
    pub grade: Grade,
    pub description: &'static str,
}

impl LoveScore {
    pub fn compute(inputs: &ScoreInputs) -> Self {
        let factors = if inputs.total_messages == 0 {
            ScoreFactors {
                response: response_score(&inputs.response_minutes),
                consistency: consistency_score(inputs.longest_streak),
                ..Default::default()
            }
        } else {
            let total = inputs.total_messages as f64;
            ScoreFactors {
                love_words: (inputs.love_word_hits as f64 / total * 1000.0).min(25.0),
                emoji: (inputs.total_emojis as f64 / total * 500.0).min(15.0)
                    + (inputs.heart_emojis as f64 / total * 1000.0).min(5.0),
                frequency: frequency_score(inputs.messages_per_day),
                response: response_score(&inputs.response_minutes),
                consistency: consistency_score(inputs.longest_streak),
                engagement: ((inputs.questions + inputs.exclamations) as f64 / total * 200.0)
                    .min(10.0),
            }
        };

        let raw = factors.sum();
        let grade = Grade::from_score(raw);
        Self {
            total_score: raw.round() as i64,
            factors,
            grade,
            description: grade.description(),
        }
    }
}

fn frequency_score(messages_per_day: Option<f64>) -> f64 {
    match messages_per_day {
        Some(per_day) => (per_day / 50.0 * 20.0).min(20.0),
        None => 20.0,
    }
}

fn response_score(response_minutes: &[f64]) -> f64 {
    if response_minutes.is_empty() {
        return 10.0;
    }
    let mean = response_minutes.iter().sum::<f64>() / response_minutes.len() as f64;
    if mean == 0.0 {
        10.0
    } else if mean <= 5.0 {
        15.0
    } else if mean <= 15.0 {
        12.0
    } else if mean <= 30.0 {
        8.0
    } else if mean <= 60.0 {
        5.0
    } else {
        2.0
    }
}

fn consistency_score(longest_streak: i64) -> f64 {
    (longest_streak as f64 / 30.0 * 10.0).min(10.0)
}
