//! Analytics over a parsed transcript
//!
//! Every component is a pure function of the message list, except the
//! current streak which also depends on a [`Clock`]:
//!
//! - [`aggregate`](mod@aggregate): per-dimension message tallies
//! - [`streak`]: consecutive active-day streaks
//! - [`calls`]: call mentions and durations
//! - [`score`]: the graded composite love score
//! - [`insights`]: greetings, compliments, memory moments and other habits
//!
//! [`AnalyticsEngine`] fuses the per-message reducers into a single pass.

pub mod aggregate;
pub mod calls;
pub mod clock;
pub mod engine;
pub mod insights;
pub mod score;
pub mod streak;

pub use aggregate::{
    aggregate, extract_emojis, DayCount, LoveWordStats, MessageHighlight, MessageStats, TimeOfDay,
    TimeOfDayCounts,
};
pub use calls::{detect_calls, duration_minutes, CallStats};
pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{compute_analytics, AnalyticsEngine, AnalyticsSnapshot};
pub use insights::{compute_insights, FavoriteDay, Insights, MemoryMoment, SweetestHour, WeekSplit};
pub use score::{Grade, LoveScore, ScoreFactors, ScoreInputs};
pub use streak::{compute_streak, StreakStats};
