//! Consecutive-day streaks

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Streak statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreakStats {
    /// Run of consecutive active days ending at the last active day,
    /// or 0 once that day is more than a day in the past
    pub current: i64,
    /// Longest run of consecutive active days
    pub longest: i64,
    /// Most recent active day
    pub last_active_date: Option<NaiveDate>,
}

/// Compute streaks from per-day message counts.
///
/// A day is active when it appears in `daily_counts`. `today` is the
/// evaluation date used for the current-streak reset.
pub fn compute_streak(daily_counts: &BTreeMap<NaiveDate, usize>, today: NaiveDate) -> StreakStats {
    // BTreeMap keys are already distinct and ascending
    let dates: Vec<NaiveDate> = daily_counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(date, _)| *date)
        .collect();

    let Some(&last) = dates.last() else {
        return StreakStats::default();
    };

    let mut longest = 1i64;
    let mut run = 1i64;
    for pair in dates.windows(2) {
        if (pair[1] - pair[0]).num_days() == 1 {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 1;
        }
    }

    let mut current = 1i64;
    for pair in dates.windows(2).rev() {
        if (pair[1] - pair[0]).num_days() == 1 {
            current += 1;
        } else {
            break;
        }
    }

    if (today - last).num_days() > 1 {
        current = 0;
    }

    StreakStats {
        current,
        longest,
        last_active_date: Some(last),
    }
}
