//! SM-2 spaced repetition scheduler.
//!
//! Based on SuperMemo 2 with configurable parameters.

use crate::types::{Quality, ReviewState};
use chrono::{DateTime, Duration, Utc};

/// Result of scheduling one review.
#[derive(Debug, Clone)]
pub struct ScheduleOutcome {
    pub new_state: ReviewState,
    pub next_due: DateTime<Utc>,
}

/// SM-2 scheduler with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    /// Ease factor assigned before the first review.
    pub initial_ease: f64,
    /// Floor below which ease never drops. There is no ceiling: repeated
    /// perfect recalls keep growing ease, as in classic SM-2.
    pub minimum_ease: f64,
    /// Interval after the first successful recall, also the reset interval
    /// after a failed one.
    pub first_interval_days: i64,
    /// Interval after the second consecutive successful recall.
    pub second_interval_days: i64,
    /// Ceiling on the interval a review can produce. Ease has no ceiling,
    /// so uncapped intervals eventually overflow date arithmetic.
    pub maximum_interval_days: i64,
    /// How long after creation a never-reviewed item becomes due.
    pub new_item_due_days: i64,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: 2.5,
            minimum_ease: 1.3,
            first_interval_days: 1,
            second_interval_days: 6,
            maximum_interval_days: 36500,
            new_item_due_days: 1,
        }
    }
}

impl Sm2 {
    /// State of an item that has never been reviewed.
    pub fn initial_state(&self) -> ReviewState {
        ReviewState {
            ease_factor: self.initial_ease,
            interval_days: 0,
            repetition: 0,
            next_review_date: None,
        }
    }

    /// State recorded when an item is first created: untouched scheduling
    /// values, due `new_item_due_days` after creation.
    pub fn seed(&self, created_at: DateTime<Utc>) -> ScheduleOutcome {
        let next_due = created_at + Duration::days(self.new_item_due_days);
        ScheduleOutcome {
            new_state: ReviewState {
                next_review_date: Some(next_due),
                ..self.initial_state()
            },
            next_due,
        }
    }

    /// Compute the scheduling state following one review.
    ///
    /// Pure: no clock reads, no storage. Identical inputs always produce
    /// identical outputs.
    pub fn schedule(
        &self,
        state: &ReviewState,
        quality: Quality,
        now: DateTime<Utc>,
    ) -> ScheduleOutcome {
        let new_ease = self.next_ease(state.ease_factor, quality);

        let (new_repetition, new_interval) = if quality.is_successful() {
            let repetition = state.repetition + 1;
            let interval = match repetition {
                1 => self.first_interval_days,
                2 => self.second_interval_days,
                _ => (state.interval_days as f64 * new_ease).round() as i64,
            };
            (repetition, interval.min(self.maximum_interval_days))
        } else {
            // Failure resets the consecutive-success run.
            (0, self.first_interval_days)
        };

        let next_due = now + Duration::days(new_interval);

        ScheduleOutcome {
            new_state: ReviewState {
                ease_factor: new_ease,
                interval_days: new_interval,
                repetition: new_repetition,
                next_review_date: Some(next_due),
            },
            next_due,
        }
    }

    /// Ease update, applied on success and failure alike.
    fn next_ease(&self, prior: f64, quality: Quality) -> f64 {
        let q = f64::from(quality.to_value());
        let updated = prior + 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
        updated.max(self.minimum_ease)
    }
}
