//! Core spaced-repetition library shared by the Lexora services.
//!
//! Provides:
//! - SM-2 scheduling (pure, deterministic, no I/O)
//! - Shared types (Item, ReviewState, Quality, ContentKind, Maturity)

pub mod sm2;
pub mod types;

pub use sm2::{ScheduleOutcome, Sm2};
pub use types::{ContentKind, Item, Maturity, Quality, ReviewState};
