//! Shared primitive types used across the entire game.

/// A simulated day. Day 1 is the day the startup is registered.
pub type Day = u32;

/// Whole currency units (rupees). Signed because cash may go negative.
pub type Money = i64;

/// Milliseconds since a caller-chosen origin. The scheduler never reads
/// a wall clock itself.
pub type Millis = u64;
