//! Scoring module - line-clear points, leveling, and gravity speed
//!
//! Points per clear come from [`LINE_SCORES`] scaled by `level + 1`. Every
//! ten lines advance one level, and each level takes 100ms off the gravity
//! interval down to a 100ms floor.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
};

/// Points for clearing `lines_cleared` rows with one lock at `level`.
///
/// A single lock clears at most four rows; larger counts score nothing.
pub fn calculate_score(lines_cleared: usize, level: u32) -> u32 {
    match LINE_SCORES.get(lines_cleared) {
        Some(&base) => base.saturating_mul(level.saturating_add(1)),
        None => 0,
    }
}

/// Level reached after clearing `total_lines` rows.
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Milliseconds between automatic drops at `level`.
pub fn drop_interval_ms(level: u32) -> u32 {
    BASE_DROP_MS
        .saturating_sub(level.saturating_mul(DROP_STEP_MS))
        .max(DROP_INTERVAL_MIN_MS)
}
