//! Difficulty curve
//!
//! A single scalar derived from the score drives every scaled parameter:
//! narrower gaps, faster obstacles, and shorter spacing between spawns.

use crate::consts::*;

/// `1 + score * 0.05`
#[inline]
pub fn difficulty(score: u32) -> f32 {
    1.0 + score as f32 * DIFFICULTY_PER_POINT
}

/// Gap at difficulty 1
#[inline]
pub fn base_gap(viewport_height: f32) -> f32 {
    viewport_height * GAP_FRACTION
}

/// Vertical opening of a newly spawned obstacle
#[inline]
pub fn gap_size(viewport_height: f32, difficulty: f32) -> f32 {
    base_gap(viewport_height) / difficulty
}

/// The newest obstacle must be left of this x before another spawns
#[inline]
pub fn spawn_threshold(viewport_width: f32, difficulty: f32) -> f32 {
    viewport_width * (SPAWN_DISTANCE_FRACTION / difficulty)
}

/// Leftward obstacle speed
#[inline]
pub fn obstacle_speed(base_speed: f32, difficulty: f32) -> f32 {
    base_speed * difficulty
}

/// Half-open range `[min, max)` for a gap's top edge
#[inline]
pub fn top_range(viewport_height: f32) -> (f32, f32) {
    (
        viewport_height * MIN_TOP_FRACTION,
        viewport_height * MAX_TOP_FRACTION,
    )
}
