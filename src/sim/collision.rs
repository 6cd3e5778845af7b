//! Collision detection
//!
//! Everything is axis-aligned: the player is a box, an obstacle is a column
//! with a vertical opening. The player survives a column only while fully
//! inside its opening.

use super::state::{CrashCause, Obstacle, Player};

/// Player and obstacle share some horizontal span
#[inline]
pub fn overlaps_x(player: &Player, obstacle: &Obstacle) -> bool {
    player.left() < obstacle.right() && player.right() > obstacle.x
}

/// Player touches the upper or lower pipe of an obstacle
pub fn hits_obstacle(player: &Player, obstacle: &Obstacle) -> bool {
    let hit_top = player.top() < obstacle.top;
    let hit_bottom = player.bottom() > obstacle.bottom;
    overlaps_x(player, obstacle) && (hit_top || hit_bottom)
}

/// First obstacle the player is touching, if any
pub fn first_hit<'a>(player: &Player, obstacles: &'a [Obstacle]) -> Option<&'a Obstacle> {
    obstacles.iter().find(|o| hits_obstacle(player, o))
}

/// Player left the playfield through the top or bottom edge
pub fn boundary_hit(player: &Player, viewport_height: f32) -> Option<CrashCause> {
    if player.top() < 0.0 {
        Some(CrashCause::Ceiling)
    } else if player.bottom() > viewport_height {
        Some(CrashCause::Floor)
    } else {
        None
    }
}
