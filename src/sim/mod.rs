//! Simulation core
//!
//! All gameplay logic lives here:
//! - Input handlers only set or clear the jump latch
//! - `advance` is the only writer of positions, score and lifecycle
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use autopilot::{Autopilot, JumpInput};
pub use collision::{boundary_hit, first_hit, hits_obstacle, overlaps_x};
pub use difficulty::difficulty;
pub use snapshot::{PlayerView, Snapshot};
pub use state::{
    CrashCause, GameEvent, Lifecycle, Obstacle, Player, Viewport, WingFrame, World,
};
pub use tick::{advance, spawn_obstacle};
