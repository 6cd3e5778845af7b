//! Gap Runner - a single-screen side-scroller where you flap through gaps
//!
//! Core modules:
//! - `sim`: Simulation core (world state, per-frame step, difficulty, collisions)
//! - `tuning`: Data-driven game balance
//! - `settings`: Driver preferences (seed, frame rate, autopilot)
//! - `clock`: Frame timestamps to simulation deltas
//! - `driver`: Frame loop shared by the native and web entry points
//! - `platform`: Browser bridge (wasm32 only)

pub mod clock;
pub mod driver;
pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use clock::FrameClock;
pub use driver::{Driver, SessionSummary, run_headless};
pub use error::SettingsError;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Viewport height all tuning lengths are authored against
    pub const REFERENCE_HEIGHT: f32 = 600.0;

    /// Player defaults (reference units)
    pub const PLAYER_X: f32 = 80.0;
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Initial height as a fraction of the viewport
    pub const PLAYER_START_Y_FRACTION: f32 = 0.4;
    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = 1400.0;
    /// Velocity set by a jump (negative = up)
    pub const JUMP_IMPULSE: f32 = -420.0;

    /// Obstacle defaults (reference units)
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const OBSTACLE_SPEED: f32 = 240.0;

    /// Gap size as a fraction of viewport height (at difficulty 1)
    pub const GAP_FRACTION: f32 = 0.16;
    /// Range of the gap's top edge, as fractions of viewport height
    pub const MIN_TOP_FRACTION: f32 = 0.1;
    pub const MAX_TOP_FRACTION: f32 = 0.55;
    /// Newest obstacle must be left of this fraction of the width before the next spawns
    pub const SPAWN_DISTANCE_FRACTION: f32 = 0.55;

    /// Difficulty gained per point scored
    pub const DIFFICULTY_PER_POINT: f32 = 0.05;

    /// Animation band thresholds on vertical velocity (unscaled)
    pub const FLAP_UP_BELOW: f32 = -50.0;
    pub const DIVE_FROM: f32 = 200.0;
}

/// Scale a reference-unit length to a viewport of the given height
#[inline]
pub fn scale(value: f32, viewport_height: f32, reference_height: f32) -> f32 {
    value * (viewport_height / reference_height)
}
