//! World state and core simulation types
//!
//! Everything the per-frame step reads or writes lives in [`World`]. Input
//! handlers only touch the jump latch; numbers change inside `advance`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty;
use crate::consts::{DIVE_FROM, FLAP_UP_BELOW};
use crate::tuning::Tuning;

/// Live drawing surface size, owned by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Start menu, shown only before the very first run
    NotStarted,
    /// Active gameplay
    Running,
    /// Crashed; frozen until restart
    GameOver,
}

/// Wing animation frame, picked from vertical velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WingFrame {
    Up,
    Level,
    Dive,
}

/// Upper velocity bound (exclusive) for each band, checked in order
const WING_BANDS: [(f32, WingFrame); 2] = [
    (FLAP_UP_BELOW, WingFrame::Up),
    (DIVE_FROM, WingFrame::Level),
];

impl WingFrame {
    pub fn from_velocity(vel: f32) -> Self {
        WING_BANDS
            .iter()
            .find(|(below, _)| vel < *below)
            .map(|(_, frame)| *frame)
            .unwrap_or(WingFrame::Dive)
    }

    /// Sprite index used by the renderer
    pub fn index(self) -> usize {
        match self {
            WingFrame::Up => 0,
            WingFrame::Level => 1,
            WingFrame::Dive => 2,
        }
    }
}

/// The player sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (positive = down)
    pub vel: f32,
    pub gravity: f32,
    /// Velocity a jump sets (negative = up)
    pub jump_impulse: f32,
    pub frame: WingFrame,
}

impl Player {
    /// Create a player at rest for a viewport of the given height
    pub fn new(tuning: &Tuning, viewport_height: f32) -> Self {
        let size = tuning.scaled(tuning.player_size, viewport_height);
        Self {
            pos: Vec2::new(
                tuning.scaled(tuning.player_x, viewport_height),
                viewport_height * tuning.player_start_y_fraction,
            ),
            size: Vec2::splat(size),
            vel: 0.0,
            gravity: tuning.scaled(tuning.gravity, viewport_height),
            jump_impulse: tuning.scaled(tuning.jump_impulse, viewport_height),
            frame: WingFrame::Level,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// A pipe pair with a gap between `top` and `bottom`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub width: f32,
    /// Lower edge of the upper pipe
    pub top: f32,
    /// Upper edge of the lower pipe
    pub bottom: f32,
    /// Already counted toward the score
    pub scored: bool,
}

impl Obstacle {
    pub fn new(x: f32, width: f32, top: f32, bottom: f32) -> Self {
        Self {
            x,
            width,
            top,
            bottom,
            scored: false,
        }
    }

    /// Trailing edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn gap(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    Obstacle,
    Ceiling,
    Floor,
}

/// Things that happened during one step, for logging and presentation cues
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Spawned { x: f32, top: f32, bottom: f32 },
    Retired,
    Scored { score: u32 },
    Crashed { cause: CrashCause },
}

/// Complete world state for one game process
#[derive(Debug, Clone)]
pub struct World {
    pub player: Player,
    /// Oldest first, so x is decreasing along the sequence
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    /// Best score across sessions of this process
    pub best: u32,
    pub lifecycle: Lifecycle,
    /// Sessions played, counting the current one
    pub session: u32,
    /// Seed of the obstacle RNG
    pub seed: u64,
    pub(crate) tuning: Tuning,
    pub(crate) rng: Pcg32,
    /// Key is down; cleared only by release
    jump_held: bool,
    /// Press not yet applied by a step
    jump_pending: bool,
    /// A run has been started at least once; restarts skip the menu
    started_once: bool,
}

impl World {
    /// Create a fresh world waiting at the start menu
    pub fn new(tuning: Tuning, viewport_height: f32, seed: u64) -> Self {
        let mut world = Self {
            player: Player::new(&tuning, viewport_height),
            obstacles: Vec::new(),
            score: 0,
            best: 0,
            lifecycle: Lifecycle::NotStarted,
            session: 0,
            seed,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            jump_held: false,
            jump_pending: false,
            started_once: false,
        };
        world.reset(viewport_height);
        world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Reinitialize the session. The RNG keeps its stream so every session differs.
    pub fn reset(&mut self, viewport_height: f32) {
        self.player = Player::new(&self.tuning, viewport_height);
        self.obstacles.clear();
        self.score = 0;
        self.lifecycle = if self.started_once {
            Lifecycle::Running
        } else {
            Lifecycle::NotStarted
        };
        self.jump_held = false;
        self.jump_pending = false;
        self.session += 1;
    }

    /// Leave the start menu. Returns false if not at the menu.
    pub fn start_run(&mut self) -> bool {
        if self.lifecycle != Lifecycle::NotStarted {
            return false;
        }
        self.lifecycle = Lifecycle::Running;
        self.started_once = true;
        log::info!("Run started (session {})", self.session);
        true
    }

    /// Start over after a crash. Returns false unless the game is over.
    pub fn restart(&mut self, viewport_height: f32) -> bool {
        if self.lifecycle != Lifecycle::GameOver {
            return false;
        }
        self.reset(viewport_height);
        log::info!("Restarted (session {}, best {})", self.session, self.best);
        true
    }

    /// Jump key went down. Returns true if this press will make the player jump.
    pub fn request_jump(&mut self) -> bool {
        if self.lifecycle != Lifecycle::Running || self.jump_held {
            return false;
        }
        self.jump_held = true;
        self.jump_pending = true;
        true
    }

    /// Jump key went up; the next press can register again.
    /// A press released before the next step still jumps on that step.
    pub fn release_jump(&mut self) {
        self.jump_held = false;
    }

    pub fn jump_held(&self) -> bool {
        self.jump_held
    }

    pub fn jump_pending(&self) -> bool {
        self.jump_pending
    }

    /// Consume the pending press, if any
    pub(crate) fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_pending)
    }

    /// Current difficulty scalar
    pub fn difficulty(&self) -> f32 {
        difficulty::difficulty(self.score)
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    /// End the run without a crash, e.g. when a driver gives up on it
    pub fn abandon(&mut self) {
        if self.lifecycle == Lifecycle::GameOver {
            return;
        }
        self.lifecycle = Lifecycle::GameOver;
        self.best = self.best.max(self.score);
        log::info!("Run abandoned (score {}, session {})", self.score, self.session);
    }

    pub(crate) fn crash(&mut self, cause: CrashCause) {
        self.lifecycle = Lifecycle::GameOver;
        log::info!(
            "Game over: {:?} (score {}, session {})",
            cause,
            self.score,
            self.session
        );
    }
}
