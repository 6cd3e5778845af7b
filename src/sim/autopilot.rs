//! Demo-mode autopilot
//!
//! Plays the game through the same jump press/release edges a human would
//! produce. Each frame it rolls the player forward twice, once coasting and
//! once flapping now, and flaps when that postpones the first crash.

use serde::{Deserialize, Serialize};

use super::collision::{boundary_hit, hits_obstacle};
use super::difficulty::obstacle_speed;
use super::state::{Obstacle, Viewport, World};

/// Cap on look-ahead steps per rollout
const MAX_ROLLOUT_STEPS: f32 = 600.0;

/// A jump key edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpInput {
    Press,
    Release,
}

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Prediction step (seconds)
    pub step: f32,
    /// How far ahead to look (seconds)
    pub horizon: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            step: 1.0 / 60.0,
            horizon: 0.75,
        }
    }
}

impl Autopilot {
    /// Non-positive or non-finite values fall back to the defaults
    pub fn new(step: f32, horizon: f32) -> Self {
        let fallback = Self::default();
        let usable = |v: f32| v.is_finite() && v > 0.0;
        Self {
            step: if usable(step) { step } else { fallback.step },
            horizon: if usable(horizon) {
                horizon
            } else {
                fallback.horizon
            },
        }
    }

    /// Key edge to send before the next step, if any
    pub fn decide(&self, world: &World, viewport: Viewport) -> Option<JumpInput> {
        if !world.is_running() {
            return None;
        }
        // Let go first so the next press registers
        if world.jump_held() {
            return Some(JumpInput::Release);
        }
        if world.jump_pending() {
            return None;
        }

        let coast = self.first_crash(world, viewport, false)?;
        match self.first_crash(world, viewport, true) {
            None => Some(JumpInput::Press),
            Some(flap) if flap > coast => Some(JumpInput::Press),
            Some(_) => None,
        }
    }

    /// Step index of the first predicted crash within the horizon
    fn first_crash(&self, world: &World, viewport: Viewport, flap: bool) -> Option<usize> {
        let mut player = world.player.clone();
        let speed = obstacle_speed(world.tuning().base_speed(viewport.height), world.difficulty());
        let ahead: Vec<&Obstacle> = world
            .obstacles
            .iter()
            .filter(|o| o.right() >= player.left())
            .collect();

        if self.step.is_nan() || self.step <= 0.0 {
            return None;
        }
        let steps = (self.horizon / self.step).ceil().clamp(1.0, MAX_ROLLOUT_STEPS) as usize;
        for i in 0..steps {
            player.vel += player.gravity * self.step;
            player.pos.y += player.vel * self.step;
            if flap && i == 0 {
                player.vel = player.jump_impulse;
            }

            let shift = speed * self.step * (i + 1) as f32;
            let hit = ahead.iter().any(|o| {
                let moved = Obstacle {
                    x: o.x - shift,
                    ..(*o).clone()
                };
                hits_obstacle(&player, &moved)
            });
            if hit || boundary_hit(&player, viewport.height).is_some() {
                return Some(i);
            }
        }
        None
    }
}
