//! Data-driven game balance
//!
//! Every length and speed is authored against a reference viewport height and
//! scaled to the live viewport, so the game plays the same on any screen.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::scale;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Height the values below are authored for
    pub reference_height: f32,
    /// Player's fixed horizontal position
    pub player_x: f32,
    /// Player's square size
    pub player_size: f32,
    /// Spawn height as a fraction of the viewport
    pub player_start_y_fraction: f32,
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    /// Velocity set by a jump, must be negative (up)
    pub jump_impulse: f32,
    pub obstacle_width: f32,
    /// Approach speed at difficulty 1 (units/s)
    pub obstacle_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            reference_height: REFERENCE_HEIGHT,
            player_x: PLAYER_X,
            player_size: PLAYER_SIZE,
            player_start_y_fraction: PLAYER_START_Y_FRACTION,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_speed: OBSTACLE_SPEED,
        }
    }
}

impl Tuning {
    /// Scale a reference-unit value to the given viewport height
    #[inline]
    pub fn scaled(&self, value: f32, viewport_height: f32) -> f32 {
        scale(value, viewport_height, self.reference_height)
    }

    /// Obstacle approach speed at difficulty 1 for this viewport
    pub fn base_speed(&self, viewport_height: f32) -> f32 {
        self.scaled(self.obstacle_speed, viewport_height)
    }

    /// Check that the values describe a playable game
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("reference_height", self.reference_height),
            ("player_x", self.player_x),
            ("player_size", self.player_size),
            ("gravity", self.gravity),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_speed", self.obstacle_speed),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::invalid(
                    field,
                    format!("must be a positive number, got {value}"),
                ));
            }
        }

        if !self.jump_impulse.is_finite() || self.jump_impulse >= 0.0 {
            return Err(SettingsError::invalid(
                "jump_impulse",
                format!("must be negative (upward), got {}", self.jump_impulse),
            ));
        }

        let fraction = self.player_start_y_fraction;
        if !(fraction > 0.0 && fraction < 1.0) {
            return Err(SettingsError::invalid(
                "player_start_y_fraction",
                format!("must lie strictly between 0 and 1, got {fraction}"),
            ));
        }

        Ok(())
    }
}
