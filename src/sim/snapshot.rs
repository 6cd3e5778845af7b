//! Read-only view of the world for the renderer

use serde::{Deserialize, Serialize};

use super::state::{Lifecycle, Obstacle, Viewport, World};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity: f32,
    /// Sprite index: 0 up, 1 level, 2 diving
    pub frame: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub lifecycle: Lifecycle,
    pub score: u32,
    pub best: u32,
    /// Obstacle RNG seed, so a run can be replayed
    pub seed: u64,
    pub difficulty: f32,
    pub viewport: Viewport,
    pub player: PlayerView,
    pub obstacles: Vec<Obstacle>,
}

impl Snapshot {
    pub fn capture(world: &World, viewport: Viewport) -> Self {
        let p = &world.player;
        Self {
            lifecycle: world.lifecycle,
            score: world.score,
            best: world.best,
            seed: world.seed,
            difficulty: world.difficulty(),
            viewport,
            player: PlayerView {
                x: p.pos.x,
                y: p.pos.y,
                width: p.size.x,
                height: p.size.y,
                velocity: p.vel,
                frame: p.frame.index(),
            },
            obstacles: world.obstacles.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
