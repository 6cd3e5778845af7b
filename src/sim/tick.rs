//! Per-frame simulation step
//!
//! Advances the world by a wall-clock delta. The delta is used as-is: a long
//! stall can move the player or an obstacle far enough to skip a collision.

use rand::Rng;

use super::collision::{boundary_hit, first_hit};
use super::difficulty::{gap_size, obstacle_speed, spawn_threshold, top_range};
use super::state::{CrashCause, GameEvent, Lifecycle, Obstacle, Viewport, WingFrame, World};

/// Advance the world by `dt` seconds.
///
/// Does nothing unless the run is active. The viewport is passed every call
/// because the presentation layer may resize it between frames.
pub fn advance(world: &mut World, viewport: Viewport, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if world.lifecycle != Lifecycle::Running {
        return events;
    }

    // Semi-implicit Euler
    let player = &mut world.player;
    player.vel += player.gravity * dt;
    player.pos.y += player.vel * dt;
    player.frame = WingFrame::from_velocity(player.vel);

    if world.take_jump() {
        world.player.vel = world.player.jump_impulse;
        events.push(GameEvent::Jumped);
    }

    let difficulty = world.difficulty();

    let should_spawn = world
        .obstacles
        .last()
        .is_none_or(|newest| newest.x < spawn_threshold(viewport.width, difficulty));
    if should_spawn {
        let o = spawn_obstacle(world, viewport, difficulty);
        events.push(GameEvent::Spawned {
            x: o.x,
            top: o.top,
            bottom: o.bottom,
        });
    }

    let step = obstacle_speed(world.tuning.base_speed(viewport.height), difficulty) * dt;
    for o in &mut world.obstacles {
        o.x -= step;
    }
    let before = world.obstacles.len();
    world.obstacles.retain(|o| o.right() > 0.0);
    for _ in world.obstacles.len()..before {
        log::debug!("Obstacle retired");
        events.push(GameEvent::Retired);
    }

    let cause = if first_hit(&world.player, &world.obstacles).is_some() {
        Some(CrashCause::Obstacle)
    } else {
        boundary_hit(&world.player, viewport.height)
    };
    if let Some(cause) = cause {
        world.crash(cause);
        events.push(GameEvent::Crashed { cause });
    }

    // Scoring still runs on the crash frame
    let player_x = world.player.left();
    for o in &mut world.obstacles {
        if !o.scored && o.right() < player_x {
            o.scored = true;
            world.score += 1;
            events.push(GameEvent::Scored { score: world.score });
        }
    }

    if world.lifecycle == Lifecycle::GameOver {
        world.best = world.best.max(world.score);
    }

    log::trace!(
        "step dt={:.4} y={:.1} vel={:.1} obstacles={} score={}",
        dt,
        world.player.pos.y,
        world.player.vel,
        world.obstacles.len(),
        world.score
    );

    events
}

/// Push a new obstacle at the right edge of the viewport
pub fn spawn_obstacle(world: &mut World, viewport: Viewport, difficulty: f32) -> Obstacle {
    let gap = gap_size(viewport.height, difficulty);
    let (min_top, max_top) = top_range(viewport.height);
    let top = if max_top > min_top {
        let top = world.rng.random_range(min_top..max_top);
        // Rounding can land exactly on the upper bound
        if top < max_top { top } else { min_top }
    } else {
        min_top
    };

    let width = world.tuning.scaled(world.tuning.obstacle_width, viewport.height);
    let obstacle = Obstacle::new(viewport.width, width, top, top + gap);
    log::debug!(
        "Spawned obstacle gap {:.1}..{:.1} (difficulty {:.2})",
        obstacle.top,
        obstacle.bottom,
        difficulty
    );
    world.obstacles.push(obstacle.clone());
    obstacle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::{base_gap, difficulty};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    const VIEW: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };
    const DT: f32 = 1.0 / 60.0;

    fn running(seed: u64) -> World {
        let mut world = World::new(Tuning::default(), VIEW.height, seed);
        world.start_run();
        world
    }

    #[test]
    fn test_noop_before_start_and_after_crash() {
        let mut world = World::new(Tuning::default(), VIEW.height, 1);
        let before = world.player.pos;
        assert!(advance(&mut world, VIEW, DT).is_empty());
        assert_eq!(world.player.pos, before);
        assert!(world.obstacles.is_empty());

        world.start_run();
        world.player.pos.y = VIEW.height;
        advance(&mut world, VIEW, DT);
        assert_eq!(world.lifecycle, Lifecycle::GameOver);

        let frozen = world.player.pos;
        let obstacles = world.obstacles.clone();
        assert!(advance(&mut world, VIEW, 1.0).is_empty());
        assert_eq!(world.player.pos, frozen);
        assert_eq!(world.obstacles, obstacles);
    }

    #[test]
    fn test_semi_implicit_euler() {
        let mut world = running(1);
        let y0 = world.player.pos.y;
        let g = world.player.gravity;
        advance(&mut world, VIEW, 0.1);
        assert!((world.player.vel - g * 0.1).abs() < 1e-3);
        assert!((world.player.pos.y - (y0 + g * 0.1 * 0.1)).abs() < 1e-3);
    }

    #[test]
    fn test_wing_frame_follows_velocity() {
        let mut world = running(1);
        world.player.vel = -400.0;
        advance(&mut world, VIEW, DT);
        assert_eq!(world.player.frame, WingFrame::Up);
        world.player.vel = 300.0;
        advance(&mut world, VIEW, DT);
        assert_eq!(world.player.frame, WingFrame::Dive);
    }

    #[test]
    fn test_held_key_jumps_once() {
        let mut world = running(1);
        assert!(world.request_jump());
        assert!(!world.request_jump());

        let events = advance(&mut world, VIEW, DT);
        assert!(events.contains(&GameEvent::Jumped));
        assert_eq!(world.player.vel, world.player.jump_impulse);

        let events = advance(&mut world, VIEW, DT);
        assert!(!events.contains(&GameEvent::Jumped));
        assert!(world.player.vel > world.player.jump_impulse);
        assert!(world.jump_held());
    }

    #[test]
    fn test_first_spawn_uses_literal_formulas() {
        let mut world = running(42);
        let events = advance(&mut world, VIEW, 0.0);
        assert_eq!(world.obstacles.len(), 1);
        let o = &world.obstacles[0];
        assert_eq!(o.x, VIEW.width);
        assert_eq!(o.width, 60.0);
        assert!((o.gap() - 0.16 * VIEW.height).abs() < 1e-3);
        assert!(o.top >= 0.1 * VIEW.height && o.top < 0.55 * VIEW.height);
        assert!(matches!(events[0], GameEvent::Spawned { .. }));
    }

    #[test]
    fn test_spawn_threshold_at_difficulty_one() {
        let threshold = 0.55 * VIEW.width;

        let mut world = running(3);
        world.obstacles.push(Obstacle::new(threshold + 1.0, 60.0, 100.0, 196.0));
        advance(&mut world, VIEW, 0.0);
        assert_eq!(world.obstacles.len(), 1);

        let mut world = running(3);
        world.obstacles.push(Obstacle::new(threshold - 1.0, 60.0, 100.0, 196.0));
        advance(&mut world, VIEW, 0.0);
        assert_eq!(world.obstacles.len(), 2);
        assert_eq!(world.obstacles[1].x, VIEW.width);
    }

    #[test]
    fn test_obstacles_move_at_scaled_speed() {
        let mut world = running(1);
        world.player.gravity = 0.0;
        advance(&mut world, VIEW, 0.0);
        advance(&mut world, VIEW, 0.5);
        assert!((world.obstacles[0].x - (VIEW.width - 120.0)).abs() < 1e-3);

        world.score = 20;
        let x = world.obstacles[0].x;
        advance(&mut world, VIEW, 0.1);
        assert!((world.obstacles[0].x - (x - 48.0)).abs() < 1e-2);
    }

    #[test]
    fn test_speed_reads_live_viewport() {
        let mut world = running(1);
        advance(&mut world, VIEW, 0.0);
        let x = world.obstacles[0].x;
        let tall = Viewport::new(VIEW.width, VIEW.height * 2.0);
        advance(&mut world, tall, 0.1);
        assert!((world.obstacles[0].x - (x - 48.0)).abs() < 1e-3);
    }

    #[test]
    fn test_offscreen_obstacle_is_retired() {
        let mut world = running(1);
        world.obstacles.push(Obstacle::new(-60.0 - 1.0, 60.0, 100.0, 196.0));
        world.obstacles.push(Obstacle::new(700.0, 60.0, 100.0, 196.0));
        let events = advance(&mut world, VIEW, DT);
        assert!(events.contains(&GameEvent::Retired));
        assert!(world.obstacles.iter().all(|o| o.right() > 0.0));
        assert_eq!(world.obstacles.len(), 1);
    }

    #[test]
    fn test_floor_ends_run() {
        let mut world = running(1);
        world.player.pos.y = VIEW.height - world.player.size.y + 1.0;
        let events = advance(&mut world, VIEW, DT);
        assert_eq!(world.lifecycle, Lifecycle::GameOver);
        assert!(events.contains(&GameEvent::Crashed {
            cause: CrashCause::Floor
        }));
    }

    #[test]
    fn test_ceiling_ends_run() {
        let mut world = running(1);
        world.player.pos.y = 1.0;
        world.player.vel = -600.0;
        advance(&mut world, VIEW, DT);
        assert_eq!(world.lifecycle, Lifecycle::GameOver);
    }

    #[test]
    fn test_pipe_above_gap_ends_run() {
        let mut world = running(1);
        let x = world.player.pos.x;
        world.obstacles.push(Obstacle::new(x, 50.0, 300.0, 396.0));
        world.player.pos.y = 200.0;
        let events = advance(&mut world, VIEW, 0.0);
        assert_eq!(
            events.last(),
            Some(&GameEvent::Crashed {
                cause: CrashCause::Obstacle
            })
        );
        assert_eq!(world.best, 0);
    }

    #[test]
    fn test_inside_gap_survives() {
        let mut world = running(1);
        let x = world.player.pos.x;
        world.obstacles.push(Obstacle::new(x, 50.0, 200.0, 296.0));
        world.player.pos.y = 220.0;
        advance(&mut world, VIEW, 0.0);
        assert_eq!(world.lifecycle, Lifecycle::Running);
    }

    #[test]
    fn test_passed_obstacle_scores_once() {
        let mut world = running(1);
        let x = world.player.pos.x;
        world.obstacles.push(Obstacle::new(x - 61.0, 60.0, 100.0, 196.0));
        let events = advance(&mut world, VIEW, 0.0);
        assert!(events.contains(&GameEvent::Scored { score: 1 }));
        assert_eq!(world.score, 1);
        assert!(world.obstacles[0].scored);

        advance(&mut world, VIEW, 0.0);
        assert_eq!(world.score, 1);
    }

    #[test]
    fn test_best_survives_restart() {
        let mut world = running(1);
        world.score = 7;
        world.player.pos.y = VIEW.height;
        advance(&mut world, VIEW, DT);
        assert_eq!(world.best, 7);
        assert!(world.restart(VIEW.height));
        assert_eq!(world.score, 0);
        assert_eq!(world.best, 7);
    }

    #[test]
    fn test_determinism() {
        let mut a = running(99999);
        let mut b = running(99999);
        for frame in 0..120 {
            if frame % 20 == 0 {
                a.request_jump();
                b.request_jump();
            } else {
                a.release_jump();
                b.release_jump();
            }
            advance(&mut a, VIEW, DT);
            advance(&mut b, VIEW, DT);
        }
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.lifecycle, b.lifecycle);
    }

    proptest! {
        #[test]
        fn prop_spawned_gap_matches_difficulty(score in 0u32..400, seed in any::<u64>()) {
            let mut world = running(seed);
            world.score = score;
            let d = difficulty(score);
            let o = spawn_obstacle(&mut world, VIEW, d);
            let expected = base_gap(VIEW.height) / d;
            prop_assert!((o.gap() - expected).abs() <= expected * 1e-4 + 1e-4);
            prop_assert!(o.top >= 0.1 * VIEW.height);
            prop_assert!(o.top < 0.55 * VIEW.height);
            prop_assert!(o.bottom <= VIEW.height);
        }

        #[test]
        fn prop_zero_dt_changes_nothing(seed in any::<u64>(), steps in 0usize..90, jumps in proptest::collection::vec(any::<bool>(), 90)) {
            let mut world = running(seed);
            for &jump in jumps.iter().take(steps) {
                if jump { world.request_jump(); } else { world.release_jump(); }
                advance(&mut world, VIEW, DT);
            }
            let score = world.score;
            let lifecycle = world.lifecycle;
            let xs: Vec<f32> = world.obstacles.iter().map(|o| o.x).collect();

            advance(&mut world, VIEW, 0.0);

            prop_assert_eq!(world.score, score);
            prop_assert_eq!(world.lifecycle, lifecycle);
            let after: Vec<f32> = world.obstacles.iter().take(xs.len()).map(|o| o.x).collect();
            prop_assert_eq!(after, xs);
        }

        #[test]
        fn prop_score_never_decreases(seed in any::<u64>(), jumps in proptest::collection::vec(any::<bool>(), 1..400)) {
            let mut world = running(seed);
            let mut last = 0;
            for jump in jumps {
                if jump { world.request_jump(); } else { world.release_jump(); }
                let events = advance(&mut world, VIEW, DT);
                let scored = events.iter().filter(|e| matches!(e, GameEvent::Scored { .. })).count() as u32;
                prop_assert_eq!(world.score, last + scored);
                prop_assert!(world.obstacles.iter().filter(|o| !o.scored).all(|o| o.right() >= world.player.left()));
                last = world.score;
            }
        }
    }
}
