//! Frame driver shared by the native and web entry points
//!
//! Owns the world, the live viewport and the frame clock, feeds the autopilot
//! (when enabled) and forwards every frame to the simulation step.

use serde::{Deserialize, Serialize};

use crate::clock::FrameClock;
use crate::settings::Settings;
use crate::sim::{
    Autopilot, CrashCause, GameEvent, JumpInput, Lifecycle, Snapshot, Viewport, World, advance,
};

pub struct Driver {
    pub world: World,
    pub viewport: Viewport,
    clock: FrameClock,
    pilot: Autopilot,
    autopilot: bool,
    /// Events of the most recent step, for presentation cues
    last_events: Vec<GameEvent>,
}

impl Driver {
    pub fn new(settings: &Settings, viewport: Viewport, seed: u64) -> Self {
        log::info!("Game initialized with seed: {}", seed);
        Self {
            world: World::new(settings.tuning.clone(), viewport.height, seed),
            viewport,
            clock: FrameClock::new(settings.max_frame_dt),
            pilot: Autopilot::new(settings.frame_dt(), Autopilot::default().horizon),
            autopilot: settings.autopilot,
            last_events: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    pub fn set_autopilot(&mut self, on: bool) {
        if on == self.autopilot {
            return;
        }
        self.autopilot = on;
        // Never leave the key stuck down when a human takes over
        self.world.release_jump();
        log::info!("Autopilot: {}", on);
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    /// Drop the stale frame timestamp after the page was hidden, so the next
    /// frame does not replay the whole pause as one step
    pub fn resume_clock(&mut self) {
        self.clock.reset();
        log::debug!("Frame clock reset");
    }

    /// Run one display frame stamped `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let dt = self.clock.tick(now_ms);
        self.step(dt)
    }

    /// Run one frame of `dt` seconds
    pub fn step(&mut self, dt: f32) -> Vec<GameEvent> {
        if self.autopilot {
            match self.pilot.decide(&self.world, self.viewport) {
                Some(JumpInput::Press) => {
                    self.world.request_jump();
                }
                Some(JumpInput::Release) => self.world.release_jump(),
                None => {}
            }
        }

        let events = advance(&mut self.world, self.viewport, dt);
        for event in &events {
            if let GameEvent::Scored { score } = event {
                log::debug!("Score: {}", score);
            }
        }
        self.last_events.clone_from(&events);
        events
    }

    pub fn last_events(&self) -> &[GameEvent] {
        &self.last_events
    }

    /// Events of the most recent step, as JSON
    pub fn last_events_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.last_events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.world, self.viewport)
    }
}

/// Outcome of one headless session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session: u32,
    pub score: u32,
    pub frames: u64,
    /// `None` when the frame cap ended the session
    pub cause: Option<CrashCause>,
}

/// Play `settings.sessions` sessions on a simulated clock
pub fn run_headless(settings: &Settings, seed: u64) -> Vec<SessionSummary> {
    let viewport = Viewport::new(settings.viewport_width, settings.viewport_height);
    let mut driver = Driver::new(settings, viewport, seed);
    let frame_ms = 1000.0 / settings.frame_rate as f64;
    let mut now_ms = 0.0;
    let mut summaries = Vec::with_capacity(settings.sessions as usize);

    for _ in 0..settings.sessions {
        match driver.world.lifecycle {
            Lifecycle::NotStarted => {
                driver.world.start_run();
            }
            Lifecycle::GameOver => {
                driver.world.restart(viewport.height);
            }
            Lifecycle::Running => {}
        }

        let mut frames = 0;
        let mut cause = None;
        while frames < settings.max_frames_per_session {
            let events = driver.frame(now_ms);
            now_ms += frame_ms;
            frames += 1;
            if let Some(GameEvent::Crashed { cause: c }) = events
                .iter()
                .find(|e| matches!(e, GameEvent::Crashed { .. }))
            {
                cause = Some(*c);
                break;
            }
        }

        if cause.is_none() {
            log::warn!(
                "Session {} hit the frame cap ({} frames)",
                driver.world.session,
                frames
            );
            driver.world.abandon();
        }

        summaries.push(SessionSummary {
            session: driver.world.session,
            score: driver.world.score,
            frames,
            cause,
        });
    }

    summaries
}
