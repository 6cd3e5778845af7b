//! wasm-bindgen surface for the browser page

use wasm_bindgen::prelude::*;

use crate::driver::Driver;
use crate::settings::Settings;
use crate::sim::Viewport;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Gap Runner starting...");
}

/// One game bound to a canvas of the given size
#[wasm_bindgen]
pub struct WebGame {
    driver: Driver,
}

#[wasm_bindgen]
impl WebGame {
    /// `settings_json` may be empty for defaults. The autopilot is off unless
    /// the JSON sets `"autopilot": true`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, settings_json: &str) -> Result<WebGame, JsValue> {
        let settings =
            Settings::for_page(settings_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        Ok(Self {
            driver: Driver::new(&settings, Viewport::new(width, height), seed),
        })
    }

    /// Canvas was resized; takes effect on the next frame
    pub fn resize(&mut self, width: f32, height: f32) {
        self.driver.resize(width, height);
    }

    pub fn jump_pressed(&mut self) -> bool {
        self.driver.world.request_jump()
    }

    pub fn jump_released(&mut self) {
        self.driver.world.release_jump();
    }

    pub fn start_run(&mut self) -> bool {
        self.driver.world.start_run()
    }

    pub fn restart(&mut self) -> bool {
        let height = self.driver.viewport.height;
        self.driver.world.restart(height)
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.driver.set_autopilot(on);
    }

    /// Page became visible again; the next frame starts from zero dt
    pub fn visibility_resumed(&mut self) {
        self.driver.resume_clock();
    }

    /// Advance to the `requestAnimationFrame` timestamp; returns the score.
    /// The step's events are then available from `events_json`.
    pub fn frame(&mut self, timestamp: f64) -> u32 {
        self.driver.frame(timestamp);
        self.driver.world.score
    }

    /// Events of the last frame (jumps, spawns, scores, crashes) as a JSON array
    pub fn events_json(&self) -> Result<String, JsValue> {
        self.driver
            .last_events_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// World state for the renderer, as JSON
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.driver
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
