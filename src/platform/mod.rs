//! Platform bridges
//!
//! The browser owns the canvas, sprites, DOM and event listeners. It forwards
//! key edges and frame timestamps here and draws from the returned snapshot.

#[cfg(target_arch = "wasm32")]
pub mod web;
