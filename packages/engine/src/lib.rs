//! Sandfall Engine - falling-sand cellular automaton in WASM
//!
//! One grid of byte cells, one append-only palette, one step per animation
//! frame. The host (a canvas render loop) drives everything.
//!
//! Architecture:
//! - core/        - Grid storage and logging sink
//! - domain/      - Colors and the palette
//! - simulation/  - Step, rasterization, insertion, brush, frame driver, wasm facade

pub mod core;
pub mod domain;
pub mod simulation;

pub use crate::core::grid;
pub use domain::color;
pub use domain::palette;

use wasm_bindgen::prelude::*;

// Thread pool bootstrap for the row-parallel rasterizer
#[cfg(all(feature = "parallel", target_arch = "wasm32", target_feature = "atomics"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine: panic hook and console logger
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    crate::core::logging::init_logging(level);

    log::info!("Sandfall WASM engine v{} initialized", version());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Default pixel edge length of one grid cell
#[wasm_bindgen]
pub fn cell_size() -> u32 {
    simulation::CELL_SIZE
}

/// Map a `#RRGGBB` string to `[r, g, b]`; malformed input maps to black
#[wasm_bindgen]
pub fn color_to_rgb(hex: &str) -> Vec<u8> {
    let rgb = color::hex_to_rgb(hex);
    vec![rgb.r, rgb.g, rgb.b]
}

// Re-export main types
pub use domain::color::{hex_to_rgb, Rgb};
pub use domain::palette::Palette;
pub use simulation::facade::SandSimulation;
pub use simulation::{
    advance, initialize, insert_particle, rasterize, step, PixelBuffer, Simulation,
    SimulationSettings, SimulationState, StepParams,
};
