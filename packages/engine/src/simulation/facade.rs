use wasm_bindgen::prelude::*;

use super::perf_stats::PerfStats;
use super::{EmptyCellMode, Simulation, SimulationSettings};

/// JS handle to the frame driver.
///
/// Typical render loop:
/// `sim.frame(dt)` then build an `ImageData` over
/// `memory.buffer[pixels_ptr .. pixels_ptr + pixels_len]` sized
/// `image_width x image_height` and `putImageData` it.
#[wasm_bindgen]
pub struct SandSimulation {
    core: Simulation,
}

#[wasm_bindgen]
impl SandSimulation {
    /// Simulation covering a canvas of `canvas_width x canvas_height` pixels
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            core: Simulation::new(canvas_width, canvas_height),
        }
    }

    #[wasm_bindgen(js_name = withSettings)]
    pub fn with_settings(canvas_width: u32, canvas_height: u32, json: String) -> Result<SandSimulation, JsValue> {
        let settings = SimulationSettings::from_json(&json).map_err(|e| JsValue::from_str(&e))?;
        Ok(Self {
            core: Simulation::with_settings(canvas_width, canvas_height, settings),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn frame_count(&self) -> u64 { self.core.frame_count() }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.core.particle_count() as u32 }

    /// Advance one animation frame; `delta_ms` is the time since the last one
    pub fn frame(&mut self, delta_ms: f64) {
        self.core.frame(delta_ms);
    }

    // === INPUT ===

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.core.pointer_down(x, y);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.core.pointer_move(x, y);
    }

    pub fn pointer_up(&mut self) {
        self.core.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.core.pointer_leave();
    }

    /// Stamp a single particle of the brush color; false when off-grid
    pub fn add_particle(&mut self, x: f32, y: f32) -> bool {
        self.core.add_particle(x, y)
    }

    /// Remove all particles (palette is kept)
    pub fn clear(&mut self) {
        self.core.clear();
    }

    /// Re-allocate the grid for a new canvas size
    pub fn resize(&mut self, canvas_width: u32, canvas_height: u32) {
        self.core.resize(canvas_width, canvas_height);
    }

    // === SETTINGS ===

    pub fn set_gravity(&mut self, gravity: f32) {
        self.core.set_gravity(gravity);
    }

    pub fn set_fall_speed(&mut self, fall_speed: f32) {
        self.core.set_fall_speed(fall_speed);
    }

    pub fn set_brush_size(&mut self, size: u32) {
        self.core.set_brush_size(size);
    }

    pub fn set_sand_color(&mut self, hex: String) {
        self.core.set_sand_color(&hex);
    }

    /// `true` zeroes empty pixels, `false` only clears their alpha
    pub fn set_clear_empty_cells(&mut self, clear: bool) {
        let mode = if clear { EmptyCellMode::Clear } else { EmptyCellMode::Transparent };
        self.core.set_empty_cell_mode(mode);
    }

    pub fn load_settings(&mut self, json: String) -> Result<(), JsValue> {
        self.core
            .load_settings_json(&json)
            .map_err(|e| JsValue::from_str(&e))?;
        Ok(())
    }

    pub fn settings_json(&self) -> String {
        self.core.settings().to_json()
    }

    pub fn palette_json(&self) -> String {
        self.core.palette_json()
    }

    // === PIXELS ===

    /// Pointer to the RGBA8 image of the last frame
    pub fn pixels_ptr(&self) -> *const u8 {
        self.core.pixels().as_ptr()
    }

    /// Byte length of the image
    pub fn pixels_len(&self) -> usize {
        self.core.pixels().data().len()
    }

    #[wasm_bindgen(getter)]
    pub fn image_width(&self) -> u32 { self.core.pixels().width() }

    #[wasm_bindgen(getter)]
    pub fn image_height(&self) -> u32 { self.core.pixels().height() }

    /// Copy of the image, for hosts that cannot view wasm memory
    pub fn pixels_copy(&self) -> Vec<u8> {
        self.core.pixels().data().to_vec()
    }

    // === PERF ===

    /// Enable or disable per-frame perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Last frame perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.perf_stats()
    }
}
