use wasm_bindgen::prelude::*;

/// Per-frame timings and counters, filled only while perf metrics are on
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) automaton_ms: f64,
    pub(super) raster_ms: f64,
    pub(super) spray_ms: f64,
    pub(super) particles_moved: u32,
    pub(super) particles_sprayed: u32,
    pub(super) particle_count: u32,
    pub(super) palette_len: u32,
    pub(super) grid_size: u32,
    pub(super) memory_bytes: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn automaton_ms(&self) -> f64 { self.automaton_ms }
    #[wasm_bindgen(getter)]
    pub fn raster_ms(&self) -> f64 { self.raster_ms }
    #[wasm_bindgen(getter)]
    pub fn spray_ms(&self) -> f64 { self.spray_ms }
    #[wasm_bindgen(getter)]
    pub fn particles_moved(&self) -> u32 { self.particles_moved }
    #[wasm_bindgen(getter)]
    pub fn particles_sprayed(&self) -> u32 { self.particles_sprayed }
    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.particle_count }
    #[wasm_bindgen(getter)]
    pub fn palette_len(&self) -> u32 { self.palette_len }
    #[wasm_bindgen(getter)]
    pub fn grid_size(&self) -> u32 { self.grid_size }
    #[wasm_bindgen(getter)]
    pub fn memory_bytes(&self) -> u32 { self.memory_bytes }
}
