//! Simulation - state hand-off, automaton step, rasterization, brush
//!
//! The pure pieces (`initialize`, `step`, `advance`, `insert_particle`,
//! `rasterize`) take a `SimulationState` by value and return a new one.
//! `Simulation` is the frame driver that owns the state between frames
//! and runs the same order the canvas render loop expects:
//! step -> rasterize -> spray.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::core::grid::{Cell, Grid};
use crate::domain::palette::Palette;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/settings.rs"]
mod settings;
#[path = "init/init.rs"]
mod init;
#[path = "step/step.rs"]
mod automaton;
#[path = "render/rasterize.rs"]
mod render;
#[path = "commands/commands.rs"]
mod commands;
#[path = "brush/brush.rs"]
mod brush;
pub mod facade;

pub use automaton::{advance, step, StepParams, StepReport};
pub use brush::{particles_for_frame, spray, PointerEvent, PointerState, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};
pub use commands::insert_particle;
pub use init::{initialize, initialize_with_cell_size};
pub use perf_stats::PerfStats;
pub use render::{rasterize, rasterize_into, EmptyCellMode, PixelBuffer};
pub use settings::SimulationSettings;

use perf_timer::PerfTimer;

/// Default pixel edge length of one grid cell
pub const CELL_SIZE: u32 = 1;

/// Grid + palette + the cell size both insertion and rasterization use
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationState {
    grid: Grid,
    palette: Palette,
    cell_size: u32,
}

impl SimulationState {
    /// Assemble a state from parts.
    ///
    /// Panics on a zero cell size or when a cell references past the end of
    /// the palette.
    pub fn from_parts(grid: Grid, palette: Palette, cell_size: u32) -> Self {
        assert!(cell_size > 0, "cell size must be at least 1");
        assert!(grid.is_consistent(), "grid length does not match its dimensions");
        let max = grid.max_cell();
        assert!(
            palette.covers(max),
            "grid references palette entry {} but palette holds {}",
            max as usize,
            palette.len()
        );
        Self { grid, palette, cell_size }
    }

    /// Build from a raw row-major buffer; panics when `cells.len() != width * height`
    pub fn from_cells(width: u32, height: u32, cells: Vec<Cell>, palette: Palette) -> Self {
        Self::from_parts(Grid::from_cells(width, height, cells), palette, CELL_SIZE)
    }

    pub fn grid(&self) -> &Grid { &self.grid }

    pub fn palette(&self) -> &Palette { &self.palette }

    /// Append-only access for the caller's find-or-append
    pub fn palette_mut(&mut self) -> &mut Palette { &mut self.palette }

    pub fn width(&self) -> u32 { self.grid.width() }

    pub fn height(&self) -> u32 { self.grid.height() }

    pub fn cell_size(&self) -> u32 { self.cell_size }

    pub fn particle_count(&self) -> usize { self.grid.count_occupied() }

    /// Rasterized image dimensions in pixels
    pub fn image_size(&self) -> (u32, u32) {
        (self.width() * self.cell_size, self.height() * self.cell_size)
    }

    /// Cell value at (x, y); panics when out of bounds
    pub fn cell(&self, x: u32, y: u32) -> Cell { self.grid.get(x, y) }

    pub fn into_parts(self) -> (Grid, Palette, u32) {
        (self.grid, self.palette, self.cell_size)
    }

    pub(crate) fn with_grid(self, grid: Grid) -> Self {
        Self { grid, ..self }
    }

    pub(crate) fn grid_mut(&mut self) -> &mut Grid { &mut self.grid }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            grid: Grid::default(),
            palette: Palette::default(),
            cell_size: CELL_SIZE,
        }
    }
}

/// Frame driver: owns the state, the pixel buffer, pointer input and settings
pub struct Simulation {
    state: SimulationState,
    settings: SimulationSettings,
    pointer: PointerState,
    pixels: PixelBuffer,
    rng: SmallRng,

    // Canvas the grid was sized for; `floor(canvas / cell_size)` cells
    canvas_width: u32,
    canvas_height: u32,

    frame: u64,

    // Colors the palette refused, so the warning is logged once each
    refused_colors: Vec<String>,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl Simulation {
    /// Simulation covering a canvas of the given pixel size, default settings
    pub fn new(canvas_width: u32, canvas_height: u32) -> Self {
        Self::with_settings(canvas_width, canvas_height, SimulationSettings::default())
    }

    pub fn with_settings(canvas_width: u32, canvas_height: u32, settings: SimulationSettings) -> Self {
        let state = init::state_for_canvas(canvas_width, canvas_height, &settings);
        let (w, h) = state.image_size();
        log::info!(
            "simulation ready: {}x{} cells, cell size {}",
            state.width(),
            state.height(),
            state.cell_size()
        );
        Self {
            rng: SmallRng::seed_from_u64(settings.seed),
            pixels: PixelBuffer::new(w, h),
            state,
            settings,
            pointer: PointerState::default(),
            canvas_width,
            canvas_height,
            frame: 0,
            refused_colors: Vec::new(),
            perf_enabled: false,
            perf_stats: PerfStats::default(),
        }
    }

    pub fn width(&self) -> u32 { self.state.width() }

    pub fn height(&self) -> u32 { self.state.height() }

    pub fn frame_count(&self) -> u64 { self.frame }

    pub fn particle_count(&self) -> usize { self.state.particle_count() }

    pub fn state(&self) -> &SimulationState { &self.state }

    pub fn settings(&self) -> &SimulationSettings { &self.settings }

    pub fn pointer(&self) -> PointerState { self.pointer }

    /// Last rasterized frame
    pub fn pixels(&self) -> &PixelBuffer { &self.pixels }

    pub fn palette_json(&self) -> String { self.state.palette().to_json() }

    /// Advance one animation frame; `delta_ms` only drives the spray rate
    pub fn frame(&mut self, delta_ms: f64) {
        let perf_on = self.perf_enabled;
        let timer = || if perf_on { Some(PerfTimer::start()) } else { None };
        let elapsed = |t: Option<PerfTimer>| t.map_or(0.0, |t| t.elapsed_ms());

        let frame_start = timer();
        let params = self.step_params();
        let state = std::mem::take(&mut self.state);

        let t0 = timer();
        let (state, report) = advance(state, params, &mut self.rng);
        let automaton_ms = elapsed(t0);

        let t0 = timer();
        rasterize_into(&state, self.settings.empty_cells, &mut self.pixels);
        let raster_ms = elapsed(t0);

        let t0 = timer();
        let (state, sprayed) = self.spray_if_pressed(state, delta_ms);
        let spray_ms = elapsed(t0);

        self.state = state;
        self.frame += 1;

        if perf_on {
            let stats = &mut self.perf_stats;
            stats.reset();
            stats.automaton_ms = automaton_ms;
            stats.raster_ms = raster_ms;
            stats.spray_ms = spray_ms;
            stats.particles_moved = report.moved;
            stats.particles_sprayed = sprayed;
            stats.particle_count = self.state.particle_count() as u32;
            stats.palette_len = self.state.palette().len() as u32;
            stats.grid_size = self.state.grid().size() as u32;
            // grid bytes + pixel bytes
            stats.memory_bytes = (self.state.grid().size() + self.pixels.data().len()) as u32;
            stats.step_ms = elapsed(frame_start);
        }
    }

    fn step_params(&self) -> StepParams {
        StepParams::new(self.settings.gravity, self.settings.fall_speed)
    }

    fn spray_if_pressed(&mut self, mut state: SimulationState, delta_ms: f64) -> (SimulationState, u32) {
        let Some((x, y)) = self.pointer.pressed_at() else {
            return (state, 0);
        };
        let count = particles_for_frame(self.settings.brush_size, delta_ms);
        if count == 0 {
            return (state, 0);
        }

        let Some(color_index) = state.palette_mut().find_or_append(&self.settings.sand_color) else {
            if !self.refused_colors.contains(&self.settings.sand_color) {
                log::warn!(
                    "palette is full ({} colors); not spraying {}",
                    state.palette().len(),
                    self.settings.sand_color
                );
                self.refused_colors.push(self.settings.sand_color.clone());
            }
            return (state, 0);
        };

        let state = spray(state, x, y, self.settings.brush_size, count, color_index, &mut self.rng);
        (state, count)
    }

    // === Input ===

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.pointer.apply(event);
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.handle_pointer(PointerEvent::Down { x, y });
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.handle_pointer(PointerEvent::Move { x, y });
    }

    pub fn pointer_up(&mut self) {
        self.handle_pointer(PointerEvent::Up);
    }

    pub fn pointer_leave(&mut self) {
        self.handle_pointer(PointerEvent::Leave);
    }

    /// Stamp one particle of the current brush color at a canvas position
    pub fn add_particle(&mut self, x: f32, y: f32) -> bool {
        let Some(index) = self.state.palette_mut().find_or_append(&self.settings.sand_color) else {
            return false;
        };
        let before = self.state.cell_at_canvas(x, y);
        let state = std::mem::take(&mut self.state);
        self.state = insert_particle(state, x, y, index);
        before.is_some()
    }

    // === Settings ===

    pub fn set_gravity(&mut self, gravity: f32) {
        settings::set_gravity(&mut self.settings, gravity);
    }

    pub fn set_fall_speed(&mut self, fall_speed: f32) {
        settings::set_fall_speed(&mut self.settings, fall_speed);
    }

    pub fn set_brush_size(&mut self, size: u32) {
        settings::set_brush_size(&mut self.settings, size);
    }

    pub fn set_sand_color(&mut self, hex: &str) {
        log::debug!("brush color {}", hex);
        self.settings.sand_color = hex.to_string();
    }

    pub fn set_empty_cell_mode(&mut self, mode: EmptyCellMode) {
        self.settings.empty_cells = mode;
    }

    /// Apply a settings JSON document over the current settings; omitted
    /// fields are left as they are. Cell size changes re-initialize the grid
    /// and a new seed reseeds the random source.
    pub fn load_settings_json(&mut self, json: &str) -> Result<(), String> {
        let next = self.settings.merge_json(json)?;
        let reinit = next.cell_size != self.settings.cell_size;
        if next.seed != self.settings.seed {
            self.rng = SmallRng::seed_from_u64(next.seed);
        }
        self.settings = next;
        if reinit {
            self.resize(self.canvas_width, self.canvas_height);
        }
        log::info!("settings loaded: {}", self.settings.to_json());
        Ok(())
    }

    /// Re-initialize the grid for a new canvas size; the palette survives
    pub fn resize(&mut self, canvas_width: u32, canvas_height: u32) {
        self.canvas_width = canvas_width;
        self.canvas_height = canvas_height;
        let fresh = init::state_for_canvas(canvas_width, canvas_height, &self.settings);
        let palette = std::mem::take(&mut self.state).into_parts().1;
        let (grid, _, cell_size) = fresh.into_parts();
        self.state = SimulationState::from_parts(grid, palette, cell_size);
        let (w, h) = self.state.image_size();
        self.pixels = PixelBuffer::new(w, h);
        log::info!("resized to {}x{} cells", self.state.width(), self.state.height());
    }

    /// Remove every particle; the palette and frame counter survive
    pub fn clear(&mut self) {
        self.state.grid_mut().clear();
    }

    // === Perf ===

    /// Enable or disable per-frame perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.perf_enabled = enabled;
        if !enabled {
            self.perf_stats.reset();
        }
    }

    /// Last frame perf snapshot (zeros when perf disabled)
    pub fn perf_stats(&self) -> PerfStats {
        self.perf_stats.clone()
    }
}

impl SimulationState {
    /// Cell under a canvas position, `None` when it falls outside the grid
    pub fn cell_at_canvas(&self, x: f32, y: f32) -> Option<(u32, u32)> {
        commands::canvas_to_cell(self, x, y)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
