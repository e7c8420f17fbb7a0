//! Brush spray and pointer input
//!
//! While the pointer is pressed, each frame sprays
//! `ceil(brush_size * delta_ms / 16)` particles scattered uniformly in angle
//! and radius inside a disc of diameter `brush_size`, nudged 5px upward and
//! clamped to the top edge.

use std::f32::consts::TAU;

use rand::Rng;

use super::commands::insert_particle;
use super::SimulationState;

pub const MIN_BRUSH_SIZE: u32 = 1;
pub const MAX_BRUSH_SIZE: u32 = 50;

/// Frame time the spray rate is normalized to (60 Hz)
const REFERENCE_FRAME_MS: f64 = 16.0;

/// Sprayed particles start this far above the pointer
const SPRAY_LIFT: f32 = 5.0;

/// Particles one frame of spraying inserts
pub fn particles_for_frame(brush_size: u32, delta_ms: f64) -> u32 {
    if !delta_ms.is_finite() || delta_ms <= 0.0 {
        return 0;
    }
    let n = (brush_size as f64 * delta_ms / REFERENCE_FRAME_MS).ceil();
    // saturating float -> int cast
    n as u32
}

/// Insert `count` particles of palette entry `color_index` around (x, y)
pub fn spray<R: Rng + ?Sized>(
    mut state: SimulationState,
    x: f32,
    y: f32,
    brush_size: u32,
    count: u32,
    color_index: u8,
    rng: &mut R,
) -> SimulationState {
    let max_radius = brush_size as f32 / 2.0;
    for _ in 0..count {
        let angle = rng.gen::<f32>() * TAU;
        let radius = rng.gen::<f32>() * max_radius;
        let px = x + angle.cos() * radius;
        let py = (y + angle.sin() * radius - SPRAY_LIFT).max(0.0);
        state = insert_particle(state, px, py, color_index);
    }
    state
}

/// Pointer input, fed to the simulation as explicit events
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
    Leave,
}

/// Last known pointer position and whether it is pressed
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub pressed: bool,
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    pub fn apply(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { x, y } => {
                self.pressed = true;
                self.x = x;
                self.y = y;
            }
            PointerEvent::Move { x, y } => {
                self.x = x;
                self.y = y;
            }
            PointerEvent::Up | PointerEvent::Leave => self.pressed = false,
        }
    }

    /// Position while pressed
    pub fn pressed_at(&self) -> Option<(f32, f32)> {
        self.pressed.then_some((self.x, self.y))
    }
}
