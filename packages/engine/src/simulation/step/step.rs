//! Automaton step - one tick of falling sand
//!
//! Rows are scanned bottom to top and each row left to right. For every
//! occupied source cell the particle gets up to `ceil(fall_speed)` single-row
//! descents; each descent first passes a `gravity` coin flip, then takes the
//! first free cell of: below, below-left, below-right.
//!
//! "Free" means empty in the input grid AND empty in the output grid built so
//! far. The second check is what stops two particles from landing on the
//! same cell in one tick. The scan order is observable (sand drifts left when
//! two particles contend for the same diagonal) and must not change.

use rand::Rng;

use crate::core::grid::{Grid, EMPTY};

use super::render::{rasterize, PixelBuffer};
use super::SimulationState;

/// Tunables for one tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepParams {
    /// Probability in [0, 1] that a particle attempts a descent
    pub gravity: f32,
    /// Descent budget per tick is `ceil(fall_speed)`
    pub fall_speed: f32,
}

impl StepParams {
    pub fn new(gravity: f32, fall_speed: f32) -> Self {
        Self { gravity, fall_speed }
    }

    /// `ceil(fall_speed)`; negative or NaN means no movement
    pub fn max_fall_distance(&self) -> u32 {
        let d = self.fall_speed.ceil();
        if d.is_nan() || d <= 0.0 {
            0
        } else {
            // saturating float -> int cast
            d as u32
        }
    }
}

impl Default for StepParams {
    fn default() -> Self {
        Self { gravity: 1.0, fall_speed: 1.0 }
    }
}

/// What happened during one tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Particles that ended the tick somewhere other than where they started
    pub moved: u32,
    /// Occupied cells in the new grid
    pub particles: u32,
}

/// One tick plus a freshly rasterized image of the result
pub fn step<R: Rng + ?Sized>(
    state: SimulationState,
    gravity: f32,
    fall_speed: f32,
    rng: &mut R,
) -> (SimulationState, PixelBuffer) {
    let (next, _) = advance(state, StepParams::new(gravity, fall_speed), rng);
    let pixels = rasterize(&next);
    (next, pixels)
}

/// One tick without rasterization. The old grid buffer is dropped.
///
/// Panics if the state's grid length does not match its dimensions.
pub fn advance<R: Rng + ?Sized>(
    state: SimulationState,
    params: StepParams,
    rng: &mut R,
) -> (SimulationState, StepReport) {
    assert!(
        state.grid().is_consistent(),
        "cannot step a {}x{} grid holding {} cells",
        state.width(),
        state.height(),
        state.grid().size()
    );

    let (next, report) = fall(state.grid(), params, rng);
    (state.with_grid(next), report)
}

fn fall<R: Rng + ?Sized>(grid: &Grid, params: StepParams, rng: &mut R) -> (Grid, StepReport) {
    let width = grid.width();
    let height = grid.height();
    let max_fall = params.max_fall_distance();
    let mut next = Grid::new(width, height);
    let mut report = StepReport::default();

    // A candidate is free only if nobody started there and nobody landed there
    let is_free = |next: &Grid, x: u32, y: u32| {
        let idx = grid.index(x, y);
        grid.is_empty_idx(idx) && next.is_empty_idx(idx)
    };

    for y in (0..height).rev() {
        for x in 0..width {
            let cell = grid.get(x, y);
            if cell == EMPTY {
                continue;
            }

            let (mut cx, mut cy) = (x, y);
            for _ in 0..max_fall {
                if cy + 1 >= height {
                    break;
                }
                if rng.gen::<f32>() >= params.gravity {
                    break;
                }

                let ny = cy + 1;
                let target = if is_free(&next, cx, ny) {
                    Some(cx)
                } else if cx > 0 && is_free(&next, cx - 1, ny) {
                    Some(cx - 1)
                } else if cx + 1 < width && is_free(&next, cx + 1, ny) {
                    Some(cx + 1)
                } else {
                    None
                };

                match target {
                    Some(nx) => {
                        cx = nx;
                        cy = ny;
                    }
                    None => break,
                }
            }

            debug_assert!(next.get(cx, cy) == EMPTY, "two particles resolved to ({}, {})", cx, cy);
            next.set(cx, cy, cell);
            report.particles += 1;
            if (cx, cy) != (x, y) {
                report.moved += 1;
            }
        }
    }

    (next, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fall_distance_is_ceiling_of_speed() {
        assert_eq!(StepParams::new(1.0, 1.0).max_fall_distance(), 1);
        assert_eq!(StepParams::new(1.0, 1.2).max_fall_distance(), 2);
        assert_eq!(StepParams::new(1.0, 3.0).max_fall_distance(), 3);
        assert_eq!(StepParams::new(1.0, 0.01).max_fall_distance(), 1);
        assert_eq!(StepParams::new(1.0, 0.0).max_fall_distance(), 0);
        assert_eq!(StepParams::new(1.0, -2.5).max_fall_distance(), 0);
        assert_eq!(StepParams::new(1.0, f32::NAN).max_fall_distance(), 0);
    }
}
