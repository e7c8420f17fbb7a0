use crate::core::grid::Grid;
use crate::domain::palette::Palette;

use super::settings::SimulationSettings;
use super::{SimulationState, CELL_SIZE};

/// Zeroed `width x height` cell grid with the default one-color palette
pub fn initialize(width: u32, height: u32) -> SimulationState {
    initialize_with_cell_size(width, height, CELL_SIZE)
}

pub fn initialize_with_cell_size(width: u32, height: u32, cell_size: u32) -> SimulationState {
    SimulationState::from_parts(Grid::new(width, height), Palette::default(), cell_size)
}

/// Grid covering a canvas: `floor(canvas / cell_size)` cells per axis
pub(super) fn state_for_canvas(canvas_width: u32, canvas_height: u32, settings: &SimulationSettings) -> SimulationState {
    let cell_size = settings.cell_size.max(1);
    initialize_with_cell_size(canvas_width / cell_size, canvas_height / cell_size, cell_size)
}
