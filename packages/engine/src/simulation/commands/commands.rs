use super::SimulationState;

/// Grid cell under a canvas position. Negative, NaN and infinite inputs
/// all land outside the grid.
pub(super) fn canvas_to_cell(state: &SimulationState, x: f32, y: f32) -> Option<(u32, u32)> {
    let size = state.cell_size() as f32;
    let gx = (x / size).floor();
    let gy = (y / size).floor();
    if !(gx >= 0.0 && gy >= 0.0) {
        return None;
    }
    if gx >= state.width() as f32 || gy >= state.height() as f32 {
        return None;
    }
    Some((gx as u32, gy as u32))
}

/// Stamp one particle of palette entry `palette_index` at canvas (x, y).
///
/// Out-of-bounds positions are a silent no-op: brush strokes near the edge
/// are expected to partly miss. The last write to a cell wins. An index the
/// palette does not hold is refused, since it would leave a dangling cell.
pub fn insert_particle(mut state: SimulationState, x: f32, y: f32, palette_index: u8) -> SimulationState {
    let Some((gx, gy)) = canvas_to_cell(&state, x, y) else {
        return state;
    };

    if (palette_index as usize) >= state.palette().len() {
        log::warn!(
            "ignoring particle with palette index {} (palette holds {})",
            palette_index,
            state.palette().len()
        );
        return state;
    }

    state.grid_mut().set(gx, gy, palette_index + 1);
    state
}
