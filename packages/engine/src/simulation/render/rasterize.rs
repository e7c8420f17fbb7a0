//! Rasterization - grid + palette to an RGBA8 image
//!
//! Layout matches canvas `ImageData`: row-major, 4 bytes per pixel, image
//! size `width * cell_size` by `height * cell_size`. Each occupied cell
//! becomes an opaque `cell_size x cell_size` block.

#[cfg(all(feature = "parallel", any(not(target_arch = "wasm32"), target_feature = "atomics")))]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::grid::EMPTY;
use crate::domain::color::Rgb;

use super::SimulationState;

const OPAQUE: u8 = 255;

/// What an empty cell does to its pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyCellMode {
    /// Alpha set to 0, color bytes untouched (the `putImageData` backend)
    #[default]
    Transparent,
    /// All four bytes zeroed
    Clear,
}

/// RGBA8 pixel buffer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Fully transparent black image
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; Self::byte_len(width, height)],
        }
    }

    fn byte_len(width: u32, height: u32) -> usize {
        (width as usize) * (height as usize) * 4
    }

    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn data(&self) -> &[u8] { &self.data }

    pub fn into_data(self) -> Vec<u8> { self.data }

    /// Pointer for zero-copy views from JS
    pub fn as_ptr(&self) -> *const u8 { self.data.as_ptr() }

    /// RGBA of one pixel; panics when out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Reallocate (zeroed) unless already `width x height`
    fn ensure_size(&mut self, width: u32, height: u32) {
        if self.width != width || self.height != height {
            *self = PixelBuffer::new(width, height);
        }
    }
}

/// Rasterize into a new buffer
pub fn rasterize(state: &SimulationState) -> PixelBuffer {
    let (w, h) = state.image_size();
    let mut pixels = PixelBuffer::new(w, h);
    rasterize_into(state, EmptyCellMode::default(), &mut pixels);
    pixels
}

/// Rasterize into a reused buffer, resizing it if the image size changed
pub fn rasterize_into(state: &SimulationState, empty: EmptyCellMode, pixels: &mut PixelBuffer) {
    let (w, h) = state.image_size();
    pixels.ensure_size(w, h);
    if w == 0 || h == 0 {
        return;
    }

    let stride = (w as usize) * 4;
    draw_rows(state, empty, &mut pixels.data, stride);
}

#[cfg(all(feature = "parallel", any(not(target_arch = "wasm32"), target_feature = "atomics")))]
fn draw_rows(state: &SimulationState, empty: EmptyCellMode, data: &mut [u8], stride: usize) {
    data.par_chunks_mut(stride)
        .enumerate()
        .for_each(|(py, row)| draw_row(state, py as u32, empty, row));
}

#[cfg(not(all(feature = "parallel", any(not(target_arch = "wasm32"), target_feature = "atomics"))))]
fn draw_rows(state: &SimulationState, empty: EmptyCellMode, data: &mut [u8], stride: usize) {
    data.chunks_mut(stride)
        .enumerate()
        .for_each(|(py, row)| draw_row(state, py as u32, empty, row));
}

/// Fill one pixel row from the grid row it falls in
fn draw_row(state: &SimulationState, py: u32, empty: EmptyCellMode, row: &mut [u8]) {
    let cell_size = state.cell_size() as usize;
    let cells = state.grid().row(py / state.cell_size());
    let palette = state.palette();

    for (cell, block) in cells.iter().zip(row.chunks_mut(cell_size * 4)) {
        if *cell == EMPTY {
            match empty {
                EmptyCellMode::Transparent => {
                    for px in block.chunks_mut(4) {
                        px[3] = 0;
                    }
                }
                EmptyCellMode::Clear => block.fill(0),
            }
            continue;
        }

        debug_assert!(palette.covers(*cell), "cell {} outside palette", cell);
        let rgba = palette.rgb(*cell - 1).unwrap_or(Rgb::BLACK).to_rgba(OPAQUE);
        for px in block.chunks_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::Grid;
    use crate::domain::palette::Palette;

    fn state(width: u32, height: u32, cells: Vec<u8>, cell_size: u32) -> SimulationState {
        let mut palette = Palette::default();
        palette.find_or_append("#ff00aa");
        SimulationState::from_parts(Grid::from_cells(width, height, cells), palette, cell_size)
    }

    #[test]
    fn image_matches_grid_dimensions() {
        let s = state(3, 2, vec![0; 6], 1);
        let px = rasterize(&s);
        assert_eq!((px.width(), px.height()), (3, 2));
        assert_eq!(px.data().len(), 3 * 2 * 4);
    }

    #[test]
    fn occupied_cells_are_opaque_palette_colors() {
        let s = state(2, 1, vec![1, 2], 1);
        let px = rasterize(&s);
        assert_eq!(px.pixel(0, 0), [255, 215, 0, 255]);
        assert_eq!(px.pixel(1, 0), [255, 0, 170, 255]);
    }

    #[test]
    fn cell_size_paints_square_blocks() {
        let s = state(2, 2, vec![0, 2, 0, 0], 2);
        let px = rasterize(&s);
        assert_eq!((px.width(), px.height()), (4, 4));
        for y in 0..4 {
            for x in 0..4 {
                let expected = if x >= 2 && y < 2 { [255, 0, 170, 255] } else { [0, 0, 0, 0] };
                assert_eq!(px.pixel(x, y), expected, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn transparent_mode_only_touches_alpha() {
        let full = state(1, 1, vec![2], 1);
        let mut px = PixelBuffer::new(1, 1);
        rasterize_into(&full, EmptyCellMode::Transparent, &mut px);

        let empty = state(1, 1, vec![0], 1);
        rasterize_into(&empty, EmptyCellMode::Transparent, &mut px);
        assert_eq!(px.pixel(0, 0), [255, 0, 170, 0]);

        rasterize_into(&full, EmptyCellMode::Transparent, &mut px);
        rasterize_into(&empty, EmptyCellMode::Clear, &mut px);
        assert_eq!(px.pixel(0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn wrong_sized_buffer_is_replaced() {
        let s = state(2, 2, vec![1, 0, 0, 0], 1);
        let mut px = PixelBuffer::new(7, 3);
        rasterize_into(&s, EmptyCellMode::Transparent, &mut px);
        assert_eq!((px.width(), px.height()), (2, 2));
        assert_eq!(px.pixel(0, 0), [255, 215, 0, 255]);
    }

    #[test]
    fn empty_mode_parses_lowercase() {
        let mode: EmptyCellMode = serde_json::from_str("\"clear\"").unwrap();
        assert_eq!(mode, EmptyCellMode::Clear);
    }
}
