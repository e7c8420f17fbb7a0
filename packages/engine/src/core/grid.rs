//! Grid - one byte per cell, row-major
//!
//! Cell value 0 is empty; k > 0 references palette index k - 1.
//! The step never mutates a grid in place: it builds a fresh one.

/// Raw cell value
pub type Cell = u8;

pub const EMPTY: Cell = 0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Zeroed grid of `width * height` cells
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![EMPTY; size],
        }
    }

    /// Wrap an existing buffer.
    ///
    /// Panics if `cells.len() != width * height`: a mismatched buffer is a
    /// caller bug, not a runtime condition.
    pub fn from_cells(width: u32, height: u32, cells: Vec<Cell>) -> Self {
        let size = (width as usize) * (height as usize);
        assert_eq!(
            cells.len(),
            size,
            "grid buffer holds {} cells, expected {}x{} = {}",
            cells.len(),
            width,
            height,
            size
        );
        Self { width, height, cells }
    }

    // === Dimensions ===
    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn size(&self) -> usize { self.cells.len() }

    /// True when the buffer length still matches the dimensions
    #[inline]
    pub fn is_consistent(&self) -> bool {
        self.cells.len() == (self.width as usize) * (self.height as usize)
    }

    // === Index conversion ===
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    #[inline]
    pub fn coords(&self, idx: usize) -> (u32, u32) {
        let w = self.width as usize;
        ((idx % w) as u32, (idx / w) as u32)
    }

    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && x < self.width as i64 && y >= 0 && y < self.height as i64
    }

    // === Cell access ===
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Cell {
        self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn get_idx(&self, idx: usize) -> Cell {
        self.cells[idx]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, cell: Cell) {
        let idx = self.index(x, y);
        self.cells[idx] = cell;
    }

    #[inline]
    pub fn set_idx(&mut self, idx: usize, cell: Cell) {
        self.cells[idx] = cell;
    }

    #[inline]
    pub fn is_empty_idx(&self, idx: usize) -> bool {
        self.cells[idx] == EMPTY
    }

    /// Out-of-bounds coordinates are never empty
    #[inline]
    pub fn is_empty(&self, x: i64, y: i64) -> bool {
        if !self.in_bounds(x, y) { return false; }
        self.cells[self.index(x as u32, y as u32)] == EMPTY
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One row as a slice
    pub fn row(&self, y: u32) -> &[Cell] {
        let start = self.index(0, y);
        &self.cells[start..start + self.width as usize]
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    /// Number of occupied cells
    pub fn count_occupied(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY).count()
    }

    /// Largest cell value present (0 for an empty grid)
    pub fn max_cell(&self) -> Cell {
        self.cells.iter().copied().max().unwrap_or(EMPTY)
    }

    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new(0, 0)
    }
}
