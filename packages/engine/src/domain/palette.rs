//! Palette - append-only list of colors referenced by grid cells
//!
//! Cell value `k` refers to entry `k - 1`, so a byte grid addresses at most
//! 255 entries. Entries never move once appended.

use serde::Serialize;

use super::color::{hex_to_rgb, Rgb, DEFAULT_SAND_COLOR};
use crate::core::grid::Cell;

/// Largest palette a byte cell can reference
pub const MAX_PALETTE_LEN: usize = Cell::MAX as usize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    /// Color string exactly as the caller supplied it
    pub hex: String,
    /// Mapped once on append
    pub rgb: Rgb,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Palette holding a single starting color
    pub fn new(first: &str) -> Self {
        Self {
            entries: vec![PaletteEntry::new(first)],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_PALETTE_LEN
    }

    pub fn get(&self, index: u8) -> Option<&PaletteEntry> {
        self.entries.get(index as usize)
    }

    #[inline]
    pub fn rgb(&self, index: u8) -> Option<Rgb> {
        self.entries.get(index as usize).map(|e| e.rgb)
    }

    /// True when `cell` is empty or refers to an existing entry
    #[inline]
    pub fn covers(&self, cell: Cell) -> bool {
        (cell as usize) <= self.entries.len()
    }

    /// First entry whose string equals `hex` exactly
    pub fn position(&self, hex: &str) -> Option<u8> {
        self.entries
            .iter()
            .position(|e| e.hex == hex)
            .map(|i| i as u8)
    }

    /// Append without looking for duplicates. `None` when full.
    pub fn push(&mut self, hex: &str) -> Option<u8> {
        if self.is_full() {
            return None;
        }
        let index = self.entries.len() as u8;
        self.entries.push(PaletteEntry::new(hex));
        Some(index)
    }

    /// Index of `hex`, appending it if unseen. `None` only when unseen and full.
    pub fn find_or_append(&mut self, hex: &str) -> Option<u8> {
        if let Some(index) = self.position(hex) {
            return Some(index);
        }
        let index = self.push(hex)?;
        log::debug!("palette grew to {} colors ({})", self.entries.len(), hex);
        Some(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PaletteEntry> {
        self.entries.iter()
    }

    /// Entries as a JSON array of `{hex, rgb}` objects
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.entries).unwrap_or_else(|_| "[]".to_string())
    }
}

impl PaletteEntry {
    fn new(hex: &str) -> Self {
        Self {
            hex: hex.to_string(),
            rgb: hex_to_rgb(hex),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::new(DEFAULT_SAND_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_gold() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 1);
        assert_eq!(palette.rgb(0), Some(Rgb::new(255, 215, 0)));
        assert_eq!(palette.rgb(1), None);
    }

    #[test]
    fn find_or_append_reuses_first_match() {
        let mut palette = Palette::default();
        assert_eq!(palette.find_or_append("#FFD700"), Some(0));
        assert_eq!(palette.find_or_append("#ff0000"), Some(1));
        assert_eq!(palette.find_or_append("#ff0000"), Some(1));
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn lookup_is_exact_string_match() {
        let mut palette = Palette::default();
        // Same color, different spelling: a separate entry
        assert_eq!(palette.find_or_append("#ffd700"), Some(1));
        assert_eq!(palette.rgb(0), palette.rgb(1));
    }

    #[test]
    fn duplicates_allowed_and_first_wins() {
        let mut palette = Palette::default();
        assert_eq!(palette.push("#FFD700"), Some(1));
        assert_eq!(palette.position("#FFD700"), Some(0));
    }

    #[test]
    fn malformed_color_is_kept_but_maps_to_black() {
        let mut palette = Palette::default();
        let idx = palette.find_or_append("tomato").unwrap();
        assert_eq!(palette.get(idx).unwrap().hex, "tomato");
        assert_eq!(palette.rgb(idx), Some(Rgb::BLACK));
    }

    #[test]
    fn refuses_to_grow_past_byte_range() {
        let mut palette = Palette::default();
        for i in 1..MAX_PALETTE_LEN {
            assert_eq!(palette.find_or_append(&format!("#{:06x}", i)), Some(i as u8));
        }
        assert!(palette.is_full());
        assert_eq!(palette.find_or_append("#123456"), None);
        // Existing colors still resolve
        assert_eq!(palette.find_or_append("#000001"), Some(1));
        assert!(palette.covers(255));
    }

    #[test]
    fn json_lists_entries_in_order() {
        let mut palette = Palette::default();
        palette.find_or_append("#ff00aa");
        let v: serde_json::Value = serde_json::from_str(&palette.to_json()).unwrap();
        assert_eq!(v[0]["hex"], "#FFD700");
        assert_eq!(v[1]["rgb"]["b"], 170);
    }
}
