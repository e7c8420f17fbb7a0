//! Runtime settings, loadable from JSON

use serde::{Deserialize, Serialize};

use crate::domain::color::DEFAULT_SAND_COLOR;

use super::brush::{MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};
use super::render::EmptyCellMode;
use super::CELL_SIZE;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Probability in [0, 1] that a particle attempts to fall each descent
    pub gravity: f32,
    /// Rows per tick budget is `ceil(fall_speed)`
    pub fall_speed: f32,
    pub brush_size: u32,
    /// `#RRGGBB`; anything else paints black
    pub sand_color: String,
    /// Pixels per cell edge, fixed per grid allocation
    pub cell_size: u32,
    pub empty_cells: EmptyCellMode,
    pub seed: u64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            gravity: 1.0,
            fall_speed: 1.0,
            brush_size: 10,
            sand_color: DEFAULT_SAND_COLOR.to_string(),
            cell_size: CELL_SIZE,
            empty_cells: EmptyCellMode::Transparent,
            seed: 12345,
        }
    }
}

impl SimulationSettings {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let settings: SimulationSettings = serde_json::from_str(json).map_err(|e| e.to_string())?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply a partial JSON document over these settings. Fields the
    /// document leaves out keep their current values.
    pub fn merge_json(&self, json: &str) -> Result<Self, String> {
        let patch: serde_json::Value = serde_json::from_str(json).map_err(|e| e.to_string())?;
        let serde_json::Value::Object(patch) = patch else {
            return Err("settings must be a JSON object".to_string());
        };
        let mut merged = serde_json::to_value(self).map_err(|e| e.to_string())?;
        if let serde_json::Value::Object(fields) = &mut merged {
            fields.extend(patch);
        }
        let settings: SimulationSettings = serde_json::from_value(merged).map_err(|e| e.to_string())?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.gravity) {
            return Err(format!("gravity must be within [0, 1], got {}", self.gravity));
        }
        if !self.fall_speed.is_finite() || self.fall_speed < 0.0 {
            return Err(format!("fall_speed must be a finite value >= 0, got {}", self.fall_speed));
        }
        if !(MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE).contains(&self.brush_size) {
            return Err(format!(
                "brush_size must be within {}..={}, got {}",
                MIN_BRUSH_SIZE, MAX_BRUSH_SIZE, self.brush_size
            ));
        }
        if self.cell_size == 0 {
            return Err("cell_size must be at least 1".to_string());
        }
        Ok(())
    }
}

pub(super) fn set_gravity(settings: &mut SimulationSettings, gravity: f32) {
    settings.gravity = if gravity.is_nan() { 0.0 } else { gravity.clamp(0.0, 1.0) };
}

pub(super) fn set_fall_speed(settings: &mut SimulationSettings, fall_speed: f32) {
    settings.fall_speed = if fall_speed.is_finite() { fall_speed.max(0.0) } else { 0.0 };
}

pub(super) fn set_brush_size(settings: &mut SimulationSettings, size: u32) {
    settings.brush_size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
}
