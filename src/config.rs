use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CanvasError, Result};
use crate::geometry::Size;
use crate::layout::{CascadeRules, MIN_VIABLE_WIDTH};

/// Layout constants shared by the board, the engine and the gesture helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Clearance between blocks and from every canvas edge; also the grid step.
    pub gap: i32,
    /// Blocks pushed past the right edge are shrunk rather than relocated
    /// while they stay at least this wide.
    pub min_viable_width: i32,
    /// Size given to blocks added without an explicit size.
    pub default_block_size: Size,
    /// Smallest block edge a resize gesture may produce, in grid steps.
    pub min_block_cells: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            gap: 20,
            min_viable_width: MIN_VIABLE_WIDTH,
            default_block_size: Size::new(300, 200),
            min_block_cells: 5,
        }
    }
}

impl LayoutConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.gap <= 0 {
            return Err(CanvasError::InvalidConfig(format!(
                "gap must be positive, got {}",
                self.gap
            )));
        }
        if self.min_viable_width <= 0 {
            return Err(CanvasError::InvalidConfig(format!(
                "min_viable_width must be positive, got {}",
                self.min_viable_width
            )));
        }
        let Size { width, height } = self.default_block_size;
        if width <= 0 || height <= 0 {
            return Err(CanvasError::InvalidConfig(format!(
                "default_block_size must be positive, got {width}x{height}"
            )));
        }
        if self.min_block_cells == 0 {
            return Err(CanvasError::InvalidConfig(
                "min_block_cells must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Smallest edge length a resize may produce, in pixels.
    pub fn min_block_edge(&self) -> i32 {
        self.gap.saturating_mul(self.min_block_cells as i32)
    }

    pub fn cascade_rules(&self) -> CascadeRules {
        CascadeRules {
            gap: self.gap,
            min_viable_width: self.min_viable_width,
        }
    }
}
