//! JSON configuration for a slot layout and its random paylines.
//!
//! Every field has a default, so a partial file (or `{}`) is valid.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::basics::RectD;
use crate::error::{PaylineError, Result};
use crate::grid::Grid;
use crate::payline::PaylineStyle;
use crate::selection::CombinationGenerator;

/// Rectangle given by its lower-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 1024.0,
            height: 768.0,
        }
    }
}

impl Bounds {
    pub fn to_rect(self) -> RectD {
        RectD::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub bounds: Bounds,
    pub rows: usize,
    pub columns: usize,
    pub margin_ratio: f64,
    pub padding_ratio: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            rows: 3,
            columns: 5,
            margin_ratio: 0.05,
            padding_ratio: 0.05,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombinationSettings {
    pub min: usize,
    pub max: usize,
    pub min_width: f64,
    pub max_width: f64,
}

impl Default for CombinationSettings {
    fn default() -> Self {
        Self {
            min: 1,
            max: 5,
            min_width: 3.0,
            max_width: 8.0,
        }
    }
}

impl CombinationSettings {
    pub fn generator(&self) -> Result<CombinationGenerator> {
        CombinationGenerator::new(self.min, self.max, self.min_width, self.max_width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotConfig {
    pub grid: GridSettings,
    pub line: PaylineStyle,
    pub combinations: CombinationSettings,
    /// Chance of each cell being visible when visibility is randomized.
    pub visibility_probability: f64,
    /// Fixed seed for reproducible random output.
    pub seed: Option<u64>,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            grid: GridSettings::default(),
            line: PaylineStyle::default(),
            combinations: CombinationSettings::default(),
            visibility_probability: 0.8,
            seed: None,
        }
    }
}

impl SlotConfig {
    /// Parse and validate.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: SlotConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        tracing::info!(
            path = %path.display(),
            rows = config.grid.rows,
            columns = config.grid.columns,
            "config loaded"
        );
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every range. Grid geometry is checked by building it.
    pub fn validate(&self) -> Result<()> {
        self.build_grid()?;
        self.combinations.generator()?;
        let width = self.line.width;
        if !width.is_finite() || width < 0.0 {
            return Err(PaylineError::InvalidConfiguration(format!(
                "line width must be finite and non-negative, got {width}"
            )));
        }
        if !(0.0..=1.0).contains(&self.visibility_probability) {
            return Err(PaylineError::InvalidConfiguration(format!(
                "visibility probability must be in [0, 1], got {}",
                self.visibility_probability
            )));
        }
        Ok(())
    }

    pub fn build_grid(&self) -> Result<Grid> {
        let g = &self.grid;
        Grid::build(
            g.bounds.to_rect(),
            g.rows,
            g.columns,
            g.margin_ratio,
            g.padding_ratio,
        )
    }
}
