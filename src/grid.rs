//! Grid layout builder.
//!
//! Divides a bounding rectangle into `rows x columns` equal slots. Each slot
//! is shrunk symmetrically by the margin ratio to give the cell's size; the
//! cell stays centered in its slot. Padding is a fraction of the shrunk cell
//! width and only affects where paths cross the cell border.
//!
//! Row 0 sits at the bottom of the bounds (`y1`), column 0 at the left.

use crate::basics::{PointD, RectD};
use crate::cell::Cell;
use crate::error::{PaylineError, Result};

/// Ratios at or above this value leave no usable cell area.
pub const MAX_RATIO: f64 = 0.5;

/// A rectangular arrangement of cells, stored row-major.
///
/// A grid is a value: visibility changes produce a new grid, so paylines
/// built from one generation never observe another.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    bounds: RectD,
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

fn check_ratio(name: &str, v: f64) -> Result<()> {
    if (0.0..MAX_RATIO).contains(&v) {
        Ok(())
    } else {
        Err(PaylineError::InvalidConfiguration(format!(
            "{name} must be in [0, {MAX_RATIO}), got {v}"
        )))
    }
}

impl Grid {
    /// Lay out a grid over `bounds`.
    pub fn build(
        bounds: RectD,
        rows: usize,
        columns: usize,
        margin_ratio: f64,
        padding_ratio: f64,
    ) -> Result<Grid> {
        if rows == 0 || columns == 0 {
            return Err(PaylineError::InvalidConfiguration(format!(
                "grid needs at least one row and column, got {rows}x{columns}"
            )));
        }
        let finite = [bounds.x1, bounds.y1, bounds.x2, bounds.y2]
            .iter()
            .all(|v| v.is_finite());
        if !finite || bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Err(PaylineError::InvalidConfiguration(format!(
                "grid bounds must be finite with positive size, got {bounds:?}"
            )));
        }
        check_ratio("margin ratio", margin_ratio)?;
        check_ratio("padding ratio", padding_ratio)?;

        let raw_w = bounds.width() / columns as f64;
        let raw_h = bounds.height() / rows as f64;
        let cell_w = raw_w * (1.0 - 2.0 * margin_ratio);
        let cell_h = raw_h * (1.0 - 2.0 * margin_ratio);
        let padding = padding_ratio * cell_w;

        let mut cells = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for column in 0..columns {
                let center = PointD::new(
                    bounds.x1 + (column as f64 + 0.5) * raw_w,
                    bounds.y1 + (row as f64 + 0.5) * raw_h,
                );
                cells.push(Cell::new(center, cell_w, cell_h, padding, true)?.at(row, column));
            }
        }

        tracing::debug!(
            rows,
            columns,
            cell_width = cell_w,
            cell_height = cell_h,
            padding,
            "grid built"
        );

        Ok(Grid {
            bounds,
            rows,
            columns,
            cells,
        })
    }

    pub fn bounds(&self) -> RectD {
        self.bounds
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        if row < self.rows && column < self.columns {
            self.cells.get(row * self.columns + column)
        } else {
            None
        }
    }

    /// Cells of one column, bottom row first. Empty for an out-of-range column.
    pub fn column(&self, column: usize) -> Vec<Cell> {
        if column >= self.columns {
            return Vec::new();
        }
        self.cells
            .iter()
            .skip(column)
            .step_by(self.columns)
            .copied()
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_visible()).count()
    }

    /// New grid generation with every cell's visibility set by `f`.
    pub fn with_visibility<F: FnMut(&Cell) -> bool>(&self, mut f: F) -> Grid {
        Grid {
            bounds: self.bounds,
            rows: self.rows,
            columns: self.columns,
            cells: self.cells.iter().map(|c| c.with_visibility(f(c))).collect(),
        }
    }

    /// Rectangle outlines of every cell as a discrete point list (four
    /// segments, eight points per cell). `padded` selects the padded
    /// rectangle instead of the outer one.
    pub fn outline_points(&self, padded: bool) -> Vec<PointD> {
        let mut points = Vec::with_capacity(self.cells.len() * 8);
        for cell in &self.cells {
            let r = if padded { cell.padded_rect() } else { cell.rect() };
            let c = r.corners();
            for i in 0..4 {
                points.push(c[i]);
                points.push(c[(i + 1) % 4]);
            }
        }
        points
    }
}

// ============================================================================
// Tests
// ============================================================================
