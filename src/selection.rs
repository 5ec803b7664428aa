//! Picking cells for paylines.
//!
//! A line takes one cell from every column, left to right. Which cell is
//! decided by a [`CellPicker`]; [`UniformPicker`] draws uniformly from an
//! `rand` generator. [`CombinationGenerator`] produces whole sets of random
//! styled paylines, and [`SelectionEvents`] lets observers see each chosen
//! line.

use std::fmt;

use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::cell::Cell;
use crate::color::{Rgba, Rgba8};
use crate::error::{PaylineError, Result};
use crate::grid::Grid;
use crate::payline::{Payline, PaylineStyle};

// ============================================================================
// Pickers
// ============================================================================

/// Chooses one cell out of a column.
pub trait CellPicker {
    /// `None` means the column offers nothing to choose from.
    fn pick(&mut self, column: &[Cell]) -> Option<Cell>;
}

/// Uniform choice driven by a random number generator.
#[derive(Debug, Clone)]
pub struct UniformPicker<R> {
    rng: R,
}

impl<R: Rng> UniformPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> CellPicker for UniformPicker<R> {
    fn pick(&mut self, column: &[Cell]) -> Option<Cell> {
        column.choose(&mut self.rng).copied()
    }
}

/// One cell per column, left to right.
pub fn select_line<P: CellPicker + ?Sized>(grid: &Grid, picker: &mut P) -> Result<Vec<Cell>> {
    (0..grid.columns())
        .map(|c| picker.pick(&grid.column(c)).ok_or(PaylineError::EmptyPath))
        .collect()
}

/// Like [`select_line`], but only visible cells are offered. A column with
/// no visible cell fails the whole line.
pub fn select_visible_line<P: CellPicker + ?Sized>(
    grid: &Grid,
    picker: &mut P,
) -> Result<Vec<Cell>> {
    (0..grid.columns())
        .map(|c| {
            let visible: Vec<Cell> = grid
                .column(c)
                .into_iter()
                .filter(|cell| cell.is_visible())
                .collect();
            picker.pick(&visible).ok_or(PaylineError::EmptyPath)
        })
        .collect()
}

/// New grid generation where each cell is visible with `probability`.
pub fn randomize_visibility<R: Rng + ?Sized>(
    grid: &Grid,
    probability: f64,
    rng: &mut R,
) -> Result<Grid> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(PaylineError::InvalidConfiguration(format!(
            "visibility probability must be in [0, 1], got {probability}"
        )));
    }
    Ok(grid.with_visibility(|_| rng.random_bool(probability)))
}

// ============================================================================
// Random combinations
// ============================================================================

/// Generates random sets of styled paylines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombinationGenerator {
    min_count: usize,
    max_count: usize,
    min_width: f64,
    max_width: f64,
}

impl CombinationGenerator {
    pub fn new(min_count: usize, max_count: usize, min_width: f64, max_width: f64) -> Result<Self> {
        if min_count == 0 || min_count > max_count {
            return Err(PaylineError::InvalidConfiguration(format!(
                "combination count range must satisfy 1 <= min <= max, got {min_count}..={max_count}"
            )));
        }
        if !min_width.is_finite() || !max_width.is_finite() || min_width < 0.0 || min_width > max_width
        {
            return Err(PaylineError::InvalidConfiguration(format!(
                "line width range must satisfy 0 <= min <= max, got {min_width}..={max_width}"
            )));
        }
        Ok(Self {
            min_count,
            max_count,
            min_width,
            max_width,
        })
    }

    pub fn count_range(&self) -> (usize, usize) {
        (self.min_count, self.max_count)
    }

    pub fn width_range(&self) -> (f64, f64) {
        (self.min_width, self.max_width)
    }

    /// Random opaque color and width within range.
    pub fn random_style<R: Rng + ?Sized>(&self, rng: &mut R) -> PaylineStyle {
        let color = Rgba::new_rgb(rng.random(), rng.random(), rng.random());
        let width = rng.random_range(self.min_width..=self.max_width);
        PaylineStyle::new(width, Rgba8::from_rgba(&color))
    }

    /// Between `min_count` and `max_count` unbuilt paylines over `grid`.
    /// With `visible_only`, hidden cells are never chosen.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        grid: &Grid,
        visible_only: bool,
        rng: &mut R,
    ) -> Result<Vec<Payline>> {
        let count = rng.random_range(self.min_count..=self.max_count);
        let mut paylines = Vec::with_capacity(count);
        for _ in 0..count {
            let mut picker = UniformPicker::new(&mut *rng);
            let cells = if visible_only {
                select_visible_line(grid, &mut picker)?
            } else {
                select_line(grid, &mut picker)?
            };
            let style = self.random_style(rng);
            paylines.push(Payline::new(cells, style));
        }
        tracing::debug!(count, visible_only, "combinations generated");
        Ok(paylines)
    }
}

// ============================================================================
// Events
// ============================================================================

type Observer = Box<dyn FnMut(&[Cell])>;

/// Fan-out of "a line was selected" notifications.
#[derive(Default)]
pub struct SelectionEvents {
    observers: Vec<Observer>,
}

impl SelectionEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F: FnMut(&[Cell]) + 'static>(&mut self, observer: F) {
        self.observers.push(Box::new(observer));
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Call every observer, in subscription order.
    pub fn notify(&mut self, cells: &[Cell]) {
        for observer in &mut self.observers {
            observer(cells);
        }
    }
}

impl fmt::Debug for SelectionEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionEvents")
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Observer that logs position and border of every selected cell.
pub fn log_selection(cells: &[Cell]) {
    for cell in cells {
        let r = cell.padded_rect();
        tracing::info!(
            cell = %cell.id(),
            x = cell.center().x,
            y = cell.center().y,
            visible = cell.is_visible(),
            left = r.x1,
            right = r.x2,
            bottom = r.y1,
            top = r.y2,
            "cell selected"
        );
    }
}

// ============================================================================
// Tests
// ============================================================================
