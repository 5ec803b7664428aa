//! Payline path building.
//!
//! A payline visits one cell per column, left to right. For every cell the
//! builder emits three segments: the connection into the cell border, the
//! run from the border to the center, and the run from the center out to
//! the border facing the next target. Hidden cells swap the two inner runs
//! for short stumps that stop outside the cell, so the line visibly ends
//! instead of crossing it. A final segment joins the last exit to the end
//! target.
//!
//! The result is a *discrete* polyline: points are taken in consecutive
//! pairs and each pair is drawn on its own. Stumps rely on the gaps that
//! this leaves.

use serde::{Deserialize, Serialize};

use crate::basics::{discrete_vertex, PointD, VertexSource};
use crate::cell::Cell;
use crate::cell_border::{external_entry, internal_exit, BorderHit};
use crate::color::Rgba8;
use crate::error::{PaylineError, Result};
use crate::line_eq::LineEq;
use crate::math::discrete_length;
use crate::renderer::{LineHandle, LineRenderer};

/// Number of points produced for a path over `cells` cells.
pub fn path_point_count(cells: usize) -> usize {
    2 * (3 * cells + 1)
}

/// Build the discrete point list of a payline.
///
/// `start_anchor` defaults to the left-middle point of the first cell's
/// outer rectangle, `end_anchor` to the right-middle point of the last.
/// Any border resolution failure aborts the whole build.
pub fn build_path(
    cells: &[Cell],
    line_width: f64,
    start_anchor: Option<PointD>,
    end_anchor: Option<PointD>,
) -> Result<Vec<PointD>> {
    let first = cells.first().ok_or(PaylineError::EmptyPath)?;
    if !line_width.is_finite() || line_width < 0.0 {
        return Err(PaylineError::InvalidConfiguration(format!(
            "line width must be finite and non-negative, got {line_width}"
        )));
    }
    for anchor in [start_anchor, end_anchor].into_iter().flatten() {
        if !anchor.is_finite() {
            return Err(PaylineError::InvalidConfiguration(format!(
                "anchor must be finite, got {anchor:?}"
            )));
        }
    }

    let hidden_offset = line_width / 3.0;
    let stump_length = line_width / 4.0;
    let stump_end =
        |hit: &BorderHit, length: f64| hit.point + hit.side.stump_direction() * length;

    let mut points = Vec::with_capacity(path_point_count(cells.len()));
    let mut entry = start_anchor.unwrap_or_else(|| first.left_middle());
    let mut target = entry;

    for (i, cell) in cells.iter().enumerate() {
        let center = cell.center();
        let visible = cell.is_visible();
        let offset = if visible { 0.0 } else { hidden_offset };

        // Into the cell. The search runs from the center back toward the
        // entry point, so the crossing is found even when the entry point
        // lies on the border itself.
        let ray = LineEq::from_points(entry, center);
        let hit = external_entry(cell, &ray, center, entry - center, offset)?;
        points.push(entry);
        points.push(hit.point);
        points.push(hit.point);
        points.push(if visible {
            center
        } else {
            stump_end(&hit, stump_length)
        });

        target = match cells.get(i + 1) {
            Some(next) => next.center(),
            None => end_anchor.unwrap_or_else(|| cell.right_middle()),
        };

        // Out of the cell.
        let ray = LineEq::from_points(center, target);
        let hit = internal_exit(cell, &ray, center, target - center, offset)?;
        if visible {
            points.push(center);
            points.push(hit.point);
            entry = hit.point;
        } else {
            // Pulled back by the full offset, so the next connection starts
            // on the padded border itself.
            let shifted = stump_end(&hit, hidden_offset);
            points.push(hit.point);
            points.push(shifted);
            entry = shifted;
        }
    }

    points.push(entry);
    points.push(target);
    Ok(points)
}

// ============================================================================
// Style
// ============================================================================

/// How a payline is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaylineStyle {
    pub width: f64,
    pub color: Rgba8,
    /// Explicit stacking order. Without one, the payline's position in its
    /// set is used.
    pub draw_order: Option<i32>,
}

impl PaylineStyle {
    pub fn new(width: f64, color: Rgba8) -> Self {
        Self {
            width,
            color,
            draw_order: None,
        }
    }

    pub fn with_draw_order(self, draw_order: i32) -> Self {
        Self {
            draw_order: Some(draw_order),
            ..self
        }
    }
}

impl Default for PaylineStyle {
    fn default() -> Self {
        Self::new(5.0, Rgba8::RED)
    }
}

// ============================================================================
// Payline
// ============================================================================

/// A styled path through one cell per column.
///
/// The point list is derived state: it is empty until [`Payline::build`]
/// succeeds and is cleared by anything that would make it stale. A payline
/// owns at most one renderer handle.
///
/// The renderer is not reachable from `Drop`, so a rendered payline must be
/// given back with [`Payline::release`] (or [`PaylineSet::clear`] for a
/// whole set) before it goes away. Dropping one that still holds a handle
/// logs a warning and fails a debug assertion.
///
/// [`PaylineSet::clear`]: crate::payline_set::PaylineSet::clear
#[derive(Debug)]
pub struct Payline {
    cells: Vec<Cell>,
    style: PaylineStyle,
    start_anchor: Option<PointD>,
    end_anchor: Option<PointD>,
    enabled: bool,
    points: Vec<PointD>,
    handle: Option<LineHandle>,
    vertex_index: usize,
}

impl Payline {
    pub fn new(cells: Vec<Cell>, style: PaylineStyle) -> Self {
        Self {
            cells,
            style,
            start_anchor: None,
            end_anchor: None,
            enabled: true,
            points: Vec::new(),
            handle: None,
            vertex_index: 0,
        }
    }

    pub fn with_anchors(mut self, start: Option<PointD>, end: Option<PointD>) -> Self {
        self.start_anchor = start;
        self.end_anchor = end;
        self.points.clear();
        self
    }

    /// A fresh, unbuilt payline with this one's style, anchors and enabled
    /// flag over a different cell sequence. Points and handle are not
    /// carried over.
    pub fn with_cells(&self, cells: Vec<Cell>) -> Payline {
        Payline {
            cells,
            style: self.style,
            start_anchor: self.start_anchor,
            end_anchor: self.end_anchor,
            enabled: self.enabled,
            points: Vec::new(),
            handle: None,
            vertex_index: 0,
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn style(&self) -> &PaylineStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: PaylineStyle) {
        self.style = style;
        self.points.clear();
    }

    pub fn start_anchor(&self) -> Option<PointD> {
        self.start_anchor
    }

    pub fn end_anchor(&self) -> Option<PointD> {
        self.end_anchor
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Points of the last successful build; empty when unbuilt or stale.
    pub fn points(&self) -> &[PointD] {
        &self.points
    }

    pub fn is_built(&self) -> bool {
        !self.points.is_empty()
    }

    /// Consecutive point pairs, one per drawn segment.
    pub fn segments(&self) -> impl Iterator<Item = (PointD, PointD)> + '_ {
        self.points.chunks_exact(2).map(|s| (s[0], s[1]))
    }

    pub fn handle(&self) -> Option<&LineHandle> {
        self.handle.as_ref()
    }

    /// Recompute the point list. On failure the previous points are cleared
    /// and nothing partial is kept.
    ///
    /// Building never touches the renderer, so a line rendered from earlier
    /// points stays live after a failed build. The next [`Payline::render`]
    /// or [`Payline::release`] removes it.
    pub fn build(&mut self) -> Result<&[PointD]> {
        match build_path(
            &self.cells,
            self.style.width,
            self.start_anchor,
            self.end_anchor,
        ) {
            Ok(points) => {
                tracing::trace!(
                    cells = self.cells.len(),
                    points = points.len(),
                    length = discrete_length(&points),
                    "payline built"
                );
                self.points = points;
                self.vertex_index = 0;
                Ok(&self.points)
            }
            Err(e) => {
                self.points.clear();
                Err(e)
            }
        }
    }

    /// Replace the rendered line: the old handle is released before the new
    /// one is created. Unbuilt or disabled paylines end up with no handle.
    pub fn render<R: LineRenderer + ?Sized>(&mut self, renderer: &mut R, draw_order: i32) {
        self.release(renderer);
        if !self.enabled || self.points.is_empty() {
            return;
        }
        self.handle = Some(renderer.create(
            &self.points,
            self.style.width,
            self.style.color,
            draw_order,
        ));
    }

    /// Give the handle back to the renderer. No-op without one.
    pub fn release<R: LineRenderer + ?Sized>(&mut self, renderer: &mut R) {
        if let Some(handle) = self.handle.take() {
            renderer.destroy(handle);
        }
    }
}

impl VertexSource for Payline {
    fn rewind(&mut self, _path_id: u32) {
        self.vertex_index = 0;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        discrete_vertex(&self.points, &mut self.vertex_index, x, y)
    }
}

impl Drop for Payline {
    fn drop(&mut self) {
        if self.handle.is_some() {
            tracing::warn!(cells = self.cells.len(), "payline dropped with a live line");
            debug_assert!(
                std::thread::panicking(),
                "payline dropped without release; call Payline::release or PaylineSet::clear"
            );
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
