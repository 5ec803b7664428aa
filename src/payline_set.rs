//! Ordered collections of paylines that are rebuilt as a unit.
//!
//! A rebuild either replaces the whole set or changes nothing: new paylines
//! are built before any old handle is released.

use crate::cell::Cell;
use crate::error::Result;
use crate::grid::Grid;
use crate::payline::Payline;
use crate::renderer::{LineHandle, LineRenderer};

/// The paylines currently shown, in insertion order.
///
/// Call [`PaylineSet::clear`] before dropping a rendered set; its paylines
/// cannot reach the renderer on their own.
#[derive(Debug, Default)]
pub struct PaylineSet {
    paylines: Vec<Payline>,
}

/// Stacking order of the payline at `index`: its explicit draw order, or
/// its position in the set.
fn effective_order(index: usize, payline: &Payline) -> i32 {
    payline
        .style()
        .draw_order
        .unwrap_or_else(|| i32::try_from(index).unwrap_or(i32::MAX))
}

impl PaylineSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paylines(&self) -> &[Payline] {
        &self.paylines
    }

    pub fn len(&self) -> usize {
        self.paylines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paylines.is_empty()
    }

    /// `(index, effective draw order)` pairs, back to front. Equal orders
    /// keep insertion order, so the later payline ends up on top.
    pub fn draw_sequence(&self) -> Vec<(usize, i32)> {
        let mut seq: Vec<(usize, i32)> = self
            .paylines
            .iter()
            .enumerate()
            .map(|(i, p)| (i, effective_order(i, p)))
            .collect();
        seq.sort_by_key(|&(_, order)| order);
        seq
    }

    /// Handles of every rendered payline, in insertion order.
    pub fn live_handles(&self) -> Vec<&LineHandle> {
        self.paylines.iter().filter_map(|p| p.handle()).collect()
    }

    /// Replace the set with `paylines`.
    ///
    /// Every new payline is built first. If any build fails, the new
    /// paylines are dropped, the current set keeps its points and handles
    /// and the error is returned. Otherwise the old handles are released
    /// and each enabled new payline is rendered in draw sequence.
    pub fn rebuild<R: LineRenderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        mut paylines: Vec<Payline>,
    ) -> Result<()> {
        for i in 0..paylines.len() {
            if let Err(e) = paylines[i].build() {
                tracing::warn!(index = i, error = %e, "payline rebuild rejected");
                for rejected in &mut paylines {
                    rejected.release(renderer);
                }
                return Err(e);
            }
        }

        self.clear(renderer);
        self.paylines = paylines;
        for (i, order) in self.draw_sequence() {
            self.paylines[i].render(renderer, order);
        }

        tracing::debug!(
            paylines = self.paylines.len(),
            rendered = self.live_handles().len(),
            "payline set rebuilt"
        );
        Ok(())
    }

    /// Rebuild with every cell's visibility re-derived by `visible`.
    ///
    /// Paylines are copied by value; the current ones are only touched once
    /// the copies have built successfully.
    pub fn set_visibility<R, F>(&mut self, renderer: &mut R, mut visible: F) -> Result<()>
    where
        R: LineRenderer + ?Sized,
        F: FnMut(&Cell) -> bool,
    {
        let next = self
            .paylines
            .iter()
            .map(|p| {
                let cells = p
                    .cells()
                    .iter()
                    .map(|c| c.with_visibility(visible(c)))
                    .collect();
                p.with_cells(cells)
            })
            .collect();
        self.rebuild(renderer, next)
    }

    /// Take visibility from a grid generation, matching cells by id. Cells
    /// the grid does not know keep their current visibility.
    pub fn apply_grid<R: LineRenderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        grid: &Grid,
    ) -> Result<()> {
        self.set_visibility(renderer, |c| {
            grid.cell(c.id().row, c.id().column)
                .map_or(c.is_visible(), |g| g.is_visible())
        })
    }

    /// Release every handle and empty the set.
    pub fn clear<R: LineRenderer + ?Sized>(&mut self, renderer: &mut R) {
        for payline in &mut self.paylines {
            payline.release(renderer);
        }
        self.paylines.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::{PointD, RectD};
    use crate::color::Rgba8;
    use crate::payline::PaylineStyle;
    use crate::renderer::MemoryRenderer;

    fn grid() -> Grid {
        Grid::build(RectD::new(0.0, 0.0, 300.0, 300.0), 3, 3, 0.1, 0.1).unwrap()
    }

    fn row_line(g: &Grid, row: usize, style: PaylineStyle) -> Payline {
        let cells = (0..g.columns()).map(|c| *g.cell(row, c).unwrap()).collect();
        Payline::new(cells, style)
    }

    fn broken_line(g: &Grid) -> Payline {
        // Starting on the first center leaves nothing to intersect.
        row_line(g, 0, PaylineStyle::default())
            .with_anchors(Some(g.cell(0, 0).unwrap().center()), None)
    }

    #[test]
    fn test_rebuild_renders_every_enabled_line() {
        let g = grid();
        let mut r = MemoryRenderer::new();
        let mut set = PaylineSet::new();
        let mut hidden = row_line(&g, 2, PaylineStyle::default());
        hidden.set_enabled(false);
        set.rebuild(
            &mut r,
            vec![
                row_line(&g, 0, PaylineStyle::default()),
                row_line(&g, 1, PaylineStyle::default()),
                hidden,
            ],
        )
        .unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.paylines().iter().all(|p| p.is_built()));
        assert_eq!(set.live_handles().len(), 2);
        assert_eq!(r.live_count(), 2);
        set.clear(&mut r);
    }

    #[test]
    fn test_rebuild_releases_previous_handles() {
        let g = grid();
        let mut r = MemoryRenderer::new();
        let mut set = PaylineSet::new();
        set.rebuild(&mut r, vec![row_line(&g, 0, PaylineStyle::default())])
            .unwrap();
        set.rebuild(
            &mut r,
            vec![
                row_line(&g, 1, PaylineStyle::default()),
                row_line(&g, 2, PaylineStyle::default()),
            ],
        )
        .unwrap();
        assert_eq!(r.destroyed_count(), 1);
        assert_eq!(r.live_count(), 2);
        set.clear(&mut r);
    }

    #[test]
    fn test_rebuild_with_nothing_leaves_no_handles() {
        let g = grid();
        let mut r = MemoryRenderer::new();
        let mut set = PaylineSet::new();
        set.rebuild(&mut r, vec![row_line(&g, 0, PaylineStyle::default())])
            .unwrap();
        set.rebuild(&mut r, Vec::new()).unwrap();
        assert!(set.is_empty());
        assert_eq!(r.live_count(), 0);
    }

    #[test]
    fn test_failed_rebuild_keeps_old_set() {
        let g = grid();
        let mut r = MemoryRenderer::new();
        let mut set = PaylineSet::new();
        set.rebuild(&mut r, vec![row_line(&g, 0, PaylineStyle::default())])
            .unwrap();
        let before: Vec<PointD> = set.paylines()[0].points().to_vec();

        let err = set
            .rebuild(
                &mut r,
                vec![row_line(&g, 1, PaylineStyle::default()), broken_line(&g)],
            )
            .unwrap_err();
        assert!(matches!(err, crate::PaylineError::NoIntersection { .. }));
        assert_eq!(set.len(), 1);
        assert_eq!(set.paylines()[0].points(), &before[..]);
        assert_eq!(set.live_handles().len(), 1);
        assert_eq!(r.live_count(), 1);
        assert_eq!(r.destroyed_count(), 0);
        set.clear(&mut r);
    }

    #[test]
    fn test_draw_order_and_ties() {
        let g = grid();
        let mut r = MemoryRenderer::new();
        let mut set = PaylineSet::new();
        let style = |w: f64| PaylineStyle::new(w, Rgba8::RED);
        set.rebuild(
            &mut r,
            vec![
                row_line(&g, 0, style(1.0).with_draw_order(10)),
                row_line(&g, 1, style(2.0)),
                row_line(&g, 2, style(3.0).with_draw_order(1)),
                row_line(&g, 0, style(4.0)),
            ],
        )
        .unwrap();
        // Effective orders: 10, 1, 1, 3.
        assert_eq!(set.draw_sequence(), vec![(1, 1), (2, 1), (3, 3), (0, 10)]);
        let widths: Vec<f64> = r.draw_list().iter().map(|l| l.width).collect();
        assert_eq!(widths, vec![2.0, 3.0, 4.0, 1.0]);
        set.clear(&mut r);
    }

    #[test]
    fn test_set_visibility_rebuilds_copies() {
        let g = grid();
        let mut r = MemoryRenderer::new();
        let mut set = PaylineSet::new();
        set.rebuild(&mut r, vec![row_line(&g, 1, PaylineStyle::default())])
            .unwrap();
        let center = g.cell(1, 1).unwrap().center();
        assert!(set.paylines()[0].points().contains(&center));

        set.set_visibility(&mut r, |c| c.id().column != 1).unwrap();
        let line = &set.paylines()[0];
        assert!(!line.cells()[1].is_visible());
        assert!(!line.points().contains(&center));
        assert_eq!(r.live_count(), 1);
        assert_eq!(r.destroyed_count(), 1);
        set.clear(&mut r);
    }

    #[test]
    fn test_apply_grid() {
        let g = grid();
        let mut r = MemoryRenderer::new();
        let mut set = PaylineSet::new();
        set.rebuild(&mut r, vec![row_line(&g, 0, PaylineStyle::default())])
            .unwrap();
        let next = g.with_visibility(|c| c.id().column != 2);
        set.apply_grid(&mut r, &next).unwrap();
        let vis: Vec<bool> = set.paylines()[0]
            .cells()
            .iter()
            .map(|c| c.is_visible())
            .collect();
        assert_eq!(vis, vec![true, true, false]);
        set.clear(&mut r);
    }

    #[test]
    fn test_clear() {
        let g = grid();
        let mut r = MemoryRenderer::new();
        let mut set = PaylineSet::new();
        set.rebuild(
            &mut r,
            vec![
                row_line(&g, 0, PaylineStyle::default()),
                row_line(&g, 1, PaylineStyle::default()),
            ],
        )
        .unwrap();
        set.clear(&mut r);
        set.clear(&mut r);
        assert!(set.is_empty());
        assert_eq!(r.live_count(), 0);
        assert_eq!(r.destroyed_count(), 2);
    }
}
