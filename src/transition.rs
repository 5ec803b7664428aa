//! Animated paylines.
//!
//! A transition morphs one cell selection into another over a repeating
//! period. Each time the clock wraps, the selection it was heading to
//! becomes the new start and a fresh target is requested.

use crate::basics::PointD;
use crate::cell::Cell;
use crate::error::{PaylineError, Result};
use crate::math::{clamp01, repeat};
use crate::payline::build_path;

/// Cell-wise interpolation between two selections of equal length.
pub fn lerp_cells(start: &[Cell], end: &[Cell], t: f64) -> Result<Vec<Cell>> {
    if start.is_empty() || end.is_empty() {
        return Err(PaylineError::EmptyPath);
    }
    if start.len() != end.len() {
        return Err(PaylineError::InvalidConfiguration(format!(
            "cannot interpolate {} cells into {}",
            start.len(),
            end.len()
        )));
    }
    let t = clamp01(t);
    Ok(start
        .iter()
        .zip(end)
        .map(|(a, b)| Cell::lerp(a, b, t))
        .collect())
}

#[derive(Debug, Clone)]
pub struct Transition {
    start: Vec<Cell>,
    end: Vec<Cell>,
    line_width: f64,
    period: f64,
    phase: f64,
}

impl Transition {
    pub fn new(start: Vec<Cell>, end: Vec<Cell>, line_width: f64) -> Result<Self> {
        // Validates lengths up front.
        lerp_cells(&start, &end, 0.0)?;
        Ok(Self {
            start,
            end,
            line_width,
            period: 1.0,
            phase: 0.0,
        })
    }

    /// Seconds per morph. Must be positive.
    pub fn with_period(mut self, period: f64) -> Result<Self> {
        if !period.is_finite() || period <= 0.0 {
            return Err(PaylineError::InvalidConfiguration(format!(
                "transition period must be positive, got {period}"
            )));
        }
        self.period = period;
        Ok(self)
    }

    pub fn start(&self) -> &[Cell] {
        &self.start
    }

    pub fn end(&self) -> &[Cell] {
        &self.end
    }

    /// Position within the current period, in `[0, 1]`.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Move the clock to `time` and build the path at that point.
    ///
    /// If the phase went backwards the period has wrapped: `next` is asked
    /// for the new target. A failing `next` leaves the transition as it was.
    pub fn advance<F>(&mut self, time: f64, next: F) -> Result<Vec<PointD>>
    where
        F: FnOnce() -> Result<Vec<Cell>>,
    {
        let phase = repeat(time, self.period) / self.period;
        if phase < self.phase {
            let target = next()?;
            lerp_cells(&self.end, &target, 0.0)?;
            self.start = std::mem::replace(&mut self.end, target);
            tracing::trace!(time, "transition wrapped");
        }
        self.phase = phase;
        let cells = lerp_cells(&self.start, &self.end, phase)?;
        build_path(&cells, self.line_width, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::RectD;
    use crate::grid::Grid;

    const EPS: f64 = 1e-9;

    fn grid() -> Grid {
        Grid::build(RectD::new(0.0, 0.0, 300.0, 300.0), 3, 3, 0.1, 0.1).unwrap()
    }

    fn row(g: &Grid, r: usize) -> Vec<Cell> {
        (0..3).map(|c| *g.cell(r, c).unwrap()).collect()
    }

    #[test]
    fn test_lerp_cells() {
        let g = grid();
        let mid = lerp_cells(&row(&g, 0), &row(&g, 2), 0.5).unwrap();
        assert_eq!(mid[1].center(), PointD::new(150.0, 150.0));
        let clamped = lerp_cells(&row(&g, 0), &row(&g, 2), 7.0).unwrap();
        assert_eq!(clamped[0].center(), g.cell(2, 0).unwrap().center());
    }

    #[test]
    fn test_lerp_cells_errors() {
        let g = grid();
        assert!(matches!(
            lerp_cells(&[], &[], 0.5),
            Err(PaylineError::EmptyPath)
        ));
        assert!(matches!(
            lerp_cells(&row(&g, 0), &row(&g, 1)[..2], 0.5),
            Err(PaylineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_advance_without_wrap_keeps_targets() {
        let g = grid();
        let mut t = Transition::new(row(&g, 0), row(&g, 2), 4.0).unwrap();
        let pts = t.advance(0.25, || unreachable!()).unwrap();
        assert_eq!(pts.len(), 20);
        // A quarter of the way from y=50 to y=250.
        assert!((pts[3].y - 100.0).abs() < EPS);
        assert!((t.phase() - 0.25).abs() < EPS);
        t.advance(0.75, || unreachable!()).unwrap();
        assert_eq!(t.start(), &row(&g, 0)[..]);
    }

    #[test]
    fn test_advance_wrap_requests_next() {
        let g = grid();
        let mut t = Transition::new(row(&g, 0), row(&g, 2), 4.0)
            .unwrap()
            .with_period(2.0)
            .unwrap();
        t.advance(1.5, || unreachable!()).unwrap();
        let next = row(&g, 1);
        t.advance(2.5, || Ok(next.clone())).unwrap();
        assert_eq!(t.start(), &row(&g, 2)[..]);
        assert_eq!(t.end(), &next[..]);
        assert!((t.phase() - 0.25).abs() < EPS);
    }

    #[test]
    fn test_failed_next_keeps_state() {
        let g = grid();
        let mut t = Transition::new(row(&g, 0), row(&g, 2), 4.0).unwrap();
        t.advance(0.9, || unreachable!()).unwrap();
        assert!(t.advance(1.1, || Err(PaylineError::EmptyPath)).is_err());
        assert_eq!(t.start(), &row(&g, 0)[..]);
        assert!((t.phase() - 0.9).abs() < EPS);
    }

    #[test]
    fn test_invalid_period() {
        let g = grid();
        let t = Transition::new(row(&g, 0), row(&g, 2), 4.0).unwrap();
        assert!(t.clone().with_period(0.0).is_err());
        assert!(t.with_period(f64::INFINITY).is_err());
    }
}
