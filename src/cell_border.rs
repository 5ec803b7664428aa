//! Cell border resolution.
//!
//! A cell's padded rectangle is described by four implicit lines, one per
//! side. Paths enter and leave cells where a ray crosses those
//! borders; the nearest crossing ahead of a reference point wins.
//!
//! Paths always flow left to right through the columns, so entry never uses
//! the right border and exit never uses the left one.

use crate::basics::PointD;
use crate::cell::{Cell, Side, SideSet};
use crate::error::{PaylineError, Result};
use crate::line_eq::{Intersection, LineEq};

/// The four border lines of a rectangle, indexed by side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderLines {
    lines: [LineEq; 4],
}

impl BorderLines {
    pub fn get(&self, side: Side) -> &LineEq {
        &self.lines[side.index() as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Side, LineEq)> + '_ {
        Side::ALL.into_iter().map(move |s| (s, *self.get(s)))
    }
}

/// A border crossing: which side, and where.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderHit {
    pub side: Side,
    pub point: PointD,
}

/// Border lines of the cell's padded rectangle grown outward by `offset`.
///
/// A positive offset tests just outside the visible border, which is where
/// stumps for hidden cells start.
pub fn border_lines(cell: &Cell, offset: f64) -> BorderLines {
    let r = cell.padded_rect().inflate(offset);
    let [top_left, top_right, bottom_right, bottom_left] = r.corners();
    BorderLines {
        lines: [
            LineEq::from_points(top_left, top_right),
            LineEq::from_points(bottom_right, top_right),
            LineEq::from_points(bottom_left, bottom_right),
            LineEq::from_points(bottom_left, top_left),
        ],
    }
}

/// Nearest crossing of `ray` with one of the `allowed` borders.
///
/// Candidates lying behind `reference` (non-positive dot product of
/// `candidate - reference` with `direction`) are dropped, as are parallel
/// borders. Among the rest the smallest squared distance to `reference`
/// wins; exact ties keep the first side in `Side::ALL` order.
pub fn nearest_intersection(
    cell: &Cell,
    ray: &LineEq,
    reference: PointD,
    direction: PointD,
    allowed: SideSet,
    offset: f64,
) -> Result<BorderHit> {
    let borders = border_lines(cell, offset);
    let mut best: Option<(f64, BorderHit)> = None;

    for side in allowed.iter() {
        let point = match ray.intersect(borders.get(side)) {
            Intersection::Point(p) => p,
            Intersection::Parallel => continue,
        };
        let delta = point - reference;
        if delta.dot(direction) <= 0.0 {
            continue;
        }
        let dist = delta.sq_length();
        match best {
            Some((d, _)) if d <= dist => {}
            _ => best = Some((dist, BorderHit { side, point })),
        }
    }

    match best {
        Some((_, hit)) => Ok(hit),
        None => {
            tracing::debug!(cell = %cell.id(), ?reference, ?direction, "no border intersection");
            Err(PaylineError::NoIntersection { cell: cell.id() })
        }
    }
}

/// Where a path coming from the left crosses into `cell`. The right border
/// is never a candidate.
pub fn external_entry(
    cell: &Cell,
    ray: &LineEq,
    reference: PointD,
    direction: PointD,
    offset: f64,
) -> Result<BorderHit> {
    nearest_intersection(
        cell,
        ray,
        reference,
        direction,
        SideSet::all().without(Side::Right),
        offset,
    )
}

/// Where a path leaves `cell` toward the next column. The left border is
/// never a candidate.
pub fn internal_exit(
    cell: &Cell,
    ray: &LineEq,
    reference: PointD,
    direction: PointD,
    offset: f64,
) -> Result<BorderHit> {
    nearest_intersection(
        cell,
        ray,
        reference,
        direction,
        SideSet::all().without(Side::Left),
        offset,
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> PointD {
        PointD::new(x, y)
    }

    // Padded rectangle spans x 10..90, y 20..80.
    fn cell() -> Cell {
        Cell::new(p(50.0, 50.0), 100.0, 80.0, 10.0, true).unwrap()
    }

    fn corner(lines: &BorderLines, a: Side, b: Side) -> PointD {
        lines.get(a).intersect(lines.get(b)).point().unwrap()
    }

    #[test]
    fn test_border_line_corners() {
        let lines = border_lines(&cell(), 0.0);
        assert_eq!(corner(&lines, Side::Top, Side::Left), p(10.0, 80.0));
        assert_eq!(corner(&lines, Side::Top, Side::Right), p(90.0, 80.0));
        assert_eq!(corner(&lines, Side::Bottom, Side::Right), p(90.0, 20.0));
        assert_eq!(corner(&lines, Side::Bottom, Side::Left), p(10.0, 20.0));
        // Opposite sides never meet.
        assert_eq!(
            lines.get(Side::Top).intersect(lines.get(Side::Bottom)),
            Intersection::Parallel
        );
        assert_eq!(lines.iter().count(), 4);
    }

    #[test]
    fn test_border_lines_offset() {
        let lines = border_lines(&cell(), 5.0);
        assert_eq!(corner(&lines, Side::Top, Side::Left), p(5.0, 85.0));
        assert_eq!(corner(&lines, Side::Bottom, Side::Right), p(95.0, 15.0));
    }

    #[test]
    fn test_nearest_straight_ray() {
        let c = cell();
        let ray = LineEq::from_points(c.center(), p(0.0, 50.0));
        let hit =
            nearest_intersection(&c, &ray, c.center(), p(-1.0, 0.0), SideSet::all(), 0.0)
                .unwrap();
        assert_eq!(hit, BorderHit { side: Side::Left, point: p(10.0, 50.0) });

        let hit =
            nearest_intersection(&c, &ray, c.center(), p(1.0, 0.0), SideSet::all(), 0.0)
                .unwrap();
        assert_eq!(hit, BorderHit { side: Side::Right, point: p(90.0, 50.0) });
    }

    #[test]
    fn test_nearest_diagonal_prefers_closer_side() {
        let c = cell();
        let target = p(0.0, 100.0);
        let ray = LineEq::from_points(c.center(), target);
        let hit = nearest_intersection(
            &c,
            &ray,
            c.center(),
            target - c.center(),
            SideSet::all(),
            0.0,
        )
        .unwrap();
        assert_eq!(hit.side, Side::Top);
        assert!((hit.point.x - 20.0).abs() < 1e-9);
        assert!((hit.point.y - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_exact_corner_tie_keeps_first_side() {
        let c = cell();
        let ray = LineEq::from_points(c.center(), p(10.0, 80.0));
        let hit = nearest_intersection(
            &c,
            &ray,
            c.center(),
            p(-40.0, 30.0),
            SideSet::all(),
            0.0,
        )
        .unwrap();
        assert_eq!(hit, BorderHit { side: Side::Top, point: p(10.0, 80.0) });
    }

    #[test]
    fn test_external_entry_never_uses_right() {
        let c = cell();
        let ray = LineEq::from_points(c.center(), p(200.0, 50.0));
        // Heading right: the only forward border is the excluded one.
        let err = external_entry(&c, &ray, c.center(), p(1.0, 0.0), 0.0).unwrap_err();
        assert!(matches!(err, PaylineError::NoIntersection { .. }));

        let hit = internal_exit(&c, &ray, c.center(), p(1.0, 0.0), 0.0).unwrap();
        assert_eq!(hit.side, Side::Right);
    }

    #[test]
    fn test_internal_exit_never_uses_left() {
        let c = cell();
        let ray = LineEq::from_points(c.center(), p(-200.0, 50.0));
        assert!(internal_exit(&c, &ray, c.center(), p(-1.0, 0.0), 0.0).is_err());
        let hit = external_entry(&c, &ray, c.center(), p(-1.0, 0.0), 0.0).unwrap();
        assert_eq!(hit, BorderHit { side: Side::Left, point: p(10.0, 50.0) });
    }

    #[test]
    fn test_offset_moves_hit_outward() {
        let c = cell();
        let ray = LineEq::from_points(c.center(), p(0.0, 50.0));
        let hit = external_entry(&c, &ray, c.center(), p(-1.0, 0.0), 3.0).unwrap();
        assert_eq!(hit.point, p(7.0, 50.0));
    }

    #[test]
    fn test_empty_side_set_has_no_intersection() {
        let c = cell();
        let ray = LineEq::from_points(c.center(), p(0.0, 50.0));
        assert!(
            nearest_intersection(&c, &ray, c.center(), p(-1.0, 0.0), SideSet::empty(), 0.0)
                .is_err()
        );
    }
}
