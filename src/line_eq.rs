//! Infinite lines in implicit form `Ax + By + C = 0`.

use crate::basics::PointD;

/// An infinite line `a·x + b·y + c = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineEq {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// Result of intersecting two lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection {
    Point(PointD),
    /// The lines never meet (or coincide). Callers treat this as infinitely
    /// far away, not as an error.
    Parallel,
}

impl Intersection {
    pub fn point(self) -> Option<PointD> {
        match self {
            Intersection::Point(p) => Some(p),
            Intersection::Parallel => None,
        }
    }
}

impl LineEq {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Line through two points.
    pub fn from_points(p1: PointD, p2: PointD) -> Self {
        Self {
            a: p1.y - p2.y,
            b: p2.x - p1.x,
            c: p1.x * p2.y - p2.x * p1.y,
        }
    }

    /// Line through `p` running along `d`.
    pub fn from_point_and_direction(p: PointD, d: PointD) -> Self {
        Self::from_points(p, p + d)
    }

    /// Residual `a·x + b·y + c`; zero for points on the line.
    #[inline]
    pub fn eval(&self, p: PointD) -> f64 {
        self.a * p.x + self.b * p.y + self.c
    }

    /// Built from two coinciding points, so it describes no line at all.
    pub fn is_degenerate(&self) -> bool {
        self.a == 0.0 && self.b == 0.0
    }

    /// Closed-form solution of the 2x2 system. Only an exactly zero
    /// determinant counts as parallel.
    pub fn intersect(&self, other: &LineEq) -> Intersection {
        let den = self.a * other.b - other.a * self.b;
        if den == 0.0 {
            return Intersection::Parallel;
        }
        let x = (self.b * other.c - other.b * self.c) / den;
        let y = (other.a * self.c - self.a * other.c) / den;
        Intersection::Point(PointD::new(x, y))
    }
}

// ============================================================================
// Tests
// ============================================================================
