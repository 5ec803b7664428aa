//! Foundation types: points, rectangles and the vertex source protocol.
//!
//! Coordinates are y-up throughout the crate: a rectangle's `y2` edge is its
//! top and `y1` its bottom.

use core::ops::{Add, Mul, Sub};

// ============================================================================
// Point
// ============================================================================

/// A 2D point (also used as a 2D vector).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointBase<T: Copy> {
    pub x: T,
    pub y: T,
}

impl<T: Copy> PointBase<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

pub type PointD = PointBase<f64>;

impl PointD {
    /// Dot product, treating both points as vectors.
    #[inline]
    pub fn dot(self, other: PointD) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Squared length of the vector.
    #[inline]
    pub fn sq_length(self) -> f64 {
        self.dot(self)
    }

    /// Squared distance to `other`.
    #[inline]
    pub fn sq_distance(self, other: PointD) -> f64 {
        (other - self).sq_length()
    }

    /// Linear interpolation from `self` to `other` by `k` (not clamped).
    #[inline]
    pub fn lerp(self, other: PointD, k: f64) -> PointD {
        PointD::new(self.x + (other.x - self.x) * k, self.y + (other.y - self.y) * k)
    }

    /// Both coordinates are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for PointD {
    type Output = PointD;
    #[inline]
    fn add(self, rhs: PointD) -> PointD {
        PointD::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for PointD {
    type Output = PointD;
    #[inline]
    fn sub(self, rhs: PointD) -> PointD {
        PointD::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for PointD {
    type Output = PointD;
    #[inline]
    fn mul(self, k: f64) -> PointD {
        PointD::new(self.x * k, self.y * k)
    }
}

// ============================================================================
// Rect
// ============================================================================

/// A rectangle defined by two corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect<T: Copy> {
    pub x1: T,
    pub y1: T,
    pub x2: T,
    pub y2: T,
}

impl<T: Copy + PartialOrd> Rect<T> {
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Returns `true` if the point (x, y) is inside the rectangle.
    pub fn hit_test(&self, x: T, y: T) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }

    /// Returns `true` if the interiors of the two rectangles intersect.
    /// Rectangles that only touch along an edge do not.
    pub fn overlaps_interior(&self, r: &Self) -> bool {
        !(r.x1 >= self.x2 || r.x2 <= self.x1 || r.y1 >= self.y2 || r.y2 <= self.y1)
    }
}

/// Rectangle with `f64` coordinates.
pub type RectD = Rect<f64>;

impl RectD {
    /// Rectangle of the given size centered on `center`.
    pub fn from_center(center: PointD, width: f64, height: f64) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        Self::new(center.x - hw, center.y - hh, center.x + hw, center.y + hh)
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> PointD {
        PointD::new((self.x1 + self.x2) * 0.5, (self.y1 + self.y2) * 0.5)
    }

    /// Grow (or shrink, for negative `d`) every edge by `d`.
    pub fn inflate(&self, d: f64) -> Self {
        Self::new(self.x1 - d, self.y1 - d, self.x2 + d, self.y2 + d)
    }

    /// Corners in the order top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [PointD; 4] {
        [
            PointD::new(self.x1, self.y2),
            PointD::new(self.x2, self.y2),
            PointD::new(self.x2, self.y1),
            PointD::new(self.x1, self.y1),
        ]
    }
}

// ============================================================================
// Path commands
// ============================================================================

pub const PATH_CMD_STOP: u32 = 0;
pub const PATH_CMD_MOVE_TO: u32 = 1;
pub const PATH_CMD_LINE_TO: u32 = 2;

/// Returns `true` if `c` is the stop command.
#[inline]
pub fn is_stop(c: u32) -> bool {
    c == PATH_CMD_STOP
}

/// Returns `true` if `c` is a move_to command.
#[inline]
pub fn is_move_to(c: u32) -> bool {
    c == PATH_CMD_MOVE_TO
}

/// Returns `true` if `c` is a line_to command.
#[inline]
pub fn is_line_to(c: u32) -> bool {
    c == PATH_CMD_LINE_TO
}

/// Returns `true` if `c` carries a coordinate.
#[inline]
pub fn is_vertex(c: u32) -> bool {
    is_move_to(c) || is_line_to(c)
}

// ============================================================================
// VertexSource trait
// ============================================================================

/// A rewindable stream of path vertices.
///
/// Paylines and grid outlines implement this so any consumer that walks
/// `move_to`/`line_to` commands can draw them without knowing their origin.
pub trait VertexSource {
    /// Reset the vertex source to the beginning of the given path.
    fn rewind(&mut self, path_id: u32);

    /// Return the next vertex. Writes coordinates to `x` and `y`, returns a
    /// path command. Returns `PATH_CMD_STOP` when iteration is complete.
    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32;
}

/// Blanket implementation so `&mut T` can be used as a VertexSource.
impl<T: VertexSource> VertexSource for &mut T {
    fn rewind(&mut self, path_id: u32) {
        (*self).rewind(path_id);
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        (*self).vertex(x, y)
    }
}

/// Vertex source over a flat list of points taken in consecutive pairs,
/// each pair being an independent segment (`move_to`, `line_to`).
///
/// A trailing unpaired point is ignored.
pub struct DiscreteSegments<'a> {
    points: &'a [PointD],
    index: usize,
}

impl<'a> DiscreteSegments<'a> {
    pub fn new(points: &'a [PointD]) -> Self {
        Self { points, index: 0 }
    }
}

impl VertexSource for DiscreteSegments<'_> {
    fn rewind(&mut self, _path_id: u32) {
        self.index = 0;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        discrete_vertex(self.points, &mut self.index, x, y)
    }
}

/// One step over `points` read as independent pairs: even indices move,
/// odd indices draw. A trailing unpaired point is never emitted.
pub(crate) fn discrete_vertex(
    points: &[PointD],
    index: &mut usize,
    x: &mut f64,
    y: &mut f64,
) -> u32 {
    let paired = points.len() & !1;
    if *index >= paired {
        return PATH_CMD_STOP;
    }
    let p = points[*index];
    *x = p.x;
    *y = p.y;
    let cmd = if *index % 2 == 0 {
        PATH_CMD_MOVE_TO
    } else {
        PATH_CMD_LINE_TO
    };
    *index += 1;
    cmd
}

// ============================================================================
// Tests
// ============================================================================
