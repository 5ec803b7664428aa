//! Grid cells and the four sides of their borders.

use std::fmt;

use crate::basics::{PointD, RectD};
use crate::error::{PaylineError, Result};

// ============================================================================
// Side
// ============================================================================

/// One border of a cell rectangle. Top is the larger-y edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// Every side, in border-resolution iteration order.
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub fn index(self) -> u8 {
        match self {
            Side::Top => 0,
            Side::Right => 1,
            Side::Bottom => 2,
            Side::Left => 3,
        }
    }

    /// Unit vector a stump is drawn along after hitting this side.
    ///
    /// It points back toward the cell, so a stump started on an expanded
    /// border stops short of the real one.
    pub fn stump_direction(self) -> PointD {
        match self {
            Side::Top => PointD::new(0.0, -1.0),
            Side::Bottom => PointD::new(0.0, 1.0),
            Side::Left => PointD::new(1.0, 0.0),
            Side::Right => PointD::new(-1.0, 0.0),
        }
    }
}

impl TryFrom<u8> for Side {
    type Error = PaylineError;

    fn try_from(v: u8) -> Result<Side> {
        match v {
            0 => Ok(Side::Top),
            1 => Ok(Side::Right),
            2 => Ok(Side::Bottom),
            3 => Ok(Side::Left),
            _ => Err(PaylineError::InvalidSide(v)),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        };
        f.write_str(s)
    }
}

/// A subset of the four sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SideSet(u8);

impl SideSet {
    pub const fn all() -> Self {
        SideSet(0b1111)
    }

    pub const fn empty() -> Self {
        SideSet(0)
    }

    pub fn with(self, side: Side) -> Self {
        SideSet(self.0 | (1 << side.index()))
    }

    pub fn without(self, side: Side) -> Self {
        SideSet(self.0 & !(1 << side.index()))
    }

    pub fn contains(self, side: Side) -> bool {
        self.0 & (1 << side.index()) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in `Side::ALL` order.
    pub fn iter(self) -> impl Iterator<Item = Side> {
        Side::ALL.into_iter().filter(move |s| self.contains(*s))
    }
}

impl Default for SideSet {
    fn default() -> Self {
        Self::all()
    }
}

// ============================================================================
// Cell
// ============================================================================

/// Position of a cell in its grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct CellId {
    pub row: usize,
    pub column: usize,
}

impl CellId {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// A rectangle descriptor: center, size, inner padding and visibility.
///
/// Cells are values. Changing visibility yields a new cell; the geometry
/// never changes after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    id: CellId,
    center: PointD,
    width: f64,
    height: f64,
    padding: f64,
    visible: bool,
}

impl Cell {
    /// Create a cell, checking that the padded rectangle stays inside the
    /// outer one.
    pub fn new(center: PointD, width: f64, height: f64, padding: f64, visible: bool) -> Result<Self> {
        if !center.is_finite() {
            return Err(PaylineError::InvalidConfiguration(format!(
                "cell center must be finite, got {center:?}"
            )));
        }
        if !(width.is_finite() && height.is_finite() && padding.is_finite()) {
            return Err(PaylineError::InvalidConfiguration(
                "cell dimensions must be finite".into(),
            ));
        }
        if width < 0.0 || height < 0.0 || padding < 0.0 {
            return Err(PaylineError::InvalidConfiguration(format!(
                "negative cell dimension: width={width} height={height} padding={padding}"
            )));
        }
        if padding >= width.min(height) / 2.0 {
            return Err(PaylineError::InvalidConfiguration(format!(
                "padding {padding} leaves no room inside a {width}x{height} cell"
            )));
        }
        Ok(Self {
            id: CellId::default(),
            center,
            width,
            height,
            padding,
            visible,
        })
    }

    /// Same cell tagged with its grid position.
    pub fn at(self, row: usize, column: usize) -> Self {
        Self {
            id: CellId::new(row, column),
            ..self
        }
    }

    /// Copy of this cell with the given visibility.
    pub fn with_visibility(&self, visible: bool) -> Self {
        Self { visible, ..*self }
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn center(&self) -> PointD {
        self.center
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Outer rectangle: center ± (width/2, height/2).
    pub fn rect(&self) -> RectD {
        RectD::from_center(self.center, self.width, self.height)
    }

    /// Rectangle shrunk by the padding on every side.
    pub fn padded_rect(&self) -> RectD {
        self.rect().inflate(-self.padding)
    }

    /// Middle of the outer rectangle's left edge.
    pub fn left_middle(&self) -> PointD {
        PointD::new(self.center.x - self.width / 2.0, self.center.y)
    }

    /// Middle of the outer rectangle's right edge.
    pub fn right_middle(&self) -> PointD {
        PointD::new(self.center.x + self.width / 2.0, self.center.y)
    }

    /// Geometry interpolated between `a` and `b` by `k` in `[0, 1]`.
    ///
    /// Identity and visibility are taken from `a`; the result keeps the
    /// padding invariant because both inputs satisfy it.
    pub fn lerp(a: &Cell, b: &Cell, k: f64) -> Cell {
        let mix = |x: f64, y: f64| x + (y - x) * k;
        Cell {
            id: a.id,
            center: a.center.lerp(b.center, k),
            width: mix(a.width, b.width),
            height: mix(a.height, b.height),
            padding: mix(a.padding, b.padding),
            visible: a.visible,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
