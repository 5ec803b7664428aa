//! # payline
//!
//! Geometry for slot-machine paylines: lay out a grid of cells, pick one
//! cell per column, and turn the pick into a discrete polyline that enters
//! and leaves every cell through its padded border.
//!
//! Coordinates are y-up: row 0 is the bottom row and a cell's top edge is
//! its larger-y edge.
//!
//! ## Architecture
//!
//! 1. **Grid** — [`grid::Grid`] divides a rectangle into cells with margin
//!    and padding
//! 2. **Border resolution** — [`cell_border`] intersects implicit lines
//!    ([`line_eq::LineEq`]) with a cell's border sides
//! 3. **Path building** — [`payline::build_path`] emits point pairs, with
//!    short stumps instead of crossings for hidden cells
//! 4. **Rendering** — [`payline_set::PaylineSet`] rebuilds all lines
//!    atomically and hands them to a [`renderer::LineRenderer`] in draw order
//!
//! Random selection, animated transitions and JSON configuration sit on top.
//!
//! ```
//! use payline::{Grid, MemoryRenderer, Payline, PaylineSet, PaylineStyle, RectD};
//!
//! let grid = Grid::build(RectD::new(0.0, 0.0, 500.0, 300.0), 3, 5, 0.05, 0.1).unwrap();
//! let middle = grid.column(0).len() / 2;
//! let cells = (0..grid.columns()).map(|c| *grid.cell(middle, c).unwrap()).collect();
//!
//! let mut renderer = MemoryRenderer::new();
//! let mut set = PaylineSet::new();
//! set.rebuild(&mut renderer, vec![Payline::new(cells, PaylineStyle::default())]).unwrap();
//! assert_eq!(renderer.live_count(), 1);
//! set.clear(&mut renderer);
//! ```

// Foundation types & math
pub mod basics;
pub mod color;
pub mod error;
pub mod math;

// Geometry
pub mod cell;
pub mod cell_border;
pub mod grid;
pub mod line_eq;

// Paths & rendering
pub mod line_history;
pub mod payline;
pub mod payline_set;
pub mod renderer;

// Selection, animation, configuration
pub mod config;
pub mod selection;
pub mod transition;

pub use basics::{PointD, RectD, VertexSource};
pub use cell::{Cell, CellId, Side};
pub use color::Rgba8;
pub use config::SlotConfig;
pub use error::{PaylineError, Result};
pub use grid::Grid;
pub use payline::{build_path, Payline, PaylineStyle};
pub use payline_set::PaylineSet;
pub use renderer::{LineHandle, LineRenderer, MemoryRenderer};
