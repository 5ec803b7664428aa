// Payline preview library: an SVG scene that acts as a line renderer.
//
// Paylines render into the scene like into any other renderer; the scene
// then serializes its live lines back to front, flipping y so the picture
// matches the y-up layout.

use std::fmt::Write as FmtWrite;
use std::fs;
use std::io;
use std::path::Path;

use payline::basics::{is_move_to, is_stop, DiscreteSegments};
use payline::color::Rgba8;
use payline::renderer::RenderedLine;
use payline::{Grid, LineHandle, LineRenderer, MemoryRenderer, PointD, RectD, VertexSource};

// ============================================================================
// Scene
// ============================================================================

/// Outline colors for the debug overlay.
pub const CELL_OUTLINE: Rgba8 = Rgba8::BLUE;
pub const PADDING_OUTLINE: Rgba8 = Rgba8 {
    r: 160,
    g: 160,
    b: 160,
    a: 255,
};

/// Below every payline.
const OUTLINE_ORDER: i32 = i32::MIN;

pub struct SvgScene {
    bounds: RectD,
    lines: MemoryRenderer,
    outlines: Vec<LineHandle>,
}

impl SvgScene {
    pub fn new(bounds: RectD) -> Self {
        Self {
            bounds,
            lines: MemoryRenderer::new(),
            outlines: Vec::new(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.live_count()
    }

    /// Draw the outer and padded rectangle of every cell underneath the
    /// paylines. Outlines stay for the life of the scene; adding them again
    /// replaces the previous ones.
    pub fn add_outlines(&mut self, grid: &Grid) {
        for handle in self.outlines.drain(..) {
            self.lines.destroy(handle);
        }
        let cell = self
            .lines
            .create(&grid.outline_points(false), 1.0, CELL_OUTLINE, OUTLINE_ORDER);
        let padded = self
            .lines
            .create(&grid.outline_points(true), 1.0, PADDING_OUTLINE, OUTLINE_ORDER);
        self.outlines.extend([cell, padded]);
    }

    pub fn to_svg(&self) -> String {
        let b = self.bounds;
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            b.x1,
            b.y1,
            b.width(),
            b.height()
        );
        // Mirror around the horizontal center line of the bounds.
        let _ = writeln!(
            out,
            r#"<g transform="translate(0 {}) scale(1 -1)">"#,
            b.y1 + b.y2
        );
        for line in self.lines.draw_list() {
            write_line(&mut out, line);
        }
        out.push_str("</g>\n</svg>\n");
        out
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_svg())
    }
}

impl LineRenderer for SvgScene {
    fn create(&mut self, points: &[PointD], width: f64, color: Rgba8, draw_order: i32) -> LineHandle {
        self.lines.create(points, width, color, draw_order)
    }

    fn destroy(&mut self, handle: LineHandle) {
        self.lines.destroy(handle);
    }
}

/// One `<path>` per line; every segment is its own subpath.
fn write_line(out: &mut String, line: &RenderedLine) {
    let mut d = String::new();
    let mut src = DiscreteSegments::new(&line.points);
    src.rewind(0);
    let (mut x, mut y) = (0.0, 0.0);
    loop {
        let cmd = src.vertex(&mut x, &mut y);
        if is_stop(cmd) {
            break;
        }
        let op = if is_move_to(cmd) { 'M' } else { 'L' };
        let _ = write!(d, "{op}{x:.3} {y:.3} ");
    }
    if d.is_empty() {
        return;
    }
    let c = line.color;
    let _ = writeln!(
        out,
        r#"<path d="{}" fill="none" stroke="rgb({},{},{})" stroke-opacity="{:.3}" stroke-width="{}" stroke-linecap="round"/>"#,
        d.trim_end(),
        c.r,
        c.g,
        c.b,
        f64::from(c.a) / 255.0,
        line.width
    );
}

// ============================================================================
// Cell table
// ============================================================================

/// Human-readable listing of every cell, top row first.
pub fn describe_cells(grid: &Grid) -> String {
    let mut out = String::new();
    for row in (0..grid.rows()).rev() {
        for column in 0..grid.columns() {
            if let Some(cell) = grid.cell(row, column) {
                let r = cell.padded_rect();
                let _ = writeln!(
                    out,
                    "{} center=({:.1}, {:.1}) size={:.1}x{:.1} border=[{:.1}, {:.1}]-[{:.1}, {:.1}]{}",
                    cell.id(),
                    cell.center().x,
                    cell.center().y,
                    cell.width(),
                    cell.height(),
                    r.x1,
                    r.y1,
                    r.x2,
                    r.y2,
                    if cell.is_visible() { "" } else { " hidden" }
                );
            }
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
