//! The line renderer boundary.
//!
//! Drawing is done elsewhere. The crate hands a renderer a discrete point
//! list plus style and gets back an exclusively owned handle, which it
//! gives back exactly once through `destroy`.

use std::collections::BTreeMap;

use crate::basics::PointD;
use crate::color::Rgba8;

/// Exclusive ownership of one rendered line.
///
/// Not `Clone`: a handle can be destroyed at most once. Holders that may or
/// may not own a line keep an `Option<LineHandle>` and `take()` it on
/// release, which makes releasing twice a no-op.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineHandle(u64);

impl LineHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Something that can draw discrete polylines.
///
/// `points` are taken in consecutive pairs, each pair an independent segment.
/// Lines with a larger `draw_order` are drawn on top; among equal orders the
/// line created last is on top.
pub trait LineRenderer {
    fn create(&mut self, points: &[PointD], width: f64, color: Rgba8, draw_order: i32)
        -> LineHandle;

    fn destroy(&mut self, handle: LineHandle);
}

/// A line as recorded by [`MemoryRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLine {
    pub points: Vec<PointD>,
    pub width: f64,
    pub color: Rgba8,
    pub draw_order: i32,
}

/// Headless renderer that keeps live lines in memory.
///
/// Useful for tests and for exporters that turn the final scene into some
/// other format.
#[derive(Debug, Default)]
pub struct MemoryRenderer {
    next_id: u64,
    lines: BTreeMap<u64, RenderedLine>,
    destroyed: usize,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of `destroy` calls received so far.
    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }

    pub fn line(&self, handle: &LineHandle) -> Option<&RenderedLine> {
        self.lines.get(&handle.id())
    }

    /// Live lines back to front: ascending draw order, creation order
    /// within equal orders.
    pub fn draw_list(&self) -> Vec<&RenderedLine> {
        let mut list: Vec<&RenderedLine> = self.lines.values().collect();
        // BTreeMap yields creation order; the sort is stable.
        list.sort_by_key(|l| l.draw_order);
        list
    }
}

impl LineRenderer for MemoryRenderer {
    fn create(
        &mut self,
        points: &[PointD],
        width: f64,
        color: Rgba8,
        draw_order: i32,
    ) -> LineHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.lines.insert(
            id,
            RenderedLine {
                points: points.to_vec(),
                width,
                color,
                draw_order,
            },
        );
        LineHandle::new(id)
    }

    fn destroy(&mut self, handle: LineHandle) {
        self.destroyed += 1;
        if self.lines.remove(&handle.id()).is_none() {
            tracing::warn!(handle = handle.id(), "destroy of unknown line handle");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
