//! Bounded history of rendered lines.
//!
//! Keeps the most recent `capacity` handles alive; pushing past capacity
//! destroys the oldest line first.

use std::collections::VecDeque;

use crate::error::{PaylineError, Result};
use crate::renderer::{LineHandle, LineRenderer};

#[derive(Debug)]
pub struct LineHistory {
    capacity: usize,
    handles: VecDeque<LineHandle>,
}

impl LineHistory {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(PaylineError::InvalidConfiguration(
                "line history capacity must be at least 1".into(),
            ));
        }
        Ok(Self {
            capacity,
            handles: VecDeque::with_capacity(capacity),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LineHandle> {
        self.handles.iter()
    }

    /// Take ownership of `handle`, destroying the oldest one when full.
    pub fn push<R: LineRenderer + ?Sized>(&mut self, renderer: &mut R, handle: LineHandle) {
        while self.handles.len() >= self.capacity {
            match self.handles.pop_front() {
                Some(old) => renderer.destroy(old),
                None => break,
            }
        }
        self.handles.push_back(handle);
    }

    pub fn clear<R: LineRenderer + ?Sized>(&mut self, renderer: &mut R) {
        for handle in self.handles.drain(..) {
            renderer.destroy(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::PointD;
    use crate::color::Rgba8;
    use crate::renderer::MemoryRenderer;

    fn line(r: &mut MemoryRenderer) -> LineHandle {
        let pts = [PointD::new(0.0, 0.0), PointD::new(1.0, 0.0)];
        r.create(&pts, 1.0, Rgba8::RED, 0)
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            LineHistory::new(0),
            Err(PaylineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut r = MemoryRenderer::new();
        let mut h = LineHistory::new(2).unwrap();
        for _ in 0..5 {
            let l = line(&mut r);
            h.push(&mut r, l);
        }
        assert_eq!(h.len(), 2);
        assert_eq!(r.live_count(), 2);
        assert_eq!(r.destroyed_count(), 3);
        let ids: Vec<u64> = h.iter().map(|l| l.id()).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn test_clear() {
        let mut r = MemoryRenderer::new();
        let mut h = LineHistory::new(3).unwrap();
        let l = line(&mut r);
        h.push(&mut r, l);
        h.clear(&mut r);
        assert!(h.is_empty());
        assert_eq!(r.live_count(), 0);
        assert_eq!(h.capacity(), 3);
    }
}
