//! Fixed-capacity trailing-position buffers.
//!
//! Each particle owns one [`TraceBuffer`] holding its most recent
//! positions, oldest first. The renderer draws the buffer contents in
//! index order as a connected polyline, so eviction shifts entries toward
//! the start rather than wrapping a circular index: the slice handed to
//! the renderer is always in chronological order with no seam.

use glam::DVec3;

/// An ordered store of up to `capacity` recent positions.
///
/// While filling, `push` appends. Once full, the buffer becomes a sliding
/// window: `push` discards the oldest entry, shifts the rest one slot
/// toward the start, and writes the new position into the last slot.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceBuffer {
    positions: Vec<DVec3>,
    capacity: usize,
}

impl TraceBuffer {
    /// Create an empty buffer with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a position, evicting the oldest once full.
    pub fn push(&mut self, position: DVec3) {
        if self.positions.len() < self.capacity {
            self.positions.push(position);
        } else {
            self.positions.rotate_left(1);
            if let Some(last) = self.positions.last_mut() {
                *last = position;
            }
        }
    }

    /// The recorded positions, oldest first. This is the renderer's
    /// polyline; its length is the current draw range.
    #[inline]
    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    /// Number of positions currently recorded.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no positions have been recorded yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Maximum number of positions this buffer retains.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the buffer has reached capacity and slides on push.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.positions.len() == self.capacity
    }

    /// Discard all recorded positions, keeping the capacity.
    pub fn clear(&mut self) {
        self.positions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(i: usize) -> DVec3 {
        DVec3::splat(i as f64)
    }

    #[test]
    fn test_fill_preserves_insertion_order() {
        let mut buffer = TraceBuffer::new(4);
        for i in 0..4 {
            buffer.push(p(i));
        }
        assert!(buffer.is_full());
        assert_eq!(buffer.positions(), &[p(0), p(1), p(2), p(3)]);
    }

    #[test]
    fn test_slide_evicts_oldest() {
        let mut buffer = TraceBuffer::new(3);
        for i in 0..3 {
            buffer.push(p(i));
        }
        buffer.push(p(3));
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.positions(), &[p(1), p(2), p(3)]);

        buffer.push(p(4));
        assert_eq!(buffer.positions(), &[p(2), p(3), p(4)]);
    }

    #[test]
    fn test_len_tracks_fill() {
        let mut buffer = TraceBuffer::new(10);
        assert!(buffer.is_empty());
        for i in 0..5 {
            buffer.push(p(i));
        }
        assert_eq!(buffer.len(), 5);
        assert!(!buffer.is_full());
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut buffer = TraceBuffer::new(2);
        buffer.push(p(0));
        buffer.push(p(1));
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 2);
        buffer.push(p(7));
        assert_eq!(buffer.positions(), &[p(7)]);
    }
}
