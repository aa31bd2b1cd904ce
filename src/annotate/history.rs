use std::collections::VecDeque;

use crate::annotate::canvas::OverlayBitmap;

/// Maximum number of snapshots retained; the oldest is evicted first.
pub const HISTORY_CAPACITY: usize = 10;

/// A full copy of the overlay's pixel content at one instant. Entries are
/// owned exclusively by [`SnapshotHistory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Snapshot {
    fn of(canvas: &OverlayBitmap) -> Self {
        Self {
            width: canvas.width(),
            height: canvas.height(),
            pixels: canvas.pixels().to_vec(),
        }
    }

    fn apply_to(&self, canvas: &mut OverlayBitmap) {
        debug_assert_eq!((self.width, self.height), canvas.size());
        canvas.write_pixels(&self.pixels);
    }
}

/// Bounded stack of bitmap snapshots, oldest first. The top entry always
/// matches the bitmap's current content after any capture, undo or reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotHistory {
    entries: VecDeque<Snapshot>,
    capacity: usize,
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl SnapshotHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a snapshot of the current bitmap, evicting the oldest entry
    /// when at capacity. No-op while the bitmap has zero area.
    pub fn capture(&mut self, canvas: &OverlayBitmap) {
        if !canvas.has_area() {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(Snapshot::of(canvas));
    }

    /// Removes the last completed stroke. With more than one entry the
    /// newest is discarded and the bitmap restored from the new top. With
    /// exactly one entry the stack collapses to the pre-history blank state
    /// instead. Empty history is a no-op.
    pub fn undo(&mut self, canvas: &mut OverlayBitmap) {
        match self.entries.len() {
            0 => {}
            1 => {
                self.entries.clear();
                canvas.clear();
            }
            _ => {
                self.entries.pop_back();
                if let Some(top) = self.entries.back() {
                    top.apply_to(canvas);
                }
            }
        }
    }

    /// Clears the bitmap and the stack, then seeds one blank baseline
    /// snapshot.
    pub fn reset(&mut self, canvas: &mut OverlayBitmap) {
        canvas.clear();
        self.entries.clear();
        self.capture(canvas);
    }
}
