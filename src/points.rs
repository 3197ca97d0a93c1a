// Result-point accumulation buffer shared between the decode thread and the
// render thread. The decode thread appends candidate points as it finds
// them; once per animation tick the renderer atomically freezes the
// accumulated set (swap) and bounds its size (trim).

use crate::types::ResultPoint;
use std::sync::Mutex;

/// Most points kept across a swap; beyond this the oldest half is dropped.
pub const MAX_RESULT_POINTS: usize = 20;

/// Mutex-guarded point list with exactly two operations: `append` from the
/// decode thread and `swap_and_trim` from the render thread. The lock is
/// held only for the duration of either call.
pub struct PointBuffer {
    points: Mutex<Vec<ResultPoint>>,
    cap: usize,
}

impl PointBuffer {
    pub fn new() -> Self {
        Self::with_cap(MAX_RESULT_POINTS)
    }

    pub fn with_cap(cap: usize) -> Self {
        Self {
            points: Mutex::new(Vec::with_capacity(5)),
            cap,
        }
    }

    /// Record one candidate point. Growth between ticks is unbounded by
    /// design; the trim runs amortized at the next swap, not per insert.
    pub fn append(&self, point: ResultPoint) {
        let mut points = self.points.lock().unwrap();
        points.push(point);
    }

    /// Freeze and return the accumulated set, leaving an empty buffer for
    /// the next tick. If the set outgrew the cap, the oldest entries are
    /// dropped first so exactly `cap / 2` most-recent points survive.
    pub fn swap_and_trim(&self) -> Vec<ResultPoint> {
        let mut points = self.points.lock().unwrap();
        let mut taken = std::mem::take(&mut *points);
        let len = taken.len();
        if len > self.cap {
            taken.drain(0..len - self.cap / 2);
        }
        taken
    }

    /// Points currently accumulated (for diagnostics/tests).
    pub fn len(&self) -> usize {
        self.points.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop everything accumulated so far without freezing a snapshot.
    pub fn clear(&self) {
        self.points.lock().unwrap().clear();
    }
}

impl Default for PointBuffer {
    fn default() -> Self {
        Self::new()
    }
}
