//! Bounded history of rendered frames for single-step undo.
//!
//! Each mutating render pushes a snapshot of the visible frame; undo pops
//! back to the one before it. When the bound is exceeded the oldest frame is
//! evicted.

use std::collections::VecDeque;

use fieldbox_view::Frame;

use crate::constants::{DEFAULT_HISTORY_LIMIT, MIN_HISTORY_LIMIT};

/// Bounded stack of frame snapshots, most recent last.
#[derive(Debug, Clone)]
pub struct SnapshotHistory {
    /// Snapshots, oldest at the front
    frames: VecDeque<Frame>,
    /// Maximum number of snapshots kept
    limit: usize,
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl SnapshotHistory {
    /// Create an empty history holding at most `limit` snapshots, and never
    /// fewer than [`MIN_HISTORY_LIMIT`].
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(MIN_HISTORY_LIMIT);
        Self {
            frames: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Append a snapshot, evicting the oldest when full.
    pub fn push(&mut self, frame: Frame) {
        self.frames.push_back(frame);
        while self.frames.len() > self.limit {
            self.frames.pop_front();
        }
    }

    /// Step back one snapshot.
    ///
    /// With more than one snapshot the newest is discarded and the new newest
    /// returned. A single snapshot is returned without being discarded, since
    /// there is nothing earlier to go back to. `None` means the history is
    /// empty.
    pub fn pop_to_previous(&mut self) -> Option<Frame> {
        if self.frames.len() > 1 {
            self.frames.pop_back();
        }
        self.frames.back().cloned()
    }

    /// The newest snapshot.
    pub fn latest(&self) -> Option<&Frame> {
        self.frames.back()
    }

    /// Drop every snapshot.
    pub fn reset(&mut self) {
        self.frames.clear();
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
