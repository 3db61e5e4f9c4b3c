//! Frame scheduler
//!
//! The request/cancel "animation frame" primitive. A task requested during
//! frame `n` runs at frame `n + 1`, never sooner, so a task that re-requests
//! itself forms a self-rescheduling chain instead of a blocking loop.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Handle to a pending frame callback
    pub struct FrameId;
}

/// Nominal frame interval in milliseconds (60Hz)
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// Queue of tasks waiting for the next frame boundary
pub struct FrameScheduler<T> {
    tasks: SlotMap<FrameId, T>,
    /// Request order of the pending tasks
    order: SmallVec<[FrameId; 2]>,
    frame_count: u64,
}

impl<T> FrameScheduler<T> {
    pub fn new() -> Self {
        Self {
            tasks: SlotMap::with_key(),
            order: SmallVec::new(),
            frame_count: 0,
        }
    }

    /// Schedule `task` for the next frame
    pub fn request_frame(&mut self, task: T) -> FrameId {
        let id = self.tasks.insert(task);
        self.order.push(id);
        id
    }

    /// Cancel a pending task. Stale or already-run ids are ignored.
    pub fn cancel_frame(&mut self, id: FrameId) -> Option<T> {
        let task = self.tasks.remove(id)?;
        self.order.retain(|queued| *queued != id);
        Some(task)
    }

    /// Cancel every pending task
    pub fn cancel_all(&mut self) {
        self.tasks.clear();
        self.order.clear();
    }

    pub fn is_pending(&self, id: FrameId) -> bool {
        self.tasks.contains_key(id)
    }

    pub fn has_pending(&self) -> bool {
        !self.tasks.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    /// Number of frames processed so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Start a new frame: hand out every task that was due, in request order.
    ///
    /// Tasks requested while the returned tasks are processed wait for the
    /// following call.
    pub fn begin_frame(&mut self) -> SmallVec<[T; 2]> {
        self.frame_count += 1;

        let order = std::mem::take(&mut self.order);
        let due: SmallVec<[T; 2]> = order
            .into_iter()
            .filter_map(|id| self.tasks.remove(id))
            .collect();

        if !due.is_empty() {
            tracing::trace!(frame = self.frame_count, tasks = due.len(), "frame callbacks due");
        }
        due
    }
}

impl<T> Default for FrameScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for FrameScheduler<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("pending", &self.tasks.len())
            .field("frame_count", &self.frame_count)
            .finish()
    }
}
