//! Debounced writes
//!
//! Holds at most one pending write. Writing again before the write is flushed
//! overwrites it in place, so bursts of input between two frames cost a single
//! visual update.

/// Single-slot, overwrite-in-place pending write
#[derive(Debug)]
pub struct Debouncer<T> {
    pending: Option<T>,
    coalesced: u64,
}

impl<T> Debouncer<T> {
    pub fn new() -> Self {
        Self {
            pending: None,
            coalesced: 0,
        }
    }

    /// Queue `write`, replacing any write still pending.
    ///
    /// Returns `true` if a pending write was replaced.
    pub fn write(&mut self, write: T) -> bool {
        let replaced = self.pending.replace(write).is_some();
        if replaced {
            self.coalesced += 1;
        }
        replaced
    }

    /// Drop the pending write without running it
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Take the pending write for execution at a frame boundary
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Total number of writes that were overwritten before being flushed
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_write_wins() {
        let mut debouncer = Debouncer::new();
        assert!(!debouncer.write(10.0));
        assert!(debouncer.write(20.0));
        assert!(debouncer.write(30.0));

        assert_eq!(debouncer.flush(), Some(30.0));
        assert_eq!(debouncer.flush(), None);
        assert_eq!(debouncer.coalesced(), 2);
    }

    #[test]
    fn test_cancel_discards_pending() {
        let mut debouncer = Debouncer::new();
        debouncer.write("move");
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.cancel(), Some("move"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.flush(), None);
    }
}
