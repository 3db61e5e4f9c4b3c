//! Gesture sampling
//!
//! Records the pointer's position over the course of a gesture so the release
//! velocity can be estimated from the last few moments of motion only. Older
//! samples are kept but ignored by the estimator.

/// A single timestamped position along the scroll axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub position: f64,
    /// Milliseconds
    pub timestamp: f64,
}

/// Append-only sample buffer for one gesture
#[derive(Clone, Debug, Default)]
pub struct GestureSamples {
    samples: Vec<Sample>,
}

impl GestureSamples {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every sample (gesture start)
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn push(&mut self, position: f64, timestamp: f64) {
        self.samples.push(Sample {
            position,
            timestamp,
        });
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    /// Index of the reference sample for a release at `now`.
    ///
    /// Walks backward from the newest sample while samples are newer than
    /// `now - window_ms`; the last one visited is the reference. Returns the
    /// newest index itself when nothing else falls inside the window.
    pub fn reference_index(&self, now: f64, window_ms: f64) -> Option<usize> {
        let newest = self.samples.len().checked_sub(1)?;
        let cutoff = now - window_ms;

        let mut reference = newest;
        for (i, sample) in self.samples.iter().enumerate().rev() {
            if sample.timestamp <= cutoff {
                break;
            }
            reference = i;
        }
        Some(reference)
    }

    /// Release velocity in pixels per frame.
    ///
    /// Positive values mean the pointer travelled toward smaller coordinates
    /// (content flung upward). Returns `None` when the window holds fewer than
    /// two samples or no time elapsed between them.
    pub fn release_velocity(&self, now: f64, window_ms: f64, frame_ms: f64) -> Option<f64> {
        let newest = self.samples.len().checked_sub(1)?;
        let reference = self.reference_index(now, window_ms)?;
        if reference == newest {
            return None;
        }

        let start = self.samples[reference];
        let end = self.samples[newest];
        let elapsed = end.timestamp - start.timestamp;
        if elapsed <= 0.0 {
            return None;
        }

        let moved = start.position - end.position;
        Some(moved / elapsed * frame_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    #[test]
    fn test_empty_buffer_has_no_velocity() {
        let samples = GestureSamples::new();
        assert_eq!(samples.reference_index(0.0, 100.0), None);
        assert_eq!(samples.release_velocity(0.0, 100.0, FRAME_MS), None);
    }

    #[test]
    fn test_reference_ignores_samples_outside_window() {
        let mut samples = GestureSamples::new();
        samples.push(500.0, 0.0);
        samples.push(400.0, 150.0);
        samples.push(380.0, 200.0);
        samples.push(300.0, 250.0);

        // cutoff = 150: the sample at exactly 150 is too old
        assert_eq!(samples.reference_index(250.0, 100.0), Some(2));

        let velocity = samples.release_velocity(250.0, 100.0, FRAME_MS).unwrap();
        assert!((velocity - 80.0 / 50.0 * FRAME_MS).abs() < 1e-9);
    }

    #[test]
    fn test_single_sample_in_window_yields_none() {
        let mut samples = GestureSamples::new();
        samples.push(100.0, 0.0);
        samples.push(90.0, 500.0);
        assert_eq!(samples.reference_index(500.0, 100.0), Some(1));
        assert_eq!(samples.release_velocity(500.0, 100.0, FRAME_MS), None);
    }

    #[test]
    fn test_zero_elapsed_time_yields_none() {
        let mut samples = GestureSamples::new();
        samples.push(100.0, 10.0);
        samples.push(50.0, 10.0);
        assert_eq!(samples.release_velocity(10.0, 100.0, FRAME_MS), None);
    }

    #[test]
    fn test_downward_drag_is_negative() {
        let mut samples = GestureSamples::new();
        samples.push(100.0, 0.0);
        samples.push(160.0, 60.0);
        let velocity = samples.release_velocity(60.0, 100.0, FRAME_MS).unwrap();
        assert!(velocity < 0.0);
    }

    #[test]
    fn test_clear_resets_buffer() {
        let mut samples = GestureSamples::new();
        samples.push(1.0, 1.0);
        samples.clear();
        assert!(samples.is_empty());
        assert_eq!(samples.len(), 0);
        assert!(samples.first().is_none());
    }
}
