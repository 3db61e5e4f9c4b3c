//! Tactile feedback port
//!
//! Columns report selection motion to a shared feedback collaborator (a
//! haptic engine on devices that have one). Every signal defaults to a no-op
//! so implementors only override what their platform supports.

/// Selection feedback signals raised by picker columns
pub trait SelectionFeedback {
    /// A gesture began on a column
    fn selection_start(&self) {}

    /// The option under the center line changed while the column was moving
    fn selection_changed(&self) {}

    /// The column started its final settle onto a slot
    fn selection_end(&self) {}
}

/// Feedback sink for platforms without haptics
#[derive(Clone, Copy, Debug, Default)]
pub struct NoFeedback;

impl SelectionFeedback for NoFeedback {}
