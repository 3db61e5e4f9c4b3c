//! Tumbler Core
//!
//! Leaf primitives shared by the picker crates:
//!
//! - **Pointer Events**: Mouse/touch/pen input normalized to a single shape
//! - **Gesture Sampling**: Timestamped position samples and release velocity
//! - **Geometry**: Clamping and slot alignment helpers
//!
//! # Example
//!
//! ```rust
//! use tumbler_core::sampling::GestureSamples;
//!
//! let mut samples = GestureSamples::new();
//! samples.push(200.0, 0.0);
//! samples.push(180.0, 40.0);
//! samples.push(140.0, 80.0);
//!
//! // Finger moved 60px up over 80ms, expressed per 1000/60 ms frame
//! let velocity = samples.release_velocity(80.0, 100.0, 1000.0 / 60.0);
//! assert_eq!(velocity, Some(12.5));
//! ```

pub mod events;
pub mod geometry;
pub mod sampling;

pub use events::{pointer_coord, EventDisposition, Point, PointerEvent, PointerPhase, PointerSource};
pub use geometry::{clamp, is_slot_aligned, round_half_up};
pub use sampling::{GestureSamples, Sample};
