//! Tumbler Animation
//!
//! Frame-boundary scheduling for single-threaded, frame-driven widgets.
//!
//! # Features
//!
//! - **Frame Scheduler**: Request/cancel callbacks that run on the next frame
//! - **Debouncer**: Collapse redundant pending writes to the most recent one
//!
//! Nothing here owns a clock or a thread. The host drives both primitives
//! from its display refresh callback.

pub mod debounce;
pub mod scheduler;

pub use debounce::Debouncer;
pub use scheduler::{FrameId, FrameScheduler, FRAME_MS};
