//! Tumbler Picker
//!
//! Touch-driven column scroll engine for wheel-style value pickers (dates,
//! times, multi-wheel selectors).
//!
//! # Features
//!
//! - **Pointer tracking**: Elastic overscroll past the enabled options
//! - **Fling**: Release velocity estimated from the last 100ms of motion
//! - **Deceleration**: Per-frame friction, hard stop at the enabled range
//! - **Snap**: Always settles exactly on an option slot
//! - **Change events**: Fired once per genuine selection change
//! - **Ports**: Rendering and haptics are injected, so the physics runs headless
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use tumbler_core::{PointerEvent, PointerPhase};
//! use tumbler_picker::{ColumnDef, ColumnGeometry, NoFeedback, NullRenderer, PickerColumn, PickerConfig};
//!
//! let def = ColumnDef::new("size").option("S", "s").option("M", "m").option("L", "l");
//! let mut column = PickerColumn::new(
//!     def,
//!     PickerConfig::default(),
//!     Box::new(NullRenderer),
//!     Rc::new(NoFeedback),
//! );
//! column.init(ColumnGeometry::new(200.0, 30.0));
//!
//! // Drag up by two slots and hold still before lifting
//! column.pointer_start(&PointerEvent::touch(PointerPhase::Down, 0.0, 300.0, 0.0));
//! column.pointer_move(&PointerEvent::touch(PointerPhase::Move, 0.0, 240.0, 50.0));
//! column.on_animation_frame();
//! column.pointer_end(&PointerEvent::touch(PointerPhase::Up, 0.0, 240.0, 400.0));
//!
//! while column.on_animation_frame() {}
//! assert_eq!(column.offset(), -60.0);
//! assert_eq!(column.selected_option().map(|o| o.text.as_str()), Some("L"));
//! ```

pub mod column;
pub mod config;
pub mod error;
pub mod feedback;
pub mod option;
pub mod picker;
pub mod render;

pub use column::{ChangeHandler, ColumnChange, ColumnGeometry, ListenerId, MotionState, PickerColumn};
pub use config::{PhysicsConfig, PickerConfig};
pub use error::{PickerError, Result};
pub use feedback::{NoFeedback, SelectionFeedback};
pub use option::{ColumnAlign, ColumnDef, PickerOption};
pub use picker::{Picker, PickerListenerId, SelectedValue, Selection, SelectionHandler};
pub use render::{ColumnRenderer, NullRenderer, OptionTransform, OptionVisual};
