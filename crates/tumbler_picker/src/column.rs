//! Column scroll engine
//!
//! Drives one picker column: tracks the pointer while a finger is down,
//! estimates the release velocity, decelerates frame by frame, and finally
//! snaps onto an option slot. The committed offset is projected into the
//! column's `selected_index`, and listeners hear about it only when that index
//! actually changes.
//!
//! # Motion
//!
//! ```text
//!   pointer_start ──► Dragging ──pointer_end──► Decelerating ──► Snapping ──► Idle
//!                        │                          (frames)      (1px/frame)
//!                        └──overscrolled release──► snap back to bound ──────► Idle
//! ```
//!
//! Offsets are negative pixels: option `i` sits under the center line at
//! `y = -i * option_height`. Deceleration ends only when the offset lands on
//! a slot boundary while the velocity is at most one pixel per frame.
//!
//! # Frames
//!
//! The column never blocks. Deceleration steps are queued on the column's
//! [`FrameScheduler`] and pointer moves are coalesced in a [`Debouncer`]; the
//! host runs both by calling [`PickerColumn::on_animation_frame`] once per
//! display refresh.

use std::fmt;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};
use tumbler_animation::{Debouncer, FrameId, FrameScheduler};
use tumbler_core::{clamp, is_slot_aligned, round_half_up, EventDisposition, GestureSamples, PointerEvent};

use crate::config::PickerConfig;
use crate::feedback::SelectionFeedback;
use crate::option::{ColumnDef, PickerOption};
use crate::render::{index_for_offset, project_option, ColumnRenderer, VisualCache};

new_key_type! {
    /// Handle to a registered change listener
    pub struct ListenerId;
}

/// Measured layout of a column, supplied when it is attached
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColumnGeometry {
    /// Height of the visible column area
    pub column_height: f64,
    /// Height of a single option slot
    pub option_height: f64,
}

impl ColumnGeometry {
    pub fn new(column_height: f64, option_height: f64) -> Self {
        Self {
            column_height,
            option_height,
        }
    }
}

/// Selection change reported to listeners
#[derive(Debug)]
pub struct ColumnChange<'a> {
    /// Name of the column
    pub column: &'a str,
    pub index: usize,
    pub option: &'a PickerOption,
}

/// Callback invoked with every committed selection change
pub type ChangeHandler = Box<dyn FnMut(&ColumnChange<'_>)>;

/// Coarse motion phase, derived from the physics state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MotionState {
    /// At rest on a slot
    Idle,
    /// Following the pointer
    Dragging,
    /// Coasting with friction after release
    Decelerating,
    /// At rest but between two slots
    Snapping,
}

/// Edge the column was dragged past
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BounceEdge {
    /// Above the first enabled option
    Leading,
    /// Below the last enabled option
    Trailing,
}

/// Work queued for the next frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ColumnTask {
    Decelerate,
}

/// Scroll engine for a single picker column
pub struct PickerColumn {
    def: ColumnDef,
    config: PickerConfig,
    renderer: Box<dyn ColumnRenderer>,
    feedback: Rc<dyn SelectionFeedback>,
    listeners: SlotMap<ListenerId, ChangeHandler>,

    frames: FrameScheduler<ColumnTask>,
    decelerate_frame: Option<FrameId>,
    /// Latest pointer position waiting for the next frame
    move_writes: Debouncer<f64>,
    samples: GestureSamples,
    visuals: VisualCache,

    /// Committed offset
    y: f64,
    column_height: f64,
    option_height: f64,
    /// Pixels per frame, positive scrolls toward higher indices
    velocity: f64,
    /// Pointer position at gesture start; `None` outside a gesture
    start_y: Option<f64>,
    min_y: f64,
    max_y: f64,
    bounce: Option<(BounceEdge, f64)>,
    /// Last index a change was reported for; `None` until the baseline is taken
    last_index: Option<usize>,
    /// Last index signaled to the feedback port while moving
    last_motion_index: Option<usize>,
    attached: bool,
}

impl PickerColumn {
    pub fn new(
        def: ColumnDef,
        config: PickerConfig,
        renderer: Box<dyn ColumnRenderer>,
        feedback: Rc<dyn SelectionFeedback>,
    ) -> Self {
        Self {
            def,
            config,
            renderer,
            feedback,
            listeners: SlotMap::with_key(),
            frames: FrameScheduler::new(),
            decelerate_frame: None,
            move_writes: Debouncer::new(),
            samples: GestureSamples::new(),
            visuals: VisualCache::new(),
            y: 0.0,
            column_height: 0.0,
            option_height: 0.0,
            velocity: 0.0,
            start_y: None,
            min_y: 0.0,
            max_y: 0.0,
            bounce: None,
            last_index: None,
            last_motion_index: None,
            attached: false,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Attach the column: take its measurements, jump to the selected option
    /// and start accepting pointer input.
    pub fn init(&mut self, geometry: ColumnGeometry) {
        self.column_height = geometry.column_height;
        // Slot alignment is checked on whole pixels
        self.option_height = if geometry.option_height.is_finite() {
            geometry.option_height.round().max(0.0)
        } else {
            0.0
        };
        self.attached = true;
        self.update_bounds();

        tracing::debug!(
            column = %self.def.name,
            option_height = self.option_height,
            options = self.def.options.len(),
            "picker column attached"
        );

        self.set_selected(self.def.selected_index, 0);
    }

    /// Detach the column. Pending frame work is dropped and pointer input is
    /// ignored until the next [`init`](Self::init).
    pub fn destroy(&mut self) {
        self.frames.cancel_all();
        self.decelerate_frame = None;
        self.move_writes.cancel();
        self.start_y = None;
        self.attached = false;
        tracing::debug!(column = %self.def.name, "picker column detached");
    }

    // =========================================================================
    // Gesture input
    // =========================================================================

    /// Pointer went down on the column.
    ///
    /// The returned disposition captures the rest of the gesture and blocks
    /// native scrolling, but lets the event propagate so taps can still reach
    /// the option under the pointer.
    pub fn pointer_start(&mut self, event: &PointerEvent) -> EventDisposition {
        if !self.attached {
            return EventDisposition::IGNORED;
        }

        self.feedback.selection_start();
        self.cancel_deceleration();
        self.move_writes.cancel();

        let start = event.coord().y;
        self.start_y = Some(start);
        self.velocity = 0.0;
        self.bounce = None;
        self.samples.clear();
        self.samples.push(start, event.timestamp);
        self.update_bounds();

        tracing::debug!(
            column = %self.def.name,
            start_y = start,
            min_y = self.min_y,
            max_y = self.max_y,
            "picker gesture start"
        );

        EventDisposition::prevent_default().with_capture()
    }

    /// Pointer moved during a gesture. The visual update is deferred to the
    /// next frame; later moves in the same frame replace it.
    pub fn pointer_move(&mut self, event: &PointerEvent) -> EventDisposition {
        if !self.attached || self.start_y.is_none() {
            return EventDisposition::IGNORED;
        }

        let current = event.coord().y;
        self.samples.push(current, event.timestamp);
        self.move_writes.write(current);

        EventDisposition::consumed()
    }

    /// Pointer lifted (or the gesture was cancelled).
    pub fn pointer_end(&mut self, event: &PointerEvent) -> EventDisposition {
        if !self.attached {
            return EventDisposition::IGNORED;
        }
        self.move_writes.cancel();

        let Some(start) = self.start_y.take() else {
            return EventDisposition::prevent_default();
        };

        self.velocity = 0.0;
        let end = event.coord().y;

        // A release inside the frame that would have shown the overscroll
        // still counts as overscrolled.
        let edge = self
            .bounce
            .map(|(edge, _)| edge)
            .or_else(|| self.overscroll_edge(self.y + (end - start)));

        if let Some(edge) = edge {
            let bound = match edge {
                BounceEdge::Leading => self.min_y,
                BounceEdge::Trailing => self.max_y,
            };
            tracing::debug!(column = %self.def.name, ?edge, bound, "picker bounce back");
            self.bounce = None;
            self.update(bound, self.config.physics.bounce_duration_ms, true, true);
            return EventDisposition::prevent_default();
        }

        let physics = &self.config.physics;
        self.samples.push(end, event.timestamp);
        if let Some(velocity) = self.samples.release_velocity(
            event.timestamp,
            physics.velocity_window_ms,
            physics.frame_ms,
        ) {
            self.velocity = clamp(-physics.max_speed, velocity, physics.max_speed);
        }

        if (end - start).abs() > physics.dead_zone_px {
            self.update(self.y + (end - start), 0, true, true);
        }

        tracing::debug!(
            column = %self.def.name,
            velocity = self.velocity,
            y = self.y,
            samples = self.samples.len(),
            "picker gesture end"
        );

        self.decelerate();
        EventDisposition::prevent_default()
    }

    /// Tap on the option at `index`.
    ///
    /// Ignored while the column is still moving and for disabled options.
    pub fn option_click(&mut self, index: usize) -> EventDisposition {
        if !self.attached || self.velocity != 0.0 {
            return EventDisposition::IGNORED;
        }
        match self.def.options.get(index) {
            Some(option) if !option.disabled => {}
            _ => return EventDisposition::IGNORED,
        }
        self.set_selected(Some(index), self.config.physics.select_duration_ms);
        EventDisposition::consumed()
    }

    // =========================================================================
    // Frames
    // =========================================================================

    /// Run the work due at this display refresh.
    ///
    /// Returns `true` while the column still needs frames.
    pub fn on_animation_frame(&mut self) -> bool {
        if let Some(pointer_y) = self.move_writes.flush() {
            self.apply_move(pointer_y);
        }

        for task in self.frames.begin_frame() {
            match task {
                ColumnTask::Decelerate => {
                    self.decelerate_frame = None;
                    self.decelerate();
                }
            }
        }

        self.is_animating()
    }

    /// Whether frame work is pending
    pub fn is_animating(&self) -> bool {
        self.frames.has_pending() || self.move_writes.is_pending()
    }

    /// Debounced drag write: follow the pointer with elastic resistance past
    /// the enabled range. Nothing is committed here.
    fn apply_move(&mut self, pointer_y: f64) {
        let Some(start) = self.start_y else {
            return;
        };
        let physics = &self.config.physics;

        let mut y = self.y + (pointer_y - start);
        if y > self.min_y {
            y = self.min_y + (y - self.min_y).powf(physics.leading_elastic_exponent);
            self.bounce = Some((BounceEdge::Leading, y));
        } else if y < self.max_y {
            y += (self.max_y - y).powf(physics.trailing_elastic_exponent);
            self.bounce = Some((BounceEdge::Trailing, y));
        } else {
            self.bounce = None;
        }

        tracing::trace!(column = %self.def.name, y, bounce = self.bounce_from(), "picker drag");

        self.update(y, 0, false, false);
        self.signal_motion_index(y);
    }

    /// One step of the deceleration/snap state machine.
    fn decelerate(&mut self) {
        let height = self.option_height;

        if !self.y.is_finite() || height <= 0.0 {
            tracing::debug!(
                column = %self.def.name,
                y = self.y,
                option_height = height,
                "picker offset degenerate, resetting"
            );
            self.velocity = 0.0;
            self.signal_motion_index(0.0);
            self.update(0.0, 0, true, true);
            self.feedback.selection_end();
            return;
        }

        if self.velocity.abs() > 0.0 {
            let physics = &self.config.physics;
            let mut velocity = self.velocity * physics.friction;
            // Never creep slower than a pixel per frame
            velocity = if velocity > 0.0 {
                velocity.max(1.0)
            } else {
                velocity.min(-1.0)
            };

            let mut y = round_half_up(self.y - velocity);
            if y > self.min_y {
                y = self.min_y;
                velocity = 0.0;
            } else if y < self.max_y {
                y = self.max_y;
                velocity = 0.0;
            }

            let locked_in = is_slot_aligned(y, height) && velocity.abs() <= 1.0;
            self.velocity = if locked_in { 0.0 } else { velocity };

            tracing::trace!(column = %self.def.name, y, velocity, locked_in, "picker decelerate");

            self.signal_motion_index(y);
            self.update(y, 0, true, true);

            if !locked_in {
                self.decelerate_frame = Some(self.frames.request_frame(ColumnTask::Decelerate));
            }
        } else if !is_slot_aligned(self.y, height) {
            let misalignment = (self.y % height).abs();
            self.velocity = if misalignment > height / 2.0 { 1.0 } else { -1.0 };
            self.feedback.selection_end();
            self.decelerate();
        }
    }

    fn cancel_deceleration(&mut self) {
        if let Some(id) = self.decelerate_frame.take() {
            self.frames.cancel_frame(id);
        }
    }

    /// Raise `selection_changed` when the slot implied by an in-flight offset
    /// differs from the last one signaled.
    fn signal_motion_index(&mut self, y: f64) {
        let index = if self.option_height > 0.0 {
            round_half_up(y / self.option_height).abs() as usize
        } else {
            0
        };
        if self.last_motion_index != Some(index) {
            self.feedback.selection_changed();
            self.last_motion_index = Some(index);
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Jump to the option at `index` (`None` scrolls to the top) with a
    /// transition of `duration_ms`.
    ///
    /// The target is not clamped to enabled options; use
    /// [`refresh`](Self::refresh) for that.
    pub fn set_selected(&mut self, index: Option<usize>, duration_ms: u32) {
        let y = index.map_or(0.0, |i| -(i as f64) * self.option_height);
        self.cancel_deceleration();
        self.velocity = 0.0;
        self.update(y, duration_ms, true, true);
    }

    /// Re-validate the selection after options were enabled or disabled.
    ///
    /// A selection that fell outside the enabled range is moved to the
    /// nearest enabled edge.
    pub fn refresh(&mut self) {
        self.update_bounds();

        let Some(current) = self.def.selected_index else {
            return;
        };
        let (first, last) = self.def.enabled_extent();
        let clamped = current.clamp(first, last);

        if clamped != current {
            tracing::debug!(
                column = %self.def.name,
                from = current,
                to = clamped,
                "picker selection clamped to enabled range"
            );
            let y = -(clamped as f64) * self.option_height;
            self.update(y, self.config.physics.select_duration_ms, true, true);
        }
    }

    /// Project offset `y` onto the options.
    ///
    /// The projected index is always written to the column definition;
    /// `commit` additionally makes `y` the durable offset and `notify` lets a
    /// changed index reach the listeners.
    pub fn update(&mut self, y: f64, duration_ms: u32, commit: bool, notify: bool) {
        let y = round_half_up(y);
        let count = self.def.options.len();
        let selected = index_for_offset(y, self.option_height, count);
        self.def.selected_index = selected;

        for index in 0..count {
            let visual = project_option(
                index,
                y,
                self.option_height,
                selected == Some(index),
                duration_ms,
                &self.config,
            );
            if self.visuals.record(index, visual) {
                self.renderer.apply_option(index, &visual);
            }
        }

        if commit {
            self.y = y;
        }

        if notify {
            self.notify_selection();
        }
    }

    fn notify_selection(&mut self) {
        let Some(current) = self.def.selected_index else {
            return;
        };

        match self.last_index {
            None => self.last_index = Some(current),
            Some(last) if last != current => {
                self.last_index = Some(current);
                self.emit_change(current);
            }
            Some(_) => {}
        }
    }

    fn emit_change(&mut self, index: usize) {
        if self.listeners.is_empty() {
            return;
        }
        let Some(option) = self.def.options.get(index) else {
            return;
        };

        tracing::debug!(column = %self.def.name, index, text = %option.text, "picker selection changed");

        let change = ColumnChange {
            column: &self.def.name,
            index,
            option,
        };
        for handler in self.listeners.values_mut() {
            handler(&change);
        }
    }

    /// Register a selection change listener
    pub fn on_change<F>(&mut self, handler: F) -> ListenerId
    where
        F: FnMut(&ColumnChange<'_>) + 'static,
    {
        self.listeners.insert(Box::new(handler))
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id).is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // =========================================================================
    // Options
    // =========================================================================

    /// Mutable access to the options (enable/disable, relabel). Call
    /// [`refresh`](Self::refresh) afterwards.
    pub fn options_mut(&mut self) -> &mut [PickerOption] {
        &mut self.def.options
    }

    /// Enable or disable one option. Returns `false` if `index` is out of range.
    pub fn set_disabled(&mut self, index: usize, disabled: bool) -> bool {
        match self.def.options.get_mut(index) {
            Some(option) => {
                option.disabled = disabled;
                true
            }
            None => false,
        }
    }

    /// Replace every option and move onto the nearest enabled slot.
    ///
    /// The current slot is kept when it still exists and is enabled.
    pub fn set_options(&mut self, options: Vec<PickerOption>) {
        self.cancel_deceleration();
        self.move_writes.cancel();
        self.velocity = 0.0;
        self.bounce = None;

        self.def.options = options;
        self.visuals.clear();
        self.update_bounds();

        let (first, last) = self.def.enabled_extent();
        let current = index_for_offset(self.y, self.option_height, self.def.options.len())
            .unwrap_or(0);
        let index = current.clamp(first, last);

        tracing::debug!(
            column = %self.def.name,
            options = self.def.options.len(),
            index,
            "picker options replaced"
        );
        self.update(-(index as f64) * self.option_height, 0, true, true);
    }

    fn update_bounds(&mut self) {
        let (first, last) = self.def.enabled_extent();
        self.min_y = -(first as f64) * self.option_height;
        self.max_y = -(last as f64) * self.option_height;
    }

    fn overscroll_edge(&self, y: f64) -> Option<BounceEdge> {
        if y > self.min_y {
            Some(BounceEdge::Leading)
        } else if y < self.max_y {
            Some(BounceEdge::Trailing)
        } else {
            None
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn def(&self) -> &ColumnDef {
        &self.def
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Committed scroll offset
    pub fn offset(&self) -> f64 {
        self.y
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Offset of the first enabled option (upper scroll bound)
    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    /// Offset of the last enabled option (lower scroll bound)
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    /// Elastic offset of the current overscroll, 0 when within bounds
    pub fn bounce_from(&self) -> f64 {
        self.bounce.map_or(0.0, |(_, y)| y)
    }

    pub fn option_height(&self) -> f64 {
        self.option_height
    }

    pub fn column_height(&self) -> f64 {
        self.column_height
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.def.selected_index
    }

    pub fn selected_option(&self) -> Option<&PickerOption> {
        self.def.selected_option()
    }

    /// Index of the most recent change notification (or the baseline)
    pub fn last_committed_index(&self) -> Option<usize> {
        self.last_index
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_dragging(&self) -> bool {
        self.start_y.is_some()
    }

    pub fn motion_state(&self) -> MotionState {
        if self.start_y.is_some() {
            MotionState::Dragging
        } else if self.velocity != 0.0 {
            MotionState::Decelerating
        } else if self.option_height > 0.0 && !is_slot_aligned(self.y, self.option_height) {
            MotionState::Snapping
        } else {
            MotionState::Idle
        }
    }
}

impl fmt::Debug for PickerColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerColumn")
            .field("name", &self.def.name)
            .field("y", &self.y)
            .field("velocity", &self.velocity)
            .field("min_y", &self.min_y)
            .field("max_y", &self.max_y)
            .field("selected_index", &self.def.selected_index)
            .field("state", &self.motion_state())
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}
