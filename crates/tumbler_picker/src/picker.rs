//! Multi-column picker
//!
//! Owns the columns of one picker, routes pointer input to them, drives
//! their frames, and folds their individual selections into a single
//! name-keyed selection reported to the host.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use slotmap::{new_key_type, SlotMap};
use tumbler_core::{EventDisposition, PointerEvent};

use crate::column::{ColumnGeometry, PickerColumn};
use crate::config::PickerConfig;
use crate::error::{PickerError, Result};
use crate::feedback::{NoFeedback, SelectionFeedback};
use crate::option::{ColumnDef, PickerOption};
use crate::render::ColumnRenderer;

new_key_type! {
    /// Handle to a registered picker-level listener
    pub struct PickerListenerId;
}

/// Selection of one column as reported to the host
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SelectedValue {
    pub text: Option<String>,
    pub value: Option<Value>,
    pub column_index: usize,
}

/// Aggregated selection, keyed by column name in column order
pub type Selection = IndexMap<String, SelectedValue>;

/// Callback invoked with the full selection whenever any column changes
pub type SelectionHandler = Box<dyn FnMut(&Selection)>;

/// A set of picker columns sharing one configuration and feedback sink
pub struct Picker {
    config: PickerConfig,
    feedback: Rc<dyn SelectionFeedback>,
    columns: Vec<PickerColumn>,
    /// Set by column listeners, drained after every routed call
    changed: Rc<Cell<bool>>,
    listeners: SlotMap<PickerListenerId, SelectionHandler>,
}

impl Picker {
    pub fn new(config: PickerConfig) -> Self {
        Self::with_feedback(config, Rc::new(NoFeedback))
    }

    pub fn with_feedback(config: PickerConfig, feedback: Rc<dyn SelectionFeedback>) -> Self {
        Self {
            config,
            feedback,
            columns: Vec::new(),
            changed: Rc::new(Cell::new(false)),
            listeners: SlotMap::with_key(),
        }
    }

    /// Add a column; returns its position
    pub fn add_column(&mut self, def: ColumnDef, renderer: Box<dyn ColumnRenderer>) -> usize {
        let mut column = PickerColumn::new(def, self.config.clone(), renderer, self.feedback.clone());
        let changed = self.changed.clone();
        column.on_change(move |_| changed.set(true));

        self.columns.push(column);
        self.columns.len() - 1
    }

    /// Attach every column with the same measurements
    pub fn init(&mut self, geometry: ColumnGeometry) {
        for column in &mut self.columns {
            column.init(geometry);
        }
        self.dispatch_changes();
    }

    pub fn destroy(&mut self) {
        for column in &mut self.columns {
            column.destroy();
        }
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, index: usize) -> Option<&PickerColumn> {
        self.columns.get(index)
    }

    /// Direct access to a column.
    ///
    /// Selection changes made through it are reported to picker listeners
    /// with the next routed call (`refresh`, `on_animation_frame`, ...).
    /// Prefer [`set_selected`](Self::set_selected) to report them at once.
    pub fn column_mut(&mut self, index: usize) -> Option<&mut PickerColumn> {
        self.columns.get_mut(index)
    }

    pub fn columns(&self) -> impl Iterator<Item = &PickerColumn> {
        self.columns.iter()
    }

    // =========================================================================
    // Input routing
    // =========================================================================

    pub fn pointer_start(&mut self, column: usize, event: &PointerEvent) -> Result<EventDisposition> {
        self.route(column, |c| c.pointer_start(event))
    }

    pub fn pointer_move(&mut self, column: usize, event: &PointerEvent) -> Result<EventDisposition> {
        self.route(column, |c| c.pointer_move(event))
    }

    pub fn pointer_end(&mut self, column: usize, event: &PointerEvent) -> Result<EventDisposition> {
        self.route(column, |c| c.pointer_end(event))
    }

    pub fn option_click(&mut self, column: usize, index: usize) -> Result<EventDisposition> {
        self.route(column, |c| c.option_click(index))
    }

    /// Jump a column to `index` (see [`PickerColumn::set_selected`])
    pub fn set_selected(&mut self, column: usize, index: Option<usize>, duration_ms: u32) -> Result<()> {
        self.route(column, |c| c.set_selected(index, duration_ms))
    }

    /// Replace a column's options (see [`PickerColumn::set_options`])
    pub fn set_options(&mut self, column: usize, options: Vec<PickerOption>) -> Result<()> {
        self.route(column, |c| c.set_options(options))
    }

    fn route<R, F>(&mut self, index: usize, f: F) -> Result<R>
    where
        F: FnOnce(&mut PickerColumn) -> R,
    {
        let len = self.columns.len();
        let column = self
            .columns
            .get_mut(index)
            .ok_or(PickerError::ColumnOutOfRange { index, len })?;
        let out = f(column);
        self.dispatch_changes();
        Ok(out)
    }

    /// Drive every column for one display refresh.
    ///
    /// Returns `true` while any column still needs frames.
    pub fn on_animation_frame(&mut self) -> bool {
        let mut animating = false;
        for column in &mut self.columns {
            animating |= column.on_animation_frame();
        }
        self.dispatch_changes();
        animating
    }

    pub fn is_animating(&self) -> bool {
        self.columns.iter().any(PickerColumn::is_animating)
    }

    /// Re-validate every column after options were enabled or disabled
    pub fn refresh(&mut self) {
        for column in &mut self.columns {
            column.refresh();
        }
        self.dispatch_changes();
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Current selection of every column
    pub fn selected(&self) -> Selection {
        self.columns
            .iter()
            .enumerate()
            .map(|(column_index, column)| {
                let option = column.selected_option();
                (
                    column.name().to_string(),
                    SelectedValue {
                        text: option.map(|o| o.text.clone()),
                        value: option.map(|o| o.value.clone()),
                        column_index,
                    },
                )
            })
            .collect()
    }

    /// Register a listener for aggregated selection changes.
    ///
    /// Fires at most once per picker call: changes of several columns within
    /// the same call (one frame, one `refresh`) are coalesced into a single
    /// event carrying the full selection.
    pub fn on_change<F>(&mut self, handler: F) -> PickerListenerId
    where
        F: FnMut(&Selection) + 'static,
    {
        self.listeners.insert(Box::new(handler))
    }

    pub fn remove_listener(&mut self, id: PickerListenerId) -> bool {
        self.listeners.remove(id).is_some()
    }

    fn dispatch_changes(&mut self) {
        if !self.changed.replace(false) || self.listeners.is_empty() {
            return;
        }
        let selection = self.selected();
        for handler in self.listeners.values_mut() {
            handler(&selection);
        }
    }
}

impl fmt::Debug for Picker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Picker")
            .field("config", &self.config)
            .field("columns", &self.columns)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
