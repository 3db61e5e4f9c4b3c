//! Column definitions
//!
//! The data a host hands to a column. The column only ever writes
//! `selected_index`; everything else is read-only to it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single selectable row
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct PickerOption {
    /// Display label
    pub text: String,
    /// Opaque payload reported back to the host
    #[serde(default)]
    pub value: Value,
    /// Unselectable, but still occupies a slot
    #[serde(default)]
    pub disabled: bool,
}

impl PickerOption {
    pub fn new(text: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
            disabled: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// Horizontal alignment of a column's labels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// One picker column
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ColumnDef {
    /// Key of this column in the aggregated selection
    pub name: String,
    /// Slot order is insertion order
    #[serde(default)]
    pub options: Vec<PickerOption>,
    /// Current selection, projected from the scroll offset by the column
    #[serde(default)]
    pub selected_index: Option<usize>,

    // Layout hints, passed through to the renderer untouched
    #[serde(default)]
    pub align: ColumnAlign,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub prefix_width: Option<String>,
    #[serde(default)]
    pub suffix_width: Option<String>,
    #[serde(default)]
    pub options_width: Option<String>,
    #[serde(default)]
    pub column_width: Option<String>,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Append an enabled option
    pub fn option(mut self, text: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.push(PickerOption::new(text, value));
        self
    }

    pub fn with_options(mut self, options: impl IntoIterator<Item = PickerOption>) -> Self {
        self.options.extend(options);
        self
    }

    pub fn selected(mut self, index: usize) -> Self {
        self.selected_index = Some(index);
        self
    }

    pub fn align(mut self, align: ColumnAlign) -> Self {
        self.align = align;
        self
    }

    /// First and last enabled option indices.
    ///
    /// When every option is disabled the extent falls back to the full option
    /// range so the column keeps a usable scroll range. An empty column
    /// reports `(0, 0)`.
    pub fn enabled_extent(&self) -> (usize, usize) {
        let mut enabled = self
            .options
            .iter()
            .enumerate()
            .filter(|(_, option)| !option.disabled)
            .map(|(i, _)| i);

        match enabled.next() {
            Some(first) => (first, enabled.last().unwrap_or(first)),
            None => (0, self.options.len().saturating_sub(1)),
        }
    }

    /// The option at `selected_index`, if any
    pub fn selected_option(&self) -> Option<&PickerOption> {
        self.selected_index.and_then(|i| self.options.get(i))
    }
}
