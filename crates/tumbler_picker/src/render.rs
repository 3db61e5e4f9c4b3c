//! Render projection
//!
//! Maps a continuous scroll offset to per-option visual state. The column
//! computes an [`OptionVisual`] for every option on each update and forwards
//! only the ones that changed to its [`ColumnRenderer`].

use tumbler_core::{clamp, round_half_up};

use crate::config::PickerConfig;

/// Where an option is drawn relative to the column's center line
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OptionTransform {
    /// Too far from the center to be drawn
    Hidden,
    /// Flat look: vertical translation in pixels
    Flat { translate_y: f64 },
    /// Wheel look: rotation around the X axis in degrees, pushed out by `translate_z`
    Wheel { rotate_x: f64, translate_z: f64 },
}

/// Visual state of one option
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OptionVisual {
    pub transform: OptionTransform,
    /// 1.0 unless the look shrinks non-selected neighbours
    pub scale: f64,
    pub selected: bool,
    /// Transition duration hint for the renderer (0 = apply immediately)
    pub duration_ms: u32,
}

impl OptionVisual {
    pub fn is_visible(&self) -> bool {
        self.transform != OptionTransform::Hidden
    }
}

/// Render port of a picker column
pub trait ColumnRenderer {
    /// Apply the new visual state of the option at `index`
    fn apply_option(&mut self, index: usize, visual: &OptionVisual);
}

/// Renderer that draws nothing
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl ColumnRenderer for NullRenderer {
    fn apply_option(&mut self, _index: usize, _visual: &OptionVisual) {}
}

/// Translation applied to wheel options so they sit on the drum surface
const WHEEL_TRANSLATE_Z: f64 = 90.0;

/// Index of the slot under the center line for offset `y`.
///
/// Returns `None` for an empty column. An unmeasured option height resolves
/// to the first option.
pub fn index_for_offset(y: f64, option_height: f64, option_count: usize) -> Option<usize> {
    let last = option_count.checked_sub(1)?;
    if !(option_height > 0.0) || !y.is_finite() {
        return Some(0);
    }
    let slot = clamp(0.0, round_half_up(-y / option_height), last as f64);
    Some(slot as usize)
}

/// Visual state of option `index` when the column sits at offset `y`
pub fn project_option(
    index: usize,
    y: f64,
    option_height: f64,
    selected: bool,
    duration_ms: u32,
    config: &PickerConfig,
) -> OptionVisual {
    let offset = index as f64 * option_height + y;

    let transform = if config.is_wheel() {
        let rotate_x = offset * config.rotate_factor;
        if rotate_x.abs() > config.wheel_visibility_deg {
            OptionTransform::Hidden
        } else {
            OptionTransform::Wheel {
                rotate_x,
                translate_z: WHEEL_TRANSLATE_Z,
            }
        }
    } else if offset.abs() > config.flat_visibility_px {
        OptionTransform::Hidden
    } else {
        OptionTransform::Flat {
            translate_y: offset,
        }
    };

    let shrink = transform != OptionTransform::Hidden && !selected && config.scale_factor != 1.0;

    OptionVisual {
        transform,
        scale: if shrink { config.scale_factor } else { 1.0 },
        selected,
        duration_ms,
    }
}

/// Last visual state handed to the renderer, per option
#[derive(Clone, Debug, Default)]
pub struct VisualCache {
    applied: Vec<Option<OptionVisual>>,
}

impl VisualCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `visual` for `index`; returns `true` if it differs from the
    /// previously recorded state.
    pub fn record(&mut self, index: usize, visual: OptionVisual) -> bool {
        if index >= self.applied.len() {
            self.applied.resize(index + 1, None);
        }
        let slot = &mut self.applied[index];
        if slot.as_ref() == Some(&visual) {
            return false;
        }
        *slot = Some(visual);
        true
    }

    /// Forget everything (options replaced)
    pub fn clear(&mut self) {
        self.applied.clear();
    }

    pub fn get(&self, index: usize) -> Option<&OptionVisual> {
        self.applied.get(index).and_then(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_for_offset_rounds_and_clamps() {
        assert_eq!(index_for_offset(0.0, 30.0, 3), Some(0));
        assert_eq!(index_for_offset(-30.0, 30.0, 3), Some(1));
        assert_eq!(index_for_offset(-44.0, 30.0, 3), Some(1));
        assert_eq!(index_for_offset(-45.0, 30.0, 3), Some(2));
        assert_eq!(index_for_offset(-500.0, 30.0, 3), Some(2));
        assert_eq!(index_for_offset(25.0, 30.0, 3), Some(0));
    }

    #[test]
    fn test_index_for_offset_degenerate_inputs() {
        assert_eq!(index_for_offset(-30.0, 30.0, 0), None);
        assert_eq!(index_for_offset(-30.0, 0.0, 3), Some(0));
        assert_eq!(index_for_offset(f64::NAN, 30.0, 3), Some(0));
    }

    #[test]
    fn test_flat_projection_hides_far_options() {
        let config = PickerConfig::default();
        let near = project_option(2, -30.0, 30.0, false, 0, &config);
        assert_eq!(near.transform, OptionTransform::Flat { translate_y: 30.0 });
        assert_eq!(near.scale, 1.0);

        let far = project_option(7, 0.0, 30.0, false, 0, &config);
        assert!(!far.is_visible());
    }

    #[test]
    fn test_wheel_projection_rotates_and_scales() {
        let config = PickerConfig::wheel();
        let neighbour = project_option(1, 0.0, 30.0, false, 150, &config);
        match neighbour.transform {
            OptionTransform::Wheel {
                rotate_x,
                translate_z,
            } => {
                assert!((rotate_x - 30.0 * -0.46).abs() < 1e-9);
                assert_eq!(translate_z, 90.0);
            }
            other => panic!("expected wheel transform, got {other:?}"),
        }
        assert_eq!(neighbour.scale, 0.85);
        assert_eq!(neighbour.duration_ms, 150);

        let selected = project_option(0, 0.0, 30.0, true, 0, &config);
        assert_eq!(selected.scale, 1.0);

        // 200px * 0.46 = 92 degrees, past the drum edge
        let behind = project_option(0, 200.0, 30.0, false, 0, &config);
        assert!(!behind.is_visible());
        assert_eq!(behind.scale, 1.0);
    }

    #[test]
    fn test_cache_reports_only_changes() {
        let config = PickerConfig::default();
        let mut cache = VisualCache::new();
        let visual = project_option(0, 0.0, 30.0, true, 0, &config);

        assert!(cache.record(0, visual));
        assert!(!cache.record(0, visual));
        assert!(cache.record(0, OptionVisual { duration_ms: 100, ..visual }));
        assert_eq!(cache.get(0).map(|v| v.duration_ms), Some(100));

        cache.clear();
        assert!(cache.get(0).is_none());
    }
}
