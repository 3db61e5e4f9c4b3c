//! Headless Fling Demo
//!
//! Drives a month picker without any UI:
//! - Loads a wheel configuration from TOML
//! - Flings the column with a synthetic touch gesture
//! - Steps frames at 60fps until it snaps onto a month
//!
//! Run with: RUST_LOG=tumbler_picker=trace cargo run -p tumbler_picker --example headless_fling

use std::rc::Rc;

use tumbler_core::{PointerEvent, PointerPhase};
use tumbler_picker::{
    ColumnDef, ColumnGeometry, ColumnRenderer, OptionTransform, OptionVisual, PickerColumn,
    PickerConfig, PickerOption, Result, SelectionFeedback,
};

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const CONFIG: &str = r#"
rotate_factor = -0.46
scale_factor = 0.85

[physics]
friction = 0.95
"#;

/// Prints the option that sits under the center line whenever it changes
struct CenterLine;

impl ColumnRenderer for CenterLine {
    fn apply_option(&mut self, index: usize, visual: &OptionVisual) {
        if !visual.selected {
            return;
        }
        if let OptionTransform::Wheel { rotate_x, .. } = visual.transform {
            println!("  center: {:<10} rotate_x={rotate_x:+.1}", MONTHS[index]);
        }
    }
}

struct Haptics;

impl SelectionFeedback for Haptics {
    fn selection_changed(&self) {
        tracing::trace!("tick");
    }

    fn selection_end(&self) {
        tracing::info!("snap");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = PickerConfig::from_toml_str(CONFIG)?;
    let def = ColumnDef::new("month")
        .with_options(
            MONTHS
                .iter()
                .enumerate()
                .map(|(i, name)| PickerOption::new(*name, i + 1)),
        )
        .selected(1);

    let mut column = PickerColumn::new(def, config, Box::new(CenterLine), Rc::new(Haptics));
    column.on_change(|change| {
        println!("changed: {} = {}", change.column, change.option.text);
    });
    column.init(ColumnGeometry::new(200.0, 34.0));

    // Quick upward flick: 150px in 50ms
    let mut t = 0.0;
    column.pointer_start(&PointerEvent::touch(PointerPhase::Down, 0.0, 400.0, t));
    for y in [370.0, 330.0, 290.0, 250.0] {
        t += 12.5;
        column.pointer_move(&PointerEvent::touch(PointerPhase::Move, 0.0, y, t));
        column.on_animation_frame();
    }
    column.pointer_end(&PointerEvent::touch(PointerPhase::Up, 0.0, 250.0, t));
    println!("released at {:.0}px, velocity {:.1}px/frame", column.offset(), column.velocity());

    let mut frames = 0;
    while column.on_animation_frame() {
        frames += 1;
    }

    println!(
        "settled after {frames} frames (~{:.0}ms) on {}",
        frames as f64 * column.config().physics.frame_ms,
        column.selected_option().map_or("-", |o| o.text.as_str())
    );
    Ok(())
}
