//! Multi-column picker tests
//!
//! A three-wheel time picker configured from TOML, driven through the
//! picker-level routing API.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;
use tumbler_core::{PointerEvent, PointerPhase};
use tumbler_picker::{
    ColumnDef, ColumnGeometry, ColumnRenderer, NullRenderer, OptionTransform, OptionVisual, Picker,
    PickerConfig, PickerError, PickerOption, Selection,
};

const WHEEL_CONFIG: &str = r#"
rotate_factor = -0.46
scale_factor = 0.85

[physics]
select_duration_ms = 200
"#;

const HOUR: usize = 0;
const MINUTE: usize = 1;
const AMPM: usize = 2;

type RenderLog = Rc<RefCell<Vec<(usize, OptionVisual)>>>;

struct RecordingRenderer(RenderLog);

impl ColumnRenderer for RecordingRenderer {
    fn apply_option(&mut self, index: usize, visual: &OptionVisual) {
        self.0.borrow_mut().push((index, *visual));
    }
}

fn touch(phase: PointerPhase, y: f64, t: f64) -> PointerEvent {
    PointerEvent::touch(phase, 0.0, y, t)
}

/// hour / minute / ampm picker; returns the minute column's render log
fn time_picker(config: PickerConfig) -> (Picker, RenderLog) {
    let minute_renders: RenderLog = Rc::new(RefCell::new(Vec::new()));
    let mut picker = Picker::new(config);

    picker.add_column(
        ColumnDef::new("hour").with_options((1..=12).map(|h| PickerOption::new(h.to_string(), h))),
        Box::new(NullRenderer),
    );
    picker.add_column(
        ColumnDef::new("minute")
            .with_options((0..60).step_by(5).map(|m| PickerOption::new(format!("{m:02}"), m))),
        Box::new(RecordingRenderer(minute_renders.clone())),
    );

    // Hosts typically ship column definitions as JSON
    let ampm: ColumnDef = serde_json::from_value(json!({
        "name": "ampm",
        "align": "right",
        "options": [
            { "text": "AM", "value": "am" },
            { "text": "PM", "value": "pm" }
        ]
    }))
    .unwrap();
    picker.add_column(ampm, Box::new(NullRenderer));

    picker.init(ColumnGeometry::new(200.0, 34.0));
    (picker, minute_renders)
}

fn record_selections(picker: &mut Picker) -> Rc<RefCell<Vec<Selection>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    picker.on_change(move |selection| sink.borrow_mut().push(selection.clone()));
    seen
}

fn wheel_config() -> PickerConfig {
    PickerConfig::from_toml_str(WHEEL_CONFIG).unwrap()
}

#[test]
fn initial_selection_is_first_option_of_every_column() {
    let (picker, _) = time_picker(wheel_config());
    let selection = picker.selected();

    assert_eq!(
        serde_json::to_value(&selection).unwrap(),
        json!({
            "hour": { "text": "1", "value": 1, "column_index": 0 },
            "minute": { "text": "00", "value": 0, "column_index": 1 },
            "ampm": { "text": "AM", "value": "am", "column_index": 2 }
        })
    );
}

#[test]
fn drag_on_one_column_reports_the_whole_selection_once() {
    let (mut picker, _) = time_picker(wheel_config());
    let seen = record_selections(&mut picker);

    // Exactly two slots up, then hold still before lifting
    picker.pointer_start(MINUTE, &touch(PointerPhase::Down, 300.0, 0.0)).unwrap();
    picker.pointer_move(MINUTE, &touch(PointerPhase::Move, 232.0, 40.0)).unwrap();
    picker.on_animation_frame();
    assert!(seen.borrow().is_empty(), "dragging must not report");

    picker.pointer_end(MINUTE, &touch(PointerPhase::Up, 232.0, 400.0)).unwrap();
    while picker.on_animation_frame() {}

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0]["minute"].text.as_deref(), Some("10"));
    assert_eq!(seen[0]["minute"].value, Some(json!(10)));
    assert_eq!(seen[0]["hour"].text.as_deref(), Some("1"));
    assert_eq!(picker.column(MINUTE).unwrap().offset(), -68.0);
}

#[test]
fn wheel_config_rotates_neighbouring_options() {
    let (_, renders) = time_picker(wheel_config());
    let renders = renders.borrow();

    let (_, neighbour) = renders
        .iter()
        .find(|(index, _)| *index == 1)
        .expect("option 1 was rendered on init");
    match neighbour.transform {
        OptionTransform::Wheel { rotate_x, .. } => assert!((rotate_x - 34.0 * -0.46).abs() < 1e-9),
        other => panic!("expected a wheel transform, got {other:?}"),
    }
    assert_eq!(neighbour.scale, 0.85);

    // 204px below the center line is past the drum edge
    let (_, far) = renders.iter().find(|(index, _)| *index == 6).unwrap();
    assert_eq!(far.transform, OptionTransform::Hidden);
}

#[test]
fn tap_uses_configured_select_duration() {
    let (mut picker, renders) = time_picker(wheel_config());
    renders.borrow_mut().clear();

    let disposition = picker.option_click(MINUTE, 3).unwrap();
    assert!(disposition.stop_propagation);
    assert_eq!(picker.column(MINUTE).unwrap().offset(), -102.0);
    assert!(renders.borrow().iter().all(|(_, visual)| visual.duration_ms == 200));
}

#[test]
fn columns_move_independently() {
    let (mut picker, _) = time_picker(PickerConfig::default());
    let seen = record_selections(&mut picker);

    picker.pointer_start(HOUR, &touch(PointerPhase::Down, 400.0, 0.0)).unwrap();
    picker.pointer_move(HOUR, &touch(PointerPhase::Move, 350.0, 16.0)).unwrap();
    picker.on_animation_frame();
    picker.pointer_move(HOUR, &touch(PointerPhase::Move, 300.0, 32.0)).unwrap();
    picker.on_animation_frame();
    picker.pointer_end(HOUR, &touch(PointerPhase::Up, 300.0, 48.0)).unwrap();
    assert!(picker.is_animating());

    // The hour wheel is still coasting; the ampm wheel accepts the tap
    picker.option_click(AMPM, 1).unwrap();
    assert_eq!(picker.column(AMPM).unwrap().selected_index(), Some(1));

    while picker.on_animation_frame() {}

    let hour = picker.column(HOUR).unwrap();
    assert_eq!(hour.offset() % 34.0, 0.0);
    assert!(hour.selected_index().unwrap() > 2);

    let last = seen.borrow().last().cloned().unwrap();
    assert_eq!(last["ampm"].text.as_deref(), Some("PM"));
    assert_eq!(last["hour"].text, hour.selected_option().map(|o| o.text.clone()));
}

#[test]
fn refresh_moves_off_disabled_options() {
    let (mut picker, _) = time_picker(PickerConfig::default());
    let seen = record_selections(&mut picker);

    let hour = picker.column_mut(HOUR).unwrap();
    hour.set_disabled(0, true);
    hour.set_disabled(1, true);
    picker.refresh();

    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(picker.selected()["hour"].text.as_deref(), Some("3"));

    picker.refresh();
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn unknown_column_is_reported() {
    let (mut picker, _) = time_picker(PickerConfig::default());

    let err = picker
        .pointer_start(7, &touch(PointerPhase::Down, 100.0, 0.0))
        .unwrap_err();
    assert!(matches!(err, PickerError::ColumnOutOfRange { index: 7, len: 3 }));
    assert_eq!(err.to_string(), "Column 7 out of range (picker has 3 columns)");
}

#[test]
fn removed_listener_is_not_called() {
    let (mut picker, _) = time_picker(PickerConfig::default());
    let seen = Rc::new(RefCell::new(0));
    let sink = seen.clone();
    let id = picker.on_change(move |_| *sink.borrow_mut() += 1);

    picker.option_click(AMPM, 1).unwrap();
    assert!(picker.remove_listener(id));
    picker.option_click(AMPM, 0).unwrap();

    assert_eq!(*seen.borrow(), 1);
    assert!(!picker.remove_listener(id));
}

#[test]
fn destroy_stops_every_column() {
    let (mut picker, _) = time_picker(PickerConfig::default());

    picker.pointer_start(HOUR, &touch(PointerPhase::Down, 400.0, 0.0)).unwrap();
    picker.pointer_move(HOUR, &touch(PointerPhase::Move, 300.0, 16.0)).unwrap();
    picker.pointer_end(HOUR, &touch(PointerPhase::Up, 300.0, 32.0)).unwrap();
    assert!(picker.is_animating());

    picker.destroy();
    assert!(!picker.on_animation_frame());
    assert!(picker.columns().all(|column| !column.is_attached()));
}
