//! Integration tests for awww-config.
//!
//! These tests verify layout files round trip through disk and build into
//! working widgets.

use std::cell::RefCell;
use std::rc::Rc;

use awww_config::{BuiltWidget, ConfigError, Layout, WidgetConfig, WidgetKind};
use awww_core::{ControlEvent, ControlPhase, InputSource, Modifiers, Scale};
use awww_widgets::{
    Configurable, ControlTarget, Layout as ViewGeometry, Mountable, ParamIndex, PluginHost, Size,
    ValueFormat, ValueHolder, bind_parameter,
};
use tempfile::TempDir;

fn sample() -> Layout {
    Layout::new("Filter")
        .with_widget(
            WidgetConfig::new("cutoff", "knob")
                .with_parameter(0)
                .with_format("hz")
                .with_option("min", "20")
                .with_option("max", "20000")
                .with_option("scale", "log")
                .with_option("value", "440"),
        )
        .with_widget(
            WidgetConfig::new("size", "resize")
                .with_option("minWidth", "320")
                .with_option("minHeight", "200")
                .with_option("keepAspectRatio", "true"),
        )
}

/// Save a layout, load it back, and get the same layout.
#[test]
fn test_layout_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("views").join("filter.toml");

    let layout = sample();
    layout.save(&path).expect("should save layout");
    let loaded = Layout::load(&path).expect("should load layout");

    assert_eq!(loaded, layout);
    assert_eq!(loaded.get("cutoff").and_then(|w| w.option("scale")), Some("log"));
}

/// Missing files report the path.
#[test]
fn test_missing_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let err = Layout::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

/// Malformed TOML is a parse error.
#[test]
fn test_malformed_toml_is_parse_error() {
    let err = Layout::from_toml("[[widgets]\nid = ").unwrap_err();
    assert!(matches!(err, ConfigError::TomlParse(_)));
}

/// Built widgets carry their options, binding and format.
#[test]
fn test_build_sample() {
    let widgets = sample().build().expect("should build");
    assert_eq!(widgets.len(), 2);
    assert_eq!(widgets[0].kind(), WidgetKind::Knob);
    assert_eq!(widgets[1].id(), "size");

    match &widgets[0] {
        BuiltWidget::Knob {
            parameter,
            format,
            knob,
            ..
        } => {
            assert_eq!(*parameter, Some(ParamIndex(0)));
            assert_eq!(*format, ValueFormat::Hertz);
            assert_eq!(knob.value(), 440.0);
            assert_eq!(knob.ranged().range().scale, Scale::Logarithmic);
            assert_eq!(format.format(knob.value()), "440 Hz");
        }
        other => panic!("expected knob, got {other:?}"),
    }

    match &widgets[1] {
        BuiltWidget::Resize { handle, .. } => {
            assert_eq!(handle.max_size(), Size::new(640.0, 400.0));
            assert!(handle.options().bool("keepAspectRatio"));
        }
        other => panic!("expected resize handle, got {other:?}"),
    }
}

#[derive(Default)]
struct Host {
    writes: RefCell<Vec<(ParamIndex, f32)>>,
}

impl PluginHost for Host {
    fn set_parameter(&self, index: ParamIndex, value: f32) {
        self.writes.borrow_mut().push((index, value));
    }
}

/// A knob built from a layout drives its bound parameter.
#[test]
fn test_built_knob_drives_host() {
    let mut widgets = sample().build().unwrap();
    let BuiltWidget::Knob {
        parameter: Some(index),
        knob,
        ..
    } = &mut widgets[0]
    else {
        panic!("expected bound knob");
    };

    let host = Rc::new(Host::default());
    let geometry = ViewGeometry::new(Size::new(100.0, 100.0));
    knob.mount(&geometry);
    bind_parameter(knob, Rc::clone(&host), *index);

    knob.on_control(&drag_event(ControlPhase::Start, 0.0), &geometry);
    knob.on_control(&drag_event(ControlPhase::Continue, 5.0), &geometry);

    let writes = host.writes.borrow();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].0, ParamIndex(0));
    assert!(writes[0].1 > 440.0);
}

fn drag_event(phase: ControlPhase, movement_x: f32) -> ControlEvent {
    ControlEvent {
        phase,
        source: InputSource::Mouse,
        x: 0.0,
        y: 0.0,
        movement_x,
        movement_y: 0.0,
        modifiers: Modifiers::NONE,
    }
}

/// Duplicate ids stop the build.
#[test]
fn test_duplicate_ids_stop_build() {
    let layout = sample().with_widget(WidgetConfig::new("cutoff", "knob"));
    assert!(matches!(layout.build(), Err(ConfigError::DuplicateId(_))));
}
