//! Integration tests for awww-widgets.
//!
//! These tests drive widgets with raw device events through `Controlled`
//! and check what listeners and hosts observe.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use awww_core::{DeviceEvent, Modifiers, OptionSet, OptionValue};
use awww_widgets::{
    Configurable, Controlled, Knob, Layout, Mountable, ParamIndex, PluginHost, RANGE_OPTIONS,
    RESIZE_OPTIONS, ResizeHandle, Size, ValueHolder, WidgetEvent, bind_parameter, bind_size,
};

const M: Modifiers = Modifiers::NONE;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn record<W>(widget: &mut W) -> Rc<RefCell<Vec<WidgetEvent<W::Value>>>>
where
    W: ValueHolder,
    W::Value: 'static,
{
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    widget
        .notifier_mut()
        .subscribe(move |ev| sink.borrow_mut().push(ev.clone()));
    log
}

#[derive(Debug, Default)]
struct Host {
    calls: RefCell<Vec<String>>,
}

impl PluginHost for Host {
    fn begin_edit(&self, index: ParamIndex) {
        self.calls.borrow_mut().push(format!("begin {index}"));
    }

    fn set_parameter(&self, index: ParamIndex, value: f32) {
        self.calls.borrow_mut().push(format!("set {index} {value}"));
    }

    fn end_edit(&self, index: ParamIndex) {
        self.calls.borrow_mut().push(format!("end {index}"));
    }

    fn set_size(&self, width: f32, height: f32) {
        self.calls.borrow_mut().push(format!("size {width}x{height}"));
    }
}

/// minWidth=minHeight=100 with maxScale=2: aspect-locked +50,+50 from
/// 100x100 gives 150x150, and overshooting clamps to 200x200.
#[test]
fn test_resize_limits_and_aspect_lock() {
    let options = OptionSet::new(&RESIZE_OPTIONS).with("keepAspectRatio", true);
    let handle = ResizeHandle::from_options(options);
    assert_eq!(handle.max_size(), Size::new(200.0, 200.0));

    let layout = Layout::new(Size::new(16.0, 16.0)).with_container(Size::new(100.0, 100.0));
    let mut ctl = Controlled::new(handle, ());
    ctl.widget_mut().mount(&layout);

    ctl.handle(DeviceEvent::MouseDown { x: 100.0, y: 100.0, button: 0, modifiers: M }, ms(0), &layout);
    ctl.handle(DeviceEvent::MouseMove { x: 150.0, y: 150.0, modifiers: M }, ms(10), &layout);
    assert_eq!(ctl.widget().value(), Size::new(150.0, 150.0));

    ctl.handle(DeviceEvent::MouseMove { x: 400.0, y: 400.0, modifiers: M }, ms(20), &layout);
    assert_eq!(ctl.widget().value(), Size::new(200.0, 200.0));

    ctl.handle(DeviceEvent::MouseUp { x: 400.0, y: 400.0, modifiers: M }, ms(30), &layout);
    assert!(!ctl.is_active());
}

/// A knob at 0.5 on [0, 1], dragged right in 10px steps on a 200px widget,
/// rises monotonically and stops at 1.0.
#[test]
fn test_knob_horizontal_drag_is_monotonic() {
    let layout = Layout::new(Size::new(200.0, 200.0));
    let mut ctl = Controlled::new(Knob::new(), ());
    ctl.widget_mut().set_value(0.5);
    ctl.widget_mut().mount(&layout);

    ctl.handle(DeviceEvent::MouseDown { x: 0.0, y: 0.0, button: 0, modifiers: M }, ms(0), &layout);
    let mut last = ctl.widget().value();
    for step in 1..=20 {
        let x = step as f32 * 10.0;
        ctl.handle(DeviceEvent::MouseMove { x, y: 0.0, modifiers: M }, ms(step), &layout);
        let value = ctl.widget().value();
        assert!(value >= last, "step {step}: {value} < {last}");
        assert!(value <= 1.0);
        last = value;
    }
    assert_eq!(last, 1.0);
    assert_eq!(ctl.widget().drag_axis(), Some(awww_widgets::Axis::Horizontal));
}

/// One wheel tick yields a gesture that ends by itself after 100ms, with
/// the host seeing a complete edit bracket.
#[test]
fn test_wheel_gesture_reaches_host() {
    let host = Rc::new(Host::default());
    let layout = Layout::new(Size::new(50.0, 50.0));
    let mut ctl = Controlled::new(Knob::new(), ());
    ctl.widget_mut().mount(&layout);
    bind_parameter(ctl.widget_mut(), Rc::clone(&host), ParamIndex(1));

    let tick = DeviceEvent::Wheel {
        x: 5.0,
        y: 5.0,
        delta_x: 0.0,
        delta_y: -100.0,
        modifiers: Modifiers::SHIFT,
        inverted: false,
    };
    assert!(ctl.handle(tick, ms(0), &layout));
    assert_eq!(ctl.next_deadline(), Some(ms(100)));
    assert!(!ctl.poll(ms(50), &layout));
    assert!(ctl.poll(ms(100), &layout));

    let calls = host.calls.borrow();
    assert_eq!(calls.first().map(String::as_str), Some("begin 1"));
    assert!(calls[1].starts_with("set 1 "));
    assert_eq!(calls.last().map(String::as_str), Some("end 1"));
    assert_eq!(calls.len(), 3);
}

/// Narrowing the range clamps the stored value and announces only the
/// clamped value.
#[test]
fn test_range_change_announces_clamped_value() {
    let options = OptionSet::new(&RANGE_OPTIONS).with("max", 10.0_f32);
    let mut knob = Knob::from_options(options);
    knob.set_value(9.0);
    knob.mount(&Layout::default());
    let log = record(&mut knob);

    knob.set_option("maxValue", OptionValue::Float(4.0));
    knob.set_option("minValue", OptionValue::Float(5.0));

    let seen = log.borrow();
    assert_eq!(*seen, [WidgetEvent::SetValue(4.0), WidgetEvent::SetValue(5.0)]);
    assert!(!seen.contains(&WidgetEvent::SetValue(9.0)));
}

/// A resize drag through a bound host requests each new size once.
#[test]
fn test_resize_reaches_host() {
    let host = Rc::new(Host::default());
    let layout = Layout::new(Size::new(16.0, 16.0)).with_container(Size::new(120.0, 120.0));
    let mut ctl = Controlled::new(ResizeHandle::new(), ());
    ctl.widget_mut().mount(&layout);
    bind_size(ctl.widget_mut(), Rc::clone(&host));

    let start = DeviceEvent::TouchStart { x: 0.0, y: 0.0, modifiers: M, cancelable: true };
    let moved = DeviceEvent::TouchMove { x: 30.0, y: 10.0, modifiers: M, cancelable: true };
    let same = DeviceEvent::TouchMove { x: 30.0, y: 10.0, modifiers: M, cancelable: true };
    let end = DeviceEvent::TouchEnd { x: 30.0, y: 10.0, modifiers: M, cancelable: true };
    for (i, ev) in [start, moved, same, end].into_iter().enumerate() {
        assert!(ctl.handle(ev, ms(i as u64), &layout));
    }

    assert_eq!(*host.calls.borrow(), ["size 150x130"]);
}

/// Attributes arrive as strings; malformed ones leave options alone.
#[test]
fn test_attribute_strings() {
    let mut handle = ResizeHandle::new();
    assert!(handle.set_attribute("minwidth", "320px"));
    assert!(handle.set_attribute("keepAspectRatio", "true"));
    assert!(!handle.set_attribute("keepAspectRatio", "yes"));
    assert!(!handle.set_attribute("minHeight", "tall"));

    assert_eq!(handle.min_size(), Size::new(320.0, 100.0));
    assert_eq!(handle.max_size(), Size::new(640.0, 200.0));
    assert!(handle.options().bool("keepAspectRatio"));
    assert!((handle.aspect_ratio() - 3.2).abs() < 1e-6);
}

/// Input before mount is ignored; mount announces the current value.
#[test]
fn test_two_phase_initialization() {
    let layout = Layout::new(Size::new(100.0, 100.0));
    let mut ctl = Controlled::new(Knob::new(), ());
    let log = record(ctl.widget_mut());

    ctl.handle(DeviceEvent::MouseDown { x: 0.0, y: 0.0, button: 0, modifiers: M }, ms(0), &layout);
    ctl.handle(DeviceEvent::MouseMove { x: 50.0, y: 0.0, modifiers: M }, ms(1), &layout);
    ctl.handle(DeviceEvent::MouseUp { x: 50.0, y: 0.0, modifiers: M }, ms(2), &layout);
    assert!(log.borrow().is_empty());

    ctl.widget_mut().mount(&layout);
    assert_eq!(*log.borrow(), [WidgetEvent::SetValue(0.0)]);
}
