//! Rotary knob.
//!
//! A knob is dragged rather than rotated. Each drag classifies its dominant
//! axis from the last [`AXIS_WINDOW`] movement samples, accumulates movement
//! along that axis through a non-linear response curve and maps the
//! accumulated distance to a change in control space relative to the knob's
//! width:
//!
//! ```text
//! distance += 0.1·d + 0.05·sign(d)·d² + 0.005·d³
//! position  = clamp01(position_at_grab + distance / width)
//! ```
//!
//! Small movements give fine control; fast flicks cover the whole range.
//!
//! # Options
//!
//! | Key     | Alias      | Kind   | Default  |
//! |---------|------------|--------|----------|
//! | `min`   | `minValue` | float  | `0`      |
//! | `max`   | `maxValue` | float  | `1`      |
//! | `scale` |            | string | `linear` |
//!
//! The `value` attribute sets the value directly and falls back to `min`
//! when malformed.

use std::collections::VecDeque;

use awww_core::{
    ControlEvent, ControlPhase, InputSource, OptionDescriptor, OptionSet, clamp_normalized,
    parse_float,
};

use crate::notify::{Notifier, WidgetEvent};
use crate::ranged::{RANGE_OPTIONS, RangedValue, is_range_key, range_from_options};
use crate::widget::{
    Configurable, ControlTarget, CursorHint, Layout, Mountable, ValueHolder, apply_attribute,
};

/// Number of movement samples the axis vote runs over.
pub const AXIS_WINDOW: usize = 20;

/// Angle of the track start, in degrees from twelve o'clock.
pub const ARC_START_DEGREES: f32 = -135.0;

/// Angle of the track end, in degrees from twelve o'clock.
pub const ARC_END_DEGREES: f32 = 135.0;

const RESPONSE_LINEAR: f32 = 0.1;
const RESPONSE_QUADRATIC: f32 = 0.05;
const RESPONSE_CUBIC: f32 = 0.005;

/// Drag distance contributed by one movement step of `d` pixels.
///
/// Odd in `d`: dragging back by the same amount undoes the step.
pub fn response(d: f32) -> f32 {
    let sign = if d < 0.0 { -1.0 } else { 1.0 };
    RESPONSE_LINEAR * d + RESPONSE_QUADRATIC * sign * d * d + RESPONSE_CUBIC * d * d * d
}

/// Dominant drag direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Left/right drags change the value.
    Horizontal,
    /// Up/down drags change the value.
    Vertical,
}

/// Sliding majority vote over recent movement samples.
#[derive(Debug, Clone, Default)]
struct AxisTracker {
    samples: VecDeque<f32>,
}

impl AxisTracker {
    fn push(&mut self, dx: f32, dy: f32) -> Axis {
        if self.samples.len() == AXIS_WINDOW {
            self.samples.pop_front();
        }
        self.samples.push_back(dx.abs() - dy.abs());

        if self.samples.iter().sum::<f32>() > 0.0 {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }
}

#[derive(Debug, Clone)]
struct Drag {
    start: f32,
    distance: f32,
    axis: AxisTracker,
    last_axis: Option<Axis>,
}

/// Rotary knob over a scaled range.
///
/// # Example
///
/// ```rust
/// use awww_widgets::{Knob, Layout, Mountable, Size, ValueHolder, WidgetEvent};
///
/// let mut knob = Knob::new();
/// knob.set_value(0.25);
/// knob.subscribe(|ev| {
///     if let WidgetEvent::SetValue(v) = ev {
///         assert_eq!(*v, 0.25);
///     }
/// });
/// knob.mount(&Layout::new(Size::new(64.0, 64.0)));
/// assert_eq!(knob.value_angle(), -67.5);
/// ```
#[derive(Debug)]
pub struct Knob {
    options: OptionSet,
    value: RangedValue,
    notifier: Notifier<f32>,
    mounted: bool,
    drag: Option<Drag>,
    cursor: CursorHint,
}

impl Knob {
    /// Option table recognized by knobs.
    pub fn descriptors() -> &'static [OptionDescriptor] {
        &RANGE_OPTIONS
    }

    /// Knob with default options: `[0, 1]`, linear.
    pub fn new() -> Self {
        Self::from_options(OptionSet::new(&RANGE_OPTIONS))
    }

    /// Knob with the given options. The value starts at `min`.
    pub fn from_options(options: OptionSet) -> Self {
        let value = RangedValue::new(range_from_options(&options));
        Self {
            options,
            value,
            notifier: Notifier::new(),
            mounted: false,
            drag: None,
            cursor: CursorHint::Default,
        }
    }

    /// Value range and stored value.
    pub fn ranged(&self) -> &RangedValue {
        &self.value
    }

    /// Position along the track, in `[0, 1]` for values inside the range.
    pub fn arc_fraction(&self) -> f32 {
        self.value.normalized()
    }

    /// Indicator angle in degrees, twelve o'clock being zero.
    pub fn value_angle(&self) -> f32 {
        let t = clamp_normalized(self.arc_fraction());
        ARC_START_DEGREES + (ARC_END_DEGREES - ARC_START_DEGREES) * t
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Axis the current drag is following.
    pub fn drag_axis(&self) -> Option<Axis> {
        self.drag.as_ref().and_then(|d| d.last_axis)
    }

    fn grab(&mut self) {
        self.drag = Some(Drag {
            start: self.value.normalized(),
            distance: 0.0,
            axis: AxisTracker::default(),
            last_axis: None,
        });
        tracing::debug!(value = self.value.value(), "knob grab");
        self.notifier.emit(&WidgetEvent::GestureBegin);
    }

    fn drag_to(&mut self, event: &ControlEvent, layout: &Layout) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };

        let axis = drag.axis.push(event.movement_x, event.movement_y);
        drag.last_axis = Some(axis);
        if event.source != InputSource::Wheel {
            self.cursor = match axis {
                Axis::Horizontal => CursorHint::EwResize,
                Axis::Vertical => CursorHint::NsResize,
            };
        }

        let d = match axis {
            Axis::Horizontal => event.movement_x,
            Axis::Vertical => -event.movement_y,
        };
        drag.distance += response(d);

        let width = layout.size.width;
        if width <= 0.0 {
            return;
        }
        let position = drag.start + drag.distance / width;

        if self.value.set_normalized(position) {
            let value = self.value.value();
            self.notifier.emit(&WidgetEvent::SetValue(value));
            self.notifier.emit(&WidgetEvent::Input(value));
        }
    }

    fn release(&mut self) {
        if self.drag.take().is_some() {
            self.cursor = CursorHint::Default;
            tracing::debug!(value = self.value.value(), "knob release");
            self.notifier.emit(&WidgetEvent::GestureEnd);
        }
    }
}

impl Default for Knob {
    fn default() -> Self {
        Self::new()
    }
}

impl Configurable for Knob {
    fn options(&self) -> &OptionSet {
        &self.options
    }

    fn options_mut(&mut self) -> &mut OptionSet {
        &mut self.options
    }

    fn option_updated(&mut self, key: &str) {
        if !is_range_key(key) {
            return;
        }
        let range = range_from_options(&self.options);
        if self.value.set_range(range) {
            self.notifier.emit(&WidgetEvent::SetValue(self.value.value()));
        }
    }

    fn set_attribute(&mut self, name: &str, raw: &str) -> bool {
        if name.eq_ignore_ascii_case("value") {
            let value = parse_float(raw, self.value.range().min);
            self.set_value(value);
            true
        } else {
            apply_attribute(self, name, raw)
        }
    }
}

impl ValueHolder for Knob {
    type Value = f32;

    fn value(&self) -> f32 {
        self.value.value()
    }

    fn set_value(&mut self, value: f32) {
        if self.value.set(value) {
            self.notifier.emit(&WidgetEvent::SetValue(self.value.value()));
        }
    }

    fn notifier_mut(&mut self) -> &mut Notifier<f32> {
        &mut self.notifier
    }
}

impl Mountable for Knob {
    fn mount(&mut self, _layout: &Layout) {
        self.mounted = true;
        self.notifier.emit(&WidgetEvent::SetValue(self.value.value()));
    }

    fn unmount(&mut self) {
        self.release();
        self.mounted = false;
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}

impl ControlTarget for Knob {
    fn on_control(&mut self, event: &ControlEvent, layout: &Layout) {
        if !self.mounted {
            return;
        }
        match event.phase {
            ControlPhase::Start => self.grab(),
            ControlPhase::Continue => self.drag_to(event, layout),
            ControlPhase::End => self.release(),
        }
    }

    fn cursor(&self) -> CursorHint {
        self.cursor
    }
}
