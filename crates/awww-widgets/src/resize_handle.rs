//! Drag handle that resizes the plugin view.
//!
//! The handle lives in a corner of the view. A drag starts from the view's
//! current size and applies each movement step to it, clamping each axis to
//! its limits and optionally locking the aspect ratio.
//!
//! # Options
//!
//! | Key               | Kind  | Default |
//! |-------------------|-------|---------|
//! | `minWidth`        | int   | `100`   |
//! | `minHeight`       | int   | `100`   |
//! | `maxWidth`        | int   | `0`     |
//! | `maxHeight`       | int   | `0`     |
//! | `maxScale`        | float | `2`     |
//! | `keepAspectRatio` | bool  | `false` |
//!
//! A positive `maxScale` overrides both maximums with `maxScale × minimum`.
//! A maximum of zero leaves that axis unbounded.

use awww_core::{
    ControlEvent, ControlPhase, OptionDescriptor, OptionKind, OptionSet, OptionValue, clamp,
};

use crate::notify::{Notifier, WidgetEvent};
use crate::widget::{Configurable, ControlTarget, CursorHint, Layout, Mountable, Size, ValueHolder};

/// Option table recognized by resize handles.
pub static RESIZE_OPTIONS: [OptionDescriptor; 6] = [
    OptionDescriptor {
        key: "minWidth",
        aliases: &[],
        kind: OptionKind::Int,
        default: Some(OptionValue::Int(100)),
        description: "Smallest view width, in pixels",
    },
    OptionDescriptor {
        key: "minHeight",
        aliases: &[],
        kind: OptionKind::Int,
        default: Some(OptionValue::Int(100)),
        description: "Smallest view height, in pixels",
    },
    OptionDescriptor {
        key: "maxWidth",
        aliases: &[],
        kind: OptionKind::Int,
        default: Some(OptionValue::Int(0)),
        description: "Largest view width, in pixels (0 = unbounded)",
    },
    OptionDescriptor {
        key: "maxHeight",
        aliases: &[],
        kind: OptionKind::Int,
        default: Some(OptionValue::Int(0)),
        description: "Largest view height, in pixels (0 = unbounded)",
    },
    OptionDescriptor {
        key: "maxScale",
        aliases: &[],
        kind: OptionKind::Float,
        default: Some(OptionValue::Float(2.0)),
        description: "When positive, maximums are this multiple of the minimums",
    },
    OptionDescriptor {
        key: "keepAspectRatio",
        aliases: &[],
        kind: OptionKind::Bool,
        default: Some(OptionValue::Bool(false)),
        description: "Lock width/height to minWidth/minHeight",
    },
];

/// Maximums implied by `maxScale`, if it is positive.
fn scaled_limits(options: &OptionSet) -> Option<(f32, f32)> {
    let max_scale = options.float("maxScale");
    (max_scale > 0.0).then(|| {
        (
            max_scale * options.float("minWidth"),
            max_scale * options.float("minHeight"),
        )
    })
}

/// Stores a pixel limit with the `Int` kind its descriptor declares.
fn pixels(v: f32) -> OptionValue {
    OptionValue::Int(v.round() as i64)
}

/// Corner drag handle producing view sizes.
///
/// # Example
///
/// ```rust
/// use awww_widgets::{Configurable, ResizeHandle, Size};
///
/// let handle = ResizeHandle::new();
/// assert_eq!(handle.min_size(), Size::new(100.0, 100.0));
/// assert_eq!(handle.max_size(), Size::new(200.0, 200.0));
/// assert!(!handle.options().bool("keepAspectRatio"));
/// ```
#[derive(Debug)]
pub struct ResizeHandle {
    options: OptionSet,
    notifier: Notifier<Size>,
    size: Size,
    mounted: bool,
    dragging: bool,
    hovered: bool,
}

impl ResizeHandle {
    /// Option table recognized by resize handles.
    pub fn descriptors() -> &'static [OptionDescriptor] {
        &RESIZE_OPTIONS
    }

    /// Handle with default options.
    pub fn new() -> Self {
        Self::from_options(OptionSet::new(&RESIZE_OPTIONS))
    }

    /// Handle with the given options, deriving maximums from `maxScale`.
    pub fn from_options(mut options: OptionSet) -> Self {
        if let Some((w, h)) = scaled_limits(&options) {
            options = options.with("maxWidth", pixels(w)).with("maxHeight", pixels(h));
        }
        Self {
            options,
            notifier: Notifier::new(),
            size: Size::default(),
            mounted: false,
            dragging: false,
            hovered: false,
        }
    }

    /// Smallest allowed size.
    pub fn min_size(&self) -> Size {
        Size::new(
            self.options.float("minWidth"),
            self.options.float("minHeight"),
        )
    }

    /// Largest allowed size. Unbounded axes are infinite.
    pub fn max_size(&self) -> Size {
        let bound = |v: f32| if v > 0.0 { v } else { f32::INFINITY };
        Size::new(
            bound(self.options.float("maxWidth")),
            bound(self.options.float("maxHeight")),
        )
    }

    /// Width over height of the minimum size, used by the aspect lock.
    pub fn aspect_ratio(&self) -> f32 {
        let min = self.min_size();
        min.width / min.height
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// The pointer entered the handle.
    pub fn pointer_enter(&mut self) {
        self.hovered = true;
    }

    /// The pointer left the handle.
    pub fn pointer_leave(&mut self) {
        self.hovered = false;
    }

    fn grab(&mut self, layout: &Layout) {
        self.size = layout.container;
        self.dragging = true;
        tracing::debug!(width = self.size.width, height = self.size.height, "resize grab");
        self.notifier.emit(&WidgetEvent::GestureBegin);
    }

    fn drag_to(&mut self, event: &ControlEvent) {
        if !self.dragging {
            return;
        }
        let min = self.min_size();
        let max = self.max_size();

        let mut width = clamp(self.size.width + event.movement_x, min.width, max.width);
        let mut height = clamp(self.size.height + event.movement_y, min.height, max.height);

        if self.options.bool("keepAspectRatio") {
            let aspect = self.aspect_ratio();
            if event.movement_x.abs() > event.movement_y.abs() {
                height = width / aspect;
            } else {
                width = height * aspect;
            }
        }

        let next = Size::new(width, height);
        if next != self.size {
            self.size = next;
            self.notifier.emit(&WidgetEvent::SetValue(next));
            self.notifier.emit(&WidgetEvent::Input(next));
        }
    }

    fn release(&mut self) {
        if self.dragging {
            self.dragging = false;
            tracing::debug!(width = self.size.width, height = self.size.height, "resize release");
            self.notifier.emit(&WidgetEvent::GestureEnd);
        }
    }
}

impl Default for ResizeHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Configurable for ResizeHandle {
    fn options(&self) -> &OptionSet {
        &self.options
    }

    fn options_mut(&mut self) -> &mut OptionSet {
        &mut self.options
    }

    fn option_updated(&mut self, _key: &str) {
        if let Some((w, h)) = scaled_limits(&self.options) {
            self.set_option("maxWidth", pixels(w));
            self.set_option("maxHeight", pixels(h));
        }
    }
}

impl ValueHolder for ResizeHandle {
    type Value = Size;

    fn value(&self) -> Size {
        self.size
    }

    fn set_value(&mut self, value: Size) {
        if value != self.size {
            self.size = value;
            self.notifier.emit(&WidgetEvent::SetValue(value));
        }
    }

    fn notifier_mut(&mut self) -> &mut Notifier<Size> {
        &mut self.notifier
    }
}

impl Mountable for ResizeHandle {
    fn mount(&mut self, layout: &Layout) {
        self.mounted = true;
        self.size = layout.container;
        self.notifier.emit(&WidgetEvent::SetValue(self.size));
    }

    fn unmount(&mut self) {
        self.release();
        self.hovered = false;
        self.mounted = false;
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}

impl ControlTarget for ResizeHandle {
    fn on_control(&mut self, event: &ControlEvent, layout: &Layout) {
        if !self.mounted {
            return;
        }
        match event.phase {
            ControlPhase::Start => self.grab(layout),
            ControlPhase::Continue => self.drag_to(event),
            ControlPhase::End => self.release(),
        }
    }

    fn cursor(&self) -> CursorHint {
        if self.hovered || self.dragging {
            CursorHint::NwseResize
        } else {
            CursorHint::Default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use awww_core::{InputSource, Modifiers};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn view(width: f32, height: f32) -> Layout {
        Layout::new(Size::new(16.0, 16.0)).with_container(Size::new(width, height))
    }

    fn event(phase: ControlPhase, mx: f32, my: f32) -> ControlEvent {
        ControlEvent {
            phase,
            source: InputSource::Mouse,
            x: 0.0,
            y: 0.0,
            movement_x: mx,
            movement_y: my,
            modifiers: Modifiers::NONE,
        }
    }

    fn drag(handle: &mut ResizeHandle, layout: &Layout, steps: &[(f32, f32)]) {
        handle.on_control(&event(ControlPhase::Start, 0.0, 0.0), layout);
        for &(mx, my) in steps {
            handle.on_control(&event(ControlPhase::Continue, mx, my), layout);
        }
        handle.on_control(&event(ControlPhase::End, 0.0, 0.0), layout);
    }

    #[test]
    fn max_scale_derives_maximums() {
        let handle = ResizeHandle::new();
        assert_eq!(handle.options().float("maxWidth"), 200.0);
        assert_eq!(handle.options().float("maxHeight"), 200.0);
        assert_eq!(handle.options().get("maxWidth"), Some(&OptionValue::Int(200)));
    }

    #[test]
    fn option_hook_rederives_maximums() {
        let mut handle = ResizeHandle::new();
        handle.set_option("minWidth", OptionValue::Int(300));
        assert_eq!(handle.max_size(), Size::new(600.0, 200.0));
        handle.set_attribute("maxScale", "1.5");
        assert_eq!(handle.max_size(), Size::new(450.0, 150.0));
        assert_eq!(handle.options().get("maxHeight"), Some(&OptionValue::Int(150)));
        assert!(!handle.options().is_updating());
    }

    #[test]
    fn explicit_maximums_without_scale() {
        let options = OptionSet::new(&RESIZE_OPTIONS)
            .with("maxScale", 0.0_f32)
            .with("maxWidth", 640_i64);
        let handle = ResizeHandle::from_options(options);
        assert_eq!(handle.max_size().width, 640.0);
        assert_eq!(handle.max_size().height, f32::INFINITY);
    }

    #[test]
    fn axes_clamp_independently() {
        let mut handle = ResizeHandle::new();
        let layout = view(150.0, 150.0);
        handle.mount(&layout);
        drag(&mut handle, &layout, &[(100.0, -100.0)]);
        assert_eq!(handle.value(), Size::new(200.0, 100.0));
    }

    #[test]
    fn aspect_lock_follows_larger_movement() {
        let options = OptionSet::new(&RESIZE_OPTIONS)
            .with("minWidth", 200_i64)
            .with("keepAspectRatio", true);
        let mut handle = ResizeHandle::from_options(options);
        let layout = view(200.0, 100.0);
        handle.mount(&layout);

        drag(&mut handle, &layout, &[(40.0, 5.0)]);
        assert_eq!(handle.value(), Size::new(240.0, 120.0));

        let layout = view(240.0, 120.0);
        drag(&mut handle, &layout, &[(2.0, 30.0)]);
        assert_eq!(handle.value(), Size::new(300.0, 150.0));
    }

    #[test]
    fn notifies_only_on_change() {
        let mut handle = ResizeHandle::new();
        let layout = view(200.0, 200.0);
        handle.mount(&layout);

        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        handle.subscribe(move |ev| sink.borrow_mut().push(ev.clone()));

        drag(&mut handle, &layout, &[(10.0, 10.0), (-20.0, 0.0)]);
        assert_eq!(
            *log.borrow(),
            [
                WidgetEvent::GestureBegin,
                WidgetEvent::SetValue(Size::new(180.0, 200.0)),
                WidgetEvent::Input(Size::new(180.0, 200.0)),
                WidgetEvent::GestureEnd,
            ]
        );
    }

    #[test]
    fn cursor_while_hovered_or_dragging() {
        let mut handle = ResizeHandle::new();
        let layout = view(100.0, 100.0);
        handle.mount(&layout);
        assert_eq!(handle.cursor(), CursorHint::Default);

        handle.pointer_enter();
        assert_eq!(handle.cursor(), CursorHint::NwseResize);
        handle.on_control(&event(ControlPhase::Start, 0.0, 0.0), &layout);
        handle.pointer_leave();
        assert_eq!(handle.cursor(), CursorHint::NwseResize);
        handle.on_control(&event(ControlPhase::End, 0.0, 0.0), &layout);
        assert_eq!(handle.cursor(), CursorHint::Default);
    }

    #[test]
    fn mount_announces_container_size() {
        let mut handle = ResizeHandle::new();
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        handle.subscribe(move |ev| *sink.borrow_mut() = ev.value().copied());
        handle.mount(&view(320.0, 240.0));
        assert_eq!(*seen.borrow(), Some(Size::new(320.0, 240.0)));
    }
}
