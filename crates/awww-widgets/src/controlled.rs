//! A widget paired with its gesture unifier.

use core::time::Duration;

use awww_core::{DeviceEvent, GestureUnifier, PointerCapture};

use crate::widget::{ControlTarget, Layout};

/// Owns a widget and the [`GestureUnifier`] feeding it.
///
/// This is the per-instance boundary: one widget, one unifier, at most one
/// gesture in flight.
///
/// # Example
///
/// ```rust
/// use core::time::Duration;
/// use awww_core::{DeviceEvent, Modifiers};
/// use awww_widgets::{Controlled, Knob, Layout, Mountable, Size, ValueHolder};
///
/// let layout = Layout::new(Size::new(200.0, 200.0));
/// let mut knob = Controlled::new(Knob::new(), ());
/// knob.widget_mut().mount(&layout);
///
/// let wheel = DeviceEvent::Wheel {
///     x: 0.0,
///     y: 0.0,
///     delta_x: 0.0,
///     delta_y: -1.0,
///     modifiers: Modifiers::NONE,
///     inverted: false,
/// };
/// assert!(knob.handle(wheel, Duration::ZERO, &layout));
/// assert!(knob.widget().value() > 0.0);
///
/// assert!(knob.poll(Duration::from_millis(100), &layout));
/// assert!(!knob.is_active());
/// ```
#[derive(Debug)]
pub struct Controlled<W, C: PointerCapture = ()> {
    widget: W,
    unifier: GestureUnifier<C>,
}

impl<W: ControlTarget, C: PointerCapture> Controlled<W, C> {
    /// Pairs `widget` with a fresh unifier using `capture`.
    pub fn new(widget: W, capture: C) -> Self {
        Self {
            widget,
            unifier: GestureUnifier::new(capture),
        }
    }

    /// The widget.
    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// The widget, mutably.
    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    /// The gesture unifier.
    pub fn unifier(&self) -> &GestureUnifier<C> {
        &self.unifier
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.unifier.is_active()
    }

    /// When [`poll`](Self::poll) should next be called.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.unifier.next_deadline()
    }

    /// Feeds one device event to the widget.
    ///
    /// Returns whether the embedding layer should prevent the event's
    /// default action.
    pub fn handle(&mut self, event: DeviceEvent, now: Duration, layout: &Layout) -> bool {
        let dispatch = self.unifier.handle(event, now);
        for control in dispatch {
            tracing::trace!(phase = ?control.phase, source = ?control.source, "control event");
            self.widget.on_control(&control, layout);
        }
        dispatch.prevent_default
    }

    /// Ends an idle wheel gesture. Returns whether an end event was delivered.
    pub fn poll(&mut self, now: Duration, layout: &Layout) -> bool {
        match self.unifier.poll(now) {
            Some(end) => {
                self.widget.on_control(&end, layout);
                true
            }
            None => false,
        }
    }

    /// Ends any gesture in progress, releasing the pointer capture.
    pub fn cancel(&mut self, layout: &Layout) {
        if let Some(end) = self.unifier.cancel() {
            self.widget.on_control(&end, layout);
        }
    }

    /// Cancels any gesture and returns the widget.
    pub fn into_inner(mut self, layout: &Layout) -> W {
        self.cancel(layout);
        self.widget
    }
}
