//! Unified control gestures from touch, mouse and wheel input.
//!
//! [`GestureUnifier`] turns raw device events into one ordered stream of
//! [`ControlEvent`]s per widget: exactly one [`ControlPhase::Start`], zero or
//! more [`ControlPhase::Continue`], exactly one [`ControlPhase::End`].
//!
//! # Sources
//!
//! | Source | Start              | Continue            | End                          |
//! |--------|--------------------|---------------------|------------------------------|
//! | Touch  | `TouchStart`       | `TouchMove`         | `TouchEnd`                   |
//! | Mouse  | primary `MouseDown`| global `MouseMove`  | global `MouseUp`             |
//! | Wheel  | first tick         | every tick          | 100 ms without ticks ([`poll`](GestureUnifier::poll)) |
//!
//! Movement deltas are recomputed from coordinates on every continue event
//! because touch input carries no native deltas. Wheel continue events move
//! a synthetic coordinate by the *sign* of the wheel delta, doubled while
//! shift is held, so consumers can treat wheel ticks as fixed-size steps.
//!
//! # Timing
//!
//! The unifier never reads a clock. Callers pass a monotonic timestamp with
//! every event and call [`poll`](GestureUnifier::poll) when
//! [`next_deadline`](GestureUnifier::next_deadline) has passed.
//!
//! # Pointer Capture
//!
//! A mouse drag keeps reporting after the pointer leaves the widget. The
//! unifier acquires its [`PointerCapture`] on mouse gesture start and
//! releases it before returning the matching end event, on
//! [`cancel`](GestureUnifier::cancel), and on drop.

use core::time::Duration;

/// Quiet period after the last wheel tick before the wheel gesture ends.
pub const WHEEL_GESTURE_TIMEOUT: Duration = Duration::from_millis(100);

/// Mouse button index that starts a gesture.
pub const PRIMARY_BUTTON: u8 = 0;

/// Keyboard modifier state copied from the originating device event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Modifiers {
    /// Shift key held.
    pub shift: bool,
    /// Control key held.
    pub ctrl: bool,
}

impl Modifiers {
    /// No modifier held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
    };
    /// Shift held.
    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
    };
    /// Control held.
    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
    };
}

/// Device family a gesture originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InputSource {
    /// Mouse or other primary pointer.
    Mouse,
    /// Touch screen.
    Touch,
    /// Scroll wheel or trackpad scroll.
    Wheel,
}

/// Position of a control event within its gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ControlPhase {
    /// First event of a gesture.
    Start,
    /// Movement within an active gesture.
    Continue,
    /// Last event of a gesture.
    End,
}

/// Raw input delivered by the embedding layer.
///
/// Touch and wheel events, and `MouseDown`, are those targeted at the
/// widget. `MouseMove` and `MouseUp` are the window-wide stream; the unifier
/// only consumes them while it holds the pointer capture.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum DeviceEvent {
    /// First touch point went down.
    TouchStart {
        /// Client x of the first touch point.
        x: f32,
        /// Client y of the first touch point.
        y: f32,
        /// Modifier state.
        #[cfg_attr(feature = "serde", serde(default))]
        modifiers: Modifiers,
        /// Whether the default action can still be prevented.
        #[cfg_attr(feature = "serde", serde(default))]
        cancelable: bool,
    },
    /// First touch point moved.
    TouchMove {
        /// Client x of the first touch point.
        x: f32,
        /// Client y of the first touch point.
        y: f32,
        /// Modifier state.
        #[cfg_attr(feature = "serde", serde(default))]
        modifiers: Modifiers,
        /// Whether the default action can still be prevented.
        #[cfg_attr(feature = "serde", serde(default))]
        cancelable: bool,
    },
    /// Touch ended.
    TouchEnd {
        /// Client x where the touch lifted.
        x: f32,
        /// Client y where the touch lifted.
        y: f32,
        /// Modifier state.
        #[cfg_attr(feature = "serde", serde(default))]
        modifiers: Modifiers,
        /// Whether the default action can still be prevented.
        #[cfg_attr(feature = "serde", serde(default))]
        cancelable: bool,
    },
    /// Mouse button pressed over the widget.
    MouseDown {
        /// Client x.
        x: f32,
        /// Client y.
        y: f32,
        /// Button index, [`PRIMARY_BUTTON`] for the main button.
        #[cfg_attr(feature = "serde", serde(default))]
        button: u8,
        /// Modifier state.
        #[cfg_attr(feature = "serde", serde(default))]
        modifiers: Modifiers,
    },
    /// Mouse moved anywhere in the window.
    MouseMove {
        /// Client x.
        x: f32,
        /// Client y.
        y: f32,
        /// Modifier state.
        #[cfg_attr(feature = "serde", serde(default))]
        modifiers: Modifiers,
    },
    /// Mouse button released anywhere in the window.
    MouseUp {
        /// Client x.
        x: f32,
        /// Client y.
        y: f32,
        /// Modifier state.
        #[cfg_attr(feature = "serde", serde(default))]
        modifiers: Modifiers,
    },
    /// One wheel tick over the widget.
    Wheel {
        /// Client x.
        x: f32,
        /// Client y.
        y: f32,
        /// Horizontal scroll delta. Only its sign is used.
        #[cfg_attr(feature = "serde", serde(default))]
        delta_x: f32,
        /// Vertical scroll delta. Only its sign is used.
        #[cfg_attr(feature = "serde", serde(default))]
        delta_y: f32,
        /// Modifier state.
        #[cfg_attr(feature = "serde", serde(default))]
        modifiers: Modifiers,
        /// Device reports natural (inverted) scrolling.
        #[cfg_attr(feature = "serde", serde(default))]
        inverted: bool,
    },
}

impl DeviceEvent {
    /// Modifier state carried by the event.
    pub fn modifiers(&self) -> Modifiers {
        match *self {
            DeviceEvent::TouchStart { modifiers, .. }
            | DeviceEvent::TouchMove { modifiers, .. }
            | DeviceEvent::TouchEnd { modifiers, .. }
            | DeviceEvent::MouseDown { modifiers, .. }
            | DeviceEvent::MouseMove { modifiers, .. }
            | DeviceEvent::MouseUp { modifiers, .. }
            | DeviceEvent::Wheel { modifiers, .. } => modifiers,
        }
    }

    /// Device family of the event.
    pub fn source(&self) -> InputSource {
        match self {
            DeviceEvent::TouchStart { .. }
            | DeviceEvent::TouchMove { .. }
            | DeviceEvent::TouchEnd { .. } => InputSource::Touch,
            DeviceEvent::MouseDown { .. }
            | DeviceEvent::MouseMove { .. }
            | DeviceEvent::MouseUp { .. } => InputSource::Mouse,
            DeviceEvent::Wheel { .. } => InputSource::Wheel,
        }
    }
}

/// One event of a unified gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlEvent {
    /// Position within the gesture.
    pub phase: ControlPhase,
    /// Device family the gesture came from.
    pub source: InputSource,
    /// Client x. For wheel gestures this is the synthetic coordinate.
    pub x: f32,
    /// Client y. For wheel gestures this is the synthetic coordinate.
    pub y: f32,
    /// Horizontal movement since the previous event; zero on start and end.
    pub movement_x: f32,
    /// Vertical movement since the previous event; zero on start and end.
    pub movement_y: f32,
    /// Modifier state copied from the device event.
    pub modifiers: Modifiers,
}

/// Control events produced by a single device event.
///
/// Holds at most three events (a wheel tick arriving after an overdue
/// wheel gesture yields `End`, `Start` and `Continue`) and whether the
/// embedding layer should prevent the device event's default action.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dispatch {
    events: [Option<ControlEvent>; 3],
    /// The default action of the device event should be suppressed.
    pub prevent_default: bool,
}

impl Dispatch {
    fn push(&mut self, event: Option<ControlEvent>) {
        if let Some(slot) = self.events.iter_mut().find(|slot| slot.is_none()) {
            *slot = event;
        }
    }

    /// Iterates over the produced events in order.
    pub fn iter(&self) -> impl Iterator<Item = &ControlEvent> {
        self.events.iter().flatten()
    }

    /// Number of produced events.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether no event was produced.
    pub fn is_empty(&self) -> bool {
        self.events[0].is_none()
    }
}

impl IntoIterator for Dispatch {
    type Item = ControlEvent;
    type IntoIter = core::iter::Flatten<core::array::IntoIter<Option<ControlEvent>, 3>>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter().flatten()
    }
}

/// Scoped subscription to the window-wide pointer stream.
///
/// The embedding layer implements this to start and stop delivering global
/// `MouseMove`/`MouseUp` events. The unifier guarantees `release` follows
/// every `acquire` exactly once.
pub trait PointerCapture {
    /// Begin delivering global pointer events.
    fn acquire(&mut self);

    /// Stop delivering global pointer events.
    fn release(&mut self);
}

/// No-op capture for embeddings that always deliver global pointer events.
impl PointerCapture for () {
    fn acquire(&mut self) {}

    fn release(&mut self) {}
}

impl<C: PointerCapture + ?Sized> PointerCapture for &mut C {
    fn acquire(&mut self) {
        (**self).acquire();
    }

    fn release(&mut self) {
        (**self).release();
    }
}

/// Active gesture bookkeeping.
#[derive(Debug, Clone, Copy)]
struct ActiveGesture {
    source: InputSource,
    prev_x: f32,
    prev_y: f32,
}

/// Merges device input into one ordered control-event stream.
///
/// One unifier serves one widget and tracks at most one gesture at a time.
/// Input that would open a second, overlapping gesture is swallowed.
///
/// # Example
///
/// ```rust
/// use core::time::Duration;
/// use awww_core::{ControlPhase, DeviceEvent, GestureUnifier, Modifiers};
///
/// let mut unifier = GestureUnifier::new(());
/// let mods = Modifiers::NONE;
///
/// unifier.handle(DeviceEvent::MouseDown { x: 0.0, y: 0.0, button: 0, modifiers: mods }, Duration::ZERO);
/// let moved = unifier.handle(DeviceEvent::MouseMove { x: 4.0, y: -2.0, modifiers: mods }, Duration::ZERO);
/// let ev = moved.iter().next().unwrap();
/// assert_eq!(ev.phase, ControlPhase::Continue);
/// assert_eq!((ev.movement_x, ev.movement_y), (4.0, -2.0));
///
/// let up = unifier.handle(DeviceEvent::MouseUp { x: 4.0, y: -2.0, modifiers: mods }, Duration::ZERO);
/// assert_eq!(up.iter().next().unwrap().phase, ControlPhase::End);
/// assert!(!unifier.is_active());
/// ```
#[derive(Debug)]
pub struct GestureUnifier<C: PointerCapture> {
    capture: C,
    captured: bool,
    active: Option<ActiveGesture>,
    wheel_deadline: Option<Duration>,
    last_modifiers: Modifiers,
}

impl<C: PointerCapture> GestureUnifier<C> {
    /// Creates an idle unifier that uses `capture` for mouse drags.
    pub fn new(capture: C) -> Self {
        Self {
            capture,
            captured: false,
            active: None,
            wheel_deadline: None,
            last_modifiers: Modifiers::NONE,
        }
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Device family of the active gesture.
    pub fn source(&self) -> Option<InputSource> {
        self.active.map(|g| g.source)
    }

    /// Whether the pointer capture is currently held.
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// When the pending wheel gesture ends if no tick arrives before then.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.wheel_deadline
    }

    /// Shared access to the pointer capture.
    pub fn capture(&self) -> &C {
        &self.capture
    }

    /// Feeds one device event observed at `now`.
    ///
    /// A wheel gesture whose quiet period elapsed before `now` is ended
    /// first, even if [`poll`](Self::poll) was not called in time.
    pub fn handle(&mut self, event: DeviceEvent, now: Duration) -> Dispatch {
        let mut dispatch = Dispatch::default();
        let modifiers = event.modifiers();

        if let Some(end) = self.poll(now) {
            dispatch.push(Some(end));
        }

        match event {
            DeviceEvent::TouchStart { x, y, cancelable, .. } => {
                dispatch.prevent_default = cancelable;
                self.start(&mut dispatch, InputSource::Touch, x, y, modifiers);
            }
            DeviceEvent::TouchMove { x, y, cancelable, .. } => {
                dispatch.prevent_default = cancelable;
                if self.source() == Some(InputSource::Touch) {
                    dispatch.push(self.movement(x, y, modifiers));
                }
            }
            DeviceEvent::TouchEnd { cancelable, .. } => {
                dispatch.prevent_default = cancelable;
                if self.source() == Some(InputSource::Touch) {
                    dispatch.push(self.end(modifiers));
                }
            }
            DeviceEvent::MouseDown { x, y, button, .. } => {
                if button == PRIMARY_BUTTON {
                    self.start(&mut dispatch, InputSource::Mouse, x, y, modifiers);
                }
            }
            DeviceEvent::MouseMove { x, y, .. } => {
                if self.source() == Some(InputSource::Mouse) {
                    dispatch.push(self.movement(x, y, modifiers));
                }
            }
            DeviceEvent::MouseUp { .. } => {
                if self.source() == Some(InputSource::Mouse) {
                    dispatch.push(self.end(modifiers));
                }
            }
            DeviceEvent::Wheel {
                x,
                y,
                delta_x,
                delta_y,
                inverted,
                ..
            } => {
                dispatch.prevent_default = true;
                self.wheel(&mut dispatch, now, x, y, delta_x, delta_y, inverted, modifiers);
            }
        }

        dispatch
    }

    /// Ends a wheel gesture whose quiet period has elapsed.
    ///
    /// Returns the synthetic end event when `now` has reached
    /// [`next_deadline`](Self::next_deadline), `None` otherwise.
    pub fn poll(&mut self, now: Duration) -> Option<ControlEvent> {
        match self.wheel_deadline {
            Some(deadline) if now >= deadline => {
                self.wheel_deadline = None;
                self.end(self.last_modifiers)
            }
            _ => None,
        }
    }

    /// Terminates the active gesture, if any.
    ///
    /// Used when the widget goes away mid-gesture. Releases the pointer
    /// capture, cancels a pending wheel deadline and returns the end event
    /// consumers still need to see.
    pub fn cancel(&mut self) -> Option<ControlEvent> {
        self.wheel_deadline = None;
        self.end(self.last_modifiers)
    }

    fn start(
        &mut self,
        dispatch: &mut Dispatch,
        source: InputSource,
        x: f32,
        y: f32,
        modifiers: Modifiers,
    ) {
        if self.source() == Some(InputSource::Wheel) {
            // A press takes over from a pending wheel gesture
            self.wheel_deadline = None;
            dispatch.push(self.end(self.last_modifiers));
        }
        if self.active.is_some() {
            return;
        }

        if source == InputSource::Mouse {
            self.capture.acquire();
            self.captured = true;
        }

        self.active = Some(ActiveGesture {
            source,
            prev_x: x,
            prev_y: y,
        });
        self.last_modifiers = modifiers;

        #[cfg(feature = "tracing")]
        tracing::debug!(?source, x, y, "gesture start");

        dispatch.push(Some(ControlEvent {
            phase: ControlPhase::Start,
            source,
            x,
            y,
            movement_x: 0.0,
            movement_y: 0.0,
            modifiers,
        }));
    }

    #[allow(clippy::too_many_arguments)]
    fn wheel(
        &mut self,
        dispatch: &mut Dispatch,
        now: Duration,
        x: f32,
        y: f32,
        delta_x: f32,
        delta_y: f32,
        inverted: bool,
        modifiers: Modifiers,
    ) {
        match self.source() {
            None => self.start(dispatch, InputSource::Wheel, x, y, modifiers),
            Some(InputSource::Wheel) => {}
            // Pointer and touch drags own the gesture until they end
            Some(_) => return,
        }

        let Some(active) = self.active else {
            return;
        };
        let k = if modifiers.shift { 2.0 } else { 1.0 };
        let inv = if inverted { -1.0 } else { 1.0 };
        let next_x = active.prev_x + k * inv * sign(delta_x);
        let next_y = active.prev_y + k * inv * sign(delta_y);

        dispatch.push(self.movement(next_x, next_y, modifiers));
        self.wheel_deadline = Some(now + WHEEL_GESTURE_TIMEOUT);
    }

    fn movement(&mut self, x: f32, y: f32, modifiers: Modifiers) -> Option<ControlEvent> {
        let active = self.active.as_mut()?;
        let movement_x = x - active.prev_x;
        let movement_y = y - active.prev_y;
        active.prev_x = x;
        active.prev_y = y;
        let source = active.source;
        self.last_modifiers = modifiers;

        Some(ControlEvent {
            phase: ControlPhase::Continue,
            source,
            x,
            y,
            movement_x,
            movement_y,
            modifiers,
        })
    }

    fn end(&mut self, modifiers: Modifiers) -> Option<ControlEvent> {
        // Capture goes before the event leaves the unifier
        self.release_capture();
        let active = self.active.take()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(source = ?active.source, "gesture end");

        Some(ControlEvent {
            phase: ControlPhase::End,
            source: active.source,
            x: active.prev_x,
            y: active.prev_y,
            movement_x: 0.0,
            movement_y: 0.0,
            modifiers,
        })
    }

    fn release_capture(&mut self) {
        if self.captured {
            self.captured = false;
            self.capture.release();
        }
    }
}

impl<C: PointerCapture> Drop for GestureUnifier<C> {
    fn drop(&mut self) {
        self.release_capture();
    }
}

/// Sign of a wheel delta, with zero mapping to zero.
fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
