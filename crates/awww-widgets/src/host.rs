//! Wiring widgets to a plugin host.
//!
//! [`PluginHost`] abstracts the host side of a plugin view: parameter
//! writes bracketed by edit gestures, and view resizing. The binding helpers
//! subscribe to a widget's notifications and forward the interactive ones.
//!
//! ```text
//! Knob ──GestureBegin──► begin_edit(index)
//!      ──Input(v)──────► set_parameter(index, v)
//!      ──GestureEnd────► end_edit(index)
//!
//! ResizeHandle ──Input(size)──► set_size(width, height)
//! ```
//!
//! Only interactive changes reach the host. `SetValue` notifications also
//! fire for values that came from the host, and echoing them back would
//! loop.

use core::fmt;
use std::rc::Rc;

use crate::notify::{ListenerId, WidgetEvent};
use crate::widget::{Size, ValueHolder};

/// Type-safe host parameter index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamIndex(pub u32);

impl fmt::Display for ParamIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ParamIndex {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Host side of a plugin view.
///
/// Methods take `&self`; implementations that record state use interior
/// mutability, as the UI is single-threaded.
pub trait PluginHost {
    /// A user gesture on the parameter started.
    fn begin_edit(&self, _index: ParamIndex) {}

    /// Write a parameter value, in domain units.
    fn set_parameter(&self, index: ParamIndex, value: f32);

    /// The user gesture on the parameter ended.
    fn end_edit(&self, _index: ParamIndex) {}

    /// Ask the host to resize the view.
    fn set_size(&self, _width: f32, _height: f32) {}
}

/// Forwards a widget's interactive value changes to host parameter `index`.
///
/// Gestures become `begin_edit`/`end_edit` brackets; every `Input` inside
/// them becomes a `set_parameter`.
pub fn bind_parameter<W, H>(widget: &mut W, host: Rc<H>, index: ParamIndex) -> ListenerId
where
    W: ValueHolder<Value = f32> + ?Sized,
    H: PluginHost + ?Sized + 'static,
{
    widget.notifier_mut().subscribe(move |event| match event {
        WidgetEvent::GestureBegin => host.begin_edit(index),
        WidgetEvent::Input(value) => host.set_parameter(index, *value),
        WidgetEvent::GestureEnd => host.end_edit(index),
        WidgetEvent::SetValue(_) => {}
    })
}

/// Forwards a widget's interactive size changes to the host.
pub fn bind_size<W, H>(widget: &mut W, host: Rc<H>) -> ListenerId
where
    W: ValueHolder<Value = Size> + ?Sized,
    H: PluginHost + ?Sized + 'static,
{
    widget.notifier_mut().subscribe(move |event| {
        if let WidgetEvent::Input(size) = event {
            host.set_size(size.width, size.height);
        }
    })
}
