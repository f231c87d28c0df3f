//! Input widgets for audio plugin views.
//!
//! This crate provides the behavior of the widgets a plugin view embeds
//! (rotary knobs and a view resize handle), independent of how they are
//! drawn. Widgets consume unified control events from
//! [`awww_core::GestureUnifier`] and notify listeners about value changes;
//! [`host`] forwards those changes to a plugin host.
//!
//! # Modules
//!
//! - [`widget`] - Capability traits (configurable, value holder, mountable, control target)
//! - [`notify`] - Listener registry and widget notifications
//! - [`ranged`] - Domain value kept inside a scaled range
//! - [`knob`] - Rotary knob with axis detection and non-linear drag response
//! - [`resize_handle`] - Corner handle producing clamped, optionally aspect-locked sizes
//! - [`controlled`] - Widget paired with its gesture unifier
//! - [`host`] - Plugin host trait and notification bindings
//! - [`format`] - Value labels

pub mod controlled;
pub mod format;
pub mod host;
pub mod knob;
pub mod notify;
pub mod ranged;
pub mod resize_handle;
pub mod widget;

pub use controlled::Controlled;
pub use format::ValueFormat;
pub use host::{ParamIndex, PluginHost, bind_parameter, bind_size};
pub use knob::{Axis, Knob};
pub use notify::{ListenerId, Notifier, WidgetEvent};
pub use ranged::{RANGE_OPTIONS, RangedValue};
pub use resize_handle::{RESIZE_OPTIONS, ResizeHandle};
pub use widget::{Configurable, ControlTarget, CursorHint, Layout, Mountable, Size, ValueHolder};
