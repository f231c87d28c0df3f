//! Widget capabilities.
//!
//! Widgets are composed from small traits instead of a class chain:
//!
//! - [`Configurable`] - owns an [`OptionSet`] and reacts to option changes
//! - [`ValueHolder`] - holds a value and notifies listeners about changes
//! - [`Mountable`] - two-phase initialization (pure construction, then mount)
//! - [`ControlTarget`] - consumes unified control events
//!
//! The embedding layer passes a [`Layout`] with every control event, so
//! widgets never query their surroundings themselves.

use awww_core::{ControlEvent, OptionSet, OptionValue};

use crate::notify::{ListenerId, Notifier, WidgetEvent};

/// Width and height in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Geometry the embedding layer reports alongside input.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    /// The widget's own rendered size.
    pub size: Size,
    /// The size of the element the widget lives in (the plugin view for a
    /// resize handle).
    pub container: Size,
}

impl Layout {
    /// Layout for a widget of `size` inside a container of the same size.
    pub const fn new(size: Size) -> Self {
        Self {
            size,
            container: size,
        }
    }

    /// Sets the container size.
    ///
    /// Builder pattern: call after [`new`](Self::new).
    pub const fn with_container(mut self, container: Size) -> Self {
        self.container = container;
        self
    }
}

/// Pointer cursor a widget asks the embedding layer to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorHint {
    /// Platform default cursor.
    #[default]
    Default,
    /// Horizontal drag.
    EwResize,
    /// Vertical drag.
    NsResize,
    /// Diagonal resize.
    NwseResize,
}

impl CursorHint {
    /// CSS cursor keyword.
    pub const fn css(self) -> &'static str {
        match self {
            CursorHint::Default => "default",
            CursorHint::EwResize => "ew-resize",
            CursorHint::NsResize => "ns-resize",
            CursorHint::NwseResize => "nwse-resize",
        }
    }
}

/// A component configured through an option store.
pub trait Configurable {
    /// Current options.
    fn options(&self) -> &OptionSet;

    /// Mutable options. Writes through this bypass [`option_updated`](Self::option_updated).
    fn options_mut(&mut self) -> &mut OptionSet;

    /// Called once after an outermost option write, with the canonical key.
    ///
    /// Writes made from inside the hook are stored without calling the hook
    /// again.
    fn option_updated(&mut self, _key: &str) {}

    /// Stores an option and runs the change hook.
    ///
    /// The update is closed even if the hook panics.
    fn set_option(&mut self, key: &str, value: OptionValue) {
        if self.options_mut().begin_update(key, value) {
            let key = self.options().canonical(key);
            let mut scope = UpdateScope(self);
            scope.0.option_updated(&key);
        }
    }

    /// Parses and stores an attribute string.
    ///
    /// Malformed values and unknown names leave the options untouched.
    /// Returns whether the attribute was applied.
    fn set_attribute(&mut self, name: &str, raw: &str) -> bool {
        apply_attribute(self, name, raw)
    }

    /// Applies several options, each through [`set_option`](Self::set_option).
    fn merge_options<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = (String, OptionValue)>,
        Self: Sized,
    {
        for (key, value) in values {
            self.set_option(&key, value);
        }
    }
}

/// Open option update on a widget; dropping it closes the update.
struct UpdateScope<'a, W: Configurable + ?Sized>(&'a mut W);

impl<W: Configurable + ?Sized> Drop for UpdateScope<'_, W> {
    fn drop(&mut self) {
        self.0.options_mut().end_update();
    }
}

/// Shared attribute path, also used by widgets that special-case some names
/// before falling back to their option table.
pub(crate) fn apply_attribute<W: Configurable + ?Sized>(widget: &mut W, name: &str, raw: &str) -> bool {
    match widget.options().parse_attribute(name, raw) {
        Some((key, value)) => {
            widget.set_option(key, value);
            true
        }
        None => {
            tracing::debug!(name, raw, "attribute ignored");
            false
        }
    }
}

/// A component holding a value.
pub trait ValueHolder {
    /// Value type, in domain units.
    type Value: Clone + PartialEq + core::fmt::Debug;

    /// Current value.
    fn value(&self) -> Self::Value;

    /// Sets the value programmatically.
    ///
    /// Emits [`WidgetEvent::SetValue`] when the stored value changes; never
    /// emits [`WidgetEvent::Input`].
    fn set_value(&mut self, value: Self::Value);

    /// The widget's listener registry.
    fn notifier_mut(&mut self) -> &mut Notifier<Self::Value>;

    /// Registers a listener for this widget's notifications.
    fn subscribe(&mut self, listener: impl FnMut(&WidgetEvent<Self::Value>) + 'static) -> ListenerId
    where
        Self: Sized,
    {
        self.notifier_mut().subscribe(listener)
    }
}

/// Two-phase initialization.
///
/// Construction is pure and emits nothing. `mount` runs the setup that
/// depends on being placed in a view and announces the initial value.
pub trait Mountable {
    /// Attaches the widget to a view.
    fn mount(&mut self, layout: &Layout);

    /// Detaches the widget. Transient gesture state is dropped.
    fn unmount(&mut self);

    /// Whether [`mount`](Self::mount) has run.
    fn is_mounted(&self) -> bool;
}

/// Consumer of unified control events.
pub trait ControlTarget {
    /// Handles one control event. Unmounted widgets ignore input.
    fn on_control(&mut self, event: &ControlEvent, layout: &Layout);

    /// Cursor the widget currently wants.
    fn cursor(&self) -> CursorHint {
        CursorHint::Default
    }
}
