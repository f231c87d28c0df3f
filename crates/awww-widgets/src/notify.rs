//! Widget notifications and listener registry.

use std::fmt;

/// Notification emitted by a widget.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent<T> {
    /// The value changed, from any source. Renderers and labels follow this.
    SetValue(T),
    /// The value changed because of user interaction. Hosts follow this.
    Input(T),
    /// A gesture started on the widget.
    GestureBegin,
    /// The gesture on the widget ended.
    GestureEnd,
}

impl<T> WidgetEvent<T> {
    /// The carried value, for `SetValue` and `Input`.
    pub fn value(&self) -> Option<&T> {
        match self {
            WidgetEvent::SetValue(v) | WidgetEvent::Input(v) => Some(v),
            WidgetEvent::GestureBegin | WidgetEvent::GestureEnd => None,
        }
    }

    /// Short lowercase name, matching the event names used by web views.
    pub const fn name(&self) -> &'static str {
        match self {
            WidgetEvent::SetValue(_) => "setvalue",
            WidgetEvent::Input(_) => "input",
            WidgetEvent::GestureBegin => "controlstart",
            WidgetEvent::GestureEnd => "controlend",
        }
    }
}

/// Handle returned by [`Notifier::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

type Listener<T> = Box<dyn FnMut(&WidgetEvent<T>)>;

/// Ordered listener registry owned by a widget.
///
/// Listeners run synchronously, in subscription order, on the thread that
/// drives the widget.
pub struct Notifier<T> {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener<T>)>,
}

impl<T> Notifier<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    /// Adds a listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&WidgetEvent<T>) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Delivers `event` to every listener.
    pub fn emit(&mut self, event: &WidgetEvent<T>) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    /// Number of listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<T> Default for Notifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Notifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
