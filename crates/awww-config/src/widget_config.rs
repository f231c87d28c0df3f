//! Per-widget layout entries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Widget types a layout can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// Rotary knob bound to a parameter.
    Knob,
    /// View resize handle.
    Resize,
}

impl WidgetKind {
    /// Every kind, in listing order.
    pub const ALL: [WidgetKind; 2] = [WidgetKind::Knob, WidgetKind::Resize];

    /// Looks a kind up by name, ignoring ASCII case.
    ///
    /// `resize-handle` is accepted for `resize`.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("knob") {
            Some(WidgetKind::Knob)
        } else if name.eq_ignore_ascii_case("resize") || name.eq_ignore_ascii_case("resize-handle") {
            Some(WidgetKind::Resize)
        } else {
            None
        }
    }

    /// Canonical name.
    pub const fn name(self) -> &'static str {
        match self {
            WidgetKind::Knob => "knob",
            WidgetKind::Resize => "resize",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One widget in a layout file.
///
/// Option values are strings and are parsed by the widget exactly like
/// markup attributes, so `"240px"` is a valid `minWidth`.
///
/// # Example
///
/// ```rust
/// use awww_config::WidgetConfig;
///
/// let cutoff = WidgetConfig::new("cutoff", "knob")
///     .with_parameter(2)
///     .with_format("hz")
///     .with_option("min", "20")
///     .with_option("max", "20000")
///     .with_option("scale", "log");
///
/// assert_eq!(cutoff.parameter, Some(2));
/// assert_eq!(cutoff.option("scale"), Some("log"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WidgetConfig {
    /// Unique id within the layout.
    pub id: String,

    /// Widget kind name (`knob` or `resize`).
    pub kind: String,

    /// Host parameter index a knob writes to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<u32>,

    /// Label format name (`percent`, `hz`, `db`, `plain`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Widget options as attribute strings.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
}

impl WidgetConfig {
    /// Create an entry with no options.
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            parameter: None,
            format: None,
            options: BTreeMap::new(),
        }
    }

    /// Bind to a host parameter.
    pub fn with_parameter(mut self, index: u32) -> Self {
        self.parameter = Some(index);
        self
    }

    /// Set the label format.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Add an option.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Get an option string.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// Parsed kind, if known.
    pub fn widget_kind(&self) -> Option<WidgetKind> {
        WidgetKind::from_name(&self.kind)
    }
}
