//! Widget option tables and per-instance option stores.
//!
//! Each widget type publishes a static table of [`OptionDescriptor`]s naming
//! the keys it understands, how their string form is parsed and their
//! defaults. An [`OptionSet`] is seeded from that table when a widget is
//! constructed and can be updated at any time afterwards.
//!
//! # Change Notification
//!
//! Widgets react to option changes (re-clamping a value, deriving a maximum
//! size) and those reactions may themselves write options. The store keeps
//! an in-progress flag so that only the outermost write is reported:
//!
//! ```rust
//! use awww_core::{OptionDescriptor, OptionSet, OptionValue};
//!
//! static NO_OPTIONS: [OptionDescriptor; 0] = [];
//!
//! let mut opts = OptionSet::new(&NO_OPTIONS);
//! assert!(opts.begin_update("maxScale", OptionValue::Float(2.0)));
//! // Writes made while reacting to the change are stored but not reported
//! assert!(!opts.begin_update("maxWidth", OptionValue::Int(200)));
//! opts.end_update();
//! assert_eq!(opts.int("maxWidth"), 200);
//! ```

use alloc::borrow::Cow;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

use crate::parse::{float_prefix, int_prefix, parse_bool};

/// Value type an option is parsed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    /// `true` / `false`.
    Bool,
    /// Integer, leading numeric prefix.
    Int,
    /// Decimal number, leading numeric prefix.
    Float,
    /// Free-form string.
    Str,
}

impl OptionKind {
    /// Short lowercase label for listings.
    pub const fn label(self) -> &'static str {
        match self {
            OptionKind::Bool => "bool",
            OptionKind::Int => "int",
            OptionKind::Float => "float",
            OptionKind::Str => "string",
        }
    }
}

/// A stored option value.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Decimal number.
    Float(f32),
    /// String.
    Str(Cow<'static, str>),
}

impl OptionValue {
    /// Borrowed string constant, usable in static descriptor tables.
    pub const fn str(s: &'static str) -> Self {
        OptionValue::Str(Cow::Borrowed(s))
    }

    /// Numeric view of the value. Integers widen; other kinds are `None`.
    pub fn as_f32(&self) -> Option<f32> {
        match *self {
            OptionValue::Int(v) => Some(v as f32),
            OptionValue::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Integer view of the value. Floats truncate toward zero.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            OptionValue::Int(v) => Some(v),
            OptionValue::Float(v) => Some(v as i64),
            _ => None,
        }
    }

    /// Boolean view of the value.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            OptionValue::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// String view of the value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl core::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OptionValue::Bool(v) => write!(f, "{v}"),
            OptionValue::Int(v) => write!(f, "{v}"),
            OptionValue::Float(v) => write!(f, "{v}"),
            OptionValue::Str(v) => f.write_str(v),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        OptionValue::Bool(v)
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        OptionValue::Int(v)
    }
}

impl From<f32> for OptionValue {
    fn from(v: f32) -> Self {
        OptionValue::Float(v)
    }
}

impl From<&'static str> for OptionValue {
    fn from(v: &'static str) -> Self {
        OptionValue::str(v)
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        OptionValue::Str(Cow::Owned(v))
    }
}

/// One recognized option key of a widget type.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionDescriptor {
    /// Canonical key.
    pub key: &'static str,
    /// Alternative spellings that resolve to `key`.
    pub aliases: &'static [&'static str],
    /// How the string form is parsed.
    pub kind: OptionKind,
    /// Value filled in at construction when the key is not supplied.
    pub default: Option<OptionValue>,
    /// One-line description for listings.
    pub description: &'static str,
}

impl OptionDescriptor {
    /// Whether `name` is the key or one of its aliases, ignoring ASCII case.
    pub fn matches(&self, name: &str) -> bool {
        self.key.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    /// Parses a raw attribute string with this descriptor's kind.
    ///
    /// Returns `None` when the string is malformed so the caller keeps the
    /// current value. Strings always parse.
    pub fn parse(&self, raw: &str) -> Option<OptionValue> {
        match self.kind {
            OptionKind::Bool => match raw {
                "true" | "false" => Some(OptionValue::Bool(parse_bool(raw, false))),
                _ => None,
            },
            OptionKind::Int => int_prefix(raw).map(OptionValue::Int),
            OptionKind::Float => float_prefix(raw).map(OptionValue::Float),
            OptionKind::Str => Some(OptionValue::Str(Cow::Owned(raw.to_string()))),
        }
    }
}

/// Per-instance option store.
///
/// Keys listed in the descriptor table are stored under their canonical
/// spelling; any other key is stored verbatim. Typed getters never fail and
/// fall back to zero, `false` or the empty string.
#[derive(Debug, Clone)]
pub struct OptionSet {
    descriptors: &'static [OptionDescriptor],
    values: BTreeMap<String, OptionValue>,
    updating: bool,
}

impl OptionSet {
    /// Creates a store holding the defaults of `descriptors`.
    pub fn new(descriptors: &'static [OptionDescriptor]) -> Self {
        let values = descriptors
            .iter()
            .filter_map(|d| d.default.clone().map(|v| (d.key.to_string(), v)))
            .collect();
        Self {
            descriptors,
            values,
            updating: false,
        }
    }

    /// Sets a value at construction time, before anyone observes the store.
    ///
    /// Builder pattern: call after [`new`](Self::new).
    pub fn with(mut self, key: &str, value: impl Into<OptionValue>) -> Self {
        let key = self.canonical(key);
        self.values.insert(key, value.into());
        self
    }

    /// The descriptor table this store was seeded from.
    pub fn descriptors(&self) -> &'static [OptionDescriptor] {
        self.descriptors
    }

    /// Looks up the descriptor for a key or alias.
    pub fn descriptor(&self, name: &str) -> Option<&'static OptionDescriptor> {
        self.descriptors.iter().find(|d| d.matches(name))
    }

    /// Resolves aliases to the canonical key.
    pub fn canonical(&self, name: &str) -> String {
        self.descriptor(name)
            .map_or_else(|| name.to_string(), |d| d.key.to_string())
    }

    /// Raw value for a key or alias.
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        match self.descriptor(name) {
            Some(d) => self.values.get(d.key),
            None => self.values.get(name),
        }
    }

    /// Whether a value is stored for the key.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Numeric value, `0.0` when absent or not numeric.
    pub fn float(&self, name: &str) -> f32 {
        self.get(name).and_then(OptionValue::as_f32).unwrap_or(0.0)
    }

    /// Integer value, `0` when absent or not numeric.
    pub fn int(&self, name: &str) -> i64 {
        self.get(name).and_then(OptionValue::as_i64).unwrap_or(0)
    }

    /// Boolean value, `false` when absent or not boolean.
    pub fn bool(&self, name: &str) -> bool {
        self.get(name).and_then(OptionValue::as_bool).unwrap_or(false)
    }

    /// String value, `""` when absent or not a string.
    pub fn str(&self, name: &str) -> &str {
        self.get(name).and_then(OptionValue::as_str).unwrap_or("")
    }

    /// Iterates over stored `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Parses an attribute for a known key.
    ///
    /// Attribute names match keys and aliases case-insensitively. Returns the
    /// canonical key and parsed value, or `None` for unknown names and
    /// malformed values.
    pub fn parse_attribute(&self, name: &str, raw: &str) -> Option<(&'static str, OptionValue)> {
        let desc = self.descriptor(name)?;
        desc.parse(raw).map(|v| (desc.key, v))
    }

    /// Stores a value and reports whether the change should be observed.
    ///
    /// Returns `true` for the outermost write; the caller then runs its
    /// change hook and calls [`end_update`](Self::end_update). Writes made
    /// while an update is in progress return `false`.
    pub fn begin_update(&mut self, name: &str, value: OptionValue) -> bool {
        let key = self.canonical(name);

        #[cfg(feature = "tracing")]
        tracing::debug!(key = %key, value = %value, nested = self.updating, "option update");

        self.values.insert(key, value);
        if self.updating {
            false
        } else {
            self.updating = true;
            true
        }
    }

    /// Closes the update opened by a `true` [`begin_update`](Self::begin_update).
    pub fn end_update(&mut self) {
        self.updating = false;
    }

    /// Whether an update is in progress.
    pub fn is_updating(&self) -> bool {
        self.updating
    }
}
