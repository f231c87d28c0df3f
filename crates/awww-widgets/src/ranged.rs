//! Value within a bounded, scaled range.

use awww_core::{OptionDescriptor, OptionKind, OptionSet, OptionValue, Scale, ValueRange, clamp_normalized};

/// Option keys shared by every ranged widget.
pub static RANGE_OPTIONS: [OptionDescriptor; 3] = [
    OptionDescriptor {
        key: "min",
        aliases: &["minValue"],
        kind: OptionKind::Float,
        default: Some(OptionValue::Float(0.0)),
        description: "Lower bound of the value, in domain units",
    },
    OptionDescriptor {
        key: "max",
        aliases: &["maxValue"],
        kind: OptionKind::Float,
        default: Some(OptionValue::Float(1.0)),
        description: "Upper bound of the value, in domain units",
    },
    OptionDescriptor {
        key: "scale",
        aliases: &[],
        kind: OptionKind::Str,
        default: Some(OptionValue::str("linear")),
        description: "Control curve: linear, log or db",
    },
];

/// Whether `key` is one of the range keys.
pub fn is_range_key(key: &str) -> bool {
    RANGE_OPTIONS.iter().any(|d| d.matches(key))
}

/// Builds the range described by `options`.
///
/// Unknown scale names fall back to linear.
pub fn range_from_options(options: &OptionSet) -> ValueRange {
    let scale = Scale::from_name(options.str("scale")).unwrap_or_default();
    ValueRange::new(options.float("min"), options.float("max")).with_scale(scale)
}

/// A domain value kept inside a [`ValueRange`].
///
/// The domain value is the source of truth. The normalized position is
/// always derived from it, so changing bounds never compounds rounding in
/// control space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangedValue {
    range: ValueRange,
    value: f32,
}

impl RangedValue {
    /// Starts at the lower bound of `range`.
    pub fn new(range: ValueRange) -> Self {
        Self {
            range,
            value: range.min,
        }
    }

    /// Current range.
    pub fn range(&self) -> ValueRange {
        self.range
    }

    /// Current domain value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Current position in control space.
    pub fn normalized(&self) -> f32 {
        self.range.normalize(self.value)
    }

    /// Stores a domain value, clamped into the range. Returns whether the
    /// stored value changed.
    pub fn set(&mut self, value: f32) -> bool {
        self.store(self.range.clamp(value))
    }

    /// Stores a control-space position, clamped into `[0, 1]`. Returns
    /// whether the stored value changed.
    ///
    /// The result is clamped into the domain as well: the decibel curve maps
    /// positions below `0.1` under `min`, and `0` to negative infinity.
    pub fn set_normalized(&mut self, t: f32) -> bool {
        let value = self.range.denormalize(clamp_normalized(t));
        self.store(self.range.clamp(value))
    }

    /// Replaces the range and re-clamps the last domain value against it.
    /// Returns whether the stored value changed.
    pub fn set_range(&mut self, range: ValueRange) -> bool {
        self.range = range;
        self.store(range.clamp(self.value))
    }

    fn store(&mut self, value: f32) -> bool {
        // NaN never compares equal; treat NaN -> NaN as unchanged
        let changed = value != self.value && !(value.is_nan() && self.value.is_nan());
        self.value = value;
        changed
    }
}

impl Default for RangedValue {
    fn default() -> Self {
        Self::new(ValueRange::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_min() {
        let v = RangedValue::new(ValueRange::new(-12.0, 12.0));
        assert_eq!(v.value(), -12.0);
        assert_eq!(v.normalized(), 0.0);
    }

    #[test]
    fn set_clamps_in_domain() {
        let mut v = RangedValue::default();
        assert!(v.set(2.0));
        assert_eq!(v.value(), 1.0);
        assert!(!v.set(5.0));
    }

    #[test]
    fn set_normalized_clamps_in_control_space() {
        let mut v = RangedValue::new(ValueRange::new(0.0, 10.0));
        assert!(v.set_normalized(1.7));
        assert_eq!(v.value(), 10.0);
        assert!(v.set_normalized(-0.3));
        assert_eq!(v.value(), 0.0);
    }

    #[test]
    fn range_change_rederives_from_domain_value() {
        let mut v = RangedValue::new(ValueRange::new(0.0, 10.0));
        v.set(8.0);
        assert!(v.set_range(ValueRange::new(0.0, 5.0)));
        assert_eq!(v.value(), 5.0);

        // Widening again does not bring back 8
        assert!(!v.set_range(ValueRange::new(0.0, 10.0)));
        assert_eq!(v.value(), 5.0);
        assert_eq!(v.normalized(), 0.5);
    }

    #[test]
    fn range_change_inside_bounds_keeps_value() {
        let mut v = RangedValue::new(ValueRange::new(20.0, 20_000.0));
        v.set(440.0);
        assert!(!v.set_range(ValueRange::new(20.0, 20_000.0).with_scale(Scale::Logarithmic)));
        assert_eq!(v.value(), 440.0);
    }

    #[test]
    fn decibel_low_positions_clamp_to_min() {
        let mut v = RangedValue::new(ValueRange::new(-60.0, 0.0).with_scale(Scale::Decibel));
        v.set(-6.0);
        assert!(v.set_normalized(0.0));
        assert_eq!(v.value(), -60.0);
        assert!(!v.set_normalized(0.05));
        assert_eq!(v.value(), -60.0);

        assert!(v.set_normalized(1.0));
        assert_eq!(v.value(), 0.0);
    }

    #[test]
    fn options_build_ranges() {
        let opts = OptionSet::new(&RANGE_OPTIONS).with("maxValue", 100.0_f32).with("scale", "log");
        let r = range_from_options(&opts);
        assert_eq!((r.min, r.max, r.scale), (0.0, 100.0, Scale::Logarithmic));

        let opts = OptionSet::new(&RANGE_OPTIONS).with("scale", "cubic");
        assert_eq!(range_from_options(&opts).scale, Scale::Linear);
    }

    #[test]
    fn range_keys() {
        assert!(is_range_key("minValue"));
        assert!(is_range_key("SCALE"));
        assert!(!is_range_key("value"));
    }
}
