//! Value scale model.
//!
//! Widgets keep their position in a normalized \[0.0, 1.0\] control space and
//! report a domain value in `[min, max]`. A [`Scale`] picks the curve between
//! the two.
//!
//! # Formulas
//!
//! - **Linear**: `t = (value - min) / (max - min)`, `value = min + t * (max - min)`
//! - **Logarithmic**: the linear formulas applied to `ln(value)`, `ln(min)`
//!   and `ln(max)`, then exponentiated back
//! - **Decibel**: `t = 10^((value - max) / (max - min))`,
//!   `value = max + (max - min) * log10(t)`
//!
//! The functions perform no domain validation. A logarithmic scale with
//! `min <= 0` or an empty range produces NaN or infinity, and that result is
//! handed back to the caller unchanged.
//!
//! # Decibel Asymmetry
//!
//! The decibel pair composes to the identity in both directions, but its
//! image is not \[0, 1\]: `normalize(min) = 0.1` and `normalize(max) = 1.0`,
//! while `denormalize(0.0)` is negative infinity and any `t < 0.1` lands
//! below `min`. A widget driving this scale from a clamped \[0, 1\] position
//! therefore reaches values under `min`; the domain clamp applied on the way
//! in is what keeps externally set values inside the range.

/// Mapping family between control space and domain values.
///
/// Selected per widget through the `scale` option. Linear is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Scale {
    /// Equal resolution across the range.
    #[default]
    Linear,
    /// Equal resolution per octave/decade. Requires `min > 0` and `max > 0`.
    #[cfg_attr(feature = "serde", serde(rename = "log"))]
    Logarithmic,
    /// Exponential curve anchored at `max`, for level controls.
    #[cfg_attr(feature = "serde", serde(rename = "db"))]
    Decibel,
}

impl Scale {
    /// All scales, in option-string order.
    pub const ALL: [Scale; 3] = [Scale::Linear, Scale::Logarithmic, Scale::Decibel];

    /// Parses an option string.
    ///
    /// Accepts `linear`, `log` and `db` plus the long forms `lin`,
    /// `logarithmic` and `decibel`, ignoring ASCII case and surrounding
    /// whitespace. Returns `None` for anything else so the caller can fall
    /// back to its default.
    ///
    /// # Example
    ///
    /// ```rust
    /// use awww_core::Scale;
    ///
    /// assert_eq!(Scale::from_name("log"), Some(Scale::Logarithmic));
    /// assert_eq!(Scale::from_name(" DB "), Some(Scale::Decibel));
    /// assert_eq!(Scale::from_name("cubic"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        let matches = |candidates: &[&str]| candidates.iter().any(|c| name.eq_ignore_ascii_case(c));

        if matches(&["linear", "lin"]) {
            Some(Scale::Linear)
        } else if matches(&["log", "logarithmic"]) {
            Some(Scale::Logarithmic)
        } else if matches(&["db", "decibel"]) {
            Some(Scale::Decibel)
        } else {
            None
        }
    }

    /// Returns the short option string for this scale.
    pub const fn name(self) -> &'static str {
        match self {
            Scale::Linear => "linear",
            Scale::Logarithmic => "log",
            Scale::Decibel => "db",
        }
    }
}

impl core::fmt::Display for Scale {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Converts a domain value to control space.
///
/// # Example
///
/// ```rust
/// use awww_core::{Scale, normalize};
///
/// assert_eq!(normalize(Scale::Linear, 25.0, 0.0, 100.0), 0.25);
/// let t = normalize(Scale::Logarithmic, 632.455_5, 20.0, 20_000.0);
/// assert!((t - 0.5).abs() < 1e-4);
/// ```
#[inline]
pub fn normalize(scale: Scale, value: f32, min: f32, max: f32) -> f32 {
    match scale {
        Scale::Linear => (value - min) / (max - min),
        Scale::Logarithmic => {
            let log_min = libm::logf(min);
            let log_max = libm::logf(max);
            (libm::logf(value) - log_min) / (log_max - log_min)
        }
        Scale::Decibel => libm::powf(10.0, (value - max) / (max - min)),
    }
}

/// Converts a control-space position to a domain value.
///
/// # Example
///
/// ```rust
/// use awww_core::{Scale, denormalize};
///
/// assert_eq!(denormalize(Scale::Linear, 0.5, -1.0, 1.0), 0.0);
/// assert_eq!(denormalize(Scale::Decibel, 1.0, -60.0, 0.0), 0.0);
/// ```
#[inline]
pub fn denormalize(scale: Scale, t: f32, min: f32, max: f32) -> f32 {
    match scale {
        Scale::Linear => min + t * (max - min),
        Scale::Logarithmic => {
            let log_min = libm::logf(min);
            let log_max = libm::logf(max);
            libm::expf(log_min + t * (log_max - log_min))
        }
        Scale::Decibel => max + (max - min) * libm::log10f(t),
    }
}

/// Clamps a domain value to `[min, max]`.
///
/// Written as `max(min, min(max, value))`, so an inverted range resolves to
/// `min` and a NaN value resolves to `max`.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    min.max(max.min(value))
}

/// Clamps a control-space position to \[0.0, 1.0\].
#[inline]
pub fn clamp_normalized(t: f32) -> f32 {
    clamp(t, 0.0, 1.0)
}
