//! Bounded, scaled value range.

use crate::scale::{self, Scale};

/// A `[min, max]` domain paired with the [`Scale`] used to reach it.
///
/// `ValueRange` is a plain value type: widgets rebuild it whenever one of
/// the `min`, `max` or `scale` options changes and re-clamp their stored
/// domain value against the new range.
///
/// # Example
///
/// ```rust
/// use awww_core::{Scale, ValueRange};
///
/// let cutoff = ValueRange::new(20.0, 20_000.0).with_scale(Scale::Logarithmic);
/// assert_eq!(cutoff.clamp(5.0), 20.0);
/// assert!((cutoff.denormalize(cutoff.normalize(440.0)) - 440.0).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueRange {
    /// Lower domain bound.
    pub min: f32,
    /// Upper domain bound.
    pub max: f32,
    /// Mapping between control space and the domain.
    pub scale: Scale,
}

impl ValueRange {
    /// Creates a linear range.
    pub const fn new(min: f32, max: f32) -> Self {
        Self {
            min,
            max,
            scale: Scale::Linear,
        }
    }

    /// Sets the scale.
    ///
    /// Builder pattern: call after [`new`](Self::new).
    pub const fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    /// Returns `max - min`.
    #[inline]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Clamps a domain value into the range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        scale::clamp(value, self.min, self.max)
    }

    /// Whether `value` lies inside `[min, max]`.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Converts a domain value to control space through the range's scale.
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        scale::normalize(self.scale, value, self.min, self.max)
    }

    /// Converts a control-space position to a domain value through the
    /// range's scale.
    #[inline]
    pub fn denormalize(&self, t: f32) -> f32 {
        scale::denormalize(self.scale, t, self.min, self.max)
    }
}

impl Default for ValueRange {
    /// The unit range `[0, 1]`, linear.
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}
