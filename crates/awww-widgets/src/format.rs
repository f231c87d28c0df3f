//! Value labels shown next to widgets.

use std::fmt;

/// How a domain value is rendered as a label.
///
/// | Format     | Label                   |
/// |------------|-------------------------|
/// | `Percent`  | `"50%"` (value is 0–1)  |
/// | `Hertz`    | `"440 Hz"` / `"1.2 kHz"`|
/// | `Decibels` | `"-3.5 dB"`             |
/// | `Plain`    | `"0.50"`                |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueFormat {
    /// Fraction shown as a whole percentage, rounded up.
    Percent,
    /// Frequency, rounded up below 1 kHz.
    Hertz,
    /// Level with one decimal.
    Decibels,
    /// Two decimals, no unit.
    #[default]
    Plain,
}

impl ValueFormat {
    /// Every format, in listing order.
    pub const ALL: [ValueFormat; 4] = [
        ValueFormat::Percent,
        ValueFormat::Hertz,
        ValueFormat::Decibels,
        ValueFormat::Plain,
    ];

    /// Looks a format up by name (`percent`/`%`, `hz`/`hertz`, `db`/`decibels`,
    /// `plain`), ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        match name.as_str() {
            "percent" | "%" => Some(ValueFormat::Percent),
            "hz" | "hertz" => Some(ValueFormat::Hertz),
            "db" | "decibels" => Some(ValueFormat::Decibels),
            "plain" | "none" => Some(ValueFormat::Plain),
            _ => None,
        }
    }

    /// Canonical name.
    pub const fn name(self) -> &'static str {
        match self {
            ValueFormat::Percent => "percent",
            ValueFormat::Hertz => "hz",
            ValueFormat::Decibels => "db",
            ValueFormat::Plain => "plain",
        }
    }

    /// Renders `value` as a label.
    pub fn format(self, value: f32) -> String {
        match self {
            ValueFormat::Percent => format!("{}%", (100.0 * value).ceil()),
            ValueFormat::Hertz => {
                if value >= 1000.0 {
                    format!("{:.1} kHz", value / 1000.0)
                } else {
                    format!("{} Hz", value.ceil())
                }
            }
            ValueFormat::Decibels => format!("{value:.1} dB"),
            ValueFormat::Plain => format!("{value:.2}"),
        }
    }
}

impl fmt::Display for ValueFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
