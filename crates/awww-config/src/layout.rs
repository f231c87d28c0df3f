//! Layout file format and widget construction.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use awww_widgets::{Configurable, Knob, ParamIndex, ResizeHandle, ValueFormat};

use crate::error::ConfigError;
use crate::widget_config::{WidgetConfig, WidgetKind};

/// Layout file describing the widgets of a plugin view.
///
/// # TOML Format
///
/// ```toml
/// name = "Filter"
///
/// [[widgets]]
/// id = "cutoff"
/// kind = "knob"
/// parameter = 0
/// format = "hz"
/// [widgets.options]
/// min = "20"
/// max = "20000"
/// scale = "log"
/// value = "440"
///
/// [[widgets]]
/// id = "size"
/// kind = "resize"
/// [widgets.options]
/// minWidth = "320"
/// minHeight = "200"
/// keepAspectRatio = "true"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Layout {
    /// Optional view name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Widgets in the view.
    #[serde(default)]
    pub widgets: Vec<WidgetConfig>,
}

/// A widget constructed from a [`WidgetConfig`], not yet mounted.
#[derive(Debug)]
pub enum BuiltWidget {
    /// A knob with its parameter binding and label format.
    Knob {
        /// Widget id.
        id: String,
        /// Host parameter the knob writes to.
        parameter: Option<ParamIndex>,
        /// Label format.
        format: ValueFormat,
        /// The knob.
        knob: Knob,
    },
    /// A view resize handle.
    Resize {
        /// Widget id.
        id: String,
        /// The handle.
        handle: ResizeHandle,
    },
}

impl BuiltWidget {
    /// Widget id.
    pub fn id(&self) -> &str {
        match self {
            BuiltWidget::Knob { id, .. } | BuiltWidget::Resize { id, .. } => id,
        }
    }

    /// Widget kind.
    pub fn kind(&self) -> WidgetKind {
        match self {
            BuiltWidget::Knob { .. } => WidgetKind::Knob,
            BuiltWidget::Resize { .. } => WidgetKind::Resize,
        }
    }
}

impl Layout {
    /// Create an empty layout.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            widgets: Vec::new(),
        }
    }

    /// Add a widget to the layout.
    pub fn with_widget(mut self, widget: WidgetConfig) -> Self {
        self.widgets.push(widget);
        self
    }

    /// Load a layout from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let layout: Layout = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), widgets = layout.widgets.len(), "layout loaded");
        Ok(layout)
    }

    /// Load a layout from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the layout to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the layout to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Number of widgets.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether the layout has no widgets.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Find a widget entry by id.
    pub fn get(&self, id: &str) -> Option<&WidgetConfig> {
        self.widgets.iter().find(|w| w.id == id)
    }

    /// Check ids are unique and kinds are known.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for widget in &self.widgets {
            if !seen.insert(widget.id.as_str()) {
                return Err(ConfigError::DuplicateId(widget.id.clone()));
            }
            if widget.widget_kind().is_none() {
                return Err(ConfigError::unknown_kind(&widget.id, &widget.kind));
            }
        }
        Ok(())
    }

    /// Validate the layout and construct every widget.
    ///
    /// Malformed or unknown options are skipped with a warning, the same
    /// way widgets ignore malformed attributes.
    pub fn build(&self) -> Result<Vec<BuiltWidget>, ConfigError> {
        self.validate()?;
        self.widgets.iter().map(build_widget).collect()
    }
}

/// Construct one widget from its entry.
pub fn build_widget(config: &WidgetConfig) -> Result<BuiltWidget, ConfigError> {
    let kind = config
        .widget_kind()
        .ok_or_else(|| ConfigError::unknown_kind(&config.id, &config.kind))?;

    match kind {
        WidgetKind::Knob => {
            let mut knob = Knob::new();
            apply_options(&mut knob, config);
            let format = match config.format.as_deref() {
                None => ValueFormat::default(),
                Some(name) => ValueFormat::from_name(name).unwrap_or_else(|| {
                    tracing::warn!(id = %config.id, format = name, "unknown format, using plain");
                    ValueFormat::default()
                }),
            };
            Ok(BuiltWidget::Knob {
                id: config.id.clone(),
                parameter: config.parameter.map(ParamIndex),
                format,
                knob,
            })
        }
        WidgetKind::Resize => {
            if config.parameter.is_some() || config.format.is_some() {
                tracing::warn!(id = %config.id, "resize handles take no parameter or format");
            }
            let mut handle = ResizeHandle::new();
            apply_options(&mut handle, config);
            Ok(BuiltWidget::Resize {
                id: config.id.clone(),
                handle,
            })
        }
    }
}

/// Applies option strings as attributes. `value` goes last so it is
/// clamped against the configured range.
fn apply_options<W: Configurable>(widget: &mut W, config: &WidgetConfig) {
    let (value, rest): (Vec<_>, Vec<_>) = config
        .options
        .iter()
        .partition(|(key, _)| key.eq_ignore_ascii_case("value"));

    for (key, raw) in rest.into_iter().chain(value) {
        if !widget.set_attribute(key, raw) {
            tracing::warn!(id = %config.id, key = %key, value = %raw, "ignored layout option");
        }
    }
}
