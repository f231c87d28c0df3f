//! Widget layouts for awww plugin views.
//!
//! A layout file lists the widgets of a plugin view, their options as
//! attribute strings, and which host parameter each knob drives. Layouts are
//! TOML, loaded with [`Layout::load`] and turned into widgets with
//! [`Layout::build`].
//!
//! # Example
//!
//! ```rust
//! use awww_config::{BuiltWidget, Layout};
//!
//! let layout = Layout::from_toml(r#"
//!     [[widgets]]
//!     id = "mix"
//!     kind = "knob"
//!     parameter = 1
//!     format = "percent"
//!     [widgets.options]
//!     value = "0.5"
//! "#).unwrap();
//!
//! let widgets = layout.build().unwrap();
//! assert!(matches!(&widgets[0], BuiltWidget::Knob { parameter: Some(_), .. }));
//! ```

mod error;
mod layout;
mod widget_config;

pub use error::ConfigError;
pub use layout::{BuiltWidget, Layout, build_widget};
pub use widget_config::{WidgetConfig, WidgetKind};
