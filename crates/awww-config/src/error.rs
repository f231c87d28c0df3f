//! Errors raised by layout files.

use std::path::PathBuf;
use thiserror::Error;

/// Why a layout could not be loaded, saved or turned into widgets.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The layout file could not be read.
    #[error("cannot read layout '{path}': {source}")]
    ReadFile {
        /// Layout path as given.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The layout file could not be written.
    #[error("cannot write layout '{path}': {source}")]
    WriteFile {
        /// Layout path as given.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The directory holding a saved layout could not be created.
    #[error("cannot create layout directory '{path}': {source}")]
    CreateDir {
        /// Directory that was being created.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Layout text is not valid TOML or does not match the layout shape.
    #[error("invalid layout: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Layout could not be rendered as TOML.
    #[error("cannot serialize layout: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Two widgets share an id.
    #[error("duplicate widget id: {0}")]
    DuplicateId(String),

    /// A widget names a kind no widget implements.
    #[error("unknown widget kind '{kind}' for widget '{id}'")]
    UnknownKind {
        /// Id of the offending widget.
        id: String,
        /// The kind as written.
        kind: String,
    },
}

impl ConfigError {
    /// Layout `path` could not be read.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Layout `path` could not be written.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Directory `path` for a saved layout could not be created.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Widget `id` has an unrecognized `kind`.
    pub fn unknown_kind(id: impl Into<String>, kind: impl Into<String>) -> Self {
        ConfigError::UnknownKind {
            id: id.into(),
            kind: kind.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io;

    fn denied() -> io::Error {
        io::Error::from(io::ErrorKind::PermissionDenied)
    }

    #[test]
    fn read_error_names_layout_path() {
        let err = ConfigError::read_file("/a/view.toml", denied());
        let msg = err.to_string();
        assert!(msg.starts_with("cannot read layout '/a/view.toml'"), "got: {msg}");
        assert!(err.source().is_some());
    }

    #[test]
    fn write_and_dir_errors_keep_paths() {
        let err = ConfigError::write_file("/out/view.toml", denied());
        assert!(
            matches!(err, ConfigError::WriteFile { ref path, .. } if path == std::path::Path::new("/out/view.toml"))
        );
        let err = ConfigError::create_dir("/out", denied());
        assert!(err.to_string().contains("layout directory '/out'"));
    }

    #[test]
    fn duplicate_id_display() {
        let err = ConfigError::DuplicateId("gain".to_string());
        assert_eq!(err.to_string(), "duplicate widget id: gain");
        assert!(err.source().is_none());
    }

    #[test]
    fn unknown_kind_display() {
        let err = ConfigError::unknown_kind("x", "slider");
        assert_eq!(err.to_string(), "unknown widget kind 'slider' for widget 'x'");
        assert!(err.source().is_none());
    }
}
