use std::path::PathBuf;

use thematic_model::NameError;

/// Failures while loading the engine settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("root kind must not be empty (root path {path})")]
    EmptyRootKind { path: PathBuf },

    #[error("duplicate root kind in settings: {kind}")]
    DuplicateRootKind { kind: String },

    #[error("namespace must not be empty")]
    EmptyNamespace,
}

/// Failures while reading a theme's own configuration file.
///
/// These never abort theme construction; the theme keeps whatever
/// configuration could be read and records the error.
#[derive(Debug, thiserror::Error)]
pub enum ThemeConfigError {
    #[error("failed to read theme config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse theme config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Failures at the resolver boundary. A missing theme or resource is not an
/// error; it is reported as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Name(#[from] NameError),

    #[error("resource name [{raw}] uses unknown namespace '{namespace}'")]
    UnknownNamespace { raw: String, namespace: String },

    #[error("resource name [{raw}] must name a theme, a type and a resource")]
    UnderQualified { raw: String },

    #[error("cannot resolve [{raw}]: no current theme in this render context")]
    NoCurrentTheme { raw: String },
}

/// Failures while walking or copying a theme tree.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("failed to copy {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("theme '{name}' has no root directory")]
    MissingTheme { name: String },
}

impl SettingsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl ScanError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
