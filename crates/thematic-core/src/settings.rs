//! Engine settings - theme roots, namespace and file conventions.
//!
//! Settings are read from a `thematic.toml` file. Relative root paths are
//! resolved against the directory containing that file, so a project can
//! carry its settings next to its themes.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thematic_model::{Conventions, DEFAULT_NAMESPACE};
use tracing::debug;

use crate::error::SettingsError;

/// Environment variable pointing at a settings file.
pub const SETTINGS_ENV_VAR: &str = "THEMATIC_SETTINGS";

/// Settings file looked up in the working directory when nothing else is given.
pub const DEFAULT_SETTINGS_FILE: &str = "thematic.toml";

/// Name of the per-theme configuration file inside each theme directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

// =============================================================================
// SETTINGS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Namespace reserved for fully-qualified theme identifiers.
    pub namespace: String,

    /// Theme root bases in precedence order; the first root wins.
    pub roots: Vec<RootSpec>,

    /// File name of a theme's own configuration.
    pub config_file_name: String,

    pub conventions: Conventions,
}

/// One theme root base, e.g. the application's override directory or a
/// bundled vendor directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootSpec {
    pub kind: String,
    pub path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            roots: vec![
                RootSpec::new("app", "themes"),
                RootSpec::new("vendor", "vendor/themes"),
            ],
            config_file_name: DEFAULT_CONFIG_FILE.to_string(),
            conventions: Conventions::default(),
        }
    }
}

impl RootSpec {
    pub fn new(kind: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            kind: kind.into(),
            path: path.into(),
        }
    }
}

impl Settings {
    /// Settings with no roots; add them with [`Settings::with_root`].
    pub fn empty() -> Self {
        Self {
            roots: Vec::new(),
            ..Self::default()
        }
    }

    /// Append a root with the lowest precedence so far.
    pub fn with_root(mut self, kind: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.roots.push(RootSpec::new(kind, path));
        self
    }

    pub fn with_conventions(mut self, conventions: Conventions) -> Self {
        self.conventions = conventions;
        self
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::io(path, e))?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_toml_str(&content, base_dir).map_err(|e| match e {
            SettingsError::Toml { source, .. } => SettingsError::Toml {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse settings text, resolving relative root paths against `base_dir`.
    pub fn from_toml_str(content: &str, base_dir: &Path) -> Result<Self, SettingsError> {
        let mut settings: Settings =
            toml::from_str(content).map_err(|source| SettingsError::Toml {
                path: PathBuf::new(),
                source,
            })?;
        settings.resolve_roots(base_dir);
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings using the lookup order: an explicit path, then
    /// [`SETTINGS_ENV_VAR`], then [`DEFAULT_SETTINGS_FILE`] in `working_dir`.
    ///
    /// Only a missing default file falls back to [`Settings::default`]
    /// (with roots relative to `working_dir`); an explicit or environment
    /// path that cannot be read is an error.
    pub fn discover(explicit: Option<&Path>, working_dir: &Path) -> Result<Self, SettingsError> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading settings from command line");
            return Self::load_from(path);
        }
        if let Ok(path) = std::env::var(SETTINGS_ENV_VAR)
            && !path.trim().is_empty()
        {
            debug!(path = %path, "loading settings from {SETTINGS_ENV_VAR}");
            return Self::load_from(Path::new(&path));
        }
        let default_path = working_dir.join(DEFAULT_SETTINGS_FILE);
        if default_path.is_file() {
            debug!(path = %default_path.display(), "loading settings from working directory");
            return Self::load_from(&default_path);
        }
        debug!("no settings file found, using defaults");
        let mut settings = Self::default();
        settings.resolve_roots(working_dir);
        Ok(settings)
    }

    /// Root bases in precedence order.
    pub fn root_paths(&self) -> impl Iterator<Item = &Path> {
        self.roots.iter().map(|root| root.path.as_path())
    }

    fn resolve_roots(&mut self, base_dir: &Path) {
        for root in &mut self.roots {
            if root.path.is_relative() {
                root.path = base_dir.join(&root.path);
            }
        }
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.namespace.trim().is_empty() {
            return Err(SettingsError::EmptyNamespace);
        }
        let mut seen = HashSet::new();
        for root in &self.roots {
            if root.kind.trim().is_empty() {
                return Err(SettingsError::EmptyRootKind {
                    path: root.path.clone(),
                });
            }
            if !seen.insert(root.kind.as_str()) {
                return Err(SettingsError::DuplicateRootKind {
                    kind: root.kind.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_roots_follow_the_settings_directory() {
        let settings = Settings::from_toml_str(
            r#"
[[roots]]
kind = "app"
path = "resources/themes"

[[roots]]
kind = "vendor"
path = "/opt/themes"
"#,
            Path::new("/srv/site"),
        )
        .unwrap();
        let roots: Vec<&Path> = settings.root_paths().collect();
        assert_eq!(
            roots,
            [
                Path::new("/srv/site/resources/themes"),
                Path::new("/opt/themes")
            ]
        );
        assert_eq!(settings.namespace, DEFAULT_NAMESPACE);
        assert_eq!(settings.config_file_name, DEFAULT_CONFIG_FILE);
    }

    #[test]
    fn duplicate_root_kinds_are_rejected() {
        let err = Settings::from_toml_str(
            r#"
roots = [{ kind = "app", path = "a" }, { kind = "app", path = "b" }]
"#,
            Path::new("."),
        )
        .unwrap_err();
        assert!(matches!(err, SettingsError::DuplicateRootKind { kind } if kind == "app"));
    }

    #[test]
    fn blank_namespace_is_rejected() {
        let err = Settings::from_toml_str("namespace = \" \"", Path::new(".")).unwrap_err();
        assert!(matches!(err, SettingsError::EmptyNamespace));
    }
}
