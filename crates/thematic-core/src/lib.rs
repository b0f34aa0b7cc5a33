//! Theme inheritance and resource resolution.
//!
//! Themes live in one or more root directories and may extend a parent
//! theme. A lookup searches the theme's roots in precedence order and then
//! its ancestors, so a child theme overrides exactly the files it provides.

pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod registry;
pub mod resolver;
pub mod resource;
pub mod scan;
pub mod settings;
pub mod theme;

pub use context::RenderContext;
pub use error::{ResolveError, ScanError, SettingsError, ThemeConfigError};
pub use handlers::HandlerCatalog;
pub use registry::ThemeRegistry;
pub use resolver::{ResolveTarget, ResourceResolver, resolve_element, resolve_layout, resolve_template};
pub use resource::{DirectoryResource, FileResource, Resource, ResourceKind};
pub use scan::DumpSummary;
pub use settings::{DEFAULT_CONFIG_FILE, DEFAULT_SETTINGS_FILE, RootSpec, SETTINGS_ENV_VAR, Settings};
pub use theme::{Ancestry, ProcessedThemes, Theme, ThemeRoot};

pub use thematic_model::{Conventions, ResourceName, ViewType};
