//! Entry point turning raw identifiers into resources.

use std::fmt;
use std::path::PathBuf;

use thematic_model::{ResourceName, ViewType};
use tracing::debug;

use crate::context::RenderContext;
use crate::error::ResolveError;
use crate::registry::ThemeRegistry;
use crate::resource::Resource;
use crate::theme::ProcessedThemes;

/// Where an identifier points: a theme and a name relative to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveTarget {
    pub theme: String,
    pub resource_type: String,
    pub name: String,
}

impl ResolveTarget {
    /// `type.name`, the form handed to [`crate::Theme::resolve`].
    pub fn relative_name(&self) -> String {
        format!("{}.{}", self.resource_type, self.name)
    }
}

impl fmt::Display for ResolveTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.theme, self.resource_type, self.name)
    }
}

/// Resolves identifiers for one view type.
///
/// - `ns::theme.type.name` (reserved namespace) is fully qualified.
/// - `theme.type.name` names the type explicitly.
/// - `theme.name` uses this resolver's view type.
/// - `name` takes its theme from the render context.
#[derive(Debug, Clone)]
pub struct ResourceResolver<'a> {
    registry: &'a ThemeRegistry,
    view_type: ViewType,
}

impl<'a> ResourceResolver<'a> {
    pub fn new(registry: &'a ThemeRegistry, view_type: ViewType) -> Self {
        Self {
            registry,
            view_type,
        }
    }

    pub fn view_type(&self) -> ViewType {
        self.view_type
    }

    /// Split an identifier into theme, type and name without touching the
    /// filesystem.
    pub fn target(&self, raw: &str, context: &RenderContext) -> Result<ResolveTarget, ResolveError> {
        let name = ResourceName::parse(raw)?;
        let reserved = self.registry.namespace();

        match name.namespace() {
            Some(namespace) if namespace == reserved => {
                if !name.is_namespaced_theme_view(reserved) {
                    return Err(ResolveError::UnderQualified {
                        raw: raw.to_string(),
                    });
                }
            }
            Some(namespace) => {
                return Err(ResolveError::UnknownNamespace {
                    raw: raw.to_string(),
                    namespace: namespace.to_string(),
                });
            }
            None => {}
        }

        let segments = name.segments();
        let target = match segments {
            [bare] => {
                let theme = context
                    .current_theme_name()
                    .ok_or_else(|| ResolveError::NoCurrentTheme {
                        raw: raw.to_string(),
                    })?;
                ResolveTarget {
                    theme: theme.to_string(),
                    resource_type: self.view_type.as_str().to_string(),
                    name: bare.clone(),
                }
            }
            [theme, bare] => ResolveTarget {
                theme: theme.clone(),
                resource_type: self.view_type.as_str().to_string(),
                name: bare.clone(),
            },
            [theme, resource_type, rest @ ..] => ResolveTarget {
                theme: theme.clone(),
                resource_type: resource_type.clone(),
                name: rest.join("."),
            },
            [] => return Err(thematic_model::NameError::Empty.into()),
        };
        Ok(target)
    }

    /// Resolve an identifier to a file or directory. Single-file templates
    /// are found by appending the template extensions. A missing theme or
    /// resource is `Ok(None)`.
    pub fn resolve(&self, raw: &str, context: &RenderContext) -> Result<Option<Resource>, ResolveError> {
        let target = self.target(raw, context)?;
        let Some(theme) = self.registry.get_existing(&target.theme) else {
            debug!(identifier = raw, theme = %target.theme, "theme not found");
            return Ok(None);
        };
        let resource = theme.resolve(
            &target.relative_name(),
            theme.conventions().template_file_extensions.as_slice(),
            true,
            &mut ProcessedThemes::new(),
        );
        if resource.is_none() {
            debug!(identifier = raw, %target, "resource not found");
        }
        Ok(resource)
    }

    /// Resolve an identifier to the template file that renders it.
    pub fn resolve_view_file(&self, raw: &str, context: &RenderContext) -> Result<Option<PathBuf>, ResolveError> {
        let target = self.target(raw, context)?;
        let Some(theme) = self.registry.get_existing(&target.theme) else {
            debug!(identifier = raw, theme = %target.theme, "theme not found");
            return Ok(None);
        };
        Ok(theme.get_view_file(&target.relative_name(), true, &mut ProcessedThemes::new()))
    }
}

pub fn resolve_element(
    registry: &ThemeRegistry,
    raw: &str,
    context: &RenderContext,
) -> Result<Option<Resource>, ResolveError> {
    ResourceResolver::new(registry, ViewType::Elements).resolve(raw, context)
}

pub fn resolve_layout(
    registry: &ThemeRegistry,
    raw: &str,
    context: &RenderContext,
) -> Result<Option<Resource>, ResolveError> {
    ResourceResolver::new(registry, ViewType::Layouts).resolve(raw, context)
}

pub fn resolve_template(
    registry: &ThemeRegistry,
    raw: &str,
    context: &RenderContext,
) -> Result<Option<Resource>, ResolveError> {
    ResourceResolver::new(registry, ViewType::Templates).resolve(raw, context)
}
