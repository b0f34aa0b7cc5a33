//! Per-request rendering state used to infer the theme of bare names.
//!
//! A bare identifier such as `card` names no theme. While a view renders,
//! the theme comes from the outermost element currently rendering, or
//! failing that from the view file being rendered. The state lives in a
//! value owned by the request, so concurrent requests never share it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thematic_model::ResourceName;
use tracing::debug;

use crate::registry::ThemeRegistry;
use crate::theme::Theme;

#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    current_view: Option<PathBuf>,
    view_theme: Option<String>,
    top_level_element: Option<String>,
    element_theme: Option<String>,
    fallback_theme: Option<String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context whose theme is fixed, e.g. the theme of the active layout.
    pub fn with_theme(theme: impl Into<String>) -> Self {
        Self {
            fallback_theme: Some(theme.into()),
            ..Self::default()
        }
    }

    pub fn set_fallback_theme(&mut self, theme: Option<String>) {
        self.fallback_theme = theme;
    }

    /// Record the view file being rendered and the theme that holds it.
    pub fn set_current_view(&mut self, registry: &ThemeRegistry, path: &Path) -> Option<Arc<Theme>> {
        let theme = registry.theme_for_path(path);
        self.current_view = Some(path.to_path_buf());
        self.view_theme = theme.as_ref().map(|theme| theme.name().to_string());
        debug!(
            view = %path.display(),
            theme = self.view_theme.as_deref().unwrap_or("-"),
            "current view set"
        );
        theme
    }

    pub fn current_view(&self) -> Option<&Path> {
        self.current_view.as_deref()
    }

    pub fn view_theme(&self) -> Option<&str> {
        self.view_theme.as_deref()
    }

    /// Start rendering an element. Only the first element entered is
    /// tracked; nested elements return `false`.
    pub fn enter_element(&mut self, element: &str) -> bool {
        if self.top_level_element.is_some() {
            return false;
        }
        self.top_level_element = Some(element.to_string());
        self.element_theme = element_theme(element);
        true
    }

    /// Finish rendering an element. Only the tracked outermost element can
    /// clear the registration.
    pub fn exit_element(&mut self, element: &str) -> bool {
        if self.top_level_element.as_deref() != Some(element) {
            return false;
        }
        self.top_level_element = None;
        self.element_theme = None;
        true
    }

    pub fn top_level_element(&self) -> Option<&str> {
        self.top_level_element.as_deref()
    }

    /// Name of the theme bare identifiers resolve in: the theme segment of
    /// the outermost element, else the theme of the current view, else the
    /// fixed theme.
    pub fn current_theme_name(&self) -> Option<&str> {
        self.element_theme
            .as_deref()
            .or(self.view_theme.as_deref())
            .or(self.fallback_theme.as_deref())
    }

    pub fn current_theme(&self, registry: &ThemeRegistry) -> Option<Arc<Theme>> {
        registry.get_existing(self.current_theme_name()?)
    }
}

/// Theme segment of an element identifier. A bare element name carries no
/// theme.
fn element_theme(element: &str) -> Option<String> {
    let name = ResourceName::parse(element).ok()?;
    (name.segment_count() >= 2).then(|| name.theme().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_outermost_element_is_tracked() {
        let mut context = RenderContext::new();
        assert!(context.enter_element("base.card"));
        assert!(!context.enter_element("other.button"));
        assert!(!context.exit_element("other.button"));
        assert_eq!(context.top_level_element(), Some("base.card"));
        assert!(context.exit_element("base.card"));
        assert_eq!(context.top_level_element(), None);
    }

    #[test]
    fn element_theme_beats_fallback() {
        let mut context = RenderContext::with_theme("fallback");
        assert_eq!(context.current_theme_name(), Some("fallback"));
        context.enter_element("thematic::child.elements.card");
        assert_eq!(context.current_theme_name(), Some("child"));
    }

    #[test]
    fn bare_element_names_do_not_set_a_theme() {
        let mut context = RenderContext::with_theme("fallback");
        context.enter_element("card");
        assert_eq!(context.current_theme_name(), Some("fallback"));
    }

    #[test]
    fn exiting_the_element_drops_its_theme() {
        let mut context = RenderContext::with_theme("fallback");
        context.enter_element("other.card");
        assert_eq!(context.current_theme_name(), Some("other"));
        assert!(context.exit_element("other.card"));
        assert_eq!(context.current_theme_name(), Some("fallback"));
    }
}
