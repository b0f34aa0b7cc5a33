//! Themes and their lookup rules.
//!
//! A theme is a name plus every root directory that holds a folder of that
//! name. Lookups walk the roots in precedence order and then, when allowed,
//! the parent chain named by the `extends` configuration key.

use std::collections::HashSet;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, OnceLock, Weak};

use thematic_model::Conventions;
use toml::{Table, Value};
use tracing::{debug, trace, warn};

use crate::config::{self, EXTENDS_KEY, HANDLERS_KEY};
use crate::error::ThemeConfigError;
use crate::resource::{Resource, ResourceKind};
use crate::settings::Settings;

/// A directory holding part of a theme, tagged with its root kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeRoot {
    pub kind: String,
    pub path: PathBuf,
}

/// Names of the themes already searched by one lookup.
///
/// Always local to a single call chain; it bounds the walk when the
/// `extends` chain loops back on itself.
#[derive(Debug, Clone, Default)]
pub struct ProcessedThemes {
    names: HashSet<String>,
}

impl ProcessedThemes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, theme: &str) -> bool {
        self.names.contains(theme)
    }

    /// Returns false when the theme was already recorded.
    pub fn insert(&mut self, theme: &str) -> bool {
        self.names.insert(theme.to_string())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A theme and its parents, child first.
#[derive(Debug, Clone)]
pub struct Ancestry {
    pub themes: Vec<Arc<Theme>>,
    /// Name of the theme that would have been visited twice, when the
    /// `extends` chain loops.
    pub cycle: Option<String>,
}

impl Ancestry {
    pub fn names(&self) -> Vec<&str> {
        self.themes.iter().map(|theme| theme.name()).collect()
    }
}

pub struct Theme {
    name: String,
    roots: Vec<ThemeRoot>,
    own_config: Table,
    config: OnceLock<Table>,
    parent_name: Option<String>,
    parent: OnceLock<Option<Weak<Theme>>>,
    conventions: Arc<Conventions>,
    config_errors: Vec<ThemeConfigError>,
}

impl fmt::Debug for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Theme")
            .field("name", &self.name)
            .field("roots", &self.roots)
            .field("parent", &self.parent_name)
            .finish_non_exhaustive()
    }
}

impl Theme {
    /// Discover the roots and configuration of `name` under the settings'
    /// root bases. The theme starts unlinked; a [`crate::ThemeRegistry`]
    /// links it to its parent.
    pub fn load(name: &str, settings: &Settings) -> Self {
        Self::load_with(name, settings, Arc::new(settings.conventions.clone()))
    }

    pub(crate) fn load_with(name: &str, settings: &Settings, conventions: Arc<Conventions>) -> Self {
        let roots: Vec<ThemeRoot> = if is_theme_name(name) {
            settings
                .roots
                .iter()
                .filter_map(|root| {
                    let path = root.path.join(name);
                    path.is_dir().then(|| ThemeRoot {
                        kind: root.kind.clone(),
                        path,
                    })
                })
                .collect()
        } else {
            Vec::new()
        };

        // Lowest precedence first so that earlier roots overwrite later ones.
        let mut own_config = Table::new();
        let mut config_errors = Vec::new();
        for root in roots.iter().rev() {
            match config::load_table(&root.path.join(&settings.config_file_name)) {
                Ok(Some(table)) => config::deep_merge(&mut own_config, table),
                Ok(None) => {}
                Err(error) => {
                    warn!(theme = name, %error, "ignoring unreadable theme config");
                    config_errors.push(error);
                }
            }
        }

        let parent_name = own_config
            .get(EXTENDS_KEY)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|parent| !parent.is_empty())
            .map(str::to_string);

        debug!(
            theme = name,
            roots = roots.len(),
            parent = parent_name.as_deref().unwrap_or("-"),
            "loaded theme"
        );

        Self {
            name: name.to_string(),
            roots,
            own_config,
            config: OnceLock::new(),
            parent_name,
            parent: OnceLock::new(),
            conventions,
            config_errors,
        }
    }

    /// Attach the parent and compute the inherited configuration. Only the
    /// first call has any effect.
    pub(crate) fn link(&self, parent: Option<&Arc<Theme>>) {
        let mut merged = self.own_config.clone();
        if let Some(parent) = parent {
            config::fill_missing(&mut merged, parent.config());
        }
        let _ = self.config.set(merged);
        let _ = self.parent.set(parent.map(Arc::downgrade));
    }

    pub(crate) fn is_linked(&self) -> bool {
        self.parent.get().is_some()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Existing theme directories, highest precedence first.
    pub fn roots(&self) -> &[ThemeRoot] {
        &self.roots
    }

    pub fn root(&self, kind: &str) -> Option<&Path> {
        self.roots
            .iter()
            .find(|root| root.kind == kind)
            .map(|root| root.path.as_path())
    }

    /// True when at least one root holds this theme.
    pub fn exists(&self) -> bool {
        !self.roots.is_empty()
    }

    pub fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    /// Configuration read from this theme's own roots.
    pub fn own_config(&self) -> &Table {
        &self.own_config
    }

    /// Configuration with missing top-level keys filled from the parent.
    ///
    /// Before linking (or while a cycle is being linked) this is the
    /// theme's own configuration.
    pub fn config(&self) -> &Table {
        self.config.get().unwrap_or(&self.own_config)
    }

    /// Dotted lookup into [`Theme::config`], e.g. `assets.css`.
    pub fn config_value(&self, key: &str) -> Option<&Value> {
        config::lookup(self.config(), key)
    }

    pub fn config_errors(&self) -> &[ThemeConfigError] {
        &self.config_errors
    }

    pub fn parent_name(&self) -> Option<&str> {
        self.parent_name.as_deref()
    }

    /// The linked parent theme. `None` for root themes, unlinked themes and
    /// once the owning registry has been dropped.
    pub fn parent(&self) -> Option<Arc<Theme>> {
        self.parent.get()?.as_ref()?.upgrade()
    }

    /// Walk the parent chain, stopping before any theme seen twice.
    pub fn ancestry(self: &Arc<Self>) -> Ancestry {
        let mut seen = HashSet::new();
        let mut themes = Vec::new();
        let mut current = Some(Arc::clone(self));
        while let Some(theme) = current {
            if !seen.insert(theme.name.clone()) {
                return Ancestry {
                    themes,
                    cycle: Some(theme.name.clone()),
                };
            }
            current = theme.parent();
            themes.push(theme);
        }
        Ancestry {
            themes,
            cycle: None,
        }
    }

    /// Handler id configured for a resource type or identifier.
    ///
    /// Looks under the `[handlers]` table for the full key first, then for
    /// each shorter dotted prefix: `elements.card.title`, `elements.card`,
    /// `elements`.
    pub fn custom_handler_for(&self, resource: &str) -> Option<&str> {
        let handlers = self.config().get(HANDLERS_KEY)?.as_table()?;
        let mut key = resource;
        loop {
            if let Some(id) = handlers.get(key).and_then(Value::as_str) {
                return Some(id);
            }
            key = key.rsplit_once('.')?.0;
        }
    }

    /// Template file name with its template extension removed.
    pub fn template_base_name<'a>(&self, file_name: &'a str) -> &'a str {
        self.conventions.template_base_name(file_name)
    }

    // =========================================================================
    // LOOKUP
    // =========================================================================

    /// Find a file or directory by name.
    ///
    /// Each root, in precedence order, is probed for the literal name, then
    /// the name with dots turned into path separators, then both forms with
    /// each extension appended in order. On a miss the parent is asked when
    /// `ancestry` is set, and a hit there is re-tagged as called from this
    /// theme.
    pub fn resolve<S: AsRef<str>>(
        self: &Arc<Self>,
        name: &str,
        extensions: &[S],
        ancestry: bool,
        processed: &mut ProcessedThemes,
    ) -> Option<Resource> {
        let candidates = name_candidates(name, extensions);
        if candidates.is_empty() {
            debug!(theme = %self.name, name, "rejected resource name");
            return None;
        }
        self.lookup(&candidates, None, ancestry, processed)
    }

    /// Find `relative` (taken as a path, dots kept) with each extension
    /// appended, or exactly as given when `extensions` is empty.
    pub fn resolve_relative<S: AsRef<str>>(
        self: &Arc<Self>,
        relative: &Path,
        extensions: &[S],
        ancestry: bool,
        processed: &mut ProcessedThemes,
    ) -> Option<Resource> {
        self.find_relative(relative, extensions, None, ancestry, processed)
    }

    /// [`Theme::resolve_relative`] restricted to one kind. Entries of the
    /// other kind are passed over as if absent.
    pub(crate) fn find_relative<S: AsRef<str>>(
        self: &Arc<Self>,
        relative: &Path,
        extensions: &[S],
        kind: Option<ResourceKind>,
        ancestry: bool,
        processed: &mut ProcessedThemes,
    ) -> Option<Resource> {
        let candidates: Vec<PathBuf> = if extensions.is_empty() {
            contained_path(relative).into_iter().collect()
        } else {
            extensions
                .iter()
                .filter_map(|ext| contained_path(&with_extension(relative, ext.as_ref())))
                .collect()
        };
        if candidates.is_empty() {
            return None;
        }
        self.lookup(&candidates, kind, ancestry, processed)
    }

    /// Resolve with ancestry, no extensions and a fresh processed set.
    pub fn get_resource(self: &Arc<Self>, name: &str) -> Option<Resource> {
        self.resolve::<&str>(name, &[], true, &mut ProcessedThemes::new())
    }

    /// Resolve `name` with the template extensions and return its view file.
    ///
    /// For a directory the conventional template file inside it is looked
    /// up starting from the calling theme, so a child can override just the
    /// template of a directory it inherits.
    pub fn get_view_file(
        self: &Arc<Self>,
        name: &str,
        ancestry: bool,
        processed: &mut ProcessedThemes,
    ) -> Option<PathBuf> {
        let extensions = self.conventions.template_file_extensions.clone();
        self.resolve(name, extensions.as_slice(), ancestry, processed)?
            .view_file()
    }

    fn lookup(
        self: &Arc<Self>,
        candidates: &[PathBuf],
        kind: Option<ResourceKind>,
        ancestry: bool,
        processed: &mut ProcessedThemes,
    ) -> Option<Resource> {
        if processed.contains(&self.name) {
            warn!(theme = %self.name, "theme inheritance cycle, lookup stops here");
            return None;
        }

        for root in &self.roots {
            for relative in candidates {
                if let Some(resource) = Resource::at(self, &root.path, relative, ancestry)
                    && kind.is_none_or(|kind| resource.kind() == kind)
                {
                    trace!(theme = %self.name, root = %root.kind, path = %relative.display(), "resource found");
                    return Some(resource);
                }
            }
        }

        if !ancestry {
            return None;
        }
        processed.insert(&self.name);
        let parent = self.parent()?;
        let resource = parent.lookup(candidates, kind, ancestry, processed)?;
        Some(resource.called_from(Arc::clone(self)))
    }
}

/// Theme names are single directory names.
fn is_theme_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Relative candidates for a resource name in probe order, duplicates removed.
fn name_candidates<S: AsRef<str>>(name: &str, extensions: &[S]) -> Vec<PathBuf> {
    let literal = name.trim().replace('\\', "/");
    if literal.split('/').any(|part| part == "..") {
        return Vec::new();
    }
    let slashed = literal.replace('.', "/");

    let mut forms = vec![literal.clone(), slashed.clone()];
    for ext in extensions {
        let ext = ext.as_ref().trim_start_matches('.');
        forms.push(format!("{literal}.{ext}"));
        forms.push(format!("{slashed}.{ext}"));
    }

    let mut candidates: Vec<PathBuf> = Vec::new();
    for form in forms {
        if let Some(path) = contained_path(Path::new(&form))
            && !candidates.contains(&path)
        {
            candidates.push(path);
        }
    }
    candidates
}

/// Normalize a path that must stay inside a root: root and `.` components
/// are dropped, `..` rejects the path.
pub(crate) fn contained_path(path: &Path) -> Option<PathBuf> {
    let mut contained = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => contained.push(part),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            Component::ParentDir => return None,
        }
    }
    (!contained.as_os_str().is_empty()).then_some(contained)
}

fn with_extension(path: &Path, ext: &str) -> PathBuf {
    let mut file = path.as_os_str().to_owned();
    file.push(".");
    file.push(ext.trim_start_matches('.'));
    PathBuf::from(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_try_literal_then_slashed_then_extensions() {
        let candidates = name_candidates("elements.card", &["php", "blade.php"]);
        assert_eq!(
            candidates,
            [
                PathBuf::from("elements.card"),
                PathBuf::from("elements/card"),
                PathBuf::from("elements.card.php"),
                PathBuf::from("elements/card.php"),
                PathBuf::from("elements.card.blade.php"),
                PathBuf::from("elements/card.blade.php"),
            ]
        );
    }

    #[test]
    fn candidates_never_leave_the_root() {
        assert!(name_candidates::<&str>("../secret", &[]).is_empty());
        assert!(name_candidates::<&str>("", &[]).is_empty());
        assert_eq!(
            name_candidates::<&str>("/etc/passwd", &[]),
            [PathBuf::from("etc/passwd")]
        );
    }

    #[test]
    fn theme_names_are_single_components() {
        assert!(is_theme_name("base"));
        assert!(!is_theme_name(".."));
        assert!(!is_theme_name("a/b"));
        assert!(!is_theme_name(""));
    }
}
