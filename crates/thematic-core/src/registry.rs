//! Identity map of themes by name.
//!
//! The registry is the only owner of themes; parents are weak links into it.
//! Construction is lazy and happens under a single write lock in two phases:
//! every missing theme along the `extends` chain is loaded and registered
//! first, then the chain is linked from the farthest ancestor down. Because
//! a theme is registered before its parent is looked up, an inheritance
//! cycle finds the already-registered theme instead of recursing.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use thematic_model::Conventions;
use tracing::{debug, info};

use crate::settings::Settings;
use crate::theme::Theme;

#[derive(Debug)]
pub struct ThemeRegistry {
    settings: Settings,
    conventions: Arc<Conventions>,
    themes: RwLock<HashMap<String, Arc<Theme>>>,
}

impl ThemeRegistry {
    pub fn new(settings: Settings) -> Self {
        let conventions = Arc::new(settings.conventions.clone());
        Self {
            settings,
            conventions,
            themes: RwLock::new(HashMap::new()),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Namespace reserved for fully-qualified identifiers.
    pub fn namespace(&self) -> &str {
        &self.settings.namespace
    }

    pub fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    /// The theme called `name`, loading and linking it on first use.
    ///
    /// Always returns the same instance for a name. The theme may not exist
    /// on disk; see [`Theme::exists`].
    pub fn get(&self, name: &str) -> Arc<Theme> {
        if let Some(theme) = self.read_linked(name) {
            return theme;
        }

        let mut themes = self.themes.write().unwrap_or_else(PoisonError::into_inner);
        let theme = match themes.get(name) {
            Some(theme) => Arc::clone(theme),
            None => {
                let theme = Arc::new(self.load(name));
                themes.insert(name.to_string(), Arc::clone(&theme));
                theme
            }
        };
        self.link_chain(&mut themes, &theme);
        theme
    }

    /// Like [`ThemeRegistry::get`], but only for themes with at least one
    /// root. A name with no root is not registered.
    pub fn get_existing(&self, name: &str) -> Option<Arc<Theme>> {
        if let Some(theme) = self.read_linked(name) {
            return theme.exists().then_some(theme);
        }
        let theme = self.load(name);
        if !theme.exists() {
            debug!(theme = name, "theme has no root, not registering");
            return None;
        }
        Some(self.register(theme))
    }

    /// Register an already built theme. An existing entry for the same name
    /// wins and is returned instead.
    pub fn register(&self, theme: Theme) -> Arc<Theme> {
        let mut themes = self.themes.write().unwrap_or_else(PoisonError::into_inner);
        let registered = Arc::clone(
            themes
                .entry(theme.name().to_string())
                .or_insert_with(|| Arc::new(theme)),
        );
        self.link_chain(&mut themes, &registered);
        registered
    }

    pub fn contains(&self, name: &str) -> bool {
        self.themes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Names of the registered themes, sorted.
    pub fn registered(&self) -> Vec<String> {
        let themes = self.themes.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = themes.keys().cloned().collect();
        names.sort();
        names
    }

    /// Theme directory names present under any root base, sorted and
    /// deduplicated. Nothing is loaded.
    pub fn available(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .settings
            .root_paths()
            .filter_map(|base| std::fs::read_dir(base).ok())
            .flatten()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_dir()))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| !name.starts_with('.'))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// The theme whose directory contains `path`, judged from the root
    /// bases alone. The path must point inside the theme directory, not at
    /// the directory itself.
    pub fn theme_for_path(&self, path: &Path) -> Option<Arc<Theme>> {
        for base in self.settings.root_paths() {
            let Ok(relative) = path.strip_prefix(base) else {
                continue;
            };
            let mut components = relative.components();
            let Some(first) = components.next() else {
                continue;
            };
            if components.next().is_none() {
                continue;
            }
            let Some(name) = first.as_os_str().to_str() else {
                continue;
            };
            if let Some(theme) = self.get_existing(name) {
                return Some(theme);
            }
        }
        None
    }

    fn read_linked(&self, name: &str) -> Option<Arc<Theme>> {
        let themes = self.themes.read().unwrap_or_else(PoisonError::into_inner);
        themes
            .get(name)
            .filter(|theme| theme.is_linked())
            .cloned()
    }

    fn load(&self, name: &str) -> Theme {
        Theme::load_with(name, &self.settings, Arc::clone(&self.conventions))
    }

    /// Register every unlinked theme on the chain starting at `start`, then
    /// link them farthest ancestor first so that each one merges a parent
    /// configuration that is already complete.
    fn link_chain(&self, themes: &mut HashMap<String, Arc<Theme>>, start: &Arc<Theme>) {
        let mut pending: Vec<Arc<Theme>> = Vec::new();
        let mut current = Some(Arc::clone(start));
        while let Some(theme) = current.take() {
            if theme.is_linked() || pending.iter().any(|seen| Arc::ptr_eq(seen, &theme)) {
                break;
            }
            if let Some(parent_name) = theme.parent_name() {
                let parent = match themes.get(parent_name) {
                    Some(parent) => Arc::clone(parent),
                    None => {
                        debug!(theme = theme.name(), parent = parent_name, "loading parent theme");
                        let parent = Arc::new(self.load(parent_name));
                        themes.insert(parent_name.to_string(), Arc::clone(&parent));
                        parent
                    }
                };
                current = Some(parent);
            }
            pending.push(theme);
        }

        for theme in pending.iter().rev() {
            let parent = theme
                .parent_name()
                .and_then(|parent_name| themes.get(parent_name));
            theme.link(parent);
            info!(
                theme = theme.name(),
                exists = theme.exists(),
                parent = theme.parent_name().unwrap_or("-"),
                "theme registered"
            );
        }
    }
}
