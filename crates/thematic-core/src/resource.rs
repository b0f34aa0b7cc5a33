//! Resolved files and directories inside a theme.
//!
//! A resource remembers two themes: the one whose root actually holds it
//! (the owning theme) and the one the lookup started from (the calling
//! theme). Companion files of a directory are resolved from the calling
//! theme, so a child can override a single file of an inherited directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::theme::{ProcessedThemes, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    File,
    Directory,
}

#[derive(Debug, Clone)]
pub enum Resource {
    File(FileResource),
    Directory(DirectoryResource),
}

#[derive(Debug, Clone)]
struct Location {
    absolute: PathBuf,
    relative: PathBuf,
    owner: Arc<Theme>,
    caller: Arc<Theme>,
    /// Whether the lookup that produced this resource walked the ancestry;
    /// companion lookups follow the same rule.
    ancestry: bool,
}

#[derive(Debug, Clone)]
pub struct FileResource {
    location: Location,
}

#[derive(Debug, Clone)]
pub struct DirectoryResource {
    location: Location,
}

impl Resource {
    /// Probe `root/relative` on disk. Anything other than a regular file or
    /// a directory is treated as absent.
    pub(crate) fn at(theme: &Arc<Theme>, root: &Path, relative: &Path, ancestry: bool) -> Option<Self> {
        let absolute = root.join(relative);
        let metadata = std::fs::metadata(&absolute).ok()?;
        let location = Location {
            absolute,
            relative: relative.to_path_buf(),
            owner: Arc::clone(theme),
            caller: Arc::clone(theme),
            ancestry,
        };
        if metadata.is_file() {
            Some(Resource::File(FileResource { location }))
        } else if metadata.is_dir() {
            Some(Resource::Directory(DirectoryResource { location }))
        } else {
            None
        }
    }

    pub(crate) fn called_from(mut self, caller: Arc<Theme>) -> Self {
        self.location_mut().caller = caller;
        self
    }

    fn location(&self) -> &Location {
        match self {
            Resource::File(file) => &file.location,
            Resource::Directory(dir) => &dir.location,
        }
    }

    fn location_mut(&mut self) -> &mut Location {
        match self {
            Resource::File(file) => &mut file.location,
            Resource::Directory(dir) => &mut dir.location,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::File(_) => ResourceKind::File,
            Resource::Directory(_) => ResourceKind::Directory,
        }
    }

    pub fn absolute_path(&self) -> &Path {
        &self.location().absolute
    }

    /// Path relative to the theme root that holds it.
    pub fn relative_path(&self) -> &Path {
        &self.location().relative
    }

    /// Theme whose root holds this resource.
    pub fn owning_theme(&self) -> &Arc<Theme> {
        &self.location().owner
    }

    /// Theme the lookup started from.
    pub fn calling_theme(&self) -> &Arc<Theme> {
        &self.location().caller
    }

    /// True when the resource came from a parent theme.
    pub fn is_inherited(&self) -> bool {
        !Arc::ptr_eq(&self.location().owner, &self.location().caller)
    }

    pub fn as_file(&self) -> Option<&FileResource> {
        match self {
            Resource::File(file) => Some(file),
            Resource::Directory(_) => None,
        }
    }

    pub fn as_directory(&self) -> Option<&DirectoryResource> {
        match self {
            Resource::Directory(dir) => Some(dir),
            Resource::File(_) => None,
        }
    }

    pub fn into_file(self) -> Option<FileResource> {
        match self {
            Resource::File(file) => Some(file),
            Resource::Directory(_) => None,
        }
    }

    pub fn view_file(&self) -> Option<PathBuf> {
        match self {
            Resource::File(file) => file.view_file(),
            Resource::Directory(dir) => dir.view_file(),
        }
    }

    pub fn class_file(&self) -> Option<PathBuf> {
        match self {
            Resource::File(file) => file.class_file(),
            Resource::Directory(dir) => dir.class_file(),
        }
    }

    pub fn style_source_file(&self) -> Option<PathBuf> {
        match self {
            Resource::File(file) => file.style_source_file(),
            Resource::Directory(dir) => dir.style_source_file(),
        }
    }
}

impl FileResource {
    pub fn absolute_path(&self) -> &Path {
        &self.location.absolute
    }

    pub fn relative_path(&self) -> &Path {
        &self.location.relative
    }

    pub fn file_name(&self) -> &str {
        self.location
            .absolute
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }

    /// `<template base>.<template ext>`, the template of a directory resource.
    pub fn is_view_file(&self) -> bool {
        self.location
            .owner
            .conventions()
            .is_view_file_name(self.file_name())
    }

    pub fn is_class_file(&self) -> bool {
        self.location
            .owner
            .conventions()
            .is_class_file_name(self.file_name())
    }

    pub fn is_style_source_file(&self) -> bool {
        self.location
            .owner
            .conventions()
            .is_style_source_name(self.file_name())
    }

    /// Any file carrying a template extension, e.g. `layouts/default.php`.
    pub fn is_template(&self) -> bool {
        self.location
            .owner
            .conventions()
            .has_template_extension(self.file_name())
    }

    /// The file itself when it is a view file or a single-file template.
    pub fn view_file(&self) -> Option<PathBuf> {
        (self.is_view_file() || self.is_template()).then(|| self.location.absolute.clone())
    }

    pub fn class_file(&self) -> Option<PathBuf> {
        self.is_class_file()
            .then(|| self.location.absolute.clone())
    }

    pub fn style_source_file(&self) -> Option<PathBuf> {
        self.is_style_source_file()
            .then(|| self.location.absolute.clone())
    }
}

impl DirectoryResource {
    pub fn absolute_path(&self) -> &Path {
        &self.location.absolute
    }

    pub fn relative_path(&self) -> &Path {
        &self.location.relative
    }

    /// `<relative>/<template base>.<ext>`, extensions in configured order.
    pub fn view_file(&self) -> Option<PathBuf> {
        let conventions = self.location.caller.conventions();
        let companion = self.location.relative.join(&conventions.template_file_name);
        self.companion(&companion, conventions.template_file_extensions.as_slice())
    }

    /// `<relative>/<class file name>`, matched exactly.
    pub fn class_file(&self) -> Option<PathBuf> {
        let conventions = self.location.caller.conventions();
        let companion = self.location.relative.join(&conventions.class_file_name);
        self.companion::<&str>(&companion, &[])
    }

    /// `<relative>/<style base>.<ext>`: the preferred style extensions are
    /// tried across the whole lookup before any other known extension.
    pub fn style_source_file(&self) -> Option<PathBuf> {
        let conventions = self.location.caller.conventions();
        let companion = self.location.relative.join(&conventions.style_file_name);
        [
            conventions.preferred_style_extensions(),
            conventions.remaining_style_extensions(),
        ]
        .into_iter()
        .filter(|pass| !pass.is_empty())
        .find_map(|pass| self.companion(&companion, pass.as_slice()))
    }

    fn companion<S: AsRef<str>>(&self, relative: &Path, extensions: &[S]) -> Option<PathBuf> {
        let resource = self.location.caller.find_relative(
            relative,
            extensions,
            Some(ResourceKind::File),
            self.location.ancestry,
            &mut ProcessedThemes::new(),
        )?;
        resource
            .into_file()
            .map(|file| file.location.absolute)
    }
}
