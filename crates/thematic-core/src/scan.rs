//! Flattened views of a theme tree for bulk operations.
//!
//! Every root of a theme and, with ancestry, of each parent is walked. The
//! first theme and root to provide a relative path wins, so a child file
//! shadows the parent's file of the same name while parent files the child
//! lacks remain visible.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ignore::WalkBuilder;
use tracing::{debug, info};

use crate::error::ScanError;
use crate::resource::{Resource, ResourceKind};
use crate::theme::{Theme, contained_path};

/// Outcome of [`Theme::dump_file_tree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpSummary {
    pub destination: PathBuf,
    pub copied: usize,
    pub skipped: usize,
}

impl Theme {
    /// All resources under `subsets` (e.g. `elements`, `layouts`), or under
    /// the whole theme when `subsets` is empty, sorted by relative path.
    pub fn get_resource_list(
        self: &Arc<Self>,
        subsets: &[&str],
        kind: Option<ResourceKind>,
        ancestry: bool,
    ) -> Result<Vec<Resource>, ScanError> {
        let themes = if ancestry {
            self.ancestry().themes
        } else {
            vec![Arc::clone(self)]
        };

        let mut found: BTreeMap<PathBuf, Resource> = BTreeMap::new();
        for theme in &themes {
            for root in theme.roots() {
                let starts: Vec<PathBuf> = if subsets.is_empty() {
                    vec![root.path.clone()]
                } else {
                    subsets
                        .iter()
                        .filter_map(|subset| contained_path(Path::new(subset)))
                        .map(|subset| root.path.join(subset))
                        .collect()
                };
                for start in starts.iter().filter(|start| start.is_dir()) {
                    walk_root(theme, &root.path, start, ancestry, &mut |relative, resource| {
                        if kind.is_none_or(|kind| resource.kind() == kind) {
                            found
                                .entry(relative)
                                .or_insert_with(|| resource.called_from(Arc::clone(self)));
                        }
                    })?;
                }
            }
        }

        debug!(theme = self.name(), resources = found.len(), "flattened theme tree");
        Ok(found.into_values().collect())
    }

    /// Map of relative path to absolute path for every file of the theme
    /// and its ancestors.
    pub fn flatten(self: &Arc<Self>) -> Result<BTreeMap<PathBuf, PathBuf>, ScanError> {
        Ok(self
            .get_resource_list(&[], Some(ResourceKind::File), true)?
            .into_iter()
            .map(|resource| {
                (
                    resource.relative_path().to_path_buf(),
                    resource.absolute_path().to_path_buf(),
                )
            })
            .collect())
    }

    /// Copy the flattened file tree into `destination`, keeping relative
    /// paths. With `extensions`, only files whose name ends in one of them
    /// (compared without case) are copied.
    pub fn dump_file_tree(
        self: &Arc<Self>,
        destination: &Path,
        ancestry: bool,
        extensions: Option<&[&str]>,
    ) -> Result<DumpSummary, ScanError> {
        if !self.exists() {
            return Err(ScanError::MissingTheme {
                name: self.name().to_string(),
            });
        }

        let files = self.get_resource_list(&[], Some(ResourceKind::File), ancestry)?;
        let mut summary = DumpSummary {
            destination: destination.to_path_buf(),
            copied: 0,
            skipped: 0,
        };

        for file in &files {
            if let Some(extensions) = extensions
                && !has_extension(file.relative_path(), extensions)
            {
                summary.skipped += 1;
                continue;
            }
            let target = destination.join(file.relative_path());
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent).map_err(|e| ScanError::io(parent, e))?;
            }
            std::fs::copy(file.absolute_path(), &target)
                .map_err(|e| ScanError::io(file.absolute_path(), e))?;
            summary.copied += 1;
        }

        info!(
            theme = self.name(),
            destination = %destination.display(),
            copied = summary.copied,
            skipped = summary.skipped,
            "dumped theme tree"
        );
        Ok(summary)
    }
}

fn walk_root(
    theme: &Arc<Theme>,
    root: &Path,
    start: &Path,
    ancestry: bool,
    visit: &mut dyn FnMut(PathBuf, Resource),
) -> Result<(), ScanError> {
    let walker = WalkBuilder::new(start)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    for entry in walker {
        let entry = entry.map_err(|source| ScanError::Walk {
            path: start.to_path_buf(),
            source,
        })?;
        if entry.depth() == 0 {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        if let Some(resource) = Resource::at(theme, root, relative, ancestry) {
            visit(relative.to_path_buf(), resource);
        }
    }
    Ok(())
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    let name = name.to_ascii_lowercase();
    extensions.iter().any(|ext| {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        name.len() > ext.len() + 1 && name.ends_with(&format!(".{ext}"))
    })
}
