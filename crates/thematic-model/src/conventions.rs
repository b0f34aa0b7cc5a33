//! File naming conventions shared by every theme.
//!
//! A directory resource is backed by companion files whose names are fixed
//! by these conventions: a template file `<template_file_name>.<ext>`, a class
//! file named exactly `class_file_name`, and a style source
//! `<style_file_name>.<ext>`.

use serde::{Deserialize, Serialize};

/// Every style source extension the engine knows about, in fallback order.
pub const KNOWN_STYLE_EXTENSIONS: &[&str] = &["scss", "sass", "less", "styl", "css"];

/// Whether base names are compared without regard to ASCII case.
pub const CASE_INSENSITIVE_FS: bool = cfg!(any(windows, target_os = "macos"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conventions {
    pub template_file_name: String,
    pub template_file_extensions: Vec<String>,
    pub class_file_name: String,
    pub style_file_name: String,
    /// User preference order for style sources. Entries outside
    /// [`KNOWN_STYLE_EXTENSIONS`] are ignored.
    pub style_extensions: Vec<String>,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            template_file_name: "view".to_string(),
            template_file_extensions: vec![
                "php".to_string(),
                "blade.php".to_string(),
                "phtml".to_string(),
            ],
            class_file_name: "class.php".to_string(),
            style_file_name: "style".to_string(),
            style_extensions: vec!["scss".to_string(), "less".to_string(), "css".to_string()],
        }
    }
}

impl Conventions {
    /// Configured style extensions that the engine knows, deduplicated, in
    /// the configured order.
    pub fn preferred_style_extensions(&self) -> Vec<&str> {
        let mut preferred: Vec<&str> = Vec::new();
        for ext in &self.style_extensions {
            let ext = ext.trim().trim_start_matches('.');
            let Some(known) = KNOWN_STYLE_EXTENSIONS
                .iter()
                .find(|known| known.eq_ignore_ascii_case(ext))
            else {
                continue;
            };
            if !preferred.contains(known) {
                preferred.push(*known);
            }
        }
        preferred
    }

    /// Known style extensions the user did not list, in fallback order.
    pub fn remaining_style_extensions(&self) -> Vec<&str> {
        let preferred = self.preferred_style_extensions();
        KNOWN_STYLE_EXTENSIONS
            .iter()
            .copied()
            .filter(|ext| !preferred.contains(ext))
            .collect()
    }

    /// True when `file_name` is `<template_file_name>.<ext>` for a configured
    /// template extension.
    pub fn is_view_file_name(&self, file_name: &str) -> bool {
        self.template_file_extensions.iter().any(|ext| {
            let candidate = format!("{}.{}", self.template_file_name, ext);
            file_names_match(file_name, &candidate)
        })
    }

    pub fn is_class_file_name(&self, file_name: &str) -> bool {
        file_names_match(file_name, &self.class_file_name)
    }

    /// True when the extension of `file_name` is a known style extension.
    pub fn is_style_source_name(&self, file_name: &str) -> bool {
        let Some((_, ext)) = file_name.rsplit_once('.') else {
            return false;
        };
        KNOWN_STYLE_EXTENSIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext))
    }

    pub fn has_template_extension(&self, file_name: &str) -> bool {
        self.strip_template_extension(file_name).is_some()
    }

    /// Base name of a template file with its template extension removed.
    ///
    /// Extensions may contain each other (`blade.php` and `php`), so the
    /// longest one is tried first. Names without a template extension are
    /// returned unchanged.
    pub fn template_base_name<'a>(&self, file_name: &'a str) -> &'a str {
        self.strip_template_extension(file_name)
            .unwrap_or(file_name)
    }

    fn strip_template_extension<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        let mut extensions: Vec<&str> = self
            .template_file_extensions
            .iter()
            .map(String::as_str)
            .collect();
        extensions.sort_by_key(|ext| std::cmp::Reverse(ext.len()));

        let lowered = file_name.to_ascii_lowercase();
        extensions.into_iter().find_map(|ext| {
            let suffix = format!(".{}", ext.to_ascii_lowercase());
            if lowered.len() > suffix.len() && lowered.ends_with(&suffix) {
                Some(&file_name[..file_name.len() - suffix.len()])
            } else {
                None
            }
        })
    }
}

/// Compare two file names the way the host filesystem would.
pub fn file_names_match(left: &str, right: &str) -> bool {
    if CASE_INSENSITIVE_FS {
        left.eq_ignore_ascii_case(right)
    } else {
        left == right
    }
}
