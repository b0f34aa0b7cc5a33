//! Shared fixture: an `app` root and a `vendor` root in a temp directory.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use thematic_core::{Settings, ThemeRegistry};

pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::create_dir_all(dir.path().join("app")).expect("create app root");
        fs::create_dir_all(dir.path().join("vendor")).expect("create vendor root");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn app(&self) -> PathBuf {
        self.dir.path().join("app")
    }

    pub fn vendor(&self) -> PathBuf {
        self.dir.path().join("vendor")
    }

    /// Write a file relative to the fixture directory, e.g. `app/child/config.toml`.
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, contents).expect("write fixture file");
        path
    }

    pub fn remove(&self, relative: &str) {
        fs::remove_file(self.dir.path().join(relative)).expect("remove fixture file");
    }

    pub fn settings(&self) -> Settings {
        Settings::empty()
            .with_root("app", self.app())
            .with_root("vendor", self.vendor())
    }

    pub fn registry(&self) -> ThemeRegistry {
        ThemeRegistry::new(self.settings())
    }
}
