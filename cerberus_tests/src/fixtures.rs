use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A throwaway project directory on disk.
pub struct FixtureRepo {
    dir: TempDir,
}

impl FixtureRepo {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(&path, contents).expect("write fixture file");
        path
    }

    /// Empty files standing in for image assets.
    pub fn touch_all(&self, rels: &[&str]) {
        for rel in rels {
            self.write(rel, "");
        }
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path(rel)).expect("read fixture file")
    }
}

impl Default for FixtureRepo {
    fn default() -> Self {
        Self::new()
    }
}
