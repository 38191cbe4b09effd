#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the trojan-guard binary.
#[macro_export]
macro_rules! trojan_guard {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("trojan-guard"))
    };
}

/// Line with a left-to-right embedding (U+202A) at column 44.
pub const BIDI_LINE: &str = "Hello world with a BIDI control character: \u{202A}";

/// Line with a two-byte `á` at byte columns 29 and 30.
pub const UNICODE_LINE: &str = "Hello world with an accent: \u{00E1}";

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content, creating parent directories.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    pub fn create_dir(&self, relative_path: &str) {
        fs::create_dir_all(self.dir.path().join(relative_path))
            .expect("Failed to create directory");
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn create_config(&self, content: &str) {
        self.create_file(".trojan-guard.json", content);
    }

    /// The two-file tree: `bidi.txt` and `unicode.txt`.
    pub fn with_sample_tree(self) -> Self {
        self.create_file("bidi.txt", BIDI_LINE);
        self.create_file("unicode.txt", UNICODE_LINE);
        self
    }

    /// A symlink to an existing directory and a dangling one.
    #[cfg(unix)]
    pub fn with_symlinks(self) -> Self {
        self.create_dir("testdir");
        std::os::unix::fs::symlink(self.path().join("testdir"), self.path().join("testsymlink"))
            .expect("Failed to create symlink");
        std::os::unix::fs::symlink("nonexistent", self.path().join("testdanglingsymlink"))
            .expect("Failed to create dangling symlink");
        self
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
