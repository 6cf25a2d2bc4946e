//! File scanner for discovering files to combine.
//!
//! This module walks a root directory, prunes excluded directories before
//! descending into them, and tags files whose names are excluded. Matching
//! is always by exact name, never by path or pattern.

use crate::error::{CombineError, Result};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Directories never descended into.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] =
    &["node_modules", ".git", ".vscode", ".idea", "dist", "build"];

/// Files never read: package manager lockfiles and environment secrets.
pub const DEFAULT_EXCLUDED_FILES: &[&str] = &["package-lock.json", "yarn.lock", "bun.lockb", ".env"];

/// Directory and file names skipped during traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    dirs: Vec<String>,
    files: Vec<String>,
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::new(
            DEFAULT_EXCLUDED_DIRS.iter().copied(),
            DEFAULT_EXCLUDED_FILES.iter().copied(),
        )
    }
}

impl ExclusionSet {
    /// Build a set from directory and file names. Duplicates are dropped,
    /// first occurrence order is kept for display.
    pub fn new<D, F>(dirs: D, files: F) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            dirs: dedup(dirs.into_iter().map(Into::into)),
            files: dedup(files.into_iter().map(Into::into)),
        }
    }

    /// An exclusion set that excludes nothing.
    pub fn empty() -> Self {
        Self {
            dirs: Vec::new(),
            files: Vec::new(),
        }
    }

    pub fn dirs(&self) -> &[String] {
        &self.dirs
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Check if a directory name is excluded.
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.dirs.iter().any(|d| d == name)
    }

    /// Check if a file name is excluded.
    pub fn is_excluded_file(&self, name: &str) -> bool {
        self.files.iter().any(|f| f == name)
    }
}

fn dedup(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

/// A file found during the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    /// Path on disk (root joined with the relative path).
    pub path: PathBuf,
    /// Path relative to the root, used as the marker label.
    pub relative_path: String,
    /// Whether the file is skipped by name (or is the output file).
    pub excluded: bool,
}

/// File scanner for discovering files under a root.
pub struct FileScanner {
    root: PathBuf,
    exclusions: ExclusionSet,
    skip_file: Option<PathBuf>,
}

impl FileScanner {
    /// Create a new file scanner.
    pub fn new(root: PathBuf, exclusions: ExclusionSet) -> Self {
        Self {
            root,
            exclusions,
            skip_file: None,
        }
    }

    /// Treat one specific file as excluded, whatever its name.
    ///
    /// Used to keep the combined output out of its own input.
    pub fn with_skip_file(mut self, path: PathBuf) -> Self {
        self.skip_file = Some(path);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    /// Walk the tree and return every file encountered, in discovery order.
    ///
    /// Within a directory, files come before subdirectories and both are
    /// ordered by name, so repeated scans of an unchanged tree agree.
    /// Unreadable directories are logged and skipped.
    pub fn scan(&self) -> Result<Vec<ScannedFile>> {
        self.check_root()?;

        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by(files_first_by_name)
            .into_iter()
            .filter_entry(|entry| !self.is_pruned(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("{}", CombineError::from(e));
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            // Symlinks to directories are listed but not followed.
            if entry.path_is_symlink() && entry.path().is_dir() {
                debug!("Not following directory symlink: {}", entry.path().display());
                continue;
            }

            files.push(self.classify(&entry));
        }

        Ok(files)
    }

    /// Whether an entry is a directory whose subtree must not be visited.
    fn is_pruned(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.exclusions.is_excluded_dir(name))
    }

    fn classify(&self, entry: &DirEntry) -> ScannedFile {
        let path = entry.path().to_path_buf();
        let relative_path = path
            .strip_prefix(&self.root)
            .unwrap_or(&path)
            .to_string_lossy()
            .to_string();

        let excluded_by_name = entry
            .file_name()
            .to_str()
            .is_some_and(|name| self.exclusions.is_excluded_file(name));
        let is_skip_file = self.skip_file.as_deref() == Some(path.as_path());

        ScannedFile {
            path,
            relative_path,
            excluded: excluded_by_name || is_skip_file,
        }
    }

    fn check_root(&self) -> Result<()> {
        if !self.root.exists() {
            return Err(CombineError::RootNotFound(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(CombineError::NotADirectory(self.root.clone()));
        }
        Ok(())
    }
}

fn files_first_by_name(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn relative_paths(files: &[ScannedFile]) -> Vec<String> {
        files.iter().map(|f| f.relative_path.clone()).collect()
    }

    #[test]
    fn test_default_exclusions() {
        let set = ExclusionSet::default();
        assert!(set.is_excluded_dir("node_modules"));
        assert!(set.is_excluded_dir(".git"));
        assert!(set.is_excluded_file("package-lock.json"));
        assert!(set.is_excluded_file(".env"));
        assert!(!set.is_excluded_file("package.json"));
    }

    #[test]
    fn test_exact_name_match_only() {
        let set = ExclusionSet::default();
        assert!(!set.is_excluded_dir("node_modules_backup"));
        assert!(!set.is_excluded_dir("Build"));
        assert!(!set.is_excluded_file(".env.local"));
        assert!(!set.is_excluded_file("src/.env"));
    }

    #[test]
    fn test_exclusion_set_dedups() {
        let set = ExclusionSet::new(vec!["a", "b", "a"], vec!["x", "x"]);
        assert_eq!(set.dirs(), ["a", "b"]);
        assert_eq!(set.files(), ["x"]);
    }

    #[test]
    fn test_prunes_excluded_dirs_at_any_depth() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "keep.txt", "k");
        write(temp.path(), "node_modules/pkg/index.js", "x");
        write(temp.path(), "src/deep/node_modules/inner/a.js", "x");
        write(temp.path(), "src/deep/ok.rs", "fn f() {}");
        write(temp.path(), ".git/HEAD", "ref");

        let scanner = FileScanner::new(temp.path().to_path_buf(), ExclusionSet::default());
        let files = scanner.scan().unwrap();
        let paths = relative_paths(&files);

        assert!(paths.iter().all(|p| !p.contains("node_modules")));
        assert!(paths.iter().all(|p| !p.contains(".git")));
        assert!(paths.contains(&"keep.txt".to_string()));
        assert!(paths.contains(&Path::new("src").join("deep").join("ok.rs").to_string_lossy().to_string()));
    }

    #[test]
    fn test_excluded_files_are_tagged() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.txt", "hello");
        write(temp.path(), "package-lock.json", "{}");
        write(temp.path(), "web/yarn.lock", "");

        let scanner = FileScanner::new(temp.path().to_path_buf(), ExclusionSet::default());
        let files = scanner.scan().unwrap();

        let excluded: Vec<_> = files.iter().filter(|f| f.excluded).collect();
        assert_eq!(excluded.len(), 2);
        assert!(files.iter().any(|f| f.relative_path == "a.txt" && !f.excluded));
    }

    #[test]
    fn test_files_before_subdirectories_sorted() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "b.txt", "");
        write(temp.path(), "a/z.txt", "");
        write(temp.path(), "c.txt", "");

        let scanner = FileScanner::new(temp.path().to_path_buf(), ExclusionSet::empty());
        let paths = relative_paths(&scanner.scan().unwrap());

        let nested = Path::new("a").join("z.txt").to_string_lossy().to_string();
        assert_eq!(paths, vec!["b.txt".to_string(), "c.txt".to_string(), nested]);
    }

    #[test]
    fn test_skip_file_is_excluded() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "out.txt", "previous run");
        write(temp.path(), "sub/out.txt", "same name, different file");

        let scanner = FileScanner::new(temp.path().to_path_buf(), ExclusionSet::empty())
            .with_skip_file(temp.path().join("out.txt"));
        let files = scanner.scan().unwrap();

        let top = files.iter().find(|f| f.relative_path == "out.txt").unwrap();
        assert!(top.excluded);
        assert!(files.iter().any(|f| f.relative_path != "out.txt" && !f.excluded));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_skipped_and_walk_continues() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        write(temp.path(), "a_locked/hidden.txt", "unreachable");
        write(temp.path(), "b_open/visible.txt", "ok");
        write(temp.path(), "top.txt", "ok");

        let locked = temp.path().join("a_locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits don't stop a privileged user; nothing to check then.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let scanner = FileScanner::new(temp.path().to_path_buf(), ExclusionSet::empty());
        let result = scanner.scan();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let paths = relative_paths(&result.unwrap());
        let visible = Path::new("b_open").join("visible.txt").to_string_lossy().to_string();
        assert!(paths.contains(&"top.txt".to_string()));
        assert!(paths.contains(&visible));
        assert!(paths.iter().all(|p| !p.contains("hidden.txt")));
    }

    #[test]
    fn test_root_must_exist() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");
        let scanner = FileScanner::new(missing, ExclusionSet::default());
        assert!(matches!(scanner.scan(), Err(CombineError::RootNotFound(_))));
    }

    #[test]
    fn test_root_must_be_directory() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "file.txt", "");
        let scanner = FileScanner::new(temp.path().join("file.txt"), ExclusionSet::default());
        assert!(matches!(scanner.scan(), Err(CombineError::NotADirectory(_))));
    }

    #[test]
    fn test_root_named_like_excluded_dir_is_walked() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "build/main.c", "int main;");
        let scanner = FileScanner::new(temp.path().join("build"), ExclusionSet::default());
        let paths = relative_paths(&scanner.scan().unwrap());
        assert_eq!(paths, vec!["main.c".to_string()]);
    }
}
