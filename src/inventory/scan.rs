//! Recursive listing of dataset files

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

/// A regular file under the data root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// File name without directories
    pub name: String,
    /// Path relative to the data root
    pub path: String,
    /// Size in bytes
    pub size: u64,
}

/// Counts of files per extension
#[derive(Debug, Clone, Serialize)]
pub struct DataSummary {
    pub root: String,
    pub total_files: usize,
    /// Lowercased extension including the leading dot, `""` when absent
    pub extensions: BTreeMap<String, usize>,
}

/// Read-only view over the dataset directory
#[derive(Debug, Clone)]
pub struct DataInventory {
    root: PathBuf,
}

impl DataInventory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All regular files under the root, sorted by path.
    ///
    /// A missing root yields an empty list. Symlinks are followed and
    /// reported under the link's own path. Unreadable entries and link
    /// cycles are skipped.
    pub fn list_files(&self) -> Vec<FileEntry> {
        if !self.root.exists() {
            return Vec::new();
        }

        WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|entry| {
                let size = entry.metadata().ok()?.len();
                let relative = entry.path().strip_prefix(&self.root).ok()?;
                Some(FileEntry {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    path: relative.to_string_lossy().into_owned(),
                    size,
                })
            })
            .collect()
    }

    /// Files whose name contains `pattern`, ignoring case
    pub fn find_files(&self, pattern: &str) -> Vec<FileEntry> {
        let needle = pattern.to_lowercase();
        let mut files = self.list_files();
        if !needle.is_empty() {
            files.retain(|f| f.name.to_lowercase().contains(&needle));
        }
        files
    }

    pub fn summary(&self) -> DataSummary {
        let files = self.list_files();

        let mut extensions = BTreeMap::new();
        for file in &files {
            *extensions.entry(extension_key(&file.name)).or_insert(0) += 1;
        }

        DataSummary {
            root: self.root.to_string_lossy().into_owned(),
            total_files: files.len(),
            extensions,
        }
    }
}

fn extension_key(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn populate(root: &Path) {
        fs::create_dir_all(root.join("2023/district-4")).unwrap();
        fs::write(root.join("2023/district-4/Letting_Jan.XLS"), b"abc").unwrap();
        fs::write(root.join("2023/district-4/letting_feb.xlsx"), b"abcdef").unwrap();
        fs::write(root.join("README"), b"readme").unwrap();
        fs::write(root.join("index.csv"), b"a,b").unwrap();
    }

    #[test]
    fn test_missing_root_is_empty() {
        let dir = tempdir().unwrap();
        let inventory = DataInventory::new(dir.path().join("nope"));

        assert!(inventory.list_files().is_empty());
        assert_eq!(inventory.summary().total_files, 0);
    }

    #[test]
    fn test_list_files_recursive() {
        let dir = tempdir().unwrap();
        populate(dir.path());

        let files = DataInventory::new(dir.path()).list_files();
        assert_eq!(files.len(), 4);

        let jan = files.iter().find(|f| f.name == "Letting_Jan.XLS").unwrap();
        assert_eq!(jan.size, 3);
        assert_eq!(
            Path::new(&jan.path),
            Path::new("2023").join("district-4").join("Letting_Jan.XLS")
        );
    }

    #[test]
    fn test_find_files_case_insensitive() {
        let dir = tempdir().unwrap();
        populate(dir.path());

        let inventory = DataInventory::new(dir.path());
        let names: Vec<_> = inventory
            .find_files("LETTING")
            .into_iter()
            .map(|f| f.name)
            .collect();

        assert_eq!(names.len(), 2);
        assert!(names.contains(&"letting_feb.xlsx".to_string()));
        assert_eq!(inventory.find_files("").len(), 4);
    }

    #[test]
    fn test_summary_groups_extensions() {
        let dir = tempdir().unwrap();
        populate(dir.path());

        let summary = DataInventory::new(dir.path()).summary();
        assert_eq!(summary.total_files, 4);
        assert_eq!(summary.extensions[".xls"], 1);
        assert_eq!(summary.extensions[".xlsx"], 1);
        assert_eq!(summary.extensions[".csv"], 1);
        assert_eq!(summary.extensions[""], 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_is_listed() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.xls"), b"abcd").unwrap();
        std::os::unix::fs::symlink(dir.path().join("a.xls"), dir.path().join("link.xls")).unwrap();

        let files = DataInventory::new(dir.path()).list_files();
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.xls", "link.xls"]);

        let link = files.iter().find(|f| f.name == "link.xls").unwrap();
        assert_eq!(link.size, 4);
        assert_eq!(link.path, "link.xls");
    }
}
