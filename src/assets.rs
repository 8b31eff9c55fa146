//! Asset directory tree
//!
//! The asset root is scanned once into a [`Directory`] tree. Lookups walk the
//! tree by name segments and return the path on disk:
//!
//! - intermediate segments name sub-directories
//! - the final segment names a sub-directory or a file (by its stem, so
//!   `"normal"` finds `normal.png`)
//!
//! When no asset root was configured every lookup fails with
//! [`AssetError::DirectoryNotDefined`].
//!
//! # Example
//!
//! ```ignore
//! let assets = Assets::build(Some(Path::new("assets")))?;
//! let path = assets.lookup(&["buttons", "start", "normal"])?;
//! ```

use crate::error::AssetError;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A file found while scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFile {
    pub path: PathBuf,
    pub extension: Option<String>,
}

/// A scanned directory: files keyed by stem, sub-directories keyed by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    path: PathBuf,
    files: BTreeMap<String, AssetFile>,
    directories: BTreeMap<String, Directory>,
}

impl Directory {
    fn empty(path: PathBuf) -> Self {
        Directory {
            path,
            files: BTreeMap::new(),
            directories: BTreeMap::new(),
        }
    }

    /// Scan `root` recursively
    pub fn scan(root: &Path) -> Result<Self, AssetError> {
        let mut tree = Directory::empty(root.to_path_buf());

        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|source| AssetError::Scan {
                path: root.to_path_buf(),
                source,
            })?;
            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            let segments: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            let Some((name, parents)) = segments.split_last() else {
                continue;
            };

            let parent = tree.directory_entry(parents);
            if entry.file_type().is_dir() {
                parent
                    .directories
                    .entry(name.clone())
                    .or_insert_with(|| Directory::empty(entry.path().to_path_buf()));
            } else {
                let path = entry.path();
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| name.clone());
                let extension = path
                    .extension()
                    .map(|e| e.to_string_lossy().into_owned());
                if parent.files.contains_key(&stem) {
                    warn!(target: "assets", file = %path.display(), "duplicate_asset_stem_ignored");
                    continue;
                }
                parent.files.insert(
                    stem,
                    AssetFile {
                        path: path.to_path_buf(),
                        extension,
                    },
                );
            }
        }

        debug!(target: "assets", root = %root.display(), "asset_scan_complete");
        Ok(tree)
    }

    /// Walk or create the sub-directory chain while scanning
    fn directory_entry(&mut self, segments: &[String]) -> &mut Directory {
        let mut current = self;
        for segment in segments {
            let path = current.path.join(segment);
            current = current
                .directories
                .entry(segment.clone())
                .or_insert_with(|| Directory::empty(path));
        }
        current
    }

    /// Resolve `segments` to a path on disk
    pub fn lookup(&self, segments: &[&str]) -> Result<&Path, AssetError> {
        let Some((last, parents)) = segments.split_last() else {
            return Ok(&self.path);
        };
        let parent = self.directory(parents)?;
        if let Some(directory) = parent.directories.get(*last) {
            return Ok(&directory.path);
        }
        match parent.files.get(*last) {
            Some(file) => Ok(&file.path),
            None => Err(AssetError::DoesNotExist(parent.path.join(last))),
        }
    }

    /// Resolve `segments` to a sub-directory
    pub fn directory(&self, segments: &[&str]) -> Result<&Directory, AssetError> {
        let mut current = self;
        for segment in segments {
            current = current
                .directories
                .get(*segment)
                .ok_or_else(|| AssetError::DoesNotExist(current.path.join(segment)))?;
        }
        Ok(current)
    }

    /// Look up a file directly inside this directory
    pub fn file(&self, name: &str) -> Option<&AssetFile> {
        self.files.get(name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Paths of the files in this directory, sorted by name
    pub fn files(&self) -> Vec<&Path> {
        self.files.values().map(|f| f.path.as_path()).collect()
    }

    /// Paths of the sub-directories, sorted by name
    pub fn directories(&self) -> Vec<&Path> {
        self.directories.values().map(|d| d.path.as_path()).collect()
    }

    /// Sub-directories first, then files
    pub fn entries(&self) -> impl Iterator<Item = &Path> + '_ {
        self.directories
            .values()
            .map(|d| d.path.as_path())
            .chain(self.files.values().map(|f| f.path.as_path()))
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());
        writeln!(f, "{:indent$}{}/", "", name, indent = depth * 4)?;
        for file in self.files.values() {
            let file_name = file
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            writeln!(f, "{:indent$}{}", "", file_name, indent = (depth + 1) * 4)?;
        }
        for directory in self.directories.values() {
            directory.write_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

/// Asset root of a game, possibly not configured
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assets {
    NotDefined,
    Defined(Directory),
}

impl Assets {
    /// Scan `root`, or produce [`Assets::NotDefined`] when no root is given
    pub fn build(root: Option<&Path>) -> Result<Self, AssetError> {
        match root {
            None => Ok(Assets::NotDefined),
            Some(root) => Ok(Assets::Defined(Directory::scan(root)?)),
        }
    }

    pub fn root(&self) -> Result<&Directory, AssetError> {
        match self {
            Assets::NotDefined => Err(AssetError::DirectoryNotDefined),
            Assets::Defined(directory) => Ok(directory),
        }
    }

    pub fn lookup(&self, segments: &[&str]) -> Result<&Path, AssetError> {
        self.root()?.lookup(segments)
    }
}
