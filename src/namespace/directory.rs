//! Filesystem namespace
//!
//! Walks a directory tree of manifest files. Sub-directories become index
//! levels and every file with the manifest extension becomes a file entry
//! named by its stem:
//!
//! ```text
//! commands/
//!   math/
//!     _index.cmd      -> spec of `math` itself
//!     add.cmd         -> math add
//!   negate.cmd        -> negate
//! ```

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::command::{CommandSpec, ResolveSpec};
use crate::error::NamespaceError;
use crate::manifest::Manifest;
use crate::namespace::{Namespace, NamespaceEntry};
use crate::tree::CommandPath;

/// Default manifest file extension.
pub const DEFAULT_EXTENSION: &str = "cmd";

/// Default upper bound on a manifest's size in bytes.
pub const DEFAULT_MAX_MANIFEST_SIZE: u64 = 1024 * 1024;

/// Options for [`DirectoryNamespace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryOptions {
    /// Extension (without the dot) identifying manifest files.
    pub extension: String,

    /// Manifests larger than this are skipped.
    pub max_manifest_size: u64,
}

impl Default for DirectoryOptions {
    fn default() -> Self {
        Self {
            extension: env_or("CMDTREE_EXTENSION", DEFAULT_EXTENSION.to_string()),
            max_manifest_size: env_or("CMDTREE_MAX_MANIFEST_SIZE", DEFAULT_MAX_MANIFEST_SIZE),
        }
    }
}

/// Content of one manifest file, resolved lazily into a command spec.
#[derive(Debug, Clone)]
pub struct ManifestFile {
    pub path: PathBuf,
    pub name: String,
    pub contents: String,
}

impl ResolveSpec for ManifestFile {
    fn resolve_spec(&self) -> Option<CommandSpec> {
        let manifest = match Manifest::from_yaml(&self.contents) {
            Ok(Some(manifest)) => manifest,
            Ok(None) => {
                tracing::debug!(file = %self.path.display(), "manifest declares no command");
                return None;
            }
            Err(e) => {
                tracing::warn!(file = %self.path.display(), error = %e, "skipping malformed manifest");
                return None;
            }
        };

        match manifest.into_command(&self.name) {
            Ok(command) => Some(CommandSpec::new(command)),
            Err(e) => {
                tracing::warn!(file = %self.path.display(), error = %e, "skipping invalid manifest");
                None
            }
        }
    }
}

/// A directory of manifest files.
#[derive(Debug, Clone)]
pub struct DirectoryNamespace {
    root: PathBuf,
    options: DirectoryOptions,
}

impl DirectoryNamespace {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_options(root, DirectoryOptions::default())
    }

    #[must_use]
    pub fn with_options(root: impl Into<PathBuf>, options: DirectoryOptions) -> Self {
        Self {
            root: root.into(),
            options,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_manifest(&self, path: &Path) -> bool {
        let wanted = self.options.extension.trim_start_matches('.');
        path.extension().and_then(OsStr::to_str) == Some(wanted)
    }

    fn read_manifest(
        &self,
        entry: &DirEntry,
        path: CommandPath,
    ) -> Result<Option<NamespaceEntry<ManifestFile>>, NamespaceError> {
        let file = entry.path();
        let metadata = entry.metadata().map_err(|source| NamespaceError::Walk {
            path: file.to_path_buf(),
            source,
        })?;
        if metadata.len() > self.options.max_manifest_size {
            tracing::warn!(
                file = %file.display(),
                size = metadata.len(),
                limit = self.options.max_manifest_size,
                "skipping oversized manifest"
            );
            return Ok(None);
        }

        let bytes = std::fs::read(file).map_err(|source| NamespaceError::Read {
            path: file.to_path_buf(),
            source,
        })?;
        let Ok(contents) = String::from_utf8(bytes) else {
            tracing::warn!(file = %file.display(), "skipping manifest that is not valid UTF-8");
            return Ok(None);
        };

        let name = path.name().unwrap_or_default().to_string();
        Ok(Some(NamespaceEntry::file(
            path,
            ManifestFile {
                path: file.to_path_buf(),
                name,
                contents,
            },
        )))
    }
}

impl Namespace for DirectoryNamespace {
    type Payload = ManifestFile;

    fn walk(&self) -> Result<Vec<NamespaceEntry<ManifestFile>>, NamespaceError> {
        if !self.root.is_dir() {
            return Err(NamespaceError::NotADirectory {
                path: self.root.clone(),
            });
        }

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

        let mut entries = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|source| NamespaceError::Walk {
                path: source
                    .path()
                    .map_or_else(|| self.root.clone(), Path::to_path_buf),
                source,
            })?;
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                let path = segments(relative, entry.path())?;
                tracing::trace!(path = %path, "directory entry");
                entries.push(NamespaceEntry::directory(path));
            } else if file_type.is_file() && self.is_manifest(relative) {
                let stem = relative.with_extension("");
                let path = segments(&stem, entry.path())?;
                if let Some(file) = self.read_manifest(&entry, path)? {
                    tracing::trace!(path = %file.path, "manifest entry");
                    entries.push(file);
                }
            }
        }

        tracing::debug!(root = %self.root.display(), entries = entries.len(), "walked namespace");
        Ok(entries)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn segments(relative: &Path, full: &Path) -> Result<CommandPath, NamespaceError> {
    relative
        .components()
        .map(|component| {
            component
                .as_os_str()
                .to_str()
                .map(str::to_string)
                .ok_or_else(|| NamespaceError::InvalidName {
                    path: full.to_path_buf(),
                })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(CommandPath::from_iter)
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
