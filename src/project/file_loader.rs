//! Filesystem discovery: dependency packages and source files.
//!
//! Nothing here reads source text. Discovery produces paths and keys; the
//! [`WorkspaceLoader`](super::WorkspaceLoader) asks a syntax provider for the
//! trees.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::config::AnalyzerConfig;
use super::error::{WorkspaceError, WorkspaceResult};
use super::manifest::Manifest;
use crate::base::constants::{MANIFEST_FILE, extension_rank};

/// A package found under the dependency directory.
#[derive(Debug, Clone)]
pub struct DiscoveredPackage {
    pub manifest: Manifest,
    pub location: PathBuf,
}

/// A source file chosen to represent its extension-less key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// `/`-separated, extension-less, relative to the owning root.
    pub key: String,
    pub path: PathBuf,
}

/// Finds every package under `dependency_dir`.
///
/// A folder with a manifest is a package and is not descended into further.
/// A folder without one (an `@scope` folder) is searched recursively.
/// Symlinked folders are followed and link cycles are skipped. A malformed
/// manifest is logged and its folder skipped.
pub fn discover_packages(dependency_dir: &Path) -> WorkspaceResult<Vec<DiscoveredPackage>> {
    std::fs::read_dir(dependency_dir).map_err(|e| WorkspaceError::io(dependency_dir, e))?;

    let mut found = Vec::new();
    let mut walker = WalkDir::new(dependency_dir)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("[LOAD] skipping dependency entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let manifest_path = entry.path().join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            continue;
        }
        walker.skip_current_dir();
        match Manifest::read(&manifest_path) {
            Ok(manifest) => found.push(DiscoveredPackage {
                manifest,
                location: entry.into_path(),
            }),
            Err(e) => tracing::warn!("[LOAD] skipping package: {}", e),
        }
    }
    Ok(found)
}

/// Collects the source files below `start`, keyed relative to `root`.
///
/// Excluded directory names are skipped at any depth below `start`. Files
/// sharing a key are reduced to one, preferring `.ts`, then `.tsx`, `.js`
/// and `.jsx`. The result is sorted by key.
pub fn collect_source_files(root: &Path, start: &Path, config: &AnalyzerConfig) -> Vec<SourceEntry> {
    let mut chosen: BTreeMap<String, (usize, PathBuf)> = BTreeMap::new();

    let walker = WalkDir::new(start)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry, config));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("[LOAD] skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some((key, rank)) = source_key(root, entry.path()) else {
            continue;
        };
        match chosen.get(&key) {
            Some((existing, _)) if *existing <= rank => {
                tracing::trace!("[LOAD] {} shadowed by a preferred extension", entry.path().display());
            }
            _ => {
                chosen.insert(key, (rank, entry.into_path()));
            }
        }
    }

    chosen
        .into_iter()
        .map(|(key, (_, path))| SourceEntry { key, path })
        .collect()
}

fn is_excluded(entry: &DirEntry, config: &AnalyzerConfig) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| config.is_excluded_dir(name))
}

/// The extension-less key of `path` relative to `root`, with its extension rank.
fn source_key(root: &Path, path: &Path) -> Option<(String, usize)> {
    let rank = extension_rank(path.extension()?.to_str()?)?;
    let relative = path.strip_prefix(root).ok()?.with_extension("");
    let segments: Option<Vec<&str>> = relative
        .components()
        .map(|component| component.as_os_str().to_str())
        .collect();
    Some((segments?.join("/"), rank))
}
