//! Syntax tree acquisition.
//!
//! The analyzer does not parse TypeScript itself. A [`SyntaxProvider`] maps a
//! source path to its tree; a path the provider cannot serve is reported and
//! the file is kept without declarations.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use super::tree::SourceUnit;
use crate::base::constants::TREE_SIDECAR_SUFFIX;

/// Supplies syntax trees for source files.
pub trait SyntaxProvider: Send + Sync {
    /// Returns the tree for `path`, or `None` when it cannot be produced.
    fn provide(&self, path: &Path) -> Option<SourceUnit>;
}

impl<F> SyntaxProvider for F
where
    F: Fn(&Path) -> Option<SourceUnit> + Send + Sync,
{
    fn provide(&self, path: &Path) -> Option<SourceUnit> {
        self(path)
    }
}

// ============================================================================
// MemoryProvider
// ============================================================================

/// Trees registered up front, keyed by absolute path.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    units: FxHashMap<PathBuf, SourceUnit>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, unit: SourceUnit) -> Option<SourceUnit> {
        self.units.insert(path.into(), unit)
    }

    pub fn with(mut self, path: impl Into<PathBuf>, unit: SourceUnit) -> Self {
        self.insert(path, unit);
        self
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl SyntaxProvider for MemoryProvider {
    fn provide(&self, path: &Path) -> Option<SourceUnit> {
        self.units.get(path).cloned()
    }
}

// ============================================================================
// JsonTreeProvider
// ============================================================================

/// Reads serialized trees stored next to each source file.
///
/// For `src/App.tsx` the tree is read from `src/App.tsx.ast.json` (suffix
/// configurable). Missing sidecars are silent; malformed ones are logged.
#[derive(Debug, Clone)]
pub struct JsonTreeProvider {
    suffix: String,
}

impl Default for JsonTreeProvider {
    fn default() -> Self {
        Self {
            suffix: TREE_SIDECAR_SUFFIX.to_string(),
        }
    }
}

impl JsonTreeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_suffix(suffix: impl Into<String>) -> Self {
        Self { suffix: suffix.into() }
    }

    /// Location of the sidecar for a source path.
    pub fn sidecar_path(&self, path: &Path) -> PathBuf {
        let mut sidecar = path.as_os_str().to_os_string();
        sidecar.push(&self.suffix);
        PathBuf::from(sidecar)
    }
}

impl SyntaxProvider for JsonTreeProvider {
    fn provide(&self, path: &Path) -> Option<SourceUnit> {
        let sidecar = self.sidecar_path(path);
        let text = match std::fs::read_to_string(&sidecar) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("[SYNTAX] failed to read {}: {}", sidecar.display(), e);
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(unit) => Some(unit),
            Err(e) => {
                tracing::warn!("[SYNTAX] malformed tree {}: {}", sidecar.display(), e);
                None
            }
        }
    }
}
