//! Containers: packages, directories, source files, namespaces.

use std::path::PathBuf;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use smol_str::SmolStr;

use super::imports::Import;
use super::scope::DeclMaps;
use crate::base::{DirId, FileId, NamespaceId, PackageId};
use crate::project::Manifest;
use crate::syntax::SourceUnit;

// ============================================================================
// PACKAGE
// ============================================================================

/// An installed dependency found under the dependency directory.
#[derive(Debug, Clone)]
pub struct Package {
    pub id: PackageId,
    pub name: SmolStr,
    pub version: Option<String>,
    pub location: PathBuf,
    pub manifest: Manifest,
    /// Published under the type-shim scope (`@types/...`).
    pub is_types: bool,
    /// File named by the manifest's `types`/`typings`/`main`, or `index`.
    pub entry: Option<FileId>,
    /// Directory key (relative to `location`) → directory.
    pub directories: IndexMap<String, DirId>,
    /// Extension-less file key (relative to `location`) → file.
    pub files: IndexMap<String, FileId>,
    pub maps: DeclMaps,
    pub dependencies: IndexSet<PackageId>,
    pub dependents: IndexSet<PackageId>,
    /// Dependencies that are type shims.
    pub type_dependencies: IndexSet<PackageId>,
    /// For type shims: other type shims depending on this one.
    pub type_dependents: IndexSet<PackageId>,
}

impl Package {
    pub(crate) fn new(id: PackageId, manifest: Manifest, location: PathBuf, is_types: bool) -> Self {
        Self {
            id,
            name: SmolStr::new(&manifest.name),
            version: manifest.version.clone(),
            location,
            manifest,
            is_types,
            entry: None,
            directories: IndexMap::new(),
            files: IndexMap::new(),
            maps: DeclMaps::default(),
            dependencies: IndexSet::new(),
            dependents: IndexSet::new(),
            type_dependencies: IndexSet::new(),
            type_dependents: IndexSet::new(),
        }
    }
}

// ============================================================================
// DIRECTORY
// ============================================================================

/// Which root a directory or file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectoryOwner {
    Workspace,
    Package(PackageId),
}

#[derive(Debug, Clone)]
pub struct Directory {
    pub id: DirId,
    pub owner: DirectoryOwner,
    /// `/`-separated key relative to the owner root; empty for the root.
    pub path: String,
    pub location: PathBuf,
    /// The `index` (or `index.d`) file, when present.
    pub index: Option<FileId>,
    pub files: Vec<FileId>,
    pub maps: DeclMaps,
}

impl Directory {
    /// A directory with an index file can be the target of an import.
    pub fn can_import(&self) -> bool {
        self.index.is_some()
    }

    /// Prefix used for path-qualified keys (`src/components.Button`).
    pub fn qualify(&self, name: &str) -> SmolStr {
        if self.path.is_empty() {
            SmolStr::new(name)
        } else {
            SmolStr::from(format!("{}.{}", self.path, name))
        }
    }
}

// ============================================================================
// SOURCE FILE
// ============================================================================

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub id: FileId,
    pub directory: DirId,
    /// Extension-less key relative to the owner root (`src/components/Button`).
    pub key: String,
    pub location: PathBuf,
    /// `None` when no tree could be obtained for the file.
    pub syntax: Option<Arc<SourceUnit>>,
    pub maps: DeclMaps,
    /// Local name → resolved import.
    pub imports: IndexMap<SmolStr, Import>,
}

impl SourceFile {
    /// Base name of the file without extension.
    pub fn name(&self) -> &str {
        self.key.rsplit('/').next().unwrap_or(&self.key)
    }
}

// ============================================================================
// NAMESPACE / MODULE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceKind {
    /// `namespace A { ... }`
    Namespace,
    /// `declare module "pkg" { ... }` augmenting an existing package.
    Module,
}

#[derive(Debug, Clone)]
pub struct Namespace {
    pub id: NamespaceId,
    pub name: SmolStr,
    /// Dotted name within the file (`A.B`).
    pub qualified_name: SmolStr,
    pub kind: NamespaceKind,
    pub file: FileId,
    pub parent: Option<NamespaceId>,
    /// The augmented package, for modules.
    pub package: Option<PackageId>,
    pub maps: DeclMaps,
}
