//! The analyzed repository and its read-only queries.
//!
//! A [`Repository`] is produced once by the
//! [`RepositoryBuilder`](super::RepositoryBuilder) and never mutated
//! afterwards. All cross references are arena ids; accessors turn them back
//! into borrowed entities.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::decl::{DeclKind, Declaration};
use super::imports::ImportTarget;
use super::model::{Directory, Namespace, Package, SourceFile};
use super::packages::topological_order;
use super::scope::{DeclMaps, ScopeRef};
use crate::base::{DeclId, DirId, FileId, NamespaceId, PackageId};
use crate::project::AnalyzerConfig;
use crate::view::{ViewTree, ViewTreeBuilder};

/// Every package, directory, file and declaration of one repository.
#[derive(Debug, Clone)]
pub struct Repository {
    pub(crate) location: PathBuf,
    pub(crate) config: AnalyzerConfig,
    pub(crate) packages: Vec<Package>,
    pub(crate) package_index: IndexMap<SmolStr, PackageId>,
    pub(crate) directories: Vec<Directory>,
    pub(crate) files: Vec<SourceFile>,
    pub(crate) namespaces: Vec<Namespace>,
    pub(crate) decls: Vec<Declaration>,
    /// Workspace directory key → directory.
    pub(crate) workspace_dirs: IndexMap<String, DirId>,
    /// Workspace extension-less file key → file.
    pub(crate) workspace_files: IndexMap<String, FileId>,
    /// Path-qualified keys of workspace declarations.
    pub(crate) maps: DeclMaps,
}

/// Counts reported after a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepositoryStats {
    pub packages: usize,
    pub directories: usize,
    pub files: usize,
    pub declarations: usize,
    pub pruned: usize,
    pub imports: usize,
}

impl Repository {
    pub(crate) fn empty(location: PathBuf, config: AnalyzerConfig) -> Self {
        Self {
            location,
            config,
            packages: Vec::new(),
            package_index: IndexMap::new(),
            directories: Vec::new(),
            files: Vec::new(),
            namespaces: Vec::new(),
            decls: Vec::new(),
            workspace_dirs: IndexMap::new(),
            workspace_files: IndexMap::new(),
            maps: DeclMaps::default(),
        }
    }

    // ------------------------------------------------------------------------
    // Entities
    // ------------------------------------------------------------------------

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Repository-level maps keyed by path-qualified names (`src/pages.Home`).
    pub fn maps(&self) -> &DeclMaps {
        &self.maps
    }

    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.iter()
    }

    pub fn package(&self, id: PackageId) -> &Package {
        &self.packages[id.slot()]
    }

    pub fn find_package(&self, name: &str) -> Option<&Package> {
        self.package_index.get(name).map(|id| self.package(*id))
    }

    pub fn directories(&self) -> impl Iterator<Item = &Directory> {
        self.directories.iter()
    }

    pub fn directory(&self, id: DirId) -> &Directory {
        &self.directories[id.slot()]
    }

    /// Workspace directory by key (`src/components`).
    pub fn find_directory(&self, path: &str) -> Option<&Directory> {
        self.workspace_dirs.get(path).map(|id| self.directory(*id))
    }

    pub fn files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter()
    }

    pub fn file(&self, id: FileId) -> &SourceFile {
        &self.files[id.slot()]
    }

    /// Workspace file by extension-less key (`src/components/Button`).
    pub fn find_file(&self, key: &str) -> Option<&SourceFile> {
        self.workspace_files.get(key).map(|id| self.file(*id))
    }

    pub fn namespace(&self, id: NamespaceId) -> &Namespace {
        &self.namespaces[id.slot()]
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.namespaces.iter()
    }

    pub fn declaration(&self, id: DeclId) -> &Declaration {
        &self.decls[id.slot()]
    }

    /// Valid declarations.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.decls.iter().filter(|d| d.valid)
    }

    /// Every declaration ever collected, pruned ones included.
    pub fn all_declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.decls.iter()
    }

    /// Looks up a path-qualified workspace name (`src/components.Button`).
    pub fn lookup(&self, qualified: &str) -> Option<&Declaration> {
        self.maps
            .find(qualified, &DeclKind::ALL)
            .map(|id| self.declaration(id))
    }

    pub fn dependencies_of(&self, id: DeclId) -> impl Iterator<Item = &Declaration> {
        self.declaration(id)
            .dependencies
            .iter()
            .map(|dep| self.declaration(*dep))
    }

    pub fn dependents_of(&self, id: DeclId) -> impl Iterator<Item = &Declaration> {
        self.declaration(id)
            .dependents
            .iter()
            .map(|dep| self.declaration(*dep))
    }

    /// Valid declarations carrying `tag`.
    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Declaration> + 'a {
        self.declarations().filter(move |d| d.has_tag(tag))
    }

    /// Packages in dependency-first order; empty when the graph has a cycle.
    pub fn sorted_packages(&self) -> Vec<&Package> {
        let all: Vec<&Package> = self.packages.iter().collect();
        topological_order(&all, |p| &p.dependencies)
            .into_iter()
            .map(|id| self.package(id))
            .collect()
    }

    /// Type-shim packages in dependency-first order over their type edges.
    pub fn sorted_type_packages(&self) -> Vec<&Package> {
        let shims: Vec<&Package> = self.packages.iter().filter(|p| p.is_types).collect();
        topological_order(&shims, |p| &p.type_dependencies)
            .into_iter()
            .map(|id| self.package(id))
            .collect()
    }

    /// Static view tree of a component declaration.
    pub fn build_view_tree(&self, component: DeclId) -> ViewTree {
        ViewTreeBuilder::new(self).build(component)
    }

    pub fn stats(&self) -> RepositoryStats {
        RepositoryStats {
            packages: self.packages.len(),
            directories: self.directories.len(),
            files: self.files.len(),
            declarations: self.decls.iter().filter(|d| d.valid).count(),
            pruned: self.decls.iter().filter(|d| !d.valid).count(),
            imports: self.files.iter().map(|f| f.imports.len()).sum(),
        }
    }

    // ------------------------------------------------------------------------
    // Scopes
    // ------------------------------------------------------------------------

    pub fn scope_maps(&self, scope: ScopeRef) -> &DeclMaps {
        match scope {
            ScopeRef::Repository => &self.maps,
            ScopeRef::Package(id) => &self.package(id).maps,
            ScopeRef::Directory(id) => &self.directory(id).maps,
            ScopeRef::File(id) => &self.file(id).maps,
            ScopeRef::Namespace(id) => &self.namespace(id).maps,
        }
    }

    pub(crate) fn scope_maps_mut(&mut self, scope: ScopeRef) -> &mut DeclMaps {
        match scope {
            ScopeRef::Repository => &mut self.maps,
            ScopeRef::Package(id) => &mut self.packages[id.slot()].maps,
            ScopeRef::Directory(id) => &mut self.directories[id.slot()].maps,
            ScopeRef::File(id) => &mut self.files[id.slot()].maps,
            ScopeRef::Namespace(id) => &mut self.namespaces[id.slot()].maps,
        }
    }

    /// Maps searched, in order, when a name is looked up in `scope`.
    ///
    /// A package answers from its entry file first and a directory from its
    /// index file first, then each from its own maps.
    fn lookup_chain(&self, scope: ScopeRef) -> impl Iterator<Item = &DeclMaps> {
        let entry = match scope {
            ScopeRef::Package(id) => self.package(id).entry,
            ScopeRef::Directory(id) => self.directory(id).index,
            _ => None,
        };
        let entry = entry.map(|file| &self.file(file).maps);
        entry.into_iter().chain(std::iter::once(self.scope_maps(scope)))
    }

    /// Finds a declaration named `name` of one of `kinds` visible in `scope`.
    pub fn lookup_in_scope(&self, scope: ScopeRef, name: &str, kinds: &[DeclKind]) -> Option<DeclId> {
        self.lookup_chain(scope).find_map(|maps| maps.find(name, kinds))
    }

    /// Finds what `name` denotes in `scope`: a declaration, else a namespace.
    pub(crate) fn lookup_export(&self, scope: ScopeRef, name: &str) -> Option<ImportTarget> {
        self.lookup_chain(scope).find_map(|maps| {
            maps.find(name, &DeclKind::ALL)
                .map(ImportTarget::Decl)
                .or_else(|| maps.namespaces.get(name).copied().map(ImportTarget::Namespace))
        })
    }

    // ------------------------------------------------------------------------
    // Name resolution
    // ------------------------------------------------------------------------

    /// Resolves a name as written in `file` to a declaration of one of `kinds`.
    ///
    /// The file's own maps (which include namespace-qualified keys) are tried
    /// first, then the file's imports. A dotted name whose head is an import
    /// of a namespace or a module is looked up inside it.
    pub fn resolve_name(&self, file: FileId, name: &str, kinds: &[DeclKind]) -> Option<DeclId> {
        let source = self.file(file);
        if let Some(id) = source.maps.find(name, kinds) {
            return Some(id);
        }

        match name.split_once('.') {
            None => {
                let import = source.imports.get(name)?;
                match import.target {
                    ImportTarget::Decl(id) if kinds.contains(&self.declaration(id).kind) => Some(id),
                    // Merged declarations share a name; ask the source scope by kind.
                    ImportTarget::Decl(_) => self.lookup_in_scope(import.source, &import.imported, kinds),
                    ImportTarget::Namespace(_) | ImportTarget::Scope(_) => None,
                }
            }
            Some((head, rest)) => {
                let import = source.imports.get(head)?;
                match import.target {
                    ImportTarget::Namespace(ns) => self.namespace(ns).maps.find(rest, kinds),
                    ImportTarget::Scope(scope) => self.lookup_in_scope(scope, rest, kinds),
                    ImportTarget::Decl(_) => None,
                }
            }
        }
    }

    /// Follows an object binding to the declaration it stands for.
    pub fn unwrap_binding(&self, id: DeclId) -> DeclId {
        let decl = self.declaration(id);
        match decl.kind {
            DeclKind::ObjectBinding => decl.bases.first().and_then(|b| b.resolved).unwrap_or(id),
            _ => id,
        }
    }
}
