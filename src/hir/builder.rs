//! Building a [`Repository`] in phases.
//!
//! ```text
//! add_package / add_directory / add_file   ← registry of containers
//!     │
//!     ▼
//! link_packages                            ← package edges from manifests
//!     │
//!     ▼
//! collect_all  (parallel)  →  merge        ← declarations and their map entries
//!     │
//!     ▼
//! resolve_imports                          ← per-file import maps
//!     │
//!     ▼
//! link_declarations (parallel) → prune     ← dependency edges, invalid removal
//!     │
//!     ▼
//! propagate_tags                           ← seeds spread along dependents
//! ```
//!
//! Each phase sees the complete output of the previous one.

use std::path::PathBuf;
use std::sync::Arc;

use smol_str::SmolStr;

use super::collect::{collect_all, merge};
use super::imports::resolve_imports;
use super::link::{link_declarations, prune};
use super::model::{Directory, DirectoryOwner, Package, SourceFile};
use super::packages::link_packages;
use super::recognize::{BindingRecognizer, RequireGetterRecognizer};
use super::repository::Repository;
use super::scope::DeclMaps;
use super::tags::propagate_tags;
use crate::base::constants::INDEX_KEYS;
use crate::base::{DirId, FileId, PackageId};
use crate::project::{AnalyzerConfig, Manifest};
use crate::syntax::SourceUnit;

/// Accumulates packages, directories and files, then analyzes them.
pub struct RepositoryBuilder {
    repo: Repository,
    recognizers: Vec<Box<dyn BindingRecognizer>>,
}

impl RepositoryBuilder {
    pub fn new(location: impl Into<PathBuf>, config: AnalyzerConfig) -> Self {
        Self {
            repo: Repository::empty(location.into(), config),
            recognizers: vec![Box::new(RequireGetterRecognizer)],
        }
    }

    /// Adds a binding recognizer, consulted after the ones already present.
    pub fn with_recognizer(mut self, recognizer: impl BindingRecognizer + 'static) -> Self {
        self.recognizers.push(Box::new(recognizer));
        self
    }

    pub(crate) fn with_boxed_recognizer(mut self, recognizer: Box<dyn BindingRecognizer>) -> Self {
        self.recognizers.push(recognizer);
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.repo.config
    }

    // ------------------------------------------------------------------------
    // Registry
    // ------------------------------------------------------------------------

    /// Adds a package installed at the conventional location.
    pub fn add_package(&mut self, manifest: Manifest) -> PackageId {
        let location = self
            .repo
            .location
            .join(&self.repo.config.dependency_dir)
            .join(&manifest.name);
        self.add_package_at(manifest, location)
    }

    /// Adds a package. A second package with an existing name is ignored and
    /// the first one's id is returned.
    pub fn add_package_at(&mut self, manifest: Manifest, location: impl Into<PathBuf>) -> PackageId {
        if let Some(id) = self.repo.package_index.get(manifest.name.as_str()) {
            tracing::debug!("[LOAD] duplicate package '{}' ignored", manifest.name);
            return *id;
        }
        let id = PackageId::from_slot(self.repo.packages.len());
        let is_types = self.repo.config.is_types_package(&manifest.name);
        self.repo.package_index.insert(SmolStr::new(&manifest.name), id);
        self.repo
            .packages
            .push(Package::new(id, manifest, location.into(), is_types));
        id
    }

    /// Adds (or returns) the directory `path` under `owner`, creating parents.
    pub fn add_directory(&mut self, owner: DirectoryOwner, path: &str) -> DirId {
        if let Some(id) = self.dir_index(owner).get(path) {
            return *id;
        }
        if let Some((parent, _)) = path.rsplit_once('/') {
            self.add_directory(owner, parent);
        }
        let location = self.root_location(owner).join(path);
        let id = DirId::from_slot(self.repo.directories.len());
        self.repo.directories.push(Directory {
            id,
            owner,
            path: path.to_string(),
            location,
            index: None,
            files: Vec::new(),
            maps: DeclMaps::default(),
        });
        self.dir_index_mut(owner).insert(path.to_string(), id);
        id
    }

    /// Adds the file with extension-less `key` under `owner`.
    ///
    /// The containing directory is created as needed and becomes import-able
    /// when the file is an index (`index` or `index.d`).
    pub fn add_file(
        &mut self,
        owner: DirectoryOwner,
        key: &str,
        location: impl Into<PathBuf>,
        syntax: Option<SourceUnit>,
    ) -> FileId {
        if let Some(id) = self.file_index(owner).get(key) {
            tracing::debug!("[LOAD] duplicate file '{}' ignored", key);
            return *id;
        }
        let (dir_path, name) = key.rsplit_once('/').unwrap_or(("", key));
        let dir = self.add_directory(owner, dir_path);
        let index_rank = INDEX_KEYS.iter().position(|k| *k == name);

        let id = FileId::from_slot(self.repo.files.len());
        self.repo.files.push(SourceFile {
            id,
            directory: dir,
            key: key.to_string(),
            location: location.into(),
            syntax: syntax.map(Arc::new),
            maps: DeclMaps::default(),
            imports: Default::default(),
        });
        // `index` wins over `index.d` whichever is added first.
        let current_rank = self.repo.directories[dir.slot()]
            .index
            .and_then(|f| INDEX_KEYS.iter().position(|k| *k == self.repo.files[f.slot()].name()));
        let directory = &mut self.repo.directories[dir.slot()];
        directory.files.push(id);
        if let Some(rank) = index_rank {
            if current_rank.is_none_or(|current| rank < current) {
                directory.index = Some(id);
            }
        }
        self.file_index_mut(owner).insert(key.to_string(), id);
        id
    }

    /// Adds a workspace file at `<root>/<key>.ts`.
    pub fn add_workspace_file(&mut self, key: &str, unit: SourceUnit) -> FileId {
        let location = self.repo.location.join(format!("{key}.ts"));
        self.add_file(DirectoryOwner::Workspace, key, location, Some(unit))
    }

    /// Adds a package file at `<package>/<key>.ts`.
    pub fn add_package_file(&mut self, package: PackageId, key: &str, unit: SourceUnit) -> FileId {
        let location = self.repo.packages[package.slot()]
            .location
            .join(format!("{key}.ts"));
        self.add_file(DirectoryOwner::Package(package), key, location, Some(unit))
    }

    fn root_location(&self, owner: DirectoryOwner) -> PathBuf {
        match owner {
            DirectoryOwner::Workspace => self.repo.location.clone(),
            DirectoryOwner::Package(id) => self.repo.packages[id.slot()].location.clone(),
        }
    }

    fn dir_index(&self, owner: DirectoryOwner) -> &indexmap::IndexMap<String, DirId> {
        match owner {
            DirectoryOwner::Workspace => &self.repo.workspace_dirs,
            DirectoryOwner::Package(id) => &self.repo.packages[id.slot()].directories,
        }
    }

    fn dir_index_mut(&mut self, owner: DirectoryOwner) -> &mut indexmap::IndexMap<String, DirId> {
        match owner {
            DirectoryOwner::Workspace => &mut self.repo.workspace_dirs,
            DirectoryOwner::Package(id) => &mut self.repo.packages[id.slot()].directories,
        }
    }

    fn file_index(&self, owner: DirectoryOwner) -> &indexmap::IndexMap<String, FileId> {
        match owner {
            DirectoryOwner::Workspace => &self.repo.workspace_files,
            DirectoryOwner::Package(id) => &self.repo.packages[id.slot()].files,
        }
    }

    fn file_index_mut(&mut self, owner: DirectoryOwner) -> &mut indexmap::IndexMap<String, FileId> {
        match owner {
            DirectoryOwner::Workspace => &mut self.repo.workspace_files,
            DirectoryOwner::Package(id) => &mut self.repo.packages[id.slot()].files,
        }
    }

    // ------------------------------------------------------------------------
    // Analysis
    // ------------------------------------------------------------------------

    /// Runs every analysis phase and returns the finished repository.
    pub fn build(self) -> Repository {
        let RepositoryBuilder { mut repo, recognizers } = self;

        for package in &mut repo.packages {
            let key = package.manifest.entry_key();
            let declaration = format!("{key}.d");
            package.entry = [key.as_str(), declaration.as_str()]
                .into_iter()
                .chain(INDEX_KEYS.iter().copied())
                .find_map(|k| package.files.get(k).copied());
        }
        let package_edges = link_packages(&mut repo);

        let collections = collect_all(&repo);
        let mut requests = Vec::with_capacity(collections.len());
        for collection in collections {
            let file = collection.file_id();
            let pending = merge(&mut repo, collection);
            if !pending.is_empty() {
                requests.push((file, pending));
            }
        }

        let imports = resolve_imports(&mut repo, requests);
        let edges = link_declarations(&mut repo, &recognizers);
        let pruned = prune(&mut repo);
        let tags = propagate_tags(&mut repo);

        tracing::info!(
            "[BUILD] {} package(s), {} package edge(s), {} file(s), {} declaration(s), {} import(s), {} edge(s), {} pruned, {} tag(s)",
            repo.packages.len(),
            package_edges,
            repo.files.len(),
            repo.decls.len(),
            imports,
            edges,
            pruned.len(),
            tags
        );
        repo
    }
}
