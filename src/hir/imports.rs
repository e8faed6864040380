//! Import records and module specifier resolution.
//!
//! A specifier is resolved in three steps, first success wins:
//!
//! 1. relative (`./x`, `../x`) against the importing file's directory, inside
//!    the same root (workspace or package);
//! 2. the configured path alias (`@/x` → `src/x`), inside the workspace;
//! 3. a package name, longest matching prefix, with the rest of the specifier
//!    resolved inside that package.
//!
//! A bare package specifier that fails entirely is retried once against its
//! type shim (`react` → `@types/react`).

use smol_str::SmolStr;

use super::model::DirectoryOwner;
use super::repository::Repository;
use super::scope::ScopeRef;
use crate::base::constants::DEFAULT_EXPORT;
use crate::base::{DeclId, FileId, NamespaceId, join_relative, normalize, strip_source_extension};

/// How a name was imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// `import X from "m"`
    Default,
    /// `import { X } from "m"` / `import { X as Y } from "m"`
    Named,
    /// `import * as X from "m"`
    Namespace,
}

/// What an imported name stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportTarget {
    Decl(DeclId),
    Namespace(NamespaceId),
    /// A whole file, directory or package (namespace imports).
    Scope(ScopeRef),
}

/// A resolved import binding in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// Name bound in the importing file.
    pub local: SmolStr,
    /// Key the target was found under in the source scope.
    pub imported: SmolStr,
    pub kind: ImportKind,
    /// Specifier that resolved, after any type-shim retry.
    pub specifier: String,
    pub source: ScopeRef,
    pub target: ImportTarget,
}

/// An import as written, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ImportRequest {
    pub local: SmolStr,
    pub imported: SmolStr,
    pub kind: ImportKind,
    pub specifier: String,
}

impl Repository {
    /// Resolves `specifier` as written in file `from` to the scope it names.
    pub fn resolve_specifier(&self, from: FileId, specifier: &str) -> Option<ScopeRef> {
        if specifier.starts_with("./") || specifier.starts_with("../") || specifier == "." || specifier == ".." {
            let dir = self.directory(self.file(from).directory);
            let key = join_relative(&dir.path, strip_source_extension(specifier))?;
            return self.resolve_in_root(dir.owner, &key);
        }
        if let Some(alias) = &self.config.path_alias {
            if let Some(rewritten) = alias.apply(specifier) {
                let key = normalize(strip_source_extension(&rewritten))?;
                return self.resolve_in_root(DirectoryOwner::Workspace, &key);
            }
        }
        self.resolve_package_specifier(specifier)
    }

    /// Resolves a bare `package[/subpath]` specifier.
    pub fn resolve_package_specifier(&self, specifier: &str) -> Option<ScopeRef> {
        let segments: Vec<&str> = specifier.split('/').collect();
        let min = if specifier.starts_with('@') { 2 } else { 1 };
        (min..=segments.len()).rev().find_map(|n| {
            let id = *self.package_index.get(segments[..n].join("/").as_str())?;
            let rest = segments[n..].join("/");
            if rest.is_empty() {
                Some(ScopeRef::Package(id))
            } else {
                let key = normalize(strip_source_extension(&rest))?;
                self.resolve_in_root(DirectoryOwner::Package(id), &key)
            }
        })
    }

    /// A key inside a root names a file, a `.d` declaration file, or an
    /// import-able directory, tried in that order.
    fn resolve_in_root(&self, owner: DirectoryOwner, key: &str) -> Option<ScopeRef> {
        let (files, dirs) = match owner {
            DirectoryOwner::Workspace => (&self.workspace_files, &self.workspace_dirs),
            DirectoryOwner::Package(id) => {
                let package = self.package(id);
                (&package.files, &package.directories)
            }
        };
        if let Some(file) = files.get(key).or_else(|| files.get(format!("{key}.d").as_str())) {
            return Some(ScopeRef::File(*file));
        }
        match dirs.get(key) {
            Some(dir) if self.directory(*dir).can_import() => Some(ScopeRef::Directory(*dir)),
            _ if key.is_empty() => match owner {
                DirectoryOwner::Package(id) => Some(ScopeRef::Package(id)),
                DirectoryOwner::Workspace => None,
            },
            _ => None,
        }
    }

    /// The type-shim form of a bare package specifier, if it has one.
    pub(crate) fn types_specifier(&self, specifier: &str) -> Option<String> {
        if specifier.starts_with('.') || specifier.starts_with('/') {
            return None;
        }
        if self.config.path_alias.as_ref().is_some_and(|a| specifier.starts_with(&a.prefix)) {
            return None;
        }
        let split = if specifier.starts_with('@') { 2 } else { 1 };
        let mut segments = specifier.splitn(split + 1, '/');
        let package: Vec<&str> = segments.by_ref().take(split).collect();
        let package = package.join("/");
        if self.config.is_types_package(&package) {
            return None;
        }
        let shim = self.config.types_package_name(&package);
        Some(match segments.next() {
            Some(rest) => format!("{shim}/{rest}"),
            None => shim,
        })
    }

    /// Runs `attempt` on the specifier, then once on its type shim.
    pub(crate) fn with_types_fallback<T>(&self, specifier: &str, mut attempt: impl FnMut(&str) -> Option<T>) -> Option<T> {
        attempt(specifier).or_else(|| {
            let shim = self.types_specifier(specifier)?;
            tracing::trace!("[IMPORT] retrying '{}' as '{}'", specifier, shim);
            attempt(&shim)
        })
    }

    /// Resolves one import request of file `from`.
    pub(crate) fn resolve_import(&self, from: FileId, request: &ImportRequest) -> Option<Import> {
        self.with_types_fallback(&request.specifier, |specifier| {
            let source = self.resolve_specifier(from, specifier)?;
            let (imported, target) = match request.kind {
                ImportKind::Namespace => (request.imported.clone(), ImportTarget::Scope(source)),
                ImportKind::Default => self
                    .lookup_export(source, DEFAULT_EXPORT)
                    .map(|t| (SmolStr::new(DEFAULT_EXPORT), t))
                    .or_else(|| {
                        self.lookup_export(source, &request.local)
                            .map(|t| (request.local.clone(), t))
                    })?,
                ImportKind::Named => (
                    request.imported.clone(),
                    self.lookup_export(source, &request.imported)?,
                ),
            };
            Some(Import {
                local: request.local.clone(),
                imported,
                kind: request.kind,
                specifier: specifier.to_string(),
                source,
                target,
            })
        })
    }
}

/// Resolves all pending imports and stores them on their files.
pub(crate) fn resolve_imports(repo: &mut Repository, requests: Vec<(FileId, Vec<ImportRequest>)>) -> usize {
    let mut resolved = Vec::new();
    for (file, pending) in &requests {
        for request in pending {
            match repo.resolve_import(*file, request) {
                Some(import) => resolved.push((*file, import)),
                None => tracing::debug!(
                    "[IMPORT] unresolved '{}' from '{}' in {}",
                    request.local,
                    request.specifier,
                    repo.file(*file).key
                ),
            }
        }
    }

    let count = resolved.len();
    for (file, import) in resolved {
        repo.files[file.slot()].imports.insert(import.local.clone(), import);
    }
    count
}
