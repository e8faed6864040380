//! Declaration collection.
//!
//! Collection runs in two steps. [`collect_file`] walks one syntax tree and
//! produces a [`FileCollection`] without touching shared state, so files are
//! collected in parallel. [`merge`] then allocates ids and enters every
//! declaration into the maps of its namespace chain, file, directory and
//! root, one file at a time in file order.

use std::sync::Arc;

use indexmap::IndexMap;
use rayon::prelude::*;
use smol_str::SmolStr;
use text_size::TextRange;

use super::decl::{BaseKind, BaseRef, DeclKind, DeclSyntax, Declaration};
use super::imports::{ImportKind, ImportRequest};
use super::model::{DirectoryOwner, Namespace, NamespaceKind};
use super::repository::Repository;
use super::scope::{Registration, ScopeRef};
use crate::base::constants::DEFAULT_EXPORT;
use crate::base::{DeclId, DirId, FileId, NamespaceId, PackageId};
use crate::syntax::{
    ClassDecl, ExportAssignment, Expr, ImportDecl, InterfaceDecl, Item, ModuleDecl, Pattern, SourceUnit,
    TypeAliasDecl, TypeExpr, VariableStatement,
};

// ============================================================================
// PER-FILE COLLECTION
// ============================================================================

#[derive(Debug)]
struct NamespaceEntry {
    name: SmolStr,
    qualified: SmolStr,
    kind: NamespaceKind,
    parent: Option<usize>,
    package: Option<PackageId>,
}

#[derive(Debug)]
struct DeclEntry {
    name: SmolStr,
    kind: DeclKind,
    namespace: Option<usize>,
    qualified: SmolStr,
    is_export: bool,
    is_default_export: bool,
    bases: Vec<BaseRef>,
    span: Option<TextRange>,
    syntax: DeclSyntax,
}

/// Everything one file declares, with namespace links as local indices.
#[derive(Debug)]
pub(crate) struct FileCollection {
    file: FileId,
    namespaces: Vec<NamespaceEntry>,
    decls: Vec<DeclEntry>,
    imports: Vec<ImportRequest>,
    exports: Vec<ExportAssignment>,
}

impl FileCollection {
    pub(crate) fn file_id(&self) -> FileId {
        self.file
    }
}

struct Collector<'a> {
    key: &'a str,
    packages: &'a IndexMap<SmolStr, PackageId>,
    out: FileCollection,
}

/// Walks one source unit.
pub(crate) fn collect_file(
    file: FileId,
    key: &str,
    unit: &SourceUnit,
    packages: &IndexMap<SmolStr, PackageId>,
) -> FileCollection {
    let mut collector = Collector {
        key,
        packages,
        out: FileCollection {
            file,
            namespaces: Vec::new(),
            decls: Vec::new(),
            imports: Vec::new(),
            exports: Vec::new(),
        },
    };
    collector.items(&unit.items, None);
    collector.out
}

impl Collector<'_> {
    fn items(&mut self, items: &[Item], ns: Option<usize>) {
        for item in items {
            match item {
                Item::Import(import) => self.import(import),
                Item::Class(class) => self.class(class, ns),
                Item::Interface(interface) => self.interface(interface, ns),
                Item::TypeAlias(alias) => self.type_alias(alias, ns),
                Item::Variable(stmt) => self.variable(stmt, ns),
                Item::Module(module) => self.module(module, ns),
                Item::ExportAssignment(export) if ns.is_none() => self.out.exports.push(export.clone()),
                Item::ExportAssignment(_) | Item::Other => {}
            }
        }
    }

    fn import(&mut self, import: &ImportDecl) {
        let mut push = |local: &str, imported: &str, kind: ImportKind| {
            self.out.imports.push(ImportRequest {
                local: SmolStr::new(local),
                imported: SmolStr::new(imported),
                kind,
                specifier: import.specifier.clone(),
            });
        };
        if let Some(local) = &import.default {
            push(local, DEFAULT_EXPORT, ImportKind::Default);
        }
        if let Some(local) = &import.namespace {
            push(local, local, ImportKind::Namespace);
        }
        for spec in &import.named {
            push(spec.local_name(), &spec.imported, ImportKind::Named);
        }
    }

    fn class(&mut self, class: &Arc<ClassDecl>, ns: Option<usize>) {
        let name = match (&class.name, class.modifiers.default) {
            (Some(name), _) => name.as_str(),
            (None, true) => DEFAULT_EXPORT,
            (None, false) => {
                tracing::warn!("[COLLECT] skipping nameless class in {}", self.key);
                return;
            }
        };
        let bases = class
            .extends
            .iter()
            .map(|n| BaseRef::new(n.as_str(), BaseKind::Extends))
            .chain(class.implements.iter().map(|n| BaseRef::new(n.as_str(), BaseKind::Implements)))
            .collect();
        self.declare(
            name,
            DeclKind::Class,
            ns,
            class.modifiers.export,
            class.modifiers.default,
            bases,
            class.span,
            DeclSyntax::Class(Arc::clone(class)),
        );
    }

    fn interface(&mut self, interface: &Arc<InterfaceDecl>, ns: Option<usize>) {
        let Some(name) = interface.name.as_deref() else {
            tracing::warn!("[COLLECT] skipping nameless interface in {}", self.key);
            return;
        };
        let bases = interface
            .extends
            .iter()
            .map(|n| BaseRef::new(n.as_str(), BaseKind::Extends))
            .collect();
        self.declare(
            name,
            DeclKind::Interface,
            ns,
            interface.modifiers.export,
            interface.modifiers.default,
            bases,
            interface.span,
            DeclSyntax::Interface(Arc::clone(interface)),
        );
    }

    fn type_alias(&mut self, alias: &Arc<TypeAliasDecl>, ns: Option<usize>) {
        self.declare(
            &alias.name,
            DeclKind::TypeAlias,
            ns,
            alias.modifiers.export,
            false,
            alias_bases(&alias.ty),
            alias.span,
            DeclSyntax::TypeAlias(Arc::clone(alias)),
        );
    }

    fn variable(&mut self, stmt: &VariableStatement, ns: Option<usize>) {
        let export = stmt.modifiers.export;
        for declarator in &stmt.declarators {
            match &declarator.pattern {
                Pattern::Ident { name } => {
                    let bases = declarator.ty.as_ref().map(variable_bases).unwrap_or_default();
                    self.declare(
                        name,
                        DeclKind::Variable,
                        ns,
                        export,
                        false,
                        bases,
                        declarator.span,
                        DeclSyntax::Variable(Arc::clone(declarator)),
                    );
                }
                Pattern::Object { props } => {
                    let Some(init) = &declarator.init else {
                        continue;
                    };
                    let source = match init {
                        Expr::Ident { name } => SmolStr::new(name),
                        other => SmolStr::from(other.to_string()),
                    };
                    for prop in props {
                        self.declare(
                            prop.local_name(),
                            DeclKind::ObjectBinding,
                            ns,
                            export,
                            false,
                            vec![BaseRef::new(source.clone(), BaseKind::BindingSource)],
                            declarator.span,
                            DeclSyntax::ObjectBinding {
                                declarator: Arc::clone(declarator),
                                key: SmolStr::new(&prop.key),
                            },
                        );
                    }
                }
                Pattern::Other => {
                    tracing::warn!("[COLLECT] skipping unsupported binding pattern in {}", self.key);
                }
            }
        }
    }

    fn module(&mut self, module: &ModuleDecl, ns: Option<usize>) {
        if module.quoted {
            let Some(package) = self.packages.get(module.name.as_str()).copied() else {
                tracing::trace!("[COLLECT] skipping module '{}': no such package", module.name);
                return;
            };
            let idx = self.namespace(&module.name, NamespaceKind::Module, ns, Some(package));
            self.items(&module.body, Some(idx));
            return;
        }
        let mut current = ns;
        for part in module.name.split('.') {
            current = Some(self.namespace(part, NamespaceKind::Namespace, current, None));
        }
        self.items(&module.body, current);
    }

    /// Finds or creates a namespace; repeated blocks of one name merge.
    fn namespace(&mut self, name: &str, kind: NamespaceKind, parent: Option<usize>, package: Option<PackageId>) -> usize {
        if let Some(idx) = self
            .out
            .namespaces
            .iter()
            .position(|n| n.name == name && n.parent == parent && n.kind == kind)
        {
            return idx;
        }
        let qualified = match kind {
            NamespaceKind::Module => SmolStr::new(name),
            NamespaceKind::Namespace => self.qualify(parent, name),
        };
        self.out.namespaces.push(NamespaceEntry {
            name: SmolStr::new(name),
            qualified,
            kind,
            parent,
            package: package.or_else(|| parent.and_then(|p| self.out.namespaces[p].package)),
        });
        self.out.namespaces.len() - 1
    }

    /// Name qualified by enclosing namespaces; modules add no prefix.
    fn qualify(&self, ns: Option<usize>, name: &str) -> SmolStr {
        match ns.map(|i| &self.out.namespaces[i]) {
            Some(entry) if entry.kind == NamespaceKind::Namespace => SmolStr::from(format!("{}.{}", entry.qualified, name)),
            Some(entry) => match entry.parent {
                Some(_) => self.qualify(entry.parent, name),
                None => SmolStr::new(name),
            },
            None => SmolStr::new(name),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn declare(
        &mut self,
        name: &str,
        kind: DeclKind,
        namespace: Option<usize>,
        is_export: bool,
        is_default_export: bool,
        bases: Vec<BaseRef>,
        span: Option<TextRange>,
        syntax: DeclSyntax,
    ) {
        let qualified = self.qualify(namespace, name);
        self.out.decls.push(DeclEntry {
            name: SmolStr::new(name),
            kind,
            namespace,
            qualified,
            is_export,
            is_default_export,
            bases,
            span,
            syntax,
        });
    }
}

/// The base of a type alias: its right-hand side when that is a plain reference.
fn alias_bases(ty: &TypeExpr) -> Vec<BaseRef> {
    match ty {
        TypeExpr::Reference { name, .. } => vec![BaseRef::new(name.as_str(), BaseKind::TypeReference)],
        _ => Vec::new(),
    }
}

/// Bases of a variable annotation: a plain reference, or the `typeof`
/// members of an intersection (`Props & typeof Component`).
fn variable_bases(ty: &TypeExpr) -> Vec<BaseRef> {
    match ty {
        TypeExpr::Reference { name, .. } => vec![BaseRef::new(name.as_str(), BaseKind::TypeReference)],
        TypeExpr::Intersection { types } => types
            .iter()
            .filter_map(|t| match t {
                TypeExpr::Query { expr } => Some(BaseRef::new(expr.as_str(), BaseKind::TypeQuery)),
                _ => None,
            })
            .collect(),
        TypeExpr::Query { .. } | TypeExpr::Union { .. } | TypeExpr::Other => Vec::new(),
    }
}

// ============================================================================
// PARALLEL DRIVER
// ============================================================================

/// Collects every file with a syntax tree, in parallel, in file order.
pub(crate) fn collect_all(repo: &Repository) -> Vec<FileCollection> {
    repo.files
        .par_iter()
        .filter_map(|file| {
            let unit = file.syntax.as_ref()?;
            Some(collect_file(file.id, &file.key, unit, &repo.package_index))
        })
        .collect()
}

// ============================================================================
// MERGE
// ============================================================================

/// Allocates ids for a file's namespaces and declarations and registers them.
pub(crate) fn merge(repo: &mut Repository, collection: FileCollection) -> Vec<ImportRequest> {
    let file = collection.file;
    let dir = repo.file(file).directory;
    let root = match repo.directory(dir).owner {
        DirectoryOwner::Workspace => ScopeRef::Repository,
        DirectoryOwner::Package(id) => ScopeRef::Package(id),
    };

    let mut ns_ids: Vec<NamespaceId> = Vec::with_capacity(collection.namespaces.len());
    for entry in collection.namespaces {
        let id = NamespaceId::from_slot(repo.namespaces.len());
        let parent = entry.parent.map(|i| ns_ids[i]);
        match entry.kind {
            NamespaceKind::Namespace => {
                if let Some(parent) = parent {
                    repo.namespaces[parent.slot()]
                        .maps
                        .namespaces
                        .insert(entry.name.clone(), id);
                }
                let qualified_root = repo.directory(dir).qualify(&entry.qualified);
                repo.files[file.slot()].maps.namespaces.insert(entry.qualified.clone(), id);
                repo.directories[dir.slot()].maps.namespaces.insert(entry.qualified.clone(), id);
                repo.scope_maps_mut(root).namespaces.insert(qualified_root, id);
                if let Some(package) = entry.package {
                    repo.packages[package.slot()].maps.namespaces.insert(entry.qualified.clone(), id);
                }
            }
            NamespaceKind::Module => {
                repo.files[file.slot()].maps.modules.insert(entry.name.clone(), id);
                repo.directories[dir.slot()].maps.modules.insert(entry.name.clone(), id);
            }
        }
        repo.namespaces.push(Namespace {
            id,
            name: entry.name,
            qualified_name: entry.qualified,
            kind: entry.kind,
            file,
            parent,
            package: entry.package,
            maps: Default::default(),
        });
        ns_ids.push(id);
    }

    for entry in collection.decls {
        let id = DeclId::from_slot(repo.decls.len());
        repo.decls.push(Declaration {
            id,
            name: entry.name,
            kind: entry.kind,
            file,
            namespace: entry.namespace.map(|i| ns_ids[i]),
            qualified_name: entry.qualified,
            is_export: entry.is_export,
            is_default_export: entry.is_default_export,
            bases: entry.bases,
            dependencies: Vec::new(),
            dependents: Vec::new(),
            tags: Default::default(),
            valid: true,
            span: entry.span,
            syntax: entry.syntax,
            registrations: Vec::new(),
        });
        let registrations = registrations_for(repo, id, dir, root);
        for registration in registrations {
            register(repo, id, registration);
        }
    }

    for export in collection.exports {
        match repo.file(file).maps.find(&export.name, &DeclKind::ALL) {
            Some(id) => {
                repo.decls[id.slot()].is_default_export = true;
                register(
                    repo,
                    id,
                    Registration {
                        scope: ScopeRef::File(file),
                        key: SmolStr::new(DEFAULT_EXPORT),
                    },
                );
            }
            None if repo.file(file).maps.namespaces.contains_key(export.name.as_str()) => {
                tracing::trace!("[COLLECT] export of namespace '{}' in {}", export.name, repo.file(file).key);
            }
            None => tracing::debug!(
                "[COLLECT] export of unknown name '{}' in {}",
                export.name,
                repo.file(file).key
            ),
        }
    }

    collection.imports
}

/// Every map entry a freshly collected declaration gets.
fn registrations_for(repo: &Repository, id: DeclId, dir: DirId, root: ScopeRef) -> Vec<Registration> {
    let decl = repo.declaration(id);
    let mut out = Vec::new();
    let mut push = |scope: ScopeRef, key: SmolStr| out.push(Registration { scope, key });

    // Namespace chain, keyed relative to each enclosing block.
    let mut key = decl.name.clone();
    let mut current = decl.namespace;
    while let Some(ns_id) = current {
        let ns = repo.namespace(ns_id);
        push(ScopeRef::Namespace(ns_id), key.clone());
        match ns.kind {
            NamespaceKind::Module => {
                if let Some(package) = ns.package {
                    push(ScopeRef::Package(package), key.clone());
                }
            }
            NamespaceKind::Namespace => key = SmolStr::from(format!("{}.{}", ns.name, key)),
        }
        current = ns.parent;
    }

    push(ScopeRef::File(decl.file), decl.name.clone());
    push(ScopeRef::File(decl.file), decl.qualified_name.clone());
    push(ScopeRef::Directory(dir), decl.name.clone());
    push(ScopeRef::Directory(dir), decl.qualified_name.clone());
    push(root, repo.directory(dir).qualify(&decl.qualified_name));
    if decl.is_default_export && decl.namespace.is_none() && decl.name != DEFAULT_EXPORT {
        push(ScopeRef::File(decl.file), SmolStr::new(DEFAULT_EXPORT));
    }
    out
}

fn register(repo: &mut Repository, id: DeclId, registration: Registration) {
    let kind = repo.declaration(id).kind;
    repo.scope_maps_mut(registration.scope)
        .insert(kind, registration.key.clone(), id);
    repo.decls[id.slot()].record(registration);
}
