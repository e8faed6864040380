//! Scopes and their per-kind declaration maps.
//!
//! Every scope that can be searched by name (repository, package, directory,
//! file, namespace, module) owns one [`DeclMaps`]. A declaration is entered
//! into several maps at once, under its simple name in the immediate scope
//! and under qualified keys further out; the declaration remembers each
//! entry so that pruning can remove it everywhere.

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::decl::DeclKind;
use crate::base::{DeclId, DirId, FileId, NamespaceId, PackageId};

// ============================================================================
// SCOPE REFERENCE
// ============================================================================

/// Handle on any scope that owns declaration maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeRef {
    Repository,
    Package(PackageId),
    Directory(DirId),
    File(FileId),
    Namespace(NamespaceId),
}

/// One map entry made for a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Registration {
    pub scope: ScopeRef,
    pub key: SmolStr,
}

// ============================================================================
// DECLARATION MAPS
// ============================================================================

/// Name → declaration maps, one per declaration kind, plus namespace maps.
///
/// Insertion order is preserved; a later insertion under an existing key
/// replaces the earlier entry.
#[derive(Debug, Clone, Default)]
pub struct DeclMaps {
    pub classes: IndexMap<SmolStr, DeclId>,
    pub interfaces: IndexMap<SmolStr, DeclId>,
    pub type_aliases: IndexMap<SmolStr, DeclId>,
    pub variables: IndexMap<SmolStr, DeclId>,
    pub object_bindings: IndexMap<SmolStr, DeclId>,
    pub namespaces: IndexMap<SmolStr, NamespaceId>,
    pub modules: IndexMap<SmolStr, NamespaceId>,
}

impl DeclMaps {
    /// The map holding declarations of `kind`.
    pub fn of_kind(&self, kind: DeclKind) -> &IndexMap<SmolStr, DeclId> {
        match kind {
            DeclKind::Class => &self.classes,
            DeclKind::Interface => &self.interfaces,
            DeclKind::TypeAlias => &self.type_aliases,
            DeclKind::Variable => &self.variables,
            DeclKind::ObjectBinding => &self.object_bindings,
        }
    }

    fn of_kind_mut(&mut self, kind: DeclKind) -> &mut IndexMap<SmolStr, DeclId> {
        match kind {
            DeclKind::Class => &mut self.classes,
            DeclKind::Interface => &mut self.interfaces,
            DeclKind::TypeAlias => &mut self.type_aliases,
            DeclKind::Variable => &mut self.variables,
            DeclKind::ObjectBinding => &mut self.object_bindings,
        }
    }

    pub fn get(&self, kind: DeclKind, name: &str) -> Option<DeclId> {
        self.of_kind(kind).get(name).copied()
    }

    /// First declaration named `name` among `kinds`, tried in order.
    pub fn find(&self, name: &str, kinds: &[DeclKind]) -> Option<DeclId> {
        kinds.iter().find_map(|kind| self.get(*kind, name))
    }

    pub fn contains(&self, id: DeclId) -> bool {
        DeclKind::ALL
            .iter()
            .any(|kind| self.of_kind(*kind).values().any(|v| *v == id))
    }

    pub(crate) fn insert(&mut self, kind: DeclKind, key: SmolStr, id: DeclId) {
        self.of_kind_mut(kind).insert(key, id);
    }

    /// Removes `key` only while it still maps to `id`.
    pub(crate) fn remove_if(&mut self, kind: DeclKind, key: &str, id: DeclId) -> bool {
        let map = self.of_kind_mut(kind);
        if map.get(key) == Some(&id) {
            map.shift_remove(key);
            true
        } else {
            false
        }
    }

    /// Number of declaration entries across all kinds.
    pub fn len(&self) -> usize {
        DeclKind::ALL.iter().map(|kind| self.of_kind(*kind).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0 && self.namespaces.is_empty() && self.modules.is_empty()
    }

    /// All `(key, kind, id)` declaration entries.
    pub fn entries(&self) -> impl Iterator<Item = (&SmolStr, DeclKind, DeclId)> {
        DeclKind::ALL
            .iter()
            .flat_map(move |kind| self.of_kind(*kind).iter().map(move |(k, v)| (k, *kind, *v)))
    }
}
