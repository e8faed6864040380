//! Dependency edges and pruning.
//!
//! Every base reference is resolved against the declaring file. Resolution
//! reads the repository only, so it runs in parallel; edges are applied
//! afterwards. Declarations left with an unresolved base are then pruned:
//! marked invalid, removed from every map they were entered into, and
//! scrubbed from edge lists and import maps. Pruning is single-level:
//! declarations that depended on a pruned one stay valid.

use rayon::prelude::*;
use rustc_hash::FxHashSet;

use super::decl::BaseKind;
use super::imports::ImportTarget;
use super::recognize::BindingRecognizer;
use super::repository::Repository;
use crate::base::DeclId;

/// Resolves all bases and records dependency/dependent edges.
///
/// Returns the number of edges added.
pub(crate) fn link_declarations(repo: &mut Repository, recognizers: &[Box<dyn BindingRecognizer>]) -> usize {
    let shared: &Repository = repo;
    let resolved: Vec<(DeclId, usize, DeclId)> = shared
        .decls
        .par_iter()
        .flat_map_iter(|decl| {
            decl.bases.iter().enumerate().filter_map(move |(i, base)| {
                let target = match base.kind {
                    BaseKind::BindingSource => recognizers.iter().find_map(|r| {
                        let found = r.recognize(shared, decl);
                        if found.is_some() {
                            tracing::trace!("[LINK] '{}' recognized by {}", decl.name, r.name());
                        }
                        found
                    }),
                    kind => shared.resolve_name(decl.file, &base.name, kind.accepted_targets(decl.kind)),
                };
                if target.is_none() {
                    tracing::debug!(
                        "[LINK] unresolved {:?} '{}' of {} '{}' in {}",
                        base.kind,
                        base.name,
                        decl.kind,
                        decl.name,
                        shared.file(decl.file).key
                    );
                }
                target.map(|t| (decl.id, i, t))
            })
        })
        .collect();

    let mut edges = 0;
    for (owner, index, target) in resolved {
        repo.decls[owner.slot()].bases[index].resolved = Some(target);
        if repo.decls[owner.slot()].add_dependency(target) {
            repo.decls[target.slot()].add_dependent(owner);
            edges += 1;
        }
    }
    edges
}

/// Prunes declarations with an unresolved base. Returns the pruned ids.
pub(crate) fn prune(repo: &mut Repository) -> Vec<DeclId> {
    let pruned: Vec<DeclId> = repo
        .decls
        .iter()
        .filter(|d| d.valid && !d.is_fully_resolved())
        .map(|d| d.id)
        .collect();
    if pruned.is_empty() {
        return pruned;
    }

    for id in &pruned {
        let decl = &mut repo.decls[id.slot()];
        decl.valid = false;
        let kind = decl.kind;
        let registrations = std::mem::take(&mut decl.registrations);
        for registration in &registrations {
            repo.scope_maps_mut(registration.scope)
                .remove_if(kind, &registration.key, *id);
        }
        tracing::debug!("[PRUNE] {} '{}'", kind, repo.decls[id.slot()].qualified_name);
        repo.decls[id.slot()].registrations = registrations;
    }

    let gone: FxHashSet<DeclId> = pruned.iter().copied().collect();
    for decl in &mut repo.decls {
        decl.dependencies.retain(|d| !gone.contains(d));
        decl.dependents.retain(|d| !gone.contains(d));
    }
    for file in &mut repo.files {
        file.imports
            .retain(|_, import| !matches!(import.target, ImportTarget::Decl(d) if gone.contains(&d)));
    }
    pruned
}
