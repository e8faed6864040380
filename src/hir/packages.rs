//! The package dependency graph and its topological order.

use std::collections::BTreeSet;

use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::model::Package;
use super::repository::Repository;
use crate::base::PackageId;

/// Wires package edges from each manifest's dependency lists.
///
/// Only dependencies that are themselves loaded become edges. A dependency
/// on a type shim is also a type edge; the reverse type edge is recorded
/// only when the dependent is a type shim as well.
pub(crate) fn link_packages(repo: &mut Repository) -> usize {
    let mut edges = Vec::new();
    for package in &repo.packages {
        for dep in package.manifest.dependency_names() {
            match repo.package_index.get(dep) {
                Some(&target) if target != package.id => {
                    edges.push((package.id, target, repo.config.is_types_package(dep)));
                }
                Some(_) => {}
                None => tracing::trace!("[PACKAGES] '{}' depends on missing '{}'", package.name, dep),
            }
        }
    }

    let count = edges.len();
    for (from, to, is_type) in edges {
        let dependent_is_types = repo.packages[from.slot()].is_types;
        repo.packages[from.slot()].dependencies.insert(to);
        repo.packages[to.slot()].dependents.insert(from);
        if is_type {
            repo.packages[from.slot()].type_dependencies.insert(to);
            if dependent_is_types {
                repo.packages[to.slot()].type_dependents.insert(from);
            }
        }
    }
    count
}

/// Orders `packages` so every package comes after its dependencies.
///
/// Kahn's algorithm over the edges returned by `edges`, restricted to the
/// given set; among ready packages the smallest name goes first. Returns an
/// empty list when the edges contain a cycle.
pub fn topological_order<F>(packages: &[&Package], edges: F) -> Vec<PackageId>
where
    F: Fn(&Package) -> &IndexSet<PackageId>,
{
    let members: FxHashMap<PackageId, &Package> = packages.iter().map(|p| (p.id, *p)).collect();
    let mut in_degree: FxHashMap<PackageId, usize> = FxHashMap::default();
    let mut waiting_on: FxHashMap<PackageId, Vec<PackageId>> = FxHashMap::default();

    for package in packages {
        let deps: Vec<PackageId> = edges(package)
            .iter()
            .copied()
            .filter(|d| members.contains_key(d))
            .collect();
        in_degree.insert(package.id, deps.len());
        for dep in deps {
            waiting_on.entry(dep).or_default().push(package.id);
        }
    }

    let mut ready: BTreeSet<(SmolStr, PackageId)> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(id, _)| (members[id].name.clone(), *id))
        .collect();

    let mut order = Vec::with_capacity(packages.len());
    while let Some((_, id)) = ready.pop_first() {
        order.push(id);
        for dependent in waiting_on.get(&id).into_iter().flatten() {
            if let Some(degree) = in_degree.get_mut(dependent) {
                *degree -= 1;
                if *degree == 0 {
                    ready.insert((members[dependent].name.clone(), *dependent));
                }
            }
        }
    }

    if order.len() != packages.len() {
        tracing::warn!(
            "[PACKAGES] dependency cycle among {} package(s); no order",
            packages.len() - order.len()
        );
        return Vec::new();
    }
    order
}
