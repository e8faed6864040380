//! Tag propagation along the dependents graph.
//!
//! Each configured seed names a declaration exported by a package. The seed
//! declaration gets the tag, and so does everything that transitively
//! depends on it. A declaration that already carries the tag is not visited
//! again, which also terminates on cycles.

use smol_str::SmolStr;

use super::decl::DeclKind;
use super::repository::Repository;
use crate::base::DeclId;
use crate::project::TagSeed;

/// Applies every configured seed. Returns the number of tags added.
pub(crate) fn propagate_tags(repo: &mut Repository) -> usize {
    let seeds = repo.config.tag_seeds.clone();
    let mut total = 0;
    for seed in &seeds {
        match resolve_seed(repo, seed) {
            Some(root) => {
                let count = spread_tag(repo, root, &seed.tag);
                tracing::debug!("[TAGS] '{}' from {}:{} reached {} declaration(s)", seed.tag, seed.package, seed.name, count);
                total += count;
            }
            None => tracing::debug!("[TAGS] seed {}:{} not found", seed.package, seed.name),
        }
    }
    total
}

/// Finds a seed's declaration through its package, with the type-shim retry.
pub(crate) fn resolve_seed(repo: &Repository, seed: &TagSeed) -> Option<DeclId> {
    repo.with_types_fallback(&seed.package, |package| {
        let scope = repo.resolve_package_specifier(package)?;
        repo.lookup_in_scope(scope, &seed.name, &DeclKind::ALL)
    })
}

/// Tags `root` and all of its transitive dependents.
pub(crate) fn spread_tag(repo: &mut Repository, root: DeclId, tag: &str) -> usize {
    let tag = SmolStr::new(tag);
    let mut count = 0;
    if repo.decls[root.slot()].tags.insert(tag.clone()) {
        count += 1;
    }
    let mut stack: Vec<DeclId> = repo.decls[root.slot()].dependents.clone();
    while let Some(id) = stack.pop() {
        let decl = &mut repo.decls[id.slot()];
        if !decl.valid || !decl.tags.insert(tag.clone()) {
            continue;
        }
        count += 1;
        stack.extend(decl.dependents.iter().copied());
    }
    count
}
