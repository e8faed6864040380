//! High-level IR (HIR): the semantic model of a repository.
//!
//! Declarations are collected from syntax trees into an arena, entered into
//! per-scope maps, linked through their bases into a dependency graph, and
//! pruned when a required base cannot be found.
//!
//! ## Key Types
//!
//! - [`Repository`] - the finished, immutable model and its queries
//! - [`RepositoryBuilder`] - phased construction
//! - [`Declaration`] - a class, interface, type alias, variable or object binding
//! - [`DeclMaps`] - per-scope name → declaration maps
//! - [`Import`] - a resolved import binding
//! - [`BindingRecognizer`] - pluggable mapping of destructured bindings
//!
//! ## Phases
//!
//! ```text
//! packages          ← manifests → package graph
//!     │
//!     ▼
//! declarations      ← per-file collection, map registration
//!     │
//!     ▼
//! imports           ← specifier resolution, per-file import maps
//!     │
//!     ▼
//! edges + pruning   ← base resolution, dependency graph
//!     │
//!     ▼
//! tags              ← propagation along dependents
//! ```

mod builder;
mod collect;
mod decl;
mod imports;
mod link;
mod model;
mod packages;
mod recognize;
mod repository;
mod scope;
mod tags;

pub use builder::RepositoryBuilder;
pub use decl::{BaseKind, BaseRef, DeclKind, DeclSyntax, Declaration};
pub use imports::{Import, ImportKind, ImportTarget};
pub use model::{Directory, DirectoryOwner, Namespace, NamespaceKind, Package, SourceFile};
pub use packages::topological_order;
pub use recognize::{BindingRecognizer, RequireGetterRecognizer};
pub use repository::{Repository, RepositoryStats};
pub use scope::{DeclMaps, ScopeRef};
