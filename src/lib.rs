//! # vista-base
//!
//! Semantic analysis for TypeScript/TSX workspaces: symbol tables, structural
//! dependency graphs, package ordering and static view-tree reconstruction.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! view      → Static view trees of UI components
//!   ↓
//! hir       → Scopes, declarations, imports, dependency graph, tags
//!   ↓
//! project   → Configuration, manifests, workspace loading
//!   ↓
//! syntax    → Syntax-tree contract, constructors, providers
//!   ↓
//! base      → Primitives (arena ids, path keys, constants)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use vista::project::WorkspaceLoader;
//! use vista::syntax::JsonTreeProvider;
//!
//! let provider = JsonTreeProvider::new();
//! let repo = WorkspaceLoader::new(&provider).load("path/to/app")?;
//! for component in repo.with_tag("ui-component") {
//!     println!("{}", repo.build_view_tree(component.id));
//! }
//! # Ok::<(), vista::project::WorkspaceError>(())
//! ```

// ============================================================================
// MODULES (dependency order: base → syntax → project → hir → view)
// ============================================================================

/// Foundation types: arena ids, path keys, TextRange
pub mod base;

/// Syntax: tree types consumed from an external front-end
pub mod syntax;

/// Project management: configuration, manifests, workspace loading
pub mod project;

/// High-level IR: the analyzed repository
pub mod hir;

/// View trees: static reconstruction of rendered component hierarchies
pub mod view;

// Re-export foundation types
pub use base::{DeclId, DirId, FileId, NamespaceId, PackageId, TextRange, TextSize};

// Re-export the main entry points
pub use hir::{Declaration, Repository, RepositoryBuilder};
pub use project::{AnalyzerConfig, WorkspaceError, WorkspaceLoader};
pub use view::{ViewNode, ViewTree};
