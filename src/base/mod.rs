//! Foundation types for the vista analyzer.
//!
//! This module provides fundamental types used throughout the engine:
//! - [`FileId`], [`DirId`], [`PackageId`], [`NamespaceId`], [`DeclId`] - arena handles
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - Path helpers shared by the loader and import resolution
//! - Domain constants (file extensions, reserved names, default directories)
//!
//! This module has NO dependencies on other vista modules.

pub mod constants;
mod ids;
mod paths;

pub use ids::{DeclId, DirId, FileId, NamespaceId, PackageId};
pub use paths::{join_relative, normalize, strip_source_extension};

// Re-export text-size types for convenience
pub use text_size::{self, TextRange, TextSize};
