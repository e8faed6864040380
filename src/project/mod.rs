//! Project management: configuration, manifests and workspace loading.

pub mod config;
mod error;
pub mod file_loader;
pub mod manifest;
pub mod tsconfig;
pub mod workspace_loader;

pub use config::{AnalyzerConfig, PathAlias, TagSeed};
pub use error::{WorkspaceError, WorkspaceResult};
pub use manifest::Manifest;
pub use workspace_loader::WorkspaceLoader;
