//! Building repositories from in-memory syntax trees.

use vista::hir::{Repository, RepositoryBuilder};
use vista::project::{AnalyzerConfig, Manifest};
use vista::syntax::{Item, make};

use super::source_fixtures::react_index;

/// A builder rooted at `/workspace` with default configuration.
pub fn builder() -> RepositoryBuilder {
    builder_with(AnalyzerConfig::default())
}

pub fn builder_with(config: AnalyzerConfig) -> RepositoryBuilder {
    RepositoryBuilder::new("/workspace", config)
}

/// Adds workspace files, each given as `(key, items)`.
pub fn add_files(builder: &mut RepositoryBuilder, files: Vec<(&str, Vec<Item>)>) {
    for (key, items) in files {
        builder.add_workspace_file(key, make::unit(items));
    }
}

/// Adds a `react` package exporting `Component` and `PureComponent`.
pub fn add_react(builder: &mut RepositoryBuilder) {
    let react = builder.add_package(Manifest::named("react"));
    builder.add_package_file(react, "index", react_index());
}

/// Analyzes workspace files only.
pub fn workspace(files: Vec<(&str, Vec<Item>)>) -> Repository {
    let mut builder = builder();
    add_files(&mut builder, files);
    builder.build()
}

/// Analyzes workspace files next to a `react` package.
pub fn react_workspace(files: Vec<(&str, Vec<Item>)>) -> Repository {
    let mut builder = builder();
    add_react(&mut builder);
    add_files(&mut builder, files);
    builder.build()
}
