use std::path::Path;

use super::config::AnalyzerConfig;
use super::error::{WorkspaceError, WorkspaceResult};
use super::file_loader::{self, SourceEntry};
use super::tsconfig;
use crate::hir::{BindingRecognizer, DirectoryOwner, Repository, RepositoryBuilder};
use crate::syntax::SyntaxProvider;

/// Scans a workspace root into an analyzed [`Repository`].
///
/// Layout expected under the root:
///
/// ```text
/// <root>/tsconfig.json          optional, supplies the path alias
/// <root>/<dependencyDir>/...    packages, one manifest each
/// <root>/<sourceDir>/...        workspace sources
/// ```
pub struct WorkspaceLoader<'p> {
    config: AnalyzerConfig,
    provider: &'p dyn SyntaxProvider,
    recognizers: Vec<Box<dyn BindingRecognizer>>,
}

impl<'p> WorkspaceLoader<'p> {
    pub fn new(provider: &'p dyn SyntaxProvider) -> Self {
        Self::with_config(provider, AnalyzerConfig::default())
    }

    pub fn with_config(provider: &'p dyn SyntaxProvider, config: AnalyzerConfig) -> Self {
        Self {
            config,
            provider,
            recognizers: Vec::new(),
        }
    }

    /// Adds a binding recognizer on top of the built-in one.
    pub fn with_recognizer(mut self, recognizer: impl BindingRecognizer + 'static) -> Self {
        self.recognizers.push(Box::new(recognizer));
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Loads and analyzes everything below `root`.
    pub fn load(self, root: impl AsRef<Path>) -> WorkspaceResult<Repository> {
        let root = root.as_ref();
        if !root.exists() {
            return Err(WorkspaceError::RootNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(WorkspaceError::NotADirectory(root.to_path_buf()));
        }

        let WorkspaceLoader {
            mut config,
            provider,
            recognizers,
        } = self;
        if config.path_alias.is_none() {
            config.path_alias = tsconfig::load_path_alias(root)?;
        }
        if let Some(alias) = &config.path_alias {
            tracing::debug!("[LOAD] path alias '{}' -> '{}'", alias.prefix, alias.target);
        }

        let mut builder = RepositoryBuilder::new(root, config.clone());
        for recognizer in recognizers {
            builder = builder.with_boxed_recognizer(recognizer);
        }

        let dependency_dir = root.join(&config.dependency_dir);
        if dependency_dir.is_dir() {
            for package in file_loader::discover_packages(&dependency_dir)? {
                if !config.is_package_allowed(&package.manifest.name) {
                    tracing::trace!("[LOAD] package '{}' not in allow list", package.manifest.name);
                    continue;
                }
                let location = package.location;
                let id = builder.add_package_at(package.manifest, &location);
                let files = file_loader::collect_source_files(&location, &location, &config);
                add_files(&mut builder, provider, DirectoryOwner::Package(id), files);
            }
        }

        let source_dir = root.join(&config.source_dir);
        if source_dir.is_dir() {
            let files = file_loader::collect_source_files(root, &source_dir, &config);
            add_files(&mut builder, provider, DirectoryOwner::Workspace, files);
        } else {
            tracing::warn!("[LOAD] source directory {} not found", source_dir.display());
        }

        Ok(builder.build())
    }
}

fn add_files(
    builder: &mut RepositoryBuilder,
    provider: &dyn SyntaxProvider,
    owner: DirectoryOwner,
    files: Vec<SourceEntry>,
) {
    for SourceEntry { key, path } in files {
        let syntax = provider.provide(&path);
        if syntax.is_none() {
            tracing::debug!("[LOAD] no syntax tree for {}", path.display());
        }
        builder.add_file(owner, &key, path, syntax);
    }
}
