//! Package manifests (`package.json`).

use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;

use super::error::{WorkspaceError, WorkspaceResult};
use crate::base::{normalize, strip_source_extension};

/// The parts of a `package.json` the analyzer reads.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Manifest {
    pub name: String,
    pub version: Option<String>,
    pub dependencies: IndexMap<String, String>,
    pub dev_dependencies: IndexMap<String, String>,
    pub peer_dependencies: IndexMap<String, String>,
    pub types: Option<String>,
    pub typings: Option<String>,
    pub main: Option<String>,
}

impl Manifest {
    /// Reads and validates a manifest file.
    pub fn read(path: &Path) -> WorkspaceResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| WorkspaceError::io(path, e))?;
        Self::parse(&text).map_err(|message| WorkspaceError::manifest(path, message))
    }

    /// Parses manifest text. A manifest without a name is rejected.
    pub fn parse(text: &str) -> Result<Self, String> {
        let manifest: Manifest = serde_json::from_str(text).map_err(|e| e.to_string())?;
        if manifest.name.is_empty() {
            return Err("missing package name".to_string());
        }
        Ok(manifest)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_dependency(mut self, name: impl Into<String>) -> Self {
        self.dependencies.insert(name.into(), "*".to_string());
        self
    }

    /// Names of runtime, dev and peer dependencies, each once, in that order.
    pub fn dependency_names(&self) -> IndexSet<&str> {
        self.dependencies
            .keys()
            .chain(self.dev_dependencies.keys())
            .chain(self.peer_dependencies.keys())
            .map(String::as_str)
            .collect()
    }

    /// Extension-less, package-relative key of the entry file.
    ///
    /// `types` wins over `typings`, which wins over `main`; without any of
    /// them the entry is `index`. `./lib/index.d.ts` yields `lib/index.d`.
    pub fn entry_key(&self) -> String {
        self.types
            .as_deref()
            .or(self.typings.as_deref())
            .or(self.main.as_deref())
            .and_then(|entry| normalize(strip_source_extension(entry)))
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| "index".to_string())
    }
}
