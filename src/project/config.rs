//! Analyzer configuration.
//!
//! Everything the analysis treats as a policy rather than a rule lives here:
//! where sources and dependencies are, which packages are scanned, the import
//! alias, which directories are skipped, and the seeds for tag propagation.
//! The defaults describe a conventional React / React Native workspace.

use serde::{Deserialize, Serialize};

use crate::base::constants::{
    DEFAULT_DEPENDENCY_DIR, DEFAULT_EXCLUDED_DIRS, DEFAULT_RENDER_METHOD, DEFAULT_SOURCE_DIR,
    DEFAULT_TYPES_SCOPE, TAG_UI_COMPONENT,
};

/// An import prefix rewritten to a workspace path (`@/` → `src/`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathAlias {
    /// Specifier prefix, including any trailing slash.
    pub prefix: String,
    /// Workspace-relative directory key the prefix maps to.
    pub target: String,
}

impl PathAlias {
    pub fn new(prefix: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            target: target.into(),
        }
    }

    /// Rewrites `specifier` when it starts with the alias prefix.
    pub fn apply(&self, specifier: &str) -> Option<String> {
        let rest = specifier.strip_prefix(&self.prefix)?;
        let target = self.target.trim_end_matches('/');
        if target.is_empty() {
            Some(rest.to_string())
        } else {
            Some(format!("{target}/{rest}"))
        }
    }
}

/// A tag applied to a known declaration and spread to all its dependents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSeed {
    pub tag: String,
    /// Package (or package subpath) the declaration is exported from.
    pub package: String,
    /// Declaration name, possibly dotted (`React.Component`).
    pub name: String,
}

impl TagSeed {
    pub fn new(tag: impl Into<String>, package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            package: package.into(),
            name: name.into(),
        }
    }
}

/// Configuration for loading and analyzing a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyzerConfig {
    pub source_dir: String,
    pub dependency_dir: String,
    /// When unset, the loader derives it from `tsconfig.json`.
    pub path_alias: Option<PathAlias>,
    /// Package name prefixes to scan; empty means every package.
    pub package_allow_list: Vec<String>,
    pub excluded_dirs: Vec<String>,
    pub types_scope: String,
    pub tag_seeds: Vec<TagSeed>,
    pub render_method: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            source_dir: DEFAULT_SOURCE_DIR.to_string(),
            dependency_dir: DEFAULT_DEPENDENCY_DIR.to_string(),
            path_alias: None,
            package_allow_list: Vec::new(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
            types_scope: DEFAULT_TYPES_SCOPE.to_string(),
            tag_seeds: vec![
                TagSeed::new(TAG_UI_COMPONENT, "react", "Component"),
                TagSeed::new(TAG_UI_COMPONENT, "react", "PureComponent"),
            ],
            render_method: DEFAULT_RENDER_METHOD.to_string(),
        }
    }
}

impl AnalyzerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path_alias(mut self, prefix: impl Into<String>, target: impl Into<String>) -> Self {
        self.path_alias = Some(PathAlias::new(prefix, target));
        self
    }

    pub fn with_allowed_package(mut self, name: impl Into<String>) -> Self {
        self.package_allow_list.push(name.into());
        self
    }

    pub fn with_tag_seed(mut self, seed: TagSeed) -> Self {
        self.tag_seeds.push(seed);
        self
    }

    pub fn without_tag_seeds(mut self) -> Self {
        self.tag_seeds.clear();
        self
    }

    pub fn with_excluded_dir(mut self, name: impl Into<String>) -> Self {
        self.excluded_dirs.push(name.into());
        self
    }

    pub fn with_source_dir(mut self, dir: impl Into<String>) -> Self {
        self.source_dir = dir.into();
        self
    }

    pub fn with_render_method(mut self, name: impl Into<String>) -> Self {
        self.render_method = name.into();
        self
    }

    /// Whether the package should be scanned.
    ///
    /// Entries match as name prefixes. Type shims of allowed packages are
    /// allowed too, so that allowing `react` also admits `@types/react`.
    pub fn is_package_allowed(&self, name: &str) -> bool {
        if self.package_allow_list.is_empty() {
            return true;
        }
        self.package_allow_list
            .iter()
            .any(|allowed| name.starts_with(allowed.as_str()) || name.starts_with(&self.types_package_name(allowed)))
    }

    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.excluded_dirs.iter().any(|d| d == name)
    }

    /// Whether `name` is a type-declaration shim package.
    pub fn is_types_package(&self, name: &str) -> bool {
        name.strip_prefix(&self.types_scope)
            .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Name of the type shim package for `package`.
    ///
    /// `react` → `@types/react`, `@scope/pkg` → `@types/scope__pkg`.
    pub fn types_package_name(&self, package: &str) -> String {
        match package.strip_prefix('@').and_then(|p| p.split_once('/')) {
            Some((scope, name)) => format!("{}/{scope}__{name}", self.types_scope),
            None => format!("{}/{package}", self.types_scope),
        }
    }
}
