//! Reading the import alias out of `tsconfig.json`.
//!
//! Only `compilerOptions.baseUrl` and the first wildcard entry of
//! `compilerOptions.paths` are consulted. The file is read as JSON5, so
//! comments and trailing commas are accepted.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use super::config::PathAlias;
use super::error::{WorkspaceError, WorkspaceResult};
use crate::base::constants::PROJECT_CONFIG_FILE;
use crate::base::normalize;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TsConfig {
    compiler_options: CompilerOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CompilerOptions {
    base_url: Option<String>,
    paths: IndexMap<String, Vec<String>>,
}

/// Loads the path alias declared by `<root>/tsconfig.json`.
///
/// A missing file, or one without wildcard paths, yields `Ok(None)`. A file
/// that exists but is not valid JSON is a configuration error.
pub fn load_path_alias(root: &Path) -> WorkspaceResult<Option<PathAlias>> {
    let path = root.join(PROJECT_CONFIG_FILE);
    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(WorkspaceError::io(&path, e)),
    };
    parse_path_alias(&text).map_err(|message| WorkspaceError::config(&path, message))
}

/// Parses tsconfig text and derives the alias.
pub fn parse_path_alias(text: &str) -> Result<Option<PathAlias>, String> {
    let config: TsConfig = json5::from_str(text).map_err(|e| e.to_string())?;
    let options = config.compiler_options;
    let base = options.base_url.as_deref().unwrap_or(".");

    let alias = options.paths.iter().find_map(|(pattern, targets)| {
        let prefix = pattern.strip_suffix('*')?;
        let target = targets.first()?.strip_suffix('*')?;
        let target = normalize(&format!("{base}/{target}"))?;
        Some(PathAlias::new(prefix, target))
    });
    Ok(alias)
}
