//! Domain constants shared across the analyzer.

/// Source extensions, in the order a same-named sibling is preferred.
///
/// When `foo.ts` and `foo.js` sit side by side only `foo.ts` is loaded.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

/// Extension-less file keys that make their directory import-able.
pub const INDEX_KEYS: &[&str] = &["index", "index.d"];

/// Reserved map key for default exports.
pub const DEFAULT_EXPORT: &str = "default";

/// Package manifest file name.
pub const MANIFEST_FILE: &str = "package.json";

/// Compiler configuration file name read for the path alias.
pub const PROJECT_CONFIG_FILE: &str = "tsconfig.json";

/// Default workspace source directory, relative to the repository root.
pub const DEFAULT_SOURCE_DIR: &str = "src";

/// Default dependency directory, relative to the repository root.
pub const DEFAULT_DEPENDENCY_DIR: &str = "node_modules";

/// Scope under which type-declaration shim packages are published.
pub const DEFAULT_TYPES_SCOPE: &str = "@types";

/// Directory names never descended into.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["__tests__", ".git", "node_modules"];

/// Method whose returned JSX is the component template.
pub const DEFAULT_RENDER_METHOD: &str = "render";

/// Suffix of the serialized syntax tree stored next to a source file.
pub const TREE_SIDECAR_SUFFIX: &str = ".ast.json";

/// Tag given to every descendant of a UI component base class.
pub const TAG_UI_COMPONENT: &str = "ui-component";

/// Tag given to every descendant of a page base class.
pub const TAG_PAGE: &str = "page";

/// Preference rank of an extension (lower wins), `None` if unsupported.
pub fn extension_rank(ext: &str) -> Option<usize> {
    SOURCE_EXTENSIONS.iter().position(|e| *e == ext)
}
