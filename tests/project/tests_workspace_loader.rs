//! End-to-end workspace loading from a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use rstest::rstest;
use tempfile::TempDir;
use vista::base::constants::TAG_UI_COMPONENT;
use vista::project::{AnalyzerConfig, WorkspaceError, WorkspaceLoader};
use vista::syntax::{JsonTreeProvider, SourceUnit, make};

use crate::helpers::decl_assertions::*;
use crate::helpers::source_fixtures::*;

fn write(root: &Path, relative: &str, text: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, text).unwrap();
    path
}

/// Writes a source file and its serialized tree next to it.
fn write_source(root: &Path, relative: &str, unit: &SourceUnit) {
    let path = write(root, relative, "// source");
    let provider = JsonTreeProvider::new();
    fs::write(provider.sidecar_path(&path), serde_json::to_string(unit).unwrap()).unwrap();
}

fn react_app() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "package.json", r#"{ "name": "app", "dependencies": { "react": "*" } }"#);
    write(
        root,
        "tsconfig.json",
        r#"{
            // comments and trailing commas are tolerated
            "compilerOptions": { "baseUrl": ".", "paths": { "@/*": ["./src/*"], }, },
        }"#,
    );
    write(root, "node_modules/react/package.json", r#"{ "name": "react", "types": "index.d.ts" }"#);
    write_source(root, "node_modules/react/index.d.ts", &react_index());
    write(root, "node_modules/@types/empty/package.json", r#"{ "name": "@types/empty" }"#);
    write(root, "node_modules/broken/package.json", "{ name: ");

    write_source(
        root,
        "src/components/Button.tsx",
        &make::unit(component_file("Button", make::element("View").into_expr())),
    );
    write_source(
        root,
        "src/components/index.ts",
        &make::unit(vec![make::import_named("./Button", &["Button"]).into()]),
    );
    write_source(
        root,
        "src/screens/Home.tsx",
        &make::unit(vec![
            import_component(),
            make::import_named("@/components/Button", &["Button"]).into(),
            class_component("Home", make::element("Button").with_attr("title", make::attr_str("Go")).into_expr())
                .into(),
        ]),
    );
    write_source(root, "src/__tests__/Home.test.tsx", &make::unit(vec![make::class("Ignored").into()]));
    write(root, "src/legacy.js", "module.exports = {}");
    temp
}

#[test]
fn test_loads_packages_sources_and_alias() {
    let temp = react_app();
    let provider = JsonTreeProvider::new();
    let repo = WorkspaceLoader::new(&provider).load(temp.path()).unwrap();

    let react = repo.find_package("react").unwrap();
    assert_eq!(repo.file(react.entry.unwrap()).key, "index.d");
    assert!(repo.find_package("@types/empty").is_some());
    assert!(repo.find_package("broken").is_none());

    assert!(repo.find_file("src/components/Button").is_some());
    assert!(repo.find_file("src/__tests__/Home.test").is_none());
    // Present without a tree: kept as a file, contributes nothing.
    let legacy = repo.find_file("src/legacy").unwrap();
    assert!(legacy.syntax.is_none());
    assert!(legacy.maps.is_empty());

    let home = assert_declared(&repo, "src/screens.Home");
    assert!(home.has_tag(TAG_UI_COMPONENT));
    assert_eq!(repo.config().path_alias.as_ref().unwrap().target, "src");
}

#[test]
fn test_view_tree_from_disk() {
    let temp = react_app();
    let provider = JsonTreeProvider::new();
    let repo = WorkspaceLoader::new(&provider).load(temp.path()).unwrap();

    let home = assert_declared(&repo, "src/screens.Home");
    let tree = repo.build_view_tree(home.id);
    assert_eq!(tags(&tree.roots), vec!["Button"]);
    assert!(tree.roots[0].declaration.is_some());
    // Button's own template is expanded in place; its host root stays unresolved.
    assert_eq!(tags(&tree.roots[0].children), vec!["View"]);
    assert_eq!(tree.roots[0].children[0].declaration, None);
}

#[test]
fn test_allow_list_limits_packages() {
    let temp = react_app();
    let provider = JsonTreeProvider::new();
    let config = AnalyzerConfig::default().with_allowed_package("@types/");
    let repo = WorkspaceLoader::with_config(&provider, config).load(temp.path()).unwrap();

    assert!(repo.find_package("react").is_none());
    assert!(repo.find_package("@types/empty").is_some());
    // Without react the component base is gone and Home is pruned.
    assert_absent(&repo, "src/screens.Home");
}

#[test]
fn test_explicit_alias_wins_over_tsconfig() {
    let temp = react_app();
    let provider = JsonTreeProvider::new();
    let config = AnalyzerConfig::default().with_path_alias("~/", "src");
    let repo = WorkspaceLoader::with_config(&provider, config).load(temp.path()).unwrap();
    assert_eq!(repo.config().path_alias.as_ref().unwrap().prefix, "~/");
    // `@/components/Button` no longer resolves, so Home keeps only the react import.
    let home = repo.find_file("src/screens/Home").unwrap();
    assert_eq!(home.imports.len(), 1);
}

#[rstest]
#[case::missing("does-not-exist")]
#[case::file("plain.txt")]
fn test_bad_roots(#[case] name: &str) {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "plain.txt", "");
    let provider = JsonTreeProvider::new();
    let result = WorkspaceLoader::new(&provider).load(temp.path().join(name));
    match name {
        "plain.txt" => assert!(matches!(result, Err(WorkspaceError::NotADirectory(_)))),
        _ => assert!(matches!(result, Err(WorkspaceError::RootNotFound(_)))),
    }
}

#[test]
fn test_malformed_tsconfig_aborts() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "tsconfig.json", "{ \"compilerOptions\": [");
    let provider = JsonTreeProvider::new();
    let error = WorkspaceLoader::new(&provider).load(temp.path()).unwrap_err();
    assert!(matches!(error, WorkspaceError::Config { .. }));
    assert!(error.to_string().contains("tsconfig.json"));
}

#[test]
fn test_missing_dependency_dir_is_fine() {
    let temp = TempDir::new().unwrap();
    write_source(temp.path(), "src/a.ts", &make::unit(vec![make::class("A").exported().into()]));
    let provider = JsonTreeProvider::new();
    let repo = WorkspaceLoader::new(&provider).load(temp.path()).unwrap();
    assert_eq!(repo.packages().count(), 0);
    assert_declared(&repo, "src.A");
}
