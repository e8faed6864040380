//! Import resolution tests.
//!
//! Specifiers are tried as relative paths, then through the path alias, then
//! as package names; a bare package that fails is retried against its type
//! shim.

use rstest::rstest;
use vista::hir::{DeclKind, ImportKind, ImportTarget, Repository, ScopeRef};
use vista::project::{AnalyzerConfig, Manifest};
use vista::syntax::make;

use crate::helpers::decl_assertions::*;
use crate::helpers::repo_helpers::*;

/// A workspace with a library folder, an alias and one package.
fn library() -> Repository {
    let mut builder = builder_with(AnalyzerConfig::default().with_path_alias("@/", "src"));
    let kit = builder.add_package(Manifest::named("@acme/kit"));
    builder.add_package_file(kit, "index", make::unit(vec![make::class("Kit").exported().into()]));
    builder.add_package_file(kit, "lib/Tool", make::unit(vec![make::class("Tool").exported().into()]));
    add_files(
        &mut builder,
        vec![
            ("src/lib/index", vec![make::class("Lib").exported().into()]),
            ("src/lib/Button", vec![make::class("Button").exported().into()]),
            ("src/pages/Home", vec![]),
        ],
    );
    builder.build()
}

#[rstest]
#[case("./Button", "Button", "Button")]
#[case("./Button.tsx", "Button", "Button")]
#[case("../lib/Button", "Button", "Button")]
#[case("@/lib/Button", "Button", "Button")]
#[case("@/lib", "Lib", "Lib")]
#[case("../lib", "Lib", "Lib")]
#[case("@acme/kit", "Kit", "Kit")]
#[case("@acme/kit/lib/Tool", "Tool", "Tool")]
fn test_specifier_forms(#[case] specifier: &str, #[case] name: &str, #[case] expected: &str) {
    let repo = library();
    let from = if specifier.starts_with("./") {
        repo.find_file("src/lib/Button").unwrap().id
    } else {
        repo.find_file("src/pages/Home").unwrap().id
    };
    let scope = repo
        .resolve_specifier(from, specifier)
        .unwrap_or_else(|| panic!("'{specifier}' did not resolve"));
    let id = repo
        .lookup_in_scope(scope, name, &DeclKind::ALL)
        .unwrap_or_else(|| panic!("'{name}' not found through '{specifier}'"));
    assert_eq!(repo.declaration(id).name, expected);
}

#[rstest]
#[case("./missing")]
#[case("../../../outside")]
#[case("@/nowhere")]
#[case("not-installed")]
#[case("@acme/kit/lib/Missing")]
fn test_unresolvable_specifiers(#[case] specifier: &str) {
    let repo = library();
    let from = repo.find_file("src/pages/Home").unwrap().id;
    assert_eq!(repo.resolve_specifier(from, specifier), None);
}

#[test]
fn test_folder_without_index_is_not_importable() {
    let repo = library();
    let from = repo.find_file("src/lib/Button").unwrap().id;
    assert_eq!(repo.resolve_specifier(from, "../pages"), None);
}

#[test]
fn test_repeated_resolution_is_identical() {
    let repo = workspace(vec![
        ("src/a", vec![make::class("A").exported().into()]),
        (
            "src/b",
            vec![
                make::import_named("./a", &["A"]).into(),
                make::class("B").extends("A").into(),
                make::class("C").extends("A").into(),
            ],
        ),
    ]);
    let b = repo.find_file("src/b").unwrap().id;
    let first = repo.resolve_name(b, "A", &[DeclKind::Class]);
    let second = repo.resolve_name(b, "A", &[DeclKind::Class]);
    assert!(first.is_some());
    assert_eq!(first, second);

    let a = assert_declared(&repo, "src.A");
    assert_eq!(names(repo.dependents_of(a.id)), vec!["B", "C"]);
}

#[test]
fn test_import_forms_recorded_on_file() {
    let repo = workspace(vec![
        ("src/shapes", vec![make::class("Square").default_export().into(), make::class("Circle").exported().into()]),
        (
            "src/app",
            vec![
                make::import_default("./shapes", "Sq").into(),
                make::import_aliased("./shapes", "Circle", "Round").into(),
                make::import_namespace("./shapes", "Shapes").into(),
            ],
        ),
    ]);
    let shapes = repo.find_file("src/shapes").unwrap().id;
    let imports = &repo.find_file("src/app").unwrap().imports;
    assert_eq!(imports.len(), 3);

    assert_eq!(imports["Sq"].kind, ImportKind::Default);
    assert_eq!(imports["Sq"].target, ImportTarget::Decl(assert_declared(&repo, "src.Square").id));
    assert_eq!(imports["Round"].imported, "Circle");
    assert_eq!(imports["Shapes"].target, ImportTarget::Scope(ScopeRef::File(shapes)));
}

#[test]
fn test_default_import_of_directory_reads_index() {
    let repo = workspace(vec![
        ("src/components/index", vec![make::class("Bar").default_export().into()]),
        (
            "src/app",
            vec![
                make::import_default("./components", "Widgets").into(),
                make::class("App").extends("Widgets").into(),
            ],
        ),
    ]);
    let bar = assert_declared(&repo, "src/components.Bar");
    let imports = &repo.find_file("src/app").unwrap().imports;
    assert_eq!(imports["Widgets"].target, ImportTarget::Decl(bar.id));

    let app = assert_declared(&repo, "src.App");
    assert_eq!(names(repo.dependencies_of(app.id)), vec!["Bar"]);
}

#[test]
fn test_directory_prefers_index_over_declaration_index() {
    let repo = workspace(vec![
        ("src/lib/index.d", vec![make::class("Typed").exported().into()]),
        ("src/lib/index", vec![make::class("Real").exported().into()]),
    ]);
    let lib = repo.find_directory("src/lib").unwrap();
    let index = lib.index.map(|id| repo.file(id).key.as_str());
    assert_eq!(index, Some("src/lib/index"));
}

#[test]
fn test_imported_namespace_members() {
    let repo = workspace(vec![
        (
            "src/models",
            vec![make::namespace("Models", vec![make::interface("User").exported().into()]).exported().into()],
        ),
        (
            "src/app",
            vec![
                make::import_named("./models", &["Models"]).into(),
                make::interface("Admin").extends("Models.User").into(),
            ],
        ),
    ]);
    let imports = &repo.find_file("src/app").unwrap().imports;
    assert!(matches!(imports["Models"].target, ImportTarget::Namespace(_)));

    let admin = assert_declared(&repo, "src.Admin");
    let user = assert_declared(&repo, "src.Models.User");
    assert_eq!(admin.dependencies, vec![user.id]);
}

#[test]
fn test_export_equals_namespace_serves_named_imports() {
    let mut builder = builder();
    let legacy = builder.add_package(Manifest::named("legacy"));
    builder.add_package_file(
        legacy,
        "index.d",
        make::unit(vec![
            make::namespace("Legacy", vec![make::class("Widget").exported().declared().into()]).into(),
            make::export_equals("Legacy").into(),
        ]),
    );
    add_files(
        &mut builder,
        vec![(
            "src/app",
            vec![
                make::import_named("legacy", &["Widget"]).into(),
                make::class("Mine").extends("Widget").into(),
            ],
        )],
    );
    let repo = builder.build();

    let mine = assert_declared(&repo, "src.Mine");
    let widget = repo.declaration(mine.dependencies[0]);
    assert_eq!(widget.qualified_name, "Legacy.Widget");
}

#[test]
fn test_types_fallback_for_package_subpath() {
    let mut builder = builder();
    let types = builder.add_package(Manifest::named("@types/node"));
    builder.add_package_file(types, "fs.d", make::unit(vec![make::interface("Stats").exported().into()]));
    add_files(&mut builder, vec![("src/app", vec![make::import_named("node/fs", &["Stats"]).into()])]);
    let repo = builder.build();

    let import = &repo.find_file("src/app").unwrap().imports["Stats"];
    assert_eq!(import.specifier, "@types/node/fs");
}

#[test]
fn test_unresolved_import_does_not_block_file() {
    let repo = workspace(vec![(
        "src/app",
        vec![make::import_named("./ghost", &["Ghost"]).into(), make::class("Fine").exported().into()],
    )]);
    assert!(repo.find_file("src/app").unwrap().imports.is_empty());
    assert_declared(&repo, "src.Fine");
}
