//! Dependency edges and pruning.

use rstest::rstest;
use vista::hir::{BaseKind, DeclKind};
use vista::project::Manifest;
use vista::syntax::{Item, make};

use crate::helpers::decl_assertions::*;
use crate::helpers::repo_helpers::*;

#[test]
fn test_unresolvable_base_removed_from_every_map() {
    let mut builder = builder();
    let pkg = builder.add_package(Manifest::named("shapes"));
    builder.add_package_file(
        pkg,
        "index",
        make::unit(vec![make::class("Broken").exported().extends("Unresolvable").into()]),
    );
    add_files(
        &mut builder,
        vec![("src/widgets/Panel", vec![make::class("Panel").exported().extends("Unresolvable").into()])],
    );
    let repo = builder.build();

    let panel = any_named(&repo, "Panel", DeclKind::Class);
    assert!(!panel.valid);
    assert_absent(&repo, "src/widgets.Panel");
    assert_unregistered(&repo, panel);

    let broken = any_named(&repo, "Broken", DeclKind::Class);
    assert!(!broken.valid);
    assert!(repo.find_package("shapes").unwrap().maps.get(DeclKind::Class, "Broken").is_none());
    assert_unregistered(&repo, broken);

    assert_eq!(repo.stats().pruned, 2);
}

#[rstest]
#[case::class_extends(make::class("X").extends("Missing").into())]
#[case::class_implements(make::class("X").implements("Missing").into())]
#[case::interface_extends(make::interface("X").extends("Missing").into())]
#[case::type_reference(make::type_alias("X", make::type_ref("Missing")).into())]
#[case::variable_reference(make::typed_const("X", make::type_ref("Missing")).into())]
#[case::intersection_query(make::typed_const(
    "X",
    make::intersection(vec![make::type_ref("Props"), make::type_query("missing")]),
)
.into())]
#[case::binding(make::destructure(&["X"], make::ident("missing")).into())]
fn test_any_unresolved_base_prunes(#[case] item: Item) {
    let repo = workspace(vec![("src/a", vec![item])]);
    assert_absent(&repo, "src.X");
    assert_eq!(repo.declarations().count(), 0);
}

#[rstest]
#[case::plain_class(make::class("X").into())]
#[case::union_alias(make::type_alias("X", make::union(vec![make::type_ref("Missing")])).into())]
#[case::plain_const(make::const_decl("X", make::num("1")).into())]
#[case::intersection_of_references(make::typed_const(
    "X",
    make::intersection(vec![make::type_ref("Props"), make::type_ref_with_args("Partial", vec![make::type_ref("Y")])]),
)
.into())]
#[case::top_level_query(make::typed_const("X", make::type_query("missing")).into())]
#[case::alias_intersection(make::type_alias(
    "X",
    make::intersection(vec![make::type_ref("A"), make::type_query("b")]),
)
.into())]
#[case::alias_query(make::type_alias("X", make::type_query("missing")).into())]
fn test_declarations_without_required_bases_survive(#[case] item: Item) {
    let repo = workspace(vec![("src/a", vec![item])]);
    assert_declared(&repo, "src.X");
}

#[test]
fn test_pruning_is_single_level() {
    let repo = workspace(vec![(
        "src/chain",
        vec![
            make::class("Root").extends("Unresolvable").into(),
            make::class("Middle").extends("Root").into(),
            make::class("Leaf").extends("Middle").into(),
        ],
    )]);

    assert_absent(&repo, "src.Root");
    let middle = assert_declared(&repo, "src.Middle");
    let leaf = assert_declared(&repo, "src.Leaf");

    // Middle resolved its base before pruning, so it stays, without the edge.
    assert!(middle.dependencies.is_empty());
    assert!(middle.resolved_base(BaseKind::Extends).is_some());
    assert_eq!(leaf.dependencies, vec![middle.id]);
    assert_eq!(names(repo.dependents_of(middle.id)), vec!["Leaf"]);
}

#[test]
fn test_pruned_declaration_scrubbed_from_imports() {
    let repo = workspace(vec![
        ("src/bad", vec![make::class("Bad").exported().extends("Nope").into()]),
        ("src/user", vec![make::import_named("./bad", &["Bad"]).into()]),
    ]);
    assert!(repo.find_file("src/user").unwrap().imports.is_empty());
    let bad = any_named(&repo, "Bad", DeclKind::Class);
    assert!(repo.all_declarations().all(|d| !d.dependents.contains(&bad.id)));
}

#[test]
fn test_edges_across_files_and_packages() {
    let mut builder = builder();
    add_react(&mut builder);
    add_files(
        &mut builder,
        vec![
            ("src/Base", vec![
                make::import_named("react", &["Component"]).into(),
                make::class("Base").exported().extends("Component").into(),
            ]),
            ("src/Props", vec![make::interface("Props").exported().into()]),
            ("src/Screen", vec![
                make::import_named("./Base", &["Base"]).into(),
                make::import_named("./Props", &["Props"]).into(),
                make::class("Screen").exported().extends("Base").implements("Props").into(),
            ]),
        ],
    );
    let repo = builder.build();

    let screen = assert_declared(&repo, "src.Screen");
    assert_eq!(names(repo.dependencies_of(screen.id)), vec!["Base", "Props"]);

    let base = assert_declared(&repo, "src.Base");
    let component = repo.declaration(base.dependencies[0]);
    assert_eq!(component.name, "Component");
    assert_eq!(names(repo.dependents_of(component.id)), vec!["Base"]);
}
