//! Tag propagation along dependents.

use vista::base::constants::{TAG_PAGE, TAG_UI_COMPONENT};
use vista::hir::DeclKind;
use vista::project::{AnalyzerConfig, Manifest, TagSeed};
use vista::syntax::make;

use crate::helpers::decl_assertions::*;
use crate::helpers::repo_helpers::*;
use crate::helpers::source_fixtures::*;

#[test]
fn test_tag_reaches_depth_two() {
    let repo = react_workspace(vec![(
        "src/views",
        vec![
            import_component(),
            make::class("B").extends("Component").into(),
            make::class("C").extends("B").into(),
            make::class("D").extends("C").into(),
            make::class("Unrelated").into(),
        ],
    )]);

    for name in ["B", "C", "D"] {
        let decl = assert_declared(&repo, &format!("src.{name}"));
        assert!(decl.has_tag(TAG_UI_COMPONENT), "{name} should be tagged");
    }
    assert!(!assert_declared(&repo, "src.Unrelated").has_tag(TAG_UI_COMPONENT));
}

#[test]
fn test_pure_component_seed() {
    let repo = react_workspace(vec![(
        "src/Row",
        vec![
            make::import_named("react", &["PureComponent"]).into(),
            make::class("Row").exported().extends("PureComponent").into(),
        ],
    )]);
    assert!(assert_declared(&repo, "src.Row").has_tag(TAG_UI_COMPONENT));
}

#[test]
fn test_dotted_base_through_namespace_import() {
    let repo = react_workspace(vec![(
        "src/App",
        vec![
            make::import_namespace("react", "React").into(),
            make::class("App").extends("React.Component").into(),
        ],
    )]);
    assert!(assert_declared(&repo, "src.App").has_tag(TAG_UI_COMPONENT));
}

#[test]
fn test_function_typed_as_component_is_tagged() {
    let repo = react_workspace(vec![(
        "src/Badge",
        vec![
            import_component(),
            make::typed_const(
                "Badge",
                make::intersection(vec![make::type_ref("Props"), make::type_query("Component")]),
            )
            .into(),
        ],
    )]);
    assert!(assert_declared(&repo, "src.Badge").has_tag(TAG_UI_COMPONENT));
}

#[test]
fn test_page_seed_from_configuration() {
    let mut builder = builder_with(
        AnalyzerConfig::default().with_tag_seed(TagSeed::new(TAG_PAGE, "@acme/nav", "Page")),
    );
    add_react(&mut builder);
    let nav = builder.add_package(Manifest::named("@acme/nav"));
    builder.add_package_file(
        nav,
        "index",
        make::unit(vec![
            import_component(),
            make::class("Page").exported().extends("Component").into(),
        ]),
    );
    add_files(
        &mut builder,
        vec![(
            "src/Home",
            vec![
                make::import_named("@acme/nav", &["Page"]).into(),
                make::class("Home").exported().extends("Page").into(),
            ],
        )],
    );
    let repo = builder.build();

    let home = assert_declared(&repo, "src.Home");
    assert!(home.has_tag(TAG_PAGE));
    assert!(home.has_tag(TAG_UI_COMPONENT));
    assert_eq!(names(repo.with_tag(TAG_PAGE)), vec!["Page", "Home"]);
}

#[test]
fn test_seed_resolved_through_types_package() {
    let mut builder = builder();
    let types = builder.add_package(Manifest::named("@types/react"));
    builder.add_package_file(types, "index.d", react_index());
    add_files(&mut builder, vec![("src/App", component_file("App", make::null()))]);
    let repo = builder.build();

    assert!(assert_declared(&repo, "src.App").has_tag(TAG_UI_COMPONENT));
}

#[test]
fn test_tags_skip_pruned_declarations() {
    let repo = react_workspace(vec![(
        "src/x",
        vec![
            import_component(),
            make::class("Ok").extends("Component").into(),
            make::class("Broken").extends("Ok").implements("Missing").into(),
        ],
    )]);
    let broken = any_named(&repo, "Broken", DeclKind::Class);
    assert!(!broken.valid);
    assert!(!broken.has_tag(TAG_UI_COMPONENT));
    assert_eq!(repo.with_tag(TAG_UI_COMPONENT).filter(|d| d.name == "Ok").count(), 1);
}

#[test]
fn test_cycles_terminate() {
    let mut config = AnalyzerConfig::default().without_tag_seeds();
    config.tag_seeds.push(TagSeed::new("marked", "cyc", "A"));
    let mut builder = builder_with(config);
    let cyc = builder.add_package(Manifest::named("cyc"));
    builder.add_package_file(
        cyc,
        "index",
        make::unit(vec![
            make::interface("A").exported().extends("B").into(),
            make::interface("B").exported().extends("A").into(),
        ]),
    );
    let repo = builder.build();
    assert_eq!(repo.with_tag("marked").count(), 2);
}
