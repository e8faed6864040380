//! View tree reconstruction tests.

use rstest::rstest;
use vista::hir::Repository;
use vista::syntax::{Expr, make};
use vista::view::{AttrValue, ViewTree, ViewTreeBuilder};

use crate::helpers::decl_assertions::*;
use crate::helpers::repo_helpers::*;
use crate::helpers::source_fixtures::*;

/// Builds the tree of `src.<name>`.
fn tree_of(repo: &Repository, name: &str) -> ViewTree {
    let decl = assert_declared(repo, &format!("src.{name}"));
    repo.build_view_tree(decl.id)
}

/// A single-file workspace where `Foo` renders `render`.
fn foo_rendering(render: Expr) -> Repository {
    react_workspace(vec![("src/Foo", component_file("Foo", render))])
}

// =============================================================================
// ROOTS
// =============================================================================

#[test]
fn test_unresolved_root_with_attributes() {
    let repo = foo_rendering(
        make::element("Bar")
            .with_attr("x", make::attr_str("1"))
            .with_flag("flag")
            .into_expr(),
    );
    let tree = tree_of(&repo, "Foo");

    assert_eq!(tags(&tree.roots), vec!["Bar"]);
    let bar = &tree.roots[0];
    assert_eq!(bar.declaration, None);
    assert_eq!(bar.attribute("x"), Some(Some(&AttrValue::Literal("1".to_string()))));
    assert_eq!(bar.attribute("flag"), Some(None));
    assert_eq!(bar.attribute("missing"), None);
    assert!(bar.children.is_empty());
}

#[test]
fn test_ternary_yields_two_roots() {
    let repo = foo_rendering(make::paren(make::conditional(
        make::ident("cond"),
        make::element("A").into_expr(),
        make::element("B").into_expr(),
    )));
    assert_eq!(tags(&tree_of(&repo, "Foo").roots), vec!["A", "B"]);
}

#[rstest]
#[case::null(make::null())]
#[case::string(make::string("text"))]
#[case::unknown(make::other("someCall()"))]
fn test_non_jsx_render_yields_empty_tree(#[case] render: Expr) {
    let repo = foo_rendering(render);
    assert!(tree_of(&repo, "Foo").is_empty());
}

#[test]
fn test_component_without_render_is_empty() {
    let repo = react_workspace(vec![(
        "src/Bare",
        vec![import_component(), make::class("Bare").exported().extends("Component").into()],
    )]);
    let tree = tree_of(&repo, "Bare");
    assert!(tree.is_empty());
    assert_eq!(tree.to_string(), "");
}

#[test]
fn test_custom_render_method() {
    let repo = react_workspace(vec![(
        "src/Screen",
        vec![
            import_component(),
            make::class("Screen")
                .exported()
                .extends("Component")
                .method("renderContent", vec![make::ret(make::element("Body").into_expr())])
                .into(),
        ],
    )]);
    let screen = assert_declared(&repo, "src.Screen");
    let tree = ViewTreeBuilder::new(&repo).with_render_method("renderContent").build(screen.id);
    assert_eq!(tags(&tree.roots), vec!["Body"]);
}

// =============================================================================
// CHILDREN
// =============================================================================

/// `Title` and `Icon` are function components rendering host elements.
fn with_widgets(mut files: Vec<(&'static str, Vec<vista::syntax::Item>)>) -> Repository {
    files.push((
        "src/widgets",
        vec![
            function_component("Title", make::element("Text").into_expr()),
            function_component("Icon", make::element("Image").into_expr()),
        ],
    ));
    react_workspace(files)
}

fn importing_widgets(name: &str, render: Expr) -> Vec<vista::syntax::Item> {
    vec![
        import_component(),
        make::import_named("./widgets", &["Title", "Icon"]).into(),
        class_component(name, render).into(),
    ]
}

#[test]
fn test_unresolved_child_skipped() {
    let repo = with_widgets(vec![(
        "src/Card",
        importing_widgets(
            "Card",
            make::element("View")
                .with_child(make::element("Unknown"))
                .with_child(make::text("  \n  "))
                .with_child(make::element("Title"))
                .into_expr(),
        ),
    )]);
    let tree = tree_of(&repo, "Card");
    let view = &tree.roots[0];
    assert_eq!(tags(&view.children), vec!["Title"]);
    // Title is expanded into its own template.
    assert_eq!(tags(&view.children[0].children), vec!["Text"]);
}

#[test]
fn test_conditional_and_logical_children() {
    let repo = with_widgets(vec![(
        "src/Card",
        importing_widgets(
            "Card",
            make::element("View")
                .with_child(make::child_expr(make::conditional(
                    make::ident("big"),
                    make::element("Title").into_expr(),
                    make::element("Icon").into_expr(),
                )))
                .with_child(make::child_expr(make::and(make::ident("show"), make::element("Icon").into_expr())))
                .into_expr(),
        ),
    )]);
    let view = &tree_of(&repo, "Card").roots[0];
    assert_eq!(tags(&view.children), vec!["Title", "Icon", "Icon"]);
}

#[test]
fn test_fragment_children_flattened() {
    let repo = with_widgets(vec![(
        "src/Card",
        importing_widgets(
            "Card",
            make::fragment(vec![make::element("Title").into(), make::element("Icon").into()]),
        ),
    )]);
    assert_eq!(tags(&tree_of(&repo, "Card").roots), vec!["Title", "Icon"]);
}

#[test]
fn test_render_locals_become_children() {
    let render = vec![
        make::local("heading", make::element("Title").into_expr()),
        make::ret(make::element("View").with_child(make::child_expr(make::ident("heading"))).into_expr()),
    ];
    let repo = with_widgets(vec![(
        "src/Card",
        vec![
            import_component(),
            make::import_named("./widgets", &["Title"]).into(),
            make::class("Card").exported().extends("Component").method("render", render).into(),
        ],
    )]);
    let view = &tree_of(&repo, "Card").roots[0];
    assert_eq!(tags(&view.children), vec!["Title"]);
}

#[test]
fn test_helper_member_expanded() {
    let repo = with_widgets(vec![(
        "src/List",
        vec![
            import_component(),
            make::import_named("./widgets", &["Icon"]).into(),
            make::class("List")
                .exported()
                .extends("Component")
                .method("renderRow", vec![make::ret(make::element("Icon").into_expr())])
                .render(
                    make::element("View")
                        .with_child(make::child_expr(make::call(make::member(make::this(), "renderRow"), vec![])))
                        .into_expr(),
                )
                .into(),
        ],
    )]);
    let view = &tree_of(&repo, "List").roots[0];
    assert_eq!(tags(&view.children), vec!["Icon"]);
}

#[test]
fn test_component_referenced_by_name() {
    let repo = with_widgets(vec![(
        "src/Card",
        importing_widgets(
            "Card",
            make::element("View").with_child(make::child_expr(make::ident("Icon"))).into_expr(),
        ),
    )]);
    let view = &tree_of(&repo, "Card").roots[0];
    assert_eq!(tags(&view.children), vec!["Icon"]);
    assert_eq!(tags(&view.children[0].children), vec!["Image"]);
}

// =============================================================================
// PROP THREADING
// =============================================================================

#[test]
fn test_usage_children_spliced_into_layout() {
    let layout = make::element("Frame")
        .with_child(make::child_expr(make::path("this.props.children")))
        .into_expr();
    let repo = with_widgets(vec![
        ("src/Layout", component_file("Layout", layout)),
        (
            "src/Home",
            vec![
                import_component(),
                make::import_named("./widgets", &["Title"]).into(),
                make::import_named("./Layout", &["Layout"]).into(),
                class_component("Home", make::element("Layout").with_child(make::element("Title")).into_expr()).into(),
            ],
        ),
    ]);
    let tree = tree_of(&repo, "Home");
    let layout = &tree.roots[0];
    assert_eq!(layout.tag, "Layout");
    assert_eq!(tags(&layout.children), vec!["Frame"]);
    assert_eq!(tags(&layout.children[0].children), vec!["Title"]);
}

#[test]
fn test_jsx_prop_threaded_through_child() {
    let shell = make::element("Frame")
        .with_child(make::child_expr(make::path("this.props.header")))
        .into_expr();
    let repo = with_widgets(vec![
        ("src/Shell", component_file("Shell", shell)),
        (
            "src/Home",
            vec![
                import_component(),
                make::import_named("./widgets", &["Title"]).into(),
                make::import_named("./Shell", &["Shell"]).into(),
                class_component(
                    "Home",
                    make::element("Shell")
                        .with_attr("header", make::attr_expr(make::element("Title").into_expr()))
                        .into_expr(),
                )
                .into(),
            ],
        ),
    ]);
    let tree = tree_of(&repo, "Home");
    let shell = &tree.roots[0];
    let Some(Some(AttrValue::Nodes(header))) = shell.attribute("header") else {
        panic!("header should hold nodes");
    };
    assert_eq!(tags(header), vec!["Title"]);
    assert_eq!(tags(&shell.children[0].children), vec!["Title"]);
}

#[test]
fn test_function_component_props_parameter() {
    let card = make::arrow(
        make::element("Frame")
            .with_child(make::child_expr(make::path("props.children")))
            .into_expr(),
    );
    let repo = with_widgets(vec![(
        "src/Page",
        vec![
            import_component(),
            make::import_named("./widgets", &["Icon"]).into(),
            make::const_decl("Card", card).into(),
            class_component("Page", make::element("Card").with_child(make::element("Icon")).into_expr()).into(),
        ],
    )]);
    let card = &tree_of(&repo, "Page").roots[0];
    assert_eq!(tags(&card.children), vec!["Frame"]);
    assert_eq!(tags(&card.children[0].children), vec!["Icon"]);
}

// =============================================================================
// ATTRIBUTES
// =============================================================================

#[rstest]
#[case::number(make::num("3"), Some(AttrValue::Literal("3".to_string())))]
#[case::boolean(make::boolean(true), Some(AttrValue::Literal("true".to_string())))]
#[case::string_expr(make::string("hi"), Some(AttrValue::Literal("hi".to_string())))]
#[case::property_path(make::path("styles.card"), Some(AttrValue::Source("styles.card".to_string())))]
#[case::identifier(make::ident("value"), Some(AttrValue::Source("value".to_string())))]
#[case::array(make::array(vec![make::num("1"), make::num("2")]), Some(AttrValue::Source("[1, 2]".to_string())))]
#[case::callback(make::arrow(make::null()), None)]
fn test_attribute_classification(#[case] value: Expr, #[case] expected: Option<AttrValue>) {
    let repo = foo_rendering(make::element("Bar").with_attr("a", make::attr_expr(value)).into_expr());
    let bar = &tree_of(&repo, "Foo").roots[0];
    assert_eq!(bar.attribute("a"), expected.as_ref().map(Some));
}

/// `Foo` rendering `render` next to `const handler = () => 42`.
fn foo_with_handler(render: Expr) -> Repository {
    react_workspace(vec![(
        "src/Foo",
        vec![
            import_component(),
            make::const_decl("handler", make::arrow(make::num("42"))).into(),
            class_component("Foo", render).into(),
        ],
    )])
}

#[test]
fn test_handler_attribute_kept_as_source() {
    let repo = foo_with_handler(
        make::element("Bar")
            .with_attr("onPress", make::attr_expr(make::ident("handler")))
            .into_expr(),
    );
    let tree = tree_of(&repo, "Foo");
    let bar = &tree.roots[0];
    assert_eq!(bar.attribute("onPress"), Some(Some(&AttrValue::Source("handler".to_string()))));
    assert_eq!(tree.to_string(), "<Bar onPress={handler} />\n");
}

#[test]
fn test_handler_child_renders_nothing() {
    let repo = foo_with_handler(
        make::element("View")
            .with_child(make::child_expr(make::ident("handler")))
            .into_expr(),
    );
    let view = &tree_of(&repo, "Foo").roots[0];
    assert!(view.children.is_empty());
}

#[test]
fn test_spread_attribute_skipped() {
    let repo = foo_rendering(
        make::element("Bar")
            .with_spread(make::ident("rest"))
            .with_attr("kept", make::attr_str("yes"))
            .into_expr(),
    );
    let bar = &tree_of(&repo, "Foo").roots[0];
    assert_eq!(bar.attributes.len(), 1);
    assert!(bar.attribute("kept").is_some());
}

// =============================================================================
// GUARDS AND SHAPES
// =============================================================================

#[test]
fn test_recursive_component_not_reexpanded() {
    let repo = react_workspace(vec![(
        "src/Tree",
        component_file(
            "Tree",
            make::element("Node").with_child(make::element("Tree")).into_expr(),
        ),
    )]);
    let tree = tree_of(&repo, "Tree");
    let node = &tree.roots[0];
    assert_eq!(tags(&node.children), vec!["Tree"]);
    assert!(node.children[0].children.is_empty());
}

#[test]
fn test_memo_wrapped_function_component() {
    let repo = react_workspace(vec![(
        "src/Badge",
        vec![make::const_decl(
            "Badge",
            make::call(make::ident("memo"), vec![make::arrow(make::element("Pill").into_expr())]),
        )
        .exported()
        .into()],
    )]);
    assert_eq!(tags(&tree_of(&repo, "Badge").roots), vec!["Pill"]);
}

#[test]
fn test_object_binding_renders_through_class() {
    let registry = make::object(vec![make::getter(
        "Panel",
        vec![make::ret(make::require_member("./Panel", "Panel"))],
    )]);
    let repo = react_workspace(vec![
        ("src/ui/Panel", component_file("Panel", make::element("Surface").into_expr())),
        ("src/ui/index", vec![make::const_decl("ui", registry).exported().into()]),
        (
            "src/App",
            vec![
                make::import_named("./ui", &["ui"]).into(),
                make::destructure(&["Panel"], make::ident("ui")).into(),
                function_component("App", make::element("Panel").into_expr()),
            ],
        ),
    ]);

    let binding = assert_declared(&repo, "src.Panel");
    assert_eq!(tags(&repo.build_view_tree(binding.id).roots), vec!["Surface"]);

    let app = tree_of(&repo, "App");
    let panel = &app.roots[0];
    assert_eq!(panel.declaration, Some(assert_declared(&repo, "src/ui.Panel").id));
    assert_eq!(tags(&panel.children), vec!["Surface"]);
}

#[test]
fn test_tree_display() {
    let repo = with_widgets(vec![(
        "src/Card",
        importing_widgets(
            "Card",
            make::element("View")
                .with_attr("style", make::attr_expr(make::path("styles.card")))
                .with_flag("raised")
                .with_child(make::element("Icon"))
                .into_expr(),
        ),
    )]);
    let expected = "\
<View style={styles.card} raised>
  <Icon>
    <Image />
  </Icon>
</View>
";
    assert_eq!(tree_of(&repo, "Card").to_string(), expected);
}
