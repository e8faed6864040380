//! Constructors for syntax trees.
//!
//! Front ends that build trees in-process, and the test suites, use these
//! helpers instead of spelling out nested struct literals.
//!
//! ```
//! use vista::syntax::make;
//!
//! let class = make::class("Foo")
//!     .exported()
//!     .extends("Component")
//!     .render(make::element("View").into_expr());
//! let unit = make::unit(vec![class.into()]);
//! assert_eq!(unit.items.len(), 1);
//! ```

use std::sync::Arc;

use super::expr::{
    Block, Expr, Function, FunctionBody, JsxAttr, JsxAttrValue, JsxChild, JsxElement, ObjectProp, Stmt,
};
use super::tree::{
    BindingProp, ClassDecl, ClassMember, ExportAssignment, ImportDecl, ImportSpecifier, InterfaceDecl, Item,
    Modifiers, ModuleDecl, Pattern, SourceUnit, TypeAliasDecl, TypeExpr, VarKind, VariableDeclarator,
    VariableStatement,
};

pub fn unit(items: Vec<Item>) -> SourceUnit {
    SourceUnit::new(items)
}

// ============================================================================
// Expressions
// ============================================================================

pub fn ident(name: &str) -> Expr {
    Expr::Ident { name: name.to_string() }
}

pub fn this() -> Expr {
    Expr::This
}

pub fn member(object: Expr, property: &str) -> Expr {
    Expr::Member {
        object: Box::new(object),
        property: property.to_string(),
    }
}

/// `a.b.c` as a member chain; a leading `this` segment becomes [`Expr::This`].
pub fn path(dotted: &str) -> Expr {
    let mut segments = dotted.split('.');
    let head = match segments.next() {
        Some("this") => Expr::This,
        Some(first) => ident(first),
        None => ident(""),
    };
    segments.fold(head, member)
}

pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
    Expr::Call {
        callee: Box::new(callee),
        args,
    }
}

/// `require("specifier").name`
pub fn require_member(specifier: &str, name: &str) -> Expr {
    member(call(ident("require"), vec![string(specifier)]), name)
}

pub fn string(value: &str) -> Expr {
    Expr::Str { value: value.to_string() }
}

pub fn num(value: &str) -> Expr {
    Expr::Num { value: value.to_string() }
}

pub fn boolean(value: bool) -> Expr {
    Expr::Bool { value }
}

pub fn null() -> Expr {
    Expr::Null
}

pub fn array(elements: Vec<Expr>) -> Expr {
    Expr::Array { elements }
}

pub fn object(props: Vec<ObjectProp>) -> Expr {
    Expr::Object { props }
}

pub fn key_value(key: &str, value: Expr) -> ObjectProp {
    ObjectProp::KeyValue {
        key: key.to_string(),
        value,
    }
}

pub fn shorthand(name: &str) -> ObjectProp {
    ObjectProp::Shorthand { name: name.to_string() }
}

pub fn getter(key: &str, stmts: Vec<Stmt>) -> ObjectProp {
    ObjectProp::Getter {
        key: key.to_string(),
        body: block(stmts),
    }
}

/// `() => expr`
pub fn arrow(body: Expr) -> Expr {
    Expr::Function(Box::new(Function {
        is_arrow: true,
        params: Vec::new(),
        body: FunctionBody::Expr { expr: Box::new(body) },
    }))
}

/// `() => { stmts }`
pub fn arrow_block(stmts: Vec<Stmt>) -> Expr {
    Expr::Function(Box::new(Function {
        is_arrow: true,
        params: Vec::new(),
        body: FunctionBody::Block(block(stmts)),
    }))
}

pub fn paren(expr: Expr) -> Expr {
    Expr::Paren { expr: Box::new(expr) }
}

pub fn conditional(test: Expr, consequent: Expr, alternate: Expr) -> Expr {
    Expr::Conditional {
        test: Box::new(test),
        consequent: Box::new(consequent),
        alternate: Box::new(alternate),
    }
}

pub fn binary(op: &str, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op: op.to_string(),
        left: Box::new(left),
        right: Box::new(right),
    }
}

/// `left && right`
pub fn and(left: Expr, right: Expr) -> Expr {
    binary("&&", left, right)
}

pub fn fragment(children: Vec<JsxChild>) -> Expr {
    Expr::Fragment { children }
}

pub fn other(text: &str) -> Expr {
    Expr::Other { text: text.to_string() }
}

// ============================================================================
// Statements
// ============================================================================

pub fn block(stmts: Vec<Stmt>) -> Block {
    Block { stmts }
}

pub fn ret(expr: Expr) -> Stmt {
    Stmt::Return { expr: Some(expr) }
}

/// `const name = init;` as a statement inside a block.
pub fn local(name: &str, init: Expr) -> Stmt {
    Stmt::Variable(const_decl(name, init))
}

pub fn expr_stmt(expr: Expr) -> Stmt {
    Stmt::Expr { expr }
}

// ============================================================================
// JSX
// ============================================================================

/// An element with no attributes and no children.
pub fn element(name: &str) -> JsxElement {
    JsxElement {
        name: name.to_string(),
        attributes: Vec::new(),
        children: Vec::new(),
    }
}

pub fn attr_str(value: &str) -> JsxAttrValue {
    JsxAttrValue::Str { value: value.to_string() }
}

pub fn attr_expr(expr: Expr) -> JsxAttrValue {
    JsxAttrValue::Expr { expr: Some(expr) }
}

pub fn attr_element(element: JsxElement) -> JsxAttrValue {
    JsxAttrValue::Element(Box::new(element))
}

pub fn text(text: &str) -> JsxChild {
    JsxChild::Text { text: text.to_string() }
}

pub fn child_expr(expr: Expr) -> JsxChild {
    JsxChild::Expr { expr: Some(expr) }
}

impl JsxElement {
    pub fn with_attr(mut self, name: &str, value: JsxAttrValue) -> Self {
        self.attributes.push(JsxAttr::Attr {
            name: name.to_string(),
            value: Some(value),
        });
        self
    }

    /// A valueless attribute (`<Input disabled />`).
    pub fn with_flag(mut self, name: &str) -> Self {
        self.attributes.push(JsxAttr::Attr {
            name: name.to_string(),
            value: None,
        });
        self
    }

    pub fn with_spread(mut self, expr: Expr) -> Self {
        self.attributes.push(JsxAttr::Spread { expr });
        self
    }

    pub fn with_child(mut self, child: impl Into<JsxChild>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn into_expr(self) -> Expr {
        Expr::Jsx(Box::new(self))
    }
}

impl From<JsxElement> for JsxChild {
    fn from(element: JsxElement) -> Self {
        JsxChild::Element(element)
    }
}

impl From<JsxElement> for Expr {
    fn from(element: JsxElement) -> Self {
        element.into_expr()
    }
}

// ============================================================================
// Types
// ============================================================================

pub fn type_ref(name: &str) -> TypeExpr {
    TypeExpr::Reference {
        name: name.to_string(),
        args: Vec::new(),
    }
}

pub fn type_ref_with_args(name: &str, args: Vec<TypeExpr>) -> TypeExpr {
    TypeExpr::Reference {
        name: name.to_string(),
        args,
    }
}

pub fn type_query(expr: &str) -> TypeExpr {
    TypeExpr::Query { expr: expr.to_string() }
}

pub fn intersection(types: Vec<TypeExpr>) -> TypeExpr {
    TypeExpr::Intersection { types }
}

pub fn union(types: Vec<TypeExpr>) -> TypeExpr {
    TypeExpr::Union { types }
}

// ============================================================================
// Declarations
// ============================================================================

pub fn class(name: &str) -> ClassDecl {
    ClassDecl {
        name: Some(name.to_string()),
        ..ClassDecl::default()
    }
}

/// `export default class { ... }`
pub fn anonymous_class() -> ClassDecl {
    ClassDecl::default().default_export()
}

impl ClassDecl {
    pub fn exported(mut self) -> Self {
        self.modifiers.export = true;
        self
    }

    pub fn default_export(mut self) -> Self {
        self.modifiers.export = true;
        self.modifiers.default = true;
        self
    }

    pub fn declared(mut self) -> Self {
        self.modifiers.declare = true;
        self
    }

    pub fn extends(mut self, name: &str) -> Self {
        self.extends.push(name.to_string());
        self
    }

    pub fn implements(mut self, name: &str) -> Self {
        self.implements.push(name.to_string());
        self
    }

    pub fn method(mut self, name: &str, stmts: Vec<Stmt>) -> Self {
        self.members.push(ClassMember::Method {
            name: name.to_string(),
            is_static: false,
            body: Some(block(stmts)),
        });
        self
    }

    /// A `render()` method returning `expr`.
    pub fn render(self, expr: Expr) -> Self {
        self.method("render", vec![ret(expr)])
    }

    pub fn property(mut self, name: &str, value: Expr) -> Self {
        self.members.push(ClassMember::Property {
            name: name.to_string(),
            is_static: false,
            value: Some(value),
        });
        self
    }
}

pub fn interface(name: &str) -> InterfaceDecl {
    InterfaceDecl {
        name: Some(name.to_string()),
        ..InterfaceDecl::default()
    }
}

impl InterfaceDecl {
    pub fn exported(mut self) -> Self {
        self.modifiers.export = true;
        self
    }

    pub fn extends(mut self, name: &str) -> Self {
        self.extends.push(name.to_string());
        self
    }
}

pub fn type_alias(name: &str, ty: TypeExpr) -> TypeAliasDecl {
    TypeAliasDecl {
        name: name.to_string(),
        modifiers: Modifiers::default(),
        ty,
        span: None,
    }
}

impl TypeAliasDecl {
    pub fn exported(mut self) -> Self {
        self.modifiers.export = true;
        self
    }
}

/// `const name = init;`
pub fn const_decl(name: &str, init: Expr) -> VariableStatement {
    variable(Pattern::Ident { name: name.to_string() }, None, Some(init))
}

/// `declare const name: ty;`
pub fn typed_const(name: &str, ty: TypeExpr) -> VariableStatement {
    variable(Pattern::Ident { name: name.to_string() }, Some(ty), None)
}

/// `const { a, b } = init;`
pub fn destructure(keys: &[&str], init: Expr) -> VariableStatement {
    let props = keys
        .iter()
        .map(|key| BindingProp {
            key: key.to_string(),
            binding: None,
        })
        .collect();
    variable(Pattern::Object { props }, None, Some(init))
}

fn variable(pattern: Pattern, ty: Option<TypeExpr>, init: Option<Expr>) -> VariableStatement {
    VariableStatement {
        modifiers: Modifiers::default(),
        declaration_kind: VarKind::Const,
        declarators: vec![Arc::new(VariableDeclarator {
            pattern,
            ty,
            init,
            span: None,
        })],
    }
}

impl VariableStatement {
    pub fn exported(mut self) -> Self {
        self.modifiers.export = true;
        self
    }

    pub fn declared(mut self) -> Self {
        self.modifiers.declare = true;
        self
    }
}

/// `namespace name { items }`
pub fn namespace(name: &str, body: Vec<Item>) -> ModuleDecl {
    ModuleDecl {
        name: name.to_string(),
        quoted: false,
        modifiers: Modifiers::default(),
        body,
    }
}

/// `declare module "name" { items }`
pub fn ambient_module(name: &str, body: Vec<Item>) -> ModuleDecl {
    ModuleDecl {
        name: name.to_string(),
        quoted: true,
        modifiers: Modifiers {
            declare: true,
            ..Modifiers::default()
        },
        body,
    }
}

impl ModuleDecl {
    pub fn exported(mut self) -> Self {
        self.modifiers.export = true;
        self
    }
}

// ============================================================================
// Imports and exports
// ============================================================================

/// `import { a, b } from "specifier"`
pub fn import_named(specifier: &str, names: &[&str]) -> ImportDecl {
    ImportDecl {
        specifier: specifier.to_string(),
        named: names
            .iter()
            .map(|name| ImportSpecifier {
                imported: name.to_string(),
                local: None,
            })
            .collect(),
        ..ImportDecl::default()
    }
}

/// `import { imported as local } from "specifier"`
pub fn import_aliased(specifier: &str, imported: &str, local: &str) -> ImportDecl {
    ImportDecl {
        specifier: specifier.to_string(),
        named: vec![ImportSpecifier {
            imported: imported.to_string(),
            local: Some(local.to_string()),
        }],
        ..ImportDecl::default()
    }
}

/// `import local from "specifier"`
pub fn import_default(specifier: &str, local: &str) -> ImportDecl {
    ImportDecl {
        specifier: specifier.to_string(),
        default: Some(local.to_string()),
        ..ImportDecl::default()
    }
}

/// `import * as local from "specifier"`
pub fn import_namespace(specifier: &str, local: &str) -> ImportDecl {
    ImportDecl {
        specifier: specifier.to_string(),
        namespace: Some(local.to_string()),
        ..ImportDecl::default()
    }
}

/// `export default name;`
pub fn export_default(name: &str) -> ExportAssignment {
    ExportAssignment {
        name: name.to_string(),
        is_export_equals: false,
    }
}

/// `export = name;`
pub fn export_equals(name: &str) -> ExportAssignment {
    ExportAssignment {
        name: name.to_string(),
        is_export_equals: true,
    }
}

// ============================================================================
// Item conversions
// ============================================================================

impl From<ClassDecl> for Item {
    fn from(decl: ClassDecl) -> Self {
        Item::Class(Arc::new(decl))
    }
}

impl From<InterfaceDecl> for Item {
    fn from(decl: InterfaceDecl) -> Self {
        Item::Interface(Arc::new(decl))
    }
}

impl From<TypeAliasDecl> for Item {
    fn from(decl: TypeAliasDecl) -> Self {
        Item::TypeAlias(Arc::new(decl))
    }
}

impl From<VariableStatement> for Item {
    fn from(stmt: VariableStatement) -> Self {
        Item::Variable(stmt)
    }
}

impl From<ModuleDecl> for Item {
    fn from(decl: ModuleDecl) -> Self {
        Item::Module(decl)
    }
}

impl From<ImportDecl> for Item {
    fn from(decl: ImportDecl) -> Self {
        Item::Import(decl)
    }
}

impl From<ExportAssignment> for Item {
    fn from(assignment: ExportAssignment) -> Self {
        Item::ExportAssignment(assignment)
    }
}
