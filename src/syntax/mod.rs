//! Syntax trees consumed by the analyzer.
//!
//! - [`tree`] - declaration-level items (classes, interfaces, variables, modules)
//! - [`expr`] - expressions, statements and JSX
//! - [`make`] - tree constructors
//! - [`SyntaxProvider`] - how trees reach the loader

pub mod expr;
pub mod make;
mod print;
mod provider;
pub mod tree;

pub use expr::{
    Block, Expr, Function, FunctionBody, JsxAttr, JsxAttrValue, JsxChild, JsxElement, ObjectProp, Stmt,
};
pub use provider::{JsonTreeProvider, MemoryProvider, SyntaxProvider};
pub use tree::{
    BindingProp, ClassDecl, ClassMember, ExportAssignment, ImportDecl, ImportSpecifier, InterfaceDecl, Item,
    Modifiers, ModuleDecl, Pattern, SourceUnit, TypeAliasDecl, TypeExpr, VarKind, VariableDeclarator,
    VariableStatement,
};
