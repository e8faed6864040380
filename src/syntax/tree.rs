//! Declaration-level syntax: the items of a source unit.
//!
//! Trees are produced by an external TypeScript/TSX front end and handed to
//! the analyzer through a [`SyntaxProvider`](super::SyntaxProvider). Only the
//! shapes the analyzer consumes are modelled; anything else collapses into an
//! `Other` variant so that unknown input never fails deserialization.
//!
//! Declaration nodes sit behind `Arc` so that declarations in the repository
//! can keep a handle on their syntax without copying the subtree.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use text_size::TextRange;

use super::expr::{Block, Expr, Function};

// ============================================================================
// SourceUnit
// ============================================================================

/// The parsed contents of one source file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceUnit {
    #[serde(default)]
    pub items: Vec<Item>,
}

impl SourceUnit {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Iterate over the import declarations at the top level.
    pub fn imports(&self) -> impl Iterator<Item = &ImportDecl> {
        self.items.iter().filter_map(|item| match item {
            Item::Import(import) => Some(import),
            _ => None,
        })
    }
}

/// A top-level or block-level statement that may declare something.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Item {
    Import(ImportDecl),
    Class(Arc<ClassDecl>),
    Interface(Arc<InterfaceDecl>),
    TypeAlias(Arc<TypeAliasDecl>),
    Variable(VariableStatement),
    Module(ModuleDecl),
    ExportAssignment(ExportAssignment),
    /// Anything else (functions, enums, expression statements...).
    #[serde(other)]
    Other,
}

/// Export-related modifiers shared by declarations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Modifiers {
    pub export: bool,
    pub default: bool,
    pub declare: bool,
}

// ============================================================================
// Imports and exports
// ============================================================================

/// `import D, { A, B as C } from "x"` / `import * as N from "x"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDecl {
    pub specifier: String,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub named: Vec<ImportSpecifier>,
    #[serde(default)]
    pub type_only: bool,
}

/// One `{ imported as local }` entry of a named import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSpecifier {
    pub imported: String,
    #[serde(default)]
    pub local: Option<String>,
}

impl ImportSpecifier {
    /// The name the import is bound to inside the importing file.
    pub fn local_name(&self) -> &str {
        self.local.as_deref().unwrap_or(&self.imported)
    }
}

/// `export default Name;` or `export = Name;`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportAssignment {
    pub name: String,
    #[serde(default)]
    pub is_export_equals: bool,
}

// ============================================================================
// Classes, interfaces, type aliases
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDecl {
    /// `None` for `export default class { ... }`.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Heritage `extends` clause entries, as written (`React.Component`).
    #[serde(default)]
    pub extends: Vec<String>,
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default)]
    pub members: Vec<ClassMember>,
    #[serde(default)]
    pub span: Option<TextRange>,
}

impl ClassDecl {
    /// Find an instance or static member by name.
    pub fn member(&self, name: &str) -> Option<&ClassMember> {
        self.members.iter().find(|m| m.name() == Some(name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ClassMember {
    Method {
        name: String,
        #[serde(default, rename = "isStatic")]
        is_static: bool,
        #[serde(default)]
        body: Option<Block>,
    },
    /// A field; arrow-function fields (`renderRow = () => ...`) carry the function here.
    Property {
        name: String,
        #[serde(default, rename = "isStatic")]
        is_static: bool,
        #[serde(default)]
        value: Option<Expr>,
    },
    Getter {
        name: String,
        #[serde(default)]
        body: Option<Block>,
    },
    #[serde(other)]
    Other,
}

impl ClassMember {
    pub fn name(&self) -> Option<&str> {
        match self {
            ClassMember::Method { name, .. }
            | ClassMember::Property { name, .. }
            | ClassMember::Getter { name, .. } => Some(name),
            ClassMember::Other => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceDecl {
    pub name: Option<String>,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub extends: Vec<String>,
    #[serde(default)]
    pub span: Option<TextRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAliasDecl {
    pub name: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    #[serde(default)]
    pub span: Option<TextRange>,
}

/// A type annotation, reduced to the forms that carry references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeExpr {
    /// `Foo`, `NS.Foo`, `Foo<Bar>`
    Reference {
        name: String,
        #[serde(default)]
        args: Vec<TypeExpr>,
    },
    /// `typeof expr`
    Query { expr: String },
    Intersection { types: Vec<TypeExpr> },
    Union { types: Vec<TypeExpr> },
    #[serde(other)]
    Other,
}

// ============================================================================
// Variables
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VarKind {
    #[default]
    Const,
    Let,
    Var,
}

/// `export const a = 1, b: T = c;`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableStatement {
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub declaration_kind: VarKind,
    pub declarators: Vec<Arc<VariableDeclarator>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDeclarator {
    pub pattern: Pattern,
    #[serde(default, rename = "type")]
    pub ty: Option<TypeExpr>,
    #[serde(default)]
    pub init: Option<Expr>,
    #[serde(default)]
    pub span: Option<TextRange>,
}

impl VariableDeclarator {
    /// The bound name for a simple `const x = ...` declarator.
    pub fn ident(&self) -> Option<&str> {
        match &self.pattern {
            Pattern::Ident { name } => Some(name),
            _ => None,
        }
    }

    /// The initializer as a function, when it is one.
    pub fn init_function(&self) -> Option<&Function> {
        match self.init.as_ref()? {
            Expr::Function(function) => Some(function),
            _ => None,
        }
    }
}

/// Binding pattern on the left of a declarator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Pattern {
    Ident {
        name: String,
    },
    /// `{ key, key: binding }`
    Object {
        props: Vec<BindingProp>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingProp {
    pub key: String,
    #[serde(default)]
    pub binding: Option<String>,
}

impl BindingProp {
    pub fn local_name(&self) -> &str {
        self.binding.as_deref().unwrap_or(&self.key)
    }
}

// ============================================================================
// Namespaces and ambient modules
// ============================================================================

/// `namespace A.B { ... }` or `declare module "pkg" { ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDecl {
    pub name: String,
    /// The name was written as a string literal (`declare module "x"`).
    #[serde(default)]
    pub quoted: bool,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub body: Vec<Item>,
}
