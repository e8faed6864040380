//! Declarations and their base references.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;
use text_size::TextRange;

use super::scope::Registration;
use crate::base::{DeclId, FileId, NamespaceId};
use crate::syntax::{ClassDecl, InterfaceDecl, TypeAliasDecl, VariableDeclarator};

// ============================================================================
// KINDS
// ============================================================================

/// What sort of named entity a declaration is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeclKind {
    Class,
    Interface,
    TypeAlias,
    Variable,
    /// One name introduced by `const { A } = obj`.
    ObjectBinding,
}

impl DeclKind {
    /// Every kind, in default lookup preference.
    pub const ALL: [DeclKind; 5] = [
        DeclKind::Class,
        DeclKind::Interface,
        DeclKind::TypeAlias,
        DeclKind::Variable,
        DeclKind::ObjectBinding,
    ];

    /// Kinds a JSX tag or a component reference can name.
    pub const COMPONENTS: [DeclKind; 3] = [DeclKind::Class, DeclKind::Variable, DeclKind::ObjectBinding];

    pub fn as_str(self) -> &'static str {
        match self {
            DeclKind::Class => "class",
            DeclKind::Interface => "interface",
            DeclKind::TypeAlias => "type alias",
            DeclKind::Variable => "variable",
            DeclKind::ObjectBinding => "object binding",
        }
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a declaration refers to its base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseKind {
    /// `class A extends B`, `interface I extends J`
    Extends,
    /// `class A implements I`
    Implements,
    /// `type T = U`, `const x: U`
    TypeReference,
    /// `typeof X` inside a type annotation
    TypeQuery,
    /// The object a destructuring binding is taken from.
    BindingSource,
}

impl BaseKind {
    /// Declaration kinds a base of this sort may resolve to, in preference order.
    pub fn accepted_targets(self, owner: DeclKind) -> &'static [DeclKind] {
        use DeclKind::*;
        match (owner, self) {
            (Class, BaseKind::Extends) => &[Class, Variable],
            (Class, BaseKind::Implements) => &[Interface, TypeAlias],
            (Interface, BaseKind::Extends) => &[Interface, TypeAlias, Class],
            (_, BaseKind::TypeReference) => &[Interface, TypeAlias, Class],
            (_, BaseKind::TypeQuery) => &[Class, Variable, ObjectBinding],
            (_, BaseKind::BindingSource) => &[Class],
            (_, BaseKind::Extends | BaseKind::Implements) => &[],
        }
    }
}

/// A named base of a declaration and what it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseRef {
    /// Name as written, possibly dotted (`React.Component`).
    pub name: SmolStr,
    pub kind: BaseKind,
    pub resolved: Option<DeclId>,
}

impl BaseRef {
    pub fn new(name: impl Into<SmolStr>, kind: BaseKind) -> Self {
        Self {
            name: name.into(),
            kind,
            resolved: None,
        }
    }
}

// ============================================================================
// DECLARATION
// ============================================================================

/// The syntax a declaration was collected from.
#[derive(Debug, Clone)]
pub enum DeclSyntax {
    Class(Arc<ClassDecl>),
    Interface(Arc<InterfaceDecl>),
    TypeAlias(Arc<TypeAliasDecl>),
    Variable(Arc<VariableDeclarator>),
    /// The whole destructuring declarator and the property key taken from it.
    ObjectBinding {
        declarator: Arc<VariableDeclarator>,
        key: SmolStr,
    },
}

/// A named, typed entity collected from a source file.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub id: DeclId,
    pub name: SmolStr,
    pub kind: DeclKind,
    pub file: FileId,
    /// Innermost enclosing namespace or module block.
    pub namespace: Option<NamespaceId>,
    /// Name qualified by enclosing namespaces within the file (`NS.Name`).
    pub qualified_name: SmolStr,
    pub is_export: bool,
    pub is_default_export: bool,
    pub bases: Vec<BaseRef>,
    /// Declarations this one extends, implements or references.
    pub dependencies: Vec<DeclId>,
    /// Declarations that depend on this one.
    pub dependents: Vec<DeclId>,
    pub tags: BTreeSet<SmolStr>,
    /// Cleared when a required base could not be resolved.
    pub valid: bool,
    pub span: Option<TextRange>,
    pub syntax: DeclSyntax,
    pub(crate) registrations: Vec<Registration>,
}

impl Declaration {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// True when every base resolved.
    pub fn is_fully_resolved(&self) -> bool {
        self.bases.iter().all(|b| b.resolved.is_some())
    }

    pub fn class(&self) -> Option<&ClassDecl> {
        match &self.syntax {
            DeclSyntax::Class(class) => Some(class),
            _ => None,
        }
    }

    /// The declarator of a variable or object binding.
    pub fn declarator(&self) -> Option<&VariableDeclarator> {
        match &self.syntax {
            DeclSyntax::Variable(declarator) | DeclSyntax::ObjectBinding { declarator, .. } => Some(declarator),
            _ => None,
        }
    }

    /// The resolved base of a given kind, first match.
    pub fn resolved_base(&self, kind: BaseKind) -> Option<DeclId> {
        self.bases.iter().filter(|b| b.kind == kind).find_map(|b| b.resolved)
    }

    pub(crate) fn add_dependency(&mut self, target: DeclId) -> bool {
        if self.dependencies.contains(&target) {
            return false;
        }
        self.dependencies.push(target);
        true
    }

    pub(crate) fn add_dependent(&mut self, source: DeclId) {
        if !self.dependents.contains(&source) {
            self.dependents.push(source);
        }
    }

    pub(crate) fn record(&mut self, registration: Registration) {
        if !self.registrations.contains(&registration) {
            self.registrations.push(registration);
        }
    }
}
