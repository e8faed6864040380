//! Locating the JSX a component renders.
//!
//! A template is the expression returned by a component's render entry,
//! split into roots. Class components render from a method (or a
//! function-valued field); function components are variables initialized
//! with a function, possibly wrapped in a call (`memo(() => ...)`). Object
//! bindings render through the class they were recognized as.

use indexmap::IndexMap;

use crate::base::DeclId;
use crate::hir::{DeclKind, Repository};
use crate::syntax::{Block, ClassDecl, ClassMember, Expr, FunctionBody, JsxChild, JsxElement, ObjectProp, Stmt};

/// A body that produces the returned expression.
#[derive(Debug, Clone, Copy)]
enum Body<'a> {
    Block(&'a Block),
    Expr(&'a Expr),
}

/// One thing a template may return.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Root<'a> {
    Element(&'a JsxElement),
    /// A reference or call that may evaluate to JSX (`content`, `this.renderRow()`).
    Expr(&'a Expr),
}

#[derive(Debug, Clone)]
pub(crate) struct Template<'a> {
    /// Declaration whose file resolves the names used in the template.
    pub owner: DeclId,
    pub roots: Vec<Root<'a>>,
    /// `const name = expr` statements at the top of the body.
    pub locals: IndexMap<&'a str, &'a Expr>,
}

/// The render template of a component declaration.
pub(crate) fn component_template<'a>(repo: &'a Repository, id: DeclId, entry: &str) -> Option<Template<'a>> {
    let id = repo.unwrap_binding(id);
    let decl = repo.declaration(id);
    let body = match decl.kind {
        DeclKind::Class => class_member_body(decl.class()?, entry),
        DeclKind::Variable => function_body(decl.declarator()?.init.as_ref()?),
        _ => None,
    }?;
    Some(template_from(id, body))
}

/// The template of a helper member (`this.renderHeader`, `Helpers.row`).
pub(crate) fn member_template<'a>(repo: &'a Repository, id: DeclId, member: &str) -> Option<Template<'a>> {
    let id = repo.unwrap_binding(id);
    let decl = repo.declaration(id);
    let body = match decl.kind {
        DeclKind::Class => class_member_body(decl.class()?, member),
        DeclKind::Variable => match decl.declarator()?.init.as_ref()?.unparen() {
            Expr::Object { props } => object_member_body(props, member),
            _ => None,
        },
        _ => None,
    }?;
    Some(template_from(id, body))
}

fn class_member_body<'a>(class: &'a ClassDecl, name: &str) -> Option<Body<'a>> {
    match class.member(name)? {
        ClassMember::Method { body: Some(body), .. } | ClassMember::Getter { body: Some(body), .. } => {
            Some(Body::Block(body))
        }
        ClassMember::Property { value: Some(value), .. } => function_body(value),
        _ => None,
    }
}

fn object_member_body<'a>(props: &'a [ObjectProp], name: &str) -> Option<Body<'a>> {
    props.iter().find_map(|prop| match prop {
        ObjectProp::KeyValue { key, value } if key == name => function_body(value),
        ObjectProp::Method { key, function } if key == name => Some(body_of(&function.body)),
        ObjectProp::Getter { key, body } if key == name => Some(Body::Block(body)),
        _ => None,
    })
}

/// The body of a function expression, looking through wrapping calls.
fn function_body(expr: &Expr) -> Option<Body<'_>> {
    match expr.unparen() {
        Expr::Function(function) => Some(body_of(&function.body)),
        Expr::Call { args, .. } => args.iter().find_map(function_body),
        _ => None,
    }
}

fn body_of(body: &FunctionBody) -> Body<'_> {
    match body {
        FunctionBody::Block(block) => Body::Block(block),
        FunctionBody::Expr { expr } => Body::Expr(expr),
    }
}

fn template_from(owner: DeclId, body: Body<'_>) -> Template<'_> {
    let (returned, locals) = match body {
        Body::Block(block) => (block.first_return(), block_locals(block)),
        Body::Expr(expr) => (Some(expr), IndexMap::new()),
    };
    Template {
        owner,
        roots: returned.map(extract_roots).unwrap_or_default(),
        locals,
    }
}

fn block_locals(block: &Block) -> IndexMap<&str, &Expr> {
    let mut locals = IndexMap::new();
    for stmt in &block.stmts {
        let Stmt::Variable(var) = stmt else {
            continue;
        };
        for declarator in &var.declarators {
            if let (Some(name), Some(init)) = (declarator.ident(), declarator.init.as_ref()) {
                locals.insert(name, init);
            }
        }
    }
    locals
}

/// Splits a returned expression into roots.
///
/// A conditional contributes both branches, a logical expression its right
/// operand, and a fragment its children.
pub(crate) fn extract_roots(expr: &Expr) -> Vec<Root<'_>> {
    match expr {
        Expr::Paren { expr } => extract_roots(expr),
        Expr::Jsx(element) => vec![Root::Element(element)],
        Expr::Conditional {
            consequent, alternate, ..
        } => {
            let mut roots = extract_roots(consequent);
            roots.extend(extract_roots(alternate));
            roots
        }
        Expr::Binary { op, right, .. } if is_logical(op) => extract_roots(right),
        Expr::Fragment { children } => fragment_roots(children),
        Expr::Ident { .. } | Expr::Member { .. } | Expr::Call { .. } => vec![Root::Expr(expr)],
        _ => Vec::new(),
    }
}

fn fragment_roots(children: &[JsxChild]) -> Vec<Root<'_>> {
    let mut roots = Vec::new();
    for child in children {
        match child {
            JsxChild::Element(element) => roots.push(Root::Element(element)),
            JsxChild::Expr { expr: Some(expr) } => roots.extend(extract_roots(expr)),
            JsxChild::Fragment { children } => roots.extend(fragment_roots(children)),
            JsxChild::Expr { expr: None } | JsxChild::Text { .. } => {}
        }
    }
    roots
}

pub(crate) fn is_logical(op: &str) -> bool {
    matches!(op, "&&" | "||" | "??")
}
