//! Recognizers for destructured bindings.
//!
//! `const { A } = obj` only says that `A` comes out of `obj`. What `A`
//! actually is depends on conventions of the code base, so the mapping is
//! pluggable: each [`BindingRecognizer`] inspects a binding and may name the
//! class it stands for. The first recognizer to answer wins.

use super::decl::{DeclKind, DeclSyntax, Declaration};
use super::repository::Repository;
use crate::base::DeclId;
use crate::syntax::{Expr, ObjectProp};

/// Maps an object binding to the class it denotes.
pub trait BindingRecognizer: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Returns the class `binding` stands for, if this recognizer knows.
    fn recognize(&self, repo: &Repository, binding: &Declaration) -> Option<DeclId>;
}

/// Recognizes lazy re-export objects:
///
/// ```text
/// const components = {
///     get Button() { return require("./Button").Button; },
/// };
/// const { Button } = components;
/// ```
///
/// The object may be declared locally or imported. The getter's last
/// top-level `return` must be `require("<specifier>").<Name>`, and `<Name>`
/// must be a class exported by the required module.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireGetterRecognizer;

impl BindingRecognizer for RequireGetterRecognizer {
    fn name(&self) -> &'static str {
        "require-getter"
    }

    fn recognize(&self, repo: &Repository, binding: &Declaration) -> Option<DeclId> {
        let DeclSyntax::ObjectBinding { declarator, key } = &binding.syntax else {
            return None;
        };
        let Some(Expr::Ident { name: object }) = &declarator.init else {
            return None;
        };

        let object_id = repo.resolve_name(binding.file, object, &[DeclKind::Variable])?;
        let object_decl = repo.declaration(object_id);
        let Some(Expr::Object { props }) = object_decl.declarator().and_then(|d| d.init.as_ref()) else {
            tracing::trace!("[BIND] '{}' is not an object literal", object);
            return None;
        };

        let body = props.iter().find_map(|prop| match prop {
            ObjectProp::Getter { key: k, body } if k.as_str() == key.as_str() => Some(body),
            _ => None,
        })?;
        let (specifier, export) = required_member(body.last_return()?)?;

        let from = object_decl.file;
        let class = repo.with_types_fallback(specifier, |spec| {
            let scope = repo.resolve_specifier(from, spec)?;
            repo.lookup_in_scope(scope, export, &[DeclKind::Class])
        });
        if class.is_none() {
            tracing::debug!(
                "[BIND] no class '{}' in '{}' for binding '{}'",
                export,
                specifier,
                binding.name
            );
        }
        class
    }
}

/// Matches `require("specifier").name`.
fn required_member(expr: &Expr) -> Option<(&str, &str)> {
    let Expr::Member { object, property } = expr.unparen() else {
        return None;
    };
    let Expr::Call { callee, args } = object.unparen() else {
        return None;
    };
    match (callee.as_ref(), args.as_slice()) {
        (Expr::Ident { name }, [Expr::Str { value }]) if name == "require" => Some((value, property)),
        _ => None,
    }
}
