//! Compact source rendering of expressions.
//!
//! Used wherever an attribute value is kept as source text (`style={styles.row}`)
//! and in log messages. Output is single-line and not meant to round-trip.

use std::fmt::{self, Display, Formatter, Write};

use super::expr::{Expr, FunctionBody, JsxAttr, JsxAttrValue, JsxChild, JsxElement, ObjectProp};
use super::tree::TypeExpr;

fn comma_separated<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident { name } => f.write_str(name),
            Expr::This => f.write_str("this"),
            Expr::Member { object, property } => write!(f, "{object}.{property}"),
            Expr::Call { callee, args } => {
                write!(f, "{callee}(")?;
                comma_separated(f, args)?;
                f.write_char(')')
            }
            Expr::Str { value } => write!(f, "{value:?}"),
            Expr::Num { value } => f.write_str(value),
            Expr::Bool { value } => write!(f, "{value}"),
            Expr::Null => f.write_str("null"),
            Expr::Array { elements } => {
                f.write_char('[')?;
                comma_separated(f, elements)?;
                f.write_char(']')
            }
            Expr::Object { props } => {
                if props.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                comma_separated(f, props)?;
                f.write_str(" }")
            }
            Expr::Function(function) => {
                f.write_char('(')?;
                for (i, param) in function.params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match param {
                        crate::syntax::Pattern::Ident { name } => f.write_str(name)?,
                        _ => f.write_str("{...}")?,
                    }
                }
                f.write_str(") => ")?;
                match &function.body {
                    FunctionBody::Expr { expr } => write!(f, "{expr}"),
                    FunctionBody::Block(_) => f.write_str("{...}"),
                }
            }
            Expr::Paren { expr } => write!(f, "({expr})"),
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => write!(f, "{test} ? {consequent} : {alternate}"),
            Expr::Binary { op, left, right } => write!(f, "{left} {op} {right}"),
            Expr::Jsx(element) => write!(f, "{element}"),
            Expr::Fragment { children } => {
                f.write_str("<>")?;
                for child in children {
                    write!(f, "{child}")?;
                }
                f.write_str("</>")
            }
            Expr::Other { text } => f.write_str(text),
        }
    }
}

impl Display for ObjectProp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ObjectProp::KeyValue { key, value } => write!(f, "{key}: {value}"),
            ObjectProp::Shorthand { name } => f.write_str(name),
            ObjectProp::Getter { key, .. } => write!(f, "get {key}() {{...}}"),
            ObjectProp::Method { key, .. } => write!(f, "{key}() {{...}}"),
            ObjectProp::Spread { expr } => write!(f, "...{expr}"),
            ObjectProp::Other => f.write_str("..."),
        }
    }
}

impl Display for JsxElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for attr in &self.attributes {
            match attr {
                JsxAttr::Attr { name, value: None } => write!(f, " {name}")?,
                JsxAttr::Attr {
                    name,
                    value: Some(value),
                } => match value {
                    JsxAttrValue::Str { value } => write!(f, " {name}={value:?}")?,
                    JsxAttrValue::Expr { expr: Some(expr) } => write!(f, " {name}={{{expr}}}")?,
                    JsxAttrValue::Expr { expr: None } => write!(f, " {name}={{}}")?,
                    JsxAttrValue::Element(element) => write!(f, " {name}={element}")?,
                },
                JsxAttr::Spread { expr } => write!(f, " {{...{expr}}}")?,
            }
        }
        if self.children.is_empty() {
            return f.write_str(" />");
        }
        f.write_char('>')?;
        for child in &self.children {
            write!(f, "{child}")?;
        }
        write!(f, "</{}>", self.name)
    }
}

impl Display for JsxChild {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            JsxChild::Text { text } => f.write_str(text.trim()),
            JsxChild::Element(element) => write!(f, "{element}"),
            JsxChild::Expr { expr: Some(expr) } => write!(f, "{{{expr}}}"),
            JsxChild::Expr { expr: None } => Ok(()),
            JsxChild::Fragment { children } => {
                f.write_str("<>")?;
                for child in children {
                    write!(f, "{child}")?;
                }
                f.write_str("</>")
            }
        }
    }
}

impl Display for TypeExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Reference { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_char('<')?;
                    comma_separated(f, args)?;
                    f.write_char('>')?;
                }
                Ok(())
            }
            TypeExpr::Query { expr } => write!(f, "typeof {expr}"),
            TypeExpr::Intersection { types } => join_types(f, types, " & "),
            TypeExpr::Union { types } => join_types(f, types, " | "),
            TypeExpr::Other => f.write_str("unknown"),
        }
    }
}

fn join_types(f: &mut Formatter<'_>, types: &[TypeExpr], sep: &str) -> fmt::Result {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{ty}")?;
    }
    Ok(())
}
