//! Expression, statement and JSX syntax.
//!
//! The expression model is deliberately shallow: it keeps the structure the
//! view reconstruction walks (member chains, calls, conditionals, functions,
//! JSX) and reduces everything else to [`Expr::Other`] with its source text.

use serde::{Deserialize, Serialize};

use super::tree::{Pattern, VariableStatement};

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Expr {
    Ident {
        name: String,
    },
    This,
    /// `object.property`
    Member {
        object: Box<Expr>,
        property: String,
    },
    Call {
        callee: Box<Expr>,
        #[serde(default)]
        args: Vec<Expr>,
    },
    Str {
        value: String,
    },
    /// Numeric literal, kept as written.
    Num {
        value: String,
    },
    Bool {
        value: bool,
    },
    Null,
    Array {
        #[serde(default)]
        elements: Vec<Expr>,
    },
    Object {
        #[serde(default)]
        props: Vec<ObjectProp>,
    },
    Function(Box<Function>),
    Paren {
        expr: Box<Expr>,
    },
    /// `test ? consequent : alternate`
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
    Binary {
        op: String,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Jsx(Box<JsxElement>),
    Fragment {
        #[serde(default)]
        children: Vec<JsxChild>,
    },
    /// Unmodelled expression with its source text.
    Other {
        #[serde(default)]
        text: String,
    },
}

impl Expr {
    /// Flattens an identifier or member chain (`this.props.title`) into its
    /// segments. Calls are looked through to their callee.
    pub fn reference_path(&self) -> Option<Vec<&str>> {
        match self {
            Expr::Ident { name } => Some(vec![name.as_str()]),
            Expr::This => Some(vec!["this"]),
            Expr::Member { object, property } => {
                let mut path = object.reference_path()?;
                path.push(property);
                Some(path)
            }
            Expr::Call { callee, .. } => callee.reference_path(),
            Expr::Paren { expr } => expr.reference_path(),
            _ => None,
        }
    }

    /// Strips any number of enclosing parentheses.
    pub fn unparen(&self) -> &Expr {
        let mut expr = self;
        while let Expr::Paren { expr: inner } = expr {
            expr = inner;
        }
        expr
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Expr::Str { .. } | Expr::Num { .. } | Expr::Bool { .. })
    }
}

/// A property in an object literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ObjectProp {
    KeyValue {
        key: String,
        value: Expr,
    },
    Shorthand {
        name: String,
    },
    Getter {
        key: String,
        body: Block,
    },
    Method {
        key: String,
        function: Function,
    },
    Spread {
        expr: Expr,
    },
    #[serde(other)]
    Other,
}

impl ObjectProp {
    pub fn key(&self) -> Option<&str> {
        match self {
            ObjectProp::KeyValue { key, .. }
            | ObjectProp::Getter { key, .. }
            | ObjectProp::Method { key, .. } => Some(key),
            ObjectProp::Shorthand { name } => Some(name),
            ObjectProp::Spread { .. } | ObjectProp::Other => None,
        }
    }
}

/// Function expression, arrow function or method body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Function {
    #[serde(default)]
    pub is_arrow: bool,
    #[serde(default)]
    pub params: Vec<Pattern>,
    pub body: FunctionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FunctionBody {
    Block(Block),
    /// Concise arrow body: `() => <View />`
    Expr { expr: Box<Expr> },
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub stmts: Vec<Stmt>,
}

impl Block {
    /// The expression of the first top-level `return`.
    pub fn first_return(&self) -> Option<&Expr> {
        self.stmts.iter().find_map(|stmt| match stmt {
            Stmt::Return { expr } => expr.as_ref(),
            _ => None,
        })
    }

    /// The expression of the last top-level `return`.
    pub fn last_return(&self) -> Option<&Expr> {
        self.stmts.iter().rev().find_map(|stmt| match stmt {
            Stmt::Return { expr } => expr.as_ref(),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Stmt {
    Return {
        #[serde(default)]
        expr: Option<Expr>,
    },
    Variable(VariableStatement),
    If {
        test: Expr,
        consequent: Block,
        #[serde(default)]
        alternate: Option<Block>,
    },
    Expr {
        expr: Expr,
    },
    Block(Block),
    #[serde(other)]
    Other,
}

// ============================================================================
// JSX
// ============================================================================

/// `<Name attr="x" {...spread}>children</Name>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsxElement {
    /// Tag name as written, possibly dotted (`Foo.Item`).
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<JsxAttr>,
    #[serde(default)]
    pub children: Vec<JsxChild>,
}

impl JsxElement {
    /// Host elements start with a lower-case letter (`<div>`).
    pub fn is_intrinsic(&self) -> bool {
        self.name.starts_with(|c: char| c.is_ascii_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum JsxAttr {
    Attr {
        name: String,
        #[serde(default)]
        value: Option<JsxAttrValue>,
    },
    Spread {
        expr: Expr,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum JsxAttrValue {
    /// `attr="text"`
    Str { value: String },
    /// `attr={expr}`; `None` for an empty container `attr={}`.
    Expr {
        #[serde(default)]
        expr: Option<Expr>,
    },
    /// `attr=<Element />`
    Element(Box<JsxElement>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum JsxChild {
    Text {
        text: String,
    },
    Element(JsxElement),
    Expr {
        #[serde(default)]
        expr: Option<Expr>,
    },
    Fragment {
        #[serde(default)]
        children: Vec<JsxChild>,
    },
}
