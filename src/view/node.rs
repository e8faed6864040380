//! View tree nodes.

use std::fmt::{self, Display, Formatter};

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::DeclId;

/// Value of a JSX attribute in the reconstructed tree.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// String, number or boolean literal, unquoted.
    Literal(String),
    /// Any other kept expression, as source text.
    Source(String),
    /// JSX passed as a value (`header={<Title />}`), expanded.
    Nodes(Vec<ViewNode>),
}

/// One element of a statically reconstructed UI tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewNode {
    pub tag: SmolStr,
    /// The component the tag resolved to, if any.
    pub declaration: Option<DeclId>,
    /// Attributes by name; `None` for valueless attributes (`<Input disabled />`).
    pub attributes: IndexMap<SmolStr, Option<AttrValue>>,
    pub children: Vec<ViewNode>,
}

impl ViewNode {
    pub fn new(tag: impl Into<SmolStr>, declaration: Option<DeclId>) -> Self {
        Self {
            tag: tag.into(),
            declaration,
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Attribute value by name. The outer `Option` is presence.
    pub fn attribute(&self, name: &str) -> Option<Option<&AttrValue>> {
        self.attributes.get(name).map(Option::as_ref)
    }

    /// Depth-first pre-order walk over this node and its descendants.
    pub fn descendants(&self) -> impl Iterator<Item = &ViewNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// First node (self included) with `tag`, depth-first.
    pub fn find(&self, tag: &str) -> Option<&ViewNode> {
        self.descendants().find(|n| n.tag == tag)
    }

    fn fmt_indented(&self, f: &mut Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        write!(f, "{indent}<{}", self.tag)?;
        for (name, value) in &self.attributes {
            match value {
                None => write!(f, " {name}")?,
                Some(AttrValue::Literal(text)) => write!(f, " {name}={text:?}")?,
                Some(AttrValue::Source(text)) => write!(f, " {name}={{{text}}}")?,
                Some(AttrValue::Nodes(nodes)) => {
                    let tags: Vec<String> = nodes.iter().map(|n| format!("<{} />", n.tag)).collect();
                    write!(f, " {name}={{{}}}", tags.join(""))?;
                }
            }
        }
        if self.children.is_empty() {
            return writeln!(f, " />");
        }
        writeln!(f, ">")?;
        for child in &self.children {
            child.fmt_indented(f, depth + 1)?;
        }
        writeln!(f, "{indent}</{}>", self.tag)
    }
}

impl Display for ViewNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

/// The reconstructed tree of one component.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewTree {
    pub component: DeclId,
    /// One root per element the render template may return.
    pub roots: Vec<ViewNode>,
}

impl ViewTree {
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// First node with `tag` across all roots.
    pub fn find(&self, tag: &str) -> Option<&ViewNode> {
        self.roots.iter().find_map(|root| root.find(tag))
    }
}

impl Display for ViewTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for root in &self.roots {
            write!(f, "{root}")?;
        }
        Ok(())
    }
}
