//! Static reconstruction of a component's view tree.
//!
//! Starting from a component's render template, every JSX element becomes a
//! [`ViewNode`]. When an element names a component that itself has a
//! template, that template is expanded in place as the node's children, with
//! the usage's JSX-valued attributes and children threaded through as props.
//! Expansion never re-enters a component already on the expansion stack.

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::node::{AttrValue, ViewNode, ViewTree};
use super::template::{Root, Template, component_template, is_logical, member_template};
use crate::base::{DeclId, FileId};
use crate::hir::{DeclKind, Repository};
use crate::syntax::{Expr, JsxAttr, JsxAttrValue, JsxChild, JsxElement};

/// Builds view trees over a finished repository.
pub struct ViewTreeBuilder<'r> {
    repo: &'r Repository,
    render_method: String,
}

/// Names in scope while a template is expanded.
#[derive(Debug, Clone)]
struct Frame<'r> {
    owner: DeclId,
    file: FileId,
    locals: IndexMap<&'r str, &'r Expr>,
    /// JSX-valued attributes of the usage being expanded.
    props: IndexMap<SmolStr, Vec<ViewNode>>,
    /// Children of the usage being expanded.
    children: Vec<ViewNode>,
}

impl Frame<'_> {
    fn prop(&self, name: &str) -> Option<&Vec<ViewNode>> {
        self.props.get(name)
    }
}

/// What is currently being expanded, to stop recursion.
#[derive(Debug, Default)]
struct Expansion {
    components: Vec<DeclId>,
    members: Vec<(DeclId, SmolStr)>,
}

impl<'r> ViewTreeBuilder<'r> {
    pub fn new(repo: &'r Repository) -> Self {
        Self {
            repo,
            render_method: repo.config().render_method.clone(),
        }
    }

    pub fn with_render_method(mut self, name: impl Into<String>) -> Self {
        self.render_method = name.into();
        self
    }

    /// Reconstructs the tree rendered by `component`.
    ///
    /// A component without a render template yields an empty tree.
    pub fn build(&self, component: DeclId) -> ViewTree {
        let target = self.repo.unwrap_binding(component);
        let Some(template) = component_template(self.repo, target, &self.render_method) else {
            tracing::debug!(
                "[VIEW] '{}' has no '{}' template",
                self.repo.declaration(component).name,
                self.render_method
            );
            return ViewTree {
                component,
                roots: Vec::new(),
            };
        };

        let mut expansion = Expansion {
            components: vec![target],
            members: Vec::new(),
        };
        let frame = self.frame(&template, IndexMap::new(), Vec::new());
        let roots = self.roots(&frame, &template.roots, &mut expansion);
        tracing::trace!(
            "[VIEW] '{}' rendered {} root(s)",
            self.repo.declaration(component).name,
            roots.len()
        );
        ViewTree { component, roots }
    }

    fn frame(&self, template: &Template<'r>, props: IndexMap<SmolStr, Vec<ViewNode>>, children: Vec<ViewNode>) -> Frame<'r> {
        Frame {
            owner: template.owner,
            file: self.repo.declaration(template.owner).file,
            locals: template.locals.clone(),
            props,
            children,
        }
    }

    fn roots(&self, frame: &Frame<'r>, roots: &[Root<'r>], expansion: &mut Expansion) -> Vec<ViewNode> {
        let mut nodes = Vec::new();
        for root in roots {
            match *root {
                Root::Element(element) => nodes.push(self.element(frame, element, expansion)),
                Root::Expr(expr) => nodes.extend(self.expr_children(frame, expr, expansion)),
            }
        }
        nodes
    }

    /// A JSX tag as a component: resolved through the frame's file, object
    /// bindings followed to their class, pruned declarations ignored.
    fn resolve_component(&self, frame: &Frame<'r>, name: &str) -> Option<DeclId> {
        let id = self.repo.resolve_name(frame.file, name, &DeclKind::COMPONENTS)?;
        let id = self.repo.unwrap_binding(id);
        self.repo.declaration(id).valid.then_some(id)
    }

    /// Expands `id`'s template for one usage, or `None` when it has no
    /// template or is already being expanded.
    fn expand(
        &self,
        id: DeclId,
        props: IndexMap<SmolStr, Vec<ViewNode>>,
        children: Vec<ViewNode>,
        expansion: &mut Expansion,
    ) -> Option<Vec<ViewNode>> {
        if expansion.components.contains(&id) {
            tracing::debug!("[VIEW] recursive use of '{}' not expanded", self.repo.declaration(id).name);
            return None;
        }
        let template = component_template(self.repo, id, &self.render_method)?;
        if template.roots.is_empty() {
            tracing::trace!("[VIEW] '{}' renders no JSX", self.repo.declaration(id).name);
            return None;
        }
        let frame = self.frame(&template, props, children);
        expansion.components.push(id);
        let nodes = self.roots(&frame, &template.roots, expansion);
        expansion.components.pop();
        Some(nodes)
    }

    // ------------------------------------------------------------------------
    // Elements
    // ------------------------------------------------------------------------

    fn element(&self, frame: &Frame<'r>, element: &'r JsxElement, expansion: &mut Expansion) -> ViewNode {
        let declaration = self.resolve_component(frame, &element.name);
        let attributes = self.attributes(frame, element, expansion);
        let usage_children = self.children(frame, &element.children, expansion);

        let children = match declaration {
            Some(id) => {
                let props = attributes
                    .iter()
                    .filter_map(|(name, value)| match value {
                        Some(AttrValue::Nodes(nodes)) => Some((name.clone(), nodes.clone())),
                        _ => None,
                    })
                    .collect();
                match self.expand(id, props, usage_children.clone(), expansion) {
                    Some(nodes) => nodes,
                    None => usage_children,
                }
            }
            None => usage_children,
        };

        ViewNode {
            tag: SmolStr::new(&element.name),
            declaration,
            attributes,
            children,
        }
    }

    /// A nested element survives only when its tag resolves.
    fn child_element(&self, frame: &Frame<'r>, element: &'r JsxElement, expansion: &mut Expansion) -> Option<ViewNode> {
        if self.resolve_component(frame, &element.name).is_none() {
            tracing::debug!("[VIEW] unresolved tag <{}> skipped", element.name);
            return None;
        }
        Some(self.element(frame, element, expansion))
    }

    fn children(&self, frame: &Frame<'r>, children: &'r [JsxChild], expansion: &mut Expansion) -> Vec<ViewNode> {
        let mut nodes = Vec::new();
        for child in children {
            match child {
                JsxChild::Text { text } => {
                    if !text.trim().is_empty() {
                        tracing::trace!("[VIEW] text child {:?} dropped", text.trim());
                    }
                }
                JsxChild::Element(element) => nodes.extend(self.child_element(frame, element, expansion)),
                JsxChild::Expr { expr: Some(expr) } => nodes.extend(self.expr_children(frame, expr, expansion)),
                JsxChild::Expr { expr: None } => {}
                JsxChild::Fragment { children } => nodes.extend(self.children(frame, children, expansion)),
            }
        }
        nodes
    }

    /// Nodes produced by an expression in child position.
    fn expr_children(&self, frame: &Frame<'r>, expr: &'r Expr, expansion: &mut Expansion) -> Vec<ViewNode> {
        match expr {
            Expr::Paren { expr } => self.expr_children(frame, expr, expansion),
            Expr::Jsx(element) => self.child_element(frame, element, expansion).into_iter().collect(),
            Expr::Fragment { children } => self.children(frame, children, expansion),
            Expr::Conditional {
                consequent, alternate, ..
            } => {
                let mut nodes = self.expr_children(frame, consequent, expansion);
                nodes.extend(self.expr_children(frame, alternate, expansion));
                nodes
            }
            Expr::Binary { op, right, .. } if is_logical(op) => self.expr_children(frame, right, expansion),
            Expr::Ident { .. } | Expr::Member { .. } | Expr::Call { .. } | Expr::This => {
                self.value_nodes(frame, expr, expansion)
            }
            Expr::Str { .. } | Expr::Num { .. } | Expr::Bool { .. } | Expr::Null => Vec::new(),
            other => {
                tracing::debug!("[VIEW] unsupported child expression `{}`", other);
                Vec::new()
            }
        }
    }

    /// Nodes a reference evaluates to: passed children, threaded props,
    /// render-local JSX, helper members, or a component used by name.
    fn value_nodes(&self, frame: &Frame<'r>, expr: &'r Expr, expansion: &mut Expansion) -> Vec<ViewNode> {
        let Some(path) = expr.reference_path() else {
            return Vec::new();
        };
        match path.as_slice() {
            ["children"] | ["props", "children"] | ["this", "props", "children"] => frame.children.clone(),
            ["this", "props", name] | ["props", name] => frame.prop(name).cloned().unwrap_or_default(),
            ["this", member] => self.member_nodes(frame, frame.owner, member, expansion),
            [name] => {
                if let Some(nodes) = frame.prop(name) {
                    return nodes.clone();
                }
                if let Some(local) = frame.locals.get(name).copied() {
                    let mut inner = frame.clone();
                    inner.locals.shift_remove(name);
                    return self.expr_children(&inner, local, expansion);
                }
                match self.resolve_component(frame, name) {
                    Some(id) => self.reference_nodes(name, id, expansion),
                    None => Vec::new(),
                }
            }
            [head, member] => match self.resolve_component(frame, head) {
                Some(id) => self.member_nodes(frame, id, member, expansion),
                None => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    /// A component referenced by name (`{Header}`) behaves like `<Header />`.
    ///
    /// Functions that produce no JSX (event handlers and the like) yield
    /// nothing, so attributes keep them as source text.
    fn reference_nodes(&self, name: &str, id: DeclId, expansion: &mut Expansion) -> Vec<ViewNode> {
        match self.expand(id, IndexMap::new(), Vec::new(), expansion) {
            Some(children) if !children.is_empty() => vec![ViewNode {
                tag: SmolStr::new(name),
                declaration: Some(id),
                attributes: IndexMap::new(),
                children,
            }],
            _ => Vec::new(),
        }
    }

    /// Expands a helper member such as `this.renderHeader()`.
    fn member_nodes(&self, frame: &Frame<'r>, owner: DeclId, member: &str, expansion: &mut Expansion) -> Vec<ViewNode> {
        let key = (owner, SmolStr::new(member));
        if expansion.members.contains(&key) {
            tracing::debug!("[VIEW] recursive member '{}' not expanded", member);
            return Vec::new();
        }
        let Some(template) = member_template(self.repo, owner, member) else {
            tracing::debug!("[VIEW] no template for member '{}'", member);
            return Vec::new();
        };
        // Members of the same component see the same props and children.
        let (props, children) = if template.owner == frame.owner {
            (frame.props.clone(), frame.children.clone())
        } else {
            (IndexMap::new(), Vec::new())
        };
        let inner = self.frame(&template, props, children);
        expansion.members.push(key);
        let nodes = self.roots(&inner, &template.roots, expansion);
        expansion.members.pop();
        nodes
    }

    // ------------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------------

    fn attributes(
        &self,
        frame: &Frame<'r>,
        element: &'r JsxElement,
        expansion: &mut Expansion,
    ) -> IndexMap<SmolStr, Option<AttrValue>> {
        let mut attributes = IndexMap::new();
        for attr in &element.attributes {
            let (name, value) = match attr {
                JsxAttr::Spread { expr } => {
                    tracing::trace!("[VIEW] spread attribute `{}` on <{}> skipped", expr, element.name);
                    continue;
                }
                JsxAttr::Attr { name, value } => (name, value),
            };
            let value = match value {
                None => None,
                Some(JsxAttrValue::Str { value }) => Some(AttrValue::Literal(value.clone())),
                Some(JsxAttrValue::Element(nested)) => {
                    Some(AttrValue::Nodes(vec![self.element(frame, nested, expansion)]))
                }
                Some(JsxAttrValue::Expr { expr: None }) => continue,
                Some(JsxAttrValue::Expr { expr: Some(expr) }) => match self.attribute_value(frame, expr, expansion) {
                    Some(value) => Some(value),
                    None => {
                        tracing::debug!("[VIEW] attribute {}={{{}}} on <{}> skipped", name, expr, element.name);
                        continue;
                    }
                },
            };
            attributes.insert(SmolStr::new(name), value);
        }
        attributes
    }

    fn attribute_value(&self, frame: &Frame<'r>, expr: &'r Expr, expansion: &mut Expansion) -> Option<AttrValue> {
        let value = match expr.unparen() {
            Expr::Str { value } | Expr::Num { value } => AttrValue::Literal(value.clone()),
            Expr::Bool { value } => AttrValue::Literal(value.to_string()),
            Expr::Jsx(element) => AttrValue::Nodes(vec![self.element(frame, element, expansion)]),
            Expr::Fragment { children } => AttrValue::Nodes(self.children(frame, children, expansion)),
            reference @ (Expr::Ident { .. } | Expr::Member { .. } | Expr::This) => {
                let nodes = self.value_nodes(frame, reference, expansion);
                if nodes.is_empty() {
                    AttrValue::Source(reference.to_string())
                } else {
                    AttrValue::Nodes(nodes)
                }
            }
            other @ (Expr::Array { .. } | Expr::Object { .. }) => AttrValue::Source(other.to_string()),
            _ => return None,
        };
        Some(value)
    }
}
