//! Static view reconstruction.
//!
//! Given a component declaration, rebuilds the element tree its render
//! template produces, expanding nested components from their own templates.
//! See [`ViewTreeBuilder`] for the expansion rules.

mod builder;
mod node;
mod template;

pub use builder::ViewTreeBuilder;
pub use node::{AttrValue, ViewNode, ViewTree};
