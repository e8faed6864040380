//! View layer tests
//!
//! Static reconstruction of component trees: roots, children, attributes,
//! prop threading and expansion guards.

pub mod tests_view_tree;
