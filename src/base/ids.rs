//! Arena identifiers.
//!
//! Every entity the repository owns lives in a flat `Vec` and is addressed by
//! a `u32` handle. Handles are cheap to copy, hash and compare, and they let
//! cross references (file → directory, declaration → declaration) stay valid
//! without shared ownership.

use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $display:literal) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
        pub struct $name(pub u32);

        impl $name {
            /// Create a new id from a raw index.
            #[inline]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Get the raw index.
            #[inline]
            pub const fn index(self) -> u32 {
                self.0
            }

            #[inline]
            pub(crate) fn slot(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub(crate) fn from_slot(slot: usize) -> Self {
                Self(slot as u32)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($display, "#{}"), self.0)
            }
        }

        impl From<u32> for $name {
            #[inline]
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u32 {
            #[inline]
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

arena_id!(
    /// A source file inside a directory (workspace or package).
    FileId,
    "file"
);
arena_id!(
    /// A directory of source files.
    DirId,
    "dir"
);
arena_id!(
    /// An installed dependency package.
    PackageId,
    "pkg"
);
arena_id!(
    /// A namespace block or an ambient module block.
    NamespaceId,
    "ns"
);
arena_id!(
    /// A declaration (class, interface, type alias, variable, object binding).
    DeclId,
    "decl"
);
