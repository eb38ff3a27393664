//! Shared type definitions for the skein crate
//!
//! This module contains common types that are used across multiple components
//! of the bundler, ensuring consistency and avoiding circular dependencies.

use std::hash::BuildHasherDefault;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHasher;

/// Type alias for FxHasher-based IndexMap
pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Type alias for FxHasher-based IndexSet
pub type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;

/// Unique identifier for a source file within one catalog
///
/// Ids are dense indices assigned in catalog insertion order, so they double
/// as a deterministic tie-break wherever one is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(u32);

impl FileId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the underlying u32 value of the FileId
    #[inline]
    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    /// Index into catalog-ordered storage
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Which reference shape caused a file to be pulled into the bundle
///
/// Every discovery the closure resolver makes is attributed to exactly one
/// of these categories, which is also how the discovery is reported in the
/// trace log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// Unqualified reference to a symbol defined by a package sibling
    SameModule,

    /// `import a.b.C` pulling in the file that defines `C`
    SingleImport,

    /// `import a.b.{C, D}` pulling in the files defining the listed symbols
    GroupedImport,

    /// `import a.b._` pulling in every file under the package prefix
    WildcardImport,
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceKind::SameModule => write!(f, "same-package reference"),
            ReferenceKind::SingleImport => write!(f, "single import"),
            ReferenceKind::GroupedImport => write!(f, "grouped import"),
            ReferenceKind::WildcardImport => write!(f, "wildcard import"),
        }
    }
}
