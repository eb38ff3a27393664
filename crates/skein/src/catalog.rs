//! Source catalog: the read-only index the whole bundling run queries
//!
//! The catalog is the single source of truth for file identity. It is built
//! once from every candidate `(path, text)` pair, computes each file's
//! declared package and top-level symbol set, and is never mutated
//! afterwards, so any number of resolver instances can share one catalog
//! by reference.

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::{
    extractor,
    types::{FileId, FxIndexMap, FxIndexSet},
};

/// One candidate source file, indexed at catalog build time
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Dense identity within this catalog
    pub id: FileId,
    /// Canonical path, the file's identity across runs
    pub path: PathBuf,
    /// Raw text as read from disk
    pub text: String,
    /// Declared package path, if the file has one
    pub package: Option<String>,
    /// Names of all top-level declarations
    pub symbols: FxIndexSet<String>,
}

/// Immutable index over the candidate file pool
#[derive(Debug, Default)]
pub struct Catalog {
    /// All files, in insertion order; `FileId` indexes into this
    files: Vec<SourceFile>,
    path_to_id: FxIndexMap<PathBuf, FileId>,
    /// Package path -> files declaring exactly that package
    package_index: FxIndexMap<String, Vec<FileId>>,
    /// Symbol name -> defining file; collisions resolve last-seen-wins
    /// over the (sorted) insertion order
    symbol_index: FxIndexMap<String, FileId>,
    /// Import paths under these prefixes never resolve locally
    external_prefixes: Vec<String>,
}

impl Catalog {
    /// Build a catalog from every candidate file.
    ///
    /// Files with no package or no symbols are indexed with empty
    /// associations; nothing about a candidate file is an error here.
    pub fn build(pairs: Vec<(PathBuf, String)>, external_prefixes: Vec<String>) -> Self {
        let mut catalog = Self {
            external_prefixes,
            ..Self::default()
        };
        for (path, text) in pairs {
            catalog.add_file(path, text);
        }
        catalog
    }

    fn add_file(&mut self, path: PathBuf, text: String) {
        let id = FileId::new(self.files.len() as u32);
        let package = extractor::declared_package(&text);
        let symbols = extractor::defined_symbols(&text);

        debug!(
            "indexed {}: package={}, symbols=[{}]",
            path.display(),
            package.as_deref().unwrap_or("<none>"),
            symbols.iter().map(String::as_str).collect::<Vec<_>>().join(", "),
        );

        if let Some(pkg) = &package {
            self.package_index.entry(pkg.clone()).or_default().push(id);
        }
        for symbol in &symbols {
            if let Some(previous) = self.symbol_index.insert(symbol.clone(), id) {
                warn!(
                    "symbol `{}` is defined in both {} and {}; the latter wins",
                    symbol,
                    self.files[previous.index()].path.display(),
                    path.display(),
                );
            }
        }

        self.path_to_id.insert(path.clone(), id);
        self.files.push(SourceFile {
            id,
            path,
            text,
            package,
            symbols,
        });
    }

    /// Look up a file by id
    pub fn get(&self, id: FileId) -> &SourceFile {
        &self.files[id.index()]
    }

    /// Look up a file by its (canonical) path
    pub fn id_by_path(&self, path: &Path) -> Option<FileId> {
        self.path_to_id.get(path).copied()
    }

    /// Iterate over all files in insertion order
    pub fn files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter()
    }

    /// Number of files in the catalog
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files declaring exactly this package path
    pub fn files_in_package(&self, package: &str) -> &[FileId] {
        self.package_index
            .get(package)
            .map_or(&[], Vec::as_slice)
    }

    /// The file defining `symbol`, if any
    pub fn resolve_symbol(&self, symbol: &str) -> Option<FileId> {
        self.symbol_index.get(symbol).copied()
    }

    /// Every file whose declared package equals `prefix` or is a dotted
    /// descendant of it: `a.b` matches `a.b` and `a.b.c`, never `a.bc`.
    pub fn wildcard_matches(&self, prefix: &str) -> Vec<FileId> {
        let mut matches: Vec<FileId> = self
            .package_index
            .iter()
            .filter(|(package, _)| is_package_prefix(prefix, package))
            .flat_map(|(_, ids)| ids.iter().copied())
            .collect();
        matches.sort_unstable_by_key(FileId::as_u32);
        matches
    }

    /// Whether an import path is externally scoped by configuration,
    /// short-circuiting any local lookup
    pub fn is_external(&self, import_path: &str) -> bool {
        self.external_prefixes
            .iter()
            .any(|prefix| is_package_prefix(prefix, import_path))
    }
}

/// Module-prefix match: equality or a strict dotted descendant
fn is_package_prefix(prefix: &str, package: &str) -> bool {
    package == prefix
        || (package.len() > prefix.len()
            && package.starts_with(prefix)
            && package.as_bytes()[prefix.len()] == b'.')
}
