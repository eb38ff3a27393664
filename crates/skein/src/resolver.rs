//! Closure resolver: decides which files the bundle contains, and in what order
//!
//! Starting from the entry file, the resolver repeatedly expands the included
//! set through the catalog until fixpoint. The traversal is an explicit
//! work-list iteration guarded by the insertion-ordered inclusion set, which
//! makes it stack-safe and terminates on reference cycles for free: a file
//! already included is never queued again. Emission order is discovery
//! order (entry file first), not a topological sort; files may reference
//! symbols defined later in the emitted text.

use std::collections::VecDeque;

use log::{debug, trace};

use crate::{
    catalog::{Catalog, SourceFile},
    extractor::{self, ImportTarget, ReferenceSet},
    types::{FileId, FxIndexSet, ReferenceKind},
};

/// Work-list traversal state for one bundling run.
///
/// One resolver instance serves one entry file; concurrent entry points
/// each get their own instance over a shared catalog.
#[derive(Debug)]
pub struct ClosureResolver<'a> {
    catalog: &'a Catalog,
    included: FxIndexSet<FileId>,
    queue: VecDeque<FileId>,
}

impl<'a> ClosureResolver<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            included: FxIndexSet::default(),
            queue: VecDeque::new(),
        }
    }

    /// Compute the transitive inclusion set of `entry`, in emission order.
    pub fn resolve(mut self, entry: FileId) -> Vec<FileId> {
        debug!(
            "resolving closure of entry file {}",
            self.catalog.get(entry).path.display()
        );
        self.included.insert(entry);
        self.queue.push_back(entry);

        while let Some(id) = self.queue.pop_front() {
            self.expand(id);
        }

        self.included.into_iter().collect()
    }

    /// Expand one file: every reference it makes may pull in new files.
    fn expand(&mut self, id: FileId) {
        let file = self.catalog.get(id);
        trace!("expanding {}", file.path.display());
        let refs = extractor::extract(&file.text);
        self.expand_same_package(file, &refs);
        self.expand_imports(file, &refs);
    }

    /// Rule a: unqualified references resolve only against files that
    /// declare the same package as the referencing file.
    fn expand_same_package(&mut self, file: &SourceFile, refs: &ReferenceSet) {
        let Some(package) = file.package.as_deref() else {
            return;
        };
        let catalog = self.catalog;
        for symbol in &refs.same_module {
            for &sibling in catalog.files_in_package(package) {
                if sibling != file.id && catalog.get(sibling).symbols.contains(symbol) {
                    self.include(sibling, ReferenceKind::SameModule, symbol);
                }
            }
        }
    }

    /// Rules b and c: explicit imports, in source order. Import paths under
    /// a configured external prefix never resolve locally; a symbol the
    /// catalog cannot resolve is external too and is simply not expanded.
    fn expand_imports(&mut self, file: &SourceFile, refs: &ReferenceSet) {
        let catalog = self.catalog;
        for target in &refs.imports {
            if catalog.is_external(target.path()) {
                trace!(
                    "{}: import of {} is externally scoped",
                    file.path.display(),
                    target.path()
                );
                continue;
            }
            match target {
                ImportTarget::Single { symbol, .. } => {
                    if let Some(defining) = catalog.resolve_symbol(symbol) {
                        self.include(defining, ReferenceKind::SingleImport, symbol);
                    }
                }
                ImportTarget::Grouped { symbols, .. } => {
                    for symbol in symbols {
                        if let Some(defining) = catalog.resolve_symbol(symbol) {
                            self.include(defining, ReferenceKind::GroupedImport, symbol);
                        }
                    }
                }
                ImportTarget::Wildcard { path } => {
                    for matched in catalog.wildcard_matches(path) {
                        self.include(matched, ReferenceKind::WildcardImport, path);
                    }
                }
            }
        }
    }

    /// Add a file to the inclusion set and the work-list, once.
    fn include(&mut self, id: FileId, via: ReferenceKind, cause: &str) {
        if self.included.insert(id) {
            debug!(
                "including {} (via {via} `{cause}`)",
                self.catalog.get(id).path.display()
            );
            self.queue.push_back(id);
        }
    }
}
