//! One-shot bundling pipeline
//!
//! Ties the collaborators together in their fixed data-flow order:
//! discovery builds the candidate pool, the catalog indexes it once, the
//! resolver computes the inclusion set, and the rewriter and assembler run
//! once per included file. One `bundle` call serves one entry file; callers
//! bundling several entry points should reuse one orchestrator and call
//! `bundle` per entry.

use std::path::Path;

use anyhow::{Result, anyhow};
use log::info;

use crate::{
    assembler,
    catalog::Catalog,
    config::Config,
    discovery,
    resolver::ClosureResolver,
    rewriter,
};

/// Outcome of one bundling run
#[derive(Debug)]
pub struct BundleResult {
    /// The assembled bundle text
    pub code: String,
    /// How many files the closure resolved to, entry file included
    pub included_files: usize,
}

/// Drives one entry file through the full bundling pipeline
#[derive(Debug)]
pub struct BundleOrchestrator {
    config: Config,
}

impl BundleOrchestrator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Bundle the project reachable from `entry`.
    ///
    /// The only fatal condition is the entry file being absent from the
    /// candidate pool; every per-file degradation has already happened
    /// during discovery and indexing.
    pub fn bundle(&self, entry: &Path) -> Result<BundleResult> {
        let entry = discovery::canonicalize_or_identity(entry);

        let mut roots = self.config.src.clone();
        if roots.is_empty() {
            let parent = entry
                .parent()
                .ok_or_else(|| anyhow!("entry file {} has no parent directory", entry.display()))?;
            roots.push(parent.to_path_buf());
        }

        let pairs = discovery::discover_files(&roots, &self.config.extension)?;
        let catalog = Catalog::build(pairs, self.config.external_prefixes.clone());

        let entry_id = catalog.id_by_path(&entry).ok_or_else(|| {
            anyhow!(
                "entry file {} was not found under the configured source roots",
                entry.display()
            )
        })?;

        let order = ClosureResolver::new(&catalog).resolve(entry_id);
        let code = assembler::assemble(
            order
                .iter()
                .map(|&id| rewriter::rewrite(&catalog.get(id).text, &catalog)),
        );

        info!("bundled {} of {} candidate files", order.len(), catalog.len());
        Ok(BundleResult {
            code,
            included_files: order.len(),
        })
    }
}
