//! Header rewriting: strip package declarations and project-local imports
//!
//! The rewriter is line-oriented and leaves everything that is neither a
//! package declaration nor an import untouched, byte for byte. Strip-vs-keep
//! for an import line uses exactly the lookups the resolver uses, so a line
//! is stripped precisely when the resolver would have (or could have)
//! resolved it into the bundle.

use crate::{
    catalog::Catalog,
    extractor::{self, ImportTarget},
};

/// Rewrite one file body for inclusion in the bundle.
///
/// The returned text has no trailing newline; the assembler owns separation.
pub fn rewrite(text: &str, catalog: &Catalog) -> String {
    let kept: Vec<&str> = text
        .lines()
        .filter(|line| keep_line(line, catalog))
        .collect();
    kept.join("\n")
}

fn keep_line(line: &str, catalog: &Catalog) -> bool {
    match first_token(line) {
        Some("package") => false,
        Some("import") => {
            // classify against the comment/string-stripped form, emit the
            // original line if kept
            match extractor::parse_import_line(&extractor::sanitize_line(line)) {
                Some(target) => !is_local_import(&target, catalog),
                // a line the import grammar cannot classify passes through
                None => true,
            }
        }
        _ => true,
    }
}

/// An import is local (and therefore stripped) iff it resolves to at least
/// one catalog file. A grouped import mixing local and external symbols is
/// dropped whole; partial rewriting is deliberately not attempted.
fn is_local_import(target: &ImportTarget, catalog: &Catalog) -> bool {
    if catalog.is_external(target.path()) {
        return false;
    }
    match target {
        ImportTarget::Single { symbol, .. } => catalog.resolve_symbol(symbol).is_some(),
        ImportTarget::Grouped { symbols, .. } => symbols
            .iter()
            .any(|symbol| catalog.resolve_symbol(symbol).is_some()),
        ImportTarget::Wildcard { path } => !catalog.wildcard_matches(path).is_empty(),
    }
}

fn first_token(line: &str) -> Option<&str> {
    line.split_whitespace().next()
}
