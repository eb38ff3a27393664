//! Reference extraction from raw Scala source text
//!
//! This is a textual heuristic, not a tokenizer: line comments and string
//! literal contents are blanked out before matching, and the remaining text
//! is scanned with regular expressions for import statements and for the
//! syntactic shapes in which an unqualified type reference can appear. The
//! heuristic can both under- and over-match; the closure resolver filters
//! candidates against the catalog, so over-matching costs at most an extra
//! lookup. The contract is deliberately isolated behind this module so a
//! real parser could replace it without touching the resolver.

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;

use crate::types::FxIndexSet;

/// `import a.b._` — captures the package path
static WILDCARD_IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*import\s+([A-Za-z_][\w.]*)\._\s*;?\s*$").expect("invalid wildcard import regex")
});

/// `import a.b.{C, D}` — captures the package path and the brace body
static GROUPED_IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*import\s+([A-Za-z_][\w.]*)\.\{([^}]*)\}\s*;?\s*$")
        .expect("invalid grouped import regex")
});

/// `import a.b.C` — captures the package path and the trailing segment
static SINGLE_IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*import\s+([A-Za-z_][\w.]*)\.([A-Za-z_]\w*)\s*;?\s*$")
        .expect("invalid single import regex")
});

/// `package a.b.c` — captures the declared package path
static PACKAGE_DECL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*package\s+([A-Za-z_][\w.]*)").expect("invalid package regex"));

/// Top-level declaration: optional modifiers, a declaration keyword, a name
static DECLARATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^\s*(?:(?:abstract|case|final|implicit|lazy|private|protected|sealed)\s+)*(?:class|trait|object)\s+([A-Za-z_]\w*)",
    )
    .expect("invalid declaration regex")
});

/// The five shapes in which an unqualified same-package reference appears:
/// construction, invocation, member access, statement-final initialization,
/// and supertype position.
static REFERENCE_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\bnew\s+([A-Z]\w*)",
        r"\b([A-Z]\w*)\s*\(",
        r"\b([A-Z]\w*)\.[A-Za-z_]",
        r"(?m)=\s*([A-Z]\w*)\s*$",
        r"\b(?:extends|with)\s+([A-Z]\w*)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("invalid reference regex"))
    .collect()
});

/// Standard type names excluded from same-package candidates to cut noise.
/// Container, option/result, and primitive names cover the overwhelming
/// majority of upper-case identifiers in competitive-programming code.
static BUILTIN_TYPES: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "Any",
        "AnyRef",
        "AnyVal",
        "Array",
        "BigDecimal",
        "BigInt",
        "Boolean",
        "Byte",
        "Char",
        "Console",
        "Double",
        "Either",
        "Failure",
        "Float",
        "Function",
        "Future",
        "Int",
        "Iterator",
        "Left",
        "List",
        "Long",
        "Map",
        "Math",
        "Nil",
        "None",
        "Nothing",
        "Numeric",
        "Option",
        "Ordering",
        "PartialFunction",
        "Range",
        "Right",
        "Seq",
        "Set",
        "Short",
        "Some",
        "StdIn",
        "Stream",
        "String",
        "StringBuilder",
        "Success",
        "System",
        "Thread",
        "Try",
        "Unit",
        "Vector",
    ]
    .into_iter()
    .collect()
});

/// One parsed `import` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportTarget {
    /// `import a.b.C`
    Single { path: String, symbol: String },
    /// `import a.b.{C, D}`
    Grouped { path: String, symbols: Vec<String> },
    /// `import a.b._`
    Wildcard { path: String },
}

impl ImportTarget {
    /// The package path to the left of the imported member(s)
    pub fn path(&self) -> &str {
        match self {
            ImportTarget::Single { path, .. }
            | ImportTarget::Grouped { path, .. }
            | ImportTarget::Wildcard { path } => path,
        }
    }
}

/// Everything one file references, split by reference shape
///
/// `imports` preserves source order; `same_module` holds upper-case-initial
/// identifiers seen in reference position, before any catalog filtering.
/// The four disjoint categories of the resolution model are exposed as
/// views: [`Self::single_imports`], [`Self::grouped_imports`],
/// [`Self::wildcard_imports`], and the `same_module` field itself.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSet {
    /// Candidate same-package symbol references (unfiltered)
    pub same_module: FxIndexSet<String>,
    /// Every recognized import statement, in source order
    pub imports: Vec<ImportTarget>,
}

impl ReferenceSet {
    /// Symbols pulled in by one-symbol imports
    pub fn single_imports(&self) -> FxIndexSet<&str> {
        self.imports
            .iter()
            .filter_map(|target| match target {
                ImportTarget::Single { symbol, .. } => Some(symbol.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Symbols pulled in by braced multi-symbol imports
    pub fn grouped_imports(&self) -> FxIndexSet<&str> {
        self.imports
            .iter()
            .filter_map(|target| match target {
                ImportTarget::Grouped { symbols, .. } => Some(symbols),
                _ => None,
            })
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// Package prefixes pulled in by trailing-wildcard imports
    pub fn wildcard_imports(&self) -> FxIndexSet<&str> {
        self.imports
            .iter()
            .filter_map(|target| match target {
                ImportTarget::Wildcard { path } => Some(path.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Blank out the line comment and string literal contents of a single line.
///
/// String state does not carry across lines; Scala's plain string literals
/// do not either. Triple-quoted literals degrade to per-line blanking,
/// which is acceptable for a best-effort heuristic.
pub(crate) fn sanitize_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    let mut in_string = false;
    while let Some(c) = chars.next() {
        if in_string {
            match c {
                '\\' => {
                    chars.next();
                }
                '"' => {
                    in_string = false;
                    out.push('"');
                }
                _ => {}
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push('"');
            }
            '/' if chars.peek() == Some(&'/') => break,
            _ => out.push(c),
        }
    }
    out
}

fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        out.push_str(&sanitize_line(line));
        out.push('\n');
    }
    out
}

/// Classify one (already sanitized) line as an import statement, if it is one.
///
/// Order matters: the wildcard shape also satisfies the single-import regex
/// (`_` is a valid trailing segment), so it is tried first.
pub fn parse_import_line(line: &str) -> Option<ImportTarget> {
    if let Some(captures) = WILDCARD_IMPORT_RE.captures(line) {
        return Some(ImportTarget::Wildcard {
            path: captures[1].to_owned(),
        });
    }
    if let Some(captures) = GROUPED_IMPORT_RE.captures(line) {
        let symbols = captures[2]
            .split(',')
            .map(|entry| {
                // `A => B` renames resolve against the original name
                entry.split("=>").next().unwrap_or(entry).trim()
            })
            .filter(|name| !name.is_empty() && *name != "_")
            .map(str::to_owned)
            .collect();
        return Some(ImportTarget::Grouped {
            path: captures[1].to_owned(),
            symbols,
        });
    }
    if let Some(captures) = SINGLE_IMPORT_RE.captures(line) {
        return Some(ImportTarget::Single {
            path: captures[1].to_owned(),
            symbol: captures[2].to_owned(),
        });
    }
    None
}

/// Extract the declared package path of a file, if any.
///
/// Only the first package statement counts; `package object` definitions
/// are not package declarations.
pub fn declared_package(text: &str) -> Option<String> {
    let clean = sanitize(text);
    PACKAGE_DECL_RE
        .captures_iter(&clean)
        .map(|captures| captures[1].to_owned())
        .find(|path| path != "object")
}

/// Extract the names of all top-level declarations in a file
pub fn defined_symbols(text: &str) -> FxIndexSet<String> {
    let clean = sanitize(text);
    DECLARATION_RE
        .captures_iter(&clean)
        .map(|captures| captures[1].to_owned())
        .collect()
}

/// Extract everything `text` references, split by reference shape
pub fn extract(text: &str) -> ReferenceSet {
    let clean = sanitize(text);
    let mut refs = ReferenceSet::default();

    for line in clean.lines() {
        if let Some(target) = parse_import_line(line) {
            refs.imports.push(target);
        }
    }

    for re in REFERENCE_RES.iter() {
        for captures in re.captures_iter(&clean) {
            let name = &captures[1];
            if !BUILTIN_TYPES.contains(name) {
                refs.same_module.insert(name.to_owned());
            }
        }
    }

    refs
}
