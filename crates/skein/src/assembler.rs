//! Bundle assembly: concatenate rewritten file bodies
//!
//! Bodies are emitted in inclusion order, separated by exactly one blank
//! line. Files whose body became empty after header rewriting (nothing but
//! package and import lines) are dropped so they cannot widen a separator.

/// Concatenate rewritten bodies into the final bundle text.
pub fn assemble<I>(bodies: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut bundle = bodies
        .into_iter()
        .map(|body| body.trim().to_owned())
        .filter(|body| !body.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    if !bundle.is_empty() {
        bundle.push('\n');
    }
    bundle
}
