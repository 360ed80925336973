//! Line-level token recognition for GenBank feature tables
//!
//! The scanner only ever asks these predicates what a line is, so a
//! stricter grammar can replace them without touching the state machine.

const FEATURE_INDENT: &str = "     ";

/// `     CDS             complement(12..345)`
pub fn is_cds_line(line: &str) -> bool {
    line.trim().starts_with("CDS ")
}

/// `                     /gene="dnaA"`; `/gene_synonym` does not match.
pub fn is_gene_tag_line(line: &str) -> bool {
    line.trim_start().starts_with("/gene=")
}

/// `                     /translation="MSLKV...`
pub fn is_translation_tag_line(line: &str) -> bool {
    line.trim_start().starts_with("/translation=")
}

/// `ORIGIN      ` marks the end of the feature table.
pub fn is_origin_line(line: &str) -> bool {
    line.trim().starts_with("ORIGIN")
}

/// A feature key in column 6, e.g. `     gene            1..100`.
pub fn is_feature_key_line(line: &str) -> bool {
    line.strip_prefix(FEATURE_INDENT)
        .and_then(|rest| rest.chars().next())
        .map_or(false, |c| !c.is_whitespace())
}

/// Second whitespace-delimited field of a CDS line.
pub fn cds_coordinate(line: &str) -> &str {
    line.split_whitespace().nth(1).unwrap_or_default()
}

/// Text between the first pair of double quotes, or everything after the
/// first quote when it is never closed.
pub fn quoted_value(line: &str) -> Option<&str> {
    let (_, rest) = line.split_once('"')?;
    Some(rest.split_once('"').map_or(rest, |(value, _)| value))
}

/// True when the qualifier value opened on this line is also closed on it.
pub fn closes_on_same_line(line: &str) -> bool {
    line.matches('"').count() >= 2
}

/// Continuation line of a quoted qualifier with the quotes stripped.
pub fn continuation_text(line: &str) -> &str {
    line.trim().trim_matches('"')
}

/// True when a continuation line carries the closing quote.
pub fn closes_quote(line: &str) -> bool {
    line.trim_end().ends_with('"')
}
