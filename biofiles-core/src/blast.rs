//! Best-hit extraction from BLAST text reports
//!
//! Each `Query #` block of a report lists its hits under a `Description`
//! column header; the first row after that header is the best hit.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::io::{read_input, write_output};
use crate::naming::{NamingConfig, TemplateVars};

const QUERY_MARKER: &str = "Query #";
const DESCRIPTION_MARKER: &str = "Description  ";
const FIELD_SEPARATOR: &str = "    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    Closed,
    QueryOpen,
    DescriptionOpen,
}

/// Description of the best hit of every query block, in report order.
pub fn extract_best_hits(text: &str) -> Vec<String> {
    let mut hits = Vec::new();
    let mut state = BlockState::Closed;

    for line in text.lines() {
        if line.starts_with(QUERY_MARKER) {
            // An armed description header stays armed across a new query
            if state == BlockState::Closed {
                state = BlockState::QueryOpen;
            }
            continue;
        }
        match state {
            BlockState::Closed => {}
            _ if line.starts_with(DESCRIPTION_MARKER) => {
                state = BlockState::DescriptionOpen;
            }
            BlockState::QueryOpen => {}
            BlockState::DescriptionOpen => {
                let description = line.split(FIELD_SEPARATOR).next().unwrap_or_default();
                hits.push(description.to_string());
                state = BlockState::Closed;
            }
        }
    }

    log::debug!("Extracted {} best hits", hits.len());
    if hits.is_empty() {
        log::warn!("No query blocks with hits found");
    }
    hits
}

/// Write the best-hit descriptions of `input`, one per line, and return the
/// written path.
///
/// Without `output_name` the file is called `best_<input stem>.txt`. The
/// file is written to `out_dir`, or the current directory.
pub fn parse_blast_output<P: AsRef<Path>>(
    input: P,
    output_name: Option<&str>,
    out_dir: Option<&Path>,
    naming: &NamingConfig,
) -> Result<PathBuf> {
    let input = input.as_ref();
    let text = read_input(input)?;
    let hits = extract_best_hits(&text);

    let mut contents = String::new();
    for hit in &hits {
        contents.push_str(hit);
        contents.push('\n');
    }

    let name = naming.blast().resolve(&TemplateVars::from_input(input), output_name);
    let output = out_dir.unwrap_or_else(|| Path::new(".")).join(name);
    write_output(&output, &contents)?;
    Ok(output)
}
