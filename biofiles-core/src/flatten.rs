//! Multi-line FASTA to one-line FASTA
//!
//! Sequence bodies wrapped over several lines are joined so that every
//! record ends up as exactly one header line and one sequence line.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::io::{input_dir, read_input, split_terminator, write_output};
use crate::naming::{NamingConfig, TemplateVars};

/// Join the sequence lines of every record in `text`.
///
/// Header lines are copied unchanged. Any sequence left at the end of the
/// input is flushed with a trailing newline, so flattening is idempotent.
pub fn flatten_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut seq = String::new();

    for line in text.split_inclusive('\n') {
        if line.starts_with('>') {
            if !seq.is_empty() {
                out.push_str(&seq);
                out.push('\n');
                seq.clear();
            }
            out.push_str(line);
        } else {
            seq.push_str(split_terminator(line).0);
        }
    }

    if !seq.is_empty() {
        out.push_str(&seq);
        out.push('\n');
    }
    out
}

/// Flatten `input` into a new FASTA file and return its path.
///
/// Without `output_name` the file is called `oneline_result_<input name>`;
/// `.fasta` is appended when missing. The file lands next to the input
/// unless `out_dir` is given.
pub fn flatten_fasta<P: AsRef<Path>>(
    input: P,
    output_name: Option<&str>,
    out_dir: Option<&Path>,
    naming: &NamingConfig,
) -> Result<PathBuf> {
    let input = input.as_ref();
    let text = read_input(input)?;
    let flattened = flatten_text(&text);
    log::debug!(
        "Flattened {} records from {}",
        flattened.lines().filter(|l| l.starts_with('>')).count(),
        input.display()
    );

    let name = naming.flatten().resolve(&TemplateVars::from_input(input), output_name);
    let dir = out_dir.map(Path::to_path_buf).unwrap_or_else(|| input_dir(input));
    let output = dir.join(name);
    write_output(&output, &flattened)?;
    Ok(output)
}
