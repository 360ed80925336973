//! Cyclic rotation of FASTA sequence lines
//!
//! Rotation is applied to every physical sequence line on its own, not to
//! the whole record.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::io::{read_input, split_terminator, write_output};
use crate::naming::{NamingConfig, TemplateVars};

/// Move the first `shift` characters of `line` to its end.
///
/// A shift at or beyond the line length leaves the line unchanged.
pub fn rotate_line(line: &str, shift: usize) -> String {
    match line.char_indices().nth(shift) {
        Some((split, _)) => {
            let (head, tail) = line.split_at(split);
            format!("{}{}", tail, head)
        }
        None => line.to_string(),
    }
}

/// Rotate every sequence line of `text` by `shift`.
///
/// Header lines are copied and followed by an extra blank line.
pub fn rotate_text(text: &str, shift: usize) -> String {
    let mut out = String::with_capacity(text.len() + 64);
    for line in text.split_inclusive('\n') {
        if line.starts_with('>') {
            out.push_str(line);
            out.push('\n');
        } else {
            let (content, terminator) = split_terminator(line);
            out.push_str(&rotate_line(content, shift));
            out.push_str(terminator);
        }
    }
    out
}

/// Rotate the sequence lines of `input` and return the written path.
///
/// Without `output_name` the file is called
/// `shifted_by_<shift>_nucleotide_<input name>`; `.fasta` is appended when
/// missing. The file is written to `out_dir`, or the current directory.
pub fn rotate_fasta<P: AsRef<Path>>(
    input: P,
    shift: usize,
    output_name: Option<&str>,
    out_dir: Option<&Path>,
    naming: &NamingConfig,
) -> Result<PathBuf> {
    let input = input.as_ref();
    let text = read_input(input)?;
    let rotated = rotate_text(&text, shift);

    let vars = TemplateVars::from_input(input).with_shift(shift);
    let name = naming.rotate().resolve(&vars, output_name);
    let output = out_dir.unwrap_or_else(|| Path::new(".")).join(name);
    write_output(&output, &rotated)?;
    Ok(output)
}
