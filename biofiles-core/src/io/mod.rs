//! Input and output plumbing shared by the transforms
//!
//! Inputs are read whole into memory (gzip-compressed inputs are inflated
//! transparently). Outputs are staged in a temporary file next to their
//! destination and renamed into place, so a failed run never leaves a
//! truncated file under the final name.

use std::fs::{self, File};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

#[cfg(feature = "gzip")]
use flate2::read::MultiGzDecoder;

use crate::error::{BioFilesError, Result};

/// Read an entire input file as text.
pub fn read_input<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| BioFilesError::io(path, e))?;
    let mut text = String::new();

    #[cfg(feature = "gzip")]
    if is_gzipped(path) {
        MultiGzDecoder::new(file)
            .read_to_string(&mut text)
            .map_err(|e| BioFilesError::io(path, e))?;
        log::debug!("Inflated {} ({} bytes)", path.display(), text.len());
        return Ok(text);
    }

    BufReader::new(file)
        .read_to_string(&mut text)
        .map_err(|e| BioFilesError::io(path, e))?;
    log::debug!("Read {} ({} bytes)", path.display(), text.len());
    Ok(text)
}

#[cfg(feature = "gzip")]
fn is_gzipped(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext.eq_ignore_ascii_case("gz"))
}

/// Write `contents` to `path`, creating the parent directory if needed.
pub fn write_output<P: AsRef<Path>>(path: P, contents: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| BioFilesError::io(&dir, e))?;

    let mut staged = NamedTempFile::new_in(&dir).map_err(|e| BioFilesError::io(&dir, e))?;
    staged
        .write_all(contents.as_bytes())
        .and_then(|_| staged.flush())
        .map_err(|e| BioFilesError::io(path, e))?;
    staged
        .persist(path)
        .map_err(|e| BioFilesError::io(path, e.error))?;

    log::info!("Wrote {}", path.display());
    Ok(())
}

/// Split a line (as yielded by `str::split_inclusive('\n')`) into its
/// content and its terminator (`"\n"`, `"\r\n"` or `""`).
pub fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(content) = line.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = line.strip_suffix('\n') {
        (content, "\n")
    } else {
        (line, "")
    }
}

/// Directory holding `input`, or `.` for a bare file name.
pub fn input_dir<P: AsRef<Path>>(input: P) -> PathBuf {
    match input.as_ref().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
