//! Command implementations for the biofiles CLI

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use biofiles_core::SelectRequest;

use crate::config::Config;

/// Machine-readable summary printed with `--json`.
#[derive(Debug, Serialize)]
pub struct OperationReport {
    pub operation: &'static str,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl OperationReport {
    fn new(operation: &'static str, input: &Path, output: PathBuf) -> Self {
        Self {
            operation,
            input: input.to_path_buf(),
            output,
        }
    }
}

pub fn flatten(config: &Config, input: &Path, output: Option<&str>, out_dir: Option<&Path>) -> Result<OperationReport> {
    log::info!("Flattening {}", input.display());
    let written = biofiles_core::flatten_fasta(input, output, out_dir, &config.naming)
        .with_context(|| format!("Failed to flatten {}", input.display()))?;
    Ok(OperationReport::new("flatten", input, written))
}

#[allow(clippy::too_many_arguments)]
pub fn select(
    config: &Config,
    input: &Path,
    genes: Vec<String>,
    before: Option<usize>,
    after: Option<usize>,
    all_windows: bool,
    output: Option<&str>,
    out_dir: Option<&Path>,
) -> Result<OperationReport> {
    let request = SelectRequest {
        genes,
        n_before: before.unwrap_or(config.select.n_before),
        n_after: after.unwrap_or(config.select.n_after),
        mode: config.select.mode(all_windows),
        out_subdir: config.select.out_subdir.clone(),
    };
    log::info!(
        "Selecting CDS neighbours of {:?} from {} ({} before, {} after, {:?})",
        request.genes,
        input.display(),
        request.n_before,
        request.n_after,
        request.mode
    );

    let written = biofiles_core::select_genes_to_fasta(input, &request, output, out_dir, &config.naming)
        .with_context(|| format!("Failed to select genes from {}", input.display()))?;
    log::info!("FASTA file is ready");
    Ok(OperationReport::new("select", input, written))
}

pub fn rotate(config: &Config, input: &Path, shift: usize, output: Option<&str>, out_dir: Option<&Path>) -> Result<OperationReport> {
    log::info!("Shifting sequence start of {} by {}", input.display(), shift);
    let written = biofiles_core::rotate_fasta(input, shift, output, out_dir, &config.naming)
        .with_context(|| format!("Failed to rotate {}", input.display()))?;
    Ok(OperationReport::new("rotate", input, written))
}

pub fn blast(config: &Config, input: &Path, output: Option<&str>, out_dir: Option<&Path>, legacy_suffix: bool) -> Result<OperationReport> {
    log::info!("Extracting best BLAST hits from {}", input.display());
    let mut naming = config.naming.clone();
    naming.legacy_blast_suffix |= legacy_suffix;
    let written = biofiles_core::parse_blast_output(input, output, out_dir, &naming)
        .with_context(|| format!("Failed to parse BLAST output {}", input.display()))?;
    Ok(OperationReport::new("blast", input, written))
}
