//! Error types shared by every biofiles operation

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Broad category of a [`BioFilesError`], used by callers that need to
/// react differently to bad input files and bad requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Lookup,
    Validation,
}

#[derive(Debug, Error)]
pub enum BioFilesError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Gene '{gene}' has no recorded CDS coordinate")]
    GeneNotFound { gene: String },

    #[error(
        "Too many neighbour CDSs before gene '{gene}' requested: {requested} requested, {available} available"
    )]
    TooManyBefore {
        gene: String,
        requested: usize,
        available: usize,
    },

    #[error(
        "Too many neighbour CDSs after gene '{gene}' requested: {requested} requested, {available} available"
    )]
    TooManyAfter {
        gene: String,
        requested: usize,
        available: usize,
    },
}

impl BioFilesError {
    pub fn io<P: AsRef<Path>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn gene_not_found<S: Into<String>>(gene: S) -> Self {
        Self::GeneNotFound { gene: gene.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } => ErrorKind::Io,
            Self::GeneNotFound { .. } => ErrorKind::Lookup,
            Self::TooManyBefore { .. } | Self::TooManyAfter { .. } => ErrorKind::Validation,
        }
    }
}

/// Result type for biofiles operations
pub type Result<T> = std::result::Result<T, BioFilesError>;
