//! biofiles core library
//!
//! Line-oriented transforms over FASTA, GenBank and BLAST text files.

pub mod error;
pub mod io;
pub mod naming;
#[cfg(feature = "flatten")] pub mod flatten;
#[cfg(feature = "genbank")] pub mod genbank;
#[cfg(feature = "rotate")] pub mod rotate;
#[cfg(feature = "blast")] pub mod blast;

// Re-export commonly used types and functions
pub use error::{BioFilesError, ErrorKind, Result};
pub use naming::{NamingConfig, OutputNaming, TemplateVars};
#[cfg(feature = "flatten")]
pub use flatten::{flatten_fasta, flatten_text};
#[cfg(feature = "genbank")]
pub use genbank::{select_genes_to_fasta, CdsEntry, CdsTable, SelectRequest, SelectionMode};
#[cfg(feature = "rotate")]
pub use rotate::{rotate_fasta, rotate_line, rotate_text};
#[cfg(feature = "blast")]
pub use blast::{extract_best_hits, parse_blast_output};

/// Version information for the biofiles core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
