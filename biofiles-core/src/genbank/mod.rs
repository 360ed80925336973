//! GenBank CDS extraction and neighbour selection
//!
//! A GenBank flat file is scanned once, line by line, collecting every CDS
//! feature in order of appearance together with its `/gene` name and its
//! `/translation`. Neighbour selection then picks a contiguous window of
//! CDS entries around each requested gene and writes it out as FASTA.

pub mod tokens;

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use crate::error::{BioFilesError, Result};
use crate::io::{read_input, write_output};
use crate::naming::{NamingConfig, TemplateVars};

/// Directory (below the output base) that receives selected CDS files.
pub const SELECTED_SUBDIR: &str = "fasta_selected_from_gbk";

/// One CDS feature.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CdsEntry {
    pub coordinate: String,
    /// Empty when the CDS carries no `/gene` qualifier
    pub gene_name: String,
    pub translation: String,
}

impl CdsEntry {
    fn new(coordinate: &str) -> Self {
        Self {
            coordinate: coordinate.to_string(),
            ..Default::default()
        }
    }

    /// `>{coordinate} gene:{gene_name}` followed by the translation.
    pub fn to_fasta(&self) -> String {
        format!(">{} gene:{}\n{}\n", self.coordinate, self.gene_name, self.translation)
    }
}

/// Where the scanner is inside the feature table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Outside any CDS feature
    Idle,
    /// Inside a CDS feature, reading qualifiers
    InCds,
    /// Inside a multi-line `/translation` value
    InTranslation,
}

/// Ordered CDS entries plus the gene -> coordinate index.
#[derive(Debug, Clone, Default)]
pub struct CdsTable {
    entries: Vec<CdsEntry>,
    gene_index: HashMap<String, String>,
}

struct CdsScanner {
    state: ScanState,
    current: Option<CdsEntry>,
    table: CdsTable,
}

impl CdsScanner {
    fn new() -> Self {
        Self {
            state: ScanState::Idle,
            current: None,
            table: CdsTable::default(),
        }
    }

    fn feed(&mut self, line: &str) {
        if tokens::is_cds_line(line) {
            self.finalize();
            self.current = Some(CdsEntry::new(tokens::cds_coordinate(line)));
            self.state = ScanState::InCds;
            return;
        }
        if tokens::is_origin_line(line) {
            self.finalize();
            self.state = ScanState::Idle;
            return;
        }

        let Some(entry) = self.current.as_mut() else {
            // /gene and /translation before the first CDS belong to nothing
            return;
        };

        let state = self.state;
        match state {
            ScanState::Idle => {}
            ScanState::InTranslation if tokens::is_feature_key_line(line) => {
                self.state = ScanState::Idle;
            }
            ScanState::InTranslation => {
                entry.translation.push_str(tokens::continuation_text(line));
                if tokens::closes_quote(line) {
                    self.state = ScanState::InCds;
                }
            }
            ScanState::InCds => {
                if tokens::is_feature_key_line(line) {
                    self.state = ScanState::Idle;
                } else if tokens::is_gene_tag_line(line) {
                    if let Some(name) = tokens::quoted_value(line) {
                        entry.gene_name = name.to_string();
                        self.table
                            .gene_index
                            .insert(name.to_string(), entry.coordinate.clone());
                    }
                } else if tokens::is_translation_tag_line(line) {
                    entry.translation.push_str(tokens::quoted_value(line).unwrap_or_default());
                    if !tokens::closes_on_same_line(line) {
                        self.state = ScanState::InTranslation;
                    }
                }
            }
        }
    }

    fn finalize(&mut self) {
        if let Some(entry) = self.current.take() {
            self.table.entries.push(entry);
        }
    }

    fn finish(mut self) -> CdsTable {
        self.finalize();
        self.table
    }
}

impl CdsTable {
    /// Parse the CDS features of a GenBank flat file held in memory.
    pub fn parse(text: &str) -> Self {
        let mut scanner = CdsScanner::new();
        for line in text.lines() {
            scanner.feed(line);
        }
        let table = scanner.finish();
        log::debug!(
            "Parsed {} CDS entries, {} named genes",
            table.entries.len(),
            table.gene_index.len()
        );
        if table.entries.is_empty() {
            log::warn!("No CDS features found");
        }
        table
    }

    /// Read and parse a GenBank file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = read_input(path)?;
        Ok(Self::parse(&text))
    }

    pub fn entries(&self) -> &[CdsEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// CDS coordinates in order of appearance.
    pub fn coordinates(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.coordinate.as_str())
    }

    /// Coordinate recorded for `gene`, if any.
    pub fn gene_coordinate(&self, gene: &str) -> Option<&str> {
        self.gene_index.get(gene).map(String::as_str)
    }

    pub fn gene_index(&self) -> &HashMap<String, String> {
        &self.gene_index
    }

    /// Index of the CDS named by `gene` (first CDS with its coordinate).
    pub fn position_of(&self, gene: &str) -> Result<usize> {
        self.gene_coordinate(gene)
            .and_then(|coord| self.entries.iter().position(|e| e.coordinate == coord))
            .ok_or_else(|| BioFilesError::gene_not_found(gene))
    }

    /// Inclusive window of entry indices around `gene`.
    pub fn window(&self, gene: &str, n_before: usize, n_after: usize) -> Result<RangeInclusive<usize>> {
        let position = self.position_of(gene)?;
        let following = self.entries.len() - position - 1;

        if position < n_before {
            return Err(BioFilesError::TooManyBefore {
                gene: gene.to_string(),
                requested: n_before,
                available: position,
            });
        }
        if following < n_after {
            return Err(BioFilesError::TooManyAfter {
                gene: gene.to_string(),
                requested: n_after,
                available: following,
            });
        }
        Ok(position - n_before..=position + n_after)
    }

    /// Entries around every requested gene.
    ///
    /// Every gene is validated; with [`SelectionMode::LastGene`] only the
    /// window of the last gene is returned.
    pub fn select<S: AsRef<str>>(
        &self,
        genes: &[S],
        n_before: usize,
        n_after: usize,
        mode: SelectionMode,
    ) -> Result<Vec<&CdsEntry>> {
        let mut selected = Vec::new();
        for gene in genes {
            let window = self.window(gene.as_ref(), n_before, n_after)?;
            if mode == SelectionMode::LastGene {
                selected.clear();
            }
            selected.extend(self.entries[window].iter());
        }
        Ok(selected)
    }
}

/// How windows of several requested genes are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Keep only the window of the last requested gene
    #[default]
    LastGene,
    /// Concatenate the windows of all requested genes in request order
    PerGene,
}

/// Parameters of one neighbour-selection run.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectRequest {
    pub genes: Vec<String>,
    pub n_before: usize,
    pub n_after: usize,
    pub mode: SelectionMode,
    /// Directory below the output base that receives the FASTA file
    pub out_subdir: String,
}

impl Default for SelectRequest {
    fn default() -> Self {
        Self {
            genes: Vec::new(),
            n_before: 1,
            n_after: 1,
            mode: SelectionMode::default(),
            out_subdir: SELECTED_SUBDIR.to_string(),
        }
    }
}

impl SelectRequest {
    pub fn new<I, S>(genes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            genes: genes.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn neighbours(mut self, n_before: usize, n_after: usize) -> Self {
        self.n_before = n_before;
        self.n_after = n_after;
        self
    }

    pub fn mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Render selected entries as FASTA.
pub fn entries_to_fasta<'a, I: IntoIterator<Item = &'a CdsEntry>>(entries: I) -> String {
    entries.into_iter().map(CdsEntry::to_fasta).collect()
}

/// Write the CDS neighbourhood of the requested genes in `input` to a FASTA
/// file below `<out_dir>/<out_subdir>` and return its path.
///
/// Selection is validated completely before the output file is created.
pub fn select_genes_to_fasta<P: AsRef<Path>>(
    input: P,
    request: &SelectRequest,
    output_name: Option<&str>,
    out_dir: Option<&Path>,
    naming: &NamingConfig,
) -> Result<PathBuf> {
    let input = input.as_ref();
    let table = CdsTable::from_path(input)?;

    if request.genes.is_empty() {
        log::warn!("No genes requested, output will be empty");
    }
    let selected = table.select(&request.genes, request.n_before, request.n_after, request.mode)?;
    log::debug!("Selected {} CDS entries", selected.len());

    let name = naming.select().resolve(&TemplateVars::from_input(input), output_name);
    let output = out_dir
        .unwrap_or_else(|| Path::new("."))
        .join(&request.out_subdir)
        .join(name);
    write_output(&output, &entries_to_fasta(selected))?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gbk(features: &[(&str, Option<&str>, &str)]) -> String {
        let mut text = String::from(
            "LOCUS       TEST                     400 bp    DNA     linear   BCT\n\
             FEATURES             Location/Qualifiers\n\
             \x20    source          1..400\n",
        );
        for (coord, gene, translation) in features {
            if let Some(gene) = gene {
                text.push_str(&format!("     gene            {}\n", coord));
                text.push_str(&format!("                     /gene=\"{}\"\n", gene));
            }
            text.push_str(&format!("     CDS             {}\n", coord));
            if let Some(gene) = gene {
                text.push_str(&format!("                     /gene=\"{}\"\n", gene));
            }
            text.push_str("                     /codon_start=1\n");
            text.push_str(&format!("                     /translation=\"{}\"\n", translation));
        }
        text.push_str("ORIGIN      \n        1 agcttttcat tctgactgca\n//\n");
        text
    }

    fn abcd() -> CdsTable {
        CdsTable::parse(&gbk(&[
            ("1..90", Some("a"), "MA"),
            ("100..190", Some("g"), "MB"),
            ("200..290", Some("c"), "MC"),
            ("complement(300..390)", Some("d"), "MD"),
        ]))
    }

    #[test]
    fn test_parse_entries() {
        let table = abcd();
        assert_eq!(
            table.coordinates().collect::<Vec<_>>(),
            vec!["1..90", "100..190", "200..290", "complement(300..390)"]
        );
        assert_eq!(table.entries()[1].gene_name, "g");
        assert_eq!(table.entries()[1].translation, "MB");
        assert_eq!(table.gene_coordinate("d"), Some("complement(300..390)"));
    }

    #[test]
    fn test_multiline_translation() {
        let text = "     CDS             1..30\n\
                    \x20                    /gene=\"x\"\n\
                    \x20                    /translation=\"MKRIST\n\
                    \x20                    TTITTT\n\
                    \x20                    GNGAG\"\n\
                    \x20                    /note=\"after\"\n\
                    ORIGIN\n";
        let table = CdsTable::parse(text);
        assert_eq!(table.entries()[0].translation, "MKRISTTTITTTGNGAG");
    }

    #[test]
    fn test_translation_closed_by_next_feature() {
        let text = "     CDS             1..30\n\
                    \x20                    /translation=\"MKR\n\
                    \x20                    IST\n\
                    \x20    gene            40..90\n\
                    \x20                    /gene=\"y\"\n\
                    \x20    CDS             40..90\n\
                    \x20                    /gene=\"y\"\n";
        let table = CdsTable::parse(text);
        assert_eq!(table.len(), 2);
        assert_eq!(table.entries()[0].translation, "MKRIST");
        assert_eq!(table.entries()[0].gene_name, "");
        assert_eq!(table.gene_coordinate("y"), Some("40..90"));
    }

    #[test]
    fn test_tags_before_first_cds_are_ignored() {
        let text = "                     /gene=\"orphan\"\n\
                    \x20                    /translation=\"MMM\"\n\
                    \x20    CDS             5..50\n\
                    \x20                    /translation=\"MK\"\n";
        let table = CdsTable::parse(text);
        assert_eq!(table.len(), 1);
        assert_eq!(table.gene_coordinate("orphan"), None);
        assert_eq!(table.entries()[0].translation, "MK");
    }

    #[test]
    fn test_gene_name_not_carried_over() {
        let table = CdsTable::parse(&gbk(&[("1..90", Some("a"), "MA"), ("100..190", None, "MB")]));
        assert_eq!(table.entries()[0].gene_name, "a");
        assert_eq!(table.entries()[1].gene_name, "");
    }

    #[test]
    fn test_recurring_gene_last_writer_wins() {
        let table = CdsTable::parse(&gbk(&[("1..90", Some("a"), "MA"), ("100..190", Some("a"), "MB")]));
        assert_eq!(table.gene_coordinate("a"), Some("100..190"));
    }

    #[test]
    fn test_index_values_are_coordinates() {
        let table = abcd();
        let coords: Vec<&str> = table.coordinates().collect();
        for coord in table.gene_index().values() {
            assert!(coords.contains(&coord.as_str()));
        }
    }

    #[test]
    fn test_window_around_gene() {
        let table = abcd();
        let selected = table.select(&["g"], 1, 1, SelectionMode::LastGene).unwrap();
        let coords: Vec<&str> = selected.iter().map(|e| e.coordinate.as_str()).collect();
        assert_eq!(coords, vec!["1..90", "100..190", "200..290"]);
    }

    #[test]
    fn test_zero_neighbours_selects_gene_only() {
        let table = abcd();
        let selected = table.select(&["c"], 0, 0, SelectionMode::LastGene).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].gene_name, "c");
    }

    #[test]
    fn test_window_bounds() {
        let table = abcd();
        assert_eq!(table.window("a", 0, 3).unwrap(), 0..=3);
        assert!(matches!(
            table.window("g", 2, 0),
            Err(BioFilesError::TooManyBefore { requested: 2, available: 1, .. })
        ));
        assert!(matches!(
            table.window("c", 0, 2),
            Err(BioFilesError::TooManyAfter { requested: 2, available: 1, .. })
        ));
    }

    #[test]
    fn test_unknown_gene() {
        let table = abcd();
        let err = table.select(&["zzz"], 0, 0, SelectionMode::LastGene).unwrap_err();
        assert!(matches!(err, BioFilesError::GeneNotFound { ref gene } if gene == "zzz"));
    }

    #[test]
    fn test_selection_modes() {
        let table = abcd();
        let last = table.select(&["a", "d"], 0, 0, SelectionMode::LastGene).unwrap();
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].gene_name, "d");

        let all = table.select(&["a", "d"], 0, 0, SelectionMode::PerGene).unwrap();
        let genes: Vec<&str> = all.iter().map(|e| e.gene_name.as_str()).collect();
        assert_eq!(genes, vec!["a", "d"]);
    }

    #[test]
    fn test_every_gene_validated_in_last_gene_mode() {
        let table = abcd();
        let err = table.select(&["a", "d"], 1, 0, SelectionMode::LastGene).unwrap_err();
        assert!(matches!(err, BioFilesError::TooManyBefore { ref gene, .. } if gene == "a"));
    }

    #[test]
    fn test_request_defaults() {
        let request = SelectRequest::new(["thrA"]);
        assert_eq!(request.n_before, 1);
        assert_eq!(request.n_after, 1);
        assert_eq!(request.mode, SelectionMode::LastGene);
        assert_eq!(request.out_subdir, SELECTED_SUBDIR);
    }

    #[test]
    fn test_entries_to_fasta() {
        let table = abcd();
        let selected = table.select(&["g"], 0, 0, SelectionMode::LastGene).unwrap();
        assert_eq!(entries_to_fasta(selected), ">100..190 gene:g\nMB\n");
    }
}
