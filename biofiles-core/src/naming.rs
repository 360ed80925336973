//! Output file naming shared by all operations
//!
//! Every operation derives a default output name from its input file name
//! and enforces an extension on whatever name it ends up with. Templates
//! understand three placeholders:
//!
//! * `{name}`  - the input basename without a `.gz` suffix, e.g. `reads.fa`
//! * `{stem}`  - the basename up to its first `.`, e.g. `reads`
//! * `{shift}` - the rotation offset (rotator only)

use serde::{Deserialize, Serialize};
use std::path::Path;

pub const FASTA_EXT: &str = ".fasta";
pub const TXT_EXT: &str = ".txt";

/// Values substituted into a naming template.
#[derive(Debug, Clone, Default)]
pub struct TemplateVars {
    pub name: String,
    pub stem: String,
    pub shift: Option<usize>,
}

impl TemplateVars {
    pub fn from_input<P: AsRef<Path>>(input: P) -> Self {
        let file_name = input
            .as_ref()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        // Outputs are always plain text, so a compression suffix is dropped
        let name = match file_name.strip_suffix(".gz") {
            Some(inner) if !inner.is_empty() => inner.to_string(),
            _ => file_name,
        };
        let stem = name.split('.').next().unwrap_or_default().to_string();
        Self { name, stem, shift: None }
    }

    pub fn with_shift(mut self, shift: usize) -> Self {
        self.shift = Some(shift);
        self
    }

    fn render(&self, template: &str) -> String {
        let mut rendered = template
            .replace("{name}", &self.name)
            .replace("{stem}", &self.stem);
        if let Some(shift) = self.shift {
            rendered = rendered.replace("{shift}", &shift.to_string());
        }
        rendered
    }
}

/// Default-name template plus extension policy for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNaming {
    template: String,
    recognised_ext: &'static str,
    appended_ext: &'static str,
}

impl OutputNaming {
    pub fn new<S: Into<String>>(template: S, recognised_ext: &'static str, appended_ext: &'static str) -> Self {
        Self {
            template: template.into(),
            recognised_ext,
            appended_ext,
        }
    }

    /// Pick the explicit name or render the default one, then append the
    /// extension unless the name already ends with the recognised one.
    pub fn resolve(&self, vars: &TemplateVars, explicit: Option<&str>) -> String {
        let mut name = match explicit {
            Some(name) => name.to_string(),
            None => vars.render(&self.template),
        };
        if !name.ends_with(self.recognised_ext) {
            name.push_str(self.appended_ext);
        }
        name
    }
}

fn default_flatten_template() -> String { "oneline_result_{name}".to_string() }
fn default_select_template() -> String { "CDS_selected_from_gbk_{stem}".to_string() }
fn default_rotate_template() -> String { "shifted_by_{shift}_nucleotide_{name}".to_string() }
fn default_blast_template() -> String { "best_{stem}.txt".to_string() }

/// Naming templates for the four operations, loadable from the `[naming]`
/// table of `biofiles.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamingConfig {
    #[serde(default = "default_flatten_template")]
    pub flatten_template: String,

    #[serde(default = "default_select_template")]
    pub select_template: String,

    #[serde(default = "default_rotate_template")]
    pub rotate_template: String,

    #[serde(default = "default_blast_template")]
    pub blast_template: String,

    /// Append `.fasta` instead of `.txt` to custom BLAST output names that
    /// lack a `.txt` extension.
    #[serde(default)]
    pub legacy_blast_suffix: bool,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            flatten_template: default_flatten_template(),
            select_template: default_select_template(),
            rotate_template: default_rotate_template(),
            blast_template: default_blast_template(),
            legacy_blast_suffix: false,
        }
    }
}

impl NamingConfig {
    pub fn flatten(&self) -> OutputNaming {
        OutputNaming::new(&self.flatten_template, FASTA_EXT, FASTA_EXT)
    }

    pub fn select(&self) -> OutputNaming {
        OutputNaming::new(&self.select_template, FASTA_EXT, FASTA_EXT)
    }

    pub fn rotate(&self) -> OutputNaming {
        OutputNaming::new(&self.rotate_template, FASTA_EXT, FASTA_EXT)
    }

    pub fn blast(&self) -> OutputNaming {
        let appended = if self.legacy_blast_suffix { FASTA_EXT } else { TXT_EXT };
        OutputNaming::new(&self.blast_template, TXT_EXT, appended)
    }
}
