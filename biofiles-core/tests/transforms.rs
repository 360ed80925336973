use std::fs;
use std::io::Write;

use biofiles_core::{ErrorKind, NamingConfig};
use tempfile::{tempdir, NamedTempFile};

#[cfg(feature = "flatten")]
#[test]
fn flatten_next_to_input() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("reads.fasta");
    fs::write(&input, ">r1 first read\nACGT\nACGT\nAC\n>r2\nTTTT\nGG").unwrap();

    let out = biofiles_core::flatten_fasta(&input, None, None, &NamingConfig::default()).expect("flatten");

    assert_eq!(out, dir.path().join("oneline_result_reads.fasta"));
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        ">r1 first read\nACGTACGTAC\n>r2\nTTTTGG\n"
    );

    // Flattening the result again changes nothing
    let again = biofiles_core::flatten_fasta(&out, Some("again"), None, &NamingConfig::default()).unwrap();
    assert_eq!(again.file_name().unwrap(), "again.fasta");
    assert_eq!(fs::read(&again).unwrap(), fs::read(&out).unwrap());
}

#[cfg(feature = "flatten")]
#[test]
fn flatten_missing_input() {
    let dir = tempdir().unwrap();
    let err = biofiles_core::flatten_fasta(dir.path().join("nope.fa"), None, None, &NamingConfig::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[cfg(feature = "rotate")]
#[test]
fn rotate_into_out_dir() {
    let dir = tempdir().unwrap();
    let mut input = NamedTempFile::new_in(dir.path()).unwrap();
    write!(input, ">plasmid\nATGCCGTA\n").unwrap();
    input.as_file().sync_all().unwrap();

    let out = biofiles_core::rotate_fasta(input.path(), 3, Some("rotated"), Some(dir.path()), &NamingConfig::default())
        .expect("rotate");

    assert_eq!(out, dir.path().join("rotated.fasta"));
    assert_eq!(fs::read_to_string(&out).unwrap(), ">plasmid\n\nCCGTAATG\n");
}

#[cfg(feature = "rotate")]
#[test]
fn rotate_default_name() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("genome.fa");
    fs::write(&input, ">g\nAC\n").unwrap();

    let out = biofiles_core::rotate_fasta(&input, 7, None, Some(dir.path()), &NamingConfig::default()).unwrap();
    assert_eq!(out.file_name().unwrap(), "shifted_by_7_nucleotide_genome.fa.fasta");
    assert_eq!(fs::read_to_string(&out).unwrap(), ">g\n\nAC\n");
}

#[cfg(feature = "blast")]
#[test]
fn blast_best_hits_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("hits.blast.txt");
    let mut report = String::new();
    for i in 1..=3 {
        report.push_str(&format!("Query #{}: contig_{} Query ID: lcl|Query_{}\n\n", i, i, i));
        report.push_str("Description                          Scientific Name    Max Score\n");
        report.push_str(&format!("protein {}    Bacillus subtilis    {}\n", i, 100 + i));
        report.push_str("other protein    Bacillus cereus    50\n\n");
    }
    fs::write(&input, report).unwrap();

    let out = biofiles_core::parse_blast_output(&input, None, Some(dir.path()), &NamingConfig::default())
        .expect("parse blast");

    assert_eq!(out, dir.path().join("best_hits.txt"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "protein 1\nprotein 2\nprotein 3\n");
}

#[cfg(feature = "blast")]
#[test]
fn blast_legacy_suffix() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("hits.txt");
    fs::write(&input, "Query #1\nDescription  Name\nhit    x\n").unwrap();

    let naming = NamingConfig { legacy_blast_suffix: true, ..Default::default() };
    let out = biofiles_core::parse_blast_output(&input, Some("best"), Some(dir.path()), &naming).unwrap();
    assert_eq!(out.file_name().unwrap(), "best.fasta");

    let out = biofiles_core::parse_blast_output(&input, Some("best"), Some(dir.path()), &NamingConfig::default())
        .unwrap();
    assert_eq!(out.file_name().unwrap(), "best.txt");
}
