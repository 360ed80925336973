use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod error;

use config::Config;

#[derive(Parser)]
#[command(name = "biofiles")]
#[command(about = "biofiles - small transformations over FASTA, GenBank and BLAST files")]
#[command(version)]
#[command(long_about = "
biofiles reformats and extracts data from common bioinformatics text files.

Examples:
  biofiles flatten reads.fasta
  biofiles select genome.gbk -g thrA -g thrC --before 2 --after 2
  biofiles rotate plasmid.fasta --shift 120
  biofiles blast results.txt -o best_hits
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Print a JSON report of the written file to stdout
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Join multi-line FASTA sequences into one line per record
    Flatten {
        /// Input FASTA file
        input: PathBuf,

        /// Output file name (default: oneline_result_<input>)
        #[arg(short, long)]
        output: Option<String>,

        /// Output directory (default: the input's directory)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Write the CDS neighbourhood of genes in a GenBank file as FASTA
    Select {
        /// Input GenBank file
        input: PathBuf,

        /// Gene of interest (repeatable)
        #[arg(short, long = "gene", required = true)]
        genes: Vec<String>,

        /// Neighbour CDSs before each gene
        #[arg(long)]
        before: Option<usize>,

        /// Neighbour CDSs after each gene
        #[arg(long)]
        after: Option<usize>,

        /// Keep the windows of all genes instead of only the last one
        #[arg(long)]
        all_windows: bool,

        /// Output file name (default: CDS_selected_from_gbk_<input stem>)
        #[arg(short, long)]
        output: Option<String>,

        /// Base directory for the selection subdirectory (default: .)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Move the first SHIFT characters of each sequence line to its end
    Rotate {
        /// Input FASTA file
        input: PathBuf,

        /// Number of positions to shift the sequence start by
        #[arg(short, long)]
        shift: usize,

        /// Output file name (default: shifted_by_<shift>_nucleotide_<input>)
        #[arg(short, long)]
        output: Option<String>,

        /// Output directory (default: .)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Extract the best-hit description of every query in a BLAST report
    Blast {
        /// BLAST text report
        input: PathBuf,

        /// Output file name (default: best_<input stem>.txt)
        #[arg(short, long)]
        output: Option<String>,

        /// Output directory (default: .)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Append .fasta instead of .txt to custom names without .txt
        #[arg(long)]
        legacy_suffix: bool,
    },

    /// Print an example biofiles.toml
    Config,
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let report = match cli.command {
        Commands::Flatten { input, output, out_dir } => {
            commands::flatten(&config, &input, output.as_deref(), out_dir.as_deref())?
        }
        Commands::Select {
            input,
            genes,
            before,
            after,
            all_windows,
            output,
            out_dir,
        } => commands::select(
            &config,
            &input,
            genes,
            before,
            after,
            all_windows,
            output.as_deref(),
            out_dir.as_deref(),
        )?,
        Commands::Rotate { input, shift, output, out_dir } => {
            commands::rotate(&config, &input, shift, output.as_deref(), out_dir.as_deref())?
        }
        Commands::Blast { input, output, out_dir, legacy_suffix } => {
            commands::blast(&config, &input, output.as_deref(), out_dir.as_deref(), legacy_suffix)?
        }
        Commands::Config => {
            print!("{}", Config::example_toml()?);
            return Ok(());
        }
    };

    log::info!("Output: {}", report.output.display());
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", error::format_error_with_suggestions(&err));
        std::process::exit(error::exit_code(&err));
    }
}
