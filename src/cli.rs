//! Command-line surface of the `cladecut` binary.

use crate::extract::{
    DEFAULT_POLYTOMY_REPORT_THRESHOLD, DEFAULT_TAXON_TAG, ExpandMode, Extraction, ScanStats,
    SubtreeExtractor,
};
use crate::parser::{ByteParser, ParsingError};
use clap::{ArgAction, Parser};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Extract the smallest clade spanning the given taxa from a (huge) Newick tree.
#[derive(Parser, Debug)]
#[command(name = "cladecut", version)]
pub struct Cli {
    /// The tree file in Newick form [default: stdin]
    #[arg(value_name = "TREEFILE")]
    pub input: Option<PathBuf>,

    /// The output tree file [default: stdout]
    #[arg(value_name = "OUTFILE")]
    pub output: Option<PathBuf>,

    /// The taxa to search for, matched against the name in front of the tag
    #[arg(short = 't', long = "taxa", num_args = 1.., required = true, value_name = "NAME")]
    pub taxa: Vec<String>,

    /// Expand a taxon labelling an internal vertex into its whole clade
    /// [default: true for a single taxon, false otherwise]
    #[arg(
        short = 'x',
        long = "expand_taxa",
        visible_alias = "expand-taxa",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub expand_taxa: Option<bool>,

    /// Tag separating the taxon name from its numeric id in labels
    #[arg(long, default_value = DEFAULT_TAXON_TAG)]
    pub tag: String,

    /// Log groups with more than this many children (with -vv)
    #[arg(long, default_value_t = DEFAULT_POLYTOMY_REPORT_THRESHOLD, value_name = "N")]
    pub polytomy_threshold: usize,

    /// Increase logging verbosity (-v: summary, -vv: matches, -vvv: everything)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The extractor configured by the command-line flags.
    pub fn extractor(&self) -> SubtreeExtractor {
        let mut extractor = SubtreeExtractor::new(self.taxa.iter().cloned())
            .with_taxon_tag(self.tag.as_str())
            .with_polytomy_report_threshold(self.polytomy_threshold);
        if let Some(expand) = self.expand_taxa {
            extractor = extractor.with_expand_mode(if expand {
                ExpandMode::Expand
            } else {
                ExpandMode::Collapsed
            });
        }
        extractor
    }
}

// =#========================================================================#=
// CLI ERROR
// =#========================================================================$=
/// Reasons the binary exits unsuccessfully.
#[derive(Error, Debug)]
pub enum CliError {
    /// Malformed input or input that could not be read
    #[error(transparent)]
    Parsing(#[from] ParsingError),
    /// The result could not be written
    #[error("Could not write output - {0}")]
    Output(#[from] io::Error),
    /// Some requested taxa are not in the tree
    #[error("{}", not_found_message(.0))]
    NotFound(Vec<String>),
    /// The taxa were found in clades that could not be merged
    #[error("Taxa found in {} disjoint clades:\n{}", .0.len(), .0.join("\n"))]
    Disjoint(Vec<String>),
}

fn not_found_message(missing: &[String]) -> String {
    missing
        .iter()
        .map(|taxon| format!("Could not find taxon '{taxon}' in the tree"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl CliError {
    /// Exit status: 1 if the taxa do not yield a single clade, 2 for
    /// malformed input and I/O failures.
    pub fn exit_status(&self) -> u8 {
        match self {
            CliError::NotFound(_) | CliError::Disjoint(_) => 1,
            CliError::Parsing(_) | CliError::Output(_) => 2,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

// ============================================================================
// Running
// ============================================================================
/// Reads the input, extracts the subtree and writes it, followed by a newline.
///
/// Nothing is written (and no output file created) unless a single clade
/// was extracted.
pub fn run(cli: &Cli) -> Result<ScanStats, CliError> {
    run_with(cli, io::stdin().lock(), io::stdout().lock())
}

/// [run] with `stdin` and `stdout` standing in for the standard streams
/// whenever input or output is absent or `-`.
pub fn run_with<R: Read, W: Write>(
    cli: &Cli,
    stdin: R,
    stdout: W,
) -> Result<ScanStats, CliError> {
    let parser = match as_path(&cli.input) {
        Some(path) => {
            info!(input = %path.display(), "reading tree");
            ByteParser::from_file(path).map_err(ParsingError::from)?
        }
        None => ByteParser::from_reader(stdin).map_err(ParsingError::from)?,
    };

    let (extraction, stats) = cli.extractor().extract(parser)?;
    let newick = match extraction {
        Extraction::Found(newick) => newick,
        Extraction::NotFound { missing } => return Err(CliError::NotFound(missing)),
        Extraction::Disjoint { clades } => return Err(CliError::Disjoint(clades)),
    };

    match as_path(&cli.output) {
        Some(path) => write_newick(File::create(path)?, &newick)?,
        None => write_newick(stdout, &newick)?,
    }
    Ok(stats)
}

/// `None` and `-` both stand for the standard streams.
fn as_path(arg: &Option<PathBuf>) -> Option<&Path> {
    arg.as_deref().filter(|path| *path != Path::new("-"))
}

fn write_newick<W: Write>(writer: W, newick: &str) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);
    writer.write_all(newick.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Installs a stderr `tracing` subscriber; `RUST_LOG` takes precedence
/// over the verbosity flag.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cladecut={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
