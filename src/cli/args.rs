//! Command line argument parsing for the Lexnet CLI using clap.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::vocabulary::VocabularyConfig;

/// Lexnet - relatedness queries over synset hierarchies
#[derive(Parser, Debug, Clone)]
#[command(name = "lexnet")]
#[command(about = "Shortest ancestral path and outcast queries over synset hierarchies")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct LexnetArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl LexnetArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show vocabulary statistics
    Stats(StatsArgs),

    /// Show the synsets containing a term
    Lookup(LookupArgs),

    /// Distance between two terms
    Distance(PairArgs),

    /// Common ancestor of two terms, with both paths
    Ancestor(PairArgs),

    /// Find the outcast in each file of terms
    Outcast(OutcastArgs),

    /// Shortest ancestral path between two vertices of a raw digraph
    Sap(SapArgs),

    /// List every term
    Terms(TermsArgs),
}

/// Where to load the vocabulary from.
#[derive(Args, Debug, Clone)]
pub struct VocabularyArgs {
    /// JSON configuration file naming both relations
    #[arg(short, long, value_name = "CONFIG_FILE", env = "LEXNET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Synset relation (overrides the configuration file)
    #[arg(short, long, value_name = "SYNSETS_FILE")]
    pub synsets: Option<PathBuf>,

    /// Hypernym relation (overrides the configuration file)
    #[arg(long, value_name = "HYPERNYMS_FILE")]
    pub hypernyms: Option<PathBuf>,
}

impl VocabularyArgs {
    /// Resolve the effective configuration.
    pub fn resolve(&self) -> Result<VocabularyConfig> {
        let mut config = match &self.config {
            Some(path) => VocabularyConfig::load(path)?,
            None => VocabularyConfig::default(),
        };
        if let Some(synsets) = &self.synsets {
            config.synsets = synsets.clone();
        }
        if let Some(hypernyms) = &self.hypernyms {
            config.hypernyms = hypernyms.clone();
        }
        Ok(config)
    }
}

/// Arguments for showing statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    #[command(flatten)]
    pub vocabulary: VocabularyArgs,
}

/// Arguments for looking up a term
#[derive(Parser, Debug, Clone)]
pub struct LookupArgs {
    #[command(flatten)]
    pub vocabulary: VocabularyArgs,

    /// Term to look up (case-sensitive)
    #[arg(value_name = "TERM")]
    pub term: String,
}

/// Arguments for commands over a pair of terms
#[derive(Parser, Debug, Clone)]
pub struct PairArgs {
    #[command(flatten)]
    pub vocabulary: VocabularyArgs,

    /// First term
    #[arg(value_name = "TERM_A")]
    pub term_a: String,

    /// Second term
    #[arg(value_name = "TERM_B")]
    pub term_b: String,
}

/// Arguments for outcast detection
#[derive(Parser, Debug, Clone)]
pub struct OutcastArgs {
    #[command(flatten)]
    pub vocabulary: VocabularyArgs,

    /// Files of whitespace-separated terms, one group per file
    #[arg(value_name = "TERMS_FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Show every term's summed distance
    #[arg(long)]
    pub scores: bool,
}

/// Arguments for raw digraph queries
#[derive(Parser, Debug, Clone)]
pub struct SapArgs {
    /// Digraph in edge-list format (V, E, then E pairs)
    #[arg(value_name = "DIGRAPH_FILE")]
    pub digraph: PathBuf,

    /// Comma-separated source vertices
    #[arg(value_name = "V")]
    pub v: VertexList,

    /// Comma-separated target vertices
    #[arg(value_name = "W")]
    pub w: VertexList,
}

/// A comma-separated list of vertex ids, such as `3,7,12`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexList(pub Vec<usize>);

impl FromStr for VertexList {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let ids = s
            .split(',')
            .map(|id| {
                id.trim()
                    .parse::<usize>()
                    .map_err(|_| format!("invalid vertex id: {id:?}"))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(VertexList(ids))
    }
}

/// Arguments for listing terms
#[derive(Parser, Debug, Clone)]
pub struct TermsArgs {
    #[command(flatten)]
    pub vocabulary: VocabularyArgs,

    /// Sort terms before printing
    #[arg(long)]
    pub sorted: bool,

    /// Maximum number of terms to print
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
