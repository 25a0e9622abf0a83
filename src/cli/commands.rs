//! Command implementations for the Lexnet CLI.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{LexnetError, Result};
use crate::graph::Digraph;
use crate::outlier::OutlierFinder;
use crate::sap::Sap;
use crate::vocabulary::VocabularyGraph;

/// Execute a CLI command.
pub fn execute_command(args: LexnetArgs) -> Result<()> {
    match &args.command {
        Command::Stats(stats_args) => show_stats(stats_args, &args),
        Command::Lookup(lookup_args) => lookup_term(lookup_args, &args),
        Command::Distance(pair_args) => show_distance(pair_args, &args),
        Command::Ancestor(pair_args) => show_ancestor(pair_args, &args),
        Command::Outcast(outcast_args) => find_outcasts(outcast_args, &args),
        Command::Sap(sap_args) => query_digraph(sap_args, &args),
        Command::Terms(terms_args) => list_terms(terms_args, &args),
    }
}

/// Load the vocabulary named by the command's arguments.
fn load_vocabulary(vocabulary: &VocabularyArgs) -> Result<VocabularyGraph> {
    let config = vocabulary.resolve()?;
    debug!(
        "loading synsets from {} and hypernyms from {}",
        config.synsets.display(),
        config.hypernyms.display()
    );

    let start_time = Instant::now();
    let graph = VocabularyGraph::open(&config)?;
    info!("vocabulary ready in {} ms", start_time.elapsed().as_millis());
    Ok(graph)
}

/// Show vocabulary statistics.
fn show_stats(args: &StatsArgs, cli_args: &LexnetArgs) -> Result<()> {
    let graph = load_vocabulary(&args.vocabulary)?;
    output_result("Vocabulary statistics", &graph.stats(), cli_args)
}

/// Show the synsets containing a term.
fn lookup_term(args: &LookupArgs, cli_args: &LexnetArgs) -> Result<()> {
    let graph = load_vocabulary(&args.vocabulary)?;
    let ids = graph
        .synsets_of(&args.term)
        .ok_or_else(|| {
            LexnetError::invalid_argument(format!("unknown term: {:?}", args.term))
        })?;

    let synsets = ids
        .iter()
        .filter_map(|&id| graph.synset(id).cloned())
        .collect();

    output_result(
        "Synsets containing term",
        &LookupResult {
            term: args.term.clone(),
            synsets,
        },
        cli_args,
    )
}

/// Show the distance between two terms.
fn show_distance(args: &PairArgs, cli_args: &LexnetArgs) -> Result<()> {
    let graph = load_vocabulary(&args.vocabulary)?;
    let distance = graph.distance(&args.term_a, &args.term_b)?;

    output_result(
        "Shortest ancestral path length",
        &DistanceResult {
            term_a: args.term_a.clone(),
            term_b: args.term_b.clone(),
            distance,
        },
        cli_args,
    )
}

/// Show the common ancestor of two terms and how each reaches it.
fn show_ancestor(args: &PairArgs, cli_args: &LexnetArgs) -> Result<()> {
    let graph = load_vocabulary(&args.vocabulary)?;
    let relatedness = graph.relatedness(&args.term_a, &args.term_b)?;

    output_relatedness(
        &relatedness,
        |id| {
            graph
                .synset(id)
                .map(|s| s.gloss().to_string())
                .unwrap_or_else(|| id.to_string())
        },
        cli_args,
    )
}

/// Find the outcast of each term file.
fn find_outcasts(args: &OutcastArgs, cli_args: &LexnetArgs) -> Result<()> {
    let graph = load_vocabulary(&args.vocabulary)?;
    let finder = OutlierFinder::new(&graph);

    for path in &args.files {
        let contents = read_terms_file(path)?;
        let terms: Vec<&str> = contents.split_whitespace().collect();
        debug!("{}: {} terms", path.display(), terms.len());

        let report = finder.report(&terms)?;
        output_outcast(
            &OutcastResult {
                file: path.to_string_lossy().to_string(),
                report,
            },
            args.scores,
            cli_args,
        )?;
    }

    Ok(())
}

fn read_terms_file(path: &Path) -> Result<String> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read terms file {}", path.display()))?;
    Ok(contents)
}

fn read_digraph_file(path: &Path) -> Result<Digraph> {
    let file = File::open(path)
        .with_context(|| format!("failed to open digraph file {}", path.display()))?;
    Digraph::from_reader(BufReader::new(file))
}

/// Query a raw digraph.
fn query_digraph(args: &SapArgs, cli_args: &LexnetArgs) -> Result<()> {
    let digraph = read_digraph_file(&args.digraph)?;
    info!(
        "digraph {}: {} vertices, {} edges",
        args.digraph.display(),
        digraph.vertex_count(),
        digraph.edge_count()
    );

    let sap = Sap::new(digraph)?;
    let found = sap.query_sets(args.v.0.iter().copied(), args.w.0.iter().copied())?;

    output_result(
        "Shortest ancestral path",
        &SapResult {
            v: args.v.0.clone(),
            w: args.w.0.clone(),
            length: found.length_or_sentinel(),
            ancestor: found.ancestor_or_sentinel(),
        },
        cli_args,
    )
}

/// List every term.
fn list_terms(args: &TermsArgs, cli_args: &LexnetArgs) -> Result<()> {
    let graph = load_vocabulary(&args.vocabulary)?;
    let mut terms: Vec<&str> = graph.terms().collect();
    if args.sorted {
        terms.sort_unstable();
    }
    if let Some(limit) = args.limit {
        terms.truncate(limit);
    }

    match cli_args.output_format {
        OutputFormat::Json => output_result("Terms", &terms, cli_args),
        OutputFormat::Human => {
            for term in terms {
                println!("{term}");
            }
            Ok(())
        }
    }
}
