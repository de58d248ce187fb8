//! # CLI Module
//!
//! Command-line interface for perceptual image similarity search.
//!
//! ## Usage
//! ```bash
//! # Print fingerprints
//! imgsim hash photo.jpg other.png --algorithm dhash
//!
//! # Index directories and find images similar to a query
//! imgsim search ~/Photos --query photo.jpg
//!
//! # Stricter match, JSON output
//! imgsim search ~/Photos --query photo.jpg --max-distance 4 --output json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use image_similarity::core::hasher::{compute_hash, AlgorithmKind, Fingerprint};
use image_similarity::core::sampler::Sampler;
use image_similarity::core::scanner::{ScanConfig, WalkDirScanner};
use image_similarity::core::SimilarityIndex;
use image_similarity::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{info, warn};

/// imgsim - find visually similar images
#[derive(Parser, Debug)]
#[command(name = "imgsim")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the fingerprint of each image
    Hash {
        /// Images to fingerprint
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Hash algorithm to use
        #[arg(short, long, default_value = "phash")]
        algorithm: Algorithm,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },

    /// Index directories and list images similar to a query image
    Search {
        /// Directories to index
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Image to search for
        #[arg(short, long)]
        query: PathBuf,

        /// Hash algorithm to use
        #[arg(short, long, default_value = "phash")]
        algorithm: Algorithm,

        /// Maximum Hamming distance for a match (0-64)
        #[arg(short = 'd', long, default_value = "10",
              value_parser = clap::value_parser!(u32).range(0..=64))]
        max_distance: u32,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Include hidden files and directories
        #[arg(long)]
        include_hidden: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    /// Perceptual Hash - DCT-based, most robust to edits (default)
    Phash,
    /// Difference Hash - brightness gradients
    Dhash,
    /// Block Hash - intensities against their median
    Blockhash,
}

impl From<Algorithm> for AlgorithmKind {
    fn from(algo: Algorithm) -> Self {
        match algo {
            Algorithm::Phash => AlgorithmKind::Perceptual,
            Algorithm::Dhash => AlgorithmKind::Difference,
            Algorithm::Blockhash => AlgorithmKind::Block,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (one value per line)
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    image_similarity::init_tracing(if cli.verbose { "debug" } else { "warn" });

    match cli.command {
        Commands::Hash {
            files,
            algorithm,
            output,
        } => run_hash(&files, algorithm.into(), output),
        Commands::Search {
            paths,
            query,
            algorithm,
            max_distance,
            output,
            include_hidden,
        } => run_search(
            &paths,
            &query,
            algorithm.into(),
            max_distance,
            output,
            include_hidden,
        ),
    }
}

fn fingerprint_file(sampler: &Sampler, path: &Path, kind: AlgorithmKind) -> Result<Fingerprint> {
    let grid = sampler.sample_file_for(path, kind)?;
    Ok(compute_hash(&grid, kind)?)
}

fn run_hash(files: &[PathBuf], algorithm: AlgorithmKind, output: OutputFormat) -> Result<()> {
    let sampler = Sampler::new();
    let results: Vec<_> = files
        .par_iter()
        .map(|path| (path, fingerprint_file(&sampler, path, algorithm)))
        .collect();

    match output {
        OutputFormat::Pretty => {
            let term = Term::stdout();
            for (path, result) in &results {
                let line = match result {
                    Ok(fingerprint) => format!(
                        "{}  {}",
                        style(fingerprint).cyan(),
                        path.display()
                    ),
                    Err(e) => format!("{}  {}", style("error").red().bold(), e),
                };
                term.write_line(&line).ok();
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "algorithm": algorithm,
                "files": results.iter().map(|(path, result)| match result {
                    Ok(fingerprint) => serde_json::json!({
                        "path": path,
                        "fingerprint": fingerprint.to_hex(),
                    }),
                    Err(e) => serde_json::json!({
                        "path": path,
                        "error": e.to_string(),
                    }),
                }).collect::<Vec<_>>(),
            });
            println!("{:#}", output);
        }
        OutputFormat::Minimal => {
            for (path, result) in &results {
                match result {
                    Ok(fingerprint) => println!("{}", fingerprint),
                    Err(e) => warn!(path = %path.display(), error = %e, "Could not hash image"),
                }
            }
        }
    }

    Ok(())
}

fn run_search(
    paths: &[PathBuf],
    query: &Path,
    algorithm: AlgorithmKind,
    max_distance: u32,
    output: OutputFormat,
    include_hidden: bool,
) -> Result<()> {
    let term = Term::stderr();
    let pretty = matches!(output, OutputFormat::Pretty);

    let scanner = WalkDirScanner::new(ScanConfig {
        include_hidden,
        ..Default::default()
    });
    let scan = scanner.scan(paths);
    for error in &scan.errors {
        warn!(%error, "Scan problem");
    }

    let progress = if pretty {
        let pb = ProgressBar::new(scan.images.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        pb.set_message(format!("indexing with {}", algorithm));
        pb
    } else {
        ProgressBar::hidden()
    };

    let index = SimilarityIndex::new();
    let failures = AtomicUsize::new(0);

    scan.images.par_iter().for_each(|path| {
        if let Err(e) = index.index_file(path, algorithm) {
            warn!(path = %path.display(), error = %e, "Skipping image");
            failures.fetch_add(1, Ordering::Relaxed);
        }
        progress.inc(1);
    });
    progress.finish_and_clear();

    let stats = index.stats(algorithm)?;
    info!(
        images = scan.images.len(),
        fingerprints = stats.entries,
        failures = failures.load(Ordering::Relaxed),
        "Index built"
    );

    let mut matches = index.find_similar_to_file(query, algorithm, max_distance)?;
    matches.sort();

    match output {
        OutputFormat::Pretty => {
            term.write_line(&format!(
                "{} {} images indexed ({} distinct {} fingerprints)",
                style("✓").green().bold(),
                style(scan.images.len()).cyan(),
                style(stats.entries).cyan(),
                algorithm
            ))
            .ok();
            term.write_line(&format!(
                "  {} match(es) within distance {} of {}",
                style(matches.len()).cyan(),
                max_distance,
                style(query.display()).bold()
            ))
            .ok();

            let out = Term::stdout();
            for name in &matches {
                out.write_line(&format!("    {} {}", style("○").dim(), name)).ok();
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "query": query,
                "algorithm": algorithm,
                "max_distance": max_distance,
                "indexed": scan.images.len(),
                "stats": stats,
                "matches": matches,
            });
            println!("{:#}", output);
        }
        OutputFormat::Minimal => {
            for name in &matches {
                println!("{}", name);
            }
        }
    }

    Ok(())
}
