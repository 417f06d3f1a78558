use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mastree::consensus::greedy_consensus;
use mastree::corpus::{read_frequencies, read_trees};
use mastree::matching::CompiledPattern;
use mastree::model::tree::Tree;
use mastree::newick::parse_newick;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mastree")]
#[command(version)]
#[command(about = "Subtree matching and greedy consensus for Newick trees", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the target trees that contain a pattern
    Match(MatchArgs),

    /// Grow a consensus from every seed over a tree corpus
    Consensus(ConsensusArgs),
}

#[derive(Args)]
struct MatchArgs {
    /// File with one Newick tree per line, or - for stdin
    target: String,

    /// Pattern tree in Newick notation
    pattern: String,

    /// Print the trees that do NOT contain the pattern instead
    #[arg(short = 'v', long = "invert")]
    invert: bool,
}

#[derive(Args)]
struct ConsensusArgs {
    /// File with one seed tree per line
    seed_file: PathBuf,

    /// File with one target tree per line
    tree_file: PathBuf,

    /// Support cutoff as a percentage of the target trees
    percent: u32,

    /// Seed frequency file, one integer per seed [default: <SEED_FILE>_frequencies]
    #[arg(long)]
    frequency_file: Option<PathBuf>,

    /// Output file, one consensus per seed [default: <SEED_FILE><TREE_FILE>_OP]
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Match(args) => run_match(args),
        Commands::Consensus(args) => run_consensus(args),
    }
}

fn run_match(args: MatchArgs) -> Result<()> {
    let pattern_tree = parse_newick(&args.pattern).context("invalid pattern")?;
    let pattern = CompiledPattern::compile(pattern_tree).context("invalid pattern")?;

    let targets = read_trees(&args.target)?;
    info!(num_trees = targets.len(), target = args.target, "matching");

    for record in &targets {
        let hit = pattern
            .is_match(&record.tree)
            .with_context(|| format!("tree on line {} of {}", record.line, args.target))?;
        if hit != args.invert {
            println!("{}", record.text);
        }
    }
    Ok(())
}

fn run_consensus(args: ConsensusArgs) -> Result<()> {
    let frequency_file = args
        .frequency_file
        .unwrap_or_else(|| default_frequency_file(&args.seed_file));
    let output = args
        .output
        .unwrap_or_else(|| default_output_file(&args.seed_file, &args.tree_file));

    let seeds = read_trees(&args.seed_file.to_string_lossy())?;
    let targets = read_trees(&args.tree_file.to_string_lossy())?;
    let frequencies = read_frequencies(&frequency_file)?;

    let seed_trees: Vec<Tree> = seeds.into_iter().map(|record| record.tree).collect();
    let target_trees: Vec<Tree> = targets.into_iter().map(|record| record.tree).collect();

    let results = greedy_consensus(&seed_trees, &frequencies, &target_trees, args.percent)?;

    let mut lines = String::new();
    for result in &results {
        lines.push_str(&result.consensus);
        lines.push('\n');
    }
    fs::write(&output, lines)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(output = %output.display(), num_seeds = results.len(), "consensus written");
    Ok(())
}

/// `<seed-file>_frequencies`, next to the seed file.
fn default_frequency_file(seed_file: &Path) -> PathBuf {
    PathBuf::from(format!("{}_frequencies", seed_file.display()))
}

/// `<seed-file><tree-file-name>_OP`, next to the seed file.
fn default_output_file(seed_file: &Path, tree_file: &Path) -> PathBuf {
    let tree_name = tree_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    PathBuf::from(format!("{}{}_OP", seed_file.display(), tree_name))
}
