//! Command-line entry point: weight training and puzzle scoring runs.
//!
//! The interactive game loop and board rendering live outside this crate;
//! the binary exposes the two batch workflows the engine core provides.

use std::path::PathBuf;

use anyhow::{bail, Context};

use sacrifice::evaluation::weights::Weights;
use sacrifice::training::puzzles::score_puzzles;
use sacrifice::training::{train, TrainingConfig};

const USAGE: &str = "\
usage:
  sacrifice train <corpus.csv> [iterations] [threads] [depth]
  sacrifice puzzles <corpus.csv> [depth] [count] [threads]";

fn main() -> anyhow::Result<()> {
    sacrifice::print_engine_info();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (command, rest) = match args.split_first() {
        Some(split) => split,
        None => bail!("missing command\n{USAGE}"),
    };
    match command.as_str() {
        "train" => run_training(rest),
        "puzzles" => run_puzzles(rest),
        unknown => bail!("unknown command '{unknown}'\n{USAGE}"),
    }
}

fn run_training(args: &[String]) -> anyhow::Result<()> {
    let corpus = corpus_path(args)?;
    let mut config = TrainingConfig::new(corpus);
    if let Some(iterations) = args.get(1) {
        config.iterations = parse(iterations, "iterations")?;
    }
    if let Some(threads) = args.get(2) {
        config.threads = parse(threads, "threads")?;
    }
    if let Some(depth) = args.get(3) {
        config.depth = parse(depth, "depth")?;
    }

    println!(
        "training for {} iterations ({} puzzles at depth {}, {} threads)",
        config.iterations, config.num_puzzles, config.depth, config.threads
    );
    let best = train(&config);
    println!(
        "training finished: best score {best}/{} (weights in {})",
        config.num_puzzles,
        config.report_path.display()
    );
    Ok(())
}

fn run_puzzles(args: &[String]) -> anyhow::Result<()> {
    let corpus = corpus_path(args)?;
    let depth = match args.get(1) {
        Some(depth) => parse(depth, "depth")?,
        None => 4,
    };
    let count = match args.get(2) {
        Some(count) => parse(count, "count")?,
        None => 500,
    };
    let threads = match args.get(3) {
        Some(threads) => parse(threads, "threads")?,
        None => 8,
    };

    let progress = |completed: usize, total: usize, passes: usize| {
        println!("{completed}/{total} puzzles done, {passes} passed");
    };
    let passes = score_puzzles(
        &corpus,
        depth,
        count,
        threads,
        &Weights::baseline(),
        Some(&progress),
    );
    println!("solved {passes}/{count} puzzles at depth {depth}");
    Ok(())
}

fn corpus_path(args: &[String]) -> anyhow::Result<PathBuf> {
    match args.first() {
        Some(path) => Ok(PathBuf::from(path)),
        None => bail!("missing puzzle corpus path\n{USAGE}"),
    }
}

fn parse<T: std::str::FromStr>(value: &str, name: &str) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .with_context(|| format!("invalid {name}: '{value}'"))
}
