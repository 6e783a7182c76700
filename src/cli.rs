use crate::card::{Card, CardOrdering};
use crate::deck::{DeckBuilder, DeckOptions};
use crate::rng::DeckRng;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use std::collections::HashMap;
use std::io::Write;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "card-decks")]
#[command(about = "Build playing-card decks from construction options", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub deck: DeckArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a deck and print it (default)
    Build(DeckArgs),

    /// Build many shuffled decks and report how often each card ends on top
    Sample {
        /// Number of decks to build
        #[arg(short, long, default_value = "10000")]
        runs: usize,

        #[command(flatten)]
        deck: DeckArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct DeckArgs {
    /// Shuffle the deck
    #[arg(long)]
    pub shuffle: bool,

    /// Seed for the shuffle (for reproducibility)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Number of jokers to append
    #[arg(short, long, default_value = "0")]
    pub jokers: usize,

    /// Comma-separated ranks to remove, e.g. "2,3,Joker"
    #[arg(short, long, value_delimiter = ',')]
    pub filter: Option<Vec<String>>,

    /// Number of standard decks to compose
    #[arg(short, long, default_value = "1")]
    pub decks: usize,

    /// Actually concatenate `--decks` standard decks
    #[arg(long)]
    pub composed: bool,

    /// Sort the standard cards before shuffling
    #[arg(long, value_enum)]
    pub sort: Option<SortKey>,

    /// Reverse the sort order
    #[arg(long, requires = "sort")]
    pub reverse: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Suit, then rank
    Absolute,
    Rank,
    Suit,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl SortKey {
    pub fn ordering(self) -> CardOrdering {
        match self {
            SortKey::Absolute => CardOrdering::by_absolute_rank(),
            SortKey::Rank => CardOrdering::by_rank(),
            SortKey::Suit => CardOrdering::by_suit(),
        }
    }
}

impl DeckArgs {
    pub fn to_options(&self) -> DeckOptions {
        let ordering = self.sort.map(|key| {
            let ordering = key.ordering();
            if self.reverse {
                ordering.reversed()
            } else {
                ordering
            }
        });

        DeckOptions {
            ordering,
            shuffle: self.shuffle,
            jokers: self.jokers,
            filter_ranks: self
                .filter
                .as_ref()
                .map(|ranks| ranks.iter().map(|r| r.trim().to_string()).collect()),
            composed_decks: self.decks,
        }
    }

    fn build(&self, rng: &mut DeckRng) -> Vec<Card> {
        let builder = DeckBuilder::from_options(self.to_options());
        if self.composed {
            builder.build_composed(rng)
        } else {
            builder.build(rng)
        }
    }
}

pub fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Some(Commands::Build(deck)) => run_build(&deck),
        Some(Commands::Sample { runs, deck }) => run_sample(&deck, runs),
        None => run_build(&cli.deck),
    }
}

fn run_build(args: &DeckArgs) -> Result<(), CliError> {
    let mut rng = DeckRng::new(args.seed);
    let cards = args.build(&mut rng);

    info!(cards = cards.len(), seed = rng.seed(), "built deck");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_deck(&mut out, &cards, args.format)?;
    out.flush()?;
    Ok(())
}

pub fn write_deck<W: Write>(out: &mut W, cards: &[Card], format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Text => {
            for card in cards {
                writeln!(out, "{}", card)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, cards)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Count how often each card lands on top across `runs` shuffled builds.
/// Run `i` uses seed `base_seed + i`.
pub fn top_card_counts(args: &DeckArgs, runs: usize, base_seed: u64) -> HashMap<Card, usize> {
    let mut args = args.clone();
    args.shuffle = true;

    (0..runs)
        .into_par_iter()
        .filter_map(|i| {
            let mut rng = DeckRng::new(Some(base_seed.wrapping_add(i as u64)));
            args.build(&mut rng).first().copied()
        })
        .fold(HashMap::new, |mut counts, card| {
            *counts.entry(card).or_insert(0) += 1;
            counts
        })
        .reduce(HashMap::new, |mut a, b| {
            for (card, count) in b {
                *a.entry(card).or_insert(0) += count;
            }
            a
        })
}

const MAX_BAR_WIDTH: usize = 40;

/// Histogram bar length, scaled so the most frequent card gets the full width
fn bar_width(count: usize, max_count: usize) -> usize {
    if max_count == 0 {
        return 0;
    }
    count * MAX_BAR_WIDTH / max_count
}

fn run_sample(args: &DeckArgs, runs: usize) -> Result<(), CliError> {
    let base_seed = args.seed.unwrap_or_else(|| DeckRng::new(None).seed());

    println!("\n=== Shuffle Sample ===\n");
    println!("Runs: {}", runs);
    println!("Seed: {}", base_seed);
    println!();

    let start = std::time::Instant::now();
    let counts = top_card_counts(args, runs, base_seed);
    let elapsed = start.elapsed();

    info!(runs, distinct = counts.len(), "sampled top cards");

    if runs == 0 {
        return Ok(());
    }

    let mut rows: Vec<_> = counts.into_iter().collect();
    rows.sort_by_key(|(card, _)| card.absolute_rank());

    let max_count = rows.iter().map(|(_, count)| *count).max().unwrap_or(0);

    println!("Top card distribution:");
    for (card, count) in &rows {
        let pct = *count as f64 / runs as f64 * 100.0;
        let bar = "█".repeat(bar_width(*count, max_count));
        println!("  {:18} {:5.2}% {} ({})", card.to_string(), pct, bar, count);
    }

    if !rows.is_empty() {
        println!();
        println!("Expected per card: {:.2}%", 100.0 / rows.len() as f64);
    }

    println!(
        "\nCompleted in {:.2?} ({:.0} decks/sec)",
        elapsed,
        runs as f64 / elapsed.as_secs_f64()
    );
    Ok(())
}
