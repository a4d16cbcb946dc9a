//! Command-line front end: build a snapshot from frequency dictionary files
//! and run the three query surfaces against it.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use libspell_core::{SymSpell, Verbosity};

#[derive(Parser)]
#[command(name = "libspell", about = "Spelling correction over a frequency dictionary")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum VerbosityArg {
    Top,
    Closest,
    All,
}

impl From<VerbosityArg> for Verbosity {
    fn from(arg: VerbosityArg) -> Self {
        match arg {
            VerbosityArg::Top => Verbosity::Top,
            VerbosityArg::Closest => Verbosity::Closest,
            VerbosityArg::All => Verbosity::All,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Ingest dictionary files and write a snapshot for fast loading.
    BuildSnapshot {
        /// Unigram frequency file (term and count columns).
        #[arg(long)]
        dictionary: PathBuf,
        /// Optional bigram frequency file.
        #[arg(long)]
        bigrams: Option<PathBuf>,
        #[arg(long, default_value = "snapshot.bin")]
        output: PathBuf,
        #[arg(long, default_value_t = 0)]
        term_index: usize,
        #[arg(long, default_value_t = 1)]
        count_index: usize,
        #[arg(long, default_value_t = 2)]
        max_edit_distance: usize,
        #[arg(long, default_value_t = 7)]
        prefix_length: usize,
        #[arg(long, default_value_t = 1)]
        count_threshold: u64,
    },
    /// Suggest corrections for a single term.
    Lookup {
        #[arg(long)]
        snapshot: PathBuf,
        #[arg(long, value_enum, default_value_t = VerbosityArg::Top)]
        verbosity: VerbosityArg,
        #[arg(long)]
        max_edit_distance: Option<usize>,
        term: String,
    },
    /// Correct a multi-word phrase, splitting and merging words as needed.
    Compound {
        #[arg(long)]
        snapshot: PathBuf,
        #[arg(long)]
        max_edit_distance: Option<usize>,
        phrase: String,
    },
    /// Insert missing spaces into a string and correct its words.
    Segment {
        #[arg(long)]
        snapshot: PathBuf,
        text: String,
    },
}

fn load(snapshot: &PathBuf) -> Result<SymSpell> {
    let mut sym = SymSpell::new(2, 7, 1)?;
    let loaded = sym
        .load_snapshot(snapshot)
        .with_context(|| format!("reading snapshot {}", snapshot.display()))?;
    if !loaded {
        bail!("snapshot {} has an incompatible data version", snapshot.display());
    }
    Ok(sym)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match Cli::parse().command {
        Command::BuildSnapshot {
            dictionary,
            bigrams,
            output,
            term_index,
            count_index,
            max_edit_distance,
            prefix_length,
            count_threshold,
        } => {
            let mut sym = SymSpell::new(max_edit_distance, prefix_length, count_threshold)?;
            if !sym.load_dictionary(&dictionary, term_index, count_index, None) {
                bail!("dictionary {} not found", dictionary.display());
            }
            if let Some(bigrams) = bigrams {
                if !sym.load_bigram_dictionary(&bigrams, 0, 2, None) {
                    bail!("bigram dictionary {} not found", bigrams.display());
                }
            }
            sym.save_snapshot(&output)?;
            println!(
                "wrote {} ({} words, {} delete buckets, {} bigrams)",
                output.display(),
                sym.word_count(),
                sym.delete_count(),
                sym.bigram_count()
            );
        }
        Command::Lookup {
            snapshot,
            verbosity,
            max_edit_distance,
            term,
        } => {
            let sym = load(&snapshot)?;
            let budget = max_edit_distance.unwrap_or(sym.max_dictionary_edit_distance());
            let results = sym.lookup(&term, verbosity.into(), budget)?;
            if results.is_empty() {
                println!("no suggestions for {term:?}");
            }
            for suggestion in results {
                println!("{suggestion}");
            }
        }
        Command::Compound {
            snapshot,
            max_edit_distance,
            phrase,
        } => {
            let sym = load(&snapshot)?;
            let budget = max_edit_distance.unwrap_or(sym.max_dictionary_edit_distance());
            for suggestion in sym.lookup_compound(&phrase, budget)? {
                println!("{suggestion}");
            }
        }
        Command::Segment { snapshot, text } => {
            let sym = load(&snapshot)?;
            let composition = sym.word_segmentation(&text)?;
            println!("segmented: {}", composition.segmented_string);
            println!("corrected: {}", composition.corrected_string);
            println!(
                "distance: {} log10(p): {:.3}",
                composition.distance_sum, composition.log_prob_sum
            );
        }
    }
    Ok(())
}
