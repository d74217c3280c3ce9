use anyhow::{Result, anyhow};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use cliclack::log;
use std::path::PathBuf;
use std::process;
use stimuli::bigram_index::build_bigram_index;
use stimuli::information;
use stimuli::input;

/// Check whether a verb is attested in the bigram table
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Verb lemma
    verb: String,
    /// Noun-verb bigram table
    #[arg(long, default_value = "bigrams_noun_verb_freq2+.tsv")]
    bigrams: PathBuf,
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(args.verbose.log_level_filter())
        .init();
    let verb = args.verb.trim();
    log::info(format!("Searching for bigrams with the verb '{verb}'..."))?;
    let bigrams = input::read_bigram_table(&args.bigrams).map_err(|e| anyhow!(e))?;
    let index = build_bigram_index(bigrams.rows);
    information::bigram_statistics(&index);
    if index.contains_verb(verb) {
        let entries = index.entries(verb);
        let total: u64 = entries.iter().map(|e| e.count).sum();
        log::success(format!(
            "The verb '{verb}' was found in {}: {} nouns, {total} occurrences.",
            args.bigrams.display(),
            entries.len()
        ))?;
        Ok(())
    } else {
        log::error(format!(
            "Could not find the verb '{verb}' in {}.",
            args.bigrams.display()
        ))?;
        process::exit(1);
    }
}
