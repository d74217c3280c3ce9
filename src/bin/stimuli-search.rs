use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use log::{error, info};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::{error, fs, io, process};
use stimuli::bigram_index::build_bigram_index;
use stimuli::customize::Customization;
use stimuli::errors::{self, Result};
use stimuli::information;
use stimuli::input;
use stimuli::morph::{Case, Gender, Number};
use stimuli::morphology::TableMorphology;
use stimuli::noun_index::build_noun_index;
use stimuli::output::{self, OError, SearchOutput};
use stimuli::refine::bigram_refine;
use stimuli::search::{self, Query};

/// Find nouns similar to a target word or a frequency
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Noun frequency table
    #[arg(long, default_value = "deWaC_freqlist.tsv")]
    nouns: PathBuf,
    /// Noun-verb bigram table (read only with --verb)
    #[arg(long, default_value = "bigrams_noun_verb_freq2+.tsv")]
    bigrams: PathBuf,
    /// Target word
    #[arg(long, conflicts_with = "frequency", required_unless_present = "frequency")]
    target: Option<String>,
    /// Search frequency (per million)
    #[arg(long)]
    frequency: Option<f64>,
    /// Length difference from the target, or exact length in frequency mode
    #[arg(long)]
    length_diff: Option<usize>,
    /// Genders (comma-separated: masc, fem, neut)
    #[arg(long, value_delimiter = ',')]
    genders: Vec<Gender>,
    /// Cases (comma-separated: nom, gen, dat, acc)
    #[arg(long, value_delimiter = ',')]
    cases: Vec<Case>,
    /// Numbers (comma-separated: sing, plu)
    #[arg(long, value_delimiter = ',')]
    numbers: Vec<Number>,
    /// Keep only nouns attested before this verb
    #[arg(long)]
    verb: Option<String>,
    /// Write results as JSON
    #[arg(long)]
    json: Option<PathBuf>,
    /// Produce compact JSON files
    #[arg(long)]
    compact: bool,
    /// Write results as an Excel file
    #[arg(long)]
    xlsx: Option<PathBuf>,
    /// Report errors as a JSON file
    #[arg(long)]
    error_file: Option<String>,
    /// Verbosity
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn non_empty<T: Ord + Copy>(values: &[T]) -> Option<BTreeSet<T>> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().copied().collect())
    }
}

fn process(args: &Args) -> Result<()> {
    let nouns = input::read_noun_table(&args.nouns)?;
    let morphology = TableMorphology::from_rows(&nouns.rows);
    let index = build_noun_index(nouns.rows);
    information::noun_statistics(&index);
    let query = match (&args.target, args.frequency) {
        (Some(word), _) => search::target_query(&index, &morphology, word)?,
        (None, Some(f)) => search::frequency_query(f)?,
        (None, None) => return Err(errors::invalid_input("no target or frequency".to_owned())),
    };
    let customization = Customization {
        length_diff: args.length_diff,
        genders: non_empty(&args.genders),
        cases: non_empty(&args.cases),
        numbers: non_empty(&args.numbers),
    };
    let query = customization.apply(&query)?;
    info!("{}", output::query_summary(&query).replace('\n', "; "));
    let candidates = search::similarity_search(&index, &query)?;
    report(args, &query, &candidates)
}

fn report(args: &Args, query: &Query, candidates: &[search::CandidateResult]) -> Result<()> {
    let verb = args.verb.as_ref().map(|v| v.trim().to_lowercase());
    let refined = match &verb {
        None => None,
        Some(verb) => {
            let bigrams = input::read_bigram_table(&args.bigrams)?;
            let index = build_bigram_index(bigrams.rows);
            information::bigram_statistics(&index);
            if !index.contains_verb(verb) {
                error!("verb '{verb}' not attested; check it with stimuli-verb");
            }
            Some(bigram_refine(&index, candidates, verb))
        }
    };
    match &refined {
        None => println!("{}", output::candidate_table(candidates)),
        Some(rows) => println!("{}", output::refined_table(rows)),
    }
    info!("{} candidates", candidates.len());
    if let Some(rows) = &refined {
        info!("{} attested with the verb", rows.len());
    }
    let out = SearchOutput {
        query,
        candidates,
        verb: verb.as_deref(),
        refined: refined.as_deref(),
    };
    if let Some(path) = &args.json {
        info!("write: {}", path.display());
        let file = fs::File::create(path)?;
        let writer = io::BufWriter::new(file);
        if args.compact {
            serde_json::to_writer(writer, &out)?;
        } else {
            serde_json::to_writer_pretty(writer, &out)?;
        }
    }
    if let Some(path) = &args.xlsx {
        info!("write: {}", path.display());
        output::write_xlsx(path, &out)?;
    }
    Ok(())
}

fn store_error(error_file: &Path, e: &dyn error::Error) -> Result<()> {
    let error = OError {
        error: format!("{e}"),
    };
    let file = fs::File::create(error_file)?;
    let writer = io::BufWriter::new(file);
    serde_json::to_writer(writer, &error)?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(args.verbose.log_level_filter())
        .init();
    match process(&args) {
        Ok(()) => (),
        Err(e) => {
            match &args.error_file {
                Some(filename) => match store_error(Path::new(filename), &*e) {
                    Ok(()) => {
                        info!("error reported: {e}");
                    }
                    Err(e2) => {
                        error!("{e}");
                        error!("{e2}");
                    }
                },
                None => error!("{e}"),
            }
            process::exit(1);
        }
    }
}
