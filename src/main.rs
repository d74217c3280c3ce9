use anyhow::{Result, anyhow};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use cliclack::log;
use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;
use stimuli::bigram_index::build_bigram_index;
use stimuli::customize::Customization;
use stimuli::errors;
use stimuli::information;
use stimuli::input;
use stimuli::morph::{Case, Gender, Number};
use stimuli::morphology::TableMorphology;
use stimuli::noun_index::build_noun_index;
use stimuli::output;
use stimuli::refine::RefinedResult;
use stimuli::search::{CandidateResult, Query, SearchMode};
use stimuli::session::{self, Frontend, NextAction, Reply, Session};

/// Find nouns for stimuli creation, interactively
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Noun frequency table
    #[arg(long, default_value = "deWaC_freqlist.tsv")]
    nouns: PathBuf,
    /// Noun-verb bigram table
    #[arg(long, default_value = "bigrams_noun_verb_freq2+.tsv")]
    bigrams: PathBuf,
    /// Start in this mode
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ModeArg {
    Target,
    Frequency,
}

struct Clack;

fn interrupted<T>(r: io::Result<T>) -> errors::Result<Reply<T>> {
    match r {
        Ok(x) => Ok(Reply::Answer(x)),
        Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(Reply::Quit),
        Err(e) => Err(e.into()),
    }
}

fn text(prompt: &str, placeholder: &str) -> errors::Result<Reply<String>> {
    let r: io::Result<String> = cliclack::input(prompt)
        .placeholder(placeholder)
        .required(false)
        .interact();
    Ok(match interrupted(r)? {
        Reply::Answer(s) if session::is_quit_signal(&s) => Reply::Quit,
        Reply::Answer(s) => Reply::Answer(s.trim().to_owned()),
        Reply::Quit => Reply::Quit,
    })
}

fn pick<T: Clone + Eq + std::fmt::Display>(
    prompt: &str,
    all: &[T],
    current: &[T],
) -> errors::Result<Reply<Vec<T>>> {
    let items = all
        .iter()
        .map(|x| (x.clone(), x.to_string(), ""))
        .collect::<Vec<_>>();
    interrupted(
        cliclack::multiselect(prompt)
            .items(&items)
            .initial_values(current.to_vec())
            .interact(),
    )
}

macro_rules! answer {
    ($reply:expr) => {
        match $reply {
            Reply::Answer(x) => x,
            Reply::Quit => return Ok(Reply::Quit),
        }
    };
}

impl Frontend for Clack {
    fn choose_mode(&mut self) -> errors::Result<Reply<SearchMode>> {
        interrupted(
            cliclack::select("Search mode?")
                .item(SearchMode::ByTarget, "Search by target word", "")
                .item(SearchMode::ByFrequency, "Search by frequency", "")
                .interact(),
        )
    }

    fn target_word(&mut self) -> errors::Result<Reply<String>> {
        text("Target word? (type 'quit' to exit)", "Haus")
    }

    fn search_frequency(&mut self) -> errors::Result<Reply<String>> {
        text(
            "Search frequency, per million? (type 'quit' to exit)",
            "12.5",
        )
    }

    fn customize(&mut self, query: &Query) -> errors::Result<Reply<Option<Customization>>> {
        cliclack::note("Search criteria", output::query_summary(query))?;
        let yes = answer!(interrupted(
            cliclack::confirm("Customize the search?")
                .initial_value(false)
                .interact()
        )?);
        if !yes {
            return Ok(Reply::Answer(None));
        }
        let genders = answer!(pick(
            "Genders?",
            &Gender::ALL,
            &query.filters.genders.iter().copied().collect::<Vec<_>>()
        )?);
        let cases = answer!(pick(
            "Cases?",
            &Case::ALL,
            &query.filters.cases.iter().copied().collect::<Vec<_>>()
        )?);
        let numbers = answer!(pick(
            "Numerus?",
            &Number::ALL,
            &query.filters.numbers.iter().copied().collect::<Vec<_>>()
        )?);
        let prompt = match query.mode {
            SearchMode::ByTarget => "Maximum length difference? (empty keeps the current range)",
            SearchMode::ByFrequency => "Exact word length? (empty keeps the current range)",
        };
        let length = answer!(text(prompt, "")?);
        let mut c = Customization::default();
        if !length.is_empty() {
            match length.parse::<usize>() {
                Ok(diff) => c.length_diff = Some(diff),
                Err(_) => {
                    self.problem(&format!("'{length}' is not a length, keeping the current range"))?;
                }
            }
        }
        let genders: BTreeSet<Gender> = genders.into_iter().collect();
        let cases: BTreeSet<Case> = cases.into_iter().collect();
        let numbers: BTreeSet<Number> = numbers.into_iter().collect();
        if genders != query.filters.genders {
            c.genders = Some(genders);
        }
        if cases != query.filters.cases {
            c.cases = Some(cases);
        }
        if numbers != query.filters.numbers {
            c.numbers = Some(numbers);
        }
        if c.is_empty() {
            log::info("Search criteria unchanged")?;
        }
        Ok(Reply::Answer(Some(c)))
    }

    fn show_candidates(&mut self, query: &Query, results: &[CandidateResult]) -> errors::Result<()> {
        log::success(format!(
            "Found {} nouns around {} per million",
            results.len(),
            query.frequency
        ))?;
        println!("{}", output::candidate_table(results));
        Ok(())
    }

    fn verb(&mut self) -> errors::Result<Reply<Option<String>>> {
        let verb = answer!(text(
            "Restrict to nouns attested before a verb? (verb lemma, empty to skip)",
            "öffnen"
        )?);
        Ok(Reply::Answer(if verb.is_empty() { None } else { Some(verb) }))
    }

    fn show_refined(&mut self, verb: &str, rows: &[RefinedResult]) -> errors::Result<()> {
        log::success(format!("{} nouns attested with '{verb}'", rows.len()))?;
        if !rows.is_empty() {
            println!("{}", output::refined_table(rows));
        }
        Ok(())
    }

    fn next_action(&mut self, mode: SearchMode) -> errors::Result<Reply<NextAction>> {
        let choice = answer!(interrupted(
            cliclack::select("What next?")
                .item(Some(NextAction::Repeat), format!("New {mode}"), "")
                .item(Some(NextAction::Switch), format!("Switch to {}", mode.other()), "")
                .item(None, "Quit", "")
                .interact()
        )?);
        Ok(match choice {
            Some(action) => Reply::Answer(action),
            None => Reply::Quit,
        })
    }

    fn problem(&mut self, message: &str) -> errors::Result<()> {
        let options = textwrap::Options::new(70).subsequent_indent(" ");
        log::warning(textwrap::fill(message, &options))?;
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(args.verbose.log_level_filter())
        .init();
    cliclack::intro("stimuli")?;

    log::info(format!("Reading {}...", args.nouns.display()))?;
    let nouns = input::read_noun_table(&args.nouns).map_err(|e| anyhow!(e))?;
    let morphology = TableMorphology::from_rows(&nouns.rows);
    let noun_index = build_noun_index(nouns.rows);
    information::noun_statistics(&noun_index);

    log::info(format!("Reading {}...", args.bigrams.display()))?;
    let bigrams = input::read_bigram_table(&args.bigrams).map_err(|e| anyhow!(e))?;
    let bigram_index = build_bigram_index(bigrams.rows);
    information::bigram_statistics(&bigram_index);

    log::info(format!(
        "{} nouns, {} verbs. Type 'quit' at any text prompt to exit.",
        noun_index.distinct_nouns(),
        bigram_index.verbs()
    ))?;

    let mut session = Session::new(&noun_index, &bigram_index, &morphology);
    session = match args.mode {
        None => session,
        Some(ModeArg::Target) => session.with_mode(SearchMode::ByTarget),
        Some(ModeArg::Frequency) => session.with_mode(SearchMode::ByFrequency),
    };
    session.run(&mut Clack).map_err(|e| anyhow!(e))?;

    cliclack::outro("Bye!")?;
    Ok(())
}
