//! The interactive search session.
//!
//! The session is an explicit state machine driven by a [Frontend], which
//! supplies user input and shows results:
//!
//! ```text
//! Idle -> QueryEntered -> CandidatesProduced
//!   -> RefinementRequested -> RefinedResultsProduced -> Idle | Terminated
//!   -> NewQueryRequested -> Idle | Terminated
//! ```
//!
//! Answering [Reply::Quit] at any prompt terminates the session. Invalid
//! input and unknown words are reported through [Frontend::problem] and the
//! same question is asked again.

use crate::bigram_index::BigramIndex;
use crate::customize::Customization;
use crate::errors::{NotFound, Result};
use crate::morphology::MorphologyProvider;
use crate::noun_index::NounIndex;
use crate::refine::{RefinedResult, bigram_refine};
use crate::search::{
    self, CandidateResult, Query, SearchMode, frequency_query, parse_frequency, target_query,
};
use log::debug;
use std::mem;

/// Text answers that end the session.
pub const QUIT_SIGNALS: [&str; 4] = ["quit", "exit", "q", "e"];

pub fn is_quit_signal(s: &str) -> bool {
    QUIT_SIGNALS.contains(&s.trim())
}

/// An answer from the user, or the wish to stop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply<T> {
    Answer(T),
    Quit,
}

/// What to do after a search is finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextAction {
    /// New search in the same mode.
    Repeat,
    /// New search in the other mode.
    Switch,
}

/// User interaction, as seen by the session.
pub trait Frontend {
    fn choose_mode(&mut self) -> Result<Reply<SearchMode>>;
    fn target_word(&mut self) -> Result<Reply<String>>;
    /// Raw text; the session parses and validates it.
    fn search_frequency(&mut self) -> Result<Reply<String>>;
    /// `None` keeps the query as it is.
    fn customize(&mut self, query: &Query) -> Result<Reply<Option<Customization>>>;
    fn show_candidates(&mut self, query: &Query, results: &[CandidateResult]) -> Result<()>;
    /// `None` skips the bigram refinement.
    fn verb(&mut self) -> Result<Reply<Option<String>>>;
    fn show_refined(&mut self, verb: &str, rows: &[RefinedResult]) -> Result<()>;
    fn next_action(&mut self, mode: SearchMode) -> Result<Reply<NextAction>>;
    /// Report a recoverable problem.
    fn problem(&mut self, message: &str) -> Result<()>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum State {
    Idle,
    QueryEntered(Query),
    CandidatesProduced(Vec<CandidateResult>),
    RefinementRequested(Vec<CandidateResult>, String),
    RefinedResultsProduced,
    NewQueryRequested,
    Terminated,
}

macro_rules! answer {
    ($reply:expr) => {
        match $reply {
            Reply::Answer(x) => x,
            Reply::Quit => return Ok(State::Terminated),
        }
    };
}

pub struct Session<'a> {
    nouns: &'a NounIndex,
    bigrams: &'a BigramIndex,
    morphology: &'a dyn MorphologyProvider,
    mode: Option<SearchMode>,
    state: State,
}

impl<'a> Session<'a> {
    pub fn new(
        nouns: &'a NounIndex,
        bigrams: &'a BigramIndex,
        morphology: &'a dyn MorphologyProvider,
    ) -> Session<'a> {
        Session {
            nouns,
            bigrams,
            morphology,
            mode: None,
            state: State::Idle,
        }
    }

    /// Start in a given mode instead of asking for one.
    pub fn with_mode(mut self, mode: SearchMode) -> Session<'a> {
        self.mode = Some(mode);
        self
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn mode(&self) -> Option<SearchMode> {
        self.mode
    }

    /// Run until the user quits.
    pub fn run<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> Result<()> {
        while self.state != State::Terminated {
            self.step(frontend)?;
        }
        Ok(())
    }

    /// Perform one transition.
    pub fn step<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> Result<()> {
        let state = mem::replace(&mut self.state, State::Terminated);
        self.state = match state {
            State::Idle => self.enter_query(frontend)?,
            State::QueryEntered(query) => self.run_search(frontend, query)?,
            State::CandidatesProduced(results) => self.ask_verb(frontend, results)?,
            State::RefinementRequested(results, verb) => {
                self.refine(frontend, &results, &verb)?
            }
            State::RefinedResultsProduced | State::NewQueryRequested => {
                self.after_search(frontend)?
            }
            State::Terminated => State::Terminated,
        };
        debug!("session: {}", state_name(&self.state));
        Ok(())
    }

    fn enter_query<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> Result<State> {
        let mode = match self.mode {
            Some(mode) => mode,
            None => {
                let mode = answer!(frontend.choose_mode()?);
                self.mode = Some(mode);
                mode
            }
        };
        let query = match mode {
            SearchMode::ByTarget => {
                let word = answer!(frontend.target_word()?);
                match target_query(self.nouns, self.morphology, word.trim()) {
                    Ok(query) => query,
                    Err(e) => {
                        frontend.problem(&format!("{e}, please try another word"))?;
                        return Ok(State::Idle);
                    }
                }
            }
            SearchMode::ByFrequency => {
                let text = answer!(frontend.search_frequency()?);
                match parse_frequency(&text).and_then(frequency_query) {
                    Ok(query) => query,
                    Err(e) => {
                        frontend.problem(&e.to_string())?;
                        return Ok(State::Idle);
                    }
                }
            }
        };
        loop {
            match answer!(frontend.customize(&query)?) {
                None => return Ok(State::QueryEntered(query)),
                Some(c) if c.is_empty() => {
                    debug!("session: search criteria unchanged");
                    return Ok(State::QueryEntered(query));
                }
                Some(c) => match c.apply(&query) {
                    Ok(query) => return Ok(State::QueryEntered(query)),
                    Err(e) => frontend.problem(&e.to_string())?,
                },
            }
        }
    }

    fn run_search<F: Frontend + ?Sized>(&self, frontend: &mut F, query: Query) -> Result<State> {
        match search::similarity_search(self.nouns, &query) {
            Ok(results) => {
                frontend.show_candidates(&query, &results)?;
                Ok(State::CandidatesProduced(results))
            }
            Err(e) => {
                frontend.problem(&e.to_string())?;
                Ok(State::Idle)
            }
        }
    }

    fn ask_verb<F: Frontend + ?Sized>(
        &self,
        frontend: &mut F,
        results: Vec<CandidateResult>,
    ) -> Result<State> {
        let verb = answer!(frontend.verb()?)
            .map(|v| v.trim().to_lowercase())
            .unwrap_or_default();
        if verb.is_empty() {
            Ok(State::NewQueryRequested)
        } else {
            Ok(State::RefinementRequested(results, verb))
        }
    }

    fn refine<F: Frontend + ?Sized>(
        &self,
        frontend: &mut F,
        results: &[CandidateResult],
        verb: &str,
    ) -> Result<State> {
        if !self.bigrams.contains_verb(verb) {
            frontend.problem(&format!(
                "{}; check it with stimuli-verb and add its bigrams to the bigram table",
                NotFound::Verb(verb.to_owned())
            ))?;
        }
        let rows = bigram_refine(self.bigrams, results, verb);
        frontend.show_refined(verb, &rows)?;
        Ok(State::RefinedResultsProduced)
    }

    fn after_search<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> Result<State> {
        let mode = self.mode.unwrap_or(SearchMode::ByTarget);
        match answer!(frontend.next_action(mode)?) {
            NextAction::Repeat => (),
            NextAction::Switch => self.mode = Some(mode.other()),
        }
        Ok(State::Idle)
    }
}

fn state_name(state: &State) -> &'static str {
    match state {
        State::Idle => "idle",
        State::QueryEntered(_) => "query entered",
        State::CandidatesProduced(_) => "candidates produced",
        State::RefinementRequested(_, _) => "refinement requested",
        State::RefinedResultsProduced => "refined results produced",
        State::NewQueryRequested => "new query requested",
        State::Terminated => "terminated",
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bigram_index::build_bigram_index;
    use crate::input::{parse_bigram_table, parse_noun_table};
    use crate::morphology::TableMorphology;
    use crate::noun_index::build_noun_index;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct Script {
        answers: VecDeque<&'static str>,
        candidates: Vec<Vec<String>>,
        refined: Vec<(String, Vec<(u64, String)>)>,
        problems: Vec<String>,
    }

    impl Script {
        fn new(answers: &[&'static str]) -> Script {
            Script {
                answers: answers.iter().copied().collect(),
                ..Script::default()
            }
        }

        fn next(&mut self) -> Reply<String> {
            let a = self.answers.pop_front().expect("script too short");
            if is_quit_signal(a) {
                Reply::Quit
            } else {
                Reply::Answer(a.to_owned())
            }
        }
    }

    impl Frontend for Script {
        fn choose_mode(&mut self) -> Result<Reply<SearchMode>> {
            Ok(match self.next() {
                Reply::Answer(a) if a == "1" => Reply::Answer(SearchMode::ByTarget),
                Reply::Answer(_) => Reply::Answer(SearchMode::ByFrequency),
                Reply::Quit => Reply::Quit,
            })
        }

        fn target_word(&mut self) -> Result<Reply<String>> {
            Ok(self.next())
        }

        fn search_frequency(&mut self) -> Result<Reply<String>> {
            Ok(self.next())
        }

        fn customize(&mut self, query: &Query) -> Result<Reply<Option<Customization>>> {
            Ok(match self.next() {
                Reply::Answer(a) if a.is_empty() => Reply::Answer(None),
                Reply::Answer(a) => match Customization::parse(&a) {
                    Ok(c) => Reply::Answer(Some(c)),
                    Err(e) => {
                        self.problems.push(e.to_string());
                        return self.customize(query);
                    }
                },
                Reply::Quit => Reply::Quit,
            })
        }

        fn show_candidates(&mut self, _query: &Query, results: &[CandidateResult]) -> Result<()> {
            self.candidates
                .push(results.iter().map(|r| r.noun.clone()).collect());
            Ok(())
        }

        fn verb(&mut self) -> Result<Reply<Option<String>>> {
            Ok(match self.next() {
                Reply::Answer(a) if a.is_empty() => Reply::Answer(None),
                Reply::Answer(a) => Reply::Answer(Some(a)),
                Reply::Quit => Reply::Quit,
            })
        }

        fn show_refined(&mut self, verb: &str, rows: &[RefinedResult]) -> Result<()> {
            self.refined.push((
                verb.to_owned(),
                rows.iter()
                    .map(|r| (r.count, r.candidate.noun.clone()))
                    .collect(),
            ));
            Ok(())
        }

        fn next_action(&mut self, _mode: SearchMode) -> Result<Reply<NextAction>> {
            Ok(match self.next() {
                Reply::Answer(a) if a == "switch" => Reply::Answer(NextAction::Switch),
                Reply::Answer(_) => Reply::Answer(NextAction::Repeat),
                Reply::Quit => Reply::Quit,
            })
        }

        fn problem(&mut self, message: &str) -> Result<()> {
            self.problems.push(message.to_owned());
            Ok(())
        }
    }

    fn fixtures() -> (NounIndex, BigramIndex, TableMorphology) {
        let nouns = parse_noun_table(
            "Tür 40.0 300 fem nom sing\n\
             Tür 40.0 300 fem acc sing\n\
             Wand 42.0 310 fem acc sing\n\
             Kiste 38.5 280 fem acc sing\n\
             Fenster 41.0 305 neut acc sing\n",
        );
        let morphology = TableMorphology::from_rows(&nouns.rows);
        let bigrams = parse_bigram_table(
            "15\tTür\tNOUN\töffnen\tVERB\n\
             9\tkiste\tNOUN\töffnen\tVERB\n\
             4\tFenster\tNOUN\töffnen\tVERB\n",
        );
        (
            build_noun_index(nouns.rows),
            build_bigram_index(bigrams.rows),
            morphology,
        )
    }

    #[test]
    fn quit_signals() {
        assert!(is_quit_signal("quit"));
        assert!(is_quit_signal(" q "));
        assert!(!is_quit_signal("Q"));
        assert!(!is_quit_signal("Tür"));
    }

    #[test]
    fn target_search_with_refinement() {
        let (nouns, bigrams, morphology) = fixtures();
        let mut session = Session::new(&nouns, &bigrams, &morphology);
        let mut script = Script::new(&["1", "Tür", "", "Öffnen", "quit"]);
        session.run(&mut script).unwrap();
        assert_eq!(session.state(), &State::Terminated);
        assert_eq!(script.candidates, vec![vec!["Tür", "Kiste", "Wand"]]);
        assert_eq!(
            script.refined,
            vec![(
                "öffnen".to_owned(),
                vec![(15, "Tür".to_owned()), (9, "Kiste".to_owned())]
            )]
        );
        assert!(script.problems.is_empty());
    }

    #[test]
    fn unknown_target_is_retried() {
        let (nouns, bigrams, morphology) = fixtures();
        let mut session = Session::new(&nouns, &bigrams, &morphology);
        let mut script = Script::new(&["1", "Sofa", "Wand", "", "", "exit"]);
        session.run(&mut script).unwrap();
        assert_eq!(script.problems.len(), 1);
        assert!(script.problems[0].contains("'Sofa' not found"));
        assert_eq!(script.candidates.len(), 1);
    }

    #[test]
    fn bad_frequency_and_customization() {
        let (nouns, bigrams, morphology) = fixtures();
        let mut session = Session::new(&nouns, &bigrams, &morphology);
        let mut script = Script::new(&["2", "forty", "40", "dative", "acc, neut", "", "q"]);
        session.run(&mut script).unwrap();
        assert_eq!(script.problems.len(), 2);
        assert_eq!(script.candidates, vec![vec!["Fenster"]]);
    }

    #[test]
    fn blank_customization_keeps_query() {
        let (nouns, bigrams, morphology) = fixtures();
        let mut session = Session::new(&nouns, &bigrams, &morphology);
        let mut script = Script::new(&["1", "Tür", " , ", "", "quit"]);
        session.run(&mut script).unwrap();
        assert!(script.problems.is_empty());
        assert_eq!(script.candidates, vec![vec!["Tür", "Kiste", "Wand"]]);
    }

    #[test]
    fn unattested_verb_and_switch() {
        let (nouns, bigrams, morphology) = fixtures();
        let mut session =
            Session::new(&nouns, &bigrams, &morphology).with_mode(SearchMode::ByFrequency);
        let mut script = Script::new(&[
            "40", "", "streichen", "switch", "Wand", "", "", "quit",
        ]);
        session.run(&mut script).unwrap();
        assert_eq!(session.mode(), Some(SearchMode::ByTarget));
        assert_eq!(script.refined, vec![("streichen".to_owned(), vec![])]);
        assert!(script.problems[0].contains("verb 'streichen' not attested"));
        assert_eq!(script.candidates.len(), 2);
    }

    #[test]
    fn quit_at_first_prompt() {
        let (nouns, bigrams, morphology) = fixtures();
        let mut session = Session::new(&nouns, &bigrams, &morphology);
        let mut script = Script::new(&["e"]);
        session.run(&mut script).unwrap();
        assert_eq!(session.state(), &State::Terminated);
        assert!(script.candidates.is_empty());
    }
}
