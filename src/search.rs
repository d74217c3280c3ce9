//! Similarity search over the noun index.

use crate::errors::{InvalidQuery, NotFound, invalid_query, invalid_query_ref};
use crate::frequency;
use crate::morph::MorphSets;
use crate::morphology::MorphologyProvider;
use crate::noun_index::NounIndex;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default length difference in target mode.
pub const DEFAULT_LENGTH_DIFF: usize = 2;
/// Default length bounds in frequency mode.
pub const DEFAULT_LENGTH_MIN: usize = 1;
pub const DEFAULT_LENGTH_MAX: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
    ByTarget,
    ByFrequency,
}

impl SearchMode {
    pub fn other(self) -> SearchMode {
        match self {
            SearchMode::ByTarget => SearchMode::ByFrequency,
            SearchMode::ByFrequency => SearchMode::ByTarget,
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SearchMode::ByTarget => write!(f, "search by target"),
            SearchMode::ByFrequency => write!(f, "search by frequency"),
        }
    }
}

/// A fully resolved search request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Query {
    pub mode: SearchMode,
    /// Target word, in target mode.
    pub target: Option<String>,
    /// Reference frequency (per million).
    pub frequency: f64,
    pub length_min: usize,
    pub length_max: usize,
    /// Accepted genders, cases and numbers.
    #[serde(flatten)]
    pub filters: MorphSets,
}

impl Query {
    /// Set the length bounds from a length difference.
    ///
    /// In target mode the bounds are relative to the target word.
    /// In frequency mode there is no reference word, and the number is taken
    /// as the exact length.
    pub fn set_length_diff(&mut self, diff: usize) {
        match &self.target {
            Some(target) => {
                let len = target.chars().count();
                self.length_min = len.saturating_sub(diff).max(1);
                self.length_max = len + diff;
            }
            None => {
                self.length_min = diff;
                self.length_max = diff;
            }
        }
    }

    pub fn validate(&self) -> Result<(), InvalidQuery> {
        if !self.frequency.is_finite() || self.frequency < 0.0 {
            return Err(invalid_query(format!(
                "frequency must be a non-negative number, got {}",
                self.frequency
            )));
        }
        if self.length_min > self.length_max {
            return Err(invalid_query(format!(
                "minimum length {} exceeds maximum length {}",
                self.length_min, self.length_max
            )));
        }
        if self.filters.genders.is_empty() {
            return Err(invalid_query_ref("no gender selected"));
        }
        if self.filters.cases.is_empty() {
            return Err(invalid_query_ref("no case selected"));
        }
        if self.filters.numbers.is_empty() {
            return Err(invalid_query_ref("no number selected"));
        }
        Ok(())
    }
}

/// A noun that passed all filters.
///
/// `matched` holds the query filters intersected with the noun's own
/// analyses, not the full analyses.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CandidateResult {
    pub noun: String,
    pub frequency: f64,
    #[serde(flatten)]
    pub matched: MorphSets,
}

/// Frequency of the target word: the first table row for it.
pub fn resolve_target(index: &NounIndex, word: &str) -> Result<f64, NotFound> {
    index
        .frequency_of(word)
        .ok_or_else(|| NotFound::Target(word.to_owned()))
}

/// Query around a target word, filtered by the word's own analyses.
pub fn target_query(
    index: &NounIndex,
    morphology: &dyn MorphologyProvider,
    word: &str,
) -> Result<Query, NotFound> {
    let frequency = resolve_target(index, word)?;
    let analyses = morphology.analyze(word);
    if analyses.is_empty() {
        return Err(NotFound::Morphology(word.to_owned()));
    }
    let mut query = Query {
        mode: SearchMode::ByTarget,
        target: Some(word.to_owned()),
        frequency,
        length_min: DEFAULT_LENGTH_MIN,
        length_max: DEFAULT_LENGTH_MAX,
        filters: analyses.into_iter().collect(),
    };
    query.set_length_diff(DEFAULT_LENGTH_DIFF);
    Ok(query)
}

/// Query around a literal frequency, with permissive filters.
pub fn frequency_query(frequency: f64) -> Result<Query, InvalidQuery> {
    let query = Query {
        mode: SearchMode::ByFrequency,
        target: None,
        frequency,
        length_min: DEFAULT_LENGTH_MIN,
        length_max: DEFAULT_LENGTH_MAX,
        filters: MorphSets::all(),
    };
    query.validate()?;
    Ok(query)
}

/// Parse a user-supplied frequency.
pub fn parse_frequency(s: &str) -> Result<f64, InvalidQuery> {
    match s.trim().parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 => Ok(f),
        _ => Err(invalid_query(format!(
            "please enter a non-negative number, got '{}'",
            s.trim()
        ))),
    }
}

/// Find nouns similar to the query.
///
/// Results are ordered by distance from the query frequency; equal
/// distances keep index order.
pub fn similarity_search(
    index: &NounIndex,
    query: &Query,
) -> Result<Vec<CandidateResult>, InvalidQuery> {
    query.validate()?;
    debug!(
        "search: frequency {}, length {}-{}",
        query.frequency, query.length_min, query.length_max
    );
    let mut results = Vec::new();
    for entry in index.entries() {
        if !frequency::frequency_check(query.frequency, entry.frequency) {
            continue;
        }
        let len = entry.noun.chars().count();
        if len < query.length_min || len > query.length_max {
            continue;
        }
        let matched = query.filters.intersection(&entry.morphology);
        if !matched.is_complete() {
            continue;
        }
        results.push(CandidateResult {
            noun: entry.noun.clone(),
            frequency: entry.frequency,
            matched,
        });
    }
    results.sort_by(|a, b| {
        let da = frequency::distance(query.frequency, a.frequency);
        let db = frequency::distance(query.frequency, b.frequency);
        da.total_cmp(&db)
    });
    debug!("search: {} candidates", results.len());
    Ok(results)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::input::parse_noun_table;
    use crate::morph::{Analysis, Case, Gender, Number};
    use crate::morphology::TableMorphology;
    use crate::noun_index::build_noun_index;

    const NOUNS: &str = "\
Tisch 8.0 77 masc acc sing
Stuhl 8.5 80 masc acc sing
Lampe 8.2 79 fem acc sing
Schrank 7.5 70 masc dat sing
Bett 9.5 91 neut acc sing
Teppich 8.0 77 masc nom sing
Teppich 8.0 77 masc acc sing
Tür 40.0 300 fem nom sing
";

    fn setup() -> (NounIndex, TableMorphology) {
        let table = parse_noun_table(NOUNS);
        let morphology = TableMorphology::from_rows(&table.rows);
        (build_noun_index(table.rows), morphology)
    }

    fn nouns(results: &[CandidateResult]) -> Vec<&str> {
        results.iter().map(|r| r.noun.as_str()).collect()
    }

    fn masc_acc_sing(frequency: f64) -> Query {
        let mut query = frequency_query(frequency).unwrap();
        query.filters.genders = [Gender::Masc].into_iter().collect();
        query.filters.cases = [Case::Acc].into_iter().collect();
        query.filters.numbers = [Number::Sing].into_iter().collect();
        query
    }

    #[test]
    fn ranks_by_distance() {
        let (index, _) = setup();
        let results = similarity_search(&index, &masc_acc_sing(8.0)).unwrap();
        assert_eq!(nouns(&results), vec!["Tisch", "Teppich", "Stuhl"]);
        assert_eq!(results[2].frequency, 8.5);
    }

    #[test]
    fn matched_sets_are_intersections() {
        let (index, _) = setup();
        let mut query = masc_acc_sing(8.0);
        query.filters.cases = [Case::Nom, Case::Acc].into_iter().collect();
        let results = similarity_search(&index, &query).unwrap();
        let teppich = results.iter().find(|r| r.noun == "Teppich").unwrap();
        assert_eq!(teppich.matched.cases.len(), 2);
        let tisch = results.iter().find(|r| r.noun == "Tisch").unwrap();
        assert_eq!(tisch.matched.cases, [Case::Acc].into_iter().collect());
    }

    #[test]
    fn respects_length_bounds() {
        let (index, _) = setup();
        let mut query = masc_acc_sing(8.0);
        query.set_length_diff(5);
        assert_eq!((query.length_min, query.length_max), (5, 5));
        let results = similarity_search(&index, &query).unwrap();
        assert_eq!(nouns(&results), vec!["Tisch", "Stuhl"]);
    }

    #[test]
    fn target_defaults() {
        let (index, morphology) = setup();
        let query = target_query(&index, &morphology, "Teppich").unwrap();
        assert_eq!(query.frequency, 8.0);
        assert_eq!((query.length_min, query.length_max), (5, 9));
        assert_eq!(query.filters.genders, [Gender::Masc].into_iter().collect());
        assert_eq!(query.filters.cases.len(), 2);
        let results = similarity_search(&index, &query).unwrap();
        assert_eq!(nouns(&results), vec!["Tisch", "Teppich", "Stuhl"]);
    }

    #[test]
    fn target_not_found() {
        let (index, morphology) = setup();
        assert_eq!(
            target_query(&index, &morphology, "Sofa"),
            Err(NotFound::Target("Sofa".to_owned()))
        );
        let nothing = |_: &str| -> Vec<Analysis> { vec![] };
        assert_eq!(
            target_query(&index, &nothing, "Tisch"),
            Err(NotFound::Morphology("Tisch".to_owned()))
        );
    }

    #[test]
    fn short_target_length() {
        let (index, morphology) = setup();
        let mut query = target_query(&index, &morphology, "Tür").unwrap();
        assert_eq!((query.length_min, query.length_max), (1, 5));
        query.set_length_diff(0);
        assert_eq!((query.length_min, query.length_max), (3, 3));
    }

    #[test]
    fn invalid_queries() {
        let (index, _) = setup();
        let mut query = masc_acc_sing(8.0);
        query.filters.cases.clear();
        assert!(similarity_search(&index, &query).is_err());
        let mut query = masc_acc_sing(8.0);
        query.length_min = 6;
        query.length_max = 4;
        assert!(similarity_search(&index, &query).is_err());
        assert!(frequency_query(f64::NAN).is_err());
        assert!(frequency_query(-2.0).is_err());
    }

    #[test]
    fn frequencies_from_text() {
        assert_eq!(parse_frequency(" 8.5 "), Ok(8.5));
        assert_eq!(parse_frequency("12"), Ok(12.0));
        assert!(parse_frequency("twelve").is_err());
        assert!(parse_frequency("-1").is_err());
        assert!(parse_frequency("inf").is_err());
    }
}
