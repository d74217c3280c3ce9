//! Restricting search results to nouns attested with a verb.

use crate::bigram_index::{BigramIndex, capitalize};
use crate::search::CandidateResult;
use log::debug;
use serde::Serialize;
use std::collections::HashMap;

/// A candidate that occurs before the verb, with the bigram count.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RefinedResult {
    pub count: u64,
    #[serde(flatten)]
    pub candidate: CandidateResult,
}

/// Keep the candidates that appear with `verb` in the bigram index.
///
/// Rows follow the bigram table order for the verb. A noun listed at
/// several frequencies among the candidates is reported with the first of
/// them, i.e. the closest one. An unknown verb gives an empty result.
pub fn bigram_refine(
    index: &BigramIndex,
    candidates: &[CandidateResult],
    verb: &str,
) -> Vec<RefinedResult> {
    let mut lookup: HashMap<String, &CandidateResult> = HashMap::new();
    for c in candidates {
        lookup.entry(capitalize(&c.noun)).or_insert(c);
    }
    let rows = index
        .entries(verb)
        .iter()
        .filter_map(|e| {
            lookup.get(&e.noun).map(|&c| RefinedResult {
                count: e.count,
                candidate: c.clone(),
            })
        })
        .collect::<Vec<_>>();
    debug!(
        "refine: {} of {} candidates attested with '{verb}'",
        rows.len(),
        candidates.len()
    );
    rows
}
