//! Morphological analysis of target words.

use crate::input::NounRow;
use crate::morph::Analysis;
use std::collections::{BTreeSet, HashMap};

/// Something that can tell which (gender, case, number) readings a word
/// form has. An unknown word yields an empty list.
pub trait MorphologyProvider {
    fn analyze(&self, word: &str) -> Vec<Analysis>;
}

impl<F> MorphologyProvider for F
where
    F: Fn(&str) -> Vec<Analysis>,
{
    fn analyze(&self, word: &str) -> Vec<Analysis> {
        self(word)
    }
}

/// The analyses already recorded in the noun frequency table.
///
/// The table was tagged upstream, so every row is one reading of its noun.
#[derive(Clone, Debug, Default)]
pub struct TableMorphology {
    analyses: HashMap<String, BTreeSet<Analysis>>,
}

impl TableMorphology {
    pub fn from_rows<'a, I>(rows: I) -> TableMorphology
    where
        I: IntoIterator<Item = &'a NounRow>,
    {
        let mut analyses: HashMap<String, BTreeSet<Analysis>> = HashMap::new();
        for row in rows {
            if let Some(analysis) = row.analysis {
                analyses.entry(row.noun.clone()).or_default().insert(analysis);
            }
        }
        TableMorphology { analyses }
    }
}

impl MorphologyProvider for TableMorphology {
    fn analyze(&self, word: &str) -> Vec<Analysis> {
        match self.analyses.get(word) {
            None => vec![],
            Some(set) => set.iter().copied().collect(),
        }
    }
}
