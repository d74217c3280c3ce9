//! The noun index: one entry per distinct (frequency, noun) pair.

use crate::input::NounRow;
use crate::morph::MorphSets;
use std::collections::HashMap;
use std::collections::hash_map::Entry::{Occupied, Vacant};

/// A noun at one frequency, with the union of all analyses seen for it.
#[derive(Clone, Debug, PartialEq)]
pub struct NounEntry {
    pub noun: String,
    pub frequency: f64,
    pub morphology: MorphSets,
}

/// Immutable after construction; iteration order is the order in which
/// each (frequency, noun) pair first appears in the table.
#[derive(Clone, Debug, Default)]
pub struct NounIndex {
    entries: Vec<NounEntry>,
    positions: HashMap<(u64, String), usize>,
    first_frequency: HashMap<String, f64>,
}

/// Build the noun index from the rows of the noun frequency table.
///
/// Rows with the same noun and frequency are merged by unioning their
/// analyses. The same noun at different frequencies stays separate.
/// Rows without an analysis only count towards the first frequency of
/// their noun; they can never match a filter.
pub fn build_noun_index<I>(rows: I) -> NounIndex
where
    I: IntoIterator<Item = NounRow>,
{
    let mut index = NounIndex::default();
    for row in rows {
        index.add(row);
    }
    index
}

impl NounIndex {
    fn add(&mut self, row: NounRow) {
        self.first_frequency
            .entry(row.noun.clone())
            .or_insert(row.frequency);
        let Some(analysis) = row.analysis else {
            return;
        };
        let key = (frequency_key(row.frequency), row.noun);
        let i = match self.positions.entry(key) {
            Occupied(e) => *e.get(),
            Vacant(e) => {
                let i = self.entries.len();
                self.entries.push(NounEntry {
                    noun: e.key().1.clone(),
                    frequency: row.frequency,
                    morphology: MorphSets::default(),
                });
                e.insert(i);
                i
            }
        };
        self.entries[i].morphology.insert(analysis);
    }

    pub fn entries(&self) -> &[NounEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct nouns in the table, regardless of frequency.
    pub fn distinct_nouns(&self) -> usize {
        self.first_frequency.len()
    }

    /// Frequency of the first table row for `noun`.
    pub fn frequency_of(&self, noun: &str) -> Option<f64> {
        self.first_frequency.get(noun).copied()
    }

    /// Smallest and largest frequency in the index.
    pub fn frequency_range(&self) -> Option<(f64, f64)> {
        let mut range = None;
        for e in &self.entries {
            range = match range {
                None => Some((e.frequency, e.frequency)),
                Some((a, b)) => Some((e.frequency.min(a), e.frequency.max(b))),
            };
        }
        range
    }
}

fn frequency_key(frequency: f64) -> u64 {
    // 0.0 and -0.0 must share a key
    if frequency == 0.0 {
        0.0f64.to_bits()
    } else {
        frequency.to_bits()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::input::parse_noun_table;
    use crate::morph::{Case, Gender, Number};

    fn index(text: &str) -> NounIndex {
        build_noun_index(parse_noun_table(text).rows)
    }

    #[test]
    fn merges_rows_for_same_pair() {
        let idx = index(
            "Haus 50.0 120 neut nom sing\n\
             Haus 50.0 120 neut acc sing\n\
             Haus 50.0 120 neut dat sing\n",
        );
        assert_eq!(idx.len(), 1);
        let e = &idx.entries()[0];
        assert_eq!(e.noun, "Haus");
        assert_eq!(e.morphology.genders, [Gender::Neut].into_iter().collect());
        assert_eq!(
            e.morphology.cases,
            [Case::Nom, Case::Dat, Case::Acc].into_iter().collect()
        );
        assert_eq!(e.morphology.numbers, [Number::Sing].into_iter().collect());
    }

    #[test]
    fn distinct_frequencies_stay_separate() {
        let idx = index(
            "Bank 20.5 900 fem nom sing\n\
             Tisch 8.0 77 masc acc sing\n\
             Bank 3.1 140 fem nom plu\n\
             Bank 20.5 900 fem acc sing\n",
        );
        assert_eq!(idx.len(), 3);
        assert_eq!(idx.distinct_nouns(), 2);
        let order: Vec<(&str, f64)> = idx
            .entries()
            .iter()
            .map(|e| (e.noun.as_str(), e.frequency))
            .collect();
        assert_eq!(order, vec![("Bank", 20.5), ("Tisch", 8.0), ("Bank", 3.1)]);
        assert_eq!(idx.entries()[0].morphology.cases.len(), 2);
        assert_eq!(idx.frequency_of("Bank"), Some(20.5));
        assert_eq!(idx.frequency_of("Stuhl"), None);
        assert_eq!(idx.frequency_range(), Some((3.1, 20.5)));
    }

    #[test]
    fn untagged_rows_keep_frequency() {
        let idx = index(
            "Leute 120.3 1158 noGender nom plu\n\
             Tisch 8.0 77 masc acc sing\n\
             Leute 80.0 700 noGender acc plu\n\
             Eltern 30.0 290 noGender dat plu\n",
        );
        assert_eq!(idx.len(), 1);
        assert_eq!(idx.distinct_nouns(), 3);
        assert_eq!(idx.frequency_of("Leute"), Some(120.3));
        assert_eq!(idx.frequency_of("Eltern"), Some(30.0));
        assert_eq!(idx.frequency_range(), Some((8.0, 8.0)));
    }

    #[test]
    fn empty_index() {
        let idx = build_noun_index(vec![]);
        assert!(idx.is_empty());
        assert_eq!(idx.frequency_range(), None);
    }
}
