//! The bigram index: verb lemma to the nouns it follows.

use crate::input::BigramRow;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BigramEntry {
    pub noun: String,
    pub count: u64,
}

/// Verbs are keys exactly as they appear in the table. Entries for a verb
/// keep table order.
#[derive(Clone, Debug, Default)]
pub struct BigramIndex {
    by_verb: HashMap<String, Vec<BigramEntry>>,
    rows: usize,
}

/// Uppercase the first character, leave the rest alone.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Build the bigram index from the rows of the bigram table.
///
/// Nouns are capitalized to match the noun frequency table.
pub fn build_bigram_index<I>(rows: I) -> BigramIndex
where
    I: IntoIterator<Item = BigramRow>,
{
    let mut index = BigramIndex::default();
    for row in rows {
        index.rows += 1;
        index.by_verb.entry(row.verb).or_default().push(BigramEntry {
            noun: capitalize(&row.noun),
            count: row.count,
        });
    }
    index
}

impl BigramIndex {
    /// Bigrams for `verb` in table order; empty if the verb is not attested.
    pub fn entries(&self, verb: &str) -> &[BigramEntry] {
        self.by_verb.get(verb).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_verb(&self, verb: &str) -> bool {
        self.by_verb.contains_key(verb)
    }

    /// Number of distinct verbs.
    pub fn verbs(&self) -> usize {
        self.by_verb.len()
    }

    /// Number of bigram rows indexed.
    pub fn rows(&self) -> usize {
        self.rows
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::input::parse_bigram_table;

    #[test]
    fn capitalize_words() {
        assert_eq!(capitalize("tür"), "Tür");
        assert_eq!(capitalize("Tür"), "Tür");
        assert_eq!(capitalize("ärger"), "Ärger");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn keeps_table_order() {
        let idx = build_bigram_index(
            parse_bigram_table(
                "15\ttür\tNOUN\töffnen\tVERB\n\
                 90\tFenster\tNOUN\töffnen\tVERB\n\
                 7\tTür\tNOUN\tschließen\tVERB\n\
                 40\tKonto\tNOUN\töffnen\tVERB\n",
            )
            .rows,
        );
        assert_eq!(idx.verbs(), 2);
        assert_eq!(idx.rows(), 4);
        let nouns: Vec<(&str, u64)> = idx
            .entries("öffnen")
            .iter()
            .map(|e| (e.noun.as_str(), e.count))
            .collect();
        assert_eq!(nouns, vec![("Tür", 15), ("Fenster", 90), ("Konto", 40)]);
    }

    #[test]
    fn verbs_are_case_sensitive() {
        let idx = build_bigram_index(parse_bigram_table("15\tTür\tNOUN\töffnen\tVERB\n").rows);
        assert!(idx.contains_verb("öffnen"));
        assert!(!idx.contains_verb("Öffnen"));
        assert!(idx.entries("schließen").is_empty());
    }
}
