use crate::bigram_index::BigramIndex;
use crate::noun_index::NounIndex;
use log::info;

pub fn noun_statistics(index: &NounIndex) {
    info!("distinct nouns: {}", index.distinct_nouns());
    info!("noun index entries: {}", index.len());
    if let Some((low, high)) = index.frequency_range() {
        info!("frequencies: {low}-{high} per million");
    }
}

pub fn bigram_statistics(index: &BigramIndex) {
    info!("bigrams: {}", index.rows());
    info!("distinct verbs: {}", index.verbs());
}
