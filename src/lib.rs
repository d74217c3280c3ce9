pub mod bigram_index;
pub mod customize;
pub mod errors;
pub mod frequency;
pub mod information;
pub mod input;
pub mod morph;
pub mod morphology;
pub mod noun_index;
pub mod output;
pub mod refine;
pub mod search;
pub mod session;
