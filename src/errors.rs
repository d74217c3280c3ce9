//! Errors and error-related utilities.

use std::{error, fmt, result};

/// The result type used throughout this library.
pub type Result<T> = result::Result<T, Box<dyn error::Error + Send + Sync>>;

/// Something the user asked for does not exist in the tables.
///
/// All variants are recoverable: the caller may retry with another word,
/// switch the search mode, or fix the bigram table out of band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFound {
    /// The target word is not in the noun frequency table.
    Target(String),
    /// The morphology provider has no analysis for the word.
    Morphology(String),
    /// The verb is not attested in the bigram table.
    Verb(String),
}

/// A query that cannot be run as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidQuery(pub String);

/// Invalid input table.
#[derive(Debug)]
pub struct InvalidInput(pub String);

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NotFound::Target(word) => write!(f, "target word '{word}' not found"),
            NotFound::Morphology(word) => {
                write!(f, "no morphological analysis for '{word}'")
            }
            NotFound::Verb(verb) => write!(f, "verb '{verb}' not attested"),
        }
    }
}

impl fmt::Display for InvalidQuery {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid query: {}", self.0)
    }
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid input: {}", self.0)
    }
}

impl error::Error for NotFound {}

impl error::Error for InvalidQuery {}

impl error::Error for InvalidInput {}

/// A helper for constructing [InvalidQuery].
pub fn invalid_query(s: String) -> InvalidQuery {
    InvalidQuery(s)
}

/// A helper for constructing [InvalidQuery].
pub fn invalid_query_ref(s: &str) -> InvalidQuery {
    InvalidQuery(s.to_owned())
}

/// A helper for constructing [InvalidInput].
pub fn invalid_input(s: String) -> Box<dyn error::Error + Send + Sync> {
    InvalidInput(s).into()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            NotFound::Target("Haus".to_owned()).to_string(),
            "target word 'Haus' not found"
        );
        assert_eq!(
            NotFound::Verb("öffnen".to_owned()).to_string(),
            "verb 'öffnen' not attested"
        );
        assert_eq!(
            invalid_query_ref("empty gender filter").to_string(),
            "invalid query: empty gender filter"
        );
    }
}
