//! Morphological tags: gender, case and number.

use crate::errors::{InvalidQuery, invalid_query};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Masc,
    Fem,
    Neut,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Case {
    Nom,
    Gen,
    Dat,
    Acc,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Number {
    Sing,
    Plu,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Masc, Gender::Fem, Gender::Neut];
}

impl Case {
    pub const ALL: [Case; 4] = [Case::Nom, Case::Gen, Case::Dat, Case::Acc];
}

impl Number {
    pub const ALL: [Number; 2] = [Number::Sing, Number::Plu];
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Gender::Masc => write!(f, "masc"),
            Gender::Fem => write!(f, "fem"),
            Gender::Neut => write!(f, "neut"),
        }
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Case::Nom => write!(f, "nom"),
            Case::Gen => write!(f, "gen"),
            Case::Dat => write!(f, "dat"),
            Case::Acc => write!(f, "acc"),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Number::Sing => write!(f, "sing"),
            Number::Plu => write!(f, "plu"),
        }
    }
}

impl FromStr for Gender {
    type Err = InvalidQuery;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "masc" => Ok(Gender::Masc),
            "fem" => Ok(Gender::Fem),
            "neut" => Ok(Gender::Neut),
            _ => Err(invalid_query(format!("unknown gender '{s}'"))),
        }
    }
}

impl FromStr for Case {
    type Err = InvalidQuery;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nom" => Ok(Case::Nom),
            "gen" => Ok(Case::Gen),
            "dat" => Ok(Case::Dat),
            "acc" => Ok(Case::Acc),
            _ => Err(invalid_query(format!("unknown case '{s}'"))),
        }
    }
}

impl FromStr for Number {
    type Err = InvalidQuery;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sing" => Ok(Number::Sing),
            "plu" => Ok(Number::Plu),
            _ => Err(invalid_query(format!("unknown number '{s}'"))),
        }
    }
}

/// One reading of a word form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Analysis {
    pub gender: Gender,
    pub case: Case,
    pub number: Number,
}

/// Gender, case and number sets.
///
/// Used both for the analyses recorded for a noun and for query filters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MorphSets {
    pub genders: BTreeSet<Gender>,
    pub cases: BTreeSet<Case>,
    pub numbers: BTreeSet<Number>,
}

impl MorphSets {
    /// Every tag in every dimension.
    pub fn all() -> MorphSets {
        MorphSets {
            genders: Gender::ALL.into_iter().collect(),
            cases: Case::ALL.into_iter().collect(),
            numbers: Number::ALL.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, analysis: Analysis) {
        self.genders.insert(analysis.gender);
        self.cases.insert(analysis.case);
        self.numbers.insert(analysis.number);
    }

    /// Dimension-wise intersection.
    pub fn intersection(&self, other: &MorphSets) -> MorphSets {
        MorphSets {
            genders: self.genders.intersection(&other.genders).copied().collect(),
            cases: self.cases.intersection(&other.cases).copied().collect(),
            numbers: self.numbers.intersection(&other.numbers).copied().collect(),
        }
    }

    /// True if at least one tag survives in every dimension.
    pub fn is_complete(&self) -> bool {
        !self.genders.is_empty() && !self.cases.is_empty() && !self.numbers.is_empty()
    }
}

impl FromIterator<Analysis> for MorphSets {
    fn from_iter<I: IntoIterator<Item = Analysis>>(iter: I) -> Self {
        let mut sets = MorphSets::default();
        for analysis in iter {
            sets.insert(analysis);
        }
        sets
    }
}
