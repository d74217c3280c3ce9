//! Narrowing a query with user-supplied options.

use crate::errors::{InvalidQuery, invalid_query};
use crate::morph::{Case, Gender, Number};
use crate::search::Query;
use itertools::Itertools;
use std::collections::BTreeSet;

/// Changes to apply to a query. `None` keeps the query's current value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Customization {
    pub length_diff: Option<usize>,
    pub genders: Option<BTreeSet<Gender>>,
    pub cases: Option<BTreeSet<Case>>,
    pub numbers: Option<BTreeSet<Number>>,
}

fn add<T: Ord>(set: &mut Option<BTreeSet<T>>, value: T) {
    set.get_or_insert_with(BTreeSet::new).insert(value);
}

impl Customization {
    /// Parse a comma-separated list such as `3, nom, acc`.
    ///
    /// An integer is the length difference; tags replace the filter set of
    /// their dimension. Anything else is rejected.
    pub fn parse(line: &str) -> Result<Customization, InvalidQuery> {
        let mut c = Customization::default();
        let mut unknown = vec![];
        for token in line.split(',').map(|t| t.trim().to_lowercase()) {
            if token.is_empty() {
                continue;
            }
            if let Ok(diff) = token.parse::<usize>() {
                c.length_diff = Some(diff);
            } else if let Ok(g) = token.parse::<Gender>() {
                add(&mut c.genders, g);
            } else if let Ok(k) = token.parse::<Case>() {
                add(&mut c.cases, k);
            } else if let Ok(n) = token.parse::<Number>() {
                add(&mut c.numbers, n);
            } else {
                unknown.push(token);
            }
        }
        if !unknown.is_empty() {
            return Err(invalid_query(format!(
                "could not interpret {}",
                unknown.iter().map(|x| format!("'{x}'")).join(", ")
            )));
        }
        Ok(c)
    }

    pub fn is_empty(&self) -> bool {
        *self == Customization::default()
    }

    /// Apply to a copy of `query` and check that the result is usable.
    pub fn apply(&self, query: &Query) -> Result<Query, InvalidQuery> {
        let mut query = query.clone();
        if let Some(diff) = self.length_diff {
            query.set_length_diff(diff);
        }
        if let Some(genders) = &self.genders {
            query.filters.genders = genders.clone();
        }
        if let Some(cases) = &self.cases {
            query.filters.cases = cases.clone();
        }
        if let Some(numbers) = &self.numbers {
            query.filters.numbers = numbers.clone();
        }
        query.validate()?;
        Ok(query)
    }
}
