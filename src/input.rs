//! Reading the noun frequency table and the noun-verb bigram table.
//!
//! Both tables are produced by upstream batch tools and are trusted.
//! Rows that cannot be parsed are skipped and counted, never fatal.

use crate::errors::{Result, invalid_input};
use crate::morph::{Analysis, Case, Gender, Number};
use log::{info, trace, warn};
use std::fs;
use std::path::Path;

/// One row of the noun frequency table.
///
/// Fields: `noun frequency raw_count gender case number`, whitespace separated.
/// The raw count is not used. Tags outside the known vocabulary, such as
/// `noGender` for pluralia tantum, leave the row without an analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct NounRow {
    pub noun: String,
    pub frequency: f64,
    pub analysis: Option<Analysis>,
}

/// One row of the bigram table.
///
/// Fields: `count noun noun_pos verb verb_pos`, tab separated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BigramRow {
    pub count: u64,
    pub noun: String,
    pub noun_pos: String,
    pub verb: String,
    pub verb_pos: String,
}

/// Parsed rows together with the number of lines that had to be skipped.
#[derive(Clone, Debug, PartialEq)]
pub struct Table<T> {
    pub rows: Vec<T>,
    pub skipped: usize,
}

pub fn parse_noun_line(line: &str) -> Option<NounRow> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 6 {
        return None;
    }
    let frequency: f64 = fields[1].parse().ok()?;
    if !frequency.is_finite() || frequency < 0.0 {
        return None;
    }
    let analysis = match (
        fields[3].parse::<Gender>(),
        fields[4].parse::<Case>(),
        fields[5].parse::<Number>(),
    ) {
        (Ok(gender), Ok(case), Ok(number)) => Some(Analysis {
            gender,
            case,
            number,
        }),
        _ => None,
    };
    Some(NounRow {
        noun: fields[0].to_owned(),
        frequency,
        analysis,
    })
}

pub fn parse_bigram_line(line: &str) -> Option<BigramRow> {
    let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
    if fields.len() < 5 {
        return None;
    }
    let count: u64 = fields[0].parse().ok()?;
    if count == 0 || fields[1].is_empty() || fields[3].is_empty() {
        return None;
    }
    Some(BigramRow {
        count,
        noun: fields[1].to_owned(),
        noun_pos: fields[2].to_owned(),
        verb: fields[3].to_owned(),
        verb_pos: fields[4].to_owned(),
    })
}

fn parse_lines<T>(text: &str, parse: impl Fn(&str) -> Option<T>) -> Table<T> {
    let mut rows = Vec::new();
    let mut skipped = 0;
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse(line) {
            Some(row) => rows.push(row),
            None => {
                trace!("skipping malformed line {}: {:?}", i + 1, line);
                skipped += 1;
            }
        }
    }
    Table { rows, skipped }
}

pub fn parse_noun_table(text: &str) -> Table<NounRow> {
    parse_lines(text, parse_noun_line)
}

pub fn parse_bigram_table(text: &str) -> Table<BigramRow> {
    parse_lines(text, parse_bigram_line)
}

fn read_table<T>(path: &Path, what: &str, parse: fn(&str) -> Table<T>) -> Result<Table<T>> {
    info!("read: {}", path.display());
    let text = fs::read_to_string(path)
        .map_err(|e| invalid_input(format!("cannot read {}: {e}", path.display())))?;
    let table = parse(&text);
    if table.skipped > 0 {
        warn!(
            "{}: skipped {} malformed {what} rows",
            path.display(),
            table.skipped
        );
    }
    if table.rows.is_empty() {
        return Err(invalid_input(format!(
            "no usable {what} rows in {}",
            path.display()
        )));
    }
    info!("{}: {} {what} rows", path.display(), table.rows.len());
    Ok(table)
}

/// Read the noun frequency table from a file.
pub fn read_noun_table(path: &Path) -> Result<Table<NounRow>> {
    read_table(path, "noun", parse_noun_table)
}

/// Read the noun-verb bigram table from a file.
pub fn read_bigram_table(path: &Path) -> Result<Table<BigramRow>> {
    read_table(path, "bigram", parse_bigram_table)
}
