//! Presenting and exporting search results.

use crate::errors::Result;
use crate::frequency;
use crate::refine::RefinedResult;
use crate::search::{CandidateResult, Query};
use itertools::Itertools;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::path::Path;

/// Everything produced by one search, for JSON export.
#[derive(Serialize)]
pub struct SearchOutput<'a> {
    pub query: &'a Query,
    pub candidates: &'a [CandidateResult],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verb: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refined: Option<&'a [RefinedResult]>,
}

#[derive(Serialize)]
pub struct OError {
    pub error: String,
}

pub fn join_set<T: Display>(set: &BTreeSet<T>) -> String {
    set.iter().join("/")
}

fn candidate_cells(c: &CandidateResult) -> [String; 5] {
    [
        c.noun.clone(),
        c.frequency.to_string(),
        join_set(&c.matched.genders),
        join_set(&c.matched.cases),
        join_set(&c.matched.numbers),
    ]
}

fn table_line(cells: &[String]) -> String {
    format!(
        "{:<20}\t{:<10}\t{:<10}\t{:<10}\t{}",
        cells[0], cells[1], cells[2], cells[3], cells[4]
    )
}

const HEADER: [&str; 5] = ["NOUN", "FREQUENCY", "GENDERS", "CASES", "NUMERUS"];

/// One line per candidate, with a header line.
pub fn candidate_table(results: &[CandidateResult]) -> String {
    let header = HEADER.map(str::to_owned);
    std::iter::once(table_line(&header))
        .chain(results.iter().map(|c| table_line(&candidate_cells(c))))
        .join("\n")
}

/// Like [candidate_table], with the bigram count in front.
pub fn refined_table(rows: &[RefinedResult]) -> String {
    std::iter::once(format!("{:<8}\t{}", "COUNT", table_line(&HEADER.map(str::to_owned))))
        .chain(rows.iter().map(|r| {
            format!(
                "{:<8}\t{}",
                r.count,
                table_line(&candidate_cells(&r.candidate))
            )
        }))
        .join("\n")
}

/// The search criteria, one per line.
pub fn query_summary(query: &Query) -> String {
    let mut lines = vec![];
    if let Some(target) = &query.target {
        lines.push(format!("Target word: {target}"));
    }
    lines.push(format!(
        "Search frequency: {} per million ({})",
        query.frequency,
        frequency::describe_band(query.frequency)
    ));
    lines.push(format!(
        "Word length: {} to {} characters",
        query.length_min, query.length_max
    ));
    lines.push(format!("Genders: {}", join_set(&query.filters.genders)));
    lines.push(format!("Cases: {}", join_set(&query.filters.cases)));
    lines.push(format!("Numerus: {}", join_set(&query.filters.numbers)));
    lines.join("\n")
}

fn write_header(sheet: &mut Worksheet, header: &[&str], bold: &Format) -> Result<()> {
    for (col, title) in header.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, bold)?;
    }
    Ok(())
}

fn write_candidate(sheet: &mut Worksheet, row: u32, col: u16, c: &CandidateResult) -> Result<()> {
    sheet.write_string(row, col, &c.noun)?;
    sheet.write_number(row, col + 1, c.frequency)?;
    sheet.write_string(row, col + 2, join_set(&c.matched.genders))?;
    sheet.write_string(row, col + 3, join_set(&c.matched.cases))?;
    sheet.write_string(row, col + 4, join_set(&c.matched.numbers))?;
    Ok(())
}

/// Write the candidates, and the refined rows if any, to an Excel file.
pub fn write_xlsx(path: &Path, output: &SearchOutput) -> Result<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name("candidates")?;
    write_header(sheet, &HEADER, &bold)?;
    for (i, c) in output.candidates.iter().enumerate() {
        write_candidate(sheet, i as u32 + 1, 0, c)?;
    }

    if let (Some(verb), Some(refined)) = (output.verb, output.refined) {
        let sheet = workbook.add_worksheet();
        sheet.set_name("bigrams")?;
        sheet.write_string_with_format(0, 7, format!("verb: {verb}"), &bold)?;
        let mut header = vec!["COUNT"];
        header.extend(HEADER);
        write_header(sheet, &header, &bold)?;
        for (i, r) in refined.iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write_number(row, 0, r.count as f64)?;
            write_candidate(sheet, row, 1, &r.candidate)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}
