//! Country city lists (`<CC>.js`).
//!
//! The file holds one bracketed array of `"<CC>.<CITY>.<EXTRA>"` strings,
//! usually one per line. `<EXTRA>` is a region or similar disambiguator,
//! written as dashes when absent.

use tracing::debug;
use waqt_types::CityRecord;

use crate::cursor::{TokenKind, Tokenizer};

/// True for the placeholder that marks a missing `<EXTRA>` component.
fn is_absent(component: &str) -> bool {
    component.chars().all(|c| c == '-')
}

/// Parses a city list. Entries that are not quoted, or that lack a city
/// component, are skipped.
pub fn parse_cities(contents: &str) -> Vec<CityRecord> {
    let Some(body) = bracket_body(contents) else {
        debug!("city list has no bracketed array");
        return Vec::new();
    };

    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .flat_map(line_entries)
        .filter_map(|entry| {
            let record = city_record(entry);
            if record.is_none() {
                debug!(entry, "skipping city entry");
            }
            record
        })
        .collect()
}

/// Text strictly between the first `[` and the last `]`.
fn bracket_body(contents: &str) -> Option<&str> {
    let start = contents.find('[')?;
    let end = contents.rfind(']')?;
    (start < end).then(|| &contents[start + 1..end])
}

/// Quoted strings that open each comma-separated element of a line.
///
/// Scanning stops at the first element that does not start with a quote.
fn line_entries(line: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut expect_entry = true;
    for token in Tokenizer::new(line) {
        match (expect_entry, token.kind) {
            (true, TokenKind::Str(entry)) => {
                entries.push(entry);
                expect_entry = false;
            }
            (false, TokenKind::Comma) => expect_entry = true,
            _ => break,
        }
    }
    entries
}

fn city_record(entry: &str) -> Option<CityRecord> {
    let mut parts = entry.split('.').map(str::trim);
    let country = parts.next().filter(|c| !c.is_empty())?;
    let city = parts.next().filter(|c| !c.is_empty())?;
    let extra = parts.next().filter(|e| !is_absent(e)).map(str::to_string);
    Some(CityRecord {
        code: format!("{}.{}", country, city),
        city: city.to_string(),
        extra,
    })
}
