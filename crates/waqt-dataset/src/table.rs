//! Yearly time tables: one row per calendar day.
//!
//! A row is a `MM-DD` key followed by at least six clock values in
//! `Prayer::ALL` order. Object, nested-array and plain-text layouts are
//! all accepted:
//!
//! ```text
//! var wtimes = { "03-15": ["05:00", "06:10", "12:20", "15:45", "18:25", "19:55"], ... };
//! [ ["03-15", "05:00", "06:10", "12:20", "15:45", "18:25", "19:55"], ... ]
//! 03-15 05:00 06:10 12:20 15:45 18:25 19:55
//! ```
//!
//! A row ends at the next closing bracket or brace, or where the next key
//! begins. Rows with fewer than six values, or with a value that is not a
//! clock time, are skipped and recorded in the [`ParseReport`].

use std::collections::BTreeMap;
use std::str::FromStr;

use tracing::debug;
use waqt_types::{ClockTime, MonthDay, PrayerTimeSet};

use crate::cursor::{Token, TokenKind, Tokenizer};

/// Number of leading values a row must carry.
pub const REQUIRED_FIELDS: usize = 6;

/// A row that could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: u32,
    pub key: String,
    pub reason: &'static str,
}

/// What the parser kept and what it dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub rows: usize,
    pub skipped: Vec<SkippedRow>,
}

/// A fully parsed table, keyed by month-day.
#[derive(Debug, Clone, Default)]
pub struct TimeTable {
    rows: BTreeMap<MonthDay, PrayerTimeSet>,
}

impl TimeTable {
    /// Parses every row. When a key repeats, the first row wins.
    pub fn parse(contents: &str) -> (Self, ParseReport) {
        let mut rows = BTreeMap::new();
        let mut report = ParseReport::default();
        for row in Rows::new(contents) {
            match row.into_times() {
                Ok((key, times)) => {
                    rows.entry(key).or_insert(times);
                    report.rows += 1;
                }
                Err(skipped) => {
                    debug!(line = skipped.line, key = %skipped.key, reason = skipped.reason, "skipping table row");
                    report.skipped.push(skipped);
                }
            }
        }
        (Self { rows }, report)
    }

    pub fn get(&self, key: MonthDay) -> Option<&PrayerTimeSet> {
        self.rows.get(&key)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MonthDay, &PrayerTimeSet)> {
        self.rows.iter().map(|(k, v)| (*k, v))
    }
}

/// Extracts the row for `key`, stopping at the first usable match.
///
/// Returns `None` when no row carries the key; there is no synthetic default.
pub fn parse_day(contents: &str, key: MonthDay) -> Option<PrayerTimeSet> {
    Rows::new(contents)
        .filter(|row| row.key == key)
        .find_map(|row| row.into_times().ok())
        .map(|(_, times)| times)
}

/// A row as found in the token stream, before validation.
struct RawRow<'src> {
    key: MonthDay,
    key_text: &'src str,
    line: u32,
    values: Vec<&'src str>,
}

impl RawRow<'_> {
    fn into_times(self) -> Result<(MonthDay, PrayerTimeSet), SkippedRow> {
        let skip = |reason| SkippedRow { line: self.line, key: self.key_text.to_string(), reason };
        if self.values.len() < REQUIRED_FIELDS {
            return Err(skip("fewer than six time fields"));
        }
        let mut times = [ClockTime::MIDNIGHT; REQUIRED_FIELDS];
        for (slot, raw) in times.iter_mut().zip(&self.values) {
            *slot = ClockTime::from_str(raw).map_err(|_| skip("malformed time field"))?;
        }
        Ok((self.key, PrayerTimeSet::from_array(times)))
    }
}

/// Groups tokens into raw rows.
struct Rows<'src> {
    tokens: std::iter::Peekable<Tokenizer<'src>>,
}

impl<'src> Rows<'src> {
    fn new(contents: &'src str) -> Self {
        Self { tokens: Tokenizer::new(contents).peekable() }
    }
}

fn as_key(token: &Token<'_>) -> Option<MonthDay> {
    let text = token.value()?;
    // Keys are exactly MM-DD; clock values never contain '-'.
    if text.len() != 5 || text.as_bytes()[2] != b'-' {
        return None;
    }
    text.parse().ok()
}

impl<'src> Iterator for Rows<'src> {
    type Item = RawRow<'src>;

    fn next(&mut self) -> Option<RawRow<'src>> {
        let (key, key_text, line) = loop {
            let token = self.tokens.next()?;
            if let Some(key) = as_key(&token) {
                break (key, token.value().unwrap_or_default(), token.line);
            }
        };

        let mut values = Vec::with_capacity(REQUIRED_FIELDS + 1);
        while let Some(token) = self.tokens.peek() {
            if as_key(token).is_some() {
                break;
            }
            let token = *token;
            self.tokens.next();
            match token.kind {
                TokenKind::Str(v) | TokenKind::Word(v) => values.push(v),
                TokenKind::Unterminated => values.push(""),
                TokenKind::CloseBracket | TokenKind::CloseBrace if !values.is_empty() => break,
                _ => {}
            }
        }
        Some(RawRow { key, key_text, line, values })
    }
}
