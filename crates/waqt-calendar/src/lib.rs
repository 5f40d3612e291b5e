//! Hijri secondary date shown next to the Gregorian date of a time table.

use chrono::{Datelike, Duration, NaiveDate};
use hijri_date::HijriDate;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use thiserror::Error;

/// Minimum Gregorian year for Hijri conversion.
pub const HIJRI_MIN_YEAR: i32 = 1938;
/// Maximum Gregorian year for Hijri conversion.
pub const HIJRI_MAX_YEAR: i32 = 2076;

/// Day adjustments beyond this are treated as configuration mistakes and clamped.
pub const MAX_ADJUSTMENT_DAYS: i64 = 30;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Date outside supported range (1938-2076).
    #[error("Date {date} is out of supported Hijri range (1938 to 2076)")]
    DateOutOfRange { date: NaiveDate },
}

/// A Hijri date ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HijriLabel {
    pub day: u8,
    pub month: u8,
    pub year: u16,
    pub month_name: String,
}

impl HijriLabel {
    pub fn new(day: u8, month: u8, year: u16) -> Self {
        Self { day, month, year, month_name: hijri_month_name(month).to_string() }
    }
}

impl fmt::Display for HijriLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.day, self.month_name, self.year)
    }
}

// (gregorian, adjustment) -> (hijri_year, month, day)
thread_local! {
    static HIJRI_CACHE: RefCell<Option<(NaiveDate, i64, u16, u8, u8)>> = const { RefCell::new(None) };
}

/// Converts a Gregorian date to its Hijri label.
///
/// `adjustment` shifts the Hijri day for local moon sighting (positive means
/// the Hijri calendar runs ahead) and is clamped to ±30 days.
pub fn to_hijri(date: NaiveDate, adjustment: i64) -> Result<HijriLabel, CalendarError> {
    let adjustment = adjustment.clamp(-MAX_ADJUSTMENT_DAYS, MAX_ADJUSTMENT_DAYS);

    let cached = HIJRI_CACHE.with(|cache| {
        (*cache.borrow()).and_then(|(d, adj, y, m, day)| {
            (d == date && adj == adjustment).then_some((y, m, day))
        })
    });
    if let Some((y, m, d)) = cached {
        return Ok(HijriLabel::new(d, m, y));
    }

    let adjusted = date
        .checked_add_signed(Duration::days(adjustment))
        .ok_or(CalendarError::DateOutOfRange { date })?;
    if adjusted.year() < HIJRI_MIN_YEAR || adjusted.year() > HIJRI_MAX_YEAR {
        return Err(CalendarError::DateOutOfRange { date });
    }

    let hijri = HijriDate::from_gr(
        adjusted.year() as usize,
        adjusted.month() as usize,
        adjusted.day() as usize,
    )
    .map_err(|_| CalendarError::DateOutOfRange { date })?;

    let (y, m, d) = (hijri.year() as u16, hijri.month() as u8, hijri.day() as u8);
    HIJRI_CACHE.with(|cache| {
        *cache.borrow_mut() = Some((date, adjustment, y, m, d));
    });

    Ok(HijriLabel::new(d, m, y))
}

/// Returns Hijri month name.
pub fn hijri_month_name(month: u8) -> &'static str {
    match month {
        1 => "Muharram",
        2 => "Safar",
        3 => "Rabi' al-Awwal",
        4 => "Rabi' al-Thani",
        5 => "Jumada al-Ula",
        6 => "Jumada al-Akhirah",
        7 => "Rajab",
        8 => "Sha'ban",
        9 => "Ramadhan",
        10 => "Shawwal",
        11 => "Dhu al-Qi'dah",
        12 => "Dhu al-Hijjah",
        _ => "Unknown",
    }
}
