//! Core types for waqt: the prayer-time data model, clock arithmetic and
//! the shared error type.

pub mod clock;
pub mod error;
pub mod location;
pub mod prayer;

pub use clock::{format_countdown, ClockTime, ClockTimeError, DisplayLocale, MINUTES_PER_DAY};
pub use error::WaqtError;
pub use location::{CityRecord, CountryCode, DatasetLocation, MonthDay};
pub use prayer::{AdjustmentFlags, NextPrayerResult, Prayer, PrayerOffsets, PrayerTimeSet};
