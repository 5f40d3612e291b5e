//! # Waqt
//!
//! Daily prayer times from a precomputed dataset, with per-prayer offsets,
//! summer-hour and forced hour corrections, and a next-prayer countdown.
//!
//! This crate is a facade that re-exports the `waqt` workspace crates.
//!
//! ## Modules
//!
//! - `types`: `ClockTime`, `PrayerTimeSet`, offsets and errors
//! - `dataset`: table locator and parsers
//! - `rules`: adjustment pipeline and next-prayer resolver
//! - `network`: remote timings fallback
//! - `calendar`: Hijri labels
//!
//! ## Usage
//!
//! ```rust
//! use waqt::prelude::*;
//!
//! let base = PrayerTimeSet::from_array(
//!     ["04:30", "05:55", "12:22", "15:40", "18:50", "20:20"].map(|s| s.parse().unwrap()),
//! );
//! let adjusted = AdjustmentContext::new().offset(Prayer::Fajr, 10).apply(&base);
//! assert_eq!(adjusted.fajr.to_string(), "04:40");
//!
//! let next = resolve_next(&adjusted, "13:00".parse().unwrap());
//! assert_eq!(next.name, Prayer::Asr);
//! ```

pub use waqt_core::*;
