//! Resolution pipeline: locate a table, pick the day's row, adjust it, and
//! derive the next prayer. Falls back to a remote source when no table
//! matches and coordinates are known.

pub mod config;
pub mod day;
pub mod request;
pub mod service;

pub use waqt_calendar as calendar;
pub use waqt_dataset as dataset;
pub use waqt_network as network;
pub use waqt_rules as rules;
pub use waqt_types as types;

pub use config::ServiceConfig;
pub use day::{DaySource, ResolvedDay, UpcomingPrayer};
pub use request::{DayRequest, RemoteTarget};
pub use service::PrayerService;

pub use waqt_calendar::{to_hijri, HijriLabel};
pub use waqt_rules::{adjust, resolve_next, AdjustmentContext};
pub use waqt_types::{
    format_countdown, AdjustmentFlags, CityRecord, ClockTime, CountryCode, DisplayLocale, MonthDay,
    NextPrayerResult, Prayer, PrayerOffsets, PrayerTimeSet, WaqtError,
};

pub mod prelude {
    pub use crate::types::*;
    pub use crate::{adjust, resolve_next, to_hijri};
    pub use crate::{AdjustmentContext, DayRequest, PrayerService, ResolvedDay, ServiceConfig};
}
