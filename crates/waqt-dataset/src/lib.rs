//! On-disk prayer-time dataset: locating the right table for a request and
//! parsing tables and city lists.

mod cursor;

pub mod cities;
pub mod locator;
pub mod normalize;
pub mod table;
pub mod timezones;

pub use cities::parse_cities;
pub use locator::{Locator, TABLE_PREFIX};
pub use normalize::city_token;
pub use table::{parse_day, ParseReport, SkippedRow, TimeTable};
pub use timezones::{timezone_hint, TimezoneHint};
