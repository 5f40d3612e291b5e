//! Wall-clock `HH:MM` values.
//!
//! Every published prayer time is a time-of-day with no date attached.
//! Arithmetic wraps modulo 24 hours, so an offset that pushes Isha past
//! midnight lands on the small hours instead of failing.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Minutes in one civil day.
pub const MINUTES_PER_DAY: u16 = 1440;

/// Error returned when parsing a strict `H:MM` / `HH:MM` string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid clock time {input:?}: {reason}")]
pub struct ClockTimeError {
    input: String,
    reason: &'static str,
}

impl ClockTimeError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self { input: input.to_string(), reason }
    }
}

/// A time of day with minute precision, stored as minute-of-day (`0..1440`).
///
/// Serializes as a zero-padded 24-hour `"HH:MM"` string.
///
/// ```
/// use waqt_types::ClockTime;
///
/// let isha: ClockTime = "23:30".parse().unwrap();
/// assert_eq!(isha.shift_minutes(45).to_string(), "00:15");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Builds a time from hour and minute, `None` if either is out of range.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then(|| Self(u16::from(hour) * 60 + u16::from(minute)))
    }

    /// Builds a time from any minute count, wrapping modulo one day.
    pub fn from_minutes(minutes: i64) -> Self {
        Self(minutes.rem_euclid(i64::from(MINUTES_PER_DAY)) as u16)
    }

    /// Minute-of-day in `0..1440`.
    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }

    /// Adds `delta` minutes, wrapping around midnight.
    ///
    /// A zero delta returns `self` untouched.
    pub fn shift_minutes(self, delta: i32) -> Self {
        if delta == 0 {
            return self;
        }
        Self::from_minutes(i64::from(self.0) + i64::from(delta))
    }

    /// Adds `delta` whole hours, wrapping around midnight.
    pub fn shift_hours(self, delta: i32) -> Self {
        if delta == 0 {
            return self;
        }
        Self::from_minutes(i64::from(self.0) + i64::from(delta) * 60)
    }

    /// Returns true once the wall clock has reached this time of day.
    ///
    /// Only the time of day is compared; the date is ignored, so every
    /// time is "not past" again right after midnight.
    pub fn is_past(self, now: ClockTime) -> bool {
        self.0 <= now.0
    }

    /// Extracts the first `H:MM` / `HH:MM` pattern found anywhere in `raw`,
    /// clamping the hour to 23 and the minute to 59.
    ///
    /// Anything without such a pattern becomes midnight. Remote APIs append
    /// zone labels (`"04:40 (NZDT)"`), which this strips.
    pub fn sanitize(raw: &str) -> Self {
        let bytes = raw.as_bytes();
        for start in 0..bytes.len() {
            for width in [2usize, 1] {
                if let Some((hour, minute)) = match_clock_at(bytes, start, width) {
                    let hour = hour.min(23) as u8;
                    let minute = minute.min(59) as u8;
                    return Self::new(hour, minute).unwrap_or(Self::MIDNIGHT);
                }
            }
        }
        Self::MIDNIGHT
    }

    /// Renders the time for display.
    ///
    /// 24-hour output is the canonical `HH:MM`. 12-hour output maps hours
    /// 0 and 12 to `12` and appends the locale's day-period marker.
    pub fn format_display(self, use_24h: bool, locale: DisplayLocale) -> String {
        if use_24h {
            return self.to_string();
        }
        let hour = self.hour();
        let twelve = match hour % 12 {
            0 => 12,
            h => h,
        };
        let marker = locale.day_period(hour < 12);
        format!("{}:{:02} {}", twelve, self.minute(), marker)
    }
}

/// Matches `digit{width} ':' digit digit` at `start`.
fn match_clock_at(bytes: &[u8], start: usize, width: usize) -> Option<(u16, u16)> {
    let hour_digits = bytes.get(start..start + width)?;
    if !hour_digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes.get(start + width) != Some(&b':') {
        return None;
    }
    let minute_digits = bytes.get(start + width + 1..start + width + 3)?;
    if !minute_digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some((digits_value(hour_digits), digits_value(minute_digits)))
}

fn digits_value(digits: &[u8]) -> u16 {
    digits.iter().fold(0, |acc, d| acc * 10 + u16::from(d - b'0'))
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl From<NaiveTime> for ClockTime {
    /// Truncates to the minute.
    fn from(time: NaiveTime) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }
}

impl FromStr for ClockTime {
    type Err = ClockTimeError;

    /// Strict parse of `H:MM` or `HH:MM` (surrounding whitespace allowed).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (h, m) = trimmed
            .split_once(':')
            .ok_or_else(|| ClockTimeError::new(s, "missing ':' separator"))?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(ClockTimeError::new(s, "expected H:MM or HH:MM"));
        }
        if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(ClockTimeError::new(s, "non-digit character"));
        }
        let hour = digits_value(h.as_bytes());
        let minute = digits_value(m.as_bytes());
        if hour > 23 {
            return Err(ClockTimeError::new(s, "hour out of range"));
        }
        if minute > 59 {
            return Err(ClockTimeError::new(s, "minute out of range"));
        }
        Ok(Self(hour * 60 + minute))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Script used for 12-hour day-period markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayLocale {
    #[default]
    Latin,
    Arabic,
}

impl DisplayLocale {
    /// Picks the locale from a language tag such as `"ar"`, `"ar-SA"` or `"en-US"`.
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("ar") {
            Self::Arabic
        } else {
            Self::Latin
        }
    }

    fn day_period(self, morning: bool) -> &'static str {
        match (self, morning) {
            (Self::Latin, true) => "AM",
            (Self::Latin, false) => "PM",
            (Self::Arabic, true) => "ص",
            (Self::Arabic, false) => "م",
        }
    }
}

/// Formats a countdown in minutes as `HH:MM` (hours are not wrapped).
pub fn format_countdown(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_from_naive_time_truncates_seconds() {
        let naive = NaiveTime::from_hms_opt(13, 7, 59).unwrap();
        assert_eq!(ClockTime::from(naive), t("13:07"));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(t("04:30").to_string(), "04:30");
        assert_eq!(t("4:30").to_string(), "04:30");
        assert_eq!(t(" 23:59 ").minutes(), 1439);
        assert!("24:00".parse::<ClockTime>().is_err());
        assert!("12:60".parse::<ClockTime>().is_err());
        assert!("1230".parse::<ClockTime>().is_err());
        assert!("ab:cd".parse::<ClockTime>().is_err());
    }

    #[test]
    fn test_shift_minutes_wraps() {
        assert_eq!(t("23:30").shift_minutes(45), t("00:15"));
        assert_eq!(t("00:10").shift_minutes(-20), t("23:50"));
        assert_eq!(t("12:00").shift_minutes(1440), t("12:00"));
        assert_eq!(t("12:00").shift_minutes(-2880), t("12:00"));
    }

    #[test]
    fn test_shift_zero_is_identity() {
        let time = t("05:07");
        assert_eq!(time.shift_minutes(0), time);
        assert_eq!(time.shift_hours(0), time);
    }

    #[test]
    fn test_shift_hours_wraps() {
        assert_eq!(t("23:15").shift_hours(1), t("00:15"));
        assert_eq!(t("00:15").shift_hours(-1), t("23:15"));
    }

    #[test]
    fn test_is_past_compares_time_of_day_only() {
        let now = t("13:00");
        assert!(t("12:00").is_past(now));
        assert!(t("13:00").is_past(now));
        assert!(!t("15:00").is_past(now));
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(ClockTime::sanitize("04:40 (NZDT)"), t("04:40"));
        assert_eq!(ClockTime::sanitize("at 5:07pm"), t("05:07"));
        assert_eq!(ClockTime::sanitize("99:99"), t("23:59"));
        assert_eq!(ClockTime::sanitize("123:45"), t("23:45"));
        assert_eq!(ClockTime::sanitize("no time here"), ClockTime::MIDNIGHT);
        assert_eq!(ClockTime::sanitize(""), ClockTime::MIDNIGHT);
    }

    #[test]
    fn test_format_display_12h() {
        assert_eq!(t("00:05").format_display(false, DisplayLocale::Latin), "12:05 AM");
        assert_eq!(t("12:30").format_display(false, DisplayLocale::Latin), "12:30 PM");
        assert_eq!(t("15:45").format_display(false, DisplayLocale::Latin), "3:45 PM");
        assert_eq!(t("05:00").format_display(false, DisplayLocale::Arabic), "5:00 ص");
        assert_eq!(t("19:30").format_display(false, DisplayLocale::Arabic), "7:30 م");
        assert_eq!(t("19:30").format_display(true, DisplayLocale::Arabic), "19:30");
    }

    #[test]
    fn test_locale_from_tag() {
        assert_eq!(DisplayLocale::from_tag("ar"), DisplayLocale::Arabic);
        assert_eq!(DisplayLocale::from_tag("AR-sa"), DisplayLocale::Arabic);
        assert_eq!(DisplayLocale::from_tag("en-US"), DisplayLocale::Latin);
        assert_eq!(DisplayLocale::from_tag(""), DisplayLocale::Latin);
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&t("6:05")).unwrap();
        assert_eq!(json, "\"06:05\"");
        let back: ClockTime = serde_json::from_str("\"18:20\"").unwrap();
        assert_eq!(back, t("18:20"));
        assert!(serde_json::from_str::<ClockTime>("\"18h20\"").is_err());
    }

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(0), "00:00");
        assert_eq!(format_countdown(125), "02:05");
        assert_eq!(format_countdown(1500), "25:00");
    }
}
