use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::clock::ClockTime;

/// The daily prayer boundaries, in the order they occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Prayer {
    Fajr,
    /// Not a prayer itself; marks the end of the Fajr window.
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    /// All six boundaries in daily order.
    pub const ALL: [Prayer; 6] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    /// The five obligatory prayers shown as cards (no Sunrise).
    pub const CARDS: [Prayer; 5] = [
        Prayer::Fajr,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    /// Lower-case key used in request bodies and offset maps.
    pub fn key(self) -> &'static str {
        match self {
            Prayer::Fajr => "fajr",
            Prayer::Sunrise => "sunrise",
            Prayer::Dhuhr => "dhuhr",
            Prayer::Asr => "asr",
            Prayer::Maghrib => "maghrib",
            Prayer::Isha => "isha",
        }
    }

    /// Case-insensitive lookup by key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Prayer::Fajr => "Fajr",
            Prayer::Sunrise => "Sunrise",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
        };
        write!(f, "{}", s)
    }
}

/// One day's six wall-clock times.
///
/// Times are normally ascending but offsets may wrap one past midnight;
/// nothing here assumes monotonic order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrayerTimeSet {
    pub fajr: ClockTime,
    pub sunrise: ClockTime,
    pub dhuhr: ClockTime,
    pub asr: ClockTime,
    pub maghrib: ClockTime,
    pub isha: ClockTime,
}

impl PrayerTimeSet {
    /// Builds a set from times listed in `Prayer::ALL` order.
    pub fn from_array(times: [ClockTime; 6]) -> Self {
        let [fajr, sunrise, dhuhr, asr, maghrib, isha] = times;
        Self { fajr, sunrise, dhuhr, asr, maghrib, isha }
    }

    pub fn to_array(&self) -> [ClockTime; 6] {
        [self.fajr, self.sunrise, self.dhuhr, self.asr, self.maghrib, self.isha]
    }

    pub fn get(&self, prayer: Prayer) -> ClockTime {
        self[prayer]
    }

    /// Iterates `(prayer, time)` pairs in daily order.
    pub fn iter(&self) -> impl Iterator<Item = (Prayer, ClockTime)> + '_ {
        Prayer::ALL.into_iter().map(move |p| (p, self[p]))
    }

    /// Applies `f` to every field.
    pub fn map(&self, mut f: impl FnMut(Prayer, ClockTime) -> ClockTime) -> Self {
        let mut out = *self;
        for prayer in Prayer::ALL {
            out[prayer] = f(prayer, self[prayer]);
        }
        out
    }
}

impl Index<Prayer> for PrayerTimeSet {
    type Output = ClockTime;

    fn index(&self, prayer: Prayer) -> &ClockTime {
        match prayer {
            Prayer::Fajr => &self.fajr,
            Prayer::Sunrise => &self.sunrise,
            Prayer::Dhuhr => &self.dhuhr,
            Prayer::Asr => &self.asr,
            Prayer::Maghrib => &self.maghrib,
            Prayer::Isha => &self.isha,
        }
    }
}

impl IndexMut<Prayer> for PrayerTimeSet {
    fn index_mut(&mut self, prayer: Prayer) -> &mut ClockTime {
        match prayer {
            Prayer::Fajr => &mut self.fajr,
            Prayer::Sunrise => &mut self.sunrise,
            Prayer::Dhuhr => &mut self.dhuhr,
            Prayer::Asr => &mut self.asr,
            Prayer::Maghrib => &mut self.maghrib,
            Prayer::Isha => &mut self.isha,
        }
    }
}

/// Signed per-prayer corrections in minutes. Missing keys mean 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrayerOffsets {
    pub fajr: i32,
    pub sunrise: i32,
    pub dhuhr: i32,
    pub asr: i32,
    pub maghrib: i32,
    pub isha: i32,
}

impl PrayerOffsets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, prayer: Prayer) -> i32 {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    /// Sets one prayer's offset.
    pub fn with(mut self, prayer: Prayer, minutes: i32) -> Self {
        let slot = match prayer {
            Prayer::Fajr => &mut self.fajr,
            Prayer::Sunrise => &mut self.sunrise,
            Prayer::Dhuhr => &mut self.dhuhr,
            Prayer::Asr => &mut self.asr,
            Prayer::Maghrib => &mut self.maghrib,
            Prayer::Isha => &mut self.isha,
        };
        *slot = minutes;
        self
    }

    pub fn is_zero(&self) -> bool {
        Prayer::ALL.into_iter().all(|p| self.get(p) == 0)
    }
}

/// Coarse hour corrections layered on top of the offsets.
///
/// The flags are independent; setting both forced shifts nets to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdjustmentFlags {
    pub apply_summer_hour: bool,
    pub force_hour_more: bool,
    pub force_hour_less: bool,
}

/// The upcoming prayer relative to a wall-clock instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextPrayerResult {
    pub name: Prayer,
    pub time: ClockTime,
    pub time_until_minutes: u16,
    /// Elapsed share of the interval since the previous boundary, in `[0, 1]`.
    pub progress_fraction: f64,
}
