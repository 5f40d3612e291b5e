use chrono::NaiveDate;
use serde::Serialize;
use waqt_calendar::HijriLabel;
use waqt_network::{RemoteError, RemoteHijri};
use waqt_types::{DatasetLocation, NextPrayerResult, PrayerTimeSet};

/// Where a day's times came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DaySource {
    Dataset { location: DatasetLocation },
    Remote,
    Fallback { reason: RemoteError },
}

impl DaySource {
    pub fn label(&self) -> &'static str {
        match self {
            DaySource::Dataset { .. } => "dataset",
            DaySource::Remote => "remote",
            DaySource::Fallback { .. } => "fallback",
        }
    }
}

/// Fully adjusted times for one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDay {
    pub date: NaiveDate,
    pub times: PrayerTimeSet,
    pub source: DaySource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hijri: Option<HijriLabel>,
    /// Display date reported by the remote source, e.g. `15 Jun 2024`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readable_date: Option<String>,
}

pub(crate) fn hijri_from_remote(remote: RemoteHijri) -> HijriLabel {
    HijriLabel {
        day: remote.day,
        month: remote.month,
        year: remote.year,
        month_name: remote.month_name,
    }
}

/// A resolved day together with its upcoming prayer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingPrayer {
    pub day: ResolvedDay,
    pub next: NextPrayerResult,
}
