//! Wire shape of the `/timings` response.
//!
//! Only the fields the adapter reads are declared; everything else in the
//! payload is ignored.

use serde::Deserialize;
use serde_json::Value;

/// Outer envelope. `data` is a message string when `code` is not 200, so it
/// is only decoded into [`TimingsData`] after the code checks out.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub code: u16,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TimingsData {
    pub timings: Timings,
    #[serde(default)]
    pub date: Option<DateInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Timings {
    pub fajr: String,
    pub sunrise: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DateInfo {
    #[serde(default)]
    pub readable: Option<String>,
    #[serde(default)]
    pub hijri: Option<HijriInfo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HijriInfo {
    pub date: String,
    pub day: String,
    pub month: HijriMonth,
    pub year: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HijriMonth {
    pub number: u8,
    pub en: String,
    #[serde(default)]
    pub ar: Option<String>,
}
