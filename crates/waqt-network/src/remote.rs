use std::time::Duration;

use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use waqt_rules::apply_offsets;
use waqt_types::{ClockTime, PrayerOffsets, PrayerTimeSet};

use crate::fallback::{fallback_times, FALLBACK_REFERENCE};
use crate::schema::{Envelope, HijriInfo, Timings, TimingsData};

pub const DEFAULT_BASE_URL: &str = "https://api.aladhan.com/v1";

/// Why a remote lookup did not produce times.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "camelCase")]
pub enum RemoteError {
    #[error("remote request failed: {0}")]
    Network(String),
    #[error("remote answered HTTP {0}")]
    Status(u16),
    #[error("remote reported code {code} ({status})")]
    UnexpectedCode { code: u16, status: String },
    #[error("unexpected remote payload: {0}")]
    Shape(String),
}

/// Parameters of one remote lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemoteQuery {
    pub latitude: f64,
    pub longitude: f64,
    /// Calculation method id as understood by the remote API.
    pub method: u8,
    /// Asr juristic school: 0 standard, 1 Hanafi.
    pub school: u8,
    pub date: NaiveDate,
}

impl RemoteQuery {
    /// Umm al-Qura method, standard Asr.
    pub fn new(latitude: f64, longitude: f64, date: NaiveDate) -> Self {
        Self { latitude, longitude, method: 4, school: 0, date }
    }

    pub fn method(mut self, method: u8) -> Self {
        self.method = method;
        self
    }

    pub fn school(mut self, school: u8) -> Self {
        self.school = school;
        self
    }
}

/// Hijri date as reported by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteHijri {
    pub date: String,
    pub day: u8,
    pub month: u8,
    pub month_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_name_ar: Option<String>,
    pub year: u16,
}

impl RemoteHijri {
    fn from_wire(info: HijriInfo) -> Option<Self> {
        Some(Self {
            day: info.day.trim().parse().ok()?,
            year: info.year.trim().parse().ok()?,
            month: info.month.number,
            month_name: info.month.en,
            month_name_ar: info.month.ar,
            date: info.date,
        })
    }
}

/// A day of times fetched remotely, before any local adjustment.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteDay {
    pub times: PrayerTimeSet,
    pub readable_date: Option<String>,
    pub hijri: Option<RemoteHijri>,
}

/// Result of [`RemoteClient::fetch_or_fallback`].
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteOutcome {
    /// Remote times with offsets applied.
    Fetched(RemoteDay),
    /// The static set, plus the failure that forced it.
    Fallback { times: PrayerTimeSet, reason: RemoteError },
}

impl RemoteOutcome {
    pub fn times(&self) -> &PrayerTimeSet {
        match self {
            RemoteOutcome::Fetched(day) => &day.times,
            RemoteOutcome::Fallback { times, .. } => times,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, RemoteOutcome::Fallback { .. })
    }
}

/// HTTP client for the remote timings API.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("waqt/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Network(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches one day of raw times.
    #[instrument(level = "debug", skip(self), fields(base = %self.base_url))]
    pub async fn fetch(&self, query: &RemoteQuery) -> Result<RemoteDay, RemoteError> {
        let url = format!("{}/timings/{}", self.base_url, query.date.format("%d-%m-%Y"));
        let response = self
            .http
            .get(&url)
            .query(&[
                ("latitude", query.latitude.to_string()),
                ("longitude", query.longitude.to_string()),
                ("method", query.method.to_string()),
                ("school", query.school.to_string()),
            ])
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(RemoteError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| RemoteError::Network(e.to_string()))?;
        let envelope: Envelope =
            serde_json::from_str(&body).map_err(|e| RemoteError::Shape(e.to_string()))?;
        if envelope.code != 200 {
            return Err(RemoteError::UnexpectedCode { code: envelope.code, status: envelope.status });
        }
        let data: TimingsData =
            serde_json::from_value(envelope.data).map_err(|e| RemoteError::Shape(e.to_string()))?;

        let times = times_from_wire(&data.timings);
        let (readable_date, hijri) = match data.date {
            Some(date) => (date.readable, date.hijri.and_then(RemoteHijri::from_wire)),
            None => (None, None),
        };
        debug!(fajr = %times.fajr, isha = %times.isha, "fetched remote times");
        Ok(RemoteDay { times, readable_date, hijri })
    }

    /// Fetches and applies minute offsets; any failure yields the static set.
    ///
    /// Hour flags are deliberately not applied here.
    pub async fn fetch_or_fallback(&self, query: &RemoteQuery, offsets: &PrayerOffsets) -> RemoteOutcome {
        match self.fetch(query).await {
            Ok(mut day) => {
                day.times = apply_offsets(&day.times, offsets);
                RemoteOutcome::Fetched(day)
            }
            Err(reason) => {
                warn!(error = %reason, reference = FALLBACK_REFERENCE, "remote timings unavailable, using static fallback");
                RemoteOutcome::Fallback { times: fallback_times(), reason }
            }
        }
    }
}

fn times_from_wire(timings: &Timings) -> PrayerTimeSet {
    PrayerTimeSet::from_array(
        [
            &timings.fajr,
            &timings.sunrise,
            &timings.dhuhr,
            &timings.asr,
            &timings.maghrib,
            &timings.isha,
        ]
        .map(|raw| ClockTime::sanitize(raw)),
    )
}
