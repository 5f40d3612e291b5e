use chrono::NaiveDate;
use waqt_network::RemoteQuery;
use waqt_rules::AdjustmentContext;
use waqt_types::{CountryCode, WaqtError};

/// Coordinates for the remote fallback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemoteTarget {
    pub latitude: f64,
    pub longitude: f64,
    pub method: u8,
    pub school: u8,
}

impl RemoteTarget {
    /// Validates latitude/longitude ranges; method 4 and school 0 by default.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, WaqtError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(WaqtError::invalid_input(format!("latitude {} out of range", latitude)));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(WaqtError::invalid_input(format!("longitude {} out of range", longitude)));
        }
        Ok(Self { latitude, longitude, method: 4, school: 0 })
    }

    pub fn method(mut self, method: u8) -> Self {
        self.method = method;
        self
    }

    pub fn school(mut self, school: u8) -> Self {
        self.school = school;
        self
    }

    pub(crate) fn query(&self, date: NaiveDate) -> RemoteQuery {
        RemoteQuery::new(self.latitude, self.longitude, date).method(self.method).school(self.school)
    }
}

/// Everything needed to resolve one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRequest {
    pub country: CountryCode,
    pub date: NaiveDate,
    pub timezone: Option<String>,
    pub city: Option<String>,
    pub adjustments: AdjustmentContext,
    pub remote: Option<RemoteTarget>,
    /// Day shift for the Hijri label of local days.
    pub hijri_adjustment: i64,
}

impl DayRequest {
    pub fn new(country: CountryCode, date: NaiveDate) -> Self {
        Self {
            country,
            date,
            timezone: None,
            city: None,
            adjustments: AdjustmentContext::default(),
            remote: None,
            hijri_adjustment: 0,
        }
    }

    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn adjustments(mut self, adjustments: AdjustmentContext) -> Self {
        self.adjustments = adjustments;
        self
    }

    pub fn remote(mut self, target: RemoteTarget) -> Self {
        self.remote = Some(target);
        self
    }

    pub fn hijri_adjustment(mut self, days: i64) -> Self {
        self.hijri_adjustment = days;
        self
    }
}
