//! `/wtimes`, `/wtimes/next` and `/locations/cities`.

use actix_web::{web, HttpResponse};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;
use waqt_core::{
    format_countdown, AdjustmentContext, AdjustmentFlags, CityRecord, ClockTime, CountryCode, DayRequest,
    HijriLabel, NextPrayerResult, PrayerOffsets, PrayerService, RemoteTarget, ResolvedDay, WaqtError,
};

use crate::error::{json_ok, ApiError};

/// Body of `POST /wtimes`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WtimesBody {
    pub country_code: Option<String>,
    pub timezone: Option<String>,
    /// `YYYY-MM-DD`; today in `timezone` when absent.
    pub date: Option<String>,
    pub city: Option<String>,
    #[serde(default)]
    pub offsets: PrayerOffsets,
    #[serde(flatten)]
    pub flags: AdjustmentFlags,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub method: Option<u8>,
    pub school: Option<u8>,
    #[serde(default)]
    pub hijri_adjustment: i64,
}

/// Body of `POST /wtimes/next`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextBody {
    #[serde(flatten)]
    pub day: WtimesBody,
    /// `HH:MM`; the current time in `timezone` when absent.
    pub now: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WtimesResponse {
    pub date: NaiveDate,
    pub fajr: ClockTime,
    pub sunrise: ClockTime,
    pub dhuhr: ClockTime,
    pub asr: ClockTime,
    pub maghrib: ClockTime,
    pub isha: ClockTime,
    pub source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hijri: Option<HijriLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readable_date: Option<String>,
}

impl From<ResolvedDay> for WtimesResponse {
    fn from(day: ResolvedDay) -> Self {
        let t = day.times;
        Self {
            date: day.date,
            fajr: t.fajr,
            sunrise: t.sunrise,
            dhuhr: t.dhuhr,
            asr: t.asr,
            maghrib: t.maghrib,
            isha: t.isha,
            source: day.source.label(),
            hijri: day.hijri,
            readable_date: day.readable_date,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextResponse {
    #[serde(flatten)]
    pub day: WtimesResponse,
    pub next: NextPrayerResult,
    /// `timeUntilMinutes` as `HH:MM`.
    pub countdown: String,
}

#[derive(Debug, Deserialize)]
pub struct CitiesQuery {
    pub cc: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CitiesResponse {
    pub cc: CountryCode,
    pub cities: Vec<CityRecord>,
}

fn request_timezone(body: &WtimesBody) -> Option<Tz> {
    body.timezone.as_deref().and_then(|tz| tz.trim().parse().ok())
}

/// Turns a transport body into a core request.
pub fn day_request(body: &WtimesBody) -> Result<DayRequest, ApiError> {
    let country: CountryCode = body
        .country_code
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("countryCode is required".into()))?
        .trim()
        .parse()?;

    let date = match body.date.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|_| WaqtError::invalid_input(format!("date must be YYYY-MM-DD, got {:?}", raw)))?,
        None => match request_timezone(body) {
            Some(tz) => Utc::now().with_timezone(&tz).date_naive(),
            None => Utc::now().date_naive(),
        },
    };

    let mut request = DayRequest::new(country, date)
        .adjustments(AdjustmentContext { offsets: body.offsets, flags: body.flags })
        .hijri_adjustment(body.hijri_adjustment);
    if let Some(tz) = &body.timezone {
        request = request.timezone(tz.trim());
    }
    if let Some(city) = &body.city {
        request = request.city(city.as_str());
    }

    match (body.latitude, body.longitude) {
        (Some(lat), Some(lng)) => {
            let mut target = RemoteTarget::new(lat, lng)?;
            if let Some(method) = body.method {
                target = target.method(method);
            }
            if let Some(school) = body.school {
                target = target.school(school);
            }
            request = request.remote(target);
        }
        (None, None) => {}
        _ => return Err(ApiError::BadRequest("latitude and longitude must be given together".into())),
    }

    Ok(request)
}

fn current_time(body: &NextBody) -> Result<ClockTime, ApiError> {
    match body.now.as_deref() {
        Some(raw) => raw.parse().map_err(|e| ApiError::BadRequest(format!("now: {}", e))),
        None => Ok(match request_timezone(&body.day) {
            Some(tz) => ClockTime::from(Utc::now().with_timezone(&tz).time()),
            None => ClockTime::from(Utc::now().time()),
        }),
    }
}

pub async fn wtimes(
    service: web::Data<PrayerService>,
    body: web::Json<WtimesBody>,
) -> Result<HttpResponse, ApiError> {
    let request = day_request(&body)?;
    let day = service.resolve_day(&request).await?;
    debug!(country = %request.country, date = %request.date, source = day.source.label(), "served day");
    json_ok(&WtimesResponse::from(day))
}

pub async fn wtimes_next(
    service: web::Data<PrayerService>,
    body: web::Json<NextBody>,
) -> Result<HttpResponse, ApiError> {
    let request = day_request(&body.day)?;
    let now = current_time(&body)?;
    let upcoming = service.resolve_upcoming(&request, now).await?;
    let countdown = format_countdown(u32::from(upcoming.next.time_until_minutes));
    json_ok(&NextResponse {
        day: upcoming.day.into(),
        next: upcoming.next,
        countdown,
    })
}

pub async fn cities(
    service: web::Data<PrayerService>,
    query: web::Query<CitiesQuery>,
) -> Result<HttpResponse, ApiError> {
    let cc = query
        .cc
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("cc query parameter is required".into()))?;
    let (cc, cities) = service.cities(cc.trim()).await?;
    json_ok(&CitiesResponse { cc, cities })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: serde_json::Value) -> WtimesBody {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_day_request_from_body() {
        let req = day_request(&body(serde_json::json!({
            "countryCode": "sa",
            "date": "2024-06-15",
            "city": "Makkah",
            "offsets": {"fajr": 10},
            "forceHourMore": true
        })))
        .unwrap();
        assert_eq!(req.country.as_str(), "SA");
        assert_eq!(req.date, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        assert_eq!(req.adjustments.offsets.fajr, 10);
        assert!(req.adjustments.flags.force_hour_more);
        assert!(req.remote.is_none());
    }

    #[test]
    fn test_day_request_rejects_bad_input() {
        assert!(matches!(day_request(&WtimesBody::default()), Err(ApiError::BadRequest(_))));
        let bad_date = body(serde_json::json!({"countryCode": "SA", "date": "15/06/2024"}));
        assert!(matches!(day_request(&bad_date), Err(ApiError::BadRequest(_))));
        let half_coords = body(serde_json::json!({"countryCode": "SA", "latitude": 21.4}));
        assert!(matches!(day_request(&half_coords), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_remote_target_from_body() {
        let req = day_request(&body(serde_json::json!({
            "countryCode": "QA", "latitude": 25.28, "longitude": 51.53, "method": 2, "school": 1
        })))
        .unwrap();
        let target = req.remote.unwrap();
        assert_eq!((target.method, target.school), (2, 1));
    }

    #[test]
    fn test_response_carries_remote_display_date() {
        let day = ResolvedDay {
            date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            times: waqt_core::PrayerTimeSet::from_array(
                ["03:47", "05:14", "11:59", "15:20", "18:44", "20:14"].map(|s| s.parse().unwrap()),
            ),
            source: waqt_core::DaySource::Remote,
            hijri: Some(HijriLabel::new(9, 12, 1445)),
            readable_date: Some("15 Jun 2024".into()),
        };
        let json = serde_json::to_value(WtimesResponse::from(day)).unwrap();
        assert_eq!(json["readableDate"], "15 Jun 2024");
        assert_eq!(json["hijri"]["year"], 1445);
        assert_eq!(json["source"], "remote");
    }
}
