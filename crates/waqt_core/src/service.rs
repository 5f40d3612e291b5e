//! Locator → parser → pipeline orchestration.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::{debug, info, instrument, warn};
use waqt_calendar::to_hijri;
use waqt_dataset::{Locator, TimeTable};
use waqt_network::{RemoteClient, RemoteOutcome};
use waqt_rules::resolve_next;
use waqt_types::{CityRecord, ClockTime, CountryCode, DatasetLocation, MonthDay, WaqtError};

use crate::config::ServiceConfig;
use crate::day::{hijri_from_remote, DaySource, ResolvedDay, UpcomingPrayer};
use crate::request::DayRequest;

/// Parsed tables keyed by resolved file path.
#[derive(Debug, Default)]
struct TableCache {
    tables: RwLock<HashMap<PathBuf, Arc<TimeTable>>>,
}

impl TableCache {
    fn get(&self, path: &Path) -> Option<Arc<TimeTable>> {
        self.tables.read().ok()?.get(path).cloned()
    }

    fn insert(&self, path: PathBuf, table: Arc<TimeTable>) {
        if let Ok(mut guard) = self.tables.write() {
            guard.insert(path, table);
        }
    }

    fn len(&self) -> usize {
        self.tables.read().map(|t| t.len()).unwrap_or(0)
    }
}

/// Resolves prayer days from the dataset, or remotely when nothing matches.
///
/// Cheap to clone and safe to share across request handlers.
#[derive(Debug, Clone)]
pub struct PrayerService {
    locator: Locator,
    remote: Option<RemoteClient>,
    cache: Option<Arc<TableCache>>,
}

impl PrayerService {
    pub fn new(config: &ServiceConfig) -> Self {
        let remote = config.remote_url.as_deref().and_then(|url| {
            match RemoteClient::new(url, config.remote_timeout()) {
                Ok(client) => Some(client),
                Err(e) => {
                    warn!(error = %e, "remote fallback disabled");
                    None
                }
            }
        });
        info!(
            data_dir = %config.data_dir.display(),
            remote = remote.is_some(),
            cache = config.cache_tables,
            "prayer service ready"
        );
        Self {
            locator: Locator::new(&config.data_dir),
            remote,
            cache: config.cache_tables.then(Arc::default),
        }
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Number of parsed tables held in memory.
    pub fn cached_tables(&self) -> usize {
        self.cache.as_ref().map_or(0, |c| c.len())
    }

    /// Resolves and adjusts one day.
    ///
    /// A located table without a row for the date is `DateNotFound`. With no
    /// table at all, the remote source is asked if the request carries
    /// coordinates; otherwise the result is `DatasetNotFound`.
    #[instrument(level = "debug", skip(self, request), fields(country = %request.country, date = %request.date))]
    pub async fn resolve_day(&self, request: &DayRequest) -> Result<ResolvedDay, WaqtError> {
        let located = self
            .locator
            .locate(request.country, request.timezone.as_deref(), request.city.as_deref())
            .await;

        if let Some(location) = located {
            if let Some(table) = self.load_table(&location).await {
                return resolve_from_table(request, location, &table);
            }
        }

        match (&self.remote, &request.remote) {
            (Some(client), Some(target)) => {
                debug!("no local table, asking remote source");
                let outcome = client
                    .fetch_or_fallback(&target.query(request.date), &request.adjustments.offsets)
                    .await;
                Ok(day_from_remote(request, outcome))
            }
            _ => Err(WaqtError::DatasetNotFound { country_code: request.country.to_string() }),
        }
    }

    /// Resolves the day and the prayer that follows `now`.
    pub async fn resolve_upcoming(
        &self,
        request: &DayRequest,
        now: ClockTime,
    ) -> Result<UpcomingPrayer, WaqtError> {
        let day = self.resolve_day(request).await?;
        let next = resolve_next(&day.times, now);
        Ok(UpcomingPrayer { day, next })
    }

    /// City list for a raw country code.
    pub async fn cities(&self, country: &str) -> Result<(CountryCode, Vec<CityRecord>), WaqtError> {
        let country: CountryCode = country.parse()?;
        let cities = self.locator.cities(country).await?;
        Ok((country, cities))
    }

    async fn load_table(&self, location: &DatasetLocation) -> Option<Arc<TimeTable>> {
        let path = location.path();
        if let Some(cached) = self.cache.as_ref().and_then(|c| c.get(&path)) {
            debug!(path = %path.display(), "table cache hit");
            return Some(cached);
        }

        let contents = self.locator.read_table(location).await?;
        let (table, report) = TimeTable::parse(&contents);
        if !report.skipped.is_empty() {
            debug!(path = %path.display(), rows = report.rows, skipped = report.skipped.len(), "skipped malformed rows");
        }
        let table = Arc::new(table);
        if let Some(cache) = &self.cache {
            cache.insert(path, Arc::clone(&table));
        }
        Some(table)
    }
}

fn resolve_from_table(
    request: &DayRequest,
    location: DatasetLocation,
    table: &TimeTable,
) -> Result<ResolvedDay, WaqtError> {
    let key = MonthDay::from(request.date);
    let raw = table.get(key).ok_or_else(|| WaqtError::DateNotFound {
        month_day: key.to_string(),
        file: location.file_name.clone(),
    })?;

    let hijri = match to_hijri(request.date, request.hijri_adjustment) {
        Ok(label) => Some(label),
        Err(e) => {
            debug!(error = %e, "no hijri label");
            None
        }
    };

    Ok(ResolvedDay {
        date: request.date,
        times: request.adjustments.apply(raw),
        source: DaySource::Dataset { location },
        hijri,
        readable_date: None,
    })
}

fn day_from_remote(request: &DayRequest, outcome: RemoteOutcome) -> ResolvedDay {
    match outcome {
        RemoteOutcome::Fetched(day) => ResolvedDay {
            date: request.date,
            times: day.times,
            source: DaySource::Remote,
            hijri: day.hijri.map(hijri_from_remote),
            readable_date: day.readable_date,
        },
        RemoteOutcome::Fallback { times, reason } => ResolvedDay {
            date: request.date,
            times,
            source: DaySource::Fallback { reason },
            hijri: None,
            readable_date: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use waqt_rules::AdjustmentContext;
    use waqt_types::Prayer;

    const TABLE: &str = r#"var wtimes = {
        "06-14": ["04:30", "05:54", "12:21", "15:40", "18:49", "20:19"],
        "06-15": ["04:30", "05:55", "12:22", "15:40", "18:50", "20:20"],
        "06-16": ["04:31", "05:55", "12:22", "15:41", "18:50", "20:20"]
    };"#;

    fn fixture() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        let sa = root.path().join("SA");
        fs::create_dir_all(&sa).unwrap();
        fs::write(sa.join("wtimes-sa.makkah.js"), TABLE).unwrap();
        fs::write(sa.join("SA.js"), "var SA = [\n\"SA.MAKKAH.---\"\n];").unwrap();
        root
    }

    fn service(root: &tempfile::TempDir) -> PrayerService {
        PrayerService::new(&ServiceConfig::new().with_data_dir(root.path()).without_remote())
    }

    fn request(date: (i32, u32, u32)) -> DayRequest {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        DayRequest::new("SA".parse().unwrap(), date)
    }

    #[tokio::test]
    async fn test_resolves_adjusted_local_day() {
        let root = fixture();
        let req = request((2024, 6, 15)).adjustments(AdjustmentContext::new().offset(Prayer::Fajr, 10));
        let day = service(&root).resolve_day(&req).await.unwrap();
        assert_eq!(day.times.fajr.to_string(), "04:40");
        assert_eq!(day.times.sunrise.to_string(), "05:55");
        assert_eq!(day.source.label(), "dataset");
        let hijri = day.hijri.unwrap();
        assert_eq!((hijri.month, hijri.year), (12, 1445));
    }

    #[tokio::test]
    async fn test_missing_row_is_date_not_found() {
        let root = fixture();
        let err = service(&root).resolve_day(&request((2024, 2, 29))).await.unwrap_err();
        assert_eq!(
            err,
            WaqtError::DateNotFound { month_day: "02-29".into(), file: "wtimes-sa.makkah.js".into() }
        );
    }

    #[tokio::test]
    async fn test_unknown_country_without_coordinates() {
        let root = fixture();
        let req = DayRequest::new("QA".parse().unwrap(), NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        let err = service(&root).resolve_day(&req).await.unwrap_err();
        assert_eq!(err, WaqtError::DatasetNotFound { country_code: "QA".into() });
    }

    #[tokio::test]
    async fn test_tables_are_cached_by_path() {
        let root = fixture();
        let svc = service(&root);
        svc.resolve_day(&request((2024, 6, 15))).await.unwrap();
        svc.resolve_day(&request((2025, 6, 16))).await.unwrap();
        assert_eq!(svc.cached_tables(), 1);

        let uncached = PrayerService::new(
            &ServiceConfig::new().with_data_dir(root.path()).without_remote().with_cache_tables(false),
        );
        uncached.resolve_day(&request((2024, 6, 15))).await.unwrap();
        assert_eq!(uncached.cached_tables(), 0);
    }

    #[tokio::test]
    async fn test_upcoming_prayer() {
        let root = fixture();
        let upcoming = service(&root)
            .resolve_upcoming(&request((2024, 6, 15)), "13:00".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(upcoming.next.name, Prayer::Asr);
        assert_eq!(upcoming.next.time_until_minutes, 160);
    }

    #[tokio::test]
    async fn test_cities() {
        let root = fixture();
        let svc = service(&root);
        let (cc, cities) = svc.cities("sa").await.unwrap();
        assert_eq!(cc.as_str(), "SA");
        assert_eq!(cities[0].code, "SA.MAKKAH");
        assert!(matches!(svc.cities("S1").await, Err(WaqtError::InvalidCountryCode { .. })));
        assert!(svc.cities("EG").await.unwrap_err().is_not_found());
    }
}
