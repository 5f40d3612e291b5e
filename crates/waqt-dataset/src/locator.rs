//! Finds the time table backing a country / timezone / city request.
//!
//! Layout under the dataset root:
//!
//! ```text
//! <root>/SA/SA.js                 city list
//! <root>/SA/wtimes-sa.makkah.js   one table per city
//! <root>/SA/wtimes-sa.jeddah.js
//! ```
//!
//! A lower-case country directory (`<root>/sa`) is accepted as well.

use std::io;
use std::path::{Path, PathBuf};

use smallvec::SmallVec;
use tracing::{debug, instrument, warn};
use waqt_types::{CityRecord, CountryCode, DatasetLocation, WaqtError};

use crate::cities::parse_cities;
use crate::normalize::city_token;
use crate::timezones::{timezone_hint, TimezoneHint};

/// Every table file name starts with this, followed by `<cc>.`.
pub const TABLE_PREFIX: &str = "wtimes-";

/// Read-only view of a dataset root directory.
#[derive(Debug, Clone)]
pub struct Locator {
    root: PathBuf,
}

impl Locator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn country_dir(&self, country: CountryCode) -> PathBuf {
        self.root.join(country.as_str())
    }

    /// `<root>/SA`, then `<root>/sa`.
    pub fn country_dirs(&self, country: CountryCode) -> [PathBuf; 2] {
        [self.country_dir(country), self.root.join(country.as_str().to_ascii_lowercase())]
    }

    /// First readable country directory with its sorted table files.
    async fn country_tables(&self, country: CountryCode) -> Option<(PathBuf, Vec<String>)> {
        for directory in self.country_dirs(country) {
            match table_files(&directory, country).await {
                Ok(files) => return Some((directory, files)),
                Err(e) => {
                    warn!(directory = %directory.display(), error = %e, "skipping unreadable dataset directory")
                }
            }
        }
        None
    }

    /// Resolves the table file for a request.
    ///
    /// Directories are tried in order: the requested country, then the
    /// country the timezone maps to (if different). Within a directory the
    /// city hint wins, then the timezone's city, then the first table.
    /// Unreadable directories are skipped.
    #[instrument(level = "debug", skip(self))]
    pub async fn locate(
        &self,
        country: CountryCode,
        timezone: Option<&str>,
        city_hint: Option<&str>,
    ) -> Option<DatasetLocation> {
        let hint = city_hint.map(city_token).filter(|t| !t.is_empty());
        let tz_hint = timezone.and_then(timezone_hint);

        for candidate in candidate_countries(country, tz_hint) {
            let Some((directory, files)) = self.country_tables(candidate).await else {
                continue;
            };

            let mapped = tz_hint
                .filter(|h| h.country == candidate)
                .map(|h| city_token(h.city))
                .filter(|t| !t.is_empty());

            if let Some((file_name, city_token)) =
                pick_table(&files, candidate, hint.as_deref(), mapped.as_deref())
            {
                debug!(%file_name, city_token = ?city_token, "located table");
                return Some(DatasetLocation {
                    country_code: candidate,
                    city_token,
                    directory,
                    file_name,
                });
            }
        }
        None
    }

    /// Reads a located table. Any I/O failure reads as "no table".
    pub async fn read_table(&self, location: &DatasetLocation) -> Option<String> {
        let path = location.path();
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Some(contents),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read table");
                None
            }
        }
    }

    /// Loads and parses a country's city list (`<CC>.js`, or `<cc>.js`), from
    /// either country directory.
    pub async fn cities(&self, country: CountryCode) -> Result<Vec<CityRecord>, WaqtError> {
        let upper = format!("{}.js", country.as_str());
        let lower = upper.to_ascii_lowercase();
        for directory in self.country_dirs(country) {
            for name in [&upper, &lower] {
                let path = directory.join(name);
                match tokio::fs::read_to_string(&path).await {
                    Ok(contents) => return Ok(parse_cities(&contents)),
                    Err(e) => debug!(path = %path.display(), error = %e, "city list not readable"),
                }
            }
        }
        Err(WaqtError::CityListNotFound { country_code: country.to_string() })
    }
}

/// Requested country first, then the timezone's country, without repeats.
fn candidate_countries(
    country: CountryCode,
    tz_hint: Option<TimezoneHint>,
) -> SmallVec<[CountryCode; 2]> {
    let mut out = SmallVec::new();
    out.push(country);
    if let Some(hint) = tz_hint {
        if hint.country != country {
            out.push(hint.country);
        }
    }
    out
}

/// Sorted names of `wtimes-<cc>.*` files in a directory.
async fn table_files(directory: &Path, country: CountryCode) -> io::Result<Vec<String>> {
    let prefix = table_prefix(country);
    let mut entries = tokio::fs::read_dir(directory).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await.map(|t| t.is_dir()).unwrap_or(true) {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if has_prefix(name, &prefix) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

fn table_prefix(country: CountryCode) -> String {
    format!("{}{}.", TABLE_PREFIX, country.as_str().to_ascii_lowercase())
}

fn has_prefix(name: &str, prefix: &str) -> bool {
    name.get(..prefix.len()).is_some_and(|p| p.eq_ignore_ascii_case(prefix))
}

/// Picks a table from sorted candidates: city hint, then timezone city, then
/// the first file. Returns the file name and the token that matched.
fn pick_table(
    files: &[String],
    country: CountryCode,
    hint: Option<&str>,
    mapped: Option<&str>,
) -> Option<(String, Option<String>)> {
    let prefix_len = table_prefix(country).len();
    let by_token = |token: &str| {
        files
            .iter()
            .find(|name| name[prefix_len..].to_ascii_uppercase().starts_with(token))
            .map(|name| (name.clone(), Some(token.to_string())))
    };

    hint.and_then(by_token)
        .or_else(|| mapped.and_then(by_token))
        .or_else(|| files.first().map(|name| (name.clone(), None)))
}
