//! Static IANA timezone → (country, city) hints.
//!
//! Only consulted when the request's own country code or city does not lead
//! to a table; never a source of truth.

use waqt_types::CountryCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimezoneHint {
    pub country: CountryCode,
    pub city: &'static str,
}

const TIMEZONE_HINTS: &[(&str, &str, &str)] = &[
    ("Africa/Algiers", "DZ", "Algiers"),
    ("Africa/Cairo", "EG", "Cairo"),
    ("Africa/Casablanca", "MA", "Casablanca"),
    ("Africa/Khartoum", "SD", "Khartoum"),
    ("Africa/Lagos", "NG", "Lagos"),
    ("Africa/Mogadishu", "SO", "Mogadishu"),
    ("Africa/Nouakchott", "MR", "Nouakchott"),
    ("Africa/Tripoli", "LY", "Tripoli"),
    ("Africa/Tunis", "TN", "Tunis"),
    ("America/New_York", "US", "New York"),
    ("America/Toronto", "CA", "Toronto"),
    ("Asia/Aden", "YE", "Aden"),
    ("Asia/Amman", "JO", "Amman"),
    ("Asia/Baghdad", "IQ", "Baghdad"),
    ("Asia/Bahrain", "BH", "Manama"),
    ("Asia/Beirut", "LB", "Beirut"),
    ("Asia/Damascus", "SY", "Damascus"),
    ("Asia/Dhaka", "BD", "Dhaka"),
    ("Asia/Dubai", "AE", "Dubai"),
    ("Asia/Gaza", "PS", "Gaza"),
    ("Asia/Hebron", "PS", "Hebron"),
    ("Asia/Jakarta", "ID", "Jakarta"),
    ("Asia/Karachi", "PK", "Karachi"),
    ("Asia/Kuala_Lumpur", "MY", "Kuala Lumpur"),
    ("Asia/Kuwait", "KW", "Kuwait City"),
    ("Asia/Muscat", "OM", "Muscat"),
    ("Asia/Qatar", "QA", "Doha"),
    ("Asia/Riyadh", "SA", "Riyadh"),
    ("Asia/Tehran", "IR", "Tehran"),
    ("Europe/Berlin", "DE", "Berlin"),
    ("Europe/Istanbul", "TR", "Istanbul"),
    ("Europe/London", "GB", "London"),
    ("Europe/Paris", "FR", "Paris"),
];

/// Looks up the hint for an IANA timezone name (case-insensitive).
pub fn timezone_hint(timezone: &str) -> Option<TimezoneHint> {
    let timezone = timezone.trim();
    TIMEZONE_HINTS
        .iter()
        .find(|(tz, _, _)| tz.eq_ignore_ascii_case(timezone))
        .and_then(|&(_, cc, city)| Some(TimezoneHint { country: cc.parse().ok()?, city }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_timezone() {
        let hint = timezone_hint("Asia/Riyadh").unwrap();
        assert_eq!(hint.country.as_str(), "SA");
        assert_eq!(hint.city, "Riyadh");
        assert_eq!(timezone_hint(" africa/cairo ").unwrap().country.as_str(), "EG");
    }

    #[test]
    fn test_unknown_timezone() {
        assert!(timezone_hint("Mars/Olympus_Mons").is_none());
        assert!(timezone_hint("").is_none());
    }

    #[test]
    fn test_table_entries_are_valid() {
        for (tz, cc, city) in TIMEZONE_HINTS {
            assert!(cc.parse::<CountryCode>().is_ok(), "bad country for {}", tz);
            assert!(!city.is_empty());
        }
    }
}
