use waqt_types::{ClockTime, PrayerTimeSet};

/// Where the static fallback times were taken from.
pub const FALLBACK_REFERENCE: &str = "Makkah";

// Fajr, Sunrise, Dhuhr, Asr, Maghrib, Isha
const FALLBACK_MINUTES: [(u8, u8); 6] = [(4, 30), (5, 50), (12, 20), (15, 40), (18, 45), (20, 15)];

/// A fixed, plausible day of times shown when the remote source fails.
pub fn fallback_times() -> PrayerTimeSet {
    PrayerTimeSet::from_array(
        FALLBACK_MINUTES.map(|(h, m)| ClockTime::new(h, m).unwrap_or(ClockTime::MIDNIGHT)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use waqt_types::Prayer;

    #[test]
    fn test_fallback_is_ordered() {
        let times = fallback_times();
        let minutes: Vec<u16> = times.iter().map(|(_, t)| t.minutes()).collect();
        assert!(minutes.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(times[Prayer::Fajr].to_string(), "04:30");
    }
}
