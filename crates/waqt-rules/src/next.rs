//! Next-prayer resolution.
//!
//! All six fields take part, Sunrise included. Scanning is in canonical
//! order; if nothing is left today the answer is tomorrow's Fajr.

use smallvec::SmallVec;
use waqt_types::{ClockTime, MINUTES_PER_DAY, NextPrayerResult, Prayer, PrayerTimeSet};

const DAY: i32 = MINUTES_PER_DAY as i32;

/// Finds the first prayer strictly after `now`.
///
/// `progress_fraction` measures how far `now` sits between the previous
/// boundary and the next one. Boundaries are unwrapped onto one line: the
/// boundary before Fajr is yesterday's Isha (`isha - 1440`), and tomorrow's
/// Fajr sits at `fajr + 1440`. A non-positive interval reports `0.0`.
pub fn resolve_next(times: &PrayerTimeSet, now: ClockTime) -> NextPrayerResult {
    let marks: SmallVec<[(Prayer, i32); 6]> =
        times.iter().map(|(p, t)| (p, i32::from(t.minutes()))).collect();
    let now_min = i32::from(now.minutes());
    let (_, last) = marks[marks.len() - 1];

    let (name, next, previous) = match marks.iter().position(|&(_, m)| m > now_min) {
        Some(0) => (marks[0].0, marks[0].1, last - DAY),
        Some(i) => (marks[i].0, marks[i].1, marks[i - 1].1),
        None => (marks[0].0, marks[0].1 + DAY, last),
    };

    let until = next - now_min;
    let interval = next - previous;
    let progress_fraction = if interval <= 0 {
        0.0
    } else {
        (f64::from(interval - until) / f64::from(interval)).clamp(0.0, 1.0)
    };

    NextPrayerResult {
        name,
        time: times[name],
        time_until_minutes: until as u16,
        progress_fraction,
    }
}

/// Prayers whose time of day has already been reached.
pub fn passed(times: &PrayerTimeSet, now: ClockTime) -> SmallVec<[Prayer; 6]> {
    times.iter().filter(|(_, t)| t.is_past(now)).map(|(p, _)| p).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn day() -> PrayerTimeSet {
        PrayerTimeSet::from_array(["05:00", "06:00", "12:00", "15:00", "18:00", "19:30"].map(t))
    }

    #[test]
    fn test_midday_picks_asr() {
        let next = resolve_next(&day(), t("13:00"));
        assert_eq!(next.name, Prayer::Asr);
        assert_eq!(next.time, t("15:00"));
        assert_eq!(next.time_until_minutes, 120);
        assert!((next.progress_fraction - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_after_isha_wraps_to_tomorrow_fajr() {
        let next = resolve_next(&day(), t("23:00"));
        assert_eq!(next.name, Prayer::Fajr);
        assert_eq!(next.time_until_minutes, 360);
        // interval 19:30 -> 05:00(+1) is 570 minutes, 210 elapsed
        assert!((next.progress_fraction - 210.0 / 570.0).abs() < 1e-9);
    }

    #[test]
    fn test_before_fajr_uses_yesterdays_isha() {
        let next = resolve_next(&day(), t("02:00"));
        assert_eq!(next.name, Prayer::Fajr);
        assert_eq!(next.time_until_minutes, 180);
        assert!((next.progress_fraction - 390.0 / 570.0).abs() < 1e-9);
    }

    #[test]
    fn test_exact_boundary_moves_on() {
        let next = resolve_next(&day(), t("12:00"));
        assert_eq!(next.name, Prayer::Asr);
        assert_eq!(next.progress_fraction, 0.0);
    }

    #[test]
    fn test_sunrise_is_a_candidate() {
        let next = resolve_next(&day(), t("05:30"));
        assert_eq!(next.name, Prayer::Sunrise);
        assert_eq!(next.time_until_minutes, 30);
        assert!((next.progress_fraction - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_order_times_scan_in_canonical_order() {
        // Offsets pushed Asr and Maghrib before Dhuhr.
        let mut times = day();
        times.asr = t("11:00");
        times.maghrib = t("10:00");
        let next = resolve_next(&times, t("10:30"));
        assert_eq!(next.name, Prayer::Dhuhr);
        let next = resolve_next(&times, t("16:00"));
        assert_eq!(next.name, Prayer::Isha);
        assert_eq!(next.time_until_minutes, 210);
        assert!((0.0..=1.0).contains(&next.progress_fraction));
    }

    #[test]
    fn test_passed_is_time_of_day_only() {
        assert_eq!(passed(&day(), t("12:00")).as_slice(), &[Prayer::Fajr, Prayer::Sunrise, Prayer::Dhuhr]);
        assert!(passed(&day(), t("00:00")).is_empty());
        assert_eq!(passed(&day(), t("23:59")).len(), 6);
    }
}
