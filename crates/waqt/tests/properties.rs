use proptest::prelude::*;
use waqt::prelude::*;

fn clock() -> impl Strategy<Value = ClockTime> {
    (0u8..24, 0u8..60).prop_map(|(h, m)| ClockTime::new(h, m).unwrap())
}

fn day() -> impl Strategy<Value = PrayerTimeSet> {
    proptest::array::uniform6(clock()).prop_map(PrayerTimeSet::from_array)
}

fn offsets() -> impl Strategy<Value = PrayerOffsets> {
    proptest::array::uniform6(-720i32..720).prop_map(|o| {
        Prayer::ALL.into_iter().zip(o).fold(PrayerOffsets::new(), |acc, (p, m)| acc.with(p, m))
    })
}

proptest! {
    /// Invariant: shifting forward then back restores the time.
    #[test]
    fn shift_round_trip(t in clock(), d in -100_000i32..100_000) {
        prop_assert_eq!(t.shift_minutes(d).shift_minutes(-d), t);
    }

    /// Invariant: a full day is the identity, and so is zero.
    #[test]
    fn full_day_identity(t in clock()) {
        prop_assert_eq!(t.shift_minutes(1440), t);
        prop_assert_eq!(t.shift_minutes(0).to_string(), t.to_string());
        prop_assert_eq!(t.shift_hours(24), t);
    }

    /// Invariant: formatting and strict parsing agree.
    #[test]
    fn display_parses_back(t in clock()) {
        prop_assert_eq!(t.to_string().parse::<ClockTime>().unwrap(), t);
        prop_assert_eq!(ClockTime::sanitize(&format!("{} (AST)", t)), t);
    }

    /// Invariant: no offsets and no flags leaves the day unchanged.
    #[test]
    fn zero_adjustment_identity(base in day()) {
        prop_assert_eq!(adjust(&base, &PrayerOffsets::new(), AdjustmentFlags::default()), base);
    }

    /// Invariant: both forced shifts net to zero.
    #[test]
    fn forced_shifts_cancel(base in day(), o in offsets(), summer in any::<bool>()) {
        let ctx = AdjustmentContext::new().offsets(o).summer_hour(summer);
        let both = ctx.force_hour_more(true).force_hour_less(true).apply(&base);
        prop_assert_eq!(both, ctx.apply(&base));
    }

    /// Invariant: the resolver's countdown fits in one day and progress in [0, 1].
    #[test]
    fn resolver_bounds(times in day(), now in clock()) {
        let next = resolve_next(&times, now);
        prop_assert!(next.time_until_minutes >= 1 && next.time_until_minutes <= 1440);
        prop_assert!((0.0..=1.0).contains(&next.progress_fraction));
        prop_assert_eq!(times[next.name], next.time);
        prop_assert_eq!(now.shift_minutes(i32::from(next.time_until_minutes)), next.time);
    }
}
