//! The adjustment pipeline turning a raw table row into published times.
//!
//! Steps run in a fixed order:
//!
//! 1. per-prayer minute offsets,
//! 2. summer hour (+1h on every field),
//! 3. forced +1h,
//! 4. forced -1h.
//!
//! Steps 3 and 4 are independent; with both set they cancel out.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;
use waqt_types::{AdjustmentFlags, Prayer, PrayerOffsets, PrayerTimeSet};

/// One stage of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdjustmentStep {
    Offsets,
    SummerHour,
    ForceHourMore,
    ForceHourLess,
}

impl AdjustmentStep {
    /// Steps that will run for `flags`, in execution order.
    pub fn sequence(flags: AdjustmentFlags) -> SmallVec<[AdjustmentStep; 4]> {
        let mut steps = SmallVec::new();
        steps.push(AdjustmentStep::Offsets);
        if flags.apply_summer_hour {
            steps.push(AdjustmentStep::SummerHour);
        }
        if flags.force_hour_more {
            steps.push(AdjustmentStep::ForceHourMore);
        }
        if flags.force_hour_less {
            steps.push(AdjustmentStep::ForceHourLess);
        }
        steps
    }

    fn apply(self, times: &PrayerTimeSet, offsets: &PrayerOffsets) -> PrayerTimeSet {
        match self {
            AdjustmentStep::Offsets => apply_offsets(times, offsets),
            AdjustmentStep::SummerHour | AdjustmentStep::ForceHourMore => shift_all_hours(times, 1),
            AdjustmentStep::ForceHourLess => shift_all_hours(times, -1),
        }
    }
}

/// Shifts each field by its own offset.
pub fn apply_offsets(times: &PrayerTimeSet, offsets: &PrayerOffsets) -> PrayerTimeSet {
    times.map(|prayer, time| time.shift_minutes(offsets.get(prayer)))
}

fn shift_all_hours(times: &PrayerTimeSet, hours: i32) -> PrayerTimeSet {
    times.map(|_, time| time.shift_hours(hours))
}

/// Runs the full pipeline over `base`.
pub fn adjust(base: &PrayerTimeSet, offsets: &PrayerOffsets, flags: AdjustmentFlags) -> PrayerTimeSet {
    let mut times = *base;
    for step in AdjustmentStep::sequence(flags) {
        times = step.apply(&times, offsets);
    }
    debug!(?flags, fajr = %times[Prayer::Fajr], isha = %times[Prayer::Isha], "adjusted prayer times");
    times
}

/// Offsets and flags for one resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentContext {
    #[serde(default)]
    pub offsets: PrayerOffsets,
    #[serde(flatten)]
    pub flags: AdjustmentFlags,
}

impl AdjustmentContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offsets(mut self, offsets: PrayerOffsets) -> Self {
        self.offsets = offsets;
        self
    }

    pub fn offset(mut self, prayer: Prayer, minutes: i32) -> Self {
        self.offsets = self.offsets.with(prayer, minutes);
        self
    }

    pub fn summer_hour(mut self, on: bool) -> Self {
        self.flags.apply_summer_hour = on;
        self
    }

    pub fn force_hour_more(mut self, on: bool) -> Self {
        self.flags.force_hour_more = on;
        self
    }

    pub fn force_hour_less(mut self, on: bool) -> Self {
        self.flags.force_hour_less = on;
        self
    }

    /// Runs the pipeline with this context.
    pub fn apply(&self, base: &PrayerTimeSet) -> PrayerTimeSet {
        adjust(base, &self.offsets, self.flags)
    }
}
