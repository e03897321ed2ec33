// Time slot module
// Fixed 30-minute rows of the day axis

use serde::{Deserialize, Serialize};

use crate::utils::time::{format_time, MINUTES_PER_HOUR};

/// Width of one grid row in minutes.
pub const SLOT_MINUTES: u32 = 30;

/// One row of the day axis: display label plus minutes since midnight.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeSlot {
    pub label: String,
    pub minutes: u32,
}

impl TimeSlot {
    pub fn new(hour: u32, minute: u32) -> Self {
        Self {
            label: format_time(hour, minute),
            minutes: hour * MINUTES_PER_HOUR + minute,
        }
    }
}

/// Configured day window in whole hours, `[start_hour, end_hour)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(rename = "start_time")]
    pub start_hour: u32,
    #[serde(rename = "end_time")]
    pub end_hour: u32,
}

impl TimeWindow {
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    /// Regenerate the full slot sequence for this window.
    pub fn slots(&self) -> Vec<TimeSlot> {
        generate_time_slots(self.start_hour, self.end_hour)
    }

    pub fn slots_per_day(&self) -> usize {
        (self.end_hour.min(24).saturating_sub(self.start_hour) * (MINUTES_PER_HOUR / SLOT_MINUTES))
            as usize
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::new(7, 21)
    }
}

/// Slots covering `[start_hour, end_hour)` in 30-minute steps.
///
/// Empty when `start_hour >= end_hour`. The end hour is capped at midnight.
pub fn generate_time_slots(start_hour: u32, end_hour: u32) -> Vec<TimeSlot> {
    let end_hour = end_hour.min(24);
    if start_hour >= end_hour {
        return Vec::new();
    }

    (start_hour..end_hour)
        .flat_map(|hour| {
            (0..MINUTES_PER_HOUR)
                .step_by(SLOT_MINUTES as usize)
                .map(move |minute| TimeSlot::new(hour, minute))
        })
        .collect()
}
