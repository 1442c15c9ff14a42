//! Configuration for the tabulation engine.

/// Length of one timeslot in minutes.
pub const DEFAULT_SLOT_MINUTES: u32 = 15;

/// Per-slot average a person must exceed for a window to count as five stars.
///
/// 4.5 is the midpoint between 4 and 5 stars under a linear preference scale.
pub const DEFAULT_FIVE_STAR_THRESHOLD: f64 = 4.5;

/// Configuration for aggregation and tie-breaking.
#[derive(Clone, Debug, PartialEq)]
pub struct StarConfig {
    /// Length of one timeslot in minutes. Durations must be a positive multiple of this.
    pub slot_minutes: u32,
    /// Average per-slot score above which a person counts toward `five_stars`.
    pub five_star_threshold: f64,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    pub verbosity: u8,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            slot_minutes: DEFAULT_SLOT_MINUTES,
            five_star_threshold: DEFAULT_FIVE_STAR_THRESHOLD,
            verbosity: 0,
        }
    }
}

impl StarConfig {
    /// Number of timeslots covered by a meeting of `duration_minutes`.
    ///
    /// Returns `None` unless the duration is a positive multiple of the slot length.
    pub fn slots_in(&self, duration_minutes: u32) -> Option<u32> {
        if self.slot_minutes == 0
            || duration_minutes == 0
            || duration_minutes % self.slot_minutes != 0
        {
            return None;
        }
        Some(duration_minutes / self.slot_minutes)
    }
}
