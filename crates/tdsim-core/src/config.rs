//! Simulation-wide configuration and the `TimeWindow` primitive.
//!
//! Every tunable named in §6 of the specification is a `SimConfig` field with
//! a `Default` matching the documented value, rather than a free-standing
//! `const` — this lets tests exercise alternate configurations (smaller
//! patience windows, different fleet sizes) without recompiling.

/// A closed interval of simulation seconds, `early <= late`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeWindow {
    pub early: i64,
    pub late: i64,
}

impl TimeWindow {
    pub fn new(early: i64, late: i64) -> Self {
        debug_assert!(early <= late);
        Self { early, late }
    }

    pub fn contains(&self, t: i64) -> bool {
        self.early <= t && t <= self.late
    }
}

/// Sentinel for an "unbounded" time-window late bound (the delivery window
/// has no deadline). Mirrors the original's `MAX_INT` constant.
pub const MAX_INT: i64 = 0x3f3f3f3f;

/// Top-level simulation configuration — one instance shared by every
/// subsystem that needs a tunable constant.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    pub earth_radius_m: f64,
    pub geohash_precision: u8,
    pub num_taxi: u32,
    pub average_speed_mps: f64,
    pub taxi_capacity: u32,
    pub patience_s: i64,
    /// Simulation start, in seconds-since-midnight.
    pub sim_start: i64,
    /// Simulation end, in seconds-since-midnight (inclusive).
    pub sim_end: i64,
    pub time_step_s: i64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            earth_radius_m: crate::geo::EARTH_RADIUS_M,
            geohash_precision: 5,
            num_taxi: 2980,
            average_speed_mps: 7.0,
            taxi_capacity: 1,
            patience_s: 300,
            sim_start: 9 * 3600,        // "09:00:00"
            sim_end: 9 * 3600 + 1800,   // "09:30:00"
            time_step_s: 1,
        }
    }
}
