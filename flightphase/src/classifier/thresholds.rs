//! Numeric thresholds used by the classification rules.

use crate::snapshot::Snapshot;

/// Minimum ground speed considered taxiing (knots).
pub const DEFAULT_MIN_TAXI_SPEED_KT: f32 = 10.0;

/// Minimum ground speed considered a takeoff roll (knots).
pub const DEFAULT_MIN_TAKEOFF_SPEED_KT: f32 = 40.0;

/// Minimum vertical speed considered a climb (feet per minute).
///
/// The descent threshold is the negation of this value.
pub const DEFAULT_MIN_CLIMB_VERTICAL_SPEED_FPM: f32 = 500.0;

/// Half-width of the cruise tolerance band (feet).
pub const DEFAULT_CRUISE_TOLERANCE_FT: f32 = 1000.0;

/// Altitude below which approach and landing are considered (feet).
pub const DEFAULT_LIMITATION_ALTITUDE_FT: f32 = 10_000.0;

/// Thresholds for the classification rules.
///
/// Defaults match typical airliner operations. They can be overridden from
/// the `[classifier]` section of the config file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierThresholds {
    /// Pushback requires ground speed below this (knots).
    pub min_taxi_speed_kt: f32,

    /// Takeoff requires ground speed at or above this (knots).
    pub min_takeoff_speed_kt: f32,

    /// Climb/descent vertical speed threshold (feet per minute).
    pub min_climb_vertical_speed_fpm: f32,

    /// Cruise band half-width around the selected cruise altitude (feet).
    pub cruise_tolerance_ft: f32,

    /// Approach/landing ceiling and descent floor (feet).
    pub limitation_altitude_ft: f32,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            min_taxi_speed_kt: DEFAULT_MIN_TAXI_SPEED_KT,
            min_takeoff_speed_kt: DEFAULT_MIN_TAKEOFF_SPEED_KT,
            min_climb_vertical_speed_fpm: DEFAULT_MIN_CLIMB_VERTICAL_SPEED_FPM,
            cruise_tolerance_ft: DEFAULT_CRUISE_TOLERANCE_FT,
            limitation_altitude_ft: DEFAULT_LIMITATION_ALTITUDE_FT,
        }
    }
}

impl ClassifierThresholds {
    /// Vertical speed at or below which the aircraft is descending.
    pub fn min_descent_vertical_speed_fpm(&self) -> f32 {
        -self.min_climb_vertical_speed_fpm
    }

    /// Whether the indicated altitude is inside the cruise band.
    ///
    /// Always `false` when no cruise altitude is selected (≤ 0). The band is
    /// inclusive on both edges.
    pub fn within_cruise_band(&self, snapshot: &Snapshot) -> bool {
        within_cruise_band(snapshot, self.cruise_tolerance_ft)
    }
}

/// Whether `snapshot`'s indicated altitude is within `tolerance_ft` of its
/// selected cruise altitude.
pub fn within_cruise_band(snapshot: &Snapshot, tolerance_ft: f32) -> bool {
    let cruise = snapshot.cruise_altitude_ft();
    if cruise <= 0.0 {
        return false;
    }

    (snapshot.indicated_altitude_ft() - cruise).abs() <= tolerance_ft
}
