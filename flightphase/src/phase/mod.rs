//! Flight lifecycle phases.
//!
//! A flight advances through a fixed sequence of phases, from parked at the
//! gate to unboarding at the destination. The order of [`FlightPhase`]
//! variants is the order of a normal flight, but nothing in this crate
//! relies on that order for behavior: per-phase properties live in an
//! explicit tag table ([`PhaseTags`]) and legal successors in the
//! [`graph`] module.
//!
//! # Lifecycle
//!
//! ```text
//! Parked → Boarding → BoardingDone → Pushback → TaxiOut → Takeoff → Climb ⇄ Cruise
//!                                                                      ↓       ↓
//!   UnboardingDone ← Unboarding ← TaxiIn ← Rollout ← Landing{Day,Night} ← Approach ← Descent
//! ```

pub mod graph;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use graph::{allowed_next, can_transition};

/// Phase of a flight, from the gate to the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum FlightPhase {
    /// Parked at the gate.
    #[default]
    Parked = 0,
    /// Passengers are boarding.
    Boarding = 1,
    /// Boarding finished, waiting for pushback.
    BoardingDone = 2,
    /// Ready to be pushed back.
    Pushback = 3,
    /// Taxiing to the runway.
    TaxiOut = 4,
    /// Takeoff roll.
    Takeoff = 5,
    /// Climbing to cruise altitude.
    Climb = 6,
    /// Level at cruise altitude.
    Cruise = 7,
    /// Descending from cruise altitude.
    Descent = 8,
    /// Approaching to land.
    Approach = 9,
    /// Cleared to land, daytime.
    LandingDay = 10,
    /// Cleared to land, nighttime.
    LandingNight = 11,
    /// On the runway after touchdown.
    Rollout = 12,
    /// Taxiing to the gate after landing or a rejected takeoff.
    TaxiIn = 13,
    /// Passengers are leaving the aircraft.
    Unboarding = 14,
    /// Unboarding finished; the flight leg is over.
    UnboardingDone = 15,
}

/// Error returned when a raw value does not name a flight phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unknown flight phase: {0}")]
pub struct UnknownPhase(pub u8);

/// Error returned when a phase name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown flight phase name: '{0}'")]
pub struct UnknownPhaseName(pub String);

/// Properties attached to a phase.
///
/// These drive the hysteresis side effects applied whenever the state
/// manager enters a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTags {
    /// Entering this phase proves the aircraft took off on this leg.
    pub marks_airborne: bool,
    /// Entering this phase proves cruise level was reached on this leg.
    pub marks_cruise_reached: bool,
    /// Entering this phase ends the flight leg and clears leg memory.
    pub ends_flight: bool,
}

impl PhaseTags {
    const GROUND: Self = Self {
        marks_airborne: false,
        marks_cruise_reached: false,
        ends_flight: false,
    };
    const CLIMB: Self = Self {
        marks_airborne: true,
        marks_cruise_reached: false,
        ends_flight: false,
    };
    const AFTER_CRUISE: Self = Self {
        marks_airborne: true,
        marks_cruise_reached: true,
        ends_flight: false,
    };
    const END: Self = Self {
        marks_airborne: false,
        marks_cruise_reached: false,
        ends_flight: true,
    };
}

impl FlightPhase {
    /// Every phase, in lifecycle order.
    pub const ALL: [FlightPhase; 16] = [
        FlightPhase::Parked,
        FlightPhase::Boarding,
        FlightPhase::BoardingDone,
        FlightPhase::Pushback,
        FlightPhase::TaxiOut,
        FlightPhase::Takeoff,
        FlightPhase::Climb,
        FlightPhase::Cruise,
        FlightPhase::Descent,
        FlightPhase::Approach,
        FlightPhase::LandingDay,
        FlightPhase::LandingNight,
        FlightPhase::Rollout,
        FlightPhase::TaxiIn,
        FlightPhase::Unboarding,
        FlightPhase::UnboardingDone,
    ];

    /// Tag table entry for this phase.
    pub fn tags(&self) -> PhaseTags {
        match self {
            FlightPhase::Parked
            | FlightPhase::Boarding
            | FlightPhase::BoardingDone
            | FlightPhase::Pushback
            | FlightPhase::TaxiOut
            | FlightPhase::Takeoff => PhaseTags::GROUND,
            FlightPhase::Climb => PhaseTags::CLIMB,
            FlightPhase::Cruise
            | FlightPhase::Descent
            | FlightPhase::Approach
            | FlightPhase::LandingDay
            | FlightPhase::LandingNight
            | FlightPhase::Rollout
            | FlightPhase::TaxiIn
            | FlightPhase::Unboarding => PhaseTags::AFTER_CRUISE,
            FlightPhase::UnboardingDone => PhaseTags::END,
        }
    }

    /// Whether this is one of the two landing phases.
    pub fn is_landing(&self) -> bool {
        matches!(self, FlightPhase::LandingDay | FlightPhase::LandingNight)
    }

    /// Stable snake_case name, as used in logs, config and traces.
    pub fn name(&self) -> &'static str {
        match self {
            FlightPhase::Parked => "parked",
            FlightPhase::Boarding => "boarding",
            FlightPhase::BoardingDone => "boarding_done",
            FlightPhase::Pushback => "pushback",
            FlightPhase::TaxiOut => "taxi_out",
            FlightPhase::Takeoff => "takeoff",
            FlightPhase::Climb => "climb",
            FlightPhase::Cruise => "cruise",
            FlightPhase::Descent => "descent",
            FlightPhase::Approach => "approach",
            FlightPhase::LandingDay => "landing_day",
            FlightPhase::LandingNight => "landing_night",
            FlightPhase::Rollout => "rollout",
            FlightPhase::TaxiIn => "taxi_in",
            FlightPhase::Unboarding => "unboarding",
            FlightPhase::UnboardingDone => "unboarding_done",
        }
    }

    /// Get a human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            FlightPhase::Parked => "parked at the gate",
            FlightPhase::Boarding => "boarding passengers",
            FlightPhase::BoardingDone => "boarding complete",
            FlightPhase::Pushback => "ready for pushback",
            FlightPhase::TaxiOut => "taxiing to the runway",
            FlightPhase::Takeoff => "taking off",
            FlightPhase::Climb => "climbing",
            FlightPhase::Cruise => "at cruise level",
            FlightPhase::Descent => "descending",
            FlightPhase::Approach => "on approach",
            FlightPhase::LandingDay => "landing (day)",
            FlightPhase::LandingNight => "landing (night)",
            FlightPhase::Rollout => "rolling out",
            FlightPhase::TaxiIn => "taxiing to the gate",
            FlightPhase::Unboarding => "unboarding passengers",
            FlightPhase::UnboardingDone => "unboarding complete",
        }
    }
}

impl TryFrom<u8> for FlightPhase {
    type Error = UnknownPhase;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        FlightPhase::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(UnknownPhase(value))
    }
}

impl From<FlightPhase> for u8 {
    fn from(phase: FlightPhase) -> Self {
        phase as u8
    }
}

impl FromStr for FlightPhase {
    type Err = UnknownPhaseName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        FlightPhase::ALL
            .into_iter()
            .find(|phase| phase.name() == wanted)
            .ok_or_else(|| UnknownPhaseName(s.to_string()))
    }
}

impl fmt::Display for FlightPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
