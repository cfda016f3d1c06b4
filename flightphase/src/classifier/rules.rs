//! Ordered classification rules.
//!
//! [`RULES`] is evaluated top to bottom and the first rule whose predicate
//! holds names the candidate phase. When nothing matches the candidate is
//! [`FlightPhase::Parked`].
//!
//! | # | Rule              | Phase                         |
//! |---|-------------------|-------------------------------|
//! | 1 | `boarding`        | Boarding                      |
//! | 2 | `boarding_done`   | BoardingDone                  |
//! | 3 | `pushback`        | Pushback                      |
//! | 4 | `taxi_out`        | TaxiOut                       |
//! | 5 | `takeoff`         | Takeoff                       |
//! | 6 | `climb`           | Climb                         |
//! | 7 | `cruise`          | Cruise                        |
//! | 8 | `descent`         | Descent                       |
//! | 9 | `approach`        | Approach                      |
//! | 10| `landing`         | LandingDay / LandingNight     |
//! | 11| `rollout`         | Rollout                       |
//! | 12| `taxi_in`         | TaxiIn                        |
//! | 13| `unboarding`      | Unboarding                    |
//! | 14| `unboarding_done` | UnboardingDone                |

use super::{ClassifierThresholds, HysteresisMemory};
use crate::phase::FlightPhase;
use crate::snapshot::{
    BeaconLightSwitch, DayPeriod, DoorState, FmcPhase, LandingLightsSwitch, NoseLightSwitch,
    Snapshot,
};

/// Everything a rule predicate may look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub snapshot: &'a Snapshot,
    pub memory: &'a HysteresisMemory,
    pub thresholds: &'a ClassifierThresholds,
}

impl RuleInput<'_> {
    /// On the ground in this snapshot and in the previous one.
    fn stayed_on_ground(&self) -> bool {
        self.snapshot.is_on_ground() && self.memory.was_on_ground
    }

    /// Front-left door went from `from` to `to` since the last update.
    fn door_moved(&self, from: DoorState, to: DoorState) -> bool {
        self.memory.last_door_state == from && self.snapshot.front_left_door() == to
    }

    fn within_cruise_band(&self) -> bool {
        self.thresholds.within_cruise_band(self.snapshot)
    }
}

/// One entry of the decision list.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Stable rule name, reported in [`super::Classification`].
    pub name: &'static str,
    predicate: fn(&RuleInput<'_>) -> bool,
    phase: PhaseSelector,
}

/// How a matching rule picks its phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseSelector {
    /// Always the same phase.
    Fixed(FlightPhase),
    /// Chosen by the snapshot's day period.
    ByDayPeriod { day: FlightPhase, night: FlightPhase },
}

impl PhaseSelector {
    fn select(&self, snapshot: &Snapshot) -> FlightPhase {
        match *self {
            PhaseSelector::Fixed(phase) => phase,
            PhaseSelector::ByDayPeriod { day, night } => match snapshot.day_period() {
                DayPeriod::Day => day,
                DayPeriod::Night => night,
            },
        }
    }
}

impl Rule {
    /// Candidate phase if this rule matches.
    pub fn evaluate(&self, input: &RuleInput<'_>) -> Option<FlightPhase> {
        if (self.predicate)(input) {
            Some(self.phase.select(input.snapshot))
        } else {
            None
        }
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

/// Name reported when no rule matched.
pub const DEFAULT_RULE: &str = "parked";

/// The decision list, in priority order.
pub const RULES: [Rule; 14] = [
    Rule {
        name: "boarding",
        predicate: is_boarding,
        phase: PhaseSelector::Fixed(FlightPhase::Boarding),
    },
    Rule {
        name: "boarding_done",
        predicate: is_boarding_done,
        phase: PhaseSelector::Fixed(FlightPhase::BoardingDone),
    },
    Rule {
        name: "pushback",
        predicate: is_pushing_back,
        phase: PhaseSelector::Fixed(FlightPhase::Pushback),
    },
    Rule {
        name: "taxi_out",
        predicate: is_taxiing_out,
        phase: PhaseSelector::Fixed(FlightPhase::TaxiOut),
    },
    Rule {
        name: "takeoff",
        predicate: is_taking_off,
        phase: PhaseSelector::Fixed(FlightPhase::Takeoff),
    },
    Rule {
        name: "climb",
        predicate: is_climbing,
        phase: PhaseSelector::Fixed(FlightPhase::Climb),
    },
    Rule {
        name: "cruise",
        predicate: is_cruising,
        phase: PhaseSelector::Fixed(FlightPhase::Cruise),
    },
    Rule {
        name: "descent",
        predicate: is_descending,
        phase: PhaseSelector::Fixed(FlightPhase::Descent),
    },
    Rule {
        name: "approach",
        predicate: is_approaching,
        phase: PhaseSelector::Fixed(FlightPhase::Approach),
    },
    Rule {
        name: "landing",
        predicate: is_landing,
        phase: PhaseSelector::ByDayPeriod {
            day: FlightPhase::LandingDay,
            night: FlightPhase::LandingNight,
        },
    },
    Rule {
        name: "rollout",
        predicate: is_rolling_out,
        phase: PhaseSelector::Fixed(FlightPhase::Rollout),
    },
    Rule {
        name: "taxi_in",
        predicate: is_taxiing_in,
        phase: PhaseSelector::Fixed(FlightPhase::TaxiIn),
    },
    Rule {
        name: "unboarding",
        predicate: is_unboarding,
        phase: PhaseSelector::Fixed(FlightPhase::Unboarding),
    },
    Rule {
        name: "unboarding_done",
        predicate: is_unboarding_done,
        phase: PhaseSelector::Fixed(FlightPhase::UnboardingDone),
    },
];

/// Look up a rule by name.
pub fn rule(name: &str) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.name == name)
}

fn is_boarding(input: &RuleInput<'_>) -> bool {
    input.stayed_on_ground()
        && !input.memory.has_changed_to_takeoff
        && input.door_moved(DoorState::Closed, DoorState::Open)
}

fn is_boarding_done(input: &RuleInput<'_>) -> bool {
    input.stayed_on_ground()
        && !input.memory.has_changed_to_takeoff
        && input.door_moved(DoorState::Open, DoorState::Closed)
}

fn is_pushing_back(input: &RuleInput<'_>) -> bool {
    let s = input.snapshot;
    input.stayed_on_ground()
        && !input.memory.has_taken_off
        && s.front_left_door() == DoorState::Closed
        && s.ground_speed_kt() < input.thresholds.min_taxi_speed_kt
        && s.nose_light() == NoseLightSwitch::Off
        && s.beacon_light() == BeaconLightSwitch::On
}

fn is_taxiing_out(input: &RuleInput<'_>) -> bool {
    input.stayed_on_ground()
        && !input.memory.has_taken_off
        && !input.memory.has_changed_to_takeoff
        && input.snapshot.nose_light() == NoseLightSwitch::Taxi
}

fn is_taking_off(input: &RuleInput<'_>) -> bool {
    let s = input.snapshot;
    input.stayed_on_ground()
        && !input.memory.has_taken_off
        && s.ground_speed_kt() >= input.thresholds.min_takeoff_speed_kt
        && s.nose_light() == NoseLightSwitch::Takeoff
}

fn is_climbing(input: &RuleInput<'_>) -> bool {
    let s = input.snapshot;
    match s.fmc_phase() {
        FmcPhase::Climb => true,
        FmcPhase::Undefined => {
            s.is_airborne()
                && !input.memory.has_reached_cruise_level
                && input.memory.is_airborne_leg()
                && !input.within_cruise_band()
                && s.vertical_speed_fpm() > input.thresholds.min_descent_vertical_speed_fpm()
        }
        _ => false,
    }
}

fn is_cruising(input: &RuleInput<'_>) -> bool {
    let s = input.snapshot;
    s.fmc_phase() == FmcPhase::Cruise || (s.is_airborne() && input.within_cruise_band())
}

fn is_descending(input: &RuleInput<'_>) -> bool {
    let s = input.snapshot;
    match s.fmc_phase() {
        FmcPhase::Descent => true,
        FmcPhase::Undefined => {
            s.is_airborne()
                && input.memory.is_airborne_leg()
                && input.memory.has_reached_cruise_level
                && !input.within_cruise_band()
                && s.vertical_speed_fpm() < input.thresholds.min_climb_vertical_speed_fpm
                && s.indicated_altitude_ft() < s.cruise_altitude_ft()
                && s.indicated_altitude_ft() > input.thresholds.limitation_altitude_ft
        }
        _ => false,
    }
}

fn is_approaching(input: &RuleInput<'_>) -> bool {
    let s = input.snapshot;
    if s.fmc_phase() == FmcPhase::Approach {
        // Approach with takeoff lights on means cleared to land; the landing
        // rule picks it up.
        return s.nose_light() != NoseLightSwitch::Takeoff;
    }

    s.is_airborne()
        && s.nose_light() != NoseLightSwitch::Takeoff
        && s.landing_lights() == LandingLightsSwitch::On
        && s.indicated_altitude_ft() <= input.thresholds.limitation_altitude_ft
}

fn is_landing(input: &RuleInput<'_>) -> bool {
    let s = input.snapshot;
    if s.fmc_phase() == FmcPhase::Approach {
        return true;
    }

    s.is_airborne()
        && input.memory.is_airborne_leg()
        && s.landing_lights() == LandingLightsSwitch::On
        && s.nose_light() == NoseLightSwitch::Takeoff
        && s.indicated_altitude_ft() <= input.thresholds.limitation_altitude_ft
        && s.vertical_speed_fpm() <= input.thresholds.min_descent_vertical_speed_fpm()
}

fn is_rolling_out(input: &RuleInput<'_>) -> bool {
    let s = input.snapshot;
    s.is_on_ground()
        && input.memory.is_airborne_leg()
        && s.landing_lights() == LandingLightsSwitch::On
        && s.nose_light() == NoseLightSwitch::Takeoff
}

fn is_taxiing_in(input: &RuleInput<'_>) -> bool {
    input.stayed_on_ground()
        && input.snapshot.nose_light() == NoseLightSwitch::Taxi
        && input.memory.has_changed_to_takeoff
}

fn is_unboarding(input: &RuleInput<'_>) -> bool {
    input.snapshot.is_on_ground()
        && input.memory.has_changed_to_takeoff
        && input.door_moved(DoorState::Closed, DoorState::Open)
}

fn is_unboarding_done(input: &RuleInput<'_>) -> bool {
    input.snapshot.is_on_ground()
        && input.memory.has_changed_to_takeoff
        && input.door_moved(DoorState::Open, DoorState::Closed)
}
