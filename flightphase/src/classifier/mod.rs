//! Flight phase classification.
//!
//! Maps a [`Snapshot`] plus the state manager's [`HysteresisMemory`] to a
//! candidate [`FlightPhase`]. Classification is pure: it never changes the
//! memory it is given. Whether the candidate actually becomes the current
//! phase is decided by the transition graph in
//! [`crate::manager::FlightStateManager`].
//!
//! # Decision List
//!
//! Rules are evaluated in a fixed priority order (see [`rules::RULES`]); the
//! first match wins and [`FlightPhase::Parked`] is the fallback. The FMC
//! phase hint overrides the telemetry heuristics for climb, cruise, descent
//! and approach/landing whenever it is not `Undefined`.

pub mod rules;
mod thresholds;

use crate::phase::FlightPhase;
use crate::snapshot::{DoorState, Snapshot};

pub use rules::{Rule, RuleInput, RULES};
pub use thresholds::{
    within_cruise_band, ClassifierThresholds, DEFAULT_CRUISE_TOLERANCE_FT,
    DEFAULT_LIMITATION_ALTITUDE_FT, DEFAULT_MIN_CLIMB_VERTICAL_SPEED_FPM,
    DEFAULT_MIN_TAKEOFF_SPEED_KT, DEFAULT_MIN_TAXI_SPEED_KT,
};

/// State remembered across updates.
///
/// None of these can be derived from a single snapshot: they record events
/// from earlier in the flight leg (takeoff, reaching cruise) and the
/// previous values needed for edge detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HysteresisMemory {
    /// A takeoff roll was detected or an airborne phase was entered.
    pub has_changed_to_takeoff: bool,

    /// The aircraft has been airborne on this leg.
    pub has_taken_off: bool,

    /// Cruise level was reached. Cleared again for a step climb.
    pub has_reached_cruise_level: bool,

    /// Ground flag from the previous update.
    pub was_on_ground: bool,

    /// Front-left door state from the previous update.
    pub last_door_state: DoorState,
}

impl HysteresisMemory {
    /// Both takeoff flags are set.
    pub fn is_airborne_leg(&self) -> bool {
        self.has_taken_off && self.has_changed_to_takeoff
    }
}

/// Result of classifying one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Candidate phase.
    pub phase: FlightPhase,
    /// Name of the rule that produced it.
    pub rule: &'static str,
}

impl Classification {
    /// The takeoff rule matched.
    ///
    /// The state manager flags the takeoff in its memory whenever this is
    /// true, even when the transition itself is rejected.
    pub fn takeoff_roll_detected(&self) -> bool {
        self.phase == FlightPhase::Takeoff
    }
}

/// Classify a snapshot against the given memory.
pub fn classify(
    snapshot: &Snapshot,
    memory: &HysteresisMemory,
    thresholds: &ClassifierThresholds,
) -> Classification {
    let input = RuleInput {
        snapshot,
        memory,
        thresholds,
    };

    RULES
        .iter()
        .find_map(|rule| {
            rule.evaluate(&input).map(|phase| Classification {
                phase,
                rule: rule.name,
            })
        })
        .unwrap_or(Classification {
            phase: FlightPhase::Parked,
            rule: rules::DEFAULT_RULE,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{
        BeaconLightSwitch, DayPeriod, FmcPhase, LandingLightsSwitch, NoseLightSwitch,
    };

    fn classify_default(snapshot: &Snapshot, memory: &HysteresisMemory) -> Classification {
        classify(snapshot, memory, &ClassifierThresholds::default())
    }

    fn ground_memory() -> HysteresisMemory {
        HysteresisMemory {
            was_on_ground: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_fallback_is_parked() {
        let result = classify_default(&Snapshot::default(), &HysteresisMemory::default());
        assert_eq!(result.phase, FlightPhase::Parked);
        assert_eq!(result.rule, "parked");
        assert!(!result.takeoff_roll_detected());
    }

    #[test]
    fn test_classify_does_not_touch_memory() {
        let memory = ground_memory();
        let before = memory;
        let snapshot = Snapshot::builder()
            .ground_speed_kt(60.0)
            .nose_light(NoseLightSwitch::Takeoff)
            .build();

        let result = classify_default(&snapshot, &memory);

        assert_eq!(result.phase, FlightPhase::Takeoff);
        assert!(result.takeoff_roll_detected());
        assert_eq!(memory, before);
    }

    #[test]
    fn test_boarding_beats_pushback() {
        // Door edge and pushback conditions both hold; boarding is listed first.
        let snapshot = Snapshot::builder()
            .front_left_door(DoorState::Open)
            .beacon_light(BeaconLightSwitch::On)
            .build();
        let result = classify_default(&snapshot, &ground_memory());
        assert_eq!(result.phase, FlightPhase::Boarding);
        assert_eq!(result.rule, "boarding");
    }

    #[test]
    fn test_boarding_done_scenario() {
        let memory = HysteresisMemory {
            last_door_state: DoorState::Open,
            ..ground_memory()
        };
        let snapshot = Snapshot::builder().agl_ft(0.0).ground_speed_kt(0.0).build();
        assert_eq!(
            classify_default(&snapshot, &memory).phase,
            FlightPhase::BoardingDone
        );
    }

    #[test]
    fn test_taxi_out_scenario() {
        let snapshot = Snapshot::builder()
            .ground_speed_kt(25.0)
            .beacon_light(BeaconLightSwitch::On)
            .nose_light(NoseLightSwitch::Taxi)
            .build();
        assert_eq!(
            classify_default(&snapshot, &ground_memory()).phase,
            FlightPhase::TaxiOut
        );
    }

    #[test]
    fn test_climb_scenario() {
        let memory = HysteresisMemory {
            has_changed_to_takeoff: true,
            has_taken_off: true,
            ..Default::default()
        };
        let snapshot = Snapshot::builder()
            .agl_ft(35_500.0)
            .indicated_altitude_ft(35_500.0)
            .cruise_altitude_ft(37_000.0)
            .vertical_speed_fpm(0.0)
            .build();
        assert_eq!(classify_default(&snapshot, &memory).phase, FlightPhase::Climb);
    }

    #[test]
    fn test_cruise_scenario_with_and_without_fmc() {
        for fmc in [FmcPhase::Undefined, FmcPhase::Cruise] {
            let snapshot = Snapshot::builder()
                .agl_ft(32_000.0)
                .indicated_altitude_ft(35_500.0)
                .cruise_altitude_ft(35_000.0)
                .fmc_phase(fmc)
                .build();
            assert_eq!(
                classify_default(&snapshot, &HysteresisMemory::default()).phase,
                FlightPhase::Cruise,
                "fmc = {:?}",
                fmc
            );
        }
    }

    #[test]
    fn test_fmc_descent_inside_cruise_band_is_cruise() {
        // Cruise is checked before descent, and the band match wins.
        let snapshot = Snapshot::builder()
            .agl_ft(32_000.0)
            .indicated_altitude_ft(34_000.0)
            .cruise_altitude_ft(35_000.0)
            .fmc_phase(FmcPhase::Descent)
            .build();
        let memory = HysteresisMemory {
            has_reached_cruise_level: true,
            ..Default::default()
        };
        assert_eq!(classify_default(&snapshot, &memory).phase, FlightPhase::Cruise);
    }

    #[test]
    fn test_descent_without_fmc() {
        let memory = HysteresisMemory {
            has_changed_to_takeoff: true,
            has_taken_off: true,
            has_reached_cruise_level: true,
            ..Default::default()
        };
        for vs in [0.0, -1_200.0] {
            let snapshot = Snapshot::builder()
                .agl_ft(28_000.0)
                .indicated_altitude_ft(31_000.0)
                .cruise_altitude_ft(35_000.0)
                .vertical_speed_fpm(vs)
                .build();
            assert_eq!(classify_default(&snapshot, &memory).phase, FlightPhase::Descent);
        }
    }

    #[test]
    fn test_approach_without_memory() {
        let snapshot = Snapshot::builder()
            .agl_ft(6_000.0)
            .indicated_altitude_ft(9_000.0)
            .vertical_speed_fpm(-1_200.0)
            .landing_lights(LandingLightsSwitch::On)
            .build();
        assert_eq!(
            classify_default(&snapshot, &HysteresisMemory::default()).phase,
            FlightPhase::Approach
        );
    }

    #[test]
    fn test_fmc_approach_with_takeoff_lights_is_landing() {
        // Intentional quirk: FMC Approach + takeoff nose light is read as
        // landing clearance, with no other condition checked.
        let snapshot = Snapshot::builder()
            .agl_ft(3_000.0)
            .indicated_altitude_ft(25_000.0)
            .nose_light(NoseLightSwitch::Takeoff)
            .fmc_phase(FmcPhase::Approach)
            .day_period(DayPeriod::Night)
            .build();
        let result = classify_default(&snapshot, &HysteresisMemory::default());
        assert_eq!(result.phase, FlightPhase::LandingNight);
        assert_eq!(result.rule, "landing");
    }

    #[test]
    fn test_fmc_approach_without_takeoff_lights_is_approach() {
        let snapshot = Snapshot::builder()
            .agl_ft(3_000.0)
            .indicated_altitude_ft(25_000.0)
            .nose_light(NoseLightSwitch::Taxi)
            .fmc_phase(FmcPhase::Approach)
            .build();
        assert_eq!(
            classify_default(&snapshot, &HysteresisMemory::default()).phase,
            FlightPhase::Approach
        );
    }

    #[test]
    fn test_rollout_scenario() {
        let memory = HysteresisMemory {
            has_changed_to_takeoff: true,
            has_taken_off: true,
            was_on_ground: true,
            ..Default::default()
        };
        let snapshot = Snapshot::builder()
            .ground_speed_kt(110.0)
            .nose_light(NoseLightSwitch::Takeoff)
            .landing_lights(LandingLightsSwitch::On)
            .day_period(DayPeriod::Night)
            .build();
        assert_eq!(classify_default(&snapshot, &memory).phase, FlightPhase::Rollout);
    }

    #[test]
    fn test_taxi_in_after_rejected_takeoff() {
        // Takeoff flagged but never airborne.
        let memory = HysteresisMemory {
            has_changed_to_takeoff: true,
            was_on_ground: true,
            ..Default::default()
        };
        let snapshot = Snapshot::builder()
            .ground_speed_kt(15.0)
            .nose_light(NoseLightSwitch::Taxi)
            .build();
        assert_eq!(classify_default(&snapshot, &memory).phase, FlightPhase::TaxiIn);
    }

    #[test]
    fn test_unboarding_done_scenario() {
        let memory = HysteresisMemory {
            has_changed_to_takeoff: true,
            has_taken_off: true,
            was_on_ground: true,
            last_door_state: DoorState::Open,
            ..Default::default()
        };
        assert_eq!(
            classify_default(&Snapshot::default(), &memory).phase,
            FlightPhase::UnboardingDone
        );
    }

    #[test]
    fn test_custom_thresholds_are_used() {
        let thresholds = ClassifierThresholds {
            min_takeoff_speed_kt: 60.0,
            ..Default::default()
        };
        let snapshot = Snapshot::builder()
            .ground_speed_kt(50.0)
            .nose_light(NoseLightSwitch::Takeoff)
            .build();

        assert_eq!(
            classify(&snapshot, &ground_memory(), &thresholds).phase,
            FlightPhase::Parked
        );
        assert_eq!(
            classify_default(&snapshot, &ground_memory()).phase,
            FlightPhase::Takeoff
        );
    }
}
