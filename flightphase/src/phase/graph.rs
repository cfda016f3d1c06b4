//! Transition graph between flight phases.
//!
//! The graph is a constant adjacency table: for each phase, the only phases
//! that may follow it. The state manager rejects any candidate phase that
//! is not listed here, which keeps noisy telemetry from jumping the
//! lifecycle (e.g. `Parked` straight to `Cruise`).
//!
//! ```text
//! Parked         -> Boarding
//! Boarding       -> BoardingDone
//! BoardingDone   -> Pushback
//! Pushback       -> TaxiOut
//! TaxiOut        -> Takeoff
//! Takeoff        -> Climb | TaxiIn | Rollout
//! Climb          -> Cruise | Descent
//! Cruise         -> Climb | Descent
//! Descent        -> Approach | LandingDay | LandingNight
//! Approach       -> LandingDay | LandingNight
//! LandingDay     -> Climb | Rollout
//! LandingNight   -> Climb | Rollout
//! Rollout        -> TaxiIn
//! TaxiIn         -> TaxiOut | Pushback | Unboarding
//! Unboarding     -> UnboardingDone
//! UnboardingDone -> Parked
//! ```

use super::FlightPhase;
use super::FlightPhase::*;

/// Phases that may legally follow `phase`.
pub fn allowed_next(phase: FlightPhase) -> &'static [FlightPhase] {
    match phase {
        Parked => &[Boarding],
        Boarding => &[BoardingDone],
        BoardingDone => &[Pushback],
        Pushback => &[TaxiOut],
        TaxiOut => &[Takeoff],
        Takeoff => &[Climb, TaxiIn, Rollout],
        Climb => &[Cruise, Descent],
        Cruise => &[Climb, Descent],
        Descent => &[Approach, LandingDay, LandingNight],
        Approach => &[LandingDay, LandingNight],
        // Climb out of a landing phase is a go-around.
        LandingDay => &[Climb, Rollout],
        LandingNight => &[Climb, Rollout],
        Rollout => &[TaxiIn],
        TaxiIn => &[TaxiOut, Pushback, Unboarding],
        Unboarding => &[UnboardingDone],
        UnboardingDone => &[Parked],
    }
}

/// Whether `to` may directly follow `from`.
pub fn can_transition(from: FlightPhase, to: FlightPhase) -> bool {
    allowed_next(from).contains(&to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_sequence_is_linear() {
        assert_eq!(allowed_next(Parked), &[Boarding]);
        assert_eq!(allowed_next(Boarding), &[BoardingDone]);
        assert_eq!(allowed_next(BoardingDone), &[Pushback]);
        assert_eq!(allowed_next(Pushback), &[TaxiOut]);
        assert_eq!(allowed_next(TaxiOut), &[Takeoff]);
    }

    #[test]
    fn test_takeoff_successors() {
        assert!(can_transition(Takeoff, Climb));
        assert!(can_transition(Takeoff, TaxiIn)); // rejected takeoff
        assert!(can_transition(Takeoff, Rollout));
        assert!(!can_transition(Takeoff, Cruise));
    }

    #[test]
    fn test_step_climb_is_allowed() {
        assert!(can_transition(Cruise, Climb));
        assert!(can_transition(Climb, Cruise));
    }

    #[test]
    fn test_go_around_from_landing() {
        assert!(can_transition(LandingDay, Climb));
        assert!(can_transition(LandingNight, Climb));
        assert!(!can_transition(Approach, Climb));
    }

    #[test]
    fn test_impossible_jumps_are_rejected() {
        assert!(!can_transition(Parked, Cruise));
        assert!(!can_transition(Cruise, Parked));
        assert!(!can_transition(Descent, Cruise));
        assert!(!can_transition(Rollout, Takeoff));
    }

    #[test]
    fn test_no_self_loops() {
        for phase in FlightPhase::ALL {
            assert!(
                !can_transition(phase, phase),
                "{} should not list itself",
                phase
            );
        }
    }

    #[test]
    fn test_every_phase_has_a_successor() {
        for phase in FlightPhase::ALL {
            assert!(!allowed_next(phase).is_empty(), "{} is a dead end", phase);
        }
    }

    #[test]
    fn test_every_phase_is_reachable_from_parked() {
        let mut seen = vec![Parked];
        let mut frontier = vec![Parked];

        while let Some(phase) = frontier.pop() {
            for next in allowed_next(phase) {
                if !seen.contains(next) {
                    seen.push(*next);
                    frontier.push(*next);
                }
            }
        }

        assert_eq!(seen.len(), FlightPhase::ALL.len());
    }
}
