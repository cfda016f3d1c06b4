//! Discrete cockpit and cabin telemetry values.
//!
//! Each enum mirrors a switch, lever or door position as exposed by the
//! simulator. Defaults are the cold-and-dark positions.

use serde::{Deserialize, Serialize};

/// Position of a door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorState {
    /// Completely closed.
    #[default]
    Closed,
    /// Moving towards open.
    Opening,
    /// Completely open.
    Open,
    /// Moving towards closed.
    Closing,
}

/// Nose (taxi/takeoff) light switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoseLightSwitch {
    #[default]
    Off,
    Taxi,
    Takeoff,
}

/// Beacon light switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeaconLightSwitch {
    #[default]
    Off,
    On,
}

/// Landing lights switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandingLightsSwitch {
    #[default]
    Off,
    Retracted,
    On,
}

/// Seat belts sign switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatBeltsSignSwitch {
    #[default]
    Off,
    Auto,
    On,
}

/// Flaps lever detent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlapsLever {
    #[default]
    Retracted,
    Flaps1,
    Flaps2,
    Flaps3,
    Full,
}

/// Landing gear lever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GearLever {
    #[default]
    Down,
    Up,
}

/// Period of the day at the aircraft position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPeriod {
    #[default]
    Day,
    Night,
}

/// Flight phase reported by the flight management computer.
///
/// Anything other than `Undefined` is treated as an authoritative hint by
/// the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FmcPhase {
    /// The FMC does not report a phase (or the aircraft has no FMC).
    #[default]
    Undefined,
    Takeoff,
    Climb,
    Cruise,
    Descent,
    Approach,
    GoAround,
}

impl FmcPhase {
    /// Whether the FMC is reporting anything at all.
    pub fn is_defined(&self) -> bool {
        !matches!(self, FmcPhase::Undefined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_cold_and_dark() {
        assert_eq!(DoorState::default(), DoorState::Closed);
        assert_eq!(NoseLightSwitch::default(), NoseLightSwitch::Off);
        assert_eq!(BeaconLightSwitch::default(), BeaconLightSwitch::Off);
        assert_eq!(LandingLightsSwitch::default(), LandingLightsSwitch::Off);
        assert_eq!(GearLever::default(), GearLever::Down);
        assert_eq!(FmcPhase::default(), FmcPhase::Undefined);
    }

    #[test]
    fn test_fmc_phase_is_defined() {
        assert!(!FmcPhase::Undefined.is_defined());
        assert!(FmcPhase::Approach.is_defined());
        assert!(FmcPhase::GoAround.is_defined());
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&FmcPhase::GoAround).unwrap();
        assert_eq!(json, "\"go_around\"");

        let door: DoorState = serde_json::from_str("\"closing\"").unwrap();
        assert_eq!(door, DoorState::Closing);
    }
}
