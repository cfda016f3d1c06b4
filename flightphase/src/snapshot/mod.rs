//! Aircraft telemetry snapshots.
//!
//! A [`Snapshot`] is one immutable reading of the aircraft: numeric flight
//! data, switch and door positions, and the FMC phase hint. Snapshots are
//! produced by a [`crate::service::SnapshotProvider`] and consumed by the
//! classifier.
//!
//! Fields are private; build a snapshot with [`Snapshot::builder`] and read it
//! through accessors. Consumers that need to keep a reading past the current
//! update cycle take a full copy with [`Snapshot::copy`].
//!
//! # Serialization
//!
//! Snapshots serialize to flat JSON objects so telemetry can be recorded and
//! replayed. Missing fields fall back to their defaults:
//!
//! ```json
//! {"agl_ft": 0.0, "ground_speed_kt": 25.0, "nose_light": "taxi", "beacon_light": "on"}
//! ```

mod switches;

use serde::{Deserialize, Serialize};

pub use switches::{
    BeaconLightSwitch, DayPeriod, DoorState, FlapsLever, FmcPhase, GearLever, LandingLightsSwitch,
    NoseLightSwitch, SeatBeltsSignSwitch,
};

/// AGL below which the aircraft is considered on the ground (feet).
pub const ON_GROUND_AGL_FT: f32 = 1.0;

/// One instant of aircraft telemetry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Indicated altitude (feet).
    indicated_altitude_ft: f32,
    /// Altitude above ground level (feet).
    agl_ft: f32,
    /// Vertical speed (feet per minute).
    vertical_speed_fpm: f32,
    /// Selected cruise altitude (feet). Zero or negative when not set.
    cruise_altitude_ft: f32,
    /// Ground speed (knots).
    ground_speed_kt: f32,
    front_left_door: DoorState,
    cockpit_door: DoorState,
    nose_light: NoseLightSwitch,
    beacon_light: BeaconLightSwitch,
    landing_lights: LandingLightsSwitch,
    seat_belts_sign: SeatBeltsSignSwitch,
    flaps_lever: FlapsLever,
    gear_lever: GearLever,
    day_period: DayPeriod,
    fmc_phase: FmcPhase,
    /// Running state of each engine, in engine order.
    engines_running: Vec<bool>,
    /// Whether the simulation is paused.
    is_paused: bool,
}

impl Snapshot {
    /// Start building a snapshot from default values.
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::default()
    }

    /// Full-field copy for consumers that retain a reading.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Whether the aircraft is on the ground (AGL below 1 ft).
    pub fn is_on_ground(&self) -> bool {
        self.agl_ft < ON_GROUND_AGL_FT
    }

    /// Whether the aircraft is airborne.
    pub fn is_airborne(&self) -> bool {
        !self.is_on_ground()
    }

    pub fn indicated_altitude_ft(&self) -> f32 {
        self.indicated_altitude_ft
    }

    pub fn agl_ft(&self) -> f32 {
        self.agl_ft
    }

    pub fn vertical_speed_fpm(&self) -> f32 {
        self.vertical_speed_fpm
    }

    pub fn cruise_altitude_ft(&self) -> f32 {
        self.cruise_altitude_ft
    }

    pub fn ground_speed_kt(&self) -> f32 {
        self.ground_speed_kt
    }

    pub fn front_left_door(&self) -> DoorState {
        self.front_left_door
    }

    pub fn cockpit_door(&self) -> DoorState {
        self.cockpit_door
    }

    pub fn nose_light(&self) -> NoseLightSwitch {
        self.nose_light
    }

    pub fn beacon_light(&self) -> BeaconLightSwitch {
        self.beacon_light
    }

    pub fn landing_lights(&self) -> LandingLightsSwitch {
        self.landing_lights
    }

    pub fn seat_belts_sign(&self) -> SeatBeltsSignSwitch {
        self.seat_belts_sign
    }

    pub fn flaps_lever(&self) -> FlapsLever {
        self.flaps_lever
    }

    pub fn gear_lever(&self) -> GearLever {
        self.gear_lever
    }

    pub fn day_period(&self) -> DayPeriod {
        self.day_period
    }

    pub fn fmc_phase(&self) -> FmcPhase {
        self.fmc_phase
    }

    pub fn engines_running(&self) -> &[bool] {
        &self.engines_running
    }

    /// Whether any engine is running.
    pub fn any_engine_running(&self) -> bool {
        self.engines_running.iter().any(|running| *running)
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }
}

/// Builder for [`Snapshot`].
///
/// Unset fields keep their default values.
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    snapshot: Snapshot,
}

impl SnapshotBuilder {
    pub fn indicated_altitude_ft(mut self, value: f32) -> Self {
        self.snapshot.indicated_altitude_ft = value;
        self
    }

    pub fn agl_ft(mut self, value: f32) -> Self {
        self.snapshot.agl_ft = value;
        self
    }

    pub fn vertical_speed_fpm(mut self, value: f32) -> Self {
        self.snapshot.vertical_speed_fpm = value;
        self
    }

    pub fn cruise_altitude_ft(mut self, value: f32) -> Self {
        self.snapshot.cruise_altitude_ft = value;
        self
    }

    pub fn ground_speed_kt(mut self, value: f32) -> Self {
        self.snapshot.ground_speed_kt = value;
        self
    }

    pub fn front_left_door(mut self, state: DoorState) -> Self {
        self.snapshot.front_left_door = state;
        self
    }

    pub fn cockpit_door(mut self, state: DoorState) -> Self {
        self.snapshot.cockpit_door = state;
        self
    }

    pub fn nose_light(mut self, position: NoseLightSwitch) -> Self {
        self.snapshot.nose_light = position;
        self
    }

    pub fn beacon_light(mut self, position: BeaconLightSwitch) -> Self {
        self.snapshot.beacon_light = position;
        self
    }

    pub fn landing_lights(mut self, position: LandingLightsSwitch) -> Self {
        self.snapshot.landing_lights = position;
        self
    }

    pub fn seat_belts_sign(mut self, position: SeatBeltsSignSwitch) -> Self {
        self.snapshot.seat_belts_sign = position;
        self
    }

    pub fn flaps_lever(mut self, position: FlapsLever) -> Self {
        self.snapshot.flaps_lever = position;
        self
    }

    pub fn gear_lever(mut self, position: GearLever) -> Self {
        self.snapshot.gear_lever = position;
        self
    }

    pub fn day_period(mut self, period: DayPeriod) -> Self {
        self.snapshot.day_period = period;
        self
    }

    pub fn fmc_phase(mut self, phase: FmcPhase) -> Self {
        self.snapshot.fmc_phase = phase;
        self
    }

    pub fn engines_running(mut self, engines: impl Into<Vec<bool>>) -> Self {
        self.snapshot.engines_running = engines.into();
        self
    }

    pub fn paused(mut self, is_paused: bool) -> Self {
        self.snapshot.is_paused = is_paused;
        self
    }

    /// Finish building.
    pub fn build(self) -> Snapshot {
        self.snapshot
    }
}

impl From<Snapshot> for SnapshotBuilder {
    /// Start a builder from an existing reading, e.g. to derive the next
    /// sample of a scripted scenario.
    fn from(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }
}
