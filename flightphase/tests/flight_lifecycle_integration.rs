//! Integration tests for the flight lifecycle.
//!
//! These tests drive the public API end to end:
//! - recorded trace → ReplayProvider → FlightStateService → listeners
//! - multiple legs on one manager
//! - rejected takeoff and go-around paths
//! - configured thresholds flowing into classification
//!
//! Run with: `cargo test --test flight_lifecycle_integration`

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use flightphase::config::ConfigFile;
use flightphase::events::RecordingListener;
use flightphase::manager::FlightStateManager;
use flightphase::phase::FlightPhase;
use flightphase::replay::ReplayProvider;
use flightphase::service::{FlightStateService, SnapshotProvider};
use flightphase::snapshot::{
    BeaconLightSwitch, DoorState, FmcPhase, LandingLightsSwitch, NoseLightSwitch, Snapshot,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Phases entered during `full_flight.jsonl`, in order.
const FULL_FLIGHT: &[FlightPhase] = &[
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
    FlightPhase::Rollout,
    FlightPhase::TaxiIn,
    FlightPhase::Unboarding,
    FlightPhase::UnboardingDone,
    FlightPhase::Parked,
];

struct Replay {
    provider: Arc<ReplayProvider>,
    service: FlightStateService,
    recorder: Arc<RecordingListener>,
}

fn replay(manager: Arc<FlightStateManager>) -> Replay {
    let provider = Arc::new(ReplayProvider::open(fixture("full_flight.jsonl")).unwrap());
    let service = FlightStateService::new(provider.clone(), manager, 32);
    let recorder = Arc::new(RecordingListener::new());
    service.add_listener(recorder.clone());
    Replay {
        provider,
        service,
        recorder,
    }
}

/// Feed every recorded snapshot through the service.
fn drain(replay: &Replay) {
    while !replay.provider.is_finished() {
        replay.service.update();
    }
}

fn apply(manager: &FlightStateManager, snapshots: &[Snapshot]) -> Vec<FlightPhase> {
    snapshots
        .iter()
        .filter_map(|s| manager.update_state(Some(s)))
        .map(|change| change.to)
        .collect()
}

// ============================================================================
// Full flight
// ============================================================================

#[test]
fn test_full_flight_from_trace() {
    let manager = Arc::new(FlightStateManager::with_defaults());
    let replay = replay(manager.clone());

    drain(&replay);

    assert_eq!(replay.recorder.phases(), FULL_FLIGHT);
    assert_eq!(manager.current_phase(), FlightPhase::Parked);
    assert!(replay.service.last_update().is_some());

    // Each change starts where the previous one ended.
    let changes = replay.recorder.changes();
    assert_eq!(changes[0].from, FlightPhase::Parked);
    for pair in changes.windows(2) {
        assert_eq!(pair[0].to, pair[1].from);
    }
}

#[test]
fn test_leg_flags_cleared_at_gate() {
    let manager = Arc::new(FlightStateManager::with_defaults());
    drain(&replay(manager.clone()));

    assert!(!manager.has_taken_off());
    assert!(!manager.has_changed_to_takeoff());
    assert!(!manager.has_reached_cruise_level());
}

#[test]
fn test_second_leg_on_same_manager() {
    let manager = Arc::new(FlightStateManager::with_defaults());

    let first = replay(manager.clone());
    drain(&first);

    let second = replay(manager.clone());
    drain(&second);

    assert_eq!(first.recorder.phases(), FULL_FLIGHT);
    assert_eq!(second.recorder.phases(), FULL_FLIGHT);
}

#[tokio::test]
async fn test_service_run_delivers_broadcast() {
    let manager = Arc::new(FlightStateManager::with_defaults());
    let Replay {
        service, recorder, ..
    } = replay(manager);
    let mut rx = service.subscribe();

    service
        .run(Duration::from_millis(1), CancellationToken::new())
        .await;

    let mut received = Vec::new();
    while let Ok(change) = rx.try_recv() {
        received.push(change.to);
    }

    assert_eq!(received, FULL_FLIGHT);
    assert_eq!(recorder.phases(), FULL_FLIGHT);
}

// ============================================================================
// Off-nominal paths
// ============================================================================

#[test]
fn test_rejected_takeoff_returns_to_taxi_in() {
    let manager = FlightStateManager::with_defaults();
    manager.seed_phase(FlightPhase::TaxiOut);
    manager.set_was_on_ground(true);

    let phases = apply(
        &manager,
        &[
            Snapshot::builder()
                .ground_speed_kt(70.0)
                .nose_light(NoseLightSwitch::Takeoff)
                .beacon_light(BeaconLightSwitch::On)
                .build(),
            Snapshot::builder()
                .ground_speed_kt(20.0)
                .nose_light(NoseLightSwitch::Taxi)
                .beacon_light(BeaconLightSwitch::On)
                .build(),
        ],
    );

    assert_eq!(phases, vec![FlightPhase::Takeoff, FlightPhase::TaxiIn]);
    assert!(manager.has_changed_to_takeoff());
    assert!(!manager.has_taken_off());
}

#[test]
fn test_go_around_from_landing() {
    let manager = FlightStateManager::with_defaults();
    manager.set_has_changed_to_takeoff(true);
    manager.set_has_taken_off(true);
    manager.seed_phase(FlightPhase::LandingDay);

    let phases = apply(
        &manager,
        &[Snapshot::builder()
            .agl_ft(400.0)
            .indicated_altitude_ft(900.0)
            .vertical_speed_fpm(2_000.0)
            .fmc_phase(FmcPhase::Climb)
            .landing_lights(LandingLightsSwitch::On)
            .build()],
    );

    assert_eq!(phases, vec![FlightPhase::Climb]);
}

#[test]
fn test_noisy_sample_does_not_skip_phases() {
    let manager = FlightStateManager::with_defaults();
    manager.seed_phase(FlightPhase::Parked);
    manager.set_was_on_ground(true);

    // A glitched sample reporting cruise while parked is ignored.
    let glitch = Snapshot::builder()
        .agl_ft(33_000.0)
        .indicated_altitude_ft(35_000.0)
        .cruise_altitude_ft(35_000.0)
        .build();
    let phases = apply(
        &manager,
        &[
            glitch,
            Snapshot::default(),
            Snapshot::builder().front_left_door(DoorState::Open).build(),
        ],
    );

    assert_eq!(phases, vec![FlightPhase::Boarding]);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_configured_thresholds_change_classification() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.ini");
    std::fs::write(&path, "[classifier]\nmin_takeoff_speed_kt = 100\n").unwrap();

    let config = ConfigFile::load_from(&path).unwrap();
    let manager = FlightStateManager::new(config.classifier);
    manager.seed_phase(FlightPhase::TaxiOut);
    manager.set_was_on_ground(true);

    let roll = Snapshot::builder()
        .ground_speed_kt(80.0)
        .nose_light(NoseLightSwitch::Takeoff)
        .build();
    assert_eq!(manager.update_state(Some(&roll)), None);

    let faster = Snapshot::builder()
        .ground_speed_kt(110.0)
        .nose_light(NoseLightSwitch::Takeoff)
        .build();
    assert_eq!(
        manager.update_state(Some(&faster)).map(|c| c.to),
        Some(FlightPhase::Takeoff)
    );
}
