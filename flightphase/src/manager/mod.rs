//! Authoritative flight phase tracking.
//!
//! [`FlightStateManager`] owns the current phase and the hysteresis memory
//! for one aircraft. Each call to [`FlightStateManager::update_state`]:
//!
//! 1. classifies the snapshot against the current memory,
//! 2. force-sets the first classification, or validates later candidates
//!    against the transition graph (invalid candidates are dropped
//!    silently),
//! 3. adjusts the cruise flag for climbs that never reach cruise and for
//!    step climbs,
//! 4. records the door and ground state for the next call.
//!
//! # Thread Safety
//!
//! All four steps run under one mutex, so concurrent callers (a polling loop
//! and a manual trigger, say) are serialized in lock order.
//! [`FlightStateManager::current_phase`] reads an atomic mirror and never
//! takes the lock; it may be one update behind.


use std::sync::atomic::{AtomicU8, Ordering};

use parking_lot::Mutex;
use tracing::{debug, info, trace};

use crate::classifier::{classify, ClassifierThresholds, HysteresisMemory};
use crate::events::PhaseChange;
use crate::phase::{can_transition, FlightPhase, UnknownPhase};
use crate::snapshot::{DoorState, Snapshot};

/// Mutable state guarded by the manager's lock.
#[derive(Debug, Clone, Copy, Default)]
struct ManagerState {
    phase: FlightPhase,
    memory: HysteresisMemory,
    is_initialized: bool,
}

impl ManagerState {
    /// Enter `phase` unconditionally and apply its side effects on memory.
    fn enter(&mut self, phase: FlightPhase) {
        let tags = phase.tags();

        if tags.marks_airborne {
            self.memory.has_changed_to_takeoff = true;
            self.memory.has_taken_off = true;

            if tags.marks_cruise_reached {
                self.memory.has_reached_cruise_level = true;
            }
        } else if tags.ends_flight {
            self.memory.has_taken_off = false;
            self.memory.has_changed_to_takeoff = false;
            self.memory.has_reached_cruise_level = false;
        }

        self.phase = phase;
    }

    /// Enter `candidate` only if the graph allows it from the current phase.
    fn try_transition(&mut self, candidate: FlightPhase) -> bool {
        if can_transition(self.phase, candidate) {
            self.enter(candidate);
            true
        } else {
            trace!(
                current = %self.phase,
                candidate = %candidate,
                "Rejected flight phase candidate"
            );
            false
        }
    }

    /// Keep the cruise flag consistent with climbs that level off early and
    /// with step climbs.
    fn apply_step_climb(&mut self, snapshot: &Snapshot, thresholds: &ClassifierThresholds) {
        let vs = snapshot.vertical_speed_fpm();

        if self.phase == FlightPhase::Climb
            && vs <= thresholds.min_descent_vertical_speed_fpm()
            && !self.memory.has_reached_cruise_level
        {
            // Descending out of a climb: cruise will not be reached this way.
            debug!(vertical_speed_fpm = vs, "Climb abandoned, marking cruise level reached");
            self.memory.has_reached_cruise_level = true;
        } else if self.phase == FlightPhase::Cruise
            && vs >= thresholds.min_climb_vertical_speed_fpm
            && self.memory.has_reached_cruise_level
        {
            debug!(vertical_speed_fpm = vs, "Step climb from cruise level");
            self.memory.has_reached_cruise_level = false;
        }
    }
}

/// Tracks the flight phase of one aircraft.
///
/// # Example
///
/// ```
/// use flightphase::manager::FlightStateManager;
/// use flightphase::phase::FlightPhase;
/// use flightphase::snapshot::Snapshot;
///
/// let manager = FlightStateManager::with_defaults();
///
/// // The first snapshot is accepted without a graph check.
/// manager.update_state(Some(&Snapshot::default()));
/// assert_eq!(manager.current_phase(), FlightPhase::Parked);
/// assert!(manager.is_initialized());
///
/// // Absent telemetry is ignored.
/// assert_eq!(manager.update_state(None), None);
/// ```
#[derive(Debug)]
pub struct FlightStateManager {
    thresholds: ClassifierThresholds,
    state: Mutex<ManagerState>,
    /// Lock-free mirror of `state.phase`.
    current: AtomicU8,
}

impl FlightStateManager {
    /// Create a manager with the given thresholds.
    pub fn new(thresholds: ClassifierThresholds) -> Self {
        Self {
            thresholds,
            state: Mutex::new(ManagerState::default()),
            current: AtomicU8::new(FlightPhase::default().into()),
        }
    }

    /// Create a manager with default thresholds.
    pub fn with_defaults() -> Self {
        Self::new(ClassifierThresholds::default())
    }

    /// Thresholds used for classification.
    pub fn thresholds(&self) -> &ClassifierThresholds {
        &self.thresholds
    }

    /// Update the phase from a snapshot.
    ///
    /// `None` is a no-op. Returns the change when the phase is different
    /// after the call than before it.
    pub fn update_state(&self, snapshot: Option<&Snapshot>) -> Option<PhaseChange> {
        let snapshot = snapshot?;

        let mut state = self.state.lock();
        let previous = state.phase;

        let classification = classify(snapshot, &state.memory, &self.thresholds);
        if classification.takeoff_roll_detected() {
            state.memory.has_changed_to_takeoff = true;
        }

        if !state.is_initialized {
            state.enter(classification.phase);
            state.is_initialized = true;
            debug!(
                phase = %classification.phase,
                rule = classification.rule,
                "Flight phase initialized"
            );
        } else if classification.phase != state.phase {
            state.try_transition(classification.phase);
        }

        state.apply_step_climb(snapshot, &self.thresholds);

        state.memory.last_door_state = snapshot.front_left_door();
        state.memory.was_on_ground = snapshot.is_on_ground();

        let current = state.phase;
        self.current.store(current.into(), Ordering::Release);
        drop(state);

        if current == previous {
            return None;
        }

        info!(
            from = %previous,
            to = %current,
            rule = classification.rule,
            agl_ft = snapshot.agl_ft(),
            ground_speed_kt = snapshot.ground_speed_kt(),
            vertical_speed_fpm = snapshot.vertical_speed_fpm(),
            "Flight phase transition"
        );

        Some(PhaseChange::new(previous, current))
    }

    /// Current phase, read without locking.
    ///
    /// May lag a concurrent `update_state` by one update.
    pub fn current_phase(&self) -> FlightPhase {
        match FlightPhase::try_from(self.current.load(Ordering::Acquire)) {
            Ok(phase) => phase,
            Err(UnknownPhase(raw)) => unreachable!("corrupt flight phase mirror: {}", raw),
        }
    }

    /// Whether the first snapshot has been processed.
    pub fn is_initialized(&self) -> bool {
        self.state.lock().is_initialized
    }

    /// Copy of the hysteresis memory.
    pub fn memory(&self) -> HysteresisMemory {
        self.state.lock().memory
    }

    pub fn has_changed_to_takeoff(&self) -> bool {
        self.state.lock().memory.has_changed_to_takeoff
    }

    pub fn has_taken_off(&self) -> bool {
        self.state.lock().memory.has_taken_off
    }

    pub fn has_reached_cruise_level(&self) -> bool {
        self.state.lock().memory.has_reached_cruise_level
    }

    pub fn set_has_changed_to_takeoff(&self, value: bool) {
        self.state.lock().memory.has_changed_to_takeoff = value;
    }

    pub fn set_has_taken_off(&self, value: bool) {
        self.state.lock().memory.has_taken_off = value;
    }

    pub fn set_has_reached_cruise_level(&self, value: bool) {
        self.state.lock().memory.has_reached_cruise_level = value;
    }

    /// Seed the previous ground flag.
    pub fn set_was_on_ground(&self, value: bool) {
        self.state.lock().memory.was_on_ground = value;
    }

    /// Seed the previous front-left door state.
    pub fn set_last_door_state(&self, state: DoorState) {
        self.state.lock().memory.last_door_state = state;
    }

    /// Force the current phase, applying its memory side effects.
    ///
    /// Marks the manager initialized so the next update goes through the
    /// transition graph. Intended for harnesses priming a scenario.
    pub fn seed_phase(&self, phase: FlightPhase) {
        let mut state = self.state.lock();
        state.enter(phase);
        state.is_initialized = true;
        self.current.store(phase.into(), Ordering::Release);
    }

    /// Return to the freshly created state.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        *state = ManagerState::default();
        self.current
            .store(FlightPhase::default().into(), Ordering::Release);
    }
}

impl Default for FlightStateManager {
    fn default() -> Self {
        Self::with_defaults()
    }
}
