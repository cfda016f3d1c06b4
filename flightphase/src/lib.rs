//! FlightPhase - Flight lifecycle tracking for X-Plane telemetry
//!
//! This library turns periodic aircraft telemetry snapshots into a validated
//! flight phase (parked, boarding, taxi, takeoff, climb, cruise, ...).
//!
//! # Architecture
//!
//! ```text
//! SnapshotProvider ──► Snapshot ──► classify() ──► candidate phase
//!                                      ▲                 │
//!                                      │                 ▼
//!                               HysteresisMemory ◄── FlightStateManager ──► PhaseChange
//!                                                     (transition graph)        │
//!                                                                               ▼
//!                                                                    listeners / broadcast
//! ```
//!
//! - [`snapshot`]: immutable telemetry record and switch/door enums
//! - [`phase`]: the flight phase enumeration, per-phase tags, transition graph
//! - [`classifier`]: ordered decision rules mapping a snapshot to a candidate phase
//! - [`manager`]: the authoritative phase and its hysteresis memory
//! - [`service`]: polling service delivering phase changes to listeners
//!
//! # Example
//!
//! ```
//! use flightphase::manager::FlightStateManager;
//! use flightphase::phase::FlightPhase;
//! use flightphase::snapshot::{DoorState, Snapshot};
//!
//! let manager = FlightStateManager::with_defaults();
//! manager.set_was_on_ground(true);
//!
//! let snapshot = Snapshot::builder().front_left_door(DoorState::Open).build();
//! manager.update_state(Some(&snapshot));
//!
//! assert_eq!(manager.current_phase(), FlightPhase::Boarding);
//! ```

pub mod classifier;
pub mod config;
pub mod events;
pub mod logging;
pub mod manager;
pub mod phase;
pub mod replay;
pub mod service;
pub mod snapshot;

pub use classifier::{classify, Classification, ClassifierThresholds, HysteresisMemory};
pub use events::{PhaseChange, PhaseListener, SharedPhaseListener};
pub use manager::FlightStateManager;
pub use phase::FlightPhase;
pub use snapshot::Snapshot;
