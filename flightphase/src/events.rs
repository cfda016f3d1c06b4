//! Phase change notifications.
//!
//! The state manager reports every accepted change as a [`PhaseChange`].
//! Consumers such as announcement or ambient-sound subsystems implement
//! [`PhaseListener`] and register with the
//! [`crate::service::FlightStateService`], or subscribe to its broadcast
//! channel.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::phase::FlightPhase;

/// An accepted phase change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhaseChange {
    /// Phase before the update.
    pub from: FlightPhase,
    /// Phase after the update.
    pub to: FlightPhase,
}

impl PhaseChange {
    pub fn new(from: FlightPhase, to: FlightPhase) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for PhaseChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Error a listener may return from [`PhaseListener::on_phase_change`].
///
/// The service logs it and keeps delivering to the remaining listeners.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

/// Receives phase changes.
///
/// # Thread Safety
///
/// Listeners are called from whichever task drives the service, so
/// implementations must be `Send + Sync`.
pub trait PhaseListener: Send + Sync {
    /// Called once per accepted phase change, in order.
    fn on_phase_change(&self, change: &PhaseChange) -> Result<(), ListenerError>;

    /// Name used in log messages.
    fn name(&self) -> &str {
        "listener"
    }
}

/// Shared listener handle.
pub type SharedPhaseListener = Arc<dyn PhaseListener>;

/// A listener that records every change it receives.
///
/// Useful for tests and for tools that print a flight log afterwards.
#[derive(Debug, Default)]
pub struct RecordingListener {
    changes: parking_lot::Mutex<Vec<PhaseChange>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Changes received so far, oldest first.
    pub fn changes(&self) -> Vec<PhaseChange> {
        self.changes.lock().clone()
    }

    /// Phases entered so far, oldest first.
    pub fn phases(&self) -> Vec<FlightPhase> {
        self.changes.lock().iter().map(|c| c.to).collect()
    }
}

impl PhaseListener for RecordingListener {
    fn on_phase_change(&self, change: &PhaseChange) -> Result<(), ListenerError> {
        self.changes.lock().push(*change);
        Ok(())
    }

    fn name(&self) -> &str {
        "recorder"
    }
}
