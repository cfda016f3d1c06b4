//! Flight state service.
//!
//! Connects a [`SnapshotProvider`] to a [`FlightStateManager`] and fans out
//! every accepted phase change:
//!
//! ```text
//! SnapshotProvider ──take_snapshot()──► FlightStateManager::update_state()
//!                                                │ Some(PhaseChange)
//!                                  ┌─────────────┴──────────────┐
//!                                  ▼                            ▼
//!                         PhaseListener callbacks     broadcast::Sender<PhaseChange>
//! ```
//!
//! Listeners are called synchronously, in registration order, before
//! `update()` returns. A failing listener is logged and skipped; the rest
//! still receive the change. Concurrent `update()` calls are serialized from
//! snapshot to delivery, so listeners and subscribers see changes in the
//! order the transitions were applied.

mod provider;

pub use provider::{SharedSnapshotProvider, SnapshotProvider};

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::events::{ListenerError, PhaseChange, SharedPhaseListener};
use crate::manager::FlightStateManager;
use crate::phase::FlightPhase;

/// Default time between snapshot polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Default capacity of the phase change broadcast channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Shortest poll interval `run` will use.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Errors raised while delivering phase changes.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A listener returned an error.
    #[error("listener '{listener}' failed to handle {change}: {source}")]
    Listener {
        listener: String,
        change: PhaseChange,
        #[source]
        source: ListenerError,
    },
}

/// Polls snapshots and publishes phase changes.
pub struct FlightStateService {
    provider: SharedSnapshotProvider,
    manager: Arc<FlightStateManager>,
    listeners: RwLock<Vec<SharedPhaseListener>>,
    events: broadcast::Sender<PhaseChange>,
    /// Held from snapshot to delivery.
    delivery: Mutex<()>,
}

impl FlightStateService {
    /// Create a service.
    ///
    /// `event_capacity` bounds the broadcast channel; slow subscribers that
    /// fall further behind see `RecvError::Lagged`.
    pub fn new(
        provider: SharedSnapshotProvider,
        manager: Arc<FlightStateManager>,
        event_capacity: usize,
    ) -> Self {
        let (events, _) = broadcast::channel(event_capacity.max(1));
        Self {
            provider,
            manager,
            listeners: RwLock::new(Vec::new()),
            events,
            delivery: Mutex::new(()),
        }
    }

    /// Create a service with a fresh manager and default channel capacity.
    pub fn with_provider(provider: SharedSnapshotProvider) -> Self {
        Self::new(
            provider,
            Arc::new(FlightStateManager::with_defaults()),
            DEFAULT_EVENT_CAPACITY,
        )
    }

    /// The state manager driven by this service.
    pub fn manager(&self) -> &Arc<FlightStateManager> {
        &self.manager
    }

    /// Current phase of the managed aircraft.
    pub fn current_phase(&self) -> FlightPhase {
        self.manager.current_phase()
    }

    /// Time of the provider's most recent snapshot.
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.provider.last_update()
    }

    /// Register a listener. Listeners are called in registration order.
    pub fn add_listener(&self, listener: SharedPhaseListener) {
        tracing::debug!(listener = listener.name(), "Phase listener registered");
        self.listeners.write().push(listener);
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Subscribe to phase changes.
    pub fn subscribe(&self) -> broadcast::Receiver<PhaseChange> {
        self.events.subscribe()
    }

    /// Take one snapshot and apply it.
    ///
    /// Returns the phase change, if any, after it has been delivered.
    /// Listeners must not call `update()` on this service from inside
    /// their callback.
    pub fn update(&self) -> Option<PhaseChange> {
        let _delivery = self.delivery.lock();

        let snapshot = self.provider.take_snapshot();
        let change = self.manager.update_state(snapshot.as_ref())?;

        for error in self.notify_listeners(&change) {
            tracing::warn!(error = %error, "Phase listener failed");
        }

        // No subscribers is not an error.
        let _ = self.events.send(change);

        Some(change)
    }

    /// Deliver `change` to every listener, collecting failures.
    fn notify_listeners(&self, change: &PhaseChange) -> Vec<ServiceError> {
        let listeners = self.listeners.read().clone();

        listeners
            .iter()
            .filter_map(|listener| {
                listener
                    .on_phase_change(change)
                    .err()
                    .map(|source| ServiceError::Listener {
                        listener: listener.name().to_string(),
                        change: *change,
                        source,
                    })
            })
            .collect()
    }

    /// Poll the provider every `interval` until cancelled or the provider
    /// is finished.
    ///
    /// Intervals shorter than [`MIN_POLL_INTERVAL`] (including zero) are
    /// raised to it.
    pub async fn run(&self, interval: Duration, cancellation_token: CancellationToken) {
        let interval = interval.max(MIN_POLL_INTERVAL);
        tracing::debug!(
            interval_ms = interval.as_millis() as u64,
            "Flight state service started"
        );

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;

                _ = cancellation_token.cancelled() => break,

                _ = ticker.tick() => {
                    if self.provider.is_finished() {
                        tracing::debug!("Snapshot provider finished");
                        break;
                    }

                    self.update();
                }
            }
        }

        tracing::debug!(
            phase = %self.manager.current_phase(),
            "Flight state service stopped"
        );
    }
}

impl std::fmt::Debug for FlightStateService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlightStateService")
            .field("manager", &self.manager)
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}
