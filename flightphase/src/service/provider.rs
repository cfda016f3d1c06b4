//! Snapshot source abstraction.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::snapshot::Snapshot;

/// Source of telemetry snapshots.
///
/// Implementations wrap whatever produces telemetry: a simulator
/// connection, a recorded trace, a test fixture.
pub trait SnapshotProvider: Send + Sync {
    /// Take the current snapshot, or `None` if no telemetry is available.
    fn take_snapshot(&self) -> Option<Snapshot>;

    /// When the last snapshot was taken.
    fn last_update(&self) -> Option<DateTime<Utc>>;

    /// Whether the provider will never produce another snapshot.
    ///
    /// Live sources never finish; recorded traces finish when exhausted.
    fn is_finished(&self) -> bool {
        false
    }
}

/// Shared provider handle.
pub type SharedSnapshotProvider = Arc<dyn SnapshotProvider>;
