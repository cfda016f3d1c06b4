//! Recorded telemetry playback.
//!
//! A trace is a JSON Lines file: one serialized [`Snapshot`] per line.
//! Blank lines and lines starting with `#` are skipped. Missing fields take
//! their defaults, so a trace only needs to list what changes:
//!
//! ```text
//! # gate, door opens
//! {"front_left_door": "open"}
//! {"front_left_door": "closed"}
//! {"beacon_light": "on"}
//! ```

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use thiserror::Error;

use crate::service::SnapshotProvider;
use crate::snapshot::Snapshot;

/// Errors loading a trace.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid snapshot on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Plays back a recorded trace one snapshot per call.
#[derive(Debug, Default)]
pub struct ReplayProvider {
    remaining: Mutex<VecDeque<Snapshot>>,
    last_update: Mutex<Option<DateTime<Utc>>>,
}

impl ReplayProvider {
    /// Play back the given snapshots in order.
    pub fn from_snapshots(snapshots: Vec<Snapshot>) -> Self {
        Self {
            remaining: Mutex::new(snapshots.into()),
            last_update: Mutex::new(None),
        }
    }

    /// Parse a trace from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ReplayError> {
        let mut snapshots = Vec::new();

        for (index, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let snapshot = serde_json::from_str(trimmed).map_err(|source| ReplayError::Json {
                line: index + 1,
                source,
            })?;
            snapshots.push(snapshot);
        }

        tracing::debug!(snapshots = snapshots.len(), "Loaded telemetry trace");
        Ok(Self::from_snapshots(snapshots))
    }

    /// Load a trace file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    /// Snapshots not yet played.
    pub fn remaining(&self) -> usize {
        self.remaining.lock().len()
    }
}

impl SnapshotProvider for ReplayProvider {
    fn take_snapshot(&self) -> Option<Snapshot> {
        let snapshot = self.remaining.lock().pop_front()?;
        *self.last_update.lock() = Some(Utc::now());
        Some(snapshot)
    }

    fn last_update(&self) -> Option<DateTime<Utc>> {
        *self.last_update.lock()
    }

    fn is_finished(&self) -> bool {
        self.remaining.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{BeaconLightSwitch, DoorState};
    use std::io::Write;

    const TRACE: &str = r#"
# gate
{"front_left_door": "open"}

{"front_left_door": "closed", "ground_speed_kt": 0.0}
   # pushback
{"beacon_light": "on", "engines_running": [true, false]}
"#;

    #[test]
    fn test_parses_lines_and_skips_comments() {
        let provider = ReplayProvider::from_reader(TRACE.as_bytes()).unwrap();
        assert_eq!(provider.remaining(), 3);

        let first = provider.take_snapshot().unwrap();
        assert_eq!(first.front_left_door(), DoorState::Open);
        assert_eq!(first.beacon_light(), BeaconLightSwitch::Off);

        provider.take_snapshot().unwrap();
        let third = provider.take_snapshot().unwrap();
        assert_eq!(third.beacon_light(), BeaconLightSwitch::On);
        assert!(third.any_engine_running());
    }

    #[test]
    fn test_exhausted_trace_yields_none() {
        let provider = ReplayProvider::from_snapshots(vec![Snapshot::default()]);
        assert!(!provider.is_finished());
        assert!(provider.last_update().is_none());

        assert!(provider.take_snapshot().is_some());
        assert!(provider.last_update().is_some());
        assert!(provider.is_finished());
        assert!(provider.take_snapshot().is_none());
    }

    #[test]
    fn test_invalid_line_reports_line_number() {
        let trace = "{\"agl_ft\": 0.0}\n\n{\"front_left_door\": \"ajar\"}\n";
        let err = ReplayProvider::from_reader(trace.as_bytes()).unwrap_err();

        match err {
            ReplayError::Json { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_open_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{\"agl_ft\": 3500.0, \"vertical_speed_fpm\": 1800.0}}").unwrap();

        let provider = ReplayProvider::open(file.path()).unwrap();
        let snapshot = provider.take_snapshot().unwrap();
        assert!(snapshot.is_airborne());
        assert_eq!(snapshot.vertical_speed_fpm(), 1800.0);
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReplayProvider::open(dir.path().join("missing.jsonl")).unwrap_err();
        assert!(matches!(err, ReplayError::Io(_)));
    }
}
