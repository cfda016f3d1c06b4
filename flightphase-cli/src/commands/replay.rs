//! Replay command - run a recorded telemetry trace through the phase tracker.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use flightphase::config::ConfigFile;
use flightphase::events::{ListenerError, PhaseChange, PhaseListener, RecordingListener};
use flightphase::manager::FlightStateManager;
use flightphase::replay::ReplayProvider;
use flightphase::service::FlightStateService;
use tokio_util::sync::CancellationToken;

use crate::error::CliError;

/// Arguments for the replay command.
pub struct ReplayArgs {
    pub file: PathBuf,
    pub interval_ms: Option<u64>,
}

/// Prints each phase change as it happens.
#[derive(Default)]
struct PrintListener {
    count: AtomicUsize,
}

impl PhaseListener for PrintListener {
    fn on_phase_change(&self, change: &PhaseChange) -> Result<(), ListenerError> {
        let n = self.count.fetch_add(1, Ordering::Relaxed) + 1;
        println!(
            "{:>3}. {:<16} -> {:<16} {}",
            n,
            change.from.name(),
            change.to.name(),
            change.to.description()
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "printer"
    }
}

/// Poll interval: the command line wins over the config file.
fn resolve_interval(cli_ms: Option<u64>, config: &ConfigFile) -> Result<Duration, CliError> {
    match cli_ms {
        Some(0) => Err(CliError::Config(
            "--interval-ms must be greater than zero".to_string(),
        )),
        Some(ms) => Ok(Duration::from_millis(ms)),
        None => Ok(config.service.poll_interval),
    }
}

/// Run the replay command.
pub fn run(args: ReplayArgs, config: &ConfigFile) -> Result<(), CliError> {
    let interval = resolve_interval(args.interval_ms, config)?;
    let provider = Arc::new(ReplayProvider::open(&args.file)?);
    let total = provider.remaining();

    let manager = Arc::new(FlightStateManager::new(config.classifier));
    let service = FlightStateService::new(provider, manager.clone(), config.service.event_capacity);

    let recorder = Arc::new(RecordingListener::new());
    service.add_listener(Arc::new(PrintListener::default()));
    service.add_listener(recorder.clone());

    println!("Replaying {} ({} snapshots)", args.file.display(), total);
    println!("Poll interval: {} ms", interval.as_millis());
    println!("Press Ctrl+C to stop");
    println!();

    let cancellation_token = CancellationToken::new();
    let handler_token = cancellation_token.clone();
    ctrlc::set_handler(move || {
        println!();
        println!("Received shutdown signal, stopping replay...");
        handler_token.cancel();
    })
    .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;

    runtime.block_on(service.run(interval, cancellation_token));

    let changes = recorder.changes();
    println!();
    println!("Summary");
    println!("=======");
    println!("  Phase changes:      {}", changes.len());
    println!("  Final phase:        {}", manager.current_phase());
    println!("  Taken off:          {}", manager.has_taken_off());
    println!("  Cruise reached:     {}", manager.has_reached_cruise_level());

    tracing::info!(
        changes = changes.len(),
        final_phase = %manager.current_phase(),
        "Replay finished"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_from_cli() {
        let config = ConfigFile::default();
        assert_eq!(
            resolve_interval(Some(5), &config).unwrap(),
            Duration::from_millis(5)
        );
    }

    #[test]
    fn test_interval_from_config() {
        let mut config = ConfigFile::default();
        config.service.poll_interval = Duration::from_millis(250);
        assert_eq!(
            resolve_interval(None, &config).unwrap(),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = resolve_interval(Some(0), &ConfigFile::default()).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_print_listener_counts() {
        let listener = PrintListener::default();
        let change = PhaseChange::new(
            flightphase::FlightPhase::Parked,
            flightphase::FlightPhase::Boarding,
        );
        listener.on_phase_change(&change).unwrap();
        listener.on_phase_change(&change).unwrap();
        assert_eq!(listener.count.load(Ordering::Relaxed), 2);
    }
}
