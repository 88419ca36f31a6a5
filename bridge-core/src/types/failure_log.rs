//! Sink for per-strategy failures caught by a strategy set.

use std::fmt;

use tracing::error;

/// Which half of the strategy lifecycle failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Teardown,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Setup => f.write_str("setup"),
            Phase::Teardown => f.write_str("teardown"),
        }
    }
}

/// Receives every failure a strategy set swallows. Fire-and-forget: the set does not look at
/// what the sink does.
pub trait FailureLog: Send + Sync {
    fn strategy_failed(&self, strategy: &str, phase: Phase, place_url: &str, error: &anyhow::Error);
}

/// Default sink: one `tracing` error event per failure plus one per cause in the chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFailureLog;

impl FailureLog for TracingFailureLog {
    fn strategy_failed(&self, strategy: &str, phase: Phase, place_url: &str, error: &anyhow::Error) {
        error!(
            strategy = %strategy,
            phase = %phase,
            place_url = %place_url,
            error = %error,
            "Strategy failed, continuing with next strategy"
        );
        for (i, cause) in error.chain().enumerate() {
            if i > 0 {
                error!(cause = %cause, "Caused by");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Setup.to_string(), "setup");
        assert_eq!(Phase::Teardown.to_string(), "teardown");
    }

    #[test]
    fn test_tracing_failure_log_logs_error_and_causes() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let err = anyhow::anyhow!("connection refused").context("create webhook");
        tracing::subscriber::with_default(subscriber, || {
            TracingFailureLog.strategy_failed("IssueStrategy", Phase::Setup, "/places/1", &err);
        });

        let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2, "output: {}", output);
        assert!(lines[0].contains("Strategy failed, continuing with next strategy"));
        assert!(lines[0].contains("strategy=IssueStrategy"));
        assert!(lines[0].contains("phase=setup"));
        assert!(lines[0].contains("place_url=/places/1"));
        assert!(lines[0].contains("error=create webhook"));
        assert!(lines[1].contains("Caused by"));
        assert!(lines[1].contains("cause=connection refused"));
    }
}
