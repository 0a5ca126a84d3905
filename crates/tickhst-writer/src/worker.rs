//! Background writer that owns the history file.

use std::io::{self, Write};
use tickhst_aggregate::Bar;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, trace};

use crate::header::HEADER_SIZE;
use crate::record::RECORD_SIZE;
use crate::{BarRecord, Header, HstError};

/// Lifecycle of the background writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerState {
    /// Opening the destination.
    Starting,
    /// The header is on disk; bars have not been drained yet.
    HeaderWritten,
    /// Writing queued bars.
    Draining,
    /// The queue was drained and the file closed.
    Closed,
    /// A fatal error stopped the writer; no more bars will be written.
    Failed(String),
}

impl WorkerState {
    /// Returns true once the writer has stopped, successfully or not.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Failed(_))
    }

    /// Returns the state as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Starting => "starting",
            Self::HeaderWritten => "header-written",
            Self::Draining => "draining",
            Self::Closed => "closed",
            Self::Failed(_) => "failed",
        }
    }
}

impl std::fmt::Display for WorkerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Failed(reason) => write!(f, "failed: {reason}"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// Counters reported when the writer closes the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteSummary {
    /// Bars written to the file.
    pub bars_written: u64,
    /// Bars dropped because they could not be encoded or written.
    pub bars_skipped: u64,
    /// Total bytes written, header included.
    pub bytes_written: u64,
}

/// The consumer side of a conversion.
///
/// Runs on a blocking thread: opens the sink, writes the header, then writes
/// every bar it receives until the queue is closed and empty.
pub(crate) struct Worker<F> {
    pub(crate) destination: String,
    pub(crate) header: Header,
    pub(crate) spread: u32,
    pub(crate) open: F,
    pub(crate) bars: mpsc::Receiver<Bar>,
    pub(crate) state: watch::Sender<WorkerState>,
}

impl<F, W> Worker<F>
where
    F: FnOnce() -> io::Result<W>,
    W: Write,
{
    pub(crate) fn run(self) -> Result<WriteSummary, HstError> {
        let Self {
            destination,
            header,
            spread,
            open,
            mut bars,
            state,
        } = self;

        let mut sink = match open() {
            Ok(sink) => sink,
            Err(source) => {
                error!(destination = %destination, error = %source, "failed to open history file");
                let err = HstError::FileOpen {
                    destination,
                    source,
                };
                return Err(fail(&state, &mut bars, err));
            }
        };

        let bytes = match header.encode() {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(symbol = header.symbol(), error = %e, "failed to encode header");
                return Err(fail(&state, &mut bars, HstError::HeaderEncode(e)));
            }
        };
        if let Err(e) = sink.write_all(&bytes) {
            error!(destination = %destination, error = %e, "failed to write header");
            return Err(fail(&state, &mut bars, HstError::HeaderWrite(e)));
        }
        state.send_replace(WorkerState::HeaderWritten);

        let mut summary = WriteSummary {
            bytes_written: HEADER_SIZE as u64,
            ..WriteSummary::default()
        };

        state.send_replace(WorkerState::Draining);
        while let Some(bar) = bars.blocking_recv() {
            let encoded = BarRecord::from_bar(&bar, spread).encode();
            let written = match encoded {
                Ok(bytes) => sink.write_all(&bytes).map_err(|e| {
                    error!(time = bar.time, error = %e, "failed to write bar, skipping");
                }),
                Err(e) => {
                    error!(time = bar.time, error = %e, "failed to encode bar, skipping");
                    Err(())
                }
            };

            if written.is_ok() {
                trace!(time = bar.time, "bar written");
                summary.bars_written += 1;
                summary.bytes_written += RECORD_SIZE as u64;
            } else {
                summary.bars_skipped += 1;
            }
        }

        if let Err(e) = sink.flush() {
            error!(destination = %destination, error = %e, "failed to flush history file");
            return Err(fail(&state, &mut bars, HstError::Flush(e)));
        }
        drop(sink);

        state.send_replace(WorkerState::Closed);
        debug!(
            destination = %destination,
            bars = summary.bars_written,
            skipped = summary.bars_skipped,
            "saved history file"
        );
        Ok(summary)
    }
}

/// Publishes the fatal error, then closes the queue so blocked producers wake up.
fn fail(
    state: &watch::Sender<WorkerState>,
    bars: &mut mpsc::Receiver<Bar>,
    err: HstError,
) -> HstError {
    state.send_replace(WorkerState::Failed(err.to_string()));
    bars.close();
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_worker<F, W>(open: F, bars: Vec<Bar>) -> (Result<WriteSummary, HstError>, WorkerState)
    where
        F: FnOnce() -> io::Result<W>,
        W: Write,
    {
        let (tx, rx) = mpsc::channel(bars.len().max(1));
        for bar in bars {
            tx.try_send(bar).unwrap();
        }
        drop(tx);

        let (state_tx, state_rx) = watch::channel(WorkerState::Starting);
        let worker = Worker {
            destination: "test".to_string(),
            header: Header::new(1, "EURUSD").with_timesign(0),
            spread: 2,
            open,
            bars: rx,
            state: state_tx,
        };
        let result = worker.run();
        let state = state_rx.borrow().clone();
        (result, state)
    }

    fn bar(time: i64) -> Bar {
        Bar::new(time, 1.1, 1.2, 1.0, 1.15, 10, 4)
    }

    #[test]
    fn test_writes_header_then_bars() {
        let mut out = Vec::new();
        let (result, state) = spawn_worker(|| Ok(&mut out), vec![bar(0), bar(60)]);

        let summary = result.unwrap();
        assert_eq!(state, WorkerState::Closed);
        assert_eq!(summary.bars_written, 2);
        assert_eq!(summary.bytes_written, (HEADER_SIZE + 2 * RECORD_SIZE) as u64);
        assert_eq!(out.len(), HEADER_SIZE + 2 * RECORD_SIZE);

        let second = BarRecord::decode(&out[HEADER_SIZE + RECORD_SIZE..]).unwrap();
        assert_eq!(second.time, 60);
    }

    #[test]
    fn test_skips_unencodable_bar() {
        let mut out = Vec::new();
        let broken = Bar::new(30, 2.0, 1.2, 1.0, 1.1, 1, 1);
        let (result, _) = spawn_worker(|| Ok(&mut out), vec![bar(0), broken, bar(60)]);

        let summary = result.unwrap();
        assert_eq!(summary.bars_written, 2);
        assert_eq!(summary.bars_skipped, 1);
        assert_eq!(out.len(), HEADER_SIZE + 2 * RECORD_SIZE);
    }

    #[test]
    fn test_open_failure_is_fatal() {
        let (result, state) = spawn_worker(
            || Err::<Vec<u8>, _>(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
            vec![bar(0)],
        );

        assert!(matches!(result, Err(HstError::FileOpen { .. })));
        assert!(matches!(state, WorkerState::Failed(reason) if reason.contains("denied")));
    }

    #[test]
    fn test_state_display() {
        assert_eq!(WorkerState::Draining.to_string(), "draining");
        assert_eq!(
            WorkerState::Failed("disk full".to_string()).to_string(),
            "failed: disk full"
        );
        assert!(WorkerState::Closed.is_terminal());
        assert!(!WorkerState::HeaderWritten.is_terminal());
    }
}
