//! Converter handle: aggregates tick batches and feeds the background writer.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tickhst_aggregate::{Bar, aggregate, aggregate_checked};
use tickhst_types::Tick;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{Dispatch, debug, dispatcher, info_span, warn};

use crate::worker::Worker;
use crate::{ConverterConfig, HstError, WorkerState, WriteSummary};

/// Converts tick batches into bars and streams them into an HST401 file.
///
/// The file is written by a background task on Tokio's blocking pool. The
/// handle only aggregates and enqueues; [`HstConverter::finish`] waits for
/// the queue to drain and the file to close.
///
/// # Example
///
/// ```no_run
/// use tickhst_writer::{ConverterConfig, HstConverter};
///
/// # async fn run(ticks: Vec<tickhst_types::Tick>) -> Result<(), tickhst_writer::HstError> {
/// let converter = HstConverter::create(ConverterConfig::new(60, 2, "EURUSD", "out"))?;
/// converter.pack_ticks(1_704_067_200, &ticks).await?;
/// let summary = converter.finish().await?;
/// println!("{} bars written", summary.bars_written);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HstConverter {
    bars: mpsc::Sender<Bar>,
    state: watch::Receiver<WorkerState>,
    worker: JoinHandle<Result<WriteSummary, HstError>>,
    validate_order: bool,
    path: Option<PathBuf>,
    dispatch: Dispatch,
}

impl HstConverter {
    /// Starts a conversion into `<destination>/<symbol><timeframe>.hst`.
    ///
    /// Returns as soon as the writer is spawned. Opening the file and writing
    /// the header happen in the background; failures there surface through
    /// [`state`](Self::state), [`pack_ticks`](Self::pack_ticks) and
    /// [`finish`](Self::finish).
    ///
    /// # Errors
    ///
    /// Returns [`HstError::NoRuntime`] when called outside a Tokio runtime.
    pub fn create(config: ConverterConfig) -> Result<Self, HstError> {
        let path = config.output_path();
        let file_path = path.clone();
        let mut converter = Self::spawn(config, path.display().to_string(), move || {
            OpenOptions::new()
                .create(true)
                .truncate(true)
                .read(true)
                .write(true)
                .open(&file_path)
        })?;
        converter.path = Some(path);
        Ok(converter)
    }

    /// Starts a conversion into a sink produced by `open`.
    ///
    /// `open` runs on the writer thread; an error from it is treated like a
    /// failure to open the history file.
    ///
    /// # Errors
    ///
    /// Returns [`HstError::NoRuntime`] when called outside a Tokio runtime.
    pub fn with_sink<F, W>(config: ConverterConfig, open: F) -> Result<Self, HstError>
    where
        F: FnOnce() -> io::Result<W> + Send + 'static,
        W: Write,
    {
        Self::spawn(config, "sink".to_string(), open)
    }

    fn spawn<F, W>(config: ConverterConfig, destination: String, open: F) -> Result<Self, HstError>
    where
        F: FnOnce() -> io::Result<W> + Send + 'static,
        W: Write,
    {
        let runtime = Handle::try_current().map_err(|_| HstError::NoRuntime)?;

        let (bars_tx, bars_rx) = mpsc::channel(config.queue_capacity);
        let (state_tx, state_rx) = watch::channel(WorkerState::Starting);

        let dispatch = config.dispatch.clone();
        let span = dispatcher::with_default(&dispatch, || {
            let span = info_span!(
                "hst_writer",
                symbol = %config.symbol,
                timeframe = config.timeframe
            );
            span.in_scope(|| {
                debug!(
                    destination = %destination,
                    capacity = config.queue_capacity,
                    "starting history writer"
                );
            });
            span
        });

        let worker = Worker {
            destination,
            header: config.header(),
            spread: config.spread,
            open,
            bars: bars_rx,
            state: state_tx,
        };
        let worker_dispatch = dispatch.clone();
        let handle = runtime.spawn_blocking(move || {
            dispatcher::with_default(&worker_dispatch, || span.in_scope(|| worker.run()))
        });

        Ok(Self {
            bars: bars_tx,
            state: state_rx,
            worker: handle,
            validate_order: config.validate_order,
            path: None,
            dispatch,
        })
    }

    /// Aggregates one bucket of ticks and queues the resulting bar.
    ///
    /// An empty batch produces no bar and returns immediately. When the queue
    /// is full this waits until the writer makes room.
    ///
    /// # Errors
    ///
    /// Returns [`HstError::WorkerStopped`] once the writer has failed, and
    /// [`HstError::Ordering`] when order validation is enabled and the
    /// timestamps go backwards.
    pub async fn pack_ticks(&self, bucket_start: i64, ticks: &[Tick]) -> Result<(), HstError> {
        let bar = if self.validate_order {
            aggregate_checked(bucket_start, ticks).map_err(|e| {
                dispatcher::with_default(&self.dispatch, || {
                    warn!(bucket_start, error = %e, "rejected tick batch");
                });
                HstError::from(e)
            })?
        } else {
            aggregate(bucket_start, ticks)
        };

        let Some(bar) = bar else {
            return Ok(());
        };

        self.ensure_running()?;
        self.bars.send(bar).await.map_err(|_| self.stopped())
    }

    /// Closes the queue and waits for the writer to drain it and close the file.
    ///
    /// # Errors
    ///
    /// Returns the error that stopped the writer, or
    /// [`HstError::WorkerPanicked`] if the writer task did not complete.
    pub async fn finish(self) -> Result<WriteSummary, HstError> {
        let Self { bars, worker, .. } = self;
        drop(bars);

        match worker.await {
            Ok(result) => result,
            Err(e) => Err(HstError::WorkerPanicked(e.to_string())),
        }
    }

    /// Returns the writer's current state.
    #[must_use]
    pub fn state(&self) -> WorkerState {
        self.state.borrow().clone()
    }

    /// Returns a receiver that observes every state change of the writer.
    #[must_use]
    pub fn subscribe_state(&self) -> watch::Receiver<WorkerState> {
        self.state.clone()
    }

    /// Returns the history file path, or `None` for a custom sink.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn ensure_running(&self) -> Result<(), HstError> {
        if self.state.borrow().is_terminal() {
            return Err(self.stopped());
        }
        Ok(())
    }

    fn stopped(&self) -> HstError {
        HstError::WorkerStopped {
            reason: self.state.borrow().to_string(),
        }
    }
}
