//! Convert command implementation.
//!
//! Reads a tick CSV file, groups the ticks into timeframe buckets and streams
//! the resulting bars into an HST401 history file.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tickhst_lib::prelude::*;
use tracing::{info, warn};

/// Arguments of the convert command.
pub(crate) struct ConvertOptions {
    pub(crate) input: PathBuf,
    pub(crate) symbol: String,
    pub(crate) timeframe: Timeframe,
    pub(crate) spread: u32,
    pub(crate) digits: u32,
    pub(crate) output_dir: PathBuf,
    pub(crate) validate_order: bool,
    pub(crate) queue_capacity: usize,
}

/// Convert a tick CSV file into a history file.
pub(crate) async fn convert(options: ConvertOptions, quiet: bool) -> Result<()> {
    let minutes = options.timeframe.minutes();
    let config = ConverterConfig::new(
        minutes,
        options.spread,
        options.symbol.as_str(),
        &options.output_dir,
    )
    .with_digits(options.digits)
    .with_validate_order(options.validate_order)
    .with_queue_capacity(options.queue_capacity);
    // Opening the file truncates it, so a header the writer would reject fails here first.
    config
        .header()
        .encode()
        .with_context(|| format!("Invalid symbol '{}'", options.symbol))?;

    let file = tokio::fs::File::open(&options.input)
        .await
        .with_context(|| format!("Failed to open {}", options.input.display()))?;
    let ticks = read_ticks_csv(file, &options.symbol)
        .await
        .with_context(|| format!("Failed to read ticks from {}", options.input.display()))?;
    info!(ticks = ticks.len(), input = %options.input.display(), "loaded ticks");
    if ticks.is_empty() {
        warn!("input contains no ticks, the history file will only have a header");
    }

    let output = config.output_path();

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(ticks.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ticks ({percent}%) {msg}")?
                .progress_chars("=>-"),
        );
        pb.set_message(format!("{} {}", options.symbol, options.timeframe));
        pb
    };

    let converter = HstConverter::create(config)?;
    let packed = pack_all(&converter, ticks, minutes, &progress).await;

    // The writer's own error explains a failed pack better than `WorkerStopped`.
    let summary = converter
        .finish()
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;
    let batches = packed.context("Failed to convert ticks")?;

    progress.finish_with_message(format!("Wrote {} bars", summary.bars_written));

    if summary.bars_skipped > 0 {
        warn!(
            skipped = summary.bars_skipped,
            "some bars could not be written, see the log above"
        );
    }
    info!(
        batches,
        bars = summary.bars_written,
        bytes = summary.bytes_written,
        "conversion finished"
    );

    if !quiet {
        println!("Output written to: {}", output.display());
        println!(
            "{} bars written, {} skipped, {} bytes",
            summary.bars_written, summary.bars_skipped, summary.bytes_written
        );
    }

    Ok(())
}

/// Buckets the ticks and hands every batch to the converter.
async fn pack_all(
    converter: &HstConverter,
    ticks: Vec<Tick>,
    minutes: u32,
    progress: &ProgressBar,
) -> Result<u64, HstError> {
    let mut bucketer = TickBucketer::new(minutes);
    let mut batches = 0;

    for tick in ticks {
        if let Some(batch) = bucketer.push(tick) {
            pack(converter, &batch, progress).await?;
            batches += 1;
        }
    }
    if let Some(batch) = bucketer.finish() {
        pack(converter, &batch, progress).await?;
        batches += 1;
    }

    Ok(batches)
}

async fn pack(
    converter: &HstConverter,
    batch: &TickBatch,
    progress: &ProgressBar,
) -> Result<(), HstError> {
    converter
        .pack_ticks(batch.bucket_start, &batch.ticks)
        .await?;
    progress.inc(batch.len() as u64);
    Ok(())
}
