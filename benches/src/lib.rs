//! Benchmark utilities for tickhst.

use std::path::Path;
use std::time::{Duration, Instant};
use tickhst_lib::{ConverterConfig, HstConverter, HstError, Tick, TickBucketer, Timeframe};

/// Result of a single conversion run.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    /// Timeframe the ticks were converted to.
    pub timeframe: Timeframe,
    /// Number of input ticks.
    pub ticks: u64,
    /// Number of bars written.
    pub bars: u64,
    /// Size of the output file in bytes.
    pub output_size: u64,
    /// Wall-clock duration of the conversion.
    pub duration: Duration,
}

impl BenchmarkResult {
    /// Calculate throughput in MB/s of written output.
    pub fn throughput_mbps(&self) -> f64 {
        let bytes = self.output_size as f64;
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            (bytes / 1_000_000.0) / secs
        } else {
            0.0
        }
    }

    /// Calculate ticks processed per second.
    pub fn ticks_per_sec(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 { self.ticks as f64 / secs } else { 0.0 }
    }
}

/// Generates `count` ticks starting at `start_secs`, `interval_millis` apart.
///
/// Prices follow a deterministic wave around 1.1 so runs are comparable.
pub fn synthetic_ticks(symbol: &str, start_secs: i64, count: usize, interval_millis: i64) -> Vec<Tick> {
    (0..count)
        .filter_map(|i| {
            let step = i as f64;
            let bid = 1.1 + 0.002 * (step * 0.01).sin() + 0.0003 * (step * 0.37).cos();
            let ask = bid + 0.00015;
            let volume = 0.5 + (i % 7) as f64 * 0.25;
            let millis = start_secs * 1000 + i as i64 * interval_millis;
            Tick::from_millis(symbol, millis, ask, bid, volume, volume / 2.0)
        })
        .collect()
}

/// Converts `ticks` into a history file in `dir` and measures the run.
///
/// # Errors
///
/// Returns the converter's error if the file could not be written.
pub async fn run_conversion(
    ticks: &[Tick],
    timeframe: Timeframe,
    dir: &Path,
) -> Result<BenchmarkResult, HstError> {
    let start = Instant::now();

    let config = ConverterConfig::new(timeframe.minutes(), 2, "BENCH", dir);
    let converter = HstConverter::create(config)?;
    let mut bucketer = TickBucketer::new(timeframe.minutes());
    for tick in ticks {
        if let Some(batch) = bucketer.push(tick.clone()) {
            converter.pack_ticks(batch.bucket_start, &batch.ticks).await?;
        }
    }
    if let Some(batch) = bucketer.finish() {
        converter.pack_ticks(batch.bucket_start, &batch.ticks).await?;
    }
    let summary = converter.finish().await?;

    Ok(BenchmarkResult {
        timeframe,
        ticks: ticks.len() as u64,
        bars: summary.bars_written,
        output_size: summary.bytes_written,
        duration: start.elapsed(),
    })
}

/// Format bytes as human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    if bytes >= 1_000_000_000 {
        format!("{:.2} GB", bytes as f64 / 1_000_000_000.0)
    } else if bytes >= 1_000_000 {
        format!("{:.2} MB", bytes as f64 / 1_000_000.0)
    } else if bytes >= 1_000 {
        format!("{:.2} KB", bytes as f64 / 1_000.0)
    } else {
        format!("{} B", bytes)
    }
}

/// Format duration as human-readable string.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs >= 60.0 {
        format!("{:.1}m", secs / 60.0)
    } else if secs >= 1.0 {
        format!("{:.2}s", secs)
    } else {
        format!("{:.0}ms", secs * 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickhst_lib::{HEADER_SIZE, RECORD_SIZE};

    #[test]
    fn test_synthetic_ticks() {
        let ticks = synthetic_ticks("EURUSD", 1_704_067_200, 100, 500);
        assert_eq!(ticks.len(), 100);
        assert_eq!(ticks[1].timestamp_millis() - ticks[0].timestamp_millis(), 500);
        assert!(ticks.iter().all(|t| t.ask > t.bid));
    }

    #[tokio::test]
    async fn test_run_conversion() {
        let dir = tempfile::tempdir().unwrap();
        // 600 ticks half a second apart span five minutes.
        let ticks = synthetic_ticks("EURUSD", 1_704_067_200, 600, 500);

        let result = run_conversion(&ticks, Timeframe::Minute1, dir.path())
            .await
            .unwrap();
        assert_eq!(result.bars, 5);
        assert_eq!(result.output_size, (HEADER_SIZE + 5 * RECORD_SIZE) as u64);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1_500), "1.50 KB");
        assert_eq!(format_bytes(2_500_000), "2.50 MB");
    }
}
