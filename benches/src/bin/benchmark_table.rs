//! Benchmark runner that outputs a markdown table for the README.
//!
//! Run with: `cargo run --package tickhst-bench --bin benchmark_table --release`

use std::io::Write;
use tickhst_bench::{BenchmarkResult, format_bytes, format_duration, run_conversion, synthetic_ticks};
use tickhst_lib::Timeframe;

/// Number of iterations per benchmark for statistical significance.
const ITERATIONS: usize = 3;

/// One trading day of ticks at roughly one tick per second.
const TICKS: usize = 86_400;

#[tokio::main]
async fn main() {
    println!("tickhst Conversion Benchmark");
    println!("============================\n");

    let ticks = synthetic_ticks("EURUSD", 1_704_067_200, TICKS, 1_000);
    println!(
        "Running benchmarks on {} synthetic ticks ({} iterations each)...\n",
        ticks.len(),
        ITERATIONS
    );

    let mut results: Vec<(Timeframe, Vec<BenchmarkResult>)> = Vec::new();

    for &timeframe in Timeframe::all() {
        print!("Benchmarking {}... ", timeframe);
        let _ = std::io::stdout().flush();

        let mut runs = Vec::new();
        for i in 0..ITERATIONS {
            let temp_dir = match tempfile::TempDir::new() {
                Ok(dir) => dir,
                Err(e) => {
                    eprintln!("Error: cannot create temp dir: {e}");
                    std::process::exit(1);
                }
            };
            match run_conversion(&ticks, timeframe, temp_dir.path()).await {
                Ok(result) => runs.push(result),
                Err(e) => eprintln!("\nRun {} failed: {e}", i + 1),
            }
            print!("R{} ", i + 1);
            let _ = std::io::stdout().flush();
        }

        results.push((timeframe, runs));
        println!("done");
    }

    println!("\n## Results\n");
    println!("| Timeframe | Bars | Output | Time | Ticks/s | Throughput |");
    println!("|-----------|------|--------|------|---------|------------|");

    for (timeframe, runs) in &results {
        let Some(avg) = average_results(runs) else {
            println!("| {} | N/A | N/A | N/A | N/A | N/A |", timeframe);
            continue;
        };

        println!(
            "| {} | {} | {} | {} | {:.0}k | {:.1} MB/s |",
            timeframe,
            avg.bars,
            format_bytes(avg.output_size),
            format_duration(avg.duration),
            avg.ticks_per_sec() / 1000.0,
            avg.throughput_mbps()
        );
    }
}

/// Average the durations of successful runs.
fn average_results(results: &[BenchmarkResult]) -> Option<BenchmarkResult> {
    let first = results.first()?;
    let total: std::time::Duration = results.iter().map(|r| r.duration).sum();

    Some(BenchmarkResult {
        duration: total / results.len() as u32,
        ..first.clone()
    })
}
