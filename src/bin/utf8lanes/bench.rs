//! UTF-8 validation benchmarking module.
//!
//! Generates a corpus per pattern and size in memory, then times every
//! backend the CPU supports plus `std::str::from_utf8` on it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
use utf8lanes::{Backend, Validator};

use crate::generators::{generate_utf8, Utf8Pattern};

/// Benchmark result for a single measurement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub pattern: String,
    pub size: usize,
    /// Backend name, or "std"
    pub validator: String,
    pub valid: bool,
    pub wall_time_ms: f64,
    pub throughput_mib_s: f64,
}

/// Configuration for the benchmark
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub patterns: Vec<Utf8Pattern>,
    pub sizes: Vec<usize>,
    pub warmup_runs: usize,
    pub benchmark_runs: usize,
    pub seed: u64,
}

/// A validator under test.
enum Candidate {
    Lanes(Validator),
    Std,
}

impl Candidate {
    fn all() -> Vec<Candidate> {
        Backend::ALL
            .iter()
            .filter_map(|&b| Validator::with_backend(b).ok())
            .map(Candidate::Lanes)
            .chain(std::iter::once(Candidate::Std))
            .collect()
    }

    fn name(&self) -> &'static str {
        match self {
            Candidate::Lanes(v) => v.backend().name(),
            Candidate::Std => "std",
        }
    }

    #[inline]
    fn run(&self, data: &[u8]) -> bool {
        match self {
            Candidate::Lanes(v) => v.validate(data),
            Candidate::Std => std::str::from_utf8(data).is_ok(),
        }
    }
}

/// Run the UTF-8 benchmark suite
pub fn run_benchmark(
    config: &BenchConfig,
    output_jsonl: Option<&Path>,
    output_md: Option<&Path>,
) -> Result<Vec<BenchmarkResult>> {
    let mut results = Vec::new();

    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = Arc::clone(&interrupted);
    ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::SeqCst);
        eprintln!("\nInterrupted! Writing partial results...");
    })
    .context("Failed to set Ctrl+C handler")?;

    let candidates = Candidate::all();
    eprintln!("Running UTF-8 validation benchmark suite...");
    eprintln!(
        "  Validators: {}",
        candidates.iter().map(Candidate::name).collect::<Vec<_>>().join(", ")
    );
    eprintln!("  Warmup runs: {}", config.warmup_runs);
    eprintln!("  Benchmark runs: {}", config.benchmark_runs);
    eprintln!();

    let mut jsonl_file = output_jsonl
        .map(|p| {
            std::fs::File::create(p).with_context(|| format!("Failed to create {}", p.display()))
        })
        .transpose()?;

    'outer: for &pattern in &config.patterns {
        for &size in &config.sizes {
            let data = generate_utf8(size, pattern, Some(config.seed));
            debug!(pattern = pattern.name(), bytes = data.len(), "generated corpus");

            for candidate in &candidates {
                if interrupted.load(Ordering::SeqCst) {
                    break 'outer;
                }

                eprint!(
                    "  {} {} [{}]... ",
                    pattern.name(),
                    format_bytes(size),
                    candidate.name()
                );
                std::io::stderr().flush()?;

                let result = measure(candidate, &data, pattern, config);
                eprintln!(
                    "{:.3}ms ({:.1} MiB/s){}",
                    result.wall_time_ms,
                    result.throughput_mib_s,
                    if result.valid { "" } else { " [INVALID]" }
                );
                if !result.valid {
                    warn!(
                        pattern = pattern.name(),
                        validator = candidate.name(),
                        "generated corpus rejected"
                    );
                }

                if let Some(ref mut f) = jsonl_file {
                    serde_json::to_writer(&mut *f, &result)?;
                    writeln!(f)?;
                    f.flush()?;
                }

                results.push(result);
            }
        }
    }

    if let Some(md_path) = output_md {
        std::fs::write(md_path, markdown_summary(&results))
            .with_context(|| format!("Failed to write {}", md_path.display()))?;
    }

    eprintln!();
    eprintln!("Completed {} measurements", results.len());

    Ok(results)
}

/// Time one candidate on one corpus, reporting the median run.
fn measure(
    candidate: &Candidate,
    data: &[u8],
    pattern: Utf8Pattern,
    config: &BenchConfig,
) -> BenchmarkResult {
    for _ in 0..config.warmup_runs {
        std::hint::black_box(candidate.run(std::hint::black_box(data)));
    }

    let mut times = Vec::with_capacity(config.benchmark_runs);
    let mut valid = false;
    for _ in 0..config.benchmark_runs {
        let start = Instant::now();
        valid = std::hint::black_box(candidate.run(std::hint::black_box(data)));
        times.push(start.elapsed().as_secs_f64() * 1000.0);
    }
    times.sort_by(f64::total_cmp);
    let median = times[times.len() / 2];

    BenchmarkResult {
        pattern: pattern.name().to_string(),
        size: data.len(),
        validator: candidate.name().to_string(),
        valid,
        wall_time_ms: median,
        throughput_mib_s: throughput_mib_s(data.len(), median),
    }
}

fn throughput_mib_s(bytes: usize, millis: f64) -> f64 {
    if millis <= 0.0 {
        return f64::INFINITY;
    }
    (bytes as f64 / (1024.0 * 1024.0)) / (millis / 1000.0)
}

/// Markdown tables, one per pattern, one column per validator.
fn markdown_summary(results: &[BenchmarkResult]) -> String {
    let mut md = String::new();

    md.push_str("# UTF-8 Validation Benchmark Results\n\n");
    md.push_str("Throughput in MiB/s (median of timed runs).\n\n");

    let mut validators: Vec<&str> = Vec::new();
    let mut patterns: Vec<&str> = Vec::new();
    for r in results {
        if !validators.contains(&r.validator.as_str()) {
            validators.push(&r.validator);
        }
        if !patterns.contains(&r.pattern.as_str()) {
            patterns.push(&r.pattern);
        }
    }

    for pattern in patterns {
        md.push_str(&format!("## {}\n\n", pattern));
        md.push_str("| Size |");
        for v in &validators {
            md.push_str(&format!(" {} |", v));
        }
        md.push_str("\n|------|");
        for _ in &validators {
            md.push_str("------|");
        }
        md.push('\n');

        let mut sizes: Vec<usize> = results
            .iter()
            .filter(|r| r.pattern == pattern)
            .map(|r| r.size)
            .collect();
        sizes.dedup();

        for size in sizes {
            md.push_str(&format!("| {} |", format_bytes(size)));
            for v in &validators {
                let cell = results
                    .iter()
                    .find(|r| r.pattern == pattern && r.size == size && r.validator == *v)
                    .map(|r| format!(" {:.1} |", r.throughput_mib_s))
                    .unwrap_or_else(|| " - |".to_string());
                md.push_str(&cell);
            }
            md.push('\n');
        }
        md.push('\n');
    }

    md
}

/// Format bytes as human-readable string
fn format_bytes(bytes: usize) -> String {
    if bytes >= 1024 * 1024 * 1024 {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    } else if bytes >= 1024 * 1024 {
        format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}
