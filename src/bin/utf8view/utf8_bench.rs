//! UTF-8 operation benchmarking module.
//!
//! Times validation, character counting and lossy repair over files produced
//! by `utf8view generate`, laid out as `<data_dir>/<pattern>/<size>.txt`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use utf8view::{Utf8Str, Utf8String};

/// Benchmark result for a single file and operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub file: String,
    pub pattern: String,
    pub size: String,
    pub operation: String,
    pub filesize: u64,
    pub valid: bool,
    pub wall_time_ms: f64,
    pub throughput_mib_s: f64,
}

/// Configuration for the benchmark
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub data_dir: PathBuf,
    pub patterns: Vec<String>,
    pub sizes: Vec<String>,
    pub warmup_runs: usize,
    pub benchmark_runs: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/bench/generated/utf8"),
            patterns: vec![
                "ascii".into(),
                "latin".into(),
                "cyrillic".into(),
                "cjk".into(),
                "emoji".into(),
                "mixed".into(),
                "all_lengths".into(),
                "pathological".into(),
            ],
            sizes: vec![
                "1kb".into(),
                "10kb".into(),
                "100kb".into(),
                "1mb".into(),
                "10mb".into(),
            ],
            warmup_runs: 1,
            benchmark_runs: 3,
        }
    }
}

/// Operations timed for every file.
#[derive(Debug, Clone, Copy)]
enum Operation {
    Validate,
    CharCount,
    Repair,
}

impl Operation {
    const ALL: [Operation; 3] = [Operation::Validate, Operation::CharCount, Operation::Repair];

    fn name(self) -> &'static str {
        match self {
            Operation::Validate => "validate",
            Operation::CharCount => "char_count",
            Operation::Repair => "repair",
        }
    }

    /// Run once, reporting whether the input was valid.
    fn run(self, data: &[u8]) -> bool {
        match self {
            Operation::Validate => utf8view::validate_utf8(data).is_ok(),
            Operation::CharCount => Utf8Str::new(data).map(|v| v.char_count()).is_ok(),
            Operation::Repair => {
                Utf8String::from_utf8_lossy(data).is_ok_and(|s| s.byte_len() == data.len())
            }
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

    eprintln!("Running UTF-8 benchmark suite...");
    eprintln!("  Data directory: {}", config.data_dir.display());
    eprintln!("  Warmup runs: {}", config.warmup_runs);
    eprintln!("  Benchmark runs: {}", config.benchmark_runs);
    eprintln!();

    let mut jsonl_file = output_jsonl
        .map(|p| {
            std::fs::File::create(p).with_context(|| format!("Failed to create {}", p.display()))
        })
        .transpose()?;

    'outer: for pattern in &config.patterns {
        for size in &config.sizes {
            let file_path = config.data_dir.join(pattern).join(format!("{}.txt", size));

            if !file_path.exists() {
                eprintln!("  Skipping {} (not found)", file_path.display());
                continue;
            }

            let data = std::fs::read(&file_path)
                .with_context(|| format!("Failed to read {}", file_path.display()))?;

            for operation in Operation::ALL {
                if interrupted.load(Ordering::SeqCst) {
                    break 'outer;
                }

                eprint!(
                    "  {} {} {} ({})... ",
                    pattern,
                    size,
                    operation.name(),
                    format_bytes(data.len())
                );
                std::io::stderr().flush()?;

                let result = benchmark_data(&data, operation, pattern, size, &file_path, config);
                eprintln!(
                    "{:.3}ms ({:.1} MiB/s){}",
                    result.wall_time_ms,
                    result.throughput_mib_s,
                    if result.valid { "" } else { " [INVALID]" }
                );

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
        write_markdown_summary(&results, md_path)?;
    }

    eprintln!();
    eprintln!("Completed {} benchmarks", results.len());

    Ok(results)
}

/// Time one operation over loaded data, reporting the median run.
fn benchmark_data(
    data: &[u8],
    operation: Operation,
    pattern: &str,
    size: &str,
    file_path: &Path,
    config: &BenchConfig,
) -> BenchmarkResult {
    for _ in 0..config.warmup_runs {
        let _ = operation.run(data);
    }

    let runs = config.benchmark_runs.max(1);
    let mut times = Vec::with_capacity(runs);
    let mut valid = false;
    for _ in 0..runs {
        let start = Instant::now();
        valid = operation.run(data);
        times.push(start.elapsed().as_secs_f64() * 1000.0);
    }
    times.sort_by(|a, b| a.total_cmp(b));
    let median = times[times.len() / 2];

    let throughput = if median > 0.0 {
        (data.len() as f64 / (1024.0 * 1024.0)) / (median / 1000.0)
    } else {
        0.0
    };

    BenchmarkResult {
        file: file_path.display().to_string(),
        pattern: pattern.to_string(),
        size: size.to_string(),
        operation: operation.name().to_string(),
        filesize: data.len() as u64,
        valid,
        wall_time_ms: median,
        throughput_mib_s: throughput,
    }
}

/// Write markdown summary
fn write_markdown_summary(results: &[BenchmarkResult], path: &Path) -> Result<()> {
    std::fs::write(path, render_markdown(results))
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn render_markdown(results: &[BenchmarkResult]) -> String {
    let mut md = String::new();

    md.push_str("# UTF-8 Benchmark Results\n\n");

    let mut patterns: Vec<&str> = results.iter().map(|r| r.pattern.as_str()).collect();
    patterns.sort();
    patterns.dedup();

    for pattern in patterns {
        md.push_str(&format!("## {}\n\n", pattern));
        md.push_str("| Size | Operation | Time (ms) | Throughput (MiB/s) |\n");
        md.push_str("|------|-----------|-----------|--------------------|\n");

        for result in results.iter().filter(|r| r.pattern == pattern) {
            md.push_str(&format!(
                "| {} | {} | {:.3} | {:.1} |\n",
                result.size, result.operation, result.wall_time_ms, result.throughput_mib_s
            ));
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
