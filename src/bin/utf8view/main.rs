//! utf8view CLI tool for validating, repairing and inspecting UTF-8 text.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

mod text_generators;
mod text_inspect;
mod text_repair;
mod text_validate;
mod utf8_bench;

use text_generators::{corrupt_utf8, generate_utf8, Utf8Pattern};
use text_validate::exit_codes;

#[derive(Debug, Parser)]
#[command(name = "utf8view")]
#[command(about = "UTF-8 validation, repair and inspection toolkit", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate files for UTF-8 compliance
    Validate(text_validate::ValidateArgs),
    /// Replace invalid sequences with U+FFFD
    Repair(text_repair::RepairArgs),
    /// List the characters of a valid UTF-8 input
    Inspect(text_inspect::InspectArgs),
    /// Count bytes and characters
    Count(text_inspect::CountArgs),
    /// Generate synthetic UTF-8 text for benchmarking and testing
    Generate(GenerateArgs),
    /// Run the validation benchmark over generated files
    Bench(BenchArgs),
}

/// Generate synthetic UTF-8 text for benchmarking and testing
#[derive(Debug, Parser)]
struct GenerateArgs {
    /// Size of text to generate (supports b, kb, mb, gb - case insensitive)
    /// Examples: 1024, 1kb, 512MB, 2Gb
    #[arg(value_parser = parse_size)]
    size: usize,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Text pattern to generate
    #[arg(short, long, default_value = "mixed")]
    pattern: PatternArg,

    /// Random seed for reproducible generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Fraction of characters to replace with malformed sequences (0.0-1.0)
    #[arg(long, default_value = "0.0")]
    invalid_density: f64,

    /// Verify that uncorrupted output validates
    #[arg(long)]
    verify: bool,
}

#[derive(Debug, Clone, ValueEnum)]
enum PatternArg {
    /// Pure ASCII prose
    Ascii,
    /// Latin text with accents (2-byte sequences)
    Latin,
    /// Cyrillic text (2-byte sequences)
    Cyrillic,
    /// Japanese and Chinese text (3-byte sequences)
    Cjk,
    /// Emoji (4-byte sequences)
    Emoji,
    /// Realistic prose with occasional non-ASCII (default)
    Mixed,
    /// Uniform mix of 1-4 byte sequences
    AllLengths,
    /// Maximum multi-byte density
    Pathological,
}

impl From<PatternArg> for Utf8Pattern {
    fn from(arg: PatternArg) -> Self {
        match arg {
            PatternArg::Ascii => Utf8Pattern::Ascii,
            PatternArg::Latin => Utf8Pattern::Latin,
            PatternArg::Cyrillic => Utf8Pattern::Cyrillic,
            PatternArg::Cjk => Utf8Pattern::Cjk,
            PatternArg::Emoji => Utf8Pattern::Emoji,
            PatternArg::Mixed => Utf8Pattern::Mixed,
            PatternArg::AllLengths => Utf8Pattern::AllLengths,
            PatternArg::Pathological => Utf8Pattern::Pathological,
        }
    }
}

/// Run the validation benchmark over generated files
#[derive(Debug, Parser)]
struct BenchArgs {
    /// Directory with generated files laid out as `<pattern>/<size>.txt`
    #[arg(long, default_value = "data/bench/generated/utf8")]
    data_dir: PathBuf,

    /// Write one JSON result per line to this file
    #[arg(long)]
    jsonl: Option<PathBuf>,

    /// Write a markdown summary to this file
    #[arg(long)]
    markdown: Option<PathBuf>,

    /// Timed runs per file (the median is reported)
    #[arg(long, default_value = "3")]
    runs: usize,

    /// Untimed warmup runs per file
    #[arg(long, default_value = "1")]
    warmup: usize,
}

/// Parse size string like "1mb", "512KB", "2GB", "1024" (case insensitive)
fn parse_size(s: &str) -> Result<usize, String> {
    let s = s.trim().to_lowercase();

    if let Ok(bytes) = s.parse::<usize>() {
        return Ok(bytes);
    }

    let (num_str, unit) = if s.ends_with("gb") {
        (s.trim_end_matches("gb"), 1024 * 1024 * 1024)
    } else if s.ends_with("mb") {
        (s.trim_end_matches("mb"), 1024 * 1024)
    } else if s.ends_with("kb") {
        (s.trim_end_matches("kb"), 1024)
    } else if s.ends_with('b') {
        (s.trim_end_matches('b'), 1)
    } else {
        return Err(format!(
            "Invalid size format: '{}'. Use format like '1mb', '512KB', or '1024'",
            s
        ));
    };

    num_str
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_mul(unit))
        .ok_or_else(|| format!("Invalid number in size: '{}'", s))
}

/// Read a whole file, or stdin when no path is given.
pub(crate) fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut input = Vec::new();
            io::stdin()
                .read_to_end(&mut input)
                .context("failed to read from stdin")?;
            Ok(input)
        }
    }
}

fn run_generate(args: GenerateArgs) -> Result<i32> {
    if !(0.0..=1.0).contains(&args.invalid_density) {
        anyhow::bail!(
            "invalid density must be between 0.0 and 1.0, got {}",
            args.invalid_density
        );
    }

    let mut text = generate_utf8(args.size, args.pattern.into(), args.seed);

    if args.verify {
        utf8view::validate_utf8(&text).context("Generated invalid UTF-8")?;
        eprintln!("✓ UTF-8 validated successfully");
    }

    if args.invalid_density > 0.0 {
        let replaced = corrupt_utf8(&mut text, args.invalid_density, args.seed);
        eprintln!("Inserted {} malformed sequences", replaced);
    }

    match args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(&path, &text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("✓ Wrote {} bytes to {}", text.len(), path.display());
        }
        None => {
            use std::io::Write;
            io::stdout().write_all(&text)?;
        }
    }

    Ok(exit_codes::SUCCESS)
}

fn run_bench(args: BenchArgs) -> Result<i32> {
    let config = utf8_bench::BenchConfig {
        data_dir: args.data_dir,
        warmup_runs: args.warmup,
        benchmark_runs: args.runs.max(1),
        ..Default::default()
    };

    utf8_bench::run_benchmark(&config, args.jsonl.as_deref(), args.markdown.as_deref())?;
    Ok(exit_codes::SUCCESS)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let code = match cli.command {
        Command::Validate(args) => text_validate::run(args)?,
        Command::Repair(args) => text_repair::run(args)?,
        Command::Inspect(args) => text_inspect::run_inspect(args)?,
        Command::Count(args) => text_inspect::run_count(args)?,
        Command::Generate(args) => run_generate(args)?,
        Command::Bench(args) => run_bench(args)?,
    };

    if code != exit_codes::SUCCESS {
        std::process::exit(code);
    }
    Ok(())
}
