//! CLI handlers for the `inspect` and `count` commands.

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use utf8view::{Utf8Char, Utf8Config, Utf8Str};

use crate::read_input;
use crate::text_validate::{exit_codes, render_error, ColorScheme};

/// List the characters of a UTF-8 input.
#[derive(Debug, Parser)]
pub struct InspectArgs {
    /// Input file (reads from stdin if omitted)
    pub input: Option<PathBuf>,

    /// Emit one JSON object per character
    #[arg(long)]
    pub json: bool,

    /// Byte offset where the inspected range starts
    #[arg(long)]
    pub start: Option<usize>,

    /// Byte length of the inspected range (clamped to the input)
    #[arg(long)]
    pub len: Option<usize>,

    /// Show only the character at this index
    #[arg(long)]
    pub nth: Option<usize>,

    /// Also reject code points above U+10FFFF
    #[arg(long)]
    pub strict: bool,
}

/// Count bytes and characters.
#[derive(Debug, Parser)]
pub struct CountArgs {
    /// Input files (reads from stdin if none provided)
    #[arg(trailing_var_arg = true)]
    pub files: Vec<PathBuf>,

    /// Also reject code points above U+10FFFF
    #[arg(long)]
    pub strict: bool,
}

/// One line of `inspect` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharRecord {
    /// Index of the character within the inspected range.
    pub index: usize,
    /// Byte offset from the start of the input.
    pub offset: usize,
    /// Encoded length in bytes.
    pub len: usize,
    /// Decoded scalar value.
    pub code_point: u32,
    /// Encoded bytes as space-separated hex.
    pub bytes: String,
    /// The character itself (U+FFFD above U+10FFFF).
    #[serde(rename = "char")]
    pub text: String,
}

impl CharRecord {
    fn new(index: usize, offset: usize, ch: Utf8Char<'_>) -> Self {
        let bytes = ch
            .as_bytes()
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            index,
            offset,
            len: ch.byte_len(),
            code_point: ch.code_point().unwrap_or_default(),
            bytes,
            text: ch.to_string(),
        }
    }

    fn to_line(&self) -> String {
        let shown = if self.text.chars().all(|c| c.is_control()) {
            format!("{:?}", self.text)
        } else {
            self.text.clone()
        };
        format!(
            "{:>6} {:>8} {} U+{:04X} {:<11} {}",
            self.index, self.offset, self.len, self.code_point, self.bytes, shown
        )
    }
}

/// Walk `view` with a character cursor, reporting offsets relative to `base`.
pub fn collect_records(view: Utf8Str<'_>, base: usize) -> Vec<CharRecord> {
    let mut records = Vec::new();
    let mut iter = view.chars();
    loop {
        let offset = base + iter.offset();
        let ch = iter.advance();
        if ch.is_end() {
            break;
        }
        records.push(CharRecord::new(records.len(), offset, ch));
    }
    records
}

/// Record for the character at `index`, or `None` past the end.
pub fn nth_record(view: Utf8Str<'_>, index: usize, base: usize) -> Option<CharRecord> {
    let mut iter = view.chars();
    for _ in 0..index {
        if iter.advance().is_end() {
            return None;
        }
    }
    let offset = base + iter.offset();
    let ch = iter.advance();
    if ch.is_end() {
        None
    } else {
        Some(CharRecord::new(index, offset, ch))
    }
}

/// Run the inspect command.
pub fn run_inspect(args: InspectArgs) -> Result<i32> {
    let input = read_input(args.input.as_deref())?;
    let config = Utf8Config::new().with_reject_out_of_range(args.strict);
    let scheme = ColorScheme::from_flags(false, false);

    let view = match Utf8Str::with_config(&input, &config) {
        Ok(view) => view,
        Err(err) => {
            let filename = args.input.as_ref().map(|p| p.to_string_lossy());
            eprint!("{}", render_error(&err, &input, filename.as_deref(), &scheme)?);
            return Ok(exit_codes::INVALID);
        }
    };

    let base = args.start.unwrap_or(0).min(view.byte_len());
    let view = if args.start.is_some() || args.len.is_some() {
        match view.slice(base, args.len.unwrap_or(usize::MAX)) {
            Ok(sliced) => sliced,
            Err(err) => {
                eprintln!("{}error{}: {}", scheme.error, scheme.reset, err);
                return Ok(exit_codes::INVALID);
            }
        }
    } else {
        view
    };

    let records = match args.nth {
        Some(index) => match nth_record(view, index, base) {
            Some(record) => vec![record],
            None => {
                eprintln!(
                    "{}error{}: character index {} is out of range ({} characters)",
                    scheme.error,
                    scheme.reset,
                    index,
                    view.char_count()
                );
                return Ok(exit_codes::INVALID);
            }
        },
        None => collect_records(view, base),
    };

    let mut stdout = io::stdout().lock();
    for record in &records {
        if args.json {
            serde_json::to_writer(&mut stdout, record)?;
            writeln!(stdout)?;
        } else {
            writeln!(stdout, "{}", record.to_line())?;
        }
    }
    stdout.flush()?;

    Ok(exit_codes::SUCCESS)
}

/// Run the count command.
pub fn run_count(args: CountArgs) -> Result<i32> {
    let config = Utf8Config::new().with_reject_out_of_range(args.strict);
    let scheme = ColorScheme::from_flags(false, false);

    if args.files.is_empty() {
        let input = read_input(None)?;
        return match count_input(&input, &config) {
            Ok((chars, bytes)) => {
                println!("{:>10} {:>10}", chars, bytes);
                Ok(exit_codes::SUCCESS)
            }
            Err(err) => {
                eprintln!("{}error{}: <stdin>: {}", scheme.error, scheme.reset, err);
                Ok(exit_codes::INVALID)
            }
        };
    }

    let mut total_chars = 0;
    let mut total_bytes = 0;
    let mut code = exit_codes::SUCCESS;

    for path in &args.files {
        let input = match fs::read(path) {
            Ok(input) => input,
            Err(e) => {
                eprintln!(
                    "{}error{}: {}: {}",
                    scheme.error,
                    scheme.reset,
                    path.display(),
                    e
                );
                code = exit_codes::IO_ERROR;
                continue;
            }
        };

        match count_input(&input, &config) {
            Ok((chars, bytes)) => {
                println!("{:>10} {:>10} {}", chars, bytes, path.display());
                total_chars += chars;
                total_bytes += bytes;
            }
            Err(err) => {
                eprintln!(
                    "{}error{}: {}: {}",
                    scheme.error,
                    scheme.reset,
                    path.display(),
                    err
                );
                if code == exit_codes::SUCCESS {
                    code = exit_codes::INVALID;
                }
            }
        }
    }

    if args.files.len() > 1 {
        println!("{:>10} {:>10} total", total_chars, total_bytes);
    }

    Ok(code)
}

/// Character and byte counts of a valid input.
fn count_input(input: &[u8], config: &Utf8Config) -> Result<(usize, usize), utf8view::Utf8Error> {
    let view = Utf8Str::with_config(input, config)?;
    Ok((view.char_count(), view.byte_len()))
}
