//! CLI handler for the `repair` command.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use utf8view::text::owned::{repair_utf8, Repair};
use utf8view::Utf8Config;

use crate::read_input;
use crate::text_validate::exit_codes;

/// Replace every invalid byte with U+FFFD.
#[derive(Debug, Parser)]
pub struct RepairArgs {
    /// Input file (reads from stdin if omitted)
    pub input: Option<PathBuf>,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also replace code points above U+10FFFF
    #[arg(long)]
    pub strict: bool,

    /// Exit with status 1 if any replacement was made
    #[arg(long)]
    pub check: bool,
}

/// Run the repair command.
pub fn run(args: RepairArgs) -> Result<i32> {
    let input = read_input(args.input.as_deref())?;
    let config = Utf8Config::new().with_reject_out_of_range(args.strict);

    let repair = repair_utf8(&input, &config).context("failed to repair input")?;
    write_output(args.output.as_deref(), &repair)?;

    eprintln!(
        "Repaired {} bytes: {} replacement{}",
        input.len(),
        repair.replacements,
        if repair.replacements == 1 { "" } else { "s" }
    );

    if args.check && repair.replacements > 0 {
        Ok(exit_codes::INVALID)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

fn write_output(path: Option<&Path>, repair: &Repair) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, repair.string.as_bytes())
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(repair.string.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}
