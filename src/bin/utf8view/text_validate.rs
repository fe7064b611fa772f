//! CLI handler for the `validate` command.

use anyhow::Result;
use clap::Parser;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use utf8view::text::owned::repair_utf8;
use utf8view::text::utf8::{self, format_byte, until_nul, Utf8Error, Utf8ErrorKind};
use utf8view::Utf8Config;

use crate::read_input;

/// Validate text files for UTF-8 compliance.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// Input files to validate (reads from stdin if none provided)
    #[arg(trailing_var_arg = true)]
    pub files: Vec<PathBuf>,

    /// Quiet mode: exit code only, no output
    #[arg(short, long)]
    pub quiet: bool,

    /// Force color output even when not a TTY
    #[arg(short = 'C', long = "color")]
    pub color: bool,

    /// Disable color output
    #[arg(short = 'M', long = "no-color")]
    pub no_color: bool,

    /// Also reject code points above U+10FFFF
    #[arg(long)]
    pub strict: bool,

    /// Stop at the first NUL byte, treating it as the terminator
    #[arg(long)]
    pub nul: bool,
}

/// Exit codes shared by the subcommands.
pub mod exit_codes {
    /// Input is valid.
    pub const SUCCESS: i32 = 0;
    /// Input is invalid (validation error).
    pub const INVALID: i32 = 1;
    /// I/O error (file not found, permission denied, etc.).
    pub const IO_ERROR: i32 = 2;
}

/// ANSI color codes for error output.
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const LOCATION: &str = "\x1b[1;34m"; // Bold blue
    pub const LINE_NUM: &str = "\x1b[0;34m"; // Blue
    pub const CARET: &str = "\x1b[1;32m"; // Bold green
    pub const MESSAGE: &str = "\x1b[0;33m"; // Yellow
}

/// Color scheme that can be disabled.
pub(crate) struct ColorScheme {
    pub(crate) error: &'static str,
    location: &'static str,
    line_num: &'static str,
    caret: &'static str,
    message: &'static str,
    pub(crate) reset: &'static str,
}

impl ColorScheme {
    pub(crate) fn new(use_color: bool) -> Self {
        if use_color {
            Self {
                error: colors::ERROR,
                location: colors::LOCATION,
                line_num: colors::LINE_NUM,
                caret: colors::CARET,
                message: colors::MESSAGE,
                reset: colors::RESET,
            }
        } else {
            Self {
                error: "",
                location: "",
                line_num: "",
                caret: "",
                message: "",
                reset: "",
            }
        }
    }

    /// Pick colors from the flags, falling back to whether stderr is a TTY.
    pub(crate) fn from_flags(color: bool, no_color: bool) -> Self {
        let use_color = if no_color {
            false
        } else if color {
            true
        } else {
            atty::is(atty::Stream::Stderr)
        };
        Self::new(use_color)
    }
}

/// Run the validate command.
pub fn run(args: ValidateArgs) -> Result<i32> {
    let scheme = ColorScheme::from_flags(args.color, args.no_color);

    if args.files.is_empty() {
        let input = read_input(None)?;
        return validate_input(&input, None, &args, &scheme);
    }

    let mut any_invalid = false;
    let mut any_io_error = false;

    for path in &args.files {
        match fs::read(path) {
            Ok(input) => {
                let filename = path.to_string_lossy();
                let result = validate_input(&input, Some(&filename), &args, &scheme)?;
                if result == exit_codes::INVALID {
                    any_invalid = true;
                }
            }
            Err(e) => {
                any_io_error = true;
                if !args.quiet {
                    eprintln!(
                        "{}error{}: {}: {}",
                        scheme.error,
                        scheme.reset,
                        path.display(),
                        e
                    );
                }
            }
        }
    }

    if any_io_error {
        Ok(exit_codes::IO_ERROR)
    } else if any_invalid {
        Ok(exit_codes::INVALID)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

/// Validate a single input and print errors.
fn validate_input(
    input: &[u8],
    filename: Option<&str>,
    args: &ValidateArgs,
    scheme: &ColorScheme,
) -> Result<i32> {
    let config = Utf8Config::new().with_reject_out_of_range(args.strict);
    let input = if args.nul {
        until_nul(input)
    } else {
        input
    };

    match utf8::validate_utf8_with(input, &config) {
        Ok(_) => Ok(exit_codes::SUCCESS),
        Err(err) => {
            if !args.quiet {
                eprint!("{}", render_error(&err, input, filename, scheme)?);
            }
            Ok(exit_codes::INVALID)
        }
    }
}

/// Render a formatted error message with context snippet.
pub(crate) fn render_error(
    err: &Utf8Error,
    input: &[u8],
    filename: Option<&str>,
    scheme: &ColorScheme,
) -> Result<String> {
    let mut out = String::new();

    writeln!(
        out,
        "{}error{}: {}",
        scheme.error,
        scheme.reset,
        format_error_kind(&err.kind, err.offset, input)
    )?;

    writeln!(
        out,
        "  {}--> {}:{}:{}{}",
        scheme.location,
        filename.unwrap_or("<stdin>"),
        err.line,
        err.column,
        scheme.reset
    )?;

    let snippet = get_error_snippet(input, err.offset)?;

    // Line number gutter is at least 3 columns wide
    let line_num_width = err.line.to_string().len().max(3);
    let blank_padding = " ".repeat(line_num_width + 2);

    writeln!(out, "{}{}|{}", blank_padding, scheme.line_num, scheme.reset)?;
    writeln!(
        out,
        " {}{:>width$}{} {}|{} {}",
        scheme.line_num,
        err.line,
        scheme.reset,
        scheme.line_num,
        scheme.reset,
        snippet.line_content,
        width = line_num_width
    )?;
    writeln!(
        out,
        "{}{}|{} {}{}{}{}{}",
        blank_padding,
        scheme.line_num,
        scheme.reset,
        " ".repeat(snippet.caret_offset),
        scheme.caret,
        "^".repeat(snippet.caret_width.max(1)),
        scheme.reset,
        format_error_hint(&err.kind, scheme)
    )?;
    writeln!(out)?;

    Ok(out)
}

/// Format the error kind as a human-readable message.
fn format_error_kind(kind: &Utf8ErrorKind, offset: usize, input: &[u8]) -> String {
    match (kind, input.get(offset)) {
        (Utf8ErrorKind::InvalidLeadByte, Some(&byte)) => {
            format!("{} (byte {})", kind, format_byte(byte))
        }
        (Utf8ErrorKind::InvalidContinuationByte, Some(&lead)) => {
            format!("{} after lead byte {}", kind, format_byte(lead))
        }
        (Utf8ErrorKind::TruncatedSequence, _) => {
            "truncated UTF-8 sequence at end of input".to_string()
        }
        _ => kind.to_string(),
    }
}

/// Format an additional hint for certain error types.
fn format_error_hint(kind: &Utf8ErrorKind, scheme: &ColorScheme) -> String {
    let hint = match kind {
        Utf8ErrorKind::InvalidLeadByte => Some("bytes 0x80-0xBF are continuation bytes"),
        Utf8ErrorKind::InvalidContinuationByte => Some("expected byte 0x80-0xBF"),
        Utf8ErrorKind::OverlongEncoding => Some("use shortest possible encoding"),
        Utf8ErrorKind::SurrogateCodepoint => Some("U+D800-U+DFFF are reserved for UTF-16"),
        Utf8ErrorKind::OutOfRangeCodepoint => Some("maximum is U+10FFFF"),
        Utf8ErrorKind::TruncatedSequence | Utf8ErrorKind::MissingInput => None,
    };

    match hint {
        Some(h) => format!(" {}{}{}", scheme.message, h, scheme.reset),
        None => String::new(),
    }
}

/// Information about an error snippet.
struct ErrorSnippet {
    /// The content of the line containing the error.
    line_content: String,
    /// Number of spaces before the caret.
    caret_offset: usize,
    /// Width of the caret (number of ^ characters).
    caret_width: usize,
}

/// Longest line shown before truncating with `...`.
const MAX_WIDTH: usize = 80;

/// Extract the line containing `offset`, repaired for display.
///
/// The caret position counts characters of the repaired line, so every
/// invalid byte before the error shows up as one U+FFFD.
fn get_error_snippet(input: &[u8], offset: usize) -> Result<ErrorSnippet> {
    let offset = offset.min(input.len());
    let line_start = input[..offset]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    let line_end = input[offset..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(input.len(), |i| offset + i);

    let config = Utf8Config::default();
    let before = repair_utf8(&input[line_start..offset], &config)?.string;
    let line = repair_utf8(&input[line_start..line_end], &config)?.string;

    let error_col = before.as_utf8_str().char_count();
    let chars: Vec<String> = line
        .as_utf8_str()
        .chars()
        .map(|c| c.to_string())
        .collect();

    if chars.len() <= MAX_WIDTH {
        return Ok(ErrorSnippet {
            line_content: chars.concat(),
            caret_offset: error_col,
            caret_width: 1,
        });
    }

    let half = MAX_WIDTH / 2;
    let (start, prefix) = if error_col < half {
        (0, "")
    } else {
        ((error_col - half).min(chars.len() - MAX_WIDTH), "...")
    };
    let end = start + MAX_WIDTH;
    let suffix = if end < chars.len() { "..." } else { "" };

    Ok(ErrorSnippet {
        line_content: format!("{}{}{}", prefix, chars[start..end].concat(), suffix),
        caret_offset: error_col - start + prefix.len(),
        caret_width: 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(input: &[u8], filename: Option<&str>) -> String {
        let err = utf8::validate_utf8(input).unwrap_err();
        render_error(&err, input, filename, &ColorScheme::new(false)).unwrap()
    }

    #[test]
    fn test_render_invalid_lead_byte() {
        let output = render(b"ok\nbad \x80 byte\n", Some("notes.txt"));
        insta::assert_snapshot!(output, @r###"
        error: invalid UTF-8 lead byte (byte 0x80)
          --> notes.txt:2:5
             |
           2 | bad � byte
             |     ^ bytes 0x80-0xBF are continuation bytes
        "###);
    }

    #[test]
    fn test_render_overlong_on_stdin() {
        let output = render(b"\xC1\x88", None);
        insta::assert_snapshot!(output, @r###"
        error: overlong UTF-8 encoding
          --> <stdin>:1:1
             |
           1 | ��
             | ^ use shortest possible encoding
        "###);
    }

    #[test]
    fn test_caret_counts_characters() {
        let mut input = "Здравствуйте ".as_bytes().to_vec();
        input.push(0xFF);
        let snippet = get_error_snippet(&input, input.len() - 1).unwrap();
        assert_eq!(snippet.caret_offset, 13);
        assert_eq!(snippet.line_content, "Здравствуйте \u{FFFD}");
    }

    #[test]
    fn test_long_line_is_truncated() {
        let mut input = vec![b'a'; 200];
        input[150] = 0xFF;
        let snippet = get_error_snippet(&input, 150).unwrap();
        assert!(snippet.line_content.starts_with("..."));
        assert!(snippet.line_content.ends_with("..."));
        assert_eq!(snippet.line_content.chars().count(), MAX_WIDTH + 6);
        assert_eq!(snippet.caret_offset, MAX_WIDTH / 2 + 3);
    }

    #[test]
    fn test_format_error_kind() {
        assert_eq!(
            format_error_kind(&Utf8ErrorKind::InvalidContinuationByte, 0, b"\xC3("),
            "invalid UTF-8 continuation byte after lead byte 0xC3"
        );
        assert_eq!(
            format_error_kind(&Utf8ErrorKind::SurrogateCodepoint, 0, b"\xED\xA0\x80"),
            "surrogate code point in UTF-8"
        );
    }
}
