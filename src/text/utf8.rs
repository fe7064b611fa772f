//! UTF-8 classification and validation with detailed error reporting.
//!
//! This module provides UTF-8 validation that reports:
//! - The byte offset of the lead byte of the first invalid sequence
//! - The line number (1-indexed)
//! - The column number (1-indexed, in bytes)
//! - The specific type of UTF-8 violation
//!
//! ## UTF-8 Encoding Rules
//!
//! UTF-8 is a variable-width encoding that uses 1-4 bytes per character:
//!
//! | Bytes | First byte    | Continuation bytes | Code point range     |
//! |-------|---------------|-------------------|----------------------|
//! | 1     | `0xxxxxxx`    | -                 | U+0000 - U+007F      |
//! | 2     | `110xxxxx`    | `10xxxxxx`        | U+0080 - U+07FF      |
//! | 3     | `1110xxxx`    | `10xxxxxx` × 2    | U+0800 - U+FFFF      |
//! | 4     | `11110xxx`    | `10xxxxxx` × 3    | U+10000 - U+1FFFFF   |
//!
//! ## Validation Checks
//!
//! The classifier checks for:
//! 1. **Invalid lead bytes**: Bytes 0x80-0xBF or 0xF8-0xFF where a lead byte is expected
//! 2. **Invalid continuation bytes**: Non-continuation bytes where continuation expected
//! 3. **Truncated sequences**: Multi-byte sequence cut off at end of input
//! 4. **Overlong encodings**: Using more bytes than necessary
//! 5. **Surrogate code points**: U+D800-U+DFFF (reserved for UTF-16)
//! 6. **Out of range**: Code points above U+10FFFF, only with [`Utf8Config::strict`]
//!
//! Every failure is reported at the offset of the sequence's lead byte, even
//! when a later continuation byte is the one that breaks the pattern.

use alloc::string::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::config::Utf8Config;

/// UTF-8 encoding of U+FFFD REPLACEMENT CHARACTER.
pub const REPLACEMENT_CHARACTER: [u8; 3] = [0xEF, 0xBF, 0xBD];

/// Error information for UTF-8 validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Utf8Error {
    /// Byte offset of the lead byte of the first invalid sequence (0-indexed).
    pub offset: usize,
    /// The line number where the error occurred (1-indexed).
    pub line: usize,
    /// The column (byte position within the line, 1-indexed).
    pub column: usize,
    /// The kind of UTF-8 error.
    pub kind: Utf8ErrorKind,
}

impl Utf8Error {
    /// Length of the longest valid prefix of the input.
    #[inline]
    pub fn valid_up_to(&self) -> usize {
        self.offset
    }
}

impl core::fmt::Display for Utf8Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} at byte {}, line {}, column {}",
            self.kind, self.offset, self.line, self.column
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Utf8Error {}

/// The specific type of UTF-8 validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Utf8ErrorKind {
    /// A byte in the range 0x80-0xBF or 0xF8-0xFF appeared where a lead byte
    /// was expected.
    InvalidLeadByte,

    /// A byte outside the range 0x80-0xBF appeared where a continuation byte was expected.
    InvalidContinuationByte,

    /// A multi-byte sequence was truncated at the end of input.
    TruncatedSequence,

    /// A character was encoded using more bytes than necessary.
    /// For example, encoding ASCII 'H' (U+0048) as `C1 88` instead of `48`.
    OverlongEncoding,

    /// A surrogate code point (U+D800-U+DFFF) was encoded.
    SurrogateCodepoint,

    /// A code point above U+10FFFF was encoded (strict policy only).
    OutOfRangeCodepoint,

    /// No input buffer was supplied at all.
    MissingInput,
}

impl core::fmt::Display for Utf8ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidLeadByte => write!(f, "invalid UTF-8 lead byte"),
            Self::InvalidContinuationByte => write!(f, "invalid UTF-8 continuation byte"),
            Self::TruncatedSequence => write!(f, "truncated UTF-8 sequence"),
            Self::OverlongEncoding => write!(f, "overlong UTF-8 encoding"),
            Self::SurrogateCodepoint => write!(f, "surrogate code point in UTF-8"),
            Self::OutOfRangeCodepoint => write!(f, "code point above U+10FFFF"),
            Self::MissingInput => write!(f, "missing input buffer"),
        }
    }
}

/// Classify the UTF-8 sequence starting at `offset`.
///
/// Returns the sequence length (1-4) when the bytes at `offset` form a valid
/// character under `config`, or the kind of violation otherwise. The failure
/// point is always `offset` itself.
///
/// # Examples
///
/// ```
/// use utf8view::text::utf8::{classify_char, Utf8ErrorKind};
/// use utf8view::Utf8Config;
///
/// let config = Utf8Config::default();
/// let input = "Hд".as_bytes();
/// assert_eq!(classify_char(input, 0, &config), Ok(1));
/// assert_eq!(classify_char(input, 1, &config), Ok(2));
///
/// // Interior continuation byte
/// assert_eq!(classify_char(input, 2, &config), Err(Utf8ErrorKind::InvalidLeadByte));
///
/// // Overlong encoding of 'H'
/// assert_eq!(classify_char(b"\xC1\x88", 0, &config), Err(Utf8ErrorKind::OverlongEncoding));
/// ```
pub fn classify_char(
    input: &[u8],
    offset: usize,
    config: &Utf8Config,
) -> Result<usize, Utf8ErrorKind> {
    let lead = match input.get(offset) {
        Some(&byte) => byte,
        None => return Err(Utf8ErrorKind::TruncatedSequence),
    };

    let seq_len = sequence_length(lead);
    match seq_len {
        0 => return Err(Utf8ErrorKind::InvalidLeadByte),
        1 => return Ok(1),
        _ => {}
    }

    for i in 1..seq_len {
        match input.get(offset + i) {
            None => return Err(Utf8ErrorKind::TruncatedSequence),
            Some(&byte) if !is_continuation_byte(byte) => {
                return Err(Utf8ErrorKind::InvalidContinuationByte)
            }
            Some(_) => {}
        }
    }

    let b1 = input[offset + 1];
    match seq_len {
        2 => {
            // 110(00001) 10(111111) is U+007F, which fits in one byte
            if lead & 0b0001_1111 < 0b0000_0010 {
                return Err(Utf8ErrorKind::OverlongEncoding);
            }
        }
        3 => {
            // 1110(0000) 10(011111) 10(111111) is U+07FF, which fits in two bytes
            if lead & 0b0000_1111 == 0 && b1 & 0b0011_1111 < 0b0010_0000 {
                return Err(Utf8ErrorKind::OverlongEncoding);
            }
            // ED A0 80 ..= ED BF BF encode U+D800 ..= U+DFFF
            if lead == 0xED && (0xA0..=0xBF).contains(&b1) {
                return Err(Utf8ErrorKind::SurrogateCodepoint);
            }
        }
        _ => {
            // 11110(000) 10(001111) 10(111111) 10(111111) is U+FFFF, which fits in three bytes
            if lead & 0b0000_0111 == 0 && b1 & 0b0011_1111 < 0b0001_0000 {
                return Err(Utf8ErrorKind::OverlongEncoding);
            }
            if config.reject_out_of_range {
                let cp = unpack(&input[offset..offset + 4]).unwrap_or(0);
                if cp > 0x10FFFF {
                    return Err(Utf8ErrorKind::OutOfRangeCodepoint);
                }
            }
        }
    }

    Ok(seq_len)
}

/// Validate that the input is valid UTF-8 under the default policy.
///
/// Returns `Ok(len)` with the number of bytes scanned (the whole input), or an
/// `Err(Utf8Error)` describing the first invalid sequence.
///
/// # Examples
///
/// ```
/// use utf8view::text::utf8::validate_utf8;
///
/// // Valid ASCII
/// assert_eq!(validate_utf8(b"Hello, world!"), Ok(13));
///
/// // Valid multi-byte UTF-8
/// assert!(validate_utf8("日本語".as_bytes()).is_ok());
/// assert!(validate_utf8("émoji: 🎉".as_bytes()).is_ok());
///
/// // Invalid: bare continuation byte
/// assert!(validate_utf8(&[0x80]).is_err());
///
/// // Invalid: surrogate, reported at the lead byte
/// assert_eq!(validate_utf8(b"\xED\xA0\x80").unwrap_err().offset, 0);
/// ```
#[inline]
pub fn validate_utf8(input: &[u8]) -> Result<usize, Utf8Error> {
    validate_utf8_with(input, &Utf8Config::default())
}

/// Validate UTF-8 under an explicit policy.
///
/// Runs the classifier once per character, tracking line and column for
/// error reporting, and stops at the first invalid sequence.
pub fn validate_utf8_with(input: &[u8], config: &Utf8Config) -> Result<usize, Utf8Error> {
    let mut pos = 0;
    let mut line = 1;
    let mut line_start = 0;
    let len = input.len();

    while pos < len {
        match classify_char(input, pos, config) {
            Ok(seq_len) => {
                if input[pos] == b'\n' {
                    line += 1;
                    line_start = pos + 1;
                }
                pos += seq_len;
            }
            Err(kind) => {
                log::trace!("utf8 validation failed at byte {}: {}", pos, kind);
                return Err(Utf8Error {
                    offset: pos,
                    line,
                    column: pos - line_start + 1,
                    kind,
                });
            }
        }
    }

    Ok(pos)
}

/// Validate a NUL-terminated buffer.
///
/// The scan stops at the first `0x00` byte (or the end of the slice when
/// there is none); on success the returned length is the terminator
/// position.
///
/// ```
/// use utf8view::text::utf8::validate_utf8_until_nul;
///
/// assert_eq!(validate_utf8_until_nul(b"hi\0\xFF"), Ok(2));
/// assert!(validate_utf8_until_nul(b"\xFF\0").is_err());
/// ```
pub fn validate_utf8_until_nul(input: &[u8]) -> Result<usize, Utf8Error> {
    validate_utf8(until_nul(input))
}

/// Validate an optional buffer.
///
/// A missing buffer is invalid at offset 0.
pub fn validate_utf8_opt(input: Option<&[u8]>) -> Result<usize, Utf8Error> {
    match input {
        Some(bytes) => validate_utf8(bytes),
        None => Err(Utf8Error {
            offset: 0,
            line: 1,
            column: 1,
            kind: Utf8ErrorKind::MissingInput,
        }),
    }
}

/// The prefix of `input` before its first NUL byte.
///
/// Returns the whole slice when there is no NUL.
#[inline]
pub fn until_nul(input: &[u8]) -> &[u8] {
    match input.iter().position(|&b| b == 0) {
        Some(end) => &input[..end],
        None => input,
    }
}

/// Check if a byte is a valid UTF-8 continuation byte (0x80-0xBF).
#[inline(always)]
fn is_continuation_byte(byte: u8) -> bool {
    (byte & 0xC0) == 0x80
}

/// Get the expected sequence length from a lead byte.
/// Returns 0 for invalid lead bytes (continuation bytes or 0xF8+).
#[inline]
pub fn sequence_length(lead_byte: u8) -> usize {
    match lead_byte {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 0, // Invalid lead byte
    }
}

/// Assemble the payload bits of a 1-4 byte sequence.
///
/// No shape checks are performed; the caller guarantees `bytes` is one
/// complete character.
#[inline]
pub(crate) fn unpack(bytes: &[u8]) -> Option<u32> {
    let cp = match *bytes {
        [b0] => (b0 & 0b0111_1111) as u32,
        [b0, b1] => ((b0 as u32 & 0x1F) << 6) | (b1 as u32 & 0x3F),
        [b0, b1, b2] => {
            ((b0 as u32 & 0x0F) << 12) | ((b1 as u32 & 0x3F) << 6) | (b2 as u32 & 0x3F)
        }
        [b0, b1, b2, b3] => {
            ((b0 as u32 & 0x07) << 18)
                | ((b1 as u32 & 0x3F) << 12)
                | ((b2 as u32 & 0x3F) << 6)
                | (b3 as u32 & 0x3F)
        }
        _ => return None,
    };
    Some(cp)
}

/// Decode a UTF-8 code point from the start of a byte slice.
///
/// Returns `None` if the input is empty or does not start with a
/// well-shaped sequence. Overlong and surrogate checks are not applied.
/// On success, returns the decoded code point and the number of bytes consumed.
///
/// # Examples
///
/// ```
/// use utf8view::text::utf8::decode_code_point;
///
/// // ASCII
/// assert_eq!(decode_code_point(b"A"), Some(('A' as u32, 1)));
///
/// // Multi-byte
/// assert_eq!(decode_code_point("日".as_bytes()), Some((0x65E5, 3)));
///
/// // Empty input
/// assert_eq!(decode_code_point(b""), None);
/// ```
pub fn decode_code_point(input: &[u8]) -> Option<(u32, usize)> {
    let lead = *input.first()?;
    let len = sequence_length(lead);

    if len == 0 || input.len() < len {
        return None;
    }
    if !input[1..len].iter().all(|&b| is_continuation_byte(b)) {
        return None;
    }

    unpack(&input[..len]).map(|cp| (cp, len))
}

/// Format a byte as a human-readable string for error messages.
pub fn format_byte(byte: u8) -> String {
    if byte.is_ascii_graphic() || byte == b' ' {
        alloc::format!("0x{:02X} ({:?})", byte, byte as char)
    } else {
        alloc::format!("0x{:02X}", byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Valid UTF-8 Tests
    // =========================================================================

    mod valid_utf8 {
        use super::*;

        #[test]
        fn empty_input() {
            assert_eq!(validate_utf8(b""), Ok(0));
        }

        #[test]
        fn ascii_single_byte() {
            for byte in 0x00..=0x7F {
                assert_eq!(
                    validate_utf8(&[byte]),
                    Ok(1),
                    "ASCII byte 0x{:02X} should be valid",
                    byte
                );
            }
        }

        #[test]
        fn mixed_scripts() {
            // english 1 byte, russian 2, japanese 3, emoji 4
            let s = "Hello Здравствуйте こんにちは 🚩😁";
            assert_eq!(
                validate_utf8(s.as_bytes()),
                Ok(5 + 1 + 12 * 2 + 1 + 5 * 3 + 1 + 2 * 4)
            );
        }

        #[test]
        fn boundary_code_points() {
            // First and last code point of each length
            assert_eq!(validate_utf8(&[0x00]), Ok(1)); // U+0000
            assert_eq!(validate_utf8(&[0x7F]), Ok(1)); // U+007F
            assert_eq!(validate_utf8(&[0xC2, 0x80]), Ok(2)); // U+0080
            assert_eq!(validate_utf8(&[0xDF, 0xBF]), Ok(2)); // U+07FF
            assert_eq!(validate_utf8(&[0xE0, 0xA0, 0x80]), Ok(3)); // U+0800
            assert_eq!(validate_utf8(&[0xEF, 0xBF, 0xBF]), Ok(3)); // U+FFFF
            assert_eq!(validate_utf8(&[0xF0, 0x90, 0x80, 0x80]), Ok(4)); // U+10000
            assert_eq!(validate_utf8(&[0xF7, 0xBF, 0xBF, 0xBF]), Ok(4)); // 11110(111)
        }

        #[test]
        fn minimal_and_maximal_two_byte() {
            assert_eq!(validate_utf8(b"H\xC2\x80\xDF\xBF"), Ok(5));
        }

        #[test]
        fn non_characters() {
            assert!(validate_utf8(&[0xEF, 0xBF, 0xBE]).is_ok()); // U+FFFE
            assert!(validate_utf8(&[0xEF, 0xBB, 0xBF]).is_ok()); // U+FEFF BOM
        }

        #[test]
        fn null_bytes() {
            assert_eq!(validate_utf8(b"Hello\x00World"), Ok(11));
        }

        #[test]
        fn long_valid_string() {
            let mut s = String::new();
            for i in 0..100 {
                s.push_str(&format!("Line {}: Hello 世界 🎉\n", i));
            }
            assert_eq!(validate_utf8(s.as_bytes()), Ok(s.len()));
        }
    }

    // =========================================================================
    // Invalid Lead Byte Tests
    // =========================================================================

    mod invalid_lead_byte {
        use super::*;

        #[test]
        fn continuation_byte_as_lead() {
            for byte in 0x80..=0xBF {
                let err = validate_utf8(&[byte]).unwrap_err();
                assert_eq!(err.kind, Utf8ErrorKind::InvalidLeadByte);
                assert_eq!(err.offset, 0);
            }
        }

        #[test]
        fn continuation_byte_after_valid() {
            let err = validate_utf8(&[b'A', 0x80]).unwrap_err();
            assert_eq!(err.kind, Utf8ErrorKind::InvalidLeadByte);
            assert_eq!(err.offset, 1);
            assert_eq!(err.valid_up_to(), 1);
        }

        #[test]
        fn f8_ff_lead_bytes() {
            for byte in 0xF8..=0xFF {
                let err = validate_utf8(&[byte, 0x80, 0x80, 0x80]).unwrap_err();
                assert_eq!(err.kind, Utf8ErrorKind::InvalidLeadByte);
                assert_eq!(err.offset, 0);
            }
        }

        #[test]
        fn c0_lead_after_cyrillic() {
            let s = b"Hello \xD0\x97\xD0\xB4\xC0\xC0 rest";
            let err = validate_utf8(s).unwrap_err();
            assert_eq!(err.offset, 10);
        }
    }

    // =========================================================================
    // Invalid Continuation Byte Tests
    // =========================================================================

    mod invalid_continuation {
        use super::*;

        #[test]
        fn missing_continuation_2byte() {
            let err = validate_utf8(&[0xC2, b'A']).unwrap_err();
            assert_eq!(err.kind, Utf8ErrorKind::InvalidContinuationByte);
            assert_eq!(err.offset, 0);
        }

        #[test]
        fn reported_at_lead_not_at_bad_byte() {
            // Wrong second continuation of a 3-byte sequence
            let err = validate_utf8(&[b'x', 0xE0, 0xA0, b'A']).unwrap_err();
            assert_eq!(err.kind, Utf8ErrorKind::InvalidContinuationByte);
            assert_eq!(err.offset, 1);

            // Wrong third continuation of a 4-byte sequence
            let err = validate_utf8(&[0xF0, 0x90, 0x80, b'A']).unwrap_err();
            assert_eq!(err.offset, 0);
        }

        #[test]
        fn continuation_is_another_lead() {
            let err = validate_utf8(&[0xC2, 0xC2]).unwrap_err();
            assert_eq!(err.kind, Utf8ErrorKind::InvalidContinuationByte);
        }

        #[test]
        fn bad_byte_before_end_wins_over_truncation() {
            let err = validate_utf8(&[0xE3, b'A']).unwrap_err();
            assert_eq!(err.kind, Utf8ErrorKind::InvalidContinuationByte);
        }
    }

    // =========================================================================
    // Overlong Encoding Tests
    // =========================================================================

    mod overlong_encoding {
        use super::*;

        fn assert_overlong(bytes: &[u8]) {
            let err = validate_utf8(bytes).unwrap_err();
            assert_eq!(err.kind, Utf8ErrorKind::OverlongEncoding, "{:02X?}", bytes);
            assert_eq!(err.offset, 0);
        }

        #[test]
        fn overlong_ascii() {
            // 'H' as 2, 3 and 4 bytes
            assert_overlong(b"\xC1\x88");
            assert_overlong(b"\xE0\x81\x88");
            assert_overlong(b"\xF0\x80\x81\x88");
        }

        #[test]
        fn overlong_two_byte_char() {
            // 'д' (U+0434) as 3 and 4 bytes
            assert_overlong(b"\xE0\x90\xB4");
            assert_overlong(b"\xF0\x80\x90\xB4");
        }

        #[test]
        fn overlong_three_byte_char() {
            // 'こ' (U+3053) as 4 bytes
            assert_overlong(b"\xF0\x83\x81\x93");
        }

        #[test]
        fn overlong_boundaries() {
            assert_overlong(b"\xC1\xBF"); // U+007F
            assert_overlong(b"\xE0\x9F\xBF"); // U+07FF
            assert_overlong(b"\xF0\x8F\xBF\xBF"); // U+FFFF
        }

        #[test]
        fn overlong_2byte_all_c0_c1() {
            for lead in [0xC0, 0xC1] {
                for cont in 0x80..=0xBF {
                    assert_overlong(&[lead, cont]);
                }
            }
        }

        #[test]
        fn security_overlong_slash() {
            assert_overlong(&[0xC0, 0xAF]);
            assert_overlong(&[0xE0, 0x80, 0xAF]);
            assert_overlong(&[0xF0, 0x80, 0x80, 0xAF]);
        }
    }

    // =========================================================================
    // Surrogate Code Point Tests
    // =========================================================================

    mod surrogate_codepoints {
        use super::*;

        #[test]
        fn surrogate_range_edges() {
            for bytes in [
                [0xED, 0xA0, 0x80],
                [0xED, 0xAC, 0x80],
                [0xED, 0xA0, 0x8C],
                [0xED, 0xBF, 0xBF],
            ] {
                let err = validate_utf8(&bytes).unwrap_err();
                assert_eq!(err.kind, Utf8ErrorKind::SurrogateCodepoint);
                assert_eq!(err.offset, 0);
            }
        }

        #[test]
        fn all_surrogates() {
            let surrogates = [
                0xD800, 0xD801, 0xDB00, 0xDBFF, 0xDC00, 0xDC01, 0xDF00, 0xDFFF,
            ];
            for cp in surrogates {
                let bytes = [
                    0xE0 | ((cp >> 12) as u8),
                    0x80 | (((cp >> 6) & 0x3F) as u8),
                    0x80 | ((cp & 0x3F) as u8),
                ];
                let err = validate_utf8(&bytes).unwrap_err();
                assert_eq!(err.kind, Utf8ErrorKind::SurrogateCodepoint, "U+{:04X}", cp);
            }
        }

        #[test]
        fn surrogate_in_middle_of_valid() {
            let mut input = Vec::from(&b"Hello "[..]);
            input.extend_from_slice(&[0xED, 0xA0, 0x80]);
            input.extend_from_slice(b" world");

            let err = validate_utf8(&input).unwrap_err();
            assert_eq!(err.kind, Utf8ErrorKind::SurrogateCodepoint);
            assert_eq!(err.offset, 6);
        }

        #[test]
        fn non_surrogate_ed_valid() {
            assert!(validate_utf8(&[0xED, 0x9F, 0xBF]).is_ok()); // U+D7FF
            assert!(validate_utf8(&[0xEE, 0x80, 0x80]).is_ok()); // U+E000
        }
    }

    // =========================================================================
    // Out of Range Code Point Tests
    // =========================================================================

    mod out_of_range {
        use super::*;

        #[test]
        fn accepted_by_default() {
            assert_eq!(validate_utf8(&[0xF4, 0x90, 0x80, 0x80]), Ok(4));
            assert_eq!(validate_utf8(&[0xF7, 0xBF, 0xBF, 0xBF]), Ok(4));
        }

        #[test]
        fn rejected_when_strict() {
            let strict = Utf8Config::strict();
            let err = validate_utf8_with(&[b'a', 0xF4, 0x90, 0x80, 0x80], &strict).unwrap_err();
            assert_eq!(err.kind, Utf8ErrorKind::OutOfRangeCodepoint);
            assert_eq!(err.offset, 1);

            assert!(validate_utf8_with(&[0xF7, 0xBF, 0xBF, 0xBF], &strict).is_err());
        }

        #[test]
        fn max_valid_when_strict() {
            let strict = Utf8Config::strict();
            assert_eq!(validate_utf8_with(&[0xF4, 0x8F, 0xBF, 0xBF], &strict), Ok(4));
        }
    }

    // =========================================================================
    // Truncated Sequence Tests
    // =========================================================================

    mod truncated_sequences {
        use super::*;

        #[test]
        fn truncated_leads() {
            for bytes in [
                &[0xC2][..],
                &[0xE0],
                &[0xE0, 0xA0],
                &[0xF0],
                &[0xF0, 0x90],
                &[0xF0, 0x90, 0x80],
            ] {
                let err = validate_utf8(bytes).unwrap_err();
                assert_eq!(err.kind, Utf8ErrorKind::TruncatedSequence, "{:02X?}", bytes);
                assert_eq!(err.offset, 0);
            }
        }

        #[test]
        fn truncated_after_valid() {
            let mut input = Vec::from(&b"Hello "[..]);
            input.push(0xC2);

            let err = validate_utf8(&input).unwrap_err();
            assert_eq!(err.kind, Utf8ErrorKind::TruncatedSequence);
            assert_eq!(err.offset, 6);
        }

        #[test]
        fn classify_past_end() {
            let config = Utf8Config::default();
            assert_eq!(
                classify_char(b"ab", 2, &config),
                Err(Utf8ErrorKind::TruncatedSequence)
            );
        }
    }

    // =========================================================================
    // Terminated and Optional Input Tests
    // =========================================================================

    mod terminated_input {
        use super::*;

        #[test]
        fn stops_at_nul() {
            assert_eq!(validate_utf8_until_nul(b"abc\0\xFF\xFF"), Ok(3));
            assert_eq!(validate_utf8_until_nul(b"\0"), Ok(0));
            assert_eq!(validate_utf8_until_nul("日本".as_bytes()), Ok(6));
        }

        #[test]
        fn sequence_cut_by_nul() {
            let err = validate_utf8_until_nul(b"a\xC3\0\xA9").unwrap_err();
            assert_eq!(err.offset, 1);
        }

        #[test]
        fn missing_buffer() {
            let err = validate_utf8_opt(None).unwrap_err();
            assert_eq!(err.kind, Utf8ErrorKind::MissingInput);
            assert_eq!(err.offset, 0);
            assert_eq!(validate_utf8_opt(Some(b"ok")), Ok(2));
        }
    }

    // =========================================================================
    // Error Position Tests
    // =========================================================================

    mod error_positions {
        use super::*;

        #[test]
        fn line_and_column_first_byte() {
            let err = validate_utf8(&[0x80]).unwrap_err();
            assert_eq!((err.offset, err.line, err.column), (0, 1, 1));
        }

        #[test]
        fn line_and_column_second_line() {
            let err = validate_utf8(b"Hello\nWorld\x80").unwrap_err();
            assert_eq!((err.offset, err.line, err.column), (11, 2, 6));
        }

        #[test]
        fn line_and_column_after_multibyte() {
            let mut input = "日本".as_bytes().to_vec();
            input.push(0x80);
            let err = validate_utf8(&input).unwrap_err();
            assert_eq!((err.offset, err.line, err.column), (6, 1, 7));
        }

        #[test]
        fn multiple_newlines() {
            let err = validate_utf8(b"\n\n\n\n\x80").unwrap_err();
            assert_eq!((err.offset, err.line, err.column), (4, 5, 1));
        }

        #[test]
        fn display() {
            let err = validate_utf8(b"ab\n\xC1\x88").unwrap_err();
            assert_eq!(
                err.to_string(),
                "overlong UTF-8 encoding at byte 3, line 2, column 1"
            );
        }
    }

    // =========================================================================
    // Decode Tests
    // =========================================================================

    mod decode {
        use super::*;

        #[test]
        fn decode_each_length() {
            assert_eq!(decode_code_point(b"H"), Some((72, 1)));
            assert_eq!(decode_code_point("д".as_bytes()), Some((1076, 2)));
            assert_eq!(decode_code_point("こ".as_bytes()), Some((12371, 3)));
            assert_eq!(decode_code_point("😁".as_bytes()), Some((128513, 4)));
        }

        #[test]
        fn decode_reads_only_first_sequence() {
            assert_eq!(decode_code_point("éa".as_bytes()), Some((0xE9, 2)));
        }

        #[test]
        fn decode_invalid() {
            assert_eq!(decode_code_point(b""), None);
            assert_eq!(decode_code_point(&[0x80]), None);
            assert_eq!(decode_code_point(&[0xC2]), None);
            assert_eq!(decode_code_point(&[0xC2, 0x00]), None);
        }

        #[test]
        fn overlong_decodes_to_same_value() {
            assert_eq!(decode_code_point(b"\xC1\x88"), Some((72, 2)));
            assert_eq!(decode_code_point(b"\xF0\x83\x81\x93"), Some((12371, 4)));
        }

        #[test]
        fn unpack_rejects_bad_lengths() {
            assert_eq!(unpack(&[]), None);
            assert_eq!(unpack(&[0xF0, 0x90, 0x80, 0x80, 0x80]), None);
        }
    }

    // =========================================================================
    // Sequence Length Tests
    // =========================================================================

    mod sequence_length_tests {
        use super::*;

        #[test]
        fn lengths_by_lead_range() {
            for byte in 0x00..=0x7F {
                assert_eq!(sequence_length(byte), 1);
            }
            for byte in 0x80..=0xBF {
                assert_eq!(sequence_length(byte), 0);
            }
            for byte in 0xC0..=0xDF {
                assert_eq!(sequence_length(byte), 2);
            }
            for byte in 0xE0..=0xEF {
                assert_eq!(sequence_length(byte), 3);
            }
            for byte in 0xF0..=0xF7 {
                assert_eq!(sequence_length(byte), 4);
            }
            for byte in 0xF8..=0xFF {
                assert_eq!(sequence_length(byte), 0);
            }
        }

        #[test]
        fn format_byte_output() {
            assert_eq!(format_byte(b'A'), "0x41 ('A')");
            assert_eq!(format_byte(0xC0), "0xC0");
        }
    }

    // =========================================================================
    // Comparison with std::str
    // =========================================================================

    mod std_comparison {
        use super::*;

        #[test]
        fn agree_on_valid_strings() {
            let test_cases = [
                "",
                "Hello, world!",
                "日本語",
                "🎉🚀🌍",
                "Mixed: café 日本 🎉",
                "\n\t\r",
            ];

            for s in test_cases {
                assert_eq!(validate_utf8(s.as_bytes()), Ok(s.len()));
            }
        }

        #[test]
        fn agree_on_invalid_bytes_when_strict() {
            let strict = Utf8Config::strict();
            let test_cases: &[&[u8]] = &[
                &[0x80],
                &[0xC2],
                &[0xE0, 0x80],
                &[0xC0, 0x80],
                &[0xED, 0xA0, 0x80],
                &[0xF4, 0x90, 0x80, 0x80],
            ];

            for bytes in test_cases {
                let ours = validate_utf8_with(bytes, &strict).unwrap_err();
                let std_err = core::str::from_utf8(bytes).unwrap_err();
                assert_eq!(ours.valid_up_to(), std_err.valid_up_to(), "{:02X?}", bytes);
            }
        }
    }
}
