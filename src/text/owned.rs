//! Owned, always-valid UTF-8 buffers and lossy repair.
//!
//! [`Utf8String`] owns its bytes and is released by `Drop`. It is produced by
//! lossy repair of arbitrary input, by checked conversion of a byte vector,
//! or by copying a [`Utf8Str`].
//!
//! ## Lossy repair
//!
//! Repair walks the input with the same classifier the validator uses. Valid
//! sequences are copied verbatim; at every offset where classification fails
//! the repair writes U+FFFD and moves on by exactly one byte. A run of N
//! invalid bytes therefore produces N replacement characters.
//!
//! The output buffer is reserved once for the worst case (every byte
//! replaced by the 3-byte encoding of U+FFFD) and shrunk to the written
//! length at the end.
//!
//! ```
//! use utf8view::Utf8String;
//!
//! let repaired = Utf8String::from_utf8_lossy(b"\xC0He\xC0llo").unwrap();
//! assert_eq!(repaired, "\u{FFFD}He\u{FFFD}llo");
//! ```

use alloc::vec::Vec;
use core::fmt;

use super::config::Utf8Config;
use super::utf8::{classify_char, validate_utf8_with, Utf8Error, REPLACEMENT_CHARACTER};
use super::view::Utf8Str;

/// Error returned when the repair buffer cannot be reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocError {
    /// Number of bytes requested (`usize::MAX` if the size computation overflowed).
    pub requested: usize,
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to reserve {} bytes for UTF-8 repair", self.requested)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AllocError {}

/// Error returned by [`Utf8String::from_utf8`], carrying the rejected bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromUtf8Error {
    bytes: Vec<u8>,
    error: Utf8Error,
}

impl FromUtf8Error {
    /// The bytes that failed validation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Give back the bytes that failed validation.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Details of the validation failure.
    pub fn utf8_error(&self) -> &Utf8Error {
        &self.error
    }
}

impl fmt::Display for FromUtf8Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FromUtf8Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Result of a lossy repair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repair {
    /// The repaired string.
    pub string: Utf8String,
    /// Number of U+FFFD characters written.
    pub replacements: usize,
}

/// An owned buffer of valid UTF-8.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Utf8String {
    bytes: Vec<u8>,
}

impl Utf8String {
    /// Create an empty string.
    #[inline]
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Take ownership of `bytes` if they are valid UTF-8.
    ///
    /// ```
    /// use utf8view::Utf8String;
    ///
    /// assert!(Utf8String::from_utf8(b"ok".to_vec()).is_ok());
    ///
    /// let err = Utf8String::from_utf8(vec![b'a', 0xFF]).unwrap_err();
    /// assert_eq!(err.utf8_error().offset, 1);
    /// assert_eq!(err.into_bytes(), [b'a', 0xFF]);
    /// ```
    #[inline]
    pub fn from_utf8(bytes: Vec<u8>) -> Result<Self, FromUtf8Error> {
        Self::from_utf8_with(bytes, &Utf8Config::default())
    }

    /// Take ownership of `bytes` if they are valid under `config`.
    pub fn from_utf8_with(bytes: Vec<u8>, config: &Utf8Config) -> Result<Self, FromUtf8Error> {
        match validate_utf8_with(&bytes, config) {
            Ok(_) => Ok(Self { bytes }),
            Err(error) => Err(FromUtf8Error { bytes, error }),
        }
    }

    /// Repair arbitrary bytes into valid UTF-8.
    ///
    /// Fails only if the output buffer cannot be reserved.
    #[inline]
    pub fn from_utf8_lossy(input: &[u8]) -> Result<Self, AllocError> {
        Self::from_utf8_lossy_with(input, &Utf8Config::default())
    }

    /// Repair arbitrary bytes into UTF-8 valid under `config`.
    pub fn from_utf8_lossy_with(input: &[u8], config: &Utf8Config) -> Result<Self, AllocError> {
        repair_utf8(input, config).map(|repair| repair.string)
    }

    /// Borrow as a view.
    #[inline]
    pub fn as_utf8_str(&self) -> Utf8Str<'_> {
        Utf8Str::from_validated(&self.bytes)
    }

    /// The owned bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length in bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Is the string empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Give up ownership of the bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Repair arbitrary bytes, reporting how many replacements were made.
///
/// ```
/// use utf8view::text::owned::repair_utf8;
/// use utf8view::Utf8Config;
///
/// let repair = repair_utf8(b"\xC0\xC0\xC0\xC0", &Utf8Config::default()).unwrap();
/// assert_eq!(repair.replacements, 4);
/// assert_eq!(repair.string, "\u{FFFD}\u{FFFD}\u{FFFD}\u{FFFD}");
/// ```
pub fn repair_utf8(input: &[u8], config: &Utf8Config) -> Result<Repair, AllocError> {
    let worst_case = input
        .len()
        .checked_mul(REPLACEMENT_CHARACTER.len())
        .ok_or(AllocError {
            requested: usize::MAX,
        })?;

    let mut bytes = Vec::new();
    bytes
        .try_reserve_exact(worst_case)
        .map_err(|_| AllocError {
            requested: worst_case,
        })?;

    let mut offset = 0;
    // Start of the pending run of valid bytes
    let mut run_start = 0;
    let mut replacements = 0;

    while offset < input.len() {
        match classify_char(input, offset, config) {
            Ok(seq_len) => offset += seq_len,
            Err(_) => {
                bytes.extend_from_slice(&input[run_start..offset]);
                bytes.extend_from_slice(&REPLACEMENT_CHARACTER);
                replacements += 1;
                offset += 1;
                run_start = offset;
            }
        }
    }
    bytes.extend_from_slice(&input[run_start..]);
    bytes.shrink_to_fit();

    log::debug!(
        "utf8 repair: {} bytes in, {} bytes out, {} replacements",
        input.len(),
        bytes.len(),
        replacements
    );

    Ok(Repair {
        string: Utf8String { bytes },
        replacements,
    })
}

impl From<Utf8Str<'_>> for Utf8String {
    fn from(view: Utf8Str<'_>) -> Self {
        Self {
            bytes: view.as_bytes().to_vec(),
        }
    }
}

impl From<&str> for Utf8String {
    fn from(s: &str) -> Self {
        Self {
            bytes: s.as_bytes().to_vec(),
        }
    }
}

impl AsRef<[u8]> for Utf8String {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl PartialEq<str> for Utf8String {
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<&str> for Utf8String {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl fmt::Display for Utf8String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_utf8_str(), f)
    }
}

impl fmt::Debug for Utf8String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_utf8_str().to_str() {
            Some(s) => write!(f, "Utf8String({:?})", s),
            None => write!(f, "Utf8String({:02X?})", self.bytes),
        }
    }
}
