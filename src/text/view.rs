//! Borrowed, validated UTF-8 views.
//!
//! A [`Utf8Str`] pairs a borrowed byte buffer with the knowledge that it is
//! valid UTF-8. It can only be created by validation, by slicing another
//! view, or from data that is already known to be valid (`&str`, an owned
//! [`Utf8String`](super::owned::Utf8String)). The borrow checker ties every
//! view to the lifetime of its buffer.
//!
//! Views never copy: slicing and iteration hand out sub-slices of the same
//! storage.

use core::ffi::CStr;
use core::fmt;

use super::boundary;
use super::chars::{CharIter, Utf8Char};
use super::config::Utf8Config;
use super::utf8::{until_nul, validate_utf8_with, Utf8Error};

/// Error returned when a requested byte range does not start or end on a
/// character boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryError {
    /// The offending byte offset (after clamping), relative to the sliced view.
    pub offset: usize,
}

impl fmt::Display for BoundaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "byte offset {} is not a character boundary", self.offset)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoundaryError {}

/// An immutable view over validated UTF-8 bytes.
///
/// `Utf8Str` is `Copy`; it holds a borrow and nothing to release.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Utf8Str<'a> {
    bytes: &'a [u8],
}

impl<'a> Utf8Str<'a> {
    /// Validate `bytes` and wrap them in a view.
    ///
    /// ```
    /// use utf8view::Utf8Str;
    ///
    /// let view = Utf8Str::new("definitely utf8 こんにちは".as_bytes()).unwrap();
    /// assert_eq!(view.byte_len(), 31);
    ///
    /// assert!(Utf8Str::new(b"non-utf8 sequence \xC0\xC0").is_err());
    /// ```
    #[inline]
    pub fn new(bytes: &'a [u8]) -> Result<Self, Utf8Error> {
        Self::with_config(bytes, &Utf8Config::default())
    }

    /// Validate `bytes` under an explicit policy.
    pub fn with_config(bytes: &'a [u8], config: &Utf8Config) -> Result<Self, Utf8Error> {
        let len = validate_utf8_with(bytes, config)?;
        Ok(Self::from_validated(&bytes[..len]))
    }

    /// View the bytes before the first NUL (or all of them if there is none).
    ///
    /// ```
    /// use utf8view::Utf8Str;
    ///
    /// let view = Utf8Str::from_bytes_until_nul(b"hello\0ignored").unwrap();
    /// assert_eq!(view, "hello");
    /// ```
    pub fn from_bytes_until_nul(bytes: &'a [u8]) -> Result<Self, Utf8Error> {
        Self::new(until_nul(bytes))
    }

    /// View the contents of a C string, excluding its terminator.
    pub fn from_c_str(s: &'a CStr) -> Result<Self, Utf8Error> {
        Self::new(s.to_bytes())
    }

    /// Wrap bytes the caller has already validated.
    #[inline]
    pub(crate) fn from_validated(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// The viewed bytes.
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Length in bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Is the view empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The view as a `&str`.
    ///
    /// Returns `None` only when the view holds code points above U+10FFFF,
    /// which the default policy admits and `str` does not.
    #[inline]
    pub fn to_str(&self) -> Option<&'a str> {
        core::str::from_utf8(self.bytes).ok()
    }

    /// Does a character start at `index`? `byte_len()` is always a boundary.
    #[inline]
    pub fn is_char_boundary(&self, index: usize) -> bool {
        boundary::is_char_boundary(self.bytes, index)
    }

    /// Sub-view of the byte range `[start, start + len)`.
    ///
    /// Both ends are clamped to `byte_len()`; a start past the end yields an
    /// empty view at the end. After clamping, both ends must be character
    /// boundaries, otherwise the whole request fails. The result shares
    /// storage with `self`.
    ///
    /// ```
    /// use utf8view::Utf8Str;
    ///
    /// let view = Utf8Str::new("Hello Здравствуйте".as_bytes()).unwrap();
    /// assert_eq!(view.slice(6, 24).unwrap(), "Здравствуйте");
    /// assert_eq!(view.slice(6, 1000).unwrap(), "Здравствуйте");
    /// assert!(view.slice(1000, 1).unwrap().is_empty());
    ///
    /// // Ends in the middle of 'д'
    /// assert_eq!(view.slice(6, 3).unwrap_err().offset, 9);
    /// ```
    pub fn slice(&self, start: usize, len: usize) -> Result<Utf8Str<'a>, BoundaryError> {
        let byte_len = self.byte_len();
        let start = start.min(byte_len);
        let end = start.saturating_add(len).min(byte_len);

        if !self.is_char_boundary(start) {
            return Err(BoundaryError { offset: start });
        }
        if !self.is_char_boundary(end) {
            return Err(BoundaryError { offset: end });
        }

        Ok(Self::from_validated(&self.bytes[start..end]))
    }

    /// Iterate over the characters of the view.
    #[inline]
    pub fn chars(&self) -> CharIter<'a> {
        CharIter::new(self.bytes)
    }

    /// The character at zero-based character index `index`, in O(n).
    ///
    /// ```
    /// use utf8view::Utf8Str;
    ///
    /// let view = Utf8Str::new("Hello Здравствуйте こんにちは".as_bytes()).unwrap();
    /// assert_eq!(view.nth_char(7).unwrap(), "д");
    /// assert!(view.nth_char(100).is_none());
    /// ```
    pub fn nth_char(&self, index: usize) -> Option<Utf8Char<'a>> {
        let mut iter = self.chars();
        let mut ch = iter.advance();
        for _ in 0..index {
            if ch.is_end() {
                return None;
            }
            ch = iter.advance();
        }

        if ch.is_end() {
            None
        } else {
            Some(ch)
        }
    }

    /// Number of characters, in O(n).
    pub fn char_count(&self) -> usize {
        let mut iter = self.chars();
        let mut count = 0;
        while !iter.advance().is_end() {
            count += 1;
        }
        count
    }
}

impl<'a> From<&'a str> for Utf8Str<'a> {
    #[inline]
    fn from(s: &'a str) -> Self {
        Self::from_validated(s.as_bytes())
    }
}

impl AsRef<[u8]> for Utf8Str<'_> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl PartialEq<str> for Utf8Str<'_> {
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<&str> for Utf8Str<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl fmt::Display for Utf8Str<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_str() {
            Some(s) => f.write_str(s),
            None => self.chars().try_for_each(|ch| fmt::Display::fmt(&ch, f)),
        }
    }
}

impl fmt::Debug for Utf8Str<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_str() {
            Some(s) => write!(f, "Utf8Str({:?})", s),
            None => write!(f, "Utf8Str({:02X?})", self.bytes),
        }
    }
}
