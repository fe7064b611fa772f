//! Forward character iteration over validated UTF-8.
//!
//! [`CharIter`] is an external cursor: each [`CharIter::advance`] yields one
//! [`Utf8Char`] borrowed from the underlying buffer. Once the cursor reaches
//! the end it keeps returning a zero-length sentinel character positioned at
//! the end of the buffer, no matter how often it is advanced.
//!
//! ```
//! use utf8view::Utf8Str;
//!
//! let view = Utf8Str::new("Hд".as_bytes()).unwrap();
//! let mut iter = view.chars();
//!
//! assert_eq!(iter.advance().as_bytes(), b"H");
//! assert_eq!(iter.advance().byte_len(), 2);
//! assert!(iter.advance().is_end());
//! assert!(iter.advance().is_end());
//! ```

use core::fmt;
use core::iter::FusedIterator;

use super::boundary::is_char_boundary;
use super::utf8::unpack;
use super::view::Utf8Str;

/// One character borrowed from a validated buffer.
///
/// A character with `byte_len() == 0` is the end-of-input sentinel produced
/// by an exhausted [`CharIter`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Utf8Char<'a> {
    bytes: &'a [u8],
}

impl<'a> Utf8Char<'a> {
    #[inline]
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// The encoded bytes of this character.
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Number of bytes in the encoding (0 for the sentinel, else 1-4).
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Is this the end-of-input sentinel?
    #[inline]
    pub fn is_end(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decode the code point of this character.
    ///
    /// Returns `None` for the sentinel. Overlong and range policy are not
    /// re-checked; characters come from validated views.
    ///
    /// ```
    /// use utf8view::Utf8Str;
    ///
    /// let view = Utf8Str::new("Hдこ😁".as_bytes()).unwrap();
    /// let points: Vec<u32> = view.chars().filter_map(|c| c.code_point()).collect();
    /// assert_eq!(points, [72, 1076, 12371, 128513]);
    /// ```
    #[inline]
    pub fn code_point(&self) -> Option<u32> {
        unpack(self.bytes)
    }

    /// Convert to a `char`.
    ///
    /// Returns `None` for the sentinel and for values above U+10FFFF, which
    /// the default policy admits but `char` cannot represent.
    #[inline]
    pub fn to_char(&self) -> Option<char> {
        self.code_point().and_then(char::from_u32)
    }
}

impl fmt::Debug for Utf8Char<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code_point() {
            Some(cp) => write!(f, "Utf8Char(U+{:04X}, {:02X?})", cp, self.bytes),
            None => write!(f, "Utf8Char(<end>)"),
        }
    }
}

impl fmt::Display for Utf8Char<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_end() {
            return Ok(());
        }
        fmt::Write::write_char(f, self.to_char().unwrap_or(char::REPLACEMENT_CHARACTER))
    }
}

impl PartialEq<str> for Utf8Char<'_> {
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<&str> for Utf8Char<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

/// Forward cursor over the characters of a [`Utf8Str`].
///
/// The cursor always rests on a character boundary or on the end of the
/// buffer. Advancing requires `&mut self`, so one iterator is driven by one
/// consumer at a time; create a fresh iterator from the view to restart.
#[derive(Clone, Debug)]
pub struct CharIter<'a> {
    bytes: &'a [u8],
    /// Current position in bytes (byte offset)
    pos: usize,
}

impl<'a> CharIter<'a> {
    /// Create a cursor at the start of validated bytes.
    #[inline]
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Yield the next character, or the zero-length sentinel at the end.
    ///
    /// At the end the cursor does not move, so repeated calls keep returning
    /// the sentinel.
    pub fn advance(&mut self) -> Utf8Char<'a> {
        let len = self.bytes.len();
        if self.pos >= len {
            return Utf8Char::new(&self.bytes[len..]);
        }

        let start = self.pos;
        self.pos += 1;
        while !is_char_boundary(self.bytes, self.pos) {
            self.pos += 1;
        }

        Utf8Char::new(&self.bytes[start..self.pos])
    }

    /// Current byte offset of the cursor.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Has the cursor reached the end?
    #[inline]
    pub fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// The characters not yet yielded.
    #[inline]
    pub fn as_utf8_str(&self) -> Utf8Str<'a> {
        Utf8Str::from_validated(&self.bytes[self.pos..])
    }
}

impl<'a> Iterator for CharIter<'a> {
    type Item = Utf8Char<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let ch = self.advance();
        if ch.is_end() {
            None
        } else {
            Some(ch)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bytes.len() - self.pos;
        (remaining.div_ceil(4), Some(remaining))
    }
}

impl FusedIterator for CharIter<'_> {}
