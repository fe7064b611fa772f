//! Character boundary predicate.
//!
//! A byte starts a character iff it is ASCII (`<= 0x7F`) or a multi-byte
//! lead (`>= 0xC0`). Continuation bytes (`0x80..=0xBF`) never do. The
//! predicate only looks at byte shape, so it is meaningful on validated
//! input only.

/// Does `byte` have the shape of a character's first byte?
#[inline(always)]
pub fn is_boundary_byte(byte: u8) -> bool {
    byte <= 0x7F || byte >= 0xC0
}

/// Is `index` a character boundary of `bytes`?
///
/// The end of the buffer (the terminator position) is always a boundary;
/// indices past it never are.
///
/// ```
/// use utf8view::is_char_boundary;
///
/// let s = "Hд".as_bytes();
/// assert!(is_char_boundary(s, 0));
/// assert!(is_char_boundary(s, 1));
/// assert!(!is_char_boundary(s, 2));
/// assert!(is_char_boundary(s, 3));
/// assert!(!is_char_boundary(s, 4));
/// ```
#[inline]
pub fn is_char_boundary(bytes: &[u8], index: usize) -> bool {
    match bytes.get(index) {
        Some(&byte) => is_boundary_byte(byte),
        None => index == bytes.len(),
    }
}
