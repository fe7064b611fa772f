//! Text processing primitives.
//!
//! This module provides UTF-8 validation and the view types built on it.
//!
//! ## UTF-8 Validation
//!
//! The [`utf8`] module classifies byte sequences and scans whole buffers,
//! reporting the byte offset, line number, and column of the first invalid
//! sequence.
//!
//! ```
//! use utf8view::text::utf8::{validate_utf8, Utf8ErrorKind};
//!
//! // Valid UTF-8 reports the scanned length
//! assert_eq!(validate_utf8(b"Hello, world!"), Ok(13));
//! assert_eq!(validate_utf8("日本語".as_bytes()), Ok(9));
//!
//! // Invalid UTF-8 (bare continuation byte)
//! let err = validate_utf8(&[b'A', 0x80]).unwrap_err();
//! assert_eq!(err.kind, Utf8ErrorKind::InvalidLeadByte);
//! assert_eq!(err.offset, 1);
//! ```
//!
//! ## Views
//!
//! - [`view::Utf8Str`] - borrowed, validated byte range
//! - [`owned::Utf8String`] - owned, validated buffer (lossy repair)
//! - [`chars::CharIter`] - forward character cursor
//! - [`boundary`] - character boundary predicate

pub mod boundary;
pub mod chars;
pub mod config;
pub mod owned;
pub mod utf8;
pub mod view;

// Re-export commonly used types
pub use chars::{CharIter, Utf8Char};
pub use config::Utf8Config;
pub use owned::Utf8String;
pub use utf8::{validate_utf8, Utf8Error, Utf8ErrorKind};
pub use view::Utf8Str;
