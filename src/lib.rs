//! # utf8view
//!
//! Validated UTF-8 views over borrowed byte buffers.
//!
//! This crate validates raw bytes as UTF-8 and wraps the result in a cheap,
//! copyable view that knows its byte length. On top of the view it provides
//! character-boundary-aware slicing, a forward character iterator, linear
//! random access and counting, code point decoding, and a lossy repair path
//! that turns arbitrary bytes into an owned, always-valid string.
//!
//! ## Module Organization
//!
//! - [`text`] - Validation, views, iteration and repair
//!
//! ## Quick Start
//!
//! ```
//! use utf8view::{Utf8Str, Utf8String};
//!
//! let view = Utf8Str::new("Hдこ😁".as_bytes()).unwrap();
//! assert_eq!(view.byte_len(), 10);
//! assert_eq!(view.char_count(), 4);
//!
//! // Slicing must land on character boundaries
//! assert!(view.slice(1, 2).is_ok());
//! assert!(view.slice(2, 1).is_err());
//!
//! // Lossy repair replaces every invalid byte with U+FFFD
//! let repaired = Utf8String::from_utf8_lossy(b"\xC1\x88").unwrap();
//! assert_eq!(repaired.as_bytes(), "\u{FFFD}\u{FFFD}".as_bytes());
//! ```
//!
//! ## Features
//!
//! - `std` (default) - `std::error::Error` implementations
//! - `serde` - Serialization of [`Utf8Config`] and validation errors
//! - `cli` - The `utf8view` command-line tool

// Use no_std unless std feature is enabled or we're in test mode
#![cfg_attr(not(any(test, feature = "std")), no_std)]

// When using no_std, we need to explicitly link the alloc crate
#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

// When using std, re-export alloc types from std for compatibility
#[cfg(any(test, feature = "std"))]
extern crate std as alloc;

/// UTF-8 validation, string views, iteration and lossy repair.
pub mod text;

// =============================================================================
// Public re-exports
// =============================================================================

pub use text::boundary::{is_boundary_byte, is_char_boundary};
pub use text::chars::{CharIter, Utf8Char};
pub use text::config::Utf8Config;
pub use text::owned::{repair_utf8, AllocError, FromUtf8Error, Repair, Utf8String};
pub use text::utf8::{validate_utf8, validate_utf8_with, Utf8Error, Utf8ErrorKind};
pub use text::view::{BoundaryError, Utf8Str};
