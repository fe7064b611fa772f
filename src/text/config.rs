//! Configuration for UTF-8 validation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Validation policy shared by the validator, view constructors and lossy
/// repair.
///
/// The default policy accepts every well-formed 4-byte sequence
/// (`11110xxx` lead, up to U+1FFFFF). [`Utf8Config::strict`] additionally
/// rejects code points above U+10FFFF.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Utf8Config {
    /// Reject 4-byte sequences decoding above U+10FFFF (default: false)
    pub reject_out_of_range: bool,
}

impl Utf8Config {
    /// Create the default configuration.
    pub const fn new() -> Self {
        Self {
            reject_out_of_range: false,
        }
    }

    /// Create a configuration limited to the RFC 3629 code point range.
    pub const fn strict() -> Self {
        Self {
            reject_out_of_range: true,
        }
    }

    /// Set whether code points above U+10FFFF are rejected.
    pub const fn with_reject_out_of_range(mut self, reject: bool) -> Self {
        self.reject_out_of_range = reject;
        self
    }
}
