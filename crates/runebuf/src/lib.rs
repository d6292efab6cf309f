//! Buffered rune-level lookahead over byte and text sources.
//!
//! [`RuneReader`] sits on top of any [`RuneSource`] and reads decoded
//! codepoints (runes) rather than bytes: read or peek `n` runes, read while a
//! predicate holds, skip, drain the rest, or ask whether the input has ended.
//! Peeked runes are cached, so lexers can look ahead as far as they need and
//! consume only what they accept.
//!
//! ```rust
//! use runebuf::{RuneReader, StrSource};
//!
//! let mut reader = RuneReader::new(StrSource::new("let x = 42;"));
//! assert_eq!(reader.read_while(char::is_alphabetic), "let");
//! reader.skip_while(char::is_whitespace);
//! assert_eq!(reader.peek(3).value(), &['x', ' ', '=']);
//! assert_eq!(reader.read(1).into_value(), ['x']);
//! assert!(!reader.at_end());
//! ```
//!
//! Reads that hit the end of input return whatever was available together
//! with [`Error::Exhausted`]; malformed input is reported as
//! [`Error::Decode`] so the two stay distinguishable.

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod buffer;
mod error;
mod options;
mod outcome;
mod reader;
pub mod source;


pub use error::Error;
pub use options::ReaderOptions;
pub use outcome::Outcome;
pub use reader::{RuneReader, Runes};
#[cfg(feature = "std")]
pub use source::IoSource;
pub use source::{BytesSource, RuneSource, StrSource};

/// Sentinel returned in place of a rune when none is available (U+FFFD).
pub const REPLACEMENT_CHARACTER: char = char::REPLACEMENT_CHARACTER;
