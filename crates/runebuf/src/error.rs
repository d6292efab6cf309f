#[cfg(feature = "std")]
use alloc::string::ToString;
use alloc::vec::Vec;

use bstr::BStr;
use thiserror::Error;

/// Why a source stopped producing runes.
///
/// [`Error::Exhausted`] is the ordinary end of input and is expected by every
/// counted read; the other variants are genuine failures that callers will
/// usually want to report.
#[derive(Error, Debug)]
pub enum Error {
    /// The source has no more input.
    #[error("unexpected end of input")]
    Exhausted,
    /// The source held bytes that are not valid UTF-8.
    ///
    /// The offending bytes have already been consumed from the source, so the
    /// next pull resumes right after them.
    #[error("invalid UTF-8 sequence {:?} at byte {offset}", BStr::new(.bytes))]
    Decode {
        /// Byte offset of the sequence within the source.
        offset: usize,
        /// The bytes that failed to decode.
        bytes: Vec<u8>,
    },
    /// The underlying reader failed.
    #[cfg(feature = "std")]
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` for the ordinary end-of-input condition.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Error::Exhausted)
    }

    /// Returns `true` if the source contained malformed UTF-8.
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }

    /// A copy of this error, for reporting a held failure more than once.
    ///
    /// I/O errors keep their kind and message but not their source.
    pub(crate) fn duplicate(&self) -> Error {
        match self {
            Error::Exhausted => Error::Exhausted,
            Error::Decode { offset, bytes } => Error::Decode {
                offset: *offset,
                bytes: bytes.clone(),
            },
            #[cfg(feature = "std")]
            Error::Io(err) => Error::Io(std::io::Error::new(err.kind(), err.to_string())),
        }
    }
}
