//! Rune sources: anything that can decode one codepoint at a time.
//!
//! A [`RuneReader`](crate::RuneReader) only ever asks its source for the next
//! rune, or for every remaining byte at once. Three sources ship with the
//! crate:
//!
//! - [`StrSource`] walks an in-memory `&str` and never fails to decode.
//! - [`BytesSource`] decodes an in-memory `&[u8]` as UTF-8.
//! - [`IoSource`] (with the `std` feature) decodes UTF-8 incrementally from
//!   any [`BufRead`](std::io::BufRead), including sequences split across
//!   read boundaries.
//!
//! Sources are forward-only. Pass `&mut source` to a reader to keep ownership
//! of it.

use alloc::vec::Vec;

use crate::Error;

/// A forward-only decoder of codepoints.
pub trait RuneSource {
    /// Decodes the next rune, returning it along with its encoded width in
    /// bytes.
    ///
    /// # Errors
    ///
    /// - [`Error::Exhausted`] once the input ends.
    /// - [`Error::Decode`] if the next bytes are not valid UTF-8. Those bytes
    ///   are consumed, so a later call resumes after them.
    /// - [`Error::Io`] if the underlying reader fails.
    fn read_rune(&mut self) -> Result<(char, usize), Error>;

    /// Appends every remaining raw byte to `dst`, returning how many were
    /// appended. Reaching the end of input is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the underlying reader fails.
    fn drain_into(&mut self, dst: &mut Vec<u8>) -> Result<usize, Error>;
}

impl<S: RuneSource + ?Sized> RuneSource for &mut S {
    #[inline]
    fn read_rune(&mut self) -> Result<(char, usize), Error> {
        (**self).read_rune()
    }

    #[inline]
    fn drain_into(&mut self, dst: &mut Vec<u8>) -> Result<usize, Error> {
        (**self).drain_into(dst)
    }
}

/// Runes of an in-memory string.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> StrSource<'a> {
    /// Creates a source positioned at the start of `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Byte offset of the next rune.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The text not yet pulled.
    #[must_use]
    pub fn remaining(&self) -> &'a str {
        self.text.get(self.pos..).unwrap_or_default()
    }
}

impl RuneSource for StrSource<'_> {
    fn read_rune(&mut self) -> Result<(char, usize), Error> {
        let ch = self.remaining().chars().next().ok_or(Error::Exhausted)?;
        let width = ch.len_utf8();
        self.pos += width;
        Ok((ch, width))
    }

    fn drain_into(&mut self, dst: &mut Vec<u8>) -> Result<usize, Error> {
        let rest = self.remaining().as_bytes();
        dst.extend_from_slice(rest);
        self.pos = self.text.len();
        Ok(rest.len())
    }
}

/// Runes of an in-memory byte slice, decoded as UTF-8.
#[derive(Debug, Clone)]
pub struct BytesSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> BytesSource<'a> {
    /// Creates a source positioned at the start of `bytes`.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Byte offset of the next rune.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The bytes not yet pulled.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        self.bytes.get(self.pos..).unwrap_or_default()
    }
}

impl RuneSource for BytesSource<'_> {
    fn read_rune(&mut self) -> Result<(char, usize), Error> {
        let rest = self.remaining();
        if rest.is_empty() {
            return Err(Error::Exhausted);
        }

        let offset = self.pos;
        let (ch, width) = bstr::decode_utf8(rest);
        self.pos += width;
        match ch {
            Some(ch) => Ok((ch, width)),
            None => Err(Error::Decode {
                offset,
                bytes: rest[..width].to_vec(),
            }),
        }
    }

    fn drain_into(&mut self, dst: &mut Vec<u8>) -> Result<usize, Error> {
        let rest = self.remaining();
        dst.extend_from_slice(rest);
        self.pos = self.bytes.len();
        Ok(rest.len())
    }
}

#[cfg(feature = "std")]
mod io {
    use alloc::vec::Vec;
    use std::io::{BufRead, ErrorKind};

    use super::RuneSource;
    use crate::Error;

    /// Longest UTF-8 encoding of a single codepoint.
    const MAX_WIDTH: usize = 4;

    /// Runes decoded incrementally from a [`BufRead`].
    ///
    /// A codepoint may straddle two fills of the reader's buffer; the leading
    /// bytes are carried over until the rest arrive. Wrap plain
    /// [`Read`](std::io::Read) implementors in a [`BufReader`](std::io::BufReader).
    #[derive(Debug)]
    pub struct IoSource<R> {
        reader: R,
        carry: [u8; MAX_WIDTH],
        carried: usize,
        pos: usize,
        eof: bool,
    }

    impl<R: BufRead> IoSource<R> {
        /// Creates a source reading from `reader`.
        pub fn new(reader: R) -> Self {
            Self {
                reader,
                carry: [0; MAX_WIDTH],
                carried: 0,
                pos: 0,
                eof: false,
            }
        }

        /// Byte offset of the next rune.
        #[must_use]
        pub fn position(&self) -> usize {
            self.pos
        }

        /// Gets a reference to the underlying reader.
        pub fn get_ref(&self) -> &R {
            &self.reader
        }

        /// Unwraps the underlying reader. Bytes of a partially received
        /// codepoint are lost.
        pub fn into_inner(self) -> R {
            self.reader
        }

        fn fill(reader: &mut R) -> Result<&[u8], Error> {
            while let Err(e) = reader.fill_buf() {
                if e.kind() != ErrorKind::Interrupted {
                    return Err(e.into());
                }
            }
            Ok(reader.fill_buf()?)
        }

        /// Decodes the carried bytes, or returns `None` while they are still
        /// a valid but incomplete prefix.
        fn decode_carry(&mut self) -> Option<Result<(char, usize), Error>> {
            let carried = &self.carry[..self.carried];
            let (ch, width) = bstr::decode_utf8(carried);
            let incomplete = ch.is_none() && width == carried.len();
            if incomplete && !self.eof && self.carried < MAX_WIDTH {
                return None;
            }

            let offset = self.pos;
            let result = match ch {
                Some(ch) => Ok((ch, width)),
                None => Err(Error::Decode {
                    offset,
                    bytes: carried[..width].to_vec(),
                }),
            };
            self.carry.copy_within(width..self.carried, 0);
            self.carried -= width;
            self.pos += width;
            Some(result)
        }
    }

    impl<R: BufRead> RuneSource for IoSource<R> {
        fn read_rune(&mut self) -> Result<(char, usize), Error> {
            loop {
                if self.carried > 0 {
                    if let Some(result) = self.decode_carry() {
                        return result;
                    }
                } else if self.eof {
                    return Err(Error::Exhausted);
                }

                let pos = self.pos;
                let carried = self.carried;
                let buf = Self::fill(&mut self.reader)?;
                if buf.is_empty() {
                    self.eof = true;
                    continue;
                }

                if carried == 0 {
                    let (ch, width) = bstr::decode_utf8(buf);
                    match ch {
                        Some(ch) => {
                            self.reader.consume(width);
                            self.pos += width;
                            return Ok((ch, width));
                        }
                        None if width < buf.len() => {
                            let bytes = buf[..width].to_vec();
                            self.reader.consume(width);
                            self.pos += width;
                            return Err(Error::Decode { offset: pos, bytes });
                        }
                        // Valid prefix cut short by the end of this fill.
                        None => {}
                    }
                }

                let take = (MAX_WIDTH - carried).min(buf.len());
                self.carry[carried..carried + take].copy_from_slice(&buf[..take]);
                self.reader.consume(take);
                self.carried += take;
            }
        }

        fn drain_into(&mut self, dst: &mut Vec<u8>) -> Result<usize, Error> {
            let carried = self.carried;
            dst.extend_from_slice(&self.carry[..carried]);
            self.carried = 0;

            let read = self.reader.read_to_end(dst)?;
            self.eof = true;
            self.pos += carried + read;
            Ok(carried + read)
        }
    }
}

#[cfg(feature = "std")]
pub use io::IoSource;
