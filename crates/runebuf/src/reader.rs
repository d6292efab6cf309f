use alloc::{string::String, vec::Vec};

use bstr::ByteSlice;
use log::{debug, trace};

use crate::{Error, Outcome, ReaderOptions, buffer::Lookahead, source::RuneSource};

/// Buffered rune-level reader over a [`RuneSource`].
///
/// Runes pulled from the source are kept in a lookahead buffer until a
/// consuming read removes them. Peeking fills the buffer but never drains
/// it, so any amount of lookahead can be taken and then read back in full.
///
/// The reader never pushes a rune back onto its source. [`read_while`] checks
/// each rune while it is still buffered and only consumes it once the
/// predicate accepts it; the first rejected rune stays in the buffer for the
/// next operation.
///
/// Counted operations return an [`Outcome`]. When the source stops early the
/// outcome carries the partial result together with the reason.
///
/// ```rust
/// use runebuf::{RuneReader, StrSource};
///
/// let mut reader = RuneReader::new(StrSource::new("Hello World"));
/// assert_eq!(reader.read_while(char::is_alphabetic), "Hello");
/// assert_eq!(*reader.peek_one().value(), ' ');
/// assert_eq!(reader.remainder().unwrap(), " World");
/// ```
///
/// [`read_while`]: RuneReader::read_while
#[derive(Debug)]
pub struct RuneReader<S> {
    source: S,
    buffer: Lookahead,
    /// Decode or I/O failure held until a consuming read takes it.
    stalled: Option<Error>,
    options: ReaderOptions,
}

impl<S: RuneSource> RuneReader<S> {
    /// Creates a reader with default [`ReaderOptions`].
    pub fn new(source: S) -> Self {
        Self::with_options(source, ReaderOptions::default())
    }

    /// Creates a reader with the given options.
    pub fn with_options(source: S, options: ReaderOptions) -> Self {
        Self {
            source,
            buffer: Lookahead::with_capacity(options.capacity),
            stalled: None,
            options,
        }
    }

    /// The options this reader was built with.
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Pulls from the source until `k` runes are buffered.
    ///
    /// Does not touch the source when enough runes are already buffered. On a
    /// stop every rune pulled so far stays buffered.
    ///
    /// A decode or I/O failure is held as `stalled` and reported again by
    /// every later call that needs more runes, until a consuming call takes
    /// it.
    fn ensure(&mut self, k: usize, pull: Pull) -> Result<(), Error> {
        let deficit = k.saturating_sub(self.buffer.len());
        if deficit == 0 {
            return Ok(());
        }
        let held = match pull {
            Pull::Look => self.stalled.as_ref().map(Error::duplicate),
            Pull::Consume => self.stalled.take(),
        };
        if let Some(err) = held {
            return Err(err);
        }
        for _ in 0..deficit {
            match self.source.read_rune() {
                Ok((ch, width)) => {
                    trace!("pulled {ch:?} ({width} bytes)");
                    self.buffer.push(ch);
                }
                Err(err) if err.is_exhausted() => return Err(err),
                Err(err) => {
                    debug!("source failed with {} runes buffered: {err}", self.buffer.len());
                    if matches!(pull, Pull::Look) {
                        self.stalled = Some(err.duplicate());
                    }
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    /// Returns up to `n` upcoming runes without consuming them.
    ///
    /// Repeated peeks of the same or a smaller amount are served from the
    /// buffer. A peek that stops on a decode failure stops on the same failure
    /// when repeated; a consuming read past the buffered runes clears it.
    pub fn peek(&mut self, n: usize) -> Outcome<&[char]> {
        let stop = self.ensure(n, Pull::Look).err();
        let runes = self.buffer.as_slice();
        let len = n.min(runes.len());
        Outcome::new(&runes[..len], stop)
    }

    /// Returns the next rune without consuming it.
    ///
    /// On a stop the value is the configured replacement rune.
    pub fn peek_one(&mut self) -> Outcome<char> {
        let stop = self.ensure(1, Pull::Look).err();
        self.single(self.buffer.front(), stop)
    }

    /// Removes and returns up to `n` runes.
    ///
    /// A failure that stopped an earlier peek is reported here once, after
    /// which reads resume past the malformed input.
    pub fn read(&mut self, n: usize) -> Outcome<Vec<char>> {
        let stop = self.ensure(n, Pull::Consume).err();
        Outcome::new(self.buffer.take(n), stop)
    }

    /// Removes and returns the next rune.
    ///
    /// On a stop the value is the configured replacement rune.
    pub fn read_one(&mut self) -> Outcome<char> {
        let stop = self.ensure(1, Pull::Consume).err();
        let ch = if stop.is_none() {
            self.buffer.pop_front()
        } else {
            None
        };
        self.single(ch, stop)
    }

    /// Discards up to `n` runes, returning how many were discarded.
    pub fn skip(&mut self, n: usize) -> Outcome<usize> {
        let stop = self.ensure(n, Pull::Consume).err();
        Outcome::new(self.buffer.discard(n), stop)
    }

    /// Reads runes for as long as `predicate` accepts them.
    ///
    /// The first rejected rune is not consumed. The end of input ends the
    /// run silently. A failing source also ends it, and the failure is
    /// reported by the next operations that need more runes, until a
    /// consuming read takes it.
    pub fn read_while<P>(&mut self, predicate: P) -> String
    where
        P: FnMut(char) -> bool,
    {
        let mut runes = String::new();
        self.read_while_into(&mut runes, predicate);
        runes
    }

    /// Appends runes to `dst` for as long as `predicate` accepts them,
    /// returning how many were appended.
    ///
    /// See [`read_while`](RuneReader::read_while).
    pub fn read_while_into<P>(&mut self, dst: &mut String, mut predicate: P) -> usize
    where
        P: FnMut(char) -> bool,
    {
        let mut copied = 0;
        loop {
            copied += self.buffer.copy_while(dst, &mut predicate);
            if !self.buffer.is_empty() {
                return copied;
            }
            if self.ensure(1, Pull::Look).is_err() {
                return copied;
            }
        }
    }

    /// Discards runes for as long as `predicate` accepts them, returning how
    /// many were discarded. The first rejected rune is not consumed.
    pub fn skip_while<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(char) -> bool,
    {
        let mut skipped = 0;
        loop {
            if self.ensure(1, Pull::Look).is_err() {
                return skipped;
            }
            match self.buffer.front() {
                Some(ch) if predicate(ch) => {
                    self.buffer.pop_front();
                    skipped += 1;
                }
                _ => return skipped,
            }
        }
    }

    /// Returns every buffered rune followed by everything left in the source.
    ///
    /// Drains the source. Buffered runes are left in place; only reads
    /// remove them. Bytes that are not valid UTF-8 are replaced with
    /// U+FFFD.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails while being drained. Reaching the
    /// end of input is not an error.
    pub fn remainder(&mut self) -> Result<String, Error> {
        let mut bytes = Vec::new();
        match self.source.drain_into(&mut bytes) {
            Ok(_) => {}
            Err(err) if err.is_exhausted() => {}
            Err(err) => return Err(err),
        }
        self.stalled = None;

        let mut text = String::with_capacity(self.buffer.len() + bytes.len());
        self.buffer.copy_all(&mut text);
        text.push_str(&bytes.to_str_lossy());
        Ok(text)
    }

    /// Replaces the source, returning the previous one.
    ///
    /// Runes already buffered from the previous source are kept and are read
    /// before anything from the new one. A failure still pending from the
    /// previous source is dropped.
    pub fn reset(&mut self, source: S) -> S {
        if !self.buffer.is_empty() {
            debug!("reset with {} stale runes buffered", self.buffer.len());
        }
        self.stalled = None;
        core::mem::replace(&mut self.source, source)
    }

    /// Returns `true` if the next [`peek_one`](RuneReader::peek_one) would
    /// report the end of input.
    ///
    /// A source that fails to decode is not at its end.
    pub fn at_end(&mut self) -> bool {
        self.buffer.is_empty() && self.peek_one().is_exhausted()
    }

    /// Reads the remaining runes one at a time.
    ///
    /// ```rust
    /// use runebuf::{BytesSource, RuneReader};
    ///
    /// let mut reader = RuneReader::new(BytesSource::new(b"a\xFFb"));
    /// let runes: Vec<_> = reader.runes().map(|rune| rune.ok()).collect();
    /// assert_eq!(runes, [Some('a'), None, Some('b')]);
    /// ```
    pub fn runes(&mut self) -> Runes<'_, S> {
        Runes { reader: self }
    }

    /// Number of runes currently buffered.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// The buffered runes, without pulling from the source.
    pub fn buffered_runes(&mut self) -> &[char] {
        self.buffer.as_slice()
    }

    /// Gets a reference to the source.
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    /// Gets a mutable reference to the source.
    ///
    /// Pulling from the source directly skips over the buffered runes.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Unwraps the source. Buffered runes are dropped.
    pub fn into_inner(self) -> S {
        self.source
    }

    fn single(&self, ch: Option<char>, stop: Option<Error>) -> Outcome<char> {
        match (ch, stop) {
            (Some(ch), None) => Outcome::complete(ch),
            (_, stop) => Outcome::new(self.options.replacement, stop.or(Some(Error::Exhausted))),
        }
    }
}

/// Whether a pull may clear a held failure.
#[derive(Clone, Copy)]
enum Pull {
    Look,
    Consume,
}

/// Iterator over the runes of a [`RuneReader`], created by
/// [`RuneReader::runes`].
///
/// Yields `Err` for each decode or I/O failure and ends at the end of input.
#[derive(Debug)]
pub struct Runes<'a, S> {
    reader: &'a mut RuneReader<S>,
}

impl<S: RuneSource> Iterator for Runes<'_, S> {
    type Item = Result<char, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_one().into_parts() {
            (ch, None) => Some(Ok(ch)),
            (_, Some(Error::Exhausted)) => None,
            (_, Some(err)) => Some(Err(err)),
        }
    }
}
