use crate::REPLACEMENT_CHARACTER;

/// Configuration options for a [`RuneReader`](crate::RuneReader).
///
/// # Examples
///
/// ```rust
/// use runebuf::{ReaderOptions, RuneReader, StrSource};
///
/// let options = ReaderOptions {
///     replacement: '\0',
///     ..Default::default()
/// };
/// let mut reader = RuneReader::with_options(StrSource::new(""), options);
/// assert_eq!(*reader.read_one().value(), '\0');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Sentinel returned by [`peek_one`](crate::RuneReader::peek_one) and
    /// [`read_one`](crate::RuneReader::read_one) when no rune is available.
    ///
    /// # Default
    ///
    /// [`REPLACEMENT_CHARACTER`] (U+FFFD)
    pub replacement: char,

    /// Number of runes the lookahead buffer can hold before it first grows.
    ///
    /// The buffer grows on demand, so this only avoids early reallocations
    /// for callers that know their typical lookahead.
    ///
    /// # Default
    ///
    /// `16`
    pub capacity: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            replacement: REPLACEMENT_CHARACTER,
            capacity: 16,
        }
    }
}
