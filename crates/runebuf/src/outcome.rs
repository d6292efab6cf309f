use crate::Error;

/// Result of a counted read or peek.
///
/// Unlike a plain [`Result`], an `Outcome` always carries a value: when the
/// source stops early the value holds whatever could be gathered before the
/// stop, and [`Outcome::error`] tells why it stopped.
///
/// ```rust
/// use runebuf::{RuneReader, StrSource};
///
/// let mut reader = RuneReader::new(StrSource::new("abc"));
/// let outcome = reader.read(5);
/// assert!(outcome.is_exhausted());
/// assert_eq!(outcome.value(), &['a', 'b', 'c']);
/// ```
#[derive(Debug)]
#[must_use]
pub struct Outcome<T> {
    pub(crate) value: T,
    pub(crate) stop: Option<Error>,
}

impl<T> Outcome<T> {
    pub(crate) fn complete(value: T) -> Self {
        Self { value, stop: None }
    }

    pub(crate) fn new(value: T, stop: Option<Error>) -> Self {
        Self { value, stop }
    }

    /// The gathered value, full or partial.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// `true` when the full amount requested was available.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.stop.is_none()
    }

    /// `true` when the source ran out of input before the request was met.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.stop.as_ref().is_some_and(Error::is_exhausted)
    }

    /// The reason the source stopped early, if it did.
    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        self.stop.as_ref()
    }

    /// Splits into the value and the stop reason.
    pub fn into_parts(self) -> (T, Option<Error>) {
        (self.value, self.stop)
    }

    /// Discards the stop reason.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Converts into a [`Result`], dropping any partial value on a stop.
    ///
    /// # Errors
    ///
    /// Returns the stop reason when the request could not be met in full.
    pub fn into_result(self) -> Result<T, Error> {
        match self.stop {
            None => Ok(self.value),
            Some(err) => Err(err),
        }
    }

    /// Maps the value, keeping the stop reason.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        Outcome {
            value: f(self.value),
            stop: self.stop,
        }
    }
}
