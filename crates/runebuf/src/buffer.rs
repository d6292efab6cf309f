use alloc::{collections::VecDeque, string::String, vec::Vec};

/// Runes already pulled from a source but not yet consumed.
///
/// Front is the next rune to read. Runes are only ever appended at the back
/// and removed from the front.
#[derive(Debug)]
pub(crate) struct Lookahead {
    data: VecDeque<char>,
}

impl Lookahead {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            data: VecDeque::with_capacity(capacity),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub(crate) fn push(&mut self, ch: char) {
        self.data.push_back(ch);
    }

    pub(crate) fn front(&self) -> Option<char> {
        self.data.front().copied()
    }

    pub(crate) fn pop_front(&mut self) -> Option<char> {
        self.data.pop_front()
    }

    /// Contiguous view of every buffered rune.
    pub(crate) fn as_slice(&mut self) -> &[char] {
        self.data.make_contiguous()
    }

    /// Removes and returns the first `n` runes (fewer if not buffered).
    pub(crate) fn take(&mut self, n: usize) -> Vec<char> {
        let n = n.min(self.data.len());
        self.data.drain(..n).collect()
    }

    /// Drops the first `n` runes, returning how many were dropped.
    pub(crate) fn discard(&mut self, n: usize) -> usize {
        let n = n.min(self.data.len());
        self.data.drain(..n);
        n
    }

    /// Appends every buffered rune to `dst` without consuming them.
    pub(crate) fn copy_all(&self, dst: &mut String) {
        dst.extend(self.data.iter());
    }

    /// Moves the longest buffered prefix accepted by `predicate` into `dst`.
    ///
    /// Stops at the first rejected rune, which stays buffered, or when the
    /// buffer drains. Returns the number of runes moved.
    pub(crate) fn copy_while<F>(&mut self, dst: &mut String, mut predicate: F) -> usize
    where
        F: FnMut(char) -> bool,
    {
        let mut copied = 0;
        loop {
            // The ring may wrap, so accept its front slice first, then the
            // back one once the front has drained.
            let (front, _) = self.data.as_slices();
            let accepted = front.iter().take_while(|&&ch| predicate(ch)).count();
            if accepted == 0 {
                return copied;
            }
            let drained_front = accepted == front.len();
            dst.extend(self.data.drain(..accepted));
            copied += accepted;
            if !drained_front {
                return copied;
            }
        }
    }
}

#[cfg(test)]
mod tests;
