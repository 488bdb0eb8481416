//! Reordering and truncating a built index.
//!
//! Sorting must happen before limiting: `limit` keeps the tail of whatever
//! order the index is in at that moment.

use std::cmp::Reverse;

use super::Index;

impl Index {
    /// Sort by manifest `created`, most recent first.
    ///
    /// The sort is stable. A timestamp that does not parse as RFC 3339 is
    /// never considered newer than another entry, so such entries end up
    /// after all parseable ones and keep their relative order.
    pub fn sort_by_created(&mut self) {
        self.0.sort_by_key(|entry| Reverse(entry.manifest.created_at()));
    }

    /// Keep only the last `n` entries when `n > 0` and the index is longer.
    ///
    /// `0` means unlimited.
    pub fn limit(&mut self, n: usize) {
        if n > 0 && self.0.len() > n {
            let excess = self.0.len() - n;
            self.0.drain(..excess);
        }
    }
}
