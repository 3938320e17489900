//! Finding the heading a cursor line belongs to.

use super::HeadingEntry;

/// The entry with the greatest `line <= target`, if any.
///
/// `entries` must be sorted ascending by line. Binary search: the window
/// narrows around `target` while the best candidate seen so far is kept, and
/// an exact line match returns immediately.
pub fn find_nearest(entries: &[HeadingEntry], target: usize) -> Option<&HeadingEntry> {
    let mut best = None;
    let mut lo = 0;
    let mut hi = entries.len();

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let entry = &entries[mid];
        if entry.line == target {
            return Some(entry);
        }
        if entry.line < target {
            best = Some(entry);
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }

    best
}
