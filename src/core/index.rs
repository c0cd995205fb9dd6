// ============================================================================
// observable-collections - Signed Index Resolution
// Negative indices count from the end, as in a standard list
// ============================================================================

use std::ops::{Bound, Range, RangeBounds};

use super::error::{Error, Result};

/// Resolve a signed index to an existing position.
///
/// `-1` is the last element. Fails when the resolved position is outside
/// `0..len`.
pub fn resolve(index: isize, len: usize) -> Result<usize> {
    let resolved = if index < 0 {
        len.checked_sub(index.unsigned_abs())
    } else {
        Some(index as usize).filter(|&i| i < len)
    };

    resolved.ok_or(Error::IndexOutOfRange { index, len })
}

/// Resolve a signed index to an insertion point in `0..=len`.
///
/// Out-of-range indices clamp to the nearest end instead of failing.
pub fn insertion_point(index: isize, len: usize) -> usize {
    if index < 0 {
        len.saturating_sub(index.unsigned_abs())
    } else {
        (index as usize).min(len)
    }
}

/// Resolve any `usize` range against a collection length.
pub fn resolve_range<R: RangeBounds<usize>>(range: R, len: usize) -> Result<Range<usize>> {
    let start = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&e) => e.saturating_add(1),
        Bound::Excluded(&e) => e,
        Bound::Unbounded => len,
    };

    if start > end || end > len {
        return Err(Error::RangeOutOfRange { start, end, len });
    }
    Ok(start..end)
}
