//! Binary search over a monotonic predicate.

/// Smallest index `i` in `[0, n)` for which `pred(i)` holds, or `n` if none.
///
/// `pred` must be monotonic on `[0, n)`: once true, it stays true. It is
/// only ever called with indices in that range.
pub fn search<F>(n: usize, mut pred: F) -> usize
where
    F: FnMut(usize) -> bool,
{
    let (mut lo, mut hi) = (0usize, n);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if pred(mid) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}
