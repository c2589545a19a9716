use crate::error::{Result, ViewError};

/// Normalize a Python-style index against a length.
///
/// Negative indices count from the end, so `-1` is the last element.  Anything outside `[-len, len)` is an error.
pub fn normalize_index(index: isize, len: usize) -> Result<usize> {
    let out_of_range = ViewError::OutOfRange { index, len };

    let len_signed = isize::try_from(len).map_err(|_| out_of_range.clone())?;
    let normalized = if index < 0 { index + len_signed } else { index };

    if normalized < 0 || normalized >= len_signed {
        return Err(out_of_range);
    }

    Ok(normalized as usize)
}

/// Number of elements selected by `start..stop` with the given step.
///
/// Assumes `step > 0`; an empty or inverted range selects nothing.
pub(crate) fn strided_count(start: usize, stop: usize, step: usize) -> usize {
    if stop <= start {
        0
    } else {
        (stop - start).div_ceil(step)
    }
}

/// One segment's share of a slice that runs across several segments.
///
/// `start` and `stop` are local to the segment, already clamped to its length.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SegmentSlice {
    pub segment: usize,
    pub start: usize,
    pub stop: usize,
}

/// Split the global slice `start..stop` by `step` over consecutive segments of the given lengths.
///
/// The start of each entry after the first carries the phase of the step over from the segment before it, so that
/// selecting each entry's `start..stop` by `step` and concatenating the results gives exactly the global selection.
/// Segments the step jumps over entirely get no entry.
///
/// `start` and `stop` must already be normalized and `step` must be positive.
pub fn split_slice(
    lengths: impl IntoIterator<Item = usize>,
    start: usize,
    stop: usize,
    step: usize,
) -> Vec<SegmentSlice> {
    assert!(step > 0);

    let mut ret = vec![];
    // Both are relative to the start of the current segment.
    let mut start = start;
    let mut stop = stop;

    for (segment, len) in lengths.into_iter().enumerate() {
        if start < len {
            let local_stop = stop.min(len);
            let local_start = start.min(local_stop);
            ret.push(SegmentSlice {
                segment,
                start: local_start,
                stop: local_stop,
            });

            if stop <= len {
                break;
            }

            // The next selected element sits `taken * step` past `start`, which is somewhere in a later segment.
            let taken = strided_count(local_start, local_stop, step);
            start = start + taken * step - len;
        } else {
            if stop <= len {
                break;
            }
            start -= len;
        }

        stop -= len;
    }

    ret
}
