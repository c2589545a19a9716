//! Several strided views presented as one logically contiguous sequence.
//!
//! A [ConcatenatedView] keeps its sub-arrays as they are and maps a single 0-based index space onto them through a
//! table of cumulative lengths.  Nothing is copied: every element read or written lands in whatever memory the
//! sub-arrays alias.
//!
//! Index resolution scans the cumulative table linearly.  The expected fan-out is a handful of LED strips, where a
//! linear scan over a few `usize`s beats anything clever; above [BISECT_THRESHOLD] sub-arrays it switches to a binary
//! search over the same table.
use std::cell::Cell;
use std::fmt;

use num::traits::{CheckedDiv, CheckedRem, WrappingAdd, WrappingMul, WrappingSub};
use smallvec::SmallVec;

use crate::error::{Result, ViewError};
use crate::indexing::{normalize_index, split_slice};
use crate::operand::Operand;
use crate::plane::Plane;
use crate::strided::StridedView;

/// Above this many sub-arrays, index resolution uses a binary search rather than a linear scan.
pub const BISECT_THRESHOLD: usize = 16;

/// An ordered list of [StridedView]s exposing one logical index space.
///
/// The structure is fixed at construction: adding or removing sub-arrays means building a new view.  Cloning copies
/// only the descriptors.  Every view is writable through its cells, so the elementwise operations
/// ([ConcatenatedView::combine] and friends) live here too.
pub struct ConcatenatedView<'a, T> {
    arrays: Vec<StridedView<'a, T>>,

    /// `cumulative_counts[i]` is the total length of `arrays[0..=i]`.
    cumulative_counts: SmallVec<[usize; 8]>,
}

impl<T> Clone for ConcatenatedView<'_, T> {
    fn clone(&self) -> Self {
        ConcatenatedView {
            arrays: self.arrays.clone(),
            cumulative_counts: self.cumulative_counts.clone(),
        }
    }
}

impl<'a, T: Copy> ConcatenatedView<'a, T> {
    pub fn new(arrays: Vec<StridedView<'a, T>>) -> Result<Self> {
        if arrays.is_empty() {
            return Err(ViewError::EmptyConstruction);
        }

        let mut total = 0;
        let cumulative_counts = arrays
            .iter()
            .map(|a| {
                total += a.len();
                total
            })
            .collect();

        log::trace!(
            "Concatenating {} sub-arrays into a view of {} elements",
            arrays.len(),
            total
        );

        Ok(Self {
            arrays,
            cumulative_counts,
        })
    }

    pub fn num_arrays(&self) -> usize {
        self.arrays.len()
    }

    pub fn arrays(&self) -> &[StridedView<'a, T>] {
        &self.arrays[..]
    }

    pub fn cumulative_counts(&self) -> &[usize] {
        &self.cumulative_counts[..]
    }

    /// Map a Python-style global index to `(array_index, local_offset)`.
    pub fn resolve(&self, index: isize) -> Result<(usize, usize)> {
        let index = normalize_index(index, self.len())?;
        Ok(self.resolve_normalized(index))
    }

    /// Inverse of [ConcatenatedView::resolve].
    pub fn global_index(&self, array: usize, offset: usize) -> usize {
        self.array_start(array) + offset
    }

    #[inline(always)]
    fn array_start(&self, array: usize) -> usize {
        if array == 0 {
            0
        } else {
            self.cumulative_counts[array - 1]
        }
    }

    /// Resolve an index already known to be in `[0, len)`.
    pub(crate) fn resolve_normalized(&self, index: usize) -> (usize, usize) {
        let array = if self.arrays.len() > BISECT_THRESHOLD {
            self.find_array_bisect(index)
        } else {
            self.find_array_linear(index)
        };
        (array, index - self.array_start(array))
    }

    #[doc(hidden)]
    pub fn find_array_linear(&self, index: usize) -> usize {
        for (i, count) in self.cumulative_counts.iter().enumerate() {
            if *count > index {
                return i;
            }
        }
        unreachable!("Index {index} was not normalized against the view length");
    }

    #[doc(hidden)]
    pub fn find_array_bisect(&self, index: usize) -> usize {
        // First position whose cumulative count exceeds the index.  Empty sub-arrays repeat the previous count and so
        // are never selected.
        self.cumulative_counts.partition_point(|count| *count <= index)
    }

    /// A cursor at the given position, which may be `len()` (one past the end).
    pub fn cursor(&self, position: usize) -> Result<Cursor<'_, T>> {
        let mut cursor = self.begin();
        cursor.offset_by(position as isize)?;
        Ok(cursor)
    }

    fn begin(&self) -> Cursor<'_, T> {
        let mut cursor = Cursor {
            view: self,
            array: 0,
            offset: 0,
        };
        cursor.skip_exhausted();
        cursor
    }

    fn end(&self) -> Cursor<'_, T> {
        Cursor {
            view: self,
            array: self.arrays.len(),
            offset: 0,
        }
    }

    pub fn iter(&self) -> ConcatenatedCells<'_, T> {
        ConcatenatedCells {
            front: self.begin(),
            back: self.end(),
            remaining: self.len(),
        }
    }

    /// Select every `step`th element of `start..stop`, across sub-array boundaries.
    ///
    /// `start` and `stop` must already be normalized; Python-style negative values are the caller's problem.  The
    /// result aliases the same memory as `self`.  Fails with [ViewError::EmptyConstruction] if no sub-array
    /// intersects the range at all.
    pub fn slice(&self, start: usize, stop: usize, step: usize) -> Result<ConcatenatedView<'a, T>> {
        if step == 0 {
            return Err(ViewError::ZeroStep);
        }

        let arrays = split_slice(self.arrays.iter().map(|a| a.len()), start, stop, step)
            .into_iter()
            .map(|s| self.arrays[s.segment].slice(s.start, s.stop, step))
            .collect::<Result<Vec<_>>>()?;

        ConcatenatedView::new(arrays)
    }

    /// Copy every sub-array into owning storage, detaching the result from the memory `self` aliases.
    pub fn deep_copy(&self) -> ConcatenatedView<'a, T> {
        ConcatenatedView {
            arrays: self.arrays.iter().map(StridedView::deep_copy).collect(),
            cumulative_counts: self.cumulative_counts.clone(),
        }
    }

    /// Visit every element alongside the matching element of `rhs`.
    ///
    /// Sizes are checked before anything is visited.  Operand values are those from before the first visit, even when
    /// the operand shares memory with `self`.
    fn for_each_pair(
        &self,
        rhs: Operand<'_, '_, T>,
        mut visit: impl FnMut(&Cell<T>, T) -> Result<()>,
    ) -> Result<()> {
        if let Some(actual) = rhs.len() {
            if actual != self.len() {
                return Err(ViewError::SizeMismatch {
                    expected: self.len(),
                    actual,
                });
            }
        }

        match rhs {
            Operand::Scalar(scalar) => {
                for cell in self.iter() {
                    visit(cell, scalar)?;
                }
            }
            Operand::Flat(values) => {
                let cells = self.arrays.iter().flat_map(|a| a.iter());
                for (cell, value) in cells.zip(values.iter()) {
                    visit(cell, *value)?;
                }
            }
            Operand::View(other) => {
                // The operand may alias this view, so it is read in full before the first visit.
                let values = other.iter().map(Cell::get).collect::<Vec<_>>();
                for (cell, value) in self.iter().zip(values) {
                    visit(cell, value)?;
                }
            }
        }

        Ok(())
    }

    /// Replace every element `x` with `func(x, rhs)`, where `rhs` is the matching element of the operand.
    pub fn combine<'r, 'b>(
        &self,
        rhs: impl Into<Operand<'r, 'b, T>>,
        mut func: impl FnMut(T, T) -> T,
    ) -> Result<()>
    where
        T: 'b,
        'b: 'r,
    {
        self.for_each_pair(rhs.into(), |cell, r| {
            cell.set(func(cell.get(), r));
            Ok(())
        })
    }

    /// Like [ConcatenatedView::combine], but `func` may refuse.
    ///
    /// Every result is computed before anything is written, so a refusal leaves the view untouched.
    pub fn try_combine<'r, 'b>(
        &self,
        rhs: impl Into<Operand<'r, 'b, T>>,
        mut func: impl FnMut(T, T) -> Option<T>,
        error: ViewError,
    ) -> Result<()>
    where
        T: 'b,
        'b: 'r,
    {
        let mut results = Vec::with_capacity(self.len());
        self.for_each_pair(rhs.into(), |cell, r| {
            results.push(func(cell.get(), r).ok_or_else(|| error.clone())?);
            Ok(())
        })?;

        for (cell, value) in self.iter().zip(results) {
            cell.set(value);
        }

        Ok(())
    }
}

impl<'a, T> ConcatenatedView<'a, T>
where
    T: Copy + WrappingAdd + WrappingSub + WrappingMul + CheckedDiv + CheckedRem,
{
    pub fn assign<'r, 'b>(&self, rhs: impl Into<Operand<'r, 'b, T>>) -> Result<()>
    where
        T: 'b,
        'b: 'r,
    {
        self.combine(rhs, |_, r| r)
    }

    /// Add in place, wrapping on overflow.
    pub fn add<'r, 'b>(&self, rhs: impl Into<Operand<'r, 'b, T>>) -> Result<()>
    where
        T: 'b,
        'b: 'r,
    {
        self.combine(rhs, |l, r| l.wrapping_add(&r))
    }

    /// Subtract in place, wrapping on underflow.
    pub fn subtract<'r, 'b>(&self, rhs: impl Into<Operand<'r, 'b, T>>) -> Result<()>
    where
        T: 'b,
        'b: 'r,
    {
        self.combine(rhs, |l, r| l.wrapping_sub(&r))
    }

    /// Multiply in place, wrapping on overflow.
    pub fn multiply<'r, 'b>(&self, rhs: impl Into<Operand<'r, 'b, T>>) -> Result<()>
    where
        T: 'b,
        'b: 'r,
    {
        self.combine(rhs, |l, r| l.wrapping_mul(&r))
    }

    /// Divide in place.  Fails with [ViewError::DivideByZero] without writing anything if any divisor is zero.
    pub fn divide<'r, 'b>(&self, rhs: impl Into<Operand<'r, 'b, T>>) -> Result<()>
    where
        T: 'b,
        'b: 'r,
    {
        self.try_combine(rhs, |l, r| l.checked_div(&r), ViewError::DivideByZero)
    }

    /// Remainder in place.  Fails with [ViewError::DivideByZero] without writing anything if any divisor is zero.
    pub fn modulo<'r, 'b>(&self, rhs: impl Into<Operand<'r, 'b, T>>) -> Result<()>
    where
        T: 'b,
        'b: 'r,
    {
        self.try_combine(rhs, |l, r| l.checked_rem(&r), ViewError::DivideByZero)
    }
}

impl<T: Copy> Plane<T> for ConcatenatedView<'_, T> {
    type Cells<'s>
        = ConcatenatedCells<'s, T>
    where
        Self: 's,
        T: 's;

    #[inline(always)]
    fn len(&self) -> usize {
        self.cumulative_counts.last().copied().unwrap_or(0)
    }

    fn cell(&self, index: isize) -> Result<&Cell<T>> {
        let (array, offset) = self.resolve(index)?;
        Ok(self.arrays[array].cell_at(offset))
    }

    fn cells(&self) -> Self::Cells<'_> {
        self.iter()
    }
}

impl<T: Copy + fmt::Display> fmt::Display for ConcatenatedView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConcatenatedView(")?;
        for (i, array) in self.arrays.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{array}")?;
        }
        write!(f, ")")
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for ConcatenatedView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcatenatedView")
            .field("arrays", &self.arrays)
            .field("cumulative_counts", &self.cumulative_counts)
            .finish()
    }
}

/// A bidirectional position in a [ConcatenatedView], tracked as `(array, offset)` rather than a flat index.
///
/// Single steps are O(1) amortized; arbitrary jumps go through [ConcatenatedView::resolve] and so cost O(k) in the
/// number of sub-arrays rather than O(n) in the distance.
#[derive(Clone, Copy)]
pub struct Cursor<'v, T> {
    view: &'v ConcatenatedView<'v, T>,
    array: usize,
    offset: usize,
}

impl<'v, T: Copy> Cursor<'v, T> {
    /// Move past sub-arrays whose end we've reached, including empty ones.
    fn skip_exhausted(&mut self) {
        while self.array < self.view.arrays.len() && self.offset >= self.view.arrays[self.array].len() {
            self.array += 1;
            self.offset = 0;
        }
    }

    pub fn is_end(&self) -> bool {
        self.array >= self.view.arrays.len()
    }

    /// The flat index this cursor points at.  `len()` at the end.
    pub fn position(&self) -> usize {
        if self.is_end() {
            self.view.len()
        } else {
            self.view.global_index(self.array, self.offset)
        }
    }

    /// `(array, offset)` of the current element, or `None` at the end.
    pub fn indices(&self) -> Option<(usize, usize)> {
        (!self.is_end()).then_some((self.array, self.offset))
    }

    pub fn cell(&self) -> Option<&'v Cell<T>> {
        let (array, offset) = self.indices()?;
        Some(self.view.arrays[array].cell_at(offset))
    }

    /// Step forward.  Returns false if already at the end.
    pub fn advance(&mut self) -> bool {
        if self.is_end() {
            return false;
        }
        self.offset += 1;
        self.skip_exhausted();
        true
    }

    /// Step backward.  Returns false if already at the beginning.
    pub fn retreat(&mut self) -> bool {
        if self.position() == 0 {
            return false;
        }

        loop {
            if self.offset > 0 {
                self.offset -= 1;
                return true;
            }
            // Going back through the end position or an empty sub-array lands on the last element of the previous
            // one.
            self.array -= 1;
            self.offset = self.view.arrays[self.array].len();
        }
    }

    /// Jump by `delta` elements in either direction.  Landing exactly one past the end is allowed.
    pub fn offset_by(&mut self, delta: isize) -> Result<()> {
        let len = self.view.len();
        let target = self.position() as isize + delta;

        if target < 0 || target > len as isize {
            return Err(ViewError::OutOfRange { index: target, len });
        }

        if target == len as isize {
            *self = self.view.end();
        } else {
            (self.array, self.offset) = self.view.resolve_normalized(target as usize);
        }

        Ok(())
    }
}

/// Double-ended iterator over the cells of a [ConcatenatedView].
pub struct ConcatenatedCells<'v, T> {
    front: Cursor<'v, T>,
    back: Cursor<'v, T>,
    remaining: usize,
}

impl<'v, T: Copy> Iterator for ConcatenatedCells<'v, T> {
    type Item = &'v Cell<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let ret = self.front.cell();
        self.front.advance();
        self.remaining -= 1;
        ret
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        if n >= self.remaining {
            self.remaining = 0;
            return None;
        }
        if n > 0 {
            self.front.offset_by(n as isize).ok()?;
            self.remaining -= n;
        }
        self.next()
    }
}

impl<T: Copy> DoubleEndedIterator for ConcatenatedCells<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.back.retreat();
        self.remaining -= 1;
        self.back.cell()
    }
}

impl<T: Copy> ExactSizeIterator for ConcatenatedCells<'_, T> {}
