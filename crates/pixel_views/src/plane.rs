use std::cell::Cell;

use crate::error::{Result, ViewError};

/// A one-dimensional sequence of writable cells.
///
/// Planes are like slices, but they may be strided and they may be backed by any number of separate buffers.  All
/// access goes through shared references to [Cell]s, so any number of planes may alias the same memory and writes
/// through one are immediately visible through the others.
///
/// Indices taken by the methods here are Python-style: negative values count back from the end.
pub trait Plane<T: Copy> {
    /// Iterator over every cell in order.
    type Cells<'s>: DoubleEndedIterator<Item = &'s Cell<T>> + ExactSizeIterator
    where
        Self: 's,
        T: 's;

    /// Number of elements in this plane.
    fn len(&self) -> usize;

    /// Get the cell at a Python-style index.
    fn cell(&self, index: isize) -> Result<&Cell<T>>;

    fn cells(&self) -> Self::Cells<'_>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: isize) -> Result<T> {
        Ok(self.cell(index)?.get())
    }

    fn set(&self, index: isize, value: T) -> Result<()> {
        self.cell(index)?.set(value);
        Ok(())
    }

    /// Copy the plane out into a flat vec.
    fn to_vec(&self) -> Vec<T> {
        self.cells().map(Cell::get).collect()
    }

    fn fill(&self, value: T) {
        self.cells().for_each(|c| c.set(value));
    }

    /// Overwrite the whole plane from a flat slice of exactly the same length.
    fn copy_from_slice(&self, values: &[T]) -> Result<()> {
        if values.len() != self.len() {
            return Err(ViewError::SizeMismatch {
                expected: self.len(),
                actual: values.len(),
            });
        }

        for (dest, src) in self.cells().zip(values.iter()) {
            dest.set(*src);
        }

        Ok(())
    }

    /// Move every element `n` places toward the start, filling the vacated tail with `fill`.
    ///
    /// If `n` is at least the length, the whole plane is filled.
    fn shift_left(&self, n: usize, fill: T) {
        let len = self.len();
        if n >= len {
            self.fill(fill);
            return;
        }

        // The destination always trails the source, so a forward copy never reads something it already overwrote.
        for (dest, src) in self.cells().zip(self.cells().skip(n)) {
            dest.set(src.get());
        }

        self.cells().skip(len - n).for_each(|c| c.set(fill));
    }

    /// Move every element `n` places toward the end, filling the vacated head with `fill`.
    ///
    /// If `n` is at least the length, the whole plane is filled.
    fn shift_right(&self, n: usize, fill: T) {
        let len = self.len();
        if n >= len {
            self.fill(fill);
            return;
        }

        // Source and destination overlap with the destination ahead of the source, so this must copy back to front.
        for (dest, src) in self.cells().rev().zip(self.cells().rev().skip(n)) {
            dest.set(src.get());
        }

        self.cells().take(n).for_each(|c| c.set(fill));
    }
}
