use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::error::{Result, ViewError};
use crate::indexing::{normalize_index, strided_count};
use crate::plane::Plane;

/// Where the elements of a [StridedView] live.
enum Storage<'a, T> {
    /// Aliases memory owned by someone else, typically a hardware pixel buffer.
    Borrowed(&'a [Cell<T>]),

    /// A private copy, shared only between views sliced from the same deep copy.
    Owned(Rc<[Cell<T>]>),
}

// No `T: Clone` bound: only the reference or the `Rc` is copied.
impl<T> Clone for Storage<'_, T> {
    fn clone(&self) -> Self {
        match self {
            Storage::Borrowed(s) => Storage::Borrowed(s),
            Storage::Owned(s) => Storage::Owned(s.clone()),
        }
    }
}

impl<T> Storage<'_, T> {
    #[inline(always)]
    fn cells(&self) -> &[Cell<T>] {
        match self {
            Storage::Borrowed(s) => s,
            Storage::Owned(s) => s,
        }
    }
}

/// A one-dimensional view addressed by `(offset, len, stride)` over some cells.
///
/// Borrowing ("shallow") views alias external memory: this is how one channel of an interleaved pixel buffer is
/// addressed, e.g. every fourth byte.  Owning ("deep") views hold their own copy of the data.  Cloning a view or
/// slicing it only copies the descriptor; both results keep pointing at the same cells.  Use
/// [StridedView::deep_copy] to duplicate the data itself.
pub struct StridedView<'a, T> {
    storage: Storage<'a, T>,
    offset: usize,
    len: usize,
    stride: usize,
}

impl<T> Clone for StridedView<'_, T> {
    fn clone(&self) -> Self {
        StridedView {
            storage: self.storage.clone(),
            offset: self.offset,
            len: self.len,
            stride: self.stride,
        }
    }
}

impl<'a, T> StridedView<'a, T> {
    /// Build a borrowing view over `len` elements of `cells`, starting at `offset` and `stride` apart.
    pub fn new(cells: &'a [Cell<T>], offset: usize, len: usize, stride: usize) -> Result<Self> {
        if stride == 0 && len > 1 {
            return Err(ViewError::ZeroStep);
        }

        let too_small = || ViewError::BufferTooSmall {
            offset,
            len,
            stride,
            available: cells.len(),
        };

        if len > 0 {
            let last = (len - 1)
                .checked_mul(stride)
                .and_then(|x| x.checked_add(offset))
                .ok_or_else(too_small)?;
            if last >= cells.len() {
                return Err(too_small());
            }
        }

        Ok(Self {
            storage: Storage::Borrowed(cells),
            offset,
            len,
            stride: stride.max(1),
        })
    }

    /// A unit-stride borrowing view over an entire slice.
    pub fn from_slice(data: &'a mut [T]) -> Self {
        Self::from_cells(Cell::from_mut(data).as_slice_of_cells())
    }

    /// A unit-stride borrowing view over some cells.
    pub fn from_cells(cells: &'a [Cell<T>]) -> Self {
        Self {
            len: cells.len(),
            storage: Storage::Borrowed(cells),
            offset: 0,
            stride: 1,
        }
    }

    /// An owning view over the given values.
    pub fn owned(values: Vec<T>) -> Self {
        let cells: Rc<[Cell<T>]> = values.into_iter().map(Cell::new).collect();
        Self {
            len: cells.len(),
            storage: Storage::Owned(cells),
            offset: 0,
            stride: 1,
        }
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Does this view hold its own copy of the data?
    pub fn is_owned(&self) -> bool {
        matches!(self.storage, Storage::Owned(_))
    }

    /// Get a cell from an already-normalized index.
    ///
    /// # Panics
    ///
    /// If the index is out of bounds.  This is internal; the public entrypoints normalize first.
    #[inline(always)]
    pub(crate) fn cell_at(&self, index: usize) -> &Cell<T> {
        assert!(index < self.len);
        &self.storage.cells()[self.offset + index * self.stride]
    }

    /// View every `step`th element of `start..stop`.
    ///
    /// `stop` is clamped to the length of this view and an inverted range is empty, so this never fails for a
    /// positive step.  The result shares memory with `self`.
    pub fn slice(&self, start: usize, stop: usize, step: usize) -> Result<StridedView<'a, T>> {
        if step == 0 {
            return Err(ViewError::ZeroStep);
        }

        let stop = stop.min(self.len);
        let start = start.min(stop);
        let len = strided_count(start, stop, step);

        Ok(StridedView {
            storage: self.storage.clone(),
            offset: self.offset + start * self.stride,
            len,
            stride: self.stride * step,
        })
    }

    pub fn iter(&self) -> StridedCells<'_, T> {
        StridedCells {
            view: self,
            front: 0,
            back: self.len,
        }
    }
}

impl<'a, T: Copy> StridedView<'a, T> {
    /// Copy the data out into a new owning view, detached from the memory this view aliases.
    pub fn deep_copy(&self) -> StridedView<'a, T> {
        StridedView::owned(self.to_vec())
    }
}

impl<T: Copy> Plane<T> for StridedView<'_, T> {
    type Cells<'s>
        = StridedCells<'s, T>
    where
        Self: 's,
        T: 's;

    #[inline(always)]
    fn len(&self) -> usize {
        self.len
    }

    fn cell(&self, index: isize) -> Result<&Cell<T>> {
        let index = normalize_index(index, self.len)?;
        Ok(self.cell_at(index))
    }

    fn cells(&self) -> Self::Cells<'_> {
        self.iter()
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for StridedView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StridedView")
            .field("owned", &self.is_owned())
            .field("offset", &self.offset)
            .field("stride", &self.stride)
            .field("values", &self.to_vec())
            .finish()
    }
}

impl<T: Copy + fmt::Display> fmt::Display for StridedView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c.get())?;
        }
        write!(f, "]")
    }
}

/// Iterator over the cells of a [StridedView].
pub struct StridedCells<'s, T> {
    view: &'s StridedView<'s, T>,
    front: usize,
    back: usize,
}

impl<'s, T> Iterator for StridedCells<'s, T> {
    type Item = &'s Cell<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let ret = self.view.cell_at(self.front);
        self.front += 1;
        Some(ret)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl<T> DoubleEndedIterator for StridedCells<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.view.cell_at(self.back))
    }
}

impl<T> ExactSizeIterator for StridedCells<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn interleaved(pixels: usize) -> Vec<u8> {
        (0..(pixels * 4) as u8).collect()
    }

    #[test]
    fn test_interleaved_channel() {
        let mut data = interleaved(3);
        let cells = Cell::from_mut(&mut data[..]).as_slice_of_cells();
        let green = StridedView::new(cells, 1, 3, 4).unwrap();
        assert_eq!(green.to_vec(), vec![1, 5, 9]);

        green.set(-1, 200).unwrap();
        assert_eq!(cells[9].get(), 200);
    }

    #[test]
    fn test_too_small() {
        let mut data = interleaved(2);
        let cells = Cell::from_mut(&mut data[..]).as_slice_of_cells();
        assert!(StridedView::new(cells, 2, 3, 4)
            .unwrap_err()
            .is_buffer_too_small());
        assert!(StridedView::new(cells, 2, 2, 4).is_ok());
        assert!(StridedView::new(cells, 0, 2, 0).unwrap_err().is_zero_step());
    }

    #[test]
    fn test_descriptors_clone_for_any_element() {
        struct Opaque;

        let view = StridedView::owned(vec![Opaque, Opaque, Opaque]);
        let sliced = view.slice(1, 3, 2).unwrap();
        let cloned = sliced.clone();
        assert_eq!(cloned.stride(), 2);
        assert!(cloned.is_owned());
    }

    #[test]
    fn test_slice_shares_memory() {
        let mut data = vec![0u8; 10];
        let view = StridedView::from_slice(&mut data[..]);
        let evens = view.slice(0, 10, 2).unwrap();
        assert_eq!(evens.len(), 5);
        assert_eq!(evens.stride(), 2);
        evens.fill(7);

        let odds_of_evens = evens.slice(1, 100, 2).unwrap();
        assert_eq!(odds_of_evens.len(), 2);
        odds_of_evens.fill(9);

        assert_eq!(view.to_vec(), vec![7, 0, 9, 0, 7, 0, 9, 0, 7, 0]);
    }

    #[test]
    fn test_slice_clamps() {
        let view = StridedView::owned(vec![1u8, 2, 3]);
        assert_eq!(view.slice(5, 10, 1).unwrap().len(), 0);
        assert_eq!(view.slice(2, 1, 1).unwrap().len(), 0);
        assert!(view.slice(0, 3, 0).unwrap_err().is_zero_step());
    }

    #[test]
    fn test_deep_copy_detaches() {
        let mut data = vec![1u8, 2, 3];
        let view = StridedView::from_slice(&mut data[..]);
        let copy = view.deep_copy();
        assert!(copy.is_owned());
        assert!(!view.is_owned());

        copy.fill(0);
        assert_eq!(view.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_iter_both_ends() {
        let view = StridedView::owned(vec![1u8, 2, 3, 4]);
        let mut it = view.iter();
        assert_eq!(it.len(), 4);
        assert_eq!(it.next().map(Cell::get), Some(1));
        assert_eq!(it.next_back().map(Cell::get), Some(4));
        assert_eq!(it.len(), 2);
        assert_eq!(it.nth(1).map(Cell::get), Some(3));
        assert!(it.next().is_none());
    }

    #[test]
    fn test_display() {
        let view = StridedView::owned(vec![1u8, 2, 3]);
        assert_eq!(view.to_string(), "[1, 2, 3]");
    }
}
