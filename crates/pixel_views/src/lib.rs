//! Strided and concatenated views over pixel-channel memory.
//!
//! The building blocks are:
//!
//! - [StridedView]: `(offset, len, stride)` over cells, either borrowing external memory or owning a copy.
//! - [ConcatenatedView]: several strided views behind one Python-style index space, with slicing that keeps its stride
//!   phase across sub-array boundaries and in-place elementwise arithmetic against an [Operand].
//! - [Plane]: the interface both share, including direction-correct shifting.
//!
//! All memory is reached through [std::cell::Cell], so views alias freely and a write through any of them is visible
//! through all of them.
mod concatenated;
mod error;
mod indexing;
mod operand;
mod plane;
mod strided;

pub use concatenated::{ConcatenatedCells, ConcatenatedView, Cursor, BISECT_THRESHOLD};
pub use error::{Result, ViewError};
pub use indexing::{normalize_index, split_slice, SegmentSlice};
pub use operand::Operand;
pub use plane::Plane;
pub use strided::{StridedCells, StridedView};
