/// Reasons an operation on a view can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, derive_more::IsVariant)]
pub enum ViewError {
    #[error("Index {index} is out of range for a view of length {len}")]
    OutOfRange { index: isize, len: usize },

    #[error("Operand has {actual} elements, but the view has {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Attempt to build a concatenated view from zero sub-arrays")]
    EmptyConstruction,

    #[error("Slice steps and view strides must be positive")]
    ZeroStep,

    #[error(
        "A view of {len} elements with stride {stride} starting at {offset} does not fit in a buffer of {available} elements"
    )]
    BufferTooSmall {
        offset: usize,
        len: usize,
        stride: usize,
        available: usize,
    },

    #[error("Division or modulo by zero")]
    DivideByZero,
}

pub type Result<T, E = ViewError> = std::result::Result<T, E>;
