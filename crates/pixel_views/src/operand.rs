use crate::concatenated::ConcatenatedView;
use crate::plane::Plane;

/// The right-hand side of an elementwise operation on a [ConcatenatedView].
///
/// Scalars are broadcast to every element.  Flat slices and other views must have exactly as many elements as the view
/// being written, and are consumed index-for-index.
#[derive(Clone, Copy)]
pub enum Operand<'r, 'a, T> {
    Scalar(T),
    Flat(&'r [T]),
    View(&'r ConcatenatedView<'a, T>),
}

impl<T: Copy> Operand<'_, '_, T> {
    /// How many elements this operand supplies, or `None` for a broadcast scalar.
    pub fn len(&self) -> Option<usize> {
        match self {
            Operand::Scalar(_) => None,
            Operand::Flat(x) => Some(x.len()),
            Operand::View(x) => Some(x.len()),
        }
    }
}

impl<'r, T> From<&'r [T]> for Operand<'r, '_, T> {
    fn from(value: &'r [T]) -> Self {
        Operand::Flat(value)
    }
}

impl<'r, T> From<&'r Vec<T>> for Operand<'r, '_, T> {
    fn from(value: &'r Vec<T>) -> Self {
        Operand::Flat(&value[..])
    }
}

impl<'r, 'a, T> From<&'r ConcatenatedView<'a, T>> for Operand<'r, 'a, T> {
    fn from(value: &'r ConcatenatedView<'a, T>) -> Self {
        Operand::View(value)
    }
}

macro_rules! scalar_operand {
    ($($t: ty),*) => {
        $(
            impl From<$t> for Operand<'_, '_, $t> {
                fn from(value: $t) -> Self {
                    Operand::Scalar(value)
                }
            }
        )*
    };
}

scalar_operand!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);
