use std::cell::Cell;
use std::fmt;

use pixel_views::{Plane, StridedView};

use crate::config::{Pixel, BLUE_OFFSET, BYTES_PER_PIXEL, GREEN_OFFSET, RED_OFFSET};
use crate::error::Result;
use crate::pixels::LedPixels;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum StripError {
    #[error("Channel planes differ in length: red {red}, green {green}, blue {blue}")]
    LengthMismatch {
        red: usize,
        green: usize,
        blue: usize,
    },

    #[error("HSV table has shape [{rows}, {width}] but must be [{expected_rows}, 3]")]
    ShapeMismatch {
        rows: usize,
        width: usize,
        expected_rows: usize,
    },

    #[error("A hardware buffer of {len} bytes is not a whole number of 4-byte pixels")]
    MisalignedBuffer { len: usize },
}

/// One physical strip: three equally long channel planes.
///
/// The planes usually alias one interleaved hardware buffer, and a strip can never outlive that buffer.  Cloning or
/// slicing a strip yields another strip over the same memory.
#[derive(Clone)]
pub struct Strip<'a> {
    red: StridedView<'a, Pixel>,
    green: StridedView<'a, Pixel>,
    blue: StridedView<'a, Pixel>,
}

impl<'a> Strip<'a> {
    /// Build a strip from three planes, which must have the same length.
    pub fn new(
        red: StridedView<'a, Pixel>,
        green: StridedView<'a, Pixel>,
        blue: StridedView<'a, Pixel>,
    ) -> Result<Self> {
        if red.len() != green.len() || red.len() != blue.len() {
            return Err(StripError::LengthMismatch {
                red: red.len(),
                green: green.len(),
                blue: blue.len(),
            }
            .into());
        }

        Ok(Self { red, green, blue })
    }

    /// Address an interleaved hardware buffer of [BYTES_PER_PIXEL]-byte pixels.
    ///
    /// The buffer's contents are left alone.
    pub fn from_buffer(buffer: &'a [Cell<Pixel>]) -> Result<Self> {
        if buffer.len() % BYTES_PER_PIXEL != 0 {
            return Err(StripError::MisalignedBuffer { len: buffer.len() }.into());
        }

        let num = buffer.len() / BYTES_PER_PIXEL;
        let channel = |offset| StridedView::new(buffer, offset, num, BYTES_PER_PIXEL);

        Strip::new(
            channel(RED_OFFSET)?,
            channel(GREEN_OFFSET)?,
            channel(BLUE_OFFSET)?,
        )
    }

    /// Like [Strip::from_buffer], for a buffer we have exclusive access to.
    ///
    /// ```
    /// use light_show::{colors, LedPixels, Strip};
    ///
    /// let mut buffer = vec![0u8; 8];
    /// Strip::from_bytes(&mut buffer).unwrap().fill(colors::RED);
    /// assert_eq!(buffer, [0, 0, 255, 0, 0, 0, 255, 0]);
    /// ```
    ///
    /// The strip borrows the buffer, so it can't be used once the buffer is gone:
    ///
    /// ```compile_fail
    /// use light_show::{LedPixels, Strip};
    ///
    /// let strip = {
    ///     let mut buffer = vec![0u8; 8];
    ///     Strip::from_bytes(&mut buffer).unwrap()
    /// };
    /// strip.clear();
    /// ```
    ///
    /// Nor can it be shared with another thread while this one may still write to it:
    ///
    /// ```compile_fail
    /// use light_show::{LedPixels, Strip};
    ///
    /// let mut buffer = vec![0u8; 8];
    /// let strip = Strip::from_bytes(&mut buffer).unwrap();
    /// std::thread::scope(|s| {
    ///     s.spawn(|| strip.clear());
    ///     strip.clear();
    /// });
    /// ```
    ///
    /// Or moved to one, even when it owns its memory:
    ///
    /// ```compile_fail
    /// use light_show::pixel_views::StridedView;
    /// use light_show::{LedPixels, Strip};
    ///
    /// let plane = || StridedView::owned(vec![0u8; 2]);
    /// let strip = Strip::new(plane(), plane(), plane()).unwrap();
    /// std::thread::spawn(move || strip.clear()).join().unwrap();
    /// ```
    pub fn from_bytes(bytes: &'a mut [Pixel]) -> Result<Self> {
        Self::from_buffer(Cell::from_mut(bytes).as_slice_of_cells())
    }

    /// The strip made of every `step`th pixel of `start..stop`, sharing memory with this one.
    ///
    /// `start` and `stop` must already be normalized.  `stop` is clamped to the length.
    pub fn slice(&self, start: usize, stop: usize, step: usize) -> Result<Strip<'a>> {
        Ok(Strip {
            red: self.red.slice(start, stop, step)?,
            green: self.green.slice(start, stop, step)?,
            blue: self.blue.slice(start, stop, step)?,
        })
    }
}

impl<'a> LedPixels for Strip<'a> {
    type Plane = StridedView<'a, Pixel>;

    fn red(&self) -> &Self::Plane {
        &self.red
    }

    fn green(&self) -> &Self::Plane {
        &self.green
    }

    fn blue(&self) -> &Self::Plane {
        &self.blue
    }
}

impl fmt::Debug for Strip<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.colors()).finish()
    }
}
