use pixel_views::{Plane, ViewError};

use crate::color::{Hsv, Rgb, RgbRef};
use crate::config::Pixel;
use crate::error::Result;
use crate::strip::StripError;

/// The element-level interface shared by [crate::Strip] and [crate::StripSet].
///
/// Anything with three equally long channel planes is a sequence of pixels.  Indices are Python-style.  Every write
/// goes straight to the planes, and so to whatever hardware buffer they alias.
pub trait LedPixels {
    type Plane: Plane<Pixel>;

    fn red(&self) -> &Self::Plane;
    fn green(&self) -> &Self::Plane;
    fn blue(&self) -> &Self::Plane;

    fn len(&self) -> usize {
        self.red().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A writable reference to one pixel.
    fn pixel(&self, index: isize) -> Result<RgbRef<'_>> {
        Ok(RgbRef::new(
            self.red().cell(index)?,
            self.green().cell(index)?,
            self.blue().cell(index)?,
        ))
    }

    fn get(&self, index: isize) -> Result<Rgb> {
        Ok(self.pixel(index)?.get())
    }

    /// Set one pixel from anything that converts to RGB, including [Hsv].
    fn set(&self, index: isize, color: impl Into<Rgb>) -> Result<()> {
        self.pixel(index)?.set(color);
        Ok(())
    }

    fn get_hsv(&self, index: isize) -> Result<Hsv> {
        Ok(self.get(index)?.to_hsv())
    }

    fn set_hsv(&self, index: isize, hsv: Hsv) -> Result<()> {
        self.set(index, hsv.to_rgb())
    }

    fn iter(&self) -> Pixels<'_, Self::Plane> {
        Pixels {
            red: self.red().cells(),
            green: self.green().cells(),
            blue: self.blue().cells(),
        }
    }

    /// Copy every pixel out.
    fn colors(&self) -> Vec<Rgb> {
        self.iter().map(|p| p.get()).collect()
    }

    /// Replace the red plane wholesale.
    fn set_red(&self, values: &[Pixel]) -> Result<()> {
        Ok(self.red().copy_from_slice(values)?)
    }

    fn set_green(&self, values: &[Pixel]) -> Result<()> {
        Ok(self.green().copy_from_slice(values)?)
    }

    fn set_blue(&self, values: &[Pixel]) -> Result<()> {
        Ok(self.blue().copy_from_slice(values)?)
    }

    /// Per-pixel `max(r, g, b)`, in `[0, 1]`.
    fn brightness(&self) -> Vec<f32> {
        self.iter().map(|p| p.get().brightness()).collect()
    }

    /// Every pixel as a `[hue, saturation, value]` row.
    fn hsv(&self) -> Vec<[f32; 3]> {
        self.iter()
            .map(|p| {
                let hsv = Hsv::from(p);
                [hsv.hue, hsv.saturation, hsv.value]
            })
            .collect()
    }

    /// Set every pixel from a `[len, 3]` table of `[hue, saturation, value]` rows.
    ///
    /// The whole table is checked before anything is written.
    fn set_hsv_table<R: AsRef<[f32]>>(&self, table: &[R]) -> Result<()> {
        let shape_error = |width| StripError::ShapeMismatch {
            rows: table.len(),
            width,
            expected_rows: self.len(),
        };

        if table.len() != self.len() {
            let width = table.first().map(|r| r.as_ref().len()).unwrap_or(3);
            return Err(shape_error(width).into());
        }

        if let Some(bad) = table.iter().find(|r| r.as_ref().len() != 3) {
            return Err(shape_error(bad.as_ref().len()).into());
        }

        for (pixel, row) in self.iter().zip(table.iter()) {
            let row = row.as_ref();
            pixel.set(Hsv::new(row[0], row[1], row[2]));
        }

        Ok(())
    }

    /// Set every pixel from three parallel arrays, each as long as this.
    fn set_hsv_planes(&self, hue: &[f32], saturation: &[f32], value: &[f32]) -> Result<()> {
        for plane in [hue, saturation, value] {
            if plane.len() != self.len() {
                return Err(ViewError::SizeMismatch {
                    expected: self.len(),
                    actual: plane.len(),
                }
                .into());
            }
        }

        for (i, pixel) in self.iter().enumerate() {
            pixel.set(Hsv::new(hue[i], saturation[i], value[i]));
        }

        Ok(())
    }

    /// Is any channel of any pixel above zero?
    ///
    /// White is not modeled, so a strip lit only in white reads as off.
    fn is_on(&self) -> bool {
        [self.red(), self.green(), self.blue()]
            .into_iter()
            .any(|plane| plane.cells().any(|c| c.get() > 0))
    }

    fn fill(&self, color: impl Into<Rgb>) {
        let color = color.into();
        self.red().fill(color.red);
        self.green().fill(color.green);
        self.blue().fill(color.blue);
    }

    fn clear(&self) {
        self.fill(Rgb::default());
    }

    /// Move every pixel `n` places toward the start and fill the vacated tail.
    ///
    /// If `n` is at least the length, this is [LedPixels::fill].
    fn left(&self, n: usize, fill: impl Into<Rgb>) {
        let fill = fill.into();
        self.red().shift_left(n, fill.red);
        self.green().shift_left(n, fill.green);
        self.blue().shift_left(n, fill.blue);
    }

    /// Move every pixel `n` places toward the end and fill the vacated head.
    ///
    /// If `n` is at least the length, this is [LedPixels::fill].
    fn right(&self, n: usize, fill: impl Into<Rgb>) {
        let fill = fill.into();
        self.red().shift_right(n, fill.red);
        self.green().shift_right(n, fill.green);
        self.blue().shift_right(n, fill.blue);
    }

    /// Write successive colors to successive pixels, stopping when either runs out.
    ///
    /// Returns how many pixels were written.
    fn paint<C: Into<Rgb>>(&self, colors: impl IntoIterator<Item = C>) -> usize {
        let mut written = 0;
        for (pixel, color) in self.iter().zip(colors) {
            pixel.set(color);
            written += 1;
        }
        written
    }
}

/// Iterator over the pixels of anything implementing [LedPixels].
pub struct Pixels<'s, P: Plane<Pixel> + 's> {
    red: P::Cells<'s>,
    green: P::Cells<'s>,
    blue: P::Cells<'s>,
}

impl<'s, P: Plane<Pixel> + 's> Iterator for Pixels<'s, P> {
    type Item = RgbRef<'s>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(RgbRef::new(
            self.red.next()?,
            self.green.next()?,
            self.blue.next()?,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.red.size_hint()
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        Some(RgbRef::new(
            self.red.nth(n)?,
            self.green.nth(n)?,
            self.blue.nth(n)?,
        ))
    }
}

impl<'s, P: Plane<Pixel> + 's> DoubleEndedIterator for Pixels<'s, P> {
    fn next_back(&mut self) -> Option<Self::Item> {
        Some(RgbRef::new(
            self.red.next_back()?,
            self.green.next_back()?,
            self.blue.next_back()?,
        ))
    }
}

impl<'s, P: Plane<Pixel> + 's> ExactSizeIterator for Pixels<'s, P> {}
