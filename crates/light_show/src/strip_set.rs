use std::fmt;

use pixel_views::{split_slice, ConcatenatedView, Plane, StridedView, ViewError};

use crate::config::Pixel;
use crate::error::Result;
use crate::pixels::LedPixels;
use crate::strip::Strip;

/// Several strips addressed as one long strip.
///
/// Each channel is a [ConcatenatedView] over the matching plane of every member strip, so indexing, slicing and
/// shifting all run across strip boundaries as if they weren't there.  Membership is fixed at construction.
#[derive(Clone)]
pub struct StripSet<'a> {
    strips: Vec<Strip<'a>>,
    red: ConcatenatedView<'a, Pixel>,
    green: ConcatenatedView<'a, Pixel>,
    blue: ConcatenatedView<'a, Pixel>,
}

impl<'a> StripSet<'a> {
    /// Combine strips, in order.  Fails if there are none.
    pub fn new(strips: Vec<Strip<'a>>) -> Result<Self> {
        if strips.is_empty() {
            return Err(ViewError::EmptyConstruction.into());
        }

        let red = concatenate(&strips, |s| s.red())?;
        let green = concatenate(&strips, |s| s.green())?;
        let blue = concatenate(&strips, |s| s.blue())?;

        log::trace!("Built a set of {} strips with {} pixels", strips.len(), red.len());

        Ok(Self {
            strips,
            red,
            green,
            blue,
        })
    }

    /// Flatten several sets into one, keeping the order of both the sets and their strips.
    pub fn from_sets(sets: &[StripSet<'a>]) -> Result<Self> {
        Self::new(sets.iter().flat_map(|s| s.strips.iter().cloned()).collect())
    }

    pub fn strips(&self) -> &[Strip<'a>] {
        &self.strips[..]
    }

    pub fn num_strips(&self) -> usize {
        self.strips.len()
    }

    /// Which strip a Python-style index lands in, and where in that strip.
    pub fn locate(&self, index: isize) -> Result<(usize, usize)> {
        // The red plane has one sub-array per strip, so its resolution is the strip's.
        Ok(self.red.resolve(index)?)
    }

    /// The set made of every `step`th pixel of `start..stop`, across strip boundaries.
    ///
    /// `start` and `stop` must already be normalized.  The result shares memory with this set.  If no strip intersects
    /// the range, this fails as an empty construction.
    pub fn slice(&self, start: usize, stop: usize, step: usize) -> Result<StripSet<'a>> {
        if step == 0 {
            return Err(ViewError::ZeroStep.into());
        }

        let strips = split_slice(self.strips.iter().map(|s| s.len()), start, stop, step)
            .into_iter()
            .map(|s| self.strips[s.segment].slice(s.start, s.stop, step))
            .collect::<Result<Vec<_>>>()?;

        StripSet::new(strips)
    }
}

/// One channel of every strip, as a single view.
fn concatenate<'a>(
    strips: &[Strip<'a>],
    plane: impl for<'s> Fn(&'s Strip<'a>) -> &'s StridedView<'a, Pixel>,
) -> pixel_views::Result<ConcatenatedView<'a, Pixel>> {
    ConcatenatedView::new(strips.iter().map(|s| plane(s).clone()).collect())
}

impl<'a> LedPixels for StripSet<'a> {
    type Plane = ConcatenatedView<'a, Pixel>;

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

impl fmt::Debug for StripSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripSet").field("strips", &self.strips).finish()
    }
}
