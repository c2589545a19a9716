//! Endless sources of colors, for feeding to [crate::LedPixels::paint] and friends.
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::color::{colors, Hsv, Rgb};

/// `num` evenly spaced, fully saturated hues, repeating forever.
#[derive(Clone, Debug)]
pub struct Rainbow {
    colors: Vec<Hsv>,
    index: usize,
}

impl Rainbow {
    /// Start at the `start`th hue (wrapping), with every color at the given value.
    pub fn new(num: usize, start: usize, value: f32) -> Self {
        let colors = (0..num)
            .map(|i| Hsv::new(i as f32 / num as f32, 1.0, value))
            .collect();
        Self {
            colors,
            index: if num == 0 { 0 } else { start % num },
        }
    }
}

impl Iterator for Rainbow {
    type Item = Hsv;

    fn next(&mut self) -> Option<Hsv> {
        let ret = *self.colors.get(self.index)?;
        self.index = (self.index + 1) % self.colors.len();
        Some(ret)
    }
}

/// A fixed list of colors, repeating forever.
#[derive(Clone, Debug)]
pub struct CycleColors {
    colors: Vec<Rgb>,
    index: usize,
}

impl CycleColors {
    pub fn new<C: Into<Rgb>>(colors: impl IntoIterator<Item = C>) -> Self {
        Self {
            colors: colors.into_iter().map(Into::into).collect(),
            index: 0,
        }
    }
}

impl Iterator for CycleColors {
    type Item = Rgb;

    fn next(&mut self) -> Option<Rgb> {
        let ret = *self.colors.get(self.index)?;
        self.index = (self.index + 1) % self.colors.len();
        Some(ret)
    }
}

pub fn christmas() -> CycleColors {
    CycleColors::new([colors::RED, colors::GREEN])
}

pub fn new_year() -> CycleColors {
    CycleColors::new([colors::WHITE, colors::BLUE])
}

/// Fully saturated colors of uniformly random hue.
///
/// Seeded, so a given seed always produces the same show.
#[derive(Clone, Debug)]
pub struct RandomHue {
    rng: Xoshiro256PlusPlus,
    value: f32,
}

impl RandomHue {
    pub fn new(seed: u64, value: f32) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
            value,
        }
    }
}

impl Iterator for RandomHue {
    type Item = Hsv;

    fn next(&mut self) -> Option<Hsv> {
        Some(Hsv::new(self.rng.gen::<f32>(), 1.0, self.value))
    }
}
