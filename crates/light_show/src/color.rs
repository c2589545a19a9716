//! The color model: owned RGB values, RGB references into pixel planes, and HSV.
//!
//! RGB is what the hardware stores.  HSV is a convenience for callers and is converted on every read and write.  All
//! floats are in `[0, 1]`; hue wraps around, so `1.25` and `0.25` are the same hue.
use std::cell::Cell;
use std::fmt;

use crate::config::{Pixel, PIXEL_MAX};

/// An owned color.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Rgb {
    pub red: Pixel,
    pub green: Pixel,
    pub blue: Pixel,
}

impl Rgb {
    pub const fn new(red: Pixel, green: Pixel, blue: Pixel) -> Self {
        Self { red, green, blue }
    }

    pub fn max(&self) -> Pixel {
        self.red.max(self.green).max(self.blue)
    }

    pub fn min(&self) -> Pixel {
        self.red.min(self.green).min(self.blue)
    }

    pub fn to_hsv(self) -> Hsv {
        Hsv::from(self)
    }

    /// `max(r, g, b)` scaled into `[0, 1]`.
    pub fn brightness(&self) -> f32 {
        self.max() as f32 / PIXEL_MAX as f32
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColorRGB({},{},{})", self.red, self.green, self.blue)
    }
}

/// A color that lives in three separate planes.
///
/// Each channel of a pixel sits in a different place in memory (every fourth byte of a hardware buffer, at different
/// offsets), so this is three independent cells rather than a pointer to a contiguous triple.  Writing through it
/// writes the underlying pixel immediately.
#[derive(Copy, Clone)]
pub struct RgbRef<'c> {
    red: &'c Cell<Pixel>,
    green: &'c Cell<Pixel>,
    blue: &'c Cell<Pixel>,
}

impl<'c> RgbRef<'c> {
    pub fn new(red: &'c Cell<Pixel>, green: &'c Cell<Pixel>, blue: &'c Cell<Pixel>) -> Self {
        Self { red, green, blue }
    }

    /// Read the current value out.
    pub fn get(&self) -> Rgb {
        Rgb::new(self.red.get(), self.green.get(), self.blue.get())
    }

    /// Write a color: three independent writes.
    pub fn set(&self, color: impl Into<Rgb>) {
        let color = color.into();
        self.red.set(color.red);
        self.green.set(color.green);
        self.blue.set(color.blue);
    }

    /// Copy another referenced pixel into this one.
    pub fn assign(&self, other: &RgbRef<'_>) {
        self.set(other.get());
    }

    pub fn red(&self) -> &'c Cell<Pixel> {
        self.red
    }

    pub fn green(&self) -> &'c Cell<Pixel> {
        self.green
    }

    pub fn blue(&self) -> &'c Cell<Pixel> {
        self.blue
    }
}

impl From<RgbRef<'_>> for Rgb {
    fn from(value: RgbRef<'_>) -> Self {
        value.get()
    }
}

impl fmt::Debug for RgbRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RgbRef").field(&self.get()).finish()
    }
}

impl fmt::Display for RgbRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.get();
        write!(f, "ColorRGBRef({},{},{})", c.red, c.green, c.blue)
    }
}

/// Hue, saturation and value, each in `[0, 1]`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Hsv {
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
}

impl Hsv {
    pub const fn new(hue: f32, saturation: f32, value: f32) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    /// Convert to RGB.
    ///
    /// Channels are truncated toward zero, not rounded, when scaled back to integers.  Any finite hue is accepted and
    /// wrapped into a sector.
    pub fn to_rgb(self) -> Rgb {
        let scale = |x: f32| (x * PIXEL_MAX as f32) as Pixel;

        if self.saturation == 0.0 {
            let v = scale(self.value);
            return Rgb::new(v, v, v);
        }

        let h = self.hue * 6.0;
        let sector = h.floor();
        let f = h - sector;
        let v = self.value;
        let p = v * (1.0 - self.saturation);
        let q = v * (1.0 - self.saturation * f);
        let t = v * (1.0 - self.saturation * (1.0 - f));

        let (r, g, b) = match (sector as i64).rem_euclid(6) {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            5 => (v, p, q),
            _ => unreachable!("rem_euclid(6) is always in [0, 6)"),
        };

        Rgb::new(scale(r), scale(g), scale(b))
    }
}

impl From<Rgb> for Hsv {
    /// The six-piece conversion.
    ///
    /// Achromatic colors, where every channel is exactly equal, come out with hue and saturation 0.  Their hue is
    /// meaningless and does not survive a round trip.
    fn from(rgb: Rgb) -> Self {
        let max = rgb.max();
        let min = rgb.min();
        let value = max as f32 / PIXEL_MAX as f32;

        if min == max {
            return Hsv::new(0.0, 0.0, value);
        }

        let max = max as f32;
        let diff = max - min as f32;
        let saturation = diff / max;

        let rr = (max - rgb.red as f32) / diff;
        let gg = (max - rgb.green as f32) / diff;
        let bb = (max - rgb.blue as f32) / diff;

        let hue = if rgb.red as f32 == max {
            (bb - gg) / 6.0
        } else if rgb.green as f32 == max {
            (2.0 + rr - bb) / 6.0
        } else {
            (4.0 + gg - rr) / 6.0
        };

        // Red-dominant colors leaning toward blue come out slightly negative.
        let hue = hue.rem_euclid(1.0);

        Hsv::new(hue, saturation, value)
    }
}

impl From<Hsv> for Rgb {
    fn from(value: Hsv) -> Self {
        value.to_rgb()
    }
}

impl From<RgbRef<'_>> for Hsv {
    fn from(value: RgbRef<'_>) -> Self {
        Hsv::from(value.get())
    }
}

impl From<(Pixel, Pixel, Pixel)> for Rgb {
    fn from((red, green, blue): (Pixel, Pixel, Pixel)) -> Self {
        Rgb::new(red, green, blue)
    }
}

impl fmt::Display for Hsv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ColorHSV({},{},{})",
            self.hue, self.saturation, self.value
        )
    }
}

/// Named colors.
pub mod colors {
    use super::Rgb;

    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const ORANGE: Rgb = Rgb::new(255, 165, 0);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const MAGENTA: Rgb = Rgb::new(255, 0, 255);
    pub const CYAN: Rgb = Rgb::new(0, 255, 255);
    pub const PINK: Rgb = Rgb::new(255, 20, 147);
    pub const BROWN: Rgb = Rgb::new(210, 105, 30);
    pub const SKY: Rgb = Rgb::new(0, 191, 255);
    pub const AQUA: Rgb = Rgb::new(127, 255, 212);
    pub const CRIMSON: Rgb = Rgb::new(220, 20, 60);
    pub const GOLD: Rgb = Rgb::new(255, 215, 0);

    /// Every named color, by its upper-case name.
    pub const NAMED: &[(&str, Rgb)] = &[
        ("WHITE", WHITE),
        ("BLACK", BLACK),
        ("RED", RED),
        ("ORANGE", ORANGE),
        ("YELLOW", YELLOW),
        ("GREEN", GREEN),
        ("BLUE", BLUE),
        ("MAGENTA", MAGENTA),
        ("CYAN", CYAN),
        ("PINK", PINK),
        ("BROWN", BROWN),
        ("SKY", SKY),
        ("AQUA", AQUA),
        ("CRIMSON", CRIMSON),
        ("GOLD", GOLD),
    ];

    /// Look a color up by name, ignoring case.
    pub fn by_name(name: &str) -> Option<Rgb> {
        NAMED
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, c)| *c)
    }
}

#[cfg(test)]
mod tests {
    use super::colors::*;
    use super::*;
    use crate::close_floats::close_floats32;

    use proptest::prelude::*;

    #[test]
    fn test_primaries() {
        assert_eq!(Hsv::from(RED), Hsv::new(0.0, 1.0, 1.0));
        close_floats32(Hsv::from(GREEN).hue, 1.0 / 3.0, 1e-6);
        close_floats32(Hsv::from(BLUE).hue, 2.0 / 3.0, 1e-6);

        assert_eq!(Hsv::new(0.0, 1.0, 1.0).to_rgb(), RED);
        assert_eq!(Hsv::new(1.0 / 3.0, 1.0, 1.0).to_rgb(), GREEN);
        assert_eq!(Hsv::new(2.0 / 3.0, 1.0, 1.0).to_rgb(), BLUE);
    }

    #[test]
    fn test_achromatic() {
        let hsv = Hsv::from(Rgb::new(51, 51, 51));
        assert_eq!(hsv.hue, 0.0);
        assert_eq!(hsv.saturation, 0.0);
        close_floats32(hsv.value, 0.2, 1e-6);

        assert_eq!(Hsv::new(0.7, 0.0, 1.0).to_rgb(), WHITE);
        assert_eq!(Hsv::new(0.0, 0.0, 0.0).to_rgb(), BLACK);
    }

    #[test]
    fn test_negative_hue_wraps() {
        // Red is max and blue exceeds green, which lands just below 0 before wrapping.
        let hsv = Hsv::from(Rgb::new(255, 0, 10));
        assert!((0.0..1.0).contains(&hsv.hue));
        assert!(hsv.hue > 0.9);
    }

    #[test]
    fn test_out_of_range_hue() {
        assert_eq!(Hsv::new(1.0, 1.0, 1.0).to_rgb(), RED);
        assert_eq!(Hsv::new(-2.0 / 3.0, 1.0, 1.0).to_rgb(), GREEN);
    }

    #[test]
    fn test_truncates() {
        // 0.5 * 255 = 127.5.
        assert_eq!(Hsv::new(0.0, 0.0, 0.5).to_rgb(), Rgb::new(127, 127, 127));
    }

    #[test]
    fn test_rgb_ref() {
        let cells = [Cell::new(0u8), Cell::new(0u8), Cell::new(0u8)];
        let r = RgbRef::new(&cells[2], &cells[1], &cells[0]);
        r.set(ORANGE);
        assert_eq!(
            [cells[0].get(), cells[1].get(), cells[2].get()],
            [0, 165, 255]
        );
        assert_eq!(Rgb::from(r), ORANGE);

        r.set(Hsv::new(2.0 / 3.0, 1.0, 1.0));
        assert_eq!(r.get(), BLUE);
    }

    #[test]
    fn test_display() {
        assert_eq!(PINK.to_string(), "ColorRGB(255,20,147)");
        assert_eq!(Hsv::new(0.5, 1.0, 0.25).to_string(), "ColorHSV(0.5,1,0.25)");

        let cells = [Cell::new(1u8), Cell::new(2u8), Cell::new(3u8)];
        let r = RgbRef::new(&cells[0], &cells[1], &cells[2]);
        assert_eq!(r.to_string(), "ColorRGBRef(1,2,3)");
    }

    #[test]
    fn test_by_name() {
        assert_eq!(by_name("crimson"), Some(CRIMSON));
        assert_eq!(by_name("Gold"), Some(GOLD));
        assert_eq!(by_name("chartreuse"), None);
        assert_eq!(NAMED.len(), 15);
    }

    /// Distance between two hues on the color wheel.
    fn hue_distance(a: f32, b: f32) -> f32 {
        let d = (a - b).rem_euclid(1.0);
        d.min(1.0 - d)
    }

    proptest! {
        #![proptest_config(ProptestConfig{cases: 2000, ..Default::default()})]

        #[test]
        fn test_hsv_round_trip(hue in 0.0f32..1.0, saturation in 0.25f32..=1.0, value in 0.25f32..=1.0) {
            let rgb = Hsv::new(hue, saturation, value).to_rgb();
            let back = Hsv::from(rgb);

            // Truncation to 8 bits loses up to 1/255 per channel, which is amplified in the hue by dark,
            // desaturated colors.
            prop_assert!(hue_distance(hue, back.hue) < 0.03, "{hue} vs {}", back.hue);
            prop_assert!((saturation - back.saturation).abs() < 0.04);
            prop_assert!((value - back.value).abs() < 0.01);
        }

        #[test]
        fn test_rgb_round_trip(red in any::<u8>(), green in any::<u8>(), blue in any::<u8>()) {
            let rgb = Rgb::new(red, green, blue);
            let back = Hsv::from(rgb).to_rgb();
            prop_assert!(red.abs_diff(back.red) <= 2);
            prop_assert!(green.abs_diff(back.green) <= 2);
            prop_assert!(blue.abs_diff(back.blue) <= 2);
        }
    }
}
