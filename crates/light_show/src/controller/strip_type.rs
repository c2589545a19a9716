use crate::config::{BLUE_OFFSET, GREEN_OFFSET, RED_OFFSET, WHITE_OFFSET};

/// One byte of a pixel.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
    White,
}

impl Channel {
    /// Where this channel lives within a pixel of a hardware buffer.
    pub fn offset(self) -> usize {
        match self {
            Channel::Red => RED_OFFSET,
            Channel::Green => GREEN_OFFSET,
            Channel::Blue => BLUE_OFFSET,
            Channel::White => WHITE_OFFSET,
        }
    }
}

/// The order in which a strip expects to receive the channels of each pixel.
///
/// The four-letter variants are RGBW strips, which take a white byte as well.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum StripType {
    Rgbw,
    Rbgw,
    Grbw,
    Gbrw,
    Brgw,
    Bgrw,
    Rgb,
    Rbg,
    #[default]
    Grb,
    Gbr,
    Brg,
    Bgr,
}

impl StripType {
    pub const ALL: [StripType; 12] = [
        StripType::Rgbw,
        StripType::Rbgw,
        StripType::Grbw,
        StripType::Gbrw,
        StripType::Brgw,
        StripType::Bgrw,
        StripType::Rgb,
        StripType::Rbg,
        StripType::Grb,
        StripType::Gbr,
        StripType::Brg,
        StripType::Bgr,
    ];

    /// Channels in the order they go out on the wire.
    pub fn wire_order(self) -> &'static [Channel] {
        use Channel::*;

        match self {
            StripType::Rgbw => &[Red, Green, Blue, White],
            StripType::Rbgw => &[Red, Blue, Green, White],
            StripType::Grbw => &[Green, Red, Blue, White],
            StripType::Gbrw => &[Green, Blue, Red, White],
            StripType::Brgw => &[Blue, Red, Green, White],
            StripType::Bgrw => &[Blue, Green, Red, White],
            StripType::Rgb => &[Red, Green, Blue],
            StripType::Rbg => &[Red, Blue, Green],
            StripType::Grb => &[Green, Red, Blue],
            StripType::Gbr => &[Green, Blue, Red],
            StripType::Brg => &[Blue, Red, Green],
            StripType::Bgr => &[Blue, Green, Red],
        }
    }

    pub fn has_white(self) -> bool {
        self.wire_order().len() == 4
    }

    /// Parse the conventional name, e.g. `"GRB"` or `"rgbw"`.
    pub fn from_name(name: &str) -> Option<StripType> {
        Self::ALL.into_iter().find(|t| {
            let order = t.wire_order();
            order.len() == name.len()
                && order.iter().zip(name.chars()).all(|(c, n)| {
                    let letter = match c {
                        Channel::Red => 'r',
                        Channel::Green => 'g',
                        Channel::Blue => 'b',
                        Channel::White => 'w',
                    };
                    letter == n.to_ascii_lowercase()
                })
        })
    }
}
