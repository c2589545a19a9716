//! Compile-time configuration of the pixel layout and the controller.

/// One 8-bit color-channel intensity.
pub type Pixel = u8;

/// The brightest value a channel can hold.  Floats in `[0, 1]` are scaled by this.
pub const PIXEL_MAX: Pixel = Pixel::MAX;

/// Width of one pixel in a hardware buffer.
///
/// Hardware buffers are packed 32-bit little-endian words of the form `0xWWRRGGBB`, so byte 0 is blue, byte 1 green,
/// byte 2 red and byte 3 white.  White is not modeled.
pub const BYTES_PER_PIXEL: usize = 4;

pub const BLUE_OFFSET: usize = 0;
pub const GREEN_OFFSET: usize = 1;
pub const RED_OFFSET: usize = 2;
pub const WHITE_OFFSET: usize = 3;

/// How many channels (independent strips, each on its own pin) a controller can drive.
pub const MAX_CHANNELS: usize = 2;

/// DMA channel used when a configuration doesn't specify one.
pub const DEFAULT_DMA: u32 = 10;

/// Transmission frequency of the strip protocol, in Hz.
pub const TARGET_FREQUENCY: u32 = 800_000;
