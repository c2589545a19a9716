//! The boundary with the hardware that owns the pixel buffers.
//!
//! A controller allocates one interleaved buffer per channel, hands out [crate::Strip]s over them, and transmits them
//! on [Render::render].  Only a software controller lives here; it stands in for the hardware driver wherever there
//! is no hardware, and records what would have been sent.
mod channel_config;
mod memory;
mod strip_type;

pub use channel_config::*;
pub use memory::*;
pub use strip_type::*;

use crate::error::Result;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum ControllerError {
    #[error("{requested} channels were requested but at most {max} are supported")]
    TooManyChannels { requested: usize, max: usize },

    #[error("Per-channel arrays differ in length: {gpio} pins, {counts} counts, {types} strip types")]
    LengthMismatch {
        gpio: usize,
        counts: usize,
        types: usize,
    },

    #[error("Channel {channel} was given a negative length of {count}")]
    NegativeLength { channel: usize, count: i64 },
}

/// Something that can push pixel buffers out to the strips.
pub trait Render {
    /// Transmit the current contents of every channel.
    ///
    /// Writes to strips are only staged in memory until this is called.  If `wait` is set, block until the
    /// transmission has finished.
    fn render(&self, wait: bool) -> Result<()>;
}
