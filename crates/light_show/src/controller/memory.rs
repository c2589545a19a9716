use std::cell::{Cell, RefCell};
use std::fmt;

use pixel_views::normalize_index;

use crate::config::{Pixel, BYTES_PER_PIXEL};
use crate::error::Result;
use crate::strip::Strip;
use crate::strip_set::StripSet;

use super::{ChannelConfig, ControllerConfig, Render};

/// A controller whose "hardware" is a set of recorded frames.
///
/// Each channel gets a zeroed buffer of [BYTES_PER_PIXEL] bytes per pixel, laid out exactly as a hardware driver would
/// lay it out.  Rendering serializes every channel in its strip's wire order, applying brightness and inversion, and
/// keeps the result as the channel's last frame.
///
/// As with real hardware, dropping the controller turns every strip off.
pub struct MemoryController {
    config: ControllerConfig,
    buffers: Vec<Box<[Cell<Pixel>]>>,
    frames: RefCell<Vec<Vec<u8>>>,
    render_count: Cell<usize>,
}

impl MemoryController {
    pub fn new(config: ControllerConfig) -> Result<Self> {
        config.validate()?;

        log::debug!(
            "Starting controller with {} channels on DMA {} at {} Hz",
            config.channels.len(),
            config.dma,
            config.frequency
        );

        let buffers = config
            .channels
            .iter()
            .enumerate()
            .map(|(i, c)| {
                log::debug!("Allocating {} pixels for channel {} on GPIO {}", c.count, i, c.gpio);
                (0..c.count * BYTES_PER_PIXEL).map(|_| Cell::new(0)).collect()
            })
            .collect();

        Ok(Self {
            frames: RefCell::new(vec![vec![]; config.channels.len()]),
            config,
            buffers,
            render_count: Cell::new(0),
        })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn num_channels(&self) -> usize {
        self.buffers.len()
    }

    /// The strip on one channel.  Python-style indices.
    pub fn strip(&self, index: isize) -> Result<Strip<'_>> {
        let index = normalize_index(index, self.buffers.len())?;
        Strip::from_buffer(&self.buffers[index])
    }

    /// Every channel as one set.
    pub fn all(&self) -> Result<StripSet<'_>> {
        log::debug!("Getting all {} channels", self.buffers.len());
        let strips = self
            .buffers
            .iter()
            .map(|b| Strip::from_buffer(b))
            .collect::<Result<Vec<_>>>()?;
        StripSet::new(strips)
    }

    /// Blank every channel and render.
    pub fn off(&self) -> Result<()> {
        self.blank();
        self.render(true)
    }

    fn blank(&self) {
        for b in self.buffers.iter() {
            b.iter().for_each(|c| c.set(0));
        }
    }

    /// The bytes sent to a channel by the most recent render, or `None` if the channel doesn't exist.
    ///
    /// Empty until the first render.
    pub fn last_frame(&self, channel: usize) -> Option<Vec<u8>> {
        self.frames.borrow().get(channel).cloned()
    }

    pub fn render_count(&self) -> usize {
        self.render_count.get()
    }
}

/// Serialize one channel the way the strip expects to receive it.
fn encode_frame(config: &ChannelConfig, buffer: &[Cell<Pixel>], frame: &mut Vec<u8>) {
    frame.clear();

    let order = config.strip_type.wire_order();
    frame.reserve(config.count * order.len());

    // Brightness scales by `(brightness + 1) / 256`, so that 255 is the identity.
    let scale = config.brightness as u16 + 1;

    for pixel in buffer.chunks_exact(BYTES_PER_PIXEL) {
        for channel in order {
            let raw = pixel[channel.offset()].get() as u16;
            let scaled = ((raw * scale) >> 8) as u8;
            frame.push(if config.invert { !scaled } else { scaled });
        }
    }
}

impl Render for MemoryController {
    fn render(&self, wait: bool) -> Result<()> {
        log::debug!("Rendering {} channels", self.buffers.len());

        let mut frames = self.frames.borrow_mut();
        for ((config, buffer), frame) in self
            .config
            .channels
            .iter()
            .zip(self.buffers.iter())
            .zip(frames.iter_mut())
        {
            encode_frame(config, buffer, frame);
        }

        self.render_count.set(self.render_count.get() + 1);

        if wait {
            // Nothing is asynchronous in memory.
            log::trace!("Render complete");
        }

        Ok(())
    }
}

impl fmt::Debug for MemoryController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryController")
            .field("config", &self.config)
            .field("render_count", &self.render_count.get())
            .finish_non_exhaustive()
    }
}

impl Drop for MemoryController {
    fn drop(&mut self) {
        log::debug!("Shutting down controller; turning everything off");
        if let Err(e) = self.off() {
            log::warn!("Unable to turn strips off while shutting down: {}", e);
        }
    }
}
