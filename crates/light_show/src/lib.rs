//! Pixel-level control of addressable LED strips.
//!
//! A [Strip] is three channel planes over one interleaved hardware buffer.  A [StripSet] joins several strips into
//! one long index space.  Both are driven through [LedPixels], and pushed out to hardware by a
//! [controller::Render] implementation.
//!
//! Nothing is copied on the way: strips, sets and their slices all alias the controller's buffers, and are only
//! transmitted on render.
mod color;
pub mod config;
pub mod controller;
mod error;
pub mod palette;
mod pixels;
mod strip;
mod strip_set;

#[cfg(test)]
mod close_floats;

pub use color::{colors, Hsv, Rgb, RgbRef};
pub use controller::{MemoryController, Render};
pub use error::{Error, Result};
pub use pixels::{LedPixels, Pixels};
pub use strip::{Strip, StripError};
pub use strip_set::StripSet;

pub use pixel_views;
pub use pixel_views::{Plane, ViewError};
